//! Plain-text tables for terminal output.

use diamond_core::engine::TeamBox;
use diamond_core::season::StandingsRow;
use diamond_core::{GameResult, Side};
use std::fmt::Write;

/// Inning-by-inning runs with R/H/E totals, away team first.
pub fn line_score(result: &GameResult, away_name: &str, home_name: &str) -> String {
    let innings = result.line_score.away.len().max(result.line_score.home.len());
    let width = away_name.len().max(home_name.len()).max(4);

    let mut out = String::new();
    let _ = write!(out, "{:<width$} |", "");
    for inning in 1..=innings {
        let _ = write!(out, "{inning:>3}");
    }
    let _ = writeln!(out, " |   R   H   E");

    for (side, name) in [(Side::Away, away_name), (Side::Home, home_name)] {
        let runs = result.line_score.get(side);
        let _ = write!(out, "{name:<width$} |");
        for inning in 0..innings {
            match runs.get(inning) {
                Some(r) => {
                    let _ = write!(out, "{r:>3}");
                }
                None => out.push_str("  x"),
            }
        }
        let stats = result.final_state.stats.get(side);
        let _ = writeln!(
            out,
            " | {:>3} {:>3} {:>3}",
            result.score.get(side),
            stats.hits,
            stats.errors
        );
    }
    out
}

fn team_box(out: &mut String, title: &str, team: &TeamBox) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(
        out,
        "  {:<20} {:>3} {:>3} {:>3} {:>3} {:>3} {:>3} {:>3}",
        "", "PA", "AB", "R", "H", "RBI", "BB", "SO"
    );
    for line in &team.batting {
        let _ = writeln!(
            out,
            "  {:<20} {:>3} {:>3} {:>3} {:>3} {:>3} {:>3} {:>3}",
            line.name,
            line.plate_appearances(),
            line.at_bats,
            line.runs,
            line.hits,
            line.rbi,
            line.walks,
            line.strikeouts
        );
    }
    let _ = writeln!(out, "  LOB: {}", team.left_on_base);
    if let Some(p) = &team.pitching {
        let _ = writeln!(
            out,
            "  {:<20} IP {:>4}  H {:>2}  R {:>2}  BB {:>2}  SO {:>2}  HR {:>2}",
            p.name,
            p.innings_pitched(),
            p.hits_allowed,
            p.runs_allowed,
            p.walks,
            p.strikeouts,
            p.home_runs_allowed
        );
    }
}

pub fn box_score(result: &GameResult, away_name: &str, home_name: &str) -> String {
    let mut out = String::new();
    team_box(&mut out, &format!("{away_name} (away)"), &result.box_score.away);
    out.push('\n');
    team_box(&mut out, &format!("{home_name} (home)"), &result.box_score.home);
    out
}

pub fn standings(rows: &[StandingsRow]) -> String {
    let width = rows.iter().map(|r| r.team_name.len()).max().unwrap_or(4).max(4);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>2}  {:<width$} {:>4} {:>4} {:>4} {:>6} {:>5} {:>5}",
        "#", "Team", "W", "L", "T", "PCT", "GB", "DIFF"
    );
    for row in rows {
        let gb = if row.games_back == 0.0 {
            "-".to_string()
        } else {
            format!("{:.1}", row.games_back)
        };
        let _ = writeln!(
            out,
            "{:>2}  {:<width$} {:>4} {:>4} {:>4} {:>6.3} {:>5} {:>+5}",
            row.rank,
            row.team_name,
            row.entry.wins,
            row.entry.losses,
            row.entry.ties,
            row.win_pct,
            gb,
            row.entry.run_differential()
        );
    }
    out
}
