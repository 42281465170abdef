use crate::models::{Score, Season, Standings, StandingsEntry};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Win,
    Loss,
    Tie,
}

impl Decision {
    pub fn from_runs(scored: u32, allowed: u32) -> Self {
        match scored.cmp(&allowed) {
            Ordering::Greater => Decision::Win,
            Ordering::Less => Decision::Loss,
            Ordering::Equal => Decision::Tie,
        }
    }
}

impl StandingsEntry {
    pub fn record(&mut self, scored: u32, allowed: u32) -> Decision {
        let decision = Decision::from_runs(scored, allowed);
        match decision {
            Decision::Win => self.wins += 1,
            Decision::Loss => self.losses += 1,
            Decision::Tie => self.ties += 1,
        }
        self.runs_scored += scored;
        self.runs_allowed += allowed;
        decision
    }
}

/// Apply one finished game to both teams.
pub fn record_result(standings: &mut Standings, home_id: &str, away_id: &str, score: &Score) {
    standings.entry(home_id.to_string()).or_default().record(score.home, score.away);
    standings.entry(away_id.to_string()).or_default().record(score.away, score.home);
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandingsRow {
    pub rank: usize,
    pub team_id: String,
    pub team_name: String,
    pub entry: StandingsEntry,
    pub win_pct: f64,
    pub games_back: f64,
}

/// Ordered table: win percentage, then run differential, then team id.
pub fn standings_table(season: &Season) -> Vec<StandingsRow> {
    let mut rows: Vec<(&String, &StandingsEntry)> = season.standings.iter().collect();
    rows.sort_by(|(a_id, a), (b_id, b)| {
        b.win_pct()
            .partial_cmp(&a.win_pct())
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.run_differential().cmp(&a.run_differential()))
            .then_with(|| a_id.cmp(b_id))
    });

    let leader = rows.first().map(|(_, e)| **e).unwrap_or_default();
    rows.into_iter()
        .enumerate()
        .map(|(i, (team_id, entry))| StandingsRow {
            rank: i + 1,
            team_id: team_id.clone(),
            team_name: season
                .team(team_id)
                .map(|t| t.name.clone())
                .unwrap_or_else(|| team_id.clone()),
            entry: *entry,
            win_pct: entry.win_pct(),
            games_back: games_back(&leader, entry),
        })
        .collect()
}

pub fn games_back(leader: &StandingsEntry, entry: &StandingsEntry) -> f64 {
    let wins = leader.wins as f64 - entry.wins as f64;
    let losses = entry.losses as f64 - leader.losses as f64;
    (wins + losses) / 2.0
}
