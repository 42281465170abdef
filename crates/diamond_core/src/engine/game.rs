//! Full-game simulation and box score aggregation.

use super::at_bat::{AtBatOutcome, HitKind};
use super::config::{EngineConfig, GameConfig};
use super::inning::{HalfInningSummary, InningSimulator};
use crate::models::{BySide, GameState, Half, Score, Side, Team};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BattingLine {
    pub player_id: String,
    pub name: String,
    pub at_bats: u32,
    pub hits: u32,
    pub doubles: u32,
    pub home_runs: u32,
    pub runs: u32,
    pub rbi: u32,
    pub walks: u32,
    pub strikeouts: u32,
}

impl BattingLine {
    pub fn plate_appearances(&self) -> u32 {
        self.at_bats + self.walks
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PitchingLine {
    pub player_id: String,
    pub name: String,
    pub outs_recorded: u32,
    pub hits_allowed: u32,
    pub runs_allowed: u32,
    pub walks: u32,
    pub strikeouts: u32,
    pub home_runs_allowed: u32,
}

impl PitchingLine {
    /// Baseball notation: whole innings, then a digit for extra outs ("6.2").
    pub fn innings_pitched(&self) -> String {
        format!("{}.{}", self.outs_recorded / 3, self.outs_recorded % 3)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamBox {
    pub team_id: String,
    /// Batting order lines, in lineup order.
    pub batting: Vec<BattingLine>,
    /// Starting pitcher only; there is no bullpen.
    pub pitching: Option<PitchingLine>,
    pub runs: u32,
    pub hits: u32,
    /// Outs made while batting, automatic outs included.
    pub outs_made: u32,
    pub left_on_base: u32,
}

impl TeamBox {
    fn for_team(team: &Team) -> Self {
        let mut batting: Vec<BattingLine> = Vec::new();
        for id in team.batting_order() {
            if batting.iter().any(|line| line.player_id == id) {
                continue;
            }
            if let Some(player) = team.player(&id) {
                batting.push(BattingLine {
                    player_id: player.id.clone(),
                    name: player.display_name().to_string(),
                    ..Default::default()
                });
            }
        }
        let pitching = team.starting_pitcher().map(|p| PitchingLine {
            player_id: p.id.clone(),
            name: p.display_name().to_string(),
            ..Default::default()
        });
        Self { team_id: team.id.clone(), batting, pitching, ..Default::default() }
    }

    fn line_mut(&mut self, player_id: &str) -> Option<&mut BattingLine> {
        self.batting.iter_mut().find(|line| line.player_id == player_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameResult {
    pub home_team_id: String,
    pub away_team_id: String,
    pub score: Score,
    pub line_score: BySide<Vec<u32>>,
    pub box_score: BySide<TeamBox>,
    pub half_innings: Vec<HalfInningSummary>,
    pub final_state: GameState,
}

impl GameResult {
    /// `None` for a tie; ties are final.
    pub fn winner(&self) -> Option<Side> {
        match self.score.home.cmp(&self.score.away) {
            std::cmp::Ordering::Greater => Some(Side::Home),
            std::cmp::Ordering::Less => Some(Side::Away),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn is_tie(&self) -> bool {
        self.winner().is_none()
    }

    pub fn log(&self) -> &[String] {
        &self.final_state.log
    }
}

#[derive(Debug, Clone, Default)]
pub struct GameSimulator {
    pub innings: InningSimulator,
    pub config: GameConfig,
}

impl GameSimulator {
    pub fn new(config: &EngineConfig) -> Self {
        Self { innings: InningSimulator::new(config), config: config.game.clone() }
    }

    /// Regulation game only: both halves of every inning are played and a
    /// level score after the last one stands as a tie.
    pub fn simulate(&self, home: &Team, away: &Team, rng: &mut impl Rng) -> GameResult {
        let home = self.field(home);
        let away = self.field(away);

        let mut box_score = BySide::new(TeamBox::for_team(&home), TeamBox::for_team(&away));
        let mut half_innings = Vec::with_capacity(self.config.innings as usize * 2);
        let mut state = GameState::new();

        for _inning in 0..self.config.innings {
            for _half in 0..2 {
                let (batting, pitching) = match state.half {
                    Half::Top => (&away, &home),
                    Half::Bottom => (&home, &away),
                };
                let report = self.innings.simulate(&state, batting, pitching, rng);
                tally(&mut box_score, &report.summary);
                half_innings.push(report.summary);
                state = report.state;
            }
        }

        debug!(
            home = %home.id,
            away = %away.id,
            home_runs = state.score.home,
            away_runs = state.score.away,
            "game complete"
        );

        GameResult {
            home_team_id: home.id.clone(),
            away_team_id: away.id.clone(),
            score: state.score.clone(),
            line_score: state.score_by_inning.clone(),
            box_score,
            half_innings,
            final_state: state,
        }
    }

    fn field(&self, team: &Team) -> Team {
        if team.roster.is_empty() {
            warn!(team = %team.id, "empty roster, fielding replacement-level stand-in");
        }
        team.with_replacement_fallback(self.config.fallback_strength)
    }
}

fn tally(box_score: &mut BySide<TeamBox>, summary: &HalfInningSummary) {
    let batting_side = summary.batting_side;

    {
        let offense = box_score.get_mut(batting_side);
        offense.runs += summary.runs;
        offense.hits += summary.hits;
        offense.outs_made += summary.outs as u32;
        if let Some(last) = summary.plate_appearances.last() {
            offense.left_on_base += last.bases_after.occupied_count() as u32;
        }

        for pa in &summary.plate_appearances {
            if let Some(line) = offense.line_mut(&pa.batter_id) {
                if pa.outcome.is_official_at_bat() {
                    line.at_bats += 1;
                }
                match pa.outcome {
                    AtBatOutcome::Hit { kind } => {
                        line.hits += 1;
                        if kind == HitKind::Double {
                            line.doubles += 1;
                        }
                    }
                    AtBatOutcome::HomeRun => {
                        line.hits += 1;
                        line.home_runs += 1;
                    }
                    AtBatOutcome::Walk => line.walks += 1,
                    AtBatOutcome::Out { .. } => {
                        if pa.outcome.is_strikeout() {
                            line.strikeouts += 1;
                        }
                    }
                }
                line.rbi += pa.rbi();
            }
            for runner in &pa.scored {
                if let Some(line) = offense.line_mut(runner) {
                    line.runs += 1;
                }
            }
        }
    }

    let defense = box_score.get_mut(batting_side.opponent());
    if let Some(pitching) = defense.pitching.as_mut() {
        pitching.outs_recorded += summary.outs as u32;
        for pa in &summary.plate_appearances {
            if pa.pitcher_id != pitching.player_id {
                continue;
            }
            if pa.outcome.is_hit() {
                pitching.hits_allowed += 1;
            }
            match pa.outcome {
                AtBatOutcome::HomeRun => pitching.home_runs_allowed += 1,
                AtBatOutcome::Walk => pitching.walks += 1,
                _ if pa.outcome.is_strikeout() => pitching.strikeouts += 1,
                _ => {}
            }
            pitching.runs_allowed += pa.rbi();
        }
    }
}

/// Nine innings with the canonical constants.
pub fn simulate_game(home: &Team, away: &Team, rng: &mut impl Rng) -> GameResult {
    GameSimulator::default().simulate(home, away, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_team, team_without_roster};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn play(seed: u64) -> GameResult {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        simulate_game(&sample_team("h", 55), &sample_team("a", 55), &mut rng)
    }

    #[test]
    fn test_twenty_seven_outs_per_side() {
        for seed in 0..20 {
            let result = play(seed);
            assert_eq!(result.box_score.home.outs_made, 27, "seed {seed}");
            assert_eq!(result.box_score.away.outs_made, 27, "seed {seed}");
            assert_eq!(result.box_score.home.pitching.as_ref().unwrap().outs_recorded, 27);
            assert_eq!(result.box_score.away.pitching.as_ref().unwrap().innings_pitched(), "9.0");
        }
    }

    #[test]
    fn test_eighteen_half_innings() {
        let result = play(3);
        assert_eq!(result.half_innings.len(), 18);
        assert_eq!(result.line_score.home.len(), 9);
        assert_eq!(result.line_score.away.len(), 9);
        assert_eq!(result.half_innings[0].half, Half::Top);
        assert_eq!(result.half_innings[17].inning, 9);
        assert_eq!(result.half_innings[17].batting_side, Side::Home);
    }

    #[test]
    fn test_box_score_reconciles_with_score() {
        for seed in [1, 9, 42, 77] {
            let result = play(seed);
            for side in [Side::Home, Side::Away] {
                let team = result.box_score.get(side);
                let score = *result.score.get(side);
                let lines = &team.batting;

                assert_eq!(result.line_score.get(side).iter().sum::<u32>(), score);
                assert_eq!(team.runs, score);
                assert_eq!(lines.iter().map(|l| l.runs).sum::<u32>(), score);
                assert_eq!(lines.iter().map(|l| l.rbi).sum::<u32>(), score);
                assert_eq!(lines.iter().map(|l| l.hits).sum::<u32>(), team.hits);
                assert_eq!(result.final_state.stats.get(side).hits, team.hits);

                let opposing = result.box_score.get(side.opponent()).pitching.as_ref().unwrap();
                assert_eq!(opposing.runs_allowed, score);
                assert_eq!(opposing.hits_allowed, team.hits);
                assert_eq!(opposing.strikeouts, lines.iter().map(|l| l.strikeouts).sum::<u32>());
            }
        }
    }

    #[test]
    fn test_same_seed_same_game() {
        assert_eq!(play(1234), play(1234));
    }

    #[test]
    fn test_winner_matches_score() {
        let result = play(17);
        match result.winner() {
            Some(Side::Home) => assert!(result.score.home > result.score.away),
            Some(Side::Away) => assert!(result.score.away > result.score.home),
            None => assert!(result.is_tie()),
        }
    }

    #[test]
    fn test_empty_roster_uses_replacement() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let result = simulate_game(&team_without_roster("ghosts"), &sample_team("a", 50), &mut rng);

        assert_eq!(result.box_score.home.outs_made, 27);
        assert!(result.half_innings.iter().all(|h| h.auto_outs == 0));
        assert_eq!(result.box_score.home.batting.len(), 1);
        assert_eq!(result.box_score.home.batting[0].player_id, "ghosts-replacement");
        assert_eq!(result.home_team_id, "ghosts");
    }

    #[test]
    fn test_innings_pitched_notation() {
        let line = PitchingLine { outs_recorded: 20, ..Default::default() };
        assert_eq!(line.innings_pitched(), "6.2");
    }

    #[test]
    fn test_shortened_game_config() {
        let mut cfg = EngineConfig::default();
        cfg.game.innings = 7;
        let sim = GameSimulator::new(&cfg);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let result = sim.simulate(&sample_team("h", 50), &sample_team("a", 50), &mut rng);
        assert_eq!(result.half_innings.len(), 14);
        assert_eq!(result.box_score.away.outs_made, 21);
    }

    #[test]
    fn test_unvalidated_config_still_finishes_game() {
        let mut cfg = EngineConfig::default();
        cfg.at_bat.min_hit_chance = 50.0;
        assert!(cfg.validate().is_err());

        let sim = GameSimulator::new(&cfg);
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let result = sim.simulate(&sample_team("h", 50), &sample_team("a", 50), &mut rng);
        assert_eq!(result.half_innings.len(), 18);
        assert!(result.half_innings.iter().all(|h| h.outs == 3 || h.capped));
    }
}
