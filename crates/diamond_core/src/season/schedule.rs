//! Round-robin fixture generation (circle method).
//!
//! The first team stays fixed while the rest rotate one position per round.
//! Each round is played on its own day, so every team plays exactly once a day.

use crate::error::ScheduleError;
use crate::models::{Fixture, Team};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Whole cycles are replayed until the schedule holds at least this many
    /// fixtures.
    pub target_games: usize,
    /// Swap home and away on every other cycle.
    pub alternate_home_away: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self { target_games: 100, alternate_home_away: true }
    }
}

/// One full cycle as rounds of `(home, away)` pairings.
pub fn round_robin_rounds<'a>(
    team_ids: &[&'a str],
) -> Result<Vec<Vec<(&'a str, &'a str)>>, ScheduleError> {
    let n = team_ids.len();
    if n < 2 {
        return Err(ScheduleError::TooFewTeams { count: n });
    }
    if n % 2 != 0 {
        return Err(ScheduleError::OddTeamCount { count: n });
    }
    let mut seen = HashSet::with_capacity(n);
    for id in team_ids {
        if !seen.insert(*id) {
            return Err(ScheduleError::DuplicateTeam(id.to_string()));
        }
    }

    let mut order: Vec<&str> = team_ids.to_vec();
    let mut rounds = Vec::with_capacity(n - 1);
    for _ in 0..n - 1 {
        let round: Vec<_> = (0..n / 2).map(|i| (order[i], order[n - 1 - i])).collect();
        rounds.push(round);
        order[1..].rotate_right(1);
    }
    Ok(rounds)
}

pub fn try_generate_schedule(
    teams: &[Team],
    config: &ScheduleConfig,
) -> Result<Vec<Fixture>, ScheduleError> {
    let ids: Vec<&str> = teams.iter().map(|t| t.id.as_str()).collect();
    let rounds = round_robin_rounds(&ids)?;

    let mut fixtures = Vec::new();
    let mut day: u32 = 0;
    let mut cycle = 0usize;
    while fixtures.len() < config.target_games {
        let swap = config.alternate_home_away && cycle % 2 == 1;
        for round in &rounds {
            day += 1;
            for (slot, &(home, away)) in round.iter().enumerate() {
                let (home, away) = if swap { (away, home) } else { (home, away) };
                fixtures.push(Fixture::new(day, slot, home, away));
            }
        }
        cycle += 1;
    }
    Ok(fixtures)
}

/// Canonical schedule (100-game target). Rejected input yields an empty list.
pub fn generate_schedule(teams: &[Team]) -> Vec<Fixture> {
    generate_schedule_with(teams, &ScheduleConfig::default())
}

pub fn generate_schedule_with(teams: &[Team], config: &ScheduleConfig) -> Vec<Fixture> {
    match try_generate_schedule(teams, config) {
        Ok(fixtures) => fixtures,
        Err(err) => {
            warn!(error = %err, "schedule rejected");
            Vec::new()
        }
    }
}
