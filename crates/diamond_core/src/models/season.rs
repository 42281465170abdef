use super::{BySide, Team};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Final runs for a finished fixture.
pub type Score = BySide<u32>;

/// One scheduled game between two teams on a given day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Fixture {
    pub id: String,
    pub day: u32,
    pub home_team_id: String,
    pub away_team_id: String,
    #[serde(default)]
    pub is_played: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
}

impl Fixture {
    pub fn new(day: u32, slot: usize, home: &str, away: &str) -> Self {
        Self {
            id: fixture_id(day, slot),
            day,
            home_team_id: home.to_string(),
            away_team_id: away.to_string(),
            is_played: false,
            score: None,
        }
    }

    pub fn involves(&self, team_id: &str) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }
}

pub fn fixture_id(day: u32, slot: usize) -> String {
    format!("g-{day}-{slot}")
}

/// Cumulative record for one team.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StandingsEntry {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub runs_scored: u32,
    pub runs_allowed: u32,
}

impl StandingsEntry {
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    /// Ties count as half a win.
    pub fn win_pct(&self) -> f64 {
        let games = self.games_played();
        if games == 0 {
            return 0.0;
        }
        (self.wins as f64 + 0.5 * self.ties as f64) / games as f64
    }

    pub fn run_differential(&self) -> i64 {
        self.runs_scored as i64 - self.runs_allowed as i64
    }
}

/// Standings keyed by team id.
pub type Standings = BTreeMap<String, StandingsEntry>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Season {
    pub id: String,
    pub year: u16,
    pub current_day: u32,
    pub teams: Vec<Team>,
    pub schedule: Vec<Fixture>,
    pub standings: Standings,
}

impl Season {
    pub fn team(&self, team_id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    pub fn fixtures_on(&self, day: u32) -> impl Iterator<Item = &Fixture> {
        self.schedule.iter().filter(move |f| f.day == day)
    }

    /// Highest scheduled day, 0 for an empty schedule.
    pub fn last_day(&self) -> u32 {
        self.schedule.iter().map(|f| f.day).max().unwrap_or(0)
    }

    pub fn played_count(&self) -> usize {
        self.schedule.iter().filter(|f| f.is_played).count()
    }

    pub fn is_complete(&self) -> bool {
        self.current_day > self.last_day()
    }
}
