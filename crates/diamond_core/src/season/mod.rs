//! Season progression: schedule creation, one-day advancement, standings.
//!
//! Every operation takes a `Season` snapshot and returns a new one; saving the
//! result is up to the caller.

pub mod schedule;
pub mod standings;

pub use schedule::{
    generate_schedule, generate_schedule_with, round_robin_rounds, try_generate_schedule,
    ScheduleConfig,
};
pub use standings::{games_back, record_result, standings_table, Decision, StandingsRow};

use crate::engine::{EngineConfig, GameResult, GameSimulator};
use crate::error::{ScheduleError, SeasonError};
use crate::models::{Season, Standings, StandingsEntry, Team};
use fxhash::FxHasher;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::hash::{Hash, Hasher};
use tracing::{info, warn};

pub fn season_id(year: u16) -> String {
    format!("season-{year}")
}

/// New season at day 1 with zeroed standings.
pub fn try_create_season(
    year: u16,
    teams: Vec<Team>,
    config: &ScheduleConfig,
) -> Result<Season, ScheduleError> {
    let schedule = try_generate_schedule(&teams, config)?;
    Ok(assemble(year, teams, schedule))
}

/// Like [`try_create_season`], but rejected team lists produce a season with
/// an empty schedule.
pub fn create_season(year: u16, teams: Vec<Team>, config: &ScheduleConfig) -> Season {
    let schedule = generate_schedule_with(&teams, config);
    assemble(year, teams, schedule)
}

fn assemble(year: u16, teams: Vec<Team>, schedule: Vec<crate::models::Fixture>) -> Season {
    let standings: Standings =
        teams.iter().map(|t| (t.id.clone(), StandingsEntry::default())).collect();
    Season { id: season_id(year), year, current_day: 1, teams, schedule, standings }
}

impl Season {
    /// W+L+T per team must equal its played fixtures, and nothing may be
    /// played on a day the season has not reached.
    pub fn check_invariants(&self) -> Result<(), SeasonError> {
        for fixture in self.schedule.iter().filter(|f| f.is_played) {
            if fixture.day >= self.current_day {
                return Err(SeasonError::PlayedInFuture {
                    fixture_id: fixture.id.clone(),
                    day: fixture.day,
                    current_day: self.current_day,
                });
            }
        }
        for team in &self.teams {
            let entry = self
                .standings
                .get(&team.id)
                .ok_or_else(|| SeasonError::MissingStandings(team.id.clone()))?;
            let played =
                self.schedule.iter().filter(|f| f.is_played && f.involves(&team.id)).count() as u32;
            if entry.games_played() != played {
                return Err(SeasonError::StandingsMismatch {
                    team_id: team.id.clone(),
                    recorded: entry.games_played(),
                    played,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FixtureOutcome {
    pub fixture_id: String,
    pub result: GameResult,
}

#[derive(Debug, Clone)]
pub struct DayReport {
    pub day: u32,
    pub season: Season,
    pub results: Vec<FixtureOutcome>,
    /// Fixtures left unplayed because a team id did not resolve.
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SeasonOrchestrator {
    pub games: GameSimulator,
}

impl SeasonOrchestrator {
    pub fn new(config: &EngineConfig) -> Self {
        Self { games: GameSimulator::new(config) }
    }

    /// Play every unplayed fixture on the current day, then move to the next
    /// day. The day always advances, even when nothing was scheduled.
    pub fn advance_day(&self, season: &Season, rng: &mut impl Rng) -> DayReport {
        let (jobs, skipped) = todays_jobs(season);
        let results = jobs
            .into_iter()
            .map(|(idx, home, away)| (idx, self.games.simulate(home, away, rng)))
            .collect();
        finish_day(season, results, skipped)
    }

    /// Same as [`advance_day`](Self::advance_day) with each fixture on its own
    /// worker. Each game draws from a `ChaCha8Rng` seeded by `(seed, fixture
    /// id)`, so the outcome does not depend on thread scheduling.
    pub fn advance_day_parallel(&self, season: &Season, seed: u64) -> DayReport {
        let (jobs, skipped) = todays_jobs(season);
        let results = jobs
            .into_par_iter()
            .map(|(idx, home, away)| {
                let fixture_id = &season.schedule[idx].id;
                let mut rng = ChaCha8Rng::seed_from_u64(fixture_seed(seed, fixture_id));
                (idx, self.games.simulate(home, away, &mut rng))
            })
            .collect();
        finish_day(season, results, skipped)
    }
}

type Job<'a> = (usize, &'a Team, &'a Team);

fn todays_jobs(season: &Season) -> (Vec<Job<'_>>, Vec<String>) {
    let mut jobs = Vec::new();
    let mut skipped = Vec::new();
    for (idx, fixture) in season.schedule.iter().enumerate() {
        if fixture.day != season.current_day || fixture.is_played {
            continue;
        }
        match (season.team(&fixture.home_team_id), season.team(&fixture.away_team_id)) {
            (Some(home), Some(away)) => jobs.push((idx, home, away)),
            _ => {
                warn!(fixture = %fixture.id, "fixture references an unknown team, skipping");
                skipped.push(fixture.id.clone());
            }
        }
    }
    (jobs, skipped)
}

fn finish_day(season: &Season, results: Vec<(usize, GameResult)>, skipped: Vec<String>) -> DayReport {
    let mut next = season.clone();
    let mut outcomes = Vec::with_capacity(results.len());

    for (idx, result) in results {
        let fixture = &mut next.schedule[idx];
        fixture.is_played = true;
        fixture.score = Some(result.score.clone());
        record_result(
            &mut next.standings,
            &fixture.home_team_id,
            &fixture.away_team_id,
            &result.score,
        );
        outcomes.push(FixtureOutcome { fixture_id: fixture.id.clone(), result });
    }

    let day = season.current_day;
    next.current_day = day + 1;
    info!(day, games = outcomes.len(), skipped = skipped.len(), "season day complete");

    DayReport { day, season: next, results: outcomes, skipped }
}

/// Version-stable per-fixture seed.
pub fn fixture_seed(seed: u64, fixture_id: &str) -> u64 {
    let mut hasher = FxHasher::default();
    seed.hash(&mut hasher);
    fixture_id.hash(&mut hasher);
    hasher.finish()
}

pub fn advance_season_one_day(season: &Season, rng: &mut impl Rng) -> Season {
    SeasonOrchestrator::default().advance_day(season, rng).season
}

pub fn advance_season_one_day_parallel(season: &Season, seed: u64) -> Season {
    SeasonOrchestrator::default().advance_day_parallel(season, seed).season
}

/// Advance day by day until every scheduled day has been visited.
pub fn play_out_season(season: &Season, rng: &mut impl Rng) -> Season {
    let orchestrator = SeasonOrchestrator::default();
    let mut current = season.clone();
    while !current.is_complete() {
        current = orchestrator.advance_day(&current, rng).season;
    }
    current
}
