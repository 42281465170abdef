//! # diamond_core - Deterministic Baseball Game and Season Simulation
//!
//! Plate appearances are resolved from batter and pitcher attributes, strung
//! together into half-innings and nine-inning games, and games are played out
//! day by day over a round-robin season.
//!
//! ## Features
//! - Same seed, same game: every entry point takes its random source
//! - Box scores and play-by-play logs from every simulated game
//! - Round-robin schedules with standings and invariant checks
//! - Parallel day simulation with per-fixture seeds
//! - Compact, checksummed season saves
//! - JSON API for host integration

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]

pub mod api;
pub mod engine;
pub mod error;
pub mod models;
pub mod save;
pub mod season;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{advance_season_json, simulate_game_json, ApiError, GameRequest, GameResponse};
pub use engine::{
    resolve_at_bat, simulate_game, simulate_half_inning, AtBatOutcome, EngineConfig, GameResult,
    GameSimulator,
};
pub use error::{ConfigError, ScheduleError, SeasonError};
pub use models::{
    Bases, BySide, Fixture, GameState, Half, Player, PlayerAttributes, Position, Score, Season,
    Side, Standings, StandingsEntry, Team,
};
pub use save::{SaveError, SeasonSave, SeasonStore};
pub use season::{
    advance_season_one_day, advance_season_one_day_parallel, create_season, generate_schedule,
    play_out_season, standings_table, ScheduleConfig, SeasonOrchestrator,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
