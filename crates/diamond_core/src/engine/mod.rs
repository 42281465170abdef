//! Match engine: plate appearance → half-inning → nine-inning game.
//!
//! Every entry point takes its random source as a parameter. Seed a
//! `rand_chacha::ChaCha8Rng` to replay a game exactly.

pub mod at_bat;
pub mod config;
pub mod game;
pub mod inning;

pub use at_bat::{resolve_at_bat, AtBatOutcome, AtBatResolver, HitKind, OutCause};
pub use config::{AtBatConfig, EngineConfig, GameConfig, InningConfig};
pub use game::{simulate_game, BattingLine, GameResult, GameSimulator, PitchingLine, TeamBox};
pub use inning::{
    advance_runners, simulate_half_inning, HalfInningReport, HalfInningSummary, InningSimulator,
    PlateAppearance,
};
