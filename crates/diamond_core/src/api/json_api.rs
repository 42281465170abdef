//! String-in, string-out entry points for embedding the engine in a host
//! (game client, scripting layer) that only speaks JSON.

use crate::engine::{EngineConfig, GameSimulator, TeamBox};
use crate::error::ConfigError;
use crate::models::{BySide, Season, Side, Team};
use crate::season::{DayReport, SeasonOrchestrator};
use crate::SCHEMA_VERSION;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported schema version: {found} (expected {expected})")]
    SchemaVersion { found: u8, expected: u8 },

    #[error("Invalid engine config: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

#[derive(Debug, Deserialize)]
pub struct GameRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub home_team: Team,
    pub away_team: Team,
    /// Overrides the default tuning for this game only.
    #[serde(default)]
    pub config: Option<EngineConfig>,
    #[serde(default)]
    pub include_log: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GameResponse {
    pub schema_version: u8,
    pub home_team_id: String,
    pub away_team_id: String,
    pub score_home: u32,
    pub score_away: u32,
    /// `None` for a tie.
    pub winner: Option<Side>,
    pub line_score: BySide<Vec<u32>>,
    pub box_score: BySide<TeamBox>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub log: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SeasonResponse {
    pub schema_version: u8,
    pub day_played: u32,
    pub games_played: usize,
    pub skipped_fixtures: Vec<String>,
    pub season: Season,
}

fn check_schema(found: u8) -> Result<(), ApiError> {
    if found != SCHEMA_VERSION {
        return Err(ApiError::SchemaVersion { found, expected: SCHEMA_VERSION });
    }
    Ok(())
}

/// Simulate one game. Same request, same response.
pub fn simulate_game_json(request_json: &str) -> Result<String, ApiError> {
    let request: GameRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;

    if request.home_team.id.is_empty() || request.away_team.id.is_empty() {
        return Err(ApiError::InvalidRequest("team id must not be empty".to_string()));
    }
    if request.home_team.id == request.away_team.id {
        return Err(ApiError::InvalidRequest(format!(
            "home and away are the same team: {}",
            request.home_team.id
        )));
    }

    let config = request.config.unwrap_or_default();
    config.validate()?;

    let mut rng = ChaCha8Rng::seed_from_u64(request.seed);
    let simulator = GameSimulator::new(&config);
    let result = simulator.simulate(&request.home_team, &request.away_team, &mut rng);

    let response = GameResponse {
        schema_version: SCHEMA_VERSION,
        winner: result.winner(),
        score_home: result.score.home,
        score_away: result.score.away,
        log: if request.include_log { result.final_state.log } else { Vec::new() },
        home_team_id: result.home_team_id,
        away_team_id: result.away_team_id,
        line_score: result.line_score,
        box_score: result.box_score,
    };
    Ok(serde_json::to_string(&response)?)
}

/// Advance a serialized season by one day. Fixtures are simulated in
/// parallel with per-fixture seeds derived from `seed`.
pub fn advance_season_json(season_json: &str, seed: u64) -> Result<String, ApiError> {
    let season: Season = serde_json::from_str(season_json)?;
    let DayReport { day, season, results, skipped } =
        SeasonOrchestrator::default().advance_day_parallel(&season, seed);

    let response = SeasonResponse {
        schema_version: SCHEMA_VERSION,
        day_played: day,
        games_played: results.len(),
        skipped_fixtures: skipped,
        season,
    };
    Ok(serde_json::to_string(&response)?)
}
