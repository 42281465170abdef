pub mod json_api;

pub use json_api::{
    advance_season_json, simulate_game_json, ApiError, GameRequest, GameResponse, SeasonResponse,
};
