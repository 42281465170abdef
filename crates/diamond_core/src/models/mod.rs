pub mod game_state;
pub mod player;
pub mod season;
pub mod team;

pub use game_state::{Bases, BySide, GameState, Half, Side, TeamGameCounters};
pub use player::{PitchType, Player, PlayerAttributes, Position};
pub use season::{fixture_id, Fixture, Score, Season, Standings, StandingsEntry};
pub use team::{Team, DEFAULT_LINEUP_SIZE};
