use serde::{Deserialize, Serialize};
use std::fmt;

/// Player record consumed by the simulation core.
///
/// Rosters are produced by the roster editor and treated as read-only here:
/// the engine reads `fatigue` but never writes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub age: u8,
    pub primary_position: Position,
    #[serde(default)]
    pub secondary_positions: Vec<Position>,
    pub attributes: PlayerAttributes,
    #[serde(default)]
    pub pitch_types: Vec<PitchType>,

    /// Mood level, 0 (worst) ..= 4 (best).
    #[serde(default = "default_condition")]
    pub condition: u8,

    /// Accumulated fatigue, 0 ..= 100. Above 70 it degrades pitcher control.
    #[serde(default)]
    pub fatigue: u8,
}

fn default_condition() -> u8 {
    2
}

pub const MAX_CONDITION: u8 = 4;
pub const MAX_FATIGUE: u8 = 100;

impl Player {
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        primary_position: Position,
        attributes: PlayerAttributes,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            age: 0,
            primary_position,
            secondary_positions: Vec::new(),
            attributes,
            pitch_types: Vec::new(),
            condition: default_condition(),
            fatigue: 0,
        }
    }

    pub fn with_fatigue(mut self, fatigue: u8) -> Self {
        self.fatigue = fatigue.min(MAX_FATIGUE);
        self
    }

    /// Name used in the play-by-play log.
    pub fn display_name(&self) -> &str {
        if self.last_name.is_empty() {
            &self.id
        } else {
            &self.last_name
        }
    }

    pub fn can_play(&self, position: Position) -> bool {
        self.primary_position == position || self.secondary_positions.contains(&position)
    }

    pub fn is_pitcher(&self) -> bool {
        self.can_play(Position::P)
    }

    /// Report out-of-range values instead of silently clamping them.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("player id must not be empty".to_string());
        }
        if self.condition > MAX_CONDITION {
            return Err(format!(
                "{}: condition must be 0..={}, got {}",
                self.id, MAX_CONDITION, self.condition
            ));
        }
        if self.fatigue > MAX_FATIGUE {
            return Err(format!(
                "{}: fatigue must be 0..={}, got {}",
                self.id, MAX_FATIGUE, self.fatigue
            ));
        }
        self.attributes.validate().map_err(|e| format!("{}: {}", self.id, e))
    }
}

/// Rated attributes. Everything except `velocity` is on a 0-100 scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAttributes {
    // Hitting
    pub contact: u8,
    pub power: u8,
    pub vision: u8,
    pub speed: u8,

    // Fielding
    pub fielding: u8,
    pub arm: u8,
    pub reaction: u8,

    // Pitching
    /// Fastball velocity in km/h.
    pub velocity: u16,
    pub control: u8,
    pub stamina: u8,
    pub breaking: u8,
}

impl PlayerAttributes {
    /// Every rated attribute at `value`, velocity at a league-average 140 km/h.
    pub fn uniform(value: u8) -> Self {
        Self {
            contact: value,
            power: value,
            vision: value,
            speed: value,
            fielding: value,
            arm: value,
            reaction: value,
            velocity: 140,
            control: value,
            stamina: value,
            breaking: value,
        }
    }

    fn validate(&self) -> Result<(), String> {
        let rated = [
            ("contact", self.contact),
            ("power", self.power),
            ("vision", self.vision),
            ("speed", self.speed),
            ("fielding", self.fielding),
            ("arm", self.arm),
            ("reaction", self.reaction),
            ("control", self.control),
            ("stamina", self.stamina),
            ("breaking", self.breaking),
        ];
        for (name, value) in rated {
            if value > 100 {
                return Err(format!("{name} must be 0..=100, got {value}"));
            }
        }
        Ok(())
    }
}

impl Default for PlayerAttributes {
    fn default() -> Self {
        Self::uniform(50)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Position {
    P,
    C,
    #[serde(rename = "1B")]
    FirstBase,
    #[serde(rename = "2B")]
    SecondBase,
    #[serde(rename = "3B")]
    ThirdBase,
    SS,
    LF,
    CF,
    RF,
    DH,
}

impl Position {
    pub fn code(&self) -> &'static str {
        match self {
            Position::P => "P",
            Position::C => "C",
            Position::FirstBase => "1B",
            Position::SecondBase => "2B",
            Position::ThirdBase => "3B",
            Position::SS => "SS",
            Position::LF => "LF",
            Position::CF => "CF",
            Position::RF => "RF",
            Position::DH => "DH",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PitchType {
    FourSeam,
    TwoSeam,
    Slider,
    Curve,
    Changeup,
    Fork,
}
