use super::{Player, PlayerAttributes, Position};
use serde::{Deserialize, Serialize};

/// Lineup length used when a team has no explicit batting order.
pub const DEFAULT_LINEUP_SIZE: usize = 9;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub roster: Vec<Player>,
    /// Player ids in batting order.
    #[serde(default)]
    pub lineup: Vec<String>,
    /// Player ids in pitching rotation order.
    #[serde(default)]
    pub rotation: Vec<String>,
}

impl Team {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            abbreviation: String::new(),
            color: String::new(),
            roster: Vec::new(),
            lineup: Vec::new(),
            rotation: Vec::new(),
        }
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.roster.iter().find(|p| p.id == player_id)
    }

    /// Batting order as player ids. Falls back to roster order when no lineup
    /// has been set.
    pub fn batting_order(&self) -> Vec<String> {
        if !self.lineup.is_empty() {
            return self.lineup.clone();
        }
        self.roster
            .iter()
            .take(DEFAULT_LINEUP_SIZE)
            .map(|p| p.id.clone())
            .collect()
    }

    /// First rotation entry present on the roster, else the first roster player.
    pub fn starting_pitcher(&self) -> Option<&Player> {
        self.rotation
            .first()
            .and_then(|id| self.player(id))
            .or_else(|| self.roster.first())
    }

    /// Lineup and rotation ids that do not resolve to a roster player.
    pub fn dangling_ids(&self) -> Vec<&str> {
        self.lineup
            .iter()
            .chain(self.rotation.iter())
            .filter(|id| self.player(id).is_none())
            .map(String::as_str)
            .collect()
    }

    /// A copy fielding a single league-average replacement player when the
    /// roster is empty. Non-empty rosters are returned unchanged.
    pub fn with_replacement_fallback(&self, strength: u8) -> Team {
        if !self.roster.is_empty() {
            return self.clone();
        }
        let replacement = Player::new(
            format!("{}-replacement", self.id),
            "Replacement",
            "Replacement",
            Position::DH,
            PlayerAttributes::uniform(strength),
        );
        let id = replacement.id.clone();
        Team {
            roster: vec![replacement],
            lineup: vec![id.clone()],
            rotation: vec![id],
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("team id must not be empty".to_string());
        }
        let mut seen = std::collections::HashSet::new();
        for player in &self.roster {
            if !seen.insert(player.id.as_str()) {
                return Err(format!("{}: duplicate player id {}", self.id, player.id));
            }
            player.validate()?;
        }
        if let Some(missing) = self.dangling_ids().first() {
            return Err(format!("{}: {} is not on the roster", self.id, missing));
        }
        Ok(())
    }
}
