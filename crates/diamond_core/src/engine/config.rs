//! # Engine Configuration
//!
//! Every tuning constant of the match engine, kept in one serde-friendly tree
//! so balance changes never touch simulation code.
//!
//! ```rust
//! use diamond_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let slugfest = EngineConfig::high_scoring();
//! assert!(slugfest.at_bat.max_hit_chance > config.at_bat.max_hit_chance);
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EngineConfig {
    #[serde(default)]
    pub at_bat: AtBatConfig,
    #[serde(default)]
    pub inning: InningConfig,
    #[serde(default)]
    pub game: GameConfig,
}

impl EngineConfig {
    /// Canonical balance.
    pub fn realistic() -> Self {
        Self::default()
    }

    /// Livelier bats and a few walks.
    pub fn high_scoring() -> Self {
        let mut cfg = Self::default();
        cfg.at_bat.control_weight = 0.15;
        cfg.at_bat.max_hit_chance = 45.0;
        cfg.at_bat.home_run_power_scale = 0.5;
        cfg.at_bat.walk_chance = 8.0;
        cfg
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let cfg: EngineConfig = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ab = &self.at_bat;
        if !(0.0..=100.0).contains(&ab.min_hit_chance)
            || !(0.0..=100.0).contains(&ab.max_hit_chance)
            || ab.min_hit_chance > ab.max_hit_chance
        {
            return Err(ConfigError::Invalid(format!(
                "hit chance band must satisfy 0 <= min <= max <= 100, got {}..{}",
                ab.min_hit_chance, ab.max_hit_chance
            )));
        }
        if ab.strikeout_threshold > ab.groundout_threshold || ab.groundout_threshold > 100.0 {
            return Err(ConfigError::Invalid(
                "out thresholds must be ascending and at most 100".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&ab.walk_chance) {
            return Err(ConfigError::Invalid(format!(
                "walk_chance must be 0..=100, got {}",
                ab.walk_chance
            )));
        }
        if self.inning.outs_per_half == 0 || self.inning.max_plate_appearances == 0 {
            return Err(ConfigError::Invalid(
                "outs_per_half and max_plate_appearances must be positive".to_string(),
            ));
        }
        if self.game.innings == 0 {
            return Err(ConfigError::Invalid("innings must be positive".to_string()));
        }
        Ok(())
    }
}

/// Plate appearance resolution. Chances are percentages on a 0-100 scale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AtBatConfig {
    pub contact_weight: f64,
    pub vision_weight: f64,
    pub control_weight: f64,
    pub min_hit_chance: f64,
    pub max_hit_chance: f64,

    /// Fatigue above this starts eroding control.
    pub fatigue_threshold: u8,
    /// Control lost per fatigue point above the threshold.
    pub fatigue_control_penalty: f64,

    pub home_run_floor: f64,
    pub home_run_power_scale: f64,
    /// Width of the doubles band that follows the home-run band.
    pub double_band: f64,

    pub strikeout_threshold: f64,
    pub groundout_threshold: f64,

    /// Share of would-be outs that become walks. Zero skips the extra draw.
    pub walk_chance: f64,
}

impl Default for AtBatConfig {
    fn default() -> Self {
        Self {
            contact_weight: 0.3,
            vision_weight: 0.2,
            control_weight: 0.25,
            min_hit_chance: 5.0,
            max_hit_chance: 40.0,

            fatigue_threshold: 70,
            fatigue_control_penalty: 2.0,

            home_run_floor: 5.0,
            home_run_power_scale: 0.4,
            double_band: 15.0,

            strikeout_threshold: 25.0,
            groundout_threshold: 60.0,

            walk_chance: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InningConfig {
    pub outs_per_half: u8,
    /// Hard stop on plate appearances in one half-inning.
    pub max_plate_appearances: u32,
}

impl Default for InningConfig {
    fn default() -> Self {
        Self { outs_per_half: 3, max_plate_appearances: 20 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub innings: u8,
    /// Attribute level of the stand-in fielded by a team with no roster.
    pub fallback_strength: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { innings: 9, fallback_strength: 50 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        assert!(EngineConfig::realistic().validate().is_ok());
        assert!(EngineConfig::high_scoring().validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let cfg = EngineConfig::from_yaml_str("at_bat:\n  walk_chance: 5.0\ngame:\n  innings: 7\n")
            .unwrap();
        assert_eq!(cfg.at_bat.walk_chance, 5.0);
        assert_eq!(cfg.at_bat.max_hit_chance, 40.0);
        assert_eq!(cfg.game.innings, 7);
        assert_eq!(cfg.inning.max_plate_appearances, 20);
    }

    #[test]
    fn test_inverted_band_rejected() {
        let err = EngineConfig::from_yaml_str("at_bat:\n  min_hit_chance: 50.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("engine.yaml");
        std::fs::write(&path, "inning:\n  max_plate_appearances: 12\n").unwrap();

        let cfg = EngineConfig::load(&path).unwrap();
        assert_eq!(cfg.inning.max_plate_appearances, 12);
        assert_eq!(cfg.at_bat, AtBatConfig::default());

        std::fs::write(&path, "at_bat: [not, a, map]\n").unwrap();
        assert!(matches!(EngineConfig::load(&path), Err(ConfigError::Yaml(_))));

        let missing = temp_dir.path().join("missing.yaml");
        assert!(matches!(EngineConfig::load(&missing), Err(ConfigError::Io(_))));
    }
}
