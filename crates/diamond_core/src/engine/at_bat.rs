//! Plate appearance resolution.
//!
//! A matchup is decided by at most two uniform draws on `[0, 100)`: one against
//! the clamped hit chance, then one that picks the kind of hit or out.

use super::config::AtBatConfig;
use crate::models::Player;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OutCause {
    Strikeout,
    Groundout,
    Flyout,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HitKind {
    Single,
    Double,
}

impl HitKind {
    pub fn bases(self) -> u8 {
        match self {
            HitKind::Single => 1,
            HitKind::Double => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AtBatOutcome {
    Out { cause: OutCause },
    Hit { kind: HitKind },
    HomeRun,
    Walk,
}

impl AtBatOutcome {
    pub fn outs(&self) -> u8 {
        match self {
            AtBatOutcome::Out { .. } => 1,
            _ => 0,
        }
    }

    /// Runs the batter scores on the batter's own play, before counting runners.
    pub fn batter_runs(&self) -> u8 {
        match self {
            AtBatOutcome::HomeRun => 1,
            _ => 0,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, AtBatOutcome::Hit { .. } | AtBatOutcome::HomeRun)
    }

    /// Walks do not count as official at-bats.
    pub fn is_official_at_bat(&self) -> bool {
        !matches!(self, AtBatOutcome::Walk)
    }

    pub fn is_strikeout(&self) -> bool {
        matches!(self, AtBatOutcome::Out { cause: OutCause::Strikeout })
    }

    /// Short label for logs and box scores.
    pub fn cause_tag(&self) -> &'static str {
        match self {
            AtBatOutcome::Out { cause: OutCause::Strikeout } => "Strikeout",
            AtBatOutcome::Out { cause: OutCause::Groundout } => "Groundout",
            AtBatOutcome::Out { cause: OutCause::Flyout } => "Flyout",
            AtBatOutcome::Hit { kind: HitKind::Single } => "Single",
            AtBatOutcome::Hit { kind: HitKind::Double } => "Double",
            AtBatOutcome::HomeRun => "Home Run",
            AtBatOutcome::Walk => "Walk",
        }
    }
}

impl fmt::Display for AtBatOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.cause_tag())
    }
}

/// Pitcher control after fatigue erosion, never below zero.
pub fn effective_control(control: u8, fatigue: u8, config: &AtBatConfig) -> f64 {
    let control = control as f64;
    if fatigue <= config.fatigue_threshold {
        return control;
    }
    let excess = (fatigue - config.fatigue_threshold) as f64;
    (control - excess * config.fatigue_control_penalty).max(0.0)
}

/// Hit chance in percent, bounded by the configured band.
///
/// An inverted band collapses to `max_hit_chance` and NaN bounds are ignored,
/// so an unvalidated config never aborts a game.
pub fn hit_chance(pitcher: &Player, batter: &Player, config: &AtBatConfig) -> f64 {
    let control = effective_control(pitcher.attributes.control, pitcher.fatigue, config);
    let raw = batter.attributes.contact as f64 * config.contact_weight
        + batter.attributes.vision as f64 * config.vision_weight
        - control * config.control_weight;
    raw.max(config.min_hit_chance).min(config.max_hit_chance)
}

/// Map the hit-branch roll to a hit type: home run band, doubles band, singles.
pub fn classify_hit(power: u8, roll: f64, config: &AtBatConfig) -> AtBatOutcome {
    let hr_threshold = (power as f64 * config.home_run_power_scale).max(config.home_run_floor);
    if roll < hr_threshold {
        AtBatOutcome::HomeRun
    } else if roll < hr_threshold + config.double_band {
        AtBatOutcome::Hit { kind: HitKind::Double }
    } else {
        AtBatOutcome::Hit { kind: HitKind::Single }
    }
}

pub fn classify_out(roll: f64, config: &AtBatConfig) -> OutCause {
    if roll < config.strikeout_threshold {
        OutCause::Strikeout
    } else if roll < config.groundout_threshold {
        OutCause::Groundout
    } else {
        OutCause::Flyout
    }
}

fn roll(rng: &mut impl Rng) -> f64 {
    rng.gen_range(0.0f64..100.0)
}

/// Stateless resolver; all behaviour comes from the config and the draws.
#[derive(Debug, Clone, Default)]
pub struct AtBatResolver {
    pub config: AtBatConfig,
}

impl AtBatResolver {
    pub fn new(config: AtBatConfig) -> Self {
        Self { config }
    }

    pub fn resolve(&self, pitcher: &Player, batter: &Player, rng: &mut impl Rng) -> AtBatOutcome {
        let chance = hit_chance(pitcher, batter, &self.config);

        if roll(rng) < chance {
            return classify_hit(batter.attributes.power, roll(rng), &self.config);
        }

        if self.config.walk_chance > 0.0 && roll(rng) < self.config.walk_chance {
            return AtBatOutcome::Walk;
        }
        AtBatOutcome::Out { cause: classify_out(roll(rng), &self.config) }
    }
}

/// Resolve one matchup with the canonical constants.
pub fn resolve_at_bat(pitcher: &Player, batter: &Player, rng: &mut impl Rng) -> AtBatOutcome {
    AtBatResolver::default().resolve(pitcher, batter, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlayerAttributes, Position};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn pitcher(control: u8, fatigue: u8) -> Player {
        let mut attrs = PlayerAttributes::uniform(50);
        attrs.control = control;
        Player::new("p", "Pitch", "Er", Position::P, attrs).with_fatigue(fatigue)
    }

    fn batter(contact: u8, vision: u8, power: u8) -> Player {
        let mut attrs = PlayerAttributes::uniform(50);
        attrs.contact = contact;
        attrs.vision = vision;
        attrs.power = power;
        Player::new("b", "Bat", "Ter", Position::CF, attrs)
    }

    fn hit_rate(pitcher: &Player, batter: &Player, trials: u32, seed: u64) -> f64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let hits = (0..trials)
            .filter(|_| resolve_at_bat(pitcher, batter, &mut rng).is_hit())
            .count();
        hits as f64 / trials as f64 * 100.0
    }

    #[test]
    fn test_effective_control_fatigue() {
        let cfg = AtBatConfig::default();
        assert_eq!(effective_control(50, 90, &cfg), 10.0);
        assert_eq!(effective_control(50, 70, &cfg), 50.0);
        assert_eq!(effective_control(50, 0, &cfg), 50.0);
        // floored at zero
        assert_eq!(effective_control(20, 100, &cfg), 0.0);
    }

    #[test]
    fn test_hit_chance_clamped_to_band() {
        let cfg = AtBatConfig::default();
        assert_eq!(hit_chance(&pitcher(100, 0), &batter(10, 10, 50), &cfg), 5.0);
        assert_eq!(hit_chance(&pitcher(0, 0), &batter(100, 100, 50), &cfg), 40.0);
        assert_eq!(hit_chance(&pitcher(50, 0), &batter(50, 50, 50), &cfg), 12.5);
    }

    #[test]
    fn test_hit_chance_tolerates_unvalidated_band() {
        let inverted = AtBatConfig { min_hit_chance: 50.0, ..Default::default() };
        assert_eq!(hit_chance(&pitcher(50, 0), &batter(50, 50, 50), &inverted), 40.0);

        let nan = AtBatConfig {
            min_hit_chance: f64::NAN,
            max_hit_chance: f64::NAN,
            ..Default::default()
        };
        assert_eq!(hit_chance(&pitcher(50, 0), &batter(50, 50, 50), &nan), 12.5);

        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let resolver = AtBatResolver::new(inverted);
        for _ in 0..500 {
            assert!(resolver.resolve(&pitcher(50, 0), &batter(50, 50, 50), &mut rng).outs() <= 1);
        }
    }

    #[test]
    fn test_classify_hit_bands() {
        let cfg = AtBatConfig::default();
        // power 50 -> home run below 20, doubles 20..35
        assert_eq!(classify_hit(50, 19.9, &cfg), AtBatOutcome::HomeRun);
        assert_eq!(classify_hit(50, 20.0, &cfg), AtBatOutcome::Hit { kind: HitKind::Double });
        assert_eq!(classify_hit(50, 34.9, &cfg), AtBatOutcome::Hit { kind: HitKind::Double });
        assert_eq!(classify_hit(50, 35.0, &cfg), AtBatOutcome::Hit { kind: HitKind::Single });
        // weak hitters still get the floor
        assert_eq!(classify_hit(0, 4.9, &cfg), AtBatOutcome::HomeRun);
        assert_eq!(classify_hit(0, 5.0, &cfg), AtBatOutcome::Hit { kind: HitKind::Double });
    }

    #[test]
    fn test_classify_out_thresholds() {
        let cfg = AtBatConfig::default();
        assert_eq!(classify_out(0.0, &cfg), OutCause::Strikeout);
        assert_eq!(classify_out(24.99, &cfg), OutCause::Strikeout);
        assert_eq!(classify_out(25.0, &cfg), OutCause::Groundout);
        assert_eq!(classify_out(59.99, &cfg), OutCause::Groundout);
        assert_eq!(classify_out(60.0, &cfg), OutCause::Flyout);
        assert_eq!(classify_out(99.99, &cfg), OutCause::Flyout);
    }

    #[test]
    fn test_outcome_deltas() {
        let k = AtBatOutcome::Out { cause: OutCause::Strikeout };
        assert_eq!(k.outs(), 1);
        assert!(k.is_strikeout());
        assert_eq!(AtBatOutcome::HomeRun.batter_runs(), 1);
        assert_eq!(AtBatOutcome::HomeRun.outs(), 0);
        assert!(!AtBatOutcome::Walk.is_official_at_bat());
        assert!(!AtBatOutcome::Walk.is_hit());
        assert_eq!(AtBatOutcome::Hit { kind: HitKind::Double }.to_string(), "Double");
    }

    #[test]
    fn test_outcome_serializes_structured() {
        let json = serde_json::to_value(AtBatOutcome::Out { cause: OutCause::Flyout }).unwrap();
        assert_eq!(json["type"], "out");
        assert_eq!(json["cause"], "flyout");
    }

    #[test]
    fn test_hit_rate_within_band_over_10k() {
        let rate = hit_rate(&pitcher(50, 0), &batter(50, 50, 50), 10_000, 7);
        assert!((5.0..=40.0).contains(&rate), "rate {rate}");
        assert!((rate - 12.5).abs() < 2.5, "rate {rate} far from 12.5");
    }

    #[test]
    fn test_fatigued_pitcher_allows_more_hits() {
        let hitter = batter(50, 50, 50);
        let fresh = hit_rate(&pitcher(50, 0), &hitter, 10_000, 11);
        let tired = hit_rate(&pitcher(50, 90), &hitter, 10_000, 11);
        assert!(tired > fresh, "tired {tired} <= fresh {fresh}");
    }

    #[test]
    fn test_same_seed_same_outcomes() {
        let p = pitcher(60, 20);
        let b = batter(70, 60, 80);
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut c = ChaCha8Rng::seed_from_u64(99);
        let first: Vec<_> = (0..50).map(|_| resolve_at_bat(&p, &b, &mut a)).collect();
        let second: Vec<_> = (0..50).map(|_| resolve_at_bat(&p, &b, &mut c)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_walks_only_when_enabled() {
        let p = pitcher(50, 0);
        let b = batter(50, 50, 50);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!((0..2_000).all(|_| resolve_at_bat(&p, &b, &mut rng) != AtBatOutcome::Walk));

        let resolver = AtBatResolver::new(AtBatConfig { walk_chance: 20.0, ..Default::default() });
        let walks = (0..2_000)
            .filter(|_| resolver.resolve(&p, &b, &mut rng) == AtBatOutcome::Walk)
            .count();
        assert!(walks > 0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: one plate appearance records at most one out
            #[test]
            fn prop_outs_bounded(
                control in 0u8..=100,
                fatigue in 0u8..=100,
                contact in 0u8..=100,
                vision in 0u8..=100,
                power in 0u8..=100,
                seed in any::<u64>()
            ) {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let outcome = resolve_at_bat(&pitcher(control, fatigue), &batter(contact, vision, power), &mut rng);
                prop_assert!(outcome.outs() <= 1);
                prop_assert!(outcome.batter_runs() <= 1);
                prop_assert_eq!(outcome.outs() == 1, matches!(outcome, AtBatOutcome::Out { .. }));
            }

            /// Property: hit chance stays in the documented band
            #[test]
            fn prop_hit_chance_in_band(
                control in 0u8..=100,
                fatigue in 0u8..=100,
                contact in 0u8..=100,
                vision in 0u8..=100
            ) {
                let cfg = AtBatConfig::default();
                let chance = hit_chance(&pitcher(control, fatigue), &batter(contact, vision, 50), &cfg);
                prop_assert!((cfg.min_hit_chance..=cfg.max_hit_chance).contains(&chance));
            }
        }
    }
}
