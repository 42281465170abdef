//! Half-inning simulation.
//!
//! Plays plate appearances until the batting side makes three outs or the
//! safety cap is hit. Runners advance by a fixed per-base rule; there is no
//! fielding, so every run comes straight from the at-bat outcome.

use super::at_bat::{AtBatOutcome, AtBatResolver};
use super::config::{EngineConfig, InningConfig};
use crate::models::{Bases, GameState, Half, Side, Team};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One completed plate appearance with the post-play snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlateAppearance {
    pub batter_id: String,
    pub pitcher_id: String,
    pub outcome: AtBatOutcome,
    /// Runners (and possibly the batter) who crossed the plate on this play.
    pub scored: Vec<String>,
    pub outs_after: u8,
    pub bases_after: Bases,
}

impl PlateAppearance {
    pub fn rbi(&self) -> u32 {
        self.scored.len() as u32
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HalfInningSummary {
    pub inning: u8,
    pub half: Half,
    pub batting_side: Side,
    pub runs: u32,
    pub hits: u32,
    pub outs: u8,
    /// Outs charged because no batter or pitcher could be resolved.
    pub auto_outs: u8,
    /// True when the plate-appearance cap ended the half early.
    pub capped: bool,
    pub plate_appearances: Vec<PlateAppearance>,
}

#[derive(Debug, Clone)]
pub struct HalfInningReport {
    /// State for the next half: side flipped, bases and count cleared.
    pub state: GameState,
    pub summary: HalfInningSummary,
}

/// Move runners for one outcome and return who scored, lead runner first.
pub fn advance_runners(bases: &mut Bases, outcome: AtBatOutcome, batter_id: &str) -> Vec<String> {
    let mut scored = Vec::new();
    match outcome {
        AtBatOutcome::Out { .. } => {}
        AtBatOutcome::Hit { kind } => {
            let advance = kind.bases() as usize;
            // Lead runner first so nobody is moved twice.
            for base in (0..Bases::COUNT).rev() {
                if let Some(runner) = bases.take(base) {
                    let target = base + advance;
                    if target >= Bases::COUNT {
                        scored.push(runner);
                    } else {
                        bases.put(target, runner);
                    }
                }
            }
            let batter_base = advance - 1;
            if batter_base >= Bases::COUNT {
                scored.push(batter_id.to_string());
            } else {
                bases.put(batter_base, batter_id.to_string());
            }
        }
        AtBatOutcome::HomeRun => {
            for base in (0..Bases::COUNT).rev() {
                if let Some(runner) = bases.take(base) {
                    scored.push(runner);
                }
            }
            scored.push(batter_id.to_string());
        }
        AtBatOutcome::Walk => {
            // Only forced runners move.
            if bases.is_occupied(0) {
                if bases.is_occupied(1) {
                    if let Some(runner) = bases.take(2) {
                        scored.push(runner);
                    }
                    if let Some(runner) = bases.take(1) {
                        bases.put(2, runner);
                    }
                }
                if let Some(runner) = bases.take(0) {
                    bases.put(1, runner);
                }
            }
            bases.put(0, batter_id.to_string());
        }
    }
    scored
}

#[derive(Debug, Clone, Default)]
pub struct InningSimulator {
    pub resolver: AtBatResolver,
    pub config: InningConfig,
}

impl InningSimulator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            resolver: AtBatResolver::new(config.at_bat.clone()),
            config: config.inning.clone(),
        }
    }

    pub fn simulate(
        &self,
        state: &GameState,
        batting: &Team,
        pitching: &Team,
        rng: &mut impl Rng,
    ) -> HalfInningReport {
        let side = state.batting_side();
        let order = batting.batting_order();
        let pitcher = pitching.starting_pitcher();

        let mut log = vec![format!("{} {}: {} at bat", state.half, state.inning, batting.name)];
        if pitcher.is_none() {
            warn!(team = %pitching.id, "no pitcher available, batting side gets automatic outs");
            log.push(format!("{} has no pitcher available", pitching.name));
        }

        let mut cursor = *state.batting_cursor.get(side);
        let mut bases = Bases::empty();
        let mut outs: u8 = 0;
        let mut runs: u32 = 0;
        let mut hits: u32 = 0;
        let mut auto_outs: u8 = 0;
        let mut appearances: u32 = 0;
        let mut plate_appearances = Vec::new();

        while outs < self.config.outs_per_half && appearances < self.config.max_plate_appearances {
            appearances += 1;

            let slot = if order.is_empty() {
                None
            } else {
                let id = &order[cursor % order.len()];
                cursor = (cursor + 1) % order.len();
                Some(id)
            };
            let batter = slot.and_then(|id| batting.player(id));

            let (Some(pitcher), Some(batter)) = (pitcher, batter) else {
                outs += 1;
                auto_outs += 1;
                let reason = match slot {
                    Some(id) if batter.is_none() => format!("lineup entry {id} not on roster"),
                    None => "no batter available".to_string(),
                    Some(_) => "no pitcher available".to_string(),
                };
                log.push(format!("Auto-out ({reason}) (outs: {outs})"));
                continue;
            };

            let outcome = self.resolver.resolve(pitcher, batter, rng);
            outs += outcome.outs();
            if outcome.is_hit() {
                hits += 1;
            }
            let scored = advance_runners(&mut bases, outcome, &batter.id);
            runs += scored.len() as u32;

            let mut entry = format!(
                "{}: {} (outs: {}, bases: {})",
                batter.display_name(),
                outcome,
                outs,
                bases
            );
            if !scored.is_empty() {
                entry.push_str(&format!(" - {} run(s) score", scored.len()));
            }
            log.push(entry);

            plate_appearances.push(PlateAppearance {
                batter_id: batter.id.clone(),
                pitcher_id: pitcher.id.clone(),
                outcome,
                scored,
                outs_after: outs,
                bases_after: bases.clone(),
            });
        }

        let capped = outs < self.config.outs_per_half;
        if capped {
            warn!(
                inning = state.inning,
                half = %state.half,
                cap = self.config.max_plate_appearances,
                "half-inning ended by plate appearance cap"
            );
            log.push(format!(
                "Safety cap reached after {} plate appearances",
                self.config.max_plate_appearances
            ));
        }
        log.push(format!("Half-inning over: {outs} outs recorded."));
        if runs > 0 {
            log.push(format!("{} scores {} run(s)!", batting.name, runs));
        }

        debug!(
            inning = state.inning,
            half = %state.half,
            team = %batting.id,
            runs,
            hits,
            outs,
            "half-inning complete"
        );

        let mut next = state.clone();
        *next.score.get_mut(side) += runs;
        let by_inning = next.score_by_inning.get_mut(side);
        let idx = state.inning.saturating_sub(1) as usize;
        if by_inning.len() <= idx {
            by_inning.resize(idx + 1, 0);
        }
        by_inning[idx] = runs;
        next.stats.get_mut(side).hits += hits;
        *next.batting_cursor.get_mut(side) = cursor;
        next.outs = 0;
        next.balls = 0;
        next.strikes = 0;
        next.bases = Bases::empty();
        match state.half {
            Half::Top => next.half = Half::Bottom,
            Half::Bottom => {
                next.half = Half::Top;
                next.inning = state.inning.saturating_add(1);
            }
        }
        next.log.extend(log);

        HalfInningReport {
            state: next,
            summary: HalfInningSummary {
                inning: state.inning,
                half: state.half,
                batting_side: side,
                runs,
                hits,
                outs,
                auto_outs,
                capped,
                plate_appearances,
            },
        }
    }
}

/// Play the half-inning `state` points at with the canonical constants.
pub fn simulate_half_inning(
    state: &GameState,
    batting: &Team,
    pitching: &Team,
    rng: &mut impl Rng,
) -> GameState {
    InningSimulator::default().simulate(state, batting, pitching, rng).state
}
