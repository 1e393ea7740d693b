//! Lane attack telegraph
//!
//! Two-state cycle run during the chase phase:
//!
//! | State   | Condition                  | Next    |
//! |---------|----------------------------|---------|
//! | Warning | timer > `warning_duration` | Danger  |
//! | Danger  | timer > `danger_duration`  | Warning |
//!
//! Entering Danger promotes the warned lanes to lethal. Entering Warning clears
//! the lethal lanes and marks one or two fresh lanes.

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TelegraphMode {
    #[default]
    Warning,
    Danger,
}

/// What changed on a telegraph step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelegraphTransition {
    /// Warned lanes are now lethal
    EnteredDanger(Vec<usize>),
    /// A new set of lanes is being warned
    EnteredWarning(Vec<usize>),
}

#[derive(Debug, Clone, Default)]
pub struct LaneAttack {
    pub warning_lanes: BTreeSet<usize>,
    pub danger_lanes: BTreeSet<usize>,
    /// Seconds spent in the current mode
    pub timer: f32,
    pub mode: TelegraphMode,
}

impl LaneAttack {
    /// Back to the chase-entry condition: Warning, nothing marked
    pub fn reset(&mut self) {
        self.warning_lanes.clear();
        self.danger_lanes.clear();
        self.timer = 0.0;
        self.mode = TelegraphMode::Warning;
    }

    #[inline]
    pub fn is_lethal(&self, lane: usize) -> bool {
        self.danger_lanes.contains(&lane)
    }

    /// Accumulate `dt` and fire at most one transition
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        rng: &mut R,
        tuning: &Tuning,
    ) -> Option<TelegraphTransition> {
        self.timer += dt;

        match self.mode {
            TelegraphMode::Warning if self.timer > tuning.warning_duration => {
                self.danger_lanes = std::mem::take(&mut self.warning_lanes);
                self.timer = 0.0;
                self.mode = TelegraphMode::Danger;
                Some(TelegraphTransition::EnteredDanger(
                    self.danger_lanes.iter().copied().collect(),
                ))
            }
            TelegraphMode::Danger if self.timer > tuning.danger_duration => {
                self.danger_lanes.clear();
                self.timer = 0.0;
                let count = if rng.random_bool(tuning.double_lane_chance) {
                    2
                } else {
                    1
                };
                self.warning_lanes = pick_lanes(rng, tuning.lanes, count);
                self.mode = TelegraphMode::Warning;
                Some(TelegraphTransition::EnteredWarning(
                    self.warning_lanes.iter().copied().collect(),
                ))
            }
            _ => None,
        }
    }
}

/// Draw `count` distinct lanes from `0..lanes`
///
/// Shuffles the full candidate list and takes a prefix, so it always
/// terminates even if `count` exceeds the lane count.
fn pick_lanes<R: Rng + ?Sized>(rng: &mut R, lanes: usize, count: usize) -> BTreeSet<usize> {
    debug_assert!(count <= lanes, "asked for {count} distinct lanes out of {lanes}");
    let mut candidates: Vec<usize> = (0..lanes).collect();
    candidates.shuffle(rng);
    candidates.into_iter().take(count.min(lanes)).collect()
}
