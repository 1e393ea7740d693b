//! Charge attack resolution
//!
//! Holding the attack input builds charge up to `max_charge`. Releasing fires a
//! light or charged attack depending on whether the hold reached
//! `tap_threshold`. Attacks always land.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackKind {
    Light,
    Charged,
}

/// A resolved attack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attack {
    pub kind: AttackKind,
    pub reward: u32,
}

/// Classify a hold duration. Holds past `max_charge` count as `max_charge`.
pub fn classify(held: f32, tuning: &Tuning) -> AttackKind {
    if held.min(tuning.max_charge) >= tuning.tap_threshold {
        AttackKind::Charged
    } else {
        AttackKind::Light
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChargeState {
    pub charging: bool,
    /// Seconds held, clamped to `max_charge`
    pub elapsed: f32,
    /// Seconds until a new charge may start
    pub cooldown: f32,
    /// Seconds of hit feedback left for the last attack
    pub feedback: f32,
    pub last_attack: Option<AttackKind>,
}

impl ChargeState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn can_start(&self) -> bool {
        !self.charging && self.cooldown <= 0.0
    }

    /// Begin charging. Ignored while charging or on cooldown.
    pub fn start(&mut self) -> bool {
        if !self.can_start() {
            log::trace!("charge start ignored (charging={}, cooldown={:.2})", self.charging, self.cooldown);
            return false;
        }
        self.charging = true;
        self.elapsed = 0.0;
        true
    }

    /// Release the charge and resolve the attack
    ///
    /// Returns `None` when there is no active charge.
    pub fn release(&mut self, tuning: &Tuning) -> Option<Attack> {
        if !self.charging {
            log::trace!("charge release ignored (not charging)");
            return None;
        }
        let kind = classify(self.elapsed, tuning);
        let (reward, feedback) = match kind {
            AttackKind::Light => (tuning.light_reward, tuning.light_feedback),
            AttackKind::Charged => (tuning.charged_reward, tuning.charged_feedback),
        };
        self.charging = false;
        self.elapsed = 0.0;
        self.cooldown = tuning.attack_cooldown;
        self.feedback = feedback;
        self.last_attack = Some(kind);
        Some(Attack { kind, reward })
    }

    /// Build charge and run down timers
    pub fn advance(&mut self, dt: f32, tuning: &Tuning) {
        if self.charging {
            self.elapsed = (self.elapsed + dt).min(tuning.max_charge);
        }
        self.cooldown = (self.cooldown - dt).max(0.0);
        self.feedback = (self.feedback - dt).max(0.0);
    }

    /// Charge progress in `[0, 1]` for display
    pub fn level(&self, tuning: &Tuning) -> f32 {
        if self.charging {
            (self.elapsed / tuning.max_charge).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hold(charge: &mut ChargeState, t: &Tuning, secs: f32, dt: f32) {
        let steps = (secs / dt).round() as usize;
        for _ in 0..steps {
            charge.advance(dt, t);
        }
    }

    #[test]
    fn test_classify_thresholds() {
        let t = Tuning::default();
        assert_eq!(classify(0.0, &t), AttackKind::Light);
        assert_eq!(classify(0.24, &t), AttackKind::Light);
        assert_eq!(classify(0.25, &t), AttackKind::Charged);
        assert_eq!(classify(5.0, &t), AttackKind::Charged);
    }

    #[test]
    fn test_tap_is_light() {
        let t = Tuning::default();
        let mut c = ChargeState::default();
        assert!(c.start());
        hold(&mut c, &t, 0.125, 0.125);
        let attack = c.release(&t).unwrap();
        assert_eq!(attack, Attack { kind: AttackKind::Light, reward: 300 });
        assert_eq!(c.feedback, 0.15);
    }

    #[test]
    fn test_hold_is_charged() {
        let t = Tuning::default();
        let mut c = ChargeState::default();
        c.start();
        hold(&mut c, &t, 0.25, 0.125);
        let attack = c.release(&t).unwrap();
        assert_eq!(attack.kind, AttackKind::Charged);
        assert_eq!(attack.reward, 800);
        assert_eq!(c.feedback, 0.25);
    }

    #[test]
    fn test_long_hold_clamped() {
        let t = Tuning::default();
        let mut c = ChargeState::default();
        c.start();
        hold(&mut c, &t, 5.0, 0.125);
        assert_eq!(c.elapsed, 0.6);
        assert_eq!(c.level(&t), 1.0);
        assert_eq!(c.release(&t).unwrap().reward, 800);
    }

    #[test]
    fn test_release_without_charge_ignored() {
        let t = Tuning::default();
        let mut c = ChargeState::default();
        assert!(c.release(&t).is_none());
        assert_eq!(c.cooldown, 0.0);
    }

    #[test]
    fn test_cooldown_blocks_restart() {
        let t = Tuning::default();
        let mut c = ChargeState::default();
        c.start();
        c.release(&t);
        assert!(!c.start());
        c.advance(0.25, &t);
        assert!(!c.start());
        c.advance(0.25, &t);
        assert!(c.start());
    }

    #[test]
    fn test_start_while_charging_keeps_progress() {
        let t = Tuning::default();
        let mut c = ChargeState::default();
        c.start();
        c.advance(0.125, &t);
        assert!(!c.start());
        assert_eq!(c.elapsed, 0.125);
    }
}
