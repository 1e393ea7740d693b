//! Data-driven game balance
//!
//! Every number the simulation compares against lives here so a run can be
//! rebalanced from a JSON file without recompiling.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a tuning or settings file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Balance constants for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Track ===
    pub lanes: usize,
    pub playfield_width: f32,
    pub playfield_height: f32,
    pub start_lane: usize,

    // === Difficulty ramp ===
    pub start_speed: f32,
    /// Speed gained per second alive
    pub speed_ramp: f32,
    /// Score gained per second alive
    pub score_rate: f32,

    // === Entities ===
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub collectible_size: f32,
    pub collectible_value: u32,
    /// Fraction of the track (from the top) in which an obstacle blocks a
    /// collectible from spawning in its lane
    pub blocked_zone: f32,

    // === Spawn cadence ===
    pub obstacle_interval_max: f32,
    pub obstacle_interval_min: f32,
    /// Score at which the obstacle interval would reach zero if unclamped
    pub obstacle_interval_score_scale: f32,
    pub collectible_interval: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub runner_bottom_offset: f32,
    pub chase_bottom_offset: f32,

    // === Popups ===
    pub popup_life: f32,
    pub popup_rise: f32,

    // === Chase ===
    pub chase_threshold: f32,
    pub warning_duration: f32,
    pub danger_duration: f32,
    /// Chance a new pattern marks two lanes instead of one
    pub double_lane_chance: f64,

    // === Combat ===
    pub tap_threshold: f32,
    pub max_charge: f32,
    pub attack_cooldown: f32,
    pub light_reward: u32,
    pub charged_reward: u32,
    pub light_feedback: f32,
    pub charged_feedback: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lanes: 4,
            playfield_width: 800.0,
            playfield_height: 600.0,
            start_lane: 1,

            start_speed: 300.0,
            speed_ramp: 20.0,
            score_rate: 100.0,

            obstacle_width: 60.0,
            obstacle_height: 60.0,
            collectible_size: 30.0,
            collectible_value: 500,
            blocked_zone: 0.6,

            obstacle_interval_max: 1.0,
            obstacle_interval_min: 0.6,
            obstacle_interval_score_scale: 20_000.0,
            collectible_interval: 1.5,

            player_width: 40.0,
            player_height: 80.0,
            runner_bottom_offset: 120.0,
            chase_bottom_offset: 160.0,

            popup_life: 0.8,
            popup_rise: 60.0,

            chase_threshold: 10_000.0,
            warning_duration: 0.6,
            danger_duration: 0.4,
            double_lane_chance: 0.4,

            tap_threshold: 0.25,
            max_charge: 0.6,
            attack_cooldown: 0.4,
            light_reward: 300,
            charged_reward: 800,
            light_feedback: 0.15,
            charged_feedback: 0.25,
        }
    }
}

impl Tuning {
    /// Width of a single lane
    #[inline]
    pub fn lane_width(&self) -> f32 {
        self.playfield_width / self.lanes as f32
    }

    /// Horizontal centre of a lane
    #[inline]
    pub fn lane_center(&self, lane: usize) -> f32 {
        let w = self.lane_width();
        lane as f32 * w + w / 2.0
    }

    /// Obstacle spawn interval for the current score
    pub fn obstacle_interval(&self, score: f32) -> f32 {
        (self.obstacle_interval_max - score / self.obstacle_interval_score_scale)
            .max(self.obstacle_interval_min)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Lane attack patterns pick up to two distinct lanes
        if self.lanes < 2 {
            return Err(ConfigError::Invalid(format!(
                "need at least 2 lanes, got {}",
                self.lanes
            )));
        }
        if self.start_lane >= self.lanes {
            return Err(ConfigError::Invalid(format!(
                "start lane {} outside 0..{}",
                self.start_lane, self.lanes
            )));
        }
        let positive = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("obstacle_interval_min", self.obstacle_interval_min),
            ("obstacle_interval_score_scale", self.obstacle_interval_score_scale),
            ("collectible_interval", self.collectible_interval),
            ("warning_duration", self.warning_duration),
            ("danger_duration", self.danger_duration),
            ("max_charge", self.max_charge),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if self.tap_threshold > self.max_charge {
            return Err(ConfigError::Invalid(format!(
                "tap_threshold {} exceeds max_charge {}",
                self.tap_threshold, self.max_charge
            )));
        }
        if !(0.0..=1.0).contains(&self.double_lane_chance) {
            return Err(ConfigError::Invalid(format!(
                "double_lane_chance {} outside [0, 1]",
                self.double_lane_chance
            )));
        }
        Ok(())
    }

    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: "<inline>".to_string(),
            source,
        })?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read tuning from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tuning: Tuning = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a file, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning: {e}");
                Self::default()
            }
        }
    }
}
