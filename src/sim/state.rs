//! Game state and core simulation types
//!
//! `GameState` is the single aggregate the tick function mutates. Everything a
//! run needs lives inside it, including the seeded RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bounds::BoundingBox;
use super::combat::{AttackKind, ChargeState};
use super::entities::EntityManager;
use super::phase::SpawnTimers;
use super::telegraph::LaneAttack;
use crate::tuning::{ConfigError, Tuning};

/// Top-level gameplay mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Dodge obstacles, grab collectibles
    Runner,
    /// Lane attacks and charge combat. Terminal for the run.
    Chase,
}

/// The player's lane position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub lane: usize,
    pub lane_count: usize,
}

impl Player {
    pub fn new(lane: usize, lane_count: usize) -> Self {
        Self {
            lane: lane.min(lane_count.saturating_sub(1)),
            lane_count,
        }
    }

    /// Move one lane left, stopping at the edge
    pub fn move_left(&mut self) -> bool {
        if self.lane > 0 {
            self.lane -= 1;
            true
        } else {
            false
        }
    }

    /// Move one lane right, stopping at the edge
    pub fn move_right(&mut self) -> bool {
        if self.lane + 1 < self.lane_count {
            self.lane += 1;
            true
        } else {
            false
        }
    }
}

/// A lane-bound hazard falling down the track
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub lane: usize,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Fixed at spawn time
    pub speed: f32,
}

impl Obstacle {
    /// New obstacle just above the visible track
    pub fn new(lane: usize, speed: f32, tuning: &Tuning) -> Self {
        Self {
            lane,
            y: -tuning.obstacle_height,
            width: tuning.obstacle_width,
            height: tuning.obstacle_height,
            speed,
        }
    }

    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.y += self.speed * dt;
    }

    pub fn bounds(&self, tuning: &Tuning) -> BoundingBox {
        BoundingBox::centered_x(tuning.lane_center(self.lane), self.y, self.width, self.height)
    }
}

/// A lane-bound pickup worth a fixed reward
#[derive(Debug, Clone, PartialEq)]
pub struct Collectible {
    pub lane: usize,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub value: u32,
}

impl Collectible {
    pub fn new(lane: usize, speed: f32, tuning: &Tuning) -> Self {
        Self {
            lane,
            y: -tuning.collectible_size,
            width: tuning.collectible_size,
            height: tuning.collectible_size,
            speed,
            value: tuning.collectible_value,
        }
    }

    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.y += self.speed * dt;
    }

    pub fn bounds(&self, tuning: &Tuning) -> BoundingBox {
        BoundingBox::centered_x(tuning.lane_center(self.lane), self.y, self.width, self.height)
    }
}

/// Floating score indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorePopup {
    pub pos: Vec2,
    pub value: u32,
    /// Seconds left
    pub life: f32,
}

impl ScorePopup {
    /// Age the popup and float it upward. Returns false once expired.
    pub fn update(&mut self, dt: f32, rise: f32) -> bool {
        self.life -= dt;
        self.pos.y -= rise * dt;
        self.life > 0.0
    }
}

/// Discrete things that happened during a tick, for audio/visual hooks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// Player ran into an obstacle
    ObstacleHit { lane: usize },
    /// Player picked up a collectible
    Collected { lane: usize, value: u32 },
    /// Score threshold reached, chase phase begins
    ChaseStarted,
    /// New lanes marked as about to become lethal
    LaneWarning { lanes: Vec<usize> },
    /// Warned lanes became lethal
    LaneDanger { lanes: Vec<usize> },
    /// Player was standing in a lethal lane
    LaneDangerHit { lane: usize },
    /// A charge was released
    AttackFired { kind: AttackKind, reward: u32 },
    /// Run ended
    GameOver { final_score: u64 },
    /// State reinitialized by a reset command
    Reset,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub tuning: Tuning,
    pub score: f32,
    /// Speed given to newly spawned entities
    pub speed: f32,
    pub alive: bool,
    pub phase: Phase,
    /// Seconds survived this run
    pub elapsed: f32,
    pub player: Player,
    pub entities: EntityManager,
    pub spawn: SpawnTimers,
    pub lane_attack: LaneAttack,
    pub charge: ChargeState,
    pub popups: Vec<ScorePopup>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new run with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a new run with custom tuning, rejecting values the simulation
    /// cannot run with (fewer than 2 lanes, start lane off the playfield, ...)
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, ConfigError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            score: 0.0,
            speed: tuning.start_speed,
            alive: true,
            phase: Phase::Runner,
            elapsed: 0.0,
            player: Player::new(tuning.start_lane, tuning.lanes),
            entities: EntityManager::default(),
            spawn: SpawnTimers::default(),
            lane_attack: LaneAttack::default(),
            charge: ChargeState::default(),
            popups: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        }
    }

    /// Reinitialize the run. Tuning and the RNG stream carry over.
    pub fn reset(&mut self) {
        self.score = 0.0;
        self.speed = self.tuning.start_speed;
        self.alive = true;
        self.phase = Phase::Runner;
        self.elapsed = 0.0;
        self.player = Player::new(self.tuning.start_lane, self.tuning.lanes);
        self.entities.clear();
        self.spawn.reset();
        self.lane_attack.reset();
        self.charge.reset();
        self.popups.clear();
    }

    /// Score as shown to the player and submitted to the leaderboard
    pub fn final_score(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }

    /// Player hit-box for the current lane and phase
    pub fn player_bounds(&self) -> BoundingBox {
        let offset = match self.phase {
            Phase::Runner => self.tuning.runner_bottom_offset,
            Phase::Chase => self.tuning.chase_bottom_offset,
        };
        BoundingBox::centered_x(
            self.tuning.lane_center(self.player.lane),
            self.tuning.playfield_height - offset,
            self.tuning.player_width,
            self.tuning.player_height,
        )
    }

    pub fn spawn_popup(&mut self, pos: Vec2, value: u32) {
        self.popups.push(ScorePopup {
            pos,
            value,
            life: self.tuning.popup_life,
        });
    }

    /// Age popups and drop expired ones
    pub fn update_popups(&mut self, dt: f32) {
        let rise = self.tuning.popup_rise;
        self.popups.retain_mut(|p| p.update(dt, rise));
    }
}
