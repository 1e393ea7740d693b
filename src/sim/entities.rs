//! Entity manager: owns live obstacles and collectibles
//!
//! Spawning picks lanes with the run's RNG; cadence is decided by the phase
//! controller, not here.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{Collectible, Obstacle};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Default)]
pub struct EntityManager {
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
}

impl EntityManager {
    /// Spawn an obstacle in a uniformly random lane. Returns the lane.
    pub fn spawn_obstacle<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        speed: f32,
        tuning: &Tuning,
    ) -> usize {
        let lane = rng.random_range(0..tuning.lanes);
        self.obstacles.push(Obstacle::new(lane, speed, tuning));
        lane
    }

    /// Whether an obstacle occupies the upper part of `lane`
    ///
    /// The zone starts at the pre-spawn position, so a freshly spawned
    /// obstacle already blocks its lane.
    pub fn lane_blocked(&self, lane: usize, tuning: &Tuning) -> bool {
        let top = -tuning.obstacle_height;
        let bottom = tuning.playfield_height * tuning.blocked_zone;
        self.obstacles
            .iter()
            .any(|o| o.lane == lane && o.y >= top && o.y < bottom)
    }

    /// Lanes a collectible may spawn in
    pub fn free_lanes(&self, tuning: &Tuning) -> Vec<usize> {
        (0..tuning.lanes)
            .filter(|&lane| !self.lane_blocked(lane, tuning))
            .collect()
    }

    /// Spawn a collectible in a random unblocked lane
    ///
    /// Returns `None` (and spawns nothing) when every lane is blocked.
    pub fn spawn_collectible<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        speed: f32,
        tuning: &Tuning,
    ) -> Option<usize> {
        let free = self.free_lanes(tuning);
        let lane = *free.choose(rng)?;
        self.collectibles.push(Collectible::new(lane, speed, tuning));
        Some(lane)
    }

    /// Move everything down and drop entities past the bottom of the track
    pub fn advance(&mut self, dt: f32, playfield_height: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.advance(dt);
        }
        for collectible in &mut self.collectibles {
            collectible.advance(dt);
        }
        self.obstacles.retain(|o| o.y <= playfield_height);
        self.collectibles.retain(|c| c.y <= playfield_height);
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.collectibles.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty() && self.collectibles.is_empty()
    }
}
