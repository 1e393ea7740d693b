//! Collision resolution between the player and the track
//!
//! Checks run once per tick against current positions. There is no swept
//! test, so a fast entity can step over the hit-box between ticks.

use super::bounds::BoundingBox;
use super::entities::EntityManager;
use super::state::Collectible;
use super::telegraph::LaneAttack;
use crate::tuning::Tuning;

/// Outcome of a runner-phase collision pass
#[derive(Debug, Clone, Default)]
pub struct CollisionReport {
    /// Lane of the first obstacle overlapping the player
    pub obstacle_hit: Option<usize>,
    /// Collectibles picked up (already removed from the manager)
    pub collected: Vec<(Collectible, BoundingBox)>,
}

impl CollisionReport {
    pub fn is_empty(&self) -> bool {
        self.obstacle_hit.is_none() && self.collected.is_empty()
    }
}

/// First obstacle overlapping `player`, if any
pub fn obstacle_hit(player: &BoundingBox, entities: &EntityManager, tuning: &Tuning) -> Option<usize> {
    entities
        .obstacles
        .iter()
        .find(|o| player.overlaps(&o.bounds(tuning)))
        .map(|o| o.lane)
}

/// Remove and return every collectible overlapping `player`
pub fn take_collected(
    player: &BoundingBox,
    entities: &mut EntityManager,
    tuning: &Tuning,
) -> Vec<(Collectible, BoundingBox)> {
    let mut collected = Vec::new();
    entities.collectibles.retain(|c| {
        let bounds = c.bounds(tuning);
        if player.overlaps(&bounds) {
            collected.push((c.clone(), bounds));
            false
        } else {
            true
        }
    });
    collected
}

/// Check the player against obstacles and collectibles
pub fn resolve_runner(
    player: &BoundingBox,
    entities: &mut EntityManager,
    tuning: &Tuning,
) -> CollisionReport {
    CollisionReport {
        obstacle_hit: obstacle_hit(player, entities, tuning),
        collected: take_collected(player, entities, tuning),
    }
}

/// Whether the player's lane is currently lethal
#[inline]
pub fn lane_danger(lane: usize, lane_attack: &LaneAttack) -> bool {
    lane_attack.is_lethal(lane)
}
