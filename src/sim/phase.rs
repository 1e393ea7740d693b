//! Phase controller
//!
//! Runner → Chase fires once when the score crosses the chase threshold. The
//! runner phase also owns the spawn cadence.

use super::state::{GameState, Phase};

/// Time since the last spawn of each entity kind
#[derive(Debug, Clone, Default)]
pub struct SpawnTimers {
    pub obstacle: f32,
    pub collectible: f32,
}

impl SpawnTimers {
    pub fn reset(&mut self) {
        self.obstacle = 0.0;
        self.collectible = 0.0;
    }
}

/// Enter the chase phase if the score allows it
///
/// Returns true only on the tick the transition happens.
pub fn check_transition(state: &mut GameState) -> bool {
    if state.phase != Phase::Runner || state.score < state.tuning.chase_threshold {
        return false;
    }
    enter_chase(state);
    true
}

/// Switch to chase: clear the track, stop spawning, arm the telegraph
pub fn enter_chase(state: &mut GameState) {
    log::info!(
        "Chase phase at score {} ({} obstacles, {} collectibles cleared)",
        state.final_score(),
        state.entities.obstacles.len(),
        state.entities.collectibles.len()
    );
    state.phase = Phase::Chase;
    state.entities.clear();
    state.spawn.reset();
    state.lane_attack.reset();
    state.charge.reset();
}

/// Run the runner-phase spawners for one tick
pub fn run_spawners(state: &mut GameState, dt: f32) {
    // Interval is only needed while spawning, so it is derived here
    let interval = state.tuning.obstacle_interval(state.score);

    state.spawn.obstacle += dt;
    if state.spawn.obstacle > interval {
        let lane = state
            .entities
            .spawn_obstacle(&mut state.rng, state.speed, &state.tuning);
        log::debug!("Obstacle in lane {lane} (speed {:.0})", state.speed);
        state.spawn.obstacle = 0.0;
    }

    state.spawn.collectible += dt;
    if state.spawn.collectible > state.tuning.collectible_interval {
        match state
            .entities
            .spawn_collectible(&mut state.rng, state.speed, &state.tuning)
        {
            Some(lane) => log::debug!("Collectible in lane {lane}"),
            None => log::debug!("Collectible skipped, every lane blocked"),
        }
        state.spawn.collectible = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Collectible, Obstacle};
    use crate::sim::telegraph::TelegraphMode;

    #[test]
    fn test_no_transition_below_threshold() {
        let mut state = GameState::new(1);
        state.score = 9_999.0;
        assert!(!check_transition(&mut state));
        assert_eq!(state.phase, Phase::Runner);
    }

    #[test]
    fn test_transition_clears_entities() {
        let mut state = GameState::new(1);
        let t = state.tuning.clone();
        state.entities.obstacles.push(Obstacle::new(0, 300.0, &t));
        state.entities.collectibles.push(Collectible::new(1, 300.0, &t));
        state.spawn.obstacle = 0.5;
        state.lane_attack.mode = TelegraphMode::Danger;
        state.score = 10_000.0;

        assert!(check_transition(&mut state));
        assert_eq!(state.phase, Phase::Chase);
        assert!(state.entities.is_empty());
        assert_eq!(state.spawn.obstacle, 0.0);
        assert_eq!(state.lane_attack.mode, TelegraphMode::Warning);
    }

    #[test]
    fn test_transition_fires_once() {
        let mut state = GameState::new(1);
        state.score = 10_000.0;
        assert!(check_transition(&mut state));
        state.score = 50_000.0;
        assert!(!check_transition(&mut state));
    }

    #[test]
    fn test_spawners_fire_after_interval() {
        let mut state = GameState::new(2);
        run_spawners(&mut state, 0.5);
        assert!(state.entities.obstacles.is_empty());
        run_spawners(&mut state, 0.5);
        assert!(state.entities.obstacles.is_empty());
        // Strictly past the 1.0s interval
        run_spawners(&mut state, 0.125);
        assert_eq!(state.entities.obstacles.len(), 1);
        assert_eq!(state.spawn.obstacle, 0.0);
        // Collectible timer at 1.125, not yet past 1.5
        assert!(state.entities.collectibles.is_empty());
        run_spawners(&mut state, 0.5);
        assert_eq!(state.spawn.collectible, 0.0);
    }
}
