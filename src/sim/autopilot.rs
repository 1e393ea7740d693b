//! Idle/demo mode: a simple bot that plays the game
//!
//! Reads the state, never mutates it, and answers with the commands a player
//! would have pressed this frame.

use super::state::{GameState, Phase};
use super::tick::Command;

/// How far above the player (in seconds of travel) the bot looks for hazards
const LOOKAHEAD_SECS: f32 = 0.8;

/// Commands for this frame
pub fn autopilot(state: &GameState) -> Vec<Command> {
    if !state.alive {
        return Vec::new();
    }
    let mut commands = Vec::new();

    let target = match state.phase {
        Phase::Runner => runner_target(state),
        Phase::Chase => chase_target(state),
    };
    if let Some(target) = target {
        if target < state.player.lane {
            commands.push(Command::MoveLeft);
        } else if target > state.player.lane {
            commands.push(Command::MoveRight);
        }
    }

    if state.phase == Phase::Chase {
        let charge = &state.charge;
        if charge.charging {
            // Hold just long enough for a charged hit
            if charge.elapsed >= state.tuning.tap_threshold {
                commands.push(Command::ChargeRelease);
            }
        } else if charge.can_start() {
            commands.push(Command::ChargeStart);
        }
    }

    commands
}

/// Safest lane, preferring collectibles and short moves
fn runner_target(state: &GameState) -> Option<usize> {
    let t = &state.tuning;
    let player = state.player_bounds();
    let horizon = player.y - state.speed * LOOKAHEAD_SECS;

    let threatened = |lane: usize| {
        state.entities.obstacles.iter().any(|o| {
            let b = o.bounds(t);
            o.lane == lane && b.bottom() > horizon && b.y < player.bottom()
        })
    };
    let has_pickup = |lane: usize| {
        state
            .entities
            .collectibles
            .iter()
            .any(|c| c.lane == lane && c.y < player.bottom())
    };

    let current = state.player.lane;
    (0..state.player.lane_count)
        .filter(|&lane| !threatened(lane) && path_clear(current, lane, &threatened))
        .min_by_key(|&lane| {
            let pickup = has_pickup(lane);
            // Pickups are worth a detour of one lane and win ties
            let distance = lane.abs_diff(current);
            let cost = if pickup { distance.saturating_sub(1) } else { distance };
            (cost, !pickup)
        })
}

/// Lane nearest the player that is neither warned nor lethal
fn chase_target(state: &GameState) -> Option<usize> {
    let la = &state.lane_attack;
    let current = state.player.lane;
    (0..state.player.lane_count)
        .filter(|lane| !la.warning_lanes.contains(lane) && !la.danger_lanes.contains(lane))
        .min_by_key(|&lane| lane.abs_diff(current))
}

/// Every lane strictly between `from` and `to` is safe to pass through
fn path_clear(from: usize, to: usize, threatened: &impl Fn(usize) -> bool) -> bool {
    let (lo, hi) = if from < to { (from, to) } else { (to, from) };
    ((lo + 1)..hi).all(|lane| !threatened(lane))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::phase::enter_chase;
    use crate::sim::state::{Collectible, Obstacle};
    use crate::sim::tick::tick;

    #[test]
    fn test_dodges_incoming_obstacle() {
        let mut state = GameState::new(1);
        let t = state.tuning.clone();
        let mut o = Obstacle::new(1, 300.0, &t);
        o.y = 300.0;
        state.entities.obstacles.push(o);

        let commands = autopilot(&state);
        assert_eq!(commands.len(), 1);
        assert!(matches!(commands[0], Command::MoveLeft | Command::MoveRight));
    }

    #[test]
    fn test_stays_when_safe() {
        let state = GameState::new(1);
        assert!(autopilot(&state).is_empty());
    }

    #[test]
    fn test_steps_toward_pickup() {
        let mut state = GameState::new(1);
        let t = state.tuning.clone();
        state.entities.collectibles.push(Collectible::new(2, 300.0, &t));
        assert_eq!(autopilot(&state), vec![Command::MoveRight]);
    }

    #[test]
    fn test_leaves_warned_lane() {
        let mut state = GameState::new(1);
        enter_chase(&mut state);
        state.lane_attack.warning_lanes.insert(1);
        state.lane_attack.warning_lanes.insert(0);
        let commands = autopilot(&state);
        assert_eq!(commands[0], Command::MoveRight);
        assert!(commands.contains(&Command::ChargeStart));
    }

    #[test]
    fn test_releases_after_tap_threshold() {
        let mut state = GameState::new(1);
        enter_chase(&mut state);
        state.charge.start();
        state.charge.elapsed = 0.3;
        assert_eq!(autopilot(&state), vec![Command::ChargeRelease]);
    }

    #[test]
    fn test_survives_chase_for_a_while() {
        let mut state = GameState::new(21);
        enter_chase(&mut state);
        for _ in 0..600 {
            let commands = autopilot(&state);
            tick(&mut state, &commands, 1.0 / 60.0);
        }
        assert!(state.alive);
        assert!(state.score > 1_000.0);
    }

    #[test]
    fn test_dead_run_sends_nothing() {
        let mut state = GameState::new(1);
        state.alive = false;
        assert!(autopilot(&state).is_empty());
    }
}
