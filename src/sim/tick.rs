//! Simulation tick
//!
//! Advances a run by one elapsed-time step. Input arrives as discrete
//! commands, queued between frames and drained once per tick.

use std::collections::VecDeque;

use super::collision;
use super::phase;
use super::snapshot::Snapshot;
use super::state::{GameEvent, GameState, Phase};
use super::telegraph::TelegraphTransition;

/// A discrete input command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    ChargeStart,
    ChargeRelease,
    /// Restart the run. The only command honoured after death.
    Reset,
}

/// Commands collected between ticks, applied in arrival order
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    commands: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    /// Take every queued command, oldest first
    pub fn drain(&mut self) -> Vec<Command> {
        self.commands.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// What a tick produced for presentation
#[derive(Debug, Clone)]
pub struct TickResult {
    pub events: Vec<GameEvent>,
    pub snapshot: Snapshot,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, commands: &[Command], dt: f32) -> TickResult {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    let mut events = Vec::new();

    for &command in commands {
        apply_command(state, command, &mut events);
    }

    // Dead runs are frozen until reset
    if !state.alive {
        return TickResult {
            events,
            snapshot: Snapshot::capture(state),
        };
    }

    state.elapsed += dt;
    state.speed += state.tuning.speed_ramp * dt;
    state.score += state.tuning.score_rate * dt;

    if phase::check_transition(state) {
        events.push(GameEvent::ChaseStarted);
    }

    match state.phase {
        Phase::Runner => tick_runner(state, dt, &mut events),
        Phase::Chase => tick_chase(state, dt, &mut events),
    }

    state.update_popups(dt);

    if !state.alive {
        let final_score = state.final_score();
        log::info!("Run over: score {final_score}, {:.1}s survived", state.elapsed);
        events.push(GameEvent::GameOver { final_score });
    }

    TickResult {
        events,
        snapshot: Snapshot::capture(state),
    }
}

fn apply_command(state: &mut GameState, command: Command, events: &mut Vec<GameEvent>) {
    if !state.alive && command != Command::Reset {
        log::trace!("{command:?} ignored, run is over");
        return;
    }

    match command {
        Command::Reset => {
            log::info!("Run reset");
            state.reset();
            events.push(GameEvent::Reset);
        }
        Command::MoveLeft => {
            state.player.move_left();
        }
        Command::MoveRight => {
            state.player.move_right();
        }
        Command::ChargeStart if state.phase == Phase::Chase => {
            state.charge.start();
        }
        Command::ChargeRelease if state.phase == Phase::Chase => {
            if let Some(attack) = state.charge.release(&state.tuning) {
                state.score += attack.reward as f32;
                log::debug!("{:?} attack for {}", attack.kind, attack.reward);
                events.push(GameEvent::AttackFired {
                    kind: attack.kind,
                    reward: attack.reward,
                });
            }
        }
        Command::ChargeStart | Command::ChargeRelease => {
            log::trace!("{command:?} ignored outside chase");
        }
    }
}

fn tick_runner(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    phase::run_spawners(state, dt);
    state.entities.advance(dt, state.tuning.playfield_height);

    let player = state.player_bounds();
    let report = collision::resolve_runner(&player, &mut state.entities, &state.tuning);

    if let Some(lane) = report.obstacle_hit {
        log::debug!("Obstacle hit in lane {lane}");
        state.alive = false;
        events.push(GameEvent::ObstacleHit { lane });
    }

    for (collectible, bounds) in report.collected {
        state.score += collectible.value as f32;
        state.spawn_popup(bounds.center(), collectible.value);
        events.push(GameEvent::Collected {
            lane: collectible.lane,
            value: collectible.value,
        });
    }
}

fn tick_chase(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    match state.lane_attack.advance(dt, &mut state.rng, &state.tuning) {
        Some(TelegraphTransition::EnteredDanger(lanes)) => {
            if !lanes.is_empty() {
                events.push(GameEvent::LaneDanger { lanes });
            }
        }
        Some(TelegraphTransition::EnteredWarning(lanes)) => {
            events.push(GameEvent::LaneWarning { lanes });
        }
        None => {}
    }

    if collision::lane_danger(state.player.lane, &state.lane_attack) {
        log::debug!("Caught in lethal lane {}", state.player.lane);
        state.alive = false;
        events.push(GameEvent::LaneDangerHit {
            lane: state.player.lane,
        });
        return;
    }

    state.charge.advance(dt, &state.tuning);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::combat::AttackKind;
    use crate::sim::state::{Collectible, Obstacle};
    use crate::sim::telegraph::TelegraphMode;

    const DT: f32 = 0.125;

    fn chase_state() -> GameState {
        let mut state = GameState::new(77);
        phase::enter_chase(&mut state);
        state
    }

    #[test]
    fn test_fresh_run_accrues_score_and_speed() {
        let mut state = GameState::new(1);
        tick(&mut state, &[], 0.5);
        assert_eq!(state.score, 50.0);
        assert_eq!(state.speed, 310.0);
        assert!(state.alive);
    }

    #[test]
    fn test_moves_are_clamped() {
        let mut state = GameState::new(1);
        let lefts = [Command::MoveLeft; 5];
        tick(&mut state, &lefts, DT);
        assert_eq!(state.player.lane, 0);
        let rights = [Command::MoveRight; 9];
        tick(&mut state, &rights, DT);
        assert_eq!(state.player.lane, 3);
    }

    #[test]
    fn test_obstacle_advances_and_kills() {
        let mut state = GameState::new(1);
        let t = state.tuning.clone();
        // Keep spawners quiet
        state.spawn.obstacle = -100.0;
        state.spawn.collectible = -100.0;
        state.entities.obstacles.push(Obstacle::new(2, 300.0, &t));

        for _ in 0..4 {
            tick(&mut state, &[], DT);
        }
        assert_eq!(state.entities.obstacles[0].y, -60.0 + 150.0);
        assert!(state.alive);

        // Park the obstacle on the player in lane 2
        tick(&mut state, &[Command::MoveRight], 0.0);
        state.entities.obstacles[0].y = state.player_bounds().y;
        let result = tick(&mut state, &[], DT);
        assert!(!state.alive);
        assert!(result.events.contains(&GameEvent::ObstacleHit { lane: 2 }));
        let final_score = state.final_score();
        assert!(result.events.contains(&GameEvent::GameOver { final_score }));

        // Frozen afterwards
        let score = state.score;
        let y = state.entities.obstacles[0].y;
        let result = tick(&mut state, &[Command::MoveLeft], 1.0);
        assert_eq!(state.score, score);
        assert_eq!(state.entities.obstacles[0].y, y);
        assert_eq!(state.player.lane, 2);
        assert!(result.events.is_empty());
        assert!(!result.snapshot.alive);
    }

    #[test]
    fn test_collectible_pickup_adds_value() {
        let mut state = GameState::new(1);
        let t = state.tuning.clone();
        state.spawn.obstacle = -100.0;
        state.spawn.collectible = -100.0;
        let mut c = Collectible::new(state.player.lane, 300.0, &t);
        c.y = state.player_bounds().y;
        state.entities.collectibles.push(c);

        let result = tick(&mut state, &[], DT);
        // 500 for the pickup plus 12.5 of time accrual
        assert_eq!(state.score, 512.5);
        assert!(state.entities.collectibles.is_empty());
        assert_eq!(state.popups.len(), 1);
        assert_eq!(state.popups[0].value, 500);
        assert!(result.events.contains(&GameEvent::Collected { lane: 1, value: 500 }));
    }

    #[test]
    fn test_chase_transition_clears_once() {
        let mut state = GameState::new(1);
        let t = state.tuning.clone();
        state.entities.obstacles.push(Obstacle::new(3, 300.0, &t));
        state.score = 9_999.0;

        let result = tick(&mut state, &[], DT);
        assert_eq!(state.phase, Phase::Chase);
        assert!(state.entities.is_empty());
        assert!(result.events.contains(&GameEvent::ChaseStarted));

        state.score = 90_000.0;
        let result = tick(&mut state, &[], DT);
        assert!(!result.events.contains(&GameEvent::ChaseStarted));
        assert!(state.entities.is_empty());
    }

    #[test]
    fn test_no_spawns_in_chase() {
        let mut state = chase_state();
        for _ in 0..40 {
            // Nothing warned means nothing ever turns lethal
            state.lane_attack.warning_lanes.clear();
            tick(&mut state, &[], DT);
        }
        assert!(state.alive);
        assert!(state.entities.is_empty());
    }

    #[test]
    fn test_lane_danger_kills() {
        let mut state = chase_state();
        let lane = state.player.lane;
        state.lane_attack.warning_lanes.insert(lane);

        let mut events = Vec::new();
        for _ in 0..5 {
            events.extend(tick(&mut state, &[], DT).events);
        }
        assert_eq!(state.lane_attack.mode, TelegraphMode::Danger);
        assert!(!state.alive);
        assert!(events.contains(&GameEvent::LaneDanger { lanes: vec![lane] }));
        assert!(events.contains(&GameEvent::LaneDangerHit { lane }));
    }

    #[test]
    fn test_dodging_lane_danger() {
        let mut state = chase_state();
        state.lane_attack.warning_lanes.insert(1);
        for _ in 0..4 {
            tick(&mut state, &[], DT);
        }
        tick(&mut state, &[Command::MoveLeft], DT);
        assert_eq!(state.lane_attack.mode, TelegraphMode::Danger);
        assert!(state.alive);
    }

    #[test]
    fn test_charge_attack_rewards() {
        let mut state = chase_state();
        state.lane_attack.timer = -100.0;

        tick(&mut state, &[Command::ChargeStart], DT);
        tick(&mut state, &[], DT);
        let before = state.score;
        let result = tick(&mut state, &[Command::ChargeRelease], DT);
        assert!(result.events.contains(&GameEvent::AttackFired {
            kind: AttackKind::Charged,
            reward: 800
        }));
        assert_eq!(state.score, before + 800.0 + 12.5);

        // Cooldown swallows an immediate restart
        tick(&mut state, &[Command::ChargeStart], DT);
        assert!(!state.charge.charging);
    }

    #[test]
    fn test_tap_attack_is_light() {
        let mut state = chase_state();
        state.lane_attack.timer = -100.0;
        let result = tick(&mut state, &[Command::ChargeStart, Command::ChargeRelease], DT);
        assert!(result.events.contains(&GameEvent::AttackFired {
            kind: AttackKind::Light,
            reward: 300
        }));
    }

    #[test]
    fn test_charge_ignored_in_runner() {
        let mut state = GameState::new(1);
        let result = tick(&mut state, &[Command::ChargeStart, Command::ChargeRelease], DT);
        assert!(!state.charge.charging);
        assert!(result.events.is_empty());
    }

    #[test]
    fn test_reset_revives_dead_run() {
        let mut state = chase_state();
        state.alive = false;
        state.score = 20_000.0;
        let result = tick(&mut state, &[Command::Reset], DT);
        assert!(state.alive);
        assert_eq!(state.phase, Phase::Runner);
        assert_eq!(result.events[0], GameEvent::Reset);
        // The reset tick still runs
        assert_eq!(state.score, 12.5);
    }

    #[test]
    fn test_bad_dt_is_ignored() {
        let mut state = GameState::new(1);
        tick(&mut state, &[], f32::NAN);
        tick(&mut state, &[], -1.0);
        assert_eq!(state.score, 0.0);
    }

    #[test]
    fn test_command_queue_drains_in_order() {
        let mut q = CommandQueue::new();
        q.push(Command::MoveLeft);
        q.push(Command::ChargeStart);
        assert_eq!(q.len(), 2);
        assert_eq!(q.drain(), vec![Command::MoveLeft, Command::ChargeStart]);
        assert!(q.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99_999);
        let mut b = GameState::new(99_999);
        let inputs = [
            vec![Command::MoveLeft],
            vec![],
            vec![Command::MoveRight, Command::MoveRight],
            vec![],
        ];
        for _ in 0..60 {
            for input in &inputs {
                tick(&mut a, input, 1.0 / 60.0);
                tick(&mut b, input, 1.0 / 60.0);
            }
        }
        assert_eq!(a.entities.obstacles, b.entities.obstacles);
        assert_eq!(a.alive, b.alive);
        assert_eq!(a.score, b.score);
    }
}
