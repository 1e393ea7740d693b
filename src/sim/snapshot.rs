//! Read-only view of a run for renderers and other presentation layers

use serde::Serialize;

use super::bounds::BoundingBox;
use super::combat::AttackKind;
use super::state::{GameState, Phase, ScorePopup};
use super::telegraph::TelegraphMode;

/// An obstacle or collectible as drawn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    pub lane: usize,
    pub bounds: BoundingBox,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub alive: bool,
    pub score: u64,
    pub speed: f32,
    pub lane_count: usize,
    pub player_lane: usize,
    pub player: BoundingBox,
    pub obstacles: Vec<EntityView>,
    pub collectibles: Vec<EntityView>,
    pub popups: Vec<ScorePopup>,
    pub telegraph: TelegraphMode,
    pub warning_lanes: Vec<usize>,
    pub danger_lanes: Vec<usize>,
    pub charging: bool,
    /// Charge progress in `[0, 1]`
    pub charge_level: f32,
    /// Seconds of attack feedback left
    pub attack_feedback: f32,
    pub last_attack: Option<AttackKind>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let t = &state.tuning;
        Self {
            phase: state.phase,
            alive: state.alive,
            score: state.final_score(),
            speed: state.speed,
            lane_count: state.player.lane_count,
            player_lane: state.player.lane,
            player: state.player_bounds(),
            obstacles: state
                .entities
                .obstacles
                .iter()
                .map(|o| EntityView {
                    lane: o.lane,
                    bounds: o.bounds(t),
                })
                .collect(),
            collectibles: state
                .entities
                .collectibles
                .iter()
                .map(|c| EntityView {
                    lane: c.lane,
                    bounds: c.bounds(t),
                })
                .collect(),
            popups: state.popups.clone(),
            telegraph: state.lane_attack.mode,
            warning_lanes: state.lane_attack.warning_lanes.iter().copied().collect(),
            danger_lanes: state.lane_attack.danger_lanes.iter().copied().collect(),
            charging: state.charge.charging,
            charge_level: state.charge.level(t),
            attack_feedback: state.charge.feedback,
            last_attack: state.charge.last_attack,
        }
    }
}
