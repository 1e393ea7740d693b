//! Lane runner simulation
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Elapsed-time steps driven by the caller
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod bounds;
pub mod collision;
pub mod combat;
pub mod entities;
pub mod phase;
pub mod snapshot;
pub mod state;
pub mod telegraph;
pub mod tick;

pub use autopilot::autopilot;
pub use bounds::BoundingBox;
pub use collision::CollisionReport;
pub use combat::{Attack, AttackKind, ChargeState};
pub use entities::EntityManager;
pub use phase::SpawnTimers;
pub use snapshot::{EntityView, Snapshot};
pub use state::{Collectible, GameEvent, GameState, Obstacle, Phase, Player, ScorePopup};
pub use telegraph::{LaneAttack, TelegraphMode, TelegraphTransition};
pub use tick::{Command, CommandQueue, TickResult, tick};
