//! Valo Dash - a lane runner arcade game
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, lane attacks, combat, phases)
//! - `session`: Frame driver that owns the live game state
//! - `audio`: Event to sound cue routing
//! - `highscores`: Leaderboard and background score submission
//! - `platform`: Host input mapping
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod audio;
pub mod highscores;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use session::Session;
pub use settings::Settings;
pub use tuning::Tuning;

/// Frame timing constants
pub mod consts {
    /// Nominal frame step for headless runs (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Longest step a single frame may advance the simulation
    pub const MAX_FRAME_DT: f32 = 0.1;
}
