//! Platform abstraction layer
//!
//! Host-specific glue that stays out of the simulation:
//! - Key names to gameplay commands

pub mod input;

pub use input::{KeyState, command_for_key};
