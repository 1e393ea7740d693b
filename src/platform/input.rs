//! Keyboard mapping
//!
//! Hosts forward raw key names (DOM `KeyboardEvent.key` style); this turns
//! them into simulation commands.

use crate::sim::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Command for a key transition, if the key is bound
pub fn command_for_key(key: &str, state: KeyState) -> Option<Command> {
    match (key, state) {
        ("a" | "A" | "ArrowLeft", KeyState::Pressed) => Some(Command::MoveLeft),
        ("d" | "D" | "ArrowRight", KeyState::Pressed) => Some(Command::MoveRight),
        (" " | "Space" | "j" | "J", KeyState::Pressed) => Some(Command::ChargeStart),
        (" " | "Space" | "j" | "J", KeyState::Released) => Some(Command::ChargeRelease),
        ("r" | "R" | "Enter", KeyState::Pressed) => Some(Command::Reset),
        _ => None,
    }
}
