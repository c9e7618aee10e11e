//! Input events and the commands they map to
//!
//! Keyboard, mouse and touch all funnel into the same small command set, so
//! the session never needs to know where a jump came from.

use crate::sim::{GamePhase, Level};

/// Raw input from the presentation surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed (`KeyboardEvent.key`)
    KeyDown(String),
    /// Mouse button / pen pressed on the canvas
    PointerDown,
    /// Finger touched the canvas
    TouchStart,
}

/// What the session should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Jump,
    /// Start the selected level, or restart after a game over
    Start,
    SelectLevel(Level),
}

/// Keys that make the player jump
pub const JUMP_KEYS: [&str; 4] = [" ", "ArrowUp", "w", "W"];

pub fn is_jump_key(key: &str) -> bool {
    JUMP_KEYS.contains(&key)
}

/// Translate an event in the given phase; unmapped input yields `None`
pub fn map_event(event: &InputEvent, phase: GamePhase) -> Option<Command> {
    match event {
        InputEvent::PointerDown | InputEvent::TouchStart => Some(Command::Jump),
        InputEvent::KeyDown(key) if is_jump_key(key) => Some(Command::Jump),
        InputEvent::KeyDown(key) if phase != GamePhase::Running => match key.as_str() {
            "Enter" => Some(Command::Start),
            "1" => Some(Command::SelectLevel(Level::Easy)),
            "2" => Some(Command::SelectLevel(Level::Medium)),
            "3" => Some(Command::SelectLevel(Level::Hard)),
            _ => None,
        },
        InputEvent::KeyDown(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: &str) -> InputEvent {
        InputEvent::KeyDown(k.to_string())
    }

    #[test]
    fn test_all_sources_jump() {
        for event in [
            key(" "),
            key("ArrowUp"),
            key("w"),
            InputEvent::PointerDown,
            InputEvent::TouchStart,
        ] {
            assert_eq!(map_event(&event, GamePhase::Running), Some(Command::Jump));
        }
    }

    #[test]
    fn test_menu_keys_only_outside_play() {
        assert_eq!(
            map_event(&key("2"), GamePhase::Idle),
            Some(Command::SelectLevel(Level::Medium))
        );
        assert_eq!(map_event(&key("Enter"), GamePhase::Over), Some(Command::Start));
        assert_eq!(map_event(&key("Enter"), GamePhase::Running), None);
        assert_eq!(map_event(&key("3"), GamePhase::Running), None);
    }

    #[test]
    fn test_unmapped_key() {
        assert_eq!(map_event(&key("q"), GamePhase::Idle), None);
        assert!(!is_jump_key("ArrowDown"));
    }
}
