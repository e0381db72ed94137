//! Enums used throughout the chess TUI
//!
//! This module contains the modal input state and small helpers for
//! talking about the side to move.

use shakmaty::Color;

/// Mode for modal input system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,    // Default mode - single-key commands
    MoveInput, // Typing a manual move into the input line
    Alert,     // Game-over popup, must be dismissed
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::MoveInput => "MOVE",
            Mode::Alert => "ALERT",
        }
    }
}

/// Single-letter turn code used on the wire ("w" / "b")
pub fn turn_code(color: Color) -> &'static str {
    match color {
        Color::White => "w",
        Color::Black => "b",
    }
}

/// Upper-case side name used in messages
pub fn side_label(color: Color) -> &'static str {
    match color {
        Color::White => "WHITE",
        Color::Black => "BLACK",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_default() {
        assert_eq!(Mode::default(), Mode::Normal);
    }

    #[test]
    fn test_mode_label() {
        assert_eq!(Mode::MoveInput.label(), "MOVE");
        assert_eq!(Mode::Alert.label(), "ALERT");
    }

    #[test]
    fn test_turn_code() {
        assert_eq!(turn_code(Color::White), "w");
        assert_eq!(turn_code(Color::Black), "b");
    }

    #[test]
    fn test_side_label() {
        assert_eq!(side_label(Color::Black), "BLACK");
    }
}
