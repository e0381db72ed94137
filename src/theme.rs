//! Theme module for the chess TUI
//!
//! This module provides a centralized color palette and styling constants
//! for panels and the board.

use ratatui::style::Color;
use ratatui::symbols::border;

/// Rounded border set used by every card
pub const ROUNDED_BORDERS: border::Set = border::ROUNDED;

// ============================================================================
// Background Colors
// ============================================================================

/// Primary background color (#0a0e14)
pub const BG_PRIMARY: Color = Color::Rgb(10, 14, 20);

/// Secondary background color - cards (#12161c)
pub const BG_SECONDARY: Color = Color::Rgb(18, 22, 28);

/// Subtle border color (#1e2530)
pub const BORDER_SUBTLE: Color = Color::Rgb(30, 37, 48);

// ============================================================================
// Board Colors
// ============================================================================

/// Light squares (#d8c3a0)
pub const SQUARE_LIGHT: Color = Color::Rgb(216, 195, 160);

/// Dark squares (#a57d5a)
pub const SQUARE_DARK: Color = Color::Rgb(165, 125, 90);

/// Source/target squares of the last move (#cdd26a)
pub const SQUARE_LAST_MOVE: Color = Color::Rgb(205, 210, 106);

/// King in check (#e06c6c)
pub const SQUARE_CHECK: Color = Color::Rgb(224, 108, 108);

/// White pieces (#fafafa)
pub const PIECE_WHITE: Color = Color::Rgb(250, 250, 250);

/// Black pieces (#15181d)
pub const PIECE_BLACK: Color = Color::Rgb(21, 24, 29);

// ============================================================================
// Accent & Status Colors
// ============================================================================

/// Primary cyan accent color (#00d4aa)
pub const CYAN_PRIMARY: Color = Color::Rgb(0, 212, 170);

/// Dimmed cyan for secondary elements (#0a8a6e)
pub const CYAN_DIM: Color = Color::Rgb(10, 138, 110);

/// Green active/running indicator (#22c55e)
pub const GREEN_ACTIVE: Color = Color::Rgb(34, 197, 94);

/// Amber warning color (#fbbf24)
pub const AMBER_WARNING: Color = Color::Rgb(251, 191, 36);

/// Red error color (#f87171)
pub const RED_ERROR: Color = Color::Rgb(248, 113, 113);

// ============================================================================
// Text Colors
// ============================================================================

/// Primary text color (#e2e8f0)
pub const TEXT_PRIMARY: Color = Color::Rgb(226, 232, 240);

/// Secondary text color (#94a3b8)
pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184);

/// Muted text color - for labels and hints (#64748b)
pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139);

/// Alternate between two colors every few animation ticks
pub fn get_pulse_color(tick: u64, on: Color, off: Color) -> Color {
    if (tick / 5) % 2 == 0 { on } else { off }
}
