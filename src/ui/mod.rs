//! UI module for the chess TUI
//!
//! This module contains the rendering functions for the interface: the
//! board, the player/move/event panels, the bars and the game-over popup.

mod board;
mod helpers;
mod panels;
mod popup;

pub use board::render_board;
pub use panels::{render_bottom_bar, render_events, render_moves, render_players, render_title_bar};
pub use popup::render_alert;

use ratatui::prelude::*;

use crate::app::App;
use crate::models::Mode;

/// Width of the board panel: rank labels, 8 squares of 3 cells, borders
const BOARD_PANEL_WIDTH: u16 = 3 + 8 * 3 + 2;

/// Draw the whole screen
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Title bar + main content + bottom bar
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(12),   // Board and panels
            Constraint::Length(1), // Bottom bar (single line)
        ])
        .split(area);

    render_title_bar(main_layout[0], app, frame);

    // Board on the left, information on the right
    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(BOARD_PANEL_WIDTH), Constraint::Min(30)])
        .split(main_layout[1]);

    render_board(panels[0], &app.game, frame);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(4)])
        .split(panels[1]);

    render_players(right[0], app, frame);

    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(right[1]);

    render_moves(lists[0], app, frame);
    render_events(lists[1], app, frame);

    render_bottom_bar(main_layout[2], app, frame);

    if app.mode == Mode::Alert {
        if let Some(message) = &app.alert {
            render_alert(area, message, frame);
        }
    }
}
