//! Side panels and bars

use std::time::Instant;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use shakmaty::Color as Side;

use crate::app::App;
use crate::models::{EventKind, Mode, side_label};
use crate::theme::{
    AMBER_WARNING, BG_PRIMARY, BG_SECONDARY, BORDER_SUBTLE, CYAN_DIM, CYAN_PRIMARY, GREEN_ACTIVE,
    RED_ERROR, ROUNDED_BORDERS, TEXT_MUTED, TEXT_PRIMARY, TEXT_SECONDARY, get_pulse_color,
};
use crate::utils::{format_duration, numbered_moves};

fn card(title: &str) -> Block<'static> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_set(ROUNDED_BORDERS)
        .border_style(Style::default().fg(BORDER_SUBTLE))
        .title_style(Style::default().fg(TEXT_PRIMARY))
        .style(Style::default().bg(BG_SECONDARY))
}

/// One player row: turn indicator, side and model label
fn player_line(app: &App, side: Side) -> Line<'static> {
    let to_move = app.game.turn() == side;
    let (indicator, indicator_color) = if to_move && app.is_waiting() {
        ("●", get_pulse_color(app.animation_tick, GREEN_ACTIVE, CYAN_DIM))
    } else if to_move {
        ("●", CYAN_PRIMARY)
    } else {
        ("○", TEXT_MUTED)
    };
    let text_color = if to_move { CYAN_PRIMARY } else { TEXT_SECONDARY };

    Line::from(vec![
        Span::styled(format!("{} ", indicator), Style::default().fg(indicator_color)),
        Span::styled(
            format!("{:<6}", side_label(side)),
            Style::default().fg(text_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.model_for(side).label(), Style::default().fg(text_color)),
    ])
}

/// Players card: who plays which side, run state and clock
pub fn render_players(area: Rect, app: &App, frame: &mut Frame) {
    let (state_text, state_color) = if app.running {
        ("RUNNING", GREEN_ACTIVE)
    } else if app.game.outcome().is_some() {
        ("FINISHED", AMBER_WARNING)
    } else {
        ("STOPPED", TEXT_MUTED)
    };

    let elapsed = app
        .game_start
        .map(|start| format_duration(Instant::now().saturating_duration_since(start)))
        .unwrap_or_else(|| "--:--".to_string());

    let mut status = vec![
        Span::styled(
            state_text,
            Style::default().fg(state_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", elapsed), Style::default().fg(TEXT_SECONDARY)),
    ];
    if app.is_waiting() {
        status.push(Span::styled("  waiting for move…", Style::default().fg(TEXT_MUTED)));
    }
    if app.game.is_check() {
        status.push(Span::styled(
            "  CHECK",
            Style::default().fg(RED_ERROR).add_modifier(Modifier::BOLD),
        ));
    }

    let content = vec![
        player_line(app, Side::White),
        player_line(app, Side::Black),
        Line::from(""),
        Line::from(status),
        Line::from(Span::styled(
            format!("every {} ms", app.poll_interval().as_millis()),
            Style::default().fg(TEXT_MUTED),
        )),
    ];

    frame.render_widget(Paragraph::new(content).block(card("Players")), area);
}

/// Move list, scrolled so the latest moves stay visible
pub fn render_moves(area: Rect, app: &App, frame: &mut Frame) {
    let rows = numbered_moves(
        app.game.sans(),
        app.game.start_fullmoves(),
        app.game.start_turn() == Side::Black,
    );
    let visible = area.height.saturating_sub(2) as usize;
    let skip = rows.len().saturating_sub(visible);

    let lines: Vec<Line> = if rows.is_empty() {
        vec![Line::from(Span::styled("No moves yet", Style::default().fg(TEXT_MUTED)))]
    } else {
        rows.into_iter()
            .skip(skip)
            .map(|row| Line::from(Span::styled(row, Style::default().fg(TEXT_PRIMARY))))
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(card("Moves")), area);
}

/// Recent events, newest on top
pub fn render_events(area: Rect, app: &App, frame: &mut Frame) {
    let visible = area.height.saturating_sub(2) as usize;
    let width = area.width.saturating_sub(2) as usize;

    let lines: Vec<Line> = app
        .events
        .recent(visible)
        .map(|event| {
            let color = match event.kind {
                EventKind::Info => TEXT_SECONDARY,
                EventKind::Move => CYAN_PRIMARY,
                EventKind::Warning => AMBER_WARNING,
                EventKind::GameOver => RED_ERROR,
            };
            Line::from(Span::styled(event.format(width), Style::default().fg(color)))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(card("Events")), area);
}

/// Title bar with the endpoint being used
pub fn render_title_bar(area: Rect, app: &App, frame: &mut Frame) {
    let title = Line::from(vec![
        Span::styled(
            " LLM Chess ",
            Style::default().fg(BG_PRIMARY).bg(CYAN_PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {}", app.endpoint), Style::default().fg(TEXT_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(title).style(Style::default().bg(BG_PRIMARY)), area);
}

/// Keybinding hints, or the move being typed
pub fn render_bottom_bar(area: Rect, app: &App, frame: &mut Frame) {
    let mode_span = Span::styled(
        format!(" {} ", app.mode.label()),
        Style::default().fg(BG_PRIMARY).bg(CYAN_PRIMARY).add_modifier(Modifier::BOLD),
    );

    let rest = match app.mode {
        Mode::Normal => {
            let toggle = if app.running { "Stop" } else { "Start" };
            Span::styled(
                format!(
                    " Space: {} | w/W: White model | b/B: Black model | m: Move | n: New game | q: Quit ",
                    toggle
                ),
                Style::default().fg(TEXT_SECONDARY),
            )
        }
        Mode::MoveInput => Span::styled(
            format!(" Move (from to, e.g. e2e4): {}_   Enter: Play | Esc: Cancel ", app.input),
            Style::default().fg(TEXT_PRIMARY),
        ),
        Mode::Alert => Span::styled(" Enter: Dismiss ", Style::default().fg(TEXT_SECONDARY)),
    };

    let bar = Paragraph::new(Line::from(vec![mode_span, rest])).style(Style::default().bg(BG_PRIMARY));
    frame.render_widget(bar, area);
}
