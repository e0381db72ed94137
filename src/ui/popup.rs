//! Game-over popup

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::helpers::{centered_rect, wrap_text};
use crate::theme::{AMBER_WARNING, BG_SECONDARY, TEXT_MUTED, TEXT_PRIMARY, ROUNDED_BORDERS};

const POPUP_WIDTH: u16 = 44;

/// Render a modal message over everything else
pub fn render_alert(area: Rect, message: &str, frame: &mut Frame) {
    let inner_width = POPUP_WIDTH.saturating_sub(4) as usize;
    let wrapped = wrap_text(message, inner_width);
    // Border, blank, message, blank, hint, border
    let height = wrapped.len() as u16 + 5;
    let popup_area = centered_rect(POPUP_WIDTH, height, area);

    let mut lines = vec![Line::from("")];
    lines.extend(wrapped.into_iter().map(|l| {
        Line::from(Span::styled(
            l,
            Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD),
        ))
    }));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press Enter to continue",
        Style::default().fg(TEXT_MUTED),
    )));

    let block = Block::default()
        .title(" Game Over ")
        .borders(Borders::ALL)
        .border_set(ROUNDED_BORDERS)
        .border_style(Style::default().fg(AMBER_WARNING))
        .style(Style::default().bg(BG_SECONDARY));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(paragraph, popup_area);
}
