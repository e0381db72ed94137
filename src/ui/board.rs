//! Board rendering

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use shakmaty::{File, Rank, Square};

use super::helpers::piece_glyph;
use crate::game::ChessGame;
use crate::theme::{
    BG_SECONDARY, BORDER_SUBTLE, PIECE_BLACK, PIECE_WHITE, ROUNDED_BORDERS, SQUARE_CHECK,
    SQUARE_DARK, SQUARE_LAST_MOVE, SQUARE_LIGHT, TEXT_MUTED, TEXT_PRIMARY,
};

/// Build the board as styled lines, rank 8 at the top
///
/// Each square is three cells wide. Squares changed by the last move and a
/// king in check are highlighted.
pub fn board_lines(game: &ChessGame) -> Vec<Line<'static>> {
    let board = game.board();
    let label_style = Style::default().fg(TEXT_MUTED);
    let check_square = if game.is_check() {
        board.king_of(game.turn())
    } else {
        None
    };
    let changed = game.changed_squares();
    let highlighted = |sq: Square| changed.contains(&sq);

    let mut lines = Vec::with_capacity(9);

    for rank in (0..8u32).rev() {
        let mut spans = Vec::with_capacity(9);
        spans.push(Span::styled(format!(" {} ", rank + 1), label_style));

        for file in 0..8u32 {
            let sq = Square::from_coords(File::new(file), Rank::new(rank));
            // a1 is a dark square
            let is_light = (file + rank) % 2 == 1;

            let bg = if check_square == Some(sq) {
                SQUARE_CHECK
            } else if highlighted(sq) {
                SQUARE_LAST_MOVE
            } else if is_light {
                SQUARE_LIGHT
            } else {
                SQUARE_DARK
            };

            let span = match board.piece_at(sq) {
                Some(piece) => {
                    let fg = if piece.color.is_white() { PIECE_WHITE } else { PIECE_BLACK };
                    Span::styled(
                        format!(" {} ", piece_glyph(piece)),
                        Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
                    )
                }
                None => Span::styled("   ", Style::default().bg(bg)),
            };
            spans.push(span);
        }

        lines.push(Line::from(spans));
    }

    // File labels
    let mut footer = vec![Span::raw("   ")];
    for file in 'a'..='h' {
        footer.push(Span::styled(format!(" {} ", file), label_style));
    }
    lines.push(Line::from(footer));

    lines
}

/// Render the board inside a rounded card
pub fn render_board(area: Rect, game: &ChessGame, frame: &mut Frame) {
    let block = Block::default()
        .title(" Board ")
        .borders(Borders::ALL)
        .border_set(ROUNDED_BORDERS)
        .border_style(Style::default().fg(BORDER_SUBTLE))
        .title_style(Style::default().fg(TEXT_PRIMARY))
        .style(Style::default().bg(BG_SECONDARY));

    let paragraph = Paragraph::new(board_lines(game)).block(block);
    frame.render_widget(paragraph, area);
}
