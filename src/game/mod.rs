//! Game state on top of the `shakmaty` rules library.
//!
//! `ChessGame` owns the current and previous positions, the SAN move list
//! and a Zobrist history for repetition detection. Legality is always
//! decided by `shakmaty`; nothing here generates or validates moves itself.

mod outcome;

pub use outcome::Outcome;

use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::uci::UciMove;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{Board, CastlingMode, Chess, Color, EnPassantMode, Move, Position, Role, Square};

use crate::error::{Error, Result};

/// A game in progress
#[derive(Debug, Clone)]
pub struct ChessGame {
    position: Chess,
    /// Position before the last applied move
    previous: Option<Chess>,
    /// SAN of every applied move
    sans: Vec<String>,
    /// Hash of every position reached, including the initial one
    history: Vec<Zobrist64>,
    start_turn: Color,
    start_fullmoves: u32,
}

impl Default for ChessGame {
    fn default() -> Self {
        Self::from_position(Chess::default())
    }
}

impl ChessGame {
    pub fn new() -> Self {
        Self::default()
    }

    fn from_position(position: Chess) -> Self {
        let hash = position.zobrist_hash::<Zobrist64>(EnPassantMode::Legal);
        Self {
            start_turn: position.turn(),
            start_fullmoves: position.fullmoves().get(),
            position,
            previous: None,
            sans: Vec::new(),
            history: vec![hash],
        }
    }

    /// Build a game from a FEN string. `"start"` and `"startpos"` mean the
    /// standard initial position.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let fen = fen.trim();
        if fen.is_empty() || fen == "start" || fen == "startpos" {
            return Ok(Self::new());
        }
        let parsed: Fen = fen.parse().map_err(|e| Error::Fen(format!("{}: {}", fen, e)))?;
        let position: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| Error::Fen(format!("{}: {}", fen, e)))?;
        Ok(Self::from_position(position))
    }

    pub fn board(&self) -> &Board {
        self.position.board()
    }

    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    pub fn fen(&self) -> String {
        Fen(self.position.clone().into_setup(EnPassantMode::Legal)).to_string()
    }

    /// Side to move in the starting position
    pub fn start_turn(&self) -> Color {
        self.start_turn
    }

    /// Fullmove number of the starting position
    pub fn start_fullmoves(&self) -> u32 {
        self.start_fullmoves
    }

    pub fn sans(&self) -> &[String] {
        &self.sans
    }

    /// Squares whose contents differ from the previous position: both ends
    /// of the last move, plus the rook for castling and the captured pawn
    /// for en passant. Empty before the first move.
    pub fn changed_squares(&self) -> Vec<Square> {
        let Some(previous) = &self.previous else {
            return Vec::new();
        };
        let before = previous.board();
        let after = self.position.board();
        Square::ALL
            .into_iter()
            .filter(|&sq| before.piece_at(sq) != after.piece_at(sq))
            .collect()
    }

    pub fn is_check(&self) -> bool {
        self.position.is_check()
    }

    /// Apply a move typed as source and target squares.
    ///
    /// Pawns reaching the last rank always promote to a queen. On an illegal
    /// move the game is left exactly as it was.
    pub fn play_squares(&mut self, from: &str, to: &str) -> Result<String> {
        let from_sq = parse_square(from)?;
        let to_sq = parse_square(to)?;

        let plain = UciMove::Normal {
            from: from_sq,
            to: to_sq,
            promotion: None,
        };
        let queening = UciMove::Normal {
            from: from_sq,
            to: to_sq,
            promotion: Some(Role::Queen),
        };
        let m = plain
            .to_move(&self.position)
            .or_else(|_| queening.to_move(&self.position))
            .map_err(|_| Error::IllegalMove {
                text: format!("{}{}", from_sq, to_sq),
                fen: self.fen(),
            })?;

        Ok(self.apply(&m))
    }

    /// Apply a move as returned by the move service.
    ///
    /// SAN is tried first (with or without check suffix), then UCI.
    pub fn play_text(&mut self, text: &str) -> Result<String> {
        let m = self.parse_move(text)?;
        Ok(self.apply(&m))
    }

    fn parse_move(&self, text: &str) -> Result<Move> {
        let trimmed = text.trim();
        let illegal = || Error::IllegalMove {
            text: trimmed.to_string(),
            fen: self.fen(),
        };

        if let Ok(san) = trimmed.parse::<SanPlus>() {
            if let Ok(m) = san.san.to_move(&self.position) {
                return Ok(m);
            }
        }

        let uci: UciMove = trimmed.parse().map_err(|_| illegal())?;
        uci.to_move(&self.position).map_err(|_| illegal())
    }

    /// Play an already legal move and record it. Returns its SAN.
    fn apply(&mut self, m: &Move) -> String {
        let before = self.position.clone();
        let san = SanPlus::from_move_and_play_unchecked(&mut self.position, m).to_string();

        self.previous = Some(before);
        self.history
            .push(self.position.zobrist_hash::<Zobrist64>(EnPassantMode::Legal));
        self.sans.push(san.clone());
        san
    }

    /// Number of times the current position has occurred
    pub fn repetitions(&self) -> usize {
        match self.history.last() {
            Some(current) => self.history.iter().filter(|h| *h == current).count(),
            None => 0,
        }
    }

    /// Terminal condition of the current position, if any
    pub fn outcome(&self) -> Option<Outcome> {
        let pos = &self.position;
        if pos.is_checkmate() {
            Some(Outcome::Checkmate { winner: !pos.turn() })
        } else if pos.is_stalemate() {
            Some(Outcome::Stalemate)
        } else if pos.is_insufficient_material() {
            Some(Outcome::InsufficientMaterial)
        } else if pos.halfmoves() >= 100 {
            Some(Outcome::FiftyMoveRule)
        } else if self.repetitions() >= 3 {
            Some(Outcome::ThreefoldRepetition)
        } else {
            None
        }
    }
}

/// Parse a square name such as `e4`
pub fn parse_square(text: &str) -> Result<Square> {
    let trimmed = text.trim();
    trimmed
        .to_ascii_lowercase()
        .parse::<Square>()
        .map_err(|_| Error::InvalidSquare(trimmed.to_string()))
}

/// Split manual input such as `e2e4`, `e2 e4` or `e2-e4` into two squares
pub fn split_squares(input: &str) -> Result<(String, String)> {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    if cleaned.len() < 4 || !cleaned.is_ascii() {
        return Err(Error::InvalidSquare(input.trim().to_string()));
    }
    // Anything after the target square (e.g. a promotion letter) is ignored
    Ok((cleaned[0..2].to_string(), cleaned[2..4].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::Piece;

    fn play_all(game: &mut ChessGame, moves: &[&str]) {
        for m in moves {
            game.play_text(m).unwrap();
        }
    }

    #[test]
    fn test_new_game_is_standard_start() {
        let game = ChessGame::new();
        assert_eq!(
            game.fen(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
        assert_eq!(game.turn(), Color::White);
        assert!(game.outcome().is_none());
    }

    #[test]
    fn test_from_fen_start_alias() {
        let game = ChessGame::from_fen("start").unwrap();
        assert_eq!(game.fen(), ChessGame::new().fen());
    }

    #[test]
    fn test_from_fen_keeps_start_numbering() {
        let game = ChessGame::from_fen("8/8/8/4k3/8/8/8/R3K3 b - - 3 42").unwrap();
        assert_eq!(game.start_turn(), Color::Black);
        assert_eq!(game.start_fullmoves(), 42);
    }

    #[test]
    fn test_from_fen_invalid() {
        assert!(matches!(ChessGame::from_fen("not a fen"), Err(Error::Fen(_))));
    }

    #[test]
    fn test_manual_move_accepted() {
        let mut game = ChessGame::new();
        let san = game.play_squares("e2", "e4").unwrap();
        assert_eq!(san, "e4");
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.sans(), ["e4"]);
        assert_eq!(game.changed_squares(), vec![Square::E2, Square::E4]);
    }

    #[test]
    fn test_changed_squares_for_castling() {
        let mut game = ChessGame::new();
        play_all(&mut game, &["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5"]);
        game.play_text("O-O").unwrap();
        assert_eq!(
            game.changed_squares(),
            vec![Square::E1, Square::F1, Square::G1, Square::H1]
        );
    }

    #[test]
    fn test_manual_move_rejected_leaves_position() {
        let mut game = ChessGame::new();
        let before = game.fen();
        let err = game.play_squares("e2", "e5").unwrap_err();
        assert!(matches!(err, Error::IllegalMove { .. }));
        assert_eq!(game.fen(), before);
        assert!(game.sans().is_empty());
        assert!(game.changed_squares().is_empty());
    }

    #[test]
    fn test_manual_move_wrong_side_rejected() {
        let mut game = ChessGame::new();
        assert!(game.play_squares("e7", "e5").is_err());
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn test_manual_move_invalid_square() {
        let mut game = ChessGame::new();
        assert!(matches!(
            game.play_squares("z9", "e4"),
            Err(Error::InvalidSquare(_))
        ));
    }

    #[test]
    fn test_manual_promotion_is_queen() {
        let mut game = ChessGame::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
        game.play_squares("a7", "a8").unwrap();
        assert_eq!(
            game.board().piece_at(Square::A8),
            Some(Piece {
                color: Color::White,
                role: Role::Queen
            })
        );
    }

    #[test]
    fn test_manual_castling_by_king_squares() {
        let mut game =
            ChessGame::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
        let san = game.play_squares("e1", "g1").unwrap();
        assert_eq!(san, "O-O");
    }

    #[test]
    fn test_remote_san_and_uci() {
        let mut game = ChessGame::new();
        assert_eq!(game.play_text("e4").unwrap(), "e4");
        assert_eq!(game.play_text("e7e5").unwrap(), "e5");
        assert_eq!(game.play_text(" Nf3 ").unwrap(), "Nf3");
        assert_eq!(game.turn(), Color::Black);
    }

    #[test]
    fn test_remote_san_with_check_suffix() {
        let mut game = ChessGame::new();
        play_all(&mut game, &["e4", "f5"]);
        assert_eq!(game.play_text("Qh5+").unwrap(), "Qh5+");
    }

    #[test]
    fn test_remote_garbage_rejected() {
        let mut game = ChessGame::new();
        let before = game.fen();
        assert!(game.play_text("I think e4 is best").is_err());
        assert!(game.play_text("Ke2").is_err());
        assert_eq!(game.fen(), before);
    }

    #[test]
    fn test_checkmate_winner_is_side_not_to_move() {
        let mut game = ChessGame::new();
        play_all(&mut game, &["f3", "e5", "g4", "Qh4#"]);
        assert_eq!(
            game.outcome(),
            Some(Outcome::Checkmate {
                winner: Color::Black
            })
        );
    }

    #[test]
    fn test_stalemate() {
        let game = ChessGame::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(game.outcome(), Some(Outcome::Stalemate));
    }

    #[test]
    fn test_insufficient_material() {
        let game = ChessGame::from_fen("8/8/8/4k3/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(game.outcome(), Some(Outcome::InsufficientMaterial));
    }

    #[test]
    fn test_fifty_move_rule() {
        let game = ChessGame::from_fen("8/8/8/4k3/8/8/8/R3K3 w - - 100 80").unwrap();
        assert_eq!(game.outcome(), Some(Outcome::FiftyMoveRule));
    }

    #[test]
    fn test_threefold_repetition() {
        let mut game = ChessGame::new();
        play_all(&mut game, &["Nf3", "Nf6", "Ng1", "Ng8"]);
        assert_eq!(game.repetitions(), 2);
        assert!(game.outcome().is_none());
        play_all(&mut game, &["Nf3", "Nf6", "Ng1", "Ng8"]);
        assert_eq!(game.repetitions(), 3);
        assert_eq!(game.outcome(), Some(Outcome::ThreefoldRepetition));
    }

    #[test]
    fn test_split_squares_formats() {
        assert_eq!(
            split_squares("e2e4").unwrap(),
            ("e2".to_string(), "e4".to_string())
        );
        assert_eq!(
            split_squares(" e2 - e4 ").unwrap(),
            ("e2".to_string(), "e4".to_string())
        );
        assert_eq!(
            split_squares("a7a8q").unwrap(),
            ("a7".to_string(), "a8".to_string())
        );
        assert!(split_squares("e2").is_err());
    }
}
