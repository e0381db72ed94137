//! How a game ended.

use shakmaty::Color;

use crate::models::side_label;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    ThreefoldRepetition,
    /// The move service reported game over for a position the rules
    /// library does not consider finished
    Declared,
}

impl Outcome {
    fn reason(&self) -> &'static str {
        match self {
            Outcome::Checkmate { .. } => "checkmate",
            Outcome::Stalemate => "stalemate",
            Outcome::InsufficientMaterial => "insufficient material",
            Outcome::FiftyMoveRule => "fifty-move rule",
            Outcome::ThreefoldRepetition => "threefold repetition",
            Outcome::Declared => "declared by move service",
        }
    }

    /// Text for the game-over popup
    pub fn message(&self) -> String {
        match self {
            Outcome::Checkmate { winner } => {
                format!("Game Over. Winner: {}", side_label(*winner))
            }
            Outcome::Declared => format!("Game Over ({})", self.reason()),
            _ => format!("Game Over with a DRAW ({})", self.reason()),
        }
    }
}
