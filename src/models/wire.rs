//! Request and response bodies for the move service.

use serde::{Deserialize, Serialize};

/// Body of `POST /move`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveRequest {
    pub fen: String,
    /// "w" or "b"
    pub turn: String,
    /// Model identifier, forwarded verbatim
    pub model: String,
}

/// Answer from the move service
///
/// `move` may be absent once the service considers the game finished.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveReply {
    #[serde(rename = "move", default)]
    pub mv: Option<String>,
    #[serde(default)]
    pub game_over: bool,
}
