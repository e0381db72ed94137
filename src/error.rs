//! Error type shared by the whole crate.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("request to move service failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("move service answered with HTTP {0}")]
    Status(u16),

    #[error("move service returned no move")]
    MissingMove,

    #[error("illegal move `{text}` in position {fen}")]
    IllegalMove { text: String, fen: String },

    #[error("invalid square `{0}`")]
    InvalidSquare(String),

    #[error("invalid FEN: {0}")]
    Fen(String),

    #[error("unknown model `{0}`")]
    UnknownModel(String),

    #[error("failed to load config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("move service gave up after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
