//! Data models for the chess TUI
//!
//! This module contains the core data structures:
//! - The closed set of language models a side can be played by
//! - Request/response bodies exchanged with the move service
//! - The bounded event log shown in the side panel
//! - Enums for state management

pub mod enums;
pub mod event;
pub mod llm;
pub mod wire;

// Re-exports for convenient access
pub use enums::{Mode, side_label, turn_code};
pub use event::{EventKind, EventLog};
pub use llm::LlmModel;
pub use wire::{MoveReply, MoveRequest};
