//! Talking to the remote move service.
//!
//! This module encapsulates everything network related:
//! - `client`: the reqwest-backed HTTP implementation of `MoveSource`
//! - `fetcher`: background request tasks with retry and stale-reply tagging

mod client;
mod fetcher;

pub use client::{DEFAULT_ENDPOINT, HttpMoveClient};
pub use fetcher::{FetchEvent, MoveFetcher, RetryPolicy};

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{MoveReply, MoveRequest};

/// Anything that can answer "what is the next move in this position"
#[async_trait]
pub trait MoveSource: Send + Sync {
    async fn request_move(&self, request: &MoveRequest) -> Result<MoveReply>;
}
