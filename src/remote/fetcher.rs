//! Background move requests with retry.
//!
//! Each request runs as a tokio task and reports back over an unbounded
//! channel that the UI loop drains. At most one task exists at a time:
//! cancelling or dispatching again aborts the previous one, dropping any
//! HTTP request it has open. Requests are also tagged with the generation
//! that was current when they were dispatched, so an event already queued
//! before the abort can still be recognised as stale.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::MoveSource;
use crate::error::{Error, Result};
use crate::models::{MoveReply, MoveRequest};

/// How failed requests are retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Pause between attempts
    pub delay: Duration,
    /// Retries after the first attempt; `None` retries until cancelled
    pub max_retries: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(500),
            max_retries: None,
        }
    }
}

impl RetryPolicy {
    /// Whether another attempt is allowed after `failures` failed ones
    pub fn allows_retry(&self, failures: u32) -> bool {
        match self.max_retries {
            Some(max) => failures <= max,
            None => true,
        }
    }
}

/// Progress report from a request task
#[derive(Debug)]
pub enum FetchEvent {
    /// An attempt failed and another one will follow
    Retrying {
        generation: u64,
        attempt: u32,
        error: String,
    },
    /// The request finished, successfully or by running out of retries
    Done {
        generation: u64,
        result: Result<MoveReply>,
    },
}

impl FetchEvent {
    pub fn generation(&self) -> u64 {
        match self {
            FetchEvent::Retrying { generation, .. } | FetchEvent::Done { generation, .. } => {
                *generation
            }
        }
    }
}

pub struct MoveFetcher {
    source: Arc<dyn MoveSource>,
    handle: Handle,
    retry: RetryPolicy,
    generation: Arc<AtomicU64>,
    tx: mpsc::UnboundedSender<FetchEvent>,
    rx: mpsc::UnboundedReceiver<FetchEvent>,
    in_flight: Option<JoinHandle<()>>,
}

impl MoveFetcher {
    pub fn new(source: Arc<dyn MoveSource>, handle: Handle, retry: RetryPolicy) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source,
            handle,
            retry,
            generation: Arc::new(AtomicU64::new(0)),
            tx,
            rx,
            in_flight: None,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Current generation
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Abort the outstanding request and invalidate its events. Returns the
    /// new generation.
    pub fn cancel(&mut self) -> u64 {
        self.abort_in_flight();
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn abort_in_flight(&mut self) {
        if let Some(task) = self.in_flight.take() {
            if !task.is_finished() {
                debug!("aborting in-flight move request");
                task.abort();
            }
        }
    }

    /// Start a request in the background, replacing any outstanding one.
    /// Returns the generation it is tagged with.
    pub fn dispatch(&mut self, request: MoveRequest) -> u64 {
        self.abort_in_flight();
        let generation = self.generation();
        let source = Arc::clone(&self.source);
        let current = Arc::clone(&self.generation);
        let tx = self.tx.clone();
        let retry = self.retry;

        let task = self.handle.spawn(async move {
            let mut failures = 0u32;
            loop {
                if current.load(Ordering::SeqCst) != generation {
                    debug!(generation, "request cancelled");
                    return;
                }

                match source.request_move(&request).await {
                    Ok(reply) => {
                        let _ = tx.send(FetchEvent::Done {
                            generation,
                            result: Ok(reply),
                        });
                        return;
                    }
                    Err(err) => {
                        failures += 1;
                        if !retry.allows_retry(failures) {
                            warn!(generation, failures, error = %err, "giving up on move request");
                            let _ = tx.send(FetchEvent::Done {
                                generation,
                                result: Err(Error::RetriesExhausted {
                                    attempts: failures,
                                    last: err.to_string(),
                                }),
                            });
                            return;
                        }

                        warn!(generation, attempt = failures, error = %err, "move request failed, retrying");
                        let _ = tx.send(FetchEvent::Retrying {
                            generation,
                            attempt: failures,
                            error: err.to_string(),
                        });
                        tokio::time::sleep(retry.delay).await;
                    }
                }
            }
        });
        self.in_flight = Some(task);

        generation
    }

    /// Next pending event without blocking
    pub fn try_recv(&mut self) -> Option<FetchEvent> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next event
    #[cfg(test)]
    pub async fn recv(&mut self) -> Option<FetchEvent> {
        self.rx.recv().await
    }
}
