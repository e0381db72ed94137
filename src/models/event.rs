//! Event log shown in the side panel
//!
//! Every notable thing that happens during a game (requests, retries,
//! rejected moves, the final result) is recorded here so the user can see
//! what the move service is doing.

/// Maximum number of events to keep
pub const MAX_EVENTS: usize = 50;

/// Category of an event, used for colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Info,
    Move,
    Warning,
    GameOver,
}

impl EventKind {
    pub fn tag(&self) -> &'static str {
        match self {
            EventKind::Info => "info",
            EventKind::Move => "move",
            EventKind::Warning => "warn",
            EventKind::GameOver => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEvent {
    pub kind: EventKind,
    pub text: String,
}

impl GameEvent {
    pub fn new(kind: EventKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Format for display (truncate text if too long)
    pub fn format(&self, max_width: usize) -> String {
        let prefix = format!("{}: ", self.kind.tag());
        let available = max_width.saturating_sub(prefix.len());
        let char_count = self.text.chars().count();
        let text = if char_count > available {
            // Truncate on character boundaries, keeping the start of the message
            let keep = available.saturating_sub(3);
            let truncated: String = self.text.chars().take(keep).collect();
            format!("{}...", truncated)
        } else {
            self.text.clone()
        };
        format!("{}{}", prefix, text)
    }
}

/// Bounded event history, oldest first
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: EventKind, text: impl Into<String>) {
        self.events.push(GameEvent::new(kind, text));

        // Keep only the last MAX_EVENTS
        if self.events.len() > MAX_EVENTS {
            let remove_count = self.events.len() - MAX_EVENTS;
            self.events.drain(0..remove_count);
        }
    }

    /// Most recent `n` events, newest first
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &GameEvent> {
        self.events.iter().rev().take(n)
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&GameEvent> {
        self.events.last()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.events.len()
    }
}
