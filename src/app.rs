//! Application state and core logic for the chess TUI.
//!
//! This module contains the `App` struct which holds all state for the
//! interactive terminal UI: the game, the model chosen for each side, the
//! running flag that drives the polling loop, and modal/view state.

use std::time::{Duration, Instant};

use shakmaty::Color;
use tracing::{debug, info, warn};

use crate::cli::Settings;
use crate::game::{ChessGame, Outcome, split_squares};
use crate::input::Action;
use crate::models::{EventKind, EventLog, LlmModel, Mode, MoveReply, MoveRequest, side_label, turn_code};
use crate::remote::{FetchEvent, MoveFetcher};

/// Application state
pub struct App {
    pub game: ChessGame,
    pub white: LlmModel,
    pub black: LlmModel,
    pub running: bool,
    pub mode: Mode,
    // Manual move being typed in MoveInput mode
    pub input: String,
    // Game-over message shown in the popup
    pub alert: Option<String>,
    pub events: EventLog,
    pub should_quit: bool,
    pub endpoint: String,
    // Animation state
    pub animation_tick: u64,
    // Elapsed time tracking, set on the first start of each game
    pub game_start: Option<Instant>,
    initial: ChessGame,
    poll_interval: Duration,
    fetcher: MoveFetcher,
    // Generation of the request in flight, if any
    pending: Option<u64>,
    // Dispatch on the next tick without waiting for the interval
    retry_now: bool,
    illegal_replies: u32,
    last_request: Instant,
}

impl App {
    pub fn new(settings: &Settings, game: ChessGame, fetcher: MoveFetcher) -> Self {
        let mut events = EventLog::new();
        events.push(
            EventKind::Info,
            format!("Ready. {} vs {}", settings.white.label(), settings.black.label()),
        );

        Self {
            initial: game.clone(),
            game,
            white: settings.white,
            black: settings.black,
            running: false,
            mode: Mode::Normal,
            input: String::new(),
            alert: None,
            events,
            should_quit: false,
            endpoint: settings.endpoint.clone(),
            animation_tick: 0,
            game_start: None,
            poll_interval: settings.poll_interval,
            fetcher,
            pending: None,
            retry_now: false,
            illegal_replies: 0,
            last_request: Instant::now(),
        }
    }

    /// Model playing the given side
    pub fn model_for(&self, color: Color) -> LlmModel {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    /// Whether a move request is currently outstanding
    pub fn is_waiting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Dispatch a user action
    pub fn apply(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ToggleRunning => self.toggle_running(now),
            Action::NextWhite => self.set_model(Color::White, self.white.next()),
            Action::PrevWhite => self.set_model(Color::White, self.white.prev()),
            Action::NextBlack => self.set_model(Color::Black, self.black.next()),
            Action::PrevBlack => self.set_model(Color::Black, self.black.prev()),
            Action::NewGame => self.new_game(),
            Action::BeginMove => {
                self.input.clear();
                self.mode = Mode::MoveInput;
            }
            Action::InputChar(c) => {
                if self.input.len() < 8 {
                    self.input.push(c);
                }
            }
            Action::InputBackspace => {
                self.input.pop();
            }
            Action::CancelInput => {
                self.input.clear();
                self.mode = Mode::Normal;
            }
            Action::SubmitMove => {
                let text = std::mem::take(&mut self.input);
                self.mode = Mode::Normal;
                self.submit_manual_move(&text, now);
            }
            Action::DismissAlert => {
                self.alert = None;
                self.mode = Mode::Normal;
            }
        }
    }

    fn set_model(&mut self, color: Color, model: LlmModel) {
        match color {
            Color::White => self.white = model,
            Color::Black => self.black = model,
        }
        self.events.push(
            EventKind::Info,
            format!("{} is now played by {}", side_label(color), model.label()),
        );

        // The open request, and any retries of it, would still name the old model
        if self.pending.is_some() && self.game.turn() == color {
            self.cancel_pending();
            self.retry_now = true;
        }
    }

    /// Start or stop automatic play
    pub fn toggle_running(&mut self, now: Instant) {
        if self.running {
            self.running = false;
            self.cancel_pending();
            info!("auto-play stopped");
            self.events.push(EventKind::Info, "Game stopped");
            return;
        }

        if let Some(outcome) = self.game.outcome() {
            self.finish(outcome);
            return;
        }

        self.running = true;
        // First request goes out one interval after start
        self.last_request = now;
        self.game_start.get_or_insert(now);
        info!(white = self.white.id(), black = self.black.id(), "auto-play started");
        self.events.push(EventKind::Info, "Game started");
    }

    /// Reset to the starting position and stop polling
    pub fn new_game(&mut self) {
        self.running = false;
        self.cancel_pending();
        self.game = self.initial.clone();
        self.game_start = None;
        self.alert = None;
        self.mode = Mode::Normal;
        info!("new game");
        self.events.push(EventKind::Info, "New game");
    }

    fn cancel_pending(&mut self) {
        let generation = self.fetcher.cancel();
        debug!(generation, "cancelled outstanding requests");
        self.pending = None;
        self.retry_now = false;
        self.illegal_replies = 0;
    }

    /// Drive the polling loop: collect replies, then dispatch if due
    pub fn tick(&mut self, now: Instant) {
        while let Some(event) = self.fetcher.try_recv() {
            self.handle_fetch_event(event);
        }

        if self.pending.is_some() || self.mode == Mode::Alert {
            return;
        }

        let due = self.retry_now
            || (self.running && now.duration_since(self.last_request) >= self.poll_interval);
        if due {
            self.request_move(now);
        }
    }

    fn request_move(&mut self, now: Instant) {
        if let Some(outcome) = self.game.outcome() {
            self.finish(outcome);
            return;
        }

        let turn = self.game.turn();
        let model = self.model_for(turn);
        let request = MoveRequest {
            fen: self.game.fen(),
            turn: turn_code(turn).to_string(),
            model: model.id().to_string(),
        };

        debug!(fen = %request.fen, model = %request.model, "dispatching move request");
        self.events.push(
            EventKind::Info,
            format!("Asking {} for {}'s move", model.label(), side_label(turn)),
        );
        self.pending = Some(self.fetcher.dispatch(request));
        self.last_request = now;
        self.retry_now = false;
    }

    pub fn handle_fetch_event(&mut self, event: FetchEvent) {
        if event.generation() != self.fetcher.generation() {
            debug!(generation = event.generation(), "discarding stale fetch event");
            return;
        }

        match event {
            FetchEvent::Retrying { attempt, error, .. } => {
                self.events
                    .push(EventKind::Warning, format!("Attempt {} failed: {}", attempt, error));
            }
            FetchEvent::Done { result, .. } => {
                self.pending = None;
                match result {
                    Ok(reply) => self.handle_reply(reply),
                    Err(err) => {
                        warn!(error = %err, "move request abandoned");
                        self.running = false;
                        self.events.push(EventKind::Warning, err.to_string());
                        self.events.push(EventKind::Info, "Game stopped");
                    }
                }
            }
        }
    }

    fn handle_reply(&mut self, reply: MoveReply) {
        if reply.game_over {
            self.finish(self.game.outcome().unwrap_or(Outcome::Declared));
            return;
        }
        if let Some(outcome) = self.game.outcome() {
            self.finish(outcome);
            return;
        }

        let mover = self.game.turn();
        let result = match reply.mv.as_deref() {
            Some(text) => self.game.play_text(text),
            None => Err(crate::error::Error::MissingMove),
        };

        match result {
            Ok(san) => {
                self.illegal_replies = 0;
                info!(%san, side = side_label(mover), "applied move from service");
                self.events.push(
                    EventKind::Move,
                    format!("{} ({}) played {}", side_label(mover), self.model_for(mover).label(), san),
                );
                self.check_outcome();
            }
            Err(err) => {
                self.illegal_replies += 1;
                if self.fetcher.retry_policy().allows_retry(self.illegal_replies) {
                    warn!(error = %err, "unusable move from service, asking again");
                    self.events.push(EventKind::Warning, format!("{}; asking again", err));
                    self.retry_now = true;
                } else {
                    warn!(error = %err, "too many unusable moves, stopping");
                    self.running = false;
                    self.illegal_replies = 0;
                    self.events.push(EventKind::Warning, format!("{}; giving up", err));
                }
            }
        }
    }

    fn submit_manual_move(&mut self, text: &str, now: Instant) {
        if self.game.outcome().is_some() {
            self.events
                .push(EventKind::Warning, "The game is over, press n for a new game");
            return;
        }

        let result = split_squares(text).and_then(|(from, to)| self.game.play_squares(&from, &to));
        match result {
            Ok(san) => {
                info!(%san, "applied manual move");
                self.events.push(EventKind::Move, format!("You played {}", san));
                // Anything in flight was computed for the old position
                self.cancel_pending();
                self.check_outcome();
                if self.mode != Mode::Alert {
                    self.request_move(now);
                }
            }
            Err(err) => {
                debug!(error = %err, "manual move rejected");
                self.events.push(EventKind::Warning, err.to_string());
            }
        }
    }

    fn check_outcome(&mut self) {
        if let Some(outcome) = self.game.outcome() {
            self.finish(outcome);
        }
    }

    /// End the game: stop polling and raise the popup
    fn finish(&mut self, outcome: Outcome) {
        self.running = false;
        self.cancel_pending();
        let message = outcome.message();
        info!(?outcome, "game over");
        self.events.push(EventKind::GameOver, message.clone());
        self.alert = Some(message);
        self.mode = Mode::Alert;
    }
}
