mod app;
mod cli;
mod error;
mod game;
mod input;
mod logging;
mod models;
mod remote;
mod theme;
mod ui;
mod utils;

use std::io::{self, stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    ExecutableCommand, cursor,
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::{error, info};

use app::App;
use cli::{Args, Settings, VERSION};
use error::Result;
use game::ChessGame;
use remote::{HttpMoveClient, MoveFetcher};

fn main() {
    if let Err(err) = try_main() {
        error!(error = %err, "exiting with error");
        eprintln!("llm-chess: {}", err);
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let args = Args::parse();
    let settings = Settings::resolve(&args)?;
    logging::init(&settings.log_file)?;

    // Validate everything before taking over the terminal
    let game = ChessGame::from_fen(&settings.start_fen)?;
    let client = HttpMoveClient::new(settings.endpoint.clone(), settings.request_timeout)?;
    info!(
        version = VERSION,
        endpoint = client.endpoint(),
        white = settings.white.id(),
        black = settings.black.id(),
        "starting"
    );

    let runtime = tokio::runtime::Runtime::new()?;
    let fetcher = MoveFetcher::new(Arc::new(client), runtime.handle().clone(), settings.retry);
    let mut app = App::new(&settings, game, fetcher);
    if settings.autostart {
        app.toggle_running(Instant::now());
    }

    let result = with_terminal(
        setup_terminal,
        |mut terminal| run(&mut terminal, &mut app),
        restore_terminal,
    );

    runtime.shutdown_timeout(Duration::from_millis(200));
    info!("stopped");

    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout()))?)
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    stdout().execute(cursor::Show)?;
    Ok(())
}

/// Run `body` on the terminal built by `setup`. `restore` runs afterwards
/// even when `setup` failed halfway, so raw mode is never left behind.
/// The first error wins.
fn with_terminal<T>(
    setup: impl FnOnce() -> Result<T>,
    body: impl FnOnce(T) -> Result<()>,
    restore: impl FnOnce() -> io::Result<()>,
) -> Result<()> {
    let result = setup().and_then(body);
    let restored = restore();
    result?;
    restored?;
    Ok(())
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while !app.should_quit {
        app.tick(Instant::now());

        terminal.draw(|frame| ui::draw(frame, app))?;

        // Handle input
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = input::action_for_key(app.mode, key.code, key.modifiers) {
                        app.apply(action, Instant::now());
                    }
                }
            }
        }

        app.animation_tick = app.animation_tick.wrapping_add(1);
    }

    Ok(())
}
