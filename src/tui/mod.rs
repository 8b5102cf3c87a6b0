//! Terminal UI for Strictly Match

mod app;
mod input;
mod ui;

pub use app::{App, AppAction};
pub use input::{grid_columns, move_cursor};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;
use strictly_memory::{Aggregates, DeferredTask, GameRng, GameSession, MemoryStore, PairCount};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, instrument};

use crate::{AppConfig, JsonFileStore, TerminalBell, TokioScheduler};

/// Options for one run of the TUI.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayOptions {
    /// Overrides the configured pair count of the first game.
    pub pairs: Option<PairCount>,
    /// Forces two-player mode for the first game.
    pub two_player: bool,
    /// Seed for reproducible deals.
    pub seed: Option<u64>,
}

/// Run the TUI until the player quits.
#[instrument(skip(config))]
pub async fn run_tui(config: AppConfig, options: PlayOptions) -> Result<()> {
    info!("Starting Strictly Match TUI");

    let durable = JsonFileStore::open(config.store_path());
    let aggregates = Aggregates::new(Box::new(MemoryStore::new()), Box::new(durable));
    let (scheduler, mut tasks) = TokioScheduler::channel();
    let rng = match options.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    info!(seed = rng.seed(), "Dealing with seed");

    let session = GameSession::new(
        options.pairs.unwrap_or(*config.default_pairs()),
        options.two_player || *config.two_player(),
        *config.rules(),
        aggregates,
        scheduler,
        Box::new(TerminalBell),
        rng,
    );
    let mut app = App::new(session, config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, &mut app, &mut tasks).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("TUI exited");
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<TokioScheduler>,
    tasks: &mut UnboundedReceiver<DeferredTask>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // Poll with a short timeout so fired timers are picked up promptly.
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
        {
            // Skip key release events (crossterm fires both press and release).
            if key.kind == KeyEventKind::Release {
                continue;
            }
            if app.handle_key(key.code) == AppAction::Quit {
                return Ok(());
            }
        }

        while let Ok(task) = tasks.try_recv() {
            app.on_task(task);
        }
        tokio::task::yield_now().await;
    }
}
