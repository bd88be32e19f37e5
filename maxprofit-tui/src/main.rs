//! maxprofit: terminal form that asks the profit service what a trade could
//! have earned.
//!
//! Fill in the stock, the period and the amount, press Enter, and the result
//! panel shows the best buy and sell points the server found.

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use maxprofit_core::{ProfitClient, Settings};
use maxprofit_tui::{input, logging, ui, worker, AppState, WorkerCommand};

#[derive(Parser)]
#[command(name = "maxprofit", version, about = "Max-profit form for the terminal")]
struct Cli {
    /// Settings file; a missing file is fine if the environment supplies host and port
    #[arg(long, default_value = "maxprofit.toml")]
    config: PathBuf,

    /// Where log events are written
    #[arg(long, default_value = "maxprofit.log")]
    log_file: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init(&cli.log_file)?;

    let settings = Settings::load(&cli.config)
        .with_context(|| format!("loading settings from {}", cli.config.display()))?;
    let base_url = settings.server.base_url();
    tracing::info!(%base_url, "starting maxprofit");

    let client = ProfitClient::from_config(&settings.server)?;

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle = worker::spawn_worker(client, cmd_rx, resp_tx)
        .context("spawning request worker")?;

    let mut app = AppState::new(cmd_tx.clone(), resp_rx, base_url);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // A worker sleeping through backoff finishes that request before it
    // sees Shutdown; don't hold the exit for it.
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    if app.worker_idle() {
        let _ = worker_handle.join();
    }
    tracing::info!("exiting");

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            app.handle_worker_response(resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
