//! Shopfront - browse a product catalog from the terminal
//!
//! A terminal UI application that fetches a product catalog, filters and sorts
//! it, and keeps a shopping cart persisted in the local data directory.

use std::fs::{self, OpenOptions};
use std::io;
use std::panic;
use std::path::Path;
use std::process;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shopfront::app::App;
use shopfront::cli::{Cli, StartupConfig};
use shopfront::data::CatalogClient;
use shopfront::loader::CatalogLoader;
use shopfront::ui;

/// Name of the log file inside the data directory
const LOG_FILE: &str = "shopfront.log";

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Routes tracing output to a log file in `dir`
///
/// The terminal belongs to the UI, so nothing is logged to stdout or stderr.
/// Logging stays off if the file cannot be opened.
fn init_logging(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))?;

    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse CLI arguments before any terminal setup so errors print normally
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let store = match config.store() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(store.dir()) {
        eprintln!("Warning: logging disabled: {}", e);
    }
    info!(api_url = %config.api_url, data_dir = %store.dir().display(), "starting shopfront");

    let client = CatalogClient::from_config(config.api_url.clone(), config.timeout)?;
    let mut loader = CatalogLoader::new(client);

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app instance; it renders the loading state until the fetch lands
    let mut app = App::with_startup_config(&config, store);
    loader.spawn_fetch();

    // Main event loop
    loop {
        // Render UI
        terminal.draw(|f| ui::render(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        // Apply finished catalog fetches
        while let Some(message) = loader.try_recv() {
            app.apply_catalog_message(message);
        }

        if app.take_reload_request() {
            info!("catalog reload requested");
            loader.spawn_fetch();
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    info!(items = app.cart.item_count(), "shopfront exited");

    Ok(())
}
