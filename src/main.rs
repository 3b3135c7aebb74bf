//! citywx - City weather in the terminal
//!
//! A terminal UI application that looks up a city through Open-Meteo and shows
//! yesterday, today and tomorrow alongside past forecasts, the same days in
//! previous years, rain and thunder history and clothing advice.

use std::io;
use std::panic;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use citywx::app::{App, AppState};
use citywx::cli::{Cli, StartupConfig};
use citywx::store::HistoryStore;
use citywx::ui;

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

/// Runs the startup search and prints the report to stdout
async fn run_plain(mut app: App) {
    if let Some(city) = app.take_search() {
        app.run_search(&city, Local::now().date_naive()).await;
    }

    match &app.state {
        AppState::Report(report) => println!("{}", ui::render_plain(report)),
        AppState::Error(message) => {
            eprintln!("{}", message);
            std::process::exit(1);
        }
        AppState::Idle | AppState::Loading(_) => {}
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let mut app = App::with_startup_config(&config, HistoryStore::new())?;

    if config.plain {
        run_plain(app).await;
        return Ok(());
    }

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main event loop
    loop {
        if let Some(city) = app.take_search() {
            // Show the loading state before blocking on the lookup
            terminal.draw(|f| ui::render(f, &app))?;
            app.run_search(&city, Local::now().date_naive()).await;
        }

        terminal.draw(|f| ui::render(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
