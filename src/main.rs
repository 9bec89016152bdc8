mod app;
mod data;
mod ui;
mod watcher;

use std::fs::File;
use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};
use tokio::sync::mpsc;

use app::App;
use data::Dataset;

enum AppEvent {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    DatasetReload(Result<Box<Dataset>, String>),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (from current dir or parent dirs)
    let _ = dotenvy::dotenv();

    // Initialize file logger in the data directory
    let data_dir = watcher::data_dir();
    let _ = std::fs::create_dir_all(&data_dir);
    if let Ok(log_file) = File::create(data_dir.join("reallocate.log")) {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
        info!("Reallocate TUI started");
    }

    // Load and validate the dataset before touching the terminal
    let dataset = watcher::load_dataset().context("failed to load dataset")?;
    info!(
        "Dataset loaded: {} cities, {} alternatives",
        dataset.cities.len(),
        dataset.alternatives.len()
    );

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(dataset);

    // Set up event channel
    let (tx, mut rx) = mpsc::channel::<AppEvent>(32);

    // Spawn dataset watcher with adapter channel
    let watcher_tx = tx.clone();
    tokio::spawn(async move {
        let (data_tx, mut data_rx) = mpsc::channel::<Result<Dataset, String>>(16);

        let watcher_handle = tokio::spawn(async move {
            if let Err(e) = watcher::watch_data_dir(data_tx).await {
                error!("Dataset watcher error: {}", e);
            }
        });

        // Forward reload results to main channel
        while let Some(result) = data_rx.recv().await {
            let event = AppEvent::DatasetReload(result.map(Box::new));
            if watcher_tx.send(event).await.is_err() {
                break;
            }
        }

        let _ = watcher_handle.await;
    });

    // Spawn input event handler (keyboard + mouse)
    let input_tx = tx.clone();
    tokio::spawn(async move {
        loop {
            if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                match event::read() {
                    Ok(Event::Key(key)) => {
                        if key.kind == KeyEventKind::Press
                            && input_tx.send(AppEvent::Key(key)).await.is_err()
                        {
                            break;
                        }
                    }
                    Ok(Event::Mouse(mouse)) => {
                        if input_tx.send(AppEvent::Mouse(mouse)).await.is_err() {
                            break;
                        }
                    }
                    _ => {}
                }
            }
        }
    });

    // Keep tx for manual reloads triggered from the main loop
    let reload_tx = tx;

    // Main event loop
    loop {
        // Draw UI
        terminal.draw(|f| ui::render(f, &mut app))?;

        // Check for a manual reload request
        if app.take_pending_reload() {
            info!("Manual dataset reload requested");
            let tx_clone = reload_tx.clone();
            tokio::task::spawn_blocking(move || {
                let result = watcher::load_dataset()
                    .map(Box::new)
                    .map_err(|e| format!("{:#}", e));
                let _ = tx_clone.blocking_send(AppEvent::DatasetReload(result));
            });
        }

        // Handle events
        if let Some(event) = rx.recv().await {
            match event {
                AppEvent::Key(key) => app.handle_key(key),
                AppEvent::Mouse(mouse) => app.handle_mouse(mouse),
                AppEvent::DatasetReload(result) => match result {
                    Ok(dataset) => app.on_dataset_update(*dataset),
                    Err(e) => {
                        error!("Dataset reload rejected: {}", e);
                        app.on_load_error(e);
                    }
                },
            }
        }

        if !app.running {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Force exit; the background tokio tasks (watcher, input) would otherwise keep the process alive
    std::process::exit(0);
}
