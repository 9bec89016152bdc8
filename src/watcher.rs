use anyhow::{Context, Result};
use log::{info, warn};
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::data::Dataset;

const CITIES_FILE: &str = "cities.json";
const ALTERNATIVES_FILE: &str = "alternatives.json";

/// Directory that may hold dataset overrides (and the log file).
/// `REALLOCATE_DATA_DIR` wins; otherwise the platform config dir.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("REALLOCATE_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("reallocate")
}

/// Load the dataset: bundled JSON, with either document replaced by an
/// override file from the data directory when one is present. Validation
/// covers the combined result, so a partial override cannot smuggle in a
/// dangling reference.
pub fn load_dataset() -> Result<Dataset> {
    let dir = data_dir();
    let cities_override = read_override(dir.join(CITIES_FILE))?;
    let alternatives_override = read_override(dir.join(ALTERNATIVES_FILE))?;

    if cities_override.is_none() && alternatives_override.is_none() {
        return Dataset::bundled().context("bundled dataset failed validation");
    }

    let bundled = Dataset::bundled().context("bundled dataset failed validation")?;
    let cities_json = match cities_override {
        Some(json) => {
            info!("Using cities override from {}", dir.display());
            json
        }
        None => serde_json::to_string(&bundled.cities)?,
    };
    let alternatives_json = match alternatives_override {
        Some(json) => {
            info!("Using alternatives override from {}", dir.display());
            json
        }
        None => serde_json::to_string(&bundled.alternatives)?,
    };

    Dataset::from_json(&cities_json, &alternatives_json)
        .with_context(|| format!("invalid dataset override in {}", dir.display()))
}

fn read_override(path: PathBuf) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(Some(content))
}

/// Watch the data directory and send reloaded datasets through the channel.
/// A reload that fails validation sends the error instead, so the UI can keep
/// the previous dataset and surface the failure.
pub async fn watch_data_dir(tx: mpsc::Sender<Result<Dataset, String>>) -> Result<()> {
    let dir = data_dir();
    std::fs::create_dir_all(&dir)?;

    let (watcher_tx, mut watcher_rx) =
        tokio::sync::mpsc::channel::<notify::Result<notify::Event>>(16);

    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = watcher_tx.blocking_send(res);
        },
        Config::default().with_poll_interval(Duration::from_millis(100)),
    )?;

    watcher.watch(&dir, RecursiveMode::NonRecursive)?;
    info!("Watching {} for dataset overrides", dir.display());

    loop {
        if let Some(Ok(event)) = watcher_rx.recv().await {
            let is_dataset_file = event.paths.iter().any(|p| {
                p.file_name()
                    .map(|n| n == CITIES_FILE || n == ALTERNATIVES_FILE)
                    .unwrap_or(false)
            });

            if is_dataset_file {
                // Small delay to ensure the file is fully written
                tokio::time::sleep(Duration::from_millis(50)).await;

                let result = load_dataset().map_err(|e| {
                    warn!("Dataset reload failed: {:#}", e);
                    format!("{:#}", e)
                });
                if tx.send(result).await.is_err() {
                    break;
                }
            }
        }
    }

    Ok(())
}
