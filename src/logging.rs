//! Tracing setup.
//!
//! The terminal belongs to the UI (or to scripted output in headless modes), so
//! logs only ever go to a file.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber. `RUST_LOG` overrides the default `info` filter.
pub fn init(log_file: Option<&Path>) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let candidates = match log_file {
        Some(path) => vec![path.to_path_buf()],
        None => default_log_candidates(),
    };
    let (opened, warnings) = open_log_file(&candidates);

    let Some((path, file)) = opened else {
        // No usable file: drop logs rather than write over the display.
        let _ = tracing_subscriber::registry().with(env_filter).try_init();
        return;
    };

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(env_filter)
        .try_init();

    tracing::info!(path = %path.display(), "logging initialized");
    for warning in warnings {
        tracing::warn!("{warning}");
    }
}

fn default_log_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(dir) = dirs::data_local_dir() {
        candidates.push(dir.join("pomo-cli").join("pomo.log"));
    }
    candidates.push(std::env::temp_dir().join("pomo-cli.log"));
    candidates
}

fn open_log_file(candidates: &[PathBuf]) -> (Option<(PathBuf, File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in candidates {
        if let Some(parent) = candidate.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warnings.push(format!(
                    "Failed to create log dir {}: {e}",
                    parent.display()
                ));
                continue;
            }
        }

        match OpenOptions::new().create(true).append(true).open(candidate) {
            Ok(file) => return (Some((candidate.clone(), file)), warnings),
            Err(e) => warnings.push(format!(
                "Failed to open log file {}: {e}",
                candidate.display()
            )),
        }
    }

    (None, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_through_to_next_candidate() {
        let dir = std::env::temp_dir().join(format!("pomo-log-test-{}", std::process::id()));
        // A regular file where a directory is expected makes the first candidate unusable.
        let blocker = dir.join("blocker");
        fs::create_dir_all(&dir).unwrap();
        fs::write(&blocker, b"").unwrap();

        let candidates = vec![blocker.join("pomo.log"), dir.join("pomo.log")];
        let (opened, warnings) = open_log_file(&candidates);

        let (path, _file) = opened.unwrap();
        assert_eq!(path, dir.join("pomo.log"));
        assert_eq!(warnings.len(), 1);
        let _ = fs::remove_dir_all(&dir);
    }
}
