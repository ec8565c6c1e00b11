//! Tracing initialization and subscriber setup.
//!
//! This module configures the tracing subscriber, wiring the `tracing`
//! macros used throughout the crate to either stderr or a rotating log
//! file.

use super::file_writer::FileWriter;
use crate::Config;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the tracing subscriber.
///
/// # Parameters
///
/// * `config` - Configuration carrying `trace_level` and `log_file`
///
/// # Level Resolution
///
/// The filter is determined by:
/// 1. `RUST_LOG` environment variable if set
/// 2. `config.trace_level` if set
/// 3. Default: `"info"`
///
/// # Output
///
/// With `log_file` set, events are formatted without ANSI colors and
/// appended to that file, rotating at 10MB with three backups retained.
/// Otherwise events go to stderr. The log file's parent directory is
/// created if missing; when that fails, initialization silently gives up
/// since observability is optional.
///
/// # Initialization Behavior
///
/// Idempotent: safe to call multiple times, only the first call takes
/// effect.
///
/// # Example
///
/// ```
/// use tagbox::observability::init_tracing;
/// use tagbox::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match &config.log_file {
        Some(path) => {
            let path = PathBuf::from(path);
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && std::fs::create_dir_all(parent).is_err() {
                    return;
                }
            }

            let layer = tracing_subscriber::fmt::layer()
                .with_writer(FileWriter::new(path))
                .with_ansi(false)
                .with_target(true);
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init();
        }
        None => {
            let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init();
        }
    }
}
