//! Structured logging with optional file export.
//!
//! This module wires the `tracing` macros used across the crate to a
//! subscriber writing either to stderr or to a rotating log file.
//!
//! # Configuration
//!
//! Log level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Usage
//!
//! Initialize tracing once, early in the host lifecycle:
//!
//! ```
//! use tagbox::observability::init_tracing;
//! use tagbox::Config;
//!
//! let config = Config::default();
//! init_tracing(&config);
//!
//! tracing::debug!("host initialized");
//! ```
//!
//! # Modules
//!
//! - [`init`]: Tracing initialization and subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use init::init_tracing;
