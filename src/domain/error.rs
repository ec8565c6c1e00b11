//! Error types for the tagbox engine.
//!
//! This module defines the centralized error type [`PickerError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for picker operations.
///
/// This enum consolidates all error conditions that can occur while enhancing a
/// control, from registration failures to malformed seed data. Most failures are
/// caller-contract violations reported before any state is mutated, so the native
/// control is always left untouched when one of these is returned.
///
/// # Examples
///
/// ```
/// use tagbox::domain::PickerError;
///
/// fn validate_control(control_type: &str) -> Result<(), PickerError> {
///     Err(PickerError::UnsupportedControl(control_type.to_string()))
/// }
/// ```
#[derive(Debug, Error)]
pub enum PickerError {
    /// The host control cannot be enhanced.
    ///
    /// Occurs when the control type string is not one of `select-one`,
    /// `select-multiple`, or `text`. The string contains the rejected type.
    #[error("Unsupported control: {0}")]
    UnsupportedControl(String),

    /// The control is already enhanced.
    ///
    /// Occurs when a registry is asked to enhance a control identity that
    /// already owns a picker. The string contains the offending control id.
    #[error("Control already enhanced: {0}")]
    AlreadyEnhanced(String),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when required configuration values are missing or malformed.
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Seed data for choices or groups could not be parsed.
    ///
    /// Occurs when JSON source records fail to deserialize. The string
    /// contains a description of what went wrong.
    #[error("Source parse error: {0}")]
    Source(String),

    /// The class-name skin file could not be loaded or parsed.
    ///
    /// The string contains a description of what went wrong.
    #[error("Skin error: {0}")]
    Skin(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for picker operations.
///
/// This is a type alias for `std::result::Result<T, PickerError>` that simplifies
/// function signatures throughout the codebase.
///
/// # Examples
///
/// ```
/// use tagbox::domain::Result;
///
/// fn enhance_control() -> Result<()> {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, PickerError>;
