//! Error types for bending-detail generation.

use thiserror::Error;

/// Errors that can occur while detailing a bar.
#[derive(Error, Debug)]
pub enum DetailError {
    /// The bar cannot be detailed (free-form, empty, or not planar).
    #[error("unsupported bar: {0}")]
    Unsupported(String),

    /// Every active bar position is hidden in the view.
    #[error("no bar position is visible in the view")]
    NoVisiblePosition,

    /// A shape constraint has no value for a requested bar position.
    #[error("constraint has no value at bar position {position} ({positions} values available)")]
    MissingConstraintValue {
        /// Requested bar position.
        position: usize,
        /// Number of values the constraint carries.
        positions: usize,
    },

    /// Shape constraints and centerline curves do not line up.
    #[error("shape constraints do not match the centerline: {0}")]
    ConstraintMismatch(String),

    /// Invalid detailing settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Settings file could not be parsed.
    #[error("settings parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Settings file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The host refused to place the detail symbol.
    #[error("placement failed: {0}")]
    Placement(String),
}

/// Result type for detailing operations.
pub type Result<T> = std::result::Result<T, DetailError>;
