//! Error types and handling
//!
//! Common error types used across the crate. The restart protocol itself
//! has no failure path (a stalled host stalls the polls by design);
//! errors exist only at the settings edge.

use crate::settings::SettingsError;
use thiserror::Error;

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum SplitterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Result type alias using SplitterError
pub type SplitterResult<T> = Result<T, SplitterError>;
