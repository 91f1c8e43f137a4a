//! Shared utilities

pub mod error;

pub use error::{SplitterError, SplitterResult};
