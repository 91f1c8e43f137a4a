//! Splitter settings
//!
//! The persisted settings shape, the decomposed interval editing fields,
//! and the JSON settings store standing in for the host's settings
//! storage.

pub mod schema;
pub mod store;

pub use schema::{IntervalFields, SettingsError, SplitterConfig, SplitterSettings};
pub use store::SettingsStore;
