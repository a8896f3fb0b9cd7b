//! Display models for CLI output
//!
//! This module provides the display models that turn synced API data into
//! table rows and JSON records.

pub mod display;

pub use display::{ProfileListItem, SyncStats, UserRow, filter_rows};
