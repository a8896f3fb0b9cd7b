//! Display model implementations for table and JSON output
//!
//! Display models transform API response types into CLI-friendly formats
//! with appropriate column names and serialization.

mod common;
mod profile;
mod user;

pub use common::filter_rows;
pub use profile::ProfileListItem;
pub use user::{SyncStats, UserRow};
