//! Data layer modules
//!
//! This module contains all persistence-related functionality:
//! - work item record type
//! - bulk save/update helpers over a `RecordStore`
//! - SQLite-backed store implementation

pub mod bulk;
pub mod database;
pub mod item;

// Re-export main types
pub use bulk::{save_in_bulk, update_in_bulk, update_in_bulk_with_ids};
pub use database::Database;
pub use item::Item;
