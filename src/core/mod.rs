//! Core functionality modules
//!
//! This module contains the crate's business logic organized into layers:
//! - `data`: work item records, bulk persistence, SQLite store
//! - `urls`: URL classification and absolutization helpers

pub mod data;
pub mod urls;

// Re-export commonly used types for convenience
pub use data::Database;
