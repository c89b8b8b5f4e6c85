//! Base utilities for the Workbase project tracker
//!
//! Two independent utility groups, both thin layers over injected
//! collaborators:
//! - URL helpers that classify a URL as absolute and resolve relative URLs
//!   against the configured current site
//! - bulk persistence helpers that save or update sequences of records
//!   through a `RecordStore`, with an update-by-id path that never loads
//!   records into memory

pub mod config;
pub mod core;
pub mod error;
pub mod services;
pub mod utils;

pub use crate::config::{Site, SitesConfig};
pub use crate::core::data::{save_in_bulk, update_in_bulk, update_in_bulk_with_ids, Database, Item};
pub use crate::core::urls::{build_url, get_absolute_url, is_absolute_url};
pub use crate::error::{Result, WorkbaseError};
pub use crate::services::{FieldValues, MockRecordStore, Record, RecordStore};
