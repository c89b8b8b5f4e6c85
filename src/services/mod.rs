//! Service layer for dependency injection
//!
//! This module provides the persistence abstractions the rest of the crate
//! is written against:
//! - `Record`: a mutable persisted record with assignable named fields
//! - `RecordStore`: store seam with per-record save and update-by-id
//! - `MockRecordStore`: recording fake for tests

pub mod store;

pub use store::{FieldValues, MockRecordStore, Record, RecordStore};
