use serde_json::Value;

use crate::error::{Result, WorkbaseError};

/// Ordered mapping of field name to new value, as applied to one record.
pub type FieldValues = serde_json::Map<String, Value>;

/// A mutable persisted record with assignable named fields.
pub trait Record: Send {
    /// Apply a single `field -> value` entry to this record.
    fn set_field(&mut self, field: &str, value: &Value) -> Result<()>;
}

/// Persistence seam for a record type.
///
/// Implementations own the actual storage; the bulk helpers in
/// `core::data::bulk` only ever talk to this trait, so tests can substitute
/// a recording fake without a real database.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    type Record: Record;

    /// Persist the current state of `record`.
    async fn save(&self, record: &mut Self::Record) -> Result<()>;

    /// Apply `values` directly to the persisted row with primary key `id`,
    /// without materializing the record.
    async fn update_by_id(&self, id: i64, values: &FieldValues) -> Result<()>;
}

/// In-memory store that records every call it receives, in order.
pub struct MockRecordStore<R> {
    saved: std::sync::Mutex<Vec<R>>,
    updates: std::sync::Mutex<Vec<(i64, FieldValues)>>,
    fail_after: Option<usize>,
}

impl<R: Clone> MockRecordStore<R> {
    pub fn new() -> Self {
        Self {
            saved: std::sync::Mutex::new(Vec::new()),
            updates: std::sync::Mutex::new(Vec::new()),
            fail_after: None,
        }
    }

    /// Store that accepts the first `calls` save/update calls and fails on
    /// every call after that.
    pub fn failing_after(calls: usize) -> Self {
        Self {
            fail_after: Some(calls),
            ..Self::new()
        }
    }

    fn check_failure(&self) -> Result<()> {
        if let Some(limit) = self.fail_after {
            let calls = self.saved.lock().unwrap().len() + self.updates.lock().unwrap().len();
            if calls >= limit {
                return Err(WorkbaseError::Internal(anyhow::anyhow!(
                    "store rejected call {}",
                    calls + 1
                )));
            }
        }
        Ok(())
    }

    /// Snapshots of every record passed to `save`, in call order.
    pub fn saved(&self) -> Vec<R> {
        self.saved.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saved.lock().unwrap().len()
    }

    /// Every `(id, values)` pair passed to `update_by_id`, in call order.
    pub fn updates(&self) -> Vec<(i64, FieldValues)> {
        self.updates.lock().unwrap().clone()
    }
}

impl<R: Clone> Default for MockRecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl<R> RecordStore for MockRecordStore<R>
where
    R: Record + Clone + Sync,
{
    type Record = R;

    async fn save(&self, record: &mut R) -> Result<()> {
        self.check_failure()?;
        self.saved.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn update_by_id(&self, id: i64, values: &FieldValues) -> Result<()> {
        self.check_failure()?;
        self.updates.lock().unwrap().push((id, values.clone()));
        Ok(())
    }
}
