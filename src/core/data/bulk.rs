//! Bulk persistence helpers
//!
//! Thin conveniences over a `RecordStore`: each operation walks its input in
//! sequence order and persists one record at a time. There is no transaction
//! wrapping and no rollback; the first store error aborts the remaining
//! iterations and propagates to the caller.
//!
//! When records and value maps are paired positionally, pairing stops at the
//! shorter sequence.

use tracing::debug;

use crate::error::Result;
use crate::services::{FieldValues, Record, RecordStore};

/// Callback invoked with each record right after it has been saved.
pub type SaveCallback<'a, R> = &'a mut (dyn FnMut(&R) + Send);

/// Save every record in order, invoking `callback` after each save.
pub async fn save_in_bulk<S: RecordStore>(
    store: &S,
    records: &mut [S::Record],
    mut callback: Option<SaveCallback<'_, S::Record>>,
) -> Result<()> {
    debug!("Saving {} record(s) in bulk", records.len());
    for record in records.iter_mut() {
        store.save(record).await?;
        if let Some(cb) = callback.as_deref_mut() {
            cb(record);
        }
    }
    Ok(())
}

/// Apply each value map to its positionally paired record, save it, and
/// invoke `callback` after the save.
pub async fn update_in_bulk<S: RecordStore>(
    store: &S,
    records: &mut [S::Record],
    new_values: &[FieldValues],
    mut callback: Option<SaveCallback<'_, S::Record>>,
) -> Result<()> {
    debug!(
        "Updating {} record(s) in bulk",
        records.len().min(new_values.len())
    );
    for (record, values) in records.iter_mut().zip(new_values) {
        for (field, value) in values {
            record.set_field(field, value)?;
        }
        store.save(record).await?;
        if let Some(cb) = callback.as_deref_mut() {
            cb(record);
        }
    }
    Ok(())
}

/// Apply each value map directly to the persisted row with the positionally
/// paired primary key. Records are never materialized, so model-level
/// side effects of a save do not run here.
pub async fn update_in_bulk_with_ids<S: RecordStore>(
    store: &S,
    ids: &[i64],
    new_values: &[FieldValues],
) -> Result<()> {
    debug!("Updating {} row(s) by id", ids.len().min(new_values.len()));
    for (id, values) in ids.iter().zip(new_values) {
        store.update_by_id(*id, values).await?;
    }
    Ok(())
}
