//! SQLite database operations for tracker work items
//!
//! This module provides the concrete `RecordStore` used in production:
//! work items live in an `items` table, and update-by-id is issued as a
//! targeted UPDATE without reading the row first.

use rusqlite::{params, params_from_iter, Connection, ToSql};
use serde_json::Value;
use std::path::Path;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::core::data::item::Item;
use crate::error::{DatabaseError, Result, WorkbaseError};
use crate::services::{FieldValues, RecordStore};

const CURRENT_DB_VERSION: u32 = 1;

/// Columns of the `items` table that update-by-id may touch.
const UPDATABLE_COLUMNS: [&str; 4] = ["subject", "description", "status", "version"];

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub async fn new(db_path: &Path) -> Result<Self> {
        info!("Opening database at: {}", db_path.display());

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path).map_err(DatabaseError::Connection)?;
        Self::initialize(conn)
    }

    /// Open a throwaway in-memory database with the full schema applied.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::Connection)?;
        Self::initialize(conn)
    }

    fn initialize(mut conn: Connection) -> Result<Self> {
        // Enable WAL mode for better concurrent access
        conn.pragma_update(None, "journal_mode", "WAL")?;

        // Check and upgrade database if needed
        let mut user_pragma = conn.prepare("PRAGMA user_version")?;
        let existing_user_version: u32 = user_pragma.query_row([], |row| row.get(0))?;
        drop(user_pragma);

        if existing_user_version < CURRENT_DB_VERSION {
            Self::upgrade_database(&mut conn, existing_user_version)?;
        }

        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    fn upgrade_database(conn: &mut Connection, existing_version: u32) -> Result<()> {
        debug!("Upgrading database from version {} to {}", existing_version, CURRENT_DB_VERSION);

        if existing_version == 0 {
            let tx = conn.transaction()?;

            tx.pragma_update(None, "user_version", CURRENT_DB_VERSION)?;

            tx.execute_batch(r#"
                CREATE TABLE items (
                    id INTEGER PRIMARY KEY,
                    subject TEXT NOT NULL DEFAULT '',
                    description TEXT NOT NULL DEFAULT '',
                    status TEXT NOT NULL DEFAULT 'new',
                    version INTEGER NOT NULL DEFAULT 1,
                    created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                    updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
                );

                CREATE INDEX idx_items_status ON items(status);
            "#)?;

            tx.commit()?;
        }

        info!("Database upgraded successfully");
        Ok(())
    }

    pub async fn get_item(&self, id: i64) -> Result<Item> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT id, subject, description, status, version FROM items WHERE id = ?1",
        )?;

        let result = stmt.query_row(params![id], |row| {
            Ok(Item {
                id: row.get(0)?,
                subject: row.get(1)?,
                description: row.get(2)?,
                status: row.get(3)?,
                version: row.get(4)?,
                extra: Default::default(),
            })
        });

        match result {
            Ok(item) => Ok(item),
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                Err(WorkbaseError::Database(DatabaseError::RecordNotFound { id }))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Convert a JSON scalar into a bindable SQL parameter.
fn bind_value(column: &str, value: &Value) -> Result<Box<dyn ToSql + Send>> {
    match value {
        Value::Null => Ok(Box::new(rusqlite::types::Null)),
        Value::Bool(b) => Ok(Box::new(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Box::new(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Box::new(f))
            } else {
                Err(WorkbaseError::Validation(format!(
                    "Unsupported numeric value for column {}: {}",
                    column, n
                )))
            }
        }
        Value::String(s) => Ok(Box::new(s.clone())),
        _ => Err(WorkbaseError::Validation(format!(
            "Column {} cannot store non-scalar value: {}",
            column, value
        ))),
    }
}

#[async_trait::async_trait]
impl RecordStore for Database {
    type Record = Item;

    async fn save(&self, record: &mut Item) -> Result<()> {
        // `extra` fields have no column in the schema and are not persisted.
        let conn = self.conn.lock().await;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO items
            (id, subject, description, status, version, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, CURRENT_TIMESTAMP)
            "#,
            params![
                record.id,
                record.subject,
                record.description,
                record.status,
                record.version,
            ],
        )?;
        debug!("Saved item {}", record.id);
        Ok(())
    }

    async fn update_by_id(&self, id: i64, values: &FieldValues) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }

        let mut assignments = Vec::with_capacity(values.len() + 1);
        let mut params: Vec<Box<dyn ToSql + Send>> = Vec::with_capacity(values.len() + 1);

        for (field, value) in values {
            if !UPDATABLE_COLUMNS.contains(&field.as_str()) {
                return Err(WorkbaseError::Validation(format!(
                    "Unknown item column: {}",
                    field
                )));
            }
            assignments.push(format!("{} = ?{}", field, assignments.len() + 1));
            params.push(bind_value(field, value)?);
        }

        let sql = format!(
            "UPDATE items SET {}, updated_at = CURRENT_TIMESTAMP WHERE id = ?{}",
            assignments.join(", "),
            params.len() + 1,
        );
        params.push(Box::new(id));

        let conn = self.conn.lock().await;
        let changed = conn.execute(&sql, params_from_iter(params.iter().map(|p| p.as_ref() as &dyn ToSql)))?;
        debug!("Updated {} row(s) for item {}", changed, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(entries: &[(&str, Value)]) -> FieldValues {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_save_and_read_back() {
        let db = Database::in_memory().unwrap();
        let mut item = Item::new(1, "fix login");
        db.save(&mut item).await.unwrap();

        let stored = db.get_item(1).await.unwrap();
        assert_eq!(stored.subject, "fix login");
        assert_eq!(stored.status, "new");
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_row() {
        let db = Database::in_memory().unwrap();
        let mut item = Item::new(1, "fix login");
        db.save(&mut item).await.unwrap();

        item.status = "closed".to_string();
        db.save(&mut item).await.unwrap();

        assert_eq!(db.get_item(1).await.unwrap().status, "closed");
    }

    #[tokio::test]
    async fn test_update_by_id_changes_only_named_columns() {
        let db = Database::in_memory().unwrap();
        let mut item = Item::new(7, "fix login");
        db.save(&mut item).await.unwrap();

        db.update_by_id(7, &values(&[("status", json!("closed")), ("version", json!(2))]))
            .await
            .unwrap();

        let stored = db.get_item(7).await.unwrap();
        assert_eq!(stored.status, "closed");
        assert_eq!(stored.version, 2);
        assert_eq!(stored.subject, "fix login");
    }

    #[tokio::test]
    async fn test_update_by_id_is_idempotent() {
        let db = Database::in_memory().unwrap();
        let mut item = Item::new(7, "fix login");
        db.save(&mut item).await.unwrap();

        let changes = values(&[("status", json!("closed"))]);
        db.update_by_id(7, &changes).await.unwrap();
        let first = db.get_item(7).await.unwrap();
        db.update_by_id(7, &changes).await.unwrap();
        let second = db.get_item(7).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_update_by_id_rejects_unknown_columns() {
        let db = Database::in_memory().unwrap();
        let result = db.update_by_id(1, &values(&[("severity", json!("high"))])).await;
        assert!(matches!(result, Err(WorkbaseError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_by_id_on_missing_row_is_a_no_op() {
        let db = Database::in_memory().unwrap();
        let result = db.update_by_id(99, &values(&[("status", json!("closed"))])).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_get_item_not_found() {
        let db = Database::in_memory().unwrap();
        let result = db.get_item(42).await;
        assert!(matches!(
            result,
            Err(WorkbaseError::Database(DatabaseError::RecordNotFound { id: 42 }))
        ));
    }
}
