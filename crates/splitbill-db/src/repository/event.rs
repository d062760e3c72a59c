//! # Bill Event Repository
//!
//! Database operations for saved bill events.
//!
//! ## Storage Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       bill_events table                                 │
//! │                                                                         │
//! │  id            TEXT  ← UUID from splitbill-core                        │
//! │  name          TEXT  ← user-chosen event name                          │
//! │  timestamp     TEXT  ← RFC 3339 UTC, listings sort on this DESC        │
//! │  receipt_json  TEXT  ← complete EditableReceiptWithSplitting as JSON   │
//! │                                                                         │
//! │  Bills load and save whole, so the snapshot stays one JSON document    │
//! │  instead of being normalized across child tables.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Corrupt Row Policy
//! `get_all` skips rows whose snapshot no longer deserializes (logged at
//! WARN) so one bad row written by an old version never hides the rest of
//! the saved events. `get_by_id` propagates the error instead: the caller
//! asked for that specific event and should hear why it can't load.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use splitbill_core::BillEvent;

/// Repository for bill event database operations.
#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: SqlitePool,
}

impl EventRepository {
    /// Creates a new EventRepository.
    pub fn new(pool: SqlitePool) -> Self {
        EventRepository { pool }
    }

    /// Saves a bill event, replacing any existing event with the same id.
    ///
    /// Upsert semantics: saving twice is how "save again after more edits"
    /// works, so an existing id is never an error.
    pub async fn save(&self, event: &BillEvent) -> DbResult<()> {
        debug!(id = %event.id, name = %event.name, "Saving bill event");

        let receipt_json = serde_json::to_string(&event.receipt_with_splitting)?;
        let timestamp = event.timestamp.to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO bill_events (id, name, timestamp, receipt_json)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                timestamp = excluded.timestamp,
                receipt_json = excluded.receipt_json
            "#,
        )
        .bind(&event.id)
        .bind(&event.name)
        .bind(&timestamp)
        .bind(&receipt_json)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Returns all saved events, newest first.
    ///
    /// Rows that fail to deserialize are skipped with a warning.
    pub async fn get_all(&self) -> DbResult<Vec<BillEvent>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, timestamp, receipt_json
            FROM bill_events
            ORDER BY timestamp DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut events = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row.get("id");
            match row_to_event(&row) {
                Ok(event) => events.push(event),
                Err(e) => {
                    warn!(id = %id, error = %e, "Skipping unreadable bill event");
                }
            }
        }

        Ok(events)
    }

    /// Gets a single event by id, or `None` if it doesn't exist.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<BillEvent>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, timestamp, receipt_json
            FROM bill_events
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_event).transpose()
    }

    /// Renames a saved event.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - no event with that id exists
    pub async fn update_name(&self, id: &str, name: &str) -> DbResult<()> {
        debug!(id = %id, name = %name, "Renaming bill event");

        let result = sqlx::query("UPDATE bill_events SET name = ?1 WHERE id = ?2")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Bill event", id));
        }

        Ok(())
    }

    /// Deletes a saved event.
    ///
    /// Idempotent: deleting an id that doesn't exist succeeds, since the
    /// desired end state (no such event) already holds.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting bill event");

        sqlx::query("DELETE FROM bill_events WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Returns the number of saved events.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bill_events")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

/// Maps a database row back to a domain event.
fn row_to_event(row: &SqliteRow) -> DbResult<BillEvent> {
    let id: String = row.get("id");
    let name: String = row.get("name");
    let timestamp: String = row.get("timestamp");
    let receipt_json: String = row.get("receipt_json");

    let timestamp = DateTime::parse_from_rfc3339(&timestamp)
        .map_err(|e| DbError::Internal(format!("invalid timestamp for event {id}: {e}")))?
        .with_timezone(&Utc);

    Ok(BillEvent {
        id,
        name,
        timestamp,
        receipt_with_splitting: serde_json::from_str(&receipt_json)?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
