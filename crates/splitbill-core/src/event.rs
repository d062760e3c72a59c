//! # Bill Events
//!
//! A saved bill: a named, timestamped snapshot of the whole splitting
//! state. This is the unit the repository persists and lists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationResult;
use crate::splitting::EditableReceiptWithSplitting;
use crate::validation::validate_event_name;

/// A saved bill snapshot.
///
/// The snapshot is complete: reopening an event restores the receipt,
/// participants, assignments, and payer exactly as they were saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillEvent {
    /// Stable identifier (UUID v4).
    pub id: String,

    /// User-chosen name, e.g. "Team dinner at Luigi's".
    pub name: String,

    /// When the event was saved (UTC).
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,

    /// The full splitting state at save time.
    pub receipt_with_splitting: EditableReceiptWithSplitting,
}

impl BillEvent {
    /// Creates an event from the current splitting state, stamping it now.
    pub fn new(
        name: &str,
        receipt_with_splitting: &EditableReceiptWithSplitting,
    ) -> ValidationResult<Self> {
        validate_event_name(name)?;
        Ok(BillEvent {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            timestamp: Utc::now(),
            receipt_with_splitting: receipt_with_splitting.clone(),
        })
    }

    /// Returns this event under a new name. Id, timestamp, and snapshot
    /// are unchanged.
    pub fn renamed(&self, name: &str) -> ValidationResult<Self> {
        validate_event_name(name)?;
        Ok(BillEvent {
            name: name.trim().to_string(),
            ..self.clone()
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
