//! # Split Primitives
//!
//! Participants and item assignments - the building blocks the splitting
//! engine composes into a bill.
//!
//! ## Assignment Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Item Assignment States                              │
//! │                                                                         │
//! │   Unassigned ──────────► Individual { participant_id }                 │
//! │       ▲   │                                                             │
//! │       │   └────────────► EqualSplit { participant_ids }                │
//! │       │                        │                                        │
//! │       └── removing the last ◄──┘                                        │
//! │           remaining participant collapses a split back to Unassigned   │
//! │                                                                         │
//! │   Assignments reference participants by id only. Renaming a            │
//! │   participant never touches an assignment.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationResult;
use crate::receipt::ReceiptItem;
use crate::validation::validate_participant_name;

// =============================================================================
// Participant
// =============================================================================

/// A person taking part in the bill split.
///
/// Identity is by `id`, never by name: two participants may share a name
/// and still hold independent assignments and balances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Participant {
    /// Stable identifier (UUID v4).
    pub id: String,

    /// Display name as entered, trimmed.
    pub name: String,
}

impl Participant {
    /// Creates a participant with a trimmed, validated name and a fresh id.
    ///
    /// ## Example
    /// ```rust
    /// use splitbill_core::Participant;
    ///
    /// let alice = Participant::new("  Alice  ").unwrap();
    /// assert_eq!(alice.name, "Alice");
    /// assert!(Participant::new("   ").is_err());
    /// ```
    pub fn new(name: &str) -> ValidationResult<Self> {
        validate_participant_name(name)?;
        Ok(Participant {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
        })
    }
}

// =============================================================================
// Item Assignment
// =============================================================================

/// Who owes a receipt line.
///
/// Serialized with an internal `"type"` tag so persisted bills read as
/// `{"type": "individual", "participant_id": "..."}` in JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum ItemAssignment {
    /// Nobody owes this line yet.
    #[default]
    Unassigned,

    /// One participant owes the full line cost.
    Individual { participant_id: String },

    /// The named participants share the line cost equally (near-equal
    /// pence shares, earlier participants absorb the remainder).
    EqualSplit { participant_ids: Vec<String> },
}

impl ItemAssignment {
    /// Assigns the line to a single participant.
    pub fn individual(participant_id: impl Into<String>) -> Self {
        ItemAssignment::Individual {
            participant_id: participant_id.into(),
        }
    }

    /// Splits the line equally between the given participants.
    ///
    /// The member list is a set: duplicate ids collapse to one share
    /// (keeping first-occurrence order), so a participant listed twice can
    /// never inflate the divisor and leak part of the line's cost. An
    /// empty list collapses to `Unassigned` - a split between nobody is
    /// not a distinct state.
    pub fn equal_split(participant_ids: Vec<String>) -> Self {
        let mut ids: Vec<String> = Vec::with_capacity(participant_ids.len());
        for id in participant_ids {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        if ids.is_empty() {
            ItemAssignment::Unassigned
        } else {
            ItemAssignment::EqualSplit {
                participant_ids: ids,
            }
        }
    }

    /// Re-enforces the set model on an assignment that may have been built
    /// without going through the constructors (e.g. deserialized from a
    /// stored snapshot): duplicate split members collapse to one, an
    /// emptied split becomes `Unassigned`.
    pub fn normalized(self) -> Self {
        match self {
            ItemAssignment::EqualSplit { participant_ids } => {
                ItemAssignment::equal_split(participant_ids)
            }
            other => other,
        }
    }

    /// True unless the line is unassigned.
    pub fn is_assigned(&self) -> bool {
        !matches!(self, ItemAssignment::Unassigned)
    }

    /// Returns this assignment with the given participant removed.
    ///
    /// - `Individual` by that participant becomes `Unassigned`
    /// - `EqualSplit` drops them; if they were the last member the split
    ///   collapses to `Unassigned`
    /// - Assignments not involving them are returned unchanged
    pub fn without_participant(&self, participant_id: &str) -> Self {
        match self {
            ItemAssignment::Individual { participant_id: id } if id == participant_id => {
                ItemAssignment::Unassigned
            }
            ItemAssignment::EqualSplit { participant_ids } => {
                let remaining: Vec<String> = participant_ids
                    .iter()
                    .filter(|id| id.as_str() != participant_id)
                    .cloned()
                    .collect();
                ItemAssignment::equal_split(remaining)
            }
            other => other.clone(),
        }
    }
}

// =============================================================================
// Assigned Item
// =============================================================================

/// A receipt line paired with its assignment. The unit the summary
/// calculation consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssignedReceiptItem {
    pub item: ReceiptItem,
    pub assignment: ItemAssignment,
}

impl AssignedReceiptItem {
    /// Pairs an item with no assignment yet.
    pub fn unassigned(item: ReceiptItem) -> Self {
        AssignedReceiptItem {
            item,
            assignment: ItemAssignment::Unassigned,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.assignment.is_assigned()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
