//! # Splitting Engine
//!
//! The top-level state for a bill: the editable receipt, the participants,
//! the per-line assignments, and the derived summary, kept consistent as
//! one value.
//!
//! ## State Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 EditableReceiptWithSplitting                            │
//! │                                                                         │
//! │  editable_receipt ── the lines, service charge, stated total           │
//! │  participants ────── who is splitting                                  │
//! │  assignments ─────── item id → ItemAssignment (BTreeMap)               │
//! │  payer_id ────────── who settled the bill, if anyone                   │
//! │  summary ─────────── DERIVED, rebuilt on every operation               │
//! │                                                                         │
//! │  Invariants held by rebuild():                                         │
//! │   • assignments has exactly one entry per receipt line                 │
//! │   • summary reflects the other four fields                             │
//! │   • payer_id always names a current participant                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Assignments are keyed by item id, not index, so editing a line in place
//! keeps its assignment and deleting line 2 never reassigns line 3.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationResult;
use crate::money::Money;
use crate::receipt::{EditableReceipt, ReceiptItem};
use crate::split::{AssignedReceiptItem, ItemAssignment, Participant};
use crate::summary::{BillSplitSummary, PaymentSummary};

/// A bill being split: receipt, participants, assignments, payer, and the
/// derived summary, always mutually consistent.
///
/// Operations are pure: each returns a fresh value with the summary
/// recomputed, leaving the receiver untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EditableReceiptWithSplitting {
    pub editable_receipt: EditableReceipt,
    pub participants: Vec<Participant>,

    /// One entry per receipt line, keyed by the line's stable id. BTreeMap
    /// keeps serialization order deterministic.
    pub assignments: BTreeMap<String, ItemAssignment>,

    pub payer_id: Option<String>,

    /// Derived view. Never edited directly.
    pub summary: BillSplitSummary,
}

impl EditableReceiptWithSplitting {
    /// Starts a split from a corrected receipt: no participants, every
    /// line unassigned, no payer.
    pub fn from_editable_receipt(receipt: EditableReceipt) -> Self {
        Self::rebuild(receipt, Vec::new(), BTreeMap::new(), None)
    }

    /// Re-derives the consistent state from its inputs.
    ///
    /// Assignments are re-synced to the receipt lines: lines without an
    /// entry gain `Unassigned`, entries for vanished lines are dropped,
    /// and each kept assignment is normalized so a snapshot carrying
    /// duplicate split members can't skew the share arithmetic.
    fn rebuild(
        receipt: EditableReceipt,
        participants: Vec<Participant>,
        assignments: BTreeMap<String, ItemAssignment>,
        payer_id: Option<String>,
    ) -> Self {
        let assignments: BTreeMap<String, ItemAssignment> = receipt
            .items
            .iter()
            .map(|item| {
                let assignment = assignments
                    .get(&item.id)
                    .cloned()
                    .unwrap_or_default()
                    .normalized();
                (item.id.clone(), assignment)
            })
            .collect();

        let assigned_items: Vec<AssignedReceiptItem> = receipt
            .items
            .iter()
            .map(|item| AssignedReceiptItem {
                item: item.clone(),
                assignment: assignments
                    .get(&item.id)
                    .cloned()
                    .unwrap_or_default(),
            })
            .collect();

        let summary = BillSplitSummary::calculate(
            &participants,
            &assigned_items,
            receipt.service_charge,
            payer_id.clone(),
        );

        EditableReceiptWithSplitting {
            editable_receipt: receipt,
            participants,
            assignments,
            payer_id,
            summary,
        }
    }

    // =========================================================================
    // Participants
    // =========================================================================

    /// Adds a participant by name. Duplicate names are fine.
    pub fn add_participant(&self, name: &str) -> ValidationResult<Self> {
        let participant = Participant::new(name)?;
        let mut participants = self.participants.clone();
        participants.push(participant);
        Ok(Self::rebuild(
            self.editable_receipt.clone(),
            participants,
            self.assignments.clone(),
            self.payer_id.clone(),
        ))
    }

    /// Removes a participant and scrubs them from every assignment.
    ///
    /// Splits they were part of shrink; lines only they owed become
    /// unassigned. If they were the payer, the payer designation clears.
    /// Unknown ids are a no-op.
    pub fn remove_participant(&self, participant_id: &str) -> Self {
        let participants: Vec<Participant> = self
            .participants
            .iter()
            .filter(|p| p.id != participant_id)
            .cloned()
            .collect();

        let assignments: BTreeMap<String, ItemAssignment> = self
            .assignments
            .iter()
            .map(|(id, a)| (id.clone(), a.without_participant(participant_id)))
            .collect();

        let payer_id = self
            .payer_id
            .clone()
            .filter(|id| id != participant_id);

        Self::rebuild(
            self.editable_receipt.clone(),
            participants,
            assignments,
            payer_id,
        )
    }

    // =========================================================================
    // Assignments
    // =========================================================================

    /// Sets the assignment for the line at `index`. Out-of-range indices
    /// are a no-op.
    pub fn set_assignment(&self, index: usize, assignment: ItemAssignment) -> Self {
        let Some(item) = self.editable_receipt.items.get(index) else {
            return self.clone();
        };

        let mut assignments = self.assignments.clone();
        assignments.insert(item.id.clone(), assignment);
        Self::rebuild(
            self.editable_receipt.clone(),
            self.participants.clone(),
            assignments,
            self.payer_id.clone(),
        )
    }

    /// Assigns the line at `index` to one participant.
    pub fn assign_item_to_participant(&self, index: usize, participant_id: &str) -> Self {
        self.set_assignment(index, ItemAssignment::individual(participant_id))
    }

    /// Splits the line at `index` equally between the given participants.
    /// An empty list unassigns the line.
    pub fn assign_item_to_equal_split(
        &self,
        index: usize,
        participant_ids: Vec<String>,
    ) -> Self {
        self.set_assignment(index, ItemAssignment::equal_split(participant_ids))
    }

    /// Unassigns the line at `index`.
    pub fn unassign_item(&self, index: usize) -> Self {
        self.set_assignment(index, ItemAssignment::Unassigned)
    }

    // =========================================================================
    // Receipt Edits During Splitting
    // =========================================================================

    /// Replaces the line at `index`, keeping its id and therefore its
    /// assignment. Out-of-range indices are a no-op.
    pub fn update_receipt_item(&self, index: usize, item: ReceiptItem) -> Self {
        Self::rebuild(
            self.editable_receipt.update_item(index, item),
            self.participants.clone(),
            self.assignments.clone(),
            self.payer_id.clone(),
        )
    }

    /// Appends a line, starting unassigned.
    pub fn add_receipt_item(&self, item: ReceiptItem) -> Self {
        Self::rebuild(
            self.editable_receipt.add_item(item),
            self.participants.clone(),
            self.assignments.clone(),
            self.payer_id.clone(),
        )
    }

    /// Removes the line at `index` along with its assignment. Other lines
    /// keep theirs. Out-of-range indices are a no-op.
    pub fn delete_receipt_item(&self, index: usize) -> Self {
        Self::rebuild(
            self.editable_receipt.delete_item(index),
            self.participants.clone(),
            self.assignments.clone(),
            self.payer_id.clone(),
        )
    }

    /// Updates the service charge, re-deriving every service share.
    pub fn update_service_charge(&self, service_charge: Money) -> Self {
        Self::rebuild(
            self.editable_receipt.update_service_charge(service_charge),
            self.participants.clone(),
            self.assignments.clone(),
            self.payer_id.clone(),
        )
    }

    /// Updates the stated total (affects the discrepancy check only).
    pub fn update_total(&self, total: Money) -> Self {
        Self::rebuild(
            self.editable_receipt.update_total(total),
            self.participants.clone(),
            self.assignments.clone(),
            self.payer_id.clone(),
        )
    }

    // =========================================================================
    // Payer & Settlement
    // =========================================================================

    /// Designates who settled the bill. Unknown ids are a no-op.
    pub fn designate_payer(&self, participant_id: &str) -> Self {
        if !self.participants.iter().any(|p| p.id == participant_id) {
            return self.clone();
        }

        Self::rebuild(
            self.editable_receipt.clone(),
            self.participants.clone(),
            self.assignments.clone(),
            Some(participant_id.to_string()),
        )
    }

    /// Clears the payer designation.
    pub fn clear_payer(&self) -> Self {
        Self::rebuild(
            self.editable_receipt.clone(),
            self.participants.clone(),
            self.assignments.clone(),
            None,
        )
    }

    /// The settlement plan, if a payer is designated.
    pub fn payment_summary(&self) -> Option<PaymentSummary> {
        self.summary.payment_summary()
    }

    /// The receipt lines paired with their assignments, in receipt order.
    pub fn assigned_items(&self) -> &[AssignedReceiptItem] {
        &self.summary.assigned_items
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
