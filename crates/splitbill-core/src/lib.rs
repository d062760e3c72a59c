//! # SplitBill Core
//!
//! Pure business logic for SplitBill - receipt correction, bill splitting,
//! and settlement. **No I/O allowed in this crate.**
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        splitbill-core                                   │
//! │                                                                         │
//! │  money ────── Money: integer pence, exact even splits                  │
//! │  receipt ──── ReceiptItem, ReceiptParseResult, EditableReceipt         │
//! │  split ────── Participant, ItemAssignment, AssignedReceiptItem         │
//! │  summary ──── BillSplitSummary, ParticipantBalance, PaymentSummary     │
//! │  splitting ── EditableReceiptWithSplitting (the whole-bill state)      │
//! │  event ────── BillEvent (named, timestamped snapshot)                  │
//! │  validation ─ participant / event name validators                      │
//! │  error ────── ValidationError                                          │
//! │                                                                         │
//! │  Consumed by:                                                           │
//! │    splitbill-db ───── persists BillEvent snapshots to SQLite           │
//! │    splitbill-parse ── produces ReceiptParseResult from photos          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Every mutation is a pure state transition: snapshot in, snapshot out
//! 2. All money is integer pence; splitting distributes remainders exactly
//! 3. Index-based edits out of range are silent no-ops, never panics
//! 4. Derived state (`calculation`, `summary`) is rebuilt atomically with
//!    the data it derives from
//!
//! ## Example
//! ```rust
//! use splitbill_core::{
//!     EditableReceipt, EditableReceiptWithSplitting, Money, ReceiptItem,
//!     ReceiptParseResult,
//! };
//!
//! let parsed = ReceiptParseResult {
//!     error: None,
//!     items: Some(vec![
//!         ReceiptItem::new("Pizza", 1, Money::from_pence(1500)),
//!         ReceiptItem::new("Salad", 1, Money::from_pence(850)),
//!     ]),
//!     service_charge: Some(Money::from_pence(235)),
//!     total: Some(Money::from_pence(2585)),
//! };
//!
//! let receipt = EditableReceipt::from_parse_result(parsed);
//! assert!(!receipt.calculation.has_discrepancy);
//!
//! let bill = EditableReceiptWithSplitting::from_editable_receipt(receipt)
//!     .add_participant("Alice")
//!     .unwrap();
//! let alice = bill.participants[0].id.clone();
//!
//! let bill = bill
//!     .assign_item_to_participant(0, &alice)
//!     .assign_item_to_participant(1, &alice);
//! assert!(bill.summary.is_fully_assigned);
//! ```

pub mod error;
pub mod event;
pub mod money;
pub mod receipt;
pub mod split;
pub mod splitting;
pub mod summary;
pub mod validation;

// Re-export commonly used types at the crate root
pub use error::{ValidationError, ValidationResult};
pub use event::BillEvent;
pub use money::Money;
pub use receipt::{EditableReceipt, ReceiptCalculation, ReceiptItem, ReceiptParseResult};
pub use split::{AssignedReceiptItem, ItemAssignment, Participant};
pub use splitting::EditableReceiptWithSplitting;
pub use summary::{BillSplitSummary, ParticipantBalance, Payment, PaymentSummary};

// =============================================================================
// Domain Constants
// =============================================================================

/// Largest receipt-arithmetic discrepancy treated as rounding noise.
///
/// Parsed receipts arrive via decimal extraction, so expected and stated
/// totals may legitimately differ by a penny. Anything beyond that is
/// surfaced as a discrepancy warning.
pub const DISCREPANCY_TOLERANCE: Money = Money::from_pence(1);

/// Maximum length for participant and event names.
pub const MAX_NAME_LENGTH: usize = 200;
