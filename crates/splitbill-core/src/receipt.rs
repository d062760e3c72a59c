//! # Receipt Model
//!
//! The parsed receipt, its derived arithmetic, and the editable receipt that
//! a user corrects before splitting.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Receipt Editing Flow                             │
//! │                                                                         │
//! │  ReceiptParseResult (from the vision parser, possibly an error)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  EditableReceipt::from_parse_result                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  update_items / add_item / update_item / delete_item                   │
//! │  update_service_charge / update_total                                  │
//! │       │                                                                 │
//! │       │   every edit returns a FRESH EditableReceipt with              │
//! │       ▼   `calculation` recomputed atomically                          │
//! │  ReceiptCalculation { subtotal, expected_total, has_discrepancy, ... } │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Editing Contract
//! Index-based `update_item`/`delete_item` with an out-of-range index return
//! the receipt unchanged. The editor is deliberately forgiving: a stale index
//! from a UI race is dropped on the floor rather than surfaced as an error.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;
use crate::DISCREPANCY_TOLERANCE;

// =============================================================================
// Receipt Item
// =============================================================================

/// A single line item on a receipt.
///
/// ## Dual-Key Identity Pattern
/// - `id`: UUID v4 minted at construction - identifies the line across edits
/// - `name`: human-readable label, freely editable
///
/// Item assignments are keyed by `id`, so replacing a line's name, quantity,
/// or cost wholesale (via [`EditableReceipt::update_item`]) keeps whatever
/// assignment the line already had.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptItem {
    /// Stable line identifier (UUID v4).
    pub id: String,

    /// Display name, e.g. "Margherita Pizza".
    pub name: String,

    /// Quantity on the receipt (default 1). Informational only: `cost` is
    /// already the total for this quantity, never a unit price.
    #[serde(default = "default_quantity")]
    pub quantity: i64,

    /// Total cost for the stated quantity.
    pub cost: Money,
}

fn default_quantity() -> i64 {
    1
}

impl ReceiptItem {
    /// Creates a new line item with a freshly minted id.
    ///
    /// ## Example
    /// ```rust
    /// use splitbill_core::{Money, ReceiptItem};
    ///
    /// let item = ReceiptItem::new("Pizza", 2, Money::from_pence(2000));
    /// assert_eq!(item.quantity, 2);
    /// assert_eq!(item.cost, Money::from_pence(2000));
    /// ```
    pub fn new(name: impl Into<String>, quantity: i64, cost: Money) -> Self {
        ReceiptItem {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            quantity,
            cost,
        }
    }
}

// =============================================================================
// Parse Result
// =============================================================================

/// What the receipt-parsing collaborator produced for one image.
///
/// All fields are optional: a photo of something that is not a receipt comes
/// back as `error` set and everything else absent. That is an editable
/// warning state, not a failure - the user can still build the bill by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptParseResult {
    /// Why the image could not be read as a receipt, if it couldn't.
    pub error: Option<String>,

    /// Line items, in receipt order.
    pub items: Option<Vec<ReceiptItem>>,

    /// Service charge, if the receipt shows one.
    pub service_charge: Option<Money>,

    /// Stated total, if the receipt shows one.
    pub total: Option<Money>,
}

impl ReceiptParseResult {
    /// True when the parser recognized the image as a receipt.
    pub fn is_receipt(&self) -> bool {
        self.error.is_none()
    }
}

// =============================================================================
// Receipt Calculation
// =============================================================================

/// Derived arithmetic over a receipt's items, service charge, and stated
/// total. Never stored independently: recomputed on every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptCalculation {
    /// Sum of item costs (costs are quantity-inclusive; quantity itself
    /// never enters the sum).
    pub subtotal: Money,

    /// Service charge as entered.
    pub service_charge: Money,

    /// `subtotal + service_charge`.
    pub expected_total: Money,

    /// The total the receipt actually states.
    pub actual_total: Money,

    /// `|expected_total - actual_total|`.
    pub discrepancy_amount: Money,

    /// True when the discrepancy exceeds the 1p tolerance. A first-class
    /// warning flag, not an error: callers decide whether to gate splitting
    /// on it.
    pub has_discrepancy: bool,
}

impl ReceiptCalculation {
    /// Computes the derived totals for a receipt.
    ///
    /// Pure and total: empty `items` simply yields a zero subtotal.
    ///
    /// ## Example
    /// ```rust
    /// use splitbill_core::{Money, ReceiptCalculation, ReceiptItem};
    ///
    /// let items = vec![
    ///     ReceiptItem::new("Pizza", 2, Money::from_pence(2000)),
    ///     ReceiptItem::new("Salad", 1, Money::from_pence(800)),
    /// ];
    /// let calc = ReceiptCalculation::calculate(
    ///     &items,
    ///     Money::from_pence(280),
    ///     Money::from_pence(3080),
    /// );
    /// assert_eq!(calc.subtotal, Money::from_pence(2800));
    /// assert!(!calc.has_discrepancy);
    /// ```
    pub fn calculate(items: &[ReceiptItem], service_charge: Money, actual_total: Money) -> Self {
        let subtotal: Money = items.iter().map(|item| item.cost).sum();
        let expected_total = subtotal + service_charge;
        let discrepancy_amount = (expected_total - actual_total).abs();

        ReceiptCalculation {
            subtotal,
            service_charge,
            expected_total,
            actual_total,
            discrepancy_amount,
            has_discrepancy: discrepancy_amount > DISCREPANCY_TOLERANCE,
        }
    }
}

// =============================================================================
// Editable Receipt
// =============================================================================

/// The receipt being edited, with its derived calculation kept consistent.
///
/// ## Invariant
/// `calculation` always reflects `items`, `service_charge`, and `total`.
/// Every operation replaces all of them together through [`Self::rebuild`],
/// so no observable state is ever half-updated.
///
/// "Mutations" are pure: each returns a fresh value and leaves the receiver
/// untouched, which is what makes the out-of-range no-op contract testable
/// with plain equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EditableReceipt {
    /// The parse result this receipt started from, kept for audit and for
    /// showing the original parser warning.
    pub original_result: ReceiptParseResult,

    /// Line items in receipt order.
    pub items: Vec<ReceiptItem>,

    /// Service charge (0 when the receipt had none).
    pub service_charge: Money,

    /// Stated total (0 when the receipt had none).
    pub total: Money,

    /// Derived arithmetic, always consistent with the fields above.
    pub calculation: ReceiptCalculation,
}

impl EditableReceipt {
    /// Builds an editable receipt from a parse result, defaulting absent
    /// fields. An error result (no items, no totals) becomes an empty,
    /// fully editable receipt.
    pub fn from_parse_result(result: ReceiptParseResult) -> Self {
        let items = result.items.clone().unwrap_or_default();
        let service_charge = result.service_charge.unwrap_or_default();
        let total = result.total.unwrap_or_default();
        Self::rebuild(result, items, service_charge, total)
    }

    fn rebuild(
        original_result: ReceiptParseResult,
        items: Vec<ReceiptItem>,
        service_charge: Money,
        total: Money,
    ) -> Self {
        let calculation = ReceiptCalculation::calculate(&items, service_charge, total);
        EditableReceipt {
            original_result,
            items,
            service_charge,
            total,
            calculation,
        }
    }

    /// Replaces the whole item list.
    pub fn update_items(&self, items: Vec<ReceiptItem>) -> Self {
        Self::rebuild(
            self.original_result.clone(),
            items,
            self.service_charge,
            self.total,
        )
    }

    /// Replaces the service charge.
    pub fn update_service_charge(&self, service_charge: Money) -> Self {
        Self::rebuild(
            self.original_result.clone(),
            self.items.clone(),
            service_charge,
            self.total,
        )
    }

    /// Replaces the stated total.
    pub fn update_total(&self, total: Money) -> Self {
        Self::rebuild(
            self.original_result.clone(),
            self.items.clone(),
            self.service_charge,
            total,
        )
    }

    /// Appends a line item.
    pub fn add_item(&self, item: ReceiptItem) -> Self {
        let mut items = self.items.clone();
        items.push(item);
        self.update_items(items)
    }

    /// Replaces the item at `index`. Out-of-range indices are a no-op.
    ///
    /// The existing line's id is preserved: an edit changes what the line
    /// says, not which line it is.
    pub fn update_item(&self, index: usize, item: ReceiptItem) -> Self {
        if index >= self.items.len() {
            return self.clone();
        }

        let mut items = self.items.clone();
        let mut replacement = item;
        replacement.id = items[index].id.clone();
        items[index] = replacement;
        self.update_items(items)
    }

    /// Removes the item at `index`. Out-of-range indices are a no-op.
    pub fn delete_item(&self, index: usize) -> Self {
        if index >= self.items.len() {
            return self.clone();
        }

        let mut items = self.items.clone();
        items.remove(index);
        self.update_items(items)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_parse_result() -> ReceiptParseResult {
        ReceiptParseResult {
            error: None,
            items: Some(vec![
                ReceiptItem::new("Pizza", 2, Money::from_pence(2000)),
                ReceiptItem::new("Salad", 1, Money::from_pence(850)),
            ]),
            service_charge: Some(Money::from_pence(285)),
            total: Some(Money::from_pence(3135)),
        }
    }

    #[test]
    fn calculate_sums_costs_ignoring_quantity() {
        let items = vec![
            ReceiptItem::new("Pizza", 2, Money::from_pence(2000)),
            ReceiptItem::new("Drinks", 3, Money::from_pence(900)),
        ];
        let calc =
            ReceiptCalculation::calculate(&items, Money::from_pence(0), Money::from_pence(2900));

        // Costs are quantity-inclusive: 2000 + 900, never 2*2000 + 3*900.
        assert_eq!(calc.subtotal, Money::from_pence(2900));
        assert!(!calc.has_discrepancy);
    }

    #[test]
    fn calculate_with_empty_items() {
        let calc = ReceiptCalculation::calculate(&[], Money::from_pence(0), Money::from_pence(0));
        assert_eq!(calc.subtotal, Money::zero());
        assert_eq!(calc.expected_total, Money::zero());
        assert!(!calc.has_discrepancy);
    }

    #[test]
    fn discrepancy_tolerance_is_one_penny() {
        let items = vec![ReceiptItem::new("Pizza", 1, Money::from_pence(1500))];

        // Off by exactly 1p: not flagged.
        let calc =
            ReceiptCalculation::calculate(&items, Money::from_pence(0), Money::from_pence(1501));
        assert_eq!(calc.discrepancy_amount, Money::from_pence(1));
        assert!(!calc.has_discrepancy);

        // Off by 2p: flagged.
        let calc =
            ReceiptCalculation::calculate(&items, Money::from_pence(0), Money::from_pence(1502));
        assert!(calc.has_discrepancy);
    }

    #[test]
    fn discrepancy_amount_is_absolute() {
        let items = vec![ReceiptItem::new("Pizza", 1, Money::from_pence(1500))];
        let calc =
            ReceiptCalculation::calculate(&items, Money::from_pence(150), Money::from_pence(2000));

        // Expected 16.50, actual 20.00.
        assert_eq!(calc.expected_total, Money::from_pence(1650));
        assert_eq!(calc.discrepancy_amount, Money::from_pence(350));
        assert!(calc.has_discrepancy);
    }

    #[test]
    fn from_parse_result_populates_fields() {
        let parse_result = sample_parse_result();
        let receipt = EditableReceipt::from_parse_result(parse_result.clone());

        assert_eq!(receipt.original_result, parse_result);
        assert_eq!(receipt.items.len(), 2);
        assert_eq!(receipt.items[0].name, "Pizza");
        assert_eq!(receipt.items[1].name, "Salad");
        assert_eq!(receipt.service_charge, Money::from_pence(285));
        assert_eq!(receipt.total, Money::from_pence(3135));

        assert_eq!(receipt.calculation.subtotal, Money::from_pence(2850));
        assert_eq!(receipt.calculation.expected_total, Money::from_pence(3135));
        assert!(!receipt.calculation.has_discrepancy);
    }

    #[test]
    fn from_parse_result_handles_absent_fields() {
        let parse_result = ReceiptParseResult {
            error: Some("Not a receipt".to_string()),
            items: None,
            service_charge: None,
            total: None,
        };
        let receipt = EditableReceipt::from_parse_result(parse_result);

        assert!(!receipt.original_result.is_receipt());
        assert!(receipt.items.is_empty());
        assert_eq!(receipt.service_charge, Money::zero());
        assert_eq!(receipt.total, Money::zero());
        assert_eq!(receipt.calculation.subtotal, Money::zero());
    }

    #[test]
    fn update_items_recalculates() {
        let receipt = EditableReceipt::from_parse_result(sample_parse_result());
        let new_items = vec![
            ReceiptItem::new("Burger", 1, Money::from_pence(1200)),
            ReceiptItem::new("Fries", 2, Money::from_pence(800)),
        ];

        let updated = receipt.update_items(new_items.clone());

        assert_eq!(updated.items, new_items);
        assert_eq!(updated.calculation.subtotal, Money::from_pence(2000));
        // 20.00 + 2.85 service
        assert_eq!(updated.calculation.expected_total, Money::from_pence(2285));
        // Stated total is still 31.35
        assert!(updated.calculation.has_discrepancy);
    }

    #[test]
    fn update_service_charge_recalculates() {
        let receipt = EditableReceipt::from_parse_result(sample_parse_result());

        let updated = receipt.update_service_charge(Money::from_pence(500));

        assert_eq!(updated.service_charge, Money::from_pence(500));
        assert_eq!(updated.calculation.subtotal, Money::from_pence(2850));
        assert_eq!(updated.calculation.expected_total, Money::from_pence(3350));
        assert!(updated.calculation.has_discrepancy);
    }

    #[test]
    fn update_total_recalculates_discrepancy() {
        let receipt = EditableReceipt::from_parse_result(sample_parse_result());

        let updated = receipt.update_total(Money::from_pence(3000));

        assert_eq!(updated.total, Money::from_pence(3000));
        assert_eq!(updated.calculation.expected_total, Money::from_pence(3135));
        assert!(updated.calculation.has_discrepancy);
        assert_eq!(
            updated.calculation.discrepancy_amount,
            Money::from_pence(135)
        );
    }

    #[test]
    fn fixing_total_clears_discrepancy() {
        let receipt = EditableReceipt::from_parse_result(ReceiptParseResult {
            error: None,
            items: Some(vec![ReceiptItem::new("Pizza", 1, Money::from_pence(1500))]),
            service_charge: Some(Money::from_pence(150)),
            total: Some(Money::from_pence(2000)),
        });
        assert!(receipt.calculation.has_discrepancy);

        let fixed = receipt.update_total(Money::from_pence(1650));
        assert!(!fixed.calculation.has_discrepancy);
        assert_eq!(fixed.calculation.expected_total, Money::from_pence(1650));
    }

    #[test]
    fn add_item_appends_and_recalculates() {
        let receipt = EditableReceipt::from_parse_result(sample_parse_result());

        let updated = receipt.add_item(ReceiptItem::new("Dessert", 1, Money::from_pence(650)));

        assert_eq!(updated.items.len(), 3);
        assert_eq!(updated.items[2].name, "Dessert");
        assert_eq!(updated.calculation.subtotal, Money::from_pence(3500));
        assert_eq!(updated.calculation.expected_total, Money::from_pence(3785));
    }

    #[test]
    fn update_item_replaces_in_place() {
        let receipt = EditableReceipt::from_parse_result(sample_parse_result());

        let updated =
            receipt.update_item(0, ReceiptItem::new("Large Pizza", 2, Money::from_pence(2500)));

        assert_eq!(updated.items.len(), 2);
        assert_eq!(updated.items[0].name, "Large Pizza");
        assert_eq!(updated.items[0].cost, Money::from_pence(2500));
        assert_eq!(updated.items[1].name, "Salad");
        assert_eq!(updated.calculation.subtotal, Money::from_pence(3350));
    }

    #[test]
    fn update_item_preserves_line_id() {
        let receipt = EditableReceipt::from_parse_result(sample_parse_result());
        let original_id = receipt.items[0].id.clone();

        let updated =
            receipt.update_item(0, ReceiptItem::new("Large Pizza", 2, Money::from_pence(2500)));

        assert_eq!(updated.items[0].id, original_id);
    }

    #[test]
    fn update_item_out_of_range_is_noop() {
        let receipt = EditableReceipt::from_parse_result(sample_parse_result());
        let item = ReceiptItem::new("New Item", 1, Money::from_pence(1000));

        let updated = receipt.update_item(5, item);

        assert_eq!(updated, receipt);
    }

    #[test]
    fn delete_item_removes_and_recalculates() {
        let receipt = EditableReceipt::from_parse_result(sample_parse_result());

        let updated = receipt.delete_item(0);

        assert_eq!(updated.items.len(), 1);
        assert_eq!(updated.items[0].name, "Salad");
        assert_eq!(updated.calculation.subtotal, Money::from_pence(850));
        assert_eq!(updated.calculation.expected_total, Money::from_pence(1135));
    }

    #[test]
    fn delete_item_out_of_range_is_noop() {
        let receipt = EditableReceipt::from_parse_result(sample_parse_result());

        let updated = receipt.delete_item(5);

        assert_eq!(updated, receipt);
    }

    #[test]
    fn delete_last_item() {
        let receipt = EditableReceipt::from_parse_result(sample_parse_result());

        let updated = receipt.delete_item(1);

        assert_eq!(updated.items.len(), 1);
        assert_eq!(updated.items[0].name, "Pizza");
        assert_eq!(updated.calculation.subtotal, Money::from_pence(2000));
    }

    #[test]
    fn operations_chain() {
        let receipt = EditableReceipt::from_parse_result(sample_parse_result());

        let updated = receipt
            .add_item(ReceiptItem::new("Drink", 1, Money::from_pence(300)))
            .update_service_charge(Money::from_pence(400))
            .update_total(Money::from_pence(3600))
            .delete_item(1); // Remove Salad

        assert_eq!(updated.items.len(), 2);
        assert_eq!(updated.items[0].name, "Pizza");
        assert_eq!(updated.items[1].name, "Drink");
        assert_eq!(updated.service_charge, Money::from_pence(400));
        assert_eq!(updated.total, Money::from_pence(3600));
        assert_eq!(updated.calculation.subtotal, Money::from_pence(2300));
        assert_eq!(updated.calculation.expected_total, Money::from_pence(2700));
        assert!(updated.calculation.has_discrepancy);
    }

    #[test]
    fn quantity_defaults_to_one_on_deserialize() {
        let json = r#"{"id":"abc","name":"Espresso","cost":300}"#;
        let item: ReceiptItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.quantity, 1);
    }
}
