//! # Wire Format
//!
//! The JSON shapes exchanged with the vision model, and their conversion
//! into domain types.
//!
//! ## Boundary Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   Model output            THIS MODULE             Everything else      │
//! │                                                                         │
//! │   "cost": 20.00   ──►   pounds_to_money   ──►   Money(2000)            │
//! │        f64                 (round to pence)        integer pence        │
//! │                                                                         │
//! │   Decimal pounds exist ONLY on the wire. The conversion happens once,  │
//! │   here, and the rest of the system never sees a float.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Deserialize;

use splitbill_core::{Money, ReceiptItem, ReceiptParseResult};

/// A receipt as the model reports it: decimal pounds, all fields nullable.
#[derive(Debug, Clone, Deserialize)]
pub struct ParsedReceipt {
    pub error: Option<String>,
    pub items: Option<Vec<ParsedItem>>,

    /// Service charge in pounds, e.g. `2.90`.
    pub service: Option<f64>,

    /// Stated total in pounds.
    pub total: Option<f64>,
}

/// One line item as the model reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct ParsedItem {
    pub name: String,

    /// Defaults to 1 when the model omits it despite the schema.
    #[serde(default = "default_quantity")]
    pub quantity: i64,

    /// Total cost for the stated quantity, in pounds.
    pub cost: f64,
}

fn default_quantity() -> i64 {
    1
}

/// Converts a decimal pounds value to integer pence, rounding half away
/// from zero. `20.0` → 2000p, `8.745` → 875p.
pub fn pounds_to_money(pounds: f64) -> Money {
    Money::from_pence((pounds * 100.0).round() as i64)
}

impl From<ParsedReceipt> for ReceiptParseResult {
    /// Lands the wire receipt in the domain: pounds become pence and every
    /// line gets its stable id minted here, at the boundary.
    fn from(parsed: ParsedReceipt) -> Self {
        ReceiptParseResult {
            error: parsed.error,
            items: parsed.items.map(|items| {
                items
                    .into_iter()
                    .map(|item| {
                        ReceiptItem::new(item.name, item.quantity, pounds_to_money(item.cost))
                    })
                    .collect()
            }),
            service_charge: parsed.service.map(pounds_to_money),
            total: parsed.total.map(pounds_to_money),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pounds_to_money_rounds_to_nearest_penny() {
        assert_eq!(pounds_to_money(20.0), Money::from_pence(2000));
        assert_eq!(pounds_to_money(8.75), Money::from_pence(875));
        // Float representation noise must not drop a penny.
        assert_eq!(pounds_to_money(0.1 + 0.2), Money::from_pence(30));
        assert_eq!(pounds_to_money(46.86), Money::from_pence(4686));
    }

    #[test]
    fn decode_successful_parse() {
        let json = r#"{
            "error": null,
            "items": [
                {"name": "Pizza", "quantity": 2, "cost": 20.00},
                {"name": "Espresso", "quantity": 3, "cost": 9.00}
            ],
            "service": 2.90,
            "total": 31.90
        }"#;

        let parsed: ParsedReceipt = serde_json::from_str(json).unwrap();
        let result = ReceiptParseResult::from(parsed);

        assert!(result.is_receipt());
        let items = result.items.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Pizza");
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].cost, Money::from_pence(2000));
        assert_eq!(result.service_charge, Some(Money::from_pence(290)));
        assert_eq!(result.total, Some(Money::from_pence(3190)));
    }

    #[test]
    fn decode_not_a_receipt() {
        let json = r#"{
            "error": "Image is a photo of a cat",
            "items": null,
            "service": null,
            "total": null
        }"#;

        let parsed: ParsedReceipt = serde_json::from_str(json).unwrap();
        let result = ReceiptParseResult::from(parsed);

        assert!(!result.is_receipt());
        assert!(result.items.is_none());
        assert!(result.service_charge.is_none());
    }

    #[test]
    fn missing_quantity_defaults_to_one() {
        let json = r#"{"name": "Espresso", "cost": 3.00}"#;
        let item: ParsedItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn converted_items_get_distinct_ids() {
        let parsed = ParsedReceipt {
            error: None,
            items: Some(vec![
                ParsedItem {
                    name: "Tea".into(),
                    quantity: 1,
                    cost: 1.80,
                },
                ParsedItem {
                    name: "Tea".into(),
                    quantity: 1,
                    cost: 1.80,
                },
            ]),
            service: None,
            total: None,
        };

        let result = ReceiptParseResult::from(parsed);
        let items = result.items.unwrap();
        assert_ne!(items[0].id, items[1].id);
    }
}
