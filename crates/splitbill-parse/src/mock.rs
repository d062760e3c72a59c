//! # Mock Parser
//!
//! A canned [`ReceiptParser`] for demos and tests: no network, no API key,
//! deterministic output.

use async_trait::async_trait;

use crate::error::ParseResult;
use crate::ReceiptParser;
use splitbill_core::{Money, ReceiptItem, ReceiptParseResult};

/// Receipt parser that returns a fixed result.
#[derive(Debug, Clone)]
pub struct MockReceiptParser {
    result: ReceiptParseResult,
}

impl MockReceiptParser {
    /// A parser that always returns the given result.
    pub fn returning(result: ReceiptParseResult) -> Self {
        MockReceiptParser { result }
    }

    /// A parser that always fails to recognize a receipt.
    pub fn not_a_receipt(reason: impl Into<String>) -> Self {
        MockReceiptParser {
            result: ReceiptParseResult {
                error: Some(reason.into()),
                ..ReceiptParseResult::default()
            },
        }
    }
}

/// The default mock: a small chip-shop receipt.
impl Default for MockReceiptParser {
    fn default() -> Self {
        MockReceiptParser {
            result: ReceiptParseResult {
                error: None,
                items: Some(vec![
                    ReceiptItem::new("Fish & Chips", 2, Money::from_pence(1790)),
                    ReceiptItem::new("Mushy Peas", 1, Money::from_pence(250)),
                    ReceiptItem::new("Tea", 2, Money::from_pence(360)),
                ]),
                service_charge: Some(Money::from_pence(240)),
                total: Some(Money::from_pence(2640)),
            },
        }
    }
}

#[async_trait]
impl ReceiptParser for MockReceiptParser {
    async fn parse_receipt(&self, _image_jpeg: &[u8]) -> ParseResult<ReceiptParseResult> {
        Ok(self.result.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
