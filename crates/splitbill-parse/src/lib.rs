//! # splitbill-parse: Receipt Parsing for SplitBill
//!
//! Turns receipt photos into [`ReceiptParseResult`] values.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  JPEG bytes                                                             │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  ReceiptParser (trait) ◄── injected: OpenAiParser | MockReceiptParser  │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  wire::ParsedReceipt (decimal pounds, from the model)                  │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  ReceiptParseResult (integer pence, from splitbill-core)               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! "Not a receipt" is a successful parse carrying an error message, which
//! downstream treats as an editable warning. [`error::ParseError`] covers
//! the call itself failing.
//!
//! [`ReceiptParseResult`]: splitbill_core::ReceiptParseResult

use async_trait::async_trait;

use splitbill_core::ReceiptParseResult;

pub mod error;
pub mod mock;
pub mod openai;
pub mod wire;

pub use error::{ParseError, ParseResult};
pub use mock::MockReceiptParser;
pub use openai::OpenAiParser;

/// A source of parsed receipts.
///
/// Object safe: callers hold a `Box<dyn ReceiptParser>` so tests swap in
/// [`MockReceiptParser`] without touching the network.
#[async_trait]
pub trait ReceiptParser: Send + Sync {
    /// Parses one JPEG-encoded receipt photo.
    async fn parse_receipt(&self, image_jpeg: &[u8]) -> ParseResult<ReceiptParseResult>;
}
