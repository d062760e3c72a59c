//! # Parse Error Types
//!
//! Error types for receipt parsing.
//!
//! Note the split: a photo that turns out not to be a receipt is NOT an
//! error here. The model reports that inside [`ReceiptParseResult`] and the
//! caller shows it as an editable warning. `ParseError` is for the call
//! itself going wrong.
//!
//! [`ReceiptParseResult`]: splitbill_core::ReceiptParseResult

use thiserror::Error;

/// Receipt parsing failures.
#[derive(Debug, Error)]
pub enum ParseError {
    /// No API key configured.
    #[error("OpenAI API key not configured")]
    MissingApiKey,

    /// The HTTP request itself failed (network, TLS, timeout).
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status.
    #[error("API call failed: {status} - {body}")]
    Api { status: u16, body: String },

    /// The API responded successfully but with no message content.
    #[error("Empty response from OpenAI API")]
    EmptyResponse,

    /// The message content wasn't valid JSON for the response schema.
    #[error("Failed to parse API response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
