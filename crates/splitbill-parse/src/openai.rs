//! # OpenAI Receipt Parser
//!
//! Sends a receipt photo to the OpenAI chat completions API and decodes the
//! structured response.
//!
//! ## Request Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /v1/chat/completions                                              │
//! │                                                                         │
//! │  model: gpt-4o-mini                                                    │
//! │  messages: [ user: [ prompt text, data:image/jpeg;base64,... ] ]       │
//! │  response_format:                                                       │
//! │    json_schema "receipt_parse_result", strict: true                    │
//! │      { error: string|null,                                             │
//! │        items: [{name, quantity, cost}] | null,                         │
//! │        service: number|null,                                           │
//! │        total: number|null }                                            │
//! │                                                                         │
//! │  Strict mode forces the model to emit exactly this shape, so decode    │
//! │  failures mean an API change, not model creativity.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::error::{ParseError, ParseResult};
use crate::wire::ParsedReceipt;
use crate::ReceiptParser;
use splitbill_core::ReceiptParseResult;

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const MAX_TOKENS: u32 = 1000;

const PROMPT: &str = "\
Analyze this image to determine if it's a UK expense receipt.

You must always return a JSON object with ALL four fields: error, items, service, total

If it is NOT a valid receipt or the image is unclear:
{\"error\": \"description of why it's not a valid receipt\", \"items\": null, \"service\": null, \"total\": null}

If it IS a valid UK receipt:
{\"error\": null, \"items\": [{\"name\": \"Pizza\", \"quantity\": 2, \"cost\": 20.00}, {\"name\": \"Espresso\", \"quantity\": 3, \"cost\": 9.00}], \"service\": 2.90, \"total\": 31.90}

Rules for parsing items:
- Look for quantity indicators like \"2x Pizza\", \"3 Espresso\", \"2 \u{d7} Item\"
- If no quantity is specified, default to 1
- The cost should be the TOTAL cost for that quantity
- Examples:
  * \"2 Pizza \u{a3}20\" -> {\"name\": \"Pizza\", \"quantity\": 2, \"cost\": 20.00}
  * \"Espresso \u{a3}3\" -> {\"name\": \"Espresso\", \"quantity\": 1, \"cost\": 3.00}
  * \"3x Coffee \u{a3}9\" -> {\"name\": \"Coffee\", \"quantity\": 3, \"cost\": 9.00}

General rules:
- Always include all four fields (error, items, service, total)
- Use null for fields that don't apply
- Use British pound values as numbers (e.g., 12.50 not \"\u{a3}12.50\")
- If no service charge, set service to null";

// =============================================================================
// Parser
// =============================================================================

/// Receipt parser backed by the OpenAI vision API.
#[derive(Debug, Clone)]
pub struct OpenAiParser {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAiParser {
    /// Creates a parser with the default model and endpoint.
    ///
    /// The key is checked at call time, not here, so a parser built from a
    /// missing config value still constructs and fails with
    /// [`ParseError::MissingApiKey`] on first use.
    pub fn new(api_key: impl Into<String>) -> Self {
        OpenAiParser {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Overrides the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the endpoint URL (for proxies and tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Builds the chat completions request body for one image.
    fn build_request_body(&self, image_jpeg: &[u8]) -> serde_json::Value {
        let data_url = format!("data:image/jpeg;base64,{}", BASE64.encode(image_jpeg));

        json!({
            "model": self.model,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": PROMPT },
                    { "type": "image_url", "image_url": { "url": data_url } }
                ]
            }],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "receipt_parse_result",
                    "strict": true,
                    "schema": response_schema()
                }
            },
            "max_tokens": MAX_TOKENS
        })
    }
}

/// The strict JSON schema the model must answer with.
///
/// All four fields are required; absence is expressed with null, never by
/// leaving a field out.
fn response_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "error": {
                "type": ["string", "null"],
                "description": "Error message if the image is invalid or not a receipt"
            },
            "items": {
                "type": ["array", "null"],
                "description": "List of items found on the receipt",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string", "description": "Name of the item" },
                        "quantity": {
                            "type": "integer",
                            "description": "Quantity of the item (default 1 if not specified)"
                        },
                        "cost": {
                            "type": "number",
                            "description": "Total cost for this quantity of the item"
                        }
                    },
                    "required": ["name", "quantity", "cost"],
                    "additionalProperties": false
                }
            },
            "service": {
                "type": ["number", "null"],
                "description": "Service charge if present"
            },
            "total": {
                "type": ["number", "null"],
                "description": "Total amount on the receipt"
            }
        },
        "required": ["error", "items", "service", "total"],
        "additionalProperties": false
    })
}

// =============================================================================
// Response Decoding
// =============================================================================

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Decodes the message content (itself a JSON document) into the domain
/// parse result.
fn decode_content(content: &str) -> ParseResult<ReceiptParseResult> {
    let parsed: ParsedReceipt = serde_json::from_str(content)?;
    Ok(ReceiptParseResult::from(parsed))
}

#[async_trait]
impl ReceiptParser for OpenAiParser {
    async fn parse_receipt(&self, image_jpeg: &[u8]) -> ParseResult<ReceiptParseResult> {
        if self.api_key.trim().is_empty() {
            return Err(ParseError::MissingApiKey);
        }

        debug!(bytes = image_jpeg.len(), model = %self.model, "Sending receipt image");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.build_request_body(image_jpeg))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ParseError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = response.json().await?;
        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(ParseError::EmptyResponse)?;

        let result = decode_content(&content)?;
        info!(
            is_receipt = result.is_receipt(),
            items = result.items.as_ref().map_or(0, Vec::len),
            "Receipt parsed"
        );
        Ok(result)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
