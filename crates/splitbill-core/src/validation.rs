//! # Validation Module
//!
//! Input validation utilities for SplitBill.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Core factories (Rust)                                        │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: called by Participant::new / BillEvent::new          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  └── NOT NULL constraints on persisted events                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use splitbill_core::validation::validate_participant_name;
//!
//! validate_participant_name("Alice").unwrap();
//! assert!(validate_participant_name("   ").is_err());
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::MAX_NAME_LENGTH;

/// Validates a participant name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
///
/// Duplicate names are allowed: participant identity is by id, never by name.
///
/// ## Example
/// ```rust
/// use splitbill_core::validation::validate_participant_name;
///
/// assert!(validate_participant_name("Alice").is_ok());
/// assert!(validate_participant_name("   ").is_err());
/// ```
pub fn validate_participant_name(name: &str) -> ValidationResult<()> {
    validate_name("participant name", name)
}

/// Validates a saved bill event name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
pub fn validate_event_name(name: &str) -> ValidationResult<()> {
    validate_name("event name", name)
}

fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
