//! Core business logic - framework-agnostic operations over an injected
//! database connection.
//!
//! Every operation validates its inputs, mutates entities (multi-entity
//! mutations run inside a database transaction), appends a notification, and
//! returns the updated model(s) to the caller. Nothing in this layer touches
//! the presentation.

use crate::errors::{Error, Result};

/// Challenge creation, contributions, roulette spins, and completion
pub mod challenge;
/// Envelope ledger operations - add, withdraw, transfer
pub mod envelope;
/// Standalone savings-goal operations
pub mod goal;
/// Append-only notification sink for domain events
pub mod notification;
/// Read-only derivations: progress, stats, display formatting
pub mod report;
/// Idempotent first-run seeding of envelopes and goals
pub mod seed;

/// Rejects amounts that are not positive finite numbers.
///
/// Every money input in the system goes through this check before any
/// mutation is attempted.
pub(crate) fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}
