//! Unified error types for the crate.
//!
//! Validation and not-found failures are surfaced before any mutation takes
//! place; storage failures inside multi-entity operations roll back with the
//! enclosing database transaction. Notification-append failures never reach
//! this enum - they are logged and swallowed at the sink.

use thiserror::Error;

/// All errors the core operations can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// A monetary input was non-positive or not a finite number.
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// An input failed a structural check (same-account transfer, wrong
    /// challenge type, exhausted spins, bad config values).
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable reason the input was declined
        message: String,
    },

    /// The referenced envelope does not exist.
    #[error("Envelope not found: {id}")]
    EnvelopeNotFound {
        /// The unknown envelope id
        id: String,
    },

    /// The referenced savings goal does not exist.
    #[error("Goal not found: {id}")]
    GoalNotFound {
        /// The unknown goal id
        id: String,
    },

    /// The referenced challenge does not exist.
    #[error("Challenge not found: {id}")]
    ChallengeNotFound {
        /// The unknown challenge id
        id: String,
    },

    /// A withdrawal or transfer exceeded the available balance.
    #[error("Insufficient funds: available ${available:.2}, attempted ${attempted:.2}")]
    InsufficientFunds {
        /// Balance currently available in the source envelope
        available: f64,
        /// Amount the caller tried to move
        attempted: f64,
    },

    /// A contribution, spin, or completion targeted a challenge that is no
    /// longer active.
    #[error("Challenge {id} is not active (status: {status})")]
    ChallengeNotActive {
        /// The challenge id
        id: String,
        /// Its current terminal status
        status: String,
    },

    /// The persistence layer rejected an operation.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },

    /// I/O error from the surrounding shell.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
