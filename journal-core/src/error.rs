//! Error types for the journal

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Result type for journal operations
pub type Result<T> = std::result::Result<T, Error>;

/// Journal errors
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed input (empty name, non-positive amount, too few entries)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A posted entry referenced an account that does not exist
    #[error("Unknown account: {0}")]
    UnknownAccount(Uuid),

    /// Invariant violation: debit and credit totals differ
    #[error("Unbalanced transaction: debits {debits} != credits {credits}")]
    Unbalanced {
        /// Sum of all debit entry amounts
        debits: Decimal,
        /// Sum of all credit entry amounts
        credits: Decimal,
    },

    /// Account not found
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Transaction not found
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),

    /// Storage collaborator error, propagated unchanged
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Storage(msg)
    }
}
