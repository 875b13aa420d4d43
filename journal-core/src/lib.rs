//! Journal Core
//!
//! Double-entry bookkeeping ledger: accounts, balanced transactions, and
//! the posting engine that keeps the books internally consistent.
//!
//! # Architecture
//!
//! - **Explicit ownership**: entries carry account and transaction ids;
//!   object graphs are resolved by query, never by hidden references
//! - **Injected storage**: the engine works against the [`Store`] trait,
//!   constructed explicitly with its collaborator (no process-wide state)
//! - **Exact arithmetic**: Decimal for money, never binary floating point
//!
//! # Invariants
//!
//! - Balance: Σ(debits) == Σ(credits) for every posted transaction
//! - Atomic posting: a transaction and its entries land together or not at all
//! - Write-once: transactions and entries are immutable after posting

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod chart;
pub mod config;
pub mod error;
pub mod ledger;
pub mod storage;
pub mod types;

// Re-exports
pub use config::Config;
pub use error::{Error, Result};
pub use ledger::Ledger;
pub use storage::{MemoryStore, Store, StoreStats};
pub use types::{Account, AccountType, Entry, EntryDraft, Side, Transaction};
