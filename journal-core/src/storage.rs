//! Storage collaborator for the journal
//!
//! The engine never talks to a backend directly; it consumes the [`Store`]
//! trait. The contract every implementation must honor:
//!
//! - `commit_atomic` makes a transaction and all of its entries visible
//!   together, or not at all
//! - readers never observe a partially written transaction
//! - an account still referenced by stored entries cannot be removed
//!
//! [`MemoryStore`] is the in-process implementation used by tests and the
//! demo binary.

use crate::{
    error::{Error, Result},
    types::{Account, Entry, Transaction},
};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

/// Storage abstraction consumed by the ledger engine
pub trait Store: Send + Sync {
    /// Insert a new account; fails if the id is already present
    fn insert_account(&self, account: &Account) -> Result<()>;

    /// Replace a stored account (name correction)
    fn update_account(&self, account: &Account) -> Result<()>;

    /// Remove an account; must refuse while any stored entry references it
    fn remove_account(&self, id: Uuid) -> Result<()>;

    /// Get account by ID
    fn account(&self, id: Uuid) -> Result<Option<Account>>;

    /// Find an account by name (trimmed, case-insensitive)
    fn account_by_name(&self, name: &str) -> Result<Option<Account>>;

    /// All accounts, ordered by creation
    fn accounts(&self) -> Result<Vec<Account>>;

    /// Get transaction by ID
    fn transaction(&self, id: Uuid) -> Result<Option<Transaction>>;

    /// All transactions, ordered by timestamp
    fn transactions(&self) -> Result<Vec<Transaction>>;

    /// Remove a transaction and cascade-remove its entries
    fn remove_transaction(&self, id: Uuid) -> Result<()>;

    /// Entries affecting one account, ordered by transaction timestamp
    /// then entry order
    fn entries_for_account(&self, account_id: Uuid) -> Result<Vec<Entry>>;

    /// Persist a transaction and all of its entries as one atomic unit
    fn commit_atomic(&self, transaction: &Transaction) -> Result<()>;

    /// Storage statistics
    fn stats(&self) -> Result<StoreStats>;
}

/// Storage statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    /// Number of stored accounts
    pub total_accounts: u64,
    /// Number of stored transactions
    pub total_transactions: u64,
    /// Number of stored entries across all transactions
    pub total_entries: u64,
}

#[derive(Debug, Default)]
struct State {
    accounts: HashMap<Uuid, Account>,
    transactions: HashMap<Uuid, Transaction>,
}

impl State {
    fn references(&self, account_id: Uuid) -> usize {
        self.transactions
            .values()
            .flat_map(|t| t.entries.iter())
            .filter(|e| e.account_id == account_id)
            .count()
    }
}

/// In-memory storage backend
///
/// All state lives behind a single `RwLock`, so every write is one critical
/// section and the atomicity contract holds trivially.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn insert_account(&self, account: &Account) -> Result<()> {
        let mut state = self.state.write();

        if state.accounts.contains_key(&account.id) {
            return Err(Error::Storage(format!(
                "Account id already present: {}",
                account.id
            )));
        }
        state.accounts.insert(account.id, account.clone());

        tracing::debug!(account_id = %account.id, name = %account.name, "Account stored");

        Ok(())
    }

    fn update_account(&self, account: &Account) -> Result<()> {
        let mut state = self.state.write();

        if !state.accounts.contains_key(&account.id) {
            return Err(Error::AccountNotFound(account.id));
        }
        state.accounts.insert(account.id, account.clone());

        Ok(())
    }

    fn remove_account(&self, id: Uuid) -> Result<()> {
        let mut state = self.state.write();

        if !state.accounts.contains_key(&id) {
            return Err(Error::AccountNotFound(id));
        }

        let references = state.references(id);
        if references > 0 {
            return Err(Error::Validation(format!(
                "Account is referenced by {} entries",
                references
            )));
        }

        state.accounts.remove(&id);

        tracing::debug!(account_id = %id, "Account removed");

        Ok(())
    }

    fn account(&self, id: Uuid) -> Result<Option<Account>> {
        Ok(self.state.read().accounts.get(&id).cloned())
    }

    fn account_by_name(&self, name: &str) -> Result<Option<Account>> {
        let needle = name.trim();
        Ok(self
            .state
            .read()
            .accounts
            .values()
            .find(|a| a.name.trim().eq_ignore_ascii_case(needle))
            .cloned())
    }

    fn accounts(&self) -> Result<Vec<Account>> {
        let mut accounts: Vec<Account> = self.state.read().accounts.values().cloned().collect();
        // UUIDv7 ids sort by creation time
        accounts.sort_by_key(|a| a.id);
        Ok(accounts)
    }

    fn transaction(&self, id: Uuid) -> Result<Option<Transaction>> {
        Ok(self.state.read().transactions.get(&id).cloned())
    }

    fn transactions(&self) -> Result<Vec<Transaction>> {
        let mut transactions: Vec<Transaction> =
            self.state.read().transactions.values().cloned().collect();
        transactions.sort_by_key(|t| (t.timestamp, t.id));
        Ok(transactions)
    }

    fn remove_transaction(&self, id: Uuid) -> Result<()> {
        let mut state = self.state.write();

        if state.transactions.remove(&id).is_none() {
            return Err(Error::TransactionNotFound(id));
        }

        tracing::debug!(transaction_id = %id, "Transaction removed");

        Ok(())
    }

    fn entries_for_account(&self, account_id: Uuid) -> Result<Vec<Entry>> {
        let state = self.state.read();

        let mut keyed: Vec<_> = state
            .transactions
            .values()
            .flat_map(|t| {
                t.entries
                    .iter()
                    .filter(|e| e.account_id == account_id)
                    .map(|e| (t.timestamp, e.order, e.clone()))
            })
            .collect();
        keyed.sort_by_key(|(timestamp, order, _)| (*timestamp, *order));

        Ok(keyed.into_iter().map(|(_, _, e)| e).collect())
    }

    fn commit_atomic(&self, transaction: &Transaction) -> Result<()> {
        let mut state = self.state.write();

        if state.transactions.contains_key(&transaction.id) {
            return Err(Error::Storage(format!(
                "Transaction id already present: {}",
                transaction.id
            )));
        }

        // Referential integrity holds inside the critical section even if a
        // delete_account raced the engine's earlier validation.
        for entry in &transaction.entries {
            if !state.accounts.contains_key(&entry.account_id) {
                return Err(Error::Storage(format!(
                    "Entry references missing account: {}",
                    entry.account_id
                )));
            }
        }

        state.transactions.insert(transaction.id, transaction.clone());

        tracing::debug!(
            transaction_id = %transaction.id,
            entries = transaction.entries.len(),
            "Transaction committed"
        );

        Ok(())
    }

    fn stats(&self) -> Result<StoreStats> {
        let state = self.state.read();

        let total_entries = state
            .transactions
            .values()
            .map(|t| t.entries.len() as u64)
            .sum();

        Ok(StoreStats {
            total_accounts: state.accounts.len() as u64,
            total_transactions: state.transactions.len() as u64,
            total_entries,
        })
    }
}
