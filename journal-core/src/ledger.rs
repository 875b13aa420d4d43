//! Main ledger orchestration layer
//!
//! This module ties the account operations and the transaction-posting
//! protocol together on top of an injected storage collaborator.
//!
//! # Example
//!
//! ```
//! use journal_core::{AccountType, Config, EntryDraft, Ledger};
//! use rust_decimal::Decimal;
//!
//! fn main() -> journal_core::Result<()> {
//!     let ledger = Ledger::in_memory(Config::default())?;
//!
//!     let cash = ledger.create_account("Cash", AccountType::Asset)?;
//!     let stock = ledger.create_account("Common Stock", AccountType::Equity)?;
//!
//!     let amount = Decimal::new(2_500_000, 2); // 25000.00
//!     let transaction = ledger.post_transaction(vec![
//!         EntryDraft::debit(cash.id, amount),
//!         EntryDraft::credit(stock.id, amount),
//!     ])?;
//!     assert!(transaction.is_balanced());
//!
//!     Ok(())
//! }
//! ```

use crate::{
    storage::MemoryStore,
    types::{Account, AccountType, Entry, EntryDraft, Side, Transaction},
    Config, Error, Result, Store,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Ledger engine
///
/// Owns no state of its own; every read and write goes through the storage
/// collaborator handed to the constructor.
pub struct Ledger {
    /// Storage collaborator
    store: Arc<dyn Store>,

    /// Configuration
    config: Config,
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Ledger {
    /// Construct a ledger over an injected storage collaborator
    pub fn new(store: Arc<dyn Store>, config: Config) -> Result<Self> {
        let ledger = Self { store, config };

        if ledger.config.chart.seed_on_open {
            crate::chart::seed_standard_chart(&ledger)?;
        }

        Ok(ledger)
    }

    /// Construct a ledger over a fresh in-memory store
    pub fn in_memory(config: Config) -> Result<Self> {
        Self::new(Arc::new(MemoryStore::new()), config)
    }

    /// Configuration in effect
    pub fn config(&self) -> &Config {
        &self.config
    }

    // Account operations

    /// Create an account with the conventional normal balance for its type
    pub fn create_account(&self, name: impl Into<String>, account_type: AccountType) -> Result<Account> {
        self.create_account_inner(name.into(), account_type, account_type.normal_balance())
    }

    /// Create an account with an explicit normal balance
    ///
    /// Choosing the side that does not match the account type's convention
    /// is allowed but logged, so a misclassified account never slips in
    /// silently.
    pub fn create_account_with_balance(
        &self,
        name: impl Into<String>,
        account_type: AccountType,
        normal_balance: Side,
    ) -> Result<Account> {
        self.create_account_inner(name.into(), account_type, normal_balance)
    }

    fn create_account_inner(
        &self,
        name: String,
        account_type: AccountType,
        normal_balance: Side,
    ) -> Result<Account> {
        let name = self.validate_name(&name, None)?;

        if normal_balance != account_type.normal_balance() {
            tracing::warn!(
                name = %name,
                account_type = %account_type,
                normal_balance = %normal_balance,
                "Account created with non-conventional normal balance"
            );
        }

        let account = Account {
            id: Uuid::now_v7(),
            name,
            account_type,
            normal_balance,
        };

        self.store.insert_account(&account)?;

        tracing::info!(
            account_id = %account.id,
            name = %account.name,
            account_type = %account.account_type,
            "Account created"
        );

        Ok(account)
    }

    /// Correct an account's name, the one permitted mutation
    pub fn rename_account(&self, id: Uuid, new_name: impl Into<String>) -> Result<Account> {
        let mut account = self.account(id)?;

        let name = self.validate_name(&new_name.into(), Some(id))?;
        account.name = name;
        self.store.update_account(&account)?;

        tracing::info!(account_id = %id, name = %account.name, "Account renamed");

        Ok(account)
    }

    /// Delete an account
    ///
    /// Refused while any stored entry references it (referential integrity).
    pub fn delete_account(&self, id: Uuid) -> Result<()> {
        self.store.remove_account(id)
    }

    /// Get account by ID
    pub fn account(&self, id: Uuid) -> Result<Account> {
        self.store.account(id)?.ok_or(Error::AccountNotFound(id))
    }

    /// Find an account by name (trimmed, case-insensitive)
    pub fn account_by_name(&self, name: &str) -> Result<Option<Account>> {
        self.store.account_by_name(name)
    }

    /// All accounts
    pub fn accounts(&self) -> Result<Vec<Account>> {
        self.store.accounts()
    }

    fn validate_name(&self, candidate: &str, exclude: Option<Uuid>) -> Result<String> {
        let name = candidate.trim();
        if name.is_empty() {
            return Err(Error::Validation("Account name must not be empty".to_string()));
        }

        if let Some(existing) = self.store.account_by_name(name)? {
            if exclude != Some(existing.id) {
                return Err(Error::Validation(format!(
                    "Account name already in use: {}",
                    name
                )));
            }
        }

        Ok(name.to_string())
    }

    // Posting protocol

    /// Post a transaction, timestamped now
    ///
    /// Validates the candidate entries, enforces the balance invariant, and
    /// persists the transaction with all of its entries atomically. Nothing
    /// is written when any step fails.
    pub fn post_transaction(&self, drafts: Vec<EntryDraft>) -> Result<Transaction> {
        self.post_inner(drafts, Utc::now())
    }

    /// Post a transaction with a caller-supplied timestamp
    pub fn post_transaction_at(
        &self,
        drafts: Vec<EntryDraft>,
        timestamp: DateTime<Utc>,
    ) -> Result<Transaction> {
        self.post_inner(drafts, timestamp)
    }

    fn post_inner(&self, drafts: Vec<EntryDraft>, timestamp: DateTime<Utc>) -> Result<Transaction> {
        if drafts.len() < 2 {
            return Err(Error::Validation(format!(
                "A transaction needs at least 2 entries, got {}",
                drafts.len()
            )));
        }

        // Fail fast: every draft is validated before anything is written.
        for draft in &drafts {
            self.validate_draft(draft)?;
        }

        let mut debits = Decimal::ZERO;
        let mut credits = Decimal::ZERO;
        for draft in &drafts {
            match draft.side {
                Side::Debit => debits += draft.amount,
                Side::Credit => credits += draft.amount,
            }
        }

        if debits != credits {
            return Err(Error::Unbalanced { debits, credits });
        }

        let transaction_id = Uuid::now_v7();
        let entries = drafts
            .into_iter()
            .enumerate()
            .map(|(position, draft)| Entry {
                id: Uuid::now_v7(),
                transaction_id,
                account_id: draft.account_id,
                side: draft.side,
                amount: draft.amount,
                order: position as u32 + 1,
                description: draft.description,
            })
            .collect();

        let transaction = Transaction {
            id: transaction_id,
            timestamp,
            entries,
        };

        self.store.commit_atomic(&transaction)?;

        tracing::info!(
            transaction_id = %transaction.id,
            entries = transaction.entries.len(),
            debits = %debits,
            "Transaction posted"
        );

        Ok(transaction)
    }

    fn validate_draft(&self, draft: &EntryDraft) -> Result<()> {
        if draft.amount <= Decimal::ZERO {
            return Err(Error::Validation(format!(
                "Entry amount must be positive, got {}",
                draft.amount
            )));
        }

        if draft.amount.scale() > self.config.amount.scale {
            return Err(Error::Validation(format!(
                "Entry amount {} exceeds scale of {} fraction digits",
                draft.amount, self.config.amount.scale
            )));
        }

        if self.store.account(draft.account_id)?.is_none() {
            return Err(Error::UnknownAccount(draft.account_id));
        }

        Ok(())
    }

    // Read side

    /// Get transaction by ID
    pub fn transaction(&self, id: Uuid) -> Result<Transaction> {
        self.store
            .transaction(id)?
            .ok_or(Error::TransactionNotFound(id))
    }

    /// All transactions, ordered by timestamp
    pub fn transactions(&self) -> Result<Vec<Transaction>> {
        self.store.transactions()
    }

    /// Debit and credit totals of a transaction
    ///
    /// Pure computation; both values are equal for any transaction that
    /// passed posting.
    pub fn balance(&self, transaction: &Transaction) -> (Decimal, Decimal) {
        transaction.balance()
    }

    /// Running balance of one account, signed by its normal balance:
    /// entries on the normal side increase it, entries on the other side
    /// decrease it.
    pub fn account_balance(&self, account_id: Uuid) -> Result<Decimal> {
        let account = self.account(account_id)?;

        let mut balance = Decimal::ZERO;
        for entry in self.store.entries_for_account(account_id)? {
            balance += account.balance_change(entry.side, entry.amount);
        }

        Ok(balance)
    }

    /// Check the balance invariant over every stored transaction
    ///
    /// Verifies that sum of debits equals sum of credits per transaction.
    /// This is the post-condition of posting; it holds unless the store
    /// was corrupted out-of-band.
    pub fn check_balance_invariant(&self) -> Result<bool> {
        Ok(self.store.transactions()?.iter().all(Transaction::is_balanced))
    }

    /// Delete a transaction, cascade-deleting its entries
    ///
    /// The only way an entry is ever removed.
    pub fn delete_transaction(&self, id: Uuid) -> Result<()> {
        self.store.remove_transaction(id)
    }
}
