//! Core types for the journal
//!
//! All types are designed for:
//! - Exact arithmetic (Decimal for money, never binary floating point)
//! - Explicit ownership (entries reference accounts and transactions by id)
//! - Memory safety (no unsafe code)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Side of a journal entry
///
/// Every entry is either a debit (left column of the T-account) or a
/// credit (right column). No other value exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Left side
    Debit,
    /// Right side
    Credit,
}

impl Side {
    /// Conventional short code ("Dr" / "Cr")
    pub fn code(&self) -> &'static str {
        match self {
            Side::Debit => "Dr",
            Side::Credit => "Cr",
        }
    }

    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Dr" | "DR" | "DEBIT" | "Debit" | "debit" => Some(Side::Debit),
            "Cr" | "CR" | "CREDIT" | "Credit" | "credit" => Some(Side::Credit),
            _ => None,
        }
    }

    /// The other side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Debit => Side::Credit,
            Side::Credit => Side::Debit,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Account classification
///
/// The five fundamental account types of double-entry bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    /// Resources owned (cash, receivables, equipment)
    Asset,
    /// Obligations owed (payables, notes)
    Liability,
    /// Owners' claims (stock, retained earnings)
    Equity,
    /// Income earned
    Revenue,
    /// Costs incurred
    Expense,
}

impl AccountType {
    /// All recognized account types
    pub const ALL: [AccountType; 5] = [
        AccountType::Asset,
        AccountType::Liability,
        AccountType::Equity,
        AccountType::Revenue,
        AccountType::Expense,
    ];

    /// Canonical code
    pub fn code(&self) -> &'static str {
        match self {
            AccountType::Asset => "ASSET",
            AccountType::Liability => "LIABILITY",
            AccountType::Equity => "EQUITY",
            AccountType::Revenue => "REVENUE",
            AccountType::Expense => "EXPENSE",
        }
    }

    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ASSET" => Some(AccountType::Asset),
            "LIABILITY" => Some(AccountType::Liability),
            "EQUITY" => Some(AccountType::Equity),
            "REVENUE" => Some(AccountType::Revenue),
            "EXPENSE" => Some(AccountType::Expense),
            _ => None,
        }
    }

    /// The side on which increases to this account type are conventionally
    /// recorded: assets and expenses carry a debit normal balance, the rest
    /// carry credit.
    pub fn normal_balance(&self) -> Side {
        match self {
            AccountType::Asset | AccountType::Expense => Side::Debit,
            AccountType::Liability | AccountType::Equity | AccountType::Revenue => Side::Credit,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Named ledger bucket accumulating entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account ID (UUIDv7 for time-ordering)
    pub id: Uuid,

    /// Account name, unique within the ledger
    pub name: String,

    /// Classification
    pub account_type: AccountType,

    /// Side on which increases are recorded
    pub normal_balance: Side,
}

impl Account {
    /// Whether increases to this account are recorded as debits
    pub fn is_debit_normal(&self) -> bool {
        self.normal_balance == Side::Debit
    }

    /// Signed balance contribution of an entry against this account:
    /// positive on the normal side, negative on the other.
    pub fn balance_change(&self, side: Side, amount: Decimal) -> Decimal {
        if side == self.normal_balance {
            amount
        } else {
            -amount
        }
    }
}

/// One debit or credit line within a transaction
///
/// Entries are created only by posting a transaction and removed only when
/// their owning transaction is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique entry ID
    pub id: Uuid,

    /// Owning transaction
    pub transaction_id: Uuid,

    /// Affected account
    pub account_id: Uuid,

    /// Debit or credit
    pub side: Side,

    /// Entry amount, strictly positive
    pub amount: Decimal,

    /// 1-based position within the transaction, used for display ordering
    pub order: u32,

    /// Optional free-text description
    pub description: Option<String>,
}

/// Candidate entry supplied to the posting operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDraft {
    /// Affected account
    pub account_id: Uuid,

    /// Debit or credit
    pub side: Side,

    /// Entry amount, strictly positive
    pub amount: Decimal,

    /// Optional free-text description
    pub description: Option<String>,
}

impl EntryDraft {
    /// Debit draft against an account
    pub fn debit(account_id: Uuid, amount: Decimal) -> Self {
        Self {
            account_id,
            side: Side::Debit,
            amount,
            description: None,
        }
    }

    /// Credit draft against an account
    pub fn credit(account_id: Uuid, amount: Decimal) -> Self {
        Self {
            account_id,
            side: Side::Credit,
            amount,
            description: None,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Balanced set of entries representing one economic event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction ID (UUIDv7 for time-ordering)
    pub id: Uuid,

    /// Posting timestamp
    pub timestamp: DateTime<Utc>,

    /// Entries in display order (insertion order == `order` field order)
    pub entries: Vec<Entry>,
}

impl Transaction {
    /// Sum of all debit entry amounts (exact)
    pub fn debit_total(&self) -> Decimal {
        self.entries
            .iter()
            .filter(|e| e.side == Side::Debit)
            .map(|e| e.amount)
            .sum()
    }

    /// Sum of all credit entry amounts (exact)
    pub fn credit_total(&self) -> Decimal {
        self.entries
            .iter()
            .filter(|e| e.side == Side::Credit)
            .map(|e| e.amount)
            .sum()
    }

    /// Both totals as a `(debits, credits)` pair
    pub fn balance(&self) -> (Decimal, Decimal) {
        (self.debit_total(), self.credit_total())
    }

    /// Whether the balance invariant holds
    pub fn is_balanced(&self) -> bool {
        self.debit_total() == self.credit_total()
    }
}
