//! Standard chart-of-accounts seeder

use crate::{
    types::{Account, AccountType},
    Ledger, Result,
};

/// The standard account catalog
pub const STANDARD_CHART: &[(&str, AccountType)] = &[
    ("Cash", AccountType::Asset),
    ("Accounts Receivable", AccountType::Asset),
    ("Supplies", AccountType::Asset),
    ("Land", AccountType::Asset),
    ("Equipment", AccountType::Asset),
    ("Notes Payable", AccountType::Liability),
    ("Accounts Payable", AccountType::Liability),
    ("Salaries Payable", AccountType::Liability),
    ("Interest Payable", AccountType::Liability),
    ("Taxes Payable", AccountType::Liability),
    ("Common Stock", AccountType::Equity),
    ("Retained Earnings", AccountType::Equity),
    ("Service Revenue", AccountType::Revenue),
    ("Sales Revenue", AccountType::Revenue),
    ("Salaries Expense", AccountType::Expense),
    ("Rent Expense", AccountType::Expense),
    ("Utilities Expense", AccountType::Expense),
];

/// Seed the standard chart of accounts
///
/// Idempotent: catalog names that already exist are skipped, so re-seeding
/// an opened ledger creates no duplicates. Returns only the accounts this
/// call created, each with the conventional normal balance for its type.
pub fn seed_standard_chart(ledger: &Ledger) -> Result<Vec<Account>> {
    let mut created = Vec::new();

    for &(name, account_type) in STANDARD_CHART {
        if ledger.account_by_name(name)?.is_some() {
            tracing::debug!(name, "Chart account already present, skipping");
            continue;
        }
        created.push(ledger.create_account(name, account_type)?);
    }

    tracing::info!(created = created.len(), "Standard chart seeded");

    Ok(created)
}
