//! Property-based tests for journal invariants
//!
//! These tests use proptest to verify the critical invariants:
//! - Balance: Σ(debits) == Σ(credits) for every posted transaction
//! - Atomicity: a rejected posting leaves no rows behind
//! - Order preservation: entry order follows the caller's input order
//! - Normal balance: account types default to their conventional side

use journal_core::{
    AccountType, Config, EntryDraft, Error, Ledger, MemoryStore, Side, Store,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

/// Strategy for generating valid amounts (positive, 2 fraction digits)
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_00i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for generating account types
fn account_type_strategy() -> impl Strategy<Value = AccountType> {
    prop_oneof![
        Just(AccountType::Asset),
        Just(AccountType::Liability),
        Just(AccountType::Equity),
        Just(AccountType::Revenue),
        Just(AccountType::Expense),
    ]
}

/// Ledger over a store handle the test can inspect directly
fn test_ledger() -> (Ledger, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let ledger = Ledger::new(store.clone(), Config::default()).unwrap();
    (ledger, store)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: Any balanced draft set posts, and the returned transaction
    /// balances exactly
    #[test]
    fn prop_balanced_drafts_post(amounts in prop::collection::vec(amount_strategy(), 1..10)) {
        let (ledger, _) = test_ledger();
        let debit_side = ledger.create_account("Cash", AccountType::Asset).unwrap();
        let credit_side = ledger
            .create_account("Service Revenue", AccountType::Revenue)
            .unwrap();

        // One debit and one matching credit per amount
        let mut drafts = Vec::new();
        for amount in &amounts {
            drafts.push(EntryDraft::debit(debit_side.id, *amount));
            drafts.push(EntryDraft::credit(credit_side.id, *amount));
        }

        let transaction = ledger.post_transaction(drafts).unwrap();

        let (debits, credits) = ledger.balance(&transaction);
        prop_assert_eq!(debits, credits);
        prop_assert!(transaction.is_balanced());
        prop_assert_eq!(transaction.entries.len(), amounts.len() * 2);
    }

    /// Property: Entry order is 1-based and follows the input sequence
    #[test]
    fn prop_order_follows_input(amounts in prop::collection::vec(amount_strategy(), 1..10)) {
        let (ledger, _) = test_ledger();
        let debit_side = ledger.create_account("Cash", AccountType::Asset).unwrap();
        let credit_side = ledger
            .create_account("Sales Revenue", AccountType::Revenue)
            .unwrap();

        let mut drafts = Vec::new();
        for amount in &amounts {
            drafts.push(EntryDraft::debit(debit_side.id, *amount));
        }
        for amount in &amounts {
            drafts.push(EntryDraft::credit(credit_side.id, *amount));
        }

        let transaction = ledger.post_transaction(drafts).unwrap();

        for (position, entry) in transaction.entries.iter().enumerate() {
            prop_assert_eq!(entry.order as usize, position + 1);
        }
        // Debits first, exactly as supplied
        for entry in &transaction.entries[..amounts.len()] {
            prop_assert_eq!(entry.side, Side::Debit);
        }
        for entry in &transaction.entries[amounts.len()..] {
            prop_assert_eq!(entry.side, Side::Credit);
        }
    }

    /// Property: Any unbalanced draft set is rejected with both totals and
    /// persists nothing
    #[test]
    fn prop_unbalanced_rejected(
        amount in amount_strategy(),
        delta in 1i64..1_000_00i64,
    ) {
        let (ledger, store) = test_ledger();
        let debit_side = ledger.create_account("Cash", AccountType::Asset).unwrap();
        let credit_side = ledger
            .create_account("Common Stock", AccountType::Equity)
            .unwrap();

        let skewed = amount + Decimal::new(delta, 2);
        let result = ledger.post_transaction(vec![
            EntryDraft::debit(debit_side.id, skewed),
            EntryDraft::credit(credit_side.id, amount),
        ]);

        match result {
            Err(Error::Unbalanced { debits, credits }) => {
                prop_assert_eq!(debits, skewed);
                prop_assert_eq!(credits, amount);
            }
            other => prop_assert!(false, "Expected Unbalanced, got {:?}", other),
        }

        prop_assert_eq!(store.stats().unwrap().total_transactions, 0);
        prop_assert_eq!(store.stats().unwrap().total_entries, 0);
    }

    /// Property: Non-positive amounts never post
    #[test]
    fn prop_non_positive_amount_rejected(cents in 0i64..1_000_000i64) {
        let (ledger, store) = test_ledger();
        let debit_side = ledger.create_account("Cash", AccountType::Asset).unwrap();
        let credit_side = ledger
            .create_account("Common Stock", AccountType::Equity)
            .unwrap();

        let amount = Decimal::new(-cents, 2); // zero or negative
        let result = ledger.post_transaction(vec![
            EntryDraft::debit(debit_side.id, amount),
            EntryDraft::credit(credit_side.id, amount),
        ]);

        prop_assert!(matches!(result, Err(Error::Validation(_))));
        prop_assert_eq!(store.stats().unwrap().total_transactions, 0);
    }

    /// Property: The conventional normal balance is derived from the type
    #[test]
    fn prop_default_normal_balance(account_type in account_type_strategy()) {
        let (ledger, _) = test_ledger();
        let account = ledger.create_account("Some Account", account_type).unwrap();

        let expected = match account_type {
            AccountType::Asset | AccountType::Expense => Side::Debit,
            _ => Side::Credit,
        };
        prop_assert_eq!(account.normal_balance, expected);
    }

    /// Property: The balance invariant holds over any posted history
    #[test]
    fn prop_invariant_over_history(
        amounts in prop::collection::vec(amount_strategy(), 1..20),
    ) {
        let (ledger, _) = test_ledger();
        let debit_side = ledger.create_account("Cash", AccountType::Asset).unwrap();
        let credit_side = ledger
            .create_account("Service Revenue", AccountType::Revenue)
            .unwrap();

        for amount in amounts {
            ledger
                .post_transaction(vec![
                    EntryDraft::debit(debit_side.id, amount),
                    EntryDraft::credit(credit_side.id, amount),
                ])
                .unwrap();
        }

        prop_assert!(ledger.check_balance_invariant().unwrap());

        // Every stored transaction individually reports equal totals
        for transaction in ledger.transactions().unwrap() {
            let (debits, credits) = ledger.balance(&transaction);
            prop_assert_eq!(debits, credits);
        }
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use journal_core::chart::{seed_standard_chart, STANDARD_CHART};
    use uuid::Uuid;

    #[test]
    fn test_raise_cash_from_equity() {
        let (ledger, store) = test_ledger();

        let cash = ledger.create_account("Cash", AccountType::Asset).unwrap();
        let stock = ledger
            .create_account("Common Stock", AccountType::Equity)
            .unwrap();

        let transaction = ledger
            .post_transaction(vec![
                EntryDraft::debit(cash.id, dec!(25000.00)),
                EntryDraft::credit(stock.id, dec!(25000.00)),
            ])
            .unwrap();

        assert!(transaction.is_balanced());
        assert_eq!(ledger.balance(&transaction), (dec!(25000.00), dec!(25000.00)));

        // Both entries persisted, bound to the right accounts
        let stored = ledger.transaction(transaction.id).unwrap();
        assert_eq!(stored.entries.len(), 2);
        assert_eq!(stored.entries[0].account_id, cash.id);
        assert_eq!(stored.entries[0].side, Side::Debit);
        assert_eq!(stored.entries[1].account_id, stock.id);
        assert_eq!(stored.entries[1].side, Side::Credit);

        assert_eq!(store.stats().unwrap().total_entries, 2);
        assert_eq!(ledger.account_balance(cash.id).unwrap(), dec!(25000.00));
        assert_eq!(ledger.account_balance(stock.id).unwrap(), dec!(25000.00));
    }

    #[test]
    fn test_unbalanced_input_persists_nothing() {
        let (ledger, store) = test_ledger();
        let cash = ledger.create_account("Cash", AccountType::Asset).unwrap();
        let revenue = ledger
            .create_account("Service Revenue", AccountType::Revenue)
            .unwrap();

        let result = ledger.post_transaction(vec![
            EntryDraft::debit(cash.id, dec!(100.00)),
            EntryDraft::credit(revenue.id, dec!(90.00)),
        ]);

        assert!(matches!(result, Err(Error::Unbalanced { .. })));
        assert_eq!(store.stats().unwrap().total_transactions, 0);
        assert_eq!(store.stats().unwrap().total_entries, 0);
    }

    #[test]
    fn test_unknown_account_persists_nothing() {
        let (ledger, store) = test_ledger();
        let cash = ledger.create_account("Cash", AccountType::Asset).unwrap();

        let result = ledger.post_transaction(vec![
            EntryDraft::debit(cash.id, dec!(100.00)),
            EntryDraft::credit(Uuid::now_v7(), dec!(100.00)),
        ]);

        assert!(matches!(result, Err(Error::UnknownAccount(_))));
        assert_eq!(store.stats().unwrap().total_transactions, 0);
    }

    #[test]
    fn test_single_entry_rejected() {
        let (ledger, _) = test_ledger();
        let cash = ledger.create_account("Cash", AccountType::Asset).unwrap();

        let result = ledger.post_transaction(vec![EntryDraft::debit(cash.id, dec!(10.00))]);
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_default_normal_balances() {
        let (ledger, _) = test_ledger();

        let cash = ledger.create_account("Cash", AccountType::Asset).unwrap();
        assert_eq!(cash.normal_balance, Side::Debit);

        let payable = ledger
            .create_account("Accounts Payable", AccountType::Liability)
            .unwrap();
        assert_eq!(payable.normal_balance, Side::Credit);
    }

    #[test]
    fn test_seeded_chart_supports_posting() {
        let (ledger, _) = test_ledger();
        let created = seed_standard_chart(&ledger).unwrap();
        assert_eq!(created.len(), STANDARD_CHART.len());

        let supplies = ledger.account_by_name("Supplies").unwrap().expect("seeded");
        let payable = ledger
            .account_by_name("Accounts Payable")
            .unwrap()
            .expect("seeded");

        // Buy supplies on credit
        let transaction = ledger
            .post_transaction(vec![
                EntryDraft::debit(supplies.id, dec!(1350.75)).with_description("Office supplies"),
                EntryDraft::credit(payable.id, dec!(1350.75)),
            ])
            .unwrap();

        assert!(transaction.is_balanced());
        assert_eq!(ledger.account_balance(supplies.id).unwrap(), dec!(1350.75));
        assert_eq!(ledger.account_balance(payable.id).unwrap(), dec!(1350.75));

        // Re-seeding after real activity still creates nothing new
        assert!(seed_standard_chart(&ledger).unwrap().is_empty());
        assert!(ledger.check_balance_invariant().unwrap());
    }

    #[test]
    fn test_multi_leg_transaction() {
        let (ledger, _) = test_ledger();
        let cash = ledger.create_account("Cash", AccountType::Asset).unwrap();
        let equipment = ledger
            .create_account("Equipment", AccountType::Asset)
            .unwrap();
        let notes = ledger
            .create_account("Notes Payable", AccountType::Liability)
            .unwrap();

        // Equipment bought part cash, part note
        let transaction = ledger
            .post_transaction(vec![
                EntryDraft::debit(equipment.id, dec!(12000.00)),
                EntryDraft::credit(cash.id, dec!(4000.00)),
                EntryDraft::credit(notes.id, dec!(8000.00)),
            ])
            .unwrap();

        assert_eq!(transaction.entries.len(), 3);
        assert_eq!(ledger.balance(&transaction), (dec!(12000.00), dec!(12000.00)));
        assert_eq!(ledger.account_balance(cash.id).unwrap(), dec!(-4000.00));
    }
}
