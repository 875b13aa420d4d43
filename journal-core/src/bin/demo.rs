//! Journal demo binary
//!
//! Seeds the standard chart and posts the classic opening transaction:
//! cash raised from issuing common stock.

use anyhow::Context;
use journal_core::{Config, EntryDraft, Ledger};
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting journal demo");

    let mut config = Config::from_env()?;
    config.chart.seed_on_open = true;

    let ledger = Ledger::in_memory(config)?;

    let cash = ledger
        .account_by_name("Cash")?
        .context("Cash missing from seeded chart")?;
    let stock = ledger
        .account_by_name("Common Stock")?
        .context("Common Stock missing from seeded chart")?;

    let amount = Decimal::new(2_500_000, 2); // 25000.00
    let transaction = ledger.post_transaction(vec![
        EntryDraft::debit(cash.id, amount).with_description("Cash received from stock issue"),
        EntryDraft::credit(stock.id, amount).with_description("Common stock issued"),
    ])?;

    println!("Posted transaction {} at {}", transaction.id, transaction.timestamp);
    for entry in &transaction.entries {
        let account = ledger.account(entry.account_id)?;
        println!(
            "  {:>2}. {} {:<20} {}",
            entry.order,
            entry.side,
            account.name,
            entry.amount
        );
    }

    let (debits, credits) = ledger.balance(&transaction);
    println!("Balance: {} Dr / {} Cr", debits, credits);
    println!("{}", serde_json::to_string_pretty(&transaction)?);

    println!("Cash balance:         {}", ledger.account_balance(cash.id)?);
    println!("Common Stock balance: {}", ledger.account_balance(stock.id)?);

    tracing::info!(
        balanced = ledger.check_balance_invariant()?,
        "Journal demo complete"
    );

    Ok(())
}
