//! Inspect command handler

use anyhow::Context;

use crate::cli::Operation;
use crate::config::Config;
use crate::db::{Store, measure};

pub async fn cmd_inspect(
    config: &Config,
    operation: Operation,
    id: Option<i32>,
    types: &[String],
    limit: Option<u64>,
) -> anyhow::Result<()> {
    let id = if operation.needs_id() {
        id.with_context(|| format!("{operation:?} requires an ID"))?
    } else {
        0
    };

    let store = Store::connect(&config.database).await?;

    let (rows, statements) = measure(run_operation(&store, operation, id, types, limit)).await;
    let rows = rows?;

    println!("{operation:?}: {rows} row(s), {statements} statement(s)");
    Ok(())
}

async fn run_operation(
    store: &Store,
    operation: Operation,
    id: i32,
    types: &[String],
    limit: Option<u64>,
) -> anyhow::Result<usize> {
    let rows = match operation {
        Operation::DefensesByFine => store.get_defenses_by_fine(id).await?.len(),
        Operation::FinesWithDefenses => store.get_fines_with_defenses(id).await?.len(),
        Operation::DefensesByUser => store.get_defenses_by_user(id).await?.len(),
        Operation::DefenseWithFine => {
            usize::from(store.get_defense_with_fine(id).await?.is_some())
        }
        Operation::FineWithUser => usize::from(store.get_fine_with_user(id).await?.is_some()),
        Operation::AnalyticsEvents => {
            if types.is_empty() {
                anyhow::bail!("analytics-events requires --types");
            }
            store.get_analytics_events(types, limit).await?.len()
        }
        Operation::Documents => {
            let filter = (!types.is_empty()).then_some(types);
            store.get_legal_documents(filter).await?.len()
        }
        Operation::Subscriptions => store.get_subscriptions_by_user(id).await?.len(),
        Operation::Payments => store.get_payments_by_user(id).await?.len(),
    };

    Ok(rows)
}
