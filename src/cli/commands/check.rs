//! Check command handler

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_check(config: &Config) -> anyhow::Result<()> {
    let store = Store::connect(&config.database).await?;
    store.ping().await?;

    println!("Database OK: {}", config.database.url);
    println!("{:-<40}", "");

    for (table, count) in store.table_counts().await? {
        println!("{table:<24} {count:>12}");
    }

    Ok(())
}
