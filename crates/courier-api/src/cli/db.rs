//! `courier init-db`: create the database file and apply migrations.

use courier_types::config::ServiceConfig;

use crate::state::open_database;

/// Open the configured database (running migrations) and close it again.
/// Safe to run against an existing database.
pub async fn init_db(config: &ServiceConfig) -> anyhow::Result<()> {
    let pool = open_database(config).await?;
    pool.close().await;

    println!("Database ready at {}", config.database_path);
    Ok(())
}
