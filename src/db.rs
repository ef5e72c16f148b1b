use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::config::Config;
use crate::error::Result;

/// Open the catalog database, creating it and applying migrations as needed
pub async fn connect(config: &Config) -> Result<SqlitePool> {
    let database_url = config.database_url.as_str();

    // Create database if it doesn't exist
    if !sqlx::Sqlite::database_exists(database_url).await? {
        info!("Creating database {database_url}");
        sqlx::Sqlite::create_database(database_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(database_url)
        .await?;

    info!("Running migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
