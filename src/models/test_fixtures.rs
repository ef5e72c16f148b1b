use rstest::*;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

/// Test fixture that creates an in-memory SQLite database with migrations applied
///
/// This fixture can be imported and used across all model and controller tests
/// to ensure consistency in test database setup.
#[fixture]
pub async fn test_db() -> SqlitePool {
    // Create an in-memory SQLite database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Insert a minimal recipe row directly, bypassing validation
pub async fn insert_recipe(pool: &SqlitePool, name: &str, servings: i64, ingredients: &[&str]) -> i64 {
    sqlx::query(
        "INSERT INTO recipes (name, cuisine, duration, servings, ingredients, instructions) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(name)
    .bind("Japanese")
    .bind(15)
    .bind(servings)
    .bind(serde_json::to_string(ingredients).expect("Failed to encode ingredients"))
    .bind(r#"["Cook it"]"#)
    .execute(pool)
    .await
    .expect("Failed to insert recipe")
    .last_insert_rowid()
}
