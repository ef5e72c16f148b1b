use sqlx::SqlitePool;
use tracing::info;

use crate::error::{MunchError, Result};
use crate::models::FavoriteRecord;

/// Flip the favorite state of a recipe
/// Returns true when the recipe is now a favorite
pub async fn toggle_favorite(pool: &SqlitePool, recipe_id: i64) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM recipes WHERE id = ?")
        .bind(recipe_id)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_none() {
        return Err(MunchError::RecipeNotFound(recipe_id));
    }

    let removed = sqlx::query("DELETE FROM favorites WHERE recipe_id = ?")
        .bind(recipe_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let is_favorite = removed == 0;
    if is_favorite {
        sqlx::query("INSERT INTO favorites (recipe_id) VALUES (?)")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    info!(recipe_id, is_favorite, "Toggled favorite");

    Ok(is_favorite)
}

/// All favorites, most recently added first
pub async fn get_favorites(pool: &SqlitePool) -> Result<Vec<FavoriteRecord>> {
    let favorites = sqlx::query_as::<_, FavoriteRecord>(
        "SELECT id, recipe_id, added_at FROM favorites ORDER BY added_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(favorites)
}
