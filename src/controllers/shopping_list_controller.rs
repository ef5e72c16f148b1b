use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::info;

use crate::error::{MunchError, Result};
use crate::models::api::{ShoppingList, ShoppingListItem};
use crate::models::{ShoppingListRecord, ShoppingListRow};
use crate::shopping::{self, ShoppingListStore};

/// Fetch the whole shopping list
/// Unchecked items come first, then alphabetical by ingredient text
pub async fn get_shopping_list(pool: &SqlitePool) -> Result<ShoppingList> {
    let rows = sqlx::query_as::<_, ShoppingListRow>(
        r#"
        SELECT sl.id, sl.ingredient, sl.recipe_id, sl.checked, r.name AS recipe_name
        FROM shopping_list sl
        LEFT JOIN recipes r ON sl.recipe_id = r.id
        ORDER BY sl.checked, sl.ingredient
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(ShoppingList::new(
        rows.into_iter().map(ShoppingListItem::from).collect(),
    ))
}

/// Add a hand-written item, optionally tied to a recipe
pub async fn add_shopping_list_item(
    pool: &SqlitePool,
    ingredient: &str,
    recipe_id: Option<i64>,
) -> Result<ShoppingListRecord> {
    if ingredient.trim().is_empty() {
        return Err(MunchError::EmptyShoppingListItem);
    }

    let id = sqlx::query("INSERT INTO shopping_list (ingredient, recipe_id) VALUES (?, ?)")
        .bind(ingredient)
        .bind(recipe_id)
        .execute(pool)
        .await?
        .last_insert_rowid();

    Ok(ShoppingListRecord {
        id,
        ingredient: ingredient.to_string(),
        recipe_id,
        checked: false,
    })
}

/// Add every ingredient of a recipe, scaled to `servings`
/// Returns the number of items added
pub async fn add_recipe_to_shopping_list(
    pool: &SqlitePool,
    recipe_id: i64,
    servings: Option<u32>,
) -> Result<usize> {
    shopping::add_recipe_to_shopping_list(pool, pool, recipe_id, servings).await
}

pub async fn set_checked(pool: &SqlitePool, item_id: i64, checked: bool) -> Result<()> {
    let result = sqlx::query("UPDATE shopping_list SET checked = ? WHERE id = ?")
        .bind(checked)
        .bind(item_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(MunchError::ShoppingListItemNotFound(item_id));
    }

    Ok(())
}

pub async fn delete_shopping_list_item(pool: &SqlitePool, item_id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM shopping_list WHERE id = ?")
        .bind(item_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(MunchError::ShoppingListItemNotFound(item_id));
    }

    Ok(())
}

/// Remove checked items, or everything when `checked_only` is false
/// Returns the number of items removed
pub async fn clear_shopping_list(pool: &SqlitePool, checked_only: bool) -> Result<u64> {
    let statement = if checked_only {
        "DELETE FROM shopping_list WHERE checked = 1"
    } else {
        "DELETE FROM shopping_list"
    };

    let removed = sqlx::query(statement).execute(pool).await?.rows_affected();
    info!(removed, checked_only, "Cleared shopping list");

    Ok(removed)
}

#[async_trait]
impl ShoppingListStore for SqlitePool {
    async fn append_entry(&self, text: &str, recipe_id: i64) -> Result<i64> {
        let id = sqlx::query("INSERT INTO shopping_list (ingredient, recipe_id) VALUES (?, ?)")
            .bind(text)
            .bind(recipe_id)
            .execute(self)
            .await?
            .last_insert_rowid();

        Ok(id)
    }
}
