use sqlx::prelude::FromRow;

/// One row of the `shopping_list` table
#[derive(Debug, Clone, FromRow)]
pub struct ShoppingListRecord {
    pub id: i64,
    pub ingredient: String,
    pub recipe_id: Option<i64>,
    pub checked: bool,
}

/// A shopping list row joined with the name of the recipe it came from
#[derive(Debug, Clone, FromRow)]
pub struct ShoppingListRow {
    pub id: i64,
    pub ingredient: String,
    pub recipe_id: Option<i64>,
    pub checked: bool,
    pub recipe_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_fixtures::{insert_recipe, test_db};
    use rstest::*;
    use sqlx::SqlitePool;

    #[rstest]
    #[tokio::test]
    async fn test_shopping_list_model_compatibility_with_recipe(#[future] test_db: SqlitePool) {
        let pool = test_db.await;
        let recipe_id = insert_recipe(&pool, "Miso Soup", 2, &["750ml water"]).await;

        sqlx::query("INSERT INTO shopping_list (ingredient, recipe_id) VALUES (?, ?)")
            .bind("750ml water (Miso Soup)")
            .bind(recipe_id)
            .execute(&pool)
            .await
            .expect("Failed to insert shopping list row");

        let row = sqlx::query_as::<_, ShoppingListRow>(
            r#"
            SELECT sl.id, sl.ingredient, sl.recipe_id, sl.checked, r.name AS recipe_name
            FROM shopping_list sl
            LEFT JOIN recipes r ON sl.recipe_id = r.id
            "#,
        )
        .fetch_one(&pool)
        .await
        .expect("Failed to fetch shopping list row");

        assert_eq!(row.ingredient, "750ml water (Miso Soup)");
        assert_eq!(row.recipe_id, Some(recipe_id));
        assert_eq!(row.recipe_name, Some("Miso Soup".to_string()));
        assert!(!row.checked);
    }

    #[rstest]
    #[tokio::test]
    async fn test_shopping_list_model_compatibility_without_recipe(#[future] test_db: SqlitePool) {
        let pool = test_db.await;

        sqlx::query("INSERT INTO shopping_list (ingredient) VALUES (?)")
            .bind("Coffee beans")
            .execute(&pool)
            .await
            .expect("Failed to insert shopping list row");

        let record = sqlx::query_as::<_, ShoppingListRecord>(
            "SELECT id, ingredient, recipe_id, checked FROM shopping_list",
        )
        .fetch_one(&pool)
        .await
        .expect("Failed to fetch shopping list row");

        assert!(record.id > 0);
        assert_eq!(record.ingredient, "Coffee beans");
        assert_eq!(record.recipe_id, None);
        assert!(!record.checked);
    }
}
