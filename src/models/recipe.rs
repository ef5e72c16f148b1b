use sqlx::prelude::FromRow;

/// One row of the `recipes` table. List-valued columns hold JSON arrays.
#[derive(Debug, Clone, FromRow)]
pub struct RecipeRecord {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub cuisine: String,
    pub duration: i64,
    pub servings: i64,
    pub equipment: Option<String>,
    pub image: Option<String>,
    pub seasonal: Option<String>,
    pub ingredients: String,
    pub instructions: String,
    pub source_url: Option<String>,
    pub custom: bool,
    pub source: Option<String>,
    pub comments: Option<String>,
    pub images: Option<String>,
    pub highlight_image: Option<String>,
    pub created_at: String,
}

/// The columns needed to list recipes, joined with favorite state
#[derive(Debug, Clone, FromRow)]
pub struct RecipeSummaryRecord {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub cuisine: String,
    pub duration: i64,
    pub servings: i64,
    pub equipment: Option<String>,
    pub highlight_image: Option<String>,
    pub image: Option<String>,
    pub custom: bool,
    pub source: Option<String>,
    pub is_favorite: bool,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_fixtures::test_db;
    use rstest::*;
    use sqlx::SqlitePool;

    #[rstest]
    #[tokio::test]
    async fn test_recipe_model_compatibility_defaults(#[future] test_db: SqlitePool) {
        let pool = test_db.await;

        // Insert with only the required columns
        sqlx::query(
            "INSERT INTO recipes (name, cuisine, duration, ingredients, instructions) VALUES (?, ?, ?, ?, ?)",
        )
        .bind("Miso Soup")
        .bind("Japanese")
        .bind(15)
        .bind(r#"["750ml water","3 tbsp white miso paste"]"#)
        .bind(r#"["Simmer","Stir in miso"]"#)
        .execute(&pool)
        .await
        .expect("Failed to insert recipe");

        let recipe = sqlx::query_as::<_, RecipeRecord>("SELECT * FROM recipes WHERE name = ?")
            .bind("Miso Soup")
            .fetch_one(&pool)
            .await
            .expect("Failed to fetch recipe");

        // Verify the schema defaults
        assert!(recipe.id > 0);
        assert_eq!(recipe.servings, 2);
        assert!(!recipe.custom);
        assert_eq!(recipe.source, Some("onegai".to_string()));
        assert_eq!(recipe.description, None);
        assert_eq!(recipe.images, None);
        assert!(!recipe.created_at.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_recipe_summary_model_compatibility(#[future] test_db: SqlitePool) {
        let pool = test_db.await;

        let recipe_id = sqlx::query(
            "INSERT INTO recipes (name, cuisine, duration, servings, ingredients, instructions, custom, source) VALUES (?, ?, ?, ?, ?, ?, 1, 'user')",
        )
        .bind("Dal")
        .bind("Indian")
        .bind(40)
        .bind(4)
        .bind(r#"["200g red lentils"]"#)
        .bind(r#"["Boil lentils"]"#)
        .execute(&pool)
        .await
        .expect("Failed to insert recipe")
        .last_insert_rowid();

        sqlx::query("INSERT INTO favorites (recipe_id) VALUES (?)")
            .bind(recipe_id)
            .execute(&pool)
            .await
            .expect("Failed to insert favorite");

        let summary = sqlx::query_as::<_, RecipeSummaryRecord>(
            r#"
            SELECT r.id, r.name, r.description, r.cuisine, r.duration, r.servings,
                   r.equipment, r.highlight_image, r.image, r.custom, r.source,
                   f.id IS NOT NULL AS is_favorite, r.created_at
            FROM recipes r
            LEFT JOIN favorites f ON f.recipe_id = r.id
            WHERE r.id = ?
            "#,
        )
        .bind(recipe_id)
        .fetch_one(&pool)
        .await
        .expect("Failed to fetch summary");

        assert_eq!(summary.name, "Dal");
        assert_eq!(summary.servings, 4);
        assert!(summary.custom);
        assert!(summary.is_favorite);
        assert_eq!(summary.source, Some("user".to_string()));
    }
}
