use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::info;

use crate::error::{MunchError, Result};
use crate::models::api::{NewRecipe, Recipe, RecipeOrigin, RecipeSummary};
use crate::models::{RecipeRecord, RecipeSummaryRecord};
use crate::shopping::{RecipeStore, ScalableRecipe};

/// Filters for the recipe list. Unset fields do not filter.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    /// Exact cuisine; `"all"` is the same as unset
    pub cuisine: Option<String>,
    pub max_duration: Option<i64>,
    /// Substring of the equipment JSON column
    pub equipment: Option<String>,
    /// Substring of the name or description
    pub search: Option<String>,
    pub custom: Option<bool>,
    pub source: Option<RecipeOrigin>,
    pub favorites_only: bool,
}

/// Fetch a recipe by ID with its favorite state
pub async fn get_recipe(pool: &SqlitePool, recipe_id: i64) -> Result<Recipe> {
    let record = sqlx::query_as::<_, RecipeRecord>("SELECT * FROM recipes WHERE id = ?")
        .bind(recipe_id)
        .fetch_optional(pool)
        .await?
        .ok_or(MunchError::RecipeNotFound(recipe_id))?;

    let is_favorite: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM favorites WHERE recipe_id = ?)")
            .bind(recipe_id)
            .fetch_one(pool)
            .await?;

    Recipe::from_record(record, is_favorite)
}

/// List recipes matching `filter`, newest first
pub async fn list_recipes(pool: &SqlitePool, filter: &RecipeFilter) -> Result<Vec<RecipeSummary>> {
    let mut query = QueryBuilder::<Sqlite>::new(
        r#"
        SELECT r.id, r.name, r.description, r.cuisine, r.duration, r.servings,
               r.equipment, r.highlight_image, r.image, r.custom, r.source,
               f.id IS NOT NULL AS is_favorite, r.created_at
        FROM recipes r
        LEFT JOIN favorites f ON f.recipe_id = r.id
        WHERE 1=1
        "#,
    );

    if let Some(cuisine) = filter.cuisine.as_deref().filter(|c| *c != "all") {
        query.push(" AND r.cuisine = ").push_bind(cuisine);
    }

    if let Some(max_duration) = filter.max_duration {
        query.push(" AND r.duration <= ").push_bind(max_duration);
    }

    if let Some(equipment) = &filter.equipment {
        query
            .push(" AND r.equipment LIKE ")
            .push_bind(format!("%{equipment}%"));
    }

    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        query
            .push(" AND (r.name LIKE ")
            .push_bind(pattern.clone())
            .push(" OR r.description LIKE ")
            .push_bind(pattern)
            .push(")");
    }

    if let Some(custom) = filter.custom {
        query.push(" AND r.custom = ").push_bind(custom);
    }

    if let Some(source) = filter.source {
        // NULL source predates the column and means the bundled catalog
        query
            .push(" AND COALESCE(r.source, 'onegai') = ")
            .push_bind(source.as_str());
    }

    if filter.favorites_only {
        query.push(" AND f.id IS NOT NULL");
    }

    query.push(" ORDER BY r.created_at DESC, r.id DESC");

    let records = query
        .build_query_as::<RecipeSummaryRecord>()
        .fetch_all(pool)
        .await?;

    records.into_iter().map(RecipeSummary::try_from).collect()
}

/// Distinct cuisines in the catalog, sorted
pub async fn list_cuisines(pool: &SqlitePool) -> Result<Vec<String>> {
    let cuisines = sqlx::query_scalar("SELECT DISTINCT cuisine FROM recipes ORDER BY cuisine")
        .fetch_all(pool)
        .await?;

    Ok(cuisines)
}

/// Create a user-authored recipe
/// Validates the input, trims text fields and applies the default servings
pub async fn create_recipe(pool: &SqlitePool, recipe: &NewRecipe) -> Result<Recipe> {
    recipe.validate()?;

    let recipe_id = insert_recipe(pool, recipe, RecipeOrigin::User).await?;
    info!(recipe_id, name = %recipe.name.trim(), "Created recipe");

    get_recipe(pool, recipe_id).await
}

/// Delete a user-authored recipe along with its favorites and shopping list rows
pub async fn delete_recipe(pool: &SqlitePool, recipe_id: i64) -> Result<()> {
    let mut tx = pool.begin().await?;

    let custom: bool = sqlx::query_scalar("SELECT custom FROM recipes WHERE id = ?")
        .bind(recipe_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(MunchError::RecipeNotFound(recipe_id))?;

    if !custom {
        return Err(MunchError::NotCustomRecipe(recipe_id));
    }

    for statement in [
        "DELETE FROM favorites WHERE recipe_id = ?",
        "DELETE FROM shopping_list WHERE recipe_id = ?",
        "DELETE FROM recipes WHERE id = ?",
    ] {
        sqlx::query(statement)
            .bind(recipe_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    info!(recipe_id, "Deleted recipe");

    Ok(())
}

/// Replace the free-text comments of a recipe; `None` clears them
pub async fn update_comments(
    pool: &SqlitePool,
    recipe_id: i64,
    comments: Option<&str>,
) -> Result<()> {
    let comments = comments.filter(|c| !c.is_empty());

    let result = sqlx::query("UPDATE recipes SET comments = ? WHERE id = ?")
        .bind(comments)
        .bind(recipe_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(MunchError::RecipeNotFound(recipe_id));
    }

    Ok(())
}

/// Replace the uploaded image paths and the highlighted image of a recipe
pub async fn update_images(
    pool: &SqlitePool,
    recipe_id: i64,
    images: Option<&[String]>,
    highlight_image: Option<&str>,
) -> Result<()> {
    let images = images.map(serde_json::to_string).transpose()?;
    let highlight_image = highlight_image.filter(|h| !h.is_empty());

    let result = sqlx::query("UPDATE recipes SET images = ?, highlight_image = ? WHERE id = ?")
        .bind(images)
        .bind(highlight_image)
        .bind(recipe_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(MunchError::RecipeNotFound(recipe_id));
    }

    Ok(())
}

/// Swap every recipe from `source` for `recipes`, atomically
/// Favorites of the old recipes are dropped and their shopping list rows are
/// detached. Returns the number of recipes inserted
pub async fn replace_source_recipes(
    pool: &SqlitePool,
    source: RecipeOrigin,
    recipes: &[NewRecipe],
) -> Result<usize> {
    let mut tx = pool.begin().await?;

    // Shopping entries outlive their recipe; the name suffix still identifies it
    sqlx::query(
        "UPDATE shopping_list SET recipe_id = NULL WHERE recipe_id IN (SELECT id FROM recipes WHERE COALESCE(source, 'onegai') = ?)",
    )
    .bind(source.as_str())
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "DELETE FROM favorites WHERE recipe_id IN (SELECT id FROM recipes WHERE COALESCE(source, 'onegai') = ?)",
    )
    .bind(source.as_str())
    .execute(&mut *tx)
    .await?;

    let removed = sqlx::query("DELETE FROM recipes WHERE COALESCE(source, 'onegai') = ?")
        .bind(source.as_str())
        .execute(&mut *tx)
        .await?
        .rows_affected();

    for recipe in recipes {
        insert_recipe(&mut *tx, recipe, source).await?;
    }

    tx.commit().await?;
    info!(%source, removed, inserted = recipes.len(), "Replaced recipes from source");

    Ok(recipes.len())
}

async fn insert_recipe<'e, E>(executor: E, recipe: &NewRecipe, source: RecipeOrigin) -> Result<i64>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let recipe_id = sqlx::query(
        r#"
        INSERT INTO recipes (name, description, cuisine, duration, servings, equipment,
                             seasonal, ingredients, instructions, source_url, image,
                             custom, source)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(recipe.name.trim())
    .bind(recipe.description.as_deref().map(str::trim).unwrap_or_default())
    .bind(recipe.cuisine.trim())
    .bind(recipe.duration)
    .bind(recipe.servings_or_default())
    .bind(serde_json::to_string(&recipe.equipment)?)
    .bind(serde_json::to_string(&recipe.seasonal)?)
    .bind(serde_json::to_string(&recipe.ingredients)?)
    .bind(serde_json::to_string(&recipe.instructions)?)
    .bind(
        recipe
            .source_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty()),
    )
    .bind(recipe.image.as_deref())
    .bind(source == RecipeOrigin::User)
    .bind(source.as_str())
    .execute(executor)
    .await?
    .last_insert_rowid();

    Ok(recipe_id)
}

#[async_trait]
impl RecipeStore for SqlitePool {
    async fn scalable_recipe(&self, recipe_id: i64) -> Result<ScalableRecipe> {
        get_recipe(self, recipe_id).await.map(ScalableRecipe::from)
    }
}
