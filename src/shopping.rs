//! Turning a recipe into shopping list entries.
//!
//! The builder itself is pure: [`build_from_recipe`] scales every ingredient
//! line and tags it with the recipe name. [`add_recipe_to_shopping_list`]
//! wires it to a [`RecipeStore`] and a [`ShoppingListStore`] so the same logic
//! runs against SQLite or an in-memory double.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::Result;
use crate::scaling::{ScaleRatio, scale_ingredient};

/// The slice of a recipe needed to build shopping list entries
#[derive(Debug, Clone, PartialEq)]
pub struct ScalableRecipe {
    pub name: String,
    pub servings: i64,
    pub ingredients: Vec<String>,
}

/// Entries produced for one recipe, in ingredient order
#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingListBatch {
    pub ratio: ScaleRatio,
    pub entries: Vec<String>,
    pub added_count: usize,
}

#[async_trait]
pub trait RecipeStore {
    /// Load a recipe, failing with `RecipeNotFound` when the id is unknown
    async fn scalable_recipe(&self, recipe_id: i64) -> Result<ScalableRecipe>;
}

#[async_trait]
pub trait ShoppingListStore {
    /// Append one entry owned by `recipe_id`, returning the new row id
    async fn append_entry(&self, text: &str, recipe_id: i64) -> Result<i64>;
}

/// Scale every ingredient of `recipe` for `requested_servings` and annotate it
/// with the recipe name, e.g. `"1 cup rice (Fried Rice)"`.
///
/// Duplicated ingredient lines stay separate entries.
pub fn build_from_recipe(
    recipe: &ScalableRecipe,
    requested_servings: Option<u32>,
) -> ShoppingListBatch {
    let ratio = ScaleRatio::for_servings(requested_servings, recipe.servings);

    let entries: Vec<String> = recipe
        .ingredients
        .iter()
        .map(|ingredient| format!("{} ({})", scale_ingredient(ingredient, ratio), recipe.name))
        .collect();

    ShoppingListBatch {
        ratio,
        added_count: entries.len(),
        entries,
    }
}

/// Load a recipe, build its entries and append them one by one.
///
/// Returns the number of entries appended. Stops at the first failed append;
/// entries written before it are kept.
pub async fn add_recipe_to_shopping_list<R, S>(
    recipes: &R,
    shopping_list: &S,
    recipe_id: i64,
    requested_servings: Option<u32>,
) -> Result<usize>
where
    R: RecipeStore + Sync + ?Sized,
    S: ShoppingListStore + Sync + ?Sized,
{
    let recipe = recipes.scalable_recipe(recipe_id).await?;
    let batch = build_from_recipe(&recipe, requested_servings);

    for entry in &batch.entries {
        let entry_id = shopping_list.append_entry(entry, recipe_id).await?;
        debug!(entry_id, recipe_id, entry = %entry, "Appended shopping list entry");
    }

    info!(
        recipe_id,
        recipe = %recipe.name,
        ratio = %batch.ratio,
        added = batch.added_count,
        "Added recipe to shopping list"
    );

    Ok(batch.added_count)
}
