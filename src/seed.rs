//! The bundled recipe catalog.
//!
//! The catalog ships inside the binary as JSON and is written to the
//! database under the `onegai` source. Seeding replaces whatever bundled
//! recipes were there before, so running it twice leaves one copy.

use sqlx::SqlitePool;
use tracing::info;

use crate::controllers::replace_source_recipes;
use crate::error::Result;
use crate::models::api::{NewRecipe, RecipeOrigin};

const CATALOG: &str = include_str!("../data/catalog.json");

/// Decode the bundled catalog
pub fn bundled_catalog() -> Result<Vec<NewRecipe>> {
    Ok(serde_json::from_str(CATALOG)?)
}

/// Write the bundled catalog, replacing any earlier copy
/// User-authored and imported recipes are left alone. Returns the number of
/// recipes written
pub async fn seed_catalog(pool: &SqlitePool) -> Result<usize> {
    let recipes = bundled_catalog()?;
    for recipe in &recipes {
        recipe.validate()?;
    }

    let inserted = replace_source_recipes(pool, RecipeOrigin::Onegai, &recipes).await?;
    info!(inserted, "Seeded bundled catalog");

    Ok(inserted)
}
