use munch::config::Config;
use munch::controllers::replace_source_recipes;
use munch::mealdb::MealDbClient;
use munch::models::api::RecipeOrigin;
use munch::{db, logging};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let config = Config::from_env()?;
    let pool = db::connect(&config).await?;

    let client = MealDbClient::new(&config.mealdb_url);
    let recipes = client
        .fetch_category(&config.mealdb_category, config.mealdb_delay)
        .await?;

    if recipes.is_empty() {
        // An empty response leaves the previous import in place
        warn!(category = %config.mealdb_category, "No meals found, leaving catalog unchanged");
        return Ok(());
    }

    let added = replace_source_recipes(&pool, RecipeOrigin::TheMealDb, &recipes).await?;
    info!("Done! Added {added} recipes from TheMealDB");

    Ok(())
}
