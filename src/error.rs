use thiserror::Error;

#[derive(Error, Debug)]
pub enum MunchError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Recipe not found with id: {0}")]
    RecipeNotFound(i64),

    #[error("Shopping list item not found with id: {0}")]
    ShoppingListItemNotFound(i64),

    #[error("Recipe {0} was not user-authored and cannot be deleted")]
    NotCustomRecipe(i64),

    #[error("Invalid recipe: {0}")]
    InvalidRecipe(&'static str),

    #[error("Shopping list item text is required")]
    EmptyShoppingListItem,

    #[error("Corrupt JSON column: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TheMealDB request failed: {0}")]
    MealDb(#[from] reqwest::Error),

    #[error("Invalid configuration for {key}: {message}")]
    Config { key: &'static str, message: String },
}

pub type Result<T> = std::result::Result<T, MunchError>;
