mod favorite;
mod recipe;
mod shopping_list;

pub mod api;

#[cfg(test)]
pub mod test_fixtures;

pub use favorite::FavoriteRecord;
pub use recipe::{RecipeRecord, RecipeSummaryRecord};
pub use shopping_list::{ShoppingListRecord, ShoppingListRow};
