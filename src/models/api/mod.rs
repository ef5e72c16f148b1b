mod recipe;
mod shopping_list;

pub use recipe::{NewRecipe, Recipe, RecipeOrigin, RecipeSummary};
pub use shopping_list::{ShoppingList, ShoppingListItem};
