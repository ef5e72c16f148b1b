mod favorite_controller;
mod recipe_controller;
mod shopping_list_controller;

pub use favorite_controller::{get_favorites, toggle_favorite};
pub use recipe_controller::{
    RecipeFilter, create_recipe, delete_recipe, get_recipe, list_cuisines, list_recipes,
    replace_source_recipes, update_comments, update_images,
};
pub use shopping_list_controller::{
    add_recipe_to_shopping_list, add_shopping_list_item, clear_shopping_list,
    delete_shopping_list_item, get_shopping_list, set_checked,
};
