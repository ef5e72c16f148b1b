use munch::MunchError;
use munch::controllers::{
    RecipeFilter, add_recipe_to_shopping_list, create_recipe, delete_recipe, get_recipe,
    get_shopping_list, list_recipes, replace_source_recipes, toggle_favorite,
};
use munch::mealdb::Meal;
use munch::models::api::{NewRecipe, RecipeOrigin};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

async fn test_pool() -> SqlitePool {
    // Create an in-memory database with migrations
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

fn fried_rice() -> NewRecipe {
    NewRecipe {
        name: "Vegetable Fried Rice".to_string(),
        description: Some("Leftover rice, crispy and quick".to_string()),
        cuisine: "Chinese".to_string(),
        duration: 20,
        servings: Some(2),
        equipment: vec!["wok".to_string()],
        seasonal: vec!["all".to_string()],
        ingredients: vec![
            "1/2 cup rice".to_string(),
            "2 eggs".to_string(),
            "1.5 tbsp soy sauce".to_string(),
            "Salt to taste".to_string(),
            "2 eggs".to_string(),
        ],
        instructions: vec![
            "Scramble the eggs".to_string(),
            "Fry the rice".to_string(),
        ],
        source_url: None,
        image: None,
    }
}

#[tokio::test]
async fn test_create_recipe_and_shop_for_more_servings() {
    let pool = test_pool().await;

    let recipe = create_recipe(&pool, &fried_rice())
        .await
        .expect("Failed to create recipe");

    let added = add_recipe_to_shopping_list(&pool, recipe.id, Some(6))
        .await
        .expect("Failed to add recipe to shopping list");
    assert_eq!(added, 5);

    let stored: Vec<String> = sqlx::query_scalar("SELECT ingredient FROM shopping_list ORDER BY id")
        .fetch_all(&pool)
        .await
        .expect("Failed to fetch shopping list rows");

    assert_eq!(
        stored,
        vec![
            "1.5 cup rice (Vegetable Fried Rice)",
            "6 eggs (Vegetable Fried Rice)",
            "4.5 tbsp soy sauce (Vegetable Fried Rice)",
            "Salt to taste (Vegetable Fried Rice)",
            "6 eggs (Vegetable Fried Rice)",
        ]
    );

    // Scaling for display matches what was added to the list
    let fetched = get_recipe(&pool, recipe.id)
        .await
        .expect("Failed to fetch recipe");
    assert_eq!(fetched.ingredients, fried_rice().ingredients);
    assert_eq!(
        fetched.scaled_ingredients(Some(6))[0],
        "1.5 cup rice".to_string()
    );
}

#[tokio::test]
async fn test_shop_without_servings_uses_recipe_as_written() {
    let pool = test_pool().await;

    let recipe = create_recipe(&pool, &fried_rice())
        .await
        .expect("Failed to create recipe");

    add_recipe_to_shopping_list(&pool, recipe.id, None)
        .await
        .expect("Failed to add recipe to shopping list");

    let list = get_shopping_list(&pool)
        .await
        .expect("Failed to get shopping list");
    let texts: Vec<&str> = list.items.iter().map(|i| i.ingredient.as_str()).collect();

    assert!(texts.contains(&"0.5 cup rice (Vegetable Fried Rice)"));
    assert!(texts.contains(&"1.5 tbsp soy sauce (Vegetable Fried Rice)"));
    assert_eq!(list.by_recipe().len(), 1);
}

#[tokio::test]
async fn test_deleting_recipe_clears_its_shopping_items_and_favorite() {
    let pool = test_pool().await;

    let recipe = create_recipe(&pool, &fried_rice())
        .await
        .expect("Failed to create recipe");
    toggle_favorite(&pool, recipe.id)
        .await
        .expect("Failed to favorite recipe");
    add_recipe_to_shopping_list(&pool, recipe.id, Some(4))
        .await
        .expect("Failed to add recipe to shopping list");

    delete_recipe(&pool, recipe.id)
        .await
        .expect("Failed to delete recipe");

    assert!(
        get_shopping_list(&pool)
            .await
            .expect("Failed to get shopping list")
            .is_empty()
    );
    assert!(matches!(
        get_recipe(&pool, recipe.id).await,
        Err(MunchError::RecipeNotFound(_))
    ));
}

#[tokio::test]
async fn test_imported_meal_scales_like_any_recipe() {
    let pool = test_pool().await;

    let meal: Meal = serde_json::from_str(
        r#"{
            "idMeal": "52807",
            "strMeal": "Baingan Bharta",
            "strArea": "Indian",
            "strInstructions": "Roast the aubergine.\r\nMash with spices.",
            "strTags": null,
            "strSource": null,
            "strMealThumb": null,
            "strIngredient1": "Aubergine",
            "strMeasure1": "1 large",
            "strIngredient2": "Garam Masala",
            "strMeasure2": "1/2 tsp",
            "strIngredient3": "Coriander",
            "strMeasure3": "Garnish"
        }"#,
    )
    .expect("Failed to decode meal");
    let new_recipe = meal.into_new_recipe().expect("Meal should convert");

    replace_source_recipes(&pool, RecipeOrigin::TheMealDb, &[new_recipe])
        .await
        .expect("Failed to import meal");

    let imported = list_recipes(
        &pool,
        &RecipeFilter {
            source: Some(RecipeOrigin::TheMealDb),
            ..Default::default()
        },
    )
    .await
    .expect("Failed to list imported recipes");
    assert_eq!(imported.len(), 1);
    assert_eq!(imported[0].cuisine, "Indian");

    add_recipe_to_shopping_list(&pool, imported[0].id, Some(4))
        .await
        .expect("Failed to add imported recipe");

    let stored: Vec<String> = sqlx::query_scalar("SELECT ingredient FROM shopping_list ORDER BY id")
        .fetch_all(&pool)
        .await
        .expect("Failed to fetch shopping list rows");
    assert_eq!(
        stored,
        vec![
            "2 large Aubergine (Baingan Bharta)",
            "1 tsp Garam Masala (Baingan Bharta)",
            "Garnish Coriander (Baingan Bharta)",
        ]
    );

    // Imported recipes are not user-authored
    let result = delete_recipe(&pool, imported[0].id).await;
    assert!(matches!(result, Err(MunchError::NotCustomRecipe(_))));
}
