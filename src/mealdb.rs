//! Importing recipes from TheMealDB.
//!
//! TheMealDB returns meals as flat JSON objects with numbered ingredient and
//! measure slots (`strIngredient1`..`strIngredient20`). These are folded into
//! the same free-text ingredient lines user-authored recipes use, so imported
//! recipes scale like any other.

use std::collections::HashMap;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::api::NewRecipe;

const INGREDIENT_SLOTS: usize = 20;
const MAX_DESCRIPTION_TAGS: usize = 3;
const DEFAULT_CUISINE: &str = "International";

static STEP_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^step\s*\d+$").expect("step marker pattern is valid"));

#[derive(Debug, Deserialize)]
pub struct MealList {
    pub meals: Option<Vec<MealStub>>,
}

#[derive(Debug, Deserialize)]
pub struct MealStub {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct MealLookup {
    pub meals: Option<Vec<Meal>>,
}

#[derive(Debug, Deserialize)]
pub struct Meal {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strArea")]
    pub area: Option<String>,
    #[serde(rename = "strInstructions")]
    pub instructions: Option<String>,
    #[serde(rename = "strTags")]
    pub tags: Option<String>,
    #[serde(rename = "strSource")]
    pub source: Option<String>,
    #[serde(rename = "strMealThumb")]
    pub thumbnail: Option<String>,
    /// Numbered ingredient/measure slots and anything else the API sends
    #[serde(flatten)]
    pub slots: HashMap<String, Value>,
}

impl Meal {
    fn slot(&self, key: &str) -> Option<&str> {
        self.slots
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Ingredient lines as `"<measure> <ingredient>"`, skipping empty slots
    pub fn ingredients(&self) -> Vec<String> {
        (1..=INGREDIENT_SLOTS)
            .filter_map(|i| {
                let ingredient = self.slot(&format!("strIngredient{i}"))?;
                Some(match self.slot(&format!("strMeasure{i}")) {
                    Some(measure) => format!("{measure} {ingredient}"),
                    None => ingredient.to_string(),
                })
            })
            .collect()
    }

    pub fn steps(&self) -> Vec<String> {
        parse_instructions(self.instructions.as_deref().unwrap_or_default())
    }

    /// Convert to a catalog recipe. Meals without ingredients or steps are
    /// not worth importing and yield `None`.
    pub fn into_new_recipe(self) -> Option<NewRecipe> {
        let ingredients = self.ingredients();
        let instructions = self.steps();
        if ingredients.is_empty() || instructions.is_empty() {
            return None;
        }

        let description = self
            .tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .take(MAX_DESCRIPTION_TAGS)
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();

        let source_url = self
            .source
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| format!("https://www.themealdb.com/meal/{}", self.id));

        Some(NewRecipe {
            name: self.name,
            description: Some(description),
            cuisine: area_to_cuisine(self.area.as_deref()).to_string(),
            duration: estimate_duration(instructions.len()),
            servings: Some(NewRecipe::DEFAULT_SERVINGS),
            equipment: Vec::new(),
            seasonal: Vec::new(),
            ingredients,
            instructions,
            source_url: Some(source_url),
            image: self.thumbnail,
        })
    }
}

/// Split free-form instructions into steps, dropping blank lines and bare
/// "Step 3" headings.
pub fn parse_instructions(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !STEP_MARKER.is_match(line))
        .map(str::to_string)
        .collect()
}

/// Rough cooking time in minutes from the number of steps
pub fn estimate_duration(step_count: usize) -> i64 {
    match step_count {
        0..=3 => 15,
        4..=5 => 20,
        6..=8 => 30,
        _ => 45,
    }
}

/// Map TheMealDB's area onto the catalog's cuisines
pub fn area_to_cuisine(area: Option<&str>) -> &'static str {
    match area.unwrap_or_default() {
        "Japanese" => "Japanese",
        "Chinese" => "Chinese",
        "Indian" => "Indian",
        "Thai" => "Thai",
        "Italian" => "Italian",
        "Mexican" => "Mexican",
        "Spanish" | "Greek" => "Mediterranean",
        "Turkish" | "Moroccan" | "Egyptian" | "Lebanese" => "Middle Eastern",
        "Vietnamese" | "Malaysian" | "Filipino" => "Asian",
        _ => DEFAULT_CUISINE,
    }
}

pub struct MealDbClient {
    http: reqwest::Client,
    base_url: String,
}

impl MealDbClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn list_category(&self, category: &str) -> Result<Vec<MealStub>> {
        let list: MealList = self
            .http
            .get(format!("{}/filter.php", self.base_url))
            .query(&[("c", category)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(list.meals.unwrap_or_default())
    }

    pub async fn lookup(&self, meal_id: &str) -> Result<Option<Meal>> {
        let lookup: MealLookup = self
            .http
            .get(format!("{}/lookup.php", self.base_url))
            .query(&[("i", meal_id)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(lookup.meals.and_then(|meals| meals.into_iter().next()))
    }

    /// Fetch every meal in `category` and convert the usable ones.
    ///
    /// A failed lookup is logged and skipped. `delay` is slept between lookups
    /// to keep the request rate polite.
    pub async fn fetch_category(&self, category: &str, delay: Duration) -> Result<Vec<NewRecipe>> {
        let stubs = self.list_category(category).await?;
        info!(category, found = stubs.len(), "Fetched meal list from TheMealDB");

        let mut recipes = Vec::with_capacity(stubs.len());
        for stub in stubs {
            match self.lookup(&stub.id).await {
                Ok(Some(meal)) => match meal.into_new_recipe() {
                    Some(recipe) => {
                        debug!(meal_id = %stub.id, name = %recipe.name, "Converted meal");
                        recipes.push(recipe);
                    }
                    None => debug!(meal_id = %stub.id, "Meal has no ingredients or steps, skipping"),
                },
                Ok(None) => debug!(meal_id = %stub.id, "Meal lookup returned nothing"),
                Err(e) => warn!(meal_id = %stub.id, name = %stub.name, "Error fetching meal: {e}"),
            }

            tokio::time::sleep(delay).await;
        }

        Ok(recipes)
    }
}
