use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MunchError, Result};
use crate::models::{RecipeRecord, RecipeSummaryRecord};
use crate::scaling::{ScaleRatio, scale_ingredient};
use crate::shopping::ScalableRecipe;

/// Where a recipe came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeOrigin {
    /// Bundled with the catalog
    #[default]
    Onegai,
    /// Authored by the user
    User,
    /// Imported from TheMealDB
    TheMealDb,
}

impl RecipeOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeOrigin::Onegai => "onegai",
            RecipeOrigin::User => "user",
            RecipeOrigin::TheMealDb => "themealdb",
        }
    }

    /// Rows written before the source column existed carry NULL
    fn from_column(value: Option<&str>) -> Self {
        value.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for RecipeOrigin {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "onegai" => Ok(RecipeOrigin::Onegai),
            "user" => Ok(RecipeOrigin::User),
            "themealdb" => Ok(RecipeOrigin::TheMealDb),
            other => Err(format!("unknown recipe source: {other}")),
        }
    }
}

impl fmt::Display for RecipeOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete recipe with decoded lists for API responses
#[derive(Debug, Clone, Serialize)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub cuisine: String,
    pub duration: i64,
    pub servings: i64,
    pub equipment: Vec<String>,
    pub image: Option<String>,
    pub seasonal: Vec<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub source_url: Option<String>,
    pub comments: Option<String>,
    pub images: Vec<String>,
    pub highlight_image: Option<String>,
    pub is_favorite: bool,
    pub is_custom: bool,
    pub source: RecipeOrigin,
    pub created_at: String,
}

impl Recipe {
    pub(crate) fn from_record(record: RecipeRecord, is_favorite: bool) -> Result<Self> {
        Ok(Recipe {
            id: record.id,
            name: record.name,
            description: record.description,
            cuisine: record.cuisine,
            duration: record.duration,
            servings: record.servings,
            equipment: decode_optional_list(record.equipment.as_deref())?,
            image: record.image,
            seasonal: decode_optional_list(record.seasonal.as_deref())?,
            ingredients: serde_json::from_str(&record.ingredients)?,
            instructions: serde_json::from_str(&record.instructions)?,
            source_url: record.source_url,
            comments: record.comments,
            images: decode_optional_list(record.images.as_deref())?,
            highlight_image: record.highlight_image,
            is_favorite,
            is_custom: record.custom,
            source: RecipeOrigin::from_column(record.source.as_deref()),
            created_at: record.created_at,
        })
    }

    /// Ingredient lines rewritten for `servings`, as shown when browsing
    pub fn scaled_ingredients(&self, servings: Option<u32>) -> Vec<String> {
        let ratio = ScaleRatio::for_servings(servings, self.servings);
        self.ingredients
            .iter()
            .map(|line| scale_ingredient(line, ratio))
            .collect()
    }

    /// The recipe as it reads for `servings`
    /// `None` or zero servings leave it as written
    pub fn scaled_to(mut self, servings: Option<u32>) -> Self {
        if let Some(servings) = servings.filter(|&n| n > 0) {
            self.ingredients = self.scaled_ingredients(Some(servings));
            self.servings = i64::from(servings);
        }
        self
    }
}

impl From<Recipe> for ScalableRecipe {
    fn from(recipe: Recipe) -> Self {
        ScalableRecipe {
            name: recipe.name,
            servings: recipe.servings,
            ingredients: recipe.ingredients,
        }
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Recipe: {}", self.name)?;
        if self.is_favorite {
            f.write_str(" *")?;
        }
        writeln!(f)?;
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Cuisine: {} ({} min, serves {})", self.cuisine, self.duration, self.servings)?;
        writeln!(f, "Source: {}", self.source)?;

        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            writeln!(f, "\n{description}")?;
        }

        if !self.equipment.is_empty() {
            writeln!(f, "\nEquipment: {}", self.equipment.join(", "))?;
        }

        writeln!(f, "\nIngredients:")?;
        for ingredient in &self.ingredients {
            writeln!(f, "  - {ingredient}")?;
        }

        writeln!(f, "\nInstructions:")?;
        for (step, instruction) in self.instructions.iter().enumerate() {
            writeln!(f, "  {}. {}", step + 1, instruction)?;
        }

        if let Some(comments) = &self.comments {
            writeln!(f, "\nComments:\n{comments}")?;
        }

        Ok(())
    }
}

/// Row of the recipe list view
#[derive(Debug, Clone, Serialize)]
pub struct RecipeSummary {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub cuisine: String,
    pub duration: i64,
    pub servings: i64,
    pub equipment: Vec<String>,
    pub highlight_image: Option<String>,
    pub image: Option<String>,
    pub is_favorite: bool,
    pub is_custom: bool,
    pub source: RecipeOrigin,
    pub created_at: String,
}

impl TryFrom<RecipeSummaryRecord> for RecipeSummary {
    type Error = MunchError;

    fn try_from(record: RecipeSummaryRecord) -> Result<Self> {
        Ok(RecipeSummary {
            id: record.id,
            name: record.name,
            description: record.description,
            cuisine: record.cuisine,
            duration: record.duration,
            servings: record.servings,
            equipment: decode_optional_list(record.equipment.as_deref())?,
            highlight_image: record.highlight_image,
            image: record.image,
            is_favorite: record.is_favorite,
            is_custom: record.custom,
            source: RecipeOrigin::from_column(record.source.as_deref()),
            created_at: record.created_at,
        })
    }
}

/// A recipe to be written to the catalog
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub cuisine: String,
    pub duration: i64,
    #[serde(default)]
    pub servings: Option<i64>,
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Seasons the recipe suits, e.g. `["winter"]` or `["all"]`
    #[serde(default)]
    pub seasonal: Vec<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl NewRecipe {
    pub const DEFAULT_SERVINGS: i64 = 2;

    /// Check the fields a user-authored recipe must have
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(MunchError::InvalidRecipe("Name is required"));
        }
        if self.cuisine.trim().is_empty() {
            return Err(MunchError::InvalidRecipe("Cuisine is required"));
        }
        if self.duration < 1 {
            return Err(MunchError::InvalidRecipe("Duration must be a positive number"));
        }
        if self.ingredients.is_empty() {
            return Err(MunchError::InvalidRecipe("At least one ingredient is required"));
        }
        if self.instructions.is_empty() {
            return Err(MunchError::InvalidRecipe("At least one instruction is required"));
        }
        Ok(())
    }

    pub fn servings_or_default(&self) -> i64 {
        match self.servings {
            Some(n) if n > 0 => n,
            _ => Self::DEFAULT_SERVINGS,
        }
    }
}

fn decode_optional_list(column: Option<&str>) -> Result<Vec<String>> {
    match column {
        Some(json) => Ok(serde_json::from_str(json)?),
        None => Ok(Vec::new()),
    }
}
