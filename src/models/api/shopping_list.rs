use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::models::ShoppingListRow;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingListItem {
    pub id: i64,
    pub ingredient: String,
    pub recipe_id: Option<i64>,
    pub recipe_name: Option<String>,
    pub checked: bool,
}

impl From<ShoppingListRow> for ShoppingListItem {
    fn from(row: ShoppingListRow) -> Self {
        ShoppingListItem {
            id: row.id,
            ingredient: row.ingredient,
            recipe_id: row.recipe_id,
            recipe_name: row.recipe_name,
            checked: row.checked,
        }
    }
}

impl fmt::Display for ShoppingListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.checked { "x" } else { " " };
        write!(f, "[{}] {:>4}  {}", mark, self.id, self.ingredient)
    }
}

/// The whole shopping list, in the order the store returned it
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShoppingList {
    pub items: Vec<ShoppingListItem>,
}

impl ShoppingList {
    pub fn new(items: Vec<ShoppingListItem>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.items.iter().filter(|item| !item.checked).count()
    }

    /// Group items by the recipe they came from, keeping first-seen order.
    /// Items without a surviving recipe are grouped under `None`.
    pub fn by_recipe(&self) -> IndexMap<Option<&str>, Vec<&ShoppingListItem>> {
        let mut groups: IndexMap<Option<&str>, Vec<&ShoppingListItem>> = IndexMap::new();
        for item in &self.items {
            groups
                .entry(item.recipe_name.as_deref())
                .or_default()
                .push(item);
        }
        groups
    }
}

impl fmt::Display for ShoppingList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (recipe, items) in self.by_recipe() {
            writeln!(f, "{}:", recipe.unwrap_or("Other"))?;
            for item in items {
                writeln!(f, "  {item}")?;
            }
        }
        write!(f, "{} of {} remaining", self.remaining(), self.items.len())
    }
}
