//! Recipe records and their ingredient links into the product catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ProductId, RecipeId};

/// How hard a recipe is to prepare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    #[default]
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Medium => write!(f, "medium"),
            Self::Hard => write!(f, "hard"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// One ingredient line, optionally linked to a catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub amount: String,
    /// Product sold in the store for this ingredient, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
}

/// A recipe as published in `data/recipes.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Preparation time in minutes.
    #[serde(default)]
    pub prep_time: u32,
    /// Cooking time in minutes.
    #[serde(default)]
    pub cook_time: u32,
    #[serde(default)]
    pub servings: u32,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: u32,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub nutritional_info: BTreeMap<String, String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

impl Recipe {
    /// Total hands-on plus cooking time in minutes.
    #[must_use]
    pub const fn total_time_minutes(&self) -> u32 {
        self.prep_time.saturating_add(self.cook_time)
    }

    /// Ingredients that link to a catalog product.
    pub fn linked_products(&self) -> impl Iterator<Item = &ProductId> {
        self.ingredients
            .iter()
            .filter_map(|ingredient| ingredient.product_id.as_ref())
    }
}

/// The `data/recipes.json` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipesPayload {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_linked_products_and_time() {
        let recipe: Recipe = serde_json::from_str(
            r#"{
                "id": "ragi-porridge",
                "name": "Traditional Ragi Porridge",
                "difficulty": "easy",
                "prepTime": 5,
                "cookTime": 10,
                "ingredients": [
                    {"name": "Ragi flour", "amount": "4 tbsp", "productId": "ragi-flour"},
                    {"name": "Water", "amount": "2 cups"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(recipe.total_time_minutes(), 15);
        assert_eq!(recipe.difficulty, Difficulty::Easy);
        let linked: Vec<_> = recipe.linked_products().collect();
        assert_eq!(linked, vec![&ProductId::new("ragi-flour")]);
    }

    #[test]
    fn test_unknown_difficulty() {
        let difficulty: Difficulty = serde_json::from_str("\"expert\"").unwrap();
        assert_eq!(difficulty, Difficulty::Unknown);
    }
}
