//! Types for the recommendation engine.

use serde::{Deserialize, Serialize};

use crate::catalog::FoodItem;

/// Which rule produced a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    WeatherIngredient,
    WeatherCategory,
    Random,
    Filtered,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WeatherIngredient => "weather_ingredient",
            Self::WeatherCategory => "weather_category",
            Self::Random => "random",
            Self::Filtered => "filtered",
        }
    }
}

/// One recommended dish. Constructed per call, returned to the caller, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    pub category: String,
    pub ingredient_tags: Vec<String>,
    pub reason: String,
    pub provenance: Provenance,
}

impl Recommendation {
    pub fn from_item(item: FoodItem, reason: impl Into<String>, provenance: Provenance) -> Self {
        Self {
            name: item.name,
            category: item.category,
            ingredient_tags: item.ingredient_tags,
            reason: reason.into(),
            provenance,
        }
    }
}

/// Filter for the explicit category/ingredient variant. An empty filter
/// means "random `limit` items from everything"; unknown labels simply match
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodFilter {
    pub category: Option<String>,
    pub ingredients: Vec<String>,
    pub limit: usize,
}

impl Default for FoodFilter {
    fn default() -> Self {
        Self { category: None, ingredients: Vec::new(), limit: super::DEFAULT_FILTER_LIMIT }
    }
}

impl FoodFilter {
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_ingredients<S: Into<String>>(mut self, ingredients: Vec<S>) -> Self {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }
}
