//! Recommendation engine implementation.

use std::collections::HashSet;

use rand::Rng;

use super::sampling::{pick_one, sample_distinct};
use super::types::{FoodFilter, Provenance, Recommendation};
use super::{COLD_THRESHOLD_C, HOT_THRESHOLD_C, WEATHER_PICK_COUNT};
use crate::catalog::FoodCatalog;
use crate::weather::{WeatherInput, WeatherKind};

/// Ingredient tags the weather rules key on.
pub const TAG_BROTH: &str = "국물";
pub const TAG_NOODLE: &str = "면";
pub const TAG_RICE: &str = "밥";

/// Categories the weather rules key on. Bad weather routes to the comfort
/// category; the other three cover hot, cold, and mild days.
pub const CATEGORY_COMFORT: &str = "찜/탕";
pub const CATEGORY_LIGHT: &str = "일식";
pub const CATEGORY_HEARTY: &str = "한식";
pub const CATEGORY_FILLING: &str = "중식";

/// Reason shown on random-fill picks.
pub const REASON_RANDOM: &str = "이것도 맛있을 것 같아!";

/// Rule 1: ingredient-first weather mapping. Strict priority order, first
/// match wins, no fallthrough.
fn ingredient_rule(weather: &WeatherInput) -> (&'static str, &'static str) {
    if weather.kind.is_precipitation() {
        (TAG_BROTH, "비 오는 날엔 따뜻한 국물이 최고!")
    } else if weather.kind == WeatherKind::Snow {
        (TAG_BROTH, "눈 오는 날엔 뜨끈한 국물!")
    } else if weather.temperature_c > HOT_THRESHOLD_C {
        (TAG_NOODLE, "더울 땐 시원한 면 요리!")
    } else if weather.temperature_c < COLD_THRESHOLD_C {
        (TAG_BROTH, "추울 땐 따뜻한 국물!")
    } else {
        (TAG_RICE, "든든하게 밥 먹자!")
    }
}

/// Rule 2: category-first weather mapping, independent of Rule 1.
fn category_rule(weather: &WeatherInput) -> (&'static str, &'static str) {
    if weather.kind.is_precipitation() || weather.kind == WeatherKind::Snow {
        (CATEGORY_COMFORT, "궂은 날씨엔 뜨끈한 찜/탕이지!")
    } else if weather.temperature_c > HOT_THRESHOLD_C {
        (CATEGORY_LIGHT, "더울 땐 깔끔한 일식!")
    } else if weather.temperature_c < COLD_THRESHOLD_C {
        (CATEGORY_HEARTY, "추울 땐 든든한 한식!")
    } else {
        (CATEGORY_FILLING, "오늘은 중식 어때?")
    }
}

/// The recommendation engine. Stateless apart from the catalog handle; each
/// call depends only on its own random draws and the catalog snapshot.
#[derive(Debug, Clone)]
pub struct RecommendationEngine<C> {
    catalog: C,
}

impl<C: FoodCatalog> RecommendationEngine<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Weather-driven 4-pick: one ingredient-rule pick, one category-rule
    /// pick (de-duplicated against the first by name), then random fill
    /// without replacement. Returns fewer than four only when the catalog
    /// itself has fewer distinct items; an empty catalog yields an empty vec.
    pub fn recommend_for_weather<R: Rng + ?Sized>(
        &self,
        weather: &WeatherInput,
        rng: &mut R,
    ) -> Vec<Recommendation> {
        let mut picks: Vec<Recommendation> = Vec::with_capacity(WEATHER_PICK_COUNT);

        let (tag, reason) = ingredient_rule(weather);
        let ingredient_matches = self.catalog.by_ingredient(tag);
        if let Some(item) = pick_one(&ingredient_matches, rng) {
            picks.push(Recommendation::from_item(
                item.clone(),
                reason,
                Provenance::WeatherIngredient,
            ));
        }

        let (category, reason) = category_rule(weather);
        let mut category_matches = self.catalog.by_category(category);
        // De-dup only against the single Rule-1 pick at this stage.
        if let Some(first) = picks.first() {
            category_matches.retain(|item| item.name != first.name);
        }
        if let Some(item) = pick_one(&category_matches, rng) {
            picks.push(Recommendation::from_item(item.clone(), reason, Provenance::WeatherCategory));
        }

        let chosen: HashSet<String> = picks.iter().map(|pick| pick.name.clone()).collect();
        let available = self.catalog.excluding_names(&chosen);
        let fill = WEATHER_PICK_COUNT.saturating_sub(picks.len());
        for item in sample_distinct(&available, fill, rng) {
            picks.push(Recommendation::from_item(item, REASON_RANDOM, Provenance::Random));
        }

        picks
    }

    /// Filter-driven variant: exact category match, AND semantics over
    /// ingredient tags, then a uniform draw down to `filter.limit`. A
    /// filtered set smaller than the limit is returned whole.
    pub fn recommend_filtered<R: Rng + ?Sized>(
        &self,
        filter: &FoodFilter,
        rng: &mut R,
    ) -> Vec<Recommendation> {
        let mut candidates = match &filter.category {
            Some(category) => self.catalog.by_category(category),
            None => self.catalog.all(),
        };
        if !filter.ingredients.is_empty() {
            candidates.retain(|item| item.has_all_tags(&filter.ingredients));
        }

        sample_distinct(&candidates, filter.limit.max(1), rng)
            .into_iter()
            .map(|item| {
                let reason = filter_reason(filter);
                Recommendation::from_item(item, reason, Provenance::Filtered)
            })
            .collect()
    }
}

fn filter_reason(filter: &FoodFilter) -> String {
    match (&filter.category, filter.ingredients.is_empty()) {
        (Some(category), true) => format!("{category} 중에서 골라봤어!"),
        (Some(category), false) => {
            format!("{category}에서 {} 들어간 걸로 골라봤어!", filter.ingredients.join(", "))
        }
        (None, false) => format!("{} 들어간 걸로 골라봤어!", filter.ingredients.join(", ")),
        (None, true) => "아무거나 맛있는 걸로 골라봤어!".to_owned(),
    }
}
