//! Weather-conditioned food recommendation engine.
//!
//! Two public operations: the weather-driven 4-pick
//! ([`RecommendationEngine::recommend_for_weather`]) and the filter-driven
//! variant used by the dialogue front end
//! ([`RecommendationEngine::recommend_filtered`]). Both are synchronous,
//! stateless, and delegate all catalog access to a [`crate::FoodCatalog`].

mod engine;
mod sampling;
mod types;

pub use engine::RecommendationEngine;
pub use sampling::{pick_one, sample_distinct};
pub use types::{FoodFilter, Provenance, Recommendation};

/// Upper bound on the weather-driven recommendation set.
pub const WEATHER_PICK_COUNT: usize = 4;

/// Default number of results for the filter-driven variant.
pub const DEFAULT_FILTER_LIMIT: usize = 3;

/// Above this temperature the hot-weather rules fire.
pub const HOT_THRESHOLD_C: f64 = 28.0;

/// Below this temperature the cold-weather rules fire.
pub const COLD_THRESHOLD_C: f64 = 10.0;
