pub mod catalog;
pub mod character;
pub mod config;
pub mod dialogue;
pub mod errors;
pub mod recommend;
pub mod weather;

pub use catalog::{FoodCatalog, FoodItem, InMemoryCatalog};
pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use character::{CharacterState, MealReward, MealRecord};
pub use dialogue::{route_message, DialogueRoute};
pub use errors::DomainError;
pub use recommend::{FoodFilter, Provenance, Recommendation, RecommendationEngine};
pub use weather::{WeatherInput, WeatherKind, WeatherReport};
