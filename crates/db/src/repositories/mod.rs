use std::collections::HashSet;

use async_trait::async_trait;
use thiserror::Error;

use babtory_core::catalog::FoodItem;
use babtory_core::character::{CharacterState, MealRecord};

pub mod character;
pub mod food;
pub mod meal_record;

pub use character::SqlCharacterRepository;
pub use food::SqlFoodRepository;
pub use meal_record::SqlMealRecordRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

#[async_trait]
pub trait FoodRepository: Send + Sync {
    async fn all(&self) -> Result<Vec<FoodItem>, RepositoryError>;
    async fn by_category(&self, category: &str) -> Result<Vec<FoodItem>, RepositoryError>;
    async fn by_ingredient(&self, tag: &str) -> Result<Vec<FoodItem>, RepositoryError>;
    async fn excluding_names(
        &self,
        names: &HashSet<String>,
    ) -> Result<Vec<FoodItem>, RepositoryError>;
    async fn upsert(&self, item: &FoodItem) -> Result<(), RepositoryError>;
    async fn count(&self) -> Result<i64, RepositoryError>;
}

#[async_trait]
pub trait CharacterRepository: Send + Sync {
    async fn find(&self, user_id: &str) -> Result<Option<CharacterState>, RepositoryError>;
    async fn save(&self, state: &CharacterState) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait MealRecordRepository: Send + Sync {
    async fn insert(&self, record: &MealRecord) -> Result<(), RepositoryError>;
    async fn list_for_user(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<MealRecord>, RepositoryError>;
}
