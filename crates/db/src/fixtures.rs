//! Seed loading for the food catalog.

use tracing::debug;

use babtory_core::catalog::{seed_foods, FoodItem, InMemoryCatalog};
use babtory_core::errors::DomainError;

use crate::repositories::{FoodRepository, RepositoryError, SqlFoodRepository};
use crate::DbPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedResult {
    pub seeded: usize,
    pub total: i64,
}

/// Upserts the built-in dataset. Safe to re-run; existing rows are refreshed
/// in place.
pub async fn seed_food_catalog(pool: &DbPool) -> Result<SeedResult, RepositoryError> {
    let repo = SqlFoodRepository::new(pool.clone());
    let foods = seed_foods();
    let seeded = foods.len();

    for item in &foods {
        repo.upsert(item).await?;
    }

    let total = repo.count().await?;
    debug!(seeded, total, "food catalog seeded");
    Ok(SeedResult { seeded, total })
}

/// Snapshot of the foods table as an in-memory catalog for the engine.
/// Returns the rows in insertion order.
pub async fn load_catalog(pool: &DbPool) -> Result<InMemoryCatalog, RepositoryError> {
    let repo = SqlFoodRepository::new(pool.clone());
    let items: Vec<FoodItem> = repo.all().await?;
    InMemoryCatalog::new(items).map_err(|err: DomainError| RepositoryError::Decode(err.to_string()))
}
