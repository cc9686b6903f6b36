use std::collections::HashSet;

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use babtory_core::catalog::FoodItem;

use super::{FoodRepository, RepositoryError};
use crate::DbPool;

pub struct SqlFoodRepository {
    pool: DbPool,
}

impl SqlFoodRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_food(row: &SqliteRow) -> Result<FoodItem, RepositoryError> {
    let name: String = row
        .try_get("name")
        .map_err(|err| RepositoryError::Decode(format!("foods.name: {err}")))?;
    let category: String = row
        .try_get("category")
        .map_err(|err| RepositoryError::Decode(format!("foods.category: {err}")))?;
    let ingredients: String = row
        .try_get("ingredients")
        .map_err(|err| RepositoryError::Decode(format!("foods.ingredients: {err}")))?;

    let tags: Vec<String> = ingredients
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(ToString::to_string)
        .collect();

    Ok(FoodItem { name, category, ingredient_tags: tags })
}

fn join_tags(item: &FoodItem) -> String {
    item.ingredient_tags.join(",")
}

#[async_trait::async_trait]
impl FoodRepository for SqlFoodRepository {
    async fn all(&self) -> Result<Vec<FoodItem>, RepositoryError> {
        let rows = sqlx::query("SELECT name, category, ingredients FROM foods ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_food).collect()
    }

    async fn by_category(&self, category: &str) -> Result<Vec<FoodItem>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT name, category, ingredients FROM foods WHERE category = ?1 ORDER BY rowid",
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_food).collect()
    }

    async fn by_ingredient(&self, tag: &str) -> Result<Vec<FoodItem>, RepositoryError> {
        // Wrapping both sides in commas makes LIKE match whole tags only, so
        // a lookup for '밥' does not also match '볶음밥' as a tag.
        let rows = sqlx::query(
            "SELECT name, category, ingredients FROM foods
             WHERE ',' || ingredients || ',' LIKE '%,' || ?1 || ',%'
             ORDER BY rowid",
        )
        .bind(tag)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_food).collect()
    }

    async fn excluding_names(
        &self,
        names: &HashSet<String>,
    ) -> Result<Vec<FoodItem>, RepositoryError> {
        if names.is_empty() {
            return self.all().await;
        }

        let placeholders =
            (1..=names.len()).map(|i| format!("?{i}")).collect::<Vec<_>>().join(", ");
        let sql = format!(
            "SELECT name, category, ingredients FROM foods
             WHERE name NOT IN ({placeholders}) ORDER BY rowid"
        );

        let mut query = sqlx::query(&sql);
        for name in names {
            query = query.bind(name);
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(row_to_food).collect()
    }

    async fn upsert(&self, item: &FoodItem) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO foods (name, category, ingredients) VALUES (?1, ?2, ?3)
             ON CONFLICT (name) DO UPDATE SET category = ?2, ingredients = ?3",
        )
        .bind(&item.name)
        .bind(&item.category)
        .bind(join_tags(item))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(1) FROM foods").fetch_one(&self.pool).await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use babtory_core::catalog::FoodItem;

    use super::SqlFoodRepository;
    use crate::migrations::run_pending;
    use crate::repositories::FoodRepository;
    use crate::{connect_with_settings, DbPool};

    async fn test_pool() -> DbPool {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        run_pending(&pool).await.expect("run migrations");
        pool
    }

    fn item(name: &str, category: &str, tags: &[&str]) -> FoodItem {
        FoodItem::new(name, category, tags.iter().map(ToString::to_string).collect())
    }

    #[tokio::test]
    async fn upsert_then_query_by_category_and_tag() {
        let repo = SqlFoodRepository::new(test_pool().await);

        repo.upsert(&item("김치찌개", "한식", &["국물", "고기"])).await.expect("upsert");
        repo.upsert(&item("초밥", "일식", &["해산물", "밥"])).await.expect("upsert");
        repo.upsert(&item("볶음밥", "중식", &["밥"])).await.expect("upsert");

        let korean = repo.by_category("한식").await.expect("by_category");
        assert_eq!(korean.len(), 1);
        assert_eq!(korean[0].name, "김치찌개");

        let rice = repo.by_ingredient("밥").await.expect("by_ingredient");
        assert_eq!(rice.len(), 2);

        assert_eq!(repo.count().await.expect("count"), 3);
    }

    #[tokio::test]
    async fn tag_lookup_matches_whole_tags_only() {
        let repo = SqlFoodRepository::new(test_pool().await);

        repo.upsert(&item("비빔밥", "한식", &["밥", "야채"])).await.expect("upsert");
        repo.upsert(&item("김밥", "분식", &["김과밥"])).await.expect("upsert");

        let rice = repo.by_ingredient("밥").await.expect("by_ingredient");
        assert_eq!(rice.len(), 1);
        assert_eq!(rice[0].name, "비빔밥");
    }

    #[tokio::test]
    async fn upsert_replaces_existing_row() {
        let repo = SqlFoodRepository::new(test_pool().await);

        repo.upsert(&item("라면", "분식", &["면"])).await.expect("insert");
        repo.upsert(&item("라면", "분식", &["면", "국물"])).await.expect("update");

        let all = repo.all().await.expect("all");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].ingredient_tags, vec!["면", "국물"]);
    }

    #[tokio::test]
    async fn excluding_names_filters_and_handles_empty_set() {
        let repo = SqlFoodRepository::new(test_pool().await);

        repo.upsert(&item("떡볶이", "분식", &["튀김"])).await.expect("upsert");
        repo.upsert(&item("돈까스", "일식", &["튀김", "고기"])).await.expect("upsert");

        let none_excluded = repo.excluding_names(&HashSet::new()).await.expect("all");
        assert_eq!(none_excluded.len(), 2);

        let mut taken = HashSet::new();
        taken.insert("떡볶이".to_string());
        let rest = repo.excluding_names(&taken).await.expect("excluding");
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].name, "돈까스");
    }
}
