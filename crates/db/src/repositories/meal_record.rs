use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use babtory_core::character::MealRecord;

use super::{MealRecordRepository, RepositoryError};
use crate::DbPool;

pub struct SqlMealRecordRepository {
    pool: DbPool,
}

impl SqlMealRecordRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_record(row: &SqliteRow) -> Result<MealRecord, RepositoryError> {
    let id_raw: String = row
        .try_get("id")
        .map_err(|err| RepositoryError::Decode(format!("meal_records.id: {err}")))?;
    let id = Uuid::parse_str(&id_raw)
        .map_err(|err| RepositoryError::Decode(format!("meal_records.id `{id_raw}`: {err}")))?;

    let satiety_gain: i64 = row
        .try_get("satiety_gain")
        .map_err(|err| RepositoryError::Decode(format!("meal_records.satiety_gain: {err}")))?;
    let friendship_gain: i64 = row
        .try_get("friendship_gain")
        .map_err(|err| RepositoryError::Decode(format!("meal_records.friendship_gain: {err}")))?;
    let exp_gain: i64 = row
        .try_get("exp_gain")
        .map_err(|err| RepositoryError::Decode(format!("meal_records.exp_gain: {err}")))?;

    Ok(MealRecord {
        id,
        user_id: row
            .try_get("user_id")
            .map_err(|err| RepositoryError::Decode(format!("meal_records.user_id: {err}")))?,
        food_name: row
            .try_get("food_name")
            .map_err(|err| RepositoryError::Decode(format!("meal_records.food_name: {err}")))?,
        category: row
            .try_get("category")
            .map_err(|err| RepositoryError::Decode(format!("meal_records.category: {err}")))?,
        is_recommended: row.try_get::<i64, _>("is_recommended").map_err(|err| {
            RepositoryError::Decode(format!("meal_records.is_recommended: {err}"))
        })? != 0,
        satiety_gain: u8::try_from(satiety_gain).map_err(|_| {
            RepositoryError::Decode(format!("meal_records.satiety_gain out of range: {satiety_gain}"))
        })?,
        friendship_gain: u8::try_from(friendship_gain).map_err(|_| {
            RepositoryError::Decode(format!(
                "meal_records.friendship_gain out of range: {friendship_gain}"
            ))
        })?,
        exp_gain: u32::try_from(exp_gain).map_err(|_| {
            RepositoryError::Decode(format!("meal_records.exp_gain out of range: {exp_gain}"))
        })?,
        weather_condition: row.try_get("weather_condition").map_err(|err| {
            RepositoryError::Decode(format!("meal_records.weather_condition: {err}"))
        })?,
        temperature_c: row.try_get("temperature_c").map_err(|err| {
            RepositoryError::Decode(format!("meal_records.temperature_c: {err}"))
        })?,
        eaten_at: row
            .try_get::<DateTime<Utc>, _>("eaten_at")
            .map_err(|err| RepositoryError::Decode(format!("meal_records.eaten_at: {err}")))?,
    })
}

#[async_trait::async_trait]
impl MealRecordRepository for SqlMealRecordRepository {
    async fn insert(&self, record: &MealRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO meal_records (
                id, user_id, food_name, category, is_recommended,
                satiety_gain, friendship_gain, exp_gain,
                weather_condition, temperature_c, eaten_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        )
        .bind(record.id.to_string())
        .bind(&record.user_id)
        .bind(&record.food_name)
        .bind(&record.category)
        .bind(i64::from(record.is_recommended))
        .bind(i64::from(record.satiety_gain))
        .bind(i64::from(record.friendship_gain))
        .bind(i64::from(record.exp_gain))
        .bind(&record.weather_condition)
        .bind(record.temperature_c)
        .bind(record.eaten_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<MealRecord>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, user_id, food_name, category, is_recommended,
                    satiety_gain, friendship_gain, exp_gain,
                    weather_condition, temperature_c, eaten_at
             FROM meal_records
             WHERE user_id = ?1
             ORDER BY eaten_at DESC
             LIMIT ?2",
        )
        .bind(user_id)
        .bind(limit.max(1))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_record).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use babtory_core::character::{meal_reward, MealRecord};

    use super::SqlMealRecordRepository;
    use crate::migrations::run_pending;
    use crate::repositories::MealRecordRepository;
    use crate::{connect_with_settings, DbPool};

    async fn test_pool() -> DbPool {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        run_pending(&pool).await.expect("run migrations");
        pool
    }

    #[tokio::test]
    async fn insert_then_list_round_trips_all_fields() {
        let repo = SqlMealRecordRepository::new(test_pool().await);
        let now = Utc::now();
        let reward = meal_reward(true);

        let record =
            MealRecord::new("default_user", "김치찌개", Some("한식".into()), true, &reward, now)
                .with_weather("Rain", 12.5);
        repo.insert(&record).await.expect("insert");

        let listed = repo.list_for_user("default_user", 10).await.expect("list");
        assert_eq!(listed.len(), 1);
        let stored = &listed[0];
        assert_eq!(stored.id, record.id);
        assert_eq!(stored.food_name, "김치찌개");
        assert_eq!(stored.category.as_deref(), Some("한식"));
        assert!(stored.is_recommended);
        assert_eq!(stored.satiety_gain, 40);
        assert_eq!(stored.friendship_gain, 20);
        assert_eq!(stored.exp_gain, 50);
        assert_eq!(stored.weather_condition.as_deref(), Some("Rain"));
        assert_eq!(stored.temperature_c, Some(12.5));
    }

    #[tokio::test]
    async fn list_is_newest_first_scoped_to_user_and_capped() {
        let repo = SqlMealRecordRepository::new(test_pool().await);
        let base = Utc::now();
        let reward = meal_reward(false);

        for (idx, name) in ["볶음밥", "라멘", "초밥"].iter().enumerate() {
            let record = MealRecord::new(
                "default_user",
                *name,
                None,
                false,
                &reward,
                base + Duration::minutes(idx as i64),
            );
            repo.insert(&record).await.expect("insert");
        }
        let other = MealRecord::new("someone_else", "파스타", None, false, &reward, base);
        repo.insert(&other).await.expect("insert other user");

        let listed = repo.list_for_user("default_user", 2).await.expect("list");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].food_name, "초밥");
        assert_eq!(listed[1].food_name, "라멘");
    }
}
