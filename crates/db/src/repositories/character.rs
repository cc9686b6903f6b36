use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use babtory_core::character::CharacterState;

use super::{CharacterRepository, RepositoryError};
use crate::DbPool;

pub struct SqlCharacterRepository {
    pool: DbPool,
}

impl SqlCharacterRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn stat_u8(row: &SqliteRow, column: &str) -> Result<u8, RepositoryError> {
    let value: i64 = row
        .try_get(column)
        .map_err(|err| RepositoryError::Decode(format!("character_states.{column}: {err}")))?;
    u8::try_from(value).map_err(|_| {
        RepositoryError::Decode(format!("character_states.{column} out of range: {value}"))
    })
}

fn stat_u32(row: &SqliteRow, column: &str) -> Result<u32, RepositoryError> {
    let value: i64 = row
        .try_get(column)
        .map_err(|err| RepositoryError::Decode(format!("character_states.{column}: {err}")))?;
    u32::try_from(value).map_err(|_| {
        RepositoryError::Decode(format!("character_states.{column} out of range: {value}"))
    })
}

fn row_to_state(row: &SqliteRow) -> Result<CharacterState, RepositoryError> {
    Ok(CharacterState {
        user_id: row
            .try_get("user_id")
            .map_err(|err| RepositoryError::Decode(format!("character_states.user_id: {err}")))?,
        satiety: stat_u8(row, "satiety")?,
        friendship: stat_u8(row, "friendship")?,
        exp: stat_u32(row, "exp")?,
        level: stat_u32(row, "level")?,
        last_meal_time: row.try_get::<Option<DateTime<Utc>>, _>("last_meal_time").map_err(
            |err| RepositoryError::Decode(format!("character_states.last_meal_time: {err}")),
        )?,
        last_update_time: row.try_get::<DateTime<Utc>, _>("last_update_time").map_err(|err| {
            RepositoryError::Decode(format!("character_states.last_update_time: {err}"))
        })?,
    })
}

#[async_trait::async_trait]
impl CharacterRepository for SqlCharacterRepository {
    async fn find(&self, user_id: &str) -> Result<Option<CharacterState>, RepositoryError> {
        let row = sqlx::query(
            "SELECT user_id, satiety, friendship, exp, level, last_meal_time, last_update_time
             FROM character_states WHERE user_id = ?1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_state).transpose()
    }

    async fn save(&self, state: &CharacterState) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO character_states (
                user_id, satiety, friendship, exp, level, last_meal_time, last_update_time
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT (user_id) DO UPDATE SET
                satiety = ?2, friendship = ?3, exp = ?4, level = ?5,
                last_meal_time = ?6, last_update_time = ?7",
        )
        .bind(&state.user_id)
        .bind(i64::from(state.satiety))
        .bind(i64::from(state.friendship))
        .bind(i64::from(state.exp))
        .bind(i64::from(state.level))
        .bind(state.last_meal_time)
        .bind(state.last_update_time)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
