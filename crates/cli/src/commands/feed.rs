use chrono::Utc;
use serde_json::json;

use babtory_core::catalog::FoodCatalog;
use babtory_core::character::{meal_reward, CharacterState, MealRecord};
use babtory_db::repositories::{
    CharacterRepository, MealRecordRepository, SqlCharacterRepository, SqlMealRecordRepository,
};
use babtory_db::{connect_with_settings, load_catalog, migrations};
use babtory_weather::WeatherClient;

use crate::commands::{build_runtime, load_config, CommandResult};

pub fn run(user_id: &str, food_name: &str, recommended: bool) -> CommandResult {
    let config = match load_config("feed") {
        Ok(config) => config,
        Err(result) => return result,
    };

    let runtime = match build_runtime("feed") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let result = runtime.block_on(async {
        let pool = connect_with_settings(
            &config.database.url,
            config.database.max_connections,
            config.database.timeout_secs,
        )
        .await
        .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;

        migrations::run_pending(&pool)
            .await
            .map_err(|error| ("migration", error.to_string(), 5u8))?;

        // The fed dish does not have to exist in the catalog; an unknown name
        // is recorded without a category.
        let category = match load_catalog(&pool).await {
            Ok(catalog) => catalog
                .all()
                .into_iter()
                .find(|item| item.name == food_name)
                .map(|item| item.category),
            Err(_) => None,
        };

        let characters = SqlCharacterRepository::new(pool.clone());
        let records = SqlMealRecordRepository::new(pool.clone());
        let now = Utc::now();

        let mut state = characters
            .find(user_id)
            .await
            .map_err(|error| ("character_load", error.to_string(), 6u8))?
            .unwrap_or_else(|| CharacterState::new(user_id, now));

        state.apply_satiety_decay(now);
        let reward = meal_reward(recommended);
        let leveled_up = state.record_meal(&reward, now);

        characters
            .save(&state)
            .await
            .map_err(|error| ("character_save", error.to_string(), 6u8))?;

        let mut record =
            MealRecord::new(user_id, food_name, category, recommended, &reward, now);
        if let Ok(client) = WeatherClient::from_config(&config.weather) {
            let report = client.current_or_mock().await;
            record = record.with_weather(report.condition, report.temperature_c);
        }
        records
            .insert(&record)
            .await
            .map_err(|error| ("meal_record", error.to_string(), 6u8))?;

        pool.close().await;
        Ok::<_, (&'static str, String, u8)>((state, leveled_up))
    });

    match result {
        Ok((state, leveled_up)) => {
            let mut message = format!(
                "{user_id} fed {food_name}: satiety {}, friendship {}, level {} (exp {})",
                state.satiety, state.friendship, state.level, state.exp
            );
            if leveled_up {
                message.push_str(" - level up!");
            }
            CommandResult::success_with_details(
                "feed",
                message,
                json!({ "character": state, "leveled_up": leveled_up }),
            )
        }
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("feed", error_class, message, exit_code)
        }
    }
}
