use serde_json::json;

use babtory_db::repositories::{MealRecordRepository, SqlMealRecordRepository};
use babtory_db::{connect_with_settings, migrations};

use crate::commands::{build_runtime, load_config, CommandResult};

pub fn run(user_id: &str, limit: i64) -> CommandResult {
    let config = match load_config("diary") {
        Ok(config) => config,
        Err(result) => return result,
    };

    let runtime = match build_runtime("diary") {
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

        let records = SqlMealRecordRepository::new(pool.clone());
        let entries = records
            .list_for_user(user_id, limit)
            .await
            .map_err(|error| ("diary_load", error.to_string(), 6u8))?;

        pool.close().await;
        Ok::<_, (&'static str, String, u8)>(entries)
    });

    match result {
        Ok(entries) => {
            let lines: Vec<String> = entries
                .iter()
                .map(|entry| {
                    format!(
                        "  - {} {} ({}{})",
                        entry.eaten_at.format("%Y-%m-%d %H:%M"),
                        entry.food_name,
                        entry.category.as_deref().unwrap_or("기타"),
                        if entry.is_recommended { ", recommended" } else { "" },
                    )
                })
                .collect();
            let message = if lines.is_empty() {
                format!("no meals recorded for {user_id}")
            } else {
                format!("{} meals for {user_id}:\n{}", entries.len(), lines.join("\n"))
            };
            CommandResult::success_with_details("diary", message, json!({ "entries": entries }))
        }
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("diary", error_class, message, exit_code)
        }
    }
}
