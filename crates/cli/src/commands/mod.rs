pub mod chat;
pub mod config;
pub mod diary;
pub mod feed;
pub mod migrate;
pub mod recommend;
pub mod seed;
pub mod weather;

use serde::Serialize;

use babtory_core::config::{AppConfig, LoadOptions};

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            details: None,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn success_with_details(
        command: &str,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            details: Some(details),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            details: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// Shared preamble for commands: load validated config or map the error to
/// the `config_validation` failure envelope.
pub(crate) fn load_config(command: &str) -> Result<AppConfig, CommandResult> {
    AppConfig::load(LoadOptions::default()).map_err(|error| {
        CommandResult::failure(
            command,
            "config_validation",
            format!("configuration issue: {error}"),
            2,
        )
    })
}

/// Catalog snapshot for read-only commands. Prefers the database; falls back
/// to the built-in seed dataset when the database is unreachable, not yet
/// migrated, or empty.
pub(crate) async fn resolve_catalog(config: &AppConfig) -> babtory_core::InMemoryCatalog {
    use babtory_db::{connect_with_settings, load_catalog};

    let pool = match connect_with_settings(
        &config.database.url,
        config.database.max_connections,
        config.database.timeout_secs,
    )
    .await
    {
        Ok(pool) => pool,
        Err(error) => {
            tracing::warn!(%error, "database unavailable, using built-in seed catalog");
            return babtory_core::InMemoryCatalog::with_seed_foods();
        }
    };

    let catalog = match load_catalog(&pool).await {
        Ok(catalog) => catalog,
        Err(error) => {
            tracing::warn!(%error, "catalog load failed, using built-in seed catalog");
            pool.close().await;
            return babtory_core::InMemoryCatalog::with_seed_foods();
        }
    };
    pool.close().await;

    if catalog.len() == 0 {
        tracing::warn!("foods table is empty, using built-in seed catalog");
        return babtory_core::InMemoryCatalog::with_seed_foods();
    }
    catalog
}

pub(crate) fn build_runtime(command: &str) -> Result<tokio::runtime::Runtime, CommandResult> {
    tokio::runtime::Builder::new_current_thread().enable_all().build().map_err(|error| {
        CommandResult::failure(
            command,
            "runtime_init",
            format!("failed to initialize async runtime: {error}"),
            3,
        )
    })
}
