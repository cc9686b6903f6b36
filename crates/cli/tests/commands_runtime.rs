use std::env;
use std::sync::{Mutex, OnceLock};

use babtory_cli::commands::{chat, diary, feed, migrate, recommend, seed};
use serde_json::Value;

#[test]
fn migrate_returns_success_with_valid_env() {
    with_env(&[("BABTORY_DATABASE_URL", "sqlite::memory:")], || {
        let result = migrate::run();
        assert_eq!(result.exit_code, 0, "expected successful migrate run");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "migrate");
        assert_eq!(payload["status"], "ok");
    });
}

#[test]
fn migrate_returns_config_failure_with_bad_database_url() {
    with_env(&[("BABTORY_DATABASE_URL", "postgres://nope")], || {
        let result = migrate::run();
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "migrate");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn seed_is_idempotent_across_runs() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("babtory.db").display());

    with_env(&[("BABTORY_DATABASE_URL", &url)], || {
        let first = seed::run();
        assert_eq!(first.exit_code, 0, "expected first seed invocation success");
        let first_payload = parse_payload(&first.output);
        assert_eq!(first_payload["status"], "ok");

        let second = seed::run();
        assert_eq!(second.exit_code, 0, "expected second seed invocation success");
        let second_payload = parse_payload(&second.output);
        assert_eq!(second_payload["status"], "ok");

        assert_eq!(first_payload["message"], second_payload["message"]);
    });
}

#[test]
fn recommend_returns_four_weather_picks_without_an_api_key() {
    with_env(&[("BABTORY_DATABASE_URL", "sqlite::memory:")], || {
        let result = recommend::run(Some(11));
        assert_eq!(result.exit_code, 0, "expected successful recommend run");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "recommend");
        assert_eq!(payload["status"], "ok");

        // Keyless runs serve the mock report.
        assert_eq!(payload["details"]["weather"]["is_mock"], true);
        assert_eq!(payload["details"]["weather"]["condition"], "Clear");

        let picks = payload["details"]["picks"].as_array().expect("picks array");
        assert_eq!(picks.len(), 4);
        assert_eq!(picks[0]["provenance"], "weather_ingredient");
        assert_eq!(picks[1]["provenance"], "weather_category");
    });
}

#[test]
fn recommend_is_deterministic_for_a_fixed_seed() {
    with_env(&[("BABTORY_DATABASE_URL", "sqlite::memory:")], || {
        let first = parse_payload(&recommend::run(Some(7)).output);
        let second = parse_payload(&recommend::run(Some(7)).output);
        assert_eq!(first["details"]["picks"], second["details"]["picks"]);
    });
}

#[test]
fn chat_routes_category_keywords_to_that_category() {
    with_env(&[("BABTORY_DATABASE_URL", "sqlite::memory:")], || {
        let result = chat::run("한식 먹고 싶어", Some(3));
        assert_eq!(result.exit_code, 0, "expected successful chat run");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "chat");
        assert_eq!(payload["details"]["route"], "filter");

        let picks = payload["details"]["picks"].as_array().expect("picks array");
        assert_eq!(picks.len(), 3);
        for pick in picks {
            assert_eq!(pick["category"], "한식");
        }
    });
}

#[test]
fn chat_spicy_keyword_uses_the_shortlist() {
    with_env(&[("BABTORY_DATABASE_URL", "sqlite::memory:")], || {
        let result = chat::run("매콤한 게 땡겨", Some(3));
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["details"]["route"], "spicy_shortlist");
        let picks = payload["details"]["picks"].as_array().expect("picks array");
        assert_eq!(picks.len(), 3);
    });
}

#[test]
fn feed_then_diary_shares_state_through_the_database() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("babtory.db").display());

    with_env(&[("BABTORY_DATABASE_URL", &url)], || {
        let fed = feed::run("default_user", "김치찌개", true);
        assert_eq!(fed.exit_code, 0, "expected successful feed run");

        let fed_payload = parse_payload(&fed.output);
        assert_eq!(fed_payload["command"], "feed");
        assert_eq!(fed_payload["details"]["character"]["satiety"], 90);
        assert_eq!(fed_payload["details"]["character"]["friendship"], 20);
        assert_eq!(fed_payload["details"]["leveled_up"], false);

        let listed = diary::run("default_user", 10);
        assert_eq!(listed.exit_code, 0, "expected successful diary run");

        let diary_payload = parse_payload(&listed.output);
        let entries = diary_payload["details"]["entries"].as_array().expect("entries array");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["food_name"], "김치찌개");
        assert_eq!(entries[0]["is_recommended"], true);
    });
}

#[test]
fn diary_is_empty_for_an_unknown_user() {
    with_env(&[("BABTORY_DATABASE_URL", "sqlite::memory:")], || {
        let result = diary::run("nobody", 10);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        let entries = payload["details"]["entries"].as_array().expect("entries array");
        assert!(entries.is_empty());
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "BABTORY_DATABASE_URL",
        "BABTORY_DATABASE_MAX_CONNECTIONS",
        "BABTORY_DATABASE_TIMEOUT_SECS",
        "BABTORY_WEATHER_API_KEY",
        "BABTORY_WEATHER_BASE_URL",
        "BABTORY_WEATHER_TIMEOUT_SECS",
        "BABTORY_WEATHER_DEFAULT_LAT",
        "BABTORY_WEATHER_DEFAULT_LON",
        "BABTORY_LOGGING_LEVEL",
        "BABTORY_LOGGING_FORMAT",
        "BABTORY_LOG_LEVEL",
        "BABTORY_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
