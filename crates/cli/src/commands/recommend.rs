use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

use babtory_core::recommend::RecommendationEngine;
use babtory_weather::WeatherClient;

use crate::commands::{build_runtime, load_config, resolve_catalog, CommandResult};

pub fn run(seed: Option<u64>) -> CommandResult {
    let config = match load_config("recommend") {
        Ok(config) => config,
        Err(result) => return result,
    };

    let runtime = match build_runtime("recommend") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let result = runtime.block_on(async {
        let catalog = resolve_catalog(&config).await;
        let client = WeatherClient::from_config(&config.weather)
            .map_err(|error| ("weather_client", error.to_string(), 4u8))?;
        let report = client.current_or_mock().await;

        let engine = RecommendationEngine::new(catalog);
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let picks = engine.recommend_for_weather(&report.to_input(), &mut rng);
        Ok::<_, (&'static str, String, u8)>((report, picks))
    });

    match result {
        Ok((report, picks)) => {
            let names: Vec<&str> = picks.iter().map(|p| p.name.as_str()).collect();
            CommandResult::success_with_details(
                "recommend",
                format!(
                    "{} picks for {} {:.1}C in {}: {}",
                    picks.len(),
                    report.condition,
                    report.temperature_c,
                    report.location,
                    names.join(", ")
                ),
                json!({ "weather": report, "picks": picks }),
            )
        }
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("recommend", error_class, message, exit_code)
        }
    }
}
