use serde_json::json;

use babtory_weather::WeatherClient;

use crate::commands::{build_runtime, load_config, CommandResult};

pub fn run() -> CommandResult {
    let config = match load_config("weather") {
        Ok(config) => config,
        Err(result) => return result,
    };

    let runtime = match build_runtime("weather") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let client = match WeatherClient::from_config(&config.weather) {
        Ok(client) => client,
        Err(error) => {
            return CommandResult::failure("weather", "weather_client", error.to_string(), 4);
        }
    };

    let report = runtime.block_on(client.current_at_or_mock(
        config.weather.default_lat,
        config.weather.default_lon,
    ));

    let source = if report.is_mock { "mock" } else { "live" };
    CommandResult::success_with_details(
        "weather",
        format!(
            "{} ({}): {:.1}C, {} ({source})",
            report.location, report.condition, report.temperature_c, report.description
        ),
        json!({ "report": report }),
    )
}
