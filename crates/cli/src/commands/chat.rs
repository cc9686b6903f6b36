use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

use babtory_core::dialogue;
use babtory_core::recommend::RecommendationEngine;

use crate::commands::{build_runtime, load_config, resolve_catalog, CommandResult};

pub fn run(message: &str, seed: Option<u64>) -> CommandResult {
    let config = match load_config("chat") {
        Ok(config) => config,
        Err(result) => return result,
    };

    let runtime = match build_runtime("chat") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let catalog = runtime.block_on(resolve_catalog(&config));
    let engine = RecommendationEngine::new(catalog);
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let route = dialogue::route_message(message);
    let picks = dialogue::respond(&engine, message, &mut rng);

    if picks.is_empty() {
        return CommandResult::failure(
            "chat",
            "empty_catalog",
            "no dishes available to recommend",
            5,
        );
    }

    let names: Vec<&str> = picks.iter().map(|p| p.name.as_str()).collect();
    CommandResult::success_with_details(
        "chat",
        format!("{} picks: {}", picks.len(), names.join(", ")),
        json!({ "route": route_label(&route), "picks": picks }),
    )
}

fn route_label(route: &dialogue::DialogueRoute) -> &'static str {
    match route {
        dialogue::DialogueRoute::Filter(_) => "filter",
        dialogue::DialogueRoute::SpicyShortlist => "spicy_shortlist",
        dialogue::DialogueRoute::RandomFallback => "random_fallback",
    }
}
