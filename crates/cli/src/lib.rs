pub mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use babtory_core::config::{AppConfig, LoadOptions};

#[derive(Debug, Parser)]
#[command(
    name = "babtory",
    about = "Babtory food recommendation CLI",
    long_about = "Weather-aware food recommendations, character feeding, and the food diary for Babtory.",
    after_help = "Examples:\n  babtory recommend\n  babtory chat \"매콤한 게 땡겨\"\n  babtory feed 김치찌개 --recommended"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Upsert the built-in food dataset into the database")]
    Seed,
    #[command(about = "Recommend four dishes for the current weather")]
    Recommend {
        #[arg(long, help = "Seed the random fill deterministically")]
        seed: Option<u64>,
    },
    #[command(about = "Map a free-text craving to dish recommendations")]
    Chat {
        #[arg(help = "Message, e.g. \"한식 먹고 싶어\"")]
        message: String,
        #[arg(long, help = "Seed the random sampling deterministically")]
        seed: Option<u64>,
    },
    #[command(about = "Feed a dish to the character and log it in the diary")]
    Feed {
        #[arg(help = "Dish name, e.g. 김치찌개")]
        food: String,
        #[arg(long, default_value = "default_user", help = "User to feed")]
        user: String,
        #[arg(long, help = "Mark the meal as a followed recommendation")]
        recommended: bool,
    },
    #[command(about = "Show the most recent meals from the food diary")]
    Diary {
        #[arg(long, default_value = "default_user", help = "User to list meals for")]
        user: String,
        #[arg(long, default_value_t = 10, help = "Maximum number of entries")]
        limit: i64,
    },
    #[command(about = "Show the current weather lookup result")]
    Weather,
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
}

fn init_logging(config: &AppConfig) {
    use babtory_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    if let Ok(config) = AppConfig::load(LoadOptions::default()) {
        init_logging(&config);
    }

    let result = match cli.command {
        Command::Migrate => commands::migrate::run(),
        Command::Seed => commands::seed::run(),
        Command::Recommend { seed } => commands::recommend::run(seed),
        Command::Chat { message, seed } => commands::chat::run(&message, seed),
        Command::Feed { food, user, recommended } => {
            commands::feed::run(&user, &food, recommended)
        }
        Command::Diary { user, limit } => commands::diary::run(&user, limit),
        Command::Weather => commands::weather::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
