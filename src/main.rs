mod app;
mod chat;
mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod storage;
#[cfg(test)]
mod testing;

use app::TravelBot;
use chat::SmallTalk;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use datasources::OpenWeatherMapClient;
use dialoguer::Input;
use error::Result;
use logic::ForecastProvider;
use storage::LocationDirectory;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level())),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match cli.command {
        Some(Commands::Init) => {
            Config::setup_interactive(cli.config.as_ref())?;
            return Ok(());
        }
        _ => Config::load(cli.config.as_ref())?,
    };

    if let Some(Commands::Check) = cli.command {
        return check(&config, cli.data_dir.as_ref()).await;
    }

    let mut bot = build_bot(&config, cli.data_dir.as_ref())?;

    match cli.command {
        Some(Commands::Weather { location }) => {
            let location = if location.is_empty() {
                config.chat.default_location.clone()
            } else {
                location.join(" ")
            };
            println!("{}", bot.weather(&location).await);
        }
        Some(Commands::Save {
            name,
            latitude,
            longitude,
        }) => {
            let location = bot.save_location(&name, latitude, longitude)?;
            println!("Saved {} at ({}).", location.name, location.coordinates);
        }
        Some(Commands::Recommend { locations }) => {
            println!("{}", bot.recommend(&locations).await);
        }
        Some(Commands::Locations) => {
            println!("{}", bot.list_locations());
        }
        Some(Commands::Chat) | None => {
            chat_loop(&mut bot, &config.chat.bot_name).await;
        }
        Some(Commands::Init) | Some(Commands::Check) => {}
    }

    Ok(())
}

fn build_bot(
    config: &Config,
    data_dir: Option<&std::path::PathBuf>,
) -> Result<TravelBot<OpenWeatherMapClient>> {
    let directory = LocationDirectory::open(config.locations_path(data_dir)?)?;
    let client = OpenWeatherMapClient::new(config.openweathermap.clone());
    let provider = ForecastProvider::new(client, config.cache_ttl());

    Ok(TravelBot::new(
        directory,
        provider,
        Box::new(SmallTalk::new(config.chat.bot_name.clone())),
    )
    .with_default_location(config.chat.default_location.clone())
    .with_units(&config.openweathermap.units))
}

/// Read messages until EOF or "quit", answering each before reading the next
async fn chat_loop(bot: &mut TravelBot<OpenWeatherMapClient>, bot_name: &str) {
    println!("{}: Hi! Ask me about the weather, or type \"help\". Type \"quit\" to leave.", bot_name);

    loop {
        let message: String = match Input::new()
            .with_prompt("You")
            .allow_empty(true)
            .interact_text()
        {
            Ok(m) => m,
            Err(e) => {
                tracing::debug!("Input closed: {}", e);
                break;
            }
        };

        if matches!(message.trim().to_lowercase().as_str(), "quit" | "exit") {
            println!("{}: Goodbye!", bot_name);
            break;
        }

        let reply = bot.handle_message(&message).await;
        println!("{}: {}", bot_name, reply);
    }
}

/// Validate config and test the OpenWeatherMap connection
async fn check(config: &Config, data_dir: Option<&std::path::PathBuf>) -> Result<()> {
    println!("Config: OK ({:?})", config.openweathermap);

    let path = config.locations_path(data_dir)?;
    let directory = LocationDirectory::open(&path)?;
    println!(
        "Locations: {} saved in {}",
        directory.len(),
        path.display()
    );

    let client = OpenWeatherMapClient::new(config.openweathermap.clone());
    match client.test_connection(&config.chat.default_location).await {
        Ok(true) => println!("OpenWeatherMap: OK"),
        Ok(false) => println!("OpenWeatherMap: FAILED (check api_key)"),
        Err(e) => println!("OpenWeatherMap: OFFLINE ({})", e),
    }

    Ok(())
}
