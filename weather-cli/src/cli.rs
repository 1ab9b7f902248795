use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use inquire::{Confirm, Select, Text};
use weather_core::{
    Config, ForecastDays, SearchOutcome, UnitSystem, WeatherApiProvider, WeatherViewModel,
};

use crate::render::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current conditions and a short forecast from WeatherAPI.com")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Save the default location, forecast length and units.
    Configure,

    /// Show weather for a location once and exit.
    Show {
        /// Location: city, postcode, "lat,lon", ... Defaults to the configured location.
        query: Option<String>,

        /// Forecast length in days (1-3).
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
        days: Option<u8>,

        /// Display imperial units (°F, mph).
        #[arg(long)]
        fahrenheit: bool,

        /// Print the display snapshot as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Search repeatedly, change the forecast length and toggle units.
    Interactive,
}

const ACTION_SEARCH: &str = "Search";
const ACTION_DAYS: &str = "Change forecast days";
const ACTION_UNITS: &str = "Toggle °C / °F";
const ACTION_QUIT: &str = "Quit";

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure => configure(config),
            Command::Show { query, days, fahrenheit, json } => {
                show(config, query, days, fahrenheit, json).await
            }
            Command::Interactive => interactive(config).await,
        }
    }
}

fn build_view_model(config: &Config) -> Result<WeatherViewModel<WeatherApiProvider>> {
    // Missing key is fatal at startup.
    let provider = WeatherApiProvider::from_env()?;
    Ok(WeatherViewModel::from_config(provider, config))
}

fn configure(mut config: Config) -> Result<()> {
    config.default_query = Text::new("Default location:")
        .with_default(&config.default_query)
        .prompt()
        .context("Failed to read default location")?;

    let options: Vec<ForecastDays> = ForecastDays::all().collect();
    let start = options.iter().position(|d| *d == config.default_days).unwrap_or(0);
    config.default_days = Select::new("Forecast days:", options)
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read forecast length")?;

    config.use_fahrenheit = Confirm::new("Use Fahrenheit?")
        .with_default(config.use_fahrenheit)
        .prompt()
        .context("Failed to read unit preference")?;

    config.save()?;
    println!("Saved preferences to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(
    config: Config,
    query: Option<String>,
    days: Option<u8>,
    fahrenheit: bool,
    json: bool,
) -> Result<()> {
    let vm = build_view_model(&config)?;

    if let Some(query) = query {
        vm.set_query(query);
    }
    if fahrenheit {
        vm.set_units(UnitSystem::Imperial);
    }
    if let Some(days) = days {
        let days = ForecastDays::try_from(days)?;
        // A different length already runs the search.
        if let SearchOutcome::Skipped = vm.set_days(days).await {
            vm.search().await;
        }
    } else {
        vm.search().await;
    }

    let state = vm.snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        print!("{}", render(&state));
    }

    if state.has_error() {
        return Err(anyhow!("search for \"{}\" failed", state.query));
    }
    Ok(())
}

async fn interactive(config: Config) -> Result<()> {
    let vm = build_view_model(&config)?;
    let mut rx = vm.subscribe();

    vm.search().await;
    print!("{}", render(&rx.borrow_and_update()));

    loop {
        let action = Select::new(
            "What next?",
            vec![ACTION_SEARCH, ACTION_DAYS, ACTION_UNITS, ACTION_QUIT],
        )
        .prompt()
        .context("Failed to read action")?;

        match action {
            ACTION_SEARCH => {
                let query = Text::new("Location:")
                    .with_default(&vm.snapshot().query)
                    .prompt()
                    .context("Failed to read location")?;
                vm.submit(query).await;
            }
            ACTION_DAYS => {
                let options: Vec<ForecastDays> = ForecastDays::all().collect();
                let days = Select::new("Forecast days:", options)
                    .prompt()
                    .context("Failed to read forecast length")?;
                vm.set_days(days).await;
            }
            ACTION_UNITS => {
                let units = vm.toggle_units();
                tracing::debug!(?units, "units toggled");
            }
            _ => break,
        }

        if rx.has_changed().unwrap_or(false) {
            let state = rx.borrow_and_update().clone();
            println!();
            print!("{}", render(&state));
        }
    }

    Ok(())
}
