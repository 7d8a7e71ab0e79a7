use anyhow::{Context, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, Select, Text};

use forecast_core::{
    CityGeocoder, Config, Locale, LocationRequest, LocationResolver, Locator, Place,
    SnapshotCache, SnapshotStore, UserUnitPreference, WeatherView, provider_from_config,
    view::DEFAULT_SELECTED_DAY,
};

use crate::render::Report;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Weather forecast for a city or your saved home")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current, hourly and daily weather.
    Show {
        /// City name; the saved home location is used when absent.
        city: Option<String>,

        /// Day whose details to show: 0 is yesterday, 1 today, 2 tomorrow...
        #[arg(long, default_value_t = DEFAULT_SELECTED_DAY)]
        day: usize,

        /// Print the view as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Change units, language, theme, refresh interval and home city.
    Configure,

    /// Print the configuration file path.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { city, day, json } => show(city, day, json).await,
            Command::Configure => configure().await,
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

fn locator(config: &Config) -> Locator {
    let geocoder = CityGeocoder::new(config.geocoding_url(), config.units.locale.code());
    Locator::new(geocoder, config.home.clone())
}

async fn show(city: Option<String>, day: usize, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let prefs = config.units;

    let request = match city {
        Some(name) => LocationRequest::City(name),
        None => LocationRequest::Device,
    };

    let Some(place) = locator(&config).resolve(&request).await? else {
        match request {
            LocationRequest::City(name) => bail!("No location found for '{name}'."),
            LocationRequest::Device => bail!(
                "No location available.\n\
                 Hint: pass a city name (`forecast show Tampere`) \
                 or save a home city with `forecast configure`."
            ),
        }
    };

    tracing::debug!(%place, coordinate = %place.coordinate, "Resolved location");

    let provider = provider_from_config(&config);
    let cache = SnapshotCache::new(Config::cache_file_path()?);
    let mut store = SnapshotStore::with_cache(config.cooldown(), cache);

    let utc_now = Utc::now();
    let snapshot = store.snapshot_for(provider.as_ref(), place.coordinate, utc_now).await?;

    // Forecast timestamps are the location's wall clock, not this machine's.
    let now = snapshot.local_time(utc_now);
    let strings = prefs.locale.strings();
    let view = WeatherView::build(snapshot, &prefs, strings, now, day);

    if json {
        let out = serde_json::to_string_pretty(&view).context("Failed to serialize weather view")?;
        println!("{out}");
    } else {
        print!("{}", Report::new(&place, &view, strings));
    }

    Ok(())
}

async fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;
    let current = config.units;

    let use_fahrenheit = Confirm::new("Show temperatures in Fahrenheit?")
        .with_default(current.use_fahrenheit)
        .prompt()?;
    let use_miles = Confirm::new("Show wind speed in miles per hour?")
        .with_default(current.use_miles)
        .prompt()?;
    let use_inches = Confirm::new("Show precipitation in inches?")
        .with_default(current.use_inches)
        .prompt()?;

    let locales = Locale::all().to_vec();
    let cursor = locales.iter().position(|l| *l == current.locale).unwrap_or(0);
    let locale = Select::new("Language:", locales).with_starting_cursor(cursor).prompt()?;

    let dark_theme = Confirm::new("Use dark theme?").with_default(config.dark_theme).prompt()?;

    let cooldown_minutes = CustomType::<u32>::new("Minutes before weather is refreshed:")
        .with_default(config.cooldown_minutes)
        .with_error_message("Please enter a whole number of minutes")
        .prompt()?;

    let home_city = Text::new("Home city (empty keeps the current one, '-' clears it):")
        .with_help_message(&home_help(&config))
        .prompt()?;

    let units = UserUnitPreference { use_fahrenheit, use_miles, use_inches, locale };

    if !Confirm::new("Apply these settings?").with_default(true).prompt()? {
        println!("Settings unchanged.");
        return Ok(());
    }

    config.apply(units, dark_theme, cooldown_minutes);

    match home_city.trim() {
        "" => {}
        "-" => config.set_home(None),
        name => {
            let request = LocationRequest::City(name.to_string());
            let lookup = locator(&config).resolve(&request).await;
            println!("{}", apply_home_lookup(&mut config, name, lookup));
        }
    }

    config.save()?;
    println!("Settings saved to {}", Config::config_file_path()?.display());

    Ok(())
}

/// Store the looked-up home place. A failed or empty lookup keeps the
/// previous home so the rest of the settings can still be saved.
fn apply_home_lookup(
    config: &mut Config,
    name: &str,
    lookup: anyhow::Result<Option<Place>>,
) -> String {
    match lookup {
        Ok(Some(place)) => {
            let message = format!("Home set to {place}.");
            config.set_home(Some(place));
            message
        }
        Ok(None) => format!("No location found for '{name}', keeping the previous home city."),
        Err(e) => {
            tracing::warn!("Home city lookup failed: {:#}", e);
            format!("Could not look up '{name}' ({e:#}), keeping the previous home city.")
        }
    }
}

fn home_help(config: &Config) -> String {
    match &config.home {
        Some(place) => format!("Current: {place}"),
        None => "No home city saved".to_string(),
    }
}
