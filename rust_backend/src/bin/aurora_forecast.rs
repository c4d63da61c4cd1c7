//! Aurora forecast command-line tool.
//!
//! Fetches the DONKI feeds (or reads saved copies from a directory), builds the
//! activity snapshot and prints a JSON forecast report to stdout.
//!
//! # Usage
//!
//! ```bash
//! # Forecast the configured watch-list from the live API
//! NASA_API_KEY=... cargo run --bin aurora-forecast
//!
//! # Forecast a single location from saved feeds
//! cargo run --bin aurora-forecast -- --feeds ./feeds --lat 68.91 --lon 27.03
//! ```
//!
//! # Options
//!
//! - `--config <path>`: TOML configuration (default: `aurora.toml` search, then built-ins)
//! - `--feeds <dir>`: Read `cme.json`, `flr.json` and `hss.json` instead of calling the API
//! - `--lat <deg>` / `--lon <deg>`: Forecast one location instead of the watch-list
//!
//! # Environment Variables
//!
//! - `NASA_API_KEY`: Overrides `donki.api_key`
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use aurora_rust::config::AuroraConfig;
use aurora_rust::core::domain::{
    ActivityStats, ImpactTimeEstimate, LatitudeRange, LocationForecast, NamedLocation,
};
use aurora_rust::error::ConfigError;
use aurora_rust::ingest::{
    fetch_solar_activity, lookback_start, DonkiClient, FeedSource, FileFeedSource,
};
use aurora_rust::services::forecast::{
    aurora_band_latitude, forecast_locations, snapshot_activity, visible_latitude_range,
};
use aurora_rust::services::timeline::{build_event_series, EventSeries};
use aurora_rust::services::analyze_aurora_activity;

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    feeds: Option<PathBuf>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut parsed = Args::default();
        while let Some(flag) = args.next() {
            let mut value = || {
                args.next()
                    .ok_or_else(|| anyhow!("missing value for {}", flag))
            };
            match flag.as_str() {
                "--config" => parsed.config = Some(PathBuf::from(value()?)),
                "--feeds" => parsed.feeds = Some(PathBuf::from(value()?)),
                "--lat" => {
                    parsed.latitude = Some(value()?.parse().context("--lat must be a number")?)
                }
                "--lon" => {
                    parsed.longitude = Some(value()?.parse().context("--lon must be a number")?)
                }
                other => bail!("unknown argument '{}'", other),
            }
        }
        Ok(parsed)
    }

    /// Locations to forecast: the `--lat`/`--lon` pair if given, else the watch-list.
    fn locations(&self, config: &AuroraConfig) -> Result<Vec<NamedLocation>> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Ok(vec![NamedLocation::new("Requested location", lat, lon)]),
            (None, None) => Ok(config.locations.clone()),
            _ => bail!("--lat and --lon must be given together"),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ForecastReport {
    generated_at: DateTime<Utc>,
    activity_estimate: f64,
    visible_latitude_range: LatitudeRange,
    aurora_band_latitude: f64,
    forecasts: Vec<LocationForecast>,
    impact_times: Vec<ImpactTimeEstimate>,
    event_series: Vec<EventSeries>,
    statistics: ActivityStats,
}

fn load_config(path: Option<&PathBuf>) -> Result<AuroraConfig> {
    let config = match path {
        Some(path) => AuroraConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => match AuroraConfig::from_default_location() {
            Ok(config) => config,
            Err(ConfigError::NotFound) => {
                info!("No aurora.toml found, using built-in defaults");
                AuroraConfig::default()
            }
            Err(e) => return Err(e).context("Failed to load aurora.toml"),
        },
    };
    Ok(config.with_env_overrides())
}

#[tokio::main]
async fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse(env::args().skip(1))?;
    let config = load_config(args.config.as_ref())?;
    let locations = args.locations(&config)?;

    let source: Box<dyn FeedSource> = match &args.feeds {
        Some(dir) => {
            info!("Reading feeds from {}", dir.display());
            Box::new(FileFeedSource::new(dir))
        }
        None => {
            if config.donki.api_key == "DEMO_KEY" {
                warn!("Using DEMO_KEY, requests are heavily rate limited");
            }
            Box::new(DonkiClient::new(config.donki.clone())?)
        }
    };

    let generated_at = Utc::now();
    let start = lookback_start(generated_at.date_naive(), config.donki.lookback_days);
    let activity = fetch_solar_activity(source.as_ref(), start)
        .await
        .context("Failed to fetch solar activity")?;

    let estimate = snapshot_activity(&activity);
    let forecasts = forecast_locations(&activity, &locations)?;
    info!(activity = estimate, locations = forecasts.len(), "Forecast computed");

    let report = ForecastReport {
        generated_at,
        activity_estimate: estimate,
        visible_latitude_range: visible_latitude_range(estimate),
        aurora_band_latitude: aurora_band_latitude(&forecasts),
        event_series: build_event_series(&activity),
        statistics: analyze_aurora_activity(std::slice::from_ref(&activity)),
        impact_times: activity.estimated_impact_times,
        forecasts,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
