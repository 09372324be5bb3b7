//! AgroLens CLI - land, water and rainfall analysis

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use agrolens_analysis::forecast::{fit_trend, RainfallPredictor};
use agrolens_analysis::interpolate::fill_gaps;
use agrolens_core::{DateWindow, MonthWindows, YearlyValue};
use agrolens_engine::weather::LiveWeather;
use agrolens_engine::workflows::weather::{rainfall_forecast, RainfallRequest};
use agrolens_engine::workflows::ApiResponse;

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "agrolens")]
#[command(author, version, about = "Land, water and rainfall analysis", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill gaps in a monthly series (JSON array, null or 0 = missing)
    Interpolate {
        /// Input JSON file, e.g. [10.0, null, 0, 40.0]
        input: PathBuf,
    },
    /// Fit a trend over yearly values and project two years ahead
    Trend {
        /// Input JSON file: [{"year": 2010, "value": 450.0}, ...]
        input: PathBuf,
        /// Projection used when history is too thin
        #[arg(short, long, default_value = "600.0")]
        default_projection: f64,
    },
    /// 30-day rainfall outlook from yearly history
    Outlook {
        /// Input JSON file: [{"year": 2010, "value": 450.0}, ...]
        input: PathBuf,
        /// RNG seed for reproducible outlooks
        #[arg(short, long, default_value = "0")]
        seed: u64,
    },
    /// Live forecast, history and predictions for a region
    Weather {
        /// GeoJSON file with the region of interest
        roi: PathBuf,
        /// OpenWeatherMap API key (or OPENWEATHER_API_KEY)
        #[arg(long, env = "OPENWEATHER_API_KEY")]
        api_key: String,
        /// RNG seed for reproducible outlooks
        #[arg(short, long, default_value = "0")]
        seed: u64,
    },
    /// Print the calendar-month windows of a date range
    Months {
        /// Range start, YYYY-MM-DD
        start: String,
        /// Range end, YYYY-MM-DD
        end: String,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn read_yearly(path: &PathBuf) -> Result<Vec<YearlyValue>> {
    let raw: Vec<serde_json::Value> = read_json(path)?;
    raw.into_iter()
        .map(|v| {
            let year = v
                .get("year")
                .and_then(|y| y.as_i64())
                .context("missing year")?;
            let value = v
                .get("value")
                .and_then(|r| r.as_f64())
                .context("missing value")?;
            Ok(YearlyValue::new(year as i32, value))
        })
        .collect()
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ─── Entry point ────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Interpolate { input } => {
            let series: Vec<Option<f64>> = read_json(&input)?;
            print_json(&fill_gaps(&series))?;
        }
        Commands::Trend {
            input,
            default_projection,
        } => {
            let values = read_yearly(&input)?;
            print_json(&fit_trend(&values, default_projection))?;
        }
        Commands::Outlook { input, seed } => {
            let values = read_yearly(&input)?;
            let mut predictor = RainfallPredictor::with_seed(seed);
            print_json(&predictor.thirty_day_outlook(&values))?;
        }
        Commands::Weather { roi, api_key, seed } => {
            let request = RainfallRequest {
                roi: read_json(&roi)?,
            };
            let today = Local::now().date_naive();
            let runtime = tokio::runtime::Runtime::new()?;
            let response = runtime.block_on(async {
                let weather = LiveWeather::new(api_key, today)?;
                let mut predictor = RainfallPredictor::with_seed(seed);
                rainfall_forecast(&weather, &request, today, &mut predictor).await
            });
            print_json(&ApiResponse::from_result(response))?;
        }
        Commands::Months { start, end } => {
            let range = DateWindow::parse(&start, &end)?;
            for month in MonthWindows::new(range) {
                println!("{}  {} .. {}", month.label, month.start, month.end);
            }
        }
    }

    Ok(())
}
