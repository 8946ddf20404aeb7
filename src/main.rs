//! CLI entry point for the city weather tool.
//!
//! Looks up current weather and the 5-day forecast for a city, prints the
//! popup text, and optionally writes the map layer, chart and daily series.

use anyhow::Result;
use city_weather::config::{self, Config};
use city_weather::forecast::AggregationMode;
use city_weather::infra::openweathermap::OpenWeatherClient;
use city_weather::output::{append_daily, print_json, print_pretty, write_geojson};
use city_weather::services::weather_api::WeatherApi;
use city_weather::session::{SearchResult, Session};
use clap::{Args, Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "city_weather")]
#[command(about = "Current weather and a daily temperature forecast for a city", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a single city
    Search {
        /// City name, e.g. "London" or "London,uk"
        #[arg(value_name = "CITY")]
        city: String,

        #[command(flatten)]
        outputs: OutputArgs,
    },
    /// Read city names from stdin, one per line, reusing one session
    Interactive {
        #[command(flatten)]
        outputs: OutputArgs,
    },
}

#[derive(Args, Clone)]
struct OutputArgs {
    /// Write the temperature chart as SVG
    #[arg(long, value_name = "FILE")]
    chart: Option<PathBuf>,

    /// Write the map marker and popup as GeoJSON
    #[arg(long, value_name = "FILE")]
    geojson: Option<String>,

    /// CSV file to append daily averages to
    #[arg(long, value_name = "FILE")]
    csv: Option<String>,

    /// Log the result as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Average over whole calendar days, including the last one
    #[arg(long, default_value_t = false)]
    calendar_days: bool,
}

impl OutputArgs {
    fn mode(&self) -> AggregationMode {
        if self.calendar_days {
            AggregationMode::Calendar
        } else {
            AggregationMode::Legacy
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = config::log_file_path();
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("city_weather.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let api = OpenWeatherClient::new(&config.base_url, config.api_key)?;

    match cli.command {
        Commands::Search { city, outputs } => {
            let mut session = Session::new(outputs.mode());
            submit(&mut session, &api, &city, &outputs).await?;
        }
        Commands::Interactive { outputs } => {
            let mut session = Session::new(outputs.mode());
            let mut lines = BufReader::new(tokio::io::stdin()).lines();

            info!("Enter a city name per line; Ctrl+D to quit");
            while let Some(line) = lines.next_line().await? {
                submit(&mut session, &api, &line, &outputs).await?;
            }
        }
    }

    Ok(())
}

/// One form submission: search, then show and persist whatever the session
/// now holds. A failed search is reported, not propagated.
async fn submit<A: WeatherApi>(
    session: &mut Session,
    api: &A,
    input: &str,
    outputs: &OutputArgs,
) -> Result<()> {
    match session.search(api, input).await {
        Ok(result) => {
            show(session, &result);
            persist(session, &result, input.trim(), outputs)?;
        }
        Err(e) => {
            println!("{e}");
        }
    }
    Ok(())
}

fn show(session: &Session, result: &SearchResult) {
    if let Some(popup) = session.map().popup() {
        for line in &popup.lines {
            println!("{line}");
        }
        println!("Icon: {}", popup.icon_url);
    }
    for day in &result.daily {
        println!("{}  {:>7.2}°C", day.date, day.average_temperature_celsius);
    }
}

fn persist(session: &Session, result: &SearchResult, city: &str, outputs: &OutputArgs) -> Result<()> {
    print_pretty(&result.summary, &result.daily);

    if outputs.json {
        print_json(&result.summary, &result.daily)?;
    }

    if let Some(path) = &outputs.geojson {
        write_geojson(path, session.map())?;
    }

    if let Some(path) = &outputs.chart {
        match session.chart() {
            Some(chart) => {
                chart.render_svg(path)?;
                info!(path = %path.display(), "Chart written");
            }
            None => warn!("No chart to write"),
        }
    }

    if let Some(path) = &outputs.csv {
        append_daily(path, city, &result.daily)?;
    }

    Ok(())
}
