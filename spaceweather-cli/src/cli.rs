use anyhow::anyhow;
use chrono::SecondsFormat;
use clap::{Parser, Subcommand};
use spaceweather_core::{Config, FeedSource, Location, source::source_from_config};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "spaceweather", version, about = "Space Weather CLI")]
pub struct Cli {
    /// Feed URL; overrides the config file and the NOAA default.
    #[arg(long, global = true)]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read aurora intensity at a location.
    Aurora {
        /// Latitude in whole degrees, -90 to 90.
        #[arg(value_parser = parse_latitude, allow_negative_numbers = true)]
        lat: i32,

        /// Longitude in whole degrees east, 0 to 359.
        #[arg(value_parser = parse_longitude, allow_negative_numbers = true)]
        lon: i32,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        if let Some(url) = self.url {
            config.feed_url = Some(url);
        }

        match self.command {
            Command::Aurora { lat, lon } => {
                let source = source_from_config(&config)?;
                let line = aurora_report(source.as_ref(), lat, lon).await?;
                println!("{line}");
            }
        }

        Ok(())
    }
}

/// True when the program was started with no arguments beyond its own name.
///
/// A bare invocation prints usage and succeeds, same as `--help`.
pub fn wants_bare_help<I: ExactSizeIterator>(args: I) -> bool {
    args.len() <= 1
}

/// Fetch the feed and describe the intensity at one grid point.
pub async fn aurora_report(
    source: &dyn FeedSource,
    latitude: i32,
    longitude: i32,
) -> anyhow::Result<String> {
    let data = source.fetch().await?;

    let location = Location::new(longitude, latitude);
    let aurora = data.lookup(location).ok_or_else(|| {
        tracing::info!(%location, "no aurora value in feed");
        anyhow!("Aurora data missing for specified location.")
    })?;

    Ok(format!(
        "Aurora Forecast from {} is {}",
        data.forecast_time().to_rfc3339_opts(SecondsFormat::Secs, true),
        aurora
    ))
}

fn parse_latitude(arg: &str) -> Result<i32, String> {
    parse_degrees(arg, -90..=90).ok_or_else(|| format!("Invalid latitude: {arg}"))
}

fn parse_longitude(arg: &str) -> Result<i32, String> {
    parse_degrees(arg, 0..=359).ok_or_else(|| format!("Invalid longitude: {arg}"))
}

fn parse_degrees(arg: &str, range: std::ops::RangeInclusive<i32>) -> Option<i32> {
    arg.parse::<i32>().ok().filter(|v| range.contains(v))
}
