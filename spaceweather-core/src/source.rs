use crate::{Config, ForecastData, error::FetchError, source::noaa::NoaaAuroraClient};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod noaa;

/// Something that can hand back a freshly parsed forecast snapshot.
#[async_trait]
pub trait FeedSource: Send + Sync + Debug {
    async fn fetch(&self) -> Result<ForecastData, FetchError>;
}

/// Construct the NOAA source described by `config`.
pub fn source_from_config(config: &Config) -> anyhow::Result<Box<dyn FeedSource>> {
    let client = NoaaAuroraClient::new(config.feed_url(), config.timeout())?;
    Ok(Box::new(client))
}
