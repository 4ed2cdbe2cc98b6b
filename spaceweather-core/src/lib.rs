//! Core library for the `spaceweather` CLI.
//!
//! This crate defines:
//! - The NOAA ovation aurora feed parser
//! - The immutable forecast snapshot and its point lookup
//! - A fetch client for the feed, behind the [`FeedSource`] trait
//! - Configuration handling
//!
//! It is used by `spaceweather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod feed;
pub mod model;
pub mod source;

pub use config::{Config, DEFAULT_FEED_URL};
pub use error::{FeedError, FetchError, SchemaViolation};
pub use model::{ForecastData, Location};
pub use source::{FeedSource, noaa::NoaaAuroraClient};
