use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Integer grid coordinate used as the key into a forecast.
///
/// No range is enforced here; callers validate longitude/latitude before
/// building one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub longitude: i32,
    pub latitude: i32,
}

impl Location {
    pub const fn new(longitude: i32, latitude: i32) -> Self {
        Self { longitude, latitude }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(lon {}, lat {})", self.longitude, self.latitude)
    }
}

/// One snapshot of the aurora forecast feed.
///
/// Only the feed parser builds these, and nothing mutates one afterwards, so a
/// snapshot can be shared between threads without locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastData {
    observation_time: DateTime<Utc>,
    forecast_time: DateTime<Utc>,
    location_data: HashMap<Location, i32>,
}

impl ForecastData {
    pub(crate) fn new(
        observation_time: DateTime<Utc>,
        forecast_time: DateTime<Utc>,
        location_data: HashMap<Location, i32>,
    ) -> Self {
        Self { observation_time, forecast_time, location_data }
    }

    /// Time the underlying observation was taken.
    pub fn observation_time(&self) -> DateTime<Utc> {
        self.observation_time
    }

    /// Time the forecast is valid for.
    pub fn forecast_time(&self) -> DateTime<Utc> {
        self.forecast_time
    }

    /// Aurora intensity at `location`, or `None` if the feed has no entry for it.
    pub fn lookup(&self, location: Location) -> Option<i32> {
        self.location_data.get(&location).copied()
    }

    pub fn len(&self) -> usize {
        self.location_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.location_data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Location, i32)> + '_ {
        self.location_data.iter().map(|(loc, intensity)| (*loc, *intensity))
    }
}
