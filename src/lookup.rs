//! City lookup: resolve a name, fetch its weather and assemble the report

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{error, info};

use crate::data::{GeocodingClient, GeocodingError, WeatherClient, WeatherError};
use crate::report::{assemble, ReportError, WeatherReport};

/// Message shown when the geocoder has no match
pub const NOT_FOUND_MESSAGE: &str = "City could not be found.";

/// Message shown for any transport or data failure
pub const NETWORK_FAILURE_MESSAGE: &str =
    "Something went wrong. Please check the city name or try again later.";

/// Why a search produced no report
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// Nothing was typed; ignored without a message
    #[error("No city entered")]
    InputEmpty,

    #[error("City could not be found: {0}")]
    LocationNotFound(String),

    /// Transport, HTTP status or malformed data
    #[error("Weather lookup failed: {0}")]
    NetworkFailure(String),
}

impl SearchError {
    /// Text to show the user, if any
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            SearchError::InputEmpty => None,
            SearchError::LocationNotFound(_) => Some(NOT_FOUND_MESSAGE),
            SearchError::NetworkFailure(_) => Some(NETWORK_FAILURE_MESSAGE),
        }
    }
}

impl From<GeocodingError> for SearchError {
    fn from(err: GeocodingError) -> Self {
        match err {
            GeocodingError::EmptyInput => SearchError::InputEmpty,
            GeocodingError::NotFound(city) => SearchError::LocationNotFound(city),
            other => SearchError::NetworkFailure(other.to_string()),
        }
    }
}

impl From<WeatherError> for SearchError {
    fn from(err: WeatherError) -> Self {
        SearchError::NetworkFailure(err.to_string())
    }
}

impl From<ReportError> for SearchError {
    fn from(err: ReportError) -> Self {
        SearchError::NetworkFailure(err.to_string())
    }
}

/// Look up the weather for a city.
///
/// Resolves the name, fetches the forecast and the historical windows
/// relative to `today`, then assembles the report. Any failure along the
/// way is mapped to a [`SearchError`].
pub async fn lookup_city(
    geocoder: &GeocodingClient,
    weather: &WeatherClient,
    city: &str,
    today: NaiveDate,
) -> Result<WeatherReport, SearchError> {
    let city = city.trim();
    if city.is_empty() {
        return Err(SearchError::InputEmpty);
    }

    let result = fetch_report(geocoder, weather, city, today).await;
    match &result {
        Ok(report) => info!(city, location = %report.location, "Search completed"),
        Err(SearchError::NetworkFailure(reason)) => error!(city, %reason, "Weather lookup failed"),
        Err(err) => info!(city, %err, "Search returned no report"),
    }
    result
}

async fn fetch_report(
    geocoder: &GeocodingClient,
    weather: &WeatherClient,
    city: &str,
    today: NaiveDate,
) -> Result<WeatherReport, SearchError> {
    let location = geocoder.resolve(city).await?;
    let bundle = weather.fetch_bundle(&location, today).await?;
    Ok(assemble(&location, &bundle)?)
}
