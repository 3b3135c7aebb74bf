//! Open-Meteo geocoding API client
//!
//! Resolves a free-text city name to the coordinates of the first match.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use super::Location;

/// Base URL for the Open-Meteo geocoding API
pub const OPEN_METEO_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// Errors that can occur when resolving a city name
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Nothing to look up
    #[error("City name is empty")]
    EmptyInput,

    /// The geocoder returned no results
    #[error("City not found: {0}")]
    NotFound(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The geocoder answered with a non-success status
    #[error("Geocoding API returned status {0}")]
    HttpStatus(StatusCode),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Geocoding API response structure
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<GeocodingResult>>,
}

/// A single match from the geocoding API
#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    timezone: Option<String>,
}

/// Client for resolving city names through the Open-Meteo geocoding API
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Client,
    base_url: String,
}

impl Default for GeocodingClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodingClient {
    /// Create a new GeocodingClient with default settings
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Create a new GeocodingClient with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            base_url: OPEN_METEO_GEOCODING_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Resolve a city name to the first matching location
    ///
    /// # Arguments
    /// * `city` - Free-text city name; surrounding whitespace is ignored
    ///
    /// # Returns
    /// * `Ok(Location)` - The first match
    /// * `Err(GeocodingError::NotFound)` - The geocoder had no match
    /// * `Err(GeocodingError)` - If the request or parsing fails
    pub async fn resolve(&self, city: &str) -> Result<Location, GeocodingError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(GeocodingError::EmptyInput);
        }

        tracing::debug!(city, url = %self.base_url, "resolving city");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("name", city),
                ("count", "1"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodingError::HttpStatus(status));
        }

        let text = response.text().await?;
        let api_response: GeocodingResponse = serde_json::from_str(&text)?;

        let location = parse_response(api_response, city)?;
        tracing::info!(
            name = %location.name,
            country = %location.country,
            latitude = location.latitude,
            longitude = location.longitude,
            "resolved city"
        );
        Ok(location)
    }
}

/// Take the first geocoding result as the location
fn parse_response(response: GeocodingResponse, city: &str) -> Result<Location, GeocodingError> {
    let first = response
        .results
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| GeocodingError::NotFound(city.to_string()))?;

    Ok(Location {
        latitude: first.latitude,
        longitude: first.longitude,
        name: first.name,
        country: first.country.unwrap_or_default(),
        timezone: first.timezone,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sample geocoding response for "Stockholm"
    const STOCKHOLM_RESPONSE: &str = r#"{
        "results": [
            {
                "id": 2673730,
                "name": "Stockholm",
                "latitude": 59.32938,
                "longitude": 18.06871,
                "elevation": 17.0,
                "feature_code": "PPLC",
                "country_code": "SE",
                "timezone": "Europe/Stockholm",
                "population": 1515017,
                "country": "Sweden",
                "admin1": "Stockholm"
            }
        ],
        "generationtime_ms": 0.7
    }"#;

    #[test]
    fn test_parse_first_result() {
        let response: GeocodingResponse =
            serde_json::from_str(STOCKHOLM_RESPONSE).expect("Failed to parse response");
        let location = parse_response(response, "stockholm").expect("Should find a location");

        assert_eq!(location.name, "Stockholm");
        assert_eq!(location.country, "Sweden");
        assert_eq!(location.timezone.as_deref(), Some("Europe/Stockholm"));
        assert!((location.latitude - 59.32938).abs() < 0.0001);
        assert!((location.longitude - 18.06871).abs() < 0.0001);
    }

    #[test]
    fn test_missing_results_is_not_found() {
        // The API omits `results` entirely when nothing matches
        let response: GeocodingResponse =
            serde_json::from_str(r#"{"generationtime_ms": 0.3}"#).expect("Failed to parse");
        match parse_response(response, "Atlantis") {
            Err(GeocodingError::NotFound(city)) => assert_eq!(city, "Atlantis"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_results_is_not_found() {
        let response: GeocodingResponse =
            serde_json::from_str(r#"{"results": []}"#).expect("Failed to parse");
        assert!(matches!(
            parse_response(response, "Nowhere"),
            Err(GeocodingError::NotFound(_))
        ));
    }

    #[test]
    fn test_missing_country_defaults_to_empty() {
        let body = r#"{"results": [{"name": "Null Island", "latitude": 0.0, "longitude": 0.0}]}"#;
        let response: GeocodingResponse = serde_json::from_str(body).expect("Failed to parse");
        let location = parse_response(response, "Null Island").unwrap();
        assert!(location.country.is_empty());
        assert!(location.timezone.is_none());
    }

    #[tokio::test]
    async fn test_resolve_rejects_blank_input_without_request() {
        // Unroutable base URL: the guard must return before any request is made
        let client = GeocodingClient::new().with_base_url("http://127.0.0.1:1/v1/search");
        assert!(matches!(
            client.resolve("   ").await,
            Err(GeocodingError::EmptyInput)
        ));
    }

    #[test]
    fn test_with_base_url_overrides_default() {
        let client = GeocodingClient::default();
        assert_eq!(client.base_url, OPEN_METEO_GEOCODING_URL);

        let client = client.with_base_url("http://localhost:8080/v1/search");
        assert_eq!(client.base_url, "http://localhost:8080/v1/search");
    }
}
