//! Open-Meteo weather API client
//!
//! This module fetches the forecast window and the historical archive windows
//! from Open-Meteo and parses them into our daily record structures.

use chrono::{Duration, Months, NaiveDate, NaiveDateTime};
use futures::future::{try_join, try_join_all};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use super::{CurrentConditions, DailyRecord, ForecastBundle, HistoricalYear, Location};

/// Base URL for the Open-Meteo forecast API
pub const OPEN_METEO_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Base URL for the Open-Meteo historical archive API
pub const OPEN_METEO_ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

/// Daily fields requested from both the forecast and the archive API
const DAILY_FIELDS: &str =
    "weather_code,temperature_2m_max,temperature_2m_min,precipitation_sum,cloudcover_mean,sunrise,sunset";

/// How far back the forecast window starts, in days
pub const PAST_WINDOW_DAYS: i64 = 32;

/// Number of prior years fetched from the archive
pub const HISTORY_YEARS: u32 = 5;

/// Days in each historical window (day before, matching day, day after)
pub const HISTORY_WINDOW_DAYS: usize = 3;

/// Sent when the geocoder did not report a timezone for the location
pub const FALLBACK_TIMEZONE: &str = "auto";

/// Minimum forecast window: yesterday, today and tomorrow
const MIN_FORECAST_DAYS: usize = 3;

/// Errors that can occur when fetching weather data
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Weather API returned status {0}")]
    HttpStatus(StatusCode),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing expected field in response
    #[error("Missing expected field in response: {0}")]
    MissingField(String),

    /// Invalid time format in response
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),

    /// The API returned a different number of days than requested
    #[error("Expected {expected} days of data, got {actual}")]
    UnexpectedWindow { expected: usize, actual: usize },

    /// A requested date cannot be represented
    #[error("Date out of range: {0}")]
    DateOutOfRange(String),
}

/// Client for fetching weather data from Open-Meteo API
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    forecast_url: String,
    archive_url: String,
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherClient {
    /// Create a new WeatherClient with default settings
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Create a new WeatherClient with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            forecast_url: OPEN_METEO_FORECAST_URL.to_string(),
            archive_url: OPEN_METEO_ARCHIVE_URL.to_string(),
        }
    }

    /// Point the client at different forecast and archive endpoints
    pub fn with_endpoints(
        mut self,
        forecast_url: impl Into<String>,
        archive_url: impl Into<String>,
    ) -> Self {
        self.forecast_url = forecast_url.into();
        self.archive_url = archive_url.into();
        self
    }

    /// Fetch the forecast window and five historical windows for a location
    ///
    /// All six requests run concurrently. The bundle is only returned once
    /// every request has succeeded; the first failure fails the whole fetch.
    ///
    /// # Arguments
    /// * `location` - Where to fetch weather for
    /// * `today` - The calendar day the windows are anchored on
    ///
    /// # Returns
    /// * `Ok(ForecastBundle)` - Current conditions, daily window and history
    /// * `Err(WeatherError)` - If any request or parse fails
    pub async fn fetch_bundle(
        &self,
        location: &Location,
        today: NaiveDate,
    ) -> Result<ForecastBundle, WeatherError> {
        tracing::debug!(
            latitude = location.latitude,
            longitude = location.longitude,
            %today,
            "fetching forecast and {} historical windows",
            HISTORY_YEARS
        );

        let history_futures =
            (1..=HISTORY_YEARS).map(|years_back| self.fetch_history_year(location, today, years_back));

        let ((current, daily), history) = try_join(
            self.fetch_forecast(location, today),
            try_join_all(history_futures),
        )
        .await?;

        Ok(ForecastBundle {
            today,
            current,
            daily,
            history,
        })
    }

    /// Fetch current conditions plus the daily window from 32 days ago to tomorrow
    async fn fetch_forecast(
        &self,
        location: &Location,
        today: NaiveDate,
    ) -> Result<(CurrentConditions, Vec<DailyRecord>), WeatherError> {
        let (start, end) = forecast_range(today);
        let mut query = self.daily_query(location, start, end);
        query.push(("current_weather", "true".to_string()));

        let response: ForecastResponse = self.get_json(&self.forecast_url, &query).await?;
        parse_forecast(response)
    }

    /// Fetch the 3-day window around this calendar day `years_back` years ago
    async fn fetch_history_year(
        &self,
        location: &Location,
        today: NaiveDate,
        years_back: u32,
    ) -> Result<HistoricalYear, WeatherError> {
        let (start, end) = history_range(today, years_back)?;
        let query = self.daily_query(location, start, end);

        let response: ArchiveResponse = self.get_json(&self.archive_url, &query).await?;
        parse_history(response, years_back)
    }

    /// Query parameters shared by forecast and archive requests
    fn daily_query(
        &self,
        location: &Location,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", location.latitude.to_string()),
            ("longitude", location.longitude.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            (
                "timezone",
                location
                    .timezone
                    .clone()
                    .unwrap_or_else(|| FALLBACK_TIMEZONE.to_string()),
            ),
            ("start_date", format_date(start)),
            ("end_date", format_date(end)),
        ]
    }

    /// GET a URL and decode the JSON body, rejecting non-success statuses
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, WeatherError> {
        tracing::debug!(url, ?query, "requesting weather data");

        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::HttpStatus(status));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// First and last day of the forecast window: 32 days ago through tomorrow
pub fn forecast_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (
        today - Duration::days(PAST_WINDOW_DAYS),
        today + Duration::days(1),
    )
}

/// First and last day of the historical window `years_back` years ago.
///
/// The anchor is the same calendar day; Feb 29 falls back to Feb 28.
pub fn history_range(
    today: NaiveDate,
    years_back: u32,
) -> Result<(NaiveDate, NaiveDate), WeatherError> {
    let anchor = today
        .checked_sub_months(Months::new(12 * years_back))
        .ok_or_else(|| WeatherError::DateOutOfRange(format!("{} minus {} years", today, years_back)))?;

    Ok((anchor - Duration::days(1), anchor + Duration::days(1)))
}

/// Format a date the way the API expects it (YYYY-MM-DD)
fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse the forecast response into current conditions and daily records
fn parse_forecast(
    response: ForecastResponse,
) -> Result<(CurrentConditions, Vec<DailyRecord>), WeatherError> {
    let current = response
        .current_weather
        .ok_or_else(|| WeatherError::MissingField("current_weather".to_string()))?;

    let current = CurrentConditions {
        temperature: current.temperature,
        weather_code: current.weathercode,
        wind_speed: current.windspeed,
        wind_direction: current.winddirection,
    };

    let daily = parse_daily_data(&response.daily)?;
    if daily.len() < MIN_FORECAST_DAYS {
        return Err(WeatherError::UnexpectedWindow {
            expected: MIN_FORECAST_DAYS,
            actual: daily.len(),
        });
    }

    Ok((current, daily))
}

/// Parse an archive response into one historical year
fn parse_history(response: ArchiveResponse, years_back: u32) -> Result<HistoricalYear, WeatherError> {
    let days = parse_daily_data(&response.daily)?;
    if days.len() != HISTORY_WINDOW_DAYS {
        return Err(WeatherError::UnexpectedWindow {
            expected: HISTORY_WINDOW_DAYS,
            actual: days.len(),
        });
    }

    Ok(HistoricalYear { years_back, days })
}

/// Parse daily weather data arrays into DailyRecord structs
///
/// Missing precipitation or cloud cover readings count as zero; a missing
/// temperature or weather code is an error.
fn parse_daily_data(daily: &DailyWeather) -> Result<Vec<DailyRecord>, WeatherError> {
    let len = daily.time.len();

    // Validate that all arrays have the same length
    if daily.weather_code.len() != len
        || daily.temperature_2m_max.len() != len
        || daily.temperature_2m_min.len() != len
        || daily.precipitation_sum.len() != len
        || daily.cloudcover_mean.len() != len
        || daily.sunrise.len() != len
        || daily.sunset.len() != len
    {
        return Err(WeatherError::MissingField(
            "daily arrays have inconsistent lengths".to_string(),
        ));
    }

    let required = |value: Option<f64>, field: &str, i: usize| {
        value.ok_or_else(|| WeatherError::MissingField(format!("{}[{}]", field, i)))
    };

    let mut records = Vec::with_capacity(len);

    for i in 0..len {
        let weather_code = daily.weather_code[i]
            .ok_or_else(|| WeatherError::MissingField(format!("weather_code[{}]", i)))?;

        records.push(DailyRecord {
            date: parse_date(&daily.time[i])?,
            weather_code,
            temperature_max: required(daily.temperature_2m_max[i], "temperature_2m_max", i)?,
            temperature_min: required(daily.temperature_2m_min[i], "temperature_2m_min", i)?,
            precipitation_sum: daily.precipitation_sum[i].unwrap_or(0.0),
            cloud_cover_mean: daily.cloudcover_mean[i].unwrap_or(0.0),
            sunrise: parse_datetime(&daily.sunrise[i])?,
            sunset: parse_datetime(&daily.sunset[i])?,
        });
    }

    Ok(records)
}

/// Parse a date string (e.g., "2024-07-15") to NaiveDate
fn parse_date(date_str: &str) -> Result<NaiveDate, WeatherError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| WeatherError::InvalidTimeFormat(date_str.to_string()))
}

/// Parse a datetime string in ISO 8601 format (e.g., "2024-07-15T05:30") to NaiveDateTime
fn parse_datetime(datetime_str: &str) -> Result<NaiveDateTime, WeatherError> {
    NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%dT%H:%M")
        .map_err(|_| WeatherError::InvalidTimeFormat(datetime_str.to_string()))
}

/// Open-Meteo forecast response structure
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    current_weather: Option<CurrentWeather>,
    daily: DailyWeather,
}

/// Open-Meteo archive response structure
#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    daily: DailyWeather,
}

/// Legacy `current_weather` block from Open-Meteo
#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
    #[serde(alias = "wind_speed")]
    windspeed: f64,
    #[serde(alias = "wind_direction")]
    winddirection: f64,
    #[serde(alias = "weather_code")]
    weathercode: u8,
}

/// Daily weather data from Open-Meteo
#[derive(Debug, Deserialize)]
struct DailyWeather {
    time: Vec<String>,
    #[serde(alias = "weathercode")]
    weather_code: Vec<Option<u8>>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    precipitation_sum: Vec<Option<f64>>,
    #[serde(alias = "cloud_cover_mean")]
    cloudcover_mean: Vec<Option<f64>>,
    sunrise: Vec<String>,
    sunset: Vec<String>,
}
