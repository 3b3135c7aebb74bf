//! Core data models for citywx
//!
//! This module contains the data types shared by the API clients, the
//! statistics and the report assembler: locations, daily records, current
//! conditions and the weather category derived from a WMO code.

pub mod geocoding;
pub mod weather;

pub use geocoding::{GeocodingClient, GeocodingError};
pub use weather::{WeatherClient, WeatherError};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A resolved place, as returned by the geocoding API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude coordinate
    pub latitude: f64,
    /// Longitude coordinate
    pub longitude: f64,
    /// Display name of the place
    pub name: String,
    /// Country name, empty when the geocoder did not report one
    pub country: String,
    /// IANA timezone reported by the geocoder, if any
    pub timezone: Option<String>,
}

impl Location {
    /// Header line for the report, e.g. "Stockholm, Sweden"
    pub fn display_name(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

/// One calendar day of aggregated weather, observed or forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    /// WMO weather code
    pub weather_code: u8,
    pub temperature_max: f64,
    pub temperature_min: f64,
    /// Precipitation in millimetres
    pub precipitation_sum: f64,
    /// Mean cloud cover percentage (0-100)
    pub cloud_cover_mean: f64,
    /// Local sunrise time
    pub sunrise: NaiveDateTime,
    /// Local sunset time
    pub sunset: NaiveDateTime,
}

impl DailyRecord {
    /// Midpoint of the day's max and min temperature
    pub fn mean_temperature(&self) -> f64 {
        (self.temperature_max + self.temperature_min) / 2.0
    }

    pub fn had_rain(&self) -> bool {
        self.precipitation_sum > 0.0
    }

    pub fn had_thunder(&self) -> bool {
        is_thunder_code(self.weather_code)
    }
}

/// Instantaneous reading at fetch time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Temperature in Celsius
    pub temperature: f64,
    /// WMO weather code
    pub weather_code: u8,
    /// Wind speed in km/h
    pub wind_speed: f64,
    /// Wind direction in degrees
    pub wind_direction: f64,
}

/// A 3-day window (day before, matching day, day after) from a prior year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalYear {
    /// How many years back this window lies
    pub years_back: u32,
    pub days: Vec<DailyRecord>,
}

impl AsRef<[DailyRecord]> for HistoricalYear {
    fn as_ref(&self) -> &[DailyRecord] {
        &self.days
    }
}

/// Everything one search fetches from the weather API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastBundle {
    /// The date the window was requested for
    pub today: NaiveDate,
    pub current: CurrentConditions,
    /// Daily records from 32 days ago through tomorrow
    pub daily: Vec<DailyRecord>,
    /// One window per year back, ordered 1..=5
    pub history: Vec<HistoricalYear>,
}

impl ForecastBundle {
    /// Index of today within `daily`; the window always ends tomorrow
    pub fn today_index(&self) -> Option<usize> {
        self.daily.len().checked_sub(2)
    }

    /// Today's daily record, if the window is long enough
    pub fn today_record(&self) -> Option<&DailyRecord> {
        self.today_index().and_then(|i| self.daily.get(i))
    }
}

/// Coarse weather categories derived from WMO codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCategory {
    Clear,
    Foggy,
    Rainy,
    Snowy,
    RainShowers,
    SnowShowers,
    Thunderstorm,
}

/// Visual theme used behind a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Backdrop {
    Clear,
    Fog,
    Rain,
    Snow,
    Thunder,
}

/// Icon and backdrop shown for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetPair {
    pub icon: &'static str,
    pub backdrop: Backdrop,
}

impl WeatherCategory {
    /// Returns a slice containing all category variants.
    pub fn all() -> &'static [WeatherCategory] {
        &[
            WeatherCategory::Clear,
            WeatherCategory::Foggy,
            WeatherCategory::Rainy,
            WeatherCategory::Snowy,
            WeatherCategory::RainShowers,
            WeatherCategory::SnowShowers,
            WeatherCategory::Thunderstorm,
        ]
    }

    /// Human-readable description
    pub fn label(&self) -> &'static str {
        match self {
            WeatherCategory::Clear => "Clear",
            WeatherCategory::Foggy => "Foggy",
            WeatherCategory::Rainy => "Rainy",
            WeatherCategory::Snowy => "Snowy",
            WeatherCategory::RainShowers => "Rain showers",
            WeatherCategory::SnowShowers => "Snow showers",
            WeatherCategory::Thunderstorm => "Thunderstorm",
        }
    }

    /// Icon and backdrop for the category. Rain and snow showers share
    /// the assets of their steady counterparts.
    pub fn assets(&self) -> AssetPair {
        match self {
            WeatherCategory::Clear => AssetPair {
                icon: "\u{2600}", // ☀
                backdrop: Backdrop::Clear,
            },
            WeatherCategory::Foggy => AssetPair {
                icon: "\u{1F32B}", // 🌫
                backdrop: Backdrop::Fog,
            },
            WeatherCategory::Rainy | WeatherCategory::RainShowers => AssetPair {
                icon: "\u{1F327}", // 🌧
                backdrop: Backdrop::Rain,
            },
            WeatherCategory::Snowy | WeatherCategory::SnowShowers => AssetPair {
                icon: "\u{2744}", // ❄
                backdrop: Backdrop::Snow,
            },
            WeatherCategory::Thunderstorm => AssetPair {
                icon: "\u{26C8}", // ⛈
                backdrop: Backdrop::Thunder,
            },
        }
    }
}

/// Map a WMO weather code to its coarse category.
///
/// Bands are upper-inclusive: 0-3 Clear, 4-48 Foggy, 49-67 Rainy,
/// 68-77 Snowy, 78-82 Rain showers, 83-86 Snow showers, above that
/// Thunderstorm.
pub fn classify(code: u8) -> WeatherCategory {
    match code {
        0..=3 => WeatherCategory::Clear,
        4..=48 => WeatherCategory::Foggy,
        49..=67 => WeatherCategory::Rainy,
        68..=77 => WeatherCategory::Snowy,
        78..=82 => WeatherCategory::RainShowers,
        83..=86 => WeatherCategory::SnowShowers,
        _ => WeatherCategory::Thunderstorm,
    }
}

/// WMO codes 95-99 report thunderstorms
pub fn is_thunder_code(code: u8) -> bool {
    (95..=99).contains(&code)
}
