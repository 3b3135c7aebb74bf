//! Weather report assembly
//!
//! Turns a fetched [`ForecastBundle`] into the structure every renderer
//! draws from: three day cards (yesterday, today, tomorrow), clothing advice
//! and the rain and thunder panels.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::clothing::{recommend, ClothingAdvice};
use crate::data::{
    classify, AssetPair, DailyRecord, ForecastBundle, HistoricalYear, Location, WeatherCategory,
};
use crate::stats::{
    accuracy_percent, count_matches, days_since_last_match, median, next_likely_offset, LastSeen,
    NextOccurrence,
};

/// Day offsets searched for the next likely rain or thunder
pub const NEXT_OCCURRENCE_WINDOW: usize = 7;

/// Errors that can occur when assembling a report
#[derive(Debug, Error)]
pub enum ReportError {
    /// The daily window cannot hold yesterday, today and tomorrow
    #[error("Daily window too short: need 3 days, got {0}")]
    WindowTooShort(usize),
}

/// The three days shown side by side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayDay {
    Yesterday,
    Today,
    Tomorrow,
}

impl DisplayDay {
    pub fn all() -> [DisplayDay; 3] {
        [DisplayDay::Yesterday, DisplayDay::Today, DisplayDay::Tomorrow]
    }

    pub fn label(&self) -> &'static str {
        match self {
            DisplayDay::Yesterday => "Yesterday",
            DisplayDay::Today => "Today",
            DisplayDay::Tomorrow => "Tomorrow",
        }
    }

    /// Offset into a 3-day window (0 = yesterday)
    pub fn offset(&self) -> usize {
        match self {
            DisplayDay::Yesterday => 0,
            DisplayDay::Today => 1,
            DisplayDay::Tomorrow => 2,
        }
    }
}

/// How a day's temperature compares to what was forecast before it
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    /// An earlier reading and how accurate it turned out to be
    Accuracy {
        label: &'static str,
        reference: i64,
        /// `None` when the accuracy cannot be computed (a 0° reading)
        percent: Option<i64>,
    },
    /// Tomorrow has no outcome yet, only the forecast
    Forecast { label: &'static str, reference: i64 },
}

impl Comparison {
    pub fn label(&self) -> &'static str {
        match self {
            Comparison::Accuracy { label, .. } | Comparison::Forecast { label, .. } => label,
        }
    }

    pub fn reference(&self) -> i64 {
        match self {
            Comparison::Accuracy { reference, .. } | Comparison::Forecast { reference, .. } => {
                *reference
            }
        }
    }

    /// Bracketed note shown after the reference temperature
    pub fn note(&self) -> String {
        match self {
            Comparison::Accuracy {
                percent: Some(p), ..
            } => format!("({}% accurate)", p),
            Comparison::Accuracy { percent: None, .. } => "(accuracy N/A)".to_string(),
            Comparison::Forecast { .. } => "(Forecast)".to_string(),
        }
    }
}

/// Median of the same day across the historical years
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoricalMedian {
    pub temperature: Option<i64>,
    pub category: Option<WeatherCategory>,
}

/// Everything shown for one of the three days
#[derive(Debug, Clone, PartialEq)]
pub struct DayCard {
    pub day: DisplayDay,
    pub date: NaiveDate,
    /// Whole degrees Celsius
    pub temperature: i64,
    pub category: WeatherCategory,
    pub description: &'static str,
    pub assets: AssetPair,
    /// Whole percent
    pub cloud_cover: i64,
    pub sunrise: NaiveTime,
    pub sunset: NaiveTime,
    pub comparison: Comparison,
    pub historical: HistoricalMedian,
}

/// Rain or thunder summary
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionPanel {
    pub title: &'static str,
    /// Lower-case noun used in the captions ("rain", "thunder")
    pub noun: &'static str,
    /// Days with the condition over the past month, today included
    pub past_month: usize,
    pub last: LastSeen,
    pub next: NextOccurrence,
}

impl ConditionPanel {
    fn build(
        title: &'static str,
        noun: &'static str,
        observed: &[DailyRecord],
        history: &[HistoricalYear],
        predicate: fn(&DailyRecord) -> bool,
    ) -> Self {
        Self {
            title,
            noun,
            past_month: count_matches(observed, predicate),
            last: days_since_last_match(observed, predicate),
            next: next_likely_offset(history, NEXT_OCCURRENCE_WINDOW, predicate),
        }
    }
}

/// Current wind reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wind {
    /// km/h
    pub speed: f64,
    /// Degrees the wind blows from
    pub direction: f64,
}

/// The assembled report for one search
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    /// "City, Country"
    pub location: String,
    /// Yesterday, today and tomorrow, in that order
    pub days: Vec<DayCard>,
    pub clothing: ClothingAdvice,
    pub rain: ConditionPanel,
    pub thunder: ConditionPanel,
    pub wind: Wind,
}

impl WeatherReport {
    pub fn day(&self, day: DisplayDay) -> Option<&DayCard> {
        self.days.iter().find(|card| card.day == day)
    }
}

/// Build the report for a location from its fetched bundle.
///
/// Today sits second to last in the daily window. Yesterday and today are
/// compared against the previous day's mean; tomorrow is forecast only.
/// Rain and thunder history is counted up to and including today, so a
/// rainy forecast for tomorrow never shows up in the "Past Month" or "Last"
/// figures. This intentionally departs from counting the whole window.
pub fn assemble(location: &Location, bundle: &ForecastBundle) -> Result<WeatherReport, ReportError> {
    let daily = &bundle.daily;
    let today = match bundle.today_index() {
        Some(t) if t >= 1 => t,
        _ => return Err(ReportError::WindowTooShort(daily.len())),
    };

    let days = DisplayDay::all()
        .into_iter()
        .map(|day| build_day_card(bundle, today - 1 + day.offset(), day))
        .collect();

    let precipitation_today = daily[today].precipitation_sum;
    let clothing = recommend(
        bundle.current.temperature,
        precipitation_today,
        bundle.current.weather_code,
    );

    let observed = &daily[..=today];
    let rain = ConditionPanel::build("Rain", "rain", observed, &bundle.history, DailyRecord::had_rain);
    let thunder = ConditionPanel::build(
        "Thunder",
        "thunder",
        observed,
        &bundle.history,
        DailyRecord::had_thunder,
    );

    Ok(WeatherReport {
        location: location.display_name(),
        days,
        clothing,
        rain,
        thunder,
        wind: Wind {
            speed: bundle.current.wind_speed,
            direction: bundle.current.wind_direction,
        },
    })
}

fn build_day_card(bundle: &ForecastBundle, index: usize, day: DisplayDay) -> DayCard {
    let daily = &bundle.daily;
    let record = &daily[index];

    let (temperature, code) = match day {
        DisplayDay::Today => (bundle.current.temperature, bundle.current.weather_code),
        _ => (record.mean_temperature(), record.weather_code),
    };
    let category = classify(code);

    let comparison = match day {
        DisplayDay::Yesterday | DisplayDay::Today => {
            let previous = index
                .checked_sub(1)
                .and_then(|i| daily.get(i))
                .unwrap_or(record)
                .mean_temperature();
            let label = if day == DisplayDay::Yesterday {
                "Day Before's Forecast"
            } else {
                "Yesterday's Forecast"
            };
            Comparison::Accuracy {
                label,
                reference: round_half_up(previous),
                percent: accuracy_percent(temperature, previous).map(round_half_up),
            }
        }
        DisplayDay::Tomorrow => Comparison::Forecast {
            label: "Today's Forecast",
            reference: round_half_up(record.mean_temperature()),
        },
    };

    DayCard {
        day,
        date: record.date,
        temperature: round_half_up(temperature),
        category,
        description: category.label(),
        assets: category.assets(),
        cloud_cover: round_half_up(record.cloud_cover_mean),
        sunrise: record.sunrise.time(),
        sunset: record.sunset.time(),
        comparison,
        historical: historical_median(&bundle.history, day.offset()),
    }
}

/// Median temperature and weather across the years' day at `offset`
fn historical_median(history: &[HistoricalYear], offset: usize) -> HistoricalMedian {
    let days: Vec<&DailyRecord> = history.iter().filter_map(|year| year.days.get(offset)).collect();

    let temps: Vec<f64> = days.iter().map(|d| d.mean_temperature()).collect();
    let codes: Vec<f64> = days.iter().map(|d| f64::from(d.weather_code)).collect();

    HistoricalMedian {
        temperature: median(&temps).map(round_half_up),
        category: median(&codes).map(|code| classify(round_half_up(code).clamp(0, 255) as u8)),
    }
}

/// Nearest integer with ties toward positive infinity: -2.5 becomes -2
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
