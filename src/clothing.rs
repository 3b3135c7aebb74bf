//! Clothing recommendations for today's weather.
//!
//! Temperature picks one of six base outfits; wet weather then swaps the
//! footwear and adds rain protection on top.

use serde::{Deserialize, Serialize};

/// What to wear, grouped the way the report shows it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothingAdvice {
    pub layers: Vec<String>,
    pub accessories: Vec<String>,
    pub footwear: Vec<String>,
}

/// Temperature bands the base outfit is chosen from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureBand {
    /// Below 0°C
    Freezing,
    /// 0-10°C
    Cold,
    /// 10-15°C
    Cool,
    /// 15-20°C
    Mild,
    /// 20-25°C
    Warm,
    /// 25°C and above
    Hot,
}

impl TemperatureBand {
    /// Bands are half-open: each upper bound belongs to the next band up.
    pub fn from_celsius(temp: f64) -> Self {
        if temp < 0.0 {
            TemperatureBand::Freezing
        } else if temp < 10.0 {
            TemperatureBand::Cold
        } else if temp < 15.0 {
            TemperatureBand::Cool
        } else if temp < 20.0 {
            TemperatureBand::Mild
        } else if temp < 25.0 {
            TemperatureBand::Warm
        } else {
            TemperatureBand::Hot
        }
    }

    /// Base outfit for the band
    fn base_outfit(&self) -> Outfit {
        match self {
            TemperatureBand::Freezing => Outfit {
                layers: &["Heavy winter clothing"],
                accessories: &["Winter accessories"],
                footwear: &["Winter boots"],
            },
            TemperatureBand::Cold => Outfit {
                layers: &["Warm winter clothing"],
                accessories: &["Light winter accessories"],
                footwear: &["Warm shoes"],
            },
            TemperatureBand::Cool => Outfit {
                layers: &["Light jacket and long sleeves"],
                accessories: &[],
                footwear: &["Comfortable shoes"],
            },
            TemperatureBand::Mild => Outfit {
                layers: &["Light layers"],
                accessories: &[],
                footwear: &["Light shoes"],
            },
            TemperatureBand::Warm => Outfit {
                layers: &["Light clothing"],
                accessories: &[],
                footwear: &["Light shoes"],
            },
            TemperatureBand::Hot => Outfit {
                layers: &["Summer clothing"],
                accessories: &["Sun protection"],
                footwear: &["Summer shoes"],
            },
        }
    }
}

/// Fixed outfit for one temperature band
struct Outfit {
    layers: &'static [&'static str],
    accessories: &'static [&'static str],
    footwear: &'static [&'static str],
}

/// Footwear that replaces the base recommendation on wet days
pub const WET_FOOTWEAR: &str = "Water-resistant footwear";

/// Accessory added on wet days
pub const RAIN_ACCESSORY: &str = "Rain protection";

/// WMO codes for drizzle, rain and freezing rain
fn is_wet_code(code: u8) -> bool {
    (51..=67).contains(&code)
}

/// Recommend clothing for the current temperature and today's precipitation.
///
/// # Arguments
/// * `current_temp` - Current temperature in Celsius
/// * `precipitation_today` - Today's precipitation sum in millimetres
/// * `current_code` - Current WMO weather code
pub fn recommend(current_temp: f64, precipitation_today: f64, current_code: u8) -> ClothingAdvice {
    let outfit = TemperatureBand::from_celsius(current_temp).base_outfit();

    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    let mut advice = ClothingAdvice {
        layers: owned(outfit.layers),
        accessories: owned(outfit.accessories),
        footwear: owned(outfit.footwear),
    };

    if precipitation_today > 0.0 || is_wet_code(current_code) {
        advice.accessories.push(RAIN_ACCESSORY.to_string());
        advice.footwear = vec![WET_FOOTWEAR.to_string()];
    }

    advice
}
