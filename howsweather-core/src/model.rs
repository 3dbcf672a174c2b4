use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4},{:.4}", self.latitude, self.longitude)
    }
}

/// Current conditions for one lookup. Temperatures are in Kelvin, as the
/// weather service reports them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub category: String,
    pub temperature_kelvin: f64,
    pub temp_min_kelvin: f64,
    pub temp_max_kelvin: f64,
    pub humidity_pct: u8,
    pub sunrise_unix: i64,
    pub sunset_unix: i64,
    pub timezone_offset_seconds: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconKey {
    ClearDay,
    DayCloud,
    Haze,
    RainDay,
    Mist,
    NightClear,
    NightRain,
    NightCloud,
}

impl IconKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconKey::ClearDay => "clear_day",
            IconKey::DayCloud => "day_cloud",
            IconKey::Haze => "haze",
            IconKey::RainDay => "rain_day",
            IconKey::Mist => "mist",
            IconKey::NightClear => "night_clear",
            IconKey::NightRain => "night_rain",
            IconKey::NightCloud => "night_cloud",
        }
    }

    pub const fn all() -> &'static [IconKey] {
        &[
            IconKey::ClearDay,
            IconKey::DayCloud,
            IconKey::Haze,
            IconKey::RainDay,
            IconKey::Mist,
            IconKey::NightClear,
            IconKey::NightRain,
            IconKey::NightCloud,
        ]
    }
}

impl std::fmt::Display for IconKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the presentation layer needs for one refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayState {
    pub icon_key: Option<IconKey>,
    pub summary_line: String,
    pub detail_block: String,
}
