//! Turns a [`WeatherSnapshot`] into the text and icon shown to the user.

use chrono::DateTime;

use crate::model::{DisplayState, IconKey, WeatherSnapshot};

const KELVIN_OFFSET: f64 = 273.15;

/// Fahrenheit from Kelvin. The Celsius value is truncated toward zero before
/// scaling, so results move in 1.8 degree steps.
pub fn kelvin_to_fahrenheit(kelvin: f64) -> f64 {
    1.8 * (kelvin - KELVIN_OFFSET).trunc() + 32.0
}

fn fahrenheit_text(kelvin: f64) -> String {
    format!("{:.2}", kelvin_to_fahrenheit(kelvin))
}

/// Icon for a weather category, matched case-insensitively. `None` when the
/// category has no artwork for the current time of day.
pub fn icon_for(category: &str, is_night: bool) -> Option<IconKey> {
    let category = category.trim().to_lowercase();

    if is_night {
        match category.as_str() {
            "clear" => Some(IconKey::NightClear),
            "clouds" => Some(IconKey::NightCloud),
            "rain" => Some(IconKey::NightRain),
            _ => None,
        }
    } else {
        match category.as_str() {
            "clear" | "sunny" => Some(IconKey::ClearDay),
            "clouds" | "partly cloudy" => Some(IconKey::DayCloud),
            "rain" => Some(IconKey::RainDay),
            "haze" | "hazy" => Some(IconKey::Haze),
            _ => None,
        }
    }
}

/// 12-hour local clock time of a UTC timestamp, e.g. `06:42 AM`.
fn local_time(unix: i64, offset_seconds: i32) -> String {
    unix.checked_add(i64::from(offset_seconds))
        .and_then(|local| DateTime::from_timestamp(local, 0))
        .map(|dt| dt.format("%I:%M %p").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

pub fn format(category: &str, snapshot: &WeatherSnapshot, is_night: bool) -> DisplayState {
    let summary_line = format!(
        "{}\n{} ℉",
        category.to_lowercase(),
        fahrenheit_text(snapshot.temperature_kelvin)
    );

    let offset = snapshot.timezone_offset_seconds;
    let detail_block = [
        format!("Low:\t{} ℉", fahrenheit_text(snapshot.temp_min_kelvin)),
        format!("High:\t{} ℉", fahrenheit_text(snapshot.temp_max_kelvin)),
        format!("Humidity:\t{} %", snapshot.humidity_pct),
        format!("Sunrise:\t{}", local_time(snapshot.sunrise_unix, offset)),
        format!("Sunset:\t{}", local_time(snapshot.sunset_unix, offset)),
    ]
    .join("\n");

    DisplayState {
        icon_key: icon_for(category, is_night),
        summary_line,
        detail_block,
    }
}
