//! Parsing of free-text locations and the region/country policy applied
//! before geocoding.

use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// Country code sent whenever the region is one of [`REGION_CODES`].
pub const DOMESTIC_COUNTRY: &str = "us";

/// US state, district and territory abbreviations, lowercase.
pub const REGION_CODES: &[&str] = &[
    "al", "ak", "az", "ar", "ca", "co", "ct", "de", "fl", "ga", "hi", "id", "il", "in", "ia", "ks",
    "ky", "la", "me", "md", "ma", "mi", "mn", "ms", "mo", "mt", "ne", "nv", "nh", "nj", "nm", "ny",
    "nc", "nd", "oh", "ok", "or", "pa", "ri", "sc", "sd", "tn", "tx", "ut", "vt", "va", "wa", "wv",
    "wi", "wy", "dc", "as", "gu", "mp", "pr", "vi", "um",
];

pub fn is_region_code(value: &str) -> bool {
    let needle = value.trim().to_lowercase();
    REGION_CODES.contains(&needle.as_str())
}

/// Location as typed by the user: `city, region[, country]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationQuery {
    pub city: String,
    pub region: String,
    pub country: Option<String>,
}

impl LocationQuery {
    pub fn new(city: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            region: region.into(),
            country: None,
        }
    }

    /// Split on commas and trim. Anything past the third part is ignored.
    pub fn parse(input: &str) -> Result<Self, WeatherError> {
        let mut parts = input.split(',').map(str::trim);

        let city = parts.next().unwrap_or_default();
        let region = parts.next().unwrap_or_default();
        let country = parts.next().filter(|c| !c.is_empty());

        if city.is_empty() || region.is_empty() {
            return Err(WeatherError::Input {
                input: input.to_string(),
            });
        }

        Ok(Self {
            city: city.to_string(),
            region: region.to_string(),
            country: country.map(str::to_string),
        })
    }

    /// Apply the region policy: a known region code pins the country to
    /// [`DOMESTIC_COUNTRY`]; anything else is taken as the country name and the
    /// region is dropped. A typed country never overrides this.
    pub fn geocode_target(&self) -> GeocodeTarget {
        if is_region_code(&self.region) {
            GeocodeTarget {
                city: self.city.clone(),
                region: self.region.clone(),
                country: DOMESTIC_COUNTRY.to_string(),
            }
        } else {
            GeocodeTarget {
                city: self.city.clone(),
                region: String::new(),
                country: self.region.clone(),
            }
        }
    }

    /// Heading shown above the summary, e.g. `Austin, TX`.
    pub fn label(&self) -> String {
        match &self.country {
            Some(country) => format!("{}, {}, {}", self.city, self.region, country),
            None => format!("{}, {}", self.city, self.region),
        }
    }
}

/// City/region/country triple actually sent to the geocoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodeTarget {
    pub city: String,
    pub region: String,
    pub country: String,
}

impl std::fmt::Display for GeocodeTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.city, self.region, self.country)
    }
}
