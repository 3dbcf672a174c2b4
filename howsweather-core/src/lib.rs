//! Core library for the `howsweather` CLI.
//!
//! This crate defines:
//! - Parsing of "city, region[, country]" input and the region policy
//! - The OpenWeather geocoding and current-conditions lookups
//! - Day/night classification and display formatting
//! - Configuration & credentials handling
//! - The application controller that ties one query together
//!
//! It is used by `howsweather-cli`, but can also back other front ends.

pub mod app;
pub mod config;
pub mod daylight;
pub mod display;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;

pub use app::{CurrentView, WeatherApp};
pub use config::Config;
pub use error::{GENERIC_NOTICE, Stage, WeatherError};
pub use location::{GeocodeTarget, LocationQuery};
pub use model::{Coordinates, DisplayState, IconKey, WeatherSnapshot};
pub use provider::{WeatherProvider, provider_from_config};
