//! Application state and the query pipeline behind each submit.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    daylight,
    display,
    error::WeatherError,
    location::LocationQuery,
    model::DisplayState,
    provider::WeatherProvider,
};

/// What is currently on screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentView {
    pub location: LocationQuery,
    pub display: DisplayState,
}

#[derive(Debug)]
pub struct WeatherApp {
    provider: Box<dyn WeatherProvider>,
    current: Option<CurrentView>,
}

impl WeatherApp {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self {
            provider,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&CurrentView> {
        self.current.as_ref()
    }

    pub async fn submit(&mut self, input: &str) -> Result<&CurrentView, WeatherError> {
        self.submit_at(input, Utc::now()).await
    }

    /// Run one query as of `now`. The current view is only replaced when every
    /// stage succeeds.
    #[instrument(skip(self, now))]
    pub async fn submit_at(
        &mut self,
        input: &str,
        now: DateTime<Utc>,
    ) -> Result<&CurrentView, WeatherError> {
        match self.run(input, now).await {
            Ok(view) => {
                info!(location = %view.location.label(), icon = ?view.display.icon_key, "display updated");
                Ok(&*self.current.insert(view))
            }
            Err(err) => {
                debug!(stage = %err.stage(), error = %err, "query failed");
                Err(err)
            }
        }
    }

    async fn run(&self, input: &str, now: DateTime<Utc>) -> Result<CurrentView, WeatherError> {
        let location = LocationQuery::parse(input)?;
        let coordinates = self.provider.resolve(&location).await?;
        let snapshot = self.provider.fetch(coordinates).await?;

        let offset = snapshot.timezone_offset_seconds;
        let night = daylight::is_night(
            snapshot.sunrise_unix,
            snapshot.sunset_unix,
            daylight::local_clock(now, offset),
            offset,
        );

        let display = display::format(&snapshot.category, &snapshot, night);

        Ok(CurrentView { location, display })
    }
}
