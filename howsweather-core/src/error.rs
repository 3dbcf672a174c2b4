use thiserror::Error;

use crate::model::Coordinates;

/// Notice shown to the user for any failed query, whatever stage failed.
pub const GENERIC_NOTICE: &str = "Something went wrong, please try again or cancel.";

/// Pipeline stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Input,
    Resolution,
    Fetch,
    Config,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Stage::Input => "input",
            Stage::Resolution => "resolution",
            Stage::Fetch => "fetch",
            Stage::Config => "config",
        })
    }
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("expected \"city, region\" or \"city, region, country\", got {input:?}")]
    Input { input: String },

    #[error("could not resolve location '{target}': {reason}")]
    Resolution { target: String, reason: String },

    #[error("weather lookup failed for {coordinates}: {reason}")]
    Fetch {
        coordinates: Coordinates,
        reason: String,
    },

    #[error(
        "No OpenWeather API key configured.\n\
         Hint: set OPENWEATHER_API_KEY or run `howsweather configure`."
    )]
    MissingApiKey,

    #[error("configuration error: {0}")]
    Config(String),
}

impl WeatherError {
    pub fn stage(&self) -> Stage {
        match self {
            WeatherError::Input { .. } => Stage::Input,
            WeatherError::Resolution { .. } => Stage::Resolution,
            WeatherError::Fetch { .. } => Stage::Fetch,
            WeatherError::MissingApiKey | WeatherError::Config(_) => Stage::Config,
        }
    }

    /// Text safe to put in front of the user. Query failures all collapse into
    /// the same notice; configuration problems keep their hint.
    pub fn user_message(&self) -> String {
        match self.stage() {
            Stage::Config => self.to_string(),
            _ => GENERIC_NOTICE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_errors_share_one_notice() {
        let errors = [
            WeatherError::Input {
                input: "justacity".into(),
            },
            WeatherError::Resolution {
                target: "Nowhere,,Atlantis".into(),
                reason: "no candidates".into(),
            },
            WeatherError::Fetch {
                coordinates: Coordinates {
                    latitude: 1.0,
                    longitude: 2.0,
                },
                reason: "status 500".into(),
            },
        ];

        for err in &errors {
            assert_eq!(err.user_message(), GENERIC_NOTICE);
        }

        let stages: Vec<Stage> = errors.iter().map(WeatherError::stage).collect();
        assert_eq!(stages, vec![Stage::Input, Stage::Resolution, Stage::Fetch]);
    }

    #[test]
    fn missing_key_keeps_its_hint() {
        let err = WeatherError::MissingApiKey;
        assert_eq!(err.stage(), Stage::Config);
        assert!(err.user_message().contains("howsweather configure"));
    }
}
