use anyhow::Context;
use clap::{Parser, Subcommand};
use howsweather_core::{
    Config, CurrentView, IconKey, WeatherApp, WeatherError, provider_from_config,
};
use inquire::{InquireError, Password, Text};
use std::process::ExitCode;
use tracing::{debug, info};

/// Log filter used unless `RUST_LOG` is set. Query failures are logged below
/// this level so the user only sees the generic notice.
pub const QUIET_FILTER: &str = "warn";
pub const VERBOSE_FILTER: &str = "debug";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "howsweather", version, about = "How's the weather? Current conditions for a city")]
pub struct Cli {
    /// Log request details to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Show current weather for a location.
    Show {
        /// "City, State" or "City, Country", e.g. "Austin, TX" or "Paris, France".
        location: String,

        /// Print the display state as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Prompt for locations until cancelled.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => configure().map(|()| ExitCode::SUCCESS),
            Command::Show { location, json } => {
                let mut app = build_app()?;
                let shown = show_outcome(app.submit(&location).await, json)?;
                Ok(if shown {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                })
            }
            Command::Interactive => interactive().await.map(|()| ExitCode::SUCCESS),
        }
    }
}

/// Print a one-shot result. Returns false when the query failed.
fn show_outcome(result: Result<&CurrentView, WeatherError>, json: bool) -> anyhow::Result<bool> {
    match result {
        Ok(view) if json => println!("{}", serde_json::to_string_pretty(view)?),
        Ok(view) => print!("{}", render(view)),
        Err(err) => {
            report(&err);
            return Ok(false);
        }
    }
    Ok(true)
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    cfg.set_api_key(key.trim());
    let path = cfg.save()?;
    println!("Saved API key to {}", path.display());
    Ok(())
}

/// A missing API key fails here, before any query is attempted.
fn build_app() -> anyhow::Result<WeatherApp> {
    let cfg = Config::load()?;
    let provider = provider_from_config(&cfg)?;
    Ok(WeatherApp::new(provider))
}

async fn interactive() -> anyhow::Result<()> {
    let mut app = build_app()?;

    loop {
        let input = match Text::new("City, State:")
            .with_help_message("e.g. Austin, TX or Paris, France; empty input or Esc quits")
            .prompt()
        {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read location"),
        };

        if input.trim().is_empty() {
            break;
        }

        match app.submit(&input).await.map(render) {
            Ok(text) => print!("{text}"),
            Err(err) => {
                report(&err);
                if let Some(previous) = app.current() {
                    info!(location = %previous.location.label(), "keeping previous display");
                }
            }
        }
    }

    Ok(())
}

fn report(err: &WeatherError) {
    debug!(stage = %err.stage(), "{err}");
    eprintln!("Error! {}", err.user_message());
}

fn glyph(icon: IconKey) -> &'static str {
    match icon {
        IconKey::ClearDay => "☀️",
        IconKey::DayCloud => "🌤️",
        IconKey::Haze => "🌫️",
        IconKey::RainDay => "☔",
        IconKey::Mist => "🌁",
        IconKey::NightClear => "🌙",
        IconKey::NightRain => "🌧️",
        IconKey::NightCloud => "☁️",
    }
}

fn render(view: &CurrentView) -> String {
    let mut out = format!("{}\n", view.location.label());
    out.push_str(&view.display.summary_line);
    out.push('\n');
    if let Some(icon) = view.display.icon_key {
        out.push_str(&format!("{}  ({})\n", glyph(icon), icon));
    }
    out.push('\n');
    out.push_str(&view.display.detail_block);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use howsweather_core::provider::openweather::OpenWeatherProvider;
    use howsweather_core::{DisplayState, LocationQuery};
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::EnvFilter;

    fn view(icon_key: Option<IconKey>) -> CurrentView {
        CurrentView {
            location: LocationQuery::new("Austin", "TX"),
            display: DisplayState {
                icon_key,
                summary_line: "clear\n78.80 ℉".into(),
                detail_block: "Low:\t60.80 ℉".into(),
            },
        }
    }

    #[test]
    fn render_shows_label_summary_icon_and_details() {
        let text = render(&view(Some(IconKey::ClearDay)));
        assert_eq!(
            text,
            "Austin, TX\nclear\n78.80 ℉\n☀️  (clear_day)\n\nLow:\t60.80 ℉\n"
        );
    }

    #[test]
    fn failed_show_reports_failure() {
        let err = WeatherError::Input {
            input: "justacity".into(),
        };
        assert!(!show_outcome(Err(err), false).expect("no io error"));

        let ok = view(Some(IconKey::ClearDay));
        assert!(show_outcome(Ok(&ok), true).expect("json"));
        assert!(show_outcome(Ok(&ok), false).expect("text"));
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().expect("lock").clone()).expect("utf8")
        }
    }

    /// Runs a failing lookup and a malformed query, then returns what was
    /// logged under `filter`.
    async fn log_of_failed_queries(filter: &str) -> String {
        let captured = Captured::default();
        let sink = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_writer(move || sink.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        // nothing listens on the discard port
        let provider =
            OpenWeatherProvider::with_base_url("SECRET_KEY".into(), "http://127.0.0.1:9")
                .expect("valid uri");
        let mut app = WeatherApp::new(Box::new(provider));

        for input in ["Austin, TX", "justacity"] {
            let err = app.submit(input).await.unwrap_err();
            report(&err);
        }

        captured.text()
    }

    #[tokio::test(flavor = "current_thread")]
    async fn failures_log_nothing_by_default() {
        let logged = log_of_failed_queries(QUIET_FILTER).await;
        assert!(logged.is_empty(), "unexpected log output: {logged}");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn verbose_log_has_stage_but_not_api_key() {
        let logged = log_of_failed_queries(VERBOSE_FILTER).await;
        assert!(logged.contains("stage=resolution"), "{logged}");
        assert!(logged.contains("stage=input"), "{logged}");
        assert!(!logged.contains("SECRET_KEY"), "{logged}");
    }

    #[test]
    fn render_without_icon_skips_icon_line() {
        let text = render(&view(None));
        assert_eq!(text, "Austin, TX\nclear\n78.80 ℉\n\nLow:\t60.80 ℉\n");
    }

    #[test]
    fn every_icon_has_a_glyph() {
        for icon in IconKey::all() {
            assert!(!glyph(*icon).is_empty());
        }
    }

    #[test]
    fn show_parses_location_and_json_flag() {
        let cli = Cli::try_parse_from(["howsweather", "show", "Austin, TX", "--json"])
            .expect("parse");
        match cli.command {
            Command::Show { location, json } => {
                assert_eq!(location, "Austin, TX");
                assert!(json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["howsweather", "interactive", "-v"]).expect("parse");
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Interactive));
    }
}
