//! Binary crate for the `howsweather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration and the location prompt
//! - Human-friendly output formatting

use clap::Parser;
use std::{path::PathBuf, process::ExitCode};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

mod cli;

fn setup_logging(verbose: bool) {
    let default = if verbose {
        cli::VERBOSE_FILTER
    } else {
        cli::QUIET_FILTER
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// The key may also come from the shell or the config file, so a missing
/// .env is not an error.
fn load_dotenv() {
    log_dotenv(dotenvy::dotenv());
}

fn log_dotenv(result: Result<PathBuf, dotenvy::Error>) {
    match result {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => debug!("no .env file found"),
        Err(e) => warn!(error = %e, "failed to load .env"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cmd = cli::Cli::parse();
    setup_logging(cmd.verbose);
    load_dotenv();
    cmd.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn logged(result: Result<PathBuf, dotenvy::Error>) -> String {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let sink = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(cli::VERBOSE_FILTER))
            .with_writer(move || CapturedWriter(sink.clone()))
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || log_dotenv(result));
        let bytes = buf.lock().expect("lock").clone();
        String::from_utf8(bytes).expect("utf8")
    }

    struct CapturedWriter(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedWriter {
        fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("lock").extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn dotenv_outcome_is_logged() {
        let text = logged(Ok(PathBuf::from("/work/.env")));
        assert!(text.contains("loaded .env") && text.contains("/work/.env"), "{text}");

        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let text = logged(Err(dotenvy::Error::Io(missing)));
        assert!(text.contains("no .env file found"), "{text}");

        let text = logged(Err(dotenvy::Error::LineParse("=oops".into(), 0)));
        assert!(text.contains("failed to load .env"), "{text}");
    }
}
