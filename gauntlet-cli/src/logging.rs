//! Diagnostic logging for the gauntlet binary.
//!
//! A run has two output channels. Verdicts, per-trial progress and the final
//! statistics table go through the harness console on `stdout`, so they can be
//! piped or diffed between library builds. Clamped prompt answers, failed
//! library calls and fatal-trial reports are `tracing` events on `stderr`.
//!
//! Set `GAUNTLET_LOG_FORMAT=json` to get one JSON object per event. Each
//! object lists the enclosing `cli.run` span (mode and `--seed`) and the
//! active mode span (`core.random_graphs`, `core.specific_graph` or
//! `core.maximal_planar`) with their recorded fields.
//!
//! `RUST_LOG` filters events and falls back to `info`.

use std::{env, str::FromStr, sync::OnceLock};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FORMAT_ENV: &str = "GAUNTLET_LOG_FORMAT";
const DEFAULT_FILTER: &str = "info";

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Errors raised while setting up diagnostic logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// `GAUNTLET_LOG_FORMAT` was set to bytes that are not UTF-8.
    #[error("environment variable `{name}` contained invalid UTF-8: {source}")]
    InvalidUnicode {
        /// Name of the offending environment variable.
        name: &'static str,
        /// Underlying lookup failure.
        #[source]
        source: env::VarError,
    },
    /// `GAUNTLET_LOG_FORMAT` named a format other than `human` or `json`.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Normalised value supplied by the user.
        provided: String,
    },
    /// Another global subscriber refused to make way.
    #[error("failed to install tracing subscriber: {source}")]
    InstallFailed {
        /// Error raised by `tracing_subscriber`.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
}

/// How diagnostic events are rendered on `stderr`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Plain text lines for an interactive terminal.
    #[default]
    Human,
    /// One JSON object per event, with the current span and span list.
    Json,
}

impl LogFormat {
    /// Reads the format from `GAUNTLET_LOG_FORMAT`; unset means [`LogFormat::Human`].
    ///
    /// # Errors
    /// Returns [`LoggingError::InvalidUnicode`] or
    /// [`LoggingError::UnsupportedFormat`] for values that cannot be used.
    pub fn from_env() -> Result<Self, LoggingError> {
        match env::var(LOG_FORMAT_ENV) {
            Ok(raw) => raw.parse(),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(err @ env::VarError::NotUnicode(_)) => Err(LoggingError::InvalidUnicode {
                name: LOG_FORMAT_ENV,
                source: err,
            }),
        }
    }
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::UnsupportedFormat {
                provided: other.to_owned(),
            }),
        }
    }
}

/// Routes gauntlet diagnostics to `stderr`, once per process.
///
/// Later calls return immediately. When a test harness or embedding program
/// already owns the global subscriber, a one-line notice is printed and the
/// run continues with that subscriber.
///
/// # Errors
/// Returns [`LoggingError`] when `GAUNTLET_LOG_FORMAT` cannot be used.
pub fn init_logging() -> Result<(), LoggingError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    match install_subscriber(LogFormat::from_env()?) {
        Ok(()) => {}
        Err(LoggingError::InstallFailed { source }) => report_existing_subscriber(&source),
        Err(err) => return Err(err),
    }
    let _ = INSTALLED.set(());
    Ok(())
}

#[expect(
    clippy::print_stderr,
    reason = "tracing belongs to another subscriber, so stderr is the only channel left"
)]
fn report_existing_subscriber(source: &tracing_subscriber::util::TryInitError) {
    eprintln!("gauntlet diagnostics use the existing subscriber: {source}");
}

fn install_subscriber(format: LogFormat) -> Result<(), LoggingError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let fmt_layer = match format {
        LogFormat::Human => fmt_layer.boxed(),
        LogFormat::Json => fmt_layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
    };

    // Library adapters that still speak `log` are forwarded when the slot is free.
    let _ = LogTracer::init();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|source| LoggingError::InstallFailed { source })
}
