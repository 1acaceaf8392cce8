//! Tracing subscriber setup for tessel executables and tests.
//!
//! The interpreter crates only emit `tracing` events. This crate picks the
//! filter and formatter and installs the subscriber. Everything is written to
//! stderr; stdout belongs to the running program.

#[macro_use]
pub mod macros;

use std::env;
use std::str::FromStr;
pub use tracing::{debug, error, info, trace, warn};

use tracing::Subscriber;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt as tracing_fmt, EnvFilter, Registry};

/// Crates whose level follows [`TracingConfig::with_verbosity`]
const INTERPRETER_TARGETS: [&str; 3] = ["tessel_core", "tessel_ops", "tessel"];

type FormatLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// How events are filtered and formatted
#[derive(Clone, Debug)]
pub struct TracingConfig {
    /// Explicit filter directives such as `tessel_core=debug,warn`
    ///
    /// `None` defers to `RUST_LOG`, then to `default_directive`.
    pub directives: Option<String>,
    pub default_directive: String,
    /// Print event targets (module paths)
    pub include_targets: bool,
    pub ansi: bool,
    pub output: TracingOutput,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::for_local()
    }
}

impl TracingConfig {
    /// Terminal use: compact, coloured, warnings and above
    pub fn for_local() -> Self {
        Self {
            directives: None,
            default_directive: "warn".to_string(),
            include_targets: false,
            ansi: true,
            output: TracingOutput::Compact,
        }
    }

    /// Log collection: JSON lines with targets, `info` and above
    pub fn for_ci() -> Self {
        Self {
            directives: None,
            default_directive: "info".to_string(),
            include_targets: true,
            ansi: false,
            output: TracingOutput::Json,
        }
    }

    /// Start from a preset and apply environment overrides
    ///
    /// # Environment Variables
    ///
    /// - `TESSEL_TRACING_PROFILE` - `local` (default) or `ci`
    /// - `TESSEL_TRACING_DIRECTIVES` - filter directives, ignored when blank
    /// - `TESSEL_TRACING_FORMAT` - `compact`, `pretty` or `json`; unknown values are ignored
    pub fn from_env() -> Self {
        let mut config = match env::var("TESSEL_TRACING_PROFILE") {
            Ok(profile) if profile.trim().eq_ignore_ascii_case("ci") => Self::for_ci(),
            _ => Self::for_local(),
        };

        config.directives = env::var("TESSEL_TRACING_DIRECTIVES")
            .ok()
            .filter(|directives| !directives.trim().is_empty());

        if let Some(output) = env::var("TESSEL_TRACING_FORMAT")
            .ok()
            .and_then(|format| format.parse().ok())
        {
            config = config.with_output(output);
        }

        config
    }

    /// Switch formatter; JSON never carries colour codes
    pub fn with_output(mut self, output: TracingOutput) -> Self {
        self.output = output;
        if output == TracingOutput::Json {
            self.ansi = false;
        }
        self
    }

    /// Raise interpreter verbosity from a `-v` count
    ///
    /// `0` leaves the configuration alone, `1` enables `info`, `2` `debug`
    /// (one event per executed instruction) and `3+` `trace`. Explicit
    /// directives still win.
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        let level = match verbosity {
            0 => return self,
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        if self.directives.is_none() {
            let directives = INTERPRETER_TARGETS
                .iter()
                .map(|target| format!("{target}={level}"))
                .chain(std::iter::once(self.default_directive.clone()))
                .collect::<Vec<_>>()
                .join(",");
            self.directives = Some(directives);
        }
        self
    }

    fn filter(&self) -> Result<EnvFilter, TracingSetupError> {
        match &self.directives {
            Some(directives) => {
                EnvFilter::try_new(directives).map_err(|err| TracingSetupError::InvalidFilter(err.to_string()))
            }
            None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_directive))),
        }
    }

    fn format_layer(&self) -> FormatLayer {
        let layer = tracing_fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(self.include_targets);
        match self.output {
            TracingOutput::Compact => Box::new(layer.compact().with_ansi(self.ansi)),
            TracingOutput::Pretty => Box::new(layer.pretty().with_ansi(self.ansi)),
            TracingOutput::Json => Box::new(layer.json().with_ansi(false)),
        }
    }
}

/// Failures while installing the subscriber
#[derive(Debug, thiserror::Error)]
pub enum TracingSetupError {
    #[error("invalid tracing directive: {0}")]
    InvalidFilter(String),

    /// Usually means another subscriber is already installed
    #[error("failed to install global tracing subscriber: {0}")]
    SubscriberInit(#[from] tracing_subscriber::util::TryInitError),
}

/// Build a subscriber without installing it
pub fn build_subscriber(config: &TracingConfig) -> Result<impl Subscriber + Send + Sync, TracingSetupError> {
    let filter = config.filter()?;
    Ok(Registry::default().with(config.format_layer()).with(filter))
}

/// Install the configured subscriber for the whole process
pub fn init_global_tracing(config: &TracingConfig) -> Result<(), TracingSetupError> {
    build_subscriber(config)?.try_init()?;
    Ok(())
}

/// Formatter choices
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TracingOutput {
    Compact,
    Pretty,
    Json,
}

impl FromStr for TracingOutput {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown tracing format '{other}'")),
        }
    }
}
