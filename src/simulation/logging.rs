//! Logging and tracing configuration
//!
//! Console output goes to stderr so reports on stdout stay machine-readable. File
//! logging writes JSON lines to a daily rolling file.

use crate::types::{CliArgs, OutputFormat};
use std::io;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Error returned when the global subscriber cannot be installed
pub type LoggingError = Box<dyn std::error::Error + Send + Sync>;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Most verbose level emitted by this crate
    pub level: Level,
    /// Emit JSON on the console instead of compact text
    pub json_format: bool,
    /// Directory for rolling log files; no file logging when unset
    pub log_directory: Option<PathBuf>,
    /// Log file name prefix
    pub log_file_prefix: String,
    /// Log span close events with their timings
    pub enable_span_events: bool,
    /// Colored console output
    pub enable_ansi: bool,
    /// Filter directive that replaces the level-based filter
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json_format: false,
            log_directory: None,
            log_file_prefix: env!("CARGO_PKG_NAME").to_string(),
            enable_span_events: false,
            enable_ansi: true,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    /// Create a new logging configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for the command line verbosity flags
    ///
    /// `debug` wins over `verbose`; both add span timings. Without either only warnings
    /// and errors are shown.
    pub fn for_cli(verbose: bool, debug: bool) -> Self {
        match (debug, verbose) {
            (true, _) => Self::new().with_level(Level::DEBUG).with_span_events(),
            (false, true) => Self::new().with_level(Level::INFO).with_span_events(),
            (false, false) => Self::new().with_level(Level::WARN),
        }
    }

    /// Configuration for the full set of command line logging options
    pub fn from_cli_args(args: &CliArgs) -> Self {
        let mut config = Self::for_cli(args.verbose, args.debug);

        if let Some(directory) = &args.log_dir {
            config = config.with_file_logging(directory);
        }
        if args.log_format == Some(OutputFormat::Json) {
            config = config.with_json_format();
        }
        if let Some(filter) = &args.log_filter {
            config = config.with_env_filter(filter.as_str());
        }
        if args.no_color {
            config = config.without_ansi();
        }

        config
    }

    /// Set the log level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Emit JSON on the console
    pub fn with_json_format(mut self) -> Self {
        self.json_format = true;
        self
    }

    /// Also write JSON lines to a daily rolling file in `directory`
    pub fn with_file_logging(mut self, directory: impl Into<PathBuf>) -> Self {
        self.log_directory = Some(directory.into());
        self
    }

    /// Enable span close events
    pub fn with_span_events(mut self) -> Self {
        self.enable_span_events = true;
        self
    }

    /// Disable ANSI colors
    pub fn without_ansi(mut self) -> Self {
        self.enable_ansi = false;
        self
    }

    /// Use a custom filter directive such as `elevator_sweep_simulator::controller=debug`
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    fn span_events(&self) -> FmtSpan {
        if self.enable_span_events {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    // Precedence: explicit directive, then RUST_LOG, then the configured level for this crate
    fn build_filter(&self) -> Result<EnvFilter, LoggingError> {
        if let Some(filter) = &self.env_filter {
            return Ok(EnvFilter::try_new(filter)?);
        }

        Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                self.level
            ))
        }))
    }

    /// Install the global tracing subscriber
    ///
    /// With file logging enabled the returned guard owns the background writer; keep it
    /// alive until the program ends or buffered lines are lost.
    pub fn init(self) -> Result<Option<WorkerGuard>, LoggingError> {
        let filter = self.build_filter()?;

        let (file_layer, guard) = match &self.log_directory {
            Some(directory) => {
                let appender = rolling::daily(directory, &self.log_file_prefix);
                let (writer, guard) = non_blocking(appender);
                let layer = fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_span_events(self.span_events());
                (Some(layer), Some(guard))
            }
            None => (None, None),
        };

        let json_console = self.json_format.then(|| {
            fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_span_events(self.span_events())
        });
        let text_console = (!self.json_format).then(|| {
            fmt::layer()
                .compact()
                .with_writer(io::stderr)
                .with_ansi(self.enable_ansi)
                .with_span_events(self.span_events())
        });

        Registry::default()
            .with(filter)
            .with(file_layer)
            .with(json_console)
            .with(text_console)
            .try_init()?;

        info!(
            level = %self.level,
            json = self.json_format,
            log_directory = ?self.log_directory,
            "Logging initialized"
        );
        Ok(guard)
    }
}
