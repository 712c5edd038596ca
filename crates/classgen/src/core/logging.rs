//! Logging infrastructure for model edits and code generation
//!
//! Structured logging through the `tracing` crate. Native builds install a
//! `tracing-subscriber` registry; `wasm32` builds log to the browser console
//! through `tracing-wasm`.
//!
//! # Usage
//!
//! ```rust,no_run
//! use classgen::core::logging::init_logging;
//!
//! // Defaults: info level, compact format
//! init_logging(None, None).ok();
//! ```
//!
//! # Environment Variables
//!
//! - `CLASSGEN_LOG_LEVEL`: log level (trace|debug|info|warn|error|off)
//! - `CLASSGEN_LOG_FORMAT`: log format (compact|pretty|json)
//! - `RUST_LOG`: standard filter directive, used when no level is given
//!
//! Explicit arguments take precedence over the environment.
//!
//! # Filtering Logs
//!
//! ```bash
//! # Per-line script reader details
//! RUST_LOG="classgen::plugins::class::script=trace" classgen check -i model.cd
//! ```

use std::str::FromStr;

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

#[cfg(target_arch = "wasm32")]
use tracing_wasm::WASMLayerConfig;

pub const LEVEL_ENV: &str = "CLASSGEN_LOG_LEVEL";
pub const FORMAT_ENV: &str = "CLASSGEN_LOG_FORMAT";

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Compact single-line format
    #[default]
    Compact,
    /// Pretty multi-line format with colors
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl LogFormat {
    /// Get all valid format names
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Resolved logging settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Filter directive handed to `EnvFilter`
    pub level: String,
    pub format: LogFormat,
}

impl LogConfig {
    /// Resolve settings from explicit values, then the process environment
    pub fn resolve(level: Option<&str>, format: Option<&str>) -> Result<Self, String> {
        Self::resolve_with(level, format, |key| std::env::var(key).ok())
    }

    /// Resolve settings using `lookup` in place of the environment
    pub fn resolve_with<F>(level: Option<&str>, format: Option<&str>, lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let level = level
            .map(str::to_string)
            .or_else(|| lookup(LEVEL_ENV))
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());

        let format = match format.map(str::to_string).or_else(|| lookup(FORMAT_ENV)) {
            Some(name) => LogFormat::from_str(&name)?,
            None => LogFormat::default(),
        };

        Ok(Self { level, format })
    }

    pub fn is_off(&self) -> bool {
        self.level.eq_ignore_ascii_case("off")
    }
}

/// Initialize the tracing subscriber with the given log level and format
///
/// `level` falls back to `CLASSGEN_LOG_LEVEL`, then `RUST_LOG`, then `info`.
/// `format` falls back to `CLASSGEN_LOG_FORMAT`, then `compact`.
///
/// Returns an error for an unknown format or when a global subscriber is
/// already installed.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = LogConfig::resolve(level, format)?;

    #[cfg(target_arch = "wasm32")]
    {
        // The console layer has no level filter of its own
        let _ = config;
        tracing_wasm::set_as_global_default_with_config(WASMLayerConfig::default());
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let filter = if config.is_off() {
            EnvFilter::new("off")
        } else {
            EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"))
        };

        match config.format {
            LogFormat::Compact => {
                Registry::default()
                    .with(filter)
                    .with(
                        fmt::Layer::default()
                            .with_writer(std::io::stderr)
                            .with_target(false)
                            .with_level(true)
                            .with_file(false)
                            .with_line_number(false)
                            .with_span_events(FmtSpan::NONE),
                    )
                    .try_init()?;
            }
            LogFormat::Pretty => {
                Registry::default()
                    .with(filter)
                    .with(
                        fmt::Layer::default()
                            .with_writer(std::io::stderr)
                            .with_target(true)
                            .with_level(true)
                            .with_file(true)
                            .with_line_number(true)
                            .with_span_events(FmtSpan::ACTIVE)
                            .pretty(),
                    )
                    .try_init()?;
            }
            LogFormat::Json => {
                Registry::default()
                    .with(filter)
                    .with(
                        fmt::Layer::default()
                            .with_writer(std::io::stderr)
                            .with_target(true)
                            .with_level(true)
                            .with_file(true)
                            .with_line_number(true)
                            .with_span_events(FmtSpan::ACTIVE)
                            .json(),
                    )
                    .try_init()?;
            }
        }

        Ok(())
    }
}

/// Initialize logging with default settings (info level, compact format)
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(None, None)
}
