// 2022-2024 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

//! Logging bootstrap for the subscription client.
//!
//! The embedding application hands over a log level, a console flag, a
//! syslog flag and an optional properties file; this crate turns them into
//! a `tracing` subscriber. The filter is resolved in order: `RUST_LOG`
//! environment variable, properties file, default derived from the level.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;

/// Log severity selector, ordered from quietest to noisiest.
///
/// The numeric values are part of the control-plane contract and must not
/// be reordered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Fatal = 0,
    Error = 1,
    Warning = 2,
    Info = 3,
    Debug = 4,
}

/// A numeric level value outside the enumeration.
#[derive(Debug, thiserror::Error)]
#[error("unknown log level value {0}")]
pub struct UnknownLogLevel(pub i64);

impl TryFrom<i64> for LogLevel {
    type Error = UnknownLogLevel;

    fn try_from(value: i64) -> Result<Self, UnknownLogLevel> {
        match value {
            0 => Ok(LogLevel::Fatal),
            1 => Ok(LogLevel::Error),
            2 => Ok(LogLevel::Warning),
            3 => Ok(LogLevel::Info),
            4 => Ok(LogLevel::Debug),
            other => Err(UnknownLogLevel(other)),
        }
    }
}

impl LogLevel {
    /// Default filter directive for the level. `tracing` has no severity
    /// above error, so `Fatal` collapses into `error`.
    pub fn directive(&self) -> &'static str {
        match self {
            LogLevel::Fatal | LogLevel::Error => "error",
            LogLevel::Warning => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

/// Validated logging options of the embedding application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LogLevel,

    /// Mirror log records to stderr.
    pub console: bool,

    /// Forward log records to syslog. The transport belongs to the
    /// embedding application; the flag is validated and carried here.
    pub syslog: bool,

    /// Optional file with filter directives overriding `level`.
    pub properties: Option<PathBuf>,
}

/// Installs the global tracing subscriber. Call once per process; a second
/// call fails.
pub fn init_logging(settings: &LogSettings) -> anyhow::Result<()> {
    let filter = build_filter(settings)?;
    let console_layer = settings.console.then(|| {
        tracing_subscriber::fmt::layer()
            .compact()
            .with_thread_ids(true)
            .with_ansi(false)
            .with_writer(std::io::stderr)
    });
    tracing_subscriber::registry().with(console_layer.map(|layer| layer.with_filter(filter))).try_init()?;
    tracing::debug!(target: "log_helper", "Logging initialized: {settings:?}");
    Ok(())
}

fn build_filter(settings: &LogSettings) -> anyhow::Result<EnvFilter> {
    if std::env::var(EnvFilter::DEFAULT_ENV).is_ok() {
        return Ok(EnvFilter::from_default_env());
    }
    if let Some(path) = &settings.properties {
        return Ok(EnvFilter::new(read_directives(path)?));
    }
    Ok(EnvFilter::new(settings.level.directive()))
}

/// Reads filter directives from a properties file: one directive per line,
/// blank lines and `#` comments skipped.
fn read_directives(path: &Path) -> anyhow::Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read log properties {}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_levels_are_ordered() {
        assert!(LogLevel::Fatal < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Debug);
    }

    #[test]
    fn level_values_round_trip() {
        for level in
            [LogLevel::Fatal, LogLevel::Error, LogLevel::Warning, LogLevel::Info, LogLevel::Debug]
        {
            assert_eq!(LogLevel::try_from(level as i64).unwrap(), level);
        }
    }

    #[test]
    fn rejects_unknown_level_values() {
        let err = LogLevel::try_from(100).unwrap_err();
        assert!(err.to_string().contains("100"), "{err}");
    }

    #[test]
    fn maps_levels_to_directives() {
        assert_eq!(LogLevel::Fatal.directive(), "error");
        assert_eq!(LogLevel::Error.directive(), "error");
        assert_eq!(LogLevel::Warning.directive(), "warn");
        assert_eq!(LogLevel::Info.directive(), "info");
        assert_eq!(LogLevel::Debug.directive(), "debug");
    }

    #[test]
    fn reads_directives_skipping_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.props");
        fs::write(&path, "subscriber=debug\n# comment\n\nlog_helper=info\n").unwrap();
        assert_eq!(read_directives(&path).unwrap(), "subscriber=debug,log_helper=info");
    }

    #[test]
    fn missing_properties_file_is_reported() {
        let err = read_directives(Path::new("/nonexistent/log.props")).unwrap_err();
        assert!(err.to_string().contains("log.props"), "{err}");
    }
}
