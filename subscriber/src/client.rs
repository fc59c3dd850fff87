// 2022-2024 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use std::path::PathBuf;

use log_helper::LogLevel;
use log_helper::LogSettings;
use serde_json::Value;

use crate::checks::CallArgs;
use crate::error::CallSite;
use crate::error::ConfigError;
use crate::subscriber::Subscriber;

const ENTITY: &str = "Client";

/// Entry point of the subscription client: validates the process-wide
/// options and produces one fresh [`Subscriber`] per logical
/// subscription.
#[derive(Clone, Debug)]
pub struct Client {
    log: LogSettings,
}

impl Client {
    /// Constructs the client from dynamic arguments: log level, console
    /// flag, syslog flag and an optional path to a log-properties file.
    pub fn new(args: &[Value]) -> Result<Self, ConfigError> {
        let checked = CallArgs::new(CallSite::new(ENTITY, "new"), args);
        checked.expect_arity(3, 4)?;
        let raw_level = checked.integer(0)?;
        let level = LogLevel::try_from(raw_level)
            .map_err(|_| checked.bad_value(0, format!("Incorrect log level value {raw_level}")))?;
        let console = checked.boolean(1)?;
        let syslog = checked.boolean(2)?;
        let properties =
            if checked.len() == 4 { Some(PathBuf::from(checked.string(3)?)) } else { None };
        Ok(Self { log: LogSettings { level, console, syslog, properties } })
    }

    pub fn log_settings(&self) -> &LogSettings {
        &self.log
    }

    /// Installs the global tracing subscriber from the validated log
    /// settings. Call once per process.
    pub fn init_logging(&self) -> anyhow::Result<()> {
        log_helper::init_logging(&self.log)
    }

    /// A fresh subscriber bound to a new, empty configuration,
    /// independent of any other subscriber.
    pub fn create_subscriber(&self) -> Subscriber {
        tracing::debug!(target: "subscriber", "Creating subscriber");
        Subscriber::new()
    }
}
