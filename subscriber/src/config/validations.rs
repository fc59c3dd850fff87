// 2022-2024 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use crate::error::ConfigError;
use super::SinkSelection;
use super::SubscriberConfig;
use super::ENTITY;

impl SubscriberConfig {
    /// Cross-field integrity gate run before the configuration may be
    /// handed to the engine. Invariants are checked in a fixed order and
    /// the first violation wins, so the error text is stable for a given
    /// configuration. No side effects.
    pub fn verify(&self) -> Result<(), ConfigError> {
        let result = self.check_integrity();
        match &result {
            Ok(()) => tracing::info!(target: "subscriber", "Configuration verified OK"),
            Err(err) => {
                tracing::warn!(target: "subscriber", "Configuration rejected: {err}")
            }
        }
        result
    }

    fn check_integrity(&self) -> Result<(), ConfigError> {
        match (&self.bixby, &self.allocator) {
            (None, None) => {
                return Err(inconsistent("Need either Bixby endpoint or Allocator endpoint"))
            }
            (Some(_), Some(_)) => {
                return Err(inconsistent(
                    "Bixby endpoint and Allocator endpoint are mutually exclusive",
                ))
            }
            _ => {}
        }
        match (&self.notifier, &self.stream_url) {
            (None, None) => {
                return Err(inconsistent("Need either Stream notifier endpoint or Stream URL"))
            }
            (Some(_), Some(_)) => {
                return Err(inconsistent(
                    "Stream notifier endpoint and Stream URL are mutually exclusive",
                ))
            }
            _ => {}
        }
        if self.duration.is_none() {
            return Err(inconsistent("Need duration"));
        }
        if self.user_id.is_none() {
            return Err(inconsistent("Need user id"));
        }
        match &self.sinks {
            SinkSelection::Unset => return Err(inconsistent("Need sink")),
            // only reachable through the legacy per-stream calls
            SinkSelection::Split { audio: None, .. } => {
                return Err(inconsistent("Need audio sink"))
            }
            SinkSelection::Split { video: None, .. } => {
                return Err(inconsistent("Need video sink"))
            }
            SinkSelection::Split { .. } | SinkSelection::Combined(_) => {}
        }
        Ok(())
    }
}

fn inconsistent(reason: &str) -> ConfigError {
    ConfigError::Inconsistent { entity: ENTITY, reason: reason.to_string() }
}
