// 2022-2024 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use thiserror::Error;

use crate::config::ConfigSnapshot;
use crate::config::SubscriberConfig;
use crate::error::ConfigError;

/// Boundary to the externally supplied streaming engine. The
/// [`ConfigSnapshot`] is the only artifact crossing it; opening the
/// subscription, emitting lifecycle notifications and honoring the retry
/// policy are the engine's business.
pub trait SubscriptionEngine {
    fn start(&mut self, config: &ConfigSnapshot) -> anyhow::Result<()>;

    fn stop(&mut self) -> anyhow::Result<()>;
}

/// Why a subscription could not be started.
#[derive(Debug, Error)]
pub enum StartError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("subscription engine failed to start: {0}")]
    Engine(anyhow::Error),
}

/// A subscription being collected: owns the configuration until it is
/// verified and handed to the engine.
#[derive(Clone, Debug, Default)]
pub struct Subscriber {
    config: SubscriberConfig,
}

impl Subscriber {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live access to the configuration, for chained setter calls.
    pub fn configuration(&mut self) -> &mut SubscriberConfig {
        &mut self.config
    }

    /// Verifies the configuration and hands its snapshot to `engine`.
    ///
    /// Consumes the subscriber: once the engine holds the snapshot,
    /// nothing can mutate the configuration behind its back. Callers that
    /// want to correct a configuration on failure should run
    /// `configuration().verify()` first.
    pub fn start<E: SubscriptionEngine>(
        self,
        mut engine: E,
    ) -> Result<ActiveSubscription<E>, StartError> {
        tracing::info!(target: "subscriber", "Starting");
        self.config.verify()?;
        let snapshot = self.config.to_object();
        engine.start(&snapshot).map_err(StartError::Engine)?;
        tracing::info!(target: "subscriber", "Started: {}", self.config);
        Ok(ActiveSubscription { engine, config: snapshot })
    }
}

/// A running subscription.
pub struct ActiveSubscription<E: SubscriptionEngine> {
    engine: E,
    config: ConfigSnapshot,
}

impl<E: SubscriptionEngine> ActiveSubscription<E> {
    /// The frozen configuration the engine was started with.
    pub fn config(&self) -> &ConfigSnapshot {
        &self.config
    }

    /// Tears the subscription down.
    pub fn stop(mut self) -> anyhow::Result<()> {
        tracing::info!(target: "subscriber", "Stopping");
        self.engine.stop()
    }
}
