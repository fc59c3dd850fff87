// 2022-2024 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

//! Media-subscription client configuration core.
//!
//! The streaming engine underneath is an opaque, externally supplied
//! component; the value of this crate is collecting a subscription's
//! configuration safely. Arguments arrive as untyped JSON values from the
//! embedding application or its control plane, every mutating call
//! validates them before touching any state, the aggregate is checked for
//! structural consistency by [`SubscriberConfig::verify`], and the engine
//! only ever sees the frozen [`ConfigSnapshot`].

mod checks;
mod client;
mod config;
mod error;
mod subscriber;

pub use client::Client;
pub use config::AllocatorEndpoint;
pub use config::AllocatorSnapshot;
pub use config::ConfigCall;
pub use config::ConfigSnapshot;
pub use config::Endpoint;
pub use config::EndpointSnapshot;
pub use config::FfmpegSink;
pub use config::FfmpegSnapshot;
pub use config::NotifierEndpoint;
pub use config::NotifierSnapshot;
pub use config::RecordDuration;
pub use config::RetryPolicy;
pub use config::RetrySnapshot;
pub use config::SinkKind;
pub use config::SinkSelection;
pub use config::StreamSink;
pub use config::StreamSinkSnapshot;
pub use config::SubscriberConfig;
pub use error::CallSite;
pub use error::ConfigError;
pub use log_helper::LogLevel;
pub use log_helper::LogSettings;
pub use subscriber::ActiveSubscription;
pub use subscriber::StartError;
pub use subscriber::Subscriber;
pub use subscriber::SubscriptionEngine;
