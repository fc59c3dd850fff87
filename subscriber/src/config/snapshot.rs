// 2022-2024 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

//! Read-only export of a configuration.
//!
//! The snapshot is the only artifact crossing the boundary to the
//! subscription engine; its field names are the stable wire names. It is
//! an independent copy: later mutation of the configuration never changes
//! a previously exported snapshot.

use serde::Serialize;

use super::AllocatorEndpoint;
use super::Endpoint;
use super::FfmpegSink;
use super::NotifierEndpoint;
use super::RecordDuration;
use super::RetryPolicy;
use super::SinkSelection;
use super::StreamSink;
use super::SubscriberConfig;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ConfigSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bixby: Option<EndpointSnapshot>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocator: Option<AllocatorSnapshot>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifier: Option<NotifierSnapshot>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<RecordDuration>,

    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(rename = "streamURL", skip_serializing_if = "Option::is_none")]
    pub stream_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,

    #[serde(rename = "frameInfo", skip_serializing_if = "Option::is_none")]
    pub frame_info: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<StreamSinkSnapshot>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<StreamSinkSnapshot>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ffmpeg: Option<FfmpegSnapshot>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry: Option<RetrySnapshot>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EndpointSnapshot {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AllocatorSnapshot {
    pub host: String,
    pub port: u16,
    pub loc: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NotifierSnapshot {
    pub host: String,
    pub port: u16,
    pub tag: String,
    pub tls: bool,
    pub cert: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StreamSinkSnapshot {
    /// Lowercase sink tag: `none`, `file` or `ffmpeg`.
    pub sink: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FfmpegSnapshot {
    pub output: String,
    pub params: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RetrySnapshot {
    pub max: u32,

    #[serde(rename = "initDelay_ms")]
    pub init_delay_ms: u64,

    pub progression: f64,
}

impl From<&Endpoint> for EndpointSnapshot {
    fn from(endpoint: &Endpoint) -> Self {
        Self { host: endpoint.host.clone(), port: endpoint.port }
    }
}

impl From<&AllocatorEndpoint> for AllocatorSnapshot {
    fn from(allocator: &AllocatorEndpoint) -> Self {
        Self {
            host: allocator.endpoint.host.clone(),
            port: allocator.endpoint.port,
            loc: allocator.location.clone(),
        }
    }
}

impl From<&NotifierEndpoint> for NotifierSnapshot {
    fn from(notifier: &NotifierEndpoint) -> Self {
        Self {
            host: notifier.endpoint.host.clone(),
            port: notifier.endpoint.port,
            tag: notifier.tag.clone(),
            tls: notifier.tls,
            cert: notifier.cert_check,
        }
    }
}

impl From<&StreamSink> for StreamSinkSnapshot {
    fn from(sink: &StreamSink) -> Self {
        let mut snapshot =
            Self { sink: sink.kind().tag().to_string(), filename: None, param: None };
        match sink {
            StreamSink::None => {}
            StreamSink::File { filename } => snapshot.filename = Some(filename.clone()),
            StreamSink::FfmpegComponent { param } => snapshot.param = Some(param.clone()),
        }
        snapshot
    }
}

impl From<&FfmpegSink> for FfmpegSnapshot {
    fn from(sink: &FfmpegSink) -> Self {
        Self { output: sink.output.clone(), params: sink.params.clone() }
    }
}

impl From<&RetryPolicy> for RetrySnapshot {
    fn from(retry: &RetryPolicy) -> Self {
        Self {
            max: retry.max_retries,
            init_delay_ms: retry.init_delay_ms,
            progression: retry.progression,
        }
    }
}

impl SubscriberConfig {
    /// Plain, independent copy of every populated field.
    pub fn to_object(&self) -> ConfigSnapshot {
        let (audio, video, ffmpeg) = match &self.sinks {
            SinkSelection::Unset => (None, None, None),
            SinkSelection::Split { audio, video } => (
                audio.as_ref().map(StreamSinkSnapshot::from),
                video.as_ref().map(StreamSinkSnapshot::from),
                None,
            ),
            SinkSelection::Combined(sink) => (None, None, Some(FfmpegSnapshot::from(sink))),
        };
        ConfigSnapshot {
            bixby: self.bixby.as_ref().map(EndpointSnapshot::from),
            allocator: self.allocator.as_ref().map(AllocatorSnapshot::from),
            notifier: self.notifier.as_ref().map(NotifierSnapshot::from),
            duration_ms: self.duration,
            user_id: self.user_id.clone(),
            stream_url: self.stream_url.clone(),
            cert: self.cert_check,
            secret: self.auth_secret.clone(),
            frame_info: self.print_frame_info,
            audio,
            video,
            ffmpeg,
            retry: self.retry.as_ref().map(RetrySnapshot::from),
        }
    }
}
