// 2022-2024 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

//! Subscription configuration: collected through chainable, eagerly
//! validated calls, verified as a whole, exported as a frozen snapshot.
//!
//! Every setter follows the same template: check arity, check or parse
//! each positional argument, and only then overwrite the corresponding
//! fields, returning `&mut Self` for chaining. A rejected call leaves the
//! configuration exactly as it was.

mod calls;
mod duration;
mod sink;
mod snapshot;
#[cfg(test)]
mod test;
mod validations;

use std::fmt;

pub use calls::ConfigCall;
pub use duration::RecordDuration;
use serde_json::Value;
pub use sink::FfmpegSink;
pub use sink::SinkKind;
pub use sink::SinkSelection;
pub use sink::StreamSink;
pub use snapshot::AllocatorSnapshot;
pub use snapshot::ConfigSnapshot;
pub use snapshot::EndpointSnapshot;
pub use snapshot::FfmpegSnapshot;
pub use snapshot::NotifierSnapshot;
pub use snapshot::RetrySnapshot;
pub use snapshot::StreamSinkSnapshot;

use crate::checks::CallArgs;
use crate::error::CallSite;
use crate::error::ConfigError;

/// Entity name prefixing every error raised here. Method names in errors
/// are the wire names of the control-plane contract.
const ENTITY: &str = "SubscriberConfig";

/// Host/port pair of a service taking part in stream discovery or
/// delivery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Allocator endpoint: dynamically resolves a discovery endpoint for a
/// location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllocatorEndpoint {
    pub endpoint: Endpoint,
    pub location: String,
}

/// Stream-ready notifier endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotifierEndpoint {
    pub endpoint: Endpoint,
    pub tag: String,
    pub tls: bool,
    pub cert_check: bool,
}

/// Re-subscription backoff applied after a subscription error. The delay
/// is multiplied by `progression` after each attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub init_delay_ms: u64,
    pub progression: f64,
}

/// The mutable-until-verified configuration aggregate. Fields may be set
/// and overwritten freely (last write wins); cross-field invariants are
/// only enforced by [`SubscriberConfig::verify`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubscriberConfig {
    bixby: Option<Endpoint>,
    allocator: Option<AllocatorEndpoint>,
    notifier: Option<NotifierEndpoint>,
    stream_url: Option<String>,
    duration: Option<RecordDuration>,
    user_id: Option<String>,
    auth_secret: Option<String>,
    cert_check: Option<bool>,
    print_frame_info: Option<bool>,
    sinks: SinkSelection,
    retry: Option<RetryPolicy>,
}

impl SubscriberConfig {
    pub fn new() -> Self {
        Self::default()
    }

    fn checked<'a>(&self, method: &'static str, args: &'a [Value]) -> CallArgs<'a> {
        CallArgs::new(CallSite::new(ENTITY, method), args)
    }

    /// Sets the discovery endpoint: `(host, port)`. Mutually exclusive
    /// with the allocator endpoint; the conflict is reported by `verify`.
    pub fn bixby(&mut self, args: &[Value]) -> Result<&mut Self, ConfigError> {
        let checked = self.checked("bixby", args);
        checked.expect_arity(2, 2)?;
        let host = checked.non_empty_string(0, "hostname")?;
        let port = checked.port(1)?;
        self.bixby = Some(Endpoint { host: host.to_string(), port });
        Ok(self)
    }

    /// Sets the allocator endpoint: `(host, port, location)`.
    pub fn bixby_allocator(&mut self, args: &[Value]) -> Result<&mut Self, ConfigError> {
        let checked = self.checked("bixbyAllocator", args);
        checked.expect_arity(3, 3)?;
        let host = checked.non_empty_string(0, "hostname")?;
        let port = checked.port(1)?;
        let location = checked.non_empty_string(2, "location")?;
        self.allocator = Some(AllocatorEndpoint {
            endpoint: Endpoint { host: host.to_string(), port },
            location: location.to_string(),
        });
        Ok(self)
    }

    /// Sets the stream notifier: `(host, port, tag, tls, cert_check)`.
    /// Mutually exclusive with the stream URL.
    pub fn stream_notifier(&mut self, args: &[Value]) -> Result<&mut Self, ConfigError> {
        let checked = self.checked("streamNotifier", args);
        checked.expect_arity(5, 5)?;
        let host = checked.non_empty_string(0, "hostname")?;
        let port = checked.port(1)?;
        let tag = checked.non_empty_string(2, "tag")?;
        let tls = checked.boolean(3)?;
        let cert_check = checked.boolean(4)?;
        self.notifier = Some(NotifierEndpoint {
            endpoint: Endpoint { host: host.to_string(), port },
            tag: tag.to_string(),
            tls,
            cert_check,
        });
        Ok(self)
    }

    /// Sets the direct stream URL.
    pub fn stream_url(&mut self, args: &[Value]) -> Result<&mut Self, ConfigError> {
        let checked = self.checked("streamUrl", args);
        checked.expect_arity(1, 1)?;
        let url = checked.non_empty_string(0, "stream URL")?;
        self.stream_url = Some(url.to_string());
        Ok(self)
    }

    /// Sets the subscription duration from a literal: `infinite` or
    /// `HH:MM:SS`.
    pub fn duration(&mut self, args: &[Value]) -> Result<&mut Self, ConfigError> {
        let checked = self.checked("duration", args);
        checked.expect_arity(1, 1)?;
        let text = checked.string(0)?;
        let parsed = duration::parse(text).map_err(|err| match err {
            duration::ParseError::Malformed => checked.wrong_type(0),
            duration::ParseError::NotPositive => {
                checked.bad_value(0, "duration must be longer than zero")
            }
        })?;
        self.duration = Some(parsed);
        Ok(self)
    }

    /// Sets the subscribing user id.
    pub fn user_id(&mut self, args: &[Value]) -> Result<&mut Self, ConfigError> {
        let checked = self.checked("userId", args);
        checked.expect_arity(1, 1)?;
        let user_id = checked.non_empty_string(0, "user id")?;
        self.user_id = Some(user_id.to_string());
        Ok(self)
    }

    /// Sets the auth secret. No auth token is sent when unset.
    pub fn auth_secret(&mut self, args: &[Value]) -> Result<&mut Self, ConfigError> {
        let checked = self.checked("authSecret", args);
        checked.expect_arity(1, 1)?;
        let secret = checked.string(0)?;
        self.auth_secret = Some(secret.to_string());
        Ok(self)
    }

    /// Enables or disables certificate checking for the subscription
    /// itself.
    pub fn cert_check(&mut self, args: &[Value]) -> Result<&mut Self, ConfigError> {
        let checked = self.checked("certCheck", args);
        checked.expect_arity(1, 1)?;
        self.cert_check = Some(checked.boolean(0)?);
        Ok(self)
    }

    /// Enables per-frame debug output.
    pub fn print_frame_info(&mut self, args: &[Value]) -> Result<&mut Self, ConfigError> {
        let checked = self.checked("printFrameInfo", args);
        checked.expect_arity(1, 1)?;
        self.print_frame_info = Some(checked.boolean(0)?);
        Ok(self)
    }

    /// Sets both per-stream sinks from `(audio_descriptor,
    /// video_descriptor)`, each `{sink, filename?}`. Selects the split
    /// family; a previously configured combined sink is discarded.
    pub fn sink(&mut self, args: &[Value]) -> Result<&mut Self, ConfigError> {
        let checked = self.checked("sink", args);
        checked.expect_arity(2, 2)?;
        let audio = sink::parse_descriptor(&checked, 0, "audio")?;
        let video = sink::parse_descriptor(&checked, 1, "video")?;
        self.sinks.select_split(audio, video);
        Ok(self)
    }

    /// Sets the combined ffmpeg sink: `(output, params)`. Selects the
    /// combined family; previously configured per-stream sinks are
    /// discarded.
    pub fn ffmpeg_sink(&mut self, args: &[Value]) -> Result<&mut Self, ConfigError> {
        let checked = self.checked("ffmpegSink", args);
        checked.expect_arity(2, 2)?;
        let output = checked.non_empty_string(0, "output")?;
        let params = checked.string(1)?;
        self.sinks
            .select_combined(FfmpegSink { output: output.to_string(), params: params.to_string() });
        Ok(self)
    }

    /// Legacy per-stream audio sink call: `(kind, param?)`.
    pub fn audio_sink(&mut self, args: &[Value]) -> Result<&mut Self, ConfigError> {
        let sink = self.stream_sink("audioSink", "audio", args)?;
        self.sinks.select_audio(sink);
        Ok(self)
    }

    /// Legacy per-stream video sink call: `(kind, param?)`.
    pub fn video_sink(&mut self, args: &[Value]) -> Result<&mut Self, ConfigError> {
        let sink = self.stream_sink("videoSink", "video", args)?;
        self.sinks.select_video(sink);
        Ok(self)
    }

    // Shared body of the legacy calls. The null sink takes no param; file
    // and ffmpeg-component sinks take exactly one, so the per-kind arity
    // is re-checked once the kind is known.
    fn stream_sink(
        &self,
        method: &'static str,
        stream: &str,
        args: &[Value],
    ) -> Result<StreamSink, ConfigError> {
        let checked = self.checked(method, args);
        checked.expect_arity(1, 2)?;
        let kind = SinkKind::from_value(checked.value(0)).ok_or_else(|| {
            checked.bad_value(
                0,
                format!("Incorrect {stream} sink type {}", crate::checks::inspect(checked.value(0))),
            )
        })?;
        match kind {
            SinkKind::None => {
                checked.expect_arity(1, 1)?;
                Ok(StreamSink::None)
            }
            SinkKind::File => {
                checked.expect_arity(2, 2)?;
                let filename = checked.non_empty_string(1, "filename")?;
                Ok(StreamSink::File { filename: filename.to_string() })
            }
            SinkKind::FfmpegComponent => {
                checked.expect_arity(2, 2)?;
                let param = checked.non_empty_string(1, "param")?;
                Ok(StreamSink::FfmpegComponent { param: param.to_string() })
            }
        }
    }

    /// Sets the re-subscription policy: `(max_retries, init_delay_ms,
    /// progression)`. Zero retries disables re-subscription.
    pub fn subscription_error_retry(&mut self, args: &[Value]) -> Result<&mut Self, ConfigError> {
        let checked = self.checked("subscriptionErrorRetry", args);
        checked.expect_arity(3, 3)?;
        let max_retries =
            u32::try_from(checked.unsigned(0)?).map_err(|_| checked.wrong_type(0))?;
        let init_delay_ms = checked.unsigned(1)?;
        let progression = checked.number(2)?;
        if progression < 1.0 {
            return Err(checked.bad_value(2, "retry delay progression must be 1.0 or bigger"));
        }
        self.retry = Some(RetryPolicy { max_retries, init_delay_ms, progression });
        Ok(self)
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// One-line diagnostic dump of the accumulated state, usable before the
/// configuration verifies.
impl fmt::Display for SubscriberConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.bixby {
            Some(endpoint) => write!(f, "Bixby:{{{endpoint}}} ")?,
            None => write!(f, "Bixby:{{}} ")?,
        }
        match &self.allocator {
            Some(allocator) => {
                write!(f, "Allocator:{{{} loc:{}}} ", allocator.endpoint, allocator.location)?
            }
            None => write!(f, "Allocator:{{}} ")?,
        }
        match &self.notifier {
            Some(notifier) => write!(
                f,
                "Notifier:{{{} tag:{} TLS:{} Cert:{}}} ",
                notifier.endpoint,
                notifier.tag,
                yes_no(notifier.tls),
                yes_no(notifier.cert_check),
            )?,
            None => write!(f, "Notifier:{{}} ")?,
        }
        match &self.duration {
            Some(duration) => write!(f, "Duration:{duration} ")?,
            None => write!(f, "Duration:- ")?,
        }
        write!(f, "UserId:{} ", self.user_id.as_deref().unwrap_or("-"))?;
        write!(f, "StreamURL:{} ", self.stream_url.as_deref().unwrap_or("-"))?;
        write!(f, "Cert:{} ", self.cert_check.map(yes_no).unwrap_or("-"))?;
        // the secret itself stays out of logs
        write!(f, "Secret:{} ", if self.auth_secret.is_some() { "***" } else { "-" })?;
        write!(f, "FrameInfo:{}", self.print_frame_info.map(yes_no).unwrap_or("-"))?;
        match &self.sinks {
            SinkSelection::Unset => write!(f, " Sink:-")?,
            SinkSelection::Split { audio, video } => {
                let audio = audio.as_ref().map(ToString::to_string);
                let video = video.as_ref().map(ToString::to_string);
                write!(
                    f,
                    " Audio:{{{}}} Video:{{{}}}",
                    audio.as_deref().unwrap_or("-"),
                    video.as_deref().unwrap_or("-"),
                )?
            }
            SinkSelection::Combined(ffmpeg) => {
                write!(f, " FFmpeg:{{out:{} params:{}}}", ffmpeg.output, ffmpeg.params)?
            }
        }
        if let Some(retry) = &self.retry {
            write!(
                f,
                " Retry:{{max:{} initDelay:{}ms progression:{}}}",
                retry.max_retries, retry.init_delay_ms, retry.progression,
            )?;
        }
        Ok(())
    }
}
