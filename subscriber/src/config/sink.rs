// 2022-2024 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

//! Sink model: where decoded audio and video go.
//!
//! Two families exist. The split family configures the audio and video
//! streams independently (null sink, raw file, per-stream ffmpeg
//! component); the combined family drives both streams through one
//! external ffmpeg pipeline. The families are mutually exclusive, which
//! [`SinkSelection`] makes unrepresentable instead of checkable.

use serde_json::Value;

use crate::checks::inspect;
use crate::checks::CallArgs;
use crate::error::ConfigError;

/// Destination kind of a single decoded stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SinkKind {
    None,
    File,
    FfmpegComponent,
}

impl SinkKind {
    /// Accepts the canonical string tag or the numeric discriminant used
    /// by older control planes.
    pub(crate) fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(tag) => match tag.as_str() {
                "none" => Some(Self::None),
                "file" => Some(Self::File),
                "ffmpeg" => Some(Self::FfmpegComponent),
                _ => None,
            },
            Value::Number(number) => match number.as_i64() {
                Some(0) => Some(Self::None),
                Some(1) => Some(Self::File),
                Some(2) => Some(Self::FfmpegComponent),
                _ => None,
            },
            _ => None,
        }
    }

    /// Lowercase tag used in snapshots.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::File => "file",
            Self::FfmpegComponent => "ffmpeg",
        }
    }
}

/// A configured per-stream sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StreamSink {
    None,
    File { filename: String },
    FfmpegComponent { param: String },
}

impl StreamSink {
    pub fn kind(&self) -> SinkKind {
        match self {
            Self::None => SinkKind::None,
            Self::File { .. } => SinkKind::File,
            Self::FfmpegComponent { .. } => SinkKind::FfmpegComponent,
        }
    }
}

impl std::fmt::Display for StreamSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::File { filename } => write!(f, "file:{filename}"),
            Self::FfmpegComponent { param } => write!(f, "ffmpeg:{param}"),
        }
    }
}

/// Single external-transcoder sink replacing the per-stream sinks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FfmpegSink {
    pub output: String,
    pub params: String,
}

/// Which sink family is currently selected. The last configuring call
/// decides; switching families discards the other family's state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SinkSelection {
    #[default]
    Unset,
    Split { audio: Option<StreamSink>, video: Option<StreamSink> },
    Combined(FfmpegSink),
}

impl SinkSelection {
    pub(crate) fn select_split(&mut self, audio: StreamSink, video: StreamSink) {
        *self = Self::Split { audio: Some(audio), video: Some(video) };
    }

    pub(crate) fn select_combined(&mut self, sink: FfmpegSink) {
        *self = Self::Combined(sink);
    }

    pub(crate) fn select_audio(&mut self, sink: StreamSink) {
        match self {
            Self::Split { audio, .. } => *audio = Some(sink),
            _ => *self = Self::Split { audio: Some(sink), video: None },
        }
    }

    pub(crate) fn select_video(&mut self, sink: StreamSink) {
        match self {
            Self::Split { video, .. } => *video = Some(sink),
            _ => *self = Self::Split { audio: None, video: Some(sink) },
        }
    }
}

/// Parses one `{sink, filename?}` descriptor of the combined `sink` call.
/// `stream` is `audio` or `video`; failures are reported against the
/// offending descriptor. Only the null and file kinds are accepted here;
/// per-stream ffmpeg components belong to the legacy calls.
pub(crate) fn parse_descriptor(
    args: &CallArgs<'_>,
    position: usize,
    stream: &str,
) -> Result<StreamSink, ConfigError> {
    let descriptor = args.object(position)?;
    let kind_value = descriptor
        .get("sink")
        .ok_or_else(|| args.bad_value(position, format!("Need {stream} sink type")))?;
    match SinkKind::from_value(kind_value) {
        Some(SinkKind::None) => Ok(StreamSink::None),
        Some(SinkKind::File) => {
            let filename = descriptor
                .get("filename")
                .ok_or_else(|| args.bad_value(position, format!("Need {stream} sink filename")))?;
            match filename {
                Value::String(name) if !name.is_empty() => {
                    Ok(StreamSink::File { filename: name.clone() })
                }
                Value::String(_) => {
                    Err(args.bad_value(position, format!("Need {stream} sink filename")))
                }
                other => Err(args.bad_value(
                    position,
                    format!("Wrong {stream} sink filename {}", inspect(other)),
                )),
            }
        }
        Some(SinkKind::FfmpegComponent) | None => Err(args
            .bad_value(position, format!("Incorrect {stream} sink type {}", inspect(kind_value)))),
    }
}
