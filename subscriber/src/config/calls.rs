// 2022-2024 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use serde::Deserialize;
use serde_json::Value;

use crate::error::ConfigError;
use super::SubscriberConfig;
use super::ENTITY;

/// One configuration directive as it arrives from the control plane,
/// e.g. `{"method": "bixby", "args": ["host1", 10]}`.
#[derive(Clone, Debug, Deserialize)]
pub struct ConfigCall {
    pub method: String,

    #[serde(default)]
    pub args: Vec<Value>,
}

impl SubscriberConfig {
    /// Routes a dynamic call onto the matching setter. Method names are
    /// the wire names, the same ones error messages carry.
    pub fn apply(&mut self, call: &ConfigCall) -> Result<&mut Self, ConfigError> {
        let args = call.args.as_slice();
        match call.method.as_str() {
            "bixby" => self.bixby(args),
            "bixbyAllocator" => self.bixby_allocator(args),
            "streamNotifier" => self.stream_notifier(args),
            "streamUrl" => self.stream_url(args),
            "duration" => self.duration(args),
            "userId" => self.user_id(args),
            "authSecret" => self.auth_secret(args),
            "certCheck" => self.cert_check(args),
            "printFrameInfo" => self.print_frame_info(args),
            "sink" => self.sink(args),
            "ffmpegSink" => self.ffmpeg_sink(args),
            "audioSink" => self.audio_sink(args),
            "videoSink" => self.video_sink(args),
            "subscriptionErrorRetry" => self.subscription_error_retry(args),
            other => {
                Err(ConfigError::UnknownCall { entity: ENTITY, method: other.to_string() })
            }
        }
    }
}
