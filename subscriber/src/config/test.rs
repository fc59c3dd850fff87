// 2022-2024 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::config::ConfigCall;
    use crate::config::RecordDuration;
    use crate::config::SubscriberConfig;

    #[test]
    fn empty_config_snapshots_to_an_empty_object() -> anyhow::Result<()> {
        let config = SubscriberConfig::new();
        let snapshot = config.to_object();
        assert_eq!(serde_json::to_value(&snapshot)?, json!({}));
        Ok(())
    }

    #[test]
    fn snapshot_serializes_with_wire_names() -> anyhow::Result<()> {
        let mut config = SubscriberConfig::new();
        config
            .bixby(&[json!("host-abc"), json!(987)])?
            .stream_url(&[json!("rtmp://stream/1")])?
            .user_id(&[json!("user123")])?
            .auth_secret(&[json!("sec123")])?
            .cert_check(&[json!(false)])?
            .print_frame_info(&[json!(true)])?
            .duration(&[json!("00:01:23")])?
            .sink(
                &[json!({ "sink": "file", "filename": "a.raw" }), json!({ "sink": "none" })],
            )?
            .subscription_error_retry(&[json!(3), json!(200), json!(1.5)])?;
        assert_eq!(
            serde_json::to_value(config.to_object())?,
            json!({
                "bixby": { "host": "host-abc", "port": 987 },
                "duration_ms": 83_000,
                "userId": "user123",
                "streamURL": "rtmp://stream/1",
                "cert": false,
                "secret": "sec123",
                "frameInfo": true,
                "audio": { "sink": "file", "filename": "a.raw" },
                "video": { "sink": "none" },
                "retry": { "max": 3, "initDelay_ms": 200, "progression": 1.5 },
            })
        );
        Ok(())
    }

    #[test]
    fn allocator_and_notifier_snapshot_groups() -> anyhow::Result<()> {
        let mut config = SubscriberConfig::new();
        config
            .bixby_allocator(&[json!("host-abc"), json!(987), json!("lll")])?
            .stream_notifier(&[json!("host-n"), json!(443), json!("ttt"), json!(true), json!(false)])?;
        let snapshot = config.to_object();
        let allocator = snapshot.allocator.unwrap();
        assert_eq!(allocator.host, "host-abc");
        assert_eq!(allocator.port, 987);
        assert_eq!(allocator.loc, "lll");
        let notifier = snapshot.notifier.unwrap();
        assert_eq!(notifier.host, "host-n");
        assert_eq!(notifier.port, 443);
        assert_eq!(notifier.tag, "ttt");
        assert!(notifier.tls);
        assert!(!notifier.cert);
        Ok(())
    }

    #[test]
    fn ffmpeg_snapshot_group() -> anyhow::Result<()> {
        let mut config = SubscriberConfig::new();
        config.ffmpeg_sink(&[json!("some/where/abc.mp4"), json!("-param1=1 -param2=2")])?;
        assert_eq!(
            serde_json::to_value(config.to_object())?,
            json!({ "ffmpeg": { "output": "some/where/abc.mp4", "params": "-param1=1 -param2=2" } })
        );
        Ok(())
    }

    #[test]
    fn apply_routes_wire_method_names() -> anyhow::Result<()> {
        let directives: Vec<ConfigCall> = serde_json::from_value(json!([
            { "method": "bixby", "args": ["host1", 10] },
            { "method": "streamUrl", "args": ["surl2"] },
            { "method": "userId", "args": ["uuu"] },
            { "method": "duration", "args": ["infinite"] },
            { "method": "sink", "args": [{ "sink": "none" }, { "sink": "none" }] },
        ]))?;
        let mut config = SubscriberConfig::new();
        for directive in &directives {
            config.apply(directive)?;
        }
        config.verify()?;
        let snapshot = config.to_object();
        assert_eq!(snapshot.user_id.as_deref(), Some("uuu"));
        assert_eq!(snapshot.duration_ms, Some(RecordDuration::Unbounded));
        Ok(())
    }

    #[test]
    fn apply_rejects_unknown_methods() {
        let mut config = SubscriberConfig::new();
        let call = ConfigCall { method: "frobnicate".to_string(), args: vec![] };
        let err = config.apply(&call).unwrap_err();
        assert!(err.to_string().contains("unknown configuration call 'frobnicate'"), "{err}");
    }

    #[test]
    fn apply_surfaces_setter_errors_verbatim() {
        let mut config = SubscriberConfig::new();
        let call = ConfigCall { method: "bixby".to_string(), args: vec![json!("host")] };
        let err = config.apply(&call).unwrap_err();
        assert_eq!(err.to_string(), "SubscriberConfig bixby: Needs 2 args but given 1");
    }

    #[test]
    fn dump_shows_the_accumulated_state_without_the_secret() -> anyhow::Result<()> {
        let mut config = SubscriberConfig::new();
        config
            .bixby(&[json!("host1"), json!(10)])?
            .user_id(&[json!("uuu")])?
            .auth_secret(&[json!("hush")])?
            .duration(&[json!("00:00:10")])?;
        let dump = config.to_string();
        assert!(dump.contains("Bixby:{host1:10}"), "{dump}");
        assert!(dump.contains("UserId:uuu"), "{dump}");
        assert!(dump.contains("Duration:10000ms"), "{dump}");
        assert!(dump.contains("Secret:***"), "{dump}");
        assert!(!dump.contains("hush"), "{dump}");
        Ok(())
    }

    #[test]
    fn rejected_calls_leave_prior_state_untouched() -> anyhow::Result<()> {
        let mut config = SubscriberConfig::new();
        config.bixby(&[json!("host1"), json!(10)])?;
        let before = config.clone();
        assert!(config.bixby(&[json!("host2"), json!(0)]).is_err());
        assert_eq!(config, before);
        Ok(())
    }
}
