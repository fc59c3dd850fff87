// 2022-2024 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

//! Hand-off boundary: a subscription only starts on a verified
//! configuration, and the engine sees exactly the exported snapshot.

use std::sync::Arc;
use std::sync::Mutex;

use serde_json::json;
use subscriber::Client;
use subscriber::ConfigSnapshot;
use subscriber::LogLevel;
use subscriber::StartError;
use subscriber::Subscriber;
use subscriber::SubscriptionEngine;

fn subscriber() -> Subscriber {
    Client::new(&[json!(LogLevel::Fatal as i64), json!(true), json!(false)])
        .unwrap()
        .create_subscriber()
}

fn configured_subscriber() -> Subscriber {
    let mut subscriber = subscriber();
    subscriber
        .configuration()
        .bixby(&[json!("host1"), json!(10)])
        .unwrap()
        .stream_url(&[json!("surl2")])
        .unwrap()
        .user_id(&[json!("uuu")])
        .unwrap()
        .duration(&[json!("00:00:10")])
        .unwrap()
        .sink(&[json!({ "sink": "none" }), json!({ "sink": "none" })])
        .unwrap();
    subscriber
}

/// Records what crosses the engine boundary.
#[derive(Clone, Default)]
struct RecordingEngine {
    started_with: Arc<Mutex<Option<ConfigSnapshot>>>,
    stopped: Arc<Mutex<bool>>,
}

impl SubscriptionEngine for RecordingEngine {
    fn start(&mut self, config: &ConfigSnapshot) -> anyhow::Result<()> {
        *self.started_with.lock().unwrap() = Some(config.clone());
        Ok(())
    }

    fn stop(&mut self) -> anyhow::Result<()> {
        *self.stopped.lock().unwrap() = true;
        Ok(())
    }
}

/// Fails the test if the subscription core ever reaches it.
struct UnreachableEngine;

impl SubscriptionEngine for UnreachableEngine {
    fn start(&mut self, _config: &ConfigSnapshot) -> anyhow::Result<()> {
        panic!("engine must not be started on an unverified configuration");
    }

    fn stop(&mut self) -> anyhow::Result<()> {
        panic!("engine must not be stopped before starting");
    }
}

struct FailingEngine;

impl SubscriptionEngine for FailingEngine {
    fn start(&mut self, _config: &ConfigSnapshot) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("no route to stream"))
    }

    fn stop(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[test]
fn start_rejects_an_incomplete_configuration() {
    let err = subscriber().start(UnreachableEngine).err().unwrap();
    match err {
        StartError::Config(config_err) => {
            let text = config_err.to_string();
            assert!(text.contains("Need either Bixby endpoint or Allocator endpoint"), "{text}");
        }
        other => panic!("expected a configuration error, got {other}"),
    }
}

#[test]
fn start_hands_the_snapshot_to_the_engine() {
    let engine = RecordingEngine::default();
    let started_with = engine.started_with.clone();
    let stopped = engine.stopped.clone();

    let active = configured_subscriber().start(engine).unwrap();
    let seen = started_with.lock().unwrap().clone().unwrap();
    assert_eq!(seen.user_id.as_deref(), Some("uuu"));
    assert_eq!(seen.stream_url.as_deref(), Some("surl2"));
    assert_eq!(&seen, active.config());

    active.stop().unwrap();
    assert!(*stopped.lock().unwrap());
}

#[test]
fn start_surfaces_engine_failures() {
    let err = configured_subscriber().start(FailingEngine).err().unwrap();
    match err {
        StartError::Engine(engine_err) => {
            assert!(engine_err.to_string().contains("no route to stream"), "{engine_err}")
        }
        other => panic!("expected an engine error, got {other}"),
    }
    let err_text =
        configured_subscriber().start(FailingEngine).err().unwrap().to_string();
    assert!(err_text.contains("subscription engine failed to start"), "{err_text}");
}
