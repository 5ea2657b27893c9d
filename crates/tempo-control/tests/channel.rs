//! End-to-end control channel tests
//!
//! Each test runs a real server loop on its own endpoint and drives it the
//! way an external controller would.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::UnixStream;

use tempo_clock::ClockRegistry;
use tempo_control::{encode_command, ControlChannel, ControlChannelConfig, SpeedController};
use tempo_core::{ManualTimeSource, Speed};

fn endpoint(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("tempo-test-{}-{}.sock", std::process::id(), tag))
}

async fn start_channel(tag: &str) -> (Arc<ClockRegistry>, PathBuf) {
    let source = Arc::new(ManualTimeSource::new());
    let registry = Arc::new(ClockRegistry::new(source).unwrap());

    let config = ControlChannelConfig {
        endpoint: endpoint(tag),
        ..Default::default()
    };
    let path = config.endpoint.clone();
    let channel = ControlChannel::with_config(Arc::clone(&registry), config);
    tokio::spawn(channel.run());

    wait_for(|| path.exists()).await;
    (registry, path)
}

async fn wait_for(mut condition: impl FnMut() -> bool) {
    for _ in 0..400 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached within 2s");
}

async fn wait_for_speed(registry: &ClockRegistry, expected: f64) {
    wait_for(|| registry.speed() == expected).await;
}

#[tokio::test]
async fn controller_sets_speed() {
    let (registry, path) = start_channel("set-speed").await;

    let mut controller = SpeedController::connect(&path).await.unwrap();
    controller
        .set_speed(Speed::new(4.0).unwrap())
        .await
        .unwrap();

    wait_for_speed(&registry, 4.0).await;
}

#[tokio::test]
async fn burst_applies_last_value() {
    let (registry, path) = start_channel("burst").await;

    // One write carrying three commands; the batch must collapse to 5.0.
    let mut stream = UnixStream::connect(&path).await.unwrap();
    let mut batch = Vec::new();
    for factor in [2.0f32, 3.0, 5.0] {
        batch.extend_from_slice(&encode_command(factor));
    }
    stream.write_all(&batch).await.unwrap();

    wait_for_speed(&registry, 5.0).await;
}

#[tokio::test]
async fn negative_command_is_ignored_and_channel_survives() {
    let (registry, path) = start_channel("negative").await;

    let mut stream = UnixStream::connect(&path).await.unwrap();
    stream
        .write_all(&encode_command(3.0))
        .await
        .unwrap();
    wait_for_speed(&registry, 3.0).await;

    stream
        .write_all(&encode_command(-1.0))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(registry.speed(), 3.0);

    // The connection is still being served after the rejected command.
    stream
        .write_all(&encode_command(2.0))
        .await
        .unwrap();
    wait_for_speed(&registry, 2.0).await;
}

#[tokio::test]
async fn channel_accepts_a_new_controller_after_disconnect() {
    let (registry, path) = start_channel("reconnect").await;

    let mut first = SpeedController::connect(&path).await.unwrap();
    first.set_speed(Speed::new(2.0).unwrap()).await.unwrap();
    wait_for_speed(&registry, 2.0).await;
    drop(first);

    // Give the server a moment to fall back to the accept state, then make
    // sure a fresh controller is served.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let mut second = SpeedController::connect(&path).await.unwrap();
    second.set_speed(Speed::new(0.5).unwrap()).await.unwrap();
    wait_for_speed(&registry, 0.5).await;
}

#[tokio::test]
async fn frozen_engine_resumes_on_command() {
    let source = Arc::new(ManualTimeSource::new());
    let registry = Arc::new(ClockRegistry::new(source.clone()).unwrap());

    let config = ControlChannelConfig {
        endpoint: endpoint("freeze"),
        ..Default::default()
    };
    let path = config.endpoint.clone();
    tokio::spawn(ControlChannel::with_config(Arc::clone(&registry), config).run());
    wait_for(|| path.exists()).await;

    let mut controller = SpeedController::connect(&path).await.unwrap();
    controller.set_speed(Speed::FROZEN).await.unwrap();
    wait_for_speed(&registry, 0.0).await;

    let frozen = registry.read_ticks_64();
    source.advance(Duration::from_secs(60));
    assert_eq!(registry.read_ticks_64(), frozen);

    controller.set_speed(Speed::REAL_TIME).await.unwrap();
    wait_for_speed(&registry, 1.0).await;
    source.advance(Duration::from_millis(250));
    assert_eq!(registry.read_ticks_64(), frozen + 250);
}
