//! End-to-end startup scenarios.
//!
//! These tests load the add-on against the mock host and mock endpoint and
//! check what the host observes once both startup threads have finished.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use unmute_rs::{
    MockEndpoints, MockHost, SynthReinitializer, TaskTiming, UnmuteConfig, UnmutePlugin,
    CONFIG_NAMESPACE,
};

const FAST: TaskTiming = TaskTiming {
    poll_interval: Duration::ZERO,
    chime_pause: Duration::ZERO,
};

fn load_and_wait(host: &MockHost, endpoints: &MockEndpoints) -> UnmutePlugin<MockHost> {
    let mut plugin = UnmutePlugin::on_load_with_timing(
        Arc::new(host.clone()),
        Arc::new(endpoints.clone()),
        FAST,
    );
    plugin
        .take_startup_tasks()
        .expect("startup tasks are spawned on load")
        .join();
    plugin
}

#[test]
fn test_low_volume_restored_to_max() {
    let host = MockHost::with_active_synth()
        .with_section(CONFIG_NAMESPACE, json!({ "minlevel": 20, "max": true }));
    let endpoints = MockEndpoints::new(true, 0.10);

    load_and_wait(&host, &endpoints);

    let state = endpoints.snapshot();
    assert_eq!(state.volume, 1.0);
    assert!(!state.muted);
}

#[test]
fn test_low_volume_restored_to_custom_level() {
    let host = MockHost::with_active_synth().with_section(
        CONFIG_NAMESPACE,
        json!({ "minlevel": 20, "max": false, "volume": 50 }),
    );
    let endpoints = MockEndpoints::new(false, 0.10);

    load_and_wait(&host, &endpoints);

    assert!((endpoints.snapshot().volume - 0.5).abs() < 1e-6);
}

#[test]
fn test_three_retries_then_chime() {
    let host = MockHost::new().with_section(CONFIG_NAMESPACE, json!({ "retries": 3 }));
    let endpoints = MockEndpoints::new(false, 1.0);

    load_and_wait(&host, &endpoints);

    assert_eq!(host.set_synth_calls().len(), 4);
    assert_eq!(host.tones(), vec![(300, 100), (500, 80), (700, 60)]);
}

#[test]
fn test_reinit_disabled_in_config() {
    let host = MockHost::new().with_section(CONFIG_NAMESPACE, json!({ "reinit": false }));
    let endpoints = MockEndpoints::new(false, 1.0);

    load_and_wait(&host, &endpoints);

    assert!(host.set_synth_calls().is_empty());
    assert!(host.tones().is_empty());
}

#[test]
fn test_no_audio_device_leaves_host_running() {
    let host = MockHost::new().synth_ready_after(1);
    let endpoints = MockEndpoints::absent();

    let mut plugin = load_and_wait(&host, &endpoints);
    plugin.on_unload();

    assert_eq!(host.tones().len(), 3);
    assert!(host.panels().is_empty());
}

#[test]
fn test_reinitializer_respects_poll_interval() {
    let host = MockHost::new();
    let config = UnmuteConfig {
        retries: 1,
        ..UnmuteConfig::default()
    };
    let started = std::time::Instant::now();

    SynthReinitializer::new(Arc::new(host.clone()), &config)
        .with_poll_interval(Duration::from_millis(20))
        .with_chime_pause(Duration::ZERO)
        .run();

    // Two attempts, each followed by one poll interval
    assert!(started.elapsed() >= Duration::from_millis(40));
}
