//! Fire-and-forget startup tasks.
//!
//! Both routines run on their own named thread so neither blocks the host's
//! initialization nor each other. The host never waits for them; failures
//! end up in the log and nowhere else.

use crate::audio::EndpointProvider;
use crate::chime::CHIME_PAUSE;
use crate::config::UnmuteConfig;
use crate::reinit::{ReinitHost, SynthReinitializer, POLL_INTERVAL};
use crate::unmuter::VolumeUnmuter;
use anyhow::Context;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::warn;

pub const UNMUTE_THREAD: &str = "unmute-volume";
pub const REINIT_THREAD: &str = "unmute-synth";

/// Delays used by the reinitializer thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTiming {
    pub poll_interval: Duration,
    pub chime_pause: Duration,
}

impl Default for TaskTiming {
    fn default() -> Self {
        Self {
            poll_interval: POLL_INTERVAL,
            chime_pause: CHIME_PAUSE,
        }
    }
}

/// Handles of the spawned startup threads.
///
/// Dropping this detaches the threads.
#[derive(Debug, Default)]
pub struct StartupTasks {
    unmute: Option<JoinHandle<()>>,
    reinit: Option<JoinHandle<()>>,
}

impl StartupTasks {
    pub fn unmute_spawned(&self) -> bool {
        self.unmute.is_some()
    }

    pub fn reinit_spawned(&self) -> bool {
        self.reinit.is_some()
    }

    /// Wait for both threads to finish.
    pub fn join(self) {
        for handle in [self.unmute, self.reinit].into_iter().flatten() {
            let name = handle.thread().name().unwrap_or("startup").to_string();
            if handle.join().is_err() {
                warn!(task = %name, "Startup task panicked");
            }
        }
    }
}

/// Spawn the volume restore, and the synthesizer reinitializer when enabled.
pub fn spawn_startup_tasks<H>(
    host: Arc<H>,
    provider: Arc<dyn EndpointProvider>,
    config: UnmuteConfig,
    timing: TaskTiming,
) -> StartupTasks
where
    H: ReinitHost + 'static,
{
    let unmute = spawn_task(UNMUTE_THREAD, move || {
        VolumeUnmuter::new(provider, config)
            .run()
            .context("failed to restore default output volume")?;
        Ok(())
    });

    let reinit = if config.reinit {
        spawn_task(REINIT_THREAD, move || {
            SynthReinitializer::new(host, &config)
                .with_poll_interval(timing.poll_interval)
                .with_chime_pause(timing.chime_pause)
                .run();
            Ok(())
        })
    } else {
        None
    };

    StartupTasks { unmute, reinit }
}

fn spawn_task<F>(name: &'static str, task: F) -> Option<JoinHandle<()>>
where
    F: FnOnce() -> anyhow::Result<()> + Send + 'static,
{
    let spawned = thread::Builder::new().name(name.to_string()).spawn(move || {
        if let Err(e) = task() {
            warn!(task = name, error = %format!("{:#}", e), "Startup task failed");
        }
    });

    match spawned {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!(task = name, error = %e, "Failed to spawn startup task");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::MockEndpoints;
    use crate::host::MockHost;

    const FAST: TaskTiming = TaskTiming {
        poll_interval: Duration::ZERO,
        chime_pause: Duration::ZERO,
    };

    #[test]
    fn test_both_tasks_run() {
        let host = MockHost::new().synth_ready_after(1);
        let endpoints = MockEndpoints::new(true, 0.05);

        let tasks = spawn_startup_tasks(
            Arc::new(host.clone()),
            Arc::new(endpoints.clone()),
            UnmuteConfig::default(),
            FAST,
        );
        assert!(tasks.unmute_spawned());
        assert!(tasks.reinit_spawned());
        tasks.join();

        assert!(!endpoints.snapshot().muted);
        assert_eq!(endpoints.snapshot().volume, 1.0);
        assert_eq!(host.tones().len(), 3);
    }

    #[test]
    fn test_reinit_disabled() {
        let host = MockHost::new();
        let config = UnmuteConfig {
            reinit: false,
            ..UnmuteConfig::default()
        };

        let tasks = spawn_startup_tasks(
            Arc::new(host.clone()),
            Arc::new(MockEndpoints::new(false, 1.0)),
            config,
            FAST,
        );
        assert!(!tasks.reinit_spawned());
        tasks.join();

        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_unmute_failure_does_not_affect_reinit() {
        let host = MockHost::new().synth_ready_after(3);

        let tasks = spawn_startup_tasks(
            Arc::new(host.clone()),
            Arc::new(MockEndpoints::absent()),
            UnmuteConfig::default(),
            FAST,
        );
        tasks.join();

        assert_eq!(host.set_synth_calls().len(), 3);
    }
}
