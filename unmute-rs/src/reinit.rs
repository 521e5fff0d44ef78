//! Speech synthesizer reinitialization.
//!
//! At startup the host sometimes comes up without a working synthesizer,
//! typically because the audio device was not ready yet. This routine keeps
//! asking the host to load the configured driver until one is active or the
//! retry budget runs out, then plays the confirmation chime.

use crate::chime::{Chime, CHIME_PAUSE};
use crate::config::UnmuteConfig;
use crate::host::{SynthHost, TonePlayer};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Delay between driver selection attempts.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Retry ceiling derived from the `retries` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryLimit {
    Unlimited,
    /// The counter may reach this value and still attempt once more, so a
    /// limit of `n` allows `n + 1` attempts.
    Attempts(u32),
}

impl RetryLimit {
    pub fn from_retries(retries: u32) -> Self {
        match retries {
            0 => RetryLimit::Unlimited,
            n => RetryLimit::Attempts(n),
        }
    }

    fn allows(&self, counter: u32) -> bool {
        match *self {
            RetryLimit::Unlimited => true,
            RetryLimit::Attempts(n) => counter <= n,
        }
    }
}

/// How a reinitialization run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReinitOutcome {
    /// A synthesizer was already running, nothing was done
    AlreadyActive,
    /// A synthesizer became active after `attempts` selection attempts
    Recovered { attempts: u32 },
    /// The retry budget ran out with no synthesizer
    Exhausted { attempts: u32 },
}

/// Host services the reinitializer needs.
pub trait ReinitHost: SynthHost + TonePlayer {}

impl<T> ReinitHost for T where T: SynthHost + TonePlayer {}

/// Retries synthesizer selection until one is active.
pub struct SynthReinitializer {
    host: Arc<dyn ReinitHost>,
    limit: RetryLimit,
    poll_interval: Duration,
    chime_pause: Duration,
}

impl SynthReinitializer {
    pub fn new(host: Arc<dyn ReinitHost>, config: &UnmuteConfig) -> Self {
        Self {
            host,
            limit: RetryLimit::from_retries(config.retries),
            poll_interval: POLL_INTERVAL,
            chime_pause: CHIME_PAUSE,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_chime_pause(mut self, pause: Duration) -> Self {
        self.chime_pause = pause;
        self
    }

    /// Run once, blocking the calling thread for the whole retry loop.
    pub fn run(&self) -> ReinitOutcome {
        if self.host.has_active_synth() {
            debug!("Synthesizer already active");
            return ReinitOutcome::AlreadyActive;
        }

        info!(limit = ?self.limit, "No active synthesizer, reinitializing");
        self.host.initialize_subsystem();

        let mut counter = 0u32;
        let mut attempts = 0u32;
        while !self.host.has_active_synth() && self.limit.allows(counter) {
            // Re-read every time so a corrected driver name is picked up
            let driver = self.host.configured_synth();
            attempts += 1;
            if !self.host.set_synth(&driver) {
                debug!(driver = %driver, attempt = attempts, "Synthesizer selection failed");
            }

            thread::sleep(self.poll_interval);

            if self.limit != RetryLimit::Unlimited {
                counter += 1;
            }
        }

        let outcome = if self.host.has_active_synth() {
            info!(attempts, "Synthesizer is active");
            ReinitOutcome::Recovered { attempts }
        } else {
            warn!(attempts, "Gave up waiting for a synthesizer");
            ReinitOutcome::Exhausted { attempts }
        };

        // Played on either exit; the tone API does not depend on speech
        Chime::confirmation()
            .with_pause(self.chime_pause)
            .play(self.host.as_ref());

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::mock::HostCall;
    use crate::host::MockHost;

    fn reinitializer(host: &MockHost, retries: u32) -> SynthReinitializer {
        let config = UnmuteConfig {
            retries,
            ..UnmuteConfig::default()
        };
        SynthReinitializer::new(Arc::new(host.clone()), &config)
            .with_poll_interval(Duration::ZERO)
            .with_chime_pause(Duration::ZERO)
    }

    #[test]
    fn test_retry_limit_from_retries() {
        assert_eq!(RetryLimit::from_retries(0), RetryLimit::Unlimited);
        assert_eq!(RetryLimit::from_retries(5), RetryLimit::Attempts(5));
    }

    #[test]
    fn test_active_synth_is_noop() {
        let host = MockHost::with_active_synth();
        let outcome = reinitializer(&host, 3).run();

        assert_eq!(outcome, ReinitOutcome::AlreadyActive);
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_exhausted_retries() {
        let host = MockHost::new();
        let outcome = reinitializer(&host, 3).run();

        assert_eq!(outcome, ReinitOutcome::Exhausted { attempts: 4 });
        assert_eq!(host.set_synth_calls().len(), 4);
        assert_eq!(host.tones(), vec![(300, 100), (500, 80), (700, 60)]);
    }

    #[test]
    fn test_single_retry_allows_two_attempts() {
        let host = MockHost::new();
        let outcome = reinitializer(&host, 1).run();
        assert_eq!(outcome, ReinitOutcome::Exhausted { attempts: 2 });
    }

    #[test]
    fn test_recovered_before_limit() {
        let host = MockHost::new().synth_ready_after(2);
        let outcome = reinitializer(&host, 10).run();

        assert_eq!(outcome, ReinitOutcome::Recovered { attempts: 2 });
        assert_eq!(host.tones().len(), 3);
    }

    #[test]
    fn test_unlimited_retries_run_until_active() {
        let host = MockHost::new().synth_ready_after(25);
        let outcome = reinitializer(&host, 0).run();

        assert_eq!(outcome, ReinitOutcome::Recovered { attempts: 25 });
        assert_eq!(host.set_synth_calls().len(), 25);
    }

    #[test]
    fn test_call_order() {
        let host = MockHost::new().synth_ready_after(1);
        reinitializer(&host, 0).run();

        assert_eq!(
            host.calls(),
            vec![
                HostCall::InitializeSubsystem,
                HostCall::SetSynth("espeak".to_string()),
                HostCall::PlayTone {
                    frequency_hz: 300,
                    duration_ms: 100
                },
                HostCall::PlayTone {
                    frequency_hz: 500,
                    duration_ms: 80
                },
                HostCall::PlayTone {
                    frequency_hz: 700,
                    duration_ms: 60
                },
            ]
        );
    }

    #[test]
    fn test_driver_name_read_each_attempt() {
        let host = MockHost::new();
        host.set_configured_synth("oneCore");
        reinitializer(&host, 2).run();

        assert!(host.set_synth_calls().iter().all(|name| name == "oneCore"));
    }
}
