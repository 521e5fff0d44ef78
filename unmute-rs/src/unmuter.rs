//! Startup volume restore for the default output endpoint.

use crate::audio::{AudioError, EndpointProvider};
use crate::config::UnmuteConfig;
use std::sync::Arc;
use tracing::{debug, info};

/// What the unmuter changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnmuteReport {
    /// The endpoint was muted and has been unmuted
    pub was_muted: bool,

    /// Volume scalar found on the endpoint (0.0 to 1.0)
    pub previous_volume: f32,

    /// Volume scalar written, if the level was below the threshold
    pub restored_volume: Option<f32>,
}

/// Unmutes the default output endpoint and raises a low master volume.
pub struct VolumeUnmuter {
    provider: Arc<dyn EndpointProvider>,
    config: UnmuteConfig,
}

impl VolumeUnmuter {
    pub fn new(provider: Arc<dyn EndpointProvider>, config: UnmuteConfig) -> Self {
        Self { provider, config }
    }

    /// Run once. Any endpoint failure ends the run without further changes.
    pub fn run(&self) -> Result<UnmuteReport, AudioError> {
        let endpoint = self.provider.default_output()?;

        let was_muted = endpoint.get_mute()?;
        if was_muted {
            endpoint.set_mute(false)?;
            info!("Unmuted default output device");
        }

        let previous_volume = endpoint.get_volume()?;
        let percent = previous_volume * 100.0;
        let restored_volume = if percent < f32::from(self.config.minlevel) {
            let target = self.config.volume_fraction();
            endpoint.set_volume(target)?;
            info!(
                from = percent,
                to = target * 100.0,
                threshold = self.config.minlevel,
                "Raised output volume"
            );
            Some(target)
        } else {
            debug!(
                volume = percent,
                threshold = self.config.minlevel,
                "Output volume left unchanged"
            );
            None
        };

        Ok(UnmuteReport {
            was_muted,
            previous_volume,
            restored_volume,
        })
    }
}
