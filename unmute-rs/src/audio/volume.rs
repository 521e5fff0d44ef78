//! Volume control using IAudioEndpointVolume.
//!
//! Provides volume and mute control for the default output endpoint.

use super::endpoint::{AudioError, OutputEndpoint};
use super::enumerator::{default_render_device, ComGuard};
use windows::Win32::Media::Audio::{Endpoints::IAudioEndpointVolume, IMMDevice};
use windows::Win32::System::Com::CLSCTX_ALL;

/// Volume controller for a specific device.
pub struct VolumeController {
    endpoint_volume: IAudioEndpointVolume,
    // Declared last so COM outlives the interface pointer above
    _com: Option<ComGuard>,
}

impl VolumeController {
    /// Create a new VolumeController for the given device.
    ///
    /// Note: COM must be initialized before calling this function.
    pub fn new(device: &IMMDevice) -> Result<Self, AudioError> {
        unsafe {
            let endpoint_volume: IAudioEndpointVolume = device
                .Activate(CLSCTX_ALL, None)
                .map_err(|_| AudioError::VolumeNotAvailable)?;

            Ok(Self {
                endpoint_volume,
                _com: None,
            })
        }
    }

    /// Initialize COM on this thread and open the default output endpoint.
    pub fn default_output() -> Result<Self, AudioError> {
        let com = ComGuard::new()?;
        let device = default_render_device()?;
        let mut controller = Self::new(&device)?;
        controller._com = Some(com);
        Ok(controller)
    }
}

impl OutputEndpoint for VolumeController {
    fn get_mute(&self) -> Result<bool, AudioError> {
        unsafe {
            let muted = self
                .endpoint_volume
                .GetMute()
                .map_err(AudioError::WindowsError)?;
            Ok(muted.as_bool())
        }
    }

    fn set_mute(&self, muted: bool) -> Result<(), AudioError> {
        unsafe {
            self.endpoint_volume
                .SetMute(muted, std::ptr::null())
                .map_err(AudioError::WindowsError)?;
            Ok(())
        }
    }

    fn get_volume(&self) -> Result<f32, AudioError> {
        unsafe {
            let level = self
                .endpoint_volume
                .GetMasterVolumeLevelScalar()
                .map_err(AudioError::WindowsError)?;
            Ok(level)
        }
    }

    fn set_volume(&self, level: f32) -> Result<(), AudioError> {
        let level = level.clamp(0.0, 1.0);
        unsafe {
            self.endpoint_volume
                .SetMasterVolumeLevelScalar(level, std::ptr::null())
                .map_err(AudioError::WindowsError)?;
            Ok(())
        }
    }
}
