//! Output endpoint abstraction.
//!
//! Defines the traits the unmuter drives and the error type shared by all
//! endpoint implementations.

use thiserror::Error;

/// Volume and mute control for a single audio output endpoint.
pub trait OutputEndpoint {
    /// Get the current mute state.
    fn get_mute(&self) -> Result<bool, AudioError>;

    /// Set the mute state.
    fn set_mute(&self, muted: bool) -> Result<(), AudioError>;

    /// Get the current master volume level (0.0 to 1.0).
    fn get_volume(&self) -> Result<f32, AudioError>;

    /// Set the master volume level (0.0 to 1.0). Out-of-range values are clamped.
    fn set_volume(&self, level: f32) -> Result<(), AudioError>;
}

/// Locates the default output endpoint.
///
/// Providers are shared with a background thread, so they must be `Send + Sync`.
/// The endpoint they hand out is only used on the calling thread.
pub trait EndpointProvider: Send + Sync {
    /// Open the default render endpoint for the console role.
    fn default_output(&self) -> Result<Box<dyn OutputEndpoint>, AudioError>;
}

/// Audio service error types.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("No default output device available")]
    NoDefaultDevice,

    #[cfg(target_os = "windows")]
    #[error("COM initialization failed: {0}")]
    ComInitFailed(#[source] windows::core::Error),

    #[error("Volume control not available for device")]
    VolumeNotAvailable,

    #[cfg(target_os = "windows")]
    #[error("Windows API error: {0}")]
    WindowsError(#[source] windows::core::Error),

    #[error("Audio endpoint control is not supported on this platform")]
    Unsupported,
}

/// The operating system's audio endpoints.
///
/// On Windows this goes through the Core Audio `IMMDeviceEnumerator`; on other
/// platforms every lookup fails with [`AudioError::Unsupported`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEndpoints;

impl SystemEndpoints {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_os = "windows")]
impl EndpointProvider for SystemEndpoints {
    fn default_output(&self) -> Result<Box<dyn OutputEndpoint>, AudioError> {
        let controller = super::volume::VolumeController::default_output()?;
        Ok(Box::new(controller))
    }
}

#[cfg(not(target_os = "windows"))]
impl EndpointProvider for SystemEndpoints {
    fn default_output(&self) -> Result<Box<dyn OutputEndpoint>, AudioError> {
        Err(AudioError::Unsupported)
    }
}
