//! Default endpoint lookup using Windows MMDevice API.
//!
//! Provides COM initialization and default render endpoint discovery.

use super::endpoint::AudioError;
use windows::Win32::Foundation::RPC_E_CHANGED_MODE;
use windows::Win32::Media::Audio::{
    eConsole, eRender, IMMDevice, IMMDeviceEnumerator, MMDeviceEnumerator,
};
use windows::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, CoUninitialize, CLSCTX_ALL, COINIT_MULTITHREADED,
};

/// COM initialization guard that uninitializes COM on drop.
pub struct ComGuard {
    initialized: bool,
}

impl ComGuard {
    /// Initialize COM for the current thread.
    ///
    /// A thread the host already initialized in another apartment mode is
    /// accepted as-is and left alone on drop.
    pub fn new() -> Result<Self, AudioError> {
        unsafe {
            // Startup routines run on plain worker threads with no message pump
            let hr = CoInitializeEx(None, COINIT_MULTITHREADED);
            if hr == RPC_E_CHANGED_MODE {
                return Ok(Self { initialized: false });
            }
            hr.ok().map_err(AudioError::ComInitFailed)?;
        }
        Ok(Self { initialized: true })
    }
}

impl Drop for ComGuard {
    fn drop(&mut self) {
        if self.initialized {
            unsafe {
                CoUninitialize();
            }
        }
    }
}

/// Get the default render endpoint for the console role.
///
/// Note: COM must be initialized before calling this function.
pub fn default_render_device() -> Result<IMMDevice, AudioError> {
    unsafe {
        let enumerator: IMMDeviceEnumerator =
            CoCreateInstance(&MMDeviceEnumerator, None, CLSCTX_ALL)
                .map_err(AudioError::WindowsError)?;

        // Fails with E_NOTFOUND when the machine has no audio output hardware
        enumerator
            .GetDefaultAudioEndpoint(eRender, eConsole)
            .map_err(|_| AudioError::NoDefaultDevice)
    }
}
