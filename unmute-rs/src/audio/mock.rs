//! Mock output endpoint for unit testing.
//!
//! Lets tests drive the unmuter against a fake default endpoint without a
//! sound card or COM.

use std::sync::{Arc, Mutex};

use super::endpoint::{AudioError, EndpointProvider, OutputEndpoint};

/// Observable state of the fake endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct MockEndpointState {
    pub muted: bool,
    pub volume: f32,
    /// When false, `default_output()` fails as if no audio hardware is present.
    pub present: bool,
    pub set_mute_calls: u32,
    pub set_volume_calls: u32,
}

impl Default for MockEndpointState {
    fn default() -> Self {
        Self {
            muted: false,
            volume: 1.0,
            present: true,
            set_mute_calls: 0,
            set_volume_calls: 0,
        }
    }
}

/// A mock [`EndpointProvider`] whose endpoints share one [`MockEndpointState`].
#[derive(Debug, Clone, Default)]
pub struct MockEndpoints {
    state: Arc<Mutex<MockEndpointState>>,
}

impl MockEndpoints {
    /// Creates a present endpoint with the given mute flag and volume scalar.
    pub fn new(muted: bool, volume: f32) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockEndpointState {
                muted,
                volume,
                ..MockEndpointState::default()
            })),
        }
    }

    /// Creates a provider with no default output device.
    pub fn absent() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockEndpointState {
                present: false,
                ..MockEndpointState::default()
            })),
        }
    }

    /// Returns a copy of the current endpoint state.
    pub fn snapshot(&self) -> MockEndpointState {
        self.state.lock().expect("lock poisoned").clone()
    }
}

impl EndpointProvider for MockEndpoints {
    fn default_output(&self) -> Result<Box<dyn OutputEndpoint>, AudioError> {
        if !self.state.lock().expect("lock poisoned").present {
            return Err(AudioError::NoDefaultDevice);
        }
        Ok(Box::new(MockEndpoint {
            state: Arc::clone(&self.state),
        }))
    }
}

struct MockEndpoint {
    state: Arc<Mutex<MockEndpointState>>,
}

impl OutputEndpoint for MockEndpoint {
    fn get_mute(&self) -> Result<bool, AudioError> {
        Ok(self.state.lock().expect("lock poisoned").muted)
    }

    fn set_mute(&self, muted: bool) -> Result<(), AudioError> {
        let mut state = self.state.lock().expect("lock poisoned");
        state.muted = muted;
        state.set_mute_calls += 1;
        Ok(())
    }

    fn get_volume(&self) -> Result<f32, AudioError> {
        Ok(self.state.lock().expect("lock poisoned").volume)
    }

    fn set_volume(&self, level: f32) -> Result<(), AudioError> {
        let mut state = self.state.lock().expect("lock poisoned");
        state.volume = level.clamp(0.0, 1.0);
        state.set_volume_calls += 1;
        Ok(())
    }
}
