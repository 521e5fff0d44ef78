//! Mock host for unit testing.
//!
//! Records every call the add-on makes and lets tests script when a
//! synthesizer becomes available.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::{
    ConfigStore, HostError, PanelInfo, SettingsRegistry, SynthHost, TonePlayer, TranslationSource,
};
use crate::config::ConfigSchema;

/// A call made into the mock host, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    InitializeSubsystem,
    SetSynth(String),
    PlayTone { frequency_hz: u32, duration_ms: u32 },
    RegisterSchema(String),
    WriteSection(String),
    RegisterPanel(String),
    DeregisterPanel(String),
}

#[derive(Debug, Default)]
struct MockHostState {
    synth_active: bool,
    /// Number of `set_synth` calls after which a synthesizer becomes active
    synth_ready_after: Option<u32>,
    set_synth_count: u32,
    configured_synth: String,
    sections: HashMap<String, Value>,
    schemas: HashMap<String, Value>,
    panels: Vec<PanelInfo>,
    catalog: Option<HashMap<String, String>>,
    fail_writes: bool,
    calls: Vec<HostCall>,
}

/// A mock implementation of every host trait.
///
/// Clones share state, so a test can keep one handle while the add-on
/// owns another.
#[derive(Debug, Clone)]
pub struct MockHost {
    state: Arc<Mutex<MockHostState>>,
}

impl MockHost {
    /// Creates a host with no active synthesizer that never gets one.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockHostState {
                configured_synth: "espeak".to_string(),
                ..MockHostState::default()
            })),
        }
    }

    /// Creates a host whose synthesizer is already running.
    pub fn with_active_synth() -> Self {
        let host = Self::new();
        host.lock().synth_active = true;
        host
    }

    /// A synthesizer becomes active on the `n`th `set_synth` call.
    pub fn synth_ready_after(self, n: u32) -> Self {
        self.lock().synth_ready_after = Some(n);
        self
    }

    pub fn with_section(self, namespace: &str, section: Value) -> Self {
        self.lock().sections.insert(namespace.to_string(), section);
        self
    }

    pub fn with_catalog(self, catalog: HashMap<String, String>) -> Self {
        self.lock().catalog = Some(catalog);
        self
    }

    /// Make every `write_section` call fail.
    pub fn failing_writes(self) -> Self {
        self.lock().fail_writes = true;
        self
    }

    pub fn set_configured_synth(&self, driver: &str) {
        self.lock().configured_synth = driver.to_string();
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.lock().calls.clone()
    }

    /// Driver names passed to `set_synth`, in order.
    pub fn set_synth_calls(&self) -> Vec<String> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                HostCall::SetSynth(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    /// Tones played, as `(frequency_hz, duration_ms)` pairs.
    pub fn tones(&self) -> Vec<(u32, u32)> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                HostCall::PlayTone {
                    frequency_hz,
                    duration_ms,
                } => Some((*frequency_hz, *duration_ms)),
                _ => None,
            })
            .collect()
    }

    pub fn section(&self, namespace: &str) -> Option<Value> {
        self.lock().sections.get(namespace).cloned()
    }

    pub fn schema(&self, namespace: &str) -> Option<Value> {
        self.lock().schemas.get(namespace).cloned()
    }

    pub fn panels(&self) -> Vec<PanelInfo> {
        self.lock().panels.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockHostState> {
        self.state.lock().expect("lock poisoned")
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SynthHost for MockHost {
    fn has_active_synth(&self) -> bool {
        self.lock().synth_active
    }

    fn initialize_subsystem(&self) {
        self.lock().calls.push(HostCall::InitializeSubsystem);
    }

    fn set_synth(&self, driver: &str) -> bool {
        let mut state = self.lock();
        state.calls.push(HostCall::SetSynth(driver.to_string()));
        state.set_synth_count += 1;
        if state.synth_ready_after == Some(state.set_synth_count) {
            state.synth_active = true;
        }
        state.synth_active
    }

    fn configured_synth(&self) -> String {
        self.lock().configured_synth.clone()
    }
}

impl TonePlayer for MockHost {
    fn play_tone(&self, frequency_hz: u32, duration_ms: u32) {
        self.lock().calls.push(HostCall::PlayTone {
            frequency_hz,
            duration_ms,
        });
    }
}

impl ConfigStore for MockHost {
    fn register_schema(&self, namespace: &str, schema: &ConfigSchema) {
        let mut state = self.lock();
        state.calls.push(HostCall::RegisterSchema(namespace.to_string()));
        state.schemas.insert(namespace.to_string(), schema.to_json());
    }

    fn read_section(&self, namespace: &str) -> Option<Value> {
        self.lock().sections.get(namespace).cloned()
    }

    fn write_section(&self, namespace: &str, section: Value) -> Result<(), HostError> {
        let mut state = self.lock();
        state.calls.push(HostCall::WriteSection(namespace.to_string()));
        if state.fail_writes {
            return Err(HostError::ConfigWrite {
                namespace: namespace.to_string(),
            });
        }
        state.sections.insert(namespace.to_string(), section);
        Ok(())
    }
}

impl SettingsRegistry for MockHost {
    fn register_panel(&self, panel: &PanelInfo) {
        let mut state = self.lock();
        state.calls.push(HostCall::RegisterPanel(panel.id.clone()));
        state.panels.push(panel.clone());
    }

    fn deregister_panel(&self, panel_id: &str) -> Result<(), HostError> {
        let mut state = self.lock();
        state.calls.push(HostCall::DeregisterPanel(panel_id.to_string()));
        match state.panels.iter().position(|p| p.id == panel_id) {
            Some(index) => {
                state.panels.remove(index);
                Ok(())
            }
            None => Err(HostError::PanelNotRegistered {
                panel_id: panel_id.to_string(),
            }),
        }
    }
}

impl TranslationSource for MockHost {
    fn load_catalog(&self) -> Result<HashMap<String, String>, HostError> {
        self.lock().catalog.clone().ok_or_else(|| {
            HostError::TranslationsUnavailable("no catalog for this language".to_string())
        })
    }
}
