//! Host application collaborators.
//!
//! The screen reader that loads this add-on owns the speech synthesizer,
//! the tone generator, the configuration store, the settings dialog and
//! translation catalogs. Each is reached through one of the traits below so
//! the startup routines can run against the real host (via the C ABI) or
//! against [`mock::MockHost`] in tests.

pub mod mock;

use crate::config::ConfigSchema;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

pub use mock::MockHost;

/// Host errors surfaced to the add-on.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Settings panel {panel_id} is not registered")]
    PanelNotRegistered { panel_id: String },

    #[error("Translations are unavailable: {0}")]
    TranslationsUnavailable(String),

    #[error("Failed to write configuration section {namespace}")]
    ConfigWrite { namespace: String },

    #[error("Host callback failed: {0}")]
    Callback(String),
}

/// The host speech synthesizer subsystem.
pub trait SynthHost: Send + Sync {
    /// Whether a synthesizer is currently active.
    fn has_active_synth(&self) -> bool;

    /// Initialize the synthesizer subsystem (driver registry and defaults).
    fn initialize_subsystem(&self);

    /// Try to switch to the named driver. Returns true on success.
    fn set_synth(&self, driver: &str) -> bool;

    /// Driver name from the host speech configuration.
    fn configured_synth(&self) -> String;
}

/// The host tone generator.
pub trait TonePlayer: Send + Sync {
    /// Play a tone, blocking for `duration_ms`.
    fn play_tone(&self, frequency_hz: u32, duration_ms: u32);
}

/// The host configuration store.
pub trait ConfigStore: Send + Sync {
    /// Declare the schema of a configuration section.
    fn register_schema(&self, namespace: &str, schema: &ConfigSchema);

    /// Raw stored section, if any.
    fn read_section(&self, namespace: &str) -> Option<Value>;

    /// Replace the stored section.
    fn write_section(&self, namespace: &str, section: Value) -> Result<(), HostError>;
}

/// Identity of a panel in the host settings dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelInfo {
    pub id: String,
    pub title: String,
}

/// The host settings dialog category list.
pub trait SettingsRegistry: Send + Sync {
    fn register_panel(&self, panel: &PanelInfo);

    fn deregister_panel(&self, panel_id: &str) -> Result<(), HostError>;
}

/// The host translation loader.
pub trait TranslationSource: Send + Sync {
    /// Load the add-on message catalog for the current host language.
    fn load_catalog(&self) -> Result<HashMap<String, String>, HostError>;
}

/// Everything the add-on needs from its host.
pub trait Host: SynthHost + TonePlayer + ConfigStore + SettingsRegistry + TranslationSource {}

impl<T> Host for T where
    T: SynthHost + TonePlayer + ConfigStore + SettingsRegistry + TranslationSource
{
}
