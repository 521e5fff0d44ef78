//! Settings panel shown in the host settings dialog.

pub mod components;
pub mod settings_panel;

pub use settings_panel::{FocusTarget, SettingsPanel, UiState};
