//! Add-on settings panel.
//!
//! Exposes only the restore target (`max` and `volume`); the threshold and
//! retry settings are edited directly in the host configuration.

use crate::config::UnmuteConfig;
use crate::i18n::Translations;
use crate::ui::components::VolumeSlider;
use serde::{Deserialize, Serialize};

pub const HELP_TEXT: &str =
    "Select the initial sound system settings that will be set when the screen reader starts:";
pub const MAX_VOLUME_LABEL: &str = "Set the maximum volume of the system audio on startup";
pub const CUSTOM_VOLUME_LABEL: &str = "Set custom volume level:";

/// Control that receives keyboard focus when the panel opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusTarget {
    MaxVolumeCheckbox,
}

/// Snapshot of the panel controls, as exchanged with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    pub max_volume: bool,
    pub custom_volume: u8,
    #[serde(default)]
    pub slider_visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<FocusTarget>,
}

/// Settings panel state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsPanel {
    max_volume: bool,
    custom_volume: u8,
    focus_pending: bool,
}

impl SettingsPanel {
    /// Identifier of the panel in the host settings dialog.
    pub const ID: &'static str = "unmute";

    /// Populate the controls from the configuration.
    pub fn load(config: &UnmuteConfig) -> Self {
        Self {
            max_volume: config.max,
            custom_volume: config.volume.min(100),
            focus_pending: false,
        }
    }

    /// Rebuild a panel from a host-side snapshot.
    pub fn from_state(state: &UiState) -> Self {
        Self {
            max_volume: state.max_volume,
            custom_volume: state.custom_volume.min(100),
            focus_pending: state.focus.is_some(),
        }
    }

    pub fn state(&self) -> UiState {
        UiState {
            max_volume: self.max_volume,
            custom_volume: self.custom_volume,
            slider_visible: self.slider_visible(),
            focus: self.focus_pending.then_some(FocusTarget::MaxVolumeCheckbox),
        }
    }

    pub fn max_volume(&self) -> bool {
        self.max_volume
    }

    pub fn custom_volume(&self) -> u8 {
        self.custom_volume
    }

    pub fn set_max_volume(&mut self, checked: bool) {
        self.max_volume = checked;
    }

    pub fn set_custom_volume(&mut self, percent: u8) {
        self.custom_volume = percent.min(100);
    }

    /// The custom volume slider is hidden while maximum volume is checked.
    pub fn slider_visible(&self) -> bool {
        !self.max_volume
    }

    /// Give the checkbox keyboard focus on the next render.
    pub fn focus(&mut self) {
        self.focus_pending = true;
    }

    pub fn focus_pending(&self) -> bool {
        self.focus_pending
    }

    /// Write the controls back into the configuration.
    ///
    /// Only `max` and `volume` are touched.
    pub fn save(&self, config: &mut UnmuteConfig) {
        config.max = self.max_volume;
        config.volume = self.custom_volume;
    }

    /// Render the panel. Returns true if any control changed.
    pub fn show(&mut self, ui: &mut egui::Ui, translations: &Translations) -> bool {
        let mut changed = false;

        ui.label(translations.tr(HELP_TEXT));
        ui.add_space(4.0);

        let checkbox = ui.checkbox(&mut self.max_volume, translations.tr(MAX_VOLUME_LABEL));
        changed |= checkbox.changed();
        if self.focus_pending {
            checkbox.request_focus();
            self.focus_pending = false;
        }

        if self.slider_visible() {
            changed |= VolumeSlider::show(
                ui,
                translations.tr(CUSTOM_VOLUME_LABEL),
                &mut self.custom_volume,
            );
        }

        changed
    }
}
