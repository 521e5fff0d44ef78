//! Add-on lifecycle.
//!
//! Ties the pieces together the way the host drives them: on load the schema
//! and settings panel are registered and the startup tasks are launched, on
//! unload the panel is removed again.

use crate::audio::EndpointProvider;
use crate::config::{ConfigSchema, UnmuteConfig, CONFIG_NAMESPACE};
use crate::host::{Host, HostError, PanelInfo};
use crate::i18n::Translations;
use crate::tasks::{spawn_startup_tasks, StartupTasks, TaskTiming};
use crate::ui::SettingsPanel;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Title of the settings panel (and add-on summary).
pub const PANEL_TITLE: &str = "Unmute system audio";

/// A loaded add-on instance.
pub struct UnmutePlugin<H: Host> {
    host: Arc<H>,
    translations: Translations,
    panel: PanelInfo,
    panel_registered: bool,
    startup: Option<StartupTasks>,
}

impl<H: Host + 'static> UnmutePlugin<H> {
    /// Load the add-on into the host.
    pub fn on_load(host: Arc<H>, provider: Arc<dyn EndpointProvider>) -> Self {
        Self::on_load_with_timing(host, provider, TaskTiming::default())
    }

    /// Load with custom reinitializer delays.
    pub fn on_load_with_timing(
        host: Arc<H>,
        provider: Arc<dyn EndpointProvider>,
        timing: TaskTiming,
    ) -> Self {
        host.register_schema(CONFIG_NAMESPACE, &ConfigSchema::unmute());
        let translations = Translations::init(host.as_ref());

        let panel = PanelInfo {
            id: SettingsPanel::ID.to_string(),
            title: translations.tr(PANEL_TITLE).to_string(),
        };
        host.register_panel(&panel);

        let config = load_config(host.as_ref());
        debug!(?config, "Loaded configuration");
        let startup = spawn_startup_tasks(Arc::clone(&host), provider, config, timing);
        info!(reinit = config.reinit, "Unmute add-on loaded");

        Self {
            host,
            translations,
            panel,
            panel_registered: true,
            startup: Some(startup),
        }
    }

    /// Remove the add-on from the host. Safe to call more than once.
    pub fn on_unload(&mut self) {
        if !self.panel_registered {
            return;
        }
        self.panel_registered = false;

        match self.host.deregister_panel(&self.panel.id) {
            Ok(()) => info!("Unmute add-on unloaded"),
            Err(e) => warn!(
                panel = %self.panel.title,
                error = %e,
                "Can't remove settings panel from the host settings dialog"
            ),
        }
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> UnmuteConfig {
        load_config(self.host.as_ref())
    }

    /// Panel populated from the stored configuration, with the checkbox focused.
    pub fn settings_panel(&self) -> SettingsPanel {
        let mut panel = SettingsPanel::load(&self.config());
        panel.focus();
        panel
    }

    /// Persist the panel controls.
    pub fn save_settings(&self, panel: &SettingsPanel) -> Result<(), HostError> {
        let mut config = self.config();
        panel.save(&mut config);
        self.host
            .write_section(CONFIG_NAMESPACE, config.to_section())?;
        debug!(max = config.max, volume = config.volume, "Saved settings");
        Ok(())
    }

    pub fn panel_info(&self) -> &PanelInfo {
        &self.panel
    }

    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    /// Hand over the startup thread handles. The host itself never joins them.
    pub fn take_startup_tasks(&mut self) -> Option<StartupTasks> {
        self.startup.take()
    }
}

fn load_config<H: Host>(host: &H) -> UnmuteConfig {
    UnmuteConfig::from_section(host.read_section(CONFIG_NAMESPACE).as_ref())
}
