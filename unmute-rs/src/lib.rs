//! Unmute - Library
//!
//! A screen reader add-on that makes sure speech can actually be heard
//! after the host starts.
//!
//! ## Features
//!
//! - Unmute the default output device and raise a low master volume
//! - Retry speech synthesizer initialization until a driver loads
//! - Audible confirmation chime when the retry loop ends
//! - Settings panel for the restore volume

pub mod audio;
pub mod chime;
pub mod config;
pub mod host;
pub mod i18n;
pub mod plugin;
pub mod reinit;
pub mod tasks;
pub mod ui;
pub mod unmuter;

pub use audio::{AudioError, EndpointProvider, MockEndpoints, OutputEndpoint, SystemEndpoints};
pub use chime::{Chime, Tone, CONFIRMATION_CHIME};
pub use config::{ConfigSchema, FieldSpec, UnmuteConfig, CONFIG_NAMESPACE};
pub use host::{Host, HostError, MockHost, PanelInfo};
pub use i18n::Translations;
pub use plugin::UnmutePlugin;
pub use reinit::{ReinitOutcome, RetryLimit, SynthReinitializer};
pub use tasks::{spawn_startup_tasks, StartupTasks, TaskTiming};
pub use ui::{SettingsPanel, UiState};
pub use unmuter::{UnmuteReport, VolumeUnmuter};
