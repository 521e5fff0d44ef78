//! Reusable UI components for the settings panel.

pub mod volume_slider;

pub use volume_slider::VolumeSlider;
