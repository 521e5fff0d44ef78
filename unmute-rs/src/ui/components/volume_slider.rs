//! Volume slider UI component.
//!
//! Renders a labelled percentage slider.

use egui::SliderClamping;

/// Volume slider component.
pub struct VolumeSlider;

impl VolumeSlider {
    /// Slider width in points.
    pub const WIDTH: f32 = 250.0;

    /// Render a labelled 0-100 slider. Returns true if the value changed.
    pub fn show(ui: &mut egui::Ui, label: &str, percent: &mut u8) -> bool {
        let mut changed = false;

        ui.horizontal(|ui| {
            let label = ui.label(label);

            ui.spacing_mut().slider_width = Self::WIDTH;
            let response = ui
                .add(
                    egui::Slider::new(percent, 0..=100)
                        .suffix("%")
                        .clamping(SliderClamping::Always),
                )
                .labelled_by(label.id);

            changed = response.changed();
        });

        changed
    }
}
