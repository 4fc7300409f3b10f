//! Header component
//!
//! App title with the sound toggle and the settings button.

use crate::state::AppState;
use crate::ui::theme::Theme;
use egui::{RichText, Vec2};

pub struct Header<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn sound_label(state: &AppState) -> &'static str {
        if state.settings.sound_enabled {
            "Disable sound"
        } else {
            "Enable sound"
        }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(self.theme.spacing_sm);
            ui.label(
                RichText::new("👁")
                    .size(26.0)
                    .color(self.theme.primary),
            );
            ui.label(
                RichText::new("Vision Assistant")
                    .size(22.0)
                    .strong()
                    .color(self.theme.text_primary),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add_space(self.theme.spacing_sm);

                let settings = egui::Button::new("Settings")
                    .min_size(Vec2::new(44.0, 36.0))
                    .rounding(self.theme.button_rounding);
                if ui.add(settings).clicked() {
                    self.state.open_settings();
                }

                let sound = egui::Button::new(Self::sound_label(self.state))
                    .min_size(Vec2::new(44.0, 36.0))
                    .rounding(self.theme.button_rounding);
                if ui.add(sound).clicked() {
                    self.state.toggle_sound();
                }
            });
        });
    }
}
