//! Status bar component
//!
//! Speaking indicator, detected object count and the shortcut reminder.

use crate::state::AppState;
use crate::ui::theme::Theme;
use egui::RichText;

pub const SHORTCUT_HINT: &str = "Press Ctrl+H for home, Ctrl+C for camera, Ctrl+Space to speak";

pub struct StatusBar<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let speaking = self.state.speech.is_speaking();
            let color = if speaking {
                self.theme.primary
            } else {
                self.theme.text_muted
            };
            ui.label(RichText::new(self.state.status_text()).color(color));

            let count = self.state.detected_objects.len();
            if count > 0 {
                ui.separator();
                ui.label(
                    RichText::new(format!("{count} objects detected"))
                        .color(self.theme.success),
                );
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    RichText::new(SHORTCUT_HINT)
                        .small()
                        .color(self.theme.text_muted),
                );
            });
        });
    }
}
