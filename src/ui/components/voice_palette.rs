//! Voice command palette
//!
//! Example phrases and quick actions. Pressing one speaks the phrase so the
//! user hears what to say; it is not executed.

use crate::state::AppState;
use crate::ui::theme::Theme;
use egui::{RichText, Vec2};

/// (phrase, description)
pub const COMMON_COMMANDS: [(&str, &str); 8] = [
    ("What's in front of me?", "Identify objects ahead"),
    ("Take me to the kitchen", "Navigate to kitchen"),
    ("Scan my environment", "Map surroundings"),
    ("Help me cook", "Kitchen assistance"),
    ("What can I make?", "Recipe suggestions"),
    ("Where am I?", "Current location"),
    ("Emergency help", "Emergency assistance"),
    ("Settings", "Open accessibility settings"),
];

/// (button label, spoken phrase)
pub const QUICK_ACTIONS: [(&str, &str); 3] = [
    ("Identify Objects", "What's in front of me?"),
    ("Navigation Help", "Help me navigate"),
    ("Emergency", "Emergency"),
];

pub struct VoicePalette<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> VoicePalette<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let mut phrase = None;

        let status = if self.state.speech.is_speaking() {
            "Speaking, please wait"
        } else if self.state.listener.is_listening() {
            "Listening for your command"
        } else {
            "Ready for voice commands"
        };

        ui.vertical_centered(|ui| {
            ui.label(RichText::new(status).small().color(self.theme.text_muted));
        });

        ui.add_space(self.theme.spacing_sm);

        egui::Grid::new("voice_palette")
            .num_columns(4)
            .spacing(Vec2::splat(self.theme.spacing_sm))
            .show(ui, |ui| {
                for (i, (command, description)) in COMMON_COMMANDS.iter().enumerate() {
                    let button = egui::Button::new(RichText::new(format!("\"{command}\"")).small())
                        .rounding(self.theme.button_rounding)
                        .min_size(Vec2::new(150.0, 28.0));
                    if ui.add(button).on_hover_text(*description).clicked() {
                        phrase = Some(*command);
                    }
                    if i % 4 == 3 {
                        ui.end_row();
                    }
                }
            });

        ui.add_space(self.theme.spacing_sm);

        ui.horizontal(|ui| {
            let colors = [self.theme.primary, self.theme.success, self.theme.error];
            for ((label, spoken), color) in QUICK_ACTIONS.iter().zip(colors) {
                let button = egui::Button::new(RichText::new(*label).strong())
                    .fill(color.gamma_multiply(0.8))
                    .rounding(self.theme.button_rounding);
                if ui.add(button).clicked() {
                    phrase = Some(*spoken);
                }
            }
        });

        if let Some(phrase) = phrase {
            self.state.speak_phrase(phrase);
        }
    }
}
