//! Home view

use crate::ui::theme::Theme;
use egui::{Color32, RichText, Vec2};

const FEATURES: [(&str, &str, &str); 3] = [
    (
        "📷",
        "Environment Scanning",
        "Map your surroundings and identify objects in real-time",
    ),
    (
        "🧭",
        "Voice Navigation",
        "Get spoken directions to navigate indoor spaces safely",
    ),
    (
        "🍳",
        "Task Assistance",
        "Get help with cooking, finding items, and daily activities",
    ),
];

const QUICK_COMMANDS: [&str; 4] = [
    "\"Scan my environment\" - Start mapping your space",
    "\"What's in front of me?\" - Identify objects ahead",
    "\"Take me to the kitchen\" - Navigate to a room",
    "\"Help me cook\" - Kitchen assistance mode",
];

pub struct HomeView<'a> {
    theme: &'a Theme,
}

impl<'a> HomeView<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let theme = self.theme;
        let accents: [Color32; 3] = [theme.primary, theme.success, theme.warning];

        ui.vertical_centered(|ui| {
            ui.heading("Your Personal Vision Assistant");
        });
        ui.add_space(theme.spacing);

        ui.horizontal_wrapped(|ui| {
            for ((icon, title, description), accent) in FEATURES.iter().zip(accents) {
                egui::Frame::none()
                    .fill(theme.bg_tertiary)
                    .rounding(theme.card_rounding)
                    .inner_margin(theme.spacing)
                    .show(ui, |ui| {
                        ui.set_width(220.0);
                        ui.vertical_centered(|ui| {
                            ui.label(RichText::new(*icon).size(36.0).color(accent));
                            ui.label(RichText::new(*title).size(18.0).strong());
                            ui.label(RichText::new(*description).color(theme.text_secondary));
                        });
                    });
            }
        });

        ui.add_space(theme.spacing_lg);
        egui::Frame::none()
            .fill(theme.primary.gamma_multiply(0.15))
            .stroke(egui::Stroke::new(1.0, theme.primary.gamma_multiply(0.4)))
            .rounding(theme.button_rounding)
            .inner_margin(theme.spacing)
            .show(ui, |ui| {
                ui.set_min_size(Vec2::new(ui.available_width(), 0.0));
                ui.label(RichText::new("Quick Voice Commands:").strong());
                for line in QUICK_COMMANDS {
                    ui.label(RichText::new(line).color(theme.text_secondary));
                }
            });
    }
}
