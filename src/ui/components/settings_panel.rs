//! Accessibility settings view

use crate::state::{AppState, VoiceSpeed};
use crate::ui::theme::Theme;
use egui::{RichText, Sense, Vec2};

pub struct SettingsPanel<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> SettingsPanel<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let theme = self.theme;
        let settings = self.state.settings;

        ui.vertical_centered(|ui| {
            ui.heading("Accessibility Settings");
            ui.label(
                RichText::new("Customize your experience for optimal accessibility and comfort")
                    .color(theme.text_secondary),
            );
        });
        ui.add_space(theme.spacing);

        section(ui, theme, "Visual Settings", |ui| {
            let label = if settings.high_contrast {
                "High contrast enabled"
            } else {
                "High contrast disabled"
            };
            setting_row(ui, theme, "High Contrast Mode", "Improve visibility with enhanced color contrast");
            if toggle_switch(ui, theme, settings.high_contrast, true, label).clicked() {
                self.state.set_high_contrast(!settings.high_contrast);
            }
        });

        section(ui, theme, "Audio Settings", |ui| {
            let label = if settings.sound_enabled {
                "Sound enabled"
            } else {
                "Sound disabled"
            };
            setting_row(ui, theme, "Voice Feedback", "Enable or disable all voice announcements");
            if toggle_switch(ui, theme, settings.sound_enabled, true, label).clicked() {
                self.state.set_sound_enabled(!settings.sound_enabled);
            }

            ui.add_space(theme.spacing_sm);
            setting_row(ui, theme, "Voice Speed", "Adjust how fast the voice speaks");
            ui.add_enabled_ui(settings.sound_enabled, |ui| {
                ui.horizontal(|ui| {
                    for speed in VoiceSpeed::ALL {
                        let selected = settings.voice_speed == speed;
                        if ui.selectable_label(selected, speed.caption()).clicked() && !selected {
                            self.state.set_voice_speed(speed);
                        }
                    }
                });
                if ui
                    .add(egui::Button::new("Test Voice").rounding(theme.button_rounding))
                    .clicked()
                {
                    self.state.test_voice();
                }
            });
        });

        // Not wired to anything yet
        section(ui, theme, "Navigation Preferences", |ui| {
            ui.add_enabled_ui(false, |ui| {
                setting_row(ui, theme, "Detailed Directions", "Include additional landmarks and details");
                setting_row(ui, theme, "Safety Warnings", "Alert about potential obstacles and hazards");
            });
        });

        section(ui, theme, "Emergency Settings", |ui| {
            ui.add_enabled_ui(false, |ui| {
                setting_row(ui, theme, "Emergency Contact", "Set up emergency contact information");
                setting_row(ui, theme, "Location Sharing", "Share location during emergency calls");
            });
        });

        theme.card().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("Keyboard Shortcuts:").strong());
            for line in [
                "Ctrl + Space: Start voice command",
                "Ctrl + H: Go to home screen",
                "Ctrl + C: Open camera view",
            ] {
                ui.label(RichText::new(line).color(theme.text_secondary));
            }
        });
    }
}

fn section(ui: &mut egui::Ui, theme: &Theme, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    theme.card().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(title).size(18.0).strong());
        ui.add_space(theme.spacing_sm);
        add_contents(ui);
    });
    ui.add_space(theme.spacing);
}

fn setting_row(ui: &mut egui::Ui, theme: &Theme, title: &str, description: &str) {
    ui.label(RichText::new(title).strong());
    ui.label(RichText::new(description).small().color(theme.text_muted));
}

/// iOS-style switch
fn toggle_switch(ui: &mut egui::Ui, theme: &Theme, on: bool, enabled: bool, label: &str) -> egui::Response {
    let size = Vec2::new(48.0, 24.0);
    let sense = if enabled { Sense::click() } else { Sense::hover() };
    let (rect, response) = ui.allocate_exact_size(size, sense);
    response.widget_info(|| egui::WidgetInfo::selected(egui::WidgetType::Checkbox, enabled, on, label));

    if ui.is_rect_visible(rect) {
        let how_on = ui.ctx().animate_bool_responsive(response.id, on);
        let radius = rect.height() / 2.0;
        let fill = if on { theme.success } else { theme.bg_tertiary };
        ui.painter().rect_filled(rect, radius, fill);
        let x = egui::lerp((rect.left() + radius)..=(rect.right() - radius), how_on);
        ui.painter()
            .circle_filled(egui::pos2(x, rect.center().y), radius - 2.0, egui::Color32::WHITE);
    }

    response
}
