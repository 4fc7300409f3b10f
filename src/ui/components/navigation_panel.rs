//! Indoor navigation view

use crate::sim::navigation::ROOMS;
use crate::state::AppState;
use crate::ui::theme::Theme;
use egui::{RichText, Vec2};

pub struct NavigationView<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> NavigationView<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let theme = self.theme;
        let mapped = self.state.environment_mapped;
        let (panel, ctx) = self.state.panel_with_context();
        let Some(nav) = panel.navigation_mut() else {
            return;
        };

        ui.vertical_centered(|ui| {
            ui.heading("Indoor Navigation");
            ui.label(
                RichText::new("Voice-guided navigation to help you move safely through your space")
                    .color(theme.text_secondary),
            );
            if !mapped {
                ui.label(
                    RichText::new("Tip: scan your environment first for more accurate guidance")
                        .small()
                        .color(theme.warning),
                );
            }
        });
        ui.add_space(theme.spacing);

        if let Some(session) = nav.session().filter(|s| s.is_active()) {
            let room = session.room();
            let step = session.current_step();
            let progress = session.progress();
            let mut stop = false;

            theme.card().fill(theme.success.gamma_multiply(0.15)).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new(format!("Navigating to {}", room.name))
                            .size(20.0)
                            .strong(),
                    );
                });
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Progress").color(theme.text_secondary));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(format!("{} / {} steps", step, room.steps));
                    });
                });
                ui.add(
                    egui::ProgressBar::new(progress)
                        .fill(theme.success)
                        .desired_height(12.0),
                );
                ui.add_space(theme.spacing_sm);
                let button = egui::Button::new(RichText::new("Stop Navigation").strong())
                    .fill(theme.error)
                    .rounding(theme.button_rounding)
                    .min_size(Vec2::new(ui.available_width(), 40.0));
                if ui.add(button).clicked() {
                    stop = true;
                }
            });

            if stop {
                nav.stop(ctx.speech);
            }
        } else {
            let mut chosen = None;
            egui::Grid::new("nav_rooms")
                .num_columns(2)
                .spacing(Vec2::splat(theme.spacing))
                .show(ui, |ui| {
                    for (i, room) in ROOMS.iter().enumerate() {
                        theme.card().show(ui, |ui| {
                            ui.set_min_width(260.0);
                            let button = egui::Button::new(
                                RichText::new(room.name).size(18.0).strong(),
                            )
                            .rounding(theme.button_rounding);
                            if ui.add(button).clicked() {
                                chosen = Some(room.id);
                            }
                            ui.label(
                                RichText::new(format!(
                                    "{} {}",
                                    room.heading().arrow(),
                                    room.direction
                                ))
                                .color(theme.text_secondary),
                            );
                            ui.label(
                                RichText::new(format!(
                                    "{} steps • Landmarks: {}",
                                    room.steps,
                                    room.landmarks.join(", ")
                                ))
                                .small()
                                .color(theme.text_muted),
                            );
                        });
                        if i % 2 == 1 {
                            ui.end_row();
                        }
                    }
                });

            if let Some(room_id) = chosen {
                nav.start(room_id, ctx.speech);
            }
        }

        if !nav.instructions().is_empty() {
            ui.add_space(theme.spacing);
            theme.card().show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new("Instructions").strong());
                for (i, line) in nav.instructions().iter().enumerate() {
                    ui.label(format!("{}. {}", i + 1, line));
                }
            });
        }

        ui.add_space(theme.spacing);
        theme.card().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("Voice Commands").strong());
            for line in [
                "\"Take me to the kitchen\" - Start navigation",
                "\"Where am I?\" - Describe your location",
                "\"What's in front of me?\" - Identify obstacles",
            ] {
                ui.label(RichText::new(line).color(theme.text_secondary));
            }
        });
    }
}
