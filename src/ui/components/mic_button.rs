//! Microphone button component
//!
//! The large round control that starts a single voice command.

use crate::state::AppState;
use crate::ui::theme::Theme;
use egui::{Color32, Rect, RichText, Sense, Vec2};

const RADIUS: f32 = 44.0;

/// Microphone control with the last heard command below it
pub struct MicButton<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> MicButton<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    /// Accessible name for the current state
    pub fn label(state: &AppState) -> &'static str {
        if state.listener.is_listening() {
            "Listening..."
        } else {
            "Start voice command"
        }
    }

    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        let enabled = self.state.can_listen();
        let listening = self.state.listener.is_listening();
        let label = Self::label(self.state);

        let response = ui
            .vertical_centered(|ui| {
                let size = Vec2::splat(RADIUS * 2.0 + 24.0);
                let sense = if enabled { Sense::click() } else { Sense::hover() };
                let (rect, response) = ui.allocate_exact_size(size, sense);
                response.widget_info(|| {
                    egui::WidgetInfo::labeled(egui::WidgetType::Button, enabled, label)
                });

                if ui.is_rect_visible(rect) {
                    self.paint(ui, rect, &response, enabled, listening);
                }

                let hint = if listening {
                    "Say a command now"
                } else if enabled {
                    "Tap the microphone or press Ctrl+Space"
                } else {
                    "Please wait..."
                };
                ui.label(RichText::new(hint).color(self.theme.text_secondary));

                if let Some(command) = &self.state.last_command {
                    ui.label(
                        RichText::new(format!("Last command: \"{}\"", command))
                            .small()
                            .color(self.theme.text_muted),
                    );
                }

                response
            })
            .inner;

        if response.clicked() {
            self.state.start_listening();
        }
        response
    }

    fn paint(
        &self,
        ui: &egui::Ui,
        rect: Rect,
        response: &egui::Response,
        enabled: bool,
        listening: bool,
    ) {
        let painter = ui.painter();
        let center = rect.center();

        let bg_color = if listening {
            self.theme.listening
        } else if !enabled {
            self.theme.bg_tertiary
        } else if response.hovered() {
            self.theme.primary.gamma_multiply(1.2)
        } else {
            self.theme.primary
        };

        painter.circle_filled(center, RADIUS, bg_color);

        if response.hovered() && enabled {
            painter.circle_stroke(
                center,
                RADIUS + 1.0,
                egui::Stroke::new(2.0, self.theme.primary.gamma_multiply(0.6)),
            );
        }

        let icon_color = if enabled || listening {
            Color32::WHITE
        } else {
            self.theme.text_muted
        };
        draw_mic_icon(painter, center, icon_color);

        if listening {
            self.draw_pulsing_ring(ui, painter, center);
        }
    }

    fn draw_pulsing_ring(&self, ui: &egui::Ui, painter: &egui::Painter, center: egui::Pos2) {
        let t = ui.ctx().input(|i| i.time);
        let pulse = ((t * 3.0).sin() * 0.5 + 0.5) as f32;

        let radius = RADIUS + 2.0 + pulse * 8.0;
        let alpha = (1.0 - pulse) * 0.6;
        painter.circle_stroke(
            center,
            radius,
            egui::Stroke::new(2.0 + pulse * 2.0, self.theme.listening.gamma_multiply(alpha)),
        );

        ui.ctx().request_repaint();
    }
}

/// Microphone glyph drawn from primitives
fn draw_mic_icon(painter: &egui::Painter, center: egui::Pos2, color: Color32) {
    let stroke = egui::Stroke::new(3.0, color);

    let mic_rect = Rect::from_center_size(
        egui::pos2(center.x, center.y - 6.0),
        Vec2::new(14.0, 24.0),
    );
    painter.rect_filled(mic_rect, 7.0, color);

    // Stand arc
    let arc_center = egui::pos2(center.x, center.y + 2.0);
    let arc_radius = 14.0;
    let segments = 10;
    for i in 0..segments {
        let a0 = std::f32::consts::PI * (i as f32 / segments as f32);
        let a1 = std::f32::consts::PI * ((i + 1) as f32 / segments as f32);
        painter.line_segment(
            [
                egui::pos2(arc_center.x - arc_radius * a0.cos(), arc_center.y + arc_radius * a0.sin()),
                egui::pos2(arc_center.x - arc_radius * a1.cos(), arc_center.y + arc_radius * a1.sin()),
            ],
            stroke,
        );
    }

    let stem_top = arc_center.y + arc_radius;
    painter.line_segment(
        [egui::pos2(center.x, stem_top), egui::pos2(center.x, stem_top + 6.0)],
        stroke,
    );
    painter.line_segment(
        [
            egui::pos2(center.x - 8.0, stem_top + 6.0),
            egui::pos2(center.x + 8.0, stem_top + 6.0),
        ],
        stroke,
    );
}
