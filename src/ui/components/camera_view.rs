//! Environment vision view
//!
//! Simulated camera feed with detection overlays, the scan controls and the
//! detected object list.

use crate::panels::{CameraPanel, PanelContext};
use crate::sim::{DetectedObject, Direction};
use crate::state::AppState;
use crate::ui::theme::Theme;
use egui::{Align2, Color32, FontId, Rect, RichText, Sense, Stroke, Vec2};

pub struct CameraView<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> CameraView<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let theme = self.theme;
        let (panel, mut ctx) = self.state.panel_with_context();
        let Some(camera) = panel.camera_mut() else {
            return;
        };

        ui.vertical_centered(|ui| {
            ui.heading("Environment Vision");
            ui.label(
                RichText::new("Use your camera to scan and understand your surroundings")
                    .color(theme.text_secondary),
            );
        });
        ui.add_space(theme.spacing);

        show_feed(ui, theme, camera, &mut ctx);
        ui.add_space(theme.spacing);
        show_controls(ui, theme, camera, &mut ctx);
        ui.add_space(theme.spacing);

        ObjectList::new(camera.objects(), theme).show(ui, |index| {
            camera.announce_object(index, ctx.speech);
        });

        ui.add_space(theme.spacing);
        theme.card().show(ui, |ui| {
            ui.label(RichText::new("How to Use:").strong());
            for line in [
                "Click \"Scan Environment\" to map your surroundings",
                "Move your device slowly for best results",
                "Use \"Describe Scene\" to hear about what's in front of you",
                "Objects will be announced with distance and direction",
            ] {
                ui.label(RichText::new(format!("• {line}")).color(theme.text_secondary));
            }
        });
    }
}

fn show_feed(ui: &mut egui::Ui, theme: &Theme, camera: &mut CameraPanel, ctx: &mut PanelContext<'_>) {
    let width = ui.available_width().min(640.0);
    let size = Vec2::new(width, width * 9.0 / 16.0);

    ui.vertical_centered(|ui| {
        if let Some(error) = camera.error().map(str::to_owned) {
            egui::Frame::none()
                .fill(Color32::BLACK)
                .rounding(theme.card_rounding)
                .inner_margin(theme.spacing_lg)
                .show(ui, |ui| {
                    ui.set_min_size(size - Vec2::splat(2.0 * theme.spacing_lg));
                    ui.vertical_centered(|ui| {
                        ui.add_space(theme.spacing_lg);
                        ui.label(RichText::new("⚠").size(40.0).color(theme.error));
                        ui.label(RichText::new(error).strong().color(theme.error));
                        ui.add_space(theme.spacing_sm);
                        let retry = egui::Button::new("Retry Camera Access")
                            .fill(theme.primary)
                            .rounding(theme.button_rounding);
                        if ui.add(retry).clicked() {
                            camera.retry(ctx.speech);
                        }
                    });
                });
            return;
        }

        let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
        if !ui.is_rect_visible(rect) {
            return;
        }
        let painter = ui.painter_at(rect);
        paint_feed(&painter, rect, theme);

        for (index, object) in camera.objects().iter().enumerate() {
            paint_overlay(&painter, rect, theme, index, object);
        }

        if let Some(progress) = camera.scan_progress() {
            painter.rect_filled(rect, 0.0, theme.primary.gamma_multiply(0.2));
            let bar = Rect::from_center_size(rect.center(), Vec2::new(rect.width() * 0.5, 8.0));
            painter.rect_filled(bar, 4.0, Color32::from_white_alpha(50));
            let mut fill = bar;
            fill.set_width(bar.width() * f32::from(progress) / 100.0);
            painter.rect_filled(fill, 4.0, theme.primary);
            painter.text(
                bar.center_bottom() + Vec2::new(0.0, 16.0),
                Align2::CENTER_TOP,
                format!("Scanning... {progress}%"),
                FontId::proportional(16.0),
                Color32::WHITE,
            );
        }
    });
}

/// Stand-in for the video element
fn paint_feed(painter: &egui::Painter, rect: Rect, theme: &Theme) {
    painter.rect_filled(rect, theme.card_rounding, Color32::from_rgb(12, 12, 16));

    let grid = Stroke::new(1.0, Color32::from_white_alpha(12));
    let mut x = rect.left();
    while x < rect.right() {
        painter.vline(x, rect.y_range(), grid);
        x += 32.0;
    }
    let mut y = rect.top();
    while y < rect.bottom() {
        painter.hline(rect.x_range(), y, grid);
        y += 32.0;
    }

    // Horizon
    painter.hline(
        rect.x_range(),
        rect.center().y + rect.height() * 0.15,
        Stroke::new(1.0, Color32::from_white_alpha(30)),
    );
}

fn paint_overlay(
    painter: &egui::Painter,
    rect: Rect,
    theme: &Theme,
    index: usize,
    object: &DetectedObject,
) {
    let left = match object.direction {
        Direction::Left => 0.10,
        Direction::Right => 0.70,
        Direction::Center => 0.40,
    };
    let top = 0.20 + index as f32 * 0.15;
    let pos = rect.left_top() + Vec2::new(rect.width() * left, rect.height() * top);

    let text = format!("{} ({})", object.name, object.distance);
    let galley = painter.layout_no_wrap(text, FontId::proportional(14.0), Color32::WHITE);
    let bg = Rect::from_min_size(pos, galley.size() + Vec2::new(12.0, 6.0));
    painter.rect_filled(bg, 6.0, theme.success.gamma_multiply(0.8));
    painter.galley(pos + Vec2::new(6.0, 3.0), galley, Color32::WHITE);
}

fn show_controls(
    ui: &mut egui::Ui,
    theme: &Theme,
    camera: &mut CameraPanel,
    ctx: &mut PanelContext<'_>,
) {
    let enabled = camera.controls_enabled();

    ui.horizontal_wrapped(|ui| {
        let scan_label = if camera.is_scanning() {
            "Scanning..."
        } else {
            "Scan Environment"
        };
        let scan = egui::Button::new(scan_label)
            .fill(theme.primary)
            .rounding(theme.button_rounding);
        if ui.add_enabled(camera.can_scan(), scan).clicked() {
            camera.start_scan(ctx.speech);
        }

        let describe = egui::Button::new("Describe Scene")
            .fill(theme.success.gamma_multiply(0.8))
            .rounding(theme.button_rounding);
        if ui.add_enabled(enabled, describe).clicked() {
            camera.describe_scene(ctx.speech);
        }

        let detect = egui::Button::new("Detect Objects")
            .fill(theme.secondary.gamma_multiply(0.8))
            .rounding(theme.button_rounding);
        if ui.add_enabled(enabled, detect).clicked() {
            camera.detect_objects(ctx);
        }
    });
}

/// Clickable list of detections; a click reads the object out
pub struct ObjectList<'a> {
    objects: &'a [DetectedObject],
    theme: &'a Theme,
}

impl<'a> ObjectList<'a> {
    pub fn new(objects: &'a [DetectedObject], theme: &'a Theme) -> Self {
        Self { objects, theme }
    }

    pub fn show(self, ui: &mut egui::Ui, mut on_select: impl FnMut(usize)) {
        let theme = self.theme;
        let mut selected = None;

        theme.card().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new("Detected Objects").size(18.0).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(format!("{} objects in view", self.objects.len()))
                            .small()
                            .color(theme.text_muted),
                    );
                });
            });

            if self.objects.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("No objects currently detected").color(theme.text_muted));
                    ui.label(
                        RichText::new("Start scanning to identify objects in your environment")
                            .small()
                            .color(theme.text_muted),
                    );
                });
                return;
            }

            for (index, object) in self.objects.iter().enumerate() {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(object.direction.arrow()).size(22.0));
                    let button = egui::Button::new(RichText::new(&object.name).strong())
                        .rounding(theme.button_rounding);
                    if ui
                        .add(button)
                        .on_hover_text("Announce details")
                        .clicked()
                    {
                        selected = Some(index);
                    }
                    ui.label(
                        RichText::new(format!("{} • {}", object.distance, object.direction))
                            .color(theme.text_secondary),
                    );
                    ui.label(
                        RichText::new(format!("{}%", object.confidence_percent()))
                            .color(theme.confidence(object.confidence_level())),
                    );
                });
            }

            ui.label(
                RichText::new(
                    "Tip: Click on any object to hear its details announced aloud. \
                     Objects with high confidence (green) are more reliably identified.",
                )
                .small()
                .color(theme.text_secondary),
            );
        });

        if let Some(index) = selected {
            on_select(index);
        }
    }
}
