//! Interactive environment map
//!
//! Paints the 500×400 floor plan scaled into the available width. Rooms are
//! clickable; the selected room gets a dashed path from the user's dot.

use crate::panels::MapPanel;
use crate::sim::map::{MapPoint, MapRoom, MAP_HEIGHT, MAP_ROOMS, MAP_WIDTH};
use crate::state::AppState;
use crate::ui::theme::Theme;
use egui::{Align2, Color32, FontId, Pos2, Rect, RichText, Sense, Shape, Stroke, Vec2};

pub struct EnvironmentMap<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> EnvironmentMap<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let theme = self.theme;
        let (panel, ctx) = self.state.panel_with_context();
        let Some(map) = panel.map_mut() else {
            return;
        };

        ui.vertical_centered(|ui| {
            ui.heading("Interactive Environment Map");
            ui.label(
                RichText::new("Explore your space and get directions to any room")
                    .color(theme.text_secondary),
            );
        });
        ui.add_space(theme.spacing);

        let mut clicked = paint_plan(ui, theme, map);

        ui.add_space(theme.spacing);
        egui::Grid::new("map_rooms")
            .num_columns(3)
            .spacing(Vec2::splat(theme.spacing_sm))
            .show(ui, |ui| {
                for (i, room) in MAP_ROOMS.iter().enumerate() {
                    let selected = map.selected().is_some_and(|s| s.id == room.id);
                    ui.vertical(|ui| {
                        let fill = if selected {
                            theme.primary.gamma_multiply(0.4)
                        } else {
                            theme.bg_tertiary
                        };
                        let button = egui::Button::new(RichText::new(room.name).strong())
                            .fill(fill)
                            .rounding(theme.button_rounding)
                            .min_size(Vec2::new(140.0, 32.0));
                        if ui.add(button).clicked() {
                            clicked = Some(room.id);
                        }
                        ui.label(
                            RichText::new(format!("{}×{} area", room.width, room.height))
                                .small()
                                .color(theme.text_muted),
                        );
                    });
                    if i % 3 == 2 {
                        ui.end_row();
                    }
                }
            });

        if let Some(room_id) = clicked {
            map.select_room(room_id, ctx.speech);
        }

        ui.add_space(theme.spacing);
        ui.horizontal_wrapped(|ui| {
            let where_am_i = egui::Button::new("Where Am I?")
                .fill(theme.primary)
                .rounding(theme.button_rounding);
            if ui.add(where_am_i).clicked() {
                map.where_am_i(ctx.speech);
            }

            if map.selected().is_some() {
                let directions = egui::Button::new("Get Directions")
                    .fill(theme.success.gamma_multiply(0.8))
                    .rounding(theme.button_rounding);
                if ui.add(directions).clicked() {
                    map.get_directions(ctx.speech);
                }
            }
        });

        ui.add_space(theme.spacing);
        theme.card().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("Map Legend").strong());
            legend_row(ui, theme.error, "Your current position");
            legend_row(ui, theme.map_room, "Rooms and spaces");
            legend_row(ui, theme.map_selected, "Suggested path");
            legend_row(ui, theme.primary, "Selected destination");
        });
    }
}

/// Draw the floor plan; returns the id of a room clicked on the plan
fn paint_plan(ui: &mut egui::Ui, theme: &Theme, map: &MapPanel) -> Option<&'static str> {
    let width = ui.available_width().min(700.0);
    let scale = width / MAP_WIDTH;
    let size = Vec2::new(width, MAP_HEIGHT * scale);
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());

    let to_screen = |p: MapPoint| Pos2::new(rect.left() + p.x * scale, rect.top() + p.y * scale);
    let room_rect = |room: &MapRoom| {
        Rect::from_min_size(
            to_screen(MapPoint { x: room.x, y: room.y }),
            Vec2::new(room.width * scale, room.height * scale),
        )
    };

    if ui.is_rect_visible(rect) {
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, theme.card_rounding, theme.bg_secondary);

        let grid = Stroke::new(1.0, theme.text_muted.gamma_multiply(0.15));
        let step = 20.0 * scale;
        let mut x = rect.left();
        while x < rect.right() {
            painter.vline(x, rect.y_range(), grid);
            x += step;
        }
        let mut y = rect.top();
        while y < rect.bottom() {
            painter.hline(rect.x_range(), y, grid);
            y += step;
        }

        let selected = map.selected();
        for room in MAP_ROOMS.iter() {
            let r = room_rect(room);
            let is_selected = selected.is_some_and(|s| s.id == room.id);
            let stroke = if is_selected {
                Stroke::new(3.0, theme.primary)
            } else {
                Stroke::new(2.0, theme.text_muted.gamma_multiply(0.6))
            };
            painter.rect(r, 6.0, theme.map_room, stroke);
            painter.text(
                r.center(),
                Align2::CENTER_CENTER,
                room.name,
                FontId::proportional(12.0),
                theme.text_primary,
            );
        }

        let user = to_screen(map.user_position());
        if let Some(target) = selected {
            let end = to_screen(target.center());
            let dashes = Shape::dashed_line(
                &[user, end],
                Stroke::new(2.0, theme.map_selected),
                5.0,
                5.0,
            );
            painter.extend(dashes);
        }

        painter.circle(user, 8.0, theme.error, Stroke::new(2.0, Color32::WHITE));
    }

    if !response.clicked() {
        return None;
    }
    let pos = response.interact_pointer_pos()?;
    MAP_ROOMS
        .iter()
        .find(|room| room_rect(*room).contains(pos))
        .map(|room| room.id)
}

fn legend_row(ui: &mut egui::Ui, color: Color32, text: &str) {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(Vec2::splat(14.0), Sense::hover());
        ui.painter().rect_filled(rect, 3.0, color);
        ui.label(text);
    });
}
