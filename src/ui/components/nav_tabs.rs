//! Tab bar for the top-level views

use crate::state::{AppState, View};
use crate::ui::theme::Theme;
use egui::{RichText, Vec2};

pub struct NavTabs<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> NavTabs<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let current = self.state.view();
        let mut pressed = None;

        ui.horizontal_wrapped(|ui| {
            for view in View::TABS {
                let selected = view == current;
                let (fill, text) = if selected {
                    (self.theme.primary, self.theme.text_primary)
                } else {
                    (self.theme.bg_tertiary, self.theme.text_secondary)
                };

                let button = egui::Button::new(RichText::new(view.label()).color(text))
                    .fill(fill)
                    .min_size(Vec2::new(96.0, 40.0))
                    .rounding(self.theme.button_rounding)
                    .selected(selected);

                if ui.add(button).clicked() {
                    pressed = Some(view);
                }
            }
        });

        if let Some(view) = pressed {
            self.state.select_tab(view);
        }
    }
}
