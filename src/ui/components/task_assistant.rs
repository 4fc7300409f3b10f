//! Kitchen task assistant view
//!
//! Shows either the active cooking session or the ingredient scan and recipe
//! suggestions.

use crate::panels::TasksPanel;
use crate::sim::recipes::{CookingSession, RECIPES};
use crate::speech::SpeechOutput;
use crate::state::AppState;
use crate::ui::theme::Theme;
use egui::{RichText, Vec2};

pub struct TaskAssistant<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

/// Button pressed during this frame
enum TaskAction {
    Next,
    Repeat,
    Stop,
    Scan,
    Suggest,
    Cook(&'static str),
    Find(String),
}

impl<'a> TaskAssistant<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let theme = self.theme;
        let (panel, ctx) = self.state.panel_with_context();
        let Some(tasks) = panel.tasks_mut() else {
            return;
        };

        ui.vertical_centered(|ui| {
            ui.heading("Kitchen Assistant");
            ui.label(
                RichText::new(
                    "Cooking guidance with ingredient recognition and step-by-step instructions",
                )
                .color(theme.text_secondary),
            );
        });
        ui.add_space(theme.spacing);

        let action = match tasks.session() {
            Some(session) => show_session(ui, theme, session),
            None => show_kitchen(ui, theme, tasks),
        };

        if let Some(action) = action {
            apply(tasks, action, ctx.speech);
        }

        ui.add_space(theme.spacing);
        theme.card().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("Kitchen Voice Commands:").strong());
            for line in [
                "\"Where are the tomatoes?\" - Find an ingredient",
                "\"What can I make?\" - Recipe suggestions",
                "\"Next step\" / \"Repeat step\" - Follow a recipe",
            ] {
                ui.label(RichText::new(line).color(theme.text_secondary));
            }
        });
    }
}

fn apply(tasks: &mut TasksPanel, action: TaskAction, speech: &mut SpeechOutput) {
    match action {
        TaskAction::Next => tasks.next_step(speech),
        TaskAction::Repeat => tasks.repeat_step(speech),
        TaskAction::Stop => tasks.stop_cooking(speech),
        TaskAction::Scan => tasks.scan_ingredients(speech),
        TaskAction::Suggest => tasks.suggest_recipes(speech),
        TaskAction::Cook(recipe_id) => {
            tasks.start_cooking(recipe_id, speech);
        }
        TaskAction::Find(name) => tasks.find_ingredient(&name, speech),
    }
}

fn show_session(ui: &mut egui::Ui, theme: &Theme, session: &CookingSession) -> Option<TaskAction> {
    let recipe = session.recipe();
    let step = session.current_step();
    let total = recipe.steps.len();
    let mut action = None;

    theme.card().fill(theme.success.gamma_multiply(0.15)).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(recipe.name).size(22.0).strong());
            ui.label(
                RichText::new(format!("⏱ {}   ⚠ {}", recipe.time, recipe.difficulty))
                    .color(theme.text_secondary),
            );
        });

        ui.add_space(theme.spacing_sm);
        ui.horizontal(|ui| {
            ui.label(RichText::new("Progress").strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("{} / {}", step + 1, total));
            });
        });
        ui.add(
            egui::ProgressBar::new((step + 1) as f32 / total as f32)
                .fill(theme.success)
                .desired_height(8.0),
        );

        ui.add_space(theme.spacing_sm);
        egui::Frame::none()
            .fill(theme.bg_tertiary)
            .rounding(theme.button_rounding)
            .inner_margin(theme.spacing)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(format!("Step {}:", step + 1)).strong());
                ui.label(RichText::new(recipe.steps[step]).size(17.0));
            });

        ui.add_space(theme.spacing_sm);
        ui.horizontal_wrapped(|ui| {
            let next_label = if session.is_last_step() {
                "Finish Cooking"
            } else {
                "Next Step"
            };
            if ui
                .add(
                    egui::Button::new(next_label)
                        .fill(theme.success.gamma_multiply(0.8))
                        .rounding(theme.button_rounding),
                )
                .clicked()
            {
                action = Some(TaskAction::Next);
            }
            if ui
                .add(
                    egui::Button::new("Repeat Step")
                        .fill(theme.primary)
                        .rounding(theme.button_rounding),
                )
                .clicked()
            {
                action = Some(TaskAction::Repeat);
            }
            if ui
                .add(
                    egui::Button::new("Stop Cooking")
                        .fill(theme.error)
                        .rounding(theme.button_rounding),
                )
                .clicked()
            {
                action = Some(TaskAction::Stop);
            }
        });
    });

    action
}

fn show_kitchen(ui: &mut egui::Ui, theme: &Theme, tasks: &TasksPanel) -> Option<TaskAction> {
    let mut action = None;

    theme.card().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new("Detected Ingredients").size(18.0).strong());
        ui.add_space(theme.spacing_sm);

        egui::Grid::new("ingredients")
            .num_columns(3)
            .spacing(Vec2::splat(theme.spacing_sm))
            .show(ui, |ui| {
                for (i, ingredient) in tasks.ingredients().iter().enumerate() {
                    ui.vertical(|ui| {
                        ui.horizontal(|ui| {
                            let button = egui::Button::new(RichText::new(&ingredient.name).strong())
                                .rounding(theme.button_rounding);
                            if ui.add(button).on_hover_text("Where is it?").clicked() {
                                action = Some(TaskAction::Find(ingredient.name.clone()));
                            }
                            ui.label(
                                RichText::new(format!("{}%", ingredient.confidence_percent()))
                                    .small()
                                    .color(theme.confidence(ingredient.band())),
                            );
                        });
                        ui.label(
                            RichText::new(&ingredient.location)
                                .small()
                                .color(theme.text_muted),
                        );
                    });
                    if i % 3 == 2 {
                        ui.end_row();
                    }
                }
            });

        ui.add_space(theme.spacing_sm);
        let label = if tasks.is_scanning() {
            "Scanning kitchen..."
        } else {
            "Scan for More Ingredients"
        };
        let scan = egui::Button::new(label)
            .fill(theme.primary)
            .rounding(theme.button_rounding)
            .min_size(Vec2::new(ui.available_width(), 36.0));
        if ui.add_enabled(!tasks.is_scanning(), scan).clicked() {
            action = Some(TaskAction::Scan);
        }
    });

    ui.add_space(theme.spacing);

    theme.card().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new("Suggested Recipes").size(18.0).strong());
        ui.add_space(theme.spacing_sm);

        ui.horizontal_wrapped(|ui| {
            for recipe in RECIPES.iter() {
                egui::Frame::none()
                    .fill(theme.bg_tertiary)
                    .rounding(theme.button_rounding)
                    .inner_margin(theme.spacing_sm)
                    .show(ui, |ui| {
                        ui.set_width(220.0);
                        ui.label(RichText::new(recipe.name).strong());
                        ui.label(
                            RichText::new(format!("⏱ {}", recipe.time))
                                .small()
                                .color(theme.text_secondary),
                        );
                        ui.label(
                            RichText::new(format!("⚠ {}", recipe.difficulty))
                                .small()
                                .color(theme.text_secondary),
                        );
                        ui.label(
                            RichText::new("Ingredients needed:")
                                .small()
                                .color(theme.text_muted),
                        );
                        ui.label(RichText::new(recipe.ingredients.join(", ")).small());
                        let cook = egui::Button::new("Start Cooking")
                            .fill(theme.success.gamma_multiply(0.8))
                            .rounding(theme.button_rounding)
                            .min_size(Vec2::new(ui.available_width(), 30.0));
                        if ui.add(cook).clicked() {
                            action = Some(TaskAction::Cook(recipe.id));
                        }
                    });
            }
        });

        ui.add_space(theme.spacing_sm);
        let suggest = egui::Button::new("Get Recipe Suggestions")
            .fill(theme.secondary.gamma_multiply(0.8))
            .rounding(theme.button_rounding)
            .min_size(Vec2::new(ui.available_width(), 36.0));
        if ui.add(suggest).clicked() {
            action = Some(TaskAction::Suggest);
        }
    });

    action
}
