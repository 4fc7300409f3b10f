//! Cooking task assistant panel

use crate::sim::recipes::{
    self, CookingSession, DetectedIngredient, Recipe, StepOutcome, INGREDIENT_SCAN_DELAY,
};
use crate::sim::timer::Countdown;
use crate::speech::{Priority, SpeechOutput};
use std::time::Duration;
use tracing::debug;

#[derive(Debug)]
pub struct TasksPanel {
    ingredients: Vec<DetectedIngredient>,
    session: Option<CookingSession>,
    pending_scan: Option<Countdown>,
}

impl Default for TasksPanel {
    fn default() -> Self {
        Self {
            ingredients: recipes::default_ingredients(),
            session: None,
            pending_scan: None,
        }
    }
}

impl TasksPanel {
    pub fn ingredients(&self) -> &[DetectedIngredient] {
        &self.ingredients
    }

    pub fn session(&self) -> Option<&CookingSession> {
        self.session.as_ref()
    }

    pub fn is_scanning(&self) -> bool {
        self.pending_scan.is_some()
    }

    /// Zero-based step of the active recipe
    pub fn current_step(&self) -> Option<usize> {
        self.session.as_ref().map(CookingSession::current_step)
    }

    pub fn scan_ingredients(&mut self, speech: &mut SpeechOutput) {
        speech.speak("Scanning kitchen for available ingredients...", Priority::Normal);
        self.pending_scan = Some(Countdown::new(INGREDIENT_SCAN_DELAY));
    }

    pub fn suggest_recipes(&self, speech: &mut SpeechOutput) {
        speech.speak(
            recipes::suggestion_announcement(&self.ingredients),
            Priority::Normal,
        );
    }

    /// Recipes the current ingredients allow
    pub fn available_recipes(&self) -> Vec<&'static Recipe> {
        recipes::suggest_recipes(&self.ingredients)
    }

    pub fn start_cooking(&mut self, recipe_id: &str, speech: &mut SpeechOutput) -> bool {
        let Some(recipe) = recipes::find_recipe(recipe_id) else {
            debug!("[TASKS] Unknown recipe {}", recipe_id);
            return false;
        };
        let session = CookingSession::start(recipe);
        speech.speak(session.start_announcement(), Priority::Normal);
        self.session = Some(session);
        true
    }

    pub fn next_step(&mut self, speech: &mut SpeechOutput) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.next_step() {
            StepOutcome::Step(text) => speech.speak(text, Priority::Normal),
            StepOutcome::Finished(text) => {
                speech.speak(text, Priority::Normal);
                self.session = None;
            }
        }
    }

    pub fn repeat_step(&self, speech: &mut SpeechOutput) {
        if let Some(session) = &self.session {
            speech.speak(session.repeat_step(), Priority::Normal);
        }
    }

    pub fn stop_cooking(&mut self, speech: &mut SpeechOutput) {
        self.session = None;
        speech.speak("Cooking session ended.", Priority::Normal);
    }

    pub fn find_ingredient(&self, name: &str, speech: &mut SpeechOutput) {
        speech.speak(
            recipes::locate_ingredient(&self.ingredients, name),
            Priority::Normal,
        );
    }

    pub fn advance(&mut self, dt: Duration, speech: &mut SpeechOutput) {
        let Some(countdown) = self.pending_scan.as_mut() else {
            return;
        };
        if countdown.advance(dt) {
            self.pending_scan = None;
            speech.speak(recipes::scan_report(&self.ingredients), Priority::Normal);
        }
    }
}
