//! Kitchen assistant: ingredient lookup, recipe matching and step-by-step cooking

use crate::sim::detection::ConfidenceLevel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Ingredients count as available above this confidence
pub const AVAILABLE_THRESHOLD: f32 = 0.7;

/// Ingredients are read out after a scan above this confidence
pub const VISIBLE_THRESHOLD: f32 = 0.8;

/// Delay between starting an ingredient scan and reporting it
pub const INGREDIENT_SCAN_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipe {
    pub id: &'static str,
    pub name: &'static str,
    pub ingredients: &'static [&'static str],
    pub steps: &'static [&'static str],
    pub difficulty: Difficulty,
    pub time: &'static str,
}

pub const RECIPES: [Recipe; 3] = [
    Recipe {
        id: "scrambled_eggs",
        name: "Scrambled Eggs with Vegetables",
        ingredients: &["eggs", "tomatoes", "onions", "olive oil"],
        steps: &[
            "Heat olive oil in a non-stick pan over medium heat",
            "Dice the onions and add to the pan, cook for 2 minutes",
            "Add diced tomatoes and cook for another 2 minutes",
            "Beat the eggs in a bowl and pour into the pan",
            "Gently scramble the eggs with the vegetables",
            "Season with salt and pepper, serve hot",
        ],
        difficulty: Difficulty::Easy,
        time: "10 minutes",
    },
    Recipe {
        id: "toast_sandwich",
        name: "Grilled Vegetable Toast",
        ingredients: &["bread", "tomatoes", "onions", "olive oil"],
        steps: &[
            "Toast the bread slices until golden brown",
            "Heat olive oil in a pan",
            "Sauté sliced onions until translucent",
            "Add sliced tomatoes and cook briefly",
            "Place the cooked vegetables on toast",
            "Drizzle with olive oil and serve",
        ],
        difficulty: Difficulty::Easy,
        time: "8 minutes",
    },
    Recipe {
        id: "simple_omelet",
        name: "Vegetable Omelet",
        ingredients: &["eggs", "tomatoes", "onions", "olive oil"],
        steps: &[
            "Beat eggs in a bowl with salt and pepper",
            "Heat olive oil in an omelet pan",
            "Sauté diced onions until soft",
            "Add diced tomatoes and cook briefly",
            "Pour beaten eggs over vegetables",
            "Fold omelet in half when eggs are set, serve immediately",
        ],
        difficulty: Difficulty::Medium,
        time: "12 minutes",
    },
];

pub fn find_recipe(id: &str) -> Option<&'static Recipe> {
    RECIPES.iter().find(|recipe| recipe.id == id)
}

/// Ingredient "recognised" on the counter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedIngredient {
    pub name: String,
    pub confidence: f32,
    pub location: String,
}

impl DetectedIngredient {
    pub fn new(name: &str, confidence: f32, location: &str) -> Self {
        Self {
            name: name.to_string(),
            confidence,
            location: location.to_string(),
        }
    }

    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }

    /// Display band: >0.9 high, >0.8 medium, otherwise low
    pub fn band(&self) -> ConfidenceLevel {
        if self.confidence > 0.9 {
            ConfidenceLevel::High
        } else if self.confidence > 0.8 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

/// Hardcoded counter contents
pub fn default_ingredients() -> Vec<DetectedIngredient> {
    vec![
        DetectedIngredient::new("tomatoes", 0.95, "counter left"),
        DetectedIngredient::new("onions", 0.88, "counter center"),
        DetectedIngredient::new("eggs", 0.92, "refrigerator"),
        DetectedIngredient::new("bread", 0.85, "counter right"),
        DetectedIngredient::new("olive oil", 0.78, "cabinet above"),
    ]
}

/// Recipes whose every ingredient appears in an available ingredient name
pub fn suggest_recipes(ingredients: &[DetectedIngredient]) -> Vec<&'static Recipe> {
    let available: Vec<String> = ingredients
        .iter()
        .filter(|ing| ing.confidence > AVAILABLE_THRESHOLD)
        .map(|ing| ing.name.to_lowercase())
        .collect();

    RECIPES
        .iter()
        .filter(|recipe| {
            recipe.ingredients.iter().all(|needed| {
                let needed = needed.to_lowercase();
                available.iter().any(|name| name.contains(&needed))
            })
        })
        .collect()
}

pub fn suggestion_announcement(ingredients: &[DetectedIngredient]) -> String {
    let recipes = suggest_recipes(ingredients);
    if recipes.is_empty() {
        return "I couldn't find complete recipes with your current ingredients. You might need to get a few more items."
            .to_string();
    }
    let names: Vec<&str> = recipes.iter().map(|recipe| recipe.name).collect();
    format!(
        "Based on your available ingredients, you can make: {}. Which would you like to prepare?",
        names.join(", ")
    )
}

/// Report read out once an ingredient scan finishes
pub fn scan_report(ingredients: &[DetectedIngredient]) -> String {
    let visible: Vec<&str> = ingredients
        .iter()
        .filter(|ing| ing.confidence > VISIBLE_THRESHOLD)
        .map(|ing| ing.name.as_str())
        .collect();
    format!(
        "I can see the following ingredients: {}. Let me suggest some recipes you can make.",
        visible.join(", ")
    )
}

/// Case-insensitive substring lookup
pub fn locate_ingredient(ingredients: &[DetectedIngredient], query: &str) -> String {
    let needle = query.to_lowercase();
    match ingredients
        .iter()
        .find(|ing| ing.name.to_lowercase().contains(&needle))
    {
        Some(found) => format!(
            "{} is located on the {}. Confidence: {} percent.",
            found.name,
            found.location,
            found.confidence_percent()
        ),
        None => format!(
            "I couldn't locate {query} in the current view. Try scanning the kitchen area again."
        ),
    }
}

/// Result of moving to the next step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved on; carries the spoken step
    Step(String),
    /// Past the last step; the session is over
    Finished(String),
}

/// Recipe being cooked and the step the user is on
#[derive(Debug, Clone)]
pub struct CookingSession {
    recipe: &'static Recipe,
    step: usize,
}

impl CookingSession {
    pub fn start(recipe: &'static Recipe) -> Self {
        Self { recipe, step: 0 }
    }

    pub fn recipe(&self) -> &'static Recipe {
        self.recipe
    }

    /// Zero-based index of the current step
    pub fn current_step(&self) -> usize {
        self.step
    }

    pub fn is_last_step(&self) -> bool {
        self.step + 1 >= self.recipe.steps.len()
    }

    pub fn start_announcement(&self) -> String {
        let first = self.recipe.steps.first().copied().unwrap_or_default();
        format!(
            "Starting {}. This will take approximately {}. Let's begin with step 1: {}",
            self.recipe.name, self.recipe.time, first
        )
    }

    pub fn next_step(&mut self) -> StepOutcome {
        let next = self.step + 1;
        match self.recipe.steps.get(next) {
            Some(step) => {
                self.step = next;
                StepOutcome::Step(format!("Step {}: {}", next + 1, step))
            }
            None => StepOutcome::Finished(format!(
                "Congratulations! You have completed {}. Enjoy your meal!",
                self.recipe.name
            )),
        }
    }

    pub fn repeat_step(&self) -> String {
        let step = self.recipe.steps.get(self.step).copied().unwrap_or_default();
        format!("Step {}: {}", self.step + 1, step)
    }
}
