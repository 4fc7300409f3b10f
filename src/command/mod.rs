//! Voice command interpretation
//!
//! Transcripts are matched against keyword groups in a fixed order and the
//! first group that matches wins. The order is part of the contract: "help
//! me cook" is a cooking request, "map" beats "navigate", and anything that
//! matches nothing is echoed back rather than guessed at.

mod shortcut;

pub use shortcut::{Shortcut, ShortcutParseError};

use crate::speech::Priority;
use crate::state::View;
use rand::seq::SliceRandom;
use rand::Rng;

/// Objects the "what do you see" command may report
pub const GLANCE_OBJECTS: [&str; 4] = ["chair", "table", "doorway", "wall"];

/// Destinations recognised inside a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Kitchen,
    Bathroom,
    FrontDoor,
}

/// Interpreted voice command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// "scan", "map" or "environment"
    ScanEnvironment,
    /// "navigate", "go to" or "take me", with an optional destination
    Navigate(Option<Destination>),
    /// "what" together with "see" or "front"
    DescribeAhead { object: &'static str },
    /// "cook", "kitchen" or "recipe"
    Cook,
    /// "help" or "emergency"
    Emergency,
    /// "settings"
    OpenSettings,
    /// "home"
    GoHome,
    /// Nothing matched; carries the lowercased transcript
    Unrecognized(String),
}

/// Interpret a transcript
///
/// `rng` picks the object reported by [`Command::DescribeAhead`].
pub fn interpret<R: Rng + ?Sized>(transcript: &str, rng: &mut R) -> Command {
    let command = transcript.to_lowercase();
    let has = |keyword: &str| command.contains(keyword);

    if has("scan") || has("map") || has("environment") {
        Command::ScanEnvironment
    } else if has("navigate") || has("go to") || has("take me") {
        let destination = if has("kitchen") {
            Some(Destination::Kitchen)
        } else if has("bathroom") {
            Some(Destination::Bathroom)
        } else if has("door") {
            Some(Destination::FrontDoor)
        } else {
            None
        };
        Command::Navigate(destination)
    } else if has("what") && (has("see") || has("front")) {
        let object = GLANCE_OBJECTS.choose(rng).copied().unwrap_or(GLANCE_OBJECTS[0]);
        Command::DescribeAhead { object }
    } else if has("cook") || has("kitchen") || has("recipe") {
        Command::Cook
    } else if has("help") || has("emergency") {
        Command::Emergency
    } else if has("settings") {
        Command::OpenSettings
    } else if has("home") {
        Command::GoHome
    } else {
        Command::Unrecognized(command)
    }
}

impl Command {
    /// View to switch to, if any
    pub fn target_view(&self) -> Option<View> {
        match self {
            Command::ScanEnvironment | Command::DescribeAhead { .. } => Some(View::Camera),
            Command::Navigate(_) => Some(View::Navigation),
            Command::Cook => Some(View::Tasks),
            Command::OpenSettings => Some(View::Settings),
            Command::GoHome => Some(View::Home),
            Command::Emergency | Command::Unrecognized(_) => None,
        }
    }

    /// Spoken response
    pub fn response(&self) -> String {
        match self {
            Command::ScanEnvironment => {
                "Starting environment scan. Please slowly move your camera around the room."
                    .to_string()
            }
            Command::Navigate(Some(Destination::Kitchen)) => {
                "Navigating to kitchen. Turn left and walk straight for 10 steps.".to_string()
            }
            Command::Navigate(Some(Destination::Bathroom)) => {
                "Navigating to bathroom. Turn right and walk 5 steps forward.".to_string()
            }
            Command::Navigate(Some(Destination::FrontDoor)) => {
                "Navigating to front door. Walk straight ahead for 8 steps.".to_string()
            }
            Command::Navigate(None) => {
                "Navigation mode activated. Where would you like to go?".to_string()
            }
            Command::DescribeAhead { object } => {
                format!("I can see a {object} approximately 3 feet in front of you.")
            }
            Command::Cook => "Kitchen assistant activated. I can see tomatoes, onions, and eggs \
                              on your counter. Would you like a recipe suggestion?"
                .to_string(),
            Command::Emergency => "Emergency mode activated. Say \"call help\" to contact \
                                   emergency services, or \"I'm okay\" to continue."
                .to_string(),
            Command::OpenSettings => "Opening accessibility settings.".to_string(),
            Command::GoHome => "Returned to home screen.".to_string(),
            Command::Unrecognized(command) => {
                format!("I understand you said: {command}. How can I help you with that?")
            }
        }
    }

    /// Priority of the spoken response
    pub fn priority(&self) -> Priority {
        match self {
            Command::Emergency => Priority::High,
            _ => Priority::Normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn run(transcript: &str) -> Command {
        let mut rng = StdRng::seed_from_u64(7);
        interpret(transcript, &mut rng)
    }

    #[test]
    fn test_cook_wins_over_help() {
        assert_eq!(run("help me cook"), Command::Cook);
        assert_eq!(run("I need help with a recipe"), Command::Cook);
        assert_eq!(run("emergency in the kitchen"), Command::Cook);
    }

    #[test]
    fn test_scan_group_is_checked_first() {
        assert_eq!(run("scan my environment"), Command::ScanEnvironment);
        assert_eq!(run("navigate using the map"), Command::ScanEnvironment);
        assert_eq!(run("what do you see on the map"), Command::ScanEnvironment);
    }

    #[test]
    fn test_navigation_destinations() {
        assert_eq!(
            run("Take me to the kitchen"),
            Command::Navigate(Some(Destination::Kitchen))
        );
        assert_eq!(
            run("go to bathroom"),
            Command::Navigate(Some(Destination::Bathroom))
        );
        assert_eq!(
            run("navigate to front door"),
            Command::Navigate(Some(Destination::FrontDoor))
        );
        assert_eq!(run("help me navigate"), Command::Navigate(None));
    }

    #[test]
    fn test_kitchen_without_navigation_verb_is_cooking() {
        assert_eq!(run("what is in the kitchen"), Command::Cook);
    }

    #[test]
    fn test_describe_ahead_requires_what() {
        assert!(matches!(
            run("What's in front of me?"),
            Command::DescribeAhead { .. }
        ));
        assert!(matches!(run("what do you see"), Command::DescribeAhead { .. }));
        // "see" without "what" falls through
        assert_eq!(
            run("i can't see"),
            Command::Unrecognized("i can't see".to_string())
        );
    }

    #[test]
    fn test_describe_ahead_uses_injected_rng() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            let first = interpret("what do you see", &mut a);
            let second = interpret("what do you see", &mut b);
            assert_eq!(first, second);
            match first {
                Command::DescribeAhead { object } => assert!(GLANCE_OBJECTS.contains(&object)),
                other => panic!("unexpected command {other:?}"),
            }
        }
    }

    #[test]
    fn test_remaining_branches() {
        assert_eq!(run("Emergency help"), Command::Emergency);
        assert_eq!(run("open settings"), Command::OpenSettings);
        assert_eq!(run("go home"), Command::GoHome);
        assert_eq!(run("take me home"), Command::Navigate(None));
    }

    #[test]
    fn test_fallback_echoes_lowercased_transcript() {
        let command = run("Where Am I?");
        assert_eq!(command, Command::Unrecognized("where am i?".to_string()));
        assert_eq!(
            command.response(),
            "I understand you said: where am i?. How can I help you with that?"
        );
        assert_eq!(command.target_view(), None);
    }

    #[test]
    fn test_views_and_priorities() {
        assert_eq!(Command::ScanEnvironment.target_view(), Some(View::Camera));
        assert_eq!(Command::Cook.target_view(), Some(View::Tasks));
        assert_eq!(Command::Emergency.target_view(), None);
        assert_eq!(Command::Emergency.priority(), Priority::High);
        assert_eq!(Command::GoHome.priority(), Priority::Normal);
    }

    #[test]
    fn test_responses() {
        assert_eq!(
            Command::Navigate(Some(Destination::Kitchen)).response(),
            "Navigating to kitchen. Turn left and walk straight for 10 steps."
        );
        assert_eq!(
            Command::DescribeAhead { object: "wall" }.response(),
            "I can see a wall approximately 3 feet in front of you."
        );
        assert!(Command::Emergency.response().contains("\"call help\""));
    }
}
