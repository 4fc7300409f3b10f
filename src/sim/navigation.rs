//! Scripted indoor navigation

use crate::sim::timer::Interval;
use crate::speech::Priority;
use std::time::Duration;
use tracing::info;

/// One simulated step per tick
pub const STEP_INTERVAL: Duration = Duration::from_secs(1);

/// Navigation destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Room {
    pub id: &'static str,
    pub name: &'static str,
    pub steps: u32,
    pub direction: &'static str,
    pub landmarks: [&'static str; 3],
}

pub const ROOMS: [Room; 4] = [
    Room {
        id: "kitchen",
        name: "Kitchen",
        steps: 12,
        direction: "Turn left, then straight",
        landmarks: ["dining table", "counter", "refrigerator"],
    },
    Room {
        id: "bathroom",
        name: "Bathroom",
        steps: 8,
        direction: "Turn right, then straight",
        landmarks: ["hallway", "linen closet", "bathroom door"],
    },
    Room {
        id: "front_door",
        name: "Front Door",
        steps: 15,
        direction: "Straight ahead",
        landmarks: ["living room", "coat closet", "entrance mat"],
    },
    Room {
        id: "living_room",
        name: "Living Room",
        steps: 6,
        direction: "Turn around and straight",
        landmarks: ["coffee table", "sofa", "TV stand"],
    },
];

/// Look up a destination by id
pub fn find_room(id: &str) -> Option<&'static Room> {
    ROOMS.iter().find(|room| room.id == id)
}

/// Coarse heading shown next to a destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Left,
    Right,
    Ahead,
}

impl Heading {
    pub fn arrow(&self) -> &'static str {
        match self {
            Heading::Left => "←",
            Heading::Right => "→",
            Heading::Ahead => "↑",
        }
    }
}

impl Room {
    pub fn heading(&self) -> Heading {
        if self.direction.contains("left") {
            Heading::Left
        } else if self.direction.contains("right") {
            Heading::Right
        } else {
            Heading::Ahead
        }
    }

    pub fn start_announcement(&self) -> String {
        format!(
            "Starting navigation to {}. {}. Walk {} steps.",
            self.name, self.direction, self.steps
        )
    }

    /// The five written instruction lines
    pub fn instructions(&self) -> Vec<String> {
        vec![
            format!("Starting navigation to {}", self.name),
            self.direction.to_string(),
            format!("Walk {} steps total", self.steps),
            format!("You should pass: {}", self.landmarks.join(", ")),
            format!("Arrival at {}", self.name),
        ]
    }
}

/// Spoken progress update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callout {
    pub step: u32,
    pub text: String,
    pub priority: Priority,
}

/// A walk towards one room, one step per second
#[derive(Debug, Clone)]
pub struct NavigationSession {
    room: &'static Room,
    step: u32,
    timer: Interval,
    active: bool,
}

impl NavigationSession {
    pub fn start(room: &'static Room) -> Self {
        info!("[NAV] Starting navigation to {}", room.id);
        Self {
            room,
            step: 0,
            timer: Interval::new(STEP_INTERVAL),
            active: true,
        }
    }

    pub fn room(&self) -> &'static Room {
        self.room
    }

    pub fn current_step(&self) -> u32 {
        self.step
    }

    /// False once the destination has been reached
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Fraction of the walk completed, 0.0..=1.0
    pub fn progress(&self) -> f32 {
        self.step as f32 / self.room.steps.max(1) as f32
    }

    /// Advance the walk, returning any callouts due
    pub fn advance(&mut self, dt: Duration) -> Vec<Callout> {
        let mut callouts = Vec::new();
        if !self.active {
            return callouts;
        }
        for _ in 0..self.timer.advance(dt) {
            if let Some(callout) = self.tick() {
                callouts.push(callout);
            }
            if !self.active {
                break;
            }
        }
        callouts
    }

    fn tick(&mut self) -> Option<Callout> {
        let steps = self.room.steps;
        let next = self.step + 1;
        if next > steps {
            return None;
        }
        self.step = next;

        if next == steps / 3 {
            Some(Callout {
                step: next,
                text: format!(
                    "You've walked {next} steps. Continue straight. You should be near the {}.",
                    self.room.landmarks[0]
                ),
                priority: Priority::Normal,
            })
        } else if next == steps * 2 / 3 {
            Some(Callout {
                step: next,
                text: format!(
                    "{next} steps completed. Almost there. Look for the {}.",
                    self.room.landmarks[1]
                ),
                priority: Priority::Normal,
            })
        } else if next == steps {
            self.active = false;
            info!("[NAV] Arrived at {}", self.room.id);
            Some(Callout {
                step: next,
                text: format!("Destination reached! You have arrived at the {}.", self.room.name),
                priority: Priority::High,
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kitchen_walk_callouts() {
        let kitchen = find_room("kitchen").unwrap();
        let mut session = NavigationSession::start(kitchen);

        let mut callouts = Vec::new();
        for _ in 0..20 {
            callouts.extend(session.advance(STEP_INTERVAL));
        }

        let steps: Vec<u32> = callouts.iter().map(|c| c.step).collect();
        assert_eq!(steps, vec![4, 8, 12]);
        assert_eq!(
            callouts[0].text,
            "You've walked 4 steps. Continue straight. You should be near the dining table."
        );
        assert_eq!(
            callouts[1].text,
            "8 steps completed. Almost there. Look for the counter."
        );
        assert_eq!(
            callouts[2].text,
            "Destination reached! You have arrived at the Kitchen."
        );
        assert_eq!(callouts[2].priority, Priority::High);
        assert!(!session.is_active());
        assert_eq!(session.current_step(), 12);
    }

    #[test]
    fn test_large_advance_stops_at_arrival() {
        let mut session = NavigationSession::start(find_room("living_room").unwrap());
        let callouts = session.advance(Duration::from_secs(60));
        assert_eq!(callouts.len(), 3);
        assert_eq!(session.current_step(), 6);
        assert!(session.advance(Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn test_room_text() {
        let kitchen = find_room("kitchen").unwrap();
        assert_eq!(
            kitchen.start_announcement(),
            "Starting navigation to Kitchen. Turn left, then straight. Walk 12 steps."
        );
        let lines = kitchen.instructions();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[3], "You should pass: dining table, counter, refrigerator");
        assert_eq!(lines[4], "Arrival at Kitchen");
        assert_eq!(kitchen.heading(), Heading::Left);
        assert_eq!(find_room("front_door").unwrap().heading(), Heading::Ahead);
        assert!(find_room("garage").is_none());
    }
}
