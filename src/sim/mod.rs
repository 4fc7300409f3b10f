//! Simulated sensing engines
//!
//! Nothing here looks at real sensor input. Every engine replays a static
//! catalog with the literal thresholds and phrases the assistant has always
//! used; randomness comes only from the injected RNG.

pub mod detection;
pub mod map;
pub mod navigation;
pub mod recipes;
pub mod timer;

pub use detection::{
    describe_scene, detect_objects, scan_announcement, ConfidenceLevel, DetectedObject, Direction,
    EnvironmentScan, OBJECT_CATALOG,
};
pub use map::{MapPoint, MapRoom, MAP_ROOMS, USER_START};
pub use navigation::{NavigationSession, Room, ROOMS};
pub use recipes::{CookingSession, DetectedIngredient, Difficulty, Recipe, RECIPES};
pub use timer::{Countdown, Interval};
