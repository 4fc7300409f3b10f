//! Simulated object detection and environment scanning

use crate::sim::timer::Interval;
use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Fewest objects a detection reports
pub const MIN_DETECTIONS: usize = 2;

/// Most objects a detection reports
pub const MAX_DETECTIONS: usize = 4;

/// Scan progress tick period
pub const SCAN_TICK: Duration = Duration::from_millis(500);

/// Progress added per scan tick (percent)
pub const SCAN_STEP: u8 = 10;

/// Where an object sits relative to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Center,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Center => "center",
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Direction::Left => "←",
            Direction::Right => "→",
            Direction::Center => "↑",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry of the mock object catalog
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogObject {
    pub name: &'static str,
    pub distance: &'static str,
    pub direction: Direction,
    pub confidence: f32,
}

/// Everything the camera can ever "see"
pub const OBJECT_CATALOG: [CatalogObject; 5] = [
    CatalogObject { name: "chair", distance: "2 feet", direction: Direction::Center, confidence: 0.95 },
    CatalogObject { name: "table", distance: "4 feet", direction: Direction::Left, confidence: 0.88 },
    CatalogObject { name: "doorway", distance: "8 feet", direction: Direction::Right, confidence: 0.92 },
    CatalogObject { name: "wall", distance: "6 feet", direction: Direction::Center, confidence: 0.98 },
    CatalogObject { name: "plant", distance: "3 feet", direction: Direction::Right, confidence: 0.75 },
];

/// Reliability band of a detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn from_confidence(confidence: f32) -> Self {
        if confidence >= 0.9 {
            ConfidenceLevel::High
        } else if confidence >= 0.7 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

/// One object reported by a detection pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    pub id: String,
    pub name: String,
    /// Informal distance such as "2 feet"
    pub distance: String,
    pub direction: Direction,
    pub confidence: f32,
}

impl DetectedObject {
    fn from_catalog(entry: &CatalogObject, id: String) -> Self {
        Self {
            id,
            name: entry.name.to_string(),
            distance: entry.distance.to_string(),
            direction: entry.direction,
            confidence: entry.confidence,
        }
    }

    /// Numeric prefix of the distance ("2 feet" -> 2.0); NaN when absent
    pub fn distance_value(&self) -> f32 {
        let numeric: String = self
            .distance
            .trim_start()
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        numeric.parse().unwrap_or(f32::NAN)
    }

    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_confidence(self.confidence)
    }

    /// Spoken details for a single object
    pub fn announcement(&self) -> String {
        format!(
            "{} detected {} to your {}. Confidence: {} percent.",
            self.name,
            self.distance,
            self.direction,
            self.confidence_percent()
        )
    }
}

/// Sample 2 to 4 distinct catalog objects
///
/// Ids are `obj-<index>-<unix millis>` and therefore unique within one pass.
pub fn detect_objects<R: Rng + ?Sized>(rng: &mut R) -> Vec<DetectedObject> {
    let count = rng.gen_range(MIN_DETECTIONS..=MAX_DETECTIONS);
    let stamp = Utc::now().timestamp_millis();

    let objects: Vec<DetectedObject> = OBJECT_CATALOG
        .choose_multiple(rng, count)
        .enumerate()
        .map(|(index, entry)| DetectedObject::from_catalog(entry, format!("obj-{index}-{stamp}")))
        .collect();

    debug!("[VISION] Detected {} objects", objects.len());
    objects
}

/// "I can see: ..." summary for a detection pass
pub fn scan_announcement(objects: &[DetectedObject]) -> Option<String> {
    if objects.is_empty() {
        return None;
    }
    let parts: Vec<String> = objects
        .iter()
        .map(|obj| format!("{} {} to your {}", obj.name, obj.distance, obj.direction))
        .collect();
    Some(format!("I can see: {}", parts.join(", ")))
}

/// The object with the smallest distance; later objects win ties
pub fn closest_object(objects: &[DetectedObject]) -> Option<&DetectedObject> {
    objects.iter().reduce(|prev, current| {
        if prev.distance_value() < current.distance_value() {
            prev
        } else {
            current
        }
    })
}

/// Spoken scene description
pub fn describe_scene(objects: &[DetectedObject]) -> String {
    match closest_object(objects) {
        None => "No objects currently detected. Try scanning the environment first.".to_string(),
        Some(closest) => format!(
            "The closest object is a {} approximately {} to your {}. There are {} objects in view.",
            closest.name,
            closest.distance,
            closest.direction,
            objects.len()
        ),
    }
}

/// Progress of a running environment scan
#[derive(Debug, Clone)]
pub struct EnvironmentScan {
    progress: u8,
    timer: Interval,
    complete: bool,
}

impl Default for EnvironmentScan {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentScan {
    pub fn new() -> Self {
        Self {
            progress: 0,
            timer: Interval::new(SCAN_TICK),
            complete: false,
        }
    }

    /// Percent complete
    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Advance the scan; returns true on the tick that completes it
    ///
    /// Progress climbs 10 points per tick and the tick that finds it at 100
    /// stops the timer.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.complete {
            return false;
        }
        for _ in 0..self.timer.advance(dt) {
            if self.progress >= 100 {
                self.complete = true;
                return true;
            }
            self.progress = (self.progress + SCAN_STEP).min(100);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn object(name: &str, distance: &str) -> DetectedObject {
        DetectedObject {
            id: format!("obj-{name}"),
            name: name.to_string(),
            distance: distance.to_string(),
            direction: Direction::Center,
            confidence: 0.9,
        }
    }

    #[test]
    fn test_detection_sizes_and_uniqueness() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sizes = HashSet::new();
        for _ in 0..200 {
            let objects = detect_objects(&mut rng);
            assert!((MIN_DETECTIONS..=MAX_DETECTIONS).contains(&objects.len()));
            sizes.insert(objects.len());

            let names: HashSet<_> = objects.iter().map(|o| o.name.as_str()).collect();
            assert_eq!(names.len(), objects.len(), "sampled with replacement");
            assert!(names
                .iter()
                .all(|name| OBJECT_CATALOG.iter().any(|entry| entry.name == *name)));

            let ids: HashSet<_> = objects.iter().map(|o| o.id.as_str()).collect();
            assert_eq!(ids.len(), objects.len());
        }
        assert_eq!(sizes.len(), 3);
    }

    #[test]
    fn test_detection_is_reproducible_with_seed() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        let first: Vec<String> = detect_objects(&mut a).into_iter().map(|o| o.name).collect();
        let second: Vec<String> = detect_objects(&mut b).into_iter().map(|o| o.name).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_detected_values_come_from_catalog() {
        let mut rng = StdRng::seed_from_u64(5);
        for obj in detect_objects(&mut rng) {
            let entry = OBJECT_CATALOG.iter().find(|e| e.name == obj.name).unwrap();
            assert_eq!(obj.distance, entry.distance);
            assert_eq!(obj.direction, entry.direction);
            assert_eq!(obj.confidence, entry.confidence);
        }
    }

    #[test]
    fn test_scan_announcement() {
        assert_eq!(scan_announcement(&[]), None);
        let objects = vec![object("chair", "2 feet"), object("wall", "6 feet")];
        assert_eq!(
            scan_announcement(&objects).unwrap(),
            "I can see: chair 2 feet to your center, wall 6 feet to your center"
        );
    }

    #[test]
    fn test_describe_scene() {
        assert_eq!(
            describe_scene(&[]),
            "No objects currently detected. Try scanning the environment first."
        );

        let objects = vec![
            object("doorway", "8 feet"),
            object("plant", "3 feet"),
            object("table", "4 feet"),
        ];
        assert_eq!(
            describe_scene(&objects),
            "The closest object is a plant approximately 3 feet to your center. There are 3 objects in view."
        );
    }

    #[test]
    fn test_closest_tie_prefers_later_object() {
        let objects = vec![object("chair", "2 feet"), object("box", "2 feet")];
        assert_eq!(closest_object(&objects).unwrap().name, "box");
    }

    #[test]
    fn test_object_announcement_and_levels() {
        let mut plant = object("plant", "3 feet");
        plant.direction = Direction::Right;
        plant.confidence = 0.75;
        assert_eq!(
            plant.announcement(),
            "plant detected 3 feet to your right. Confidence: 75 percent."
        );
        assert_eq!(plant.confidence_level(), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_confidence(0.95), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_confidence(0.5), ConfidenceLevel::Low);
        assert_eq!(Direction::Left.arrow(), "←");
    }

    #[test]
    fn test_scan_completes_on_eleventh_tick() {
        let mut scan = EnvironmentScan::new();
        for tick in 1..=10u8 {
            assert!(!scan.advance(SCAN_TICK));
            assert_eq!(scan.progress(), tick * 10);
        }
        assert!(scan.advance(SCAN_TICK));
        assert!(scan.is_complete());
        assert!(!scan.advance(SCAN_TICK * 4));
        assert_eq!(scan.progress(), 100);
    }
}
