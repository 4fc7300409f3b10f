//! Interactive environment map panel

use crate::sim::map::{self, MapPoint, MapRoom, USER_START};
use crate::speech::{Priority, SpeechOutput};

#[derive(Debug)]
pub struct MapPanel {
    selected: Option<&'static MapRoom>,
    user: MapPoint,
}

impl Default for MapPanel {
    fn default() -> Self {
        Self {
            selected: None,
            user: USER_START,
        }
    }
}

impl MapPanel {
    pub fn user_position(&self) -> MapPoint {
        self.user
    }

    pub fn selected(&self) -> Option<&'static MapRoom> {
        self.selected
    }

    pub fn current_room(&self) -> Option<&'static MapRoom> {
        map::room_at(self.user)
    }

    pub fn select_room(&mut self, room_id: &str, speech: &mut SpeechOutput) -> bool {
        match map::find_map_room(room_id) {
            Some(room) => {
                self.selected = Some(room);
                speech.speak(room.selection_announcement(), Priority::Normal);
                true
            }
            None => false,
        }
    }

    pub fn where_am_i(&self, speech: &mut SpeechOutput) {
        speech.speak(map::location_announcement(self.user), Priority::Normal);
    }

    /// Directions to the selected room; nothing without a selection
    pub fn get_directions(&self, speech: &mut SpeechOutput) -> bool {
        match self.selected {
            Some(room) => {
                speech.speak(map::directions_announcement(self.user, room), Priority::Normal);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_and_get_directions() {
        let mut speech = SpeechOutput::simulated();
        let mut panel = MapPanel::default();

        assert!(!panel.get_directions(&mut speech));
        assert!(panel.select_room("kitchen", &mut speech));
        assert_eq!(
            speech.last_spoken(),
            Some("Kitchen selected. This room is located at coordinates 300, 150 on the map.")
        );
        assert!(panel.get_directions(&mut speech));
        assert_eq!(speech.last_spoken(), Some("To reach the Kitchen, head east."));
        assert!(!panel.select_room("garage", &mut speech));
        assert_eq!(panel.selected().map(|r| r.id), Some("kitchen"));
    }

    #[test]
    fn test_where_am_i() {
        let mut speech = SpeechOutput::simulated();
        let panel = MapPanel::default();
        panel.where_am_i(&mut speech);
        assert_eq!(speech.last_spoken(), Some("You are currently in the Living Room."));
        assert_eq!(panel.current_room().map(|r| r.id), Some("living_room"));
    }
}
