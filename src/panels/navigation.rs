//! Indoor navigation panel

use crate::sim::navigation::{self, NavigationSession, Room};
use crate::speech::{Priority, SpeechOutput};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct NavigationPanel {
    session: Option<NavigationSession>,
    instructions: Vec<String>,
}

impl NavigationPanel {
    /// Start walking to the room with `room_id`; unknown ids are ignored
    pub fn start(&mut self, room_id: &str, speech: &mut SpeechOutput) -> bool {
        let Some(room) = navigation::find_room(room_id) else {
            debug!("[NAV] Unknown destination {}", room_id);
            return false;
        };
        self.start_room(room, speech);
        true
    }

    pub fn start_room(&mut self, room: &'static Room, speech: &mut SpeechOutput) {
        self.instructions = room.instructions();
        self.session = Some(NavigationSession::start(room));
        speech.speak(room.start_announcement(), Priority::High);
    }

    /// Reset the walk and halt its timer
    pub fn stop(&mut self, speech: &mut SpeechOutput) {
        if let Some(session) = self.session.take() {
            info!("[NAV] Stopped at step {}", session.current_step());
        }
        self.instructions.clear();
        speech.speak("Navigation stopped.", Priority::Normal);
    }

    /// A walk is in progress
    pub fn is_navigating(&self) -> bool {
        self.session.as_ref().is_some_and(NavigationSession::is_active)
    }

    pub fn session(&self) -> Option<&NavigationSession> {
        self.session.as_ref()
    }

    /// Current step count; 0 when idle
    pub fn current_step(&self) -> u32 {
        self.session.as_ref().map_or(0, NavigationSession::current_step)
    }

    pub fn destination(&self) -> Option<&'static Room> {
        self.session.as_ref().map(NavigationSession::room)
    }

    pub fn instructions(&self) -> &[String] {
        &self.instructions
    }

    pub fn advance(&mut self, dt: Duration, speech: &mut SpeechOutput) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        for callout in session.advance(dt) {
            speech.speak(callout.text, callout.priority);
        }
    }
}
