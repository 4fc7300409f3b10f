//! Speech output adapter
//!
//! Wraps a text-to-speech engine with the assistant's speaking rules:
//! muted output is a silent no-op, and high priority utterances interrupt
//! whatever is currently being spoken.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{debug, info, trace};
use uuid::Uuid;

/// Fixed output volume for every utterance
pub const SPEECH_VOLUME: f32 = 0.9;

/// Fixed pitch for every utterance
pub const SPEECH_PITCH: f32 = 1.0;

/// Approximate speaking time per word at rate 1.0 (about 150 words per minute)
const WORD_DURATION: Duration = Duration::from_millis(400);

/// Number of accepted utterances kept for captions
const HISTORY_CAPACITY: usize = 100;

/// Urgency of an utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Queued behind anything already playing
    #[default]
    Normal,
    /// Cancels the in-flight utterance first
    High,
}

/// A single piece of text handed to the speech engine
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// Identifier used to match lifecycle events
    pub id: Uuid,
    /// Text to speak
    pub text: String,
    /// Speech rate (1.0 = normal)
    pub rate: f32,
    /// Output volume (0.0 to 1.0)
    pub volume: f32,
    /// Voice pitch
    pub pitch: f32,
    /// Priority the utterance was issued with
    pub priority: Priority,
}

impl Utterance {
    /// Create an utterance with the fixed volume and pitch
    pub fn new(text: impl Into<String>, rate: f32, priority: Priority) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            rate,
            volume: SPEECH_VOLUME,
            pitch: SPEECH_PITCH,
            priority,
        }
    }

    /// Estimated playback duration at this utterance's rate
    pub fn estimated_duration(&self) -> Duration {
        let words = self.text.split_whitespace().count().max(1) as f32;
        let millis = WORD_DURATION.as_millis() as f32 * words / self.rate.max(0.1);
        Duration::from_millis(millis as u64)
    }
}

/// Lifecycle event emitted by a speech engine
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechEvent {
    /// Playback of the utterance started
    Started { id: Uuid },
    /// Playback finished normally
    Ended { id: Uuid },
    /// Playback failed or was interrupted
    Error { id: Uuid, error: String },
}

/// Text-to-speech capability
///
/// Engines own their internal queue. At most one utterance may be active at
/// any time.
pub trait SpeechEngine: Send {
    /// Enqueue an utterance; it starts immediately if nothing is playing
    fn speak(&mut self, utterance: Utterance);

    /// Interrupt the active utterance and drop everything queued
    fn cancel(&mut self);

    /// Advance playback by the elapsed time
    fn advance(&mut self, elapsed: Duration);

    /// Take all lifecycle events emitted since the last call
    fn drain_events(&mut self) -> Vec<SpeechEvent>;

    /// Whether an utterance is currently playing
    fn is_active(&self) -> bool;
}

/// Timed in-process engine
///
/// Plays utterances for their estimated duration and logs them. Used by the
/// desktop shell (captions only) and as the headless stub in tests.
#[derive(Debug, Default)]
pub struct SimulatedEngine {
    queue: VecDeque<Utterance>,
    current: Option<(Utterance, Duration)>,
    events: Vec<SpeechEvent>,
}

impl SimulatedEngine {
    /// Create an idle engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of utterances waiting behind the active one
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Text of the active utterance
    pub fn current_text(&self) -> Option<&str> {
        self.current.as_ref().map(|(u, _)| u.text.as_str())
    }

    fn start_next(&mut self) {
        if self.current.is_some() {
            return;
        }
        if let Some(next) = self.queue.pop_front() {
            info!("[SPEECH] {}", next.text);
            let remaining = next.estimated_duration();
            self.events.push(SpeechEvent::Started { id: next.id });
            self.current = Some((next, remaining));
        }
    }
}

impl SpeechEngine for SimulatedEngine {
    fn speak(&mut self, utterance: Utterance) {
        self.queue.push_back(utterance);
        self.start_next();
    }

    fn cancel(&mut self) {
        if let Some((utterance, _)) = self.current.take() {
            debug!("[SPEECH] Interrupted: {}", utterance.text);
            self.events.push(SpeechEvent::Error {
                id: utterance.id,
                error: "interrupted".to_string(),
            });
        }
        self.queue.clear();
    }

    fn advance(&mut self, elapsed: Duration) {
        let mut budget = elapsed;
        while let Some((utterance, remaining)) = self.current.as_mut() {
            if *remaining > budget {
                *remaining -= budget;
                break;
            }
            budget -= *remaining;
            let id = utterance.id;
            self.current = None;
            self.events.push(SpeechEvent::Ended { id });
            self.start_next();
        }
    }

    fn drain_events(&mut self) -> Vec<SpeechEvent> {
        std::mem::take(&mut self.events)
    }

    fn is_active(&self) -> bool {
        self.current.is_some()
    }
}

/// Speech output adapter used by every panel
pub struct SpeechOutput {
    engine: Box<dyn SpeechEngine>,
    sound_enabled: bool,
    rate: f32,
    speaking: bool,
    history: VecDeque<Utterance>,
}

impl Default for SpeechOutput {
    fn default() -> Self {
        Self::simulated()
    }
}

impl SpeechOutput {
    /// Create an adapter over the given engine
    pub fn new(engine: Box<dyn SpeechEngine>) -> Self {
        Self {
            engine,
            sound_enabled: true,
            rate: 1.0,
            speaking: false,
            history: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// Create an adapter over a [`SimulatedEngine`]
    pub fn simulated() -> Self {
        Self::new(Box::new(SimulatedEngine::new()))
    }

    /// Speak `text`, honouring mute and priority rules
    pub fn speak(&mut self, text: impl Into<String>, priority: Priority) {
        let text = text.into();
        if !self.sound_enabled {
            trace!("[SPEECH] Muted: {}", text);
            return;
        }

        if priority == Priority::High {
            self.engine.cancel();
        }

        let utterance = Utterance::new(text, self.rate, priority);
        if self.history.len() >= HISTORY_CAPACITY {
            self.history.pop_front();
        }
        self.history.push_back(utterance.clone());
        self.engine.speak(utterance);
        self.poll_events();
    }

    /// Interrupt the active utterance
    pub fn cancel(&mut self) {
        self.engine.cancel();
        self.poll_events();
    }

    /// Advance the engine clock and process its events
    pub fn advance(&mut self, elapsed: Duration) {
        self.engine.advance(elapsed);
        self.poll_events();
    }

    /// Apply pending lifecycle events to the speaking flag
    pub fn poll_events(&mut self) -> Vec<SpeechEvent> {
        let events = self.engine.drain_events();
        for event in &events {
            match event {
                SpeechEvent::Started { .. } => self.speaking = true,
                SpeechEvent::Ended { .. } => self.speaking = false,
                SpeechEvent::Error { error, .. } => {
                    debug!("[SPEECH] Utterance error: {}", error);
                    self.speaking = false;
                }
            }
        }
        events
    }

    /// Whether an utterance is playing
    pub fn is_speaking(&self) -> bool {
        self.speaking
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    /// Enable or mute output; muting only affects later `speak` calls
    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn set_rate(&mut self, rate: f32) {
        self.rate = rate;
    }

    /// Utterances accepted so far, oldest first
    pub fn history(&self) -> impl Iterator<Item = &Utterance> {
        self.history.iter()
    }

    /// Text of the most recently accepted utterance
    pub fn last_spoken(&self) -> Option<&str> {
        self.history.back().map(|u| u.text.as_str())
    }

    /// Whether any accepted utterance contains `needle`
    pub fn spoke(&self, needle: &str) -> bool {
        self.history.iter().any(|u| u.text.contains(needle))
    }

    /// Forget the caption history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utterance_defaults() {
        let utterance = Utterance::new("Hello there", 2.0, Priority::Normal);
        assert_eq!(utterance.volume, 0.9);
        assert_eq!(utterance.pitch, 1.0);
        assert_eq!(utterance.estimated_duration(), Duration::from_millis(400));
    }

    #[test]
    fn test_speak_sets_speaking_flag() {
        let mut speech = SpeechOutput::simulated();
        assert!(!speech.is_speaking());

        speech.speak("Camera view", Priority::Normal);
        assert!(speech.is_speaking());

        speech.advance(Duration::from_secs(5));
        assert!(!speech.is_speaking());
    }

    #[test]
    fn test_normal_priority_queues() {
        let mut engine = SimulatedEngine::new();
        engine.speak(Utterance::new("first", 1.0, Priority::Normal));
        engine.speak(Utterance::new("second", 1.0, Priority::Normal));

        assert_eq!(engine.current_text(), Some("first"));
        assert_eq!(engine.queued(), 1);

        engine.advance(Duration::from_millis(400));
        assert_eq!(engine.current_text(), Some("second"));
    }

    #[test]
    fn test_high_priority_cancels_active_utterance() {
        let mut engine = SimulatedEngine::new();
        let first = Utterance::new("one two three four five", 1.0, Priority::Normal);
        let first_id = first.id;
        engine.speak(first);
        engine.speak(Utterance::new("queued", 1.0, Priority::Normal));
        engine.drain_events();

        engine.cancel();
        let urgent = Utterance::new("Destination reached!", 1.0, Priority::High);
        let urgent_id = urgent.id;
        engine.speak(urgent);

        let events = engine.drain_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], SpeechEvent::Error { id, .. } if *id == first_id));
        assert_eq!(events[1], SpeechEvent::Started { id: urgent_id });
        assert_eq!(engine.queued(), 0);
        assert_eq!(engine.current_text(), Some("Destination reached!"));
    }

    #[test]
    fn test_high_priority_leaves_single_active_utterance() {
        let mut speech = SpeechOutput::simulated();
        speech.speak("Starting environment scan.", Priority::Normal);
        speech.speak("Camera activated.", Priority::Normal);
        speech.speak("Camera access failed.", Priority::High);
        assert!(speech.is_speaking());

        // Only the urgent utterance remains; it ends after its own duration
        speech.advance(Duration::from_millis(1200));
        assert!(!speech.is_speaking());
    }

    #[test]
    fn test_muted_speak_is_noop() {
        let mut speech = SpeechOutput::simulated();
        speech.set_sound_enabled(false);

        speech.speak("anything", Priority::Normal);
        speech.speak("", Priority::High);
        speech.speak("urgent", Priority::High);

        assert!(!speech.is_speaking());
        assert!(speech.last_spoken().is_none());
    }

    #[test]
    fn test_muting_lets_current_utterance_finish() {
        let mut speech = SpeechOutput::simulated();
        speech.speak("Sound disabled", Priority::Normal);
        assert!(speech.is_speaking());

        speech.set_sound_enabled(false);
        assert!(speech.is_speaking());

        speech.speak("ignored while muted", Priority::High);
        assert!(speech.is_speaking());
        assert_eq!(speech.history().count(), 1);

        speech.advance(Duration::from_millis(799));
        assert!(speech.is_speaking());
        speech.advance(Duration::from_millis(1));
        assert!(!speech.is_speaking());
    }

    #[test]
    fn test_rate_applies_to_new_utterances() {
        let mut speech = SpeechOutput::simulated();
        speech.set_rate(2.0);
        speech.speak("Voice speed set to fast", Priority::High);
        let last = speech.history().last().unwrap();
        assert_eq!(last.rate, 2.0);
        assert_eq!(last.priority, Priority::High);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut speech = SpeechOutput::simulated();
        for i in 0..150 {
            speech.speak(format!("line {i}"), Priority::Normal);
        }
        assert_eq!(speech.history().count(), 100);
        assert_eq!(speech.last_spoken(), Some("line 149"));
        assert!(!speech.spoke("line 49"));
    }
}
