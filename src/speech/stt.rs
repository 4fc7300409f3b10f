//! One-shot speech input adapter
//!
//! Each activation runs the recognizer once on a worker thread and delivers
//! exactly one outcome (a final transcript or a failure) over a channel that
//! the UI polls. The adapter is modal: a second activation while listening
//! is ignored.

use crate::{Result, VisionError};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, TryRecvError};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Recognition locale
pub const RECOGNITION_LOCALE: &str = "en-US";

/// Options handed to the recognizer for one activation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionOptions {
    /// Keep listening after the first result
    pub continuous: bool,
    /// Deliver partial hypotheses
    pub interim_results: bool,
    /// BCP-47 language tag
    pub lang: String,
}

impl Default for RecognitionOptions {
    fn default() -> Self {
        Self {
            continuous: false,
            interim_results: false,
            lang: RECOGNITION_LOCALE.to_string(),
        }
    }
}

/// Speech-to-text capability
pub trait Recognizer: Send {
    /// Whether this platform can recognise speech at all
    fn is_supported(&self) -> bool {
        true
    }

    /// Block until one final transcript is available
    fn recognize(&mut self, options: &RecognitionOptions) -> Result<String>;
}

/// Recognizer for platforms without a speech-to-text backend
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedRecognizer;

impl Recognizer for UnsupportedRecognizer {
    fn is_supported(&self) -> bool {
        false
    }

    fn recognize(&mut self, _options: &RecognitionOptions) -> Result<String> {
        Err(VisionError::RecognitionError("not supported".to_string()))
    }
}

/// Recognizer that replays a fixed list of transcripts
///
/// An exhausted script behaves like a recognition error ("no-speech").
#[derive(Debug, Default, Clone)]
pub struct ScriptedRecognizer {
    transcripts: VecDeque<String>,
    latency: Duration,
}

impl ScriptedRecognizer {
    pub fn new<I, S>(transcripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            transcripts: transcripts.into_iter().map(Into::into).collect(),
            latency: Duration::ZERO,
        }
    }

    /// Simulated time between activation and the final result
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn remaining(&self) -> usize {
        self.transcripts.len()
    }
}

impl Recognizer for ScriptedRecognizer {
    fn recognize(&mut self, options: &RecognitionOptions) -> Result<String> {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        debug!("[STT] Scripted recognition ({})", options.lang);
        self.transcripts
            .pop_front()
            .ok_or_else(|| VisionError::RecognitionError("no-speech".to_string()))
    }
}

/// Listening state of the speech input adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListeningState {
    /// Ready for an activation
    #[default]
    Idle,
    /// Waiting for the recognizer's single result
    Listening,
}

impl ListeningState {
    pub fn is_listening(&self) -> bool {
        matches!(self, ListeningState::Listening)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ListeningState::Idle)
    }
}

impl std::fmt::Display for ListeningState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListeningState::Idle => write!(f, "Idle"),
            ListeningState::Listening => write!(f, "Listening"),
        }
    }
}

/// Result of asking the adapter to start listening
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenStart {
    /// A recognition session is running
    Started,
    /// A session was already running; nothing changed
    AlreadyListening,
    /// No recognizer on this platform
    Unsupported,
}

/// Final outcome of one activation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenOutcome {
    /// Final transcript as delivered by the recognizer
    Transcript(String),
    /// Recognition failed
    Failed(String),
}

/// Speech input adapter
pub struct SpeechInput {
    recognizer: Arc<Mutex<Box<dyn Recognizer>>>,
    options: RecognitionOptions,
    state: ListeningState,
    outcome_rx: Option<Receiver<ListenOutcome>>,
    worker: Option<JoinHandle<()>>,
}

impl SpeechInput {
    /// Create an adapter over the given recognizer
    pub fn new(recognizer: Box<dyn Recognizer>) -> Self {
        Self {
            recognizer: Arc::new(Mutex::new(recognizer)),
            options: RecognitionOptions::default(),
            state: ListeningState::Idle,
            outcome_rx: None,
            worker: None,
        }
    }

    /// Adapter that reports speech input as unsupported
    pub fn unsupported() -> Self {
        Self::new(Box::new(UnsupportedRecognizer))
    }

    pub fn state(&self) -> ListeningState {
        self.state
    }

    pub fn is_listening(&self) -> bool {
        self.state.is_listening()
    }

    pub fn options(&self) -> &RecognitionOptions {
        &self.options
    }

    /// Start one recognition session
    pub fn start(&mut self) -> ListenStart {
        if self.state.is_listening() {
            debug!("[STT] Already listening, ignoring activation");
            return ListenStart::AlreadyListening;
        }

        if !self.recognizer.lock().is_supported() {
            warn!("[STT] Speech recognition not supported");
            return ListenStart::Unsupported;
        }

        let (outcome_tx, outcome_rx) = bounded(1);
        let recognizer = Arc::clone(&self.recognizer);
        let options = self.options.clone();

        let handle = thread::spawn(move || {
            let outcome = match recognizer.lock().recognize(&options) {
                Ok(transcript) => ListenOutcome::Transcript(transcript),
                Err(e) => ListenOutcome::Failed(e.to_string()),
            };
            // The adapter may have been dropped meanwhile
            let _ = outcome_tx.send(outcome);
        });

        self.outcome_rx = Some(outcome_rx);
        self.worker = Some(handle);
        self.state = ListeningState::Listening;
        info!("[STT] Listening ({})", self.options.lang);
        ListenStart::Started
    }

    /// Take the session outcome if it has arrived
    pub fn poll(&mut self) -> Option<ListenOutcome> {
        let outcome = match self.outcome_rx.as_ref()?.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => {
                ListenOutcome::Failed("recognizer stopped without a result".to_string())
            }
        };
        self.finish();
        Some(outcome)
    }

    /// Block up to `timeout` for the session outcome
    pub fn wait(&mut self, timeout: Duration) -> Option<ListenOutcome> {
        let outcome = match self.outcome_rx.as_ref()?.recv_timeout(timeout) {
            Ok(outcome) => outcome,
            Err(RecvTimeoutError::Timeout) => return None,
            Err(RecvTimeoutError::Disconnected) => {
                ListenOutcome::Failed("recognizer stopped without a result".to_string())
            }
        };
        self.finish();
        Some(outcome)
    }

    fn finish(&mut self) {
        self.outcome_rx = None;
        self.state = ListeningState::Idle;
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                warn!("[STT] Recognizer worker panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(2);

    #[test]
    fn test_default_options() {
        let options = RecognitionOptions::default();
        assert!(!options.continuous);
        assert!(!options.interim_results);
        assert_eq!(options.lang, "en-US");
    }

    #[test]
    fn test_unsupported_stays_idle() {
        let mut input = SpeechInput::unsupported();
        assert_eq!(input.start(), ListenStart::Unsupported);
        assert!(input.state().is_idle());
        assert!(input.poll().is_none());
    }

    #[test]
    fn test_single_transcript_per_activation() {
        let mut input = SpeechInput::new(Box::new(ScriptedRecognizer::new([
            "Take me to the kitchen",
            "help me cook",
        ])));

        assert_eq!(input.start(), ListenStart::Started);
        assert!(input.is_listening());

        let outcome = input.wait(TIMEOUT);
        assert_eq!(
            outcome,
            Some(ListenOutcome::Transcript("Take me to the kitchen".to_string()))
        );
        assert!(input.state().is_idle());

        // Nothing more until the next activation
        assert!(input.poll().is_none());
    }

    #[test]
    fn test_second_activation_is_ignored_while_listening() {
        let recognizer =
            ScriptedRecognizer::new(["settings"]).with_latency(Duration::from_millis(100));
        let mut input = SpeechInput::new(Box::new(recognizer));

        assert_eq!(input.start(), ListenStart::Started);
        assert_eq!(input.start(), ListenStart::AlreadyListening);

        assert_eq!(
            input.wait(TIMEOUT),
            Some(ListenOutcome::Transcript("settings".to_string()))
        );
    }

    #[test]
    fn test_exhausted_script_fails_and_returns_to_idle() {
        let mut input = SpeechInput::new(Box::new(ScriptedRecognizer::default()));
        assert_eq!(input.start(), ListenStart::Started);

        let outcome = input.wait(TIMEOUT);
        assert!(matches!(outcome, Some(ListenOutcome::Failed(_))));
        assert!(input.state().is_idle());
    }

    #[test]
    fn test_listening_state_display() {
        assert_eq!(ListeningState::Idle.to_string(), "Idle");
        assert_eq!(ListeningState::Listening.to_string(), "Listening");
    }
}
