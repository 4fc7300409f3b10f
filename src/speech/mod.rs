//! Speech adapters for spoken feedback and voice commands
//!
//! This module provides:
//! - Speech output (text-to-speech) behind the [`SpeechEngine`] trait
//! - One-shot speech input (speech-to-text) behind the [`Recognizer`] trait

pub mod stt;
pub mod tts;

// Re-export commonly used types
pub use stt::{
    ListenOutcome, ListenStart, ListeningState, RecognitionOptions, Recognizer,
    ScriptedRecognizer, SpeechInput, UnsupportedRecognizer, RECOGNITION_LOCALE,
};
pub use tts::{
    Priority, SimulatedEngine, SpeechEngine, SpeechEvent, SpeechOutput, Utterance, SPEECH_PITCH,
    SPEECH_VOLUME,
};
