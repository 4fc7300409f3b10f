//! Vision Assistant - voice-controlled accessibility shell
//!
//! The library holds every piece of behaviour (command interpreter, view
//! model, speech adapters, simulated vision/navigation/recipe engines and
//! camera acquisition) so it can be driven headless by the scenario runner
//! or rendered by the egui front-end in [`ui`].

pub mod camera;
pub mod command;
pub mod config;
pub mod panels;
pub mod scenario;
pub mod sim;
pub mod speech;
pub mod state;
pub mod ui;

use thiserror::Error;

pub use command::{interpret, Command, Shortcut};
pub use config::AppConfig;
pub use state::{AppState, Settings, View, VoiceSpeed};

#[derive(Error, Debug, Clone)]
pub enum VisionError {
    #[error("Camera error: {0}")]
    CameraError(String),

    #[error("Recognition error: {0}")]
    RecognitionError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Scenario error: {0}")]
    ScenarioError(String),

    #[error("IO error: {0}")]
    IOError(String),
}

impl From<std::io::Error> for VisionError {
    fn from(e: std::io::Error) -> Self {
        VisionError::IOError(e.to_string())
    }
}

impl VisionError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Permission or hardware problems, the user can retry from the panel
            VisionError::CameraError(_) => true,
            VisionError::RecognitionError(_) => true,
            VisionError::ConfigError(_) => false,
            VisionError::ScenarioError(_) => false,
            VisionError::IOError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            VisionError::CameraError(_) => {
                "Unable to access camera. Please check permissions.".to_string()
            }
            VisionError::RecognitionError(_) => {
                "Sorry, I didn't catch that. Please try again.".to_string()
            }
            VisionError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            VisionError::ScenarioError(_) => "Scenario file is invalid.".to_string(),
            VisionError::IOError(_) => "File system error occurred.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VisionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors() {
        assert!(VisionError::CameraError("denied".into()).is_recoverable());
        assert!(VisionError::RecognitionError("no-speech".into()).is_recoverable());
        assert!(!VisionError::ConfigError("bad".into()).is_recoverable());
    }

    #[test]
    fn test_every_variant_has_a_message() {
        let all = [
            VisionError::CameraError("denied".into()),
            VisionError::RecognitionError("no-speech".into()),
            VisionError::ConfigError("bad".into()),
            VisionError::ScenarioError("no exit".into()),
            VisionError::IOError("missing".into()),
        ];
        let recoverable: Vec<bool> = all.iter().map(VisionError::is_recoverable).collect();
        assert_eq!(recoverable, [true, true, false, false, false]);
        assert!(all.iter().all(|e| !e.user_message().is_empty()));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: VisionError = io.into();
        assert!(matches!(err, VisionError::IOError(_)));
        assert_eq!(err.user_message(), "File system error occurred.");
    }
}
