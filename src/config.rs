//! Application configuration
//!
//! Loaded from TOML. Every section and field is optional; missing values
//! fall back to the defaults below.

use crate::state::{Settings, VoiceSpeed};
use crate::{Result, VisionError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "vision-assistant";

/// Configuration for the whole application
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub speech: SpeechConfig,
    pub display: DisplayConfig,
    pub simulation: SimulationConfig,
    pub camera: CameraConfig,
    pub recognizer: RecognizerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Initial voice speed
    pub voice_speed: VoiceSpeed,
    /// Start with voice output enabled
    pub sound_enabled: bool,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            voice_speed: VoiceSpeed::Normal,
            sound_enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub high_contrast: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// RNG seed; entropy when unset
    pub seed: Option<u64>,
    /// Delay before the welcome message
    pub welcome_delay_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            welcome_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Whether camera access is granted
    pub available: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { available: true }
    }
}

/// Speech recognition backend
///
/// Without transcripts there is no recognizer and listening reports
/// "not supported".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    /// Transcripts replayed one per activation
    pub transcripts: Vec<String>,
    /// Simulated recognition latency
    pub latency_ms: u64,
}

impl AppConfig {
    /// Parse a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| VisionError::ConfigError(e.to_string()))
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        config.validate()?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// `<config dir>/vision-assistant/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join("config.toml"))
    }

    /// Load the default config file when present, defaults otherwise
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.simulation.seed = Some(seed);
        self
    }

    pub fn with_voice_speed(mut self, speed: VoiceSpeed) -> Self {
        self.speech.voice_speed = speed;
        self
    }

    pub fn with_high_contrast(mut self, enabled: bool) -> Self {
        self.display.high_contrast = enabled;
        self
    }

    pub fn without_sound(mut self) -> Self {
        self.speech.sound_enabled = false;
        self
    }

    pub fn without_camera(mut self) -> Self {
        self.camera.available = false;
        self
    }

    pub fn with_transcripts<I, S>(mut self, transcripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recognizer.transcripts = transcripts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_welcome_delay(mut self, delay: Duration) -> Self {
        self.simulation.welcome_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn welcome_delay(&self) -> Duration {
        Duration::from_millis(self.simulation.welcome_delay_ms)
    }

    pub fn recognizer_latency(&self) -> Duration {
        Duration::from_millis(self.recognizer.latency_ms)
    }

    /// Initial process-wide settings
    pub fn settings(&self) -> Settings {
        Settings {
            high_contrast: self.display.high_contrast,
            sound_enabled: self.speech.sound_enabled,
            voice_speed: self.speech.voice_speed,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.simulation.welcome_delay_ms > 60_000 {
            return Err(VisionError::ConfigError(format!(
                "welcome_delay_ms must be at most 60000, got {}",
                self.simulation.welcome_delay_ms
            )));
        }
        if self.recognizer.latency_ms > 10_000 {
            return Err(VisionError::ConfigError(format!(
                "recognizer latency_ms must be at most 10000, got {}",
                self.recognizer.latency_ms
            )));
        }
        if let Some(blank) = self
            .recognizer
            .transcripts
            .iter()
            .position(|t| t.trim().is_empty())
        {
            return Err(VisionError::ConfigError(format!(
                "recognizer transcript {blank} is empty"
            )));
        }
        Ok(())
    }
}
