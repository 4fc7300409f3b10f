//! Keyboard shortcuts

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Modifier+key combination bound to an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Ctrl+Space: start voice recognition
    Listen,
    /// Ctrl+H: home screen
    Home,
    /// Ctrl+C: camera view
    Camera,
}

impl Shortcut {
    pub const ALL: [Shortcut; 3] = [Shortcut::Listen, Shortcut::Home, Shortcut::Camera];

    /// Resolve a key pressed together with Ctrl
    pub fn from_ctrl_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            ' ' => Some(Shortcut::Listen),
            'h' => Some(Shortcut::Home),
            'c' => Some(Shortcut::Camera),
            _ => None,
        }
    }

    pub fn combo(&self) -> &'static str {
        match self {
            Shortcut::Listen => "Ctrl+Space",
            Shortcut::Home => "Ctrl+H",
            Shortcut::Camera => "Ctrl+C",
        }
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.combo())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown shortcut '{0}' (expected ctrl+space, ctrl+h or ctrl+c)")]
pub struct ShortcutParseError(String);

impl FromStr for Shortcut {
    type Err = ShortcutParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(' ', "");
        match normalized.as_str() {
            "ctrl+space" => Ok(Shortcut::Listen),
            "ctrl+h" => Ok(Shortcut::Home),
            "ctrl+c" => Ok(Shortcut::Camera),
            _ => Err(ShortcutParseError(s.to_string())),
        }
    }
}
