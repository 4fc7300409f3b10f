//! UI components and application module
//!
//! This module provides the egui/eframe-based desktop shell. All behaviour
//! lives in [`AppState`](crate::AppState); the UI only renders it and
//! forwards clicks and shortcuts.

mod app;
pub mod components;
mod theme;

pub use app::VisionApp;
pub use components::{Header, MicButton, NavTabs, StatusBar, VoicePalette};
pub use theme::Theme;
