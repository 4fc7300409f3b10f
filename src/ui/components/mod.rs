//! UI components module
//!
//! One component per view plus the shell pieces (header, tabs, microphone,
//! status bar, voice palette).

pub mod camera_view;
pub mod environment_map;
pub mod header;
pub mod home;
pub mod mic_button;
pub mod nav_tabs;
pub mod navigation_panel;
pub mod settings_panel;
pub mod status_bar;
pub mod task_assistant;
pub mod voice_palette;

pub use camera_view::{CameraView, ObjectList};
pub use environment_map::EnvironmentMap;
pub use header::Header;
pub use home::HomeView;
pub use mic_button::MicButton;
pub use nav_tabs::NavTabs;
pub use navigation_panel::NavigationView;
pub use settings_panel::SettingsPanel;
pub use status_bar::StatusBar;
pub use task_assistant::TaskAssistant;
pub use voice_palette::VoicePalette;
