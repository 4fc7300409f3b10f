//! Per-view panel state
//!
//! A panel is created when its view becomes active and dropped when the view
//! changes, so every piece of mock state (scan progress, navigation walk,
//! cooking step, camera stream) starts fresh on each visit.

pub mod camera;
pub mod map;
pub mod navigation;
pub mod tasks;

pub use camera::CameraPanel;
pub use map::MapPanel;
pub use navigation::NavigationPanel;
pub use tasks::TasksPanel;

use crate::camera::CameraDevice;
use crate::sim::DetectedObject;
use crate::speech::SpeechOutput;
use crate::state::View;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;

/// App-level state a panel may touch
pub struct PanelContext<'a> {
    pub speech: &'a mut SpeechOutput,
    pub rng: &'a mut StdRng,
    /// Shared with the status bar
    pub detected: &'a mut Vec<DetectedObject>,
    pub environment_mapped: &'a mut bool,
}

/// The mounted panel
#[derive(Debug)]
pub enum Panel {
    Home,
    Camera(CameraPanel),
    Navigation(NavigationPanel),
    Map(MapPanel),
    Tasks(TasksPanel),
    Settings,
}

impl Panel {
    /// Create the panel for `view`, running its mount-time effects
    pub fn mount(view: View, camera: &Arc<dyn CameraDevice>, speech: &mut SpeechOutput) -> Self {
        match view {
            View::Home => Panel::Home,
            View::Camera => Panel::Camera(CameraPanel::mount(Arc::clone(camera), speech)),
            View::Navigation => Panel::Navigation(NavigationPanel::default()),
            View::Map => Panel::Map(MapPanel::default()),
            View::Tasks => Panel::Tasks(TasksPanel::default()),
            View::Settings => Panel::Settings,
        }
    }

    pub fn view(&self) -> View {
        match self {
            Panel::Home => View::Home,
            Panel::Camera(_) => View::Camera,
            Panel::Navigation(_) => View::Navigation,
            Panel::Map(_) => View::Map,
            Panel::Tasks(_) => View::Tasks,
            Panel::Settings => View::Settings,
        }
    }

    /// Drive the panel's timers
    pub fn advance(&mut self, dt: Duration, ctx: &mut PanelContext<'_>) {
        match self {
            Panel::Camera(panel) => panel.advance(dt, ctx),
            Panel::Navigation(panel) => panel.advance(dt, ctx.speech),
            Panel::Tasks(panel) => panel.advance(dt, ctx.speech),
            Panel::Home | Panel::Map(_) | Panel::Settings => {}
        }
    }

    pub fn camera(&self) -> Option<&CameraPanel> {
        match self {
            Panel::Camera(panel) => Some(panel),
            _ => None,
        }
    }

    pub fn camera_mut(&mut self) -> Option<&mut CameraPanel> {
        match self {
            Panel::Camera(panel) => Some(panel),
            _ => None,
        }
    }

    pub fn navigation(&self) -> Option<&NavigationPanel> {
        match self {
            Panel::Navigation(panel) => Some(panel),
            _ => None,
        }
    }

    pub fn navigation_mut(&mut self) -> Option<&mut NavigationPanel> {
        match self {
            Panel::Navigation(panel) => Some(panel),
            _ => None,
        }
    }

    pub fn map(&self) -> Option<&MapPanel> {
        match self {
            Panel::Map(panel) => Some(panel),
            _ => None,
        }
    }

    pub fn map_mut(&mut self) -> Option<&mut MapPanel> {
        match self {
            Panel::Map(panel) => Some(panel),
            _ => None,
        }
    }

    pub fn tasks(&self) -> Option<&TasksPanel> {
        match self {
            Panel::Tasks(panel) => Some(panel),
            _ => None,
        }
    }

    pub fn tasks_mut(&mut self) -> Option<&mut TasksPanel> {
        match self {
            Panel::Tasks(panel) => Some(panel),
            _ => None,
        }
    }
}
