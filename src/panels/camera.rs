//! Environment vision panel

use super::PanelContext;
use crate::camera::{CameraDevice, CameraStream, StreamRequest};
use crate::sim::detection::{self, DetectedObject, EnvironmentScan};
use crate::speech::{Priority, SpeechOutput};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub struct CameraPanel {
    device: Arc<dyn CameraDevice>,
    stream: Option<CameraStream>,
    error: Option<String>,
    scan: Option<EnvironmentScan>,
    objects: Vec<DetectedObject>,
}

impl std::fmt::Debug for CameraPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraPanel")
            .field("stream", &self.stream)
            .field("error", &self.error)
            .field("scan", &self.scan)
            .field("objects", &self.objects)
            .finish_non_exhaustive()
    }
}

impl CameraPanel {
    /// Mount the panel and request the camera
    pub fn mount(device: Arc<dyn CameraDevice>, speech: &mut SpeechOutput) -> Self {
        let mut panel = Self {
            device,
            stream: None,
            error: None,
            scan: None,
            objects: Vec::new(),
        };
        panel.start_camera(speech);
        panel
    }

    fn start_camera(&mut self, speech: &mut SpeechOutput) {
        // Release any previous stream before asking again
        self.stream = None;

        match self.device.open(&StreamRequest::default()) {
            Ok(stream) => {
                info!("[CAMERA] Stream ready");
                self.stream = Some(stream);
                self.error = None;
                speech.speak(
                    "Camera activated. Point your device to scan the environment.",
                    Priority::Normal,
                );
            }
            Err(e) => {
                warn!("[CAMERA] Camera access error: {}", e);
                self.error = Some(e.user_message());
                speech.speak(
                    "Camera access failed. Please check your device permissions.",
                    Priority::High,
                );
            }
        }
    }

    /// "Retry Camera Access"
    pub fn retry(&mut self, speech: &mut SpeechOutput) {
        self.start_camera(speech);
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_stream(&self) -> bool {
        self.stream.is_some()
    }

    /// Scan, describe and detect are unavailable while the camera is failing
    pub fn controls_enabled(&self) -> bool {
        self.error.is_none()
    }

    pub fn is_scanning(&self) -> bool {
        self.scan.is_some()
    }

    pub fn can_scan(&self) -> bool {
        self.controls_enabled() && !self.is_scanning()
    }

    /// Scan progress in percent, when a scan is running
    pub fn scan_progress(&self) -> Option<u8> {
        self.scan.as_ref().map(EnvironmentScan::progress)
    }

    pub fn objects(&self) -> &[DetectedObject] {
        &self.objects
    }

    /// Returns false when the control is disabled
    pub fn start_scan(&mut self, speech: &mut SpeechOutput) -> bool {
        if !self.can_scan() {
            return false;
        }
        self.scan = Some(EnvironmentScan::new());
        speech.speak(
            "Starting environment scan. Please slowly move your camera around the room.",
            Priority::Normal,
        );
        true
    }

    pub fn detect_objects(&mut self, ctx: &mut PanelContext<'_>) -> bool {
        if !self.controls_enabled() {
            return false;
        }
        self.run_detection(ctx);
        true
    }

    fn run_detection(&mut self, ctx: &mut PanelContext<'_>) {
        self.objects = detection::detect_objects(ctx.rng);
        ctx.detected.clone_from(&self.objects);
        if let Some(announcement) = detection::scan_announcement(&self.objects) {
            ctx.speech.speak(announcement, Priority::Normal);
        }
    }

    pub fn describe_scene(&self, speech: &mut SpeechOutput) -> bool {
        if !self.controls_enabled() {
            return false;
        }
        speech.speak(detection::describe_scene(&self.objects), Priority::Normal);
        true
    }

    /// Read out one detected object
    pub fn announce_object(&self, index: usize, speech: &mut SpeechOutput) {
        if let Some(obj) = self.objects.get(index) {
            speech.speak(obj.announcement(), Priority::Normal);
        }
    }

    pub fn advance(&mut self, dt: Duration, ctx: &mut PanelContext<'_>) {
        let Some(scan) = self.scan.as_mut() else {
            return;
        };
        if scan.advance(dt) {
            self.scan = None;
            self.run_detection(ctx);
            ctx.speech.speak(
                "Environment scan complete. I have mapped your surroundings.",
                Priority::Normal,
            );
            *ctx.environment_mapped = true;
            info!("[CAMERA] Environment mapped");
        }
    }
}
