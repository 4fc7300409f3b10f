//! Camera acquisition
//!
//! A [`CameraStream`] is a scoped resource: it is held by the mounted camera
//! panel and released when the panel is dropped.

use crate::{Result, VisionError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Which way the requested camera faces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacingMode {
    User,
    Environment,
}

/// Constraints for opening a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamRequest {
    pub facing: FacingMode,
    pub ideal_width: u32,
    pub ideal_height: u32,
}

impl Default for StreamRequest {
    fn default() -> Self {
        Self {
            facing: FacingMode::Environment,
            ideal_width: 1280,
            ideal_height: 720,
        }
    }
}

/// Source of camera streams
pub trait CameraDevice: Send + Sync {
    fn open(&self, request: &StreamRequest) -> Result<CameraStream>;
}

/// Open camera stream; stops its tracks when dropped
pub struct CameraStream {
    request: StreamRequest,
    on_release: Option<Box<dyn FnOnce() + Send>>,
}

impl CameraStream {
    pub fn new(request: StreamRequest) -> Self {
        Self {
            request,
            on_release: None,
        }
    }

    /// Run `release` when the stream is dropped
    pub fn with_release(mut self, release: impl FnOnce() + Send + 'static) -> Self {
        self.on_release = Some(Box::new(release));
        self
    }

    pub fn request(&self) -> &StreamRequest {
        &self.request
    }

    pub fn resolution(&self) -> (u32, u32) {
        (self.request.ideal_width, self.request.ideal_height)
    }
}

impl std::fmt::Debug for CameraStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraStream")
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}

impl Drop for CameraStream {
    fn drop(&mut self) {
        debug!("[CAMERA] Stopping stream");
        if let Some(release) = self.on_release.take() {
            release();
        }
    }
}

/// Camera that always "works" unless told otherwise
///
/// Availability can be flipped at runtime to exercise the permission-denied
/// path; the number of live streams is tracked so tests can verify release.
#[derive(Debug, Clone)]
pub struct SimulatedCamera {
    available: Arc<AtomicBool>,
    open_streams: Arc<AtomicUsize>,
}

impl Default for SimulatedCamera {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SimulatedCamera {
    pub fn new(available: bool) -> Self {
        Self {
            available: Arc::new(AtomicBool::new(available)),
            open_streams: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    /// Streams opened and not yet dropped
    pub fn open_streams(&self) -> usize {
        self.open_streams.load(Ordering::SeqCst)
    }
}

impl CameraDevice for SimulatedCamera {
    fn open(&self, request: &StreamRequest) -> Result<CameraStream> {
        if !self.is_available() {
            warn!("[CAMERA] Access denied");
            return Err(VisionError::CameraError("permission denied".to_string()));
        }

        self.open_streams.fetch_add(1, Ordering::SeqCst);
        info!(
            "[CAMERA] Opened {:?} stream at {}x{}",
            request.facing, request.ideal_width, request.ideal_height
        );

        let counter = Arc::clone(&self.open_streams);
        Ok(CameraStream::new(*request).with_release(move || {
            counter.fetch_sub(1, Ordering::SeqCst);
        }))
    }
}
