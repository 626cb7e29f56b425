//! Bell capture loop.
//!
//! Captures and searches for faces until at least one is found.  The
//! loop is bounded by `max_capture_attempts`; without the bound a bell
//! press with nobody in frame would block the controller indefinitely.
//! Every attempt is stored in the doorbell capture directory so the
//! notification can show what the camera saw.

use log::{debug, info, warn};

use crate::error::{CaptureError, Result};
use crate::face::FaceEncoding;
use crate::storage::captures::CaptureStore;

use super::ports::{CameraPort, FaceEnginePort, Image, TimePort};

/// Faces found by the loop.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceCapture {
    /// One encoding per located face.
    pub encodings: Vec<FaceEncoding>,
    /// Captures taken, including the successful one.
    pub attempts: u32,
    /// Timestamp of the successful capture.
    pub timestamp: u64,
}

pub struct CaptureLoop {
    captures: CaptureStore,
    max_attempts: u32,
}

impl CaptureLoop {
    pub fn new(captures: CaptureStore, max_attempts: u32) -> Self {
        Self {
            captures,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn run(&self, hw: &mut (impl CameraPort + FaceEnginePort + TimePort)) -> Result<FaceCapture> {
        for attempt in 1..=self.max_attempts {
            let image = hw.capture()?;
            let timestamp = hw.now_unix_secs();
            store_capture(&self.captures, timestamp, &image);

            let boxes = hw.locate_faces(&image)?;
            if boxes.is_empty() {
                debug!("Capture {}/{}: no face", attempt, self.max_attempts);
                continue;
            }

            let encodings = hw.encode_faces(&image, &boxes)?;
            if encodings.len() != boxes.len() {
                return Err(CaptureError::EncodingMismatch {
                    faces: boxes.len(),
                    encodings: encodings.len(),
                }
                .into());
            }
            info!("Capture {}: {} face(s) located", attempt, boxes.len());
            return Ok(FaceCapture {
                encodings,
                attempts: attempt,
                timestamp,
            });
        }

        warn!("No face after {} captures, giving up", self.max_attempts);
        Err(CaptureError::NoFaceWithinAttempts(self.max_attempts).into())
    }
}

/// Persist a capture.  Failure only costs the notification its photo.
pub(crate) fn store_capture(captures: &CaptureStore, timestamp: u64, image: &Image) {
    if let Err(e) = captures.save(timestamp, image) {
        warn!("Capture at {} not stored: {}", timestamp, e);
    }
}
