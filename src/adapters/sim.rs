//! Host simulation stubs.
//!
//! Stand-ins for the GPIO pins, the camera, the face engine and the chat
//! transport so the controller runs end to end on a development machine.
//! Pins log their transitions; the notifier logs what it would send.

use core::convert::Infallible;
use std::path::Path;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use log::{debug, info};

use crate::app::ports::{CameraPort, ChatId, FaceEnginePort, Image, NotifierPort};
use crate::error::{CaptureError, TransportError};
use crate::face::{BoundingBox, FaceEncoding};

// ── Pins ──────────────────────────────────────────────────────

/// In-memory pin.  Inputs idle high (pull-up); outputs start low.
#[derive(Debug, Clone)]
pub struct SimPin {
    high: bool,
}

impl SimPin {
    pub fn input() -> Self {
        Self { high: true }
    }

    pub fn output() -> Self {
        Self { high: false }
    }

    pub fn is_set_high(&self) -> bool {
        self.high
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl InputPin for SimPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.high)
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.high)
    }
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.high = true;
        Ok(())
    }
}

// ── Camera ────────────────────────────────────────────────────

/// Produces a fixed placeholder frame.
#[derive(Debug, Default)]
pub struct SimCamera {
    frames: u64,
}

impl SimCamera {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CameraPort for SimCamera {
    fn capture(&mut self) -> Result<Image, CaptureError> {
        self.frames += 1;
        debug!("SimCamera frame {}", self.frames);
        Ok(Image {
            width: 640,
            height: 480,
            extension: "jpeg",
            bytes: b"SIMFRAME".to_vec(),
        })
    }
}

// ── Face engine ───────────────────────────────────────────────

/// Never finds a face.
#[derive(Debug, Default)]
pub struct NullFaceEngine;

impl FaceEnginePort for NullFaceEngine {
    fn locate_faces(&mut self, _image: &Image) -> Result<Vec<BoundingBox>, CaptureError> {
        Ok(Vec::new())
    }

    fn encode_faces(
        &mut self,
        _image: &Image,
        boxes: &[BoundingBox],
    ) -> Result<Vec<FaceEncoding>, CaptureError> {
        Ok(boxes.iter().map(|_| FaceEncoding::new([0.0; crate::face::ENCODING_DIM])).collect())
    }
}

// ── Notifier ──────────────────────────────────────────────────

/// Logs notifications instead of sending them.
#[derive(Debug)]
pub struct LogNotifier {
    chat: Option<ChatId>,
}

impl LogNotifier {
    pub fn new(chat: Option<ChatId>) -> Self {
        Self { chat }
    }
}

impl NotifierPort for LogNotifier {
    fn chat_target(&mut self) -> Result<Option<ChatId>, TransportError> {
        Ok(self.chat)
    }

    fn send_text(&mut self, chat: ChatId, text: &str) -> Result<(), TransportError> {
        info!("NOTIFY -> {} | {}", chat, text);
        Ok(())
    }

    fn send_photo(&mut self, chat: ChatId, photo: &Path, caption: &str) -> Result<(), TransportError> {
        info!("NOTIFY -> {} | photo {} | {}", chat, photo.display(), caption);
        Ok(())
    }
}
