//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ DoorbellController (domain)
//! ```
//!
//! Driven adapters (GPIO board, camera, face engine, chat transport,
//! reference storage, event sinks) implement these traits.  The
//! [`DoorbellController`](super::service::DoorbellController) consumes them
//! via generics, so the domain core never touches hardware directly.

use std::path::Path;
use std::time::Duration;

use crate::error::{CaptureError, StoreError, TransportError};
use crate::face::{BoundingBox, FaceEncoding, compare_encodings};
use crate::mode::channels::LedChannel;
use crate::storage::ListId;

// ───────────────────────────────────────────────────────────────
// Shared value types
// ───────────────────────────────────────────────────────────────

/// An encoded still image as produced by the camera.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    /// File extension matching the encoding of `bytes` (e.g. `"jpeg"`).
    pub extension: &'static str,
    pub bytes: Vec<u8>,
}

/// Chat conversation identifier understood by the transport.
pub type ChatId = i64;

// ───────────────────────────────────────────────────────────────
// LED port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the three status LEDs.
pub trait LedPort {
    /// Drive `led` to a mode value: 0 = off, 1 = on, 3 = alternate (blink).
    /// Other values are channel-specific and passed through untouched.
    fn set_led_state(&mut self, led: LedChannel, value: u8);
}

// ───────────────────────────────────────────────────────────────
// Time port
// ───────────────────────────────────────────────────────────────

pub trait TimePort {
    /// Wall-clock seconds since the Unix epoch.
    fn now_unix_secs(&self) -> u64;

    /// Block the control flow for `duration`.
    ///
    /// This is the display/acknowledgement hold.  Hardware adapters keep
    /// LED patterns animated while holding.
    fn hold(&mut self, duration: Duration);
}

// ───────────────────────────────────────────────────────────────
// Camera and face engine ports
// ───────────────────────────────────────────────────────────────

pub trait CameraPort {
    fn capture(&mut self) -> Result<Image, CaptureError>;
}

/// External face location / encoding primitive.
pub trait FaceEnginePort {
    /// Face boxes in `image`; empty when none are found.
    fn locate_faces(&mut self, image: &Image) -> Result<Vec<BoundingBox>, CaptureError>;

    /// One encoding per box, in box order.
    fn encode_faces(
        &mut self,
        image: &Image,
        boxes: &[BoundingBox],
    ) -> Result<Vec<FaceEncoding>, CaptureError>;

    /// One boolean per reference.  Defaults to the Euclidean contract of
    /// [`compare_encodings`].
    fn compare(
        &self,
        references: &[FaceEncoding],
        candidate: &FaceEncoding,
        tolerance: f64,
    ) -> Vec<bool> {
        compare_encodings(references, candidate, tolerance)
    }
}

// ───────────────────────────────────────────────────────────────
// Reference storage port
// ───────────────────────────────────────────────────────────────

/// Append-only storage of face encodings per list.
///
/// Implementations MUST NOT rewrite or deduplicate existing rows, and an
/// append MUST either land a whole row or nothing.
pub trait ReferenceStorePort {
    /// Every encoding in `list`, in insertion order.
    fn load(&self, list: ListId) -> Result<Vec<FaceEncoding>, StoreError>;

    fn append(&mut self, list: ListId, encoding: &FaceEncoding) -> Result<(), StoreError>;
}

// ───────────────────────────────────────────────────────────────
// Notifier port (driven adapter: domain → chat transport)
// ───────────────────────────────────────────────────────────────

pub trait NotifierPort {
    /// Conversation to address notifications to.
    ///
    /// `Ok(None)` means the transport knows no conversation; the gate treats
    /// that as a configuration error.
    fn chat_target(&mut self) -> Result<Option<ChatId>, TransportError>;

    fn send_text(&mut self, chat: ChatId, text: &str) -> Result<(), TransportError>;

    fn send_photo(&mut self, chat: ChatId, photo: &Path, caption: &str)
    -> Result<(), TransportError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Hardware bundle
// ───────────────────────────────────────────────────────────────

/// Everything the controller drives during one button handler.
///
/// Blanket-implemented, so a single board adapter (or test mock) that
/// satisfies the four ports can be passed as one `&mut` without double
/// mutable borrows.
pub trait DoorbellHardware: LedPort + TimePort + CameraPort + FaceEnginePort {}

impl<T: LedPort + TimePort + CameraPort + FaceEnginePort> DoorbellHardware for T {}
