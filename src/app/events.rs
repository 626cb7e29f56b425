//! Outbound application events.
//!
//! The [`DoorbellController`](super::service::DoorbellController) emits
//! these through the [`EventSink`](super::ports::EventSink) port.  Adapters
//! on the other side decide what to do with them.

use crate::error::Error;
use crate::face::classifier::ClassificationOutcome;
use crate::mode::channels::ButtonId;
use crate::storage::ListId;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The controller pushed its initial LED state and is accepting presses.
    Started,

    /// A debounced button press is being handled.
    ButtonPressed(ButtonId),

    /// A mode-vector mutation was rejected.
    ModeRejected(Error),

    /// The bell path classified the visitor.
    Classified {
        outcome: ClassificationOutcome,
        faces: usize,
        attempts: u32,
    },

    /// The bell path aborted before classification.
    RingAborted(Error),

    /// An encoding was appended to a reference list.
    Enrolled(ListId),

    /// Enrollment ended without touching any list.
    EnrollmentRejected(Error),

    /// Yellow was pressed with a mode combination that has no enrollment target.
    EnrollmentSkipped,

    /// A notification went out.
    Notified { photos: usize },

    /// The notification transport failed; LED and mode state are unaffected.
    NotificationFailed(Error),

    /// Liveness marker from the main loop.
    Heartbeat(u64),
}
