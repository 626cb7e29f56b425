//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the process log as tagged one-line records.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => {
                info!("START | leds pushed, accepting presses");
            }
            AppEvent::ButtonPressed(button) => {
                info!("BUTTON | {:?}", button);
            }
            AppEvent::ModeRejected(e) => {
                warn!("MODE | rejected: {}", e);
            }
            AppEvent::Classified {
                outcome,
                faces,
                attempts,
            } => {
                info!(
                    "CLASSIFY | outcome={:?} faces={} attempts={}",
                    outcome, faces, attempts
                );
            }
            AppEvent::RingAborted(e) => {
                warn!("BELL | aborted: {}", e);
            }
            AppEvent::Enrolled(list) => {
                info!("ENROLL | added to {}", list);
            }
            AppEvent::EnrollmentRejected(e) => {
                warn!("ENROLL | rejected: {}", e);
            }
            AppEvent::EnrollmentSkipped => {
                info!("ENROLL | skipped, sub-menu active");
            }
            AppEvent::Notified { photos } => {
                info!("NOTIFY | sent with {} photo(s)", photos);
            }
            AppEvent::NotificationFailed(e) => {
                warn!("NOTIFY | failed: {}", e);
            }
            AppEvent::Heartbeat(n) => {
                info!("HEARTBEAT | {}", n);
            }
        }
    }
}
