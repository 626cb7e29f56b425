//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (button drivers,
//! maintenance tooling) that the
//! [`DoorbellController`](super::service::DoorbellController) interprets and
//! acts upon.

use crate::mode::channels::ButtonId;
use crate::storage::ListId;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// A debounced press of one of the four buttons.
    Press(ButtonId),

    /// Enroll the face in front of the camera into a specific list,
    /// bypassing the button-mode menu.
    Enroll(ListId),

    /// Run the bell capture-and-classify path without a button edge.
    Ring,
}
