//! Outcome policy: what the doorbell shows and whether it notifies.
//!
//! | Outcome      | LED effect          | Notify | Caption marker |
//! |--------------|---------------------|--------|----------------|
//! | `DenyMatch`  | red = on            | yes    | 🔺             |
//! | `AllowMatch` | green = on          | no     | n/a            |
//! | `BothMatch`  | yellow = alternate  | yes    | ◾             |
//! | `NoMatch`    | yellow = on         | yes    | 🔸             |

use crate::mode::channels::LedChannel;
use crate::mode::{MODE_ALTERNATE, MODE_ON};

use super::classifier::ClassificationOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomePolicy {
    pub led: LedChannel,
    pub led_value: u8,
    /// `Some(marker)` when the outcome must be notified; the marker
    /// prefixes every photo caption.
    pub notify: Option<&'static str>,
}

impl OutcomePolicy {
    pub fn should_notify(&self) -> bool {
        self.notify.is_some()
    }
}

pub fn policy_for(outcome: ClassificationOutcome) -> OutcomePolicy {
    match outcome {
        ClassificationOutcome::DenyMatch => OutcomePolicy {
            led: LedChannel::Red,
            led_value: MODE_ON,
            notify: Some("\u{1F53A}"),
        },
        ClassificationOutcome::AllowMatch => OutcomePolicy {
            led: LedChannel::Green,
            led_value: MODE_ON,
            notify: None,
        },
        ClassificationOutcome::BothMatch => OutcomePolicy {
            led: LedChannel::Yellow,
            led_value: MODE_ALTERNATE,
            notify: Some("\u{25FE}"),
        },
        ClassificationOutcome::NoMatch => OutcomePolicy {
            led: LedChannel::Yellow,
            led_value: MODE_ON,
            notify: Some("\u{1F538}"),
        },
    }
}
