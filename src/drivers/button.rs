//! Debounced push-button driver.
//!
//! ## Hardware
//!
//! Active-low momentary switch with pull-up.  The main loop polls
//! [`ButtonDriver::tick`] at the poll interval; a press is reported on the
//! high→low edge, after which further edges are ignored for the debounce
//! period.
//!
//! | Button        | Debounce |
//! |---------------|----------|
//! | Red / Yellow / Green | 500 ms |
//! | Bell          | 1500 ms  |

use embedded_hal::digital::InputPin;
use log::warn;

use crate::mode::channels::ButtonId;

pub struct ButtonDriver<P> {
    id: ButtonId,
    pin: P,
    debounce_ms: u32,
    was_low: bool,
    last_press_ms: Option<u32>,
}

impl<P: InputPin> ButtonDriver<P> {
    pub fn new(id: ButtonId, pin: P, debounce_ms: u32) -> Self {
        Self {
            id,
            pin,
            debounce_ms,
            was_low: false,
            last_press_ms: None,
        }
    }

    /// Sample the pin.  `now_ms` is monotonic milliseconds since start.
    /// Returns the button id on a debounced press edge.
    pub fn tick(&mut self, now_ms: u32) -> Option<ButtonId> {
        let low = match self.pin.is_low() {
            Ok(low) => low,
            Err(_) => {
                warn!("{:?} button: pin read failed", self.id);
                return None;
            }
        };
        let edge = low && !self.was_low;
        self.was_low = low;
        if !edge {
            return None;
        }

        if let Some(last) = self.last_press_ms {
            if now_ms.wrapping_sub(last) < self.debounce_ms {
                return None;
            }
        }
        self.last_press_ms = Some(now_ms);
        Some(self.id)
    }

    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }
}
