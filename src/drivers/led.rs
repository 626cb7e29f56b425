//! Single-colour indicator LED driver.
//!
//! The controller hands each LED a mode value; the driver turns it into a
//! pattern and the poll loop (or a controller hold) calls `tick()` to
//! advance it.
//!
//! | Mode value | Pattern | Rate |
//! |------------|---------|------|
//! | 0          | Off     | n/a  |
//! | 3          | Blink   | 2 Hz |
//! | other      | Solid   | n/a  |

use embedded_hal::digital::{OutputPin, PinState};
use log::warn;

use crate::mode::channels::LedChannel;
use crate::mode::{MODE_ALTERNATE, MODE_OFF};

/// Full blink period in milliseconds.
pub const BLINK_PERIOD_MS: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedPattern {
    Off,
    Solid,
    Blink,
}

impl LedPattern {
    pub fn from_mode(value: u8) -> Self {
        match value {
            MODE_OFF => Self::Off,
            MODE_ALTERNATE => Self::Blink,
            _ => Self::Solid,
        }
    }
}

pub struct LedDriver<P> {
    channel: LedChannel,
    pin: P,
    pattern: LedPattern,
    phase_ms: u32,
    lit: bool,
}

impl<P: OutputPin> LedDriver<P> {
    pub fn new(channel: LedChannel, pin: P) -> Self {
        let mut led = Self {
            channel,
            pin,
            pattern: LedPattern::Off,
            phase_ms: 0,
            lit: true,
        };
        led.drive(false);
        led
    }

    pub fn channel(&self) -> LedChannel {
        self.channel
    }

    pub fn pattern(&self) -> LedPattern {
        self.pattern
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    /// Apply a mode value.  The blink phase restarts on every change.
    pub fn set_state(&mut self, value: u8) {
        self.pattern = LedPattern::from_mode(value);
        self.phase_ms = 0;
        self.refresh();
    }

    /// Advance the pattern by `delta_ms`.
    pub fn tick(&mut self, delta_ms: u32) {
        self.phase_ms = self.phase_ms.wrapping_add(delta_ms) % BLINK_PERIOD_MS;
        self.refresh();
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }

    fn refresh(&mut self) {
        let on = match self.pattern {
            LedPattern::Off => false,
            LedPattern::Solid => true,
            LedPattern::Blink => self.phase_ms < BLINK_PERIOD_MS / 2,
        };
        self.drive(on);
    }

    fn drive(&mut self, on: bool) {
        if on == self.lit {
            return;
        }
        if self.pin.set_state(PinState::from(on)).is_err() {
            warn!("{:?} LED: pin write failed", self.channel);
            return;
        }
        self.lit = on;
    }
}
