//! LED arbiter: turns a mode-register diff into driver calls.
//!
//! Every LED whose slot differs from the last pushed snapshot gets exactly
//! one [`LedPort::set_led_state`] call per push, in [`LedChannel::ALL`]
//! order.  Unchanged LEDs get none.  The snapshot is then replaced with the
//! current vector.  Diff, push and commit all happen under one `&mut`
//! borrow of the register, so no reader can observe a half-updated snapshot.

use log::debug;

use crate::app::ports::LedPort;
use crate::config::ChannelMap;

use super::ModeRegister;
use super::channels::LedChannel;

pub struct LedArbiter {
    /// Mode slot of each LED, in [`LedChannel::ALL`] order.
    slots: [(LedChannel, usize); 3],
}

impl LedArbiter {
    /// `slots` are the mode-vector indices of the red, yellow and green LEDs.
    pub fn new(slots: [usize; 3]) -> Self {
        let [red, yellow, green] = slots;
        Self {
            slots: [
                (LedChannel::Red, red),
                (LedChannel::Yellow, yellow),
                (LedChannel::Green, green),
            ],
        }
    }

    pub fn from_channels(map: &ChannelMap) -> Self {
        Self::new(LedChannel::ALL.map(|led| map.slot(led.channel())))
    }

    /// Mode-vector indices of all LED-bearing slots.
    pub fn led_slots(&self) -> [usize; 3] {
        self.slots.map(|(_, slot)| slot)
    }

    /// Push every changed LED to the driver and commit the snapshot.
    ///
    /// Returns the number of driver calls issued.
    pub fn push_led_states(&self, register: &mut ModeRegister, leds: &mut impl LedPort) -> usize {
        let changes: heapless::Vec<(LedChannel, u8), 3> = self
            .slots
            .iter()
            .filter_map(|&(led, slot)| register.changed(slot).map(|value| (led, value)))
            .collect();

        for &(led, value) in &changes {
            debug!("LED {:?} -> {}", led, value);
            leds.set_led_state(led, value);
        }

        register.commit();
        changes.len()
    }
}
