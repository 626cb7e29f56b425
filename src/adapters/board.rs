//! Board adapter: bridges GPIO drivers, camera and face engine to the
//! domain port traits.
//!
//! Owns the four [`ButtonDriver`]s, the three [`LedDriver`]s and the
//! camera / face engine collaborators, exposing them through
//! [`LedPort`], [`TimePort`], [`CameraPort`] and [`FaceEnginePort`].
//! This is the only module that touches pins.  During a
//! [`hold`](TimePort::hold) the LEDs keep ticking but buttons are not
//! sampled, so presses during a hold are not observed.

use std::time::Duration;

use embedded_hal::digital::{InputPin, OutputPin};
use log::debug;

use crate::app::ports::{CameraPort, FaceEnginePort, Image, LedPort, TimePort};
use crate::drivers::button::ButtonDriver;
use crate::drivers::led::LedDriver;
use crate::error::CaptureError;
use crate::events::{Event, EventQueue};
use crate::face::{BoundingBox, FaceEncoding};
use crate::mode::channels::LedChannel;

use super::time::SystemClock;

/// Concrete adapter that combines all doorbell hardware behind port traits.
pub struct GpioBoard<I, O, C, F> {
    buttons: [ButtonDriver<I>; 4],
    leds: [LedDriver<O>; 3],
    camera: C,
    engine: F,
    clock: SystemClock,
    poll_interval: Duration,
}

impl<I, O, C, F> GpioBoard<I, O, C, F>
where
    I: InputPin,
    O: OutputPin,
    C: CameraPort,
    F: FaceEnginePort,
{
    pub fn new(
        buttons: [ButtonDriver<I>; 4],
        leds: [LedDriver<O>; 3],
        camera: C,
        engine: F,
        poll_interval: Duration,
    ) -> Self {
        Self {
            buttons,
            leds,
            camera,
            engine,
            clock: SystemClock::new(),
            poll_interval,
        }
    }

    /// Sample every button once and queue the debounced presses.
    /// Returns the number of presses queued.
    pub fn poll_buttons(&mut self, queue: &mut EventQueue) -> usize {
        let now_ms = self.clock.uptime_ms();
        let mut pressed = 0;
        for button in &mut self.buttons {
            if let Some(id) = button.tick(now_ms) {
                if queue.push(Event::Button(id)) {
                    pressed += 1;
                }
            }
        }
        pressed
    }

    /// Advance LED patterns by one poll interval.
    pub fn tick_leds(&mut self) {
        let delta = self.poll_interval.as_millis() as u32;
        for led in &mut self.leds {
            led.tick(delta);
        }
    }

    pub fn led(&self, channel: LedChannel) -> Option<&LedDriver<O>> {
        self.leds.iter().find(|l| l.channel() == channel)
    }
}

// ── LedPort implementation ────────────────────────────────────

impl<I, O: OutputPin, C, F> LedPort for GpioBoard<I, O, C, F> {
    fn set_led_state(&mut self, led: LedChannel, value: u8) {
        debug!("LED {:?} <- {}", led, value);
        if let Some(driver) = self.leds.iter_mut().find(|l| l.channel() == led) {
            driver.set_state(value);
        }
    }
}

// ── TimePort implementation ───────────────────────────────────

impl<I, O: OutputPin, C, F> TimePort for GpioBoard<I, O, C, F> {
    fn now_unix_secs(&self) -> u64 {
        self.clock.unix_secs()
    }

    fn hold(&mut self, duration: Duration) {
        let step = self.poll_interval.max(Duration::from_millis(1));
        let delta_ms = step.as_millis() as u32;
        let mut remaining = duration;
        while !remaining.is_zero() {
            let slice = remaining.min(step);
            std::thread::sleep(slice);
            remaining -= slice;
            for led in &mut self.leds {
                led.tick(delta_ms);
            }
        }
    }
}

// ── CameraPort / FaceEnginePort delegation ────────────────────

impl<I, O, C: CameraPort, F> CameraPort for GpioBoard<I, O, C, F> {
    fn capture(&mut self) -> Result<Image, CaptureError> {
        self.camera.capture()
    }
}

impl<I, O, C, F: FaceEnginePort> FaceEnginePort for GpioBoard<I, O, C, F> {
    fn locate_faces(&mut self, image: &Image) -> Result<Vec<BoundingBox>, CaptureError> {
        self.engine.locate_faces(image)
    }

    fn encode_faces(
        &mut self,
        image: &Image,
        boxes: &[BoundingBox],
    ) -> Result<Vec<FaceEncoding>, CaptureError> {
        self.engine.encode_faces(image, boxes)
    }

    fn compare(
        &self,
        references: &[FaceEncoding],
        candidate: &FaceEncoding,
        tolerance: f64,
    ) -> Vec<bool> {
        self.engine.compare(references, candidate, tolerance)
    }
}
