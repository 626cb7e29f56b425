//! Application service: the hexagonal core.
//!
//! [`DoorbellController`] owns the mode register, the LED arbiter and the
//! classification / enrollment / notification workflows.  It handles one
//! button event at a time, to completion; the display holds and the bell
//! capture loop block the whole control flow.
//!
//! ```text
//!  Button edge ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                  │      DoorbellController      │
//!  DoorbellHW  ◀──│ ModeRegister · LedArbiter     │ ──▶ NotifierPort
//!  (LED, time,     │ Classifier · Enroll · Notify │ ◀─▶ ReferenceStorePort
//!   camera, face)  └──────────────────────────────┘
//! ```
//!
//! | Button | Effect                                                          |
//! |--------|-----------------------------------------------------------------|
//! | Red    | toggle red mode slot, flash red LED                              |
//! | Green  | toggle green mode slot, flash green LED                          |
//! | Yellow | yellow LED on; enroll into the list selected by the mode slots  |
//! | Bell   | capture until a face is found, classify, show, notify           |

use std::time::Duration;

use log::{error, info, warn};

use crate::config::{ChannelMap, DoorbellConfig};
use crate::error::{ConfigError, Error, ModeError, Result};
use crate::face::classifier::{ClassificationOutcome, EngineComparator, FaceClassifier};
use crate::face::policy::policy_for;
use crate::mode::arbiter::LedArbiter;
use crate::mode::channels::{ButtonId, Channel, LedChannel};
use crate::mode::{MODE_ALTERNATE, MODE_OFF, MODE_ON, ModeOp, ModeRegister};
use crate::storage::ListId;
use crate::storage::captures::CaptureStore;

use super::commands::AppCommand;
use super::doorbell::CaptureLoop;
use super::enrollment::EnrollmentWorkflow;
use super::events::AppEvent;
use super::notify::NotificationGate;
use super::ports::{DoorbellHardware, EventSink, LedPort, NotifierPort, ReferenceStorePort};

// ───────────────────────────────────────────────────────────────
// Hold durations
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct Holds {
    display: Duration,
    enroll_ack: Duration,
    mode_ack: Duration,
    yellow_ack: Duration,
}

// ───────────────────────────────────────────────────────────────
// DoorbellController
// ───────────────────────────────────────────────────────────────

pub struct DoorbellController<R, N> {
    channels: ChannelMap,
    register: ModeRegister,
    arbiter: LedArbiter,
    tolerance: f64,
    capture_loop: CaptureLoop,
    enrollment: EnrollmentWorkflow,
    gate: NotificationGate,
    doorbell_captures: CaptureStore,
    holds: Holds,
    store: R,
    notifier: N,
}

impl<R: ReferenceStorePort, N: NotifierPort> DoorbellController<R, N> {
    /// Validate `config` and build the controller with an all-zero register.
    pub fn new(config: &DoorbellConfig, store: R, notifier: N) -> core::result::Result<Self, ConfigError> {
        let channels = config.validate()?;
        let doorbell_captures = CaptureStore::new(&config.doorbell_capture_dir);

        Ok(Self {
            register: ModeRegister::new(channels.arity()),
            arbiter: LedArbiter::from_channels(&channels),
            channels,
            tolerance: config.tolerance,
            capture_loop: CaptureLoop::new(doorbell_captures.clone(), config.max_capture_attempts),
            enrollment: EnrollmentWorkflow::new(CaptureStore::new(&config.enrollment_capture_dir)),
            gate: NotificationGate::new(config.notify_window_secs),
            doorbell_captures,
            holds: Holds {
                display: config.display_window(),
                enroll_ack: config.enroll_ack(),
                mode_ack: config.mode_ack(),
                yellow_ack: config.yellow_ack(),
            },
            store,
            notifier,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Push the initial LED state and announce readiness.
    pub fn start(&mut self, hw: &mut impl LedPort, sink: &mut impl EventSink) {
        self.push_led_states(hw);
        sink.emit(&AppEvent::Started);
        info!("Ready...");
    }

    // ── Command handling ──────────────────────────────────────

    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        hw: &mut impl DoorbellHardware,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            AppCommand::Press(button) => self.handle_button(button, hw, sink),
            AppCommand::Enroll(list) => {
                let _ = self.enroll(list, hw, sink);
            }
            AppCommand::Ring => {
                let _ = self.ring(hw, sink);
            }
        }
    }

    /// Run the handler for one debounced button press to completion.
    pub fn handle_button(
        &mut self,
        button: ButtonId,
        hw: &mut impl DoorbellHardware,
        sink: &mut impl EventSink,
    ) {
        info!("{:?} button pressed", button);
        sink.emit(&AppEvent::ButtonPressed(button));

        match button {
            ButtonId::Red => self.mode_button(button, LedChannel::Red, hw, sink),
            ButtonId::Green => self.mode_button(button, LedChannel::Green, hw, sink),
            ButtonId::Yellow => self.yellow_button(hw, sink),
            ButtonId::Bell => {
                // Outcome and failures are already logged and emitted.
                let _ = self.ring(hw, sink);
            }
        }
    }

    // ── Mode register ─────────────────────────────────────────

    /// Apply `op` to the given mode slots.
    pub fn set_mode(&mut self, indices: &[usize], op: ModeOp) -> core::result::Result<(), ModeError> {
        self.register.set(indices, op)
    }

    /// Push every changed LED slot to `hw`; returns the number of calls.
    pub fn push_led_states(&mut self, hw: &mut impl LedPort) -> usize {
        self.arbiter.push_led_states(&mut self.register, hw)
    }

    pub fn register(&self) -> &ModeRegister {
        &self.register
    }

    pub fn channels(&self) -> &ChannelMap {
        &self.channels
    }

    /// Which list a yellow press enrolls into, given the mode slots.
    ///
    /// No mode active: allowlist.  Red mode only: denylist.  Anything else
    /// is a sub-menu with no enrollment.
    pub fn enrollment_target(&self) -> Option<ListId> {
        let active = |c: Channel| self.register.get(self.channels.slot(c)).unwrap_or(MODE_OFF) != MODE_OFF;
        match (active(Channel::RedButton), active(Channel::GreenButton)) {
            (false, false) => Some(ListId::Allowlist),
            (true, false) => Some(ListId::Denylist),
            _ => None,
        }
    }

    // ── Enrollment ────────────────────────────────────────────

    /// Enroll into a list named by the operator.
    pub fn enroll_named(
        &mut self,
        list_id: &str,
        hw: &mut impl DoorbellHardware,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        match list_id.parse::<ListId>() {
            Ok(list) => self.enroll(list, hw, sink),
            Err(e) => {
                warn!("Enrollment into '{}' refused: {}", list_id, e);
                sink.emit(&AppEvent::EnrollmentRejected(e.into()));
                Err(e.into())
            }
        }
    }

    /// Capture once, append the single face to `list`, then pulse green.
    pub fn enroll(
        &mut self,
        list: ListId,
        hw: &mut impl DoorbellHardware,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        if let Err(e) = self.enrollment.enroll(list, hw, &mut self.store) {
            warn!("Enrollment into {} failed: {}", list, e);
            sink.emit(&AppEvent::EnrollmentRejected(e));
            return Err(e);
        }
        sink.emit(&AppEvent::Enrolled(list));

        self.pulse(LedChannel::Green, MODE_ALTERNATE, self.holds.enroll_ack, hw);
        info!("Done...");
        Ok(())
    }

    // ── Bell path ─────────────────────────────────────────────

    /// Capture, classify, show the result, notify if required, clear.
    pub fn ring(
        &mut self,
        hw: &mut impl DoorbellHardware,
        sink: &mut impl EventSink,
    ) -> Result<ClassificationOutcome> {
        let trigger_time = hw.now_unix_secs();
        self.clear_leds();
        self.push_led_states(hw);

        let outcome = match self.capture_and_classify(hw, sink) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Bell aborted: {}", e);
                sink.emit(&AppEvent::RingAborted(e));
                return Err(e);
            }
        };

        let policy = policy_for(outcome);
        self.set_channel(policy.led.channel(), ModeOp::Set(policy.led_value), sink);
        self.push_led_states(hw);
        hw.hold(self.holds.display);

        if let Some(marker) = policy.notify {
            match self
                .gate
                .notify(marker, &self.doorbell_captures, trigger_time, &mut self.notifier)
            {
                Ok(report) => {
                    info!("Notification sent: {} photo(s)", report.photos);
                    sink.emit(&AppEvent::Notified {
                        photos: report.photos,
                    });
                }
                Err(e) => {
                    error!("Notification failed: {}", e);
                    sink.emit(&AppEvent::NotificationFailed(e));
                }
            }
        }

        self.clear_leds();
        self.push_led_states(hw);
        Ok(outcome)
    }

    fn capture_and_classify(
        &mut self,
        hw: &mut impl DoorbellHardware,
        sink: &mut impl EventSink,
    ) -> Result<ClassificationOutcome> {
        let capture = self.capture_loop.run(hw)?;
        let allowlist = self.store.load(ListId::Allowlist)?;
        let denylist = self.store.load(ListId::Denylist)?;

        let classifier = FaceClassifier::with_comparator(EngineComparator(&*hw), self.tolerance);
        let outcome = classifier.classify_any(&capture.encodings, &allowlist, &denylist);
        info!(
            "Classified {} face(s) after {} capture(s), last at {}: {:?}",
            capture.encodings.len(),
            capture.attempts,
            capture.timestamp,
            outcome
        );
        sink.emit(&AppEvent::Classified {
            outcome,
            faces: capture.encodings.len(),
            attempts: capture.attempts,
        });
        Ok(outcome)
    }

    // ── Mode buttons ──────────────────────────────────────────

    fn mode_button(
        &mut self,
        button: ButtonId,
        led: LedChannel,
        hw: &mut impl DoorbellHardware,
        sink: &mut impl EventSink,
    ) {
        self.set_channel(button.channel(), ModeOp::Toggle, sink);
        self.pulse(led, MODE_ON, self.holds.mode_ack, hw);
    }

    fn yellow_button(&mut self, hw: &mut impl DoorbellHardware, sink: &mut impl EventSink) {
        self.set_channel(Channel::YellowLed, ModeOp::Set(MODE_ON), sink);
        self.push_led_states(hw);
        hw.hold(self.holds.yellow_ack);

        match self.enrollment_target() {
            Some(list) => {
                info!("Add face to {}.", list);
                let _ = self.enroll(list, hw, sink);
            }
            None => {
                info!("Sub-menu active, nothing to enroll");
                sink.emit(&AppEvent::EnrollmentSkipped);
            }
        }

        self.set_channel(Channel::YellowLed, ModeOp::Set(MODE_OFF), sink);
        self.push_led_states(hw);
    }

    // ── Internal ──────────────────────────────────────────────

    /// Show `value` on `led` for `duration`, then switch it off.
    fn pulse(&mut self, led: LedChannel, value: u8, duration: Duration, hw: &mut impl DoorbellHardware) {
        let slot = self.channels.slot(led.channel());
        if self.register.set(&[slot], ModeOp::Set(value)).is_ok() {
            self.push_led_states(hw);
            hw.hold(duration);
            let _ = self.register.set(&[slot], ModeOp::Set(MODE_OFF));
            self.push_led_states(hw);
        }
    }

    fn set_channel(&mut self, channel: Channel, op: ModeOp, sink: &mut impl EventSink) {
        let slot = self.channels.slot(channel);
        if let Err(e) = self.register.set(&[slot], op) {
            sink.emit(&AppEvent::ModeRejected(Error::Mode(e)));
        }
    }

    fn clear_leds(&mut self) {
        let slots = self.arbiter.led_slots();
        // LED slots were range-checked when the channel map was built.
        let _ = self.register.set(&slots, ModeOp::Set(MODE_OFF));
    }

    // ── Collaborator access ───────────────────────────────────

    pub fn store(&self) -> &R {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }
}
