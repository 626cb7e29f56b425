//! Event queue between the input drivers and the controller.
//!
//! Events are produced by:
//! - Button drivers (debounced falling edges)
//! - The poll loop (heartbeat ticks)
//!
//! Events are consumed by the main loop one at a time, in arrival order.
//! The controller runs each handler to completion before the next event
//! is taken.  Buttons are not sampled while a handler holds, so a press
//! made during a display hold never reaches the queue.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Buttons     │────▶│  Event Queue │────▶│  Main Loop   │
//! │ Poll loop   │────▶│  (bounded)   │     │  (consumer)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```

use heapless::Deque;
use log::warn;

use crate::mode::channels::ButtonId;

/// Maximum number of pending events.
pub const EVENT_QUEUE_CAP: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // ── User input ────────────────────────────────────────
    /// Debounced press of one of the four buttons.
    Button(ButtonId),

    // ── Housekeeping ──────────────────────────────────────
    /// Liveness heartbeat from the poll loop.
    HeartbeatTick,
}

/// Bounded FIFO of pending events.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Deque<Event, EVENT_QUEUE_CAP>,
    dropped: u32,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an event.  Returns `false` if the queue is full (event dropped).
    pub fn push(&mut self, event: Event) -> bool {
        if self.events.push_back(event).is_err() {
            self.dropped = self.dropped.saturating_add(1);
            warn!("Event queue full, dropped {:?}", event);
            return false;
        }
        true
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Drain all pending events into a callback, FIFO.
    ///
    /// Events pushed by the callback itself are not seen until the next
    /// drain.
    pub fn drain(&mut self, mut handler: impl FnMut(Event)) {
        let pending = self.events.len();
        for _ in 0..pending {
            match self.events.pop_front() {
                Some(event) => handler(event),
                None => break,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events lost to a full queue since start-up.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}
