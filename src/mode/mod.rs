//! Mode register: the single source of truth for button and LED state.
//!
//! ```text
//!   set_mode(indices, op) ──▶ current  ─┐
//!                                        ├─▶ LedArbiter diff ─▶ LedPort
//!                            previous ◀─┘   (snapshot replaced after push)
//! ```
//!
//! The register holds two [`ModeVector`]s.  `current` is mutated by button
//! handlers; `previous` is the state last pushed to the LEDs and is only
//! replaced by [`ModeRegister::commit`], which the arbiter calls at the end
//! of every push.

pub mod arbiter;
pub mod channels;

use log::warn;

use crate::error::ModeError;

/// Upper bound on the mode-vector arity.
pub const MAX_MODE_SLOTS: usize = 16;

/// Slot value meaning "inactive".
pub const MODE_OFF: u8 = 0;
/// Slot value meaning "on".
pub const MODE_ON: u8 = 1;
/// Slot value meaning "alternate state" (blink / highlight on LEDs).
pub const MODE_ALTERNATE: u8 = 3;

/// Fixed-arity vector of small opaque integers.
pub type ModeVector = heapless::Vec<u8, MAX_MODE_SLOTS>;

/// Mutation applied to every addressed slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeOp {
    /// Write this value.
    Set(u8),
    /// 0 becomes 1, anything else becomes 0.
    Toggle,
}

impl ModeOp {
    fn apply(self, value: u8) -> u8 {
        match self {
            Self::Set(v) => v,
            Self::Toggle => {
                if value == MODE_OFF {
                    MODE_ON
                } else {
                    MODE_OFF
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeRegister {
    current: ModeVector,
    previous: ModeVector,
}

impl ModeRegister {
    /// All-zero register of the given arity (clamped to [`MAX_MODE_SLOTS`]).
    pub fn new(arity: usize) -> Self {
        let arity = arity.min(MAX_MODE_SLOTS);
        let mut current = ModeVector::new();
        // Capacity is MAX_MODE_SLOTS and arity is clamped to it.
        let _ = current.resize(arity, MODE_OFF);
        Self {
            previous: current.clone(),
            current,
        }
    }

    pub fn arity(&self) -> usize {
        self.current.len()
    }

    /// Apply `op` to every slot in `indices`.
    ///
    /// All indices are validated first: one bad index rejects the whole
    /// call and leaves every slot untouched.
    pub fn set(&mut self, indices: &[usize], op: ModeOp) -> Result<(), ModeError> {
        let arity = self.arity();
        if let Some(&index) = indices.iter().find(|&&i| i >= arity) {
            warn!("Mode update rejected: slot {} >= arity {}", index, arity);
            return Err(ModeError::OutOfRange { index, arity });
        }
        for &i in indices {
            self.current[i] = op.apply(self.current[i]);
        }
        Ok(())
    }

    /// Current value of a slot.
    pub fn get(&self, index: usize) -> Option<u8> {
        self.current.get(index).copied()
    }

    /// New value of `index` if it differs from the last pushed snapshot.
    pub fn changed(&self, index: usize) -> Option<u8> {
        match (self.current.get(index), self.previous.get(index)) {
            (Some(&now), Some(&before)) if now != before => Some(now),
            _ => None,
        }
    }

    /// Replace the snapshot with a copy of the current vector.
    pub fn commit(&mut self) {
        self.previous.clone_from(&self.current);
    }

    pub fn current(&self) -> &[u8] {
        &self.current
    }

    pub fn previous(&self) -> &[u8] {
        &self.previous
    }

    /// Build a register from explicit vectors (replay and tests).
    ///
    /// Both slices must have the same length, at most [`MAX_MODE_SLOTS`].
    pub fn from_parts(current: &[u8], previous: &[u8]) -> Option<Self> {
        if current.len() != previous.len() {
            return None;
        }
        Some(Self {
            current: ModeVector::from_slice(current).ok()?,
            previous: ModeVector::from_slice(previous).ok()?,
        })
    }
}
