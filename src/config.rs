//! System configuration.
//!
//! Loaded once at startup from a JSON file:
//!
//! ```json
//! {
//!   "PIN_MAPPING":  { "RED_BUTTON": 5, "RED_LED": 25, ... },
//!   "MODE_MAPPING": { "RED_BUTTON": 0, "RED_LED": 3, ... },
//!   "tolerance": 0.6,
//!   "display_window_secs": 10.0
//! }
//! ```
//!
//! Both mappings are required and must name every [`Channel`].  There is no
//! built-in pin table to fall back on: a missing mapping is a fatal
//! [`ConfigError`].  All other tunables have defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::error;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::mode::MAX_MODE_SLOTS;
use crate::mode::channels::Channel;

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorbellConfig {
    // --- Hardware mapping (required) ---
    /// Channel name → GPIO pin.
    #[serde(rename = "PIN_MAPPING")]
    pub pin_mapping: Option<BTreeMap<String, u32>>,
    /// Channel name → mode-vector slot.
    #[serde(rename = "MODE_MAPPING")]
    pub mode_mapping: Option<BTreeMap<String, usize>>,
    /// Number of mode-vector slots.
    pub mode_arity: usize,

    // --- Recognition ---
    /// Maximum encoding distance that still counts as a match.
    pub tolerance: f64,
    /// Bell captures to attempt before giving up on finding a face.
    pub max_capture_attempts: u32,

    // --- Timing ---
    /// How long the classification result stays on the LEDs (seconds).
    pub display_window_secs: f32,
    /// Enrollment acknowledgement pulse (seconds).
    pub enroll_ack_secs: f32,
    /// Red/green mode-button acknowledgement flash (seconds).
    pub mode_ack_secs: f32,
    /// Yellow LED hold before enrollment starts (seconds).
    pub yellow_ack_secs: f32,
    /// Mode-button debounce (milliseconds).
    pub mode_debounce_ms: u32,
    /// Bell-button debounce (milliseconds).
    pub bell_debounce_ms: u32,
    /// Main-loop poll interval (milliseconds).
    pub poll_interval_ms: u32,
    /// Loop iterations between heartbeat log lines.
    pub heartbeat_every: u32,

    // --- Notifications ---
    /// Trailing window, anchored to the newest capture, for notification photos (seconds).
    pub notify_window_secs: u64,
    /// Chat to address notifications to.  `None` lets the transport pick
    /// the latest conversation, if it knows one.
    pub chat_id: Option<i64>,

    // --- Storage ---
    /// Directory holding `allowlist.csv` and `denylist.csv`.
    pub lists_dir: PathBuf,
    /// Where bell captures are written.
    pub doorbell_capture_dir: PathBuf,
    /// Where enrollment captures are written.
    pub enrollment_capture_dir: PathBuf,
}

impl Default for DoorbellConfig {
    fn default() -> Self {
        Self {
            pin_mapping: None,
            mode_mapping: None,
            mode_arity: 7,

            tolerance: 0.6,
            max_capture_attempts: 20,

            display_window_secs: 10.0,
            enroll_ack_secs: 2.5,
            mode_ack_secs: 2.5,
            yellow_ack_secs: 1.0,
            mode_debounce_ms: 500,
            bell_debounce_ms: 1500,
            poll_interval_ms: 50,
            heartbeat_every: 1000,

            notify_window_secs: 30,
            chat_id: None,

            lists_dir: PathBuf::from("."),
            doorbell_capture_dir: PathBuf::from("img/doorbell"),
            enrollment_capture_dir: PathBuf::from("img/enrollment"),
        }
    }
}

impl DoorbellConfig {
    /// Read and parse a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            error!("Config: cannot read {}: {}", path.display(), e);
            ConfigError::Unreadable
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| {
            error!("Config: parse error: {}", e);
            ConfigError::Malformed
        })
    }

    /// Range-check tunables and resolve both mappings into a [`ChannelMap`].
    pub fn validate(&self) -> Result<ChannelMap, ConfigError> {
        if self.mode_arity < Channel::COUNT || self.mode_arity > MAX_MODE_SLOTS {
            return Err(ConfigError::ValidationFailed("mode_arity must be 7–16"));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ConfigError::ValidationFailed("tolerance must be > 0"));
        }
        if self.max_capture_attempts == 0 {
            return Err(ConfigError::ValidationFailed("max_capture_attempts must be > 0"));
        }
        if self.notify_window_secs == 0 {
            return Err(ConfigError::ValidationFailed("notify_window_secs must be > 0"));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("poll_interval_ms must be > 0"));
        }
        for secs in [
            self.display_window_secs,
            self.enroll_ack_secs,
            self.mode_ack_secs,
            self.yellow_ack_secs,
        ] {
            if Duration::try_from_secs_f32(secs).is_err() {
                return Err(ConfigError::ValidationFailed("hold durations out of range"));
            }
        }

        let pins = self
            .pin_mapping
            .as_ref()
            .ok_or(ConfigError::MissingSection("PIN_MAPPING"))?;
        let modes = self
            .mode_mapping
            .as_ref()
            .ok_or(ConfigError::MissingSection("MODE_MAPPING"))?;

        let mut map = ChannelMap {
            arity: self.mode_arity,
            pins: [0; Channel::COUNT],
            slots: [0; Channel::COUNT],
        };

        for channel in Channel::ALL {
            let name = channel.name();
            let pin = pins.get(name).ok_or(ConfigError::MissingChannel {
                section: "PIN_MAPPING",
                channel: name,
            })?;
            let slot = modes.get(name).ok_or(ConfigError::MissingChannel {
                section: "MODE_MAPPING",
                channel: name,
            })?;
            if *slot >= self.mode_arity {
                return Err(ConfigError::SlotOutOfRange {
                    channel: name,
                    index: *slot,
                    arity: self.mode_arity,
                });
            }
            if Channel::ALL[..channel as usize]
                .iter()
                .any(|earlier| map.slots[*earlier as usize] == *slot)
            {
                return Err(ConfigError::DuplicateSlot(name));
            }
            map.pins[channel as usize] = *pin;
            map.slots[channel as usize] = *slot;
        }

        Ok(map)
    }

    pub fn display_window(&self) -> Duration {
        hold_duration(self.display_window_secs)
    }

    pub fn enroll_ack(&self) -> Duration {
        hold_duration(self.enroll_ack_secs)
    }

    pub fn mode_ack(&self) -> Duration {
        hold_duration(self.mode_ack_secs)
    }

    pub fn yellow_ack(&self) -> Duration {
        hold_duration(self.yellow_ack_secs)
    }
}

/// Seconds as a [`Duration`]; values `validate` rejects map to zero.
fn hold_duration(secs: f32) -> Duration {
    Duration::try_from_secs_f32(secs).unwrap_or_default()
}

/// Validated channel → pin and channel → slot tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMap {
    arity: usize,
    pins: [u32; Channel::COUNT],
    slots: [usize; Channel::COUNT],
}

impl ChannelMap {
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn pin(&self, channel: Channel) -> u32 {
        self.pins[channel as usize]
    }

    pub fn slot(&self, channel: Channel) -> usize {
        self.slots[channel as usize]
    }
}
