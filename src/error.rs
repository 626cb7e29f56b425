//! Unified error types for the doorbell controller.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! controller's error handling uniform.  All variants are `Copy` so they can
//! be carried inside [`AppEvent`](crate::app::events::AppEvent)s and logged
//! without allocation.  Underlying I/O or parse details are logged at the
//! point of failure and then collapsed into the typed variant.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the controller funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Pin or mode mapping is missing or invalid. Fatal at startup.
    Config(ConfigError),
    /// A mode-vector mutation addressed a slot outside the arity.
    Mode(ModeError),
    /// Enrollment rejected the capture or the list identifier.
    Enroll(EnrollError),
    /// Camera or face-engine failure, or the capture loop gave up.
    Capture(CaptureError),
    /// Reference list or capture storage failure.
    Store(StoreError),
    /// The notification transport failed.
    Transport(TransportError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Mode(e) => write!(f, "mode: {e}"),
            Self::Enroll(e) => write!(f, "enroll: {e}"),
            Self::Capture(e) => write!(f, "capture: {e}"),
            Self::Store(e) => write!(f, "store: {e}"),
            Self::Transport(e) => write!(f, "transport: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Unreadable,
    /// The configuration file is not valid JSON for [`DoorbellConfig`](crate::config::DoorbellConfig).
    Malformed,
    /// A required top-level section (`PIN_MAPPING`, `MODE_MAPPING`) is absent.
    MissingSection(&'static str),
    /// A required channel name is absent from a mapping.
    MissingChannel {
        section: &'static str,
        channel: &'static str,
    },
    /// A channel is mapped to a mode slot outside the arity.
    SlotOutOfRange {
        channel: &'static str,
        index: usize,
        arity: usize,
    },
    /// Two channels share one mode slot.
    DuplicateSlot(&'static str),
    /// A tunable failed range validation.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreadable => write!(f, "config file unreadable"),
            Self::Malformed => write!(f, "config file malformed"),
            Self::MissingSection(s) => write!(f, "missing section {s}"),
            Self::MissingChannel { section, channel } => {
                write!(f, "{section} has no entry for {channel}")
            }
            Self::SlotOutOfRange {
                channel,
                index,
                arity,
            } => write!(f, "{channel} mapped to slot {index}, arity is {arity}"),
            Self::DuplicateSlot(channel) => write!(f, "{channel} shares its mode slot"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Mode register errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeError {
    /// Slot index is not below the configured arity.
    OutOfRange { index: usize, arity: usize },
}

impl fmt::Display for ModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, arity } => {
                write!(f, "slot {index} out of range (arity {arity})")
            }
        }
    }
}

impl From<ModeError> for Error {
    fn from(e: ModeError) -> Self {
        Self::Mode(e)
    }
}

// ---------------------------------------------------------------------------
// Enrollment errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollError {
    /// The list identifier is neither `allowlist` nor `denylist`.
    InvalidListId,
    /// No face in the capture.
    NoFace,
    /// More than one face in the capture.
    MultipleFaces(usize),
}

impl fmt::Display for EnrollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidListId => write!(f, "list id must be allowlist or denylist"),
            Self::NoFace => write!(f, "no face detected, please try again"),
            Self::MultipleFaces(n) => {
                write!(f, "{n} faces detected, retry with only one face")
            }
        }
    }
}

impl From<EnrollError> for Error {
    fn from(e: EnrollError) -> Self {
        Self::Enroll(e)
    }
}

// ---------------------------------------------------------------------------
// Capture errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureError {
    /// The camera returned no image.
    CameraFailed,
    /// Face location or encoding failed.
    FaceEngineFailed,
    /// The encoder returned a different number of encodings than faces.
    EncodingMismatch { faces: usize, encodings: usize },
    /// The bell capture loop found no face within its attempt budget.
    NoFaceWithinAttempts(u32),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CameraFailed => write!(f, "camera capture failed"),
            Self::FaceEngineFailed => write!(f, "face engine failed"),
            Self::EncodingMismatch { faces, encodings } => {
                write!(f, "{faces} faces located but {encodings} encodings produced")
            }
            Self::NoFaceWithinAttempts(n) => write!(f, "no face after {n} captures"),
        }
    }
}

impl From<CaptureError> for Error {
    fn from(e: CaptureError) -> Self {
        Self::Capture(e)
    }
}

// ---------------------------------------------------------------------------
// Storage errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// Generic filesystem error.
    Io,
    /// A reference-list row contains a non-numeric field.
    MalformedRow { line: usize },
    /// A reference-list row does not have 128 values.
    WrongDimension { line: usize, found: usize },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => write!(f, "I/O error"),
            Self::MalformedRow { line } => write!(f, "malformed row at line {line}"),
            Self::WrongDimension { line, found } => {
                write!(f, "row at line {line} has {found} values")
            }
        }
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// The chat service could not be reached.
    Unreachable,
    /// No prior conversation exists to address the message to.
    NoChatTarget,
    /// The chat service refused the message.
    Rejected,
    /// A selected capture could not be read back from disk.
    PhotoUnreadable,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable => write!(f, "transport unreachable"),
            Self::NoChatTarget => write!(f, "no chat target configured or known"),
            Self::Rejected => write!(f, "message rejected"),
            Self::PhotoUnreadable => write!(f, "capture unreadable"),
        }
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
