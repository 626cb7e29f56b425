//! Mock hardware adapter for integration tests.
//!
//! Records every LED push, hold and capture so tests can assert on the
//! full command history without touching real GPIO or a camera.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::time::Duration;

use doorbell::app::events::AppEvent;
use doorbell::app::ports::{
    CameraPort, ChatId, EventSink, FaceEnginePort, Image, LedPort, NotifierPort,
    ReferenceStorePort, TimePort,
};
use doorbell::config::DoorbellConfig;
use doorbell::error::{CaptureError, StoreError, TransportError};
use doorbell::face::{BoundingBox, ENCODING_DIM, FaceEncoding};
use doorbell::mode::channels::LedChannel;
use doorbell::storage::ListId;

pub const START_TIME: u64 = 1_700_000_000;

// ── Hardware call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum HwCall {
    SetLed(LedChannel, u8),
    Hold(Duration),
    Capture,
}

// ── MockHardware ──────────────────────────────────────────────

/// Camera + face engine + LEDs + clock.
///
/// Each capture consumes one scripted frame: the encodings of the faces
/// "visible" in it.  An exhausted script yields empty frames.  The clock
/// advances one second per capture and by the length of each hold.
pub struct MockHardware {
    pub calls: Vec<HwCall>,
    pub now: u64,
    pub camera_fails: bool,
    frames: VecDeque<Vec<FaceEncoding>>,
    current: Vec<FaceEncoding>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            now: START_TIME,
            camera_fails: false,
            frames: VecDeque::new(),
            current: Vec::new(),
        }
    }

    /// Queue one frame showing `faces`.
    pub fn script_frame(&mut self, faces: Vec<FaceEncoding>) -> &mut Self {
        self.frames.push_back(faces);
        self
    }

    pub fn led_calls(&self) -> Vec<(LedChannel, u8)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::SetLed(led, v) => Some((*led, *v)),
                _ => None,
            })
            .collect()
    }

    pub fn captures(&self) -> usize {
        self.calls.iter().filter(|c| **c == HwCall::Capture).count()
    }

    pub fn holds(&self) -> Vec<Duration> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::Hold(d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    /// Last value pushed to `led`, `0` if never pushed.
    pub fn led_level(&self, led: LedChannel) -> u8 {
        self.led_calls()
            .iter()
            .rev()
            .find_map(|(l, v)| (*l == led).then_some(*v))
            .unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl LedPort for MockHardware {
    fn set_led_state(&mut self, led: LedChannel, value: u8) {
        self.calls.push(HwCall::SetLed(led, value));
    }
}

impl TimePort for MockHardware {
    fn now_unix_secs(&self) -> u64 {
        self.now
    }

    fn hold(&mut self, duration: Duration) {
        self.calls.push(HwCall::Hold(duration));
        self.now += duration.as_secs();
    }
}

impl CameraPort for MockHardware {
    fn capture(&mut self) -> Result<Image, CaptureError> {
        self.calls.push(HwCall::Capture);
        if self.camera_fails {
            return Err(CaptureError::CameraFailed);
        }
        self.now += 1;
        self.current = self.frames.pop_front().unwrap_or_default();
        Ok(Image {
            width: 4,
            height: 4,
            extension: "jpeg",
            bytes: vec![0xFF, 0xD8, self.current.len() as u8],
        })
    }
}

impl FaceEnginePort for MockHardware {
    fn locate_faces(&mut self, _image: &Image) -> Result<Vec<BoundingBox>, CaptureError> {
        Ok(self
            .current
            .iter()
            .enumerate()
            .map(|(i, _)| BoundingBox {
                top: 0,
                right: 10 * (i as u32 + 1),
                bottom: 10,
                left: 10 * i as u32,
            })
            .collect())
    }

    fn encode_faces(
        &mut self,
        _image: &Image,
        boxes: &[BoundingBox],
    ) -> Result<Vec<FaceEncoding>, CaptureError> {
        Ok(self.current.iter().take(boxes.len()).cloned().collect())
    }
}

// ── Encodings ─────────────────────────────────────────────────

/// Encoding with every component set to `v`.  Distinct `v` values more
/// than 0.06 apart never match at the default tolerance.
#[allow(dead_code)]
pub fn face(v: f64) -> FaceEncoding {
    FaceEncoding::new([v; ENCODING_DIM])
}

// ── MemoryStore ───────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryStore {
    pub lists: HashMap<ListId, Vec<FaceEncoding>>,
    pub fail_loads: bool,
}

#[allow(dead_code)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, list: ListId, encodings: Vec<FaceEncoding>) -> Self {
        self.lists.insert(list, encodings);
        self
    }

    pub fn rows(&self, list: ListId) -> usize {
        self.lists.get(&list).map_or(0, Vec::len)
    }
}

impl ReferenceStorePort for MemoryStore {
    fn load(&self, list: ListId) -> Result<Vec<FaceEncoding>, StoreError> {
        if self.fail_loads {
            return Err(StoreError::Io);
        }
        Ok(self.lists.get(&list).cloned().unwrap_or_default())
    }

    fn append(&mut self, list: ListId, encoding: &FaceEncoding) -> Result<(), StoreError> {
        self.lists.entry(list).or_default().push(encoding.clone());
        Ok(())
    }
}

// ── RecordingNotifier ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Text(ChatId, String),
    Photo(ChatId, PathBuf, String),
}

pub struct RecordingNotifier {
    pub chat: Option<ChatId>,
    pub sent: Vec<Sent>,
    pub fail_after: Option<usize>,
}

#[allow(dead_code)]
impl RecordingNotifier {
    pub fn new(chat: Option<ChatId>) -> Self {
        Self {
            chat,
            sent: Vec::new(),
            fail_after: None,
        }
    }

    pub fn photos(&self) -> Vec<&Path> {
        self.sent
            .iter()
            .filter_map(|s| match s {
                Sent::Photo(_, p, _) => Some(p.as_path()),
                Sent::Text(..) => None,
            })
            .collect()
    }

    fn check_budget(&self) -> Result<(), TransportError> {
        match self.fail_after {
            Some(n) if self.sent.len() >= n => Err(TransportError::Rejected),
            _ => Ok(()),
        }
    }
}

impl NotifierPort for RecordingNotifier {
    fn chat_target(&mut self) -> Result<Option<ChatId>, TransportError> {
        Ok(self.chat)
    }

    fn send_text(&mut self, chat: ChatId, text: &str) -> Result<(), TransportError> {
        self.check_budget()?;
        self.sent.push(Sent::Text(chat, text.to_owned()));
        Ok(())
    }

    fn send_photo(&mut self, chat: ChatId, photo: &Path, caption: &str) -> Result<(), TransportError> {
        self.check_budget()?;
        self.sent
            .push(Sent::Photo(chat, photo.to_path_buf(), caption.to_owned()));
        Ok(())
    }
}

// ── RecordingSink ─────────────────────────────────────────────

/// Collects every emitted event.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, event: &AppEvent) -> bool {
        self.events.contains(event)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Config ────────────────────────────────────────────────────

/// Reference wiring with every directory under `root`.
#[allow(dead_code)]
pub fn board_config(root: &Path) -> DoorbellConfig {
    let mut cfg = DoorbellConfig::from_json(
        r#"{
            "PIN_MAPPING": {
                "RED_BUTTON": 5, "YELLOW_BUTTON": 6, "GREEN_BUTTON": 13, "BELL_BUTTON": 19,
                "RED_LED": 16, "YELLOW_LED": 20, "GREEN_LED": 21
            },
            "MODE_MAPPING": {
                "RED_BUTTON": 0, "YELLOW_BUTTON": 1, "GREEN_BUTTON": 2,
                "RED_LED": 3, "YELLOW_LED": 4, "GREEN_LED": 5, "BELL_BUTTON": 6
            },
            "chat_id": 4242
        }"#,
    )
    .expect("board config parses");
    cfg.lists_dir = root.join("lists");
    cfg.doorbell_capture_dir = root.join("img/doorbell");
    cfg.enrollment_capture_dir = root.join("img/enrollment");
    cfg.max_capture_attempts = 5;
    cfg
}
