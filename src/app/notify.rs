//! Notification gate.
//!
//! Picks the captures that accompany a notification and hands them to the
//! chat transport.  The trailing window is anchored to the **newest**
//! capture in the directory, not to the trigger time: a capture is sent
//! when `newest - timestamp < window_secs`.
//!
//! ```text
//!   captures   100    120         150   170 (newest)
//!   age         70     50          20     0
//!   window 30    ✗      ✗           ✓     ✓
//! ```
//!
//! Message sequence: one alarm text, then one photo per selected capture
//! in ascending timestamp order, each captioned `"<marker> - <time>"`.

use chrono::{Local, TimeZone};
use log::{error, info};

use crate::error::{Result, TransportError};
use crate::storage::captures::{CaptureRecord, CaptureStore};

use super::ports::{ChatId, NotifierPort};

/// First message of every notification.
pub const ALARM_TEXT: &str = "Doorbell Alarm";

/// What a successful notification sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifyReport {
    pub chat: ChatId,
    pub photos: usize,
}

pub struct NotificationGate {
    window_secs: u64,
}

impl NotificationGate {
    pub fn new(window_secs: u64) -> Self {
        Self { window_secs }
    }

    /// Send the alarm text and the windowed captures of `captures`.
    ///
    /// `trigger_time` is only logged; selection is anchored to the newest
    /// capture.
    pub fn notify(
        &self,
        caption: &str,
        captures: &CaptureStore,
        trigger_time: u64,
        notifier: &mut impl NotifierPort,
    ) -> Result<NotifyReport> {
        let records = captures.list()?;
        let selected = select_window(&records, self.window_secs);
        info!(
            "Notify: trigger={} captures={} selected={} (window {}s)",
            trigger_time,
            records.len(),
            selected.len(),
            self.window_secs
        );

        let chat = match notifier.chat_target()? {
            Some(chat) => chat,
            None => {
                error!("Notify: no chat target; set chat_id or message the bot first");
                return Err(TransportError::NoChatTarget.into());
            }
        };

        notifier.send_text(chat, ALARM_TEXT)?;
        for record in &selected {
            let text = caption_for(caption, record.timestamp);
            notifier.send_photo(chat, &record.path, &text)?;
        }

        Ok(NotifyReport {
            chat,
            photos: selected.len(),
        })
    }
}

/// Records with `newest - timestamp < window_secs`, oldest first.
pub fn select_window(records: &[CaptureRecord], window_secs: u64) -> Vec<&CaptureRecord> {
    let Some(newest) = records.iter().map(|r| r.timestamp).max() else {
        return Vec::new();
    };
    let mut selected: Vec<&CaptureRecord> = records
        .iter()
        .filter(|r| newest - r.timestamp < window_secs)
        .collect();
    selected.sort_by_key(|r| r.timestamp);
    selected
}

/// `"<marker> - <local time>"`.
pub fn caption_for(marker: &str, timestamp: u64) -> String {
    format!("{} - {}", marker, format_capture_time(timestamp))
}

/// ctime-style local time, e.g. `Mon Jan  6 14:03:11 2025`.
pub fn format_capture_time(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| Local.timestamp_opt(secs, 0).single())
        .map_or_else(
            || timestamp.to_string(),
            |t| t.format("%a %b %e %H:%M:%S %Y").to_string(),
        )
}
