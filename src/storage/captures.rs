//! Capture directories.
//!
//! Every captured image is written as `<dir>/<unix-timestamp>.<ext>`.  The
//! notification gate finds captures again by listing the directory and
//! parsing the timestamp back out of the file name.  Two captures in the
//! same second share a name; the later one wins.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error};

use crate::app::ports::Image;
use crate::error::StoreError;

/// A capture file and the timestamp embedded in its name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CaptureRecord {
    pub timestamp: u64,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct CaptureStore {
    dir: PathBuf,
}

impl CaptureStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `image` under `timestamp`, creating the directory if needed.
    pub fn save(&self, timestamp: u64, image: &Image) -> Result<CaptureRecord, StoreError> {
        let path = self.dir.join(format!("{}.{}", timestamp, image.extension));
        debug!("Saving image: {}", path.display());
        fs::create_dir_all(&self.dir)
            .and_then(|()| fs::write(&path, &image.bytes))
            .map_err(|e| {
                error!("Capture {} not writable: {}", path.display(), e);
                StoreError::Io
            })?;
        Ok(CaptureRecord { timestamp, path })
    }

    /// All captures in the directory, oldest first.
    ///
    /// Files whose stem is not an integer are skipped.  A missing
    /// directory holds no captures.
    pub fn list(&self) -> Result<Vec<CaptureRecord>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                error!("Capture dir {} unreadable: {}", self.dir.display(), e);
                return Err(StoreError::Io);
            }
        };

        let mut records: Vec<CaptureRecord> = entries
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if !path.is_file() {
                    return None;
                }
                let timestamp = parse_timestamp(&path)?;
                Some(CaptureRecord { timestamp, path })
            })
            .collect();
        records.sort();
        Ok(records)
    }
}

/// Integer stem of `path`, e.g. `1700000000` for `img/1700000000.jpeg`.
pub fn parse_timestamp(path: &Path) -> Option<u64> {
    path.file_stem()?.to_str()?.parse().ok()
}
