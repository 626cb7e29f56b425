//! CSV-backed reference lists.
//!
//! One file per list (`<dir>/allowlist.csv`, `<dir>/denylist.csv`), one
//! row per enrolled encoding, 128 comma-separated floats per row.  Lists
//! are read in full before every classification and appended to during
//! enrollment.  A missing file is an empty list.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, error, info};

use crate::app::ports::ReferenceStorePort;
use crate::error::StoreError;
use crate::face::FaceEncoding;

use super::ListId;

pub struct CsvReferenceStore {
    dir: PathBuf,
}

impl CsvReferenceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self, list: ListId) -> PathBuf {
        self.dir.join(format!("{}.csv", list.as_str()))
    }
}

impl ReferenceStorePort for CsvReferenceStore {
    fn load(&self, list: ListId) -> Result<Vec<FaceEncoding>, StoreError> {
        let path = self.path(list);
        match fs::read_to_string(&path) {
            Ok(text) => {
                let rows = parse_rows(&text)?;
                debug!("Loaded {} encodings from {}", rows.len(), path.display());
                Ok(rows)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => {
                error!("Reference list {} unreadable: {}", path.display(), e);
                Err(StoreError::Io)
            }
        }
    }

    fn append(&mut self, list: ListId, encoding: &FaceEncoding) -> Result<(), StoreError> {
        let path = self.path(list);
        info!("Save encoding to {}", path.display());
        append_row(&path, &format_row(encoding)).map_err(|e| {
            error!("Reference list {} not writable: {}", path.display(), e);
            StoreError::Io
        })
    }
}

fn append_row(path: &Path, row: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    // Single write so a failure never leaves half a row behind.
    file.write_all(row.as_bytes())
}

/// One CSV line, newline-terminated.
pub fn format_row(encoding: &FaceEncoding) -> String {
    let mut row = encoding
        .as_slice()
        .iter()
        .map(f64::to_string)
        .collect::<Vec<_>>()
        .join(",");
    row.push('\n');
    row
}

/// Parse every non-blank line into an encoding.
pub fn parse_rows(text: &str) -> Result<Vec<FaceEncoding>, StoreError> {
    let mut rows = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let values = line
            .split(',')
            .map(|field| field.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| StoreError::MalformedRow { line: i + 1 })?;
        let encoding = FaceEncoding::from_slice(&values).ok_or(StoreError::WrongDimension {
            line: i + 1,
            found: values.len(),
        })?;
        rows.push(encoding);
    }
    Ok(rows)
}
