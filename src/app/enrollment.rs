//! Enrollment: add the face in front of the camera to a reference list.
//!
//! Exactly one capture is taken.  Zero or several faces reject the
//! attempt without touching any list; the operator retries by pressing
//! again.  Only after the encoding is computed is a row appended.

use log::{info, warn};

use crate::error::{CaptureError, EnrollError, Result};
use crate::face::FaceEncoding;
use crate::storage::ListId;
use crate::storage::captures::CaptureStore;

use super::doorbell::store_capture;
use super::ports::{CameraPort, FaceEnginePort, ReferenceStorePort, TimePort};

pub struct EnrollmentWorkflow {
    captures: CaptureStore,
}

impl EnrollmentWorkflow {
    pub fn new(captures: CaptureStore) -> Self {
        Self { captures }
    }

    /// Capture once and append the single face found to `list`.
    pub fn enroll(
        &self,
        list: ListId,
        hw: &mut (impl CameraPort + FaceEnginePort + TimePort),
        store: &mut impl ReferenceStorePort,
    ) -> Result<FaceEncoding> {
        let image = hw.capture()?;
        store_capture(&self.captures, hw.now_unix_secs(), &image);

        let boxes = hw.locate_faces(&image)?;
        match boxes.len() {
            0 => {
                warn!("No face detected. Please try again...");
                Err(EnrollError::NoFace.into())
            }
            1 => {
                info!("Face detected. Calculating encoding...");
                let encoding = hw
                    .encode_faces(&image, &boxes)?
                    .into_iter()
                    .next()
                    .ok_or(CaptureError::EncodingMismatch {
                        faces: 1,
                        encodings: 0,
                    })?;
                store.append(list, &encoding)?;
                info!("Face added to {}", list);
                Ok(encoding)
            }
            n => {
                warn!("{} faces detected. Please try again with only 1 face...", n);
                Err(EnrollError::MultipleFaces(n).into())
            }
        }
    }
}
