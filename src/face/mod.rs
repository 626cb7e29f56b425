//! Face encodings and the distance contract used to compare them.
//!
//! Locating and encoding faces is done by an external engine behind
//! [`FaceEnginePort`](crate::app::ports::FaceEnginePort).  This module only
//! fixes the numeric contract: encodings are 128-dimensional vectors and two
//! encodings match when their Euclidean distance is at most the tolerance.

pub mod classifier;
pub mod policy;

/// Dimension of every face encoding.
pub const ENCODING_DIM: usize = 128;

/// Default match tolerance.  Lower is stricter.
pub const DEFAULT_TOLERANCE: f64 = 0.6;

/// Immutable 128-dimensional face encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceEncoding {
    values: [f64; ENCODING_DIM],
}

impl FaceEncoding {
    pub fn new(values: [f64; ENCODING_DIM]) -> Self {
        Self { values }
    }

    /// `None` unless `values` has exactly [`ENCODING_DIM`] entries.
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        let values: [f64; ENCODING_DIM] = values.try_into().ok()?;
        Some(Self { values })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &FaceEncoding) -> f64 {
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}

/// Face location in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

/// One boolean per reference: `true` where `candidate` is within `tolerance`.
pub fn compare_encodings(
    references: &[FaceEncoding],
    candidate: &FaceEncoding,
    tolerance: f64,
) -> Vec<bool> {
    references
        .iter()
        .map(|r| r.distance(candidate) <= tolerance)
        .collect()
}
