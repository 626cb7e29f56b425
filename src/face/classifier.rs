//! Allow/deny classification.
//!
//! | In allowlist | In denylist | Outcome      |
//! |--------------|-------------|--------------|
//! | yes          | yes         | `BothMatch`  |
//! | yes          | no          | `AllowMatch` |
//! | no           | yes         | `DenyMatch`  |
//! | no           | no          | `NoMatch`    |
//!
//! What each outcome does to the LEDs lives in [`policy`](super::policy).

use crate::app::ports::FaceEnginePort;

use super::{FaceEncoding, compare_encodings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassificationOutcome {
    DenyMatch,
    AllowMatch,
    BothMatch,
    NoMatch,
}

impl ClassificationOutcome {
    /// Apply the decision table.  `BothMatch` is checked first.
    pub fn decide(in_allowlist: bool, in_denylist: bool) -> Self {
        match (in_allowlist, in_denylist) {
            (true, true) => Self::BothMatch,
            (true, false) => Self::AllowMatch,
            (false, true) => Self::DenyMatch,
            (false, false) => Self::NoMatch,
        }
    }
}

/// Comparison primitive: one boolean per reference.
pub trait EncodingComparator {
    fn compare(&self, references: &[FaceEncoding], candidate: &FaceEncoding, tolerance: f64)
    -> Vec<bool>;
}

/// Euclidean distance `<= tolerance`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanComparator;

impl EncodingComparator for EuclideanComparator {
    fn compare(
        &self,
        references: &[FaceEncoding],
        candidate: &FaceEncoding,
        tolerance: f64,
    ) -> Vec<bool> {
        compare_encodings(references, candidate, tolerance)
    }
}

/// Routes comparisons through the external face engine.
pub struct EngineComparator<'a, F>(pub &'a F);

impl<F: FaceEnginePort> EncodingComparator for EngineComparator<'_, F> {
    fn compare(
        &self,
        references: &[FaceEncoding],
        candidate: &FaceEncoding,
        tolerance: f64,
    ) -> Vec<bool> {
        self.0.compare(references, candidate, tolerance)
    }
}

pub struct FaceClassifier<C = EuclideanComparator> {
    comparator: C,
    tolerance: f64,
}

impl FaceClassifier {
    pub fn new(tolerance: f64) -> Self {
        Self::with_comparator(EuclideanComparator, tolerance)
    }
}

impl<C: EncodingComparator> FaceClassifier<C> {
    pub fn with_comparator(comparator: C, tolerance: f64) -> Self {
        Self {
            comparator,
            tolerance,
        }
    }

    /// Classify a single encoding.
    pub fn classify(
        &self,
        encoding: &FaceEncoding,
        allowlist: &[FaceEncoding],
        denylist: &[FaceEncoding],
    ) -> ClassificationOutcome {
        self.classify_any(core::slice::from_ref(encoding), allowlist, denylist)
    }

    /// Classify a group of candidates: a list matches if any candidate
    /// matches any of its references.
    pub fn classify_any(
        &self,
        candidates: &[FaceEncoding],
        allowlist: &[FaceEncoding],
        denylist: &[FaceEncoding],
    ) -> ClassificationOutcome {
        let in_allowlist = self.matches_any(candidates, allowlist);
        let in_denylist = self.matches_any(candidates, denylist);
        ClassificationOutcome::decide(in_allowlist, in_denylist)
    }

    fn matches_any(&self, candidates: &[FaceEncoding], references: &[FaceEncoding]) -> bool {
        candidates.iter().any(|c| {
            self.comparator
                .compare(references, c, self.tolerance)
                .into_iter()
                .any(|m| m)
        })
    }
}
