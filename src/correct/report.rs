//! Misclosure summary for a traverse.

use std::fmt;

use crate::error::CorrectionError;
use crate::points::PointSequence;

/// How far a traverse is from closing, measured in planar units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClosureReport {
    /// `(x[0] - x[N-1], y[0] - y[N-1])`
    pub misclosure: (f64, f64),
    pub misclosure_length: f64,
    /// Sum of all leg lengths.
    pub traverse_length: f64,
}

impl ClosureReport {
    pub fn of(seq: &PointSequence) -> Result<Self, CorrectionError> {
        seq.require(2)?;
        let misclosure = seq.closure_error().ok_or(CorrectionError::InsufficientPoints {
            needed: 2,
            found: seq.len(),
        })?;
        Ok(Self {
            misclosure,
            misclosure_length: misclosure.0.hypot(misclosure.1),
            traverse_length: seq.path_length(),
        })
    }

    /// Traverse length over misclosure length, the `N` in a `1:N` precision.
    ///
    /// `None` for a closed traverse.
    pub fn relative_precision(&self) -> Option<f64> {
        (self.misclosure_length > 0.0).then(|| self.traverse_length / self.misclosure_length)
    }

    /// Closed to within `tolerance` planar units.
    pub fn is_closed(&self, tolerance: f64) -> bool {
        self.misclosure_length <= tolerance
    }
}

impl fmt::Display for ClosureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "misclosure ({:.4}, {:.4}) = {:.4} over {:.3}",
            self.misclosure.0, self.misclosure.1, self.misclosure_length, self.traverse_length
        )?;
        match self.relative_precision() {
            Some(ratio) => write!(f, " (1:{ratio:.0})"),
            None => f.write_str(" (closed)"),
        }
    }
}
