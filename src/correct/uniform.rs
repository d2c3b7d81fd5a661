//! Uniform closure correction.
//!
//! The misclosure is spread linearly by point index: point `i` moves by
//! `i / (N - 1)` of the closure error, regardless of leg length.

use ndarray::Array1;

use crate::error::CorrectionError;
use crate::points::PointSequence;

/// Apply `x'[i] = x[i] + i·Δx` with `Δx = (x[0] - x[N-1]) / (N - 1)`, same for y.
///
/// # Errors
/// [`CorrectionError::InsufficientPoints`] for fewer than two points.
pub fn correct(seq: &PointSequence) -> Result<PointSequence, CorrectionError> {
    seq.require(2)?;
    let n = seq.len();
    let (ex, ey) = seq
        .closure_error()
        .ok_or(CorrectionError::InsufficientPoints { needed: 2, found: n })?;

    let legs = (n - 1) as f64;
    let steps: Array1<f64> = (0..n).map(|i| i as f64).collect();

    let x = &seq.x() + &(&steps * (ex / legs));
    let y = &seq.y() + &(&steps * (ey / legs));
    PointSequence::new(x, y)
}
