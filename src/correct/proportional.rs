//! Proportional (distance-weighted) closure correction.
//!
//! Point `i` moves by the share of the total traverse length travelled up to
//! it. Only the first point is held fixed; the last point is corrected like
//! any other and, with a cumulative share of exactly 1, lands on the anchor.

use ndarray::{s, Array1, Axis};

use crate::error::CorrectionError;
use crate::points::PointSequence;

/// Cumulative distance along the traverse at each point, starting at 0.
pub fn cumulative_distance(seq: &PointSequence) -> Array1<f64> {
    let mut cumulative = Array1::<f64>::zeros(seq.len());
    if seq.len() > 1 {
        cumulative.slice_mut(s![1..]).assign(&seq.segment_lengths());
        cumulative.accumulate_axis_inplace(Axis(0), |&prev, curr| *curr += prev);
    }
    cumulative
}

/// Apply `x'[i] = x[i] + (Σ_{k≤i} d_k / D)·(x[0] - x[N-1])`, same for y.
///
/// # Errors
/// [`CorrectionError::InsufficientPoints`] for fewer than two points and
/// [`CorrectionError::DegenerateGeometry`] when the traverse has zero length.
pub fn correct(seq: &PointSequence) -> Result<PointSequence, CorrectionError> {
    seq.require(2)?;
    let n = seq.len();
    let (ex, ey) = seq
        .closure_error()
        .ok_or(CorrectionError::InsufficientPoints { needed: 2, found: n })?;

    let cumulative = cumulative_distance(seq);
    // The last cumulative value is the total, so the final share is exactly 1.
    let total = cumulative[n - 1];
    if !(total.is_finite() && total > 0.0) {
        return Err(CorrectionError::DegenerateGeometry);
    }
    let share = cumulative / total;

    let x = &seq.x() + &(&share * ex);
    let y = &seq.y() + &(&share * ey);
    PointSequence::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cumulative_distance() {
        let seq = PointSequence::from_pairs(&[(0.0, 0.0), (3.0, 4.0), (3.0, 10.0), (0.0, 10.0)]);
        let c = cumulative_distance(&seq);
        for (got, want) in c.iter().zip([0.0, 5.0, 11.0, 14.0]) {
            assert_relative_eq!(*got, want, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_weights_by_distance() {
        // Legs of 5, 6 and 3; misclosure (-6, -2).
        let seq = PointSequence::from_pairs(&[(0.0, 0.0), (0.0, 5.0), (6.0, 5.0), (6.0, 2.0)]);
        let out = correct(&seq).unwrap();
        let (x1, y1) = out.point(1).unwrap();
        let (x2, y2) = out.point(2).unwrap();
        assert_relative_eq!(x1, -6.0 * 5.0 / 14.0, epsilon = 1e-12);
        assert_relative_eq!(y1, 5.0 - 2.0 * 5.0 / 14.0, epsilon = 1e-12);
        assert_relative_eq!(x2, 6.0 - 6.0 * 11.0 / 14.0, epsilon = 1e-12);
        assert_relative_eq!(y2, 5.0 - 2.0 * 11.0 / 14.0, epsilon = 1e-12);
    }

    #[test]
    fn test_closes_loop_and_keeps_anchor() {
        let seq = PointSequence::from_pairs(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.5)]);
        let out = correct(&seq).unwrap();
        assert_eq!(out.anchor(), Some((0.0, 0.0)));
        let (ex, ey) = out.closure_error().unwrap();
        assert_relative_eq!(ex, 0.0, epsilon = 1e-12);
        assert_relative_eq!(ey, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_last_point_is_corrected_not_fixed() {
        // Only index 0 is special-cased: the last point moves onto the anchor
        // through its full share rather than being held in place.
        let seq = PointSequence::from_pairs(&[(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (1.0, 1.0)]);
        let out = correct(&seq).unwrap();
        assert_ne!(out.point(3), seq.point(3));
        let (x3, y3) = out.point(3).unwrap();
        assert_relative_eq!(x3, 0.0, epsilon = 1e-12);
        assert_relative_eq!(y3, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_coincident_points_are_degenerate() {
        let seq = PointSequence::from_pairs(&[(7.0, 7.0), (7.0, 7.0), (7.0, 7.0)]);
        assert_eq!(correct(&seq), Err(CorrectionError::DegenerateGeometry));
    }

    #[test]
    fn test_insufficient_points() {
        let err = correct(&PointSequence::from_pairs(&[(1.0, 1.0)])).unwrap_err();
        assert_eq!(err, CorrectionError::InsufficientPoints { needed: 2, found: 1 });
    }

    #[test]
    fn test_closed_input_unchanged() {
        let seq = PointSequence::from_pairs(&[(0.0, 0.0), (5.0, 0.0), (5.0, 5.0), (0.0, 0.0)]);
        assert_eq!(correct(&seq).unwrap(), seq);
    }
}
