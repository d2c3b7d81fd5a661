//! Ordered planar coordinate sequences.
//!
//! Coordinates are held as two parallel `ndarray` columns so corrections can
//! be written as column arithmetic. Index order is traverse order.

use ndarray::{s, Array1, ArrayView1};

use crate::error::CorrectionError;

#[derive(Clone, Debug, PartialEq)]
pub struct PointSequence {
    x: Array1<f64>,
    y: Array1<f64>,
}

impl PointSequence {
    /// Build from two parallel columns. Fails if the lengths differ.
    pub fn new(x: Array1<f64>, y: Array1<f64>) -> Result<Self, CorrectionError> {
        if x.len() != y.len() {
            return Err(CorrectionError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        Ok(Self { x, y })
    }

    pub fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        let (x, y): (Vec<f64>, Vec<f64>) = pairs.iter().copied().unzip();
        Self {
            x: Array1::from(x),
            y: Array1::from(y),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> ArrayView1<'_, f64> {
        self.x.view()
    }

    pub fn y(&self) -> ArrayView1<'_, f64> {
        self.y.view()
    }

    pub fn point(&self, i: usize) -> Option<(f64, f64)> {
        Some((*self.x.get(i)?, *self.y.get(i)?))
    }

    /// The anchor (first) point.
    pub fn anchor(&self) -> Option<(f64, f64)> {
        self.point(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    pub fn to_pairs(&self) -> Vec<(f64, f64)> {
        self.iter().collect()
    }

    /// The points followed by a repeat of the first one.
    pub fn closed_ring(&self) -> Vec<(f64, f64)> {
        let mut ring = self.to_pairs();
        if let Some(first) = ring.first().copied() {
            ring.push(first);
        }
        ring
    }

    /// Errors unless the sequence holds at least `needed` points.
    pub fn require(&self, needed: usize) -> Result<(), CorrectionError> {
        if self.len() < needed {
            return Err(CorrectionError::InsufficientPoints {
                needed,
                found: self.len(),
            });
        }
        Ok(())
    }

    /// `(x[0] - x[N-1], y[0] - y[N-1])`, or `None` for an empty sequence.
    pub fn closure_error(&self) -> Option<(f64, f64)> {
        let (x0, y0) = self.point(0)?;
        let (xn, yn) = self.point(self.len() - 1)?;
        Some((x0 - xn, y0 - yn))
    }

    /// Length of each leg `i-1 -> i` for `i = 1..N`.
    pub fn segment_lengths(&self) -> Array1<f64> {
        if self.len() < 2 {
            return Array1::zeros(0);
        }
        let dx = &self.x.slice(s![1..]) - &self.x.slice(s![..-1]);
        let dy = &self.y.slice(s![1..]) - &self.y.slice(s![..-1]);
        ndarray::Zip::from(&dx)
            .and(&dy)
            .map_collect(|&a, &b| a.hypot(b))
    }

    /// Sum of all leg lengths.
    pub fn path_length(&self) -> f64 {
        self.segment_lengths().sum()
    }

    /// Apply `f` to every point, producing a new sequence.
    pub fn try_map<E>(
        &self,
        mut f: impl FnMut(f64, f64) -> Result<(f64, f64), E>,
    ) -> Result<Self, E> {
        let mut x = Array1::zeros(self.len());
        let mut y = Array1::zeros(self.len());
        for (i, (px, py)) in self.iter().enumerate() {
            let (nx, ny) = f(px, py)?;
            x[i] = nx;
            y[i] = ny;
        }
        Ok(Self { x, y })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_length_mismatch() {
        let err = PointSequence::new(array![0.0, 1.0], array![0.0]).unwrap_err();
        assert_eq!(err, CorrectionError::LengthMismatch { x_len: 2, y_len: 1 });
    }

    #[test]
    fn test_closure_error() {
        let seq = PointSequence::from_pairs(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.5)]);
        let (ex, ey) = seq.closure_error().unwrap();
        assert_relative_eq!(ex, -10.0);
        assert_relative_eq!(ey, -0.5);
        assert!(PointSequence::from_pairs(&[]).closure_error().is_none());
    }

    #[test]
    fn test_segment_lengths() {
        let seq = PointSequence::from_pairs(&[(0.0, 0.0), (3.0, 4.0), (3.0, 10.0)]);
        let d = seq.segment_lengths();
        assert_eq!(d.len(), 2);
        assert_relative_eq!(d[0], 5.0);
        assert_relative_eq!(d[1], 6.0);
        assert_relative_eq!(seq.path_length(), 11.0);
    }

    #[test]
    fn test_segment_lengths_single_point() {
        let seq = PointSequence::from_pairs(&[(1.0, 1.0)]);
        assert_eq!(seq.segment_lengths().len(), 0);
        assert_relative_eq!(seq.path_length(), 0.0);
    }

    #[test]
    fn test_closed_ring_repeats_first() {
        let seq = PointSequence::from_pairs(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        let ring = seq.closed_ring();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn test_require() {
        let seq = PointSequence::from_pairs(&[(0.0, 0.0)]);
        assert_eq!(
            seq.require(2),
            Err(CorrectionError::InsufficientPoints { needed: 2, found: 1 })
        );
        assert!(seq.require(1).is_ok());
    }
}
