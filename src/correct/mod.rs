//! Closure-error correction models.
//!
//! All models work on planar coordinates and leave the first point (the
//! anchor) untouched. Each stage returns a new sequence.

pub mod proportional;
pub mod report;
pub mod uniform;

use crate::error::CorrectionError;
use crate::points::PointSequence;

pub use report::ClosureReport;

/// Minimum number of points any model accepts.
pub const MIN_POINTS: usize = 2;

/// A single correction pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CorrectionStage {
    Uniform,
    Proportional,
}

impl CorrectionStage {
    pub fn apply(&self, seq: &PointSequence) -> Result<PointSequence, CorrectionError> {
        match self {
            Self::Uniform => uniform::correct(seq),
            Self::Proportional => proportional::correct(seq),
        }
    }
}

/// User-selectable correction model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CorrectionModel {
    Uniform,
    Proportional,
    /// Uniform, then Proportional on its output.
    Composed,
}

impl CorrectionModel {
    /// Parse from a model name or its menu number (1, 2, 3).
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "uniform" => Some(Self::Uniform),
            "2" | "proportional" => Some(Self::Proportional),
            "3" | "composed" | "both" => Some(Self::Composed),
            _ => None,
        }
    }

    /// Human-readable name, used in plot titles.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Uniform => "Uniform",
            Self::Proportional => "Proportional",
            Self::Composed => "Uniform and Proportional",
        }
    }

    /// Passes run, in order.
    pub fn stages(&self) -> &'static [CorrectionStage] {
        match self {
            Self::Uniform => &[CorrectionStage::Uniform],
            Self::Proportional => &[CorrectionStage::Proportional],
            Self::Composed => &[CorrectionStage::Uniform, CorrectionStage::Proportional],
        }
    }

    /// Run every stage in turn, feeding each the previous output.
    ///
    /// # Errors
    /// [`CorrectionError::InsufficientPoints`] for fewer than [`MIN_POINTS`]
    /// points; [`CorrectionError::DegenerateGeometry`] if a proportional stage
    /// sees a zero-length traverse.
    pub fn apply(&self, seq: &PointSequence) -> Result<PointSequence, CorrectionError> {
        seq.require(MIN_POINTS)?;
        self.stages()
            .iter()
            .try_fold(seq.clone(), |current, stage| stage.apply(&current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn survey_loop() -> PointSequence {
        PointSequence::from_pairs(&[
            (531_212.40, 4_555_870.12),
            (531_260.88, 4_555_902.55),
            (531_331.02, 4_555_889.10),
            (531_355.47, 4_555_821.64),
            (531_290.15, 4_555_790.03),
            (531_215.93, 4_555_866.81),
        ])
    }

    #[test]
    fn test_from_name() {
        assert_eq!(CorrectionModel::from_name("1"), Some(CorrectionModel::Uniform));
        assert_eq!(CorrectionModel::from_name("Proportional"), Some(CorrectionModel::Proportional));
        assert_eq!(CorrectionModel::from_name(" both "), Some(CorrectionModel::Composed));
        assert_eq!(CorrectionModel::from_name("4"), None);
        assert_eq!(CorrectionModel::from_name(""), None);
    }

    #[test]
    fn test_every_model_closes_and_keeps_anchor() {
        let seq = survey_loop();
        for model in [
            CorrectionModel::Uniform,
            CorrectionModel::Proportional,
            CorrectionModel::Composed,
        ] {
            let out = model.apply(&seq).unwrap();
            assert_eq!(out.len(), seq.len());
            assert_eq!(out.anchor(), seq.anchor(), "{model:?} moved the anchor");
            let report = ClosureReport::of(&out).unwrap();
            assert!(report.is_closed(1e-6), "{model:?}: {report}");
        }
    }

    #[test]
    fn test_composed_equals_uniform_then_proportional() {
        let seq = survey_loop();
        let composed = CorrectionModel::Composed.apply(&seq).unwrap();
        let staged = proportional::correct(&uniform::correct(&seq).unwrap()).unwrap();
        assert_eq!(composed, staged);
    }

    #[test]
    fn test_proportional_is_idempotent_on_uniform_output() {
        let uniform = CorrectionModel::Uniform.apply(&survey_loop()).unwrap();
        let again = CorrectionModel::Proportional.apply(&uniform).unwrap();
        for (a, b) in uniform.iter().zip(again.iter()) {
            assert_relative_eq!(a.0, b.0, epsilon = 1e-6);
            assert_relative_eq!(a.1, b.1, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_composed_differs_from_proportional_alone() {
        let seq = survey_loop();
        let composed = CorrectionModel::Composed.apply(&seq).unwrap();
        let proportional = CorrectionModel::Proportional.apply(&seq).unwrap();
        let max_diff = composed
            .iter()
            .zip(proportional.iter())
            .map(|(a, b)| (a.0 - b.0).abs().max((a.1 - b.1).abs()))
            .fold(0.0, f64::max);
        assert!(max_diff > 1e-3, "max_diff = {max_diff}");
    }

    #[test]
    fn test_insufficient_points_for_every_model() {
        let single = PointSequence::from_pairs(&[(1.0, 1.0)]);
        let empty = PointSequence::from_pairs(&[]);
        for model in [
            CorrectionModel::Uniform,
            CorrectionModel::Proportional,
            CorrectionModel::Composed,
        ] {
            assert!(matches!(
                model.apply(&single),
                Err(CorrectionError::InsufficientPoints { found: 1, .. })
            ));
            assert!(matches!(
                model.apply(&empty),
                Err(CorrectionError::InsufficientPoints { found: 0, .. })
            ));
        }
    }

    #[test]
    fn test_degenerate_geometry_on_proportional_paths() {
        let seq = PointSequence::from_pairs(&[(3.0, 3.0), (3.0, 3.0), (3.0, 3.0)]);
        assert_eq!(
            CorrectionModel::Proportional.apply(&seq),
            Err(CorrectionError::DegenerateGeometry)
        );
        assert_eq!(
            CorrectionModel::Composed.apply(&seq),
            Err(CorrectionError::DegenerateGeometry)
        );
        // Uniform has no length term and passes coincident points through.
        assert_eq!(CorrectionModel::Uniform.apply(&seq).unwrap(), seq);
    }

    #[test]
    fn test_composed_two_points_is_degenerate() {
        // Uniform collapses a two-point traverse onto its anchor, leaving the
        // proportional stage nothing to measure.
        let seq = PointSequence::from_pairs(&[(0.0, 0.0), (2.0, 1.0)]);
        assert_eq!(
            CorrectionModel::Composed.apply(&seq),
            Err(CorrectionError::DegenerateGeometry)
        );
    }
}
