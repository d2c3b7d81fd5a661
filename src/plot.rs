//! SVG comparison plot of the original and corrected traverses.

use std::ops::Range;
use std::path::Path;

use plotters::prelude::*;
use tracing::debug;

use crate::error::PlotError;
use crate::points::PointSequence;

const SIZE: (u32, u32) = (1024, 768);
const MARKER_RADIUS: i32 = 4;

/// Axis range covering every point of both sequences, padded by 5%.
fn extent(seqs: &[&PointSequence]) -> Option<(Range<f64>, Range<f64>)> {
    let mut pts = seqs.iter().flat_map(|s| s.iter());
    let (x0, y0) = pts.next()?;
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (x0, x0, y0, y0);
    for (x, y) in pts {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    // Square-ish padding so a single point or a straight line still renders.
    let pad = ((max_x - min_x).max(max_y - min_y) * 0.05).max(1e-9);
    Some((min_x - pad..max_x + pad, min_y - pad..max_y + pad))
}

/// Draw both point sets and their closed rings to an SVG at `path`.
///
/// # Errors
/// [`PlotError::Empty`] if both sequences are empty, [`PlotError::Render`]
/// if the backend fails.
pub fn render(
    original: &PointSequence,
    corrected: &PointSequence,
    title: &str,
    path: &Path,
) -> Result<(), PlotError> {
    let (x_range, y_range) = extent(&[original, corrected]).ok_or(PlotError::Empty)?;
    let fail = |e: &dyn std::fmt::Display| PlotError::Render {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|e| fail(&e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| fail(&e))?;

    chart
        .configure_mesh()
        .x_desc("X")
        .y_desc("Y")
        .draw()
        .map_err(|e| fail(&e))?;

    for (seq, color, label) in [(original, BLUE, "Original"), (corrected, RED, "Corrected")] {
        chart
            .draw_series(LineSeries::new(seq.closed_ring(), color))
            .map_err(|e| fail(&e))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        chart
            .draw_series(
                seq.iter()
                    .map(|p| Circle::new(p, MARKER_RADIUS, color.filled())),
            )
            .map_err(|e| fail(&e))?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| fail(&e))?;

    root.present().map_err(|e| fail(&e))?;
    debug!(path = %path.display(), "rendered plot");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_extent_padding() {
        let a = PointSequence::from_pairs(&[(0.0, 0.0), (100.0, 50.0)]);
        let b = PointSequence::from_pairs(&[(-10.0, 0.0)]);
        let (xr, yr) = extent(&[&a, &b]).unwrap();
        assert_relative_eq!(xr.start, -15.5);
        assert_relative_eq!(xr.end, 105.5);
        assert_relative_eq!(yr.start, -5.5);
        assert_relative_eq!(yr.end, 55.5);
    }

    #[test]
    fn test_extent_empty() {
        let empty = PointSequence::from_pairs(&[]);
        assert!(extent(&[&empty, &empty]).is_none());
    }

    #[test]
    fn test_render_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.svg");
        let original = PointSequence::from_pairs(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.5)]);
        let corrected = PointSequence::from_pairs(&[(0.0, 0.0), (0.0, 9.8), (10.0, 9.7), (10.0, 0.0)]);
        render(&original, &corrected, "Uniform correction", &path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Corrected"));
    }

    #[test]
    fn test_render_empty_fails() {
        let dir = tempfile::tempdir().unwrap();
        let empty = PointSequence::from_pairs(&[]);
        let err = render(&empty, &empty, "t", &dir.path().join("p.svg")).unwrap_err();
        assert!(matches!(err, PlotError::Empty));
    }
}
