//! One correction run: read, project, correct, unproject, plot, export.

use std::path::PathBuf;

use ndarray::Array1;
use tracing::{info, warn};

use crate::config::RunConfig;
use crate::correct::{ClosureReport, CorrectionModel, MIN_POINTS};
use crate::error::{CorrectionError, TraverseError};
use crate::export::{self, ExportSpace};
use crate::plot;
use crate::points::PointSequence;
use crate::proj::UtmProjection;
use crate::source;

/// Planar correction with closure reports before and after.
#[derive(Clone, Debug, PartialEq)]
pub struct Adjustment {
    pub corrected: PointSequence,
    pub before: ClosureReport,
    pub after: ClosureReport,
}

/// Correct a planar traverse without any I/O.
pub fn adjust(planar: &PointSequence, model: CorrectionModel) -> Result<Adjustment, CorrectionError> {
    let before = ClosureReport::of(planar)?;
    let corrected = model.apply(planar)?;
    let after = ClosureReport::of(&corrected)?;
    Ok(Adjustment {
        corrected,
        before,
        after,
    })
}

/// What a successful run did.
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub points: usize,
    pub skipped_lines: usize,
    pub before: ClosureReport,
    pub after: ClosureReport,
    /// Files written, in order.
    pub outputs: Vec<PathBuf>,
}

/// Execute the run described by `config`.
///
/// Nothing is written until the input has been read, projected and
/// corrected. Text and shapefile outputs are written in that order and are
/// not rolled back if a later one fails.
pub fn run(config: &RunConfig) -> Result<RunSummary, TraverseError> {
    info!(
        input = %config.input.display(),
        model = config.model.label(),
        projection = %config.projection,
        "starting correction run"
    );

    let parsed = source::read_coordinates(&config.input)?;
    let skipped_lines = parsed.malformed.len();
    let delimiter = parsed.delimiter;
    let geographic = PointSequence::new(
        Array1::from(parsed.longitudes),
        Array1::from(parsed.latitudes),
    )?;
    geographic.require(MIN_POINTS)?;
    info!(
        points = geographic.len(),
        skipped = skipped_lines,
        ?delimiter,
        "read traverse"
    );

    let utm = UtmProjection::new(config.projection, config.backend)?;
    let planar = utm.forward_sequence(&geographic)?;

    let adjustment = adjust(&planar, config.model)?;
    info!(report = %adjustment.before, "closure before correction");
    info!(report = %adjustment.after, "closure after correction");

    let corrected_geographic = utm.inverse_sequence(&adjustment.corrected)?;

    let mut outputs = Vec::new();
    if let Some(path) = &config.plot_path {
        let title = format!("{} coordinate correction", config.model.label());
        plot::render(&planar, &adjustment.corrected, &title, path)?;
        outputs.push(path.clone());
    }

    let exported = match config.export_space {
        ExportSpace::Planar => &adjustment.corrected,
        ExportSpace::Geographic => &corrected_geographic,
    };
    if let Err(e) = write_outputs(config, exported, &mut outputs) {
        if !outputs.is_empty() {
            warn!(written = ?outputs, "run failed after writing some outputs");
        }
        return Err(e);
    }
    info!(outputs = ?outputs, "correction run finished");

    Ok(RunSummary {
        points: geographic.len(),
        skipped_lines,
        before: adjustment.before,
        after: adjustment.after,
        outputs,
    })
}

fn write_outputs(
    config: &RunConfig,
    seq: &PointSequence,
    outputs: &mut Vec<PathBuf>,
) -> Result<(), TraverseError> {
    export::write_delimited_text(seq, &config.output_text)?;
    outputs.push(config.output_text.clone());

    export::write_vector_dataset(seq, &config.crs, &config.points_path, &config.polygon_path)?;
    outputs.push(config.points_path.clone());
    outputs.push(config.polygon_path.clone());
    Ok(())
}
