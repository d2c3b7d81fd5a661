//! Point and polygon shapefile export.
//!
//! Each dataset is a `.shp/.shx/.dbf` triple plus a `.prj` sidecar holding
//! the CRS as ESRI WKT. Attribute tables carry a single `ID` column.

use std::path::{Path, PathBuf};

use shapefile::dbase::{FieldName, FieldValue, Record, TableWriterBuilder};
use shapefile::record::EsriShape;
use shapefile::{Point, Polygon, PolygonRing, Writer};
use tracing::{debug, warn};

use crate::error::ExportError;
use crate::points::PointSequence;
use crate::proj::epsg::CrsIdentifier;

/// Smallest vertex count that forms a polygon ring.
pub const MIN_POLYGON_VERTICES: usize = 3;

const SIDECAR_EXTENSIONS: [&str; 4] = ["shp", "shx", "dbf", "prj"];

/// Write one point feature per coordinate pair to `points_path` and one
/// polygon feature (the sequence as a ring, closed back to the first point)
/// to `polygon_path`. Both datasets are tagged with `crs`.
///
/// The polygon precondition is checked before anything is written. If a
/// dataset fails midway its partial files are removed.
///
/// # Errors
/// [`ExportError::DegeneratePolygon`] for fewer than three points;
/// [`ExportError::WriteFailure`] naming the failing file otherwise.
pub fn write_vector_dataset(
    seq: &PointSequence,
    crs: &CrsIdentifier,
    points_path: &Path,
    polygon_path: &Path,
) -> Result<(), ExportError> {
    if seq.len() < MIN_POLYGON_VERTICES {
        return Err(ExportError::DegeneratePolygon(seq.len()));
    }

    let points: Vec<Point> = seq.iter().map(|(x, y)| Point::new(x, y)).collect();
    write_dataset(points_path, crs, &points)?;
    debug!(path = %points_path.display(), features = points.len(), "wrote point dataset");

    let ring: Vec<Point> = seq
        .closed_ring()
        .into_iter()
        .map(|(x, y)| Point::new(x, y))
        .collect();
    let polygon = Polygon::new(PolygonRing::Outer(ring));
    write_dataset(polygon_path, crs, std::slice::from_ref(&polygon))?;
    debug!(path = %polygon_path.display(), "wrote polygon dataset");

    Ok(())
}

/// Write `shapes` with sequential IDs, then the `.prj`; clean up on failure.
fn write_dataset<S: EsriShape>(
    path: &Path,
    crs: &CrsIdentifier,
    shapes: &[S],
) -> Result<(), ExportError> {
    let result = write_shapes(path, shapes).and_then(|()| write_projection(path, crs));
    if result.is_err() {
        remove_partial(path);
    }
    result
}

fn write_shapes<S: EsriShape>(path: &Path, shapes: &[S]) -> Result<(), ExportError> {
    let id_field = FieldName::try_from("ID")
        .map_err(|e| ExportError::write_failure(path, format!("{e:?}")))?;
    let table = TableWriterBuilder::new().add_numeric_field(id_field, 10, 0);

    let mut writer =
        Writer::from_path(path, table).map_err(|e| ExportError::write_failure(path, e))?;
    for (id, shape) in shapes.iter().enumerate() {
        let mut record = Record::default();
        record.insert("ID".to_string(), FieldValue::Numeric(Some(id as f64)));
        writer
            .write_shape_and_record(shape, &record)
            .map_err(|e| ExportError::write_failure(path, e))?;
    }
    Ok(())
}

fn write_projection(path: &Path, crs: &CrsIdentifier) -> Result<(), ExportError> {
    let prj = path.with_extension("prj");
    std::fs::write(&prj, crs.to_esri_wkt()).map_err(|e| ExportError::write_failure(&prj, e))
}

fn companion_files(path: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    SIDECAR_EXTENSIONS
        .iter()
        .map(move |ext| path.with_extension(ext))
}

fn remove_partial(path: &Path) {
    for file in companion_files(path) {
        if file.exists() {
            if let Err(e) = std::fs::remove_file(&file) {
                warn!(path = %file.display(), error = %e, "could not remove partial output");
            }
        }
    }
}
