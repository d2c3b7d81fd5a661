//! `Longitude;Latitude` text export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::ExportError;
use crate::points::PointSequence;

pub const HEADER: &str = "Longitude;Latitude";

/// Write one `a;b` line per point under a [`HEADER`] line, replacing any
/// existing file.
///
/// # Errors
/// [`ExportError::WriteFailure`] naming `path` on any I/O error.
pub fn write_delimited_text(seq: &PointSequence, path: &Path) -> Result<(), ExportError> {
    let fail = |e: std::io::Error| ExportError::write_failure(path, e);

    let mut out = BufWriter::new(File::create(path).map_err(fail)?);
    writeln!(out, "{HEADER}").map_err(fail)?;
    for (a, b) in seq.iter() {
        writeln!(out, "{a};{b}").map_err(fail)?;
    }
    out.flush().map_err(fail)?;

    debug!(path = %path.display(), points = seq.len(), "wrote delimited text");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let seq = PointSequence::from_pairs(&[(-8.6, 41.15), (-8.61, 41.1625)]);
        write_delimited_text(&seq, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "Longitude;Latitude\n-8.6;41.15\n-8.61;41.1625\n");
    }

    #[test]
    fn test_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "stale\ncontent\nthat is longer\n").unwrap();
        write_delimited_text(&PointSequence::from_pairs(&[(1.0, 2.0)]), &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Longitude;Latitude\n1;2\n");
    }

    #[test]
    fn test_failure_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let err = write_delimited_text(&PointSequence::from_pairs(&[(1.0, 2.0)]), &path)
            .unwrap_err();
        assert!(err.to_string().contains("out.txt"));
    }
}
