//! Reads survey point files into longitude/latitude columns.
//!
//! Files have one header line followed by `label<d>latitude<d>longitude`
//! rows, where the delimiter `<d>` is sniffed per file.

use std::path::Path;

use tracing::{debug, warn};

use crate::error::ParseError;

/// Delimiters in the order they are tried.
pub const DELIMITERS: [char; 3] = [';', ',', ' '];

const LATITUDE_FIELD: usize = 1;
const LONGITUDE_FIELD: usize = 2;

/// A data row whose coordinate fields are not finite decimal degrees in range.
#[derive(Clone, Debug, PartialEq)]
pub struct MalformedLine {
    /// 1-based line number in the file, header included.
    pub line_number: usize,
    pub content: String,
}

/// Result of a successful parse: the good rows plus the skipped ones.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedCoordinates {
    pub longitudes: Vec<f64>,
    pub latitudes: Vec<f64>,
    pub malformed: Vec<MalformedLine>,
    pub delimiter: char,
}

impl ParsedCoordinates {
    pub fn len(&self) -> usize {
        self.longitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.longitudes.is_empty()
    }

    /// `(lon, lat)` pairs in file order.
    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.longitudes
            .iter()
            .copied()
            .zip(self.latitudes.iter().copied())
    }
}

enum Row {
    Point { lon: f64, lat: f64 },
    Malformed,
}

/// Outcome of splitting one line with one delimiter. `None` means the line
/// has too few fields for this delimiter.
fn split_row(line: &str, delimiter: char) -> Option<Row> {
    let fields: Vec<&str> = line.split(delimiter).collect();
    let lat = fields.get(LATITUDE_FIELD)?;
    let lon = fields.get(LONGITUDE_FIELD)?;
    match (coordinate(lon, 180.0), coordinate(lat, 90.0)) {
        (Some(lon), Some(lat)) => Some(Row::Point { lon, lat }),
        _ => Some(Row::Malformed),
    }
}

/// A finite decimal within `[-limit, limit]` degrees.
fn coordinate(field: &str, limit: f64) -> Option<f64> {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() <= limit)
}

fn parse_with(raw: &str, delimiter: char) -> Option<ParsedCoordinates> {
    let mut parsed = ParsedCoordinates {
        longitudes: Vec::new(),
        latitudes: Vec::new(),
        malformed: Vec::new(),
        delimiter,
    };

    for (idx, line) in raw.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match split_row(line, delimiter)? {
            Row::Point { lon, lat } => {
                parsed.longitudes.push(lon);
                parsed.latitudes.push(lat);
            }
            Row::Malformed => parsed.malformed.push(MalformedLine {
                line_number: idx + 1,
                content: line.to_string(),
            }),
        }
    }
    Some(parsed)
}

/// Parse point text, trying each delimiter in [`DELIMITERS`] until one
/// splits every data line into at least three fields.
///
/// Rows with non-numeric coordinates do not stop the parse; they are
/// reported in [`ParsedCoordinates::malformed`].
///
/// # Errors
/// [`ParseError::NoDelimiter`] when every delimiter leaves some line short.
pub fn parse(raw: &str) -> Result<ParsedCoordinates, ParseError> {
    for delimiter in DELIMITERS {
        match parse_with(raw, delimiter) {
            Some(parsed) => {
                debug!(?delimiter, rows = parsed.len(), "delimiter accepted");
                for bad in &parsed.malformed {
                    warn!(line = bad.line_number, content = %bad.content, "skipping malformed line");
                }
                return Ok(parsed);
            }
            None => debug!(?delimiter, "delimiter rejected"),
        }
    }
    Err(ParseError::NoDelimiter { origin: None })
}

/// Read and [`parse`] a point file.
///
/// # Errors
/// [`ParseError::Unreadable`] if the file cannot be read, otherwise as [`parse`].
pub fn read_coordinates(path: &Path) -> Result<ParsedCoordinates, ParseError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ParseError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&raw).map_err(|e| e.with_origin(path))
}
