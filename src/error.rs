use std::path::PathBuf;

use thiserror::Error;

/// Top-level error for one correction run.
#[derive(Error, Debug)]
pub enum TraverseError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Projection error: {0}")]
    Projection(#[from] ProjError),

    #[error("Correction error: {0}")]
    Correction(#[from] CorrectionError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Plot error: {0}")]
    Plot(#[from] PlotError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl TraverseError {
    /// Process exit status: 2 for configuration and selection problems, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            TraverseError::Config(_) => 2,
            _ => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no delimiter among ';', ',', ' ' yields 3 fields on every line{}", describe_origin(.origin))]
    NoDelimiter { origin: Option<PathBuf> },
}

fn describe_origin(origin: &Option<PathBuf>) -> String {
    match origin {
        Some(path) => format!(" of {}", path.display()),
        None => String::new(),
    }
}

impl ParseError {
    /// Attach the source path to a failure produced from in-memory text.
    pub fn with_origin(self, path: &std::path::Path) -> Self {
        match self {
            ParseError::NoDelimiter { .. } => ParseError::NoDelimiter {
                origin: Some(path.to_path_buf()),
            },
            other => other,
        }
    }
}

#[derive(Error, Debug)]
pub enum ProjError {
    #[error("UTM zone must be within 1..=60, got {0}")]
    InvalidZone(i64),

    #[error("Unknown hemisphere: {0:?} (expected N or S)")]
    InvalidHemisphere(String),

    #[error("Unsupported CRS identifier: {0}")]
    UnsupportedCrs(String),

    #[error("Transform failed: {0}")]
    TransformFailed(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum CorrectionError {
    #[error("at least {needed} points are required, found {found}")]
    InsufficientPoints { needed: usize, found: usize },

    #[error("total traverse length is zero; proportional distribution is undefined")]
    DegenerateGeometry,

    #[error("coordinate columns differ in length: {x_len} x values, {y_len} y values")]
    LengthMismatch { x_len: usize, y_len: usize },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write {}: {reason}", path.display())]
    WriteFailure { path: PathBuf, reason: String },

    #[error("a polygon needs at least 3 vertices, found {0}")]
    DegeneratePolygon(usize),
}

impl ExportError {
    pub fn write_failure(path: &std::path::Path, reason: impl ToString) -> Self {
        ExportError::WriteFailure {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("failed to render {}: {reason}", path.display())]
    Render { path: PathBuf, reason: String },

    #[error("nothing to plot")]
    Empty,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {what} selection: {value:?} (expected one of {expected})")]
    InvalidSelection {
        what: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("missing required setting: {0}")]
    Missing(&'static str),

    #[error("cannot read config {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid projection settings: {0}")]
    Projection(#[from] ProjError),

    #[error("failed to read answer: {0}")]
    Prompt(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let selection: TraverseError = ConfigError::InvalidSelection {
            what: "correction model",
            value: "4".to_string(),
            expected: "1/uniform, 2/proportional, 3/composed",
        }
        .into();
        assert_eq!(selection.exit_code(), 2);

        let zone: TraverseError = ConfigError::from(ProjError::InvalidZone(61)).into();
        assert_eq!(zone.exit_code(), 2);

        let correction: TraverseError = CorrectionError::DegenerateGeometry.into();
        assert_eq!(correction.exit_code(), 1);
        let export: TraverseError = ExportError::DegeneratePolygon(2).into();
        assert_eq!(export.exit_code(), 1);
    }
}
