//! Writers for corrected traverses.
//!
//! Outputs are independent files and are not written transactionally: if a
//! later writer fails, earlier files stay on disk.

pub mod text;
pub mod vector;

pub use text::write_delimited_text;
pub use vector::write_vector_dataset;

/// Coordinate space used for exported values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportSpace {
    /// UTM easting/northing in metres.
    Planar,
    /// Longitude/latitude in degrees.
    #[default]
    Geographic,
}

impl ExportSpace {
    /// Parse from a space name or its menu number (1 planar, 2 geographic).
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "planar" | "utm" => Some(Self::Planar),
            "2" | "geographic" | "geo" => Some(Self::Geographic),
            _ => None,
        }
    }
}
