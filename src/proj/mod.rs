pub mod crs;
pub mod ellipsoid;
pub mod epsg;
pub mod transverse_mercator;

use std::fmt;
use std::str::FromStr;

use crate::error::ProjError;
use crate::points::PointSequence;

use self::crs::Proj4rsUtm;
use self::transverse_mercator::TransverseMercator;

/// Trait for map projections supporting forward and inverse transforms.
pub trait Projection: fmt::Debug {
    /// Forward: (lon_rad, lat_rad) -> (easting, northing)
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError>;

    /// Inverse: (easting, northing) -> (lon_rad, lat_rad)
    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hemisphere {
    North,
    South,
}

impl FromStr for Hemisphere {
    type Err = ProjError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "n" | "north" => Ok(Self::North),
            "s" | "south" => Ok(Self::South),
            _ => Err(ProjError::InvalidHemisphere(s.to_string())),
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Hemisphere::North => "N",
            Hemisphere::South => "S",
        })
    }
}

/// UTM zone and hemisphere for one run.
///
/// Forward and inverse transforms of the same data must use the same context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProjectionContext {
    zone: u8,
    hemisphere: Hemisphere,
}

impl ProjectionContext {
    pub fn new(zone: i64, hemisphere: Hemisphere) -> Result<Self, ProjError> {
        match u8::try_from(zone) {
            Ok(z @ 1..=60) => Ok(Self {
                zone: z,
                hemisphere,
            }),
            _ => Err(ProjError::InvalidZone(zone)),
        }
    }

    pub fn zone(&self) -> u8 {
        self.zone
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    /// Central meridian in degrees.
    pub fn central_meridian(&self) -> f64 {
        f64::from(self.zone) * 6.0 - 183.0
    }

    /// EPSG code of the WGS84 UTM system for this zone.
    pub fn epsg_code(&self) -> u32 {
        let base = match self.hemisphere {
            Hemisphere::North => 32600,
            Hemisphere::South => 32700,
        };
        base + u32::from(self.zone)
    }
}

impl fmt::Display for ProjectionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UTM {}{}", self.zone, self.hemisphere)
    }
}

/// Which implementation performs the UTM math.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProjectionBackend {
    /// Krüger series in [`transverse_mercator`].
    #[default]
    Native,
    /// proj4rs, see [`crs`].
    Proj4rs,
}

impl ProjectionBackend {
    /// Parse from a backend name.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "native" => Some(Self::Native),
            "proj4rs" | "proj" => Some(Self::Proj4rs),
            _ => None,
        }
    }
}

/// Geographic (degrees) <-> UTM (metres) for a fixed [`ProjectionContext`].
#[derive(Debug)]
pub struct UtmProjection {
    context: ProjectionContext,
    inner: Box<dyn Projection>,
}

impl UtmProjection {
    pub fn new(context: ProjectionContext, backend: ProjectionBackend) -> Result<Self, ProjError> {
        let inner: Box<dyn Projection> = match backend {
            ProjectionBackend::Native => Box::new(TransverseMercator::utm(&context)),
            ProjectionBackend::Proj4rs => Box::new(Proj4rsUtm::new(&context)?),
        };
        Ok(Self { context, inner })
    }

    pub fn context(&self) -> ProjectionContext {
        self.context
    }

    /// (lon°, lat°) -> (easting m, northing m)
    pub fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        self.inner.forward(lon.to_radians(), lat.to_radians())
    }

    /// (easting m, northing m) -> (lon°, lat°)
    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let (lon, lat) = self.inner.inverse(x, y)?;
        Ok((lon.to_degrees(), lat.to_degrees()))
    }

    /// Project a whole geographic sequence (x = lon, y = lat) to planar.
    pub fn forward_sequence(&self, geographic: &PointSequence) -> Result<PointSequence, ProjError> {
        geographic.try_map(|lon, lat| self.forward(lon, lat))
    }

    /// Unproject a planar sequence back to geographic (x = lon, y = lat).
    pub fn inverse_sequence(&self, planar: &PointSequence) -> Result<PointSequence, ProjError> {
        planar.try_map(|x, y| self.inverse(x, y))
    }
}
