//! CRS identifiers for tagging exported datasets.
//!
//! Only WGS84 geographic (EPSG:4326) and WGS84 UTM (EPSG:326zz / 327zz) are
//! recognised, since those are the only systems this tool produces.

use std::fmt;
use std::str::FromStr;

use crate::error::ProjError;
use crate::proj::ellipsoid::WGS84;
use crate::proj::{Hemisphere, ProjectionContext};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrsIdentifier {
    /// EPSG:4326
    Wgs84Geographic,
    /// EPSG:326zz (north) or EPSG:327zz (south)
    Utm(ProjectionContext),
}

impl CrsIdentifier {
    pub fn epsg_code(&self) -> u32 {
        match self {
            CrsIdentifier::Wgs84Geographic => 4326,
            CrsIdentifier::Utm(ctx) => ctx.epsg_code(),
        }
    }

    pub fn is_geographic(&self) -> bool {
        matches!(self, CrsIdentifier::Wgs84Geographic)
    }

    /// ESRI-flavoured WKT, the dialect expected in shapefile `.prj` sidecars.
    pub fn to_esri_wkt(&self) -> String {
        let geogcs = format!(
            "GEOGCS[\"GCS_WGS_1984\",DATUM[\"D_WGS_1984\",SPHEROID[\"WGS_1984\",{:.1},{}]],\
             PRIMEM[\"Greenwich\",0.0],UNIT[\"Degree\",0.0174532925199433]]",
            WGS84.a, WGS84.inv_f
        );
        match self {
            CrsIdentifier::Wgs84Geographic => geogcs,
            CrsIdentifier::Utm(ctx) => {
                let (suffix, false_northing) = match ctx.hemisphere() {
                    Hemisphere::North => ('N', 0.0),
                    Hemisphere::South => ('S', 10_000_000.0),
                };
                format!(
                    "PROJCS[\"WGS_1984_UTM_Zone_{zone}{suffix}\",{geogcs},\
                     PROJECTION[\"Transverse_Mercator\"],\
                     PARAMETER[\"False_Easting\",500000.0],\
                     PARAMETER[\"False_Northing\",{false_northing:.1}],\
                     PARAMETER[\"Central_Meridian\",{cm:.1}],\
                     PARAMETER[\"Scale_Factor\",0.9996],\
                     PARAMETER[\"Latitude_Of_Origin\",0.0],\
                     UNIT[\"Meter\",1.0]]",
                    zone = ctx.zone(),
                    cm = ctx.central_meridian(),
                )
            }
        }
    }
}

impl From<ProjectionContext> for CrsIdentifier {
    fn from(ctx: ProjectionContext) -> Self {
        CrsIdentifier::Utm(ctx)
    }
}

impl fmt::Display for CrsIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg_code())
    }
}

impl FromStr for CrsIdentifier {
    type Err = ProjError;

    /// Accepts `EPSG:32629`, `epsg:32629` or a bare `32629`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("EPSG:")
            .or_else(|| trimmed.strip_prefix("epsg:"))
            .unwrap_or(trimmed);
        let code = digits
            .parse::<u32>()
            .map_err(|_| ProjError::UnsupportedCrs(s.to_string()))?;

        match code {
            4326 => Ok(CrsIdentifier::Wgs84Geographic),
            32601..=32660 => Ok(CrsIdentifier::Utm(ProjectionContext::new(
                i64::from(code - 32600),
                Hemisphere::North,
            )?)),
            32701..=32760 => Ok(CrsIdentifier::Utm(ProjectionContext::new(
                i64::from(code - 32700),
                Hemisphere::South,
            )?)),
            _ => Err(ProjError::UnsupportedCrs(s.to_string())),
        }
    }
}
