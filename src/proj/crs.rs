use proj4rs::Proj;

use crate::error::ProjError;
use crate::proj::{Hemisphere, Projection, ProjectionContext};

const WGS84_LONGLAT: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// UTM backed by proj4rs, used as a reference implementation and as an
/// alternative to the native series.
///
/// Works in radians on the geographic side to match [`Projection`].
pub struct Proj4rsUtm {
    geographic: Proj,
    utm: Proj,
}

impl std::fmt::Debug for Proj4rsUtm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Proj4rsUtm").finish_non_exhaustive()
    }
}

impl Proj4rsUtm {
    pub fn new(context: &ProjectionContext) -> Result<Self, ProjError> {
        let geographic = Proj::from_proj_string(WGS84_LONGLAT)
            .map_err(|e| ProjError::TransformFailed(format!("{WGS84_LONGLAT}: {e}")))?;
        let definition = utm_definition(context);
        let utm = Proj::from_proj_string(&definition)
            .map_err(|e| ProjError::TransformFailed(format!("{definition}: {e}")))?;
        Ok(Self { geographic, utm })
    }
}

/// PROJ string for a WGS84 UTM zone.
pub fn utm_definition(context: &ProjectionContext) -> String {
    let south = match context.hemisphere() {
        Hemisphere::North => "",
        Hemisphere::South => " +south",
    };
    format!(
        "+proj=utm +zone={}{south} +datum=WGS84 +units=m +no_defs",
        context.zone()
    )
}

impl Projection for Proj4rsUtm {
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let mut point = (lon, lat);
        proj4rs::transform::transform(&self.geographic, &self.utm, &mut point)
            .map_err(|e| ProjError::TransformFailed(e.to_string()))?;
        Ok(point)
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let mut point = (x, y);
        proj4rs::transform::transform(&self.utm, &self.geographic, &mut point)
            .map_err(|e| ProjError::TransformFailed(e.to_string()))?;
        Ok(point)
    }
}
