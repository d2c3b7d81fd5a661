/// Reference ellipsoid parameters.
#[derive(Clone, Copy, Debug)]
pub struct Ellipsoid {
    /// Semi-major axis (metres)
    pub a: f64,
    /// Inverse flattening, as quoted in WKT `SPHEROID` clauses
    pub inv_f: f64,
    /// First eccentricity squared
    pub e2: f64,
    /// Third flattening: f / (2 - f)
    pub n: f64,
}

impl Ellipsoid {
    pub const fn from_inverse_flattening(a: f64, inv_f: f64) -> Self {
        let f = 1.0 / inv_f;
        Self {
            a,
            inv_f,
            e2: f * (2.0 - f),
            n: f / (2.0 - f),
        }
    }

    /// First eccentricity. `sqrt` is not const, so this is derived on demand.
    pub fn eccentricity(&self) -> f64 {
        self.e2.sqrt()
    }
}

pub const WGS84: Ellipsoid = Ellipsoid::from_inverse_flattening(6_378_137.0, 298.257_223_563);
