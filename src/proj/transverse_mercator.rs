//! UTM transverse Mercator, Krüger n-series to 6th order (Karney 2011).
//!
//! Only the UTM parameterisation is needed here: origin latitude 0, scale
//! 0.9996, false easting 500 km, false northing 0 (north) or 10 000 km (south).
//! With a zero origin latitude the meridional offset term drops out.

use crate::error::ProjError;
use crate::proj::ellipsoid::{Ellipsoid, WGS84};
use crate::proj::{Hemisphere, Projection, ProjectionContext};

const UTM_SCALE: f64 = 0.9996;
const UTM_FALSE_EASTING: f64 = 500_000.0;
const UTM_SOUTH_FALSE_NORTHING: f64 = 10_000_000.0;

/// Series coefficients shared by the forward (α) and inverse (β) mappings.
#[derive(Clone, Copy, Debug)]
struct KrugerSeries {
    alpha: [f64; 6],
    beta: [f64; 6],
}

impl KrugerSeries {
    fn new(n: f64) -> Self {
        let p: [f64; 7] = std::array::from_fn(|k| n.powi(k as i32));
        let alpha = [
            p[1] / 2.0 - 2.0 / 3.0 * p[2] + 5.0 / 16.0 * p[3] + 41.0 / 180.0 * p[4]
                - 127.0 / 288.0 * p[5]
                + 7891.0 / 37800.0 * p[6],
            13.0 / 48.0 * p[2] - 3.0 / 5.0 * p[3] + 557.0 / 1440.0 * p[4] + 281.0 / 630.0 * p[5]
                - 1983433.0 / 1935360.0 * p[6],
            61.0 / 240.0 * p[3] - 103.0 / 140.0 * p[4]
                + 15061.0 / 26880.0 * p[5]
                + 167603.0 / 181440.0 * p[6],
            49561.0 / 161280.0 * p[4] - 179.0 / 168.0 * p[5] + 6601661.0 / 7257600.0 * p[6],
            34729.0 / 80640.0 * p[5] - 3418889.0 / 1995840.0 * p[6],
            212378941.0 / 319334400.0 * p[6],
        ];
        let beta = [
            p[1] / 2.0 - 2.0 / 3.0 * p[2] + 37.0 / 96.0 * p[3] - 1.0 / 360.0 * p[4]
                - 81.0 / 512.0 * p[5]
                + 96199.0 / 604800.0 * p[6],
            1.0 / 48.0 * p[2] + 1.0 / 15.0 * p[3] - 437.0 / 1440.0 * p[4] + 46.0 / 105.0 * p[5]
                - 1118711.0 / 3870720.0 * p[6],
            17.0 / 480.0 * p[3] - 37.0 / 840.0 * p[4] - 209.0 / 4480.0 * p[5]
                + 5569.0 / 90720.0 * p[6],
            4397.0 / 161280.0 * p[4] - 11.0 / 504.0 * p[5] - 830251.0 / 7257600.0 * p[6],
            4583.0 / 161280.0 * p[5] - 108847.0 / 3991680.0 * p[6],
            20648693.0 / 638668800.0 * p[6],
        ];
        Self { alpha, beta }
    }

    /// Direct summation of `ξ + sign · Σ c_j sin(2jξ) cosh(2jη)` and its η counterpart.
    fn apply(coeffs: &[f64; 6], xi: f64, eta: f64, sign: f64) -> (f64, f64) {
        coeffs
            .iter()
            .enumerate()
            .fold((xi, eta), |(x_acc, e_acc), (j, &c)| {
                let k = 2.0 * (j + 1) as f64;
                (
                    x_acc + sign * c * (k * xi).sin() * (k * eta).cosh(),
                    e_acc + sign * c * (k * xi).cos() * (k * eta).sinh(),
                )
            })
    }
}

/// Transverse Mercator fixed to one UTM zone on WGS84.
#[derive(Clone, Debug)]
pub struct TransverseMercator {
    ellipsoid: Ellipsoid,
    lon0: f64,
    false_northing: f64,
    /// k0 · A, the scaled rectifying radius.
    scaled_radius: f64,
    series: KrugerSeries,
}

impl TransverseMercator {
    pub fn utm(context: &ProjectionContext) -> Self {
        let ellipsoid = WGS84;
        let n = ellipsoid.n;
        let n2 = n * n;
        let rectifying_radius = ellipsoid.a / (1.0 + n) * (1.0 + n2 / 4.0 + n2 * n2 / 64.0);
        let false_northing = match context.hemisphere() {
            Hemisphere::North => 0.0,
            Hemisphere::South => UTM_SOUTH_FALSE_NORTHING,
        };
        Self {
            ellipsoid,
            lon0: context.central_meridian().to_radians(),
            false_northing,
            scaled_radius: UTM_SCALE * rectifying_radius,
            series: KrugerSeries::new(n),
        }
    }

    /// tan φ → tan χ (geodetic to conformal latitude).
    fn conformal_tan(&self, tau: f64) -> f64 {
        let e = self.ellipsoid.eccentricity();
        let sec = tau.hypot(1.0);
        let sigma = (e * (e * tau / sec).atanh()).sinh();
        tau * sigma.hypot(1.0) - sigma * sec
    }

    /// tan χ → tan φ by Newton iteration on [`Self::conformal_tan`].
    fn geodetic_tan(&self, tau_prime: f64) -> f64 {
        let e2 = self.ellipsoid.e2;
        let mut tau = tau_prime;
        for _ in 0..15 {
            let estimate = self.conformal_tan(tau);
            let step = (tau_prime - estimate) * (1.0 + (1.0 - e2) * tau * tau)
                / ((1.0 - e2) * tau.hypot(1.0) * estimate.hypot(1.0));
            tau += step;
            if step.abs() < 1e-12 * (1.0 + tau.abs()) {
                break;
            }
        }
        tau
    }
}

impl Projection for TransverseMercator {
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        if !lon.is_finite() || !lat.is_finite() {
            return Err(ProjError::TransformFailed(format!(
                "non-finite geographic input ({lon}, {lat})"
            )));
        }
        let dlam = lon - self.lon0;
        let tau_prime = self.conformal_tan(lat.tan());

        let xi_prime = tau_prime.atan2(dlam.cos());
        let eta_prime = (dlam.sin() / tau_prime.hypot(dlam.cos())).asinh();
        let (xi, eta) = KrugerSeries::apply(&self.series.alpha, xi_prime, eta_prime, 1.0);

        Ok((
            self.scaled_radius * eta + UTM_FALSE_EASTING,
            self.scaled_radius * xi + self.false_northing,
        ))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ProjError::TransformFailed(format!(
                "non-finite planar input ({x}, {y})"
            )));
        }
        let eta = (x - UTM_FALSE_EASTING) / self.scaled_radius;
        let xi = (y - self.false_northing) / self.scaled_radius;
        let (xi_prime, eta_prime) = KrugerSeries::apply(&self.series.beta, xi, eta, -1.0);

        let sinh_eta = eta_prime.sinh();
        let cos_xi = xi_prime.cos();
        let tau_prime = xi_prime.sin() / sinh_eta.hypot(cos_xi);

        let lat = self.geodetic_tan(tau_prime).atan();
        let lon = self.lon0 + sinh_eta.atan2(cos_xi);
        Ok((lon, lat))
    }
}
