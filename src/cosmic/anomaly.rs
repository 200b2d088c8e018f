/*
    Debris Orbits, Keplerian orbit quantities and orbital debris retrieval
    Copyright (C) 2023 Christopher Rabotin <christopher.rabotin@gmail.com>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use super::AstroError;
use crate::utils::between_0_tau;
use std::f64::consts::PI;

/// Default convergence tolerance on the eccentric anomaly, in radians
pub const KEPLER_TOLERANCE: f64 = 1e-12;
/// Maximum number of Newton-Raphson iterations when solving Kepler's equation
pub const KEPLER_MAX_ITER: usize = 100;

fn ensure_elliptical(ecc: f64) -> Result<(), AstroError> {
    if (0.0..1.0).contains(&ecc) {
        Ok(())
    } else {
        Err(AstroError::NotElliptical { ecc })
    }
}

/// Solves Kepler's equation `M = E - e sin(E)` for the eccentric anomaly, in radians, using Newton-Raphson.
///
/// The mean anomaly is first wrapped into [0, 2π). The initial guess is the mean anomaly itself for
/// moderate eccentricities and π for highly eccentric orbits, where M is a poor starting point.
pub fn mean_to_eccentric_anomaly(ma_rad: f64, ecc: f64, tol: f64) -> Result<f64, AstroError> {
    ensure_elliptical(ecc)?;

    let ma = between_0_tau(ma_rad);
    let mut ea = if ecc < 0.8 { ma } else { PI };

    for iter in 0..KEPLER_MAX_ITER {
        let (sin_ea, cos_ea) = ea.sin_cos();
        let delta = (ea - ecc * sin_ea - ma) / (1.0 - ecc * cos_ea);
        ea -= delta;
        if delta.abs() < tol {
            trace!("Kepler equation converged in {} iterations", iter + 1);
            return Ok(ea);
        }
    }

    Err(AstroError::MaxIterReached {
        iter: KEPLER_MAX_ITER,
    })
}

/// Converts the eccentric anomaly to the true anomaly, both in radians.
///
/// This is the half-angle relation `tan(ν/2) = sqrt((1+e)/(1-e)) tan(E/2)`, written with `atan2` so that
/// the quadrant is preserved. The result is in [0, 2π).
pub fn eccentric_to_true_anomaly(ea_rad: f64, ecc: f64) -> Result<f64, AstroError> {
    ensure_elliptical(ecc)?;
    let (sin_half, cos_half) = (ea_rad / 2.0).sin_cos();
    let ta = 2.0 * ((1.0 + ecc).sqrt() * sin_half).atan2((1.0 - ecc).sqrt() * cos_half);
    Ok(between_0_tau(ta))
}

/// Converts the true anomaly to the eccentric anomaly, both in radians. The result is in [0, 2π).
pub fn true_to_eccentric_anomaly(ta_rad: f64, ecc: f64) -> Result<f64, AstroError> {
    ensure_elliptical(ecc)?;
    let (sin_ta, cos_ta) = ta_rad.sin_cos();
    let ecc_cos_ta = 1.0 + ecc * cos_ta;
    let sin_ea = (1.0 - ecc.powi(2)).sqrt() * sin_ta / ecc_cos_ta;
    let cos_ea = (ecc + cos_ta) / ecc_cos_ta;
    Ok(between_0_tau(sin_ea.atan2(cos_ea)))
}

/// Converts the eccentric anomaly to the mean anomaly (Kepler's equation), both in radians.
pub fn eccentric_to_mean_anomaly(ea_rad: f64, ecc: f64) -> Result<f64, AstroError> {
    ensure_elliptical(ecc)?;
    Ok(between_0_tau(ea_rad - ecc * ea_rad.sin()))
}

/// Converts the mean anomaly to the true anomaly, both in radians.
pub fn mean_to_true_anomaly(ma_rad: f64, ecc: f64) -> Result<f64, AstroError> {
    let ea = mean_to_eccentric_anomaly(ma_rad, ecc, KEPLER_TOLERANCE)?;
    eccentric_to_true_anomaly(ea, ecc)
}
