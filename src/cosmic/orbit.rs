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

use super::anomaly::{eccentric_to_true_anomaly, mean_to_eccentric_anomaly, KEPLER_TOLERANCE};
use super::{Apsis, AstroError, EARTH_EQUATORIAL_RADIUS_KM, EARTH_GM_KM3_S2, SECONDS_PER_DAY};
use crate::io::{duration_from_str, duration_to_str, ConfigRepr};
use crate::time::{Duration, Unit};
use crate::utils::{between_0_360, round_to_decimals};
use approx::abs_diff_eq;
use serde_derive::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::fmt;
use typed_builder::TypedBuilder;

/// Eccentricity below which `Orbit::is_circular` reports an orbit as circular
pub const ECC_EPSILON: f64 = 1e-11;

/// Number of decimal places kept when computing the eccentricity from the apsides
pub const ECC_DECIMALS: i32 = 7;

/// Orbit defines a two-body Keplerian orbit from its classical elements.
///
/// The gravitational parameter of the central body is stored with the elements so that every
/// computation is a pure function of this structure. It defaults to the Earth's.
///
/// **Units:** km, degrees, revolutions per day, km^3/s^2
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(doc)]
pub struct Orbit {
    /// Eccentricity (no unit), in [0, 1) for an ellipse
    pub ecc: f64,
    /// Orbital period as published with the elements, not checked against the semi-major axis
    #[serde(serialize_with = "duration_to_str", deserialize_with = "duration_from_str")]
    #[builder(default = Duration::ZERO)]
    pub period: Duration,
    /// in km
    pub sma_km: f64,
    /// Mean anomaly in degrees
    #[builder(default)]
    pub ma_deg: f64,
    /// Inclination in degrees
    #[builder(default)]
    pub inc_deg: f64,
    /// Mean motion in revolutions per day
    #[builder(default)]
    pub mean_motion_rev_day: f64,
    /// Argument of pericenter in degrees
    #[builder(default)]
    pub aop_deg: f64,
    /// Gravitational parameter of the central body in km^3/s^2
    #[serde(default = "earth_gm")]
    #[builder(default = EARTH_GM_KM3_S2)]
    pub gm_km3_s2: f64,
}

fn earth_gm() -> f64 {
    EARTH_GM_KM3_S2
}

impl Orbit {
    /// Creates a new Earth orbit from its seven published elements.
    ///
    /// No consistency check is performed between the period, the mean motion and the semi-major axis.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        ecc: f64,
        period: Duration,
        sma_km: f64,
        ma_deg: f64,
        inc_deg: f64,
        mean_motion_rev_day: f64,
        aop_deg: f64,
    ) -> Self {
        let me = Self {
            ecc,
            period,
            sma_km,
            ma_deg,
            inc_deg,
            mean_motion_rev_day,
            aop_deg,
            gm_km3_s2: EARTH_GM_KM3_S2,
        };
        me.warn_if_ill_defined();
        me
    }

    /// Creates a new orbit from the provided radii of apoapsis and periapsis, in kilometers.
    ///
    /// The period and mean motion are computed from Kepler's third law, all angles are zero.
    pub fn from_apsides(r_apo_km: f64, r_peri_km: f64, gm_km3_s2: f64) -> Self {
        let sma_km = Self::sma_from_apsides(r_apo_km, r_peri_km);
        let me = Self {
            ecc: Self::ecc_from_apsides(r_apo_km, r_peri_km),
            period: Self::period_from_sma(sma_km, gm_km3_s2),
            sma_km,
            ma_deg: 0.0,
            inc_deg: 0.0,
            mean_motion_rev_day: (gm_km3_s2 / sma_km.powi(3)).sqrt() * SECONDS_PER_DAY / TAU,
            aop_deg: 0.0,
            gm_km3_s2,
        };
        me.warn_if_ill_defined();
        me
    }

    /// Returns a copy of this orbit around a central body with the provided gravitational parameter.
    pub fn with_gm(self, gm_km3_s2: f64) -> Self {
        let mut me = self;
        me.gm_km3_s2 = gm_km3_s2;
        me
    }

    /// Logs a warning for elements outside of the domain of the formulas. Nothing is clamped.
    pub(crate) fn warn_if_ill_defined(&self) {
        if self.gm_km3_s2.abs() < f64::EPSILON {
            warn!(
                "GM is near zero ({}): expect math errors in orbit computations",
                self.gm_km3_s2
            );
        }
        if self.sma_km <= 0.0 {
            warn!(
                "semi-major axis must be positive for an ellipse, got {} km",
                self.sma_km
            );
        }
        if !(0.0..1.0).contains(&self.ecc) {
            warn!(
                "eccentricity {} is not elliptical: apsis and anomaly computations are ill-defined",
                self.ecc
            );
        }
    }

    /// Returns the orbital radius at the requested position, in kilometers.
    ///
    /// The position is either `apogee` or `perigee` (or `apoapsis` / `periapsis`), any other position is an error.
    pub fn radius_at(&self, position: &str) -> Result<f64, AstroError> {
        Ok(self.radius_at_apsis(position.parse()?))
    }

    /// Returns the orbital radius at the provided apsis, in kilometers.
    pub fn radius_at_apsis(&self, apsis: Apsis) -> f64 {
        match apsis {
            Apsis::Apoapsis => self.sma_km * (1.0 + self.ecc),
            Apsis::Periapsis => self.sma_km * (1.0 - self.ecc),
        }
    }

    /// Returns the radius of apoapsis (or apogee around Earth), in kilometers.
    pub fn apoapsis_km(&self) -> f64 {
        self.radius_at_apsis(Apsis::Apoapsis)
    }

    /// Returns the radius of periapsis (or perigee around Earth), in kilometers.
    pub fn periapsis_km(&self) -> f64 {
        self.radius_at_apsis(Apsis::Periapsis)
    }

    /// Returns the altitude of apoapsis above the Earth's equatorial radius, in kilometers.
    pub fn apoapsis_altitude_km(&self) -> f64 {
        self.apoapsis_km() - EARTH_EQUATORIAL_RADIUS_KM
    }

    /// Returns the altitude of periapsis above the Earth's equatorial radius, in kilometers.
    pub fn periapsis_altitude_km(&self) -> f64 {
        self.periapsis_km() - EARTH_EQUATORIAL_RADIUS_KM
    }

    /// Returns the specific mechanical energy of an elliptical orbit in km^2/s^2 (i.e. MJ/kg)
    pub fn energy_km2_s2(&self) -> f64 {
        -self.gm_km3_s2.abs() / (2.0 * self.sma_km)
    }

    /// Returns the instantaneous velocity at the requested position (`apogee` or `perigee`) in km/s,
    /// from the vis-viva equation.
    pub fn velocity_at_position(&self, position: &str) -> Result<f64, AstroError> {
        Ok(self.velocity_at_apsis(position.parse()?))
    }

    /// Returns the instantaneous velocity at the provided apsis in km/s, from the vis-viva equation.
    pub fn velocity_at_apsis(&self, apsis: Apsis) -> f64 {
        (2.0 * (self.gm_km3_s2 / self.radius_at_apsis(apsis) + self.energy_km2_s2())).sqrt()
    }

    /// Returns the Keplerian period computed from the semi-major axis, ignoring the stored period.
    pub fn orbital_period(&self) -> Duration {
        Self::period_from_sma(self.sma_km, self.gm_km3_s2)
    }

    /// Returns the difference between the Keplerian period and the stored period.
    pub fn period_mismatch(&self) -> Duration {
        self.orbital_period() - self.period
    }

    /// Returns the mean motion computed from the semi-major axis, in radians per second.
    pub fn mean_motion_rad_s(&self) -> f64 {
        (self.gm_km3_s2 / self.sma_km.powi(3)).sqrt()
    }

    /// Returns the eccentric anomaly in degrees, between 0 and 360.
    pub fn ea_deg(&self) -> Result<f64, AstroError> {
        let ea = mean_to_eccentric_anomaly(self.ma_deg.to_radians(), self.ecc, KEPLER_TOLERANCE)?;
        Ok(between_0_360(ea.to_degrees()))
    }

    /// Returns the true anomaly in radians, between 0 and 2π.
    ///
    /// Kepler's equation is solved for the eccentric anomaly with Newton-Raphson, and the true anomaly follows from
    /// `tan(ν/2) = sqrt((1+e)/(1-e)) tan(E/2)`.
    pub fn ta_rad(&self) -> Result<f64, AstroError> {
        let ea = mean_to_eccentric_anomaly(self.ma_deg.to_radians(), self.ecc, KEPLER_TOLERANCE)?;
        eccentric_to_true_anomaly(ea, self.ecc)
    }

    /// Returns the true anomaly in degrees, between 0 and 360.
    pub fn ta_deg(&self) -> Result<f64, AstroError> {
        Ok(between_0_360(self.ta_rad()?.to_degrees()))
    }

    /// Returns the period of an orbit of the provided semi-major axis, from Kepler's third law.
    pub fn period_from_sma(sma_km: f64, gm_km3_s2: f64) -> Duration {
        2.0 * PI * (sma_km.powi(3) / gm_km3_s2).sqrt() * Unit::Second
    }

    /// Returns the eccentricity of an orbit from its radii of apoapsis and periapsis, rounded to seven decimals.
    pub fn ecc_from_apsides(r_apo_km: f64, r_peri_km: f64) -> f64 {
        round_to_decimals(1.0 - 2.0 / (r_apo_km / r_peri_km + 1.0), ECC_DECIMALS)
    }

    /// Returns the semi-major axis of an orbit from its radii of apoapsis and periapsis, in kilometers.
    pub fn sma_from_apsides(r_apo_km: f64, r_peri_km: f64) -> f64 {
        (r_apo_km + r_peri_km) / 2.0
    }

    /// Returns whether this orbit is circular, within [ECC_EPSILON].
    pub fn is_circular(&self) -> bool {
        self.ecc.abs() < ECC_EPSILON
    }

    /// Returns whether both orbits are equal within the provided semi-major axis and angle tolerances.
    /// The eccentricity is compared with the angle tolerance expressed in radians.
    pub fn eq_within(&self, other: &Self, sma_tol_km: f64, angle_tol_deg: f64) -> bool {
        abs_diff_eq!(self.sma_km, other.sma_km, epsilon = sma_tol_km)
            && abs_diff_eq!(self.ecc, other.ecc, epsilon = angle_tol_deg.to_radians())
            && abs_diff_eq!(self.inc_deg, other.inc_deg, epsilon = angle_tol_deg)
            && abs_diff_eq!(self.aop_deg, other.aop_deg, epsilon = angle_tol_deg)
            && abs_diff_eq!(
                between_0_360(self.ma_deg),
                between_0_360(other.ma_deg),
                epsilon = angle_tol_deg
            )
    }
}

impl ConfigRepr for Orbit {}

impl fmt::Display for Orbit {
    // Prints the Keplerian orbital elements with units
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "sma = {:.6} km\tecc = {:.6}\tinc = {:.6} deg\taop = {:.6} deg\tma = {:.6} deg\tn = {:.8} rev/day\tperiod = {}",
            self.sma_km,
            self.ecc,
            self.inc_deg,
            self.aop_deg,
            self.ma_deg,
            self.mean_motion_rev_day,
            self.period
        )
    }
}
