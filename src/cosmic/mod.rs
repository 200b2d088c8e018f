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

use enum_iterator::Sequence;
use serde_derive::{Deserialize, Serialize};
use snafu::Snafu;
use std::fmt;
use std::str::FromStr;

mod orbit;
pub use self::orbit::*;

/// Conversions between the mean, eccentric and true anomalies of an elliptical orbit.
pub mod anomaly;

/// Earth's standard gravitational parameter, in km^3/s^2 (EGM96 / WGS84 value)
pub const EARTH_GM_KM3_S2: f64 = 398_600.4418;

/// Earth's equatorial radius, in kilometers (WGS84)
pub const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6_378.137;

/// Number of seconds in a day, used to convert revolutions per day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum AstroError {
    #[snafu(display("position `{position}` is not supported, use `apogee` or `perigee`"))]
    UnsupportedPosition { position: String },
    #[snafu(display("eccentricity {ecc} is not elliptical, hyperbolic and parabolic orbits are not supported"))]
    NotElliptical { ecc: f64 },
    #[snafu(display("Kepler equation did not converge after {iter} iterations"))]
    MaxIterReached { iter: usize },
}

/// Apsis of an orbit: the farthest (apoapsis) or nearest (periapsis) point from the central body.
///
/// Around the Earth, these are called apogee and perigee respectively, and both spellings are parsed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Sequence, Serialize, Deserialize)]
pub enum Apsis {
    #[serde(alias = "apogee")]
    Apoapsis,
    #[serde(alias = "perigee")]
    Periapsis,
}

impl FromStr for Apsis {
    type Err = AstroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "apogee" | "apoapsis" => Ok(Self::Apoapsis),
            "perigee" | "periapsis" => Ok(Self::Periapsis),
            _ => Err(AstroError::UnsupportedPosition {
                position: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Apsis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Apoapsis => write!(f, "apogee"),
            Self::Periapsis => write!(f, "perigee"),
        }
    }
}
