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

use super::{DecodeSnafu, EpochParseSnafu, TrackingAstroSnafu, TrackingError};
use crate::cosmic::{AstroError, Orbit, EARTH_GM_KM3_S2, SECONDS_PER_DAY};
use crate::time::{Epoch, Unit};
use serde::Deserializer;
use serde_derive::{Deserialize, Serialize};
use snafu::prelude::*;
use std::f64::consts::TAU;
use std::str::FromStr;

/// A general perturbations (GP) element set, as returned by the Space-Track `gp` class.
///
/// Only the fields needed to rebuild the Keplerian orbit and identify the object are kept, all others are ignored.
/// Space-Track encodes all numbers as JSON strings, but plain numbers are also accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct GpRecord {
    #[serde(deserialize_with = "u32_from_str_or_num")]
    pub norad_cat_id: u32,
    pub object_name: String,
    #[serde(default)]
    pub object_id: Option<String>,
    #[serde(default)]
    pub object_type: Option<String>,
    /// Epoch of the element set, in UTC
    pub epoch: String,
    /// in revolutions per day
    #[serde(deserialize_with = "f64_from_str_or_num")]
    pub mean_motion: f64,
    #[serde(deserialize_with = "f64_from_str_or_num")]
    pub eccentricity: f64,
    /// in degrees
    #[serde(deserialize_with = "f64_from_str_or_num")]
    pub inclination: f64,
    /// in degrees
    #[serde(deserialize_with = "f64_from_str_or_num")]
    pub ra_of_asc_node: f64,
    /// in degrees
    #[serde(deserialize_with = "f64_from_str_or_num")]
    pub arg_of_pericenter: f64,
    /// in degrees
    #[serde(deserialize_with = "f64_from_str_or_num")]
    pub mean_anomaly: f64,
    /// in km
    #[serde(default, deserialize_with = "maybe_f64_from_str_or_num")]
    pub semimajor_axis: Option<f64>,
    /// in minutes
    #[serde(default, deserialize_with = "maybe_f64_from_str_or_num")]
    pub period: Option<f64>,
    /// Altitude of apoapsis, in km
    #[serde(default, deserialize_with = "maybe_f64_from_str_or_num")]
    pub apoapsis: Option<f64>,
    /// Altitude of periapsis, in km
    #[serde(default, deserialize_with = "maybe_f64_from_str_or_num")]
    pub periapsis: Option<f64>,
    #[serde(default, deserialize_with = "maybe_f64_from_str_or_num")]
    pub bstar: Option<f64>,
    #[serde(default)]
    pub rcs_size: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub decay_date: Option<String>,
}

impl GpRecord {
    /// Rebuilds the Keplerian orbit of this element set around the Earth.
    ///
    /// The semi-major axis is taken from the record if published, and otherwise computed from the mean motion.
    /// Same for the period.
    pub fn to_orbit(&self) -> Result<Orbit, TrackingError> {
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(AstroError::NotElliptical {
                ecc: self.eccentricity,
            })
            .context(TrackingAstroSnafu);
        }

        let sma_km = match self.semimajor_axis {
            Some(sma_km) => sma_km,
            None => {
                if self.mean_motion <= 0.0 {
                    return Err(TrackingError::MissingElement {
                        field: "SEMIMAJOR_AXIS",
                    });
                }
                let n_rad_s = self.mean_motion * TAU / SECONDS_PER_DAY;
                (EARTH_GM_KM3_S2 / n_rad_s.powi(2)).cbrt()
            }
        };

        let period = match self.period {
            Some(period_min) => period_min * Unit::Minute,
            None => Orbit::period_from_sma(sma_km, EARTH_GM_KM3_S2),
        };

        let orbit = Orbit::new(
            self.eccentricity,
            period,
            sma_km,
            self.mean_anomaly,
            self.inclination,
            self.mean_motion,
            self.arg_of_pericenter,
        );

        Ok(orbit)
    }

    /// Parses the epoch of this element set, which Space-Track publishes in UTC.
    pub fn epoch(&self) -> Result<Epoch, TrackingError> {
        Epoch::from_str(self.epoch.trim())
            .map_err(|e| e.to_string())
            .or_else(|_| {
                Epoch::from_str(&format!("{} UTC", self.epoch.trim())).map_err(|e| e.to_string())
            })
            .map_err(|detail| {
                EpochParseSnafu {
                    epoch: self.epoch.clone(),
                    detail,
                }
                .build()
            })
    }

    /// Returns whether Space-Track reports this object as decayed.
    pub fn is_decayed(&self) -> bool {
        self.decay_date
            .as_ref()
            .map(|date| !date.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Parses the JSON body of a Space-Track `gp` response.
pub fn parse_gp_records(body: &str) -> Result<Vec<GpRecord>, TrackingError> {
    serde_json::from_str(body).context(DecodeSnafu)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StrOrNum {
    Num(f64),
    Str(String),
}

impl StrOrNum {
    fn into_f64<E: serde::de::Error>(self) -> Result<Option<f64>, E> {
        match self {
            Self::Num(val) => Ok(Some(val)),
            Self::Str(s) if s.trim().is_empty() => Ok(None),
            Self::Str(s) => s.trim().parse::<f64>().map(Some).map_err(E::custom),
        }
    }
}

fn f64_from_str_or_num<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    <StrOrNum as serde::Deserialize>::deserialize(deserializer)?
        .into_f64()?
        .ok_or_else(|| serde::de::Error::custom("empty numeric field"))
}

fn maybe_f64_from_str_or_num<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match <Option<StrOrNum> as serde::Deserialize>::deserialize(deserializer)? {
        Some(val) => val.into_f64(),
        None => Ok(None),
    }
}

fn u32_from_str_or_num<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let val = f64_from_str_or_num(deserializer)?;
    if val.fract() != 0.0 || val < 0.0 || val > u32::MAX as f64 {
        return Err(serde::de::Error::custom(format!(
            "{val} is not a catalog number"
        )));
    }
    Ok(val as u32)
}
