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

use crate::cosmic::Apsis;
use crate::tracking::{GpRecord, TrackingError};
use serde_derive::Serialize;
use snafu::prelude::*;
use std::io::Write;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ExportError {
    #[snafu(display("could not write CSV row: {source}"))]
    CsvWrite { source: csv::Error },
    #[snafu(display("could not flush CSV output: {source}"))]
    CsvFlush { source: std::io::Error },
}

/// One exported debris object: its identifiers, published elements and the two-body quantities derived from them.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DebrisRow {
    pub norad_cat_id: u32,
    pub object_name: String,
    pub object_id: Option<String>,
    pub epoch: String,
    pub sma_km: f64,
    pub ecc: f64,
    pub inc_deg: f64,
    pub aop_deg: f64,
    pub ma_deg: f64,
    pub mean_motion_rev_day: f64,
    pub period_s: f64,
    pub apoapsis_km: f64,
    pub periapsis_km: f64,
    pub apoapsis_velocity_km_s: f64,
    pub periapsis_velocity_km_s: f64,
    pub energy_km2_s2: f64,
    pub kepler_period_s: f64,
    /// Empty if Kepler's equation did not converge
    pub ta_deg: Option<f64>,
}

impl DebrisRow {
    pub fn from_record(record: &GpRecord) -> Result<Self, TrackingError> {
        let orbit = record.to_orbit()?;
        let ta_deg = match orbit.ta_deg() {
            Ok(ta_deg) => Some(ta_deg),
            Err(e) => {
                warn!("NORAD {}: {e}", record.norad_cat_id);
                None
            }
        };

        Ok(Self {
            norad_cat_id: record.norad_cat_id,
            object_name: record.object_name.clone(),
            object_id: record.object_id.clone(),
            epoch: record.epoch.clone(),
            sma_km: orbit.sma_km,
            ecc: orbit.ecc,
            inc_deg: orbit.inc_deg,
            aop_deg: orbit.aop_deg,
            ma_deg: orbit.ma_deg,
            mean_motion_rev_day: orbit.mean_motion_rev_day,
            period_s: orbit.period.to_seconds(),
            apoapsis_km: orbit.radius_at_apsis(Apsis::Apoapsis),
            periapsis_km: orbit.radius_at_apsis(Apsis::Periapsis),
            apoapsis_velocity_km_s: orbit.velocity_at_apsis(Apsis::Apoapsis),
            periapsis_velocity_km_s: orbit.velocity_at_apsis(Apsis::Periapsis),
            energy_km2_s2: orbit.energy_km2_s2(),
            kepler_period_s: orbit.orbital_period().to_seconds(),
            ta_deg,
        })
    }
}

/// Writes one CSV row per record, with a header line. Returns the number of rows written.
///
/// Records which do not convert into an elliptical orbit are skipped with a warning.
pub fn write_debris_csv<W: Write>(records: &[GpRecord], writer: W) -> Result<usize, ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut written = 0;
    for record in records {
        match DebrisRow::from_record(record) {
            Ok(row) => {
                wtr.serialize(row).context(CsvWriteSnafu)?;
                written += 1;
            }
            Err(e) => warn!("skipping NORAD {} in export: {e}", record.norad_cat_id),
        }
    }
    wtr.flush().context(CsvFlushSnafu)?;
    info!("exported {written} of {} debris records", records.len());
    Ok(written)
}
