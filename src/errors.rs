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

use crate::cosmic::AstroError;
use crate::io::{ConfigError, ExportError};
use crate::tracking::TrackingError;
use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum OrbitError {
    /// Orbital element or anomaly computation failed
    #[snafu(display("astro error: {source}"))]
    Astro { source: AstroError },
    /// Space-Track request, authentication or decoding failed
    #[snafu(display("tracking error: {source}"))]
    Tracking { source: TrackingError },
    /// Configuration could not be read or parsed
    #[snafu(display("configuration error: {source}"))]
    Config { source: ConfigError },
    /// Debris records could not be exported
    #[snafu(display("export error: {source}"))]
    Export { source: ExportError },
    /// Some custom error for downstream tooling
    #[snafu(display("{msg}"))]
    CustomError { msg: String },
}

impl From<AstroError> for OrbitError {
    fn from(source: AstroError) -> Self {
        Self::Astro { source }
    }
}

impl From<TrackingError> for OrbitError {
    fn from(source: TrackingError) -> Self {
        Self::Tracking { source }
    }
}

impl From<ConfigError> for OrbitError {
    fn from(source: ConfigError) -> Self {
        Self::Config { source }
    }
}

impl From<ExportError> for OrbitError {
    fn from(source: ExportError) -> Self {
        Self::Export { source }
    }
}
