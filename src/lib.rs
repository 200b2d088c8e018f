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

/*! # debris-orbits

Two-body Keplerian quantities for orbits around the Earth (apsis radii, specific energy, vis-viva velocity,
Kepler period, anomalies), and retrieval of orbital debris general perturbation (GP) records from
[Space-Track](https://www.space-track.org).
*/

/// Provides the orbit value object, the anomaly conversions and the physical constants.
pub mod cosmic;

/// Utility functions shared by different modules, and which may be useful to engineers.
pub mod utils;

mod errors;
/// Functions which may fail return an error, the library does not panic on bad inputs.
pub use self::errors::OrbitError;

/// Configuration loading and export of debris records.
pub mod io;

/// Space-Track client and the general perturbations records it returns.
pub mod tracking;

#[macro_use]
extern crate log;
extern crate hifitime;

/// Re-export of hifitime
pub mod time {
    pub use hifitime::*;
}

/// Re-export some useful things
pub use self::cosmic::{Apsis, Orbit};
