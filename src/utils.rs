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

use std::f64::consts::TAU;

/// Returns the provided angle bounded between 0.0 and 360.0 degrees.
pub fn between_0_360(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Returns the provided angle bounded between 0 and 2π radians.
pub fn between_0_tau(angle_rad: f64) -> f64 {
    angle_rad.rem_euclid(TAU)
}

/// Rounds the value to the requested number of decimal places, half away from zero.
pub fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    let scale = 10.0_f64.powi(decimals);
    (value * scale).round() / scale
}
