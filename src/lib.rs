/*
    Nyx, blazing fast astrodynamics
    Copyright (C) 2018-onwards Christopher Rabotin <christopher.rabotin@gmail.com>

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

/*! # nyx-obs-sim

Observation simulation for orbit determination and navigation analyses: turns tracking schedules into sample epochs,
dispatches each (observable, link ends) pair to its fixed-size observation model, and layers pluggable measurement noise
on top of the noise-free observations.

The physical observation models (range, Doppler, angles, light time) are provided by the caller through the
[`od::simulator::ObservationModel`] and [`od::simulator::ObservationSimulator`] traits.
*/

/// All the input/output needs for this library, namely the YAML configuration of observation schedules.
pub mod io;

/// Observation simulation tools: observable and link end definitions, the observation simulators, and the noise models.
pub mod od;

mod time_tag;
pub use self::time_tag::SampleTime;

#[macro_use]
extern crate log;
extern crate hifitime;
extern crate nalgebra as na;

/// Re-export of hifitime
pub mod time {
    pub use hifitime::*;
}

/// Re-export nalgebra
pub mod linalg {
    pub use na::base::*;
}
