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

use crate::io::ConfigError;
use snafu::prelude::Snafu;

/// Provides noise modeling and the injection of noise onto simulated observations
pub mod noise;

/// Provides the observable types, link end definitions, and the observation batches
pub mod msr;

/// Provides all of the functionality to simulate observations from tracking schedules
pub mod simulator;

use msr::{LinkEnds, ObservableType};

#[allow(unused_imports)]
pub mod prelude {
    pub use super::msr::*;
    pub use super::noise::*;
    pub use super::simulator::*;
    pub use super::SimulationError;
    pub use crate::SampleTime;

    pub use crate::time::{Duration, Epoch, TimeUnits, Unit};
}

#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SimulationError {
    #[snafu(display("no {observable} observation model available for {link_ends}"))]
    ModelUnavailable {
        observable: ObservableType,
        link_ends: LinkEnds,
    },
    #[snafu(display(
        "simulation of {observable} observations not implemented for observation size {size}"
    ))]
    UnsupportedObservationSize {
        observable: ObservableType,
        size: usize,
    },
    #[snafu(display(
        "{observable} observation model for {link_ends} has size {found} but registry reports size {expected}"
    ))]
    ModelTypeMismatch {
        observable: ObservableType,
        link_ends: LinkEnds,
        expected: usize,
        found: usize,
    },
    #[snafu(display(
        "{observable} batch is inconsistent: {observations} values for {epochs} epochs of size {size}"
    ))]
    InconsistentBatchShape {
        observable: ObservableType,
        epochs: usize,
        observations: usize,
        size: usize,
    },
    #[snafu(display("no {observable} noise generator configured for {link_ends}"))]
    MissingNoiseGenerator {
        observable: ObservableType,
        link_ends: LinkEnds,
    },
    #[snafu(display(
        "{observable} noise generator returned {got} components but observation size is {expected}"
    ))]
    NoiseDimensionMismatch {
        observable: ObservableType,
        expected: usize,
        got: usize,
    },
    #[snafu(display("invalid time sample specification: {reason}"))]
    InvalidTimeSpecification { reason: String },
    #[snafu(display("observation simulation setup failed because {source}"))]
    SimConfigError { source: ConfigError },
}
