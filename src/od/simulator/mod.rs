/*
    Nyx, blazing fast astrodynamics
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

mod arc;
pub use arc::{simulate, simulate_with_noise, BatchResults, ObservationArcSim};
mod model;
pub use model::{ObservationModel, ObservationSize, SizedModel};
mod registry;
pub use registry::{LinkModels, ObservationSimulator, SimulatorMap};
mod schedule;
pub use schedule::Cadence;
mod single;
pub use single::{simulate_single_set, simulate_single_set_from_registry, simulate_sized};
mod time_spec;
pub use time_spec::{
    tabulated_time_specs, EpochGenerator, EpochSource, Sampling, TabulatedTimesMap,
    TimeSampleSpecification, TimeSpecMap,
};
mod trkconfig;
pub use trkconfig::{ObservationPlan, ObservationScheduleCfg, SamplingCfg};
