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

use super::registry::SimulatorMap;
use super::single::{resolve_model, simulate_sized};
use super::time_spec::{
    tabulated_time_specs, TabulatedTimesMap, TimeSampleSpecification, TimeSpecMap,
};
use crate::od::msr::{LinkEnds, ObservableType, ObservationBatch, ObservationResultMap};
use crate::od::noise::pipeline::link_keys;
use crate::od::noise::{add_noise, NoiseConfig, NoiseLookup};
use crate::od::SimulationError;
use crate::SampleTime;
use hifitime::Unit;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::time::Instant as StdInstant;
use typed_builder::TypedBuilder;

/// The outcome of each batch of a simulation, keyed like the simulation results.
pub type BatchResults<T> =
    BTreeMap<ObservableType, BTreeMap<LinkEnds, Result<ObservationBatch<T>, SimulationError>>>;

/// Simulates the observations of every observable type and link ends of a tracking arc.
///
/// Batches are independent of each other. In parallel mode, each batch is simulated in its own rayon task, but the
/// epochs of a batch are always evaluated sequentially, in order. The results are the same in both modes.
#[derive(Clone, TypedBuilder)]
#[builder(doc)]
pub struct ObservationArcSim<T: SampleTime> {
    /// Observation simulator of each observable type
    pub simulators: SimulatorMap<T>,
    /// Set to simulate the batches in parallel
    #[builder(default)]
    pub parallel: bool,
}

impl<T: SampleTime> ObservationArcSim<T> {
    /// Initializes a sequential arc simulator.
    pub fn new(simulators: SimulatorMap<T>) -> Self {
        Self {
            simulators,
            parallel: false,
        }
    }

    /// Simulates all of the noise-free observations of the time specifications.
    ///
    /// # Errors
    /// In sequential mode, simulation stops at the first error. In parallel mode, all batches are simulated and the
    /// first error in key order is returned, the others are logged.
    pub fn simulate(
        &self,
        specs: &TimeSpecMap<T>,
    ) -> Result<ObservationResultMap<T>, SimulationError> {
        let start = StdInstant::now();

        let results = if self.parallel {
            first_error(self.simulate_each(specs))?
        } else {
            let mut results = ObservationResultMap::new();
            for (observable, per_link) in specs {
                let mut batches = BTreeMap::new();
                for (link_ends, spec) in per_link {
                    let batch = self.simulate_one(*observable, link_ends, spec)?;
                    batches.insert(link_ends.clone(), batch);
                }
                results.insert(*observable, batches);
            }
            results
        };

        let clock_time = StdInstant::now() - start;
        info!(
            "Simulated {} observation batches in {}",
            results.values().map(|per_link| per_link.len()).sum::<usize>(),
            clock_time.as_secs_f64() * Unit::Second
        );

        Ok(results)
    }

    /// Simulates the noise-free observations of the tabulated epochs, each set referenced to its link end.
    pub fn simulate_tabulated(
        &self,
        times: &TabulatedTimesMap<T>,
    ) -> Result<ObservationResultMap<T>, SimulationError> {
        self.simulate(&tabulated_time_specs(times))
    }

    /// Simulates every batch independently: the failure of one batch never prevents the simulation of the others.
    pub fn simulate_each(&self, specs: &TimeSpecMap<T>) -> BatchResults<T> {
        let jobs: Vec<(ObservableType, &LinkEnds, &TimeSampleSpecification<T>)> = specs
            .iter()
            .flat_map(|(observable, per_link)| {
                per_link
                    .iter()
                    .map(move |(link_ends, spec)| (*observable, link_ends, spec))
            })
            .collect();

        // Both collections preserve the order of the jobs
        let outcomes: Vec<Result<ObservationBatch<T>, SimulationError>> = if self.parallel {
            jobs.par_iter()
                .map(|(observable, link_ends, spec)| self.simulate_one(*observable, link_ends, spec))
                .collect()
        } else {
            jobs.iter()
                .map(|(observable, link_ends, spec)| self.simulate_one(*observable, link_ends, spec))
                .collect()
        };

        let mut results: BatchResults<T> =
            specs.keys().map(|observable| (*observable, BTreeMap::new())).collect();
        for ((observable, link_ends, _), outcome) in jobs.into_iter().zip(outcomes) {
            if let Some(per_link) = results.get_mut(&observable) {
                per_link.insert(link_ends.clone(), outcome);
            }
        }
        results
    }

    /// Simulates the observations, and adds noise onto every batch as configured.
    ///
    /// Noise is always added sequentially, in key order, so that stateful noise generators yield repeatable samples.
    pub fn simulate_with_noise(
        &self,
        specs: &TimeSpecMap<T>,
        noise: &NoiseConfig<T>,
    ) -> Result<ObservationResultMap<T>, SimulationError> {
        let noise_free = self.simulate(specs)?;
        let lookup = NoiseLookup::from_config(noise, link_keys(specs));
        debug!(
            "adding noise from {} generators onto {} observable types",
            lookup.len(),
            noise_free.len()
        );
        add_noise(&noise_free, &lookup)
    }

    fn simulate_one(
        &self,
        observable: ObservableType,
        link_ends: &LinkEnds,
        spec: &TimeSampleSpecification<T>,
    ) -> Result<ObservationBatch<T>, SimulationError> {
        let simulator =
            self.simulators
                .get(&observable)
                .ok_or_else(|| SimulationError::ModelUnavailable {
                    observable,
                    link_ends: link_ends.clone(),
                })?;

        let model = resolve_model(simulator.as_ref(), link_ends)?;
        let batch = simulate_sized(spec, &model)?;
        debug!(
            "simulated {} {observable} observations for {link_ends}",
            batch.len()
        );
        Ok(batch)
    }
}

/// Simulates all of the noise-free observations of the time specifications with a sequential arc simulator.
pub fn simulate<T: SampleTime>(
    specs: &TimeSpecMap<T>,
    simulators: &SimulatorMap<T>,
) -> Result<ObservationResultMap<T>, SimulationError> {
    ObservationArcSim::new(simulators.clone()).simulate(specs)
}

/// Simulates all of the observations of the time specifications with a sequential arc simulator, and adds noise onto them.
pub fn simulate_with_noise<T: SampleTime>(
    specs: &TimeSpecMap<T>,
    simulators: &SimulatorMap<T>,
    noise: &NoiseConfig<T>,
) -> Result<ObservationResultMap<T>, SimulationError> {
    ObservationArcSim::new(simulators.clone()).simulate_with_noise(specs, noise)
}

/// Returns the successful batches, or the first error in key order after logging all of the subsequent ones.
fn first_error<T>(each: BatchResults<T>) -> Result<ObservationResultMap<T>, SimulationError> {
    let mut results = ObservationResultMap::new();
    let mut first = None;
    for (observable, per_link) in each {
        let batches = results.entry(observable).or_insert_with(BTreeMap::new);
        for (link_ends, outcome) in per_link {
            match outcome {
                Ok(batch) => {
                    batches.insert(link_ends, batch);
                }
                Err(e) if first.is_none() => first = Some(e),
                Err(e) => error!("{observable} simulation for {link_ends} also failed: {e}"),
            }
        }
    }

    match first {
        Some(e) => Err(e),
        None => Ok(results),
    }
}
