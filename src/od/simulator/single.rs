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

use super::model::{ObservationModel, ObservationSize, SizedModel};
use super::registry::ObservationSimulator;
use super::time_spec::TimeSampleSpecification;
use crate::linalg::DVector;
use crate::od::msr::{LinkEnds, ObservationBatch};
use crate::od::SimulationError;
use crate::SampleTime;
use std::convert::TryFrom;

/// Simulates the observations of a single model at every epoch of the time specification.
///
/// The model is evaluated once per epoch, in the order of the epochs of the specification.
pub fn simulate_single_set<T, M, const N: usize>(
    spec: &TimeSampleSpecification<T>,
    model: &M,
) -> Result<ObservationBatch<T>, SimulationError>
where
    T: SampleTime,
    M: ObservationModel<T, N> + ?Sized,
{
    let epochs = spec.epochs()?;
    if epochs.is_empty() {
        debug!(
            "no epochs to simulate in time specification referenced to {}",
            spec.reference()
        );
    }

    let mut observations = DVector::zeros(epochs.len() * N);
    for (i, epoch) in epochs.iter().enumerate() {
        let obs = model.evaluate(*epoch);
        observations.rows_mut(i * N, N).copy_from(&obs);
    }

    Ok(ObservationBatch::new(
        observations,
        epochs,
        spec.reference(),
        N,
    ))
}

/// Simulates the observations of a size-tagged model.
pub fn simulate_sized<T: SampleTime>(
    spec: &TimeSampleSpecification<T>,
    model: &SizedModel<T>,
) -> Result<ObservationBatch<T>, SimulationError> {
    match model {
        SizedModel::Size1(mdl) => simulate_single_set::<T, _, 1>(spec, mdl.as_ref()),
        SizedModel::Size2(mdl) => simulate_single_set::<T, _, 2>(spec, mdl.as_ref()),
        SizedModel::Size3(mdl) => simulate_single_set::<T, _, 3>(spec, mdl.as_ref()),
    }
}

/// Resolves the model of the provided link ends from the simulator, and simulates its observations.
///
/// # Errors
/// + [`SimulationError::UnsupportedObservationSize`] if the simulator reports a size other than 1, 2, or 3 for these link ends;
/// + [`SimulationError::ModelUnavailable`] if the simulator has no model for these link ends;
/// + [`SimulationError::ModelTypeMismatch`] if the model does not have the size reported by the simulator.
pub fn simulate_single_set_from_registry<T: SampleTime>(
    spec: &TimeSampleSpecification<T>,
    simulator: &dyn ObservationSimulator<T>,
    link_ends: &LinkEnds,
) -> Result<ObservationBatch<T>, SimulationError> {
    let model = resolve_model(simulator, link_ends)?;
    simulate_sized(spec, &model)
}

/// Queries the observation size of these link ends, and narrows the simulator's model to that size.
pub(crate) fn resolve_model<T>(
    simulator: &dyn ObservationSimulator<T>,
    link_ends: &LinkEnds,
) -> Result<SizedModel<T>, SimulationError> {
    let observable = simulator.observable_type();
    let size = simulator.observation_size(link_ends);

    let expected = ObservationSize::try_from(size)
        .map_err(|size| SimulationError::UnsupportedObservationSize { observable, size })?;

    let model = simulator.observation_model(link_ends).ok_or_else(|| {
        SimulationError::ModelUnavailable {
            observable,
            link_ends: link_ends.clone(),
        }
    })?;

    if model.size() != expected {
        return Err(SimulationError::ModelTypeMismatch {
            observable,
            link_ends: link_ends.clone(),
            expected: expected.value(),
            found: model.size().value(),
        });
    }

    Ok(model)
}
