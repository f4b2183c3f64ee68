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

use super::{NoiseGenerator, ScalarNoiseGenerator};
use crate::linalg::DVector;
use crate::od::msr::{LinkEnds, ObservableType, ObservationBatch, ObservationResultMap};
use crate::od::SimulationError;
use crate::SampleTime;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Either a full observation noise generator, or a scalar one.
pub enum NoiseFunction<T> {
    Vector(Arc<dyn NoiseGenerator<T>>),
    /// Sampled once per epoch, and that sample is added to every component of the observation.
    Scalar(Arc<dyn ScalarNoiseGenerator<T>>),
    /// Sampled once per component of each observation.
    Independent(Arc<dyn ScalarNoiseGenerator<T>>),
}

impl<T: SampleTime> NoiseFunction<T> {
    pub fn vector<G: NoiseGenerator<T> + 'static>(generator: G) -> Self {
        Self::Vector(Arc::new(generator))
    }

    pub fn scalar<G: ScalarNoiseGenerator<T> + 'static>(generator: G) -> Self {
        Self::Scalar(Arc::new(generator))
    }

    pub fn independent<G: ScalarNoiseGenerator<T> + 'static>(generator: G) -> Self {
        Self::Independent(Arc::new(generator))
    }

    /// Returns the noise generator of this function for observations of the provided size.
    pub fn generator(&self, size: usize) -> Arc<dyn NoiseGenerator<T>> {
        match self {
            Self::Vector(generator) => generator.clone(),
            Self::Scalar(scalar) => Arc::new(BroadcastNoise::new(scalar.clone(), size)),
            Self::Independent(scalar) => Arc::new(IidNoise::new(scalar.clone(), size)),
        }
    }
}

impl<T> Clone for NoiseFunction<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Vector(generator) => Self::Vector(generator.clone()),
            Self::Scalar(scalar) => Self::Scalar(scalar.clone()),
            Self::Independent(scalar) => Self::Independent(scalar.clone()),
        }
    }
}

impl<T> fmt::Debug for NoiseFunction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vector(_) => write!(f, "NoiseFunction::Vector"),
            Self::Scalar(_) => write!(f, "NoiseFunction::Scalar"),
            Self::Independent(_) => write!(f, "NoiseFunction::Independent"),
        }
    }
}

/// Noise configuration, at the granularity of each link ends, each observable, or of all observations.
#[derive(Clone, Debug)]
pub enum NoiseConfig<T> {
    PerLink(BTreeMap<ObservableType, BTreeMap<LinkEnds, NoiseFunction<T>>>),
    PerObservable(BTreeMap<ObservableType, NoiseFunction<T>>),
    Global(NoiseFunction<T>),
}

/// Adds the same scalar sample to every component of an observation.
pub struct BroadcastNoise<T> {
    scalar: Arc<dyn ScalarNoiseGenerator<T>>,
    size: usize,
}

impl<T> BroadcastNoise<T> {
    pub fn new(scalar: Arc<dyn ScalarNoiseGenerator<T>>, size: usize) -> Self {
        Self { scalar, size }
    }
}

impl<T> NoiseGenerator<T> for BroadcastNoise<T> {
    fn evaluate(&self, time: T) -> DVector<f64> {
        DVector::from_element(self.size, self.scalar.evaluate(time))
    }
}

/// Samples the scalar generator once per component of the observation, in component order.
///
/// With a stochastic generator, this yields independent noise on each component instead of the same noise.
pub struct IidNoise<T> {
    scalar: Arc<dyn ScalarNoiseGenerator<T>>,
    size: usize,
}

impl<T> IidNoise<T> {
    pub fn new(scalar: Arc<dyn ScalarNoiseGenerator<T>>, size: usize) -> Self {
        Self { scalar, size }
    }
}

impl<T: Copy> NoiseGenerator<T> for IidNoise<T> {
    fn evaluate(&self, time: T) -> DVector<f64> {
        DVector::from_fn(self.size, |_, _| self.scalar.evaluate(time))
    }
}

/// Noise functions of every observable type and link ends, resolved from any [`NoiseConfig`].
pub struct NoiseLookup<T> {
    functions: BTreeMap<(ObservableType, LinkEnds), NoiseFunction<T>>,
}

impl<T: SampleTime> NoiseLookup<T> {
    /// Uses the noise of each link ends of each observable as is.
    pub fn per_link(noise: &BTreeMap<ObservableType, BTreeMap<LinkEnds, NoiseFunction<T>>>) -> Self {
        let functions = noise
            .iter()
            .flat_map(|(observable, per_link)| {
                per_link.iter().map(move |(link_ends, function)| {
                    ((*observable, link_ends.clone()), function.clone())
                })
            })
            .collect();
        Self { functions }
    }

    /// Shares the noise of each observable across all of the provided link ends of that observable.
    pub fn per_observable<I>(noise: &BTreeMap<ObservableType, NoiseFunction<T>>, keys: I) -> Self
    where
        I: IntoIterator<Item = (ObservableType, LinkEnds)>,
    {
        let mut functions = BTreeMap::new();
        for (observable, link_ends) in keys {
            if let Some(function) = noise.get(&observable) {
                functions.insert((observable, link_ends), function.clone());
            }
        }
        Self { functions }
    }

    /// Shares the same noise across all of the provided observables and link ends.
    pub fn global<I>(noise: &NoiseFunction<T>, keys: I) -> Self
    where
        I: IntoIterator<Item = (ObservableType, LinkEnds)>,
    {
        let functions = keys.into_iter().map(|key| (key, noise.clone())).collect();
        Self { functions }
    }

    /// Resolves the noise configuration for the provided observables and link ends.
    /// Per link configurations ignore the keys.
    pub fn from_config<I>(config: &NoiseConfig<T>, keys: I) -> Self
    where
        I: IntoIterator<Item = (ObservableType, LinkEnds)>,
    {
        match config {
            NoiseConfig::PerLink(noise) => Self::per_link(noise),
            NoiseConfig::PerObservable(noise) => Self::per_observable(noise, keys),
            NoiseConfig::Global(noise) => Self::global(noise, keys),
        }
    }

    /// Returns the noise function of these link ends of this observable.
    pub fn function(
        &self,
        observable: ObservableType,
        link_ends: &LinkEnds,
    ) -> Result<&NoiseFunction<T>, SimulationError> {
        self.functions
            .get(&(observable, link_ends.clone()))
            .ok_or_else(|| SimulationError::MissingNoiseGenerator {
                observable,
                link_ends: link_ends.clone(),
            })
    }

    /// Adds the noise of these link ends onto a copy of the batch.
    pub fn apply(
        &self,
        observable: ObservableType,
        link_ends: &LinkEnds,
        batch: &ObservationBatch<T>,
    ) -> Result<ObservationBatch<T>, SimulationError> {
        check_shape(observable, batch)?;
        let generator = self.function(observable, link_ends)?.generator(batch.size());
        inject(observable, batch, generator.as_ref())
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// Returns all of the observable types and link ends of a map, in order.
pub fn link_keys<V>(map: &BTreeMap<ObservableType, BTreeMap<LinkEnds, V>>) -> Vec<(ObservableType, LinkEnds)> {
    map.iter()
        .flat_map(|(observable, per_link)| {
            per_link
                .keys()
                .map(move |link_ends| (*observable, link_ends.clone()))
        })
        .collect()
}

/// Adds noise onto every batch of the noise-free observations, returning new batches with the same epochs and references.
///
/// # Errors
/// + [`SimulationError::InconsistentBatchShape`] if a batch does not hold one observation per epoch;
/// + [`SimulationError::MissingNoiseGenerator`] if no generator is configured for a batch;
/// + [`SimulationError::NoiseDimensionMismatch`] if the first noise sample of a batch does not match the observation
///   size, or if a later sample is shorter than it. Longer later samples are truncated to the observation size.
pub fn add_noise<T: SampleTime>(
    noise_free: &ObservationResultMap<T>,
    noise: &NoiseLookup<T>,
) -> Result<ObservationResultMap<T>, SimulationError> {
    let mut noisy = ObservationResultMap::new();
    for (observable, per_link) in noise_free {
        let mut noisy_per_link = BTreeMap::new();
        for (link_ends, batch) in per_link {
            noisy_per_link.insert(link_ends.clone(), noise.apply(*observable, link_ends, batch)?);
        }
        noisy.insert(*observable, noisy_per_link);
    }
    Ok(noisy)
}

/// Adds the noise of a single generator onto a copy of the batch.
pub fn add_noise_to_batch<T: SampleTime, G: NoiseGenerator<T> + ?Sized>(
    observable: ObservableType,
    batch: &ObservationBatch<T>,
    generator: &G,
) -> Result<ObservationBatch<T>, SimulationError> {
    check_shape(observable, batch)?;
    inject(observable, batch, generator)
}

fn check_shape<T: SampleTime>(
    observable: ObservableType,
    batch: &ObservationBatch<T>,
) -> Result<(), SimulationError> {
    if batch.is_consistent() {
        Ok(())
    } else {
        Err(SimulationError::InconsistentBatchShape {
            observable,
            epochs: batch.len(),
            observations: batch.observations().len(),
            size: batch.size(),
        })
    }
}

fn inject<T: SampleTime, G: NoiseGenerator<T> + ?Sized>(
    observable: ObservableType,
    batch: &ObservationBatch<T>,
    generator: &G,
) -> Result<ObservationBatch<T>, SimulationError> {
    let size = batch.size();
    let mut observations = batch.observations().clone();

    for (i, epoch) in batch.epochs().iter().enumerate() {
        let sample = generator.evaluate(*epoch);
        // The first sample must match exactly, later samples only need to cover every component
        if (i == 0 && sample.len() != size) || sample.len() < size {
            return Err(SimulationError::NoiseDimensionMismatch {
                observable,
                expected: size,
                got: sample.len(),
            });
        }
        for (k, value) in sample.iter().take(size).enumerate() {
            observations[i * size + k] += value;
        }
    }

    Ok(ObservationBatch::new(
        observations,
        batch.epochs().to_vec(),
        batch.reference(),
        size,
    ))
}
