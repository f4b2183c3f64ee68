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

use super::schedule::Cadence;
use crate::od::msr::{LinkEndType, LinkEnds, ObservableType};
use crate::od::SimulationError;
use crate::SampleTime;
use hifitime::Duration;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use typed_builder::TypedBuilder;

/// Time sample specifications of every observable type and link ends to simulate.
pub type TimeSpecMap<T> = BTreeMap<ObservableType, BTreeMap<LinkEnds, TimeSampleSpecification<T>>>;

/// Tabulated epochs and their reference link end, per observable type and link ends.
pub type TabulatedTimesMap<T> = BTreeMap<ObservableType, BTreeMap<LinkEnds, (Vec<T>, LinkEndType)>>;

/// A custom strategy to generate sample epochs.
pub trait EpochGenerator<T>: Send + Sync {
    /// Returns the ordered sample epochs, or an error if this generator is misconfigured.
    fn generate(&self) -> Result<Vec<T>, SimulationError>;
}

/// Regularly spaced samples between two bounds, optionally intermittent.
#[derive(Copy, Clone, Debug, PartialEq, TypedBuilder)]
#[builder(doc)]
pub struct Sampling<T: SampleTime> {
    pub start: T,
    /// Inclusive end of the sampling
    pub end: T,
    pub step: Duration,
    #[builder(default)]
    pub cadence: Cadence,
}

impl<T: SampleTime> Sampling<T> {
    /// Returns the sample epochs, or an error if the step or the cadence is invalid, or if the end is before the start.
    pub fn epochs(&self) -> Result<Vec<T>, SimulationError> {
        if self.step <= Duration::ZERO {
            return Err(SimulationError::InvalidTimeSpecification {
                reason: format!("sampling step must be positive, got {}", self.step),
            });
        }
        if let Cadence::Intermittent { on, off } = self.cadence {
            if on <= Duration::ZERO || off < Duration::ZERO {
                return Err(SimulationError::InvalidTimeSpecification {
                    reason: format!(
                        "intermittent cadence needs a positive on and a non-negative off time, got {:?}",
                        self.cadence
                    ),
                });
            }
        }
        if self.end < self.start {
            return Err(SimulationError::InvalidTimeSpecification {
                reason: format!("sampling ends ({:?}) before it starts ({:?})", self.end, self.start),
            });
        }

        let mut epochs = Vec::new();
        let mut k: i64 = 0;
        loop {
            // Multiply the step instead of accumulating it to avoid drifting over long arcs
            let elapsed = self.step * k;
            let epoch = self.start.shifted(elapsed);
            if epoch > self.end {
                break;
            }
            if self.cadence.is_on(elapsed) {
                epochs.push(epoch);
            }
            k += 1;
        }
        Ok(epochs)
    }
}

/// Where the sample epochs come from.
#[derive(Clone)]
pub enum EpochSource<T: SampleTime> {
    /// Explicit epochs, used as is: neither sorted nor deduplicated.
    Tabulated(Vec<T>),
    Sampled(Sampling<T>),
    Generated(Arc<dyn EpochGenerator<T>>),
}

impl<T: SampleTime> fmt::Debug for EpochSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tabulated(epochs) => f.debug_tuple("Tabulated").field(epochs).finish(),
            Self::Sampled(sampling) => f.debug_tuple("Sampled").field(sampling).finish(),
            Self::Generated(_) => write!(f, "Generated"),
        }
    }
}

/// Defines the times at which observations are simulated, and the link end whose time reference these are in.
#[derive(Clone, Debug)]
pub struct TimeSampleSpecification<T: SampleTime> {
    reference: LinkEndType,
    source: EpochSource<T>,
}

impl<T: SampleTime> TimeSampleSpecification<T> {
    pub fn new(reference: LinkEndType, source: EpochSource<T>) -> Self {
        Self { reference, source }
    }

    pub fn tabulated(reference: LinkEndType, epochs: Vec<T>) -> Self {
        Self::new(reference, EpochSource::Tabulated(epochs))
    }

    pub fn sampled(reference: LinkEndType, sampling: Sampling<T>) -> Self {
        Self::new(reference, EpochSource::Sampled(sampling))
    }

    pub fn generated(reference: LinkEndType, generator: Arc<dyn EpochGenerator<T>>) -> Self {
        Self::new(reference, EpochSource::Generated(generator))
    }

    /// Link end whose time reference the epochs are expressed in
    pub fn reference(&self) -> LinkEndType {
        self.reference
    }

    pub fn source(&self) -> &EpochSource<T> {
        &self.source
    }

    /// Returns the ordered sample epochs.
    pub fn epochs(&self) -> Result<Vec<T>, SimulationError> {
        match &self.source {
            EpochSource::Tabulated(epochs) => Ok(epochs.clone()),
            EpochSource::Sampled(sampling) => sampling.epochs(),
            EpochSource::Generated(generator) => generator.generate(),
        }
    }
}

/// Builds tabulated time specifications from plain epoch vectors and their reference link end.
pub fn tabulated_time_specs<T: SampleTime>(times: &TabulatedTimesMap<T>) -> TimeSpecMap<T> {
    times
        .iter()
        .map(|(observable, per_link)| {
            let specs = per_link
                .iter()
                .map(|(link_ends, (epochs, reference))| {
                    (
                        link_ends.clone(),
                        TimeSampleSpecification::tabulated(*reference, epochs.clone()),
                    )
                })
                .collect();
            (*observable, specs)
        })
        .collect()
}
