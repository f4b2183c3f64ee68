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

use super::{LinkEndType, LinkEnds, ObservableType};
use crate::linalg::{DVector, DVectorView};
use std::collections::BTreeMap;

/// All of the simulated observations, per observable type and per link ends.
pub type ObservationResultMap<T> = BTreeMap<ObservableType, BTreeMap<LinkEnds, ObservationBatch<T>>>;

/// Observations of one observable type for one set of link ends.
///
/// The observations of all epochs are concatenated in a single vector: the observation at epoch `i` spans the
/// components `i * size .. (i + 1) * size`. The size is the one resolved for these link ends, which may differ
/// from the nominal size of the observable.
/// Batches are immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct ObservationBatch<T> {
    observations: DVector<f64>,
    epochs: Vec<T>,
    reference: LinkEndType,
    size: usize,
}

impl<T> ObservationBatch<T> {
    /// Builds a batch from its raw parts. Alignment between the observations and the epochs is not checked here, cf.
    /// [`ObservationBatch::is_consistent`].
    pub fn new(
        observations: DVector<f64>,
        epochs: Vec<T>,
        reference: LinkEndType,
        size: usize,
    ) -> Self {
        Self {
            observations,
            epochs,
            reference,
            size,
        }
    }

    /// Concatenated observation vector of this batch
    pub fn observations(&self) -> &DVector<f64> {
        &self.observations
    }

    /// Sample epochs, in the order they were simulated
    pub fn epochs(&self) -> &[T] {
        &self.epochs
    }

    /// Link end role whose time reference the epochs are expressed in
    pub fn reference(&self) -> LinkEndType {
        self.reference
    }

    /// Number of components of each observation
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of epochs in this batch
    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    /// Returns whether there is exactly one observation per epoch.
    pub fn is_consistent(&self) -> bool {
        self.size > 0
            && self.observations.len() % self.size == 0
            && self.observations.len() / self.size == self.epochs.len()
    }

    /// Returns a view on the observation at the provided epoch index, or None if out of bounds.
    pub fn observation(&self, index: usize) -> Option<DVectorView<f64>> {
        if index < self.epochs.len() && (index + 1) * self.size <= self.observations.len() {
            Some(self.observations.rows(index * self.size, self.size))
        } else {
            None
        }
    }

    /// Consumes this batch into its (observations, epochs, reference) triple.
    pub fn into_parts(self) -> (DVector<f64>, Vec<T>, LinkEndType) {
        (self.observations, self.epochs, self.reference)
    }
}
