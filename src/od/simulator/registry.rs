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

use super::model::{ObservationModel, SizedModel};
use crate::od::msr::{LinkEnds, ObservableType};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Observation simulators of every observable type that may be simulated.
pub type SimulatorMap<T> = BTreeMap<ObservableType, Arc<dyn ObservationSimulator<T>>>;

/// Provides the observation models of one observable type, for any set of link ends.
pub trait ObservationSimulator<T>: Send + Sync {
    /// Observable type simulated by this simulator
    fn observable_type(&self) -> ObservableType;

    /// Size of the observations of this observable for the provided link ends.
    /// This is queried prior to resolving the model, and may differ between link ends.
    fn observation_size(&self, link_ends: &LinkEnds) -> usize;

    /// Returns the observation model for the provided link ends, or None if these link ends are not supported.
    fn observation_model(&self, link_ends: &LinkEnds) -> Option<SizedModel<T>>;
}

/// A simulator storing one observation model per set of link ends.
pub struct LinkModels<T> {
    observable: ObservableType,
    models: BTreeMap<LinkEnds, SizedModel<T>>,
}

impl<T> LinkModels<T> {
    pub fn new(observable: ObservableType) -> Self {
        Self {
            observable,
            models: BTreeMap::new(),
        }
    }

    /// Registers the model of these link ends, replacing any previous one.
    pub fn with_model(mut self, link_ends: LinkEnds, model: SizedModel<T>) -> Self {
        self.models.insert(link_ends, model);
        self
    }

    pub fn with_model1<M>(self, link_ends: LinkEnds, model: M) -> Self
    where
        M: ObservationModel<T, 1> + 'static,
    {
        self.with_model(link_ends, SizedModel::Size1(Arc::new(model)))
    }

    pub fn with_model2<M>(self, link_ends: LinkEnds, model: M) -> Self
    where
        M: ObservationModel<T, 2> + 'static,
    {
        self.with_model(link_ends, SizedModel::Size2(Arc::new(model)))
    }

    pub fn with_model3<M>(self, link_ends: LinkEnds, model: M) -> Self
    where
        M: ObservationModel<T, 3> + 'static,
    {
        self.with_model(link_ends, SizedModel::Size3(Arc::new(model)))
    }

    pub fn link_ends(&self) -> impl Iterator<Item = &LinkEnds> {
        self.models.keys()
    }
}

impl<T: 'static> ObservationSimulator<T> for LinkModels<T> {
    fn observable_type(&self) -> ObservableType {
        self.observable
    }

    /// The size is that of the registered model, falling back to the size of the observable if there is none.
    fn observation_size(&self, link_ends: &LinkEnds) -> usize {
        self.models
            .get(link_ends)
            .map(|mdl| mdl.size().value())
            .unwrap_or_else(|| self.observable.observation_size())
    }

    fn observation_model(&self, link_ends: &LinkEnds) -> Option<SizedModel<T>> {
        self.models.get(link_ends).cloned()
    }
}
