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

use crate::linalg::SVector;
use std::convert::TryFrom;
use std::fmt;
use std::sync::Arc;

/// An observation model of a fixed size `N`, e.g. N = 1 for a range, N = 2 for right ascension and declination.
///
/// The physics of the model (light time, geometry, biases) are the implementor's concern: the simulators only evaluate it.
/// Any `Fn(T) -> SVector<f64, N>` closure is an observation model.
pub trait ObservationModel<T, const N: usize>: Send + Sync {
    /// Computes the ideal (noise free) observation at the provided time.
    fn evaluate(&self, time: T) -> SVector<f64, N>;
}

impl<T, F, const N: usize> ObservationModel<T, N> for F
where
    F: Fn(T) -> SVector<f64, N> + Send + Sync,
{
    fn evaluate(&self, time: T) -> SVector<f64, N> {
        self(time)
    }
}

/// Observation sizes which can be simulated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObservationSize {
    One,
    Two,
    Three,
}

impl ObservationSize {
    pub const fn value(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

impl TryFrom<usize> for ObservationSize {
    /// Returns the unsupported size as the error
    type Error = usize;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        match size {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            _ => Err(size),
        }
    }
}

impl fmt::Display for ObservationSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// An observation model tagged with its observation size.
pub enum SizedModel<T> {
    Size1(Arc<dyn ObservationModel<T, 1>>),
    Size2(Arc<dyn ObservationModel<T, 2>>),
    Size3(Arc<dyn ObservationModel<T, 3>>),
}

impl<T> SizedModel<T> {
    pub fn size(&self) -> ObservationSize {
        match self {
            Self::Size1(_) => ObservationSize::One,
            Self::Size2(_) => ObservationSize::Two,
            Self::Size3(_) => ObservationSize::Three,
        }
    }
}

impl<T> Clone for SizedModel<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Size1(mdl) => Self::Size1(mdl.clone()),
            Self::Size2(mdl) => Self::Size2(mdl.clone()),
            Self::Size3(mdl) => Self::Size3(mdl.clone()),
        }
    }
}

impl<T> fmt::Debug for SizedModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SizedModel({})", self.size())
    }
}
