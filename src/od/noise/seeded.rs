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

use super::{ScalarNoiseGenerator, StochasticNoise, Stochastics};
use crate::SampleTime;
use hifitime::Duration;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use std::fmt;
use std::sync::{Mutex, PoisonError};

struct SeededState<T> {
    model: StochasticNoise,
    rng: Pcg64Mcg,
    previous: Option<T>,
}

/// A scalar noise generator sampling a stochastic noise model with its own random number generator.
///
/// The time elapsed between two consecutive evaluations drives the correlation of the bias, so the sequence of samples
/// depends on the order of the evaluations. Two generators built with the same model and seed, evaluated at the same
/// times, return the same samples.
pub struct SeededNoise<T> {
    state: Mutex<SeededState<T>>,
}

impl<T: SampleTime> SeededNoise<T> {
    pub fn new(model: StochasticNoise, seed: u64) -> Self {
        Self::with_rng(model, Pcg64Mcg::seed_from_u64(seed))
    }

    /// Seeds the generator from the operating system's entropy, making the samples unrepeatable.
    pub fn from_entropy(model: StochasticNoise) -> Self {
        Self::with_rng(model, Pcg64Mcg::from_entropy())
    }

    pub fn with_rng(model: StochasticNoise, rng: Pcg64Mcg) -> Self {
        Self {
            state: Mutex::new(SeededState {
                model,
                rng,
                previous: None,
            }),
        }
    }

    /// Returns a copy of the noise model in its current state.
    pub fn model(&self) -> StochasticNoise {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .model
    }
}

impl<T: SampleTime> ScalarNoiseGenerator<T> for SeededNoise<T> {
    fn evaluate(&self, time: T) -> f64 {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let dt = match state.previous {
            Some(previous) => time.elapsed_since(previous),
            None => Duration::ZERO,
        };
        state.previous = Some(time);

        let SeededState { model, rng, .. } = &mut *state;
        model.sample(dt, rng)
    }
}

impl<T> fmt::Debug for SeededNoise<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("SeededNoise")
            .field("model", &state.model)
            .finish()
    }
}
