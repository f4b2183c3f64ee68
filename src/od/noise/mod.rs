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

use crate::linalg::DVector;
use hifitime::Duration;
use rand::Rng;
use serde_derive::{Deserialize, Serialize};
use std::ops::{Mul, MulAssign};

pub mod gauss_markov;
pub mod pipeline;
pub mod seeded;
pub mod white;

pub use gauss_markov::GaussMarkov;
pub use pipeline::{
    add_noise, add_noise_to_batch, BroadcastNoise, IidNoise, NoiseConfig, NoiseFunction,
    NoiseLookup,
};
pub use seeded::SeededNoise;
pub use white::WhiteNoise;

/// Additive noise on a full observation, as a function of the observation time.
///
/// Any `Fn(T) -> DVector<f64>` closure is a noise generator. Implementations may hold internal state (e.g. a random number
/// generator) as long as it is synchronized: the simulators only ever call `evaluate` through a shared reference.
pub trait NoiseGenerator<T>: Send + Sync {
    /// Returns the noise to add to the observation at the provided time, one value per observation component.
    fn evaluate(&self, time: T) -> DVector<f64>;
}

impl<T, F> NoiseGenerator<T> for F
where
    F: Fn(T) -> DVector<f64> + Send + Sync,
{
    fn evaluate(&self, time: T) -> DVector<f64> {
        self(time)
    }
}

/// Scalar additive noise, as a function of the observation time. Any `Fn(T) -> f64` closure is a scalar noise generator.
pub trait ScalarNoiseGenerator<T>: Send + Sync {
    fn evaluate(&self, time: T) -> f64;
}

impl<T, F> ScalarNoiseGenerator<T> for F
where
    F: Fn(T) -> f64 + Send + Sync,
{
    fn evaluate(&self, time: T) -> f64 {
        self(time)
    }
}

/// Trait for any kind of stochastic modeling, developing primarily for synthetic orbit determination measurements.
pub trait Stochastics {
    /// Return the variance of this stochastic noise model.
    fn covariance(&self) -> f64;

    /// Returns a new sample of these stochastics, `dt` after the previous sample (zero for the first sample).
    fn sample<R: Rng>(&mut self, dt: Duration, rng: &mut R) -> f64;
}

/// Stochastic noise modeling used primarily for synthetic orbit determination measurements.
///
/// This implementation distinguishes between the white noise model and the bias model.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StochasticNoise {
    pub white_noise: Option<WhiteNoise>,
    pub bias: Option<GaussMarkov>,
}

impl StochasticNoise {
    /// Zero noise stochastic process.
    pub const ZERO: Self = Self {
        white_noise: None,
        bias: None,
    };

    /// The minimum stochastic noise process with a zero mean white noise of 1e-6.
    pub const MIN: Self = Self {
        white_noise: Some(WhiteNoise {
            mean: 0.0,
            sigma: 1e-6,
        }),
        bias: None,
    };

    /// Default stochastic process of the Deep Space Network, as per DESCANSO Chapter 3, Table 3-3.
    /// Using the instrument bias as the white noise value.
    pub fn default_range_km() -> Self {
        Self {
            white_noise: Some(WhiteNoise {
                sigma: 2.0e-3, // 2 m
                ..Default::default()
            }),
            bias: Some(GaussMarkov::default_range_km()),
        }
    }

    /// Default stochastic process of the Deep Space Network, using as per DESCANSO Chapter 3, Table 3-3 for the GM process.
    pub fn default_doppler_km_s() -> Self {
        Self {
            white_noise: Some(WhiteNoise {
                sigma: 3e-6, // 3 mm/s
                ..Default::default()
            }),
            bias: Some(GaussMarkov::default_doppler_km_s()),
        }
    }

    /// Default stochastic process for an angle measurement, white noise only.
    pub fn default_angle_rad() -> Self {
        Self {
            white_noise: Some(WhiteNoise {
                sigma: 1.0e-2_f64.to_radians(), // 0.01 deg
                ..Default::default()
            }),
            bias: None,
        }
    }
}

impl Stochastics for StochasticNoise {
    fn covariance(&self) -> f64 {
        let mut variance = 0.0;
        if let Some(wn) = &self.white_noise {
            variance += wn.covariance();
        }
        if let Some(gm) = &self.bias {
            variance += gm.covariance();
        }
        variance
    }

    fn sample<R: Rng>(&mut self, dt: Duration, rng: &mut R) -> f64 {
        let mut sample = 0.0;
        if let Some(wn) = &mut self.white_noise {
            sample += wn.sample(dt, rng)
        }
        if let Some(gm) = &mut self.bias {
            sample += gm.sample(dt, rng);
        }
        sample
    }
}

impl Mul<f64> for StochasticNoise {
    type Output = Self;

    /// Scale the sigmas of both the white noise and the bias by a constant.
    fn mul(mut self, rhs: f64) -> Self::Output {
        if let Some(wn) = &mut self.white_noise {
            *wn *= rhs;
        }
        if let Some(gm) = &mut self.bias {
            *gm *= rhs;
        }

        self
    }
}

impl MulAssign<f64> for StochasticNoise {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}
