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

use crate::io::{duration_from_str, duration_to_str};
use hifitime::{Duration, TimeUnits};
use rand::Rng;
use rand_distr::StandardNormal;
use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Mul, MulAssign};

use super::Stochastics;

/// A first order Gauss-Markov process for modeling biases, as described in section 5.2.4 of the NASA Best Practices for Navigation Filters (D'Souza et al.).
///
/// The bias is exponentially correlated in time, with a time constant τ and a steady-state standard deviation σ:
///
/// b(t + Δt) = φ b(t) + σ √(1 - φ²) w, where φ = exp(-|Δt| / τ) and w ~ N(0, 1)
///
/// It is up to the caller to ensure that the units at initialization match the units used where the model is applied.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GaussMarkov {
    /// Time constant of the Gauss-Markov process.
    #[serde(
        serialize_with = "duration_to_str",
        deserialize_with = "duration_from_str"
    )]
    pub tau: Duration,
    /// Steady-state standard deviation of the bias.
    pub bias_sigma: f64,
    /// Latest bias sample, also the value returned by the first sample.
    #[serde(default)]
    pub bias: f64,
}

impl fmt::Display for GaussMarkov {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "First order Gauss-Markov process with τ = {} and σ = {}: bias = {}",
            self.tau, self.bias_sigma, self.bias
        )
    }
}

impl GaussMarkov {
    /// Create a new first-order Gauss-Markov process, or None if `tau` is not positive or `bias_sigma` is negative.
    pub fn new(tau: Duration, bias_sigma: f64, init_bias: f64) -> Option<Self> {
        if tau <= Duration::ZERO || bias_sigma < 0.0 {
            return None;
        }
        Some(Self {
            tau,
            bias_sigma,
            bias: init_bias,
        })
    }

    /// Zero noise Gauss-Markov process.
    pub const ZERO: Self = Self {
        tau: Duration::MAX,
        bias_sigma: 0.0,
        bias: 0.0,
    };

    /// Typical noise on the ranging data from a non-high-precision ground station.
    pub fn default_range_km() -> Self {
        Self {
            tau: 5.minutes(),
            bias_sigma: 50.0e-3, // 50 m
            bias: 0.0,
        }
    }

    /// Typical noise on the Doppler data from a non-high-precision ground station.
    pub fn default_doppler_km_s() -> Self {
        Self {
            tau: 20.minutes(),
            bias_sigma: 50.0e-5, // 50 cm/s
            bias: 0.0,
        }
    }

    /// Example noise on the ranging data from a high-precision ground station.
    pub fn high_precision_range_km() -> Self {
        Self {
            tau: 12.hours(),
            bias_sigma: 5.0e-4, // 0.5 m
            bias: -4e-3,
        }
    }

    /// Example noise on the Doppler data from a high-precision ground station.
    pub fn high_precision_doppler_km_s() -> Self {
        Self {
            tau: 12.hours(),
            bias_sigma: 5.0e-5, // 5 cm/s
            bias: -4.0e-5,
        }
    }
}

impl Stochastics for GaussMarkov {
    fn covariance(&self) -> f64 {
        self.bias_sigma.powi(2)
    }

    fn sample<R: Rng>(&mut self, dt: Duration, rng: &mut R) -> f64 {
        // No decay without elapsed time, and no correlation with a non-positive time constant
        let phi = if dt == Duration::ZERO {
            1.0
        } else if self.tau > Duration::ZERO {
            (-dt.abs().to_seconds() / self.tau.to_seconds()).exp()
        } else {
            0.0
        };
        let z: f64 = rng.sample(StandardNormal);
        self.bias = phi * self.bias + self.bias_sigma * (1.0 - phi.powi(2)).sqrt() * z;
        self.bias
    }
}

impl Mul<f64> for GaussMarkov {
    type Output = Self;

    /// Scale the Gauss Markov process by a constant, maintaining the same time constant.
    fn mul(mut self, rhs: f64) -> Self::Output {
        self.bias_sigma *= rhs;
        self.bias *= rhs;
        self
    }
}

impl MulAssign<f64> for GaussMarkov {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}
