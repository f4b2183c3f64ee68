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

use super::arc::ObservationArcSim;
use super::registry::SimulatorMap;
use super::schedule::Cadence;
use super::time_spec::{Sampling, TimeSampleSpecification, TimeSpecMap};
use crate::io::{
    duration_from_str, duration_to_str, epoch_from_str, epoch_to_str, epochs_from_str,
    epochs_to_str, ConfigError, ConfigRepr,
};
use crate::od::msr::{LinkEndType, LinkEnds, ObservableType, ObservationResultMap};
use crate::od::noise::{NoiseConfig, NoiseFunction, SeededNoise, StochasticNoise};
use crate::od::{SimConfigSnafu, SimulationError};
use hifitime::{Duration, Epoch};
use serde_derive::{Deserialize, Serialize};
use snafu::ResultExt;
use std::collections::BTreeMap;
use std::path::Path;

/// How the epochs of a schedule are defined.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum SamplingCfg {
    /// Explicit epochs, used as is.
    Tabulated {
        #[serde(serialize_with = "epochs_to_str", deserialize_with = "epochs_from_str")]
        epochs: Vec<Epoch>,
    },
    /// Regular sampling from the start to the end epoch, both inclusive.
    Sampled {
        #[serde(serialize_with = "epoch_to_str", deserialize_with = "epoch_from_str")]
        start: Epoch,
        #[serde(serialize_with = "epoch_to_str", deserialize_with = "epoch_from_str")]
        end: Epoch,
        #[serde(
            serialize_with = "duration_to_str",
            deserialize_with = "duration_from_str"
        )]
        step: Duration,
        #[serde(default)]
        cadence: Cadence,
    },
}

/// Stores the observation schedule of one observable type and link ends, e.g. the range from DSS-65 to LRO.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ObservationScheduleCfg {
    pub observable: ObservableType,
    pub link_ends: LinkEnds,
    /// Link end whose time reference the epochs are in, defaults to the receiver.
    #[serde(default = "default_reference")]
    pub reference: LinkEndType,
    pub sampling: SamplingCfg,
    /// Stochastic noise of these observations, noise-free if unset.
    #[serde(default)]
    pub noise: Option<StochasticNoise>,
    /// Seed of the noise, if unset the noise is seeded from entropy and will differ between runs.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_reference() -> LinkEndType {
    LinkEndType::Receiver
}

impl ConfigRepr for ObservationScheduleCfg {}

impl ObservationScheduleCfg {
    /// Returns the time specification of this schedule, checking that it can be sampled.
    pub fn time_spec(&self) -> Result<TimeSampleSpecification<Epoch>, ConfigError> {
        if !self.link_ends.is_empty() && !self.link_ends.contains(self.reference) {
            return Err(ConfigError::InvalidConfig {
                msg: format!(
                    "reference link end {} is not in {}",
                    self.reference, self.link_ends
                ),
            });
        }

        match &self.sampling {
            SamplingCfg::Tabulated { epochs } => Ok(TimeSampleSpecification::tabulated(
                self.reference,
                epochs.clone(),
            )),
            SamplingCfg::Sampled {
                start,
                end,
                step,
                cadence,
            } => {
                if *step <= Duration::ZERO {
                    return Err(ConfigError::InvalidConfig {
                        msg: format!("sampling step must be positive, got {step}"),
                    });
                }
                if let Cadence::Intermittent { on, off } = cadence {
                    if *on <= Duration::ZERO || *off < Duration::ZERO {
                        return Err(ConfigError::InvalidConfig {
                            msg: format!(
                                "intermittent cadence needs a positive on time and a non-negative off time, got {cadence:?}"
                            ),
                        });
                    }
                }
                if end < start {
                    return Err(ConfigError::InvalidConfig {
                        msg: format!("sampling ends ({end}) before it starts ({start})"),
                    });
                }
                Ok(TimeSampleSpecification::sampled(
                    self.reference,
                    Sampling::builder()
                        .start(*start)
                        .end(*end)
                        .step(*step)
                        .cadence(*cadence)
                        .build(),
                ))
            }
        }
    }

    /// Returns the noise of these observations, seeded if a seed is configured.
    /// Each component of an observation gets its own sample of the noise model.
    pub fn noise_function(&self) -> Result<NoiseFunction<Epoch>, ConfigError> {
        let model = self.noise.unwrap_or(StochasticNoise::ZERO);
        if let Some(gm) = &model.bias {
            if gm.tau <= Duration::ZERO || gm.bias_sigma < 0.0 {
                return Err(ConfigError::InvalidConfig {
                    msg: format!("invalid bias of {} noise: {gm}", self.observable),
                });
            }
        }

        let noise = match self.seed {
            Some(seed) => SeededNoise::new(model, seed),
            None => {
                if self.noise.is_some() {
                    warn!(
                        "no seed for the {} noise of {}: samples are not repeatable",
                        self.observable, self.link_ends
                    );
                }
                SeededNoise::from_entropy(model)
            }
        };
        Ok(NoiseFunction::independent(noise))
    }
}

/// The time specifications and per link noise of a set of observation schedules.
#[derive(Clone, Debug)]
pub struct ObservationPlan {
    pub specs: TimeSpecMap<Epoch>,
    pub noise: NoiseConfig<Epoch>,
}

impl ObservationPlan {
    /// Builds the plan of these schedules. Each observable type and link ends may only be scheduled once.
    pub fn from_schedules(schedules: &[ObservationScheduleCfg]) -> Result<Self, SimulationError> {
        let mut specs = TimeSpecMap::new();
        let mut noise = BTreeMap::new();

        for cfg in schedules {
            let per_link: &mut BTreeMap<LinkEnds, TimeSampleSpecification<Epoch>> =
                specs.entry(cfg.observable).or_default();
            if per_link.contains_key(&cfg.link_ends) {
                return Err(SimulationError::SimConfigError {
                    source: ConfigError::InvalidConfig {
                        msg: format!(
                            "{} of {} scheduled more than once",
                            cfg.observable, cfg.link_ends
                        ),
                    },
                });
            }

            per_link.insert(cfg.link_ends.clone(), cfg.time_spec().context(SimConfigSnafu)?);
            noise
                .entry(cfg.observable)
                .or_insert_with(BTreeMap::new)
                .insert(
                    cfg.link_ends.clone(),
                    cfg.noise_function().context(SimConfigSnafu)?,
                );
        }

        debug!("planned {} observation schedules", schedules.len());

        Ok(Self {
            specs,
            noise: NoiseConfig::PerLink(noise),
        })
    }

    /// Loads the observation schedules from a YAML file and builds their plan.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SimulationError> {
        let schedules = ObservationScheduleCfg::load_many(path).context(SimConfigSnafu)?;
        Self::from_schedules(&schedules)
    }

    /// Simulates the noisy observations of this plan.
    pub fn simulate(
        &self,
        simulators: &SimulatorMap<Epoch>,
    ) -> Result<ObservationResultMap<Epoch>, SimulationError> {
        ObservationArcSim::new(simulators.clone()).simulate_with_noise(&self.specs, &self.noise)
    }
}
