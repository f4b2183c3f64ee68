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

use crate::io::{duration_from_str, duration_to_str};
use hifitime::Duration;
use serde_derive::{Deserialize, Serialize};
use std::fmt::Debug;

/// Determines whether sampling is continuous or intermittent.
#[derive(Copy, Clone, Default, Serialize, Deserialize, PartialEq)]
pub enum Cadence {
    #[default]
    Continuous,
    /// An intermittent cadence has On and Off durations, starting with an On period.
    Intermittent {
        #[serde(
            serialize_with = "duration_to_str",
            deserialize_with = "duration_from_str"
        )]
        on: Duration,
        #[serde(
            serialize_with = "duration_to_str",
            deserialize_with = "duration_from_str"
        )]
        off: Duration,
    },
}

impl Cadence {
    /// Returns whether sampling is active after the provided time elapsed since the start of the sampling.
    pub fn is_on(&self, elapsed: Duration) -> bool {
        match self {
            Self::Continuous => true,
            Self::Intermittent { on, off } => {
                let period_s = (*on + *off).to_seconds();
                if period_s <= 0.0 {
                    return false;
                }
                elapsed.to_seconds().rem_euclid(period_s) < on.to_seconds()
            }
        }
    }
}

impl Debug for Cadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Continuous => write!(f, "Continuous"),
            Self::Intermittent { on, off } => f
                .debug_struct("Intermittent")
                .field("on", &format!("{on}"))
                .field("off", &format!("{off}"))
                .finish(),
        }
    }
}
