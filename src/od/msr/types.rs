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

use enum_iterator::Sequence;
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// Category of measurement. Each observable type has a fixed observation size (dimensionality).
#[derive(
    Copy, Clone, Debug, Hash, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Sequence,
)]
pub enum ObservableType {
    #[serde(rename = "one_way_range")]
    OneWayRange,
    #[serde(rename = "one_way_doppler")]
    OneWayDoppler,
    #[serde(rename = "two_way_doppler")]
    TwoWayDoppler,
    #[serde(rename = "one_way_differenced_range")]
    OneWayDifferencedRange,
    #[serde(rename = "n_way_range")]
    NWayRange,
    /// Right ascension and declination
    #[serde(rename = "angular_position")]
    AngularPosition,
    #[serde(rename = "position")]
    Position,
    #[serde(rename = "velocity")]
    Velocity,
    #[serde(rename = "euler_angle_313")]
    EulerAngle313,
}

impl ObservableType {
    /// Returns the fixed number of components of a single observation of this type.
    pub const fn observation_size(self) -> usize {
        match self {
            Self::OneWayRange
            | Self::OneWayDoppler
            | Self::TwoWayDoppler
            | Self::OneWayDifferencedRange
            | Self::NWayRange => 1,
            Self::AngularPosition => 2,
            Self::Position | Self::Velocity | Self::EulerAngle313 => 3,
        }
    }

}

impl fmt::Display for ObservableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OneWayRange => "one-way range",
            Self::OneWayDoppler => "one-way Doppler",
            Self::TwoWayDoppler => "two-way Doppler",
            Self::OneWayDifferencedRange => "one-way differenced range",
            Self::NWayRange => "n-way range",
            Self::AngularPosition => "angular position",
            Self::Position => "position",
            Self::Velocity => "velocity",
            Self::EulerAngle313 => "3-1-3 Euler angles",
        };
        write!(f, "{name}")
    }
}
