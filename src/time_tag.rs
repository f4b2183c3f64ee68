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

use hifitime::{Duration, Epoch, Unit};
use std::fmt::Debug;

/// A time value at which observations can be sampled.
///
/// Implemented for [`Epoch`] and for plain `f64` seconds (e.g. seconds past some reference epoch), so that the simulators
/// work equally well on absolute epochs and on relative time tags.
pub trait SampleTime: Copy + Debug + PartialOrd + Send + Sync + 'static {
    /// Shift this time by a duration (can be negative)
    fn shifted(self, by: Duration) -> Self;

    /// Duration elapsed between `earlier` and this time (negative if `earlier` is after self)
    fn elapsed_since(self, earlier: Self) -> Duration;
}

impl SampleTime for Epoch {
    fn shifted(self, by: Duration) -> Self {
        self + by
    }

    fn elapsed_since(self, earlier: Self) -> Duration {
        self - earlier
    }
}

impl SampleTime for f64 {
    fn shifted(self, by: Duration) -> Self {
        self + by.to_seconds()
    }

    fn elapsed_since(self, earlier: Self) -> Duration {
        (self - earlier) * Unit::Second
    }
}
