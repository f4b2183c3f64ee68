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

use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Role of a participant in a tracking link.
#[derive(Copy, Clone, Debug, Hash, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum LinkEndType {
    Unidentified,
    Transmitter,
    Reflector1,
    Reflector2,
    Reflector3,
    Reflector4,
    Receiver,
    ObservedBody,
}

impl fmt::Display for LinkEndType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Identifies one participant of a link: the body, and optionally a reference point (e.g. a ground station) on that body.
#[derive(Clone, Debug, Default, Hash, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct LinkEndId {
    pub body: String,
    /// Empty if the link end is the body's center of mass.
    #[serde(default)]
    pub station: String,
}

impl LinkEndId {
    pub fn new<B: Into<String>, S: Into<String>>(body: B, station: S) -> Self {
        Self {
            body: body.into(),
            station: station.into(),
        }
    }

    /// Link end at the center of mass of the body
    pub fn body<B: Into<String>>(body: B) -> Self {
        Self::new(body, "")
    }
}

impl fmt::Display for LinkEndId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.station.is_empty() {
            write!(f, "{}", self.body)
        } else {
            write!(f, "{}/{}", self.body, self.station)
        }
    }
}

/// The set of participants forming one measurement geometry, keyed by their role.
#[derive(Clone, Debug, Default, Hash, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct LinkEnds(BTreeMap<LinkEndType, LinkEndId>);

impl LinkEnds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the participant of the provided role, builder style.
    pub fn with(mut self, role: LinkEndType, id: LinkEndId) -> Self {
        self.0.insert(role, id);
        self
    }

    /// Link ends of a transmitter and receiver pair.
    pub fn one_way(transmitter: LinkEndId, receiver: LinkEndId) -> Self {
        Self::new()
            .with(LinkEndType::Transmitter, transmitter)
            .with(LinkEndType::Receiver, receiver)
    }

    pub fn get(&self, role: LinkEndType) -> Option<&LinkEndId> {
        self.0.get(&role)
    }

    pub fn contains(&self, role: LinkEndType) -> bool {
        self.0.contains_key(&role)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LinkEndType, &LinkEndId)> {
        self.0.iter()
    }
}

impl FromIterator<(LinkEndType, LinkEndId)> for LinkEnds {
    fn from_iter<I: IntoIterator<Item = (LinkEndType, LinkEndId)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for LinkEnds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (role, id)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{role}: {id}")?;
        }
        write!(f, "]")
    }
}
