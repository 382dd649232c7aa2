//! A single directed section of a line.

use super::{Distance, SectionError, StationId};

/// A directed edge between two adjacent stations on a line.
///
/// The up station comes first in travel order. A section never loops back
/// onto its own station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Section {
    up_station: StationId,
    down_station: StationId,
    distance: Distance,
}

impl Section {
    /// Create a section from `up_station` to `down_station`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSection` if both ends are the same station.
    pub fn new(
        up_station: StationId,
        down_station: StationId,
        distance: Distance,
    ) -> Result<Self, SectionError> {
        if up_station == down_station {
            return Err(SectionError::InvalidSection(
                "up and down stations must differ",
            ));
        }
        Ok(Self {
            up_station,
            down_station,
            distance,
        })
    }

    pub fn up_station(&self) -> StationId {
        self.up_station
    }

    pub fn down_station(&self) -> StationId {
        self.down_station
    }

    pub fn distance(&self) -> Distance {
        self.distance
    }

    /// Returns true if either end of the section is `station`.
    pub fn contains_station(&self, station: StationId) -> bool {
        self.up_station == station || self.down_station == station
    }

    /// Join this section with the one that follows it.
    ///
    /// `next` must start where `self` ends. The result spans both, with the
    /// distances summed.
    pub fn connect(&self, next: &Section) -> Result<Section, SectionError> {
        if self.down_station != next.up_station {
            return Err(SectionError::InvalidSection(
                "sections to connect must share a station",
            ));
        }
        let distance = self.distance.plus(next.distance)?;
        Section::new(self.up_station, next.down_station, distance)
    }
}
