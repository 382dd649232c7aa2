//! The ordered chain of sections making up one line.
//!
//! A line is a single simple path: every station appears once, the up
//! terminus has no incoming section, the down terminus has no outgoing
//! section, and every station in between has exactly one of each. Edits are
//! local (extend an end, split a section, merge two sections), but each one
//! is computed as a whole new section set, checked against the path shape,
//! and only then swapped in. A failed edit leaves the chain untouched.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::{Section, SectionError, StationId};

/// Where a new section attaches to an existing chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// Ends at the current up terminus.
    Head,
    /// Starts at the current down terminus.
    Tail,
    /// Shares its up station with the section at this index.
    FrontSplit(usize),
    /// Shares its down station with the section at this index.
    RearSplit(usize),
}

/// The sections of one line, forming a single directed path.
///
/// # Invariants
///
/// - At least one section
/// - Exactly one up terminus and one down terminus
/// - No station is entered or left twice (no branches, no cycles)
/// - All sections are reachable walking down from the up terminus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionChain {
    sections: Vec<Section>,
}

impl SectionChain {
    /// Start a chain from the first section of a new line.
    pub fn new(initial: Section) -> Self {
        Self {
            sections: vec![initial],
        }
    }

    /// Rebuild a chain from a stored set of sections, in any order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSection` if the set is empty or is not a single path.
    pub fn from_sections(sections: Vec<Section>) -> Result<Self, SectionError> {
        verify_path(&sections)?;
        Ok(Self { sections })
    }

    /// The sections in storage order (not travel order).
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Sum of all section distances.
    pub fn total_distance(&self) -> u64 {
        self.sections
            .iter()
            .map(|s| u64::from(s.distance().value()))
            .sum()
    }

    /// Returns true if any section starts or ends at `station`.
    pub fn contains_station(&self, station: StationId) -> bool {
        self.sections.iter().any(|s| s.contains_station(station))
    }

    /// The section leaving `station`, if any.
    pub fn section_with_up_station(&self, station: StationId) -> Option<&Section> {
        self.sections.iter().find(|s| s.up_station() == station)
    }

    /// The section arriving at `station`, if any.
    pub fn section_with_down_station(&self, station: StationId) -> Option<&Section> {
        self.sections.iter().find(|s| s.down_station() == station)
    }

    /// The station with no incoming section.
    pub fn up_terminus(&self) -> Result<StationId, SectionError> {
        up_terminus_of(&self.sections)
    }

    /// The station with no outgoing section.
    pub fn down_terminus(&self) -> Result<StationId, SectionError> {
        down_terminus_of(&self.sections)
    }

    pub fn is_up_terminus(&self, station: StationId) -> bool {
        self.up_terminus().is_ok_and(|s| s == station)
    }

    pub fn is_down_terminus(&self, station: StationId) -> bool {
        self.down_terminus().is_ok_and(|s| s == station)
    }

    /// The sections in travel order, from the up terminus down.
    pub fn sorted_sections(&self) -> Result<Vec<Section>, SectionError> {
        sort_sections(&self.sections)
    }

    /// The stations in travel order, from the up terminus down.
    pub fn sorted_stations(&self) -> Result<Vec<StationId>, SectionError> {
        let sorted = self.sorted_sections()?;
        let first = sorted.first().ok_or(SectionError::SectionNotFound)?;

        let mut stations = Vec::with_capacity(sorted.len() + 1);
        stations.push(first.up_station());
        stations.extend(sorted.iter().map(Section::down_station));
        Ok(stations)
    }

    /// Add a section to the line.
    ///
    /// Exactly one end of the new section must already be on the line. If
    /// that end is a terminus the line is extended; otherwise the section
    /// already leaving (or arriving at) that station is split in two, and the
    /// new section must be strictly shorter than it.
    ///
    /// # Errors
    ///
    /// - `InvalidSection` if both or neither stations are already on the line
    /// - `InvalidDistance` if a split would leave a non-positive remainder
    pub fn insert(&mut self, section: Section) -> Result<(), SectionError> {
        self.validate_insert(&section)?;

        let placement = self.placement(&section)?;
        let mut next = self.sections.clone();
        match placement {
            Placement::Head => next.insert(0, section),
            Placement::Tail => next.push(section),
            Placement::FrontSplit(idx) => {
                let existing = next[idx];
                let rest = existing.distance().minus(section.distance())?;
                let remainder =
                    Section::new(section.down_station(), existing.down_station(), rest)?;
                next[idx] = section;
                next.insert(idx + 1, remainder);
            }
            Placement::RearSplit(idx) => {
                let existing = next[idx];
                let rest = existing.distance().minus(section.distance())?;
                let remainder = Section::new(existing.up_station(), section.up_station(), rest)?;
                next[idx] = remainder;
                next.insert(idx + 1, section);
            }
        }

        self.commit(next)?;
        debug!(
            up = %section.up_station(),
            down = %section.down_station(),
            distance = %section.distance(),
            ?placement,
            sections = self.sections.len(),
            "inserted section"
        );
        Ok(())
    }

    /// Remove a station from the line.
    ///
    /// A terminus loses its single section. An interior station's two
    /// sections are replaced by one spanning both, with the distances summed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSection` if the station is not on the line or the line
    /// is down to its last section.
    pub fn delete(&mut self, station: StationId) -> Result<(), SectionError> {
        self.validate_delete(station)?;

        let left = self.section_with_down_station(station).copied();
        let right = self.section_with_up_station(station).copied();
        let merged = match (left, right) {
            (Some(left), Some(right)) => Some(left.connect(&right)?),
            _ => None,
        };

        let mut next = Vec::with_capacity(self.sections.len());
        for section in &self.sections {
            if Some(*section) == left {
                next.extend(merged);
            } else if !section.contains_station(station) {
                next.push(*section);
            }
        }

        self.commit(next)?;
        debug!(
            %station,
            merged = merged.is_some(),
            sections = self.sections.len(),
            "deleted station"
        );
        Ok(())
    }

    fn validate_insert(&self, section: &Section) -> Result<(), SectionError> {
        let has_up = self.contains_station(section.up_station());
        let has_down = self.contains_station(section.down_station());

        if has_up && has_down {
            return Err(SectionError::InvalidSection(
                "both stations are already on the line",
            ));
        }
        if !has_up && !has_down {
            return Err(SectionError::InvalidSection(
                "one of the stations must already be on the line",
            ));
        }
        Ok(())
    }

    fn validate_delete(&self, station: StationId) -> Result<(), SectionError> {
        if !self.contains_station(station) {
            return Err(SectionError::InvalidSection("station is not on the line"));
        }
        if self.sections.len() == 1 {
            return Err(SectionError::InvalidSection(
                "the last section of a line cannot be removed",
            ));
        }
        Ok(())
    }

    /// Decide where a validated section attaches.
    ///
    /// Extending an end wins over splitting. Once exactly one end of the
    /// section is known to be on the line, at most one rule can match.
    fn placement(&self, section: &Section) -> Result<Placement, SectionError> {
        let candidates = self.placements(section);
        debug_assert!(
            candidates.len() <= 1,
            "ambiguous placement for {section:?}: {candidates:?}"
        );
        candidates
            .into_iter()
            .next()
            .ok_or(SectionError::InvalidSection(
                "section does not attach to the line",
            ))
    }

    fn placements(&self, section: &Section) -> Vec<Placement> {
        let mut found = Vec::new();
        if self.is_up_terminus(section.down_station()) {
            found.push(Placement::Head);
        }
        if self.is_down_terminus(section.up_station()) {
            found.push(Placement::Tail);
        }
        if let Some(idx) = self
            .sections
            .iter()
            .position(|s| s.up_station() == section.up_station())
        {
            found.push(Placement::FrontSplit(idx));
        }
        if let Some(idx) = self
            .sections
            .iter()
            .position(|s| s.down_station() == section.down_station())
        {
            found.push(Placement::RearSplit(idx));
        }
        found
    }

    fn commit(&mut self, next: Vec<Section>) -> Result<(), SectionError> {
        verify_path(&next)?;
        self.sections = next;
        Ok(())
    }
}

/// Every station touched by any section.
fn station_set(sections: &[Section]) -> HashSet<StationId> {
    sections
        .iter()
        .flat_map(|s| [s.up_station(), s.down_station()])
        .collect()
}

/// The single station that no section arrives at.
fn up_terminus_of(sections: &[Section]) -> Result<StationId, SectionError> {
    let mut stations = station_set(sections);
    for section in sections {
        stations.remove(&section.down_station());
    }
    sole(stations)
}

/// The single station that no section leaves.
fn down_terminus_of(sections: &[Section]) -> Result<StationId, SectionError> {
    let mut stations = station_set(sections);
    for section in sections {
        stations.remove(&section.up_station());
    }
    sole(stations)
}

fn sole(stations: HashSet<StationId>) -> Result<StationId, SectionError> {
    let mut iter = stations.into_iter();
    match (iter.next(), iter.next()) {
        (Some(station), None) => Ok(station),
        _ => Err(SectionError::StationNotFound),
    }
}

/// Walk the sections from the up terminus to the down terminus.
fn sort_sections(sections: &[Section]) -> Result<Vec<Section>, SectionError> {
    let up = up_terminus_of(sections)?;
    let down = down_terminus_of(sections)?;
    let find_leaving = |station: StationId| {
        sections
            .iter()
            .find(|s| s.up_station() == station)
            .copied()
            .ok_or(SectionError::SectionNotFound)
    };

    let mut current = find_leaving(up)?;
    let mut sorted = Vec::with_capacity(sections.len());
    sorted.push(current);
    while current.down_station() != down {
        if sorted.len() >= sections.len() {
            return Err(SectionError::SectionNotFound);
        }
        current = find_leaving(current.down_station())?;
        sorted.push(current);
    }
    Ok(sorted)
}

/// Check that `sections` form one simple path.
fn verify_path(sections: &[Section]) -> Result<(), SectionError> {
    if sections.is_empty() {
        return Err(SectionError::InvalidSection(
            "a line needs at least one section",
        ));
    }

    let mut outgoing: HashMap<StationId, usize> = HashMap::new();
    let mut incoming: HashMap<StationId, usize> = HashMap::new();
    for section in sections {
        *outgoing.entry(section.up_station()).or_default() += 1;
        *incoming.entry(section.down_station()).or_default() += 1;
    }
    if outgoing.values().any(|&n| n > 1) || incoming.values().any(|&n| n > 1) {
        return Err(SectionError::InvalidSection("sections branch"));
    }

    match sort_sections(sections) {
        Ok(sorted) if sorted.len() == sections.len() => Ok(()),
        _ => Err(SectionError::InvalidSection(
            "sections do not form a single path",
        )),
    }
}

/// Build a chain directly from `(up, down, distance)` triples.
#[cfg(test)]
pub(crate) fn chain_of(triples: &[(u64, u64, i64)]) -> Result<SectionChain, SectionError> {
    let sections = triples
        .iter()
        .map(|&(up, down, distance)| {
            Section::new(
                StationId(up),
                StationId(down),
                super::Distance::new(distance)?,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    SectionChain::from_sections(sections)
}
