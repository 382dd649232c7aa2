//! Line types.
//!
//! A `Line` is a named, coloured route whose stations are given entirely by
//! its section chain. The termini are never stored separately.

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::{Section, SectionChain, SectionError, StationId};

/// Identifier of a line.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(pub u64);

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A subway line.
#[derive(Debug, Clone)]
pub struct Line {
    id: LineId,
    name: String,
    color: String,
    sections: SectionChain,
    created_at: DateTime<Local>,
    modified_at: DateTime<Local>,
}

impl Line {
    /// Creates a line running over a single initial section.
    pub fn new(
        id: LineId,
        name: impl Into<String>,
        color: impl Into<String>,
        initial: Section,
    ) -> Self {
        let now = Local::now();
        Self {
            id,
            name: name.into(),
            color: color.into(),
            sections: SectionChain::new(initial),
            created_at: now,
            modified_at: now,
        }
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn sections(&self) -> &SectionChain {
        &self.sections
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    pub fn modified_at(&self) -> DateTime<Local> {
        self.modified_at
    }

    /// Total length of the line.
    pub fn distance(&self) -> u64 {
        self.sections.total_distance()
    }

    /// Returns true if the line calls at `station`.
    pub fn serves(&self, station: StationId) -> bool {
        self.sections.contains_station(station)
    }

    /// Rename and recolour the line.
    pub fn update(&mut self, name: impl Into<String>, color: impl Into<String>) {
        self.name = name.into();
        self.color = color.into();
        self.touch();
    }

    /// Add a section; see [`SectionChain::insert`].
    pub fn insert_section(&mut self, section: Section) -> Result<(), SectionError> {
        self.sections.insert(section)?;
        self.touch();
        Ok(())
    }

    /// Remove a station; see [`SectionChain::delete`].
    pub fn delete_station(&mut self, station: StationId) -> Result<(), SectionError> {
        self.sections.delete(station)?;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.modified_at = Local::now();
    }
}
