//! Domain types for the subway line server.
//!
//! This module contains the core model: stations, distances, sections and
//! the section chain that keeps a line a single path. All types enforce
//! their invariants at construction time, so code that receives these types
//! can trust their validity.

mod distance;
mod error;
mod line;
mod section;
mod sections;
mod station;

pub use distance::{Distance, InvalidDistance};
pub use error::SectionError;
pub use line::{Line, LineId};
pub use section::Section;
pub use sections::SectionChain;
pub use station::{Station, StationId};
