//! Station and line registry.
//!
//! Resolves station ids, enforces unique names, and serializes edits to
//! section chains behind a single lock.

mod error;
mod registry;

pub use error::ServiceError;
pub use registry::{LineDetails, NewLine, NewSection, SubwayService};
