//! Service error types.

use crate::domain::{LineId, SectionError, StationId};

/// Errors from line and station operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// No line with this id
    #[error("line {0} not found")]
    LineNotFound(LineId),

    /// No station with this id
    #[error("station {0} not found")]
    StationNotFound(StationId),

    /// Another line already uses this name
    #[error("line name already in use: {0}")]
    DuplicateLineName(String),

    /// Another station already uses this name
    #[error("station name already in use: {0}")]
    DuplicateStationName(String),

    /// A line still runs through the station
    #[error("station {0} is still served by a line")]
    StationInUse(StationId),

    /// The section chain rejected the edit
    #[error(transparent)]
    Section(#[from] SectionError),
}
