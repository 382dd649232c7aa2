//! Data transfer objects for web requests and responses.
//!
//! Field names are camelCase on the wire.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::domain::{LineId, Section, Station, StationId};
use crate::service::{LineDetails, NewLine, NewSection};

/// Request to register a station.
#[derive(Debug, Deserialize)]
pub struct StationRequest {
    pub name: String,
}

/// A station in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationResponse {
    pub id: StationId,
    pub name: String,
}

/// Request to create a line over its first section.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRequest {
    pub name: String,
    pub color: String,
    pub up_station_id: StationId,
    pub down_station_id: StationId,
    pub distance: i64,
}

/// Request to rename or recolour a line.
#[derive(Debug, Deserialize)]
pub struct LineUpdateRequest {
    pub name: String,
    pub color: String,
}

/// Request to add a section to a line.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRequest {
    pub up_station_id: StationId,
    pub down_station_id: StationId,
    pub distance: i64,
}

/// Query for taking a station off a line.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveStationQuery {
    pub station_id: StationId,
}

/// A line with its stations in travel order.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineResponse {
    pub id: LineId,
    pub name: String,
    pub color: String,
    pub stations: Vec<StationResponse>,
    /// Total length of the line
    pub distance: u64,
    pub created_date: DateTime<Local>,
    pub modified_date: DateTime<Local>,
}

/// A section in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionResponse {
    pub up_station_id: StationId,
    pub down_station_id: StationId,
    pub distance: u32,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl From<&Station> for StationResponse {
    fn from(station: &Station) -> Self {
        Self {
            id: station.id,
            name: station.name.clone(),
        }
    }
}

impl From<&LineDetails> for LineResponse {
    fn from(line: &LineDetails) -> Self {
        Self {
            id: line.id,
            name: line.name.clone(),
            color: line.color.clone(),
            stations: line.stations.iter().map(StationResponse::from).collect(),
            distance: line.distance,
            created_date: line.created_at,
            modified_date: line.modified_at,
        }
    }
}

impl From<&Section> for SectionResponse {
    fn from(section: &Section) -> Self {
        Self {
            up_station_id: section.up_station(),
            down_station_id: section.down_station(),
            distance: section.distance().value(),
        }
    }
}

impl From<LineRequest> for NewLine {
    fn from(req: LineRequest) -> Self {
        Self {
            name: req.name,
            color: req.color,
            up_station: req.up_station_id,
            down_station: req.down_station_id,
            distance: req.distance,
        }
    }
}

impl From<SectionRequest> for NewSection {
    fn from(req: SectionRequest) -> Self {
        Self {
            up_station: req.up_station_id,
            down_station: req.down_station_id,
            distance: req.distance,
        }
    }
}
