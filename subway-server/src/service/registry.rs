//! In-memory registry of stations and lines.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::sync::RwLock;
use tracing::info;

use crate::domain::{Distance, Line, LineId, Section, SectionError, Station, StationId};

use super::error::ServiceError;

/// Request to open a new line over one initial section.
#[derive(Debug, Clone)]
pub struct NewLine {
    pub name: String,
    pub color: String,
    pub up_station: StationId,
    pub down_station: StationId,
    pub distance: i64,
}

/// Request to add a section to an existing line.
#[derive(Debug, Clone, Copy)]
pub struct NewSection {
    pub up_station: StationId,
    pub down_station: StationId,
    pub distance: i64,
}

/// Snapshot of a line with its stations resolved, in travel order.
#[derive(Debug, Clone)]
pub struct LineDetails {
    pub id: LineId,
    pub name: String,
    pub color: String,
    pub stations: Vec<Station>,
    pub sections: Vec<Section>,
    pub distance: u64,
    pub created_at: DateTime<Local>,
    pub modified_at: DateTime<Local>,
}

#[derive(Debug, Default)]
struct Registry {
    stations: BTreeMap<StationId, Station>,
    lines: BTreeMap<LineId, Line>,
    last_station_id: u64,
    last_line_id: u64,
}

impl Registry {
    fn station(&self, id: StationId) -> Result<&Station, ServiceError> {
        self.stations
            .get(&id)
            .ok_or(ServiceError::StationNotFound(id))
    }

    fn line(&self, id: LineId) -> Result<&Line, ServiceError> {
        self.lines.get(&id).ok_or(ServiceError::LineNotFound(id))
    }

    fn line_mut(&mut self, id: LineId) -> Result<&mut Line, ServiceError> {
        self.lines.get_mut(&id).ok_or(ServiceError::LineNotFound(id))
    }

    fn line_name_taken(&self, name: &str, except: Option<LineId>) -> bool {
        self.lines
            .values()
            .any(|l| l.name() == name && Some(l.id()) != except)
    }

    /// Resolve both ends of a candidate section and build it.
    fn section(
        &self,
        up: StationId,
        down: StationId,
        distance: i64,
    ) -> Result<Section, ServiceError> {
        self.station(up)?;
        self.station(down)?;
        let distance = Distance::try_from(distance).map_err(SectionError::from)?;
        Ok(Section::new(up, down, distance)?)
    }

    fn details(&self, line: &Line) -> Result<LineDetails, ServiceError> {
        let sections = line.sections().sorted_sections()?;
        let stations = line
            .sections()
            .sorted_stations()?
            .into_iter()
            .map(|id| self.station(id).cloned())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(LineDetails {
            id: line.id(),
            name: line.name().to_string(),
            color: line.color().to_string(),
            stations,
            sections,
            distance: line.distance(),
            created_at: line.created_at(),
            modified_at: line.modified_at(),
        })
    }
}

/// Thread-safe store of stations and lines.
///
/// Reads share the lock; every mutation holds the write lock for its whole
/// duration, so edits to a line are applied one at a time.
#[derive(Debug, Clone, Default)]
pub struct SubwayService {
    inner: Arc<RwLock<Registry>>,
}

impl SubwayService {
    /// Create an empty service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a station. Names must be unique.
    pub async fn create_station(&self, name: &str) -> Result<Station, ServiceError> {
        let mut guard = self.inner.write().await;
        if guard.stations.values().any(|s| s.name == name) {
            return Err(ServiceError::DuplicateStationName(name.to_string()));
        }

        guard.last_station_id += 1;
        let station = Station::new(StationId(guard.last_station_id), name);
        guard.stations.insert(station.id, station.clone());

        info!(id = %station.id, name, "created station");
        Ok(station)
    }

    /// All stations, ordered by id.
    pub async fn stations(&self) -> Vec<Station> {
        let guard = self.inner.read().await;
        guard.stations.values().cloned().collect()
    }

    /// Look up a station.
    pub async fn station(&self, id: StationId) -> Result<Station, ServiceError> {
        let guard = self.inner.read().await;
        guard.station(id).cloned()
    }

    /// Remove a station that no line serves.
    pub async fn delete_station(&self, id: StationId) -> Result<(), ServiceError> {
        let mut guard = self.inner.write().await;
        guard.station(id)?;
        if guard.lines.values().any(|l| l.serves(id)) {
            return Err(ServiceError::StationInUse(id));
        }

        guard.stations.remove(&id);
        info!(%id, "deleted station");
        Ok(())
    }

    /// Open a line over one section between two registered stations.
    pub async fn create_line(&self, request: NewLine) -> Result<LineDetails, ServiceError> {
        let mut guard = self.inner.write().await;
        if guard.line_name_taken(&request.name, None) {
            return Err(ServiceError::DuplicateLineName(request.name));
        }
        let initial = guard.section(request.up_station, request.down_station, request.distance)?;

        guard.last_line_id += 1;
        let line = Line::new(
            LineId(guard.last_line_id),
            request.name,
            request.color,
            initial,
        );
        let details = guard.details(&line)?;
        guard.lines.insert(line.id(), line);

        info!(id = %details.id, name = %details.name, "created line");
        Ok(details)
    }

    /// All lines, ordered by id.
    pub async fn lines(&self) -> Result<Vec<LineDetails>, ServiceError> {
        let guard = self.inner.read().await;
        guard.lines.values().map(|l| guard.details(l)).collect()
    }

    /// Look up a line.
    pub async fn line(&self, id: LineId) -> Result<LineDetails, ServiceError> {
        let guard = self.inner.read().await;
        guard.details(guard.line(id)?)
    }

    /// Rename and recolour a line.
    pub async fn update_line(
        &self,
        id: LineId,
        name: &str,
        color: &str,
    ) -> Result<LineDetails, ServiceError> {
        let mut guard = self.inner.write().await;
        guard.line(id)?;
        if guard.line_name_taken(name, Some(id)) {
            return Err(ServiceError::DuplicateLineName(name.to_string()));
        }

        let line = guard.line_mut(id)?;
        line.update(name, color);

        info!(%id, name, color, "updated line");
        guard.details(guard.line(id)?)
    }

    /// Remove a line and all of its sections.
    pub async fn delete_line(&self, id: LineId) -> Result<(), ServiceError> {
        let mut guard = self.inner.write().await;
        guard
            .lines
            .remove(&id)
            .ok_or(ServiceError::LineNotFound(id))?;

        info!(%id, "deleted line");
        Ok(())
    }

    /// The sections of a line in travel order.
    pub async fn line_sections(&self, id: LineId) -> Result<Vec<Section>, ServiceError> {
        let guard = self.inner.read().await;
        Ok(guard.line(id)?.sections().sorted_sections()?)
    }

    /// Add a section to a line, extending it or splitting an existing section.
    pub async fn add_section(
        &self,
        id: LineId,
        request: NewSection,
    ) -> Result<(), ServiceError> {
        let mut guard = self.inner.write().await;
        guard.line(id)?;
        let section = guard.section(request.up_station, request.down_station, request.distance)?;

        guard.line_mut(id)?.insert_section(section)?;

        info!(
            %id,
            up = %request.up_station,
            down = %request.down_station,
            distance = request.distance,
            "added section"
        );
        Ok(())
    }

    /// Take a station off a line, merging its sections if it was interior.
    pub async fn remove_station(
        &self,
        id: LineId,
        station: StationId,
    ) -> Result<(), ServiceError> {
        let mut guard = self.inner.write().await;
        guard.line(id)?;
        guard.station(station)?;

        guard.line_mut(id)?.delete_station(station)?;

        info!(%id, %station, "removed station from line");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn stations(service: &SubwayService, names: &[&str]) -> Vec<StationId> {
        let mut ids = Vec::new();
        for name in names {
            ids.push(service.create_station(name).await.unwrap().id);
        }
        ids
    }

    fn new_line(name: &str, up: StationId, down: StationId, distance: i64) -> NewLine {
        NewLine {
            name: name.to_string(),
            color: "bg-red-600".to_string(),
            up_station: up,
            down_station: down,
            distance,
        }
    }

    fn new_section(up: StationId, down: StationId, distance: i64) -> NewSection {
        NewSection {
            up_station: up,
            down_station: down,
            distance,
        }
    }

    fn names(details: &LineDetails) -> Vec<&str> {
        details.stations.iter().map(|s| s.name.as_str()).collect()
    }

    #[tokio::test]
    async fn station_ids_are_sequential() {
        let service = SubwayService::new();
        let ids = stations(&service, &["Gangnam", "Yeoksam"]).await;
        assert_eq!(ids, vec![StationId(1), StationId(2)]);
        assert_eq!(service.stations().await.len(), 2);
        assert_eq!(service.station(StationId(2)).await.unwrap().name, "Yeoksam");
    }

    #[tokio::test]
    async fn duplicate_station_name() {
        let service = SubwayService::new();
        service.create_station("Gangnam").await.unwrap();
        assert_eq!(
            service.create_station("Gangnam").await.unwrap_err(),
            ServiceError::DuplicateStationName("Gangnam".into())
        );
    }

    #[tokio::test]
    async fn create_and_find_line() {
        let service = SubwayService::new();
        let ids = stations(&service, &["Gangnam", "Yangjae"]).await;

        let created = service
            .create_line(new_line("Shinbundang", ids[0], ids[1], 10))
            .await
            .unwrap();
        assert_eq!(created.id, LineId(1));
        assert_eq!(names(&created), vec!["Gangnam", "Yangjae"]);
        assert_eq!(created.distance, 10);

        let found = service.line(LineId(1)).await.unwrap();
        assert_eq!(found.name, "Shinbundang");
        assert_eq!(service.lines().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_line_validates_input() {
        let service = SubwayService::new();
        let ids = stations(&service, &["Gangnam", "Yangjae"]).await;

        assert_eq!(
            service
                .create_line(new_line("L", ids[0], StationId(99), 10))
                .await
                .unwrap_err(),
            ServiceError::StationNotFound(StationId(99))
        );
        assert!(matches!(
            service.create_line(new_line("L", ids[0], ids[1], 0)).await,
            Err(ServiceError::Section(SectionError::InvalidDistance(_)))
        ));
        assert!(matches!(
            service.create_line(new_line("L", ids[0], ids[0], 5)).await,
            Err(ServiceError::Section(SectionError::InvalidSection(_)))
        ));
        assert!(service.lines().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_line_name() {
        let service = SubwayService::new();
        let ids = stations(&service, &["Gangnam", "Yangjae", "Pangyo"]).await;
        service
            .create_line(new_line("Shinbundang", ids[0], ids[1], 10))
            .await
            .unwrap();

        assert_eq!(
            service
                .create_line(new_line("Shinbundang", ids[1], ids[2], 10))
                .await
                .unwrap_err(),
            ServiceError::DuplicateLineName("Shinbundang".into())
        );
    }

    #[tokio::test]
    async fn update_line() {
        let service = SubwayService::new();
        let ids = stations(&service, &["A", "B", "C"]).await;
        service.create_line(new_line("One", ids[0], ids[1], 5)).await.unwrap();
        service.create_line(new_line("Two", ids[1], ids[2], 5)).await.unwrap();

        let updated = service.update_line(LineId(1), "Uno", "blue").await.unwrap();
        assert_eq!(updated.name, "Uno");
        assert_eq!(updated.color, "blue");

        // Keeping its own name is fine, taking another line's is not
        assert!(service.update_line(LineId(1), "Uno", "red").await.is_ok());
        assert_eq!(
            service.update_line(LineId(1), "Two", "red").await.unwrap_err(),
            ServiceError::DuplicateLineName("Two".into())
        );
        assert_eq!(
            service.update_line(LineId(9), "X", "red").await.unwrap_err(),
            ServiceError::LineNotFound(LineId(9))
        );
    }

    #[tokio::test]
    async fn add_and_remove_sections() {
        let service = SubwayService::new();
        let ids = stations(&service, &["A", "B", "C", "D"]).await;
        let (a, b, c, d) = (ids[0], ids[1], ids[2], ids[3]);
        service.create_line(new_line("L", a, d, 10)).await.unwrap();

        service.add_section(LineId(1), new_section(a, b, 4)).await.unwrap();
        service.add_section(LineId(1), new_section(c, d, 3)).await.unwrap();

        let line = service.line(LineId(1)).await.unwrap();
        assert_eq!(names(&line), vec!["A", "B", "C", "D"]);
        let distances: Vec<u32> = line.sections.iter().map(|s| s.distance().value()).collect();
        assert_eq!(distances, vec![4, 3, 3]);

        service.remove_station(LineId(1), c).await.unwrap();

        let line = service.line(LineId(1)).await.unwrap();
        assert_eq!(names(&line), vec!["A", "B", "D"]);
        let sections = service.line_sections(LineId(1)).await.unwrap();
        let distances: Vec<u32> = sections.iter().map(|s| s.distance().value()).collect();
        assert_eq!(distances, vec![4, 6]);
    }

    #[tokio::test]
    async fn rejected_section_leaves_line() {
        let service = SubwayService::new();
        let ids = stations(&service, &["A", "B", "C"]).await;
        service.create_line(new_line("L", ids[0], ids[2], 10)).await.unwrap();
        let before = service.line_sections(LineId(1)).await.unwrap();

        assert!(matches!(
            service.add_section(LineId(1), new_section(ids[0], ids[1], 10)).await,
            Err(ServiceError::Section(SectionError::InvalidDistance(_)))
        ));
        assert!(matches!(
            service.add_section(LineId(1), new_section(ids[0], ids[2], 5)).await,
            Err(ServiceError::Section(SectionError::InvalidSection(_)))
        ));
        assert_eq!(service.line_sections(LineId(1)).await.unwrap(), before);
    }

    #[tokio::test]
    async fn remove_station_errors() {
        let service = SubwayService::new();
        let ids = stations(&service, &["A", "B", "C"]).await;
        service.create_line(new_line("L", ids[0], ids[1], 10)).await.unwrap();

        assert!(matches!(
            service.remove_station(LineId(1), ids[0]).await,
            Err(ServiceError::Section(SectionError::InvalidSection(_)))
        ));
        assert!(matches!(
            service.remove_station(LineId(1), ids[2]).await,
            Err(ServiceError::Section(SectionError::InvalidSection(_)))
        ));
        assert_eq!(
            service.remove_station(LineId(1), StationId(42)).await.unwrap_err(),
            ServiceError::StationNotFound(StationId(42))
        );
        assert_eq!(
            service.remove_station(LineId(5), ids[0]).await.unwrap_err(),
            ServiceError::LineNotFound(LineId(5))
        );
    }

    #[tokio::test]
    async fn station_in_use_cannot_be_deleted() {
        let service = SubwayService::new();
        let ids = stations(&service, &["A", "B", "C"]).await;
        service.create_line(new_line("L", ids[0], ids[1], 10)).await.unwrap();

        assert_eq!(
            service.delete_station(ids[0]).await.unwrap_err(),
            ServiceError::StationInUse(ids[0])
        );
        service.delete_station(ids[2]).await.unwrap();
        assert_eq!(
            service.station(ids[2]).await.unwrap_err(),
            ServiceError::StationNotFound(ids[2])
        );

        service.delete_line(LineId(1)).await.unwrap();
        service.delete_station(ids[0]).await.unwrap();
    }

    #[tokio::test]
    async fn delete_line() {
        let service = SubwayService::new();
        let ids = stations(&service, &["A", "B"]).await;
        service.create_line(new_line("L", ids[0], ids[1], 10)).await.unwrap();

        service.delete_line(LineId(1)).await.unwrap();
        assert_eq!(
            service.line(LineId(1)).await.unwrap_err(),
            ServiceError::LineNotFound(LineId(1))
        );
        assert_eq!(
            service.delete_line(LineId(1)).await.unwrap_err(),
            ServiceError::LineNotFound(LineId(1))
        );
    }
}
