//! Askama templates for the web frontend.

use askama::Template;

use crate::service::LineDetails;

/// Line page: stations in travel order with the distance to the next one.
#[derive(Template)]
#[template(path = "line.html")]
pub struct LineTemplate {
    pub line: LineView,
}

/// Line view model for templates.
#[derive(Debug, Clone)]
pub struct LineView {
    pub name: String,
    pub color: String,
    pub distance: u64,
    pub stops: Vec<StopView>,
}

/// One station on a line page.
#[derive(Debug, Clone)]
pub struct StopView {
    pub name: String,
    /// Distance to the following station, absent for the down terminus
    pub distance_to_next: Option<u32>,
}

impl LineView {
    /// Create from line details.
    pub fn from_details(line: &LineDetails) -> Self {
        let stops = line
            .stations
            .iter()
            .enumerate()
            .map(|(i, station)| StopView {
                name: station.name.clone(),
                distance_to_next: line.sections.get(i).map(|s| s.distance().value()),
            })
            .collect();

        Self {
            name: line.name.clone(),
            color: line.color.clone(),
            distance: line.distance,
            stops,
        }
    }

    /// "A to B" summary of the termini.
    pub fn termini(&self) -> String {
        match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => format!("{} to {}", first.name, last.name),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Distance, LineId, Section, Station, StationId};
    use chrono::Local;

    fn details() -> LineDetails {
        let now = Local::now();
        let s = |u, d, dist| {
            Section::new(StationId(u), StationId(d), Distance::new(dist).unwrap()).unwrap()
        };
        LineDetails {
            id: LineId(1),
            name: "Line 2".into(),
            color: "green".into(),
            stations: vec![
                Station::new(StationId(1), "Gangnam"),
                Station::new(StationId(2), "Yeoksam"),
                Station::new(StationId(3), "Seolleung"),
            ],
            sections: vec![s(1, 2, 4), s(2, 3, 6)],
            distance: 10,
            created_at: now,
            modified_at: now,
        }
    }

    #[test]
    fn view_pairs_stations_with_next_distance() {
        let view = LineView::from_details(&details());
        let distances: Vec<_> = view.stops.iter().map(|s| s.distance_to_next).collect();
        assert_eq!(distances, vec![Some(4), Some(6), None]);
        assert_eq!(view.termini(), "Gangnam to Seolleung");
    }

    #[test]
    fn renders_line_page() {
        let html = LineTemplate {
            line: LineView::from_details(&details()),
        }
        .render()
        .unwrap();
        assert!(html.contains("Line 2"));
        assert!(html.contains("Yeoksam"));
        assert!(html.contains("Gangnam to Seolleung"));
    }
}
