//! Station identity types.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Opaque handle identifying a station.
///
/// Section chains refer to stations only through this handle; the station
/// records themselves live in the service's registry.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(pub u64);

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named station.
///
/// Two stations are the same station when their ids match, whatever their
/// names say.
#[derive(Debug, Clone)]
pub struct Station {
    pub id: StationId,
    pub name: String,
}

impl Station {
    pub fn new(id: StationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl PartialEq for Station {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Station {}

impl Hash for Station {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_by_id() {
        let a = Station::new(StationId(1), "Gangnam");
        let renamed = Station::new(StationId(1), "Gangnam Station");
        let b = Station::new(StationId(2), "Gangnam");
        assert_eq!(a, renamed);
        assert_ne!(a, b);
    }

    #[test]
    fn hash_consistent_with_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Station::new(StationId(1), "Gangnam"));
        assert!(set.contains(&Station::new(StationId(1), "other name")));
        assert!(!set.contains(&Station::new(StationId(2), "Gangnam")));
    }

    #[test]
    fn display() {
        assert_eq!(StationId(42).to_string(), "42");
        assert_eq!(format!("{:?}", StationId(42)), "StationId(42)");
        assert_eq!(Station::new(StationId(3), "Yeoksam").to_string(), "Yeoksam");
    }

    #[test]
    fn id_serializes_transparently() {
        assert_eq!(serde_json::to_string(&StationId(9)).unwrap(), "9");
        let id: StationId = serde_json::from_str("9").unwrap();
        assert_eq!(id, StationId(9));
    }
}
