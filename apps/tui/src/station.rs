use crate::domain::AvailabilityStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub longitude: f64,
    pub latitude: f64,
}

/// Live state of one station. Identity is `station_id`, stable across snapshots.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "StationFeature")]
pub struct StationRecord {
    pub station_id: String,
    pub name: String,
    pub short_name: String,
    pub position: Position,
    pub capacity: u32,
    pub bikes_available: u32,
    pub classic_bikes: u32,
    pub ebikes_available: u32,
    pub docks_available: u32,
    pub is_installed: bool,
    pub is_renting: bool,
    pub is_returning: bool,
    pub is_charging: bool,
    pub availability_status: AvailabilityStatus,
    pub marker_color: String,
    pub last_reported: Option<i64>,
}

impl StationRecord {
    pub fn capacity_percent(&self) -> u32 {
        if self.capacity == 0 {
            return 0;
        }
        (f64::from(self.bikes_available) / f64::from(self.capacity) * 100.0).round() as u32
    }

    /// `bikes_available + docks_available <= capacity` is expected but not guaranteed.
    pub const fn exceeds_capacity(&self) -> bool {
        self.bikes_available.saturating_add(self.docks_available) > self.capacity
    }

    pub fn last_reported_at(&self) -> Option<DateTime<Utc>> {
        self.last_reported
            .and_then(|seconds| DateTime::<Utc>::from_timestamp(seconds, 0))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStats {
    #[serde(default)]
    pub total_bikes: u64,
    #[serde(default)]
    pub total_ebikes: u64,
    #[serde(default)]
    pub total_docks: u64,
    #[serde(default)]
    pub station_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CollectionMetadata {
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub stats: SystemStats,
}

/// One snapshot of the whole network, replaced wholesale on every accepted poll.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StationCollection {
    #[serde(rename = "features", default)]
    pub stations: Vec<StationRecord>,
    #[serde(default)]
    pub metadata: CollectionMetadata,
}

impl StationCollection {
    pub fn find(&self, station_id: &str) -> Option<&StationRecord> {
        self.stations
            .iter()
            .find(|station| station.station_id == station_id)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.metadata.last_updated.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|parsed| parsed.with_timezone(&Utc))
    }

    pub fn capacity_violations(&self) -> usize {
        self.stations
            .iter()
            .filter(|station| station.exceeds_capacity())
            .count()
    }

    pub fn count_by_status(&self) -> Vec<(AvailabilityStatus, usize)> {
        AvailabilityStatus::ALL
            .iter()
            .map(|status| {
                let count = self
                    .stations
                    .iter()
                    .filter(|station| station.availability_status == *status)
                    .count();
                (*status, count)
            })
            .collect()
    }
}

// GeoJSON feature as served by `/api/v1/stations`.
#[derive(Deserialize)]
struct StationFeature {
    geometry: PointGeometry,
    properties: StationProperties,
}

#[derive(Deserialize)]
struct PointGeometry {
    coordinates: [f64; 2],
}

#[derive(Deserialize)]
struct StationProperties {
    station_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    short_name: String,
    #[serde(default)]
    capacity: u32,
    #[serde(default)]
    bikes_available: u32,
    #[serde(default)]
    classic_bikes: u32,
    #[serde(default)]
    ebikes_available: u32,
    #[serde(default)]
    docks_available: u32,
    #[serde(default, deserialize_with = "flag")]
    is_installed: bool,
    #[serde(default, deserialize_with = "flag")]
    is_renting: bool,
    #[serde(default, deserialize_with = "flag")]
    is_returning: bool,
    #[serde(default, deserialize_with = "flag")]
    is_charging: bool,
    #[serde(default)]
    availability_status: AvailabilityStatus,
    #[serde(default)]
    marker_color: String,
    #[serde(default)]
    last_reported: Option<i64>,
}

impl From<StationFeature> for StationRecord {
    fn from(feature: StationFeature) -> Self {
        let [longitude, latitude] = feature.geometry.coordinates;
        let props = feature.properties;
        Self {
            station_id: props.station_id,
            name: props.name,
            short_name: props.short_name,
            position: Position {
                longitude,
                latitude,
            },
            capacity: props.capacity,
            bikes_available: props.bikes_available,
            classic_bikes: props.classic_bikes,
            ebikes_available: props.ebikes_available,
            docks_available: props.docks_available,
            is_installed: props.is_installed,
            is_renting: props.is_renting,
            is_returning: props.is_returning,
            is_charging: props.is_charging,
            availability_status: props.availability_status,
            marker_color: props.marker_color,
            last_reported: props.last_reported,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagValue {
    Bool(bool),
    Int(i64),
}

// GBFS flags arrive as 0/1 integers or booleans depending on the feed version.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<FlagValue>::deserialize(deserializer)? {
        Some(FlagValue::Bool(value)) => value,
        Some(FlagValue::Int(value)) => value != 0,
        None => false,
    })
}


#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r##"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [-73.57, 45.51] },
                "properties": {
                    "station_id": "123",
                    "name": "Berri / de Maisonneuve",
                    "short_name": "6001",
                    "capacity": 20,
                    "bikes_available": 7,
                    "classic_bikes": 5,
                    "ebikes_available": 2,
                    "docks_available": 13,
                    "is_installed": 1,
                    "is_renting": 1,
                    "is_returning": 0,
                    "is_charging": true,
                    "availability_status": "medium",
                    "marker_color": "#eab308",
                    "last_reported": 1767225600
                }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [-73.60, 45.52] },
                "properties": {
                    "station_id": "456",
                    "capacity": 0,
                    "availability_status": "unknown",
                    "marker_color": "#6b7280",
                    "last_reported": null
                }
            }
        ],
        "metadata": {
            "last_updated": "2026-01-01T12:30:00Z",
            "stats": { "total_bikes": 7, "total_ebikes": 2, "total_docks": 13, "station_count": 2 }
        }
    }"##;

    #[test]
    fn decodes_geojson_feature_collection() {
        let collection: StationCollection = serde_json::from_str(BODY).unwrap();
        assert_eq!(collection.len(), 2);

        let station = collection.find("123").unwrap();
        assert_eq!(station.position.longitude, -73.57);
        assert_eq!(station.position.latitude, 45.51);
        assert_eq!(station.classic_bikes + station.ebikes_available, station.bikes_available);
        assert!(station.is_installed);
        assert!(!station.is_returning);
        assert!(station.is_charging);
        assert_eq!(station.availability_status, AvailabilityStatus::Medium);
        assert_eq!(collection.metadata.stats.station_count, 2);
    }

    #[test]
    fn missing_fields_take_neutral_defaults() {
        let collection: StationCollection = serde_json::from_str(BODY).unwrap();
        let station = collection.find("456").unwrap();
        assert_eq!(station.name, "");
        assert_eq!(station.bikes_available, 0);
        assert!(!station.is_renting);
        assert_eq!(station.last_reported, None);
        assert_eq!(station.last_reported_at(), None);
        assert_eq!(station.capacity_percent(), 0);
    }

    #[test]
    fn last_updated_parses_iso_timestamp() {
        let collection: StationCollection = serde_json::from_str(BODY).unwrap();
        let updated = collection.last_updated_at().unwrap();
        assert_eq!(updated.to_rfc3339(), "2026-01-01T12:30:00+00:00");
    }

    #[test]
    fn capacity_overflow_is_reported_not_rejected() {
        let mut station = fixtures::station("1", 25, AvailabilityStatus::High);
        station.docks_available = 10;
        assert!(station.exceeds_capacity());

        let collection = fixtures::collection(vec![station, fixtures::station("2", 3, AvailabilityStatus::Low)]);
        assert_eq!(collection.capacity_violations(), 1);
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn capacity_percent_rounds() {
        let station = fixtures::station("1", 7, AvailabilityStatus::Medium);
        assert_eq!(station.capacity_percent(), 23);
    }

    #[test]
    fn counts_stations_per_status() {
        let collection = fixtures::collection(vec![
            fixtures::station("1", 0, AvailabilityStatus::Empty),
            fixtures::station("2", 0, AvailabilityStatus::Empty),
            fixtures::station("3", 20, AvailabilityStatus::High),
        ]);
        let counts = collection.count_by_status();
        assert!(counts.contains(&(AvailabilityStatus::Empty, 2)));
        assert!(counts.contains(&(AvailabilityStatus::High, 1)));
        assert!(counts.contains(&(AvailabilityStatus::Unknown, 0)));
    }
}
