use serde::{Deserialize, Serialize};

/// Availability classification delivered by the station feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    High,
    Medium,
    Low,
    Empty,
    #[default]
    #[serde(other)]
    Unknown,
}

impl AvailabilityStatus {
    pub const ALL: [Self; 5] = [
        Self::High,
        Self::Medium,
        Self::Low,
        Self::Empty,
        Self::Unknown,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Empty => "empty",
            Self::Unknown => "unknown",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            "empty" => Self::Empty,
            _ => Self::Unknown,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Empty => "Empty",
            Self::Unknown => "Unknown",
        }
    }
}

/// Raster basemap used behind the station markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Basemap {
    #[default]
    #[serde(rename = "cyclosm")]
    CycleOsm,
    #[serde(rename = "openfreemap")]
    OpenStreetMap,
}

impl Basemap {
    pub const ALL: [Self; 2] = [Self::CycleOsm, Self::OpenStreetMap];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CycleOsm => "cyclosm",
            Self::OpenStreetMap => "openfreemap",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "cyclosm" => Some(Self::CycleOsm),
            "openfreemap" => Some(Self::OpenStreetMap),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::CycleOsm => "CyclOSM",
            Self::OpenStreetMap => "OpenStreetMap",
        }
    }

    pub const fn tile_templates(self) -> [&'static str; 3] {
        match self {
            Self::CycleOsm => [
                "https://a.tile-cyclosm.openstreetmap.fr/cyclosm/{z}/{x}/{y}.png",
                "https://b.tile-cyclosm.openstreetmap.fr/cyclosm/{z}/{x}/{y}.png",
                "https://c.tile-cyclosm.openstreetmap.fr/cyclosm/{z}/{x}/{y}.png",
            ],
            Self::OpenStreetMap => [
                "https://a.tile.openstreetmap.org/{z}/{x}/{y}.png",
                "https://b.tile.openstreetmap.org/{z}/{x}/{y}.png",
                "https://c.tile.openstreetmap.org/{z}/{x}/{y}.png",
            ],
        }
    }

    pub const fn max_zoom(self) -> u8 {
        match self {
            Self::CycleOsm => 20,
            Self::OpenStreetMap => 19,
        }
    }

    pub const fn attribution(self) -> &'static str {
        match self {
            Self::CycleOsm => "(c) CyclOSM (c) OpenStreetMap",
            Self::OpenStreetMap => "(c) OpenStreetMap contributors",
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::CycleOsm => Self::OpenStreetMap,
            Self::OpenStreetMap => Self::CycleOsm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "en" | "english" => Some(Self::En),
            "fr" | "french" | "francais" | "français" => Some(Self::Fr),
            _ => None,
        }
    }

    pub const fn toggle(self) -> Self {
        match self {
            Self::En => Self::Fr,
            Self::Fr => Self::En,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_parse_falls_back_to_unknown() {
        assert_eq!(AvailabilityStatus::parse(" HIGH "), AvailabilityStatus::High);
        assert_eq!(AvailabilityStatus::parse("empty"), AvailabilityStatus::Empty);
        assert_eq!(AvailabilityStatus::parse("plenty"), AvailabilityStatus::Unknown);
    }

    #[test]
    fn availability_deserializes_unrecognised_values_as_unknown() {
        let status: AvailabilityStatus = serde_json::from_str("\"overflowing\"").unwrap();
        assert_eq!(status, AvailabilityStatus::Unknown);
        let status: AvailabilityStatus = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(status, AvailabilityStatus::Medium);
    }

    #[test]
    fn basemap_round_trips_through_its_storage_name() {
        for basemap in Basemap::ALL {
            assert_eq!(Basemap::parse(basemap.as_str()), Some(basemap));
        }
        assert_eq!(Basemap::parse("satellite"), None);
        assert_eq!(Basemap::default(), Basemap::CycleOsm);
    }

    #[test]
    fn language_toggles_between_english_and_french() {
        assert_eq!(Language::En.toggle(), Language::Fr);
        assert_eq!(Language::Fr.toggle(), Language::En);
        assert_eq!(Language::parse("FR"), Some(Language::Fr));
    }
}
