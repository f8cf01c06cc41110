use crate::domain::AvailabilityStatus;
use crate::station::{Position, StationCollection, StationRecord};
use ratatui::style::Color;

pub const LABEL_CLAMP: u32 = 99;

/// Marker size classes, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SizeTier {
    Smallest,
    Small,
    Large,
    Largest,
}

impl SizeTier {
    pub const fn for_status(status: AvailabilityStatus) -> Self {
        match status {
            AvailabilityStatus::Empty => Self::Smallest,
            AvailabilityStatus::Low => Self::Small,
            AvailabilityStatus::Medium => Self::Large,
            AvailabilityStatus::High | AvailabilityStatus::Unknown => Self::Largest,
        }
    }

    pub const fn diameter_px(self) -> f64 {
        match self {
            Self::Smallest => 14.0,
            Self::Small => 16.0,
            Self::Large => 18.0,
            Self::Largest => 20.0,
        }
    }

    pub const fn is_labelled(self) -> bool {
        matches!(self, Self::Large | Self::Largest)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPresentation {
    pub tier: SizeTier,
    pub label: Option<String>,
}

pub fn presentation(record: &StationRecord) -> MarkerPresentation {
    let tier = SizeTier::for_status(record.availability_status);
    let label = (record.bikes_available > 0 && tier.is_labelled()).then(|| {
        if record.bikes_available > LABEL_CLAMP {
            format!("{LABEL_CLAMP}+")
        } else {
            record.bikes_available.to_string()
        }
    });

    MarkerPresentation { tier, label }
}

/// Parses the feed's `#rrggbb` / `#rgb` color tokens.
pub fn parse_color(token: &str) -> Option<Color> {
    let hex = token.trim().strip_prefix('#')?;
    let channel = |range: &str| u8::from_str_radix(range, 16).ok();

    match hex.len() {
        6 => Some(Color::Rgb(
            channel(hex.get(0..2)?)?,
            channel(hex.get(2..4)?)?,
            channel(hex.get(4..6)?)?,
        )),
        3 => {
            let expand = |index: usize| {
                hex.get(index..=index)
                    .and_then(channel)
                    .map(|value| value * 17)
            };
            Some(Color::Rgb(expand(0)?, expand(1)?, expand(2)?))
        }
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub station_id: String,
    pub position: Position,
    pub tier: SizeTier,
    pub label: Option<String>,
    pub color: Color,
}

pub fn derive_markers(snapshot: &StationCollection) -> Vec<Marker> {
    snapshot
        .stations
        .iter()
        .map(|record| {
            let MarkerPresentation { tier, label } = presentation(record);
            Marker {
                station_id: record.station_id.clone(),
                position: record.position,
                tier,
                label,
                color: parse_color(&record.marker_color).unwrap_or(Color::Gray),
            }
        })
        .collect()
}

pub struct LegendRow {
    pub status: AvailabilityStatus,
    pub color: Color,
    pub range: &'static str,
}

pub const fn legend() -> [LegendRow; 4] {
    [
        LegendRow {
            status: AvailabilityStatus::High,
            color: Color::Rgb(0x22, 0xc5, 0x5e),
            range: "(>50%)",
        },
        LegendRow {
            status: AvailabilityStatus::Medium,
            color: Color::Rgb(0xea, 0xb3, 0x08),
            range: "(10-50%)",
        },
        LegendRow {
            status: AvailabilityStatus::Low,
            color: Color::Rgb(0xf9, 0x73, 0x16),
            range: "(<10%)",
        },
        LegendRow {
            status: AvailabilityStatus::Empty,
            color: Color::Rgb(0xef, 0x44, 0x44),
            range: "",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::station::fixtures::{collection, station};

    #[test]
    fn every_status_maps_to_one_tier() {
        let tiers: Vec<_> = AvailabilityStatus::ALL
            .iter()
            .map(|status| SizeTier::for_status(*status))
            .collect();
        assert_eq!(
            tiers,
            vec![
                SizeTier::Largest,
                SizeTier::Large,
                SizeTier::Small,
                SizeTier::Smallest,
                SizeTier::Largest,
            ]
        );
        assert!(SizeTier::Smallest < SizeTier::Small);
        assert!(SizeTier::Large < SizeTier::Largest);
    }

    #[test]
    fn label_clamps_above_ninety_nine() {
        let record = station("1", 150, AvailabilityStatus::High);
        assert_eq!(presentation(&record).label.as_deref(), Some("99+"));

        let record = station("1", 99, AvailabilityStatus::High);
        assert_eq!(presentation(&record).label.as_deref(), Some("99"));
    }

    #[test]
    fn no_label_without_bikes() {
        for status in AvailabilityStatus::ALL {
            let record = station("1", 0, status);
            assert_eq!(presentation(&record).label, None, "{status:?}");
        }
    }

    #[test]
    fn small_tiers_are_never_labelled() {
        let record = station("1", 2, AvailabilityStatus::Low);
        let marker = presentation(&record);
        assert_eq!(marker.tier, SizeTier::Small);
        assert_eq!(marker.label, None);

        let record = station("1", 12, AvailabilityStatus::Medium);
        assert_eq!(presentation(&record).label.as_deref(), Some("12"));
    }

    #[test]
    fn presentation_is_stable_for_identical_input() {
        let record = station("1", 42, AvailabilityStatus::Unknown);
        assert_eq!(presentation(&record), presentation(&record.clone()));
    }

    #[test]
    fn color_tokens_are_parsed_verbatim() {
        assert_eq!(parse_color("#22c55e"), Some(Color::Rgb(0x22, 0xc5, 0x5e)));
        assert_eq!(parse_color("#fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(parse_color("green"), None);
        assert_eq!(parse_color("#12345"), None);
    }

    #[test]
    fn derived_markers_keep_snapshot_order() {
        let mut odd = station("b", 3, AvailabilityStatus::Low);
        odd.marker_color = "not-a-color".to_string();
        let snapshot = collection(vec![station("a", 120, AvailabilityStatus::High), odd]);

        let markers = derive_markers(&snapshot);
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].station_id, "a");
        assert_eq!(markers[0].label.as_deref(), Some("99+"));
        assert_eq!(markers[1].color, Color::Gray);
    }
}
