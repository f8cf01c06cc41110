use crate::app::state::{CELL_HEIGHT_PX, CELL_WIDTH_PX};
use crate::app::App;
use crate::ui::widgets::popup::ClearWidget;
use bixi_dashboard::domain::Language;
use bixi_dashboard::i18n::{status_badge, tr, Phrase};
use bixi_dashboard::marker::parse_color;
use bixi_dashboard::station::StationRecord;
use bixi_dashboard::viewport::{ScreenPoint, STATION_PANEL};
use chrono::Local;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

/// Cell rectangle of the panel for a marker at `anchor`, clipped to `map`.
pub fn panel_rect(anchor: ScreenPoint, map: Rect) -> Option<Rect> {
    let width = (STATION_PANEL.width / CELL_WIDTH_PX).round() as i32;
    let height = (STATION_PANEL.height / CELL_HEIGHT_PX).round() as i32;
    let gap = (STATION_PANEL.offset / CELL_HEIGHT_PX).ceil() as i32;

    let anchor_col = i32::from(map.x) + (anchor.x / CELL_WIDTH_PX).floor() as i32;
    let anchor_row = i32::from(map.y) + (anchor.y / CELL_HEIGHT_PX).floor() as i32;

    let left = (anchor_col - width / 2).max(i32::from(map.x));
    let top = (anchor_row - gap - height).max(i32::from(map.y));
    let right = (anchor_col - width / 2 + width).min(i32::from(map.x + map.width));
    let bottom = (anchor_row - gap).min(i32::from(map.y + map.height));

    if right <= left || bottom <= top {
        return None;
    }

    Some(Rect {
        x: u16::try_from(left).ok()?,
        y: u16::try_from(top).ok()?,
        width: u16::try_from(right - left).ok()?,
        height: u16::try_from(bottom - top).ok()?,
    })
}

pub fn render_station_panel(app: &App, f: &mut Frame<'_>, map: Rect) {
    let Some(station) = app.selected_station() else {
        return;
    };
    let Some(anchor) = app.panel_anchor() else {
        return;
    };
    let Some(area) = panel_rect(anchor, map) else {
        return;
    };

    let accent = parse_color(&station.marker_color).unwrap_or(Color::Gray);
    let title = if station.name.is_empty() {
        station.station_id.clone()
    } else {
        station.name.clone()
    };

    let block = Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Span::styled(
            format!(" [c] {} ", tr(app.language, Phrase::Close)),
            Style::default().fg(Color::DarkGray),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));

    let paragraph = Paragraph::new(Text::from(panel_lines(station, app.language, accent)))
        .block(block)
        .wrap(Wrap { trim: true });

    f.render_widget(ClearWidget, area);
    f.render_widget(paragraph, area);
}

fn panel_lines(station: &StationRecord, language: Language, accent: Color) -> Vec<TextLine<'static>> {
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::White);
    let strong = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        TextLine::from(vec![
            Span::styled(format!("{}: ", tr(language, Phrase::StationId)), label),
            Span::styled(display_id(station).to_string(), value),
        ]),
        TextLine::from(Span::styled(
            status_badge(language, station.availability_status),
            Style::default().fg(Color::Black).bg(accent),
        )),
        TextLine::from(""),
        TextLine::from(vec![
            Span::styled(format!("{}: ", tr(language, Phrase::TotalBikes)), label),
            Span::styled(station.bikes_available.to_string(), strong),
        ]),
        TextLine::from(vec![
            Span::styled(format!("  {}: ", tr(language, Phrase::Classic)), label),
            Span::styled(station.classic_bikes.to_string(), value),
            Span::styled(format!("   {}: ", tr(language, Phrase::Ebikes)), label),
            Span::styled(station.ebikes_available.to_string(), value),
        ]),
        TextLine::from(vec![
            Span::styled(format!("{}: ", tr(language, Phrase::Docks)), label),
            Span::styled(station.docks_available.to_string(), value),
        ]),
        TextLine::from(vec![
            Span::styled(format!("{}: ", tr(language, Phrase::StationCapacity)), label),
            Span::styled(
                format!("{} ({}%)", station.capacity, station.capacity_percent()),
                value,
            ),
        ]),
        TextLine::from(fill_bar(station.capacity_percent(), accent)),
        TextLine::from(""),
    ];

    lines.push(flag_line(
        station.is_installed,
        tr(language, Phrase::Installed),
        tr(language, Phrase::NotInstalled),
    ));
    lines.push(flag_line(
        station.is_renting,
        tr(language, Phrase::Renting),
        tr(language, Phrase::NotRenting),
    ));
    lines.push(flag_line(
        station.is_returning,
        tr(language, Phrase::Returning),
        tr(language, Phrase::NoReturns),
    ));
    if station.is_charging {
        lines.push(TextLine::from(Span::styled(
            format!("⚡ {}", tr(language, Phrase::ChargingStation)),
            Style::default().fg(Color::Yellow),
        )));
    }

    let reported = station.last_reported_at().map_or_else(
        || tr(language, Phrase::Unknown).to_string(),
        |reported| reported.with_timezone(&Local).format("%H:%M:%S").to_string(),
    );
    lines.push(TextLine::from(""));
    lines.push(TextLine::from(vec![
        Span::styled(format!("{}: ", tr(language, Phrase::LastReported)), label),
        Span::styled(reported, value),
    ]));

    lines
}

/// Rider-facing station number, falling back to the feed id.
fn display_id(station: &StationRecord) -> &str {
    if station.short_name.is_empty() {
        &station.station_id
    } else {
        &station.short_name
    }
}

fn flag_line(on: bool, yes: &'static str, no: &'static str) -> TextLine<'static> {
    if on {
        TextLine::from(Span::styled(format!("✓ {yes}"), Style::default().fg(Color::Green)))
    } else {
        TextLine::from(Span::styled(format!("✗ {no}"), Style::default().fg(Color::Red)))
    }
}

fn fill_bar(percent: u32, color: Color) -> Vec<Span<'static>> {
    const WIDTH: usize = 20;
    let filled = (percent.min(100) as usize * WIDTH).div_ceil(100);
    vec![
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled("░".repeat(WIDTH - filled), Style::default().fg(Color::DarkGray)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_sits_above_anchor() {
        let map = Rect::new(0, 0, 120, 50);
        let rect = panel_rect(ScreenPoint::new(480.0, 600.0), map).unwrap();
        assert_eq!(rect.width, 38);
        assert_eq!(rect.height, 21);
        assert_eq!(rect.y + rect.height, 36);
        assert_eq!(rect.x, 60 - 19);
    }

    #[test]
    fn panel_is_clipped_to_map() {
        let map = Rect::new(1, 5, 60, 30);
        let rect = panel_rect(ScreenPoint::new(8.0, 100.0), map).unwrap();
        assert_eq!(rect.x, 1);
        assert_eq!(rect.y, 5);
        assert!(rect.right() <= map.right());
        assert!(panel_rect(ScreenPoint::new(8.0, 4.0), map).is_none());
    }

    fn record(short_name: &str) -> StationRecord {
        serde_json::from_value(serde_json::json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [-73.57, 45.50] },
            "properties": {
                "station_id": "1042",
                "short_name": short_name,
                "capacity": 20,
                "bikes_available": 5,
                "docks_available": 15,
                "availability_status": "medium",
                "marker_color": "#eab308"
            }
        }))
        .unwrap()
    }

    #[test]
    fn id_line_prefers_short_name() {
        assert_eq!(display_id(&record("")), "1042");
        assert_eq!(display_id(&record("6001")), "6001");
    }

    #[test]
    fn missing_report_time_reads_unknown() {
        let station = record("6001");
        let lines = panel_lines(&station, Language::Fr, Color::Gray);
        let last = lines.last().map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        });
        assert_eq!(last.as_deref(), Some("Dernier signalement: Inconnu"));
    }

    #[test]
    fn fill_bar_rounds_up_partial_cells() {
        let spans = fill_bar(3, Color::Red);
        assert_eq!(spans[0].content.chars().count(), 1);
        assert_eq!(spans[1].content.chars().count(), 19);
    }
}
