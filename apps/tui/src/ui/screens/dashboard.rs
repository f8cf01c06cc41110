use crate::app::state::StatusNote;
use crate::app::App;
use crate::ui::widgets::legend::render_legend;
use crate::ui::widgets::map::render_map;
use crate::ui::widgets::station_panel::render_station_panel;
use bixi_dashboard::domain::Language;
use bixi_dashboard::i18n::{tr, Phrase};
use chrono::Local;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use std::time::Instant;
use throbber_widgets_tui::{Throbber, WhichUse, BRAILLE_SIX};

pub struct DashboardLayout {
    pub header: Rect,
    pub map_frame: Rect,
    pub map: Rect,
    pub footer: Rect,
}

pub fn dashboard_layout(area: Rect) -> DashboardLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header with stats
            Constraint::Min(6),    // Map
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(area);

    let map_frame = chunks[1];
    DashboardLayout {
        header: chunks[0],
        map_frame,
        map: map_block().inner(map_frame),
        footer: chunks[2],
    }
}

/// Cell area the map canvas occupies for a terminal of `area`.
pub fn map_area(area: Rect) -> Rect {
    dashboard_layout(area).map
}

fn map_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

pub fn render_dashboard(app: &App, f: &mut Frame<'_>) {
    let layout = dashboard_layout(f.area());

    render_header(app, f, layout.header);

    let basemap = app.settings.basemap;
    let frame = map_block()
        .title(Span::styled(
            format!(" {} ", basemap.label()),
            Style::default().fg(Color::Cyan),
        ))
        .title_bottom(
            TextLine::from(Span::styled(
                format!(" {} ", basemap.attribution()),
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Right),
        );
    f.render_widget(frame, layout.map_frame);

    render_map(app, f, layout.map);
    render_legend(app, f, layout.map);
    render_station_panel(app, f, layout.map);

    if app.feed.has_error() && app.feed.snapshot().is_some() {
        render_error_banner(app, f, layout.map);
    }

    render_footer(app, f, layout.footer);
}

fn render_header(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(inner);

    let title = Paragraph::new(Text::from(vec![
        TextLine::from(Span::styled(
            tr(app.language, Phrase::Title),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(Span::styled(
            tr(app.language, Phrase::Subtitle),
            Style::default().fg(Color::Gray),
        )),
    ]));
    f.render_widget(title, columns[0]);

    let right = Paragraph::new(Text::from(vec![
        stats_line(app),
        status_line(app, Instant::now()),
    ]))
    .alignment(Alignment::Right);
    f.render_widget(right, columns[1]);
}

fn stats_line(app: &App) -> TextLine<'static> {
    let Some(snapshot) = app.feed.snapshot() else {
        return TextLine::from("");
    };

    let stats = &snapshot.metadata.stats;
    let label = Style::default().fg(Color::Gray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let mut spans = Vec::new();
    for (phrase, count) in [
        (Phrase::Bikes, stats.total_bikes),
        (Phrase::Ebikes, stats.total_ebikes),
        (Phrase::Docks, stats.total_docks),
        (Phrase::Stations, stats.station_count),
    ] {
        spans.push(Span::styled(format!("{} ", tr(app.language, phrase)), label));
        spans.push(Span::styled(format!("{count}  "), value));
    }
    TextLine::from(spans)
}

fn status_line(app: &App, now: Instant) -> TextLine<'static> {
    let language = app.language;

    if app.feed.has_error() {
        return TextLine::from(Span::styled(
            format!("● {}", tr(language, Phrase::ConnectionError)),
            Style::default().fg(Color::Red),
        ));
    }

    if app.feed.is_fetching() {
        let throbber = Throbber::default()
            .label(tr(language, Phrase::Updating))
            .style(Style::default().fg(Color::Yellow))
            .throbber_set(BRAILLE_SIX)
            .use_type(WhichUse::Spin);
        return throbber.to_line(&app.throbber);
    }

    let Some(snapshot) = app.feed.snapshot() else {
        return TextLine::from(Span::styled(
            tr(language, Phrase::Connecting),
            Style::default().fg(Color::Gray),
        ));
    };

    let (marker, color) = if app.feed.is_fresh(now) {
        (tr(language, Phrase::Live), Color::Green)
    } else {
        (tr(language, Phrase::Stale), Color::Yellow)
    };

    let mut spans = vec![Span::styled(format!("● {marker}"), Style::default().fg(color))];
    if let Some(updated) = snapshot.last_updated_at() {
        spans.push(Span::styled(
            format!(
                "  {} {}",
                tr(language, Phrase::Updated),
                updated.with_timezone(&Local).format("%H:%M:%S")
            ),
            Style::default().fg(Color::Gray),
        ));
    }
    TextLine::from(spans)
}

fn render_error_banner(app: &App, f: &mut Frame<'_>, map: Rect) {
    if map.height == 0 {
        return;
    }
    let banner = Rect {
        height: 1,
        ..map
    };
    let paragraph = Paragraph::new(TextLine::from(Span::styled(
        format!(
            " {} · {} ",
            tr(app.language, Phrase::ErrorText),
            tr(app.language, Phrase::Retry)
        ),
        Style::default().fg(Color::White).bg(Color::Red),
    )))
    .alignment(Alignment::Center);
    f.render_widget(paragraph, banner);
}

fn render_footer(app: &App, f: &mut Frame<'_>, area: Rect) {
    let key = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let text = Style::default().fg(Color::Gray);

    let mut spans = Vec::new();
    for (shortcut, description) in [
        ("q", Phrase::Quit),
        ("←↑↓→", Phrase::Pan),
        ("+/-", Phrase::Zoom),
        ("/", Phrase::Find),
        ("r", Phrase::Refresh),
        ("s", Phrase::Settings),
        ("L", Phrase::Language),
        ("?", Phrase::Help),
    ] {
        spans.push(Span::styled(shortcut, key));
        spans.push(Span::styled(
            format!(" {}  ", tr(app.language, description)),
            text,
        ));
    }

    if let Some(note) = app.status {
        spans.push(Span::styled(
            format!("| {}", status_note(app.language, note)),
            Style::default().fg(Color::Cyan),
        ));
    }

    f.render_widget(Paragraph::new(TextLine::from(spans)), area);
}

fn status_note(language: Language, note: StatusNote) -> String {
    match note {
        StatusNote::BasemapChanged(basemap) => {
            format!("{}: {}", tr(language, Phrase::Basemap), basemap.label())
        }
        StatusNote::FeedNotRunning => tr(language, Phrase::FeedNotRunning).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bixi_dashboard::domain::Basemap;

    #[test]
    fn status_notes_follow_language() {
        let note = StatusNote::BasemapChanged(Basemap::OpenStreetMap);
        assert!(status_note(Language::Fr, note).starts_with("Fond de carte: "));
        assert_eq!(
            status_note(Language::En, StatusNote::FeedNotRunning),
            "Station feed is not running"
        );
    }

    #[test]
    fn map_sits_between_header_and_footer() {
        let layout = dashboard_layout(Rect::new(0, 0, 100, 40));
        assert_eq!(layout.header.height, 4);
        assert_eq!(layout.footer.y, 39);
        assert_eq!(layout.map, Rect::new(1, 5, 98, 33));
    }
}
