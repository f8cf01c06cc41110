use crate::app::App;
use crate::ui::widgets::popup::{centered_box, ClearWidget};
use bixi_dashboard::domain::Basemap;
use bixi_dashboard::i18n::{tr, Phrase};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_settings(app: &App, f: &mut Frame<'_>) {
    let area = centered_box(72, 14, f.area());
    let language = app.language;

    let mut lines = vec![
        TextLine::from(Span::styled(
            tr(language, Phrase::Basemap),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
    ];

    for (index, basemap) in Basemap::ALL.iter().enumerate() {
        let active = app.settings.basemap == *basemap;
        let highlighted = app.settings_index == index;
        let marker = if active { "(•)" } else { "( )" };
        let style = if highlighted {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let description = match basemap {
            Basemap::CycleOsm => Phrase::CycleOsmDescription,
            Basemap::OpenStreetMap => Phrase::OpenStreetMapDescription,
        };

        lines.push(TextLine::from(vec![
            Span::styled(if highlighted { "> " } else { "  " }, style),
            Span::styled(format!("{marker} {}", basemap.label()), style),
        ]));
        lines.push(TextLine::from(Span::styled(
            format!("      {}", tr(language, description)),
            Style::default().fg(Color::Gray),
        )));
    }

    if let Some(highlighted) = Basemap::ALL.get(app.settings_index) {
        let [template, ..] = highlighted.tile_templates();
        lines.push(TextLine::from(""));
        lines.push(TextLine::from(Span::styled(
            format!(
                "{template} · {} {}",
                tr(language, Phrase::MaxZoom),
                highlighted.max_zoom()
            ),
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines.push(TextLine::from(""));
    lines.push(TextLine::from(Span::styled(
        tr(language, Phrase::SettingsHint),
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", tr(language, Phrase::Settings)),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    f.render_widget(ClearWidget, area);
    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}
