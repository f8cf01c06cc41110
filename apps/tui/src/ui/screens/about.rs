use crate::app::App;
use crate::ui::widgets::popup::{centered_box, ClearWidget};
use bixi_dashboard::i18n::{tr, Phrase};
use bixi_dashboard::source::stations_url;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_about(app: &App, f: &mut Frame<'_>) {
    let area = centered_box(64, 12, f.area());
    let language = app.language;
    let label = Style::default().fg(Color::Gray);

    let lines = vec![
        TextLine::from(tr(language, Phrase::AboutText)),
        TextLine::from(""),
        TextLine::from(vec![
            Span::styled(format!("{}: ", tr(language, Phrase::DataSource)), label),
            Span::raw(stations_url(&app.api_base)),
        ]),
        TextLine::from(vec![
            Span::styled(format!("{}: ", tr(language, Phrase::Attribution)), label),
            Span::raw(app.settings.basemap.attribution()),
        ]),
        TextLine::from(vec![
            Span::styled(format!("{}: ", tr(language, Phrase::Version)), label),
            Span::raw(env!("CARGO_PKG_VERSION")),
        ]),
    ];

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", tr(language, Phrase::About)),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Span::styled(
            format!(" Esc {} ", tr(language, Phrase::Close)),
            Style::default().fg(Color::DarkGray),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    f.render_widget(ClearWidget, area);
    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}
