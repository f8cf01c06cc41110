use crate::app::App;
use crate::ui::widgets::popup::{centered_box, ClearWidget};
use bixi_dashboard::i18n::{tr, Phrase};
use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, WhichUse, BRAILLE_SIX};

/// Shown until the first snapshot arrives. A failed first fetch turns it into
/// an error card; later failures only raise the banner.
pub fn render_loading(app: &App, f: &mut Frame<'_>) {
    let area = centered_box(52, 7, f.area());
    let language = app.language;

    let (title, color, lines) = match app.feed.error() {
        Some(error) if !app.feed.is_fetching() => (
            tr(language, Phrase::ConnectionError),
            Color::Red,
            vec![
                TextLine::from(Span::styled(error.to_string(), Style::default().fg(Color::White))),
                TextLine::from(""),
                TextLine::from(Span::styled(
                    tr(language, Phrase::Retry),
                    Style::default().fg(Color::Yellow),
                )),
            ],
        ),
        _ => {
            let throbber = Throbber::default()
                .label(tr(language, Phrase::LoadingText))
                .style(Style::default().fg(Color::Gray))
                .throbber_style(Style::default().fg(Color::Cyan))
                .throbber_set(BRAILLE_SIX)
                .use_type(WhichUse::Spin);
            (
                tr(language, Phrase::LoadingTitle),
                Color::Cyan,
                vec![TextLine::from(""), throbber.to_line(&app.throbber)],
            )
        }
    };

    let block = Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    f.render_widget(ClearWidget, area);
    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}
