use crate::app::App;
use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use bixi_dashboard::i18n::{tr, Phrase};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

enum KeyLabel {
    Literal(&'static str),
    Phrase(Phrase),
}

const SHORTCUTS: [(KeyLabel, Phrase); 14] = [
    (KeyLabel::Phrase(Phrase::KeyClick), Phrase::OpenStation),
    (KeyLabel::Phrase(Phrase::KeyClickMap), Phrase::ClosePanel),
    (KeyLabel::Phrase(Phrase::KeyDrag), Phrase::PanMap),
    (KeyLabel::Phrase(Phrase::KeyScroll), Phrase::ZoomInOut),
    (KeyLabel::Literal("←↑↓→ hjkl"), Phrase::PanMap),
    (KeyLabel::Literal("+ / -"), Phrase::ZoomInOut),
    (KeyLabel::Literal("/"), Phrase::SearchByName),
    (KeyLabel::Literal("c / Esc"), Phrase::ClosePanel),
    (KeyLabel::Literal("r"), Phrase::RefreshNow),
    (KeyLabel::Literal("s"), Phrase::SettingsBasemap),
    (KeyLabel::Literal("b"), Phrase::CycleBasemap),
    (KeyLabel::Literal("a"), Phrase::About),
    (KeyLabel::Literal("L"), Phrase::SwitchLanguage),
    (KeyLabel::Literal("q"), Phrase::Quit),
];

pub fn render_help(app: &App, f: &mut Frame<'_>) {
    let popup_area = centered_rect(70, 70, f.area());
    f.render_widget(ClearWidget, popup_area);

    let help_block = Block::default()
        .title(format!(" {} ", tr(app.language, Phrase::Help)))
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let mut lines = vec![
        TextLine::from(Span::styled(
            tr(app.language, Phrase::Title),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
    ];
    lines.extend(SHORTCUTS.iter().map(|(key, description)| {
        let key = match key {
            KeyLabel::Literal(text) => *text,
            KeyLabel::Phrase(phrase) => tr(app.language, *phrase),
        };
        TextLine::from(vec![
            Span::styled(
                format!("  {key:<12}"),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(tr(app.language, *description)),
        ])
    }));

    let help_paragraph = Paragraph::new(Text::from(lines))
        .block(help_block)
        .wrap(Wrap { trim: false });
    f.render_widget(help_paragraph, popup_area);

    let hint = Paragraph::new(TextLine::from(Span::styled(
        tr(app.language, Phrase::HelpCloseHint),
        Style::default().fg(Color::Gray),
    )))
    .alignment(Alignment::Center);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };
    f.render_widget(hint, hint_area);
}
