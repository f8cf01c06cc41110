use crate::app::App;
use crate::ui::widgets::popup::{centered_box, ClearWidget};
use bixi_dashboard::i18n::{tr, Phrase};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

pub fn render_search(app: &App, f: &mut Frame<'_>) {
    let area = centered_box(56, 14, f.area());
    let language = app.language;

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", tr(language, Phrase::Search)),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);

    f.render_widget(ClearWidget, area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    let cursor = if app.animation_counter.sin() > 0.0 { "▏" } else { " " };
    f.render_widget(
        Paragraph::new(TextLine::from(vec![
            Span::styled("/ ", Style::default().fg(Color::Yellow)),
            Span::styled(app.search.query.clone(), Style::default().fg(Color::White)),
            Span::styled(cursor, Style::default().fg(Color::Yellow)),
        ])),
        chunks[0],
    );

    if app.search.results.is_empty() {
        if !app.search.query.trim().is_empty() {
            f.render_widget(
                Paragraph::new(Span::styled(
                    tr(language, Phrase::NoMatches),
                    Style::default().fg(Color::DarkGray),
                )),
                chunks[1],
            );
        }
        return;
    }

    let items: Vec<ListItem<'_>> = app
        .search
        .results
        .iter()
        .map(|hit| {
            ListItem::new(TextLine::from(vec![
                Span::raw(hit.name.clone()),
                Span::styled(
                    format!("  #{}", hit.station_id),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).highlight_style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default().with_selected(Some(app.search.index));
    f.render_stateful_widget(list, chunks[1], &mut state);
}
