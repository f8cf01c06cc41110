use crate::app::App;
use crate::ui::widgets::popup::ClearWidget;
use bixi_dashboard::i18n::{status_label, tr, Phrase};
use bixi_dashboard::marker::legend;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const LEGEND_WIDTH: u16 = 24;
const LEGEND_HEIGHT: u16 = 6;

/// Availability key in the bottom-left corner of the map.
pub fn render_legend(app: &App, f: &mut Frame<'_>, map: Rect) {
    if map.width < LEGEND_WIDTH + 2 || map.height < LEGEND_HEIGHT + 2 {
        return;
    }

    let area = Rect {
        x: map.x + 1,
        y: map.y + map.height - LEGEND_HEIGHT - 1,
        width: LEGEND_WIDTH,
        height: LEGEND_HEIGHT,
    };

    let lines: Vec<TextLine<'_>> = legend()
        .into_iter()
        .map(|row| {
            TextLine::from(vec![
                Span::styled("● ", Style::default().fg(row.color)),
                Span::styled(
                    status_label(app.language, row.status),
                    Style::default().fg(Color::White),
                ),
                Span::styled(format!(" {}", row.range), Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    let block = Block::default()
        .title(Span::styled(
            tr(app.language, Phrase::Availability),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    f.render_widget(ClearWidget, area);
    f.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}
