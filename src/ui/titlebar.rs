use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::state::AppState;

pub fn draw_titlebar(f: &mut Frame, area: Rect, state: &AppState) {
    let title_span = Span::styled(
        "[ Trivia Board ]",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let mut spans = vec![title_span];
    if state.generation > 1 {
        spans.push(Span::styled(
            format!("  game {}", state.generation),
            Style::default().fg(Color::Rgb(200, 200, 120)),
        ));
    }

    let widget = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}
