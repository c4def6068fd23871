use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::state::AppState;

pub const FETCH_LABEL: &str = "[ Fetch Data ]";
pub const LOADING_LABEL: &str = "[ Loading... ]";

pub fn button_label(state: &AppState) -> &'static str {
    if state.is_loading() {
        LOADING_LABEL
    } else {
        FETCH_LABEL
    }
}

/// Click target of the restart button, at the left edge of the status bar.
pub fn button_rect(area: Rect) -> Rect {
    let width = (FETCH_LABEL.len() as u16).min(area.width.saturating_sub(1));
    Rect::new(area.x + 1, area.y, width, area.height.min(1))
}

pub fn draw_statusbar(f: &mut Frame, area: Rect, state: &AppState) {
    let button_style = if state.is_loading() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    };

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(button_label(state), button_style),
    ];

    if !state.categories.is_empty() {
        let (revealed, total) = state.revealed_counts();
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            format!("{}/{} revealed", revealed, total),
            Style::default().fg(Color::Green),
        ));
    }

    spans.push(Span::raw("   "));
    spans.push(Span::styled("[?] help", Style::default().fg(Color::DarkGray)));

    let widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Rgb(30, 30, 30)));
    f.render_widget(widget, area);
}
