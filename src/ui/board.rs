use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::model::{Clue, Showing};
use crate::state::AppState;

pub const HEADER_HEIGHT: u16 = 3;

/// Screen rectangles of the board: one header cell per category and one
/// body cell per (row, category).
#[derive(Debug, Clone, PartialEq)]
pub struct BoardGeometry {
    pub header: Vec<Rect>,
    /// Indexed `cells[row][col]`.
    pub cells: Vec<Vec<Rect>>,
}

impl BoardGeometry {
    /// Cell under a mouse position, as (column, row).
    pub fn cell_at(&self, x: u16, y: u16) -> Option<(usize, usize)> {
        let pos = Position::new(x, y);
        self.cells.iter().enumerate().find_map(|(row, band)| {
            band.iter()
                .position(|r| r.contains(pos))
                .map(|col| (col, row))
        })
    }
}

pub fn board_geometry(area: Rect, columns: usize, rows: usize) -> BoardGeometry {
    if columns == 0 {
        return BoardGeometry {
            header: Vec::new(),
            cells: Vec::new(),
        };
    }

    let mut bands = vec![Constraint::Length(HEADER_HEIGHT)];
    bands.extend((0..rows).map(|_| Constraint::Ratio(1, rows as u32)));
    let bands = Layout::default()
        .direction(Direction::Vertical)
        .constraints(bands)
        .split(area);

    let split_columns = |band: Rect| -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints((0..columns).map(|_| Constraint::Ratio(1, columns as u32)))
            .split(band)
            .to_vec()
    };

    BoardGeometry {
        header: split_columns(bands[0]),
        cells: bands[1..].iter().map(|band| split_columns(*band)).collect(),
    }
}

pub fn draw_board(f: &mut Frame, area: Rect, state: &AppState) {
    let geometry = board_geometry(area, state.columns(), state.rows());

    for (category, rect) in state.categories.iter().zip(&geometry.header) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue));
        let widget = Paragraph::new(category.title.to_uppercase())
            .block(block)
            .style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(widget, *rect);
    }

    for (row, band) in geometry.cells.iter().enumerate() {
        for (col, rect) in band.iter().enumerate() {
            let Some(clue) = state.clue(col, row) else {
                continue;
            };
            draw_cell(f, *rect, clue, state.cursor == (col, row));
        }
    }
}

fn draw_cell(f: &mut Frame, area: Rect, clue: &Clue, selected: bool) {
    let text_style = match clue.showing {
        Showing::Hidden => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        Showing::Question => Style::default().fg(Color::White),
        Showing::Answer => Style::default().fg(Color::Green),
    };

    let border_style = if selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let widget = Paragraph::new(clue.display_text())
        .block(block)
        .style(text_style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(widget, area);
}
