pub mod board;
pub mod dialog;
pub mod keybar;
pub mod layout;
pub mod loading;
pub mod statusbar;
pub mod titlebar;

use ratatui::Frame;

use crate::state::{AppState, Screen};

pub fn draw(f: &mut Frame, state: &AppState) {
    let area = f.area();
    let layout = layout::compute_layout(area);

    titlebar::draw_titlebar(f, layout.titlebar, state);

    match &state.screen {
        Screen::Loading => {
            loading::draw_loading(f, layout.main, state);
        }
        Screen::Board => {
            board::draw_board(f, layout.main, state);
        }
        Screen::Failed(error) => {
            loading::draw_failed(f, layout.main, error);
        }
    }

    statusbar::draw_statusbar(f, layout.statusbar, state);
    keybar::draw_keybar(f, layout.keybar, state);

    // Draw dialog overlay if any
    if state.has_dialog() {
        dialog::draw_dialog(f, area, state);
    }
}
