use std::io;
use std::sync::mpsc;
use std::time::Duration;

use ratatui::crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Position, Rect};
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;

use crate::loader::{self, LoadEvent};
use crate::state::*;
use crate::ui::{board, layout, statusbar};

pub fn run_tui(mut state: AppState) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("Cannot enable raw mode: {}", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| format!("Cannot enter alternate screen: {}", e))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("Cannot create terminal: {}", e))?;

    let (load_tx, load_rx) = mpsc::channel::<LoadEvent>();
    start_game(&mut state, &load_tx);

    let result = main_loop(&mut terminal, &mut state, &load_rx, &load_tx);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture).ok();

    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    load_rx: &mpsc::Receiver<LoadEvent>,
    load_tx: &mpsc::Sender<LoadEvent>,
) -> Result<(), String> {
    loop {
        terminal
            .draw(|f| crate::ui::draw(f, state))
            .map_err(|e| format!("Draw error: {}", e))?;

        if state.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100)).map_err(|e| format!("Poll error: {}", e))? {
            match event::read().map_err(|e| format!("Read error: {}", e))? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key(key, state, load_tx);
                }
                Event::Mouse(mouse) => {
                    let size = terminal.size().unwrap_or_default();
                    let area = Rect::new(0, 0, size.width, size.height);
                    handle_mouse(mouse, state, area, load_tx);
                }
                _ => {}
            }
        } else {
            state.ticks = state.ticks.wrapping_add(1);
        }

        while let Ok(ev) = load_rx.try_recv() {
            state.finish_load(ev);
        }
    }

    Ok(())
}

/// Requests a fresh board. Does nothing while a load is in flight.
pub fn start_game(state: &mut AppState, load_tx: &mpsc::Sender<LoadEvent>) {
    match state.begin_new_game() {
        Some(generation) => {
            tracing::info!("Starting game {}", generation);
            loader::spawn_load(state.settings.clone(), generation, load_tx.clone());
        }
        None => {
            tracing::debug!("Restart ignored, game {} still loading", state.generation);
        }
    }
}

pub fn handle_key(key: KeyEvent, state: &mut AppState, load_tx: &mpsc::Sender<LoadEvent>) {
    if state.has_dialog() {
        handle_dialog_key(key, state);
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('c') if ctrl => {
            state.should_quit = true;
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            if state.screen == Screen::Board {
                state.push_dialog(Dialog::ConfirmQuit);
            } else {
                state.should_quit = true;
            }
        }
        KeyCode::Char('?') => {
            state.push_dialog(Dialog::Help);
        }
        KeyCode::Char('r') | KeyCode::F(5) => {
            start_game(state, load_tx);
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            state.reveal_at_cursor();
        }
        KeyCode::Left | KeyCode::Char('h') => state.move_cursor(-1, 0),
        KeyCode::Right | KeyCode::Char('l') => state.move_cursor(1, 0),
        KeyCode::Up | KeyCode::Char('k') => state.move_cursor(0, -1),
        KeyCode::Down | KeyCode::Char('j') => state.move_cursor(0, 1),
        _ => {}
    }
}

fn handle_dialog_key(key: KeyEvent, state: &mut AppState) {
    match state.top_dialog() {
        Some(Dialog::ConfirmQuit) => match key.code {
            KeyCode::Enter | KeyCode::Char('y') => {
                state.pop_dialog();
                state.should_quit = true;
            }
            KeyCode::Esc | KeyCode::Char('n') => {
                state.pop_dialog();
            }
            _ => {}
        },
        Some(Dialog::Help) => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?')) {
                state.pop_dialog();
            }
        }
        None => {}
    }
}

pub fn handle_mouse(
    mouse: MouseEvent,
    state: &mut AppState,
    area: Rect,
    load_tx: &mpsc::Sender<LoadEvent>,
) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }

    // Any click closes the help overlay; the quit prompt needs the keyboard.
    if state.has_dialog() {
        if state.top_dialog() == Some(&Dialog::Help) {
            state.pop_dialog();
        }
        return;
    }

    let layout = layout::compute_layout(area);
    let pos = Position::new(mouse.column, mouse.row);

    if statusbar::button_rect(layout.statusbar).contains(pos) {
        start_game(state, load_tx);
        return;
    }

    if state.screen == Screen::Board {
        let geometry = board::board_geometry(layout.main, state.columns(), state.rows());
        if let Some((col, row)) = geometry.cell_at(mouse.column, mouse.row) {
            state.reveal(col, row);
        }
    }
}
