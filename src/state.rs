use crate::config::Settings;
use crate::loader::LoadEvent;
use crate::model::{Category, Clue};

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Loading,
    Board,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    ConfirmQuit,
    Help,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub settings: Settings,
    pub categories: Vec<Category>,
    /// (column, row) of the keyboard cursor.
    pub cursor: (usize, usize),
    pub generation: u64,
    pub dialog_stack: Vec<Dialog>,
    /// Advances once per idle poll; drives the loading spinner.
    pub ticks: u64,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            screen: Screen::Loading,
            settings,
            categories: Vec::new(),
            cursor: (0, 0),
            generation: 0,
            dialog_stack: Vec::new(),
            ticks: 0,
            should_quit: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.screen == Screen::Loading
    }

    /// Starts a new game unless one is already loading. Returns the
    /// generation the caller should load, or `None` when the button is
    /// disabled.
    pub fn begin_new_game(&mut self) -> Option<u64> {
        if self.is_loading() && self.generation > 0 {
            return None;
        }
        self.generation += 1;
        self.screen = Screen::Loading;
        self.categories.clear();
        self.cursor = (0, 0);
        Some(self.generation)
    }

    /// Applies a load result. Results from an older generation are ignored.
    pub fn finish_load(&mut self, event: LoadEvent) -> bool {
        if event.generation() != self.generation {
            tracing::debug!(
                "Dropping result of game {} (current {})",
                event.generation(),
                self.generation
            );
            return false;
        }

        match event {
            LoadEvent::Loaded { categories, .. } => {
                self.categories = categories;
                self.cursor = (0, 0);
                self.screen = Screen::Board;
            }
            LoadEvent::Failed { error, .. } => {
                self.categories.clear();
                self.screen = Screen::Failed(error);
            }
        }
        true
    }

    pub fn columns(&self) -> usize {
        self.categories.len()
    }

    pub fn rows(&self) -> usize {
        self.categories
            .iter()
            .map(|c| c.clues.len())
            .max()
            .unwrap_or(0)
    }

    pub fn clue(&self, col: usize, row: usize) -> Option<&Clue> {
        self.categories.get(col)?.clues.get(row)
    }

    /// Clicks the clue at (`col`, `row`). Returns whether its text changed.
    pub fn reveal(&mut self, col: usize, row: usize) -> bool {
        if self.screen != Screen::Board {
            return false;
        }
        let Some(clue) = self
            .categories
            .get_mut(col)
            .and_then(|c| c.clues.get_mut(row))
        else {
            return false;
        };
        self.cursor = (col, row);
        clue.advance()
    }

    pub fn reveal_at_cursor(&mut self) -> bool {
        let (col, row) = self.cursor;
        self.reveal(col, row)
    }

    pub fn move_cursor(&mut self, dcol: isize, drow: isize) {
        let cols = self.columns();
        let rows = self.rows();
        if cols == 0 || rows == 0 {
            return;
        }
        let (col, row) = self.cursor;
        self.cursor = (
            col.saturating_add_signed(dcol).min(cols - 1),
            row.saturating_add_signed(drow).min(rows - 1),
        );
    }

    pub fn revealed_counts(&self) -> (usize, usize) {
        let revealed = self.categories.iter().map(|c| c.revealed_count()).sum();
        let total = self.categories.iter().map(|c| c.clues.len()).sum();
        (revealed, total)
    }

    pub fn has_dialog(&self) -> bool {
        !self.dialog_stack.is_empty()
    }

    pub fn top_dialog(&self) -> Option<&Dialog> {
        self.dialog_stack.last()
    }

    pub fn push_dialog(&mut self, dialog: Dialog) {
        self.dialog_stack.push(dialog);
    }

    pub fn pop_dialog(&mut self) -> Option<Dialog> {
        self.dialog_stack.pop()
    }
}
