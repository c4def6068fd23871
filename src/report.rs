use std::fmt::Write;

use crate::config::Settings;
use crate::loader;
use crate::model::Category;

/// Loads one board and renders it as text. A failed load is logged the same
/// way a failed TUI load is.
pub fn load_board_text(settings: &Settings) -> Result<String, String> {
    let categories = loader::load_blocking(settings)
        .inspect_err(|e| tracing::error!("Board failed to load: {}", e))?;
    Ok(format_board(&categories))
}

/// Plain-text listing of a board, one block per category.
pub fn format_board(categories: &[Category]) -> String {
    let mut out = String::new();
    for (i, category) in categories.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", category.title.to_uppercase());
        for (n, clue) in category.clues.iter().enumerate() {
            let _ = writeln!(out, "  {}. Q: {}", n + 1, clue.question);
            let _ = writeln!(out, "     A: {}", clue.answer);
        }
    }
    out
}
