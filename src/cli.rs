use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "trivia-board", version, about = "Terminal trivia board")]
pub struct Cli {
    /// Settings file [default: <config dir>/trivia-board.yaml, if present]
    #[arg(long, value_name = "path")]
    pub config: Option<String>,

    /// Base URL of the clue API
    #[arg(long, value_name = "url", env = "TRIVIA_API_URL")]
    pub api_url: Option<String>,

    /// Number of categories on the board
    #[arg(long, value_name = "n")]
    pub categories: Option<usize>,

    /// Number of clues per category
    #[arg(long, value_name = "n")]
    pub clues: Option<usize>,

    /// How many category ids to request before sampling
    #[arg(long, value_name = "n")]
    pub pool_size: Option<usize>,

    /// Request timeout in seconds
    #[arg(long, value_name = "secs")]
    pub timeout: Option<u64>,

    /// Log file [default: <data dir>/trivia-board.log]
    #[arg(long, value_name = "path")]
    pub log_file: Option<String>,

    /// Load one board, print it and exit without entering the TUI
    #[arg(long)]
    pub print: bool,
}
