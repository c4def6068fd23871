pub mod api;
pub mod cli;
pub mod config;
pub mod loader;
pub mod logging;
pub mod model;
pub mod report;
pub mod sampler;
pub mod state;
pub mod tui;
pub mod ui;
