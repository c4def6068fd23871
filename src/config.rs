use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;

use crate::cli::Cli;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000/api";
pub const SETTINGS_FILE: &str = "trivia-board.yaml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub api_url: String,
    pub categories: usize,
    pub clues_per_category: usize,
    pub pool_size: usize,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            categories: 6,
            clues_per_category: 5,
            pool_size: 100,
            request_timeout_secs: 30,
        }
    }
}

impl Settings {
    pub fn from_yaml(content: &str) -> Result<Self, String> {
        serde_yaml::from_str(content).map_err(|e| format!("Invalid settings: {}", e))
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Cannot read settings file {}: {}", path.display(), e))?;
        Self::from_yaml(&content)
    }

    /// Resolves settings from the file named on the command line, falling back
    /// to the per-user settings file, then applies command line overrides.
    pub fn resolve(cli: &Cli) -> Result<Self, String> {
        let mut settings = match &cli.config {
            Some(path) => Self::from_file(Path::new(path))?,
            None => match default_settings_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        settings.apply_cli(cli);
        settings.validate()?;
        Ok(settings)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(url) = &cli.api_url {
            self.api_url = url.clone();
        }
        if let Some(n) = cli.categories {
            self.categories = n;
        }
        if let Some(n) = cli.clues {
            self.clues_per_category = n;
        }
        if let Some(n) = cli.pool_size {
            self.pool_size = n;
        }
        if let Some(secs) = cli.timeout {
            self.request_timeout_secs = secs;
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api_url.trim().is_empty() {
            return Err("api_url must not be empty".to_string());
        }
        if self.categories == 0 {
            return Err("categories must be at least 1".to_string());
        }
        if self.clues_per_category == 0 {
            return Err("clues_per_category must be at least 1".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be at least 1".to_string());
        }
        if self.pool_size < self.categories {
            return Err(format!(
                "pool_size ({}) must be at least categories ({})",
                self.pool_size, self.categories
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "trivia-board")
}

pub fn default_settings_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join(SETTINGS_FILE))
}

pub fn default_log_path() -> PathBuf {
    project_dirs()
        .map(|d| d.data_local_dir().join("trivia-board.log"))
        .unwrap_or_else(|| std::env::temp_dir().join("trivia-board.log"))
}
