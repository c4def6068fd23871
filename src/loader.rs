use std::sync::mpsc;
use std::thread;

use crate::api::{self, TriviaClient};
use crate::config::Settings;
use crate::model::Category;

#[derive(Debug)]
pub enum LoadEvent {
    Loaded {
        generation: u64,
        categories: Vec<Category>,
    },
    Failed {
        generation: u64,
        error: String,
    },
}

impl LoadEvent {
    pub fn generation(&self) -> u64 {
        match self {
            LoadEvent::Loaded { generation, .. } | LoadEvent::Failed { generation, .. } => {
                *generation
            }
        }
    }
}

/// Runs one game load on its own thread and reports the outcome on `tx`.
pub fn spawn_load(settings: Settings, generation: u64, tx: mpsc::Sender<LoadEvent>) {
    thread::spawn(move || {
        let event = match load_blocking(&settings) {
            Ok(categories) => {
                tracing::info!(
                    "Game {} loaded: {} categories",
                    generation,
                    categories.len()
                );
                LoadEvent::Loaded {
                    generation,
                    categories,
                }
            }
            Err(error) => {
                tracing::error!("Game {} failed to load: {}", generation, error);
                LoadEvent::Failed { generation, error }
            }
        };

        // The UI may have exited already.
        let _ = tx.send(event);
    });
}

/// Loads a full board on a private current-thread runtime.
pub fn load_blocking(settings: &Settings) -> Result<Vec<Category>, String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Cannot start runtime: {}", e))?;

    let client = TriviaClient::new(&settings.api_url, settings.request_timeout())
        .map_err(|e| e.to_string())?;

    runtime.block_on(async {
        let mut rng = rand::rng();
        api::load_game(&client, settings, &mut rng)
            .await
            .map_err(|e| api::error_chain(&e))
    })
}
