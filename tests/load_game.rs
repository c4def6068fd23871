use std::collections::{HashMap, HashSet};
use std::fs;
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Barrier;

use trivia_board::api::{self, ApiError, TriviaSource};
use trivia_board::config::Settings;
use trivia_board::loader::LoadEvent;
use trivia_board::model::{CategoryDetails, CategoryId, ClueData, Showing};
use trivia_board::state::{AppState, Screen};

struct FakeSource {
    details: HashMap<CategoryId, CategoryDetails>,
    failing: HashSet<CategoryId>,
    /// When set, every category request waits here before answering.
    barrier: Option<Barrier>,
}

impl FakeSource {
    fn with_categories(count: u64, clues: usize) -> Self {
        let details = (1..=count)
            .map(|id| {
                let clues = (0..clues)
                    .map(|n| ClueData {
                        question: Some(format!("question {}.{}", id, n)),
                        answer: Some(format!("answer {}.{}", id, n)),
                    })
                    .collect();
                (
                    id,
                    CategoryDetails {
                        title: format!("category {}", id),
                        clues,
                    },
                )
            })
            .collect();

        Self {
            details,
            failing: HashSet::new(),
            barrier: None,
        }
    }
}

#[async_trait(?Send)]
impl TriviaSource for FakeSource {
    async fn category_ids(&self, count: usize) -> Result<Vec<CategoryId>, ApiError> {
        let mut ids: Vec<CategoryId> = self.details.keys().copied().collect();
        ids.sort();
        ids.truncate(count);
        Ok(ids)
    }

    async fn category(&self, id: CategoryId) -> Result<CategoryDetails, ApiError> {
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        if self.failing.contains(&id) {
            return Err(ApiError::Status {
                url: format!("fake://categories/{}/clues", id),
                status: 500,
            });
        }
        self.details.get(&id).cloned().ok_or(ApiError::Status {
            url: format!("fake://categories/{}/clues", id),
            status: 404,
        })
    }
}

fn settings(categories: usize, clues: usize, pool: usize) -> Settings {
    Settings {
        categories,
        clues_per_category: clues,
        pool_size: pool,
        ..Settings::default()
    }
}

#[tokio::test]
async fn test_full_board_has_configured_shape() {
    let source = FakeSource::with_categories(50, 8);
    let mut rng = StdRng::seed_from_u64(3);

    let categories = api::load_game(&source, &settings(6, 5, 50), &mut rng)
        .await
        .unwrap();

    assert_eq!(categories.len(), 6);
    for category in &categories {
        assert_eq!(category.clues.len(), 5);
        assert!(category.clues.iter().all(|c| c.showing == Showing::Hidden));
    }

    let titles: HashSet<_> = categories.iter().map(|c| c.title.clone()).collect();
    assert_eq!(titles.len(), 6);
}

#[tokio::test]
async fn test_category_requests_are_in_flight_together() {
    // Each request blocks until all six have started, so a loader that
    // awaited them one by one would never finish.
    let mut source = FakeSource::with_categories(6, 5);
    source.barrier = Some(Barrier::new(6));
    let mut rng = StdRng::seed_from_u64(5);

    let loaded = tokio::time::timeout(
        Duration::from_secs(5),
        api::load_game(&source, &settings(6, 5, 6), &mut rng),
    )
    .await
    .expect("category requests did not overlap");

    assert_eq!(loaded.unwrap().len(), 6);
}

#[test]
fn test_error_chain_does_not_repeat_sources() {
    let err = ApiError::Category {
        id: 3,
        source: Box::new(ApiError::Status {
            url: "fake://categories/3/clues".to_string(),
            status: 500,
        }),
    };

    let msg = api::error_chain(&err);
    assert_eq!(msg, "category 3: fake://categories/3/clues returned status 500");
    assert_eq!(msg.matches("returned status 500").count(), 1);
}

#[tokio::test]
async fn test_one_failing_category_fails_the_game() {
    let mut source = FakeSource::with_categories(4, 5);
    source.failing.insert(3);
    let mut rng = StdRng::seed_from_u64(0);

    let err = api::load_game(&source, &settings(4, 5, 4), &mut rng)
        .await
        .unwrap_err();

    match err {
        ApiError::Category { id, source } => {
            assert_eq!(id, 3);
            assert!(matches!(*source, ApiError::Status { status: 500, .. }));
        }
        other => panic!("Expected Category error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_short_category_is_a_shape_error() {
    let source = FakeSource::with_categories(2, 3);
    let mut rng = StdRng::seed_from_u64(0);

    let err = api::load_category(&source, 1, 5).await.unwrap_err();
    match err {
        ApiError::Category { id, source } => {
            assert_eq!(id, 1);
            assert!(matches!(
                *source,
                ApiError::NotEnoughClues { wanted: 5, found: 3 }
            ));
        }
        other => panic!("Expected Category error, got {:?}", other),
    }

    assert!(api::load_game(&source, &settings(2, 5, 2), &mut rng)
        .await
        .is_err());
}

#[tokio::test]
async fn test_pool_smaller_than_board() {
    let source = FakeSource::with_categories(3, 5);
    let mut rng = StdRng::seed_from_u64(0);

    let err = api::load_game(&source, &settings(6, 5, 100), &mut rng)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InsufficientCategories { .. }));
}

#[test]
fn test_category_response_is_cleaned() {
    let content = fs::read_to_string("fixtures/category.json").expect("Cannot read fixture");
    let details: CategoryDetails = serde_json::from_str(&content).unwrap();
    let category = trivia_board::model::Category::from_details(details, 3).unwrap();

    assert_eq!(category.title, "literary characters");
    assert_eq!(category.clues.len(), 3);
    assert_eq!(category.clues[0].question, "He called himself \"Ishmael\"");
    assert_eq!(category.clues[0].answer, "the narrator of Moby Dick");
    assert_eq!(category.clues[1].question, "Hester Prynne wore this letter");
    // Blank question skipped
    assert_eq!(category.clues[2].answer, "Daisy Buchanan");
}

#[test]
fn test_failed_load_shows_no_board() {
    let mut state = AppState::new(Settings::default());
    let generation = state.begin_new_game().unwrap();

    state.finish_load(LoadEvent::Failed {
        generation,
        error: "category 3: fake://categories/3/clues returned status 500".to_string(),
    });

    assert!(state.categories.is_empty());
    assert!(matches!(state.screen, Screen::Failed(_)));
    assert!(!state.reveal(0, 0));

    // Retry is allowed after a failure
    assert_eq!(state.begin_new_game(), Some(generation + 1));
}

#[test]
fn test_restart_ignored_while_loading() {
    let mut state = AppState::new(Settings::default());
    let generation = state.begin_new_game().unwrap();
    assert_eq!(state.begin_new_game(), None);
    assert_eq!(state.generation, generation);
}

#[test]
fn test_stale_result_is_dropped() {
    let mut state = AppState::new(Settings::default());
    let first = state.begin_new_game().unwrap();
    state.finish_load(LoadEvent::Failed {
        generation: first,
        error: "timeout".to_string(),
    });
    let second = state.begin_new_game().unwrap();

    let source = FakeSource::with_categories(1, 1);
    let stale = LoadEvent::Loaded {
        generation: first,
        categories: vec![trivia_board::model::Category::from_details(
            source.details[&1].clone(),
            1,
        )
        .unwrap()],
    };

    assert!(!state.finish_load(stale));
    assert_eq!(state.generation, second);
    assert!(state.is_loading());
}

#[test]
fn test_request_urls() {
    let client = api::TriviaClient::new(
        "https://trivia.example.test/api/",
        std::time::Duration::from_secs(5),
    )
    .unwrap();

    assert_eq!(
        client.categories_url(100),
        "https://trivia.example.test/api/categories?count=100"
    );
    assert_eq!(
        client.clues_url(11496),
        "https://trivia.example.test/api/categories/11496/clues"
    );
}
