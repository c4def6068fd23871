use std::time::Duration;

use async_trait::async_trait;
use futures::future::try_join_all;
use rand::Rng;
use thiserror::Error;

use crate::config::Settings;
use crate::model::{Category, CategoryDetails, CategoryId, CategoryRef};
use crate::sampler;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("unexpected response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("category has {found} usable clues, need {wanted}")]
    NotEnoughClues { wanted: usize, found: usize },

    #[error("only {available} distinct categories available, need {wanted}")]
    InsufficientCategories { wanted: usize, available: usize },

    #[error("category {id}: {source}")]
    Category {
        id: CategoryId,
        #[source]
        source: Box<ApiError>,
    },
}

/// Where category data comes from.
#[async_trait(?Send)]
pub trait TriviaSource {
    async fn category_ids(&self, count: usize) -> Result<Vec<CategoryId>, ApiError>;

    async fn category(&self, id: CategoryId) -> Result<CategoryDetails, ApiError>;
}

/// HTTP client for the remote clue API.
#[derive(Debug, Clone)]
pub struct TriviaClient {
    http: reqwest::Client,
    base_url: String,
}

impl TriviaClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ApiError::Http {
                url: base_url.to_string(),
                source,
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn categories_url(&self, count: usize) -> String {
        format!("{}/categories?count={}", self.base_url, count)
    }

    pub fn clues_url(&self, id: CategoryId) -> String {
        format!("{}/categories/{}/clues", self.base_url, id)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ApiError::Http {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(ApiError::Status { url, status });
        }

        response.json::<T>().await.map_err(|source| {
            if source.is_decode() {
                ApiError::Decode {
                    url,
                    message: source.to_string(),
                }
            } else {
                ApiError::Http { url, source }
            }
        })
    }
}

#[async_trait(?Send)]
impl TriviaSource for TriviaClient {
    async fn category_ids(&self, count: usize) -> Result<Vec<CategoryId>, ApiError> {
        let refs: Vec<CategoryRef> = self.get_json(self.categories_url(count)).await?;
        Ok(refs.into_iter().map(|r| r.id).collect())
    }

    async fn category(&self, id: CategoryId) -> Result<CategoryDetails, ApiError> {
        self.get_json(self.clues_url(id)).await
    }
}

/// Renders an error and its sources as one line, skipping sources whose text
/// is already part of the message.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !msg.contains(&text) {
            msg.push_str(": ");
            msg.push_str(&text);
        }
        source = inner.source();
    }
    msg
}

/// Fetches one category and trims it to `clue_count` clues.
pub async fn load_category<S: TriviaSource + ?Sized>(
    source: &S,
    id: CategoryId,
    clue_count: usize,
) -> Result<Category, ApiError> {
    let wrap = move |e: ApiError| ApiError::Category {
        id,
        source: Box::new(e),
    };

    let details = source.category(id).await.map_err(wrap)?;
    let category = Category::from_details(details, clue_count).map_err(wrap)?;

    tracing::debug!("Loaded category {} ({})", id, category.title);
    Ok(category)
}

/// Samples categories and fetches them all concurrently. Any single failure
/// fails the whole game; no partial board is ever returned.
pub async fn load_game<S, R>(
    source: &S,
    settings: &Settings,
    rng: &mut R,
) -> Result<Vec<Category>, ApiError>
where
    S: TriviaSource + ?Sized,
    R: Rng + ?Sized,
{
    let pool = source.category_ids(settings.pool_size).await?;
    let ids = sampler::sample_ids(&pool, settings.categories, rng)?;
    tracing::info!("Sampled categories {:?} from a pool of {}", ids, pool.len());

    let categories = try_join_all(
        ids.iter()
            .map(|&id| load_category(source, id, settings.clues_per_category)),
    )
    .await?;

    Ok(categories)
}
