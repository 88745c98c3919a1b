//! # Category Loading
//!
//! Landing page data: cached categories, or a fresh fetch bounded by [`LOAD_TIMEOUT`].
//!
//! The fetch runs inside [`tokio::time::timeout`], so when the bound is hit the in-flight
//! request is dropped and cannot overwrite the timeout state afterwards. The cache is only
//! written after a fetch that produced at least one question.
use std::{future::Future, time::Duration};

use bank::{CategoryDescriptor, QuestionRecord, aggregate};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::{cache::TimedCache, error::ClientError};

pub const CACHE_KEY: &str = "interviewer_categories_cache";
pub const CACHE_DURATION: Duration = Duration::from_secs(5 * 60);
pub const LOAD_TIMEOUT: Duration = Duration::from_secs(15);

pub struct CategoryLoader {
    cache: TimedCache,
    freshness: Duration,
    limit: Duration,
}

impl CategoryLoader {
    pub fn new(cache: TimedCache) -> Self {
        Self {
            cache,
            freshness: CACHE_DURATION,
            limit: LOAD_TIMEOUT,
        }
    }

    pub fn with_limit(mut self, limit: Duration) -> Self {
        self.limit = limit;
        self
    }

    pub fn cached(&self) -> Option<Vec<CategoryDescriptor>> {
        match self.cache.get::<Vec<CategoryDescriptor>>(CACHE_KEY) {
            Some((categories, age)) if age < self.freshness => {
                debug!("Category cache hit, {}s old", age.as_secs());
                Some(categories)
            }
            Some(_) => {
                debug!("Category cache stale");
                None
            }
            None => None,
        }
    }

    pub async fn load<F, Fut>(&self, fetch: F) -> Result<Vec<CategoryDescriptor>, ClientError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Vec<QuestionRecord>>,
    {
        if let Some(categories) = self.cached() {
            return Ok(categories);
        }

        let questions = timeout(self.limit, fetch()).await.map_err(|_| {
            warn!("Category load exceeded {}s", self.limit.as_secs());
            ClientError::Timeout
        })?;

        if questions.is_empty() {
            return Ok(Vec::new());
        }

        let categories = aggregate(&questions);
        info!("Loaded {} categories", categories.len());

        if let Err(e) = self.cache.put(CACHE_KEY, &categories) {
            warn!("Failed to cache categories: {e}");
        }

        Ok(categories)
    }
}
