//! Memoizing movie lookups
//!
//! Every title gets its own slot. A slot is filled at most once, by the first
//! successful provider call for that title; concurrent callers for the same
//! title wait on the slot instead of calling the provider themselves. A
//! failed call leaves the slot empty so a later request can retry.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{OnceCell, RwLock};

use crate::error::LookupError;
use crate::movies::provider::MovieProvider;

type Slot = Arc<OnceCell<String>>;

pub struct MovieCache<P> {
    provider: P,
    entries: RwLock<HashMap<String, Slot>>,
}

impl<P: MovieProvider> MovieCache<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the movie data for `title`, calling the provider only if no
    /// earlier call for this exact string has succeeded.
    pub async fn get(&self, title: &str) -> Result<String, LookupError> {
        let slot = self.slot(title).await;

        if let Some(value) = slot.get() {
            tracing::debug!(title = %title, "Movie cache hit");
            return Ok(value.clone());
        }

        let value = slot
            .get_or_try_init(|| async {
                tracing::debug!(title = %title, "Movie cache miss");
                self.provider.fetch(title).await
            })
            .await?;

        Ok(value.clone())
    }

    /// Number of titles with a stored value.
    pub async fn len(&self) -> usize {
        self.entries
            .read()
            .await
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Whether a value is stored for `title`.
    pub async fn contains(&self, title: &str) -> bool {
        self.entries
            .read()
            .await
            .get(title)
            .is_some_and(|slot| slot.initialized())
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    async fn slot(&self, title: &str) -> Slot {
        if let Some(slot) = self.entries.read().await.get(title) {
            return slot.clone();
        }

        let mut entries = self.entries.write().await;
        entries
            .entry(title.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone()
    }
}
