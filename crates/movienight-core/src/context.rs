use crate::cache::{QueryCache, QueryKey, Resource};
use crate::error::WorkflowError;
use crate::screens::SearchQuery;
use movienight_client::MovieNightApi;
use movienight_config::Config;
use movienight_models::{RotationNext, SearchMode, SearchResult, User, WatchlogItem};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Roster, next picker and watch history are computed from each other on the
/// server, so they are always invalidated together.
pub const ROTATION_VIEWS: [Resource; 3] = [Resource::Users, Resource::Rotation, Resource::Watchlog];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    ConfirmRotation,
    SelectMovie,
    CreateUser,
    UpdateUser,
    DeleteUser,
    ReorderUsers,
    UpdateWatchEvent,
    DeleteWatchEvent,
}

impl Mutation {
    /// Every cached resource this mutation makes out of date
    pub fn invalidates(self) -> &'static [Resource] {
        match self {
            // New or edited events move the rotation pointer
            Mutation::ConfirmRotation
            | Mutation::SelectMovie
            | Mutation::UpdateWatchEvent
            | Mutation::DeleteWatchEvent => &ROTATION_VIEWS,
            // Names and avatars show up in the next picker and in picker_name
            Mutation::CreateUser
            | Mutation::UpdateUser
            | Mutation::DeleteUser
            | Mutation::ReorderUsers => &ROTATION_VIEWS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub min_query_len: usize,
    pub recent_limit: u32,
    pub default_watchlog_limit: u32,
    pub debounce: Duration,
    pub default_mode: SearchMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Self {
            min_query_len: config.search.min_query_len,
            recent_limit: config.watchlog.recent_limit,
            default_watchlog_limit: config.watchlog.default_limit,
            debounce: Duration::from_millis(config.search.debounce_ms),
            default_mode: config.search.default_mode,
        }
    }
}

/// What every screen needs: the API, the shared cache and the settings.
#[derive(Clone)]
pub struct AppContext {
    api: Arc<dyn MovieNightApi>,
    cache: Arc<QueryCache>,
    settings: Settings,
}

impl AppContext {
    pub fn new(api: Arc<dyn MovieNightApi>, settings: Settings) -> Self {
        Self::with_cache(api, Arc::new(QueryCache::new()), settings)
    }

    pub fn with_cache(api: Arc<dyn MovieNightApi>, cache: Arc<QueryCache>, settings: Settings) -> Self {
        Self { api, cache, settings }
    }

    pub fn api(&self) -> &dyn MovieNightApi {
        self.api.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub async fn users(&self) -> Result<Vec<User>, WorkflowError> {
        let api = self.api();
        let response = self.cache.fetch(QueryKey::Users, move || api.list_users()).await?;
        Ok(response.items)
    }

    pub async fn rotation_next(&self) -> Result<RotationNext, WorkflowError> {
        let api = self.api();
        Ok(self.cache.fetch(QueryKey::RotationNext, move || api.rotation_next()).await?)
    }

    pub async fn watchlog(&self, limit: u32) -> Result<Vec<WatchlogItem>, WorkflowError> {
        if !(1..=500).contains(&limit) {
            return Err(WorkflowError::InvalidLimit(limit));
        }
        let api = self.api();
        let response = self
            .cache
            .fetch(QueryKey::Watchlog { limit }, move || api.watchlog(limit))
            .await?;
        Ok(response.items)
    }

    /// The short list shown on the home screen
    pub async fn recent_watchlog(&self) -> Result<Vec<WatchlogItem>, WorkflowError> {
        self.watchlog(self.settings.recent_limit).await
    }

    /// Search results are cached per exact (query, mode), so a slow answer to
    /// an older query never shows up under a newer one.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, WorkflowError> {
        let min = self.settings.min_query_len;
        if !query.is_searchable(min) {
            return Err(WorkflowError::QueryTooShort { min });
        }

        let api = self.api();
        let text = query.text();
        let mode = query.mode();
        let key = QueryKey::Search {
            query: text.to_string(),
            mode,
        };
        let response = self.cache.fetch(key, move || api.search(text, mode)).await?;
        Ok(response.results)
    }

    /// Call after a mutation's success response
    pub fn invalidate_after(&self, mutation: Mutation) {
        debug!(?mutation, "Invalidating views after mutation");
        for resource in mutation.invalidates() {
            self.cache.invalidate_resource(*resource);
        }
    }
}
