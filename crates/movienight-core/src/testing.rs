//! In-memory backend with the same rotation rules as the real server.

use async_trait::async_trait;
use movienight_client::{ApiError, AvatarFile, MovieNightApi};
use movienight_models::{
    Ack, AvatarUpload, ConfirmRotation, CreateUser, NextPicker, ReorderUsers, RotationNext,
    SearchMode, SearchResponse, SearchResult, SelectMovie, UpdateUser, UpdateWatchEvent, User,
    UserId, UsersResponse, WatchEventId, WatchlogItem, WatchlogResponse,
};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

#[derive(Debug, Clone)]
pub struct StoredEvent {
    pub id: WatchEventId,
    pub picker_user_id: UserId,
    pub movie_id: String,
    pub title: String,
    pub search_url: Option<String>,
    pub poster_url: Option<String>,
    pub watched_at: String,
}

#[derive(Default)]
struct State {
    users: Vec<User>,
    events: Vec<StoredEvent>,
    next_id: i64,
    requests: Vec<String>,
    selections: Vec<SelectMovie>,
    event_updates: Vec<(WatchEventId, UpdateWatchEvent)>,
    uploads: Vec<AvatarFile>,
    search_results: Vec<SearchResult>,
}

#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<State>,
    reorder_gate: Option<Arc<Semaphore>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(names: &[&str]) -> Self {
        let backend = Self::new();
        {
            let mut state = backend.state();
            for name in names {
                state.next_id += 1;
                let id = state.next_id;
                let position = state.users.len() as i64;
                state.users.push(user(id, name, position));
            }
        }
        backend
    }

    /// Hold every reorder request until a permit is added to `gate`
    pub fn with_reorder_gate(mut self, gate: Arc<Semaphore>) -> Self {
        self.reorder_gate = Some(gate);
        self
    }

    pub fn with_search_results(self, results: Vec<SearchResult>) -> Self {
        self.state().search_results = results;
        self
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn requests(&self) -> Vec<String> {
        self.state().requests.clone()
    }

    pub fn count(&self, request: &str) -> usize {
        self.state().requests.iter().filter(|r| r.as_str() == request).count()
    }

    pub fn selections(&self) -> Vec<SelectMovie> {
        self.state().selections.clone()
    }

    pub fn event_updates(&self) -> Vec<(WatchEventId, UpdateWatchEvent)> {
        self.state().event_updates.clone()
    }

    pub fn uploads(&self) -> Vec<AvatarFile> {
        self.state().uploads.clone()
    }

    pub fn events(&self) -> Vec<StoredEvent> {
        self.state().events.clone()
    }

    pub fn user_id(&self, name: &str) -> UserId {
        self.state()
            .users
            .iter()
            .find(|u| u.name == name)
            .map(|u| u.id)
            .expect("unknown test user")
    }

    pub fn add_event(&self, picker: UserId, title: &str, watched_at: &str) -> WatchEventId {
        let mut state = self.state();
        state.next_id += 1;
        let id = state.next_id;
        state.events.push(StoredEvent {
            id,
            picker_user_id: picker,
            movie_id: "tmdb:movie:1".to_string(),
            title: title.to_string(),
            search_url: None,
            poster_url: None,
            watched_at: watched_at.to_string(),
        });
        id
    }

    fn log(&self, request: impl Into<String>) {
        self.state().requests.push(request.into());
    }
}

fn user(id: UserId, name: &str, position: i64) -> User {
    User {
        id,
        name: name.to_string(),
        email: None,
        avatar_url: None,
        position,
        created_at: Some("2024-01-01T10:00:00".to_string()),
    }
}

/// The server keeps `watched_at` as naive UTC and echoes it without an offset
fn stored_timestamp(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc().format("%Y-%m-%dT%H:%M:%S").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn not_found(method: &'static str, path: String) -> ApiError {
    ApiError::Status {
        method,
        path,
        status: 404,
        message: "not found".to_string(),
    }
}

fn sorted_users(state: &State) -> Vec<User> {
    let mut users = state.users.clone();
    users.sort_by_key(|u| (u.position, u.id));
    users
}

/// Next after the picker of the latest event, wrapping around
fn compute_next(state: &State) -> Option<UserId> {
    let users = sorted_users(state);
    let first = users.first()?.id;
    let Some(last) = state.events.iter().max_by(|a, b| a.watched_at.cmp(&b.watched_at)) else {
        return Some(first);
    };
    let index = users.iter().position(|u| u.id == last.picker_user_id);
    Some(match index {
        Some(i) => users[(i + 1) % users.len()].id,
        None => first,
    })
}

#[async_trait]
impl MovieNightApi for FakeBackend {
    async fn list_users(&self) -> Result<UsersResponse, ApiError> {
        self.log("GET /users");
        Ok(UsersResponse {
            items: sorted_users(&self.state()),
        })
    }

    async fn create_user(&self, request: &CreateUser) -> Result<User, ApiError> {
        self.log("POST /users");
        let mut state = self.state();
        state.next_id += 1;
        let id = state.next_id;
        let position = state.users.iter().map(|u| u.position + 1).max().unwrap_or(0);
        let mut created = user(id, &request.name, position);
        created.email = request.email.clone();
        created.avatar_url = request.avatar_url.clone();
        created.created_at = None;
        state.users.push(created.clone());
        Ok(created)
    }

    async fn update_user(&self, id: UserId, update: &UpdateUser) -> Result<User, ApiError> {
        self.log(format!("PATCH /users/{}", id));
        let mut state = self.state();
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| not_found("PATCH", format!("/users/{}", id)))?;
        if let Some(name) = &update.name {
            user.name = name.clone();
        }
        if let Some(email) = &update.email {
            user.email = Some(email.clone());
        }
        if let Some(avatar_url) = &update.avatar_url {
            user.avatar_url = Some(avatar_url.clone());
        }
        Ok(user.clone())
    }

    async fn delete_user(&self, id: UserId) -> Result<Ack, ApiError> {
        self.log(format!("DELETE /users/{}", id));
        let mut state = self.state();
        let before = state.users.len();
        state.users.retain(|u| u.id != id);
        if state.users.len() == before {
            return Err(not_found("DELETE", format!("/users/{}", id)));
        }
        Ok(Ack { ok: true, id: None })
    }

    async fn reorder_users(&self, request: &ReorderUsers) -> Result<Ack, ApiError> {
        self.log("POST /users/reorder");
        if let Some(gate) = &self.reorder_gate {
            let _permit = gate.acquire().await.expect("gate closed");
        }
        let mut state = self.state();
        for (position, id) in request.order.iter().enumerate() {
            if let Some(user) = state.users.iter_mut().find(|u| u.id == *id) {
                user.position = position as i64;
            }
        }
        Ok(Ack { ok: true, id: None })
    }

    async fn rotation_next(&self) -> Result<RotationNext, ApiError> {
        self.log("GET /rotation/next");
        let state = self.state();
        let next = compute_next(&state).and_then(|id| {
            state.users.iter().find(|u| u.id == id).map(|u| NextPicker {
                id: u.id,
                name: u.name.clone(),
                avatar_url: u.avatar_url.clone(),
            })
        });
        Ok(RotationNext { next })
    }

    async fn confirm_rotation(&self, request: &ConfirmRotation) -> Result<Ack, ApiError> {
        self.log("POST /rotation/confirm");
        let mut state = self.state();
        let picker = request
            .picker_user_id
            .or_else(|| compute_next(&state))
            .ok_or_else(|| ApiError::Status {
                method: "POST",
                path: "/rotation/confirm".to_string(),
                status: 400,
                message: "no users in rotation".to_string(),
            })?;
        state.next_id += 1;
        let id = state.next_id;
        state.events.push(StoredEvent {
            id,
            picker_user_id: picker,
            movie_id: "placeholder".to_string(),
            title: "Placeholder".to_string(),
            search_url: None,
            poster_url: None,
            watched_at: request
                .watched_at
                .as_deref()
                .map(stored_timestamp)
                .unwrap_or_else(|| "2099-01-01T00:00:00".to_string()),
        });
        Ok(Ack { ok: true, id: Some(id) })
    }

    async fn search(&self, query: &str, mode: SearchMode) -> Result<SearchResponse, ApiError> {
        self.log(format!("GET /movies/search2?q={}&mode={}", query, mode));
        let state = self.state();
        let needle = query.to_lowercase();
        let results = state
            .search_results
            .iter()
            .filter(|r| mode == SearchMode::Actor || r.title.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Ok(SearchResponse { results })
    }

    async fn select_movie(&self, selection: &SelectMovie) -> Result<Ack, ApiError> {
        self.log("POST /movies/select");
        let mut state = self.state();
        state.selections.push(selection.clone());
        state.next_id += 1;
        let id = state.next_id;
        state.events.push(StoredEvent {
            id,
            picker_user_id: selection.picker_user_id,
            movie_id: selection.movie_id.clone(),
            title: selection.title.clone(),
            search_url: Some(selection.search_url.clone()),
            poster_url: selection.poster_url.clone(),
            watched_at: stored_timestamp(&selection.watched_at),
        });
        Ok(Ack { ok: true, id: Some(id) })
    }

    async fn watchlog(&self, limit: u32) -> Result<WatchlogResponse, ApiError> {
        self.log(format!("GET /watchlog?limit={}", limit));
        let state = self.state();
        let mut events = state.events.clone();
        events.sort_by(|a, b| b.watched_at.cmp(&a.watched_at));
        let items = events
            .into_iter()
            .take(limit as usize)
            .map(|e| WatchlogItem {
                id: e.id,
                picker_name: state
                    .users
                    .iter()
                    .find(|u| u.id == e.picker_user_id)
                    .map(|u| u.name.clone())
                    .unwrap_or_else(|| "unknown".to_string()),
                is_placeholder: e.movie_id == "placeholder",
                title: e.title,
                movie_id: e.movie_id,
                watched_at: e.watched_at,
                search_url: e.search_url,
                poster_url: e.poster_url,
            })
            .collect();
        Ok(WatchlogResponse { items })
    }

    async fn update_watch_event(
        &self,
        id: WatchEventId,
        update: &UpdateWatchEvent,
    ) -> Result<Ack, ApiError> {
        self.log(format!("PATCH /watchevents/{}", id));
        let mut state = self.state();
        state.event_updates.push((id, update.clone()));
        let event = state
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| not_found("PATCH", format!("/watchevents/{}", id)))?;
        if let Some(watched_at) = &update.watched_at {
            event.watched_at = stored_timestamp(watched_at);
        }
        if let Some(picker) = update.picker_user_id {
            event.picker_user_id = picker;
        }
        if let Some(title) = &update.title {
            event.title = title.clone();
        }
        if let Some(movie_id) = &update.movie_id {
            event.movie_id = movie_id.clone();
        }
        if let Some(search_url) = &update.search_url {
            event.search_url = search_url.clone();
        }
        if let Some(poster_url) = &update.poster_url {
            event.poster_url = poster_url.clone();
        }
        Ok(Ack { ok: true, id: None })
    }

    async fn delete_watch_event(&self, id: WatchEventId) -> Result<Ack, ApiError> {
        self.log(format!("DELETE /watchevents/{}", id));
        let mut state = self.state();
        let before = state.events.len();
        state.events.retain(|e| e.id != id);
        if state.events.len() == before {
            return Err(not_found("DELETE", format!("/watchevents/{}", id)));
        }
        Ok(Ack { ok: true, id: None })
    }

    async fn upload_avatar(&self, file: AvatarFile) -> Result<AvatarUpload, ApiError> {
        self.log("POST /upload/avatar");
        let url = format!("/uploads/{}", file.file_name);
        self.state().uploads.push(file);
        Ok(AvatarUpload { url })
    }

    async fn health(&self) -> Result<Ack, ApiError> {
        self.log("GET /health");
        Ok(Ack { ok: true, id: None })
    }
}

/// Gives a fixed answer and remembers what it was asked
pub struct ScriptedConfirmer {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirmer {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl crate::screens::Confirmer for ScriptedConfirmer {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer
    }
}
