use crate::avatar::AvatarFile;
use crate::error::ApiError;
use async_trait::async_trait;
use movienight_models::{
    Ack, AvatarUpload, ConfirmRotation, CreateUser, ReorderUsers, RotationNext, SearchMode,
    SearchResponse, SelectMovie, UpdateUser, UpdateWatchEvent, User, UserId, UsersResponse,
    WatchEventId, WatchlogResponse,
};

/// The movie night backend, one method per endpoint.
#[async_trait]
pub trait MovieNightApi: Send + Sync {
    // Roster
    async fn list_users(&self) -> Result<UsersResponse, ApiError>;
    async fn create_user(&self, user: &CreateUser) -> Result<User, ApiError>;
    async fn update_user(&self, id: UserId, update: &UpdateUser) -> Result<User, ApiError>;
    async fn delete_user(&self, id: UserId) -> Result<Ack, ApiError>;
    async fn reorder_users(&self, order: &ReorderUsers) -> Result<Ack, ApiError>;

    // Rotation
    async fn rotation_next(&self) -> Result<RotationNext, ApiError>;
    async fn confirm_rotation(&self, confirm: &ConfirmRotation) -> Result<Ack, ApiError>;

    // Titles
    async fn search(&self, query: &str, mode: SearchMode) -> Result<SearchResponse, ApiError>;
    async fn select_movie(&self, selection: &SelectMovie) -> Result<Ack, ApiError>;

    // Watch history
    async fn watchlog(&self, limit: u32) -> Result<WatchlogResponse, ApiError>;
    async fn update_watch_event(
        &self,
        id: WatchEventId,
        update: &UpdateWatchEvent,
    ) -> Result<Ack, ApiError>;
    async fn delete_watch_event(&self, id: WatchEventId) -> Result<Ack, ApiError>;

    async fn upload_avatar(&self, file: AvatarFile) -> Result<AvatarUpload, ApiError>;

    async fn health(&self) -> Result<Ack, ApiError>;
}
