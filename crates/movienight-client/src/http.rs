use crate::avatar::AvatarFile;
use crate::error::ApiError;
use crate::traits::MovieNightApi;
use async_trait::async_trait;
use movienight_models::{
    Ack, AvatarUpload, ConfirmRotation, CreateUser, ReorderUsers, RotationNext, SearchMode,
    SearchResponse, SelectMovie, UpdateUser, UpdateWatchEvent, User, UserId, UsersResponse,
    WatchEventId, WatchlogResponse,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Thin JSON wrapper around the backend. Non-2xx responses become
/// [`ApiError::Status`] carrying the body text; nothing is retried.
#[derive(Clone)]
pub struct ApiClient {
    client: Arc<Client>,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("movienight/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Arc::new(client),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.client.get(self.url(path));
        self.send("GET", path, request).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.client.get(self.url(path)).query(query);
        self.send("GET", path, request).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.url(path)).json(body);
        self.send("POST", path, request).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.patch(self.url(path)).json(body);
        self.send("PATCH", path, request).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.client.delete(self.url(path));
        self.send("DELETE", path, request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: &'static str,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        debug!(method, path, "Sending request");

        let response = request.header("Accept", "application/json").send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(method, path, status = status.as_u16(), "Request rejected");
            return Err(ApiError::Status {
                method,
                path: path.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await?;
        decode(path, &text)
    }
}

/// Parse a success body, mapping shape mismatches to [`ApiError::Decode`]
pub fn decode<T: DeserializeOwned>(path: &str, text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|source| ApiError::Decode {
        path: path.to_string(),
        source,
    })
}

#[async_trait]
impl MovieNightApi for ApiClient {
    async fn list_users(&self) -> Result<UsersResponse, ApiError> {
        self.get("/users").await
    }

    async fn create_user(&self, user: &CreateUser) -> Result<User, ApiError> {
        self.post("/users", user).await
    }

    async fn update_user(&self, id: UserId, update: &UpdateUser) -> Result<User, ApiError> {
        self.patch(&format!("/users/{}", id), update).await
    }

    async fn delete_user(&self, id: UserId) -> Result<Ack, ApiError> {
        self.delete(&format!("/users/{}", id)).await
    }

    async fn reorder_users(&self, order: &ReorderUsers) -> Result<Ack, ApiError> {
        self.post("/users/reorder", order).await
    }

    async fn rotation_next(&self) -> Result<RotationNext, ApiError> {
        self.get("/rotation/next").await
    }

    async fn confirm_rotation(&self, confirm: &ConfirmRotation) -> Result<Ack, ApiError> {
        self.post("/rotation/confirm", confirm).await
    }

    async fn search(&self, query: &str, mode: SearchMode) -> Result<SearchResponse, ApiError> {
        self.get_with_query("/movies/search2", &[("q", query), ("mode", mode.as_str())])
            .await
    }

    async fn select_movie(&self, selection: &SelectMovie) -> Result<Ack, ApiError> {
        self.post("/movies/select", selection).await
    }

    async fn watchlog(&self, limit: u32) -> Result<WatchlogResponse, ApiError> {
        self.get_with_query("/watchlog", &[("limit", limit)]).await
    }

    async fn update_watch_event(
        &self,
        id: WatchEventId,
        update: &UpdateWatchEvent,
    ) -> Result<Ack, ApiError> {
        self.patch(&format!("/watchevents/{}", id), update).await
    }

    async fn delete_watch_event(&self, id: WatchEventId) -> Result<Ack, ApiError> {
        self.delete(&format!("/watchevents/{}", id)).await
    }

    async fn upload_avatar(&self, file: AvatarFile) -> Result<AvatarUpload, ApiError> {
        let path = "/upload/avatar";
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(file.content_type)?;
        let form = Form::new().part("file", part);
        let request = self.client.post(self.url(path)).multipart(form);
        self.send("POST", path, request).await
    }

    async fn health(&self) -> Result<Ack, ApiError> {
        self.get("/health").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let client = ApiClient::with_client(Client::new(), "http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/users"), "http://localhost:8000/users");
    }

    #[test]
    fn test_decode_users() {
        let users: UsersResponse = decode(
            "/users",
            r#"{"items": [{"id": 1, "name": "Alex", "email": "alex@local", "avatar_url": null,
                "position": 0, "created_at": "2024-01-01T10:00:00"}]}"#,
        )
        .unwrap();
        assert_eq!(users.items[0].name, "Alex");
    }

    #[test]
    fn test_decode_shape_mismatch() {
        let err = decode::<RotationNext>("/rotation/next", r#"{"next": 5}"#).unwrap_err();
        match err {
            ApiError::Decode { path, .. } => assert_eq!(path, "/rotation/next"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_decode_non_json_body() {
        assert!(decode::<Ack>("/health", "Internal Server Error").is_err());
    }

    #[test]
    fn test_status_error_message() {
        let err = ApiError::Status {
            method: "POST",
            path: "/movies/select".to_string(),
            status: 400,
            message: r#"{"detail":"picker_user_id required"}"#.to_string(),
        };
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("picker_user_id required"));
    }
}
