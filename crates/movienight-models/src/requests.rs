//! Request bodies and small acknowledgement responses exchanged with the backend.

use serde::{Deserialize, Serialize};
use crate::user::UserId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateUser {
    pub name: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

/// Partial user update; absent fields are left untouched by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.avatar_url.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReorderUsers {
    pub order: Vec<UserId>,
}

/// Body for `POST /rotation/confirm`. An empty body confirms the computed next picker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ConfirmRotation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picker_user_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watched_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectMovie {
    pub movie_id: String,
    pub title: String,
    pub picker_user_id: UserId,
    pub watched_at: String,
    pub search_url: String,
    pub poster_url: Option<String>,
}

/// Partial watch event update.
///
/// The link fields are doubly optional: `None` leaves them alone, `Some(None)`
/// clears them on the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UpdateWatchEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watched_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picker_user_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<Option<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvatarUpload {
    pub url: String,
}

/// `{"ok": true}` style response, optionally carrying the id of a created row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Ack {
    #[serde(default)]
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}
