use serde::{Deserialize, Serialize};

pub type WatchEventId = i64;

/// One entry of the watch history, as rendered by `/watchlog`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlogItem {
    pub id: WatchEventId,
    pub title: String,
    pub movie_id: String,
    /// ISO-8601, with or without an offset depending on how the event was stored
    pub watched_at: String,
    pub picker_name: String,
    #[serde(default)]
    pub search_url: Option<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
    /// Created by confirming a turn before a title was chosen
    #[serde(default)]
    pub is_placeholder: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WatchlogResponse {
    #[serde(default)]
    pub items: Vec<WatchlogItem>,
}
