use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Title,
    Actor,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Title => "title",
            SearchMode::Actor => "actor",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleKind {
    Movie,
    Tv,
}

impl TitleKind {
    pub fn label(&self) -> &'static str {
        match self {
            TitleKind::Movie => "Movie",
            TitleKind::Tv => "Series",
        }
    }
}

/// A hit from the metadata provider proxy.
///
/// `id` is `tmdb:<type>:<n>` for provider results, anything else for fallbacks.
/// The wire format allows numeric ids and string or numeric years, both are
/// normalized to strings here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub year: Option<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default, deserialize_with = "optional_non_empty")]
    pub poster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TitleKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Int(i64),
    Float(f64),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            StringOrNumber::String(s) => s,
            StringOrNumber::Int(n) => n.to_string(),
            StringOrNumber::Float(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(StringOrNumber::into_string)
}

fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(value
        .map(StringOrNumber::into_string)
        .filter(|s| !s.trim().is_empty()))
}

fn optional_non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id_and_year() {
        let result: SearchResult = serde_json::from_str(
            r#"{"id": 42, "title": "Heat", "year": 1995, "overview": "", "poster": null}"#,
        )
        .unwrap();
        assert_eq!(result.id, "42");
        assert_eq!(result.year.as_deref(), Some("1995"));
        assert!(result.poster.is_none());
    }

    #[test]
    fn test_empty_year_and_poster_are_none() {
        let result: SearchResult = serde_json::from_str(
            r#"{"id": "tmdb:movie:123", "title": "Inception", "year": "", "overview": "A thief",
                "poster": "", "kind": "movie"}"#,
        )
        .unwrap();
        assert!(result.year.is_none());
        assert!(result.poster.is_none());
        assert_eq!(result.kind, Some(TitleKind::Movie));
    }

    #[test]
    fn test_search_mode_wire_names() {
        assert_eq!(SearchMode::Title.as_str(), "title");
        assert_eq!(SearchMode::Actor.to_string(), "actor");
        assert_eq!(TitleKind::Tv.label(), "Series");
    }
}
