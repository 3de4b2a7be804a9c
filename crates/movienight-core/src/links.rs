//! External links for search results.
//!
//! Provider ids look like `tmdb:<type>:<n>` (or `tmdb:<n>`); those link to the
//! TMDb detail page. Anything else links to an IMDb title search.

use movienight_models::{SearchResult, TitleKind};

const PROVIDER_TAG: &str = "tmdb";
const TMDB_BASE: &str = "https://www.themoviedb.org";
const IMDB_FIND: &str = "https://www.imdb.com/find/?q=";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleLink {
    pub kind: TitleKind,
    pub tmdb_url: Option<String>,
    pub imdb_url: String,
}

impl TitleLink {
    /// Detail page when the id resolves, title search otherwise
    pub fn url(&self) -> &str {
        self.tmdb_url.as_deref().unwrap_or(&self.imdb_url)
    }
}

pub fn resolve_title_link(result: &SearchResult) -> TitleLink {
    resolve_link(&result.id, &result.title, result.kind)
}

/// Resolve an id into a link. Never fails: malformed ids fall back to the
/// title search.
///
/// The type segment of the id decides the kind; `kind_hint` only applies to
/// ids without one.
pub fn resolve_link(id: &str, title: &str, kind_hint: Option<TitleKind>) -> TitleLink {
    let imdb_url = format!("{}{}", IMDB_FIND, urlencoding::encode(title));

    match parse_provider_id(id) {
        Some((type_segment, numeric_id)) => {
            let kind = match type_segment {
                Some("tv") => TitleKind::Tv,
                Some(_) => TitleKind::Movie,
                None => kind_hint.unwrap_or(TitleKind::Movie),
            };
            let path = match kind {
                TitleKind::Tv => "tv",
                TitleKind::Movie => "movie",
            };
            TitleLink {
                kind,
                tmdb_url: Some(format!("{}/{}/{}", TMDB_BASE, path, numeric_id)),
                imdb_url,
            }
        }
        None => TitleLink {
            kind: kind_hint.unwrap_or(TitleKind::Movie),
            tmdb_url: None,
            imdb_url,
        },
    }
}

/// `tmdb:<type>:<n>` -> `(Some(type), n)`, `tmdb:<n>` -> `(None, n)`
fn parse_provider_id(id: &str) -> Option<(Option<&str>, &str)> {
    let parts: Vec<&str> = id.split(':').collect();
    if parts.first() != Some(&PROVIDER_TAG) {
        return None;
    }

    let (type_segment, numeric_id) = match parts.as_slice() {
        [_, n] => (None, *n),
        [_, t, n] => (Some(*t), *n),
        _ => return None,
    };

    if numeric_id.is_empty() || !numeric_id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((type_segment, numeric_id))
}
