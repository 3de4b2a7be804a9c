//! The four views of the app as plain structs: they own no rendering, only
//! the reads, guards and mutations behind each control.

pub mod home;
pub mod roster;
pub mod search;
pub mod watchlog;


pub use home::{HomeScreen, HomeView};
pub use roster::{NewUser, RosterEditor, RosterScreen};
pub use search::{SearchScreen, SelectionForm};
pub use watchlog::{EditForm, WatchlogScreen};

use movienight_models::SearchMode;

/// Asks the person at the keyboard before something is deleted
pub trait Confirmer: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// A search as it will be sent: trimmed text plus mode
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    text: String,
    mode: SearchMode,
}

impl SearchQuery {
    pub fn new(text: impl AsRef<str>, mode: SearchMode) -> Self {
        Self {
            text: text.as_ref().trim().to_string(),
            mode,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn is_searchable(&self, min_len: usize) -> bool {
        self.text.chars().count() >= min_len
    }
}
