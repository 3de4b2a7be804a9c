pub mod cache;
pub mod context;
pub mod dates;
pub mod debounce;
pub mod error;
pub mod guard;
pub mod links;
pub mod reorder;
pub mod screens;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::{Cached, QueryCache, QueryKey, Resource};
pub use context::{AppContext, Mutation, Settings, ROTATION_VIEWS};
pub use dates::{local_midnight, local_watch_date, normalize_watch_date, parse_watched_at};
pub use debounce::{debounce_channel, Debouncer};
pub use error::{Outcome, WorkflowError};
pub use guard::{InFlight, MutationGuard};
pub use links::{resolve_link, resolve_title_link, TitleLink};
pub use reorder::reorder;
pub use screens::{
    Confirmer, EditForm, HomeScreen, HomeView, NewUser, RosterEditor, RosterScreen, SearchQuery,
    SearchScreen, SelectionForm, WatchlogScreen,
};
