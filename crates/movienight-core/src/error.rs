use movienight_client::ApiError;
use thiserror::Error;

/// Why a screen action did not go through.
///
/// Everything except `Api` is raised client-side before any request is sent.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("there are no users in the rotation yet")]
    NoUsers,

    #[error("choose who picked this title first")]
    MissingPicker,

    #[error("a {0} is already in progress")]
    Busy(&'static str),

    #[error("a name is required")]
    EmptyName,

    #[error("nothing to update")]
    EmptyUpdate,

    #[error("search needs at least {min} characters")]
    QueryTooShort { min: usize },

    #[error("limit must be between 1 and 500, got {0}")]
    InvalidLimit(u32),

    #[error("watch log page size must be 10, 25, 50 or 100, got {0}")]
    UnsupportedPageSize(u32),

    #[error("position {index} is out of range for a roster of {len}")]
    OutOfRange { index: usize, len: usize },

    #[error("new order must contain every user exactly once")]
    IncompleteOrder,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result of an action that asks for confirmation first
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Done(T),
    Cancelled,
}

impl<T> Outcome<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }
}
