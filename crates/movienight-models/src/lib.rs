pub mod user;
pub mod watch_event;
pub mod search;
pub mod rotation;
pub mod requests;

pub use user::{User, UserId, UsersResponse};
pub use watch_event::{WatchEventId, WatchlogItem, WatchlogResponse};
pub use search::{SearchMode, SearchResponse, SearchResult, TitleKind};
pub use rotation::{NextPicker, RotationNext};
pub use requests::{
    Ack, AvatarUpload, ConfirmRotation, CreateUser, ReorderUsers, SelectMovie, UpdateUser,
    UpdateWatchEvent,
};
