pub mod error;
pub mod traits;
pub mod http;
pub mod avatar;

pub use error::ApiError;
pub use traits::MovieNightApi;
pub use http::ApiClient;
pub use avatar::AvatarFile;
