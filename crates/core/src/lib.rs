pub mod error;
pub mod limits;
pub mod media;
pub mod mime;
pub mod outcome;
pub mod platform;
pub mod request;

pub use error::CoreError;
pub use limits::truncate_chars;
pub use media::{MediaKind, MediaLocation, MediaRequirement, MediaSource, StagedMedia};
pub use outcome::PublishOutcome;
pub use platform::Platform;
pub use request::PublishRequest;
