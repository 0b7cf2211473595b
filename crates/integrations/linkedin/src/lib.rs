//! LinkedIn publisher for Crier.
//!
//! Publishing an image post takes four dependent calls against the
//! LinkedIn v2 API:
//!
//! 1. `GET /userinfo` resolves the member URN that will own the post.
//! 2. `POST /assets?action=registerUpload` returns an asset URN and a
//!    one-time upload URL.
//! 3. The image is fetched from its public URL and `PUT` to the upload URL.
//! 4. `POST /ugcPosts` creates the post referencing the asset.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use crier_linkedin::{LinkedinConfig, LinkedinPublisher};
//!
//! let config = LinkedinConfig::new().with_access_token("AQX...");
//! let publisher = LinkedinPublisher::new(config);
//! ```

pub mod config;
pub mod error;
pub mod publisher;
pub mod types;

pub use config::LinkedinConfig;
pub use error::LinkedinError;
pub use publisher::LinkedinPublisher;
