//! TikTok publisher for Crier.
//!
//! Uses the Content Posting API `FILE_UPLOAD` flow: an init call declares
//! the video size and returns an upload URL plus a publish id, then the
//! whole file is sent in a single `PUT`. When the media is a remote URL it
//! is first downloaded to a uniquely named temporary file, which is removed
//! after the attempt whatever its result.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use crier_tiktok::{TiktokConfig, TiktokPublisher};
//!
//! let config = TiktokConfig::new().with_access_token("act.example");
//! let publisher = TiktokPublisher::new(config);
//! ```

pub mod config;
pub mod error;
pub mod publisher;
pub mod types;

pub use config::{PrivacyLevel, TiktokConfig};
pub use error::TiktokError;
pub use publisher::TiktokPublisher;
