//! Facebook publisher for Crier.
//!
//! Publishes a photo with a caption to a Facebook Page through the Graph
//! API in a single form-encoded call. The platform fetches the image from a
//! public URL.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use crier_facebook::{FacebookConfig, FacebookPublisher};
//!
//! let config = FacebookConfig::new()
//!     .with_access_token("page-token")
//!     .with_page_id("1234567890");
//! let publisher = FacebookPublisher::new(config);
//! ```

pub mod config;
pub mod error;
pub mod publisher;
pub mod types;

pub use config::FacebookConfig;
pub use error::FacebookError;
pub use publisher::FacebookPublisher;
