//! Instagram publisher for Crier.
//!
//! Publishing is two-phase: a media container is created from a public
//! image URL, the publisher waits for Instagram to process it, and the
//! container is then published. The wait is either a fixed settle delay or
//! polling of the container's `status_code` (see [`ContainerWait`]).
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use crier_instagram::{ContainerWait, InstagramConfig, InstagramPublisher};
//!
//! let config = InstagramConfig::new()
//!     .with_access_token("page-token")
//!     .with_account_id("17841400000000000")
//!     .with_wait(ContainerWait::Fixed { delay: Duration::from_secs(10) });
//! let publisher = InstagramPublisher::new(config);
//! ```

pub mod config;
pub mod error;
pub mod publisher;
pub mod types;

pub use config::{ContainerWait, InstagramConfig};
pub use error::InstagramError;
pub use publisher::InstagramPublisher;
