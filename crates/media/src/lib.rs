//! Media staging for the Crier publish pipeline.
//!
//! Publishers consume media in one of two forms: a public URL the platform
//! fetches itself, or local bytes the publisher uploads. [`MediaStager`]
//! bridges whatever the caller supplied to the form a publisher needs and
//! records what must be undone if publishing fails.

pub mod download;
pub mod error;
pub mod host;
pub mod local;
pub mod stager;

pub use download::{DEFAULT_MAX_BYTES, DownloadedFile, Downloader, remove_quietly};
pub use error::MediaError;
pub use host::{HostedMedia, MediaHost};
pub use local::LocalMediaHost;
pub use stager::{Cleanup, MediaStager, Staged};
