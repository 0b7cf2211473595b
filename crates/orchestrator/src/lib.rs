//! Publish orchestration for Crier.
//!
//! [`Orchestrator`] is the single entry point callers use to put content on
//! a social network. For each request it resolves the platform's publisher,
//! stages the media in the form that publisher's protocol consumes, runs the
//! publish and, when the publish fails, undoes whatever staging created.
//! Failures come back as failed [`PublishReceipt`]s; the only error an entry
//! point returns is an unsupported platform.
//!
//! [`PublishQueue`] runs jobs on a background worker for callers that do not
//! want to wait on the network.
//!
//! # Quick start
//!
//! ```rust,no_run
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//!
//! use crier_core::{MediaRequirement, MediaSource, Platform, PublishRequest};
//! use crier_media::{LocalMediaHost, MediaStager};
//! use crier_orchestrator::OrchestratorBuilder;
//! use crier_publisher::DryRunPublisher;
//!
//! let host = LocalMediaHost::new("./uploads", "http://localhost:3000");
//! let orchestrator = OrchestratorBuilder::new()
//!     .publisher(Arc::new(DryRunPublisher::new(
//!         Platform::Facebook,
//!         MediaRequirement::PublicUrl,
//!     )))
//!     .stager(MediaStager::new(Arc::new(host), std::env::temp_dir()))
//!     .build()?;
//!
//! let receipt = orchestrator
//!     .publish(PublishRequest::new(
//!         Platform::Facebook,
//!         "Nueva convocatoria",
//!         MediaSource::PublicUrl("https://cdn.example/banner.png".into()),
//!     ))
//!     .await?;
//! println!("{}", receipt.is_success());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod error;
pub mod metrics;
pub mod orchestrator;
pub mod queue;
pub mod receipt;

pub use builder::OrchestratorBuilder;
pub use error::OrchestratorError;
pub use metrics::{MetricsSnapshot, OrchestratorMetrics};
pub use orchestrator::{Orchestrator, PublishTarget};
pub use queue::{JobHandle, PublishJob, PublishQueue};
pub use receipt::PublishReceipt;

#[cfg(test)]
mod testing;
