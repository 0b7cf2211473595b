pub mod dry_run;
pub mod error;
pub mod http;
pub mod publisher;
pub mod selector;

pub use dry_run::DryRunPublisher;
pub use error::PublishError;
pub use publisher::{DynPublisher, Publisher};
pub use selector::PublisherSelector;
