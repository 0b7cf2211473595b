use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use crier_core::Platform;

use crate::error::PublishError;
use crate::publisher::DynPublisher;

/// Maps each platform to the publisher that speaks its protocol.
///
/// Built once at startup and then shared immutably. Lookups are a
/// deterministic 1:1 mapping; a platform without a registered publisher is
/// an error, never a fallback.
pub struct PublisherSelector {
    publishers: HashMap<Platform, Arc<dyn DynPublisher>>,
}

impl PublisherSelector {
    /// Create an empty selector.
    pub fn new() -> Self {
        Self {
            publishers: HashMap::new(),
        }
    }

    /// Register a publisher under the platform it reports.
    ///
    /// If a publisher for the same platform already exists, it is replaced.
    pub fn register(&mut self, publisher: Arc<dyn DynPublisher>) {
        self.publishers.insert(publisher.platform(), publisher);
    }

    /// Resolve the publisher for `platform`.
    pub fn get(&self, platform: Platform) -> Result<Arc<dyn DynPublisher>, PublishError> {
        self.publishers
            .get(&platform)
            .cloned()
            .ok_or_else(|| PublishError::UnsupportedPlatform(platform.to_string()))
    }

    /// Resolve the publisher for a raw platform name such as `"facebook"`.
    ///
    /// Unknown names and known-but-unpublishable platforms both fail with
    /// [`PublishError::UnsupportedPlatform`] naming the value.
    pub fn get_publisher(&self, name: &str) -> Result<Arc<dyn DynPublisher>, PublishError> {
        let platform = Platform::from_str(name)?;
        self.get(platform)
    }

    /// Return the registered platforms in a stable order.
    pub fn platforms(&self) -> Vec<Platform> {
        let mut platforms: Vec<Platform> = self.publishers.keys().copied().collect();
        platforms.sort_unstable();
        platforms
    }

    pub fn len(&self) -> usize {
        self.publishers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.publishers.is_empty()
    }
}

impl Default for PublisherSelector {
    fn default() -> Self {
        Self::new()
    }
}
