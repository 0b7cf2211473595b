use std::sync::Arc;

use crier_media::MediaStager;
use crier_publisher::{DynPublisher, PublisherSelector};

use crate::error::OrchestratorError;
use crate::metrics::OrchestratorMetrics;
use crate::orchestrator::Orchestrator;

/// Fluent builder for constructing an [`Orchestrator`].
///
/// A [`MediaStager`] must be supplied. Publishers can be registered one at
/// a time or handed over as a ready [`PublisherSelector`].
pub struct OrchestratorBuilder {
    selector: PublisherSelector,
    stager: Option<MediaStager>,
    metrics: Option<Arc<OrchestratorMetrics>>,
}

impl OrchestratorBuilder {
    pub fn new() -> Self {
        Self {
            selector: PublisherSelector::new(),
            stager: None,
            metrics: None,
        }
    }

    /// Replace the selector, dropping any publisher registered so far.
    #[must_use]
    pub fn selector(mut self, selector: PublisherSelector) -> Self {
        self.selector = selector;
        self
    }

    /// Register a publisher under the platform it reports.
    #[must_use]
    pub fn publisher(mut self, publisher: Arc<dyn DynPublisher>) -> Self {
        self.selector.register(publisher);
        self
    }

    /// Set the media stager.
    #[must_use]
    pub fn stager(mut self, stager: MediaStager) -> Self {
        self.stager = Some(stager);
        self
    }

    /// Share a metrics instance instead of creating a fresh one.
    #[must_use]
    pub fn metrics(mut self, metrics: Arc<OrchestratorMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Consume the builder and produce a configured [`Orchestrator`].
    ///
    /// Returns [`OrchestratorError::Configuration`] if no stager was set.
    pub fn build(self) -> Result<Orchestrator, OrchestratorError> {
        let stager = self
            .stager
            .ok_or_else(|| OrchestratorError::Configuration("Falta configurar el stager de medios".into()))?;

        if self.selector.is_empty() {
            tracing::warn!("orchestrator built without publishers; every publish will be rejected");
        }

        Ok(Orchestrator {
            selector: self.selector,
            stager,
            metrics: self.metrics.unwrap_or_default(),
        })
    }
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crier_core::{MediaRequirement, Platform};

    use super::*;
    use crate::testing::{RecordingHost, StubPublisher};

    fn stager() -> MediaStager {
        MediaStager::new(Arc::new(RecordingHost::default()), std::env::temp_dir())
    }

    #[test]
    fn build_requires_stager() {
        let err = OrchestratorBuilder::new().build().unwrap_err();
        assert!(matches!(err, OrchestratorError::Configuration(_)));
        assert!(err.to_string().contains("stager"));
    }

    #[test]
    fn build_registers_publishers() {
        let orchestrator = OrchestratorBuilder::new()
            .publisher(Arc::new(StubPublisher::ok(
                Platform::Linkedin,
                MediaRequirement::PublicUrl,
            )))
            .publisher(Arc::new(StubPublisher::ok(
                Platform::Facebook,
                MediaRequirement::PublicUrl,
            )))
            .stager(stager())
            .build()
            .unwrap();
        assert_eq!(
            orchestrator.platforms(),
            vec![Platform::Facebook, Platform::Linkedin]
        );
    }

    #[test]
    fn shared_metrics_instance() {
        let metrics = Arc::new(OrchestratorMetrics::default());
        let orchestrator = OrchestratorBuilder::default()
            .stager(stager())
            .metrics(Arc::clone(&metrics))
            .build()
            .unwrap();
        assert!(Arc::ptr_eq(orchestrator.metrics(), &metrics));
    }
}
