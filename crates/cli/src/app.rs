use std::sync::Arc;

use crier_core::{MediaRequirement, Platform};
use crier_facebook::FacebookPublisher;
use crier_instagram::InstagramPublisher;
use crier_linkedin::LinkedinPublisher;
use crier_media::{LocalMediaHost, MediaStager};
use crier_orchestrator::{Orchestrator, OrchestratorBuilder};
use crier_publisher::http::build_client;
use crier_publisher::{DryRunPublisher, PublisherSelector};
use crier_tiktok::TiktokPublisher;
use tracing::info;

use crate::config::CrierConfig;

/// Wire publishers, the media host and the stager from configuration.
pub fn build_orchestrator(config: &CrierConfig, dry_run: bool) -> anyhow::Result<Orchestrator> {
    let selector = if dry_run {
        dry_run_selector()
    } else {
        live_selector(config)
    };
    info!(platforms = ?selector.platforms(), dry_run, "publishers registered");

    let host = LocalMediaHost::new(&config.media.upload_dir, &config.media.base_url)
        .with_max_bytes(config.media.max_bytes);
    let stager = MediaStager::new(Arc::new(host), config.media.temp_dir())
        .with_max_bytes(config.media.max_bytes);

    Ok(OrchestratorBuilder::new()
        .selector(selector)
        .stager(stager)
        .build()?)
}

fn live_selector(config: &CrierConfig) -> PublisherSelector {
    let client = build_client(config.http.timeout());
    let mut selector = PublisherSelector::new();
    selector.register(Arc::new(FacebookPublisher::with_client(
        config.facebook.to_config(),
        client.clone(),
    )));
    selector.register(Arc::new(InstagramPublisher::with_client(
        config.instagram.to_config(),
        client.clone(),
    )));
    selector.register(Arc::new(LinkedinPublisher::with_client(
        config.linkedin.to_config(),
        client.clone(),
    )));
    selector.register(Arc::new(TiktokPublisher::with_client(
        config.tiktok.to_config(&config.media),
        client,
    )));
    selector
}

fn dry_run_selector() -> PublisherSelector {
    let mut selector = PublisherSelector::new();
    for (platform, requirement) in [
        (Platform::Facebook, MediaRequirement::PublicUrl),
        (Platform::Instagram, MediaRequirement::PublicUrl),
        (Platform::Linkedin, MediaRequirement::PublicUrl),
        (Platform::Tiktok, MediaRequirement::LocalBytes),
    ] {
        selector.register(Arc::new(DryRunPublisher::new(platform, requirement)));
    }
    selector
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_and_dry_run_cover_the_same_platforms() {
        let config = CrierConfig::default();
        let live = live_selector(&config);
        let dry = dry_run_selector();
        assert_eq!(live.platforms(), dry.platforms());
        assert!(!live.platforms().contains(&Platform::Whatsapp));
    }

    #[test]
    fn requirements_match_protocols() {
        let live = live_selector(&CrierConfig::default());
        let tiktok = live.get(Platform::Tiktok).unwrap();
        assert_eq!(tiktok.media_requirement(), MediaRequirement::LocalBytes);
        let linkedin = live.get(Platform::Linkedin).unwrap();
        assert_eq!(linkedin.media_requirement(), MediaRequirement::PublicUrl);
    }

    #[tokio::test]
    async fn dry_run_publishes_without_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CrierConfig::default();
        config.media.upload_dir = dir.path().join("uploads");
        config.media.temp_dir = Some(dir.path().join("tmp"));

        let orchestrator = build_orchestrator(&config, true).unwrap();
        let receipt = orchestrator
            .publish_existing_url(Platform::Instagram, "Hola", "https://cdn.example/a.png")
            .await
            .unwrap();
        assert!(receipt.is_success());
        assert!(receipt.post_id().unwrap_or_default().starts_with("dry-run-"));
    }
}
