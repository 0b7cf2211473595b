use std::path::PathBuf;

use clap::Args;
use crier_core::{MediaSource, Platform};
use crier_orchestrator::{Orchestrator, PublishReceipt, PublishTarget};

use crate::OutputFormat;
use crate::output;

#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Target platform (facebook, instagram, linkedin, tiktok).
    #[arg(long)]
    pub platform: String,
    /// Post text.
    #[arg(long)]
    pub caption: String,
    /// Image or video to publish.
    #[arg(long)]
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct PublishUrlArgs {
    /// Target platform.
    #[arg(long)]
    pub platform: String,
    /// Post text.
    #[arg(long)]
    pub caption: String,
    /// Public URL of the media.
    #[arg(long)]
    pub url: String,
}

#[derive(Args, Debug)]
pub struct PublishAllArgs {
    /// Target platform; repeat for several, they run in the given order.
    #[arg(long = "platform", required = true)]
    pub platforms: Vec<String>,
    /// Post text, shared by every platform.
    #[arg(long)]
    pub caption: String,
    /// Public URL of the media.
    #[arg(long)]
    pub url: String,
}

pub async fn run(
    orchestrator: &Orchestrator,
    args: &PublishArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let receipt = orchestrator
        .publish_named(
            &args.platform,
            &args.caption,
            MediaSource::LocalFile(args.file.clone()),
        )
        .await?;
    report(&[receipt], format)
}

pub async fn run_url(
    orchestrator: &Orchestrator,
    args: &PublishUrlArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let platform = orchestrator.resolve(&args.platform)?;
    let receipt = orchestrator
        .publish_existing_url(platform, &args.caption, &args.url)
        .await?;
    report(&[receipt], format)
}

pub async fn run_all(
    orchestrator: &Orchestrator,
    args: &PublishAllArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let targets = args
        .platforms
        .iter()
        .map(|name| -> anyhow::Result<PublishTarget> {
            let platform: Platform = name.parse()?;
            Ok(PublishTarget::new(
                platform,
                args.caption.clone(),
                Some(args.url.clone()),
            ))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let receipts = orchestrator.publish_all(&targets).await;
    report(&receipts, format)
}

/// Print the receipts and fail the command if any publish failed.
fn report(receipts: &[PublishReceipt], format: OutputFormat) -> anyhow::Result<()> {
    output::print_receipts(receipts, format)?;
    let failed = receipts.iter().filter(|r| !r.is_success()).count();
    if failed > 0 {
        anyhow::bail!("{failed} de {} publicaciones fallaron", receipts.len());
    }
    Ok(())
}
