use std::fmt::Write as _;

use crier_orchestrator::PublishReceipt;

use crate::OutputFormat;

pub fn print_receipts(receipts: &[PublishReceipt], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => match receipts {
            [single] => println!("{}", serde_json::to_string_pretty(single)?),
            many => println!("{}", serde_json::to_string_pretty(many)?),
        },
        OutputFormat::Text => {
            for receipt in receipts {
                println!("{}", render(receipt));
            }
        }
    }
    Ok(())
}

/// One line per receipt, e.g. `[OK ] facebook | post: 123`.
pub fn render(receipt: &PublishReceipt) -> String {
    let platform = receipt.platform();
    match receipt.post_id() {
        Some(post_id) => {
            let mut line = format!("[OK ] {platform} | post: {post_id}");
            if let Some(url) = &receipt.media_url {
                let _ = write!(line, " | media: {url}");
            }
            line
        }
        None => format!(
            "[ERR] {platform} | {}",
            receipt.error().unwrap_or("Error desconocido")
        ),
    }
}

#[cfg(test)]
mod tests {
    use crier_core::{Platform, PublishOutcome};

    use super::*;

    #[test]
    fn renders_success_with_media() {
        let receipt = PublishReceipt::new(PublishOutcome::published(Platform::Facebook, "123"))
            .with_media(Some("https://cdn.example/a.png".into()), None);
        assert_eq!(
            render(&receipt),
            "[OK ] facebook | post: 123 | media: https://cdn.example/a.png"
        );
    }

    #[test]
    fn renders_failure() {
        let receipt = PublishReceipt::failed(Platform::Tiktok, "Token no configurado");
        assert_eq!(render(&receipt), "[ERR] tiktok | Token no configurado");
    }
}
