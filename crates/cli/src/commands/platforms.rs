use crier_orchestrator::Orchestrator;

use crate::OutputFormat;

pub fn run(orchestrator: &Orchestrator, format: OutputFormat) -> anyhow::Result<()> {
    let platforms = orchestrator.platforms();
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&platforms)?);
        }
        OutputFormat::Text => {
            println!("{} platforms:", platforms.len());
            for platform in &platforms {
                println!("  {platform}");
            }
        }
    }
    Ok(())
}
