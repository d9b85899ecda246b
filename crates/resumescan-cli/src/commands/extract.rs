//! Extract command - print the plain text of a resume.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use console::style;
use tracing::info;

use resumescan_core::pipeline::extract_file_async;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Resume file (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::config::load(config_path)?;

    let document = extract_file_async(args.input.clone(), &config.extraction)
        .await
        .with_context(|| format!("Failed to extract {}", args.input.display()))?;

    info!(
        "Extracted {} chars from {} document",
        document.text.len(),
        document.format
    );

    if let Some(output_path) = &args.output {
        fs::write(output_path, &document.text)?;
        println!(
            "{} Text written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", document.text);
    }

    Ok(())
}
