//! Scan command - extract and score a single resume.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use resumescan_core::models::application::ScannedApplication;
use resumescan_core::pipeline::scan_file_async;

use super::resolve_keywords;

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Resume file (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Comma-separated keywords (default: scoring.keywords from config)
    #[arg(short, long)]
    keywords: Option<String>,

    /// Applicant name or email to record
    #[arg(long)]
    applicant: Option<String>,

    /// Job posting the resume is scored for
    #[arg(long)]
    job: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also print the extracted text (text format only)
    #[arg(long)]
    show_text: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::config::load(config_path)?;
    let keywords = resolve_keywords(args.keywords.as_deref(), &config)?;

    info!("Scanning {} against {} keywords", args.input.display(), keywords.len());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Scanning {}...", args.input.display()));

    let outcome = scan_file_async(args.input.clone(), &keywords, &config.extraction).await;
    pb.finish_and_clear();

    let outcome = outcome.with_context(|| format!("Failed to scan {}", args.input.display()))?;

    let mut application = ScannedApplication::new(&args.input, outcome.report);
    if let Some(applicant) = &args.applicant {
        application = application.with_applicant(applicant);
    }
    if let Some(job) = &args.job {
        application = application.with_job(job);
    }

    let mut output = format_application(&application, args.format)?;
    if args.show_text && matches!(args.format, OutputFormat::Text) {
        output.push_str("\nExtracted text:\n");
        output.push_str(&outcome.document.text);
    }

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_application(
    application: &ScannedApplication,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(application)?),
        OutputFormat::Csv => format_csv(std::slice::from_ref(application)),
        OutputFormat::Text => Ok(format_text(application)),
    }
}

/// Render applications as CSV, one row each.
pub fn format_csv(applications: &[ScannedApplication]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "applicant",
        "job",
        "resume_path",
        "score",
        "matched",
        "missing",
        "scanned_at",
    ])?;

    for app in applications {
        wtr.write_record([
            app.applicant.as_deref().unwrap_or(""),
            app.job.as_deref().unwrap_or(""),
            &app.resume_path.display().to_string(),
            &app.score.to_string(),
            &app.matched.join(";"),
            &app.missing.join(";"),
            &app.scanned_at.to_rfc3339(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(application: &ScannedApplication) -> String {
    let mut output = String::new();

    output.push_str(&format!("Resume: {}\n", application.resume_path.display()));
    if let Some(applicant) = &application.applicant {
        output.push_str(&format!("Applicant: {}\n", applicant));
    }
    if let Some(job) = &application.job {
        output.push_str(&format!("Job: {}\n", job));
    }
    output.push_str(&format!("Score: {}%\n", application.score));
    output.push_str(&format!("Matched: {}\n", application.matched.join(", ")));
    output.push_str(&format!("Missing: {}\n", application.missing.join(", ")));

    output
}
