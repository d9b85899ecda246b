//! Batch command - score many resumes and rank them.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use futures_util::{StreamExt, stream};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use resumescan_core::models::application::{ScannedApplication, rank};
use resumescan_core::pipeline::scan_file_async;
use resumescan_core::{DocumentFormat, ScanOutcome};

use super::resolve_keywords;
use super::scan::{OutputFormat, format_csv};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Comma-separated keywords (default: scoring.keywords from config)
    #[arg(short, long)]
    keywords: Option<String>,

    /// Job posting the resumes are scored for
    #[arg(long)]
    job: Option<String>,

    /// Ranking output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Write a summary CSV (including failures) to this path
    #[arg(short, long)]
    summary: Option<PathBuf>,

    /// Number of resumes scanned concurrently
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Keep scanning past failed files; otherwise stop at the first failure
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of scanning a single file.
struct ScanResult {
    path: PathBuf,
    application: Option<ScannedApplication>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::config::load(config_path)?;
    let keywords = resolve_keywords(args.keywords.as_deref(), &config)?;

    // Expand glob pattern
    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_resume_file(p))
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} resumes to scan",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} resumes")?
            .progress_chars("=>-"),
    );

    let extraction = &config.extraction;
    let keywords = &keywords;
    let job = args.job.as_deref();
    let mut scans = std::pin::pin!(
        stream::iter(files)
            .map(|path| async move {
                let file_start = Instant::now();
                let outcome = scan_file_async(path.clone(), keywords, extraction).await;
                let processing_time_ms = file_start.elapsed().as_millis() as u64;
                to_scan_result(path, outcome, job, processing_time_ms)
            })
            .buffer_unordered(args.jobs.max(1))
    );

    let mut results = Vec::new();
    while let Some(result) = scans.next().await {
        pb.inc(1);
        if let Some(message) = &result.error {
            if args.continue_on_error {
                warn!("Failed to scan {}: {}", result.path.display(), message);
            } else {
                // Dropping the stream cancels scans that have not started
                pb.finish_and_clear();
                error!("Failed to scan {}: {}", result.path.display(), message);
                anyhow::bail!("Scanning failed for {}: {}", result.path.display(), message);
            }
        }
        results.push(result);
    }

    pb.finish_and_clear();
    results.sort_by(|a, b| a.path.cmp(&b.path));

    let failed: Vec<&ScanResult> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(summary_path) = &args.summary {
        write_summary(summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let mut ranked: Vec<ScannedApplication> = results
        .iter()
        .filter_map(|r| r.application.clone())
        .collect();
    rank(&mut ranked);

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&ranked)?,
        OutputFormat::Csv => format_csv(&ranked)?,
        OutputFormat::Text => format_ranking(&ranked),
    };
    println!("{}", output);

    eprintln!(
        "{} Scanned {} resumes in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(ranked.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for result in &failed {
            eprintln!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn is_resume_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(DocumentFormat::from_extension)
            .is_some()
}

fn to_scan_result(
    path: PathBuf,
    outcome: resumescan_core::Result<ScanOutcome>,
    job: Option<&str>,
    processing_time_ms: u64,
) -> ScanResult {
    match outcome {
        Ok(outcome) => {
            debug!("{} scored {}", path.display(), outcome.report.score);
            let mut application = ScannedApplication::new(&path, outcome.report);
            if let Some(job) = job {
                application = application.with_job(job);
            }
            ScanResult {
                path,
                application: Some(application),
                error: None,
                processing_time_ms,
            }
        }
        Err(e) => ScanResult {
            path,
            application: None,
            error: Some(e.to_string()),
            processing_time_ms,
        },
    }
}

fn format_ranking(ranked: &[ScannedApplication]) -> String {
    let mut output = String::new();

    output.push_str(&format!("{:>4}  {:>5}  {:<40}  {}\n", "#", "score", "resume", "matched"));
    for (i, app) in ranked.iter().enumerate() {
        output.push_str(&format!(
            "{:>4}  {:>4}%  {:<40}  {}\n",
            i + 1,
            app.score.value(),
            app.resume_path.display(),
            app.matched.join(", ")
        ));
    }

    output
}

fn write_summary(path: &Path, results: &[ScanResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "resume_path",
        "status",
        "score",
        "matched",
        "missing",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let resume_path = result.path.display().to_string();
        let time_ms = result.processing_time_ms.to_string();

        if let Some(app) = &result.application {
            wtr.write_record([
                resume_path.as_str(),
                "success",
                &app.score.to_string(),
                &app.matched.join(";"),
                &app.missing.join(";"),
                &time_ms,
                "",
            ])?;
        } else {
            wtr.write_record([
                resume_path.as_str(),
                "error",
                "",
                "",
                "",
                &time_ms,
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
