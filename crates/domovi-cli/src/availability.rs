//! `availability`: extract the daily availability report, write the dated
//! artifact and update the chart.
//!
//! Any failure aborts the run.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::NaiveDate;
use domovi_artifacts::{
    build_artifact, chart_entry_from_extraction, dated_artifact_path, ensure_dir, format_date,
    today_local, write_json, ArtifactMetadata, ChartStore, Upsert,
};
use domovi_core::{load_prompt, AppConfig, ChartEntry, SourcePaths};
use domovi_extract::{extract_json, CompletionBackend, ExtractionRequest, OpenRouterClient};

pub(crate) const SCRIPT: &str = "domovi-cli availability";

/// Paths and chart point produced by one availability run.
#[derive(Debug)]
pub(crate) struct AvailabilityOutcome {
    pub artifact_path: PathBuf,
    pub entry: ChartEntry,
    /// `None` on a dry run.
    pub upsert: Option<Upsert>,
}

/// Run the availability extraction with the configured client and prompt.
///
/// # Errors
///
/// Returns an error if the prompt cannot be loaded, the extraction fails,
/// the result lacks the grand totals, or a file cannot be written.
pub(crate) async fn run_availability(
    config: &AppConfig,
    url_override: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let paths = SourcePaths::in_dir(&config.scripts_dir);
    let prompt = load_prompt(&paths.availability_prompt)?;
    let client = OpenRouterClient::from_config(config).context("failed to build OpenRouter client")?;
    let url = url_override.unwrap_or(&config.availability_pdf_url);

    let request = ExtractionRequest::availability(url, &prompt, &config.model);
    let outcome = process_availability(
        &client,
        &request,
        &config.data_dir,
        &config.chart_path(),
        today_local(),
        dry_run,
    )
    .await?;

    match outcome.upsert {
        None => println!(
            "dry-run: would write {} and chart entry {}",
            outcome.artifact_path.display(),
            serde_json::to_string(&outcome.entry)?
        ),
        Some(upsert) => tracing::info!(
            path = %outcome.artifact_path.display(),
            ?upsert,
            "Extraction complete!"
        ),
    }

    Ok(())
}

/// Extract one availability report and persist it for `date`.
///
/// The chart point is derived and the existing chart loaded before anything
/// is written, so either failing leaves the data directory untouched.
pub(crate) async fn process_availability<B: CompletionBackend>(
    backend: &B,
    request: &ExtractionRequest,
    data_dir: &Path,
    chart_path: &Path,
    date: NaiveDate,
    dry_run: bool,
) -> anyhow::Result<AvailabilityOutcome> {
    tracing::info!(url = %request.source_url, "Extracting data from PDF");
    tracing::info!(model = %request.model, "Using model");

    let extracted = extract_json(backend, request)
        .await
        .with_context(|| format!("extraction failed for {}", request.source_url))?;

    let date_key = format_date(date);
    let entry = chart_entry_from_extraction(&date_key, &extracted)?;
    let artifact = build_artifact(extracted, &ArtifactMetadata::new(&request.source_url, SCRIPT))?;
    let artifact_path = dated_artifact_path(data_dir, date);

    if dry_run {
        return Ok(AvailabilityOutcome {
            artifact_path,
            entry,
            upsert: None,
        });
    }

    // An unreadable chart must fail the run before the dated file exists.
    let mut chart = ChartStore::load(chart_path)?;

    ensure_dir(data_dir)?;
    write_json(&artifact_path, &artifact)?;
    tracing::info!(path = %artifact_path.display(), "Data saved");

    let upsert = chart.upsert(entry.clone());
    chart.save(chart_path)?;
    tracing::info!(
        path = %chart_path.display(),
        date = %entry.date,
        ?upsert,
        entries = chart.len(),
        "Chart data updated"
    );

    Ok(AvailabilityOutcome {
        artifact_path,
        entry,
        upsert: Some(upsert),
    })
}

#[cfg(test)]
#[path = "availability_test.rs"]
mod tests;
