//! `pricing`: extract every facility price list into `pricing/{slug}.json`.
//!
//! Sources are processed one at a time. A failing source is logged and
//! skipped so one bad PDF does not block the rest; the run itself still
//! succeeds.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use domovi_artifacts::{build_artifact, ensure_dir, pricing_artifact_path, write_json, ArtifactMetadata};
use domovi_core::{load_prompt, load_source_urls, AppConfig, SourcePaths};
use domovi_extract::{extract_pricing, CompletionBackend, ExtractionRequest, OpenRouterClient};

pub(crate) const SCRIPT: &str = "domovi-cli pricing";

/// Per-source results of a pricing run.
#[derive(Debug, Default)]
pub(crate) struct PricingSummary {
    /// `(source URL, artifact path)` for every source that succeeded.
    pub written: Vec<(String, PathBuf)>,
    /// `(source URL, error message)` for every source that failed.
    pub failed: Vec<(String, String)>,
}

/// Run the pricing extraction over the configured source list.
///
/// # Errors
///
/// Returns an error only for run-level problems: unreadable prompt or
/// source list, an `--only` URL that is not configured, an unusable client,
/// or an output directory that cannot be created.
pub(crate) async fn run_pricing(
    config: &AppConfig,
    only: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let paths = SourcePaths::in_dir(&config.scripts_dir);
    let prompt = load_prompt(&paths.pricing_prompt)?;
    let mut urls = load_source_urls(&paths.pricing_urls)?;

    if let Some(only) = only {
        if !urls.iter().any(|u| u == only) {
            anyhow::bail!(
                "'{only}' is not listed in {}",
                paths.pricing_urls.display()
            );
        }
        urls.retain(|u| u == only);
    }

    if urls.is_empty() {
        println!("no pricing sources configured; nothing to do");
        return Ok(());
    }

    let client = OpenRouterClient::from_config(config).context("failed to build OpenRouter client")?;
    let summary = process_pricing(
        &client,
        &urls,
        &prompt,
        &config.model,
        &config.pricing_dir(),
        dry_run,
    )
    .await?;

    if dry_run {
        for (url, path) in &summary.written {
            println!("dry-run: would write {} from {url}", path.display());
        }
    }

    if !summary.failed.is_empty() {
        tracing::warn!(
            failed = summary.failed.len(),
            total = urls.len(),
            "some pricing sources failed"
        );
    }
    tracing::info!(
        succeeded = summary.written.len(),
        failed = summary.failed.len(),
        "Pricing extraction complete!"
    );

    Ok(())
}

/// Extract each URL in turn, isolating per-source failures.
///
/// # Errors
///
/// Returns an error only if `pricing_dir` cannot be created.
pub(crate) async fn process_pricing<B: CompletionBackend>(
    backend: &B,
    urls: &[String],
    prompt: &str,
    model: &str,
    pricing_dir: &Path,
    dry_run: bool,
) -> anyhow::Result<PricingSummary> {
    if !dry_run {
        ensure_dir(pricing_dir)?;
    }

    let mut summary = PricingSummary::default();
    let mut written_by: HashMap<PathBuf, &str> = HashMap::new();

    for url in urls {
        match process_source(backend, url, prompt, model, pricing_dir, dry_run).await {
            Ok(path) => {
                if let Some(previous) = written_by.insert(path.clone(), url) {
                    tracing::warn!(
                        path = %path.display(),
                        previous = %previous,
                        url = %url,
                        "two sources map to the same facility file; keeping the later one"
                    );
                }
                summary.written.push((url.clone(), path));
            }
            Err(e) => {
                tracing::error!(url = %url, error = %format!("{e:#}"), "Error extracting pricing");
                summary.failed.push((url.clone(), format!("{e:#}")));
            }
        }
    }

    Ok(summary)
}

async fn process_source<B: CompletionBackend>(
    backend: &B,
    url: &str,
    prompt: &str,
    model: &str,
    pricing_dir: &Path,
    dry_run: bool,
) -> anyhow::Result<PathBuf> {
    tracing::info!(url = %url, "Extracting pricing");

    let request = ExtractionRequest::pricing(url, prompt, model);
    let (extracted, sheet) = extract_pricing(backend, &request).await?;

    let path = pricing_artifact_path(pricing_dir, &sheet.name)?;
    let artifact = build_artifact(extracted, &ArtifactMetadata::new(url, SCRIPT))?;

    if !dry_run {
        write_json(&path, &artifact)?;
        tracing::info!(
            path = %path.display(),
            facility = %sheet.name,
            rooms = sheet.room_pricing.len(),
            "Saved"
        );
    }

    Ok(path)
}

#[cfg(test)]
#[path = "pricing_test.rs"]
mod tests;
