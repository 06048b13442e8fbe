//! Loading of the prompt texts and the pricing source list.
//!
//! These are plain files kept next to the site so non-developers can edit
//! prompts and add facilities without touching code.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::ConfigError;

/// Locations of the prompt/source files inside the scripts directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub availability_prompt: PathBuf,
    pub pricing_prompt: PathBuf,
    pub pricing_urls: PathBuf,
}

impl SourcePaths {
    #[must_use]
    pub fn in_dir(scripts_dir: &Path) -> Self {
        Self {
            availability_prompt: scripts_dir.join("prompt.txt"),
            pricing_prompt: scripts_dir.join("pricing-prompt.txt"),
            pricing_urls: scripts_dir.join("pricing-urls.json"),
        }
    }
}

/// Read a prompt file verbatim.
///
/// # Errors
///
/// Returns [`ConfigError::SourceFileIo`] if the file cannot be read, or
/// [`ConfigError::Validation`] if it contains only whitespace.
pub fn load_prompt(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SourceFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    if content.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "prompt file {} is empty",
            path.display()
        )));
    }

    Ok(content)
}

/// Load and validate the list of pricing PDF URLs (a JSON array of strings).
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_source_urls(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SourceFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let urls: Vec<String> =
        serde_json::from_str(&content).map_err(|e| ConfigError::SourceFileParse {
            path: path.display().to_string(),
            source: e,
        })?;

    validate_source_urls(&urls)?;

    Ok(urls)
}

fn validate_source_urls(urls: &[String]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for url in urls {
        if url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "source URL must be non-empty".to_string(),
            ));
        }

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "source URL '{url}' must start with http:// or https://"
            )));
        }

        if !seen.insert(url.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate source URL: '{url}'"
            )));
        }
    }

    Ok(())
}
