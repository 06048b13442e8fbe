//! Artifact files: extracted data plus a `_metadata` block.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ArtifactError;

pub const METADATA_KEY: &str = "_metadata";

/// Provenance recorded alongside every artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactMetadata {
    /// URL of the PDF the data came from.
    pub source: String,
    /// RFC 3339 UTC timestamp with millisecond precision.
    pub extracted_at: String,
    /// Identifier of the command that produced the artifact.
    pub script: String,
}

impl ArtifactMetadata {
    #[must_use]
    pub fn new(source: &str, script: &str) -> Self {
        Self::at(source, script, Utc::now())
    }

    #[must_use]
    pub fn at(source: &str, script: &str, extracted_at: DateTime<Utc>) -> Self {
        Self {
            source: source.to_owned(),
            extracted_at: extracted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            script: script.to_owned(),
        }
    }
}

/// Attach `metadata` to the extracted object under [`METADATA_KEY`].
///
/// Key order of the extraction is kept; an existing `_metadata` key is
/// overwritten in place.
///
/// # Errors
///
/// Returns [`ArtifactError::NotAnObject`] if `extracted` is not an object.
pub fn build_artifact(extracted: Value, metadata: &ArtifactMetadata) -> Result<Value, ArtifactError> {
    let mut map = match extracted {
        Value::Object(map) => map,
        other => {
            return Err(ArtifactError::NotAnObject {
                kind: json_kind(&other),
            })
        }
    };

    let metadata = serde_json::to_value(metadata).map_err(|e| ArtifactError::Json {
        path: METADATA_KEY.to_string(),
        source: e,
    })?;
    map.insert(METADATA_KEY.to_string(), metadata);

    Ok(Value::Object(map))
}

/// Split an artifact back into the extracted object and its metadata.
///
/// Returns `None` for the metadata when the block is absent or malformed.
#[must_use]
pub fn split_artifact(artifact: Value) -> (Value, Option<ArtifactMetadata>) {
    match artifact {
        Value::Object(mut map) => {
            let metadata = map
                .remove(METADATA_KEY)
                .and_then(|m| serde_json::from_value(m).ok());
            (Value::Object(map), metadata)
        }
        other => (other, None),
    }
}

/// `{data_dir}/YYYY-MM-DD.json`.
#[must_use]
pub fn dated_artifact_path(data_dir: &Path, date: NaiveDate) -> PathBuf {
    data_dir.join(format!("{}.json", format_date(date)))
}

/// `{pricing_dir}/{slug}.json` where the slug is derived from the facility name.
///
/// # Errors
///
/// Returns [`ArtifactError::EmptySlug`] if the name has no usable characters.
pub fn pricing_artifact_path(pricing_dir: &Path, facility_name: &str) -> Result<PathBuf, ArtifactError> {
    let slug = domovi_core::slugify(facility_name);
    if slug.is_empty() {
        return Err(ArtifactError::EmptySlug {
            name: facility_name.to_owned(),
        });
    }
    Ok(pricing_dir.join(format!("{slug}.json")))
}

/// The current local calendar date.
#[must_use]
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Create `dir` and any missing parents.
///
/// # Errors
///
/// Returns [`ArtifactError::Io`] if the directory cannot be created.
pub fn ensure_dir(dir: &Path) -> Result<(), ArtifactError> {
    std::fs::create_dir_all(dir).map_err(|e| ArtifactError::Io {
        path: dir.display().to_string(),
        source: e,
    })
}

/// Write `value` as two-space-indented JSON, replacing any existing file.
///
/// # Errors
///
/// Returns [`ArtifactError::Json`] if serialization fails or
/// [`ArtifactError::Io`] if the file cannot be written.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ArtifactError> {
    let rendered = serde_json::to_string_pretty(value).map_err(|e| ArtifactError::Json {
        path: path.display().to_string(),
        source: e,
    })?;
    std::fs::write(path, rendered).map_err(|e| ArtifactError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

/// Read and deserialize a JSON file.
///
/// # Errors
///
/// Returns [`ArtifactError::Io`] if the file cannot be read or
/// [`ArtifactError::Json`] if it does not parse as `T`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let content = std::fs::read_to_string(path).map_err(|e| ArtifactError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| ArtifactError::Json {
        path: path.display().to_string(),
        source: e,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "artifact_test.rs"]
mod tests;
