use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error for {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Artifacts are built by adding a key to the extracted object, so the
    /// extraction must be an object.
    #[error("extracted data is not a JSON object (got {kind})")]
    NotAnObject { kind: &'static str },

    #[error("missing or non-numeric field {path} in extracted data")]
    MissingField { path: String },

    #[error("facility name '{name}' produces an empty file name")]
    EmptySlug { name: String },
}
