//! Persisted outputs of the extraction pipeline: dated availability
//! artifacts, per-facility pricing artifacts, and the availability chart.
//!
//! Files are plain JSON with no locking; one run at a time is assumed.

pub mod artifact;
pub mod chart;
pub mod error;

pub use artifact::{
    build_artifact, dated_artifact_path, ensure_dir, format_date, pricing_artifact_path,
    read_json, split_artifact, today_local, write_json, ArtifactMetadata, METADATA_KEY,
};
pub use chart::{chart_entry_from_extraction, rebuild_from_artifacts, ChartStore, RebuildReport, Upsert};
pub use error::ArtifactError;
