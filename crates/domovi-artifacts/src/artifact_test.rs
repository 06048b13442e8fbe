use chrono::TimeZone;
use serde_json::json;

use super::*;

fn fixed_metadata() -> ArtifactMetadata {
    let at = Utc.with_ymd_and_hms(2026, 3, 1, 6, 30, 5).unwrap();
    ArtifactMetadata::at(
        "https://servis.ssz-slo.si/porocilo.pdf",
        "domovi-cli availability",
        at,
    )
}

#[test]
fn metadata_serializes_with_iso_millis_and_camel_case() {
    let value = serde_json::to_value(fixed_metadata()).unwrap();
    assert_eq!(
        value,
        json!({
            "source": "https://servis.ssz-slo.si/porocilo.pdf",
            "extractedAt": "2026-03-01T06:30:05.000Z",
            "script": "domovi-cli availability"
        })
    );
}

#[test]
fn build_artifact_appends_metadata_after_extracted_keys() {
    let extracted = json!({ "zeta": 1, "alpha": { "nested": true } });
    let artifact = build_artifact(extracted, &fixed_metadata()).unwrap();

    let keys: Vec<&str> = artifact
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, ["zeta", "alpha", "_metadata"]);
    assert_eq!(artifact["_metadata"]["script"], "domovi-cli availability");
}

#[test]
fn build_artifact_replaces_existing_metadata() {
    let extracted = json!({ "_metadata": { "source": "model-invented" }, "a": 1 });
    let artifact = build_artifact(extracted, &fixed_metadata()).unwrap();
    assert_eq!(
        artifact["_metadata"]["source"],
        "https://servis.ssz-slo.si/porocilo.pdf"
    );
    assert_eq!(artifact.as_object().unwrap().len(), 2);
}

#[test]
fn build_artifact_rejects_non_objects() {
    let err = build_artifact(json!([1, 2]), &fixed_metadata()).unwrap_err();
    assert!(matches!(err, ArtifactError::NotAnObject { kind: "array" }));
}

#[test]
fn artifact_file_round_trips() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("2026-03-01.json");
    let extracted = json!({
        "data": { "grandTotals": { "allApplications": { "freeSpots": 14, "active": 3502 } } },
        "reportDate": "2026-02-28",
        "homes": [ { "name": "Dom Tabor", "free": 0 } ]
    });

    let artifact = build_artifact(extracted.clone(), &fixed_metadata()).unwrap();
    write_json(&path, &artifact).unwrap();

    let read_back: Value = read_json(&path).unwrap();
    assert_eq!(read_back, artifact);

    let (data, metadata) = split_artifact(read_back);
    assert_eq!(data, extracted);
    assert_eq!(metadata, Some(fixed_metadata()));
}

#[test]
fn write_json_uses_two_space_indent_and_overwrites() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("out.json");

    write_json(&path, &json!({ "a": 1 })).unwrap();
    write_json(&path, &json!({ "b": [2] })).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "{\n  \"b\": [\n    2\n  ]\n}");
}

#[test]
fn read_json_reports_path_on_parse_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{").unwrap();

    let err = read_json::<Value>(&path).unwrap_err();
    assert!(matches!(err, ArtifactError::Json { ref path, .. } if path.ends_with("broken.json")));
}

#[test]
fn dated_path_uses_iso_date() {
    let date = NaiveDate::from_ymd_opt(2026, 1, 7).unwrap();
    assert_eq!(
        dated_artifact_path(Path::new("src/data"), date),
        PathBuf::from("src/data/2026-01-07.json")
    );
}

#[test]
fn pricing_path_is_slugified_name() {
    let path = pricing_artifact_path(Path::new("pricing"), "Dom Starejših Maribor").unwrap();
    assert_eq!(path, PathBuf::from("pricing/dom-starejsih-maribor.json"));
}

#[test]
fn pricing_path_rejects_names_without_alphanumerics() {
    let err = pricing_artifact_path(Path::new("pricing"), "***").unwrap_err();
    assert!(matches!(err, ArtifactError::EmptySlug { .. }));
}

#[test]
fn ensure_dir_creates_nested_directories() {
    let dir = tempfile::TempDir::new().unwrap();
    let nested = dir.path().join("src").join("data").join("pricing");
    ensure_dir(&nested).unwrap();
    assert!(nested.is_dir());
    ensure_dir(&nested).unwrap();
}
