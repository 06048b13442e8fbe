use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("OPEN_ROUTER", "sk-or-test");
    m
}

#[test]
fn build_app_config_fails_without_api_key() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "OPEN_ROUTER"),
        "expected MissingEnvVar(OPEN_ROUTER), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_api_key_as_missing() {
    let mut map = HashMap::new();
    map.insert("OPEN_ROUTER", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "OPEN_ROUTER"),
        "expected MissingEnvVar(OPEN_ROUTER), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.api_key, "sk-or-test");
    assert_eq!(cfg.model, "anthropic/claude-sonnet-4");
    assert_eq!(cfg.api_base_url, "https://openrouter.ai/api/v1");
    assert_eq!(cfg.data_dir, PathBuf::from("./src/data"));
    assert_eq!(cfg.scripts_dir, PathBuf::from("./scripts"));
    assert_eq!(
        cfg.availability_pdf_url,
        "https://servis.ssz-slo.si/porocilo.pdf"
    );
    assert!(cfg.request_timeout_secs.is_none());
    assert_eq!(cfg.log_level, "info");
}

#[test]
fn model_override() {
    let mut map = full_env();
    map.insert("MODEL", "google/gemini-2.5-flash");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.model, "google/gemini-2.5-flash");
}

#[test]
fn blank_model_falls_back_to_default() {
    let mut map = full_env();
    map.insert("MODEL", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.model, "anthropic/claude-sonnet-4");
}

#[test]
fn request_timeout_secs_override() {
    let mut map = full_env();
    map.insert("DOMOVI_REQUEST_TIMEOUT_SECS", "120");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, Some(120));
}

#[test]
fn request_timeout_secs_invalid() {
    let mut map = full_env();
    map.insert("DOMOVI_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "DOMOVI_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(DOMOVI_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn api_base_url_must_be_http() {
    let mut map = full_env();
    map.insert("DOMOVI_API_BASE_URL", "ftp://example.com");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "DOMOVI_API_BASE_URL"),
        "expected InvalidEnvVar(DOMOVI_API_BASE_URL), got: {result:?}"
    );
}

#[test]
fn derived_paths_live_under_data_dir() {
    let mut map = full_env();
    map.insert("DOMOVI_DATA_DIR", "/srv/site/data");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.chart_path(), PathBuf::from("/srv/site/data/chart.json"));
    assert_eq!(cfg.pricing_dir(), PathBuf::from("/srv/site/data/pricing"));
}

#[test]
fn debug_output_redacts_api_key() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("sk-or-test"), "{rendered}");
    assert!(rendered.contains("[redacted]"));
}
