use std::path::PathBuf;

use crate::app_config::{
    AppConfig, DEFAULT_API_BASE_URL, DEFAULT_AVAILABILITY_PDF_URL, DEFAULT_MODEL,
};
use crate::ConfigError;

/// Name of the env var carrying the `OpenRouter` bearer credential.
pub const API_KEY_VAR: &str = "OPEN_ROUTER";

/// Load application configuration through a caller-supplied env-var lookup,
/// normally `std::env::var` after the caller has loaded any `.env` file.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_with<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    build_app_config(lookup)
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    // A blank value is as good as a missing one for every variable we read.
    let present = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let require = |var: &str| -> Result<String, ConfigError> {
        present(var).ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default =
        |var: &str, default: &str| -> String { present(var).unwrap_or_else(|| default.to_string()) };

    let parse_optional_u64 = |var: &str| -> Result<Option<u64>, ConfigError> {
        present(var)
            .map(|raw| {
                raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    };

    let api_key = require(API_KEY_VAR)?;
    let model = or_default("MODEL", DEFAULT_MODEL);
    let api_base_url = or_default("DOMOVI_API_BASE_URL", DEFAULT_API_BASE_URL);
    let data_dir = PathBuf::from(or_default("DOMOVI_DATA_DIR", "./src/data"));
    let scripts_dir = PathBuf::from(or_default("DOMOVI_SCRIPTS_DIR", "./scripts"));
    let availability_pdf_url =
        or_default("DOMOVI_AVAILABILITY_PDF_URL", DEFAULT_AVAILABILITY_PDF_URL);
    let request_timeout_secs = parse_optional_u64("DOMOVI_REQUEST_TIMEOUT_SECS")?;
    let log_level = or_default("DOMOVI_LOG_LEVEL", "info");

    if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
        return Err(ConfigError::InvalidEnvVar {
            var: "DOMOVI_API_BASE_URL".to_string(),
            reason: format!("'{api_base_url}' is not an http(s) URL"),
        });
    }

    Ok(AppConfig {
        api_key,
        model,
        api_base_url,
        data_dir,
        scripts_dir,
        availability_pdf_url,
        request_timeout_secs,
        log_level,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
