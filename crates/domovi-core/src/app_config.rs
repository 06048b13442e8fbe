use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "anthropic/claude-sonnet-4";
pub const DEFAULT_API_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_AVAILABILITY_PDF_URL: &str = "https://servis.ssz-slo.si/porocilo.pdf";

#[derive(Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub model: String,
    pub api_base_url: String,
    pub data_dir: PathBuf,
    pub scripts_dir: PathBuf,
    pub availability_pdf_url: String,
    /// Whole-request timeout. `None` leaves the transport default in place.
    pub request_timeout_secs: Option<u64>,
    pub log_level: String,
}

impl AppConfig {
    /// Directory holding one JSON artifact per facility.
    #[must_use]
    pub fn pricing_dir(&self) -> PathBuf {
        self.data_dir.join("pricing")
    }

    #[must_use]
    pub fn chart_path(&self) -> PathBuf {
        self.data_dir.join("chart.json")
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"[redacted]")
            .field("model", &self.model)
            .field("api_base_url", &self.api_base_url)
            .field("data_dir", &self.data_dir)
            .field("scripts_dir", &self.scripts_dir)
            .field("availability_pdf_url", &self.availability_pdf_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}
