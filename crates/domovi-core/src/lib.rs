//! Shared configuration and domain types for the domovi data pipeline.

pub mod app_config;
pub mod config;
pub mod error;
pub mod slug;
pub mod sources;
pub mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config_with, API_KEY_VAR};
pub use error::ConfigError;
pub use slug::slugify;
pub use sources::{load_prompt, load_source_urls, SourcePaths};
pub use types::{Address, ChartEntry, PricingSheet, RoomPricing};
