use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Price list of a single eldercare facility as returned by the
/// schema-constrained pricing extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSheet {
    /// Full official name of the facility.
    pub name: String,
    pub address: Address,
    /// Date the price list becomes valid, `YYYY-MM-DD`.
    pub effective_date: String,
    pub room_pricing: Vec<RoomPricing>,
    /// Daily credit for an announced absence, in EUR.
    pub absence_deduction_daily: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub number: String,
    pub post_code: String,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomPricing {
    pub room_type: String,
    /// Price per day in EUR.
    pub daily_rate: f64,
    /// Average monthly price in EUR (30.417 days).
    pub monthly_rate: f64,
}

/// One point of the availability time series shown on the site's chart.
///
/// Counts are kept as the JSON numbers the model returned, so `14` and
/// `14.0` both survive a load/save cycle unchanged. A count missing from an
/// older chart file loads as `None` and is omitted again on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartEntry {
    /// Calendar date, `YYYY-MM-DD`. Unique within a chart.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_spots: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_applications: Option<Number>,
}
