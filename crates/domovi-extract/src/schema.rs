use serde_json::{json, Value};

pub const PRICING_SCHEMA_NAME: &str = "eldercare_pricing";

/// JSON schema for a facility price list. Mirrors
/// [`domovi_core::PricingSheet`]; keep the two in step.
#[must_use]
pub fn pricing_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": {
                "type": "string",
                "description": "Full official name of the facility"
            },
            "address": {
                "type": "object",
                "properties": {
                    "street": { "type": "string", "description": "The name of the street" },
                    "number": { "type": "string", "description": "The building or house number" },
                    "post_code": { "type": "string", "description": "The postal/zip code" },
                    "city": { "type": "string", "description": "The city or settlement name" }
                },
                "required": ["street", "number", "post_code", "city"]
            },
            "effective_date": {
                "type": "string",
                "description": "The date the price list becomes valid (ISO format YYYY-MM-DD)"
            },
            "room_pricing": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "room_type": {
                            "type": "string",
                            "description": "Description of the room type and its features"
                        },
                        "daily_rate": {
                            "type": "number",
                            "description": "The price per day in EUR"
                        },
                        "monthly_rate": {
                            "type": "number",
                            "description": "The average monthly price (based on 30.417 days)"
                        }
                    },
                    "required": ["room_type", "daily_rate", "monthly_rate"]
                },
                "description": "A list of available room configurations and their total costs"
            },
            "absence_deduction_daily": {
                "type": "number",
                "description": "The daily credit/discount for announced absence"
            }
        },
        "required": ["name", "address", "effective_date", "room_pricing", "absence_deduction_daily"]
    })
}
