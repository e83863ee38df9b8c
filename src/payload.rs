//! QR payload carried on product labels.
//!
//! The QR symbol holds a small JSON record rather than the bare SKU, so a
//! scanner can show the price and product details without a lookup.
//!
//! ```
//! use skulabel::payload::ProductPayload;
//!
//! let payload = ProductPayload::minimal("PE/PJ02-2399-AGZKO");
//! assert_eq!(payload.to_json().unwrap(), r#"{"sku":"PE/PJ02-2399-AGZKO","mrp":"0.00"}"#);
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// SKU used when a payload cannot be read.
pub const UNKNOWN_SKU: &str = "UNKNOWN";

/// Product record serialized into the QR symbol.
///
/// Reading is lenient field by field: strings and numbers are accepted as
/// text, and a field of any other type reads as missing without discarding
/// the rest of the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[serde(default, deserialize_with = "lenient_text")]
    pub sku: String,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub manufacturer: Option<String>,
    /// Retail price with two decimals, e.g. `"1299.00"`.
    #[serde(default, deserialize_with = "lenient_text")]
    pub mrp: String,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_data: Option<String>,
}

impl ProductPayload {
    /// Full record as attached to a freshly generated SKU.
    pub fn new(
        sku: impl Into<String>,
        category: impl Into<String>,
        manufacturer: impl Into<String>,
        retail_price: f64,
        additional_data: impl Into<String>,
    ) -> Self {
        Self {
            sku: sku.into(),
            category: Some(category.into()),
            manufacturer: Some(manufacturer.into()),
            mrp: format_mrp(retail_price),
            additional_data: Some(additional_data.into()),
        }
    }

    /// SKU-only record with a zero price.
    pub fn minimal(sku: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            category: None,
            manufacturer: None,
            mrp: format_mrp(0.0),
            additional_data: None,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a payload, logging and returning `None` on malformed JSON.
    pub fn parse(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(payload) => Some(payload),
            Err(e) => {
                warn!(error = %e, "Could not parse QR payload");
                None
            }
        }
    }

    /// Parse a payload, substituting an `UNKNOWN` record when unreadable
    /// and an `UNKNOWN` SKU when the record has none.
    pub fn parse_or_unknown(json: &str) -> Self {
        let mut payload = Self::parse(json).unwrap_or_else(|| Self::minimal(UNKNOWN_SKU));
        if payload.sku.is_empty() {
            payload.sku = UNKNOWN_SKU.to_string();
        }
        payload
    }
}

fn text_of(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(text_of(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_opt_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(text_of(Value::deserialize(deserializer)?))
}

/// Format a price with exactly two decimals.
pub fn format_mrp(price: f64) -> String {
    format!("{:.2}", price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_payload_field_names() {
        let payload = ProductPayload::new("PE/PJ02-2399-AGZKO", "Pendant", "Pj Gems", 2399.5, "");
        let json = payload.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"sku":"PE/PJ02-2399-AGZKO","category":"Pendant","manufacturer":"Pj Gems","mrp":"2399.50","additionalData":""}"#
        );
    }

    #[test]
    fn test_parse_roundtrip() {
        let payload = ProductPayload::new("RI/AB-0100-QWERT", "Ring", "Ab", 100.0, "gold");
        let parsed = ProductPayload::parse(&payload.to_json().unwrap()).unwrap();
        assert_eq!(parsed, payload);
    }

    #[test]
    fn test_parse_tolerates_missing_fields() {
        let parsed = ProductPayload::parse(r#"{"sku":"X1"}"#).unwrap();
        assert_eq!(parsed.sku, "X1");
        assert_eq!(parsed.mrp, "");
        assert_eq!(parsed.category, None);
    }

    #[test]
    fn test_unreadable_payload_falls_back() {
        assert!(ProductPayload::parse("not json").is_none());
        let fallback = ProductPayload::parse_or_unknown("not json");
        assert_eq!(fallback.sku, UNKNOWN_SKU);
        assert_eq!(fallback.mrp, "0.00");

        let no_sku = ProductPayload::parse_or_unknown(r#"{"mrp":"15.00"}"#);
        assert_eq!(no_sku.sku, UNKNOWN_SKU);
        assert_eq!(no_sku.mrp, "15.00");
    }

    #[test]
    fn test_mistyped_fields_keep_the_record() {
        let parsed = ProductPayload::parse_or_unknown(
            r#"{"sku":"AB-1","mrp":12,"category":["Ring"],"manufacturer":7,"additionalData":null}"#,
        );
        assert_eq!(parsed.sku, "AB-1");
        assert_eq!(parsed.mrp, "12");
        assert_eq!(parsed.category, None);
        assert_eq!(parsed.manufacturer.as_deref(), Some("7"));
        assert_eq!(parsed.additional_data, None);

        let object_sku = ProductPayload::parse_or_unknown(r#"{"sku":{"id":1},"mrp":"9.50"}"#);
        assert_eq!(object_sku.sku, UNKNOWN_SKU);
        assert_eq!(object_sku.mrp, "9.50");
    }

    #[test]
    fn test_format_mrp() {
        assert_eq!(format_mrp(12.0), "12.00");
        assert_eq!(format_mrp(0.126), "0.13");
        assert_eq!(format_mrp(1999.999), "2000.00");
    }
}
