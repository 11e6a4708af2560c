//! Response parsing for the First Data transaction APIs.
//!
//! Both response families share one field-access core: a loose-typed map of
//! whatever the remote sent, with null-safe accessors that normalize scalars
//! to strings. The remote is not consistent about field types (`"00"` vs
//! `0`, `"1"` vs `1`), so nothing here assumes a field's JSON type and no
//! accessor panics on a missing or oddly-typed field.
//!
//! [`PayeezyResponse`] wraps JSON replies from the signed v12+ API;
//! [`GlobalResponse`] wraps URL-encoded replies from the legacy API. Each
//! carries its own success rule; everything else is shared.

pub mod global;
pub mod payeezy;

use std::collections::BTreeMap;

use serde_json::{Map, Value};

pub use global::GlobalResponse;
pub use payeezy::PayeezyResponse;

/// Loose-typed response field map shared by both response families.
///
/// Accessors are total: missing keys, JSON nulls, and unexpected types all
/// come back as `None`.
#[derive(Debug, Clone, Default)]
pub struct ResponseFields {
    fields: Map<String, Value>,
}

impl ResponseFields {
    /// Wraps an already-parsed JSON object.
    #[must_use]
    pub fn from_json_object(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Collects URL-decoded pairs into a field map. A repeated key keeps its
    /// last value.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let fields = pairs.into_iter().map(|(key, value)| (key, Value::String(value))).collect();
        Self { fields }
    }

    /// Raw value for a key, exactly as the remote sent it.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Scalar field as text. Numbers and booleans normalize to string form
    /// (`605` → `"605"`, `true` → `"1"`); null, missing, and non-scalar
    /// values are `None`.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        self.fields.get(key).and_then(normalize_scalar)
    }

    /// Whether a loose-typed flag field holds the set value: number `1`,
    /// string `"1"`, or `true`.
    #[must_use]
    pub fn flag(&self, key: &str) -> bool {
        match self.fields.get(key) {
            Some(Value::Number(number)) => number.as_f64() == Some(1.0),
            Some(Value::String(text)) => text == "1",
            Some(Value::Bool(flag)) => *flag,
            _ => false,
        }
    }

    /// Client email echoed by the gateway.
    pub fn email(&self) -> Option<String> {
        self.text("client_email")
    }

    /// Card number, masked by the gateway.
    pub fn card_number(&self) -> Option<String> {
        self.text("cc_number")
    }

    /// Card type display name.
    pub fn card_type(&self) -> Option<String> {
        self.text("credit_card_type")
    }

    /// Processed amount.
    pub fn amount(&self) -> Option<String> {
        self.text("amount")
    }

    /// Echoed address block with scalar parts normalized to strings, when
    /// the reply carries one.
    #[must_use]
    pub fn address(&self) -> Option<BTreeMap<String, String>> {
        match self.fields.get("address") {
            Some(Value::Object(parts)) => Some(
                parts
                    .iter()
                    .filter_map(|(part, value)| {
                        normalize_scalar(value).map(|text| (part.clone(), text))
                    })
                    .collect(),
            ),
            _ => None,
        }
    }

    /// One part of the echoed address block: `address1`, `address2`, `city`,
    /// `state`, `zip`, `country_code`, `phone_number`, or `phone_type`
    /// (H/W/D/N).
    #[must_use]
    pub fn address_part(&self, part: &str) -> Option<String> {
        match self.fields.get("address") {
            Some(Value::Object(parts)) => parts.get(part).and_then(normalize_scalar),
            _ => None,
        }
    }

    /// Check number (ACH).
    pub fn check_number(&self) -> Option<String> {
        self.text("check_number")
    }

    /// Check type code (ACH), `P` or `C`.
    pub fn check_type(&self) -> Option<String> {
        self.text("check_type")
    }

    /// Release type (ACH).
    pub fn release_type(&self) -> Option<String> {
        self.text("release_type")
    }

    /// VIP flag (ACH).
    pub fn vip(&self) -> Option<String> {
        self.text("vip")
    }

    /// Clerk id (ACH).
    pub fn clerk_id(&self) -> Option<String> {
        self.text("clerk_id")
    }

    /// MICR line (ACH).
    pub fn micr(&self) -> Option<String> {
        self.text("micr")
    }

    /// E-commerce flag (ACH).
    pub fn ecommerce_flag(&self) -> Option<String> {
        self.text("ecommerce_flag")
    }

    /// Receipt text (ACH).
    pub fn ctr(&self) -> Option<String> {
        self.text("ctr")
    }
}

fn normalize_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(if *flag { "1" } else { "0" }.to_owned()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[allow(clippy::unreachable, reason = "helper unwraps the JSON object fixture")]
    fn fields_from(value: Value) -> ResponseFields {
        let Value::Object(map) = value else {
            unreachable!("fixture must be an object");
        };
        ResponseFields::from_json_object(map)
    }

    #[test]
    fn test_text_normalizes_scalars() {
        let fields = fields_from(json!({
            "bank_resp_code": 605,
            "exact_resp_code": "00",
            "vip": true,
            "micr": null,
        }));
        assert_eq!(fields.text("bank_resp_code").as_deref(), Some("605"));
        assert_eq!(fields.text("exact_resp_code").as_deref(), Some("00"));
        assert_eq!(fields.text("vip").as_deref(), Some("1"));
        assert_eq!(fields.text("micr"), None);
        assert_eq!(fields.text("absent"), None);
    }

    #[test]
    fn test_text_rejects_non_scalars() {
        let fields = fields_from(json!({ "address": { "city": "Billstown" } }));
        assert_eq!(fields.text("address"), None);
        assert!(fields.raw("address").is_some());
    }

    #[test]
    fn test_flag_variants() {
        for set in [json!(1), json!("1"), json!(true)] {
            let fields = fields_from(json!({ "transaction_approved": set }));
            assert!(fields.flag("transaction_approved"), "{set} should set the flag");
        }
        for unset in [json!(0), json!("0"), json!("00"), json!(false), json!(2), json!(null)] {
            let fields = fields_from(json!({ "transaction_approved": unset }));
            assert!(!fields.flag("transaction_approved"), "{unset} should not set the flag");
        }
        assert!(!ResponseFields::default().flag("transaction_approved"));
    }

    #[test]
    fn test_address_map_and_parts() {
        let fields = fields_from(json!({
            "address": {
                "address1": "123 Billing St",
                "zip": "12345",
                "city": "Billstown",
                "phone_type": "N",
                "state": "CA",
                "country_code": "US",
            }
        }));
        let address = fields.address().unwrap();
        assert_eq!(address.get("address1").map(String::as_str), Some("123 Billing St"));
        assert_eq!(address.get("zip").map(String::as_str), Some("12345"));
        assert_eq!(fields.address_part("city").as_deref(), Some("Billstown"));
        assert_eq!(fields.address_part("phone_type").as_deref(), Some("N"));
        assert_eq!(fields.address_part("phone_number"), None);
    }

    #[test]
    fn test_address_absent() {
        let fields = fields_from(json!({ "cc_number": "############1111" }));
        assert!(fields.address().is_none());
        assert!(fields.address_part("city").is_none());
        assert_eq!(fields.card_number().as_deref(), Some("############1111"));
    }

    #[test]
    fn test_ach_extras() {
        let fields = fields_from(json!({
            "check_number": "123",
            "check_type": "P",
            "release_type": "F",
            "vip": false,
            "clerk_id": "clerk-9",
            "micr": "021000021",
            "ecommerce_flag": 7,
            "ctr": "========= TRANSACTION RECORD =========",
        }));
        assert_eq!(fields.check_number().as_deref(), Some("123"));
        assert_eq!(fields.check_type().as_deref(), Some("P"));
        assert_eq!(fields.release_type().as_deref(), Some("F"));
        assert_eq!(fields.vip().as_deref(), Some("0"));
        assert_eq!(fields.clerk_id().as_deref(), Some("clerk-9"));
        assert_eq!(fields.micr().as_deref(), Some("021000021"));
        assert_eq!(fields.ecommerce_flag().as_deref(), Some("7"));
        assert!(fields.ctr().unwrap().contains("TRANSACTION RECORD"));
    }

    #[test]
    fn test_from_pairs_last_duplicate_wins() {
        let fields = ResponseFields::from_pairs(vec![
            ("exact_resp_code".to_owned(), "22".to_owned()),
            ("exact_resp_code".to_owned(), "00".to_owned()),
        ]);
        assert_eq!(fields.text("exact_resp_code").as_deref(), Some("00"));
    }
}
