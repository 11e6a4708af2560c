//! Request bodies for the legacy Global Gateway e4 API (v11).
//!
//! The legacy surface takes URL-encoded form bodies and no request
//! signature; the merchant credentials inside the body are the only
//! authentication. Card operations only: ACH never shipped on this API.
//! Pairs with no value are dropped from the body rather than sent empty.

use std::fmt;

use url::form_urlencoded;

use crate::error::{GatewayError, Result};
use crate::instrument::card::card_type_name;
use crate::instrument::{Card, PaymentInstrument};
use crate::request::{Operation, PaymentRequest, require_amount, required_param};

/// Content type of the bodies this module produces.
pub const CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
/// Accept header sent alongside legacy bodies.
pub const ACCEPT: &str = "application/json";

/// One finished legacy body as form pairs in emission order.
#[derive(Debug, Clone)]
pub struct GlobalRequestBody {
    pairs: Vec<(&'static str, String)>,
}

impl GlobalRequestBody {
    /// Pairs in emission order.
    #[must_use]
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// Value for a field name, if the pair was emitted.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs.iter().find(|(key, _)| *key == name).map(|(_, value)| value.as_str())
    }

    /// URL-encodes the pairs, preserving emission order.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Wire bytes of the encoded body.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode().into_bytes()
    }
}

fn push_opt(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<String>) {
    if let Some(value) = value {
        pairs.push((key, value));
    }
}

/// Builds legacy URL-encoded bodies from payment envelopes.
///
/// The password is redacted from the [`Debug`] output.
#[derive(Clone)]
pub struct GlobalRequestBuilder {
    gateway_id: String,
    password: String,
}

impl fmt::Debug for GlobalRequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalRequestBuilder")
            .field("gateway_id", &self.gateway_id)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl GlobalRequestBuilder {
    /// Creates a builder for one merchant terminal.
    pub fn new(gateway_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self { gateway_id: gateway_id.into(), password: password.into() }
    }

    /// Builds the body for an envelope.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] for missing envelope
    /// parameters or a non-card instrument, [`GatewayError::InvalidCard`] for
    /// card validation failures.
    pub fn build(&self, request: &PaymentRequest) -> Result<GlobalRequestBody> {
        match (request.operation, &request.instrument) {
            (Operation::Refund, _) => self.build_refund(request),
            (_, Some(PaymentInstrument::Card(card))) => self.build_card(request, card),
            (_, _) => {
                require_amount(request)?;
                Err(GatewayError::InvalidRequest("The card parameter is required".to_owned()))
            }
        }
    }

    fn base_pairs(&self, operation: Operation, amount: String) -> Vec<(&'static str, String)> {
        vec![
            ("gateway_id", self.gateway_id.clone()),
            ("password", self.password.clone()),
            ("transaction_type", operation.transaction_code().to_owned()),
            ("amount", amount),
        ]
    }

    fn build_card(&self, request: &PaymentRequest, card: &Card) -> Result<GlobalRequestBody> {
        let amount = require_amount(request)?;
        card.validate()?;

        let mut pairs = self.base_pairs(request.operation, amount);
        push_opt(&mut pairs, "currency_code", request.currency.clone());
        push_opt(&mut pairs, "reference_no", request.transaction_id.clone());
        push_opt(
            &mut pairs,
            "credit_card_type",
            card.brand().map(|brand| card_type_name(brand).to_owned()),
        );
        push_opt(&mut pairs, "cc_number", card.number.clone());
        pairs.push(("cardholder_name", card.holder_name()));
        push_opt(&mut pairs, "cc_expiry", card.expiry_mmyy());
        push_opt(&mut pairs, "cc_verification_str2", card.cvv.clone());
        push_opt(&mut pairs, "client_ip", request.client_ip.clone());
        push_opt(&mut pairs, "client_email", card.email.clone());
        push_opt(
            &mut pairs,
            "language",
            card.billing_address.country.as_deref().map(str::to_uppercase),
        );
        Ok(GlobalRequestBody { pairs })
    }

    fn build_refund(&self, request: &PaymentRequest) -> Result<GlobalRequestBody> {
        let amount = require_amount(request)?;
        let transaction_tag = required_param(request.transaction_tag.as_deref(), "transaction_tag")?;
        let authorization_num =
            required_param(request.authorization_num.as_deref(), "authorization_num")?;

        let mut pairs = self.base_pairs(request.operation, amount);
        push_opt(&mut pairs, "currency_code", request.currency.clone());
        pairs.push(("transaction_tag", transaction_tag));
        pairs.push(("authorization_num", authorization_num));
        push_opt(&mut pairs, "client_ip", request.client_ip.clone());
        Ok(GlobalRequestBody { pairs })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::instrument::ContactAddress;

    fn builder() -> GlobalRequestBuilder {
        GlobalRequestBuilder::new("AB1234-01", "s3cr3t")
    }

    fn valid_card() -> Card {
        let mut card = Card {
            number: Some("4111111111111111".to_owned()),
            expiry_month: Some(12),
            expiry_year: Some(2030),
            cvv: Some("123".to_owned()),
            token: None,
            token_brand: None,
            email: Some("customer@example.com".to_owned()),
            billing_address: ContactAddress {
                country: Some("us".to_owned()),
                ..ContactAddress::default()
            },
            shipping_address: ContactAddress::default(),
        };
        card.set_holder_name("John Doe");
        card
    }

    #[test]
    fn test_purchase_pairs_in_order() {
        let request = PaymentRequest::purchase(Decimal::new(1200, 2), valid_card())
            .with_currency("USD")
            .with_transaction_id("order-55")
            .with_client_ip("127.0.0.1");
        let body = builder().build(&request).unwrap();

        let keys: Vec<&str> = body.pairs().iter().map(|(key, _)| *key).collect();
        assert_eq!(
            keys,
            vec![
                "gateway_id",
                "password",
                "transaction_type",
                "amount",
                "currency_code",
                "reference_no",
                "credit_card_type",
                "cc_number",
                "cardholder_name",
                "cc_expiry",
                "cc_verification_str2",
                "client_ip",
                "client_email",
                "language",
            ]
        );
        assert_eq!(body.get("transaction_type"), Some("00"));
        assert_eq!(body.get("amount"), Some("12.00"));
        assert_eq!(body.get("credit_card_type"), Some("Visa"));
        assert_eq!(body.get("cc_number"), Some("4111111111111111"));
        assert_eq!(body.get("cardholder_name"), Some("John Doe"));
        assert_eq!(body.get("cc_expiry"), Some("1230"));
        assert_eq!(body.get("cc_verification_str2"), Some("123"));
        assert_eq!(body.get("language"), Some("US"));
    }

    #[test]
    fn test_authorize_uses_preauth_code() {
        let request = PaymentRequest::authorize(Decimal::new(1200, 2), valid_card());
        let body = builder().build(&request).unwrap();
        assert_eq!(body.get("transaction_type"), Some("01"));
    }

    #[test]
    fn test_encode_round_trips() {
        let request = PaymentRequest::purchase(Decimal::new(1200, 2), valid_card());
        let body = builder().build(&request).unwrap();
        let encoded = body.encode();

        let parsed: Vec<(String, String)> =
            form_urlencoded::parse(encoded.as_bytes()).into_owned().collect();
        let expected: Vec<(String, String)> = body
            .pairs()
            .iter()
            .map(|(key, value)| ((*key).to_owned(), value.clone()))
            .collect();
        assert_eq!(parsed, expected);
        // Spaces in the holder name survive the codec.
        assert!(encoded.contains("cardholder_name=John+Doe"));
    }

    #[test]
    fn test_unset_pairs_are_dropped() {
        let mut card = valid_card();
        card.cvv = None;
        card.email = None;
        let request = PaymentRequest::purchase(Decimal::new(1200, 2), card);
        let body = builder().build(&request).unwrap();

        assert_eq!(body.get("currency_code"), None);
        assert_eq!(body.get("cc_verification_str2"), None);
        assert_eq!(body.get("client_email"), None);
        assert!(!body.encode().contains("currency_code"));
    }

    #[test]
    fn test_unknown_brand_pair_dropped() {
        let mut card = valid_card();
        card.number = Some("1234567890123".to_owned());
        let request = PaymentRequest::purchase(Decimal::new(1200, 2), card);
        let body = builder().build(&request).unwrap();
        assert_eq!(body.get("credit_card_type"), None);
        assert_eq!(body.get("cc_number"), Some("1234567890123"));
    }

    #[test]
    #[allow(clippy::unreachable, reason = "test ensures the error variant is InvalidRequest")]
    fn test_missing_amount_checked_first() {
        let request = PaymentRequest::new(Operation::Purchase);
        let err = builder().build(&request).unwrap_err();
        let GatewayError::InvalidRequest(message) = err else {
            unreachable!("expected InvalidRequest");
        };
        assert_eq!(message, "The amount parameter is required");
    }

    #[test]
    #[allow(clippy::unreachable, reason = "test ensures the error variant is InvalidRequest")]
    fn test_missing_card() {
        let mut request = PaymentRequest::new(Operation::Purchase);
        request.amount = Some(Decimal::new(1200, 2));
        let err = builder().build(&request).unwrap_err();
        let GatewayError::InvalidRequest(message) = err else {
            unreachable!("expected InvalidRequest");
        };
        assert_eq!(message, "The card parameter is required");
    }

    #[test]
    #[allow(clippy::unreachable, reason = "test ensures the error variant is InvalidRequest")]
    fn test_bank_account_rejected() {
        let request = PaymentRequest::purchase(
            Decimal::new(1200, 2),
            crate::instrument::Ach::default(),
        );
        let err = builder().build(&request).unwrap_err();
        let GatewayError::InvalidRequest(message) = err else {
            unreachable!("expected InvalidRequest");
        };
        assert_eq!(message, "The card parameter is required");
    }

    #[test]
    #[allow(clippy::unreachable, reason = "test ensures the error variant is InvalidCard")]
    fn test_card_validation_propagates() {
        let mut card = valid_card();
        card.number = None;
        let request = PaymentRequest::purchase(Decimal::new(1200, 2), card);
        let err = builder().build(&request).unwrap_err();
        let GatewayError::InvalidCard(message) = err else {
            unreachable!("expected InvalidCard");
        };
        assert_eq!(message, "The card number is required");
    }

    #[test]
    fn test_refund_pairs() {
        let request = PaymentRequest::refund(Decimal::new(1000, 2), "ET181147::28513493")
            .with_client_ip("127.0.0.1");
        let body = builder().build(&request).unwrap();

        let keys: Vec<&str> = body.pairs().iter().map(|(key, _)| *key).collect();
        assert_eq!(
            keys,
            vec![
                "gateway_id",
                "password",
                "transaction_type",
                "amount",
                "transaction_tag",
                "authorization_num",
                "client_ip",
            ]
        );
        assert_eq!(body.get("transaction_type"), Some("34"));
        assert_eq!(body.get("amount"), Some("10.00"));
        assert_eq!(body.get("transaction_tag"), Some("28513493"));
        assert_eq!(body.get("authorization_num"), Some("ET181147"));
    }

    #[test]
    #[allow(clippy::unreachable, reason = "test ensures the error variant is InvalidRequest")]
    fn test_refund_requires_transaction_tag() {
        let request = PaymentRequest::refund(Decimal::new(1000, 2), "auth1234::");
        let err = builder().build(&request).unwrap_err();
        let GatewayError::InvalidRequest(message) = err else {
            unreachable!("expected InvalidRequest");
        };
        assert_eq!(message, "The transaction_tag parameter is required");
    }

    #[test]
    fn test_builder_debug_redacts_password() {
        let output = format!("{:?}", builder());
        assert!(output.contains("AB1234-01"));
        assert!(output.contains("<redacted>"));
        assert!(!output.contains("s3cr3t"));
    }
}
