//! Request construction for the First Data transaction APIs.
//!
//! A [`PaymentRequest`] is the gateway-agnostic envelope: operation, amount,
//! currency, merchant reference, client metadata, and either a payment
//! instrument (purchase, authorize) or a tag + authorization pair (refund).
//! The per-family builders turn an envelope into wire bytes: [`payeezy`]
//! produces the JSON bodies of the signed v12+ API, [`global`] the
//! URL-encoded bodies of the legacy unsigned API.

pub mod global;
pub mod payeezy;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{GatewayError, Result};
use crate::instrument::PaymentInstrument;

/// Production endpoint base; the API version segment is appended.
pub const LIVE_ENDPOINT: &str = "https://api.globalgatewaye4.firstdata.com/transaction/";
/// Demo endpoint base; the API version segment is appended.
pub const TEST_ENDPOINT: &str = "https://api.demo.globalgatewaye4.firstdata.com/transaction/";

/// Transaction-type wire codes understood by the gateway.
///
/// The facade operations use [`PURCHASE`], [`PRE_AUTH`], and
/// [`TAGGED_REFUND`]; the remaining codes are accepted by the same endpoint
/// for terminal-style and stored-value flows.
///
/// [`PURCHASE`]: transaction_code::PURCHASE
/// [`PRE_AUTH`]: transaction_code::PRE_AUTH
/// [`TAGGED_REFUND`]: transaction_code::TAGGED_REFUND
pub mod transaction_code {
    /// Purchase (authorize and capture).
    pub const PURCHASE: &str = "00";
    /// Pre-authorization.
    pub const PRE_AUTH: &str = "01";
    /// Completion of a prior pre-authorization.
    pub const PRE_AUTH_COMPLETE: &str = "02";
    /// Forced post.
    pub const FORCED_POST: &str = "03";
    /// Refund against a card number.
    pub const REFUND: &str = "04";
    /// Pre-authorization only, no capture.
    pub const PRE_AUTH_ONLY: &str = "05";
    /// PayPal order.
    pub const PAYPAL_ORDER: &str = "07";
    /// Void.
    pub const VOID: &str = "13";
    /// Tagged completion of a prior pre-authorization.
    pub const TAGGED_PRE_AUTH_COMPLETE: &str = "32";
    /// Tagged void.
    pub const TAGGED_VOID: &str = "33";
    /// Tagged refund against a prior transaction.
    pub const TAGGED_REFUND: &str = "34";
    /// Stored-value card cash-out.
    pub const CASHOUT: &str = "83";
    /// Stored-value card activation.
    pub const ACTIVATION: &str = "85";
    /// Stored-value card balance inquiry.
    pub const BALANCE_INQUIRY: &str = "86";
    /// Stored-value card reload.
    pub const RELOAD: &str = "88";
    /// Stored-value card deactivation.
    pub const DEACTIVATION: &str = "89";
}

/// Payment operation exposed by the gateway facades.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Authorize and capture in one step.
    Purchase,
    /// Authorize only; capture happens later.
    Authorize,
    /// Tagged refund against a settled transaction.
    Refund,
}

impl Operation {
    /// Wire code for this operation.
    #[must_use]
    pub const fn transaction_code(self) -> &'static str {
        match self {
            Self::Purchase => transaction_code::PURCHASE,
            Self::Authorize => transaction_code::PRE_AUTH,
            Self::Refund => transaction_code::TAGGED_REFUND,
        }
    }
}

/// API version tag selecting endpoint segment and field layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ApiVersion(u8);

impl ApiVersion {
    /// Version spoken by the legacy Global API.
    pub const V11: Self = Self(11);
    /// Last version using the flat verification-string layout.
    pub const V13: Self = Self(13);
    /// Default Payeezy version; structured address layout.
    pub const V14: Self = Self(14);

    /// Wraps an arbitrary version number.
    #[must_use]
    pub const fn new(version: u8) -> Self {
        Self(version)
    }

    /// Raw version number.
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// URL path segment, e.g. `v14`.
    #[must_use]
    pub fn path_segment(self) -> String {
        format!("v{}", self.0)
    }

    /// Field layout for address-verification and CVV data at this version.
    #[must_use]
    pub const fn verification_format(self) -> VerificationFormat {
        if self.0 <= 13 {
            VerificationFormat::LegacyStrings
        } else {
            VerificationFormat::StructuredAddress
        }
    }
}

/// Wire layout for address-verification and CVV fields; the cut is between
/// v13 and v14.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationFormat {
    /// Flat `cc_verification_str1` / `cc_verification_str2` fields.
    LegacyStrings,
    /// Structured `address` object plus `cvd_code`.
    StructuredAddress,
}

/// Full endpoint URL for the given mode and version.
#[must_use]
pub fn endpoint(test_mode: bool, version: ApiVersion) -> String {
    let base = if test_mode { TEST_ENDPOINT } else { LIVE_ENDPOINT };
    format!("{base}{}", version.path_segment())
}

/// URL path component covered by the request signature, e.g.
/// `/transaction/v14`. Scheme, host, and query never participate.
#[must_use]
pub fn endpoint_path(version: ApiVersion) -> String {
    format!("/transaction/{}", version.path_segment())
}

/// Formats an amount the way the gateway expects it: fixed two decimal
/// places, half-away-from-zero rounding.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

/// Formatted amount from the envelope, or the fixed missing-parameter error.
/// Amount is always the first envelope check, before any instrument check.
pub(crate) fn require_amount(request: &PaymentRequest) -> Result<String> {
    request
        .amount
        .map(format_amount)
        .ok_or_else(|| GatewayError::InvalidRequest("The amount parameter is required".to_owned()))
}

/// Non-empty required parameter, or the fixed missing-parameter error naming
/// it.
pub(crate) fn required_param(value: Option<&str>, name: &str) -> Result<String> {
    match value.filter(|v| !v.is_empty()) {
        Some(v) => Ok(v.to_owned()),
        None => Err(GatewayError::InvalidRequest(format!("The {name} parameter is required"))),
    }
}

/// Splits a transaction reference of the form `authorization::tag` back into
/// its parts. Empty sides come back as `None`; a reference without the
/// separator is treated as an authorization number alone.
#[must_use]
pub fn split_transaction_reference(reference: &str) -> (Option<String>, Option<String>) {
    fn non_empty(part: &str) -> Option<String> {
        (!part.is_empty()).then(|| part.to_owned())
    }
    match reference.split_once("::") {
        Some((authorization, tag)) => (non_empty(authorization), non_empty(tag)),
        None => (non_empty(reference), None),
    }
}

/// Gateway-agnostic description of one payment operation.
///
/// Construct with [`purchase`], [`authorize`], or [`refund`], then chain the
/// `with_*` setters for optional envelope data. Fields are public so callers
/// with unusual needs can fill the envelope directly.
///
/// [`purchase`]: Self::purchase
/// [`authorize`]: Self::authorize
/// [`refund`]: Self::refund
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    /// Operation to perform.
    pub operation: Operation,
    /// Amount to move; formatted to two decimals on the wire.
    pub amount: Option<Decimal>,
    /// ISO 4217 currency code.
    pub currency: Option<String>,
    /// Merchant-side transaction id, echoed back as `reference_no`.
    pub transaction_id: Option<String>,
    /// IP address of the paying client.
    pub client_ip: Option<String>,
    /// Instrument for purchase/authorize operations.
    pub instrument: Option<PaymentInstrument>,
    /// Transaction tag of the prior transaction (refund).
    pub transaction_tag: Option<String>,
    /// Authorization number of the prior transaction (refund).
    pub authorization_num: Option<String>,
}

impl PaymentRequest {
    /// Empty envelope for the given operation.
    #[must_use]
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            amount: None,
            currency: None,
            transaction_id: None,
            client_ip: None,
            instrument: None,
            transaction_tag: None,
            authorization_num: None,
        }
    }

    /// Purchase envelope for an amount and instrument.
    #[must_use]
    pub fn purchase(amount: Decimal, instrument: impl Into<PaymentInstrument>) -> Self {
        let mut request = Self::new(Operation::Purchase);
        request.amount = Some(amount);
        request.instrument = Some(instrument.into());
        request
    }

    /// Authorize-only envelope for an amount and instrument.
    #[must_use]
    pub fn authorize(amount: Decimal, instrument: impl Into<PaymentInstrument>) -> Self {
        let mut request = Self::new(Operation::Authorize);
        request.amount = Some(amount);
        request.instrument = Some(instrument.into());
        request
    }

    /// Refund envelope against a transaction reference of the form
    /// `authorization::tag` (the value a successful response reported).
    #[must_use]
    pub fn refund(amount: Decimal, transaction_reference: &str) -> Self {
        let (authorization_num, transaction_tag) =
            split_transaction_reference(transaction_reference);
        let mut request = Self::new(Operation::Refund);
        request.amount = Some(amount);
        request.authorization_num = authorization_num;
        request.transaction_tag = transaction_tag;
        request
    }

    /// Sets the currency code.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Sets the merchant-side transaction id.
    #[must_use]
    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }

    /// Sets the client IP address.
    #[must_use]
    pub fn with_client_ip(mut self, client_ip: impl Into<String>) -> Self {
        self.client_ip = Some(client_ip.into());
        self
    }
}
