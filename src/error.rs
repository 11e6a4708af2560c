//! Error types for the First Data gateway adapter.
//!
//! This module defines all error types that can occur while building, signing,
//! sending, or parsing gateway requests. All errors implement the standard
//! [`std::error::Error`] trait via [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Envelope Errors** ([`GatewayError::InvalidRequest`]): a required request
//!   parameter is missing or an operation/instrument combination is unsupported
//! - **Instrument Errors** ([`GatewayError::InvalidCard`],
//!   [`GatewayError::InvalidAch`]): instrument validation failures
//! - **Response Errors** ([`GatewayError::InvalidResponse`]): unparseable or
//!   out-of-protocol replies
//! - **Configuration Errors** ([`GatewayError::Config`]): bad or missing
//!   credentials, surfaced before any network attempt
//! - **Transport Errors** ([`GatewayError::Transport`]): a request context
//!   failed a pre-transmission security check
//! - **Network Errors** ([`GatewayError::Http`]): HTTP communication failures
//!
//! A *declined payment is not an error*: the remote reply parses into a normal
//! response whose `is_successful()` returns `false`.
//!
//! # Examples
//!
//! ```
//! use firstdata_gateway::error::{GatewayError, Result};
//!
//! fn require_amount(amount: Option<&str>) -> Result<String> {
//!     match amount {
//!         Some(value) => Ok(value.to_string()),
//!         None => Err(GatewayError::InvalidRequest(
//!             "The amount parameter is required".to_string(),
//!         )),
//!     }
//! }
//! ```

use thiserror::Error;

/// Result type alias for gateway operations.
///
/// This is a convenience type that uses [`GatewayError`] as the error type.
/// All fallible functions in this crate return this type.
///
/// Results should be handled by the caller - either checked for errors,
/// propagated with `?`, or explicitly acknowledged with `.unwrap()` or
/// `.expect()` in cases where failure is impossible.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors that can occur in the gateway adapter.
///
/// All variants include contextual information about what went wrong.
/// Instrument and envelope variants carry the exact field-level message that
/// calling code asserts on, so those messages are part of the public contract
/// and must not be reworded.
///
/// # Error Recovery
///
/// - **Validation errors** ([`InvalidRequest`](Self::InvalidRequest),
///   [`InvalidCard`](Self::InvalidCard), [`InvalidAch`](Self::InvalidAch)):
///   fix the named field and rebuild; nothing was sent over the wire
/// - **Configuration errors** ([`Config`](Self::Config)): correct the merchant
///   credentials; raised at construction, never mid-request
/// - **Response errors** ([`InvalidResponse`](Self::InvalidResponse)): the
///   remote status/text is embedded verbatim; check credentials and API version
/// - **Transport errors** ([`Transport`](Self::Transport)): the request
///   context failed a security check; nothing was sent
/// - **Transient errors** ([`Http`](Self::Http)): retry is the caller's
///   decision - this crate never retries on its own
///
/// This type implements `#[must_use]` to ensure errors are not silently ignored.
/// Always handle errors by checking, propagating, or explicitly panicking.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A required envelope parameter is missing or the operation/instrument
    /// combination is unsupported.
    ///
    /// Raised while assembling the request, before signing - no partial
    /// request is ever sent once a required field is found missing.
    /// The message has the fixed shape `The <parameter> parameter is required`
    /// for missing parameters.
    ///
    /// # Recovery
    ///
    /// Populate the named parameter on the [`PaymentRequest`] and rebuild.
    ///
    /// [`PaymentRequest`]: crate::request::PaymentRequest
    #[error("invalid payment request: {0}")]
    InvalidRequest(String),

    /// Card validation failed.
    ///
    /// Produced by `Card::validate()`. The message names the first unmet
    /// requirement in a fixed order: number present, expiry present, expiry
    /// not in the past, CVV format.
    ///
    /// # Recovery
    ///
    /// Correct the named card field and validate again.
    #[error("invalid card details: {0}")]
    InvalidCard(String),

    /// Bank-account (ACH) validation failed.
    ///
    /// Produced by `Ach::validate()`. The message names the first missing
    /// required field, or the checksum that rejected the routing or account
    /// number.
    ///
    /// # Recovery
    ///
    /// Correct the named field. `Routing Number is invalid` means the ABA
    /// checksum failed; `Account Number is invalid` means the account number
    /// failed IBAN-format validation (see `Ach::validate` for the caveat on
    /// US account numbers).
    #[error("invalid ACH details: {0}")]
    InvalidAch(String),

    /// The remote reply could not be parsed into the expected format.
    ///
    /// This error occurs when the gateway returns something other than the
    /// declared wire format (JSON for Payeezy, query-string for Global), or
    /// when the transport reports a non-success status whose body is not a
    /// parseable failure response. The remote status/text is carried verbatim.
    ///
    /// An authentication rejection with an empty or opaque body surfaces as
    /// the fixed message `Unauthorized Request. Bad or missing credentials.`
    ///
    /// # Recovery
    ///
    /// Verify the gateway credentials, the HMAC key id/secret pair, and that
    /// the configured API version matches the merchant account settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use firstdata_gateway::error::GatewayError;
    ///
    /// let err = GatewayError::InvalidResponse(
    ///     "Bad Request (69) - Invalid Transaction Tag".to_string(),
    /// );
    /// assert!(err.to_string().contains("Invalid Transaction Tag"));
    /// ```
    #[error("invalid gateway response: {0}")]
    InvalidResponse(String),

    /// Gateway configuration is incomplete or inconsistent.
    ///
    /// This error occurs when construction-time validation rejects the
    /// merchant configuration. Common causes include:
    /// - Empty gateway id or password
    /// - Missing HMAC key id or secret on a signed (Payeezy) gateway
    /// - An API version outside the supported range
    ///
    /// # Recovery
    ///
    /// Fix the named configuration value. Configuration errors are surfaced
    /// before any network attempt and are never retried.
    #[error("invalid gateway configuration: {0}")]
    Config(String),

    /// Request rejected by transport-level checks before transmission.
    ///
    /// The endpoint URL or a header failed a security check: non-HTTPS
    /// scheme, loopback host, or control characters in a header name or
    /// value. The built-in endpoints always pass these checks, so this
    /// variant points at a hand-constructed [`RequestContext`].
    ///
    /// # Recovery
    ///
    /// Fix the offending context field. Nothing was sent over the wire.
    ///
    /// [`RequestContext`]: crate::transport::RequestContext
    #[error("transport rejected request: {0}")]
    Transport(String),

    /// HTTP request failed.
    ///
    /// This error wraps [`reqwest::Error`] and occurs when network
    /// communication with the gateway fails. Common causes include:
    /// - Network timeouts
    /// - Connection refused
    /// - DNS resolution failures
    /// - TLS/SSL errors
    ///
    /// # Recovery
    ///
    /// Retry at the caller's discretion. If the error persists, verify:
    /// - The endpoint (live vs. test mode) is reachable
    /// - Network connectivity is available
    /// - Firewall/proxy settings allow HTTPS connections
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}
