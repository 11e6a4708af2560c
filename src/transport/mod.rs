//! Transport layer for gateway communication.
//!
//! This module provides a sealed [`Transport`] trait that abstracts the HTTP
//! round trip to the First Data endpoints, keeping protocol mechanics out of
//! the payment logic:
//! - **Transport**: connection handling, TLS, timeouts
//! - **Gateway facades**: body construction, signing, response parsing
//!
//! Signing happens before the transport is involved. The facade serializes
//! the body, computes the GGe4 headers over those exact bytes, and hands both
//! to [`Transport::post`]. The transport never alters the body, since any
//! re-serialization would invalidate the signature.
//!
//! # Examples
//!
//! ```rust,no_run
//! use firstdata_gateway::{
//!     signing::RequestSigner,
//!     transport::{HttpTransport, RequestContext, Transport},
//! };
//!
//! # async fn example() -> firstdata_gateway::error::Result<()> {
//! let transport = HttpTransport::new()?;
//!
//! let signer = RequestSigner::new("163440", "fakehmackey")?;
//! let body = br#"{"gateway_id":"AB1234-01","transaction_type":"00"}"#;
//! let headers = signer.sign("/transaction/v14", body);
//!
//! let ctx = RequestContext {
//!     url: "https://api.demo.globalgatewaye4.firstdata.com/transaction/v14",
//!     headers: headers.header_pairs().to_vec(),
//! };
//!
//! let response = transport.post(ctx, body).await?;
//! println!("Status: {}", response.status);
//! # Ok(())
//! # }
//! ```

#[allow(
    redundant_imports,
    reason = "Future backs the RPITIT signatures even though the 2024 prelude exports it"
)]
use std::future::Future;

use crate::error::Result;

pub mod config;
pub mod http;
pub(crate) mod sealed;

pub use config::HttpConfig;
pub use http::HttpTransport;

/// Request context for one gateway exchange.
///
/// Carries the resolved endpoint URL and the complete header set. Signed
/// (Payeezy) requests take their headers from
/// [`SignedHeaders::header_pairs`](crate::signing::SignedHeaders::header_pairs);
/// unsigned (Global) requests carry only content negotiation headers.
#[derive(Debug, Clone)]
pub struct RequestContext<'a> {
    /// Full endpoint URL, version segment included
    /// (e.g., `https://api.demo.globalgatewaye4.firstdata.com/transaction/v14`).
    pub url: &'a str,
    /// HTTP headers to include, `Content-Type` among them.
    pub headers: Vec<(&'a str, &'a str)>,
}

/// Response from one completed gateway exchange.
///
/// Contains the raw response body, HTTP status code, and response headers.
/// First Data reports declines and field errors with non-2xx statuses and a
/// parseable body, so a non-success status still carries its body here and
/// interpretation belongs to the response layer.
#[derive(Debug)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body bytes.
    pub body: Vec<u8>,
    /// Response headers.
    pub headers: Vec<(String, String)>,
}

impl TransportResponse {
    /// Whether the HTTP status is in the success range (2xx).
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport abstraction for the gateway round trip.
///
/// This trait is sealed to ensure all implementations undergo security
/// review; only implementations within this crate are allowed. The gateway
/// facades drive it with bodies that are already serialized and signed, so an
/// implementation must transmit `body` byte-for-byte - any mutation would
/// invalidate the `X-GGe4-Content-SHA1` digest computed over those bytes.
///
/// # Security
///
/// Every implementation:
/// - Validates endpoint URLs (HTTPS only, no loopback hosts)
/// - Rejects header values that could smuggle CRLF sequences
/// - Applies request and connect timeouts
pub trait Transport: sealed::private::Sealed + Send + Sync {
    /// Executes a POST request with the given body.
    ///
    /// A completed exchange comes back as `Ok` whatever its HTTP status; the
    /// caller decides what a non-success status means.
    ///
    /// # Errors
    ///
    /// Returns an error if the context fails validation or the HTTP exchange
    /// does not complete (connect failure, timeout, TLS error).
    fn post<'a>(
        &'a self,
        ctx: RequestContext<'a>,
        body: &'a [u8],
    ) -> impl Future<Output = Result<TransportResponse>> + Send + 'a;

    /// Returns the protocol name for logging.
    fn protocol_name(&self) -> &'static str;
}
