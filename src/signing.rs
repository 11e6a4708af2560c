//! GGe4 HMAC request signing for the Payeezy JSON API.
//!
//! API versions 12 and higher of the Global Gateway e4 web service reject any
//! request that is not accompanied by an HMAC authorization header computed
//! over the exact transmitted bytes. The canonical string covers the HTTP
//! method, content type, body digest, timestamp, and request path, so the
//! builder and this signer must agree on a single serialization of the body -
//! the signature is computed over the bytes that go on the wire, never over a
//! re-serialization.

use std::fmt;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha1::{Digest, Sha1};
use tracing::instrument;

use crate::error::{GatewayError, Result};

/// HTTP method covered by the canonical hash string. Every signed gateway
/// call is a POST.
pub const SIGNING_METHOD: &str = "POST";

/// Content type sent with signed requests and covered by the hash string.
///
/// The same constant feeds both the `Content-Type` header and the canonical
/// string; the remote end recomputes the string from the received header, so
/// the two must never diverge.
pub const CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Accept header sent with signed requests.
pub const ACCEPT: &str = "text/html";

type HmacSha1 = Hmac<Sha1>;

/// Header set produced by signing one request body.
///
/// The values are attached verbatim to the outgoing request; the remote
/// gateway recomputes the digest and canonical string from the received bytes
/// and rejects the call on any mismatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// Lowercase hex SHA-1 digest of the body (`X-GGe4-Content-SHA1`).
    pub content_sha1: String,
    /// UTC timestamp covered by the signature (`X-GGe4-Date`).
    pub date: String,
    /// `GGE4_API <key-id>:<signature>` authorization value.
    pub authorization: String,
}

impl SignedHeaders {
    /// Returns the complete header set for a signed request, in the order the
    /// gateway documentation lists them.
    #[must_use]
    pub fn header_pairs(&self) -> [(&'static str, &str); 5] {
        [
            ("Content-Type", CONTENT_TYPE),
            ("Accept", ACCEPT),
            ("X-GGe4-Content-SHA1", &self.content_sha1),
            ("X-GGe4-Date", &self.date),
            ("Authorization", &self.authorization),
        ]
    }
}

/// Generates GGe4 authorization headers for Payeezy requests.
///
/// Holds the per-merchant HMAC key id and keyed MAC state. Construction fails
/// on empty credentials so that misconfiguration surfaces before any network
/// attempt.
#[derive(Clone)]
pub struct RequestSigner {
    key_id: String,
    mac: HmacSha1,
}

impl fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSigner")
            .field("key_id", &self.key_id)
            .field("mac", &"<keyed>")
            .finish()
    }
}

impl RequestSigner {
    /// Creates a signer from the merchant's HMAC key id and secret.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if either credential is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use firstdata_gateway::signing::RequestSigner;
    ///
    /// let signer = RequestSigner::new("163440", "fakehmackey").unwrap();
    /// assert!(RequestSigner::new("", "fakehmackey").is_err());
    /// ```
    pub fn new(key_id: &str, hmac_key: &str) -> Result<Self> {
        if key_id.is_empty() {
            return Err(GatewayError::Config("key_id must not be empty".to_owned()));
        }
        if hmac_key.is_empty() {
            return Err(GatewayError::Config("hmac_key must not be empty".to_owned()));
        }
        let mac = HmacSha1::new_from_slice(hmac_key.as_bytes())
            .map_err(|e| GatewayError::Config(format!("hmac_key rejected: {e}")))?;
        Ok(Self { key_id: key_id.to_owned(), mac })
    }

    /// Signs a finalized request body against the request path, using the
    /// current UTC time.
    ///
    /// `path` is the URL path only - no scheme, host, or query string
    /// (for example `/transaction/v14`).
    ///
    /// # Examples
    ///
    /// ```
    /// use firstdata_gateway::signing::RequestSigner;
    ///
    /// let signer = RequestSigner::new("163440", "fakehmackey").unwrap();
    /// let headers = signer.sign("/transaction/v14", br#"{"gateway_id":"AB1234-01"}"#);
    /// assert!(headers.authorization.starts_with("GGE4_API 163440:"));
    /// assert_eq!(headers.content_sha1.len(), 40);
    /// ```
    #[must_use]
    #[instrument(skip(self, body), fields(body_len = body.len()))]
    pub fn sign(&self, path: &str, body: &[u8]) -> SignedHeaders {
        self.sign_at(path, body, Utc::now())
    }

    /// Signs with an explicit timestamp.
    ///
    /// The output is fully determined by the inputs, which makes the signature
    /// reproducible for regression tests. Production code uses [`sign`], which
    /// passes the current time.
    ///
    /// [`sign`]: Self::sign
    #[must_use]
    pub fn sign_at(&self, path: &str, body: &[u8], timestamp: DateTime<Utc>) -> SignedHeaders {
        let content_sha1 = Self::compute_content_digest(body);
        let date = format_gge4_date(timestamp);
        let hash_string = Self::build_hash_string(&content_sha1, &date, path);
        let authorization = self.build_auth_string(&hash_string);
        SignedHeaders { content_sha1, date, authorization }
    }

    /// Computes the `X-GGe4-Content-SHA1` value: lowercase hex SHA-1 of the
    /// body bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use firstdata_gateway::signing::RequestSigner;
    ///
    /// let digest = RequestSigner::compute_content_digest(b"abc");
    /// assert_eq!(digest, "a9993e364706816aba3e25717850c26c9cd0d89d");
    /// ```
    #[must_use]
    pub fn compute_content_digest(body: &[u8]) -> String {
        Sha1::digest(body).iter().map(|byte| format!("{byte:02x}")).collect()
    }

    /// Builds the canonical hash string:
    /// `POST\n<content-type>\n<digest>\n<date>\n<path>`.
    ///
    /// This function is `pub(crate)` so tests can assert the exact canonical
    /// form without re-deriving it from the authorization header.
    #[must_use]
    pub(crate) fn build_hash_string(content_digest: &str, date: &str, path: &str) -> String {
        format!("{SIGNING_METHOD}\n{CONTENT_TYPE}\n{content_digest}\n{date}\n{path}")
    }

    /// HMAC-SHA1 over the canonical string, Base64-encoded into the
    /// `GGE4_API <key-id>:<signature>` authorization value.
    fn build_auth_string(&self, hash_string: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(hash_string.as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());
        format!("GGE4_API {}:{signature}", self.key_id)
    }
}

/// Formats a timestamp the way the gateway expects it: UTC, second precision,
/// `YYYY-MM-DDTHH:MM:SSZ`.
#[must_use]
pub fn format_gge4_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
