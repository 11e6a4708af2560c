//! First Data Gateway: Payment Processing for Payeezy and Global Gateway e4
//!
//! A Rust library for running card and ACH payments through the First Data
//! gateway family: the signed JSON API (Payeezy, API v12 and later) and the
//! legacy URL-encoded API (Global Gateway e4, API v11).
//!
//! # What is First Data Gateway?
//!
//! This library turns one plain [`PaymentRequest`](request::PaymentRequest)
//! envelope into the exact wire exchange each API generation expects:
//!
//! - **Request building**: JSON bodies for Payeezy, ordered form pairs for
//!   the legacy API, with version-gated field layouts
//! - **GGe4 request signing**: HMAC-SHA1 over the canonical hash string,
//!   covering the exact transmitted bytes
//! - **Instrument validation**: expiry, CVV format, and brand detection for
//!   cards, ABA and IBAN checksums for bank accounts, before anything leaves
//!   the process
//! - **Security by default**: HTTPS-only transport, zeroized credentials,
//!   redacted debug output
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Merchant app   │  your checkout / billing code
//! └────────┬────────┘
//!          │ PaymentRequest
//!          │
//! ┌────────▼───────────────────────────────────┐
//! │      firstdata-gateway (this crate)        │
//! │  ┌──────────────┐     ┌────────────────┐   │
//! │  │   Request    │─────│  GGe4 Signing  │   │
//! │  │   builders   │     │  (HMAC-SHA1)   │   │
//! │  └──────────────┘     └────────────────┘   │
//! └────────┬───────────────────────────────────┘
//!          │ HTTPS (signed JSON or form pairs)
//!          │
//! ┌────────▼────────┐
//! │   First Data    │  Payeezy (v12+) / Global Gateway e4 (v11)
//! │   endpoints     │
//! └─────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## 1. Run a Card Purchase
//!
//! ```rust,no_run
//! use firstdata_gateway::config::GatewayConfig;
//! use firstdata_gateway::gateway::PayeezyGateway;
//! use firstdata_gateway::instrument::Card;
//! use firstdata_gateway::request::PaymentRequest;
//! use rust_decimal::Decimal;
//!
//! # async fn example() -> firstdata_gateway::error::Result<()> {
//! // Load merchant terminal credentials (in production, from secure storage)
//! let config = GatewayConfig::from_file("gateway.toml")?;
//! let gateway = PayeezyGateway::from_config(&config)?;
//!
//! let mut card = Card::default();
//! card.number = Some("4111111111111111".to_owned());
//! card.expiry_month = Some(12);
//! card.expiry_year = Some(2030);
//! card.cvv = Some("123".to_owned());
//! card.set_holder_name("John Doe");
//!
//! let request = PaymentRequest::purchase(Decimal::new(52_99, 2), card)
//!     .with_currency("USD")
//!     .with_transaction_id("order-1001");
//!
//! let response = gateway.send(&request).await?;
//!
//! if response.is_successful() {
//!     println!("approved, reference {}", response.transaction_reference());
//! } else {
//!     println!("declined: {:?}", response.bank_message());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## 2. Refund Against a Reference
//!
//! ```rust,no_run
//! use firstdata_gateway::config::GatewayConfig;
//! use firstdata_gateway::gateway::PayeezyGateway;
//! use firstdata_gateway::request::PaymentRequest;
//! use rust_decimal::Decimal;
//!
//! # async fn example() -> firstdata_gateway::error::Result<()> {
//! let config = GatewayConfig::from_file("gateway.toml")?;
//! let gateway = PayeezyGateway::from_config(&config)?;
//!
//! // The reference a successful purchase reported: `authorization::tag`
//! let request = PaymentRequest::refund(Decimal::new(10_00, 2), "ET181147::28513493");
//! let response = gateway.send(&request).await?;
//!
//! println!("refund approved: {}", response.is_successful());
//! # Ok(())
//! # }
//! ```
//!
//! ## 3. Generate Signed Headers Directly
//!
//! ```rust
//! use firstdata_gateway::signing::RequestSigner;
//!
//! # fn example() -> firstdata_gateway::error::Result<()> {
//! let signer = RequestSigner::new("163440", "hmac-key-from-terminal-setup")?;
//!
//! let body = br#"{"transaction_type":"00","amount":"52.99"}"#;
//! let headers = signer.sign("/transaction/v14", body);
//!
//! // Use these in an HTTP request you drive yourself
//! println!("X-GGe4-Content-SHA1: {}", headers.content_sha1);
//! println!("X-GGe4-Date: {}", headers.date);
//! println!("Authorization: {}", headers.authorization);
//! # Ok(())
//! # }
//! ```
//!
//! ## 4. Parse a Gateway Reply
//!
//! ```rust
//! use firstdata_gateway::response::PayeezyResponse;
//!
//! # fn example() -> firstdata_gateway::error::Result<()> {
//! let body = br#"{
//!     "transaction_approved": 1,
//!     "exact_resp_code": "00",
//!     "bank_resp_code": "100",
//!     "authorization_num": "ET181147",
//!     "transaction_tag": 28513493
//! }"#;
//!
//! let response = PayeezyResponse::parse(body)?;
//! assert!(response.is_successful());
//! assert_eq!(response.transaction_reference(), "ET181147::28513493");
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`gateway`]: End-to-end facades ([`PayeezyGateway`], [`GlobalGateway`])
//! - [`request`]: Payment envelopes and per-API body builders
//! - [`response`]: Loose-typed reply parsing for both wire formats
//! - [`signing`]: GGe4 HMAC-SHA1 request signing
//! - [`instrument`]: Cards, bank accounts, and their validation
//! - [`checksum`]: ABA routing and IBAN checksum validators
//! - [`config`]: Merchant terminal configuration from TOML
//! - [`transport`]: HTTPS transport abstraction
//! - [`error`]: Error types with recovery guidance
//!
//! # Security Considerations
//!
//! ## Credential Management
//!
//! - **Never hardcode credentials**: Load the terminal password and HMAC key
//!   from environment variables or a secret store
//! - **Zeroized on drop**: [`GatewayConfig`] wipes the password and HMAC key,
//!   card and bank instruments wipe their numbers
//! - **Redacted debug output**: Credentials never appear in `{:?}` formatting
//!
//! ## Card Data
//!
//! The library holds card data only for the lifetime of one exchange and
//! never writes it to logs; tracing spans record operation metadata, not
//! field values. Persisting card numbers on your side brings PCI DSS scope
//! with it — prefer TransArmor tokens for repeat billing.
//!
//! ## Network Security
//!
//! - **HTTPS only**: The transport refuses plain-HTTP and loopback endpoints
//! - **Signature coverage**: The GGe4 signature covers the exact transmitted
//!   bytes, so a tampered body fails verification at the gateway
//! - **Timeouts**: 30-second request and 10-second connect defaults
//!
//! # Standards Compliance
//!
//! This library implements:
//! - [RFC 2104: HMAC](https://www.rfc-editor.org/rfc/rfc2104.html) with SHA-1
//!   as the GGe4 scheme requires
//! - ISO 13616 IBAN validation (mod-97 per ISO/IEC 7064)
//! - ABA routing number checksum (weighted mod-10)
//!
//! # Features
//!
//! **Operations**:
//! - ✅ Purchase, authorize, and tagged refund on the signed JSON API
//! - ✅ Purchase and tagged refund on the legacy URL-encoded API
//! - ✅ Raw card, TransArmor token, and TeleCheck ACH instruments
//! - ✅ Version-gated verification layout (flat strings through v13,
//!   structured address from v14)
//! - ✅ Demo and production endpoint selection per terminal
//!
//! **Validation**:
//! - ✅ Card brand detection from the number
//! - ✅ Expiry and CVV format checks
//! - ✅ ABA routing checksum and country-aware IBAN validation
//! - ✅ ACH identity-proof priority (license, SSN, tax ID, military ID)
//!
//! **Production Features**:
//! - ✅ Request signing reproducible at a fixed timestamp for regression tests
//! - ✅ Structured tracing spans on every exchange
//! - ✅ TOML configuration with validation and production defaults
//! - ✅ Sealed transport trait: nothing outside this crate can sit between
//!   the signed body and the wire
//!
//! **Test Coverage**: 200+ tests (unit, integration, property-based,
//! documentation)
//!
//! # Examples
//!
//! See the `demos/` directory for complete usage examples:
//! - `basic_purchase.rs`: Card purchase against the demo environment
//! - `signed_headers.rs`: GGe4 signature generation
//! - `error_handling.rs`: Handling common errors
//!
//! # Error Handling
//!
//! All operations return [`Result<T, GatewayError>`](error::Result). A
//! declined payment is **not** an error — it comes back as a parsed response
//! with `is_successful()` false. Errors mean the exchange never produced a
//! readable gateway reply:
//!
//! ```rust,no_run
//! use firstdata_gateway::config::GatewayConfig;
//! use firstdata_gateway::gateway::PayeezyGateway;
//! use firstdata_gateway::instrument::Card;
//! use firstdata_gateway::request::PaymentRequest;
//! use firstdata_gateway::GatewayError;
//! use rust_decimal::Decimal;
//!
//! # async fn example() -> firstdata_gateway::error::Result<()> {
//! let config = GatewayConfig::from_file("gateway.toml")?;
//! let gateway = PayeezyGateway::from_config(&config)?;
//!
//! let mut card = Card::default();
//! card.number = Some("4111111111111111".to_owned());
//! card.expiry_month = Some(12);
//! card.expiry_year = Some(2030);
//! card.cvv = Some("123".to_owned());
//! card.set_holder_name("John Doe");
//!
//! let request = PaymentRequest::purchase(Decimal::new(52_99, 2), card);
//!
//! match gateway.send(&request).await {
//!     Ok(response) if response.is_successful() => {
//!         println!("approved, reference {}", response.transaction_reference());
//!     }
//!     Ok(response) => {
//!         println!("declined: {:?}", response.message());
//!         // Surface the decline to the payer; nothing to retry
//!     }
//!     Err(GatewayError::InvalidCard(msg)) => {
//!         eprintln!("Card details rejected: {msg}");
//!         // Collect corrected details before resubmitting
//!     }
//!     Err(GatewayError::Http(e)) => {
//!         eprintln!("Network error: {e}");
//!         // Safe to retry once connectivity recovers
//!     }
//!     Err(GatewayError::InvalidResponse(msg)) => {
//!         eprintln!("Unreadable gateway reply: {msg}");
//!         // Check credentials and endpoint before retrying
//!     }
//!     Err(e) => eprintln!("Other error: {e}"),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from reqwest"
)]

pub mod checksum;
pub mod config;
pub mod error;
pub mod gateway;
pub mod instrument;
pub mod request;
pub mod response;
pub mod signing;
pub mod transport;

pub use config::GatewayConfig;
pub use error::{GatewayError, Result};
pub use gateway::{GlobalGateway, PayeezyGateway};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify public API is accessible
        let _ = std::marker::PhantomData::<GatewayError>;
    }
}
