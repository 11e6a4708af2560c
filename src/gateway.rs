//! Gateway facades for the two First Data API generations.
//!
//! [`PayeezyGateway`] speaks the signed JSON API (v12 and later): build the
//! body, sign the exact serialized bytes, post them, parse the reply.
//! [`GlobalGateway`] speaks the legacy URL-encoded API (v11): build the form
//! pairs, post them, parse the reply. Both run one payment envelope per call
//! and leave approval interpretation to the returned response type.
//!
//! A declined payment is a parsed response, not an error. Errors mean the
//! exchange never produced a readable gateway reply: local validation
//! failure, a transport problem, or an unparseable body.

use std::fmt;

use tracing::{debug, instrument};

use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};
use crate::request::global::{self, GlobalRequestBuilder};
use crate::request::payeezy::PayeezyRequestBuilder;
use crate::request::{self, ApiVersion, PaymentRequest};
use crate::response::{GlobalResponse, PayeezyResponse};
use crate::signing::RequestSigner;
use crate::transport::{HttpTransport, RequestContext, Transport};

/// Reply for an authorization failure whose body carried no parseable
/// transaction. The gateway sends these as bare HTML/text pages, so the raw
/// body is replaced with a stable message.
const UNAUTHORIZED_MESSAGE: &str = "Unauthorized Request. Bad or missing credentials.";

/// Facade for the signed JSON API.
///
/// Construction resolves everything that is fixed per merchant terminal:
/// credentials are baked into the request builder, the HMAC key is loaded
/// into the signer, and the endpoint URL is derived from the API version and
/// test-mode flag. After that, [`send`] runs one payment envelope per call.
///
/// The signature covers the exact transmitted bytes, so the facade
/// serializes once and hands those same bytes to the signer and the
/// transport.
///
/// # Examples
///
/// ```rust,no_run
/// use firstdata_gateway::config::GatewayConfig;
/// use firstdata_gateway::gateway::PayeezyGateway;
/// use firstdata_gateway::instrument::Card;
/// use firstdata_gateway::request::PaymentRequest;
/// use rust_decimal::Decimal;
///
/// # async fn example() -> firstdata_gateway::error::Result<()> {
/// let config = GatewayConfig::from_toml(
///     r#"
///     gateway_id = "AB1234-01"
///     password = "password"
///     key_id = "163440"
///     hmac_key = "fakehmackey"
///     test_mode = true
///     "#,
/// )?;
///
/// let gateway = PayeezyGateway::from_config(&config)?;
///
/// let mut card = Card::default();
/// card.number = Some("4111111111111111".to_owned());
/// card.expiry_month = Some(12);
/// card.expiry_year = Some(2030);
/// card.cvv = Some("123".to_owned());
/// card.set_holder_name("John Doe");
///
/// let request = PaymentRequest::purchase(Decimal::new(52_99, 2), card);
/// let response = gateway.send(&request).await?;
///
/// if response.is_successful() {
///     println!("approved, reference {}", response.transaction_reference());
/// }
/// # Ok(())
/// # }
/// ```
///
/// [`send`]: Self::send
pub struct PayeezyGateway<T: Transport = HttpTransport> {
    builder: PayeezyRequestBuilder,
    signer: RequestSigner,
    url: String,
    path: String,
    transport: T,
}

impl PayeezyGateway<HttpTransport> {
    /// Builds a gateway over the shared HTTPS transport.
    ///
    /// The API version defaults to [`ApiVersion::V14`] when the
    /// configuration leaves it unset.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the configuration fails
    /// validation or omits `key_id`/`hmac_key`, and [`GatewayError::Http`]
    /// if the HTTP client cannot be constructed.
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::with_config(&config.http)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> PayeezyGateway<T> {
    /// Builds a gateway over an explicit transport.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the configuration fails
    /// validation or omits `key_id`/`hmac_key`.
    pub fn with_transport(config: &GatewayConfig, transport: T) -> Result<Self> {
        config.validate()?;
        // The signer owns credential-presence checking: an absent key fails
        // there with the same error an empty one would.
        let signer = RequestSigner::new(
            config.key_id.as_deref().unwrap_or_default(),
            config.hmac_key.as_deref().unwrap_or_default(),
        )?;
        let version = config.version_or(ApiVersion::V14);
        Ok(Self {
            builder: PayeezyRequestBuilder::new(&config.gateway_id, &config.password, version),
            signer,
            url: request::endpoint(config.test_mode, version),
            path: request::endpoint_path(version),
            transport,
        })
    }

    /// Resolved endpoint URL, version segment included.
    #[must_use]
    pub fn endpoint_url(&self) -> &str {
        &self.url
    }

    /// API version this gateway speaks.
    #[must_use]
    pub const fn api_version(&self) -> ApiVersion {
        self.builder.api_version()
    }

    /// Runs one payment envelope end to end.
    ///
    /// A declined payment returns `Ok` with
    /// [`PayeezyResponse::is_successful`] false. The gateway also reports
    /// field errors with a 4xx status and a parseable transaction body;
    /// those come back as `Ok` the same way.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`], [`GatewayError::InvalidCard`]
    /// or [`GatewayError::InvalidAch`] if the envelope fails local
    /// validation, [`GatewayError::Http`] / [`GatewayError::Transport`] if
    /// the exchange fails, and [`GatewayError::InvalidResponse`] if the
    /// reply body holds no transaction. An unparseable body on a 401 or 403
    /// reply maps to a stable bad-credentials message instead of the raw
    /// body.
    #[instrument(skip(self, request), fields(operation = ?request.operation))]
    pub async fn send(&self, request: &PaymentRequest) -> Result<PayeezyResponse> {
        let body = self.builder.build(request)?;
        let bytes = body.to_json_bytes()?;
        let signed = self.signer.sign(&self.path, &bytes);

        let ctx = RequestContext { url: &self.url, headers: signed.header_pairs().to_vec() };
        let reply = self.transport.post(ctx, &bytes).await?;

        debug!(
            protocol = self.transport.protocol_name(),
            status = reply.status,
            body_len = reply.body.len(),
            "gateway replied"
        );

        match PayeezyResponse::parse(&reply.body) {
            Ok(parsed) => Ok(parsed),
            Err(_) if matches!(reply.status, 401 | 403) => {
                Err(GatewayError::InvalidResponse(UNAUTHORIZED_MESSAGE.to_owned()))
            }
            Err(err) => Err(err),
        }
    }
}

impl<T: Transport> fmt::Debug for PayeezyGateway<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayeezyGateway")
            .field("url", &self.url)
            .field("api_version", &self.api_version())
            .field("protocol", &self.transport.protocol_name())
            .finish_non_exhaustive()
    }
}

/// Facade for the legacy URL-encoded API.
///
/// The legacy API authenticates through the `gateway_id`/`password` pair in
/// the body; there is no signing layer, so `key_id` and `hmac_key` may be
/// absent from the configuration. The API version defaults to
/// [`ApiVersion::V11`], the last version the URL-encoded wire format shipped
/// with.
pub struct GlobalGateway<T: Transport = HttpTransport> {
    builder: GlobalRequestBuilder,
    version: ApiVersion,
    url: String,
    transport: T,
}

impl GlobalGateway<HttpTransport> {
    /// Builds a gateway over the shared HTTPS transport.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the configuration fails
    /// validation and [`GatewayError::Http`] if the HTTP client cannot be
    /// constructed.
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::with_config(&config.http)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> GlobalGateway<T> {
    /// Builds a gateway over an explicit transport.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the configuration fails
    /// validation.
    pub fn with_transport(config: &GatewayConfig, transport: T) -> Result<Self> {
        config.validate()?;
        let version = config.version_or(ApiVersion::V11);
        Ok(Self {
            builder: GlobalRequestBuilder::new(&config.gateway_id, &config.password),
            version,
            url: request::endpoint(config.test_mode, version),
            transport,
        })
    }

    /// Resolved endpoint URL, version segment included.
    #[must_use]
    pub fn endpoint_url(&self) -> &str {
        &self.url
    }

    /// API version this gateway speaks.
    #[must_use]
    pub const fn api_version(&self) -> ApiVersion {
        self.version
    }

    /// Runs one payment envelope end to end.
    ///
    /// Any completed exchange parses: the legacy reply format decodes from
    /// arbitrary bytes, so a server error page simply yields a response with
    /// no recognizable fields and [`GlobalResponse::is_successful`] false.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] or
    /// [`GatewayError::InvalidCard`] if the envelope fails local validation,
    /// and [`GatewayError::Http`] / [`GatewayError::Transport`] if the
    /// exchange fails.
    #[instrument(skip(self, request), fields(operation = ?request.operation))]
    pub async fn send(&self, request: &PaymentRequest) -> Result<GlobalResponse> {
        let body = self.builder.build(request)?;
        let bytes = body.to_bytes();

        let ctx = RequestContext {
            url: &self.url,
            headers: vec![("Content-Type", global::CONTENT_TYPE), ("Accept", global::ACCEPT)],
        };
        let reply = self.transport.post(ctx, &bytes).await?;

        debug!(
            protocol = self.transport.protocol_name(),
            status = reply.status,
            body_len = reply.body.len(),
            "gateway replied"
        );

        Ok(GlobalResponse::parse(&reply.body))
    }
}

impl<T: Transport> fmt::Debug for GlobalGateway<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalGateway")
            .field("url", &self.url)
            .field("api_version", &self.version)
            .field("protocol", &self.transport.protocol_name())
            .finish_non_exhaustive()
    }
}
