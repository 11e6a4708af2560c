//! HTTP transport implementation.
//!
//! This module provides the reqwest-backed transport used by both gateway
//! facades. Bodies arrive pre-serialized and, for Payeezy, pre-signed; this
//! layer validates the destination and moves the bytes unchanged.

use std::{sync::LazyLock, time::Duration};

use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::config::HttpConfig;
use crate::{
    error::{GatewayError, Result},
    transport::{RequestContext, Transport, TransportResponse, sealed},
};

/// Default HTTP client with connection pooling enabled.
///
/// Using a singleton avoids recreating the client per transport instance,
/// preserving connection pooling benefits across all default transports.
static DEFAULT_HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .pool_max_idle_per_host(100)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to create default HTTP client")
});

/// Validates the endpoint URL for security constraints.
///
/// Card data leaves the process here, so the destination must be HTTPS and
/// must not be a loopback host.
fn validate_url(url: &Url) -> Result<()> {
    if url.scheme() != "https" {
        return Err(GatewayError::Transport("endpoint must use HTTPS".to_owned()));
    }

    if let Some(host) = url.host_str()
        && (host == "localhost" || host == "127.0.0.1" || host == "::1" || host == "[::1]")
    {
        return Err(GatewayError::Transport("loopback endpoints are not allowed".to_owned()));
    }

    Ok(())
}

/// Validates a header name and value for CRLF injection prevention.
fn validate_header(name: &str, value: &str) -> Result<()> {
    if name.contains('\r') || name.contains('\n') || name.contains('\0') {
        return Err(GatewayError::Transport(
            "invalid header name: control characters not allowed".to_owned(),
        ));
    }
    if value.contains('\r') || value.contains('\n') || value.contains('\0') {
        return Err(GatewayError::Transport(
            "invalid header value: control characters not allowed".to_owned(),
        ));
    }
    Ok(())
}

/// HTTPS transport to the First Data endpoints using reqwest.
///
/// Connection pooling and keep-alive come from the underlying client. A
/// non-success HTTP status is returned as a normal [`TransportResponse`]
/// rather than an error, since the gateway reports declines and field errors
/// with 4xx statuses and a parseable body.
///
/// # Examples
///
/// ```rust,no_run
/// use firstdata_gateway::transport::{HttpTransport, RequestContext, Transport};
///
/// # async fn example() -> firstdata_gateway::error::Result<()> {
/// let transport = HttpTransport::new()?;
///
/// let ctx = RequestContext {
///     url: "https://api.demo.globalgatewaye4.firstdata.com/transaction/v14",
///     headers: vec![("Content-Type", "application/json; charset=UTF-8")],
/// };
///
/// let response = transport.post(ctx, br#"{"transaction_type":"00"}"#).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
}

impl sealed::private::Sealed for HttpTransport {}

impl HttpTransport {
    /// Creates a new HTTP transport with default settings.
    ///
    /// Uses a shared singleton client for connection pooling efficiency.
    ///
    /// Default configuration:
    /// - Pool max idle per host: 100
    /// - Timeout: 30 seconds
    /// - Connect timeout: 10 seconds
    ///
    /// # Errors
    ///
    /// This method is infallible but returns `Result` for API consistency.
    ///
    /// # Examples
    ///
    /// ```
    /// use firstdata_gateway::transport::HttpTransport;
    ///
    /// let transport = HttpTransport::new().unwrap();
    /// ```
    pub fn new() -> Result<Self> {
        Ok(Self { client: DEFAULT_HTTP_CLIENT.clone() })
    }

    /// Creates an HTTP transport with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client creation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use firstdata_gateway::transport::{HttpConfig, HttpTransport};
    ///
    /// let config = HttpConfig {
    ///     pool_max_idle_per_host: 20,
    ///     timeout_secs: 60,
    ///     connect_timeout_secs: 15,
    /// };
    ///
    /// let transport = HttpTransport::with_config(&config).unwrap();
    /// ```
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(GatewayError::Http)?;

        Ok(Self { client })
    }

    /// Internal method to execute one validated POST exchange.
    #[instrument(skip(self, ctx, body), fields(url = ctx.url, body_len = body.len()))]
    async fn execute_post(
        &self,
        ctx: RequestContext<'_>,
        body: &[u8],
    ) -> Result<TransportResponse> {
        let url = Url::parse(ctx.url)
            .map_err(|e| GatewayError::Transport(format!("invalid endpoint URL: {e}")))?;

        // Security: HTTPS-only destination, no loopback hosts
        validate_url(&url)?;

        // Security: reject headers that could smuggle CRLF sequences
        for (key, value) in &ctx.headers {
            validate_header(key, value)?;
        }

        let mut request = self.client.post(url);

        for (key, value) in ctx.headers {
            request = request.header(key, value);
        }

        let response = request.body(body.to_vec()).send().await?;

        let status = response.status().as_u16();

        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_owned()))
            .collect();

        let response_body = response.bytes().await?.to_vec();

        Ok(TransportResponse { status, body: response_body, headers })
    }
}

impl Transport for HttpTransport {
    async fn post<'a>(
        &'a self,
        ctx: RequestContext<'a>,
        body: &'a [u8],
    ) -> Result<TransportResponse> {
        self.execute_post(ctx, body).await
    }

    fn protocol_name(&self) -> &'static str {
        "http"
    }
}
