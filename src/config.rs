//! Gateway configuration types.
//!
//! This module defines the TOML-deserializable configuration shared by both
//! gateway facades. The legacy facade authenticates with `gateway_id` and
//! `password` alone; the signed facade additionally needs `key_id` and
//! `hmac_key`.

use std::fmt;
use std::path::Path;

use serde::Deserialize;
use zeroize::Zeroize;

use crate::error::{GatewayError, Result};
use crate::request::ApiVersion;
use crate::transport::HttpConfig;

/// Root gateway configuration.
///
/// The password and HMAC secret are redacted from the [`Debug`] output and
/// zeroized when the value is dropped. The key id is not secret; it travels
/// in the clear inside the `Authorization` header.
///
/// # Examples
///
/// ```
/// use firstdata_gateway::config::GatewayConfig;
///
/// let config = GatewayConfig::from_toml(r#"
///     gateway_id = "AB1234-01"
///     password = "s3cr3t"
///     test_mode = true
/// "#).unwrap();
/// assert!(config.test_mode);
/// ```
#[derive(Clone, Deserialize)]
pub struct GatewayConfig {
    /// Merchant terminal identifier, e.g. `AB1234-01`.
    pub gateway_id: String,

    /// Terminal password issued alongside the gateway id.
    pub password: String,

    /// HMAC key id for signed requests.
    #[serde(default)]
    pub key_id: Option<String>,

    /// Shared HMAC secret for signed requests.
    #[serde(default)]
    pub hmac_key: Option<String>,

    /// Routes requests to the demo host instead of production.
    #[serde(default)]
    pub test_mode: bool,

    /// API version override; each facade picks its own default when unset.
    #[serde(default)]
    pub api_version: Option<u8>,

    /// HTTP transport tuning.
    #[serde(default)]
    pub http: HttpConfig,
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("gateway_id", &self.gateway_id)
            .field("password", &"<redacted>")
            .field("key_id", &self.key_id)
            .field("hmac_key", &self.hmac_key.as_ref().map(|_| "<redacted>"))
            .field("test_mode", &self.test_mode)
            .field("api_version", &self.api_version)
            .field("http", &self.http)
            .finish()
    }
}

impl Drop for GatewayConfig {
    fn drop(&mut self) {
        // Zeroize credentials on drop (PCI-DSS requirement)
        self.password.zeroize();
        self.hmac_key.zeroize();
    }
}

impl GatewayConfig {
    /// Parses and validates a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if TOML parsing fails or validation
    /// fails.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| GatewayError::Config(format!("invalid TOML config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the file cannot be read, TOML
    /// parsing fails, or validation fails.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| GatewayError::Config(format!("cannot read config file: {e}")))?;
        Self::from_toml(&content)
    }

    /// Validates the configuration.
    ///
    /// This method checks that:
    /// - `gateway_id` and `password` are non-empty
    /// - `api_version`, when set, is a version the gateway ever shipped
    /// - the `http` section passes [`HttpConfig::validate`]
    ///
    /// Presence of `key_id` and `hmac_key` is not checked here; only the
    /// signed facade needs them, and it checks at construction.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.gateway_id.is_empty() {
            return Err(GatewayError::Config("gateway_id must not be empty".to_owned()));
        }

        if self.password.is_empty() {
            return Err(GatewayError::Config("password must not be empty".to_owned()));
        }

        if let Some(version) = self.api_version
            && !(9..=34).contains(&version)
        {
            return Err(GatewayError::Config(format!(
                "api_version must be between 9 and 34, got: {version}"
            )));
        }

        self.http.validate()?;

        Ok(())
    }

    /// Configured API version, or the given facade default when unset.
    #[must_use]
    pub fn version_or(&self, default: ApiVersion) -> ApiVersion {
        self.api_version.map_or(default, ApiVersion::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> GatewayConfig {
        GatewayConfig {
            gateway_id: "AB1234-01".to_owned(),
            password: "s3cr3t".to_owned(),
            key_id: Some("163440".to_owned()),
            hmac_key: Some("fakehmackey".to_owned()),
            test_mode: true,
            api_version: None,
            http: HttpConfig::default(),
        }
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            gateway_id = "AB1234-01"
            password = "password123"
            key_id = "12345"
            hmac_key = "fakehmackey"
            test_mode = true
            api_version = 14
        "#;

        let config = GatewayConfig::from_toml(toml).unwrap();
        assert_eq!(config.gateway_id, "AB1234-01");
        assert_eq!(config.password, "password123");
        assert_eq!(config.key_id.as_deref(), Some("12345"));
        assert_eq!(config.hmac_key.as_deref(), Some("fakehmackey"));
        assert!(config.test_mode);
        assert_eq!(config.api_version, Some(14));
    }

    #[test]
    fn test_minimal_toml_fills_defaults() {
        let toml = r#"
            gateway_id = "AB1234-01"
            password = "password123"
        "#;

        let config = GatewayConfig::from_toml(toml).unwrap();
        assert_eq!(config.key_id, None);
        assert_eq!(config.hmac_key, None);
        assert!(!config.test_mode); // default: live
        assert_eq!(config.api_version, None);
        assert_eq!(config.http.timeout_secs, HttpConfig::default().timeout_secs);
    }

    #[test]
    fn test_http_section_from_toml() {
        let toml = r#"
            gateway_id = "AB1234-01"
            password = "password123"

            [http]
            timeout_secs = 60
            pool_max_idle_per_host = 5
        "#;

        let config = GatewayConfig::from_toml(toml).unwrap();
        assert_eq!(config.http.timeout_secs, 60);
        assert_eq!(config.http.pool_max_idle_per_host, 5);
    }

    #[test]
    fn test_missing_gateway_id_rejected() {
        let toml = r#"
            password = "password123"
        "#;
        let result = GatewayConfig::from_toml(toml);
        assert!(matches!(result, Err(GatewayError::Config(_))));
    }

    #[test]
    fn test_missing_password_rejected() {
        let toml = r#"
            gateway_id = "AB1234-01"
        "#;
        let result = GatewayConfig::from_toml(toml);
        assert!(matches!(result, Err(GatewayError::Config(_))));
    }

    #[test]
    fn test_invalid_toml_syntax() {
        let result = GatewayConfig::from_toml("gateway_id = unclosed string");
        assert!(matches!(result, Err(GatewayError::Config(_))));
    }

    #[test]
    fn test_from_file_missing_path() {
        let err = GatewayConfig::from_file("/nonexistent/gateway.toml").unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));
        assert!(err.to_string().contains("cannot read config file"));
    }

    // Validation tests

    #[test]
    fn test_validate_accepts_base_config() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_gateway_id_rejected() {
        let mut config = base_config();
        config.gateway_id = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("gateway_id"));
    }

    #[test]
    fn test_validate_empty_password_rejected() {
        let mut config = base_config();
        config.password = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("password"));
    }

    #[test]
    fn test_validate_api_version_bounds() {
        let mut config = base_config();

        config.api_version = Some(8);
        assert!(config.validate().is_err());

        config.api_version = Some(35);
        assert!(config.validate().is_err());

        config.api_version = Some(9);
        assert!(config.validate().is_ok());

        config.api_version = Some(34);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_http_section_cascades() {
        let mut config = base_config();
        config.http.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_from_toml_runs_validation() {
        let toml = r#"
            gateway_id = "AB1234-01"
            password = "password123"
            api_version = 5
        "#;
        let err = GatewayConfig::from_toml(toml).unwrap_err();
        assert!(err.to_string().contains("api_version"));
    }

    #[test]
    fn test_version_or_prefers_configured() {
        let mut config = base_config();
        config.api_version = Some(13);
        assert_eq!(config.version_or(ApiVersion::V14), ApiVersion::V13);
    }

    #[test]
    fn test_version_or_falls_back_to_default() {
        let config = base_config();
        assert_eq!(config.version_or(ApiVersion::V14), ApiVersion::V14);
        assert_eq!(config.version_or(ApiVersion::V11), ApiVersion::V11);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = base_config();
        let output = format!("{config:?}");
        assert!(output.contains("AB1234-01"));
        assert!(output.contains("163440"));
        assert!(output.contains("<redacted>"));
        assert!(!output.contains("s3cr3t"));
        assert!(!output.contains("fakehmackey"));
    }
}
