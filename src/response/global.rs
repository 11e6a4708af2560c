//! URL-encoded responses from the legacy Global Gateway e4 API.

use url::form_urlencoded;

use crate::response::ResponseFields;

/// Parsed reply from the legacy API.
///
/// The legacy API reports the outcome through `exact_resp_code` alone;
/// `"00"` is the only success value.
#[derive(Debug, Clone)]
pub struct GlobalResponse {
    /// Shared loose-typed field access.
    pub fields: ResponseFields,
}

impl GlobalResponse {
    /// Parses a URL-encoded reply body. Any byte sequence decodes to some
    /// set of pairs, so parsing itself cannot fail; a nonsense body yields a
    /// response with no recognizable fields.
    #[must_use]
    pub fn parse(body: &[u8]) -> Self {
        let pairs = form_urlencoded::parse(body).into_owned();
        Self { fields: ResponseFields::from_pairs(pairs) }
    }

    /// Whether the gateway reported success.
    #[must_use]
    pub fn is_successful(&self) -> bool {
        self.fields.text("exact_resp_code").as_deref() == Some("00")
    }

    /// Merchant reference echoed by the gateway.
    pub fn transaction_reference(&self) -> Option<String> {
        self.fields.text("reference_no")
    }

    /// Gateway response message.
    pub fn message(&self) -> Option<String> {
        self.fields.text("exact_message")
    }

    /// Gateway response code; `"00"` is approved.
    pub fn code(&self) -> Option<String> {
        self.fields.text("exact_resp_code")
    }
}
