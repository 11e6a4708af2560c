//! JSON responses from the signed Payeezy transaction API.

use serde_json::Value;

use crate::error::{GatewayError, Result};
use crate::response::ResponseFields;

/// Parsed reply from the signed JSON API.
///
/// Approval comes from the `transaction_approved` flag alone. A bank decline
/// can carry `exact_resp_code: "00"` (the gateway itself processed the
/// transaction normally), so the code never decides success.
#[derive(Debug, Clone)]
pub struct PayeezyResponse {
    /// Shared loose-typed field access.
    pub fields: ResponseFields,
}

impl PayeezyResponse {
    /// Parses a JSON reply body.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidResponse`] carrying the body text when
    /// the body is not a JSON object.
    pub fn parse(body: &[u8]) -> Result<Self> {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(fields)) => {
                Ok(Self { fields: ResponseFields::from_json_object(fields) })
            }
            _ => Err(GatewayError::InvalidResponse(String::from_utf8_lossy(body).into_owned())),
        }
    }

    /// Whether the gateway approved the transaction.
    #[must_use]
    pub fn is_successful(&self) -> bool {
        self.fields.flag("transaction_approved")
    }

    /// Reference to quote when refunding or voiding this transaction:
    /// `authorization_num::transaction_tag`. Missing sides stay empty, so
    /// `"::"` is a legitimate value for an unreferenced decline.
    #[must_use]
    pub fn transaction_reference(&self) -> String {
        format!(
            "{}::{}",
            self.fields.text("authorization_num").unwrap_or_default(),
            self.fields.text("transaction_tag").unwrap_or_default()
        )
    }

    /// Authorization number issued by the processor.
    pub fn authorization_num(&self) -> Option<String> {
        self.fields.text("authorization_num")
    }

    /// Gateway-issued transaction tag.
    pub fn transaction_tag(&self) -> Option<String> {
        self.fields.text("transaction_tag")
    }

    /// Primary human-readable message: the bank's.
    pub fn message(&self) -> Option<String> {
        self.fields.text("bank_message")
    }

    /// Bank response message.
    pub fn bank_message(&self) -> Option<String> {
        self.fields.text("bank_message")
    }

    /// Gateway response message.
    pub fn exact_message(&self) -> Option<String> {
        self.fields.text("exact_message")
    }

    /// Gateway response code; `"00"` is normal processing.
    pub fn code(&self) -> Option<String> {
        self.fields.text("exact_resp_code")
    }

    /// Bank response code; `"100"` is approved.
    pub fn bank_code(&self) -> Option<String> {
        self.fields.text("bank_resp_code")
    }

    /// Processor sequence number.
    pub fn sequence_no(&self) -> Option<String> {
        self.fields.text("sequence_no")
    }
}
