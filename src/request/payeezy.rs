//! Request bodies for the Payeezy JSON transaction API (v12 and up).
//!
//! The remote signature covers the exact transmitted bytes, so the builder
//! produces the finished serialization once and the caller signs and sends
//! those same bytes. Field declaration order below mirrors the order the
//! gateway documents, which serde preserves when serializing.

use std::fmt;

use serde::Serialize;

use crate::error::{GatewayError, Result};
use crate::instrument::card::card_type_name;
use crate::instrument::{Ach, Card, CheckType, ContactAddress, PaymentInstrument};
use crate::request::{
    ApiVersion, Operation, PaymentRequest, VerificationFormat, require_amount, required_param,
};

/// Structured address object sent at v14 and later in place of the flat
/// verification string.
#[derive(Debug, Clone, Serialize)]
pub struct AddressBlock {
    /// Street address, line 1.
    pub address1: Option<String>,
    /// Postal code.
    pub zip: Option<String>,
    /// Street address, line 2.
    pub address2: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Phone classification; the gateway treats `N` as "not provided".
    pub phone_type: &'static str,
    /// State or province.
    pub state: Option<String>,
    /// Country code.
    pub country_code: Option<String>,
    /// Phone number.
    pub phone_number: Option<String>,
}

impl AddressBlock {
    fn from_contact(contact: &ContactAddress) -> Self {
        Self {
            address1: contact.address1.clone(),
            zip: contact.postcode.clone(),
            address2: contact.address2.clone(),
            city: contact.city.clone(),
            phone_type: "N",
            state: contact.state.clone(),
            country_code: contact.country.clone(),
            phone_number: contact.phone.clone(),
        }
    }
}

/// Flat verification string used through v13:
/// `address1|postcode|city|state|country`, empty segments kept.
fn avs_string(contact: &ContactAddress) -> String {
    [&contact.address1, &contact.postcode, &contact.city, &contact.state, &contact.country]
        .iter()
        .map(|part| part.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join("|")
}

/// Card purchase/authorize body.
///
/// Fields typed `Option<Option<String>>` belong to one code path only: the
/// outer `None` omits the key entirely (wrong path), `Some(None)` keys it
/// with JSON `null` (right path, value unset).
#[derive(Debug, Serialize)]
pub struct CardRequestBody {
    /// Merchant gateway id.
    pub gateway_id: String,
    /// Merchant terminal password.
    pub password: String,
    /// Wire operation code.
    pub transaction_type: &'static str,
    /// Two-decimal amount string.
    pub amount: String,
    /// Currency code.
    pub currency_code: Option<String>,
    /// Merchant-side transaction id.
    pub reference_no: Option<String>,
    /// Stored token replacing the card number (token path only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transarmor_token: Option<String>,
    /// Card brand; mapped display name on the raw path, caller-supplied hint
    /// verbatim on the token path.
    pub credit_card_type: Option<String>,
    /// Raw card number (raw path only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc_verification_str1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressBlock>,
    /// Always `1` on the raw path: CVV presence indicator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvd_presence_ind: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc_verification_str2: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvd_code: Option<Option<String>>,
    /// Cardholder name rebuilt from the billing block.
    pub cardholder_name: String,
    /// Expiry in `MMYY`.
    pub cc_expiry: Option<String>,
    /// Client IP address.
    pub client_ip: Option<String>,
    /// Contact email.
    pub client_email: Option<String>,
    /// Billing country, upper-cased.
    pub language: Option<String>,
}

/// ACH purchase/authorize body.
///
/// The merchant-context block is always keyed (`null` where unset); the
/// identity-proof pair is omitted entirely when no proof is set.
#[derive(Debug, Serialize)]
pub struct AchRequestBody {
    /// Merchant gateway id.
    pub gateway_id: String,
    /// Merchant terminal password.
    pub password: String,
    /// Wire operation code.
    pub transaction_type: &'static str,
    /// Two-decimal amount string.
    pub amount: String,
    /// Currency code.
    pub currency_code: Option<String>,
    /// Merchant-side transaction id.
    pub reference_no: Option<String>,
    /// Bank account number.
    pub account_number: String,
    /// ABA routing number.
    pub routing_number: String,
    /// Account holder name rebuilt from the billing block.
    pub cardholder_name: String,
    /// `P` or `C`.
    pub check_type: Option<&'static str>,
    /// Check number.
    pub check_number: Option<String>,
    pub release_type: Option<String>,
    pub vip: Option<bool>,
    pub clerk_id: Option<String>,
    pub device_id: Option<String>,
    pub micr: Option<String>,
    pub ecommerce_flag: Option<u8>,
    /// Identity-proof type code 0-3; omitted with no proof set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id_type: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc_verification_str1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressBlock>,
    /// Client IP address.
    pub client_ip: Option<String>,
    /// Contact email.
    pub client_email: Option<String>,
    /// Billing country, upper-cased.
    pub language: Option<String>,
}

/// Tagged refund body.
#[derive(Debug, Serialize)]
pub struct RefundRequestBody {
    /// Merchant gateway id.
    pub gateway_id: String,
    /// Merchant terminal password.
    pub password: String,
    /// Wire operation code.
    pub transaction_type: &'static str,
    /// Two-decimal amount string.
    pub amount: String,
    /// Currency code.
    pub currency_code: Option<String>,
    /// Tag of the transaction being refunded.
    pub transaction_tag: String,
    /// Authorization number of the transaction being refunded.
    pub authorization_num: String,
    /// Client IP address.
    pub client_ip: Option<String>,
}

/// One finished Payeezy body, ready to serialize and sign.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PayeezyRequestBody {
    /// Card purchase or authorize.
    Card(CardRequestBody),
    /// ACH purchase or authorize.
    Ach(AchRequestBody),
    /// Tagged refund.
    Refund(RefundRequestBody),
}

impl PayeezyRequestBody {
    /// Serializes to the JSON bytes that go on the wire and into the
    /// signature.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] if serialization fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| GatewayError::InvalidRequest(format!("body serialization failed: {e}")))
    }
}

/// Builds Payeezy JSON bodies from payment envelopes.
///
/// Holds the merchant credentials baked into every body and the API version
/// that selects the verification-field layout. The password is redacted from
/// the [`Debug`] output.
#[derive(Clone)]
pub struct PayeezyRequestBuilder {
    gateway_id: String,
    password: String,
    api_version: ApiVersion,
}

impl fmt::Debug for PayeezyRequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayeezyRequestBuilder")
            .field("gateway_id", &self.gateway_id)
            .field("password", &"<redacted>")
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl PayeezyRequestBuilder {
    /// Creates a builder for one merchant terminal.
    pub fn new(
        gateway_id: impl Into<String>,
        password: impl Into<String>,
        api_version: ApiVersion,
    ) -> Self {
        Self { gateway_id: gateway_id.into(), password: password.into(), api_version }
    }

    /// API version this builder targets.
    #[must_use]
    pub const fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    /// Builds the body for an envelope.
    ///
    /// Envelope checks run first (amount, then instrument or refund
    /// references), then instrument validation, then assembly.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] for missing envelope
    /// parameters, [`GatewayError::InvalidCard`] / [`GatewayError::InvalidAch`]
    /// for instrument validation failures.
    pub fn build(&self, request: &PaymentRequest) -> Result<PayeezyRequestBody> {
        match (request.operation, &request.instrument) {
            (Operation::Refund, _) => self.build_refund(request).map(PayeezyRequestBody::Refund),
            (_, Some(PaymentInstrument::Card(card))) => {
                self.build_card(request, card).map(PayeezyRequestBody::Card)
            }
            (_, Some(PaymentInstrument::BankAccount(ach))) => {
                self.build_ach(request, ach).map(PayeezyRequestBody::Ach)
            }
            (_, None) => {
                require_amount(request)?;
                Err(GatewayError::InvalidRequest("The card parameter is required".to_owned()))
            }
        }
    }

    fn build_card(&self, request: &PaymentRequest, card: &Card) -> Result<CardRequestBody> {
        let amount = require_amount(request)?;
        let mut body = CardRequestBody {
            gateway_id: self.gateway_id.clone(),
            password: self.password.clone(),
            transaction_type: request.operation.transaction_code(),
            amount,
            currency_code: request.currency.clone(),
            reference_no: request.transaction_id.clone(),
            transarmor_token: None,
            credit_card_type: None,
            cc_number: None,
            cc_verification_str1: None,
            address: None,
            cvd_presence_ind: None,
            cc_verification_str2: None,
            cvd_code: None,
            cardholder_name: card.holder_name(),
            cc_expiry: card.expiry_mmyy(),
            client_ip: request.client_ip.clone(),
            client_email: card.email.clone(),
            language: card.billing_address.country.as_deref().map(str::to_uppercase),
        };

        if let Some(token) = card.token.as_deref().filter(|t| !t.is_empty()) {
            // Token payments skip card validation; the stored token already
            // went through it. The brand hint is passed through unmapped.
            let brand = required_param(card.token_brand.as_deref(), "token_card_type")?;
            body.transarmor_token = Some(token.to_owned());
            body.credit_card_type = Some(brand);
        } else {
            card.validate()?;
            body.credit_card_type = card.brand().map(|brand| card_type_name(brand).to_owned());
            body.cc_number = card.number.clone();
            body.cvd_presence_ind = Some(1);
            match self.api_version.verification_format() {
                VerificationFormat::LegacyStrings => {
                    body.cc_verification_str1 = Some(avs_string(&card.billing_address));
                    body.cc_verification_str2 = Some(card.cvv.clone());
                }
                VerificationFormat::StructuredAddress => {
                    body.address = Some(AddressBlock::from_contact(&card.billing_address));
                    body.cvd_code = Some(card.cvv.clone());
                }
            }
        }
        Ok(body)
    }

    fn build_ach(&self, request: &PaymentRequest, ach: &Ach) -> Result<AchRequestBody> {
        let amount = require_amount(request)?;
        ach.validate()?;

        let (customer_id_type, customer_id_number) = match ach.identity_proof() {
            Some((type_code, value)) => (Some(type_code), Some(value.to_owned())),
            None => (None, None),
        };
        let (cc_verification_str1, address) = match self.api_version.verification_format() {
            VerificationFormat::LegacyStrings => (Some(avs_string(&ach.billing_address)), None),
            VerificationFormat::StructuredAddress => {
                (None, Some(AddressBlock::from_contact(&ach.billing_address)))
            }
        };

        Ok(AchRequestBody {
            gateway_id: self.gateway_id.clone(),
            password: self.password.clone(),
            transaction_type: request.operation.transaction_code(),
            amount,
            currency_code: request.currency.clone(),
            reference_no: request.transaction_id.clone(),
            account_number: ach.account_number.clone().unwrap_or_default(),
            routing_number: ach.routing_number.clone().unwrap_or_default(),
            cardholder_name: ach.holder_name(),
            check_type: ach.check_type.map(CheckType::code),
            check_number: ach.check_number.clone(),
            release_type: ach.release_type.clone(),
            vip: ach.vip,
            clerk_id: ach.clerk_id.clone(),
            device_id: ach.device_id.clone(),
            micr: ach.micr.clone(),
            ecommerce_flag: ach.ecommerce_flag,
            customer_id_type,
            customer_id_number,
            cc_verification_str1,
            address,
            client_ip: request.client_ip.clone(),
            client_email: ach.email.clone(),
            language: ach.billing_address.country.as_deref().map(str::to_uppercase),
        })
    }

    fn build_refund(&self, request: &PaymentRequest) -> Result<RefundRequestBody> {
        let amount = require_amount(request)?;
        let transaction_tag = required_param(request.transaction_tag.as_deref(), "transaction_tag")?;
        let authorization_num =
            required_param(request.authorization_num.as_deref(), "authorization_num")?;
        Ok(RefundRequestBody {
            gateway_id: self.gateway_id.clone(),
            password: self.password.clone(),
            transaction_type: request.operation.transaction_code(),
            amount,
            currency_code: request.currency.clone(),
            transaction_tag,
            authorization_num,
            client_ip: request.client_ip.clone(),
        })
    }
}
