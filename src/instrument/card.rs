//! Credit/debit card model, brand detection, and validation.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::{Datelike, Utc};
use zeroize::Zeroize;

use crate::error::{GatewayError, Result};
use crate::instrument::ContactAddress;

/// Display names the gateway expects in `credit_card_type`, keyed by detected
/// brand. Brands with no entry pass through unchanged (the gateway accepts
/// `maestro` verbatim, for example).
static CARD_TYPE_NAMES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("visa", "Visa"),
        ("mastercard", "Mastercard"),
        ("discover", "Discover"),
        ("amex", "American Express"),
        ("diners_club", "Diners Club"),
        ("jcb", "JCB"),
    ])
});

/// Maps a detected brand to the gateway's `credit_card_type` value.
///
/// # Examples
///
/// ```
/// use firstdata_gateway::instrument::card::card_type_name;
///
/// assert_eq!(card_type_name("visa"), "Visa");
/// assert_eq!(card_type_name("maestro"), "maestro");
/// ```
#[must_use]
pub fn card_type_name(brand: &str) -> &str {
    CARD_TYPE_NAMES.get(brand).copied().unwrap_or(brand)
}

/// Detects a card brand from the number's issuer prefix and length.
///
/// Non-digit characters are ignored, so formatted numbers are accepted.
/// Returns `None` when no issuer range matches; callers treat that as an
/// unrecognized card rather than an error.
#[must_use]
pub fn detect_brand(number: &str) -> Option<&'static str> {
    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    let len = digits.len();
    let p2: Option<u32> = digits.get(..2).and_then(|s| s.parse().ok());
    let p3: Option<u32> = digits.get(..3).and_then(|s| s.parse().ok());
    let p4: Option<u32> = digits.get(..4).and_then(|s| s.parse().ok());

    if digits.starts_with('4') && (len == 13 || len == 16) {
        return Some("visa");
    }
    if (matches!(p2, Some(51..=55)) || digits.starts_with("677189")) && len == 16 {
        return Some("mastercard");
    }
    if matches!(p2, Some(34 | 37)) && len == 15 {
        return Some("amex");
    }
    if (matches!(p3, Some(300..=305)) || matches!(p2, Some(36 | 38))) && len == 14 {
        return Some("diners_club");
    }
    if matches!(p4, Some(2131 | 1800)) && len == 15 {
        return Some("jcb");
    }
    if matches!(p2, Some(35)) && len == 16 {
        return Some("jcb");
    }
    if (matches!(p4, Some(6011)) || matches!(p3, Some(650..=659))) && len == 16 {
        return Some("discover");
    }
    // Maestro last: its 6x range overlaps Discover and JCB prefixes.
    if matches!(p2, Some(50 | 56..=58 | 60..=69)) && (12..=19).contains(&len) {
        return Some("maestro");
    }
    None
}

/// Credit or debit card details.
///
/// All fields are optional until [`validate`] runs. A stored-token payment
/// sets [`token`] and [`token_brand`] and leaves the number empty; the raw
/// number path is skipped entirely for tokens.
///
/// The number and CVV are zeroized when the value is dropped. Never log
/// either field.
///
/// [`validate`]: Self::validate
/// [`token`]: Self::token
/// [`token_brand`]: Self::token_brand
#[derive(Debug, Clone, Default)]
pub struct Card {
    /// Card number (PAN).
    pub number: Option<String>,
    /// Expiry month, 1-12.
    pub expiry_month: Option<u32>,
    /// Expiry year, four digits.
    pub expiry_year: Option<i32>,
    /// Card verification value, 3 or 4 digits.
    pub cvv: Option<String>,
    /// Stored TransArmor token replacing the raw number.
    pub token: Option<String>,
    /// Brand hint accompanying a token; sent to the gateway verbatim.
    pub token_brand: Option<String>,
    /// Contact email for receipts.
    pub email: Option<String>,
    /// Billing contact block.
    pub billing_address: ContactAddress,
    /// Shipping contact block.
    pub shipping_address: ContactAddress,
}

impl Card {
    /// Sets the cardholder name on both the billing and shipping blocks.
    pub fn set_holder_name(&mut self, full_name: &str) {
        self.billing_address.set_name(full_name);
        self.shipping_address.set_name(full_name);
    }

    /// Cardholder name as sent to the gateway (billing block, rejoined).
    #[must_use]
    pub fn holder_name(&self) -> String {
        self.billing_address.name()
    }

    /// Detected brand of the raw card number, if recognized.
    #[must_use]
    pub fn brand(&self) -> Option<&'static str> {
        detect_brand(self.number.as_deref().unwrap_or(""))
    }

    /// Expiry in the gateway's `MMYY` form, if both parts are set.
    #[must_use]
    pub fn expiry_mmyy(&self) -> Option<String> {
        match (self.expiry_month, self.expiry_year) {
            (Some(month), Some(year)) => Some(format!("{month:02}{:02}", year.rem_euclid(100))),
            _ => None,
        }
    }

    /// Validates the card for a raw-number payment.
    ///
    /// Checks run in a fixed order and stop at the first failure: number
    /// present, expiry present, expiry not already past (month granularity,
    /// UTC), CVV well formed when given. Token payments skip this entirely.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidCard`] naming the failed check.
    pub fn validate(&self) -> Result<()> {
        if self.number.as_deref().unwrap_or("").is_empty() {
            return Err(GatewayError::InvalidCard("The card number is required".to_owned()));
        }
        let (Some(month), Some(year)) = (self.expiry_month, self.expiry_year) else {
            return Err(GatewayError::InvalidCard("The expiry date is required".to_owned()));
        };
        let now = Utc::now();
        if (year, month) < (now.year(), now.month()) {
            return Err(GatewayError::InvalidCard("The card has expired".to_owned()));
        }
        if let Some(cvv) = self.cvv.as_deref() {
            let well_formed = matches!(cvv.len(), 3 | 4) && cvv.bytes().all(|b| b.is_ascii_digit());
            if !cvv.is_empty() && !well_formed {
                return Err(GatewayError::InvalidCard("The CVV is invalid".to_owned()));
            }
        }
        Ok(())
    }
}

impl Drop for Card {
    fn drop(&mut self) {
        // Zeroize sensitive fields on drop (PCI-DSS requirement)
        self.number.zeroize();
        self.cvv.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_card() -> Card {
        let mut card = Card {
            number: Some("4111111111111111".to_owned()),
            expiry_month: Some(12),
            expiry_year: Some(2030),
            cvv: Some("123".to_owned()),
            token: None,
            token_brand: None,
            email: Some("customer@example.com".to_owned()),
            billing_address: ContactAddress::default(),
            shipping_address: ContactAddress::default(),
        };
        card.set_holder_name("John Doe");
        card
    }

    #[test]
    fn test_validate_accepts_valid_card() {
        assert!(valid_card().validate().is_ok());
    }

    #[test]
    #[allow(clippy::unreachable, reason = "test ensures the error variant is InvalidCard")]
    fn test_validate_requires_number_first() {
        // Number is checked before expiry, so clearing both reports the number.
        let card = Card::default();
        let err = card.validate().unwrap_err();
        let GatewayError::InvalidCard(message) = err else {
            unreachable!("expected InvalidCard");
        };
        assert_eq!(message, "The card number is required");
    }

    #[test]
    #[allow(clippy::unreachable, reason = "test ensures the error variant is InvalidCard")]
    fn test_validate_requires_expiry() {
        let mut card = valid_card();
        card.expiry_year = None;
        let err = card.validate().unwrap_err();
        let GatewayError::InvalidCard(message) = err else {
            unreachable!("expected InvalidCard");
        };
        assert_eq!(message, "The expiry date is required");
    }

    #[test]
    #[allow(clippy::unreachable, reason = "test ensures the error variant is InvalidCard")]
    fn test_validate_rejects_expired_card() {
        let mut card = valid_card();
        card.expiry_month = Some(12);
        card.expiry_year = Some(2020);
        let err = card.validate().unwrap_err();
        let GatewayError::InvalidCard(message) = err else {
            unreachable!("expected InvalidCard");
        };
        assert_eq!(message, "The card has expired");
    }

    #[test]
    fn test_validate_accepts_card_expiring_this_month() {
        let now = Utc::now();
        let mut card = valid_card();
        card.expiry_month = Some(now.month());
        card.expiry_year = Some(now.year());
        assert!(card.validate().is_ok());
    }

    #[test]
    #[allow(clippy::unreachable, reason = "test ensures the error variant is InvalidCard")]
    fn test_validate_cvv_format() {
        let mut card = valid_card();
        card.cvv = Some("12a".to_owned());
        let err = card.validate().unwrap_err();
        let GatewayError::InvalidCard(message) = err else {
            unreachable!("expected InvalidCard");
        };
        assert_eq!(message, "The CVV is invalid");

        card.cvv = Some("12345".to_owned());
        assert!(card.validate().is_err());

        card.cvv = Some("1234".to_owned());
        assert!(card.validate().is_ok());

        // Absent or empty CVV is allowed; only a malformed one fails.
        card.cvv = None;
        assert!(card.validate().is_ok());
        card.cvv = Some(String::new());
        assert!(card.validate().is_ok());
    }

    #[test]
    fn test_detect_brand_issuer_ranges() {
        assert_eq!(detect_brand("4111111111111111"), Some("visa"));
        assert_eq!(detect_brand("4222222222222"), Some("visa"));
        assert_eq!(detect_brand("5555555555554444"), Some("mastercard"));
        assert_eq!(detect_brand("378282246310005"), Some("amex"));
        assert_eq!(detect_brand("36148900647913"), Some("diners_club"));
        assert_eq!(detect_brand("3530111333300000"), Some("jcb"));
        assert_eq!(detect_brand("6011111111111117"), Some("discover"));
        assert_eq!(detect_brand("6304000000000000"), Some("maestro"));
    }

    #[test]
    fn test_detect_brand_ignores_formatting() {
        assert_eq!(detect_brand("4111 1111 1111 1111"), Some("visa"));
        assert_eq!(detect_brand("4111-1111-1111-1111"), Some("visa"));
    }

    #[test]
    fn test_detect_brand_unrecognized() {
        assert_eq!(detect_brand(""), None);
        assert_eq!(detect_brand("1234567890123"), None);
        // Right prefix, wrong length.
        assert_eq!(detect_brand("411111111111111"), None);
    }

    #[test]
    fn test_card_type_name_mapping() {
        assert_eq!(card_type_name("visa"), "Visa");
        assert_eq!(card_type_name("mastercard"), "Mastercard");
        assert_eq!(card_type_name("amex"), "American Express");
        assert_eq!(card_type_name("diners_club"), "Diners Club");
        assert_eq!(card_type_name("jcb"), "JCB");
        assert_eq!(card_type_name("discover"), "Discover");
        // Unknown brands pass through for the gateway to judge.
        assert_eq!(card_type_name("maestro"), "maestro");
    }

    #[test]
    fn test_expiry_mmyy() {
        let mut card = valid_card();
        card.expiry_month = Some(1);
        card.expiry_year = Some(2025);
        assert_eq!(card.expiry_mmyy().as_deref(), Some("0125"));

        card.expiry_month = Some(12);
        card.expiry_year = Some(2030);
        assert_eq!(card.expiry_mmyy().as_deref(), Some("1230"));

        card.expiry_year = None;
        assert_eq!(card.expiry_mmyy(), None);
    }

    #[test]
    fn test_holder_name_round_trip() {
        let mut card = Card::default();
        card.set_holder_name("Mary Jane Watson");
        assert_eq!(card.holder_name(), "Mary Jane Watson");
        assert_eq!(card.shipping_address.first_name.as_deref(), Some("Mary"));
    }
}
