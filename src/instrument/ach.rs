//! Bank-account (ACH) instrument model and validation.

use zeroize::Zeroize;

use crate::checksum::{validate_iban, validate_routing_number};
use crate::error::{GatewayError, Result};
use crate::instrument::{CheckType, ContactAddress};

/// Bank account details for an ACH / telecheck payment.
///
/// Identity-proof fields (`drivers_license`, `ssn`, `tax_id`, `military_id`)
/// are mutually exclusive on the wire; when several are set, the first in
/// that priority order wins at build time (see [`identity_proof`]).
///
/// The account number, routing number, and SSN are zeroized when the value
/// is dropped.
///
/// [`identity_proof`]: Self::identity_proof
#[derive(Debug, Clone, Default)]
pub struct Ach {
    /// ABA routing number, nine digits.
    pub routing_number: Option<String>,
    /// Bank account number.
    pub account_number: Option<String>,
    /// Check number.
    pub check_number: Option<String>,
    /// Personal or corporate account.
    pub check_type: Option<CheckType>,
    /// Driver's license number (identity proof, priority 0).
    pub drivers_license: Option<String>,
    /// Issuing state for the driver's license.
    pub drivers_license_state: Option<String>,
    /// Social security number (identity proof, priority 1).
    pub ssn: Option<String>,
    /// Tax ID (identity proof, priority 2).
    pub tax_id: Option<String>,
    /// Military ID (identity proof, priority 3).
    pub military_id: Option<String>,
    /// Merchant-side customer reference.
    pub customer_id: Option<String>,
    /// Release type (merchant context).
    pub release_type: Option<String>,
    /// VIP flag (merchant context).
    pub vip: Option<bool>,
    /// Clerk ID (merchant context).
    pub clerk_id: Option<String>,
    /// Device ID (merchant context).
    pub device_id: Option<String>,
    /// Raw MICR line from a scanned check.
    pub micr: Option<String>,
    /// E-commerce indicator flag.
    pub ecommerce_flag: Option<u8>,
    /// Contact email for receipts.
    pub email: Option<String>,
    /// Account holder birthday.
    pub birthday: Option<String>,
    /// Account holder gender.
    pub gender: Option<String>,
    /// Billing contact block.
    pub billing_address: ContactAddress,
    /// Shipping contact block.
    pub shipping_address: ContactAddress,
}

impl Ach {
    /// Sets the account holder name on both the billing and shipping blocks.
    pub fn set_holder_name(&mut self, full_name: &str) {
        self.billing_address.set_name(full_name);
        self.shipping_address.set_name(full_name);
    }

    /// Account holder name as sent to the gateway (billing block, rejoined).
    #[must_use]
    pub fn holder_name(&self) -> String {
        self.billing_address.name()
    }

    /// Resolves the identity-proof tie-break: first non-empty of driver's
    /// license, SSN, tax ID, military ID, paired with its wire type code
    /// 0 through 3. Returns `None` when no proof is set, in which case the
    /// identity keys stay out of the request entirely.
    #[must_use]
    pub fn identity_proof(&self) -> Option<(u8, &str)> {
        let candidates = [
            (0, self.drivers_license.as_deref()),
            (1, self.ssn.as_deref()),
            (2, self.tax_id.as_deref()),
            (3, self.military_id.as_deref()),
        ];
        for (type_code, value) in candidates {
            if let Some(value) = value
                && !value.is_empty()
            {
                return Some((type_code, value));
            }
        }
        None
    }

    /// Validates the account details.
    ///
    /// Checks run in a fixed order and stop at the first failure: first name,
    /// last name, routing number, and account number present (empty counts as
    /// missing), then the routing-number checksum, then the account-number
    /// checksum. US account numbers run through the IBAN check as well; the
    /// message text is part of the contract.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidAch`] naming the failed check.
    pub fn validate(&self) -> Result<()> {
        let required = [
            (self.billing_address.first_name.as_deref(), "first name"),
            (self.billing_address.last_name.as_deref(), "last name"),
            (self.routing_number.as_deref(), "routing number"),
            (self.account_number.as_deref(), "account number"),
        ];
        for (value, label) in required {
            if value.unwrap_or("").is_empty() {
                return Err(GatewayError::InvalidAch(format!("The {label} is required")));
            }
        }
        if !validate_routing_number(self.routing_number.as_deref().unwrap_or("")) {
            return Err(GatewayError::InvalidAch("Routing Number is invalid".to_owned()));
        }
        if !validate_iban(self.account_number.as_deref().unwrap_or("")) {
            return Err(GatewayError::InvalidAch("Account Number is invalid".to_owned()));
        }
        Ok(())
    }
}

impl Drop for Ach {
    fn drop(&mut self) {
        // Zeroize sensitive fields on drop
        self.account_number.zeroize();
        self.routing_number.zeroize();
        self.ssn.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_ach() -> Ach {
        let mut ach = Ach {
            routing_number: Some("021000021".to_owned()),
            account_number: Some("GB82WEST12345698765432".to_owned()),
            check_number: Some("123".to_owned()),
            check_type: Some(CheckType::Personal),
            drivers_license: None,
            drivers_license_state: None,
            ssn: None,
            tax_id: None,
            military_id: None,
            customer_id: None,
            release_type: None,
            vip: None,
            clerk_id: None,
            device_id: None,
            micr: None,
            ecommerce_flag: None,
            email: Some("customer@example.com".to_owned()),
            birthday: None,
            gender: None,
            billing_address: ContactAddress::default(),
            shipping_address: ContactAddress::default(),
        };
        ach.set_holder_name("John Doe");
        ach
    }

    #[allow(clippy::unreachable, reason = "helper asserts the error variant is InvalidAch")]
    fn invalid_ach_message(ach: &Ach) -> String {
        let err = ach.validate().unwrap_err();
        let GatewayError::InvalidAch(message) = err else {
            unreachable!("expected InvalidAch");
        };
        message
    }

    #[test]
    fn test_validate_accepts_valid_account() {
        assert!(valid_ach().validate().is_ok());
    }

    #[test]
    fn test_validate_requires_first_name() {
        let mut ach = valid_ach();
        ach.billing_address.first_name = None;
        assert_eq!(invalid_ach_message(&ach), "The first name is required");
    }

    #[test]
    fn test_validate_requires_last_name() {
        let mut ach = valid_ach();
        ach.billing_address.last_name = Some(String::new());
        assert_eq!(invalid_ach_message(&ach), "The last name is required");
    }

    #[test]
    fn test_validate_requires_routing_number() {
        let mut ach = valid_ach();
        ach.routing_number = None;
        assert_eq!(invalid_ach_message(&ach), "The routing number is required");
    }

    #[test]
    fn test_validate_requires_account_number() {
        let mut ach = valid_ach();
        ach.account_number = Some(String::new());
        assert_eq!(invalid_ach_message(&ach), "The account number is required");
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        // First name outranks routing number when both are missing.
        let mut ach = valid_ach();
        ach.billing_address.first_name = None;
        ach.routing_number = None;
        assert_eq!(invalid_ach_message(&ach), "The first name is required");
    }

    #[test]
    fn test_validate_rejects_bad_routing_checksum() {
        let mut ach = valid_ach();
        ach.routing_number = Some("021000020".to_owned());
        assert_eq!(invalid_ach_message(&ach), "Routing Number is invalid");
    }

    #[test]
    fn test_validate_rejects_bad_account_checksum() {
        let mut ach = valid_ach();
        ach.account_number = Some("2020".to_owned());
        assert_eq!(invalid_ach_message(&ach), "Account Number is invalid");
    }

    #[test]
    fn test_identity_proof_priority_order() {
        let mut ach = valid_ach();
        assert_eq!(ach.identity_proof(), None);

        ach.military_id = Some("M-9999".to_owned());
        assert_eq!(ach.identity_proof(), Some((3, "M-9999")));

        ach.drivers_license = Some("D1234567".to_owned());
        assert_eq!(ach.identity_proof(), Some((0, "D1234567")));

        // Clearing the license re-promotes the next proof in line.
        ach.drivers_license = None;
        assert_eq!(ach.identity_proof(), Some((3, "M-9999")));
    }

    #[test]
    fn test_identity_proof_skips_empty_values() {
        let mut ach = valid_ach();
        ach.drivers_license = Some(String::new());
        ach.ssn = Some("078-05-1120".to_owned());
        assert_eq!(ach.identity_proof(), Some((1, "078-05-1120")));
    }

    #[test]
    fn test_identity_proof_middle_priorities() {
        let mut ach = valid_ach();
        ach.tax_id = Some("TX-1".to_owned());
        ach.military_id = Some("M-1".to_owned());
        assert_eq!(ach.identity_proof(), Some((2, "TX-1")));

        ach.ssn = Some("078-05-1120".to_owned());
        assert_eq!(ach.identity_proof(), Some((1, "078-05-1120")));
    }
}
