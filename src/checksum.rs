//! Bank-number checksum validation.
//!
//! Two pure validators used when vetting ACH details before a request is
//! built: the ABA routing number check (nine-digit weighted mod-10) and the
//! IBAN check (rearranged, letter-substituted mod-97). Both fail closed: any
//! input that cannot be interpreted returns `false` rather than erroring.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Required total IBAN length by two-letter country code (lowercase).
///
/// Lengths are fixed per country by the national numbering authority, so a
/// length mismatch alone is enough to reject without running the checksum.
static IBAN_LENGTHS: LazyLock<HashMap<&'static str, usize>> = LazyLock::new(|| {
    HashMap::from([
        ("al", 28), ("ad", 24), ("at", 20), ("az", 28), ("bh", 22), ("be", 16),
        ("ba", 20), ("br", 29), ("bg", 22), ("cr", 21), ("hr", 21), ("cy", 28),
        ("cz", 24), ("dk", 18), ("do", 28), ("ee", 20), ("fo", 18), ("fi", 18),
        ("fr", 27), ("ge", 22), ("de", 22), ("gi", 23), ("gr", 27), ("gl", 18),
        ("gt", 28), ("hu", 28), ("is", 26), ("ie", 22), ("il", 23), ("it", 27),
        ("jo", 30), ("kz", 20), ("kw", 30), ("lv", 21), ("lb", 28), ("li", 21),
        ("lt", 20), ("lu", 20), ("mk", 19), ("mt", 31), ("mr", 27), ("mu", 30),
        ("mc", 27), ("md", 24), ("me", 22), ("nl", 18), ("no", 15), ("pk", 24),
        ("ps", 29), ("pl", 28), ("pt", 25), ("qa", 29), ("ro", 24), ("sm", 27),
        ("sa", 24), ("rs", 22), ("sk", 24), ("si", 19), ("es", 24), ("se", 24),
        ("ch", 21), ("tn", 24), ("tr", 26), ("ae", 23), ("gb", 22), ("vg", 24),
    ])
});

/// Validates an ABA routing number.
///
/// Non-digit characters are stripped first, so formatted input such as
/// `"02-100-0021"` is accepted. Exactly nine digits must remain. The weighted
/// sum (weights cycling 3, 7, 1 across positions) must be nonzero and
/// divisible by ten; requiring a nonzero sum keeps the all-zero string from
/// passing trivially.
///
/// # Examples
///
/// ```
/// use firstdata_gateway::checksum::validate_routing_number;
///
/// assert!(validate_routing_number("021000021"));
/// assert!(!validate_routing_number("021000020"));
/// ```
#[must_use]
pub fn validate_routing_number(input: &str) -> bool {
    let digits: Vec<u32> = input.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 9 {
        return false;
    }
    const WEIGHTS: [u32; 3] = [3, 7, 1];
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(position, digit)| digit * WEIGHTS[position % 3])
        .sum();
    sum != 0 && sum % 10 == 0
}

/// Validates an IBAN.
///
/// Input is case-folded, checked against the per-country length table, then
/// run through the standard mod-97 procedure: the first four characters move
/// to the end, letters substitute as `a=10 .. z=35`, and the resulting digit
/// string must leave remainder 1. Any character outside `[0-9a-z]` after
/// folding rejects the input.
///
/// # Examples
///
/// ```
/// use firstdata_gateway::checksum::validate_iban;
///
/// assert!(validate_iban("GB82WEST12345698765432"));
/// assert!(!validate_iban("GB82WEST12345698765433"));
/// assert!(!validate_iban("XX82WEST12345698765432"));
/// ```
#[must_use]
pub fn validate_iban(input: &str) -> bool {
    let account = input.to_lowercase();
    // Guards the byte slicing below as well as the substitution step.
    if !account.bytes().all(|byte| byte.is_ascii_alphanumeric()) {
        return false;
    }
    if account.len() < 5 {
        return false;
    }
    let Some(expected_len) = IBAN_LENGTHS.get(&account[..2]) else {
        return false;
    };
    if account.len() != *expected_len {
        return false;
    }

    // Country code and check digits move to the end, then the whole string
    // folds into a running remainder so no big-integer arithmetic is needed.
    let rearranged = format!("{}{}", &account[4..], &account[..4]);
    let mut remainder: u32 = 0;
    for byte in rearranged.bytes() {
        remainder = match byte {
            b'0'..=b'9' => (remainder * 10 + u32::from(byte - b'0')) % 97,
            _ => (remainder * 100 + u32::from(byte - b'a') + 10) % 97,
        };
    }
    remainder == 1
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_routing_number_known_values() {
        assert!(validate_routing_number("021000021"));
        assert!(validate_routing_number("111000025"));
        assert!(!validate_routing_number("021000020"));
        assert!(!validate_routing_number("123456789"));
    }

    #[test]
    fn test_routing_number_strips_formatting() {
        assert!(validate_routing_number("02-100-0021"));
        assert!(validate_routing_number("021 000 021"));
        assert!(validate_routing_number("routing: 021000021"));
    }

    #[test]
    fn test_routing_number_wrong_digit_count() {
        assert!(!validate_routing_number(""));
        assert!(!validate_routing_number("21000021"));
        assert!(!validate_routing_number("0210000211"));
    }

    #[test]
    fn test_routing_number_zero_checksum_rejected() {
        // Sum of zero divides ten but must still fail.
        assert!(!validate_routing_number("000000000"));
    }

    #[test]
    fn test_iban_known_values() {
        assert!(validate_iban("GB82WEST12345698765432"));
        assert!(validate_iban("DE89370400440532013000"));
    }

    #[test]
    fn test_iban_case_insensitive() {
        assert!(validate_iban("gb82west12345698765432"));
        assert!(validate_iban("Gb82WeSt12345698765432"));
    }

    #[test]
    fn test_iban_single_character_mutation_fails() {
        // Flipping any one character shifts the remainder off 1.
        assert!(!validate_iban("GB82WEST12345698765433"));
        assert!(!validate_iban("GB83WEST12345698765432"));
        assert!(!validate_iban("GB82VEST12345698765432"));
    }

    #[test]
    fn test_iban_unknown_country_code() {
        assert!(!validate_iban("XX82WEST12345698765432"));
    }

    #[test]
    fn test_iban_length_mismatch_for_known_country() {
        // gb requires 22 characters.
        assert!(!validate_iban("GB82WEST123456987654"));
        assert!(!validate_iban("GB82WEST1234569876543210"));
    }

    #[test]
    fn test_iban_rejects_short_or_malformed_input() {
        assert!(!validate_iban(""));
        assert!(!validate_iban("GB82"));
        assert!(!validate_iban("GB82!EST12345698765432"));
        assert!(!validate_iban("GB82 WEST 1234 5698 7654 32"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_routing_number_formatting_is_transparent(digits in "[0-9]{9}") {
            let formatted = format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..]);
            prop_assert_eq!(
                validate_routing_number(&digits),
                validate_routing_number(&formatted)
            );
        }

        #[test]
        fn test_routing_number_never_passes_off_length(digits in "[0-9]{0,8}|[0-9]{10,12}") {
            prop_assert!(!validate_routing_number(&digits));
        }

        #[test]
        fn test_iban_case_fold_is_transparent(candidate in "[A-Z0-9]{5,34}") {
            prop_assert_eq!(
                validate_iban(&candidate),
                validate_iban(&candidate.to_lowercase())
            );
        }
    }
}
