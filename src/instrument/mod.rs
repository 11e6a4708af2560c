//! Payment instrument models.
//!
//! A request carries one instrument: a [`Card`] or an [`Ach`] bank account.
//! Both are plain mutable field containers; nothing is checked until
//! [`Card::validate`] / [`Ach::validate`] runs while the request is built.
//! Billing and shipping contact blocks share the [`ContactAddress`] shape.

pub mod ach;
pub mod card;

pub use ach::Ach;
pub use card::Card;

/// Payment instrument attached to a request.
#[derive(Debug, Clone)]
pub enum PaymentInstrument {
    /// Credit or debit card, raw PAN or stored token.
    Card(Card),
    /// Bank account (ACH / telecheck).
    BankAccount(Ach),
}

impl From<Card> for PaymentInstrument {
    fn from(card: Card) -> Self {
        Self::Card(card)
    }
}

impl From<Ach> for PaymentInstrument {
    fn from(ach: Ach) -> Self {
        Self::BankAccount(ach)
    }
}

/// Check type for an ACH payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckType {
    /// Personal account.
    Personal,
    /// Corporate account.
    Corporate,
}

impl CheckType {
    /// Single-letter wire code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Personal => "P",
            Self::Corporate => "C",
        }
    }
}

/// Contact block used for both billing and shipping sides of an instrument.
///
/// Every field is optional; unset fields serialize as JSON `null` when the
/// wire format keys them unconditionally.
#[derive(Debug, Clone, Default)]
pub struct ContactAddress {
    /// Salutation (Mr, Ms, Dr, ...).
    pub title: Option<String>,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Company name.
    pub company: Option<String>,
    /// Street address, line 1.
    pub address1: Option<String>,
    /// Street address, line 2.
    pub address2: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Postal or ZIP code.
    pub postcode: Option<String>,
    /// State or province.
    pub state: Option<String>,
    /// Country code (ISO 3166-1 alpha-2).
    pub country: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Phone extension.
    pub phone_extension: Option<String>,
    /// Fax number.
    pub fax: Option<String>,
}

impl ContactAddress {
    /// Sets first and last name from a single full name.
    ///
    /// The name splits on the first space: first word becomes the first name,
    /// the remainder the last name. A single word leaves the last name unset.
    pub fn set_name(&mut self, full_name: &str) {
        let (first, last) = split_name(full_name);
        self.first_name = Some(first);
        self.last_name = last;
    }

    /// Full name rebuilt from the first and last parts, trimmed.
    #[must_use]
    pub fn name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or("");
        let last = self.last_name.as_deref().unwrap_or("");
        format!("{first} {last}").trim().to_owned()
    }
}

/// Splits a full name at the first space. The remainder keeps any internal
/// spacing untouched.
pub(crate) fn split_name(full_name: &str) -> (String, Option<String>) {
    match full_name.split_once(' ') {
        Some((first, last)) => (first.to_owned(), Some(last.to_owned())),
        None => (full_name.to_owned(), None),
    }
}
