//! Checkout forms
//!
//! Typed shipping and payment capture with per-field validation. Validation
//! is purely local and runs before any collaborator call; failures name the
//! offending fields and mutate nothing.

use smallvec::SmallVec;

use crate::validate::{email_shape_ok, phone_e164_ok};

/// A single field validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Form field the failure is about
    pub field: &'static str,

    /// User-readable message
    pub message: String,
}

/// Ordered collection of field validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: SmallVec<[FieldError; 4]>,
}

impl FieldErrors {
    /// Records a failure for the given field.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Checks whether any failure was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of recorded failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over the failures in field order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Converts the collection into a `Result`, erring when any failure was
    /// recorded.
    ///
    /// # Errors
    ///
    /// Returns `self` if at least one failure was recorded.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;

        for error in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }

        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Shipping contact and address capture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingForm {
    /// Recipient full name
    pub full_name: String,

    /// Contact email
    pub email: String,

    /// Optional contact phone in E.164 form
    pub phone: Option<String>,

    /// Street address line
    pub address_line: String,

    /// City or town
    pub city: String,

    /// Postal or ZIP code
    pub postal_code: String,

    /// Country name or code
    pub country: String,
}

impl ShippingForm {
    /// Validates every field, collecting all failures rather than stopping
    /// at the first.
    ///
    /// # Errors
    ///
    /// Returns the complete set of field failures, in field order.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        if self.full_name.trim().is_empty() {
            errors.push("full_name", "enter the recipient's name");
        }

        if !email_shape_ok(self.email.trim()) {
            errors.push("email", "enter a valid email address");
        }

        if let Some(phone) = &self.phone
            && !phone_e164_ok(phone.trim())
        {
            errors.push("phone", "enter the phone in international format, e.g. +15551234567");
        }

        if self.address_line.trim().is_empty() {
            errors.push("address_line", "enter the street address");
        }

        if self.city.trim().is_empty() {
            errors.push("city", "enter the city");
        }

        if self.postal_code.trim().is_empty() {
            errors.push("postal_code", "enter the postal code");
        }

        if self.country.trim().is_empty() {
            errors.push("country", "enter the country");
        }

        errors.into_result()
    }
}

/// Payment capture: card details or cash on delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentForm {
    /// Pay by card
    Card(CardDetails),

    /// Pay the courier on delivery
    CashOnDelivery,
}

impl PaymentForm {
    /// Validates the captured payment details.
    ///
    /// Card expiry is checked against the supplied cutoff month; a card is
    /// valid through the end of its expiry month.
    ///
    /// # Errors
    ///
    /// Returns the complete set of field failures, in field order.
    pub fn validate(&self, cutoff: ExpiryCutoff) -> Result<(), FieldErrors> {
        match self {
            PaymentForm::CashOnDelivery => Ok(()),
            PaymentForm::Card(card) => card.validate(cutoff),
        }
    }
}

/// Card details as entered by the shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDetails {
    /// Primary account number; digits, spaces and dashes
    pub number: String,

    /// Name on the card
    pub holder: String,

    /// Expiry month, 1 to 12
    pub expiry_month: u8,

    /// Expiry year, four digits
    pub expiry_year: u16,

    /// Card verification code
    pub cvc: String,
}

/// The month card validity is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryCutoff {
    /// Four-digit year
    pub year: u16,

    /// Month, 1 to 12
    pub month: u8,
}

impl CardDetails {
    fn validate(&self, cutoff: ExpiryCutoff) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        let digits: String = self.number.chars().filter(char::is_ascii_digit).collect();
        let well_formed = self
            .number
            .chars()
            .all(|c| c.is_ascii_digit() || c == ' ' || c == '-');

        if !well_formed || !(12..=19).contains(&digits.len()) {
            errors.push("card_number", "enter a valid card number");
        } else if !luhn_ok(&digits) {
            errors.push("card_number", "the card number failed its checksum");
        }

        if self.holder.trim().is_empty() {
            errors.push("card_holder", "enter the name on the card");
        }

        if !(1..=12).contains(&self.expiry_month) {
            errors.push("expiry", "enter a month between 1 and 12");
        } else if (self.expiry_year, self.expiry_month) < (cutoff.year, cutoff.month) {
            errors.push("expiry", "the card has expired");
        }

        if !(3..=4).contains(&self.cvc.len()) || !self.cvc.chars().all(|c| c.is_ascii_digit()) {
            errors.push("cvc", "enter the 3 or 4 digit security code");
        }

        errors.into_result()
    }
}

/// Luhn checksum over an all-digit card number.
fn luhn_ok(digits: &str) -> bool {
    let sum = digits
        .chars()
        .rev()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .fold(0_u32, |sum, (position, digit)| {
            let doubled = if position % 2 == 1 { digit * 2 } else { digit };

            sum + if doubled > 9 { doubled - 9 } else { doubled }
        });

    sum % 10 == 0
}
