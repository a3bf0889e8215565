//! Contact detail validation
//!
//! Shape checks shared by the checkout forms and the sign-in flows. These
//! run before any collaborator call, so malformed input never leaves the
//! client.

/// Checks that an email address has a plausible `local@domain.tld` shape.
#[must_use]
pub fn email_shape_ok(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = email.split('@');

    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        _ => false,
    }
}

/// Checks that a phone number is in E.164 form: `+` followed by 8 to 15
/// digits.
#[must_use]
pub fn phone_e164_ok(phone: &str) -> bool {
    let Some(digits) = phone.strip_prefix('+') else {
        return false;
    };

    (8..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

/// Checks that a password meets the minimum length requirement.
#[must_use]
pub fn password_strong_enough(password: &str) -> bool {
    password.chars().count() >= 8
}

/// Checks that a one-time verification code is 4 to 8 digits.
#[must_use]
pub fn otp_code_ok(code: &str) -> bool {
    (4..=8).contains(&code.len()) && code.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_email() {
        assert!(email_shape_ok("ada@example.com"));
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!email_shape_ok("ada"));
        assert!(!email_shape_ok("ada@"));
        assert!(!email_shape_ok("@example.com"));
        assert!(!email_shape_ok("ada@example"));
        assert!(!email_shape_ok("ada@exam ple.com"));
        assert!(!email_shape_ok("ada@b@example.com"));
    }

    #[test]
    fn accepts_e164_phone() {
        assert!(phone_e164_ok("+447911123456"));
    }

    #[test]
    fn rejects_malformed_phones() {
        assert!(!phone_e164_ok("07911123456"));
        assert!(!phone_e164_ok("+44 7911"));
        assert!(!phone_e164_ok("+1234"));
    }

    #[test]
    fn password_length_boundary() {
        assert!(password_strong_enough("12345678"));
        assert!(!password_strong_enough("1234567"));
    }

    #[test]
    fn otp_code_shapes() {
        assert!(otp_code_ok("123456"));
        assert!(!otp_code_ok("123"));
        assert!(!otp_code_ok("12a456"));
    }
}
