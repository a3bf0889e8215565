//! Identity data models.

use std::fmt;

use serde::Deserialize;
use zeroize::Zeroize;

/// A plaintext password in transit to the identity backend.
///
/// Never printed; the buffer is wiped on drop.
pub struct Password {
    value: String,
}

impl Password {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")?;
        Ok(())
    }
}

impl Drop for Password {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

/// Hosted OAuth providers the backend can broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthProvider {
    Google,
}

impl AuthProvider {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
        }
    }
}

/// Profile details captured at sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Display name for the account.
    pub full_name: String,

    /// Optional contact phone in E.164 form.
    pub phone: Option<String>,
}

/// An authenticated session as reported by the identity backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Session {
    /// Backend-assigned user id.
    pub user_id: String,

    /// Account email; absent for phone-only accounts.
    #[serde(default)]
    pub email: Option<String>,

    /// Display name, when the account has one.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Opaque handle for an in-progress phone verification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerificationTicket {
    /// Backend-assigned verification id.
    pub id: String,
}
