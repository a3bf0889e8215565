//! Session tracking over the identity provider.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};
use vitrine::validate::{email_shape_ok, otp_code_ok, password_strong_enough, phone_e164_ok};

use crate::{
    identity::{
        AuthProvider, IdentityError, IdentityProvider, Password, Session, UserProfile,
        VerificationTicket,
    },
    storage::{KeyValueStore, REMEMBERED_EMAIL_KEY},
};

/// Owns the authenticated session for a storefront run.
///
/// Input shapes are validated before any request leaves the client. Every
/// successful sign-in or sign-out publishes the new `Option<Session>` to
/// watchers.
pub struct SessionManager {
    identity: Arc<dyn IdentityProvider>,
    storage: Arc<dyn KeyValueStore>,
    sessions: watch::Sender<Option<Session>>,
}

impl SessionManager {
    /// Build a manager with nobody signed in.
    #[must_use]
    pub fn new(identity: Arc<dyn IdentityProvider>, storage: Arc<dyn KeyValueStore>) -> Self {
        let (sessions, _watcher) = watch::channel(None);

        Self {
            identity,
            storage,
            sessions,
        }
    }

    /// Watch session changes. The receiver sees the current value
    /// immediately and every change after it.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.sessions.subscribe()
    }

    /// The session currently signed in, if any.
    #[must_use]
    pub fn current_session(&self) -> Option<Session> {
        self.sessions.borrow().clone()
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` before any network call when the email shape or an
    /// empty password is rejected, or the provider's error otherwise.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: Password,
    ) -> Result<Session, IdentityError> {
        let email = email.trim();

        if !email_shape_ok(email) {
            return Err(IdentityError::Invalid(
                "enter a valid email address".to_owned(),
            ));
        }

        if password.as_str().is_empty() {
            return Err(IdentityError::Invalid("enter your password".to_owned()));
        }

        let session = self
            .identity
            .sign_in_with_password(email.to_owned(), password)
            .await?;

        self.remember_email(email);
        self.publish(Some(session.clone()));

        Ok(session)
    }

    /// Create an account and sign in.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` before any network call when the email shape or
    /// password strength is rejected, or the provider's error otherwise.
    pub async fn sign_up_with_password(
        &self,
        email: &str,
        password: Password,
        profile: UserProfile,
    ) -> Result<Session, IdentityError> {
        let email = email.trim();

        if !email_shape_ok(email) {
            return Err(IdentityError::Invalid(
                "enter a valid email address".to_owned(),
            ));
        }

        if !password_strong_enough(password.as_str()) {
            return Err(IdentityError::Invalid(
                "password must be at least 8 characters".to_owned(),
            ));
        }

        let session = self
            .identity
            .sign_up_with_password(email.to_owned(), password, profile)
            .await?;

        self.remember_email(email);
        self.publish(Some(session.clone()));

        Ok(session)
    }

    /// Complete a hosted OAuth sign-in.
    ///
    /// # Errors
    ///
    /// Returns the provider's error when the flow does not finish.
    pub async fn sign_in_with_provider(
        &self,
        provider: AuthProvider,
    ) -> Result<Session, IdentityError> {
        let session = self.identity.sign_in_with_provider(provider).await?;

        if let Some(email) = &session.email {
            self.remember_email(email);
        }

        self.publish(Some(session.clone()));

        Ok(session)
    }

    /// Send a one-time code to a phone number.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` before any network call when the number is not in
    /// international format, or the provider's error otherwise.
    pub async fn send_phone_verification(
        &self,
        phone: &str,
    ) -> Result<VerificationTicket, IdentityError> {
        let phone = phone.trim();

        if !phone_e164_ok(phone) {
            return Err(IdentityError::Invalid(
                "enter the phone number in international format, e.g. +15551234567".to_owned(),
            ));
        }

        self.identity.send_phone_verification(phone.to_owned()).await
    }

    /// Exchange a ticket and code for a session.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` before any network call when the code shape is
    /// rejected, or the provider's error otherwise.
    pub async fn confirm_phone_verification(
        &self,
        ticket: VerificationTicket,
        code: &str,
    ) -> Result<Session, IdentityError> {
        let code = code.trim();

        if !otp_code_ok(code) {
            return Err(IdentityError::Invalid(
                "the verification code is 4 to 8 digits".to_owned(),
            ));
        }

        let session = self
            .identity
            .confirm_phone_verification(ticket, code.to_owned())
            .await?;

        self.publish(Some(session.clone()));

        Ok(session)
    }

    /// Sign out. The session is only dropped after the provider confirms.
    ///
    /// # Errors
    ///
    /// Returns the provider's error; watchers keep the old session when
    /// sign-out fails.
    pub async fn sign_out(&self) -> Result<(), IdentityError> {
        self.identity.sign_out().await?;

        info!("signed out");
        self.publish(None);

        Ok(())
    }

    /// The last email that signed in on this device, if storage has one.
    #[must_use]
    pub fn remembered_email(&self) -> Option<String> {
        match self.storage.get(REMEMBERED_EMAIL_KEY) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "failed to read remembered email");
                None
            }
        }
    }

    fn remember_email(&self, email: &str) {
        if let Err(err) = self.storage.set(REMEMBERED_EMAIL_KEY, email) {
            warn!(error = %err, "failed to remember email");
        }
    }

    fn publish(&self, session: Option<Session>) {
        self.sessions.send_replace(session);
    }
}
