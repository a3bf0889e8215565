//! Identity service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, Response, StatusCode};
use serde_json::json;

use crate::identity::{
    AuthProvider, IdentityError, Password, Session, UserProfile, VerificationTicket,
};

/// Configuration for the hosted identity endpoints.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Base URL of the storefront backend, e.g. `"http://localhost:4000"`.
    pub base_url: String,
}

/// HTTP client for the backend-as-a-service auth endpoints.
#[derive(Debug, Clone)]
pub struct HttpIdentityProvider {
    config: IdentityConfig,
    http: Client,
}

impl HttpIdentityProvider {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/auth/{endpoint}", self.config.base_url)
    }
}

async fn unexpected(operation: &str, response: Response) -> IdentityError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    IdentityError::UnexpectedResponse(format!(
        "{operation} failed with status {status}: {text}"
    ))
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    #[tracing::instrument(name = "identity.sign_in_with_password", skip(self, password), err)]
    async fn sign_in_with_password(
        &self,
        email: String,
        password: Password,
    ) -> Result<Session, IdentityError> {
        let body = json!({ "email": email, "password": password.as_str() });

        let response = self
            .http
            .post(self.url("sign_in"))
            .json(&body)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(IdentityError::InvalidCredentials);
        }

        if !response.status().is_success() {
            return Err(unexpected("sign in", response).await);
        }

        Ok(response.json().await?)
    }

    #[tracing::instrument(
        name = "identity.sign_up_with_password",
        skip(self, password, profile),
        err
    )]
    async fn sign_up_with_password(
        &self,
        email: String,
        password: Password,
        profile: UserProfile,
    ) -> Result<Session, IdentityError> {
        let body = json!({
            "email": email,
            "password": password.as_str(),
            "full_name": profile.full_name,
            "phone": profile.phone,
        });

        let response = self
            .http
            .post(self.url("sign_up"))
            .json(&body)
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            return Err(IdentityError::EmailTaken);
        }

        if !response.status().is_success() {
            return Err(unexpected("sign up", response).await);
        }

        Ok(response.json().await?)
    }

    #[tracing::instrument(name = "identity.sign_in_with_provider", skip(self), err)]
    async fn sign_in_with_provider(
        &self,
        provider: AuthProvider,
    ) -> Result<Session, IdentityError> {
        let response = self
            .http
            .post(self.url(&format!("oauth/{}", provider.as_str())))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(unexpected("provider sign in", response).await);
        }

        Ok(response.json().await?)
    }

    #[tracing::instrument(name = "identity.send_phone_verification", skip(self), err)]
    async fn send_phone_verification(
        &self,
        phone: String,
    ) -> Result<VerificationTicket, IdentityError> {
        let body = json!({ "phone": phone });

        let response = self
            .http
            .post(self.url("phone/send_code"))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(unexpected("phone verification", response).await);
        }

        Ok(response.json().await?)
    }

    #[tracing::instrument(name = "identity.confirm_phone_verification", skip(self, code), err)]
    async fn confirm_phone_verification(
        &self,
        ticket: VerificationTicket,
        code: String,
    ) -> Result<Session, IdentityError> {
        let body = json!({ "verification_id": ticket.id, "code": code });

        let response = self
            .http
            .post(self.url("phone/confirm"))
            .json(&body)
            .send()
            .await?;

        if matches!(
            response.status(),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY
        ) {
            return Err(IdentityError::CodeRejected);
        }

        if !response.status().is_success() {
            return Err(unexpected("code confirmation", response).await);
        }

        Ok(response.json().await?)
    }

    #[tracing::instrument(name = "identity.sign_out", skip(self), err)]
    async fn sign_out(&self) -> Result<(), IdentityError> {
        let response = self.http.post(self.url("sign_out")).send().await?;

        if !response.status().is_success() {
            return Err(unexpected("sign out", response).await);
        }

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Sign in with email and password.
    async fn sign_in_with_password(
        &self,
        email: String,
        password: Password,
    ) -> Result<Session, IdentityError>;

    /// Create an account and sign in.
    async fn sign_up_with_password(
        &self,
        email: String,
        password: Password,
        profile: UserProfile,
    ) -> Result<Session, IdentityError>;

    /// Complete a hosted OAuth flow with the given provider.
    async fn sign_in_with_provider(
        &self,
        provider: AuthProvider,
    ) -> Result<Session, IdentityError>;

    /// Send a one-time code to the given E.164 phone number.
    async fn send_phone_verification(
        &self,
        phone: String,
    ) -> Result<VerificationTicket, IdentityError>;

    /// Exchange a previously issued ticket and code for a session.
    async fn confirm_phone_verification(
        &self,
        ticket: VerificationTicket,
        code: String,
    ) -> Result<Session, IdentityError>;

    /// Terminate the current session.
    async fn sign_out(&self) -> Result<(), IdentityError>;
}
