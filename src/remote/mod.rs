//! Reqwest-backed client for the content API.
//!
//! Owns transport details only: URL building, timeouts, status mapping, and JSON decoding
//! into domain products.

pub mod dto;
pub mod register;

use reqwest::{Client, header::ACCEPT};

use crate::{
    config::{HttpTimeouts, StorefrontConfig},
    product::Product,
};

use self::{
    dto::{ErrorEnvelopeDto, ProductEnvelopeDto, RegisterResponseDto},
    register::{GENERIC_REGISTER_FAILURE, RegisterError, RegistrationForm, Session},
};

/// Any failure of the catalogue fetch. All variants surface as "catalogue unavailable".
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("catalogue unavailable: request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("catalogue unavailable: status {status}")]
    Status { status: u16 },
    #[error("catalogue unavailable: invalid payload: {0}")]
    Decode(#[from] serde_json::Error),
}

pub struct ContentApiClient {
    http: Client,
    base_url: String,
}

impl ContentApiClient {
    /// Builds a client rooted at `base_url` (for example `http://localhost:1337/api`).
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: impl Into<String>, timeouts: HttpTimeouts) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(timeouts.request())
            .connect_timeout(timeouts.connect())
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &StorefrontConfig) -> Result<Self, reqwest::Error> {
        Self::new(config.api_base_url.clone(), config.timeouts)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn products_url(&self) -> String {
        format!("{}/Products/?populate=*", self.base_url)
    }

    pub fn register_url(&self) -> String {
        format!("{}/auth/local/register", self.base_url)
    }

    /// Fetches the full product list. No retry is attempted.
    pub async fn fetch_catalogue(&self) -> Result<Vec<Product>, FetchError> {
        let url = self.products_url();
        tracing::debug!(%url, "fetching catalogue");

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "catalogue fetch rejected");
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let envelope: ProductEnvelopeDto = serde_json::from_slice(&body)?;
        Ok(envelope.into_domain_products())
    }

    /// Validates `form` locally, then submits it.
    ///
    /// Success requires a `jwt` in the response body.
    pub async fn register(&self, form: &RegistrationForm) -> Result<Session, RegisterError> {
        let request = form.validate()?;
        let response = self
            .http
            .post(self.register_url())
            .header(ACCEPT, "application/json")
            .json(&request)
            .send()
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "registration request failed"))?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorEnvelopeDto>(&body)
                .ok()
                .and_then(ErrorEnvelopeDto::message)
                .unwrap_or_else(|| GENERIC_REGISTER_FAILURE.to_string());
            tracing::info!(status = status.as_u16(), %message, "registration rejected");
            return Err(RegisterError::Rejected { message });
        }

        let decoded: RegisterResponseDto = serde_json::from_slice(&body).unwrap_or_default();
        let jwt = decoded.jwt.ok_or(RegisterError::MissingSession)?;
        let (user_id, username) = match decoded.user {
            Some(user) => (Some(user.id), user.username),
            None => (None, None),
        };
        Ok(Session {
            jwt,
            user_id,
            username,
        })
    }
}
