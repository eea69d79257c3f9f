//! Stripe API client implementation.

use reqwest::Client;
use std::time::Duration;

use super::types::{PaymentIntent, StripeErrorResponse};

/// The only payment method class offered to clients.
const PAYMENT_METHOD_TYPE: &str = "card";

/// Error type for Stripe operations.
#[derive(Debug, thiserror::Error)]
pub enum StripeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stripe API returned an error.
    #[error("Stripe API error: {error_type} - {message}")]
    Api {
        /// Error type.
        error_type: String,
        /// Error message.
        message: String,
        /// Error code.
        code: Option<String>,
    },
}

/// Stripe API client.
#[derive(Debug, Clone)]
pub struct StripeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl StripeClient {
    /// Stripe API base URL.
    const DEFAULT_BASE_URL: &'static str = "https://api.stripe.com/v1";

    /// Create a new Stripe client against the production API.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, Self::DEFAULT_BASE_URL)
    }

    /// Create a new Stripe client against a custom base URL.
    ///
    /// Tests use this to point the client at a local API double.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Create a payment intent.
    ///
    /// # Arguments
    ///
    /// * `amount_cents` - Amount to authorize, in minor units (cents)
    ///
    /// Currency and payment method class are fixed; only the amount varies
    /// per request.
    pub async fn create_payment_intent(
        &self,
        amount_cents: i64,
    ) -> Result<PaymentIntent, StripeError> {
        let params = [
            ("amount", amount_cents.to_string()),
            ("currency", bistro_core::CURRENCY.to_string()),
            ("payment_method_types[]", PAYMENT_METHOD_TYPE.to_string()),
        ];

        tracing::debug!(amount_cents = %amount_cents, "Creating Stripe payment intent");

        let response = self
            .client
            .post(format!("{}/payment_intents", self.base_url))
            .basic_auth(&self.api_key, Option::<&str>::None)
            .form(&params)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, StripeError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Try to parse error response
        let error_body: Result<StripeErrorResponse, _> = response.json().await;

        match error_body {
            Ok(stripe_error) => Err(StripeError::Api {
                error_type: stripe_error.error.error_type,
                message: stripe_error.error.message,
                code: stripe_error.error.code,
            }),
            Err(_) => Err(StripeError::Api {
                error_type: "unknown".to_string(),
                message: format!("HTTP {status}"),
                code: None,
            }),
        }
    }
}
