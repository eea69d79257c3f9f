//! Stripe API types.

use serde::Deserialize;

/// Stripe `PaymentIntent` object.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    /// Payment intent ID.
    pub id: String,
    /// Client secret used by the customer to complete payment.
    #[serde(default)]
    pub client_secret: Option<String>,
    /// Amount in cents.
    #[serde(default)]
    pub amount: i64,
    /// Currency (e.g., "usd").
    #[serde(default)]
    pub currency: String,
    /// Status (`requires_payment_method`, succeeded, etc.).
    #[serde(default)]
    pub status: String,
}

/// Stripe error response wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorResponse {
    /// The error payload.
    pub error: StripeApiError,
}

/// Stripe error payload.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeApiError {
    /// Error type (e.g., `invalid_request_error`).
    #[serde(rename = "type", default)]
    pub error_type: String,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Error code.
    #[serde(default)]
    pub code: Option<String>,
}
