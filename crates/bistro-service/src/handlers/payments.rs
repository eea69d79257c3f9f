//! Payment handlers: charge intent creation, payment recording, and
//! payment history.
//!
//! Recording a payment is the one place where partial failure matters.
//! The payment record is inserted before any cart cleanup is attempted,
//! and a cleanup failure never unwinds the insert: a confirmed payment is
//! kept even if stale cart rows survive. The cleanup outcome is reported
//! to the caller either way.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use bistro_core::{CartItemId, PaymentRecord};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Charge intent request.
///
/// `price` stays a raw JSON value so that an absent or non-numeric price
/// is reported as an invalid amount rather than a body-shape error.
#[derive(Debug, Deserialize)]
pub struct CreateIntentRequest {
    /// Amount in dollars.
    #[serde(default)]
    pub price: Option<serde_json::Value>,
}

/// Charge intent response.
#[derive(Debug, Serialize)]
pub struct CreateIntentResponse {
    /// Client secret the customer uses to complete payment externally.
    pub client_secret: String,
}

/// Create a charge intent for the given amount.
pub async fn create_payment_intent(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateIntentRequest>,
) -> Result<Json<CreateIntentResponse>, ApiError> {
    // Validate before touching the provider: absent, non-numeric, and
    // non-positive prices are all invalid amounts.
    let price = body
        .price
        .as_ref()
        .and_then(serde_json::Value::as_f64)
        .filter(|p| p.is_finite() && *p > 0.0)
        .ok_or_else(|| ApiError::BadRequest("price must be a positive number".into()))?;

    let stripe = state
        .stripe
        .as_ref()
        .ok_or_else(|| ApiError::ExternalService("Stripe not configured".into()))?;

    // Minor units by truncation; callers must not rely on sub-cent precision.
    #[allow(clippy::cast_possible_truncation)]
    let amount_cents = (price * 100.0).trunc() as i64;

    let intent = stripe.create_payment_intent(amount_cents).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to create payment intent");
        ApiError::ExternalService(format!("Failed to create payment intent: {e}"))
    })?;

    let client_secret = intent
        .client_secret
        .ok_or_else(|| ApiError::ExternalService("Stripe returned no client secret".into()))?;

    tracing::info!(amount_cents = %amount_cents, "Payment intent created");

    // Only the client-usable secret leaves the service; the provider's
    // internal reference stays server-side.
    Ok(Json(CreateIntentResponse { client_secret }))
}

/// Completed payment submission.
#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    /// Payer email.
    pub email: String,
    /// Amount paid, in dollars.
    pub price: f64,
    /// The charge provider's reference for the completed payment.
    pub charge_ref: String,
    /// Cart items this payment covers.
    pub cart_ids: Vec<CartItemId>,
}

/// Payment recording response.
#[derive(Debug, Serialize)]
pub struct RecordPaymentResponse {
    /// ID of the recorded payment.
    pub inserted_id: String,
    /// How many cart rows were actually removed. May be fewer than
    /// submitted when some were already gone.
    pub deleted_count: usize,
}

/// Record a completed payment and clear the paid-for cart items.
pub async fn record_payment(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RecordPaymentRequest>,
) -> Result<Json<RecordPaymentResponse>, ApiError> {
    let payment = PaymentRecord::new(body.email, body.price, body.charge_ref, body.cart_ids);

    // The payment must be durable before the cart is touched.
    state.store.put_payment(&payment)?;

    // Cleanup failure is reported, not escalated: the recorded payment
    // stands regardless.
    let deleted_count = match state.store.delete_cart_items(&payment.cart_ids) {
        Ok(count) => count,
        Err(e) => {
            tracing::error!(
                payment_id = %payment.id,
                error = %e,
                "Cart cleanup failed after payment insert"
            );
            0
        }
    };

    tracing::info!(
        payment_id = %payment.id,
        email = %payment.email,
        price = %payment.price,
        deleted_count = %deleted_count,
        "Payment recorded"
    );

    Ok(Json(RecordPaymentResponse {
        inserted_id: payment.id.to_string(),
        deleted_count,
    }))
}

/// Payment history entry.
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    /// Payment ID.
    pub id: String,
    /// Amount paid, in dollars.
    pub price: f64,
    /// Currency.
    pub currency: String,
    /// Charge provider reference.
    pub charge_ref: String,
    /// Cart items the payment covered.
    pub cart_ids: Vec<String>,
    /// When the payment was recorded.
    pub created_at: String,
}

impl From<&PaymentRecord> for PaymentResponse {
    fn from(payment: &PaymentRecord) -> Self {
        Self {
            id: payment.id.to_string(),
            price: payment.price,
            currency: payment.currency.clone(),
            charge_ref: payment.charge_ref.clone(),
            cart_ids: payment.cart_ids.iter().map(ToString::to_string).collect(),
            created_at: payment.created_at.to_rfc3339(),
        }
    }
}

/// List a user's payment records, newest first.
///
/// Self-only: callers may list their own history and nobody else's.
pub async fn list_payments(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(email): Path<String>,
) -> Result<Json<Vec<PaymentResponse>>, ApiError> {
    auth.ensure_owns(&email)?;

    let payments = state.store.list_payments_by_owner(&email)?;
    Ok(Json(payments.iter().map(PaymentResponse::from).collect()))
}
