//! Payment record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CartItemId, PaymentId};

/// The only currency the service charges in.
pub const CURRENCY: &str = "usd";

/// Durable proof of a completed payment.
///
/// A payment record is created exactly once per completed payment
/// submission and is immutable thereafter — no update or delete operation
/// exists for it. Its `cart_ids` list is the join key used to clear the
/// paid-for cart lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Unique payment ID (ULID, time-ordered).
    pub id: PaymentId,

    /// Payer email.
    pub email: String,

    /// Amount paid, in dollars.
    pub price: f64,

    /// Currency the charge was made in.
    pub currency: String,

    /// Cart items this payment covers.
    pub cart_ids: Vec<CartItemId>,

    /// The charge provider's reference for the completed payment.
    pub charge_ref: String,

    /// When the payment was recorded.
    pub created_at: DateTime<Utc>,
}

impl PaymentRecord {
    /// Create a new payment record.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        price: f64,
        charge_ref: impl Into<String>,
        cart_ids: Vec<CartItemId>,
    ) -> Self {
        Self {
            id: PaymentId::generate(),
            email: email.into(),
            price,
            currency: CURRENCY.to_string(),
            cart_ids,
            charge_ref: charge_ref.into(),
            created_at: Utc::now(),
        }
    }
}
