//! Stripe integration for charge intents.
//!
//! Stripe is the charge provider: given an amount, it mints a payment
//! intent whose client secret lets the customer complete payment in the
//! browser. The service never sees card data and keeps no state about an
//! intent after responding.

pub mod client;
pub mod types;

pub use client::{StripeClient, StripeError};
pub use types::PaymentIntent;
