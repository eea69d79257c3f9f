//! Application state.

use std::sync::Arc;

use bistro_store::Store;

use crate::config::ServiceConfig;
use crate::stripe::StripeClient;

/// Application state shared across handlers.
///
/// The store and charge-provider client are created once at startup and
/// injected here; handlers never construct their own connections.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend.
    pub store: Arc<dyn Store>,

    /// Service configuration.
    pub config: ServiceConfig,

    /// Stripe client for charge intents (optional).
    pub stripe: Option<Arc<StripeClient>>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, config: ServiceConfig) -> Self {
        // Create the Stripe client if configured
        let stripe = config.stripe_api_key.as_ref().map(|key| {
            let client = match &config.stripe_api_base {
                Some(base) => StripeClient::with_base_url(key, base),
                None => StripeClient::new(key),
            };
            tracing::info!("Stripe integration enabled");
            Arc::new(client)
        });

        if stripe.is_none() {
            tracing::warn!("Stripe not configured - payment intents will not be available");
        }

        Self {
            store,
            config,
            stripe,
        }
    }

    /// Check if Stripe is configured.
    #[must_use]
    pub fn has_stripe(&self) -> bool {
        self.stripe.is_some()
    }
}
