//! Shopping cart types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CartItemId, MenuItemId};

/// A pending, unpurchased order line owned by one user.
///
/// Cart items snapshot the menu item's name, image, and price at the time
/// they are added, so a later menu edit does not change what the customer
/// sees at checkout. They are removed either individually or in bulk once
/// a payment referencing them is recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Unique cart item ID.
    pub id: CartItemId,

    /// Email of the owning user. Reads are always filtered by this field.
    pub email: String,

    /// The menu item this line refers to.
    pub menu_item_id: MenuItemId,

    /// Dish name snapshot.
    pub name: String,

    /// Image URL snapshot.
    pub image: String,

    /// Price snapshot in dollars.
    pub price: f64,

    /// When the item was added to the cart.
    pub created_at: DateTime<Utc>,
}

impl CartItem {
    /// Create a new cart item.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        menu_item_id: MenuItemId,
        name: impl Into<String>,
        image: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: CartItemId::generate(),
            email: email.into(),
            menu_item_id,
            name: name.into(),
            image: image.into(),
            price,
            created_at: Utc::now(),
        }
    }
}
