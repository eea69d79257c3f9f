//! Menu item types.

use serde::{Deserialize, Serialize};

use crate::MenuItemId;

/// A dish on the menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    /// Unique menu item ID.
    pub id: MenuItemId,

    /// Dish name.
    pub name: String,

    /// Short description of the dish.
    pub recipe: String,

    /// Image URL.
    pub image: String,

    /// Category (e.g. "salad", "pizza", "dessert").
    pub category: String,

    /// Price in dollars.
    pub price: f64,
}

impl MenuItem {
    /// Create a new menu item.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        recipe: impl Into<String>,
        image: impl Into<String>,
        category: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: MenuItemId::generate(),
            name: name.into(),
            recipe: recipe.into(),
            image: image.into(),
            category: category.into(),
            price,
        }
    }
}
