//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// User records, keyed by `user_id`.
    pub const USERS: &str = "users";

    /// Index: email → `user_id`. Enforces the one-user-per-email rule.
    pub const USERS_BY_EMAIL: &str = "users_by_email";

    /// Menu items, keyed by `menu_item_id`.
    pub const MENU: &str = "menu";

    /// Reviews, keyed by `review_id`.
    pub const REVIEWS: &str = "reviews";

    /// Cart items, keyed by `cart_item_id`.
    pub const CARTS: &str = "carts";

    /// Index: cart items by owner, keyed by `email || NUL || cart_item_id`.
    /// Value is empty (index only).
    pub const CARTS_BY_OWNER: &str = "carts_by_owner";

    /// Payment records, keyed by `payment_id` (ULID).
    pub const PAYMENTS: &str = "payments";

    /// Index: payments by owner, keyed by `email || NUL || payment_id`.
    /// ULID suffixes keep each owner's payments time-ordered.
    pub const PAYMENTS_BY_OWNER: &str = "payments_by_owner";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![
        cf::USERS,
        cf::USERS_BY_EMAIL,
        cf::MENU,
        cf::REVIEWS,
        cf::CARTS,
        cf::CARTS_BY_OWNER,
        cf::PAYMENTS,
        cf::PAYMENTS_BY_OWNER,
    ]
}
