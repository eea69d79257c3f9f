//! `RocksDB` storage layer for the bistro backend.
//!
//! This crate provides persistent storage for users, menu items, reviews,
//! cart items, and payment records using `RocksDB` with column families for
//! efficient indexing.
//!
//! # Architecture
//!
//! The storage uses one column family per collection (`users`, `menu`,
//! `reviews`, `carts`, `payments`) plus owner/email index families. Values
//! are CBOR-encoded; compound writes (record + index) go through a single
//! `WriteBatch` so a record is never visible without its index entry.
//!
//! # Example
//!
//! ```no_run
//! use bistro_store::{RocksStore, Store};
//! use bistro_core::User;
//!
//! let store = RocksStore::open("/tmp/bistro-db").unwrap();
//!
//! let user = User::new("alice@example.com", None);
//! let inserted = store.create_user_if_absent(&user).unwrap();
//! assert!(inserted.is_some());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use rocks::RocksStore;

use bistro_core::{
    CartItem, CartItemId, MenuItem, MenuItemId, PaymentId, PaymentRecord, Review, Role, User,
    UserId,
};

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing handlers to run against
/// any implementation (`RocksDB` in production, a temp-dir store in tests).
pub trait Store: Send + Sync {
    // =========================================================================
    // User Operations
    // =========================================================================

    /// Insert a user unless one with the same email already exists.
    ///
    /// Returns the new user's ID, or `None` when the email is already
    /// registered (the existing record is left untouched).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn create_user_if_absent(&self, user: &User) -> Result<Option<UserId>>;

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_user(&self, user_id: &UserId) -> Result<Option<User>>;

    /// Get a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// List all users.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_users(&self) -> Result<Vec<User>>;

    /// Set a user's role.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the user doesn't exist.
    fn set_user_role(&self, user_id: &UserId, role: Role) -> Result<()>;

    /// Delete a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the user doesn't exist.
    fn delete_user(&self, user_id: &UserId) -> Result<()>;

    // =========================================================================
    // Menu Operations
    // =========================================================================

    /// Insert or update a menu item.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_menu_item(&self, item: &MenuItem) -> Result<()>;

    /// Get a menu item by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_menu_item(&self, id: &MenuItemId) -> Result<Option<MenuItem>>;

    /// List all menu items.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_menu(&self) -> Result<Vec<MenuItem>>;

    /// Delete a menu item by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the item doesn't exist.
    fn delete_menu_item(&self, id: &MenuItemId) -> Result<()>;

    // =========================================================================
    // Review Operations
    // =========================================================================

    /// Insert a review.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_review(&self, review: &Review) -> Result<()>;

    /// List all reviews.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_reviews(&self) -> Result<Vec<Review>>;

    // =========================================================================
    // Cart Operations
    // =========================================================================

    /// Insert a cart item.
    ///
    /// This also maintains the owner index.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_cart_item(&self, item: &CartItem) -> Result<()>;

    /// List all cart items owned by one user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_cart_items_by_owner(&self, email: &str) -> Result<Vec<CartItem>>;

    /// Delete a single cart item by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the item doesn't exist.
    fn delete_cart_item(&self, id: &CartItemId) -> Result<()>;

    /// Bulk-delete cart items by ID.
    ///
    /// Returns the number of rows that actually existed and were removed.
    /// Ids that match nothing are skipped silently — the count may be less
    /// than `ids.len()`, and that is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn delete_cart_items(&self, ids: &[CartItemId]) -> Result<usize>;

    // =========================================================================
    // Payment Operations
    // =========================================================================

    /// Insert a payment record.
    ///
    /// This also maintains the owner index. Payment records are immutable;
    /// there is no update or delete operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_payment(&self, payment: &PaymentRecord) -> Result<()>;

    /// Get a payment record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_payment(&self, id: &PaymentId) -> Result<Option<PaymentRecord>>;

    /// List payments for one user, ordered by time (newest first).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_payments_by_owner(&self, email: &str) -> Result<Vec<PaymentRecord>>;

    /// Sum the `price` field across all payment records.
    ///
    /// The aggregation runs inside the store by streaming the payments
    /// column family; callers never pull every record to sum client-side.
    /// Returns `0.0` when there are no payments.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn sum_payment_prices(&self) -> Result<f64>;

    // =========================================================================
    // Count Operations
    // =========================================================================

    /// Approximate number of user records.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn estimated_user_count(&self) -> Result<u64>;

    /// Approximate number of menu items.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn estimated_menu_count(&self) -> Result<u64>;

    /// Approximate number of payment records.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn estimated_payment_count(&self) -> Result<u64>;
}
