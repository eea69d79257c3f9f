//! Key encoding utilities for `RocksDB`.
//!
//! This module provides functions for encoding and decoding keys used in
//! column families. Owner indexes use `email || NUL || id` compound keys;
//! the NUL byte terminates the email so one owner's prefix can never extend
//! into another's ("a@x" vs "a@xy").

use bistro_core::{CartItemId, MenuItemId, PaymentId, ReviewId, UserId};

/// Separator between the owner email and the record id in index keys.
const OWNER_SEP: u8 = 0;

/// Create a user key from a user ID.
#[must_use]
pub fn user_key(user_id: &UserId) -> Vec<u8> {
    user_id.as_bytes().to_vec()
}

/// Create an email index key.
#[must_use]
pub fn email_key(email: &str) -> Vec<u8> {
    email.as_bytes().to_vec()
}

/// Create a menu item key from its ID.
#[must_use]
pub fn menu_item_key(id: &MenuItemId) -> Vec<u8> {
    id.as_bytes().to_vec()
}

/// Create a review key from its ID.
#[must_use]
pub fn review_key(id: &ReviewId) -> Vec<u8> {
    id.as_bytes().to_vec()
}

/// Create a cart item key from its ID.
#[must_use]
pub fn cart_item_key(id: &CartItemId) -> Vec<u8> {
    id.as_bytes().to_vec()
}

/// Create an owner-cart index key.
///
/// Format: `email || NUL || cart_item_id (16 bytes)`
#[must_use]
pub fn owner_cart_key(email: &str, id: &CartItemId) -> Vec<u8> {
    let mut key = Vec::with_capacity(email.len() + 1 + 16);
    key.extend_from_slice(email.as_bytes());
    key.push(OWNER_SEP);
    key.extend_from_slice(id.as_bytes());
    key
}

/// Create a prefix for iterating all records owned by one user in an
/// owner index column family.
#[must_use]
pub fn owner_prefix(email: &str) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(email.len() + 1);
    prefix.extend_from_slice(email.as_bytes());
    prefix.push(OWNER_SEP);
    prefix
}

/// Extract the cart item ID from an owner-cart index key.
///
/// # Panics
///
/// Panics if the key does not end in a 16-byte id.
#[must_use]
pub fn extract_cart_item_id_from_owner_key(key: &[u8]) -> CartItemId {
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&key[key.len() - 16..]);
    CartItemId::from_uuid(uuid::Uuid::from_bytes(bytes))
}

/// Create a payment key from its ID.
#[must_use]
pub fn payment_key(id: &PaymentId) -> Vec<u8> {
    id.to_bytes().to_vec()
}

/// Create an owner-payment index key.
///
/// Format: `email || NUL || payment_id (16 bytes)`
///
/// Since payment ids are ULIDs, one owner's payments sort by time.
#[must_use]
pub fn owner_payment_key(email: &str, id: &PaymentId) -> Vec<u8> {
    let mut key = Vec::with_capacity(email.len() + 1 + 16);
    key.extend_from_slice(email.as_bytes());
    key.push(OWNER_SEP);
    key.extend_from_slice(&id.to_bytes());
    key
}

/// Extract the payment ID from an owner-payment index key.
///
/// # Panics
///
/// Panics if the key does not end in 16 valid ULID bytes.
#[must_use]
pub fn extract_payment_id_from_owner_key(key: &[u8]) -> PaymentId {
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&key[key.len() - 16..]);
    PaymentId::from_bytes(bytes).expect("valid ULID bytes")
}
