//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.

use std::path::Path;
use std::sync::Arc;

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, Direction, IteratorMode, Options,
    WriteBatch,
};

use bistro_core::{
    CartItem, CartItemId, MenuItem, MenuItemId, PaymentId, PaymentRecord, Review, Role, User,
    UserId,
};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::Store;

/// `RocksDB` property used for approximate per-collection counts.
///
/// The estimate can lag recent writes and compactions; it trades exactness
/// for O(1) cost, which is what the stats endpoint wants.
const ESTIMATE_NUM_KEYS: &str = "rocksdb.estimate-num-keys";

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<rocksdb::MultiThreaded>>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(
            column_families = all_column_families().len(),
            "RocksDB store opened"
        );

        Ok(Self { db: Arc::new(db) })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Deserialize every value in a column family.
    fn scan_all<T: serde::de::DeserializeOwned>(&self, cf_name: &str) -> Result<Vec<T>> {
        let cf = self.cf(cf_name)?;
        let mut records = Vec::new();

        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            records.push(Self::deserialize(&value)?);
        }

        Ok(records)
    }

    /// Approximate key count for a column family.
    fn estimated_count(&self, cf_name: &str) -> Result<u64> {
        let cf = self.cf(cf_name)?;

        let estimate = self
            .db
            .property_int_value_cf(&cf, ESTIMATE_NUM_KEYS)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(estimate.unwrap_or(0))
    }
}

impl Store for RocksStore {
    // =========================================================================
    // User Operations
    // =========================================================================

    fn create_user_if_absent(&self, user: &User) -> Result<Option<UserId>> {
        // Insert only if no user claims this email yet.
        if self.get_user_by_email(&user.email)?.is_some() {
            return Ok(None);
        }

        let cf_users = self.cf(cf::USERS)?;
        let cf_by_email = self.cf(cf::USERS_BY_EMAIL)?;

        let user_key = keys::user_key(&user.id);
        let email_key = keys::email_key(&user.email);
        let value = Self::serialize(user)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_users, &user_key, &value);
        batch.put_cf(&cf_by_email, &email_key, user.id.as_bytes());

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Some(user.id))
    }

    fn get_user(&self, user_id: &UserId) -> Result<Option<User>> {
        let cf = self.cf(cf::USERS)?;
        let key = keys::user_key(user_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let cf = self.cf(cf::USERS_BY_EMAIL)?;
        let key = keys::email_key(email);

        let Some(id_bytes) = self
            .db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
        else {
            return Ok(None);
        };

        let mut bytes = [0u8; 16];
        if id_bytes.len() != 16 {
            return Err(StoreError::Database("corrupt email index entry".into()));
        }
        bytes.copy_from_slice(&id_bytes);

        self.get_user(&UserId::from_uuid(uuid::Uuid::from_bytes(bytes)))
    }

    fn list_users(&self) -> Result<Vec<User>> {
        self.scan_all(cf::USERS)
    }

    fn set_user_role(&self, user_id: &UserId, role: Role) -> Result<()> {
        let cf = self.cf(cf::USERS)?;

        let mut user = self.get_user(user_id)?.ok_or(StoreError::NotFound)?;
        user.role = role;

        let key = keys::user_key(user_id);
        let value = Self::serialize(&user)?;

        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn delete_user(&self, user_id: &UserId) -> Result<()> {
        let user = self.get_user(user_id)?.ok_or(StoreError::NotFound)?;

        let cf_users = self.cf(cf::USERS)?;
        let cf_by_email = self.cf(cf::USERS_BY_EMAIL)?;

        let mut batch = WriteBatch::default();
        batch.delete_cf(&cf_users, keys::user_key(user_id));
        batch.delete_cf(&cf_by_email, keys::email_key(&user.email));

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    // =========================================================================
    // Menu Operations
    // =========================================================================

    fn put_menu_item(&self, item: &MenuItem) -> Result<()> {
        let cf = self.cf(cf::MENU)?;
        let key = keys::menu_item_key(&item.id);
        let value = Self::serialize(item)?;

        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn get_menu_item(&self, id: &MenuItemId) -> Result<Option<MenuItem>> {
        let cf = self.cf(cf::MENU)?;
        let key = keys::menu_item_key(id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn list_menu(&self) -> Result<Vec<MenuItem>> {
        self.scan_all(cf::MENU)
    }

    fn delete_menu_item(&self, id: &MenuItemId) -> Result<()> {
        if self.get_menu_item(id)?.is_none() {
            return Err(StoreError::NotFound);
        }

        let cf = self.cf(cf::MENU)?;
        self.db
            .delete_cf(&cf, keys::menu_item_key(id))
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    // =========================================================================
    // Review Operations
    // =========================================================================

    fn put_review(&self, review: &Review) -> Result<()> {
        let cf = self.cf(cf::REVIEWS)?;
        let key = keys::review_key(&review.id);
        let value = Self::serialize(review)?;

        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn list_reviews(&self) -> Result<Vec<Review>> {
        self.scan_all(cf::REVIEWS)
    }

    // =========================================================================
    // Cart Operations
    // =========================================================================

    fn put_cart_item(&self, item: &CartItem) -> Result<()> {
        let cf_carts = self.cf(cf::CARTS)?;
        let cf_by_owner = self.cf(cf::CARTS_BY_OWNER)?;

        let cart_key = keys::cart_item_key(&item.id);
        let owner_key = keys::owner_cart_key(&item.email, &item.id);
        let value = Self::serialize(item)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_carts, &cart_key, &value);
        batch.put_cf(&cf_by_owner, &owner_key, []); // Index entry (empty value)

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn list_cart_items_by_owner(&self, email: &str) -> Result<Vec<CartItem>> {
        let cf_by_owner = self.cf(cf::CARTS_BY_OWNER)?;
        let cf_carts = self.cf(cf::CARTS)?;
        let prefix = keys::owner_prefix(email);

        let mut items = Vec::new();

        let iter = self
            .db
            .iterator_cf(&cf_by_owner, IteratorMode::From(&prefix, Direction::Forward));

        for entry in iter {
            let (key, _) = entry.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            let id = keys::extract_cart_item_id_from_owner_key(&key);
            let data = self
                .db
                .get_cf(&cf_carts, keys::cart_item_key(&id))
                .map_err(|e| StoreError::Database(e.to_string()))?;

            if let Some(data) = data {
                items.push(Self::deserialize(&data)?);
            }
        }

        Ok(items)
    }

    fn delete_cart_item(&self, id: &CartItemId) -> Result<()> {
        let cf_carts = self.cf(cf::CARTS)?;

        let data = self
            .db
            .get_cf(&cf_carts, keys::cart_item_key(id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .ok_or(StoreError::NotFound)?;
        let item: CartItem = Self::deserialize(&data)?;

        let cf_by_owner = self.cf(cf::CARTS_BY_OWNER)?;

        let mut batch = WriteBatch::default();
        batch.delete_cf(&cf_carts, keys::cart_item_key(id));
        batch.delete_cf(&cf_by_owner, keys::owner_cart_key(&item.email, id));

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn delete_cart_items(&self, ids: &[CartItemId]) -> Result<usize> {
        let cf_carts = self.cf(cf::CARTS)?;
        let cf_by_owner = self.cf(cf::CARTS_BY_OWNER)?;

        let mut batch = WriteBatch::default();
        let mut deleted = 0;

        for id in ids {
            let data = self
                .db
                .get_cf(&cf_carts, keys::cart_item_key(id))
                .map_err(|e| StoreError::Database(e.to_string()))?;

            // Rows that are already gone are skipped, not errors; the caller
            // learns how many rows actually existed from the returned count.
            let Some(data) = data else {
                continue;
            };
            let item: CartItem = Self::deserialize(&data)?;

            batch.delete_cf(&cf_carts, keys::cart_item_key(id));
            batch.delete_cf(&cf_by_owner, keys::owner_cart_key(&item.email, id));
            deleted += 1;
        }

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(deleted)
    }

    // =========================================================================
    // Payment Operations
    // =========================================================================

    fn put_payment(&self, payment: &PaymentRecord) -> Result<()> {
        let cf_payments = self.cf(cf::PAYMENTS)?;
        let cf_by_owner = self.cf(cf::PAYMENTS_BY_OWNER)?;

        let payment_key = keys::payment_key(&payment.id);
        let owner_key = keys::owner_payment_key(&payment.email, &payment.id);
        let value = Self::serialize(payment)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_payments, &payment_key, &value);
        batch.put_cf(&cf_by_owner, &owner_key, []); // Index entry (empty value)

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn get_payment(&self, id: &PaymentId) -> Result<Option<PaymentRecord>> {
        let cf = self.cf(cf::PAYMENTS)?;
        let key = keys::payment_key(id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn list_payments_by_owner(&self, email: &str) -> Result<Vec<PaymentRecord>> {
        let cf_by_owner = self.cf(cf::PAYMENTS_BY_OWNER)?;
        let prefix = keys::owner_prefix(email);

        let iter = self
            .db
            .iterator_cf(&cf_by_owner, IteratorMode::From(&prefix, Direction::Forward));

        // Collect matching keys first; ULID suffixes are time-ordered, so
        // reversing yields newest-first.
        let mut all_keys: Vec<Vec<u8>> = Vec::new();
        for entry in iter {
            let (key, _) = entry.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            all_keys.push(key.to_vec());
        }

        all_keys.reverse();

        let mut payments = Vec::new();
        for key in all_keys {
            let id = keys::extract_payment_id_from_owner_key(&key);
            if let Some(payment) = self.get_payment(&id)? {
                payments.push(payment);
            }
        }

        Ok(payments)
    }

    fn sum_payment_prices(&self) -> Result<f64> {
        let cf = self.cf(cf::PAYMENTS)?;
        let mut total = 0.0;

        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            let payment: PaymentRecord = Self::deserialize(&value)?;
            total += payment.price;
        }

        Ok(total)
    }

    // =========================================================================
    // Count Operations
    // =========================================================================

    fn estimated_user_count(&self) -> Result<u64> {
        self.estimated_count(cf::USERS)
    }

    fn estimated_menu_count(&self) -> Result<u64> {
        self.estimated_count(cf::MENU)
    }

    fn estimated_payment_count(&self) -> Result<u64> {
        self.estimated_count(cf::PAYMENTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (RocksStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = RocksStore::open(dir.path()).unwrap();
        (store, dir)
    }

    fn cart_item(email: &str, price: f64) -> CartItem {
        CartItem::new(email, MenuItemId::generate(), "Caesar Salad", "salad.png", price)
    }

    #[test]
    fn user_insert_is_noop_when_email_exists() {
        let (store, _dir) = create_test_store();

        let first = User::new("alice@example.com", Some("Alice".into()));
        let inserted = store.create_user_if_absent(&first).unwrap();
        assert_eq!(inserted, Some(first.id));

        // Second registration for the same email leaves the original intact.
        let second = User::new("alice@example.com", Some("Imposter".into()));
        let inserted = store.create_user_if_absent(&second).unwrap();
        assert!(inserted.is_none());

        let stored = store.get_user_by_email("alice@example.com").unwrap().unwrap();
        assert_eq!(stored.id, first.id);
        assert_eq!(stored.name.as_deref(), Some("Alice"));
    }

    #[test]
    fn role_promotion_persists() {
        let (store, _dir) = create_test_store();

        let user = User::new("bob@example.com", None);
        store.create_user_if_absent(&user).unwrap();

        store.set_user_role(&user.id, Role::Admin).unwrap();

        let stored = store.get_user_by_email("bob@example.com").unwrap().unwrap();
        assert!(stored.is_admin());
    }

    #[test]
    fn set_role_on_missing_user_is_not_found() {
        let (store, _dir) = create_test_store();
        let result = store.set_user_role(&UserId::generate(), Role::Admin);
        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[test]
    fn delete_user_clears_email_index() {
        let (store, _dir) = create_test_store();

        let user = User::new("carol@example.com", None);
        store.create_user_if_absent(&user).unwrap();
        store.delete_user(&user.id).unwrap();

        assert!(store.get_user(&user.id).unwrap().is_none());
        assert!(store.get_user_by_email("carol@example.com").unwrap().is_none());

        // The email can be registered again.
        let again = User::new("carol@example.com", None);
        assert!(store.create_user_if_absent(&again).unwrap().is_some());
    }

    #[test]
    fn menu_crud() {
        let (store, _dir) = create_test_store();

        let item = MenuItem::new("Margherita", "Tomato and basil", "pizza.png", "pizza", 14.5);
        store.put_menu_item(&item).unwrap();

        let listed = store.list_menu().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Margherita");

        store.delete_menu_item(&item.id).unwrap();
        assert!(store.list_menu().unwrap().is_empty());

        let result = store.delete_menu_item(&item.id);
        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[test]
    fn cart_items_are_owner_scoped() {
        let (store, _dir) = create_test_store();

        let a1 = cart_item("alice@example.com", 10.0);
        let a2 = cart_item("alice@example.com", 12.0);
        let b1 = cart_item("bob@example.com", 8.0);
        store.put_cart_item(&a1).unwrap();
        store.put_cart_item(&a2).unwrap();
        store.put_cart_item(&b1).unwrap();

        let alice_items = store.list_cart_items_by_owner("alice@example.com").unwrap();
        assert_eq!(alice_items.len(), 2);
        assert!(alice_items.iter().all(|i| i.email == "alice@example.com"));

        let bob_items = store.list_cart_items_by_owner("bob@example.com").unwrap();
        assert_eq!(bob_items.len(), 1);
    }

    #[test]
    fn bulk_delete_counts_only_existing_rows() {
        let (store, _dir) = create_test_store();

        let c1 = cart_item("alice@example.com", 10.0);
        let c2 = cart_item("alice@example.com", 12.0);
        store.put_cart_item(&c1).unwrap();
        store.put_cart_item(&c2).unwrap();

        // One id matches nothing; that is reported, not an error.
        let deleted = store
            .delete_cart_items(&[c1.id, c2.id, CartItemId::generate()])
            .unwrap();
        assert_eq!(deleted, 2);
        assert!(store
            .list_cart_items_by_owner("alice@example.com")
            .unwrap()
            .is_empty());

        // Deleting the same ids again matches zero rows.
        let deleted = store.delete_cart_items(&[c1.id, c2.id]).unwrap();
        assert_eq!(deleted, 0);
    }

    #[test]
    fn delete_single_cart_item() {
        let (store, _dir) = create_test_store();

        let item = cart_item("alice@example.com", 10.0);
        store.put_cart_item(&item).unwrap();
        store.delete_cart_item(&item.id).unwrap();

        assert!(store
            .list_cart_items_by_owner("alice@example.com")
            .unwrap()
            .is_empty());
        assert!(matches!(
            store.delete_cart_item(&item.id),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn payments_listed_newest_first() {
        let (store, _dir) = create_test_store();

        let first = PaymentRecord::new("alice@example.com", 10.0, "pi_first", vec![]);
        store.put_payment(&first).unwrap();

        std::thread::sleep(std::time::Duration::from_millis(2)); // Ensure different ULIDs

        let second = PaymentRecord::new("alice@example.com", 20.0, "pi_second", vec![]);
        store.put_payment(&second).unwrap();

        let payments = store.list_payments_by_owner("alice@example.com").unwrap();
        assert_eq!(payments.len(), 2);
        assert_eq!(payments[0].charge_ref, "pi_second"); // Newest first
        assert_eq!(payments[1].charge_ref, "pi_first");
    }

    #[test]
    fn payments_are_owner_scoped() {
        let (store, _dir) = create_test_store();

        let alice = PaymentRecord::new("alice@example.com", 10.0, "pi_a", vec![]);
        let bob = PaymentRecord::new("bob@example.com", 20.0, "pi_b", vec![]);
        store.put_payment(&alice).unwrap();
        store.put_payment(&bob).unwrap();

        let payments = store.list_payments_by_owner("alice@example.com").unwrap();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].charge_ref, "pi_a");
    }

    #[test]
    fn revenue_is_zero_with_no_payments() {
        let (store, _dir) = create_test_store();
        assert_eq!(store.sum_payment_prices().unwrap(), 0.0);
    }

    #[test]
    fn revenue_sums_regardless_of_insertion_order() {
        let (store, _dir) = create_test_store();

        for price in [20.0, 10.0, 30.0] {
            let payment = PaymentRecord::new("alice@example.com", price, "pi_x", vec![]);
            store.put_payment(&payment).unwrap();
        }

        assert_eq!(store.sum_payment_prices().unwrap(), 60.0);
    }

    #[test]
    fn estimated_counts_track_inserts() {
        let (store, _dir) = create_test_store();

        for name in ["Margherita", "Caesar Salad", "Tiramisu"] {
            let item = MenuItem::new(name, "", "", "misc", 9.0);
            store.put_menu_item(&item).unwrap();
        }

        // Fresh store, unique keys, no deletes: the estimate matches.
        assert_eq!(store.estimated_menu_count().unwrap(), 3);
        assert_eq!(store.estimated_payment_count().unwrap(), 0);
    }

    #[test]
    fn reviews_roundtrip() {
        let (store, _dir) = create_test_store();

        let review = Review::new("Alice", "Great pasta", 5);
        store.put_review(&review).unwrap();

        let reviews = store.list_reviews().unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].rating, 5);
    }
}
