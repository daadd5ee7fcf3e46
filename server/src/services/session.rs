//! Visitor sessions and their carts.
//!
//! ARCHITECTURE
//! ============
//! A session is keyed by an opaque ID the browser generates and keeps in
//! session storage. There is no create call: the first request that names an
//! unknown ID creates it (`get_or_create`). Sessions live only in memory and
//! are evicted by the reaper once idle past the TTL.
//!
//! CONCURRENCY
//! ===========
//! One map-wide mutex guards every read-modify-write, including the reaper's
//! sweep. Critical sections never await, so a std mutex is enough.
//!
//! TRADE-OFFS
//! ==========
//! Only `get_or_create` (and the add/list calls built on it) refreshes
//! `last_active_at`. Deleting an item or reading the mirror view does not,
//! so a session kept alive only by deletes or mirror polling still expires.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use serde::Serialize;
use time::OffsetDateTime;
use tracing::info;

use crate::services::catalog::ProductCatalog;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CartError {
    #[error("invalid product id: {0}")]
    InvalidProduct(String),
    #[error("product {product_id} is not offered in {field} `{value}`")]
    InvalidOption { product_id: String, field: &'static str, value: String },
    #[error("session expired or not found: {0}")]
    SessionNotFound(String),
    #[error("cart item not found: {0}")]
    ItemNotFound(String),
}

/// One line in a cart. Immutable once created.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Millisecond wall-clock stamp, bumped when needed so IDs never repeat.
    pub id: i64,
    pub product_id: String,
    /// Product name copied at add time.
    pub name: String,
    pub size: String,
    pub color: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub session_id: String,
    pub created_at: Instant,
    /// Never earlier than `created_at`.
    pub last_active_at: Instant,
    /// Insertion order; the same product may appear more than once.
    pub cart_items: Vec<CartItem>,
}

impl Session {
    fn new(session_id: &str, now: Instant) -> Self {
        Self { session_id: session_id.to_owned(), created_at: now, last_active_at: now, cart_items: Vec::new() }
    }

    fn touch(&mut self, now: Instant) {
        if now > self.last_active_at {
            self.last_active_at = now;
        }
    }

    /// Whether the session has been idle for longer than `ttl` at `now`.
    #[must_use]
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.last_active_at) > ttl
    }
}

struct StoreInner {
    sessions: HashMap<String, Session>,
    last_item_id: i64,
}

impl StoreInner {
    fn get_or_create(&mut self, session_id: &str, now: Instant) -> &mut Session {
        let session = self.sessions.entry(session_id.to_owned()).or_insert_with(|| {
            info!(%session_id, "session created");
            Session::new(session_id, now)
        });
        session.touch(now);
        session
    }

    /// Millisecond timestamp, forced strictly above every ID handed out so far.
    #[allow(clippy::cast_possible_truncation)]
    fn next_item_id(&mut self, wall: OffsetDateTime) -> i64 {
        let millis = (wall.unix_timestamp_nanos() / 1_000_000) as i64;
        let id = millis.max(self.last_item_id.saturating_add(1));
        self.last_item_id = id;
        id
    }
}

/// Handle to the process-wide session map. Cheap to clone.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<StoreInner>>,
    catalog: Arc<ProductCatalog>,
    enforce_options: bool,
}

impl SessionStore {
    #[must_use]
    pub fn new(catalog: Arc<ProductCatalog>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner { sessions: HashMap::new(), last_item_id: 0 })),
            catalog,
            enforce_options: false,
        }
    }

    /// Reject sizes and colors the product does not list.
    #[must_use]
    pub fn with_option_enforcement(mut self, enforce: bool) -> Self {
        self.enforce_options = enforce;
        self
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch a session, creating an empty one if the ID is new. Always marks
    /// the session active.
    pub fn get_or_create(&self, session_id: &str) -> Session {
        self.get_or_create_at(session_id, Instant::now())
    }

    pub(crate) fn get_or_create_at(&self, session_id: &str, now: Instant) -> Session {
        self.lock().get_or_create(session_id, now).clone()
    }

    /// Append a product to the session's cart.
    ///
    /// The product is checked before the session is touched, so a bad ID
    /// neither creates nor refreshes a session.
    ///
    /// # Errors
    ///
    /// `InvalidProduct` if `product_id` is not in the catalog; `InvalidOption`
    /// if option enforcement is on and `size` or `color` is not offered.
    pub fn add_item(&self, session_id: &str, product_id: &str, size: &str, color: &str) -> Result<CartItem, CartError> {
        self.add_item_at(session_id, product_id, size, color, Instant::now(), OffsetDateTime::now_utc())
    }

    pub(crate) fn add_item_at(
        &self,
        session_id: &str,
        product_id: &str,
        size: &str,
        color: &str,
        now: Instant,
        wall: OffsetDateTime,
    ) -> Result<CartItem, CartError> {
        let product = self
            .catalog
            .get(product_id)
            .map_err(|_| CartError::InvalidProduct(product_id.to_owned()))?;

        if self.enforce_options {
            if !product.offers_size(size) {
                return Err(CartError::InvalidOption {
                    product_id: product_id.to_owned(),
                    field: "size",
                    value: size.to_owned(),
                });
            }
            if !product.offers_color(color) {
                return Err(CartError::InvalidOption {
                    product_id: product_id.to_owned(),
                    field: "color",
                    value: color.to_owned(),
                });
            }
        }

        let mut inner = self.lock();
        let id = inner.next_item_id(wall);
        let item = CartItem {
            id,
            product_id: product.id.clone(),
            name: product.name.clone(),
            size: size.to_owned(),
            color: color.to_owned(),
            timestamp: wall,
        };
        inner.get_or_create(session_id, now).cart_items.push(item.clone());
        info!(%session_id, %product_id, item_id = id, "cart add");
        Ok(item)
    }

    /// Remove one item from an existing session's cart.
    ///
    /// # Errors
    ///
    /// `SessionNotFound` if the session does not exist (never created, or
    /// already reaped); `ItemNotFound` if no item has `item_id`.
    pub fn remove_item(&self, session_id: &str, item_id: i64) -> Result<(), CartError> {
        let mut inner = self.lock();
        let session = inner
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| CartError::SessionNotFound(session_id.to_owned()))?;
        let index = session
            .cart_items
            .iter()
            .position(|item| item.id == item_id)
            .ok_or_else(|| CartError::ItemNotFound(item_id.to_string()))?;
        session.cart_items.remove(index);
        info!(%session_id, item_id, "cart remove");
        Ok(())
    }

    /// Cart contents in insertion order. Creates the session if needed.
    #[must_use]
    pub fn list_items(&self, session_id: &str) -> Vec<CartItem> {
        self.list_items_at(session_id, Instant::now())
    }

    pub(crate) fn list_items_at(&self, session_id: &str, now: Instant) -> Vec<CartItem> {
        self.get_or_create_at(session_id, now).cart_items
    }

    /// Read a session without creating or refreshing it.
    #[must_use]
    pub fn snapshot(&self, session_id: &str) -> Option<Session> {
        self.lock().sessions.get(session_id).cloned()
    }

    /// Whether `session_id` is currently live. Does not create or refresh.
    #[must_use]
    pub fn contains(&self, session_id: &str) -> bool {
        self.lock().sessions.contains_key(session_id)
    }

    /// Evict every session idle for longer than `ttl`. Returns the evicted IDs.
    #[must_use]
    pub fn reap_expired(&self, ttl: Duration) -> Vec<String> {
        self.reap_expired_at(Instant::now(), ttl)
    }

    pub(crate) fn reap_expired_at(&self, now: Instant, ttl: Duration) -> Vec<String> {
        let mut inner = self.lock();
        let mut evicted = Vec::new();
        inner.sessions.retain(|id, session| {
            let expired = session.is_expired(now, ttl);
            if expired {
                evicted.push(id.clone());
            }
            !expired
        });
        evicted
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().sessions.is_empty()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
