//! Flash storage for validation failures.
//!
//! The gate writes a [`FailureSet`] under a [`FlashKey`]; the next edit
//! screen for that post and user reads it once, which also deletes it.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::keys::FlashKey;
use crate::post_status::MESSAGE_PUBLISHED;

// ---------------------------------------------------------------------------
// Failure set
// ---------------------------------------------------------------------------

/// Failures from one gate run: field key -> message, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FailureSet(IndexMap<String, String>);

impl FailureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field_key: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field_key.into(), message.into());
    }

    pub fn get(&self, field_key: &str) -> Option<&str> {
        self.0.get(field_key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(field_key, message)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// ---------------------------------------------------------------------------
// Store contract
// ---------------------------------------------------------------------------

/// Keyed single-read storage for failure sets.
///
/// Writes to the same key are last-writer-wins. Implementations must make
/// [`read_and_clear`](FlashStore::read_and_clear) remove the entry before
/// returning it, so a second read yields `None`.
pub trait FlashStore: Send + Sync {
    fn write(&self, key: FlashKey, failures: FailureSet);

    fn clear(&self, key: FlashKey);

    fn contains(&self, key: FlashKey) -> bool;

    fn read_and_clear(&self, key: FlashKey) -> Option<FailureSet>;

    /// Drop a pending "published" confirmation while failures are waiting.
    ///
    /// The post was forced back to draft, so the host's success message
    /// for it would be wrong. Other message codes pass through.
    fn filter_admin_message(&self, key: FlashKey, message: Option<u32>) -> Option<u32> {
        match message {
            Some(MESSAGE_PUBLISHED) if self.contains(key) => None,
            other => other,
        }
    }
}

// ---------------------------------------------------------------------------
// In-memory implementation
// ---------------------------------------------------------------------------

/// Process-local [`FlashStore`]. Share it behind an `Arc`.
#[derive(Debug, Default)]
pub struct InMemoryFlashStore {
    entries: Mutex<HashMap<FlashKey, FailureSet>>,
}

impl InMemoryFlashStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pending failure sets.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave a half-written entry,
    // so a poisoned map is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<FlashKey, FailureSet>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FlashStore for InMemoryFlashStore {
    fn write(&self, key: FlashKey, failures: FailureSet) {
        self.lock().insert(key, failures);
    }

    fn clear(&self, key: FlashKey) {
        self.lock().remove(&key);
    }

    fn contains(&self, key: FlashKey) -> bool {
        self.lock().contains_key(&key)
    }

    fn read_and_clear(&self, key: FlashKey) -> Option<FailureSet> {
        self.lock().remove(&key)
    }
}
