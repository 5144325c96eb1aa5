use crate::error::{AttrError, AttrResult};
use crate::shared::{addr, shared, Shared};
use crate::{Key, Value};
use indexmap::IndexMap;
use std::rc::Rc;

pub(crate) type Entries = IndexMap<Key, Value>;

/// Plain mapping with no attribute access.
///
/// Like [`crate::List`], cloning a `Dict` aliases the same storage.
#[derive(Clone, Default)]
pub struct Dict(Shared<Entries>);

impl Dict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn contains(&self, key: impl Into<Key>) -> bool {
        self.0.borrow().contains_key(&key.into())
    }

    pub fn get(&self, key: impl Into<Key>) -> AttrResult<Value> {
        let key = key.into();
        let found = self.0.borrow().get(&key).cloned();
        found.ok_or(AttrError::KeyNotFound(key))
    }

    pub fn get_or(&self, key: impl Into<Key>, default: impl Into<Value>) -> Value {
        self.0
            .borrow()
            .get(&key.into())
            .cloned()
            .unwrap_or_else(|| default.into())
    }

    pub fn set(&self, key: impl Into<Key>, value: impl Into<Value>) {
        self.0.borrow_mut().insert(key.into(), value.into());
    }

    pub fn remove(&self, key: impl Into<Key>) -> AttrResult<Value> {
        let key = key.into();
        let removed = self.0.borrow_mut().shift_remove(&key);
        removed.ok_or(AttrError::KeyNotFound(key))
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn keys(&self) -> Vec<Key> {
        self.0.borrow().keys().cloned().collect()
    }

    pub fn values(&self) -> Vec<Value> {
        self.0.borrow().values().cloned().collect()
    }

    /// Snapshot of the entries in insertion order.
    pub fn entries(&self) -> Vec<(Key, Value)> {
        self.0
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn copy(&self) -> Dict {
        Dict(shared(self.0.borrow().clone()))
    }

    pub fn ptr_eq(&self, other: &Dict) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        addr(&self.0)
    }

    pub(crate) fn with_entries<R>(&self, f: impl FnOnce(&Entries) -> R) -> R {
        f(&self.0.borrow())
    }

    // ========== Chainable Builder Methods ==========

    /// Set key-value and return self (chainable)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use attrmap::Dict;
    ///
    /// let dict = Dict::new()
    ///     .with("name", "Alice")
    ///     .with("age", 30);
    /// assert_eq!(dict.len(), 2);
    /// ```
    pub fn with(self, key: impl Into<Key>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (impl Into<Key>, impl Into<Value>)>,
    ) -> Self {
        let dict = Self::new();
        for (key, value) in pairs {
            dict.set(key, value);
        }
        dict
    }
}
