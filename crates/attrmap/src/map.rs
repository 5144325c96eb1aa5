//! The attribute mapping container.
//!
//! ```rust
//! use attrmap::{AttrMap, Value};
//!
//! let b = AttrMap::new();
//! b.set_attr("hello", "world").unwrap();
//! assert_eq!(b.attr("hello").unwrap(), "world".into());
//! assert_eq!(b.get("hello").unwrap(), "world".into());
//!
//! b.set_attr("foo", AttrMap::new().with("lol", true)).unwrap();
//! assert_eq!(b.attr("foo").unwrap().attr("lol").unwrap(), true.into());
//! assert!(b.attr("foo").unwrap().same(&b.get("foo").unwrap()));
//! ```

use crate::convert;
use crate::dict::Entries;
use crate::error::{AttrError, AttrResult};
use crate::kind::{Fallback, Kind};
use crate::reserved::{check_attr_name, is_reserved, DEFAULT_SLOT, FACTORY_SLOT};
use crate::shared::{addr, shared, Shared};
use crate::string::is_identifier;
use crate::value::entries_eq;
use crate::{AttrStr, Dict, Key, Value};
use indexmap::IndexMap;
use log::warn;
use std::rc::Rc;

#[derive(Clone, Default)]
struct Inner {
    kind: Kind,
    entries: Entries,
    /// Attribute-only state written through reserved names.
    shadow: IndexMap<AttrStr, Value>,
}

/// Mapping whose entries are also reachable as attributes.
///
/// `AttrMap` is a handle: clones share storage, [`AttrMap::copy`] makes a
/// shallow copy of the same kind.
#[derive(Clone, Default)]
pub struct AttrMap(Shared<Inner>);

impl AttrMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of(kind: Kind) -> Self {
        AttrMap(shared(Inner {
            kind,
            ..Inner::default()
        }))
    }

    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (impl Into<Key>, impl Into<Value>)>,
    ) -> Self {
        let map = Self::new();
        map.update_pairs(pairs);
        map
    }

    /// Entries of `mapping` first, then `pairs`; later assignments win.
    pub fn build(
        kind: Kind,
        mapping: Option<&Value>,
        pairs: impl IntoIterator<Item = (impl Into<Key>, impl Into<Value>)>,
    ) -> AttrResult<Self> {
        let map = Self::of(kind);
        if let Some(mapping) = mapping {
            map.update(mapping)?;
        }
        map.update_pairs(pairs);
        Ok(map)
    }

    /// Recursively converts `dict` into containers of `kind`.
    pub fn from_dict(dict: &Dict, kind: &Kind) -> Self {
        convert::dict_to_map(dict, kind)
    }

    pub fn kind(&self) -> Kind {
        self.0.borrow().kind.clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().entries.is_empty()
    }

    pub fn contains(&self, key: impl Into<Key>) -> bool {
        self.0.borrow().entries.contains_key(&key.into())
    }

    pub fn keys(&self) -> Vec<Key> {
        self.0.borrow().entries.keys().cloned().collect()
    }

    pub fn values(&self) -> Vec<Value> {
        self.0.borrow().entries.values().cloned().collect()
    }

    /// Snapshot of the entries in insertion order.
    pub fn entries(&self) -> Vec<(Key, Value)> {
        self.0
            .borrow()
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn ptr_eq(&self, other: &AttrMap) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        addr(&self.0)
    }

    pub(crate) fn with_entries<R>(&self, f: impl FnOnce(&Entries) -> R) -> R {
        f(&self.0.borrow().entries)
    }

    pub(crate) fn set_kind(&self, kind: Kind) {
        self.0.borrow_mut().kind = kind;
    }

    pub(crate) fn shadow(&self) -> IndexMap<AttrStr, Value> {
        self.0.borrow().shadow.clone()
    }

    pub(crate) fn set_shadow(&self, shadow: IndexMap<AttrStr, Value>) {
        self.0.borrow_mut().shadow = shadow;
    }

    fn lookup(&self, key: &Key) -> Option<Value> {
        self.0.borrow().entries.get(key).cloned()
    }
}

// item access
impl AttrMap {
    /// Stored value for `key`. Absent keys fail with
    /// [`AttrError::KeyNotFound`] unless the kind supplies a default.
    pub fn get(&self, key: impl Into<Key>) -> AttrResult<Value> {
        let key = key.into();
        match self.lookup(&key) {
            Some(value) => Ok(value),
            None => self.missing(key),
        }
    }

    fn missing(&self, key: Key) -> AttrResult<Value> {
        match self.kind() {
            Kind::Plain | Kind::Auto => Err(AttrError::KeyNotFound(key)),
            Kind::Default {
                fallback,
                materialize,
            } => {
                let value = fallback.produce();
                if materialize {
                    self.store(key, value.clone());
                }
                Ok(value)
            }
            Kind::Recursive => {
                let value = Value::Map(AttrMap::of(Kind::Recursive));
                self.store(key, value.clone());
                Ok(value)
            }
        }
    }

    /// Stored value, or `default` when absent. Never consults the kind's
    /// fallback.
    pub fn get_or(&self, key: impl Into<Key>, default: impl Into<Value>) -> Value {
        self.lookup(&key.into()).unwrap_or_else(|| default.into())
    }

    /// Stores `value` under `key`. On an `Auto` map plain containers are
    /// converted first.
    pub fn set(&self, key: impl Into<Key>, value: impl Into<Value>) {
        let value = self.prepare(value.into());
        self.store(key.into(), value);
    }

    /// Inserts without the assignment hook.
    pub(crate) fn store(&self, key: Key, value: Value) {
        self.0.borrow_mut().entries.insert(key, value);
    }

    fn prepare(&self, value: Value) -> Value {
        if self.0.borrow().kind.is_auto() && value.is_plain_container() {
            convert::to_attr_form_as(&value, &Kind::Auto)
        } else {
            value
        }
    }

    pub fn setdefault(&self, key: impl Into<Key>, default: impl Into<Value>) -> Value {
        let key = key.into();
        if let Some(found) = self.lookup(&key) {
            return found;
        }
        let value = self.prepare(default.into());
        self.store(key, value.clone());
        value
    }

    pub fn remove(&self, key: impl Into<Key>) -> AttrResult<Value> {
        let key = key.into();
        let removed = self.0.borrow_mut().entries.shift_remove(&key);
        removed.ok_or(AttrError::KeyNotFound(key))
    }

    pub fn pop_or(&self, key: impl Into<Key>, default: impl Into<Value>) -> Value {
        self.remove(key).unwrap_or_else(|_| default.into())
    }

    pub fn clear(&self) {
        self.0.borrow_mut().entries.clear();
    }

    /// Assigns every entry of a mapping value through [`AttrMap::set`].
    pub fn update(&self, mapping: &Value) -> AttrResult<()> {
        let entries = match mapping {
            Value::Dict(dict) => dict.entries(),
            Value::Map(map) => map.entries(),
            other => return Err(AttrError::mismatch("mapping", other.type_name())),
        };
        self.update_pairs(entries);
        Ok(())
    }

    pub fn update_pairs(&self, pairs: impl IntoIterator<Item = (impl Into<Key>, impl Into<Value>)>) {
        for (key, value) in pairs {
            self.set(key, value);
        }
    }

    // ========== Chainable Builder Methods ==========

    /// Set key-value and return self (chainable)
    pub fn with(self, key: impl Into<Key>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }
}

// attribute access
impl AttrMap {
    /// Attribute read.
    ///
    /// Reserved names resolve to container state, never to a stored key of
    /// the same name.
    pub fn attr(&self, name: &str) -> AttrResult<Value> {
        if !is_identifier(name) {
            return Err(AttrError::InvalidAttrName(name.into()));
        }
        if is_reserved(name) {
            return self.state_attr(name);
        }
        match self.get(name) {
            Err(AttrError::KeyNotFound(_)) => Err(AttrError::AttributeNotFound(name.into())),
            found => found,
        }
    }

    fn state_attr(&self, name: &str) -> AttrResult<Value> {
        let inner = self.0.borrow();
        if let Some(value) = inner.shadow.get(name) {
            return Ok(value.clone());
        }
        match &inner.kind {
            Kind::Default {
                fallback: Fallback::Value(value),
                ..
            } if name == DEFAULT_SLOT => Ok(value.clone()),
            Kind::Default {
                fallback: Fallback::Factory(factory),
                ..
            } if name == FACTORY_SLOT => Ok(Value::str(factory.name())),
            _ => Err(AttrError::ReservedName(name.into())),
        }
    }

    /// Attribute write.
    ///
    /// Writing a reserved name changes container state instead of storing a
    /// key: `__default__` replaces a default kind's fallback value, anything
    /// else lands in an attribute-only slot that item access never sees. A
    /// warning is logged each time; use [`AttrMap::set_attr_checked`] to
    /// refuse such writes instead.
    pub fn set_attr(&self, name: &str, value: impl Into<Value>) -> AttrResult<()> {
        if !is_identifier(name) {
            return Err(AttrError::InvalidAttrName(name.into()));
        }
        let value = self.prepare(value.into());
        if is_reserved(name) {
            warn!(
                "attribute `{}` is reserved on {}; writing container state, not a stored key",
                name,
                self.kind().name()
            );
            self.set_state_attr(name, value);
            return Ok(());
        }
        self.store(name.into(), value);
        Ok(())
    }

    fn set_state_attr(&self, name: &str, value: Value) {
        let mut inner = self.0.borrow_mut();
        if name == DEFAULT_SLOT {
            if let Kind::Default { fallback, .. } = &mut inner.kind {
                *fallback = Fallback::Value(value);
                return;
            }
        }
        inner.shadow.insert(name.into(), value);
    }

    /// Attribute write that fails with [`AttrError::ReservedName`] instead of
    /// touching container state.
    pub fn set_attr_checked(&self, name: &str, value: impl Into<Value>) -> AttrResult<()> {
        check_attr_name(name)?;
        self.set(name, value);
        Ok(())
    }

    pub fn del_attr(&self, name: &str) -> AttrResult<()> {
        if !is_identifier(name) {
            return Err(AttrError::InvalidAttrName(name.into()));
        }
        if is_reserved(name) {
            let removed = self.0.borrow_mut().shadow.shift_remove(name);
            return removed
                .map(|_| ())
                .ok_or_else(|| AttrError::ReservedName(name.into()));
        }
        match self.remove(name) {
            Ok(_) => Ok(()),
            Err(_) => Err(AttrError::AttributeNotFound(name.into())),
        }
    }

    /// Keys reachable through attribute access.
    pub fn attr_names(&self) -> Vec<AttrStr> {
        self.0
            .borrow()
            .entries
            .keys()
            .filter_map(|k| k.name())
            .filter(|name| is_identifier(name) && !is_reserved(name))
            .map(AttrStr::from)
            .collect()
    }
}

// copies and conversion
impl AttrMap {
    /// Shallow copy with the same kind.
    pub fn copy(&self) -> AttrMap {
        AttrMap(shared(self.0.borrow().clone()))
    }

    /// Recursive copy keeping kinds and shared/cyclic structure.
    pub fn deep_copy(&self) -> AttrMap {
        convert::deep_copy_map(self)
    }

    /// Recursively converts back into a plain [`Dict`].
    pub fn to_dict(&self) -> Dict {
        convert::map_to_dict(self)
    }
}

impl PartialEq for AttrMap {
    fn eq(&self, other: &AttrMap) -> bool {
        self.ptr_eq(other) || self.with_entries(|a| other.with_entries(|b| entries_eq(a, b)))
    }
}

impl PartialEq<Dict> for AttrMap {
    fn eq(&self, other: &Dict) -> bool {
        self.with_entries(|a| other.with_entries(|b| entries_eq(a, b)))
    }
}

impl PartialEq<AttrMap> for Dict {
    fn eq(&self, other: &AttrMap) -> bool {
        other == self
    }
}
