//! Container kinds.
//!
//! A [`Kind`] is chosen when an [`AttrMap`] is constructed and decides what
//! happens on a missing-key read and on assignment. Kinds are plain values:
//! the conversion engine takes one (through [`MapFactory`]) to know which
//! container to build for every nested mapping it meets.

use crate::error::{AttrError, AttrResult};
use crate::{AttrMap, AttrStr, Dict, List, Value};
use std::fmt;
use std::rc::Rc;

/// Zero-argument producer of fresh default values.
#[derive(Clone)]
pub struct DefaultFactory {
    name: AttrStr,
    make: Rc<dyn Fn() -> Value>,
}

impl DefaultFactory {
    pub fn new(name: impl Into<AttrStr>, make: impl Fn() -> Value + 'static) -> Self {
        Self {
            name: name.into(),
            make: Rc::new(make),
        }
    }

    /// A new empty `List` per call.
    pub fn list() -> Self {
        Self::new("list", || Value::List(List::new()))
    }

    /// A new empty `Dict` per call.
    pub fn dict() -> Self {
        Self::new("dict", || Value::Dict(Dict::new()))
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn call(&self) -> Value {
        (self.make)()
    }
}

impl fmt::Debug for DefaultFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<factory {}>", self.name)
    }
}

/// What a default kind hands out for a missing key.
#[derive(Clone, Debug)]
pub enum Fallback {
    /// The same value every time. Containers given here are shared by every
    /// read; use a factory when each key needs its own.
    Value(Value),
    Factory(DefaultFactory),
}

impl Fallback {
    pub fn produce(&self) -> Value {
        match self {
            Fallback::Value(value) => value.clone(),
            Fallback::Factory(factory) => factory.call(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub enum Kind {
    /// Plain attribute mapping: missing keys fail.
    #[default]
    Plain,
    /// Converts plain containers to `Auto` maps when they are assigned.
    Auto,
    /// Missing keys yield `fallback`, stored back when `materialize` is set.
    Default { fallback: Fallback, materialize: bool },
    /// Nested mappings are `Recursive` too; missing keys materialize a new
    /// empty `Recursive` map.
    Recursive,
}

impl Kind {
    /// Non-materializing default value.
    pub fn default_value(value: impl Into<Value>) -> Self {
        Kind::Default {
            fallback: Fallback::Value(value.into()),
            materialize: false,
        }
    }

    /// Default value that is written back on the first missing read.
    pub fn materializing(value: impl Into<Value>) -> Self {
        Kind::Default {
            fallback: Fallback::Value(value.into()),
            materialize: true,
        }
    }

    /// Materializing factory default.
    pub fn default_factory(factory: DefaultFactory) -> Self {
        Kind::Default {
            fallback: Fallback::Factory(factory),
            materialize: true,
        }
    }

    /// Type name used in representations and YAML tags.
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Plain => "AttrMap",
            Kind::Auto => "AutoAttrMap",
            Kind::Default {
                fallback: Fallback::Value(_),
                ..
            } => "DefaultAttrMap",
            Kind::Default {
                fallback: Fallback::Factory(_),
                ..
            } => "DefaultFactoryAttrMap",
            Kind::Recursive => "RecursiveAttrMap",
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Kind::Auto)
    }
}

/// Builds the empty containers the conversion engine fills in.
pub trait MapFactory {
    fn make(&self) -> AttrResult<AttrMap>;
}

impl MapFactory for Kind {
    fn make(&self) -> AttrResult<AttrMap> {
        Ok(AttrMap::of(self.clone()))
    }
}

/// Adapts a closure into a [`MapFactory`].
///
/// ```rust
/// use attrmap::{AttrMap, FnFactory, Kind, dict, to_attr_form};
///
/// let factory = FnFactory::new(|| Ok(AttrMap::of(Kind::default_value(0))));
/// let value = to_attr_form(&dict! { "a" => dict! {} }.into(), &factory).unwrap();
/// assert_eq!(value.attr("a").unwrap().attr("missing").unwrap(), 0.into());
/// ```
pub struct FnFactory<F>(pub F);

impl<F> FnFactory<F>
where
    F: Fn() -> AttrResult<AttrMap>,
{
    pub fn new(make: F) -> Self {
        FnFactory(make)
    }
}

impl<F> MapFactory for FnFactory<F>
where
    F: Fn() -> AttrResult<AttrMap>,
{
    fn make(&self) -> AttrResult<AttrMap> {
        let map = (self.0)()?;
        if !map.is_empty() {
            return Err(AttrError::TypeMismatch {
                expected: "empty container from factory".into(),
                found: format!("{} with {} entries", map.kind().name(), map.len()),
            });
        }
        Ok(map)
    }
}
