use crate::error::{AttrError, AttrResult};
use crate::{AttrMap, AttrStr, Dict, Key, List, Tuple};

/// Any value a container can hold.
///
/// Containers are handles: cloning a `Value::List`, `Value::Dict` or
/// `Value::Map` aliases the same storage, so shared and cyclic structures can
/// be expressed. [`Value::same`] compares identity, `==` compares contents.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(AttrStr),
    List(List),
    Tuple(Tuple),
    Dict(Dict),
    Map(AttrMap),
}

// constructors
impl Value {
    pub fn str(text: impl Into<AttrStr>) -> Self {
        Value::Str(text.into())
    }

    pub fn list() -> Self {
        Value::List(List::new())
    }

    pub fn dict() -> Self {
        Value::Dict(Dict::new())
    }

    pub fn map() -> Self {
        Value::Map(AttrMap::new())
    }
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "Nil",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::Str(_) => "Str",
            Value::List(_) => "List",
            Value::Tuple(_) => "Tuple",
            Value::Dict(_) => "Dict",
            Value::Map(map) => map.kind().name(),
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Plain mapping or attribute mapping.
    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Dict(_) | Value::Map(_))
    }

    /// Lists and tuples; strings are never sequences.
    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::List(_) | Value::Tuple(_))
    }

    /// Containers without attribute access.
    pub fn is_plain_container(&self) -> bool {
        matches!(self, Value::Dict(_) | Value::List(_) | Value::Tuple(_))
    }

    /// Identity: the same handle for containers, equal values for scalars.
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::List(a), Value::List(b)) => a.ptr_eq(b),
            (Value::Tuple(a), Value::Tuple(b)) => a.ptr_eq(b),
            (Value::Dict(a), Value::Dict(b)) => a.ptr_eq(b),
            (Value::Map(a), Value::Map(b)) => a.ptr_eq(b),
            (a, b) if !a.is_container() && !b.is_container() => a == b,
            _ => false,
        }
    }

    fn is_container(&self) -> bool {
        self.is_mapping() || self.is_sequence()
    }
}

// Quick Readers
impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&AttrMap> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }
}

// Navigation
impl Value {
    /// Attribute read on an attribute mapping.
    pub fn attr(&self, name: &str) -> AttrResult<Value> {
        match self {
            Value::Map(map) => map.attr(name),
            other => Err(AttrError::mismatch("attribute mapping", other.type_name())),
        }
    }

    /// Item read on either kind of mapping.
    pub fn item(&self, key: impl Into<Key>) -> AttrResult<Value> {
        match self {
            Value::Map(map) => map.get(key),
            Value::Dict(dict) => dict.get(key),
            other => Err(AttrError::mismatch("mapping", other.type_name())),
        }
    }

    /// Element read on a list or tuple.
    pub fn at(&self, index: usize) -> AttrResult<Value> {
        match self {
            Value::List(list) => list.at(index),
            Value::Tuple(tuple) => tuple.at(index),
            other => Err(AttrError::mismatch("sequence", other.type_name())),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                *a as f64 == *b
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a.ptr_eq(b) || a.to_vec() == b.to_vec(),
            (Value::Tuple(a), Value::Tuple(b)) => {
                a.ptr_eq(b) || a.iter().eq(b.iter())
            }
            (Value::Dict(a), Value::Dict(b)) => {
                a.ptr_eq(b) || a.with_entries(|x| b.with_entries(|y| entries_eq(x, y)))
            }
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Map(m), Value::Dict(d)) | (Value::Dict(d), Value::Map(m)) => m == d,
            _ => false,
        }
    }
}

/// Mapping equality regardless of insertion order.
pub(crate) fn entries_eq(a: &crate::dict::Entries, b: &crate::dict::Entries) -> bool {
    a.len() == b.len()
        && a.iter()
            .all(|(k, v)| b.get(k).is_some_and(|other| v == other))
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Value {
        Value::Int(i as i64)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Value {
        Value::Int(i)
    }
}

impl From<u32> for Value {
    fn from(u: u32) -> Value {
        Value::Int(u as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Value {
        Value::Float(f)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Value {
        Value::Float(f as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Str(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Str(s.into())
    }
}

impl From<AttrStr> for Value {
    fn from(s: AttrStr) -> Value {
        Value::Str(s)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Value {
        match key {
            Key::Str(s) => Value::Str(s),
            Key::Int(i) => Value::Int(i),
            Key::Bool(b) => Value::Bool(b),
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Value {
        Value::Nil
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Value {
        v.map_or(Value::Nil, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Value {
        Value::List(List::from_vec(v))
    }
}

impl From<List> for Value {
    fn from(list: List) -> Value {
        Value::List(list)
    }
}

impl From<Tuple> for Value {
    fn from(tuple: Tuple) -> Value {
        Value::Tuple(tuple)
    }
}

impl From<Dict> for Value {
    fn from(dict: Dict) -> Value {
        Value::Dict(dict)
    }
}

impl From<AttrMap> for Value {
    fn from(map: AttrMap) -> Value {
        Value::Map(map)
    }
}

impl From<&AttrMap> for Value {
    fn from(map: &AttrMap) -> Value {
        Value::Map(map.clone())
    }
}

impl TryFrom<Value> for AttrMap {
    type Error = AttrError;

    fn try_from(value: Value) -> AttrResult<AttrMap> {
        match value {
            Value::Map(map) => Ok(map),
            other => Err(AttrError::mismatch("attribute mapping", other.type_name())),
        }
    }
}
