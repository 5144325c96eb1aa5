//! serde support for [`Value`] and [`Key`].
//!
//! Serialization writes the plain shape of a value: every mapping becomes a
//! serde map and every sequence a serde seq, whatever its kind. A structure
//! that contains itself fails with a custom "circular reference" error from
//! the serializer instead of recursing.
//!
//! Deserialization always builds plain containers; the conversion engine runs
//! afterwards.

use crate::{Dict, Key, List, Value};
use serde::de::{self, Deserialize, Deserializer, EnumAccess, MapAccess, SeqAccess, VariantAccess, Visitor};
use serde::ser::{self, Serialize, SerializeMap, SerializeSeq, Serializer};
use std::cell::RefCell;
use std::fmt;

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Key::Str(s) => serializer.serialize_str(s),
            Key::Int(i) => serializer.serialize_i64(*i),
            Key::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let path = RefCell::new(Vec::new());
        Guarded { value: self, path: &path }.serialize(serializer)
    }
}

/// A value plus the containers enclosing it in the current walk.
struct Guarded<'a> {
    value: &'a Value,
    path: &'a RefCell<Vec<usize>>,
}

impl Guarded<'_> {
    fn addr(&self) -> Option<usize> {
        match self.value {
            Value::List(list) => Some(list.addr()),
            Value::Tuple(tuple) => Some(tuple.addr()),
            Value::Dict(dict) => Some(dict.addr()),
            Value::Map(map) => Some(map.addr()),
            _ => None,
        }
    }

    fn body<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value {
            Value::Nil => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Str(s) => serializer.serialize_str(s),
            Value::List(list) => self.items(serializer, &list.to_vec()),
            Value::Tuple(tuple) => {
                let items: Vec<Value> = tuple.iter().cloned().collect();
                self.items(serializer, &items)
            }
            Value::Dict(dict) => self.entries(serializer, &dict.entries()),
            Value::Map(map) => self.entries(serializer, &map.entries()),
        }
    }

    fn items<S: Serializer>(&self, serializer: S, items: &[Value]) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(items.len()))?;
        for item in items {
            seq.serialize_element(&Guarded { value: item, path: self.path })?;
        }
        seq.end()
    }

    fn entries<S: Serializer>(
        &self,
        serializer: S,
        entries: &[(Key, Value)],
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            map.serialize_entry(key, &Guarded { value, path: self.path })?;
        }
        map.end()
    }
}

impl Serialize for Guarded<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let addr = self.addr();
        if let Some(addr) = addr {
            if self.path.borrow().contains(&addr) {
                return Err(ser::Error::custom("circular reference"));
            }
            self.path.borrow_mut().push(addr);
        }
        let result = self.body(serializer);
        if addr.is_some() {
            self.path.borrow_mut().pop();
        }
        result
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("any data value")
    }

    fn visit_bool<E>(self, b: bool) -> Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E>(self, i: i64) -> Result<Value, E> {
        Ok(Value::Int(i))
    }

    fn visit_u64<E>(self, u: u64) -> Result<Value, E> {
        Ok(match i64::try_from(u) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::Float(u as f64),
        })
    }

    fn visit_f64<E>(self, f: f64) -> Result<Value, E> {
        Ok(Value::Float(f))
    }

    fn visit_str<E>(self, s: &str) -> Result<Value, E> {
        Ok(Value::from(s))
    }

    fn visit_string<E>(self, s: String) -> Result<Value, E> {
        Ok(Value::from(s))
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Nil)
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Nil)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let list = List::new();
        while let Some(item) = seq.next_element::<Value>()? {
            list.push(item);
        }
        Ok(Value::List(list))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let dict = Dict::new();
        while let Some((key, value)) = map.next_entry::<Key, Value>()? {
            dict.set(key, value);
        }
        Ok(Value::Dict(dict))
    }

    // tagged nodes: the tag is dropped, the content kept
    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<Value, A::Error> {
        let (_tag, variant) = data.variant::<de::IgnoredAny>()?;
        variant.newtype_variant::<Value>()
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct KeyVisitor;

impl<'de> Visitor<'de> for KeyVisitor {
    type Value = Key;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, integer or boolean key")
    }

    fn visit_bool<E>(self, b: bool) -> Result<Key, E> {
        Ok(Key::Bool(b))
    }

    fn visit_i64<E>(self, i: i64) -> Result<Key, E> {
        Ok(Key::Int(i))
    }

    fn visit_u64<E: de::Error>(self, u: u64) -> Result<Key, E> {
        i64::try_from(u)
            .map(Key::Int)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(u), &self))
    }

    fn visit_str<E>(self, s: &str) -> Result<Key, E> {
        Ok(Key::from(s))
    }

    fn visit_string<E>(self, s: String) -> Result<Key, E> {
        Ok(Key::from(s))
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Key, D::Error> {
        deserializer.deserialize_any(KeyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{attrmap, dict, list, AttrMap};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_serialize_plain_shape() {
        let map = attrmap! { "a" => 1, "b" => list![true, Value::Nil], "c" => dict! { "d" => 1.5 } };
        let json = serde_json::to_string(&Value::Map(map)).unwrap();
        assert_eq!(json, r#"{"a":1,"b":[true,null],"c":{"d":1.5}}"#);
    }

    #[test]
    fn test_serialize_shared_is_not_a_cycle() {
        let shared = list![1];
        let value = Value::from(list![shared.clone(), shared]);
        assert_eq!(serde_json::to_string(&value).unwrap(), "[[1],[1]]");
    }

    #[test]
    fn test_serialize_cycle_fails() {
        let map = AttrMap::new();
        map.set("self", map.clone());
        let err = serde_json::to_string(&Value::Map(map)).unwrap_err();
        assert!(err.to_string().contains("circular reference"));
    }

    #[test]
    fn test_deserialize_plain_containers() {
        let value: Value = serde_json::from_str(r#"{"x": {"y": [1, 2.5, "s", null]}}"#).unwrap();
        assert!(value.as_dict().is_some());
        let y = value.item("x").unwrap().item("y").unwrap();
        assert_eq!(y, Value::from(list![1, 2.5, "s", Value::Nil]));
    }

    #[test]
    fn test_large_unsigned_becomes_float() {
        let value: Value = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(value, Value::Float(18446744073709551615.0));
    }

    #[test]
    fn test_key_round_trip() {
        let key: Key = serde_json::from_str(r#""name""#).unwrap();
        assert_eq!(key, Key::from("name"));
        assert_eq!(serde_json::to_string(&Key::Int(3)).unwrap(), "3");
    }
}
