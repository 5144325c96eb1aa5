//! Conversion between plain and attribute form.
//!
//! Both directions walk the input once, keeping a map from the address of
//! every container already visited to the container built for it. The entry
//! is recorded before the container's children are walked, so a structure
//! that refers back to itself resolves to the half-built result instead of
//! recursing forever, and two references to one input container come out as
//! two references to one output container.
//!
//! ```rust
//! use attrmap::{dict, list, to_attr_form_as, to_plain_form, Kind, Value};
//!
//! let plain: Value = dict! {
//!     "lol" => list!["cats", dict! { "hah" => "i win again" }],
//! }
//! .into();
//! let converted = to_attr_form_as(&plain, &Kind::Plain);
//! assert_eq!(converted.attr("lol").unwrap().at(1).unwrap().attr("hah").unwrap(), "i win again".into());
//! assert_eq!(to_plain_form(&converted), plain);
//! ```

use crate::error::AttrResult;
use crate::kind::{Fallback, Kind, MapFactory};
use crate::{AttrMap, Dict, List, Tuple, Value};
use log::trace;
use std::collections::{HashMap, HashSet};
use std::convert::Infallible;

/// Forward conversion: every plain mapping reachable from `value` becomes a
/// container made by `factory`, every list and tuple is rebuilt around the
/// converted elements. Containers already in attribute form, and scalars,
/// are returned as they are.
pub fn to_attr_form(value: &Value, factory: &(impl MapFactory + ?Sized)) -> AttrResult<Value> {
    Forward::new(|| factory.make()).value(value)
}

/// [`to_attr_form`] for a built-in kind, which cannot fail.
pub fn to_attr_form_as(value: &Value, kind: &Kind) -> Value {
    never(Forward::new(infallible(kind)).value(value))
}

/// Inverse conversion: every mapping becomes a plain [`Dict`], sequences are
/// rebuilt, scalars are untouched.
pub fn to_plain_form(value: &Value) -> Value {
    Plain::default().value(value)
}

/// Rebuilds every container, attribute maps with their own kind.
pub fn deep_copy(value: &Value) -> Value {
    Deep::default().value(value)
}

/// Whether `value` contains a container that (transitively) contains itself.
/// Shared but acyclic references do not count.
pub fn has_cycle(value: &Value) -> bool {
    let mut path = HashSet::new();
    let mut done = HashSet::new();
    visit(value, &mut path, &mut done)
}

pub(crate) fn dict_to_map(dict: &Dict, kind: &Kind) -> AttrMap {
    never(Forward::new(infallible(kind)).dict(dict))
}

pub(crate) fn map_to_dict(map: &AttrMap) -> Dict {
    Plain::default().mapping(map.addr(), || map.entries())
}

pub(crate) fn deep_copy_map(map: &AttrMap) -> AttrMap {
    Deep::default().map(map)
}

fn infallible(kind: &Kind) -> impl FnMut() -> Result<AttrMap, Infallible> + '_ {
    move || Ok(AttrMap::of(kind.clone()))
}

fn never<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

struct Forward<M> {
    make: M,
    seen: HashMap<usize, Value>,
}

impl<M, E> Forward<M>
where
    M: FnMut() -> Result<AttrMap, E>,
{
    fn new(make: M) -> Self {
        Self {
            make,
            seen: HashMap::new(),
        }
    }

    fn value(&mut self, value: &Value) -> Result<Value, E> {
        match value {
            Value::Dict(dict) => self.dict(dict).map(Value::Map),
            Value::List(list) => self.list(list),
            Value::Tuple(tuple) => self.tuple(tuple),
            other => Ok(other.clone()),
        }
    }

    fn dict(&mut self, dict: &Dict) -> Result<AttrMap, E> {
        if let Some(Value::Map(done)) = self.seen.get(&dict.addr()) {
            trace!("reusing converted mapping {:#x}", dict.addr());
            return Ok(done.clone());
        }
        let map = (self.make)()?;
        self.seen.insert(dict.addr(), Value::Map(map.clone()));
        for (key, value) in dict.entries() {
            let converted = self.value(&value)?;
            map.store(key, converted);
        }
        Ok(map)
    }

    fn list(&mut self, list: &List) -> Result<Value, E> {
        if let Some(done) = self.seen.get(&list.addr()) {
            trace!("reusing converted list {:#x}", list.addr());
            return Ok(done.clone());
        }
        let out = List::new();
        self.seen.insert(list.addr(), Value::List(out.clone()));
        for item in list.to_vec() {
            out.push(self.value(&item)?);
        }
        Ok(Value::List(out))
    }

    fn tuple(&mut self, tuple: &Tuple) -> Result<Value, E> {
        if let Some(done) = self.seen.get(&tuple.addr()) {
            return Ok(done.clone());
        }
        let mut items = Vec::with_capacity(tuple.len());
        for item in tuple.iter() {
            items.push(self.value(item)?);
        }
        // a cycle through a mutable container may have built this tuple already
        if let Some(done) = self.seen.get(&tuple.addr()) {
            return Ok(done.clone());
        }
        let out = Value::Tuple(Tuple::new(items));
        self.seen.insert(tuple.addr(), out.clone());
        Ok(out)
    }
}

#[derive(Default)]
struct Plain {
    seen: HashMap<usize, Value>,
}

impl Plain {
    fn value(&mut self, value: &Value) -> Value {
        match value {
            Value::Map(map) => Value::Dict(self.mapping(map.addr(), || map.entries())),
            Value::Dict(dict) => Value::Dict(self.mapping(dict.addr(), || dict.entries())),
            Value::List(list) => {
                if let Some(done) = self.seen.get(&list.addr()) {
                    return done.clone();
                }
                let out = List::new();
                self.seen.insert(list.addr(), Value::List(out.clone()));
                for item in list.to_vec() {
                    out.push(self.value(&item));
                }
                Value::List(out)
            }
            Value::Tuple(tuple) => {
                if let Some(done) = self.seen.get(&tuple.addr()) {
                    return done.clone();
                }
                let items: Vec<Value> = tuple.iter().map(|item| self.value(item)).collect();
                if let Some(done) = self.seen.get(&tuple.addr()) {
                    return done.clone();
                }
                let out = Value::Tuple(Tuple::new(items));
                self.seen.insert(tuple.addr(), out.clone());
                out
            }
            other => other.clone(),
        }
    }

    fn mapping(
        &mut self,
        addr: usize,
        entries: impl FnOnce() -> Vec<(crate::Key, Value)>,
    ) -> Dict {
        if let Some(Value::Dict(done)) = self.seen.get(&addr) {
            return done.clone();
        }
        let out = Dict::new();
        self.seen.insert(addr, Value::Dict(out.clone()));
        for (key, value) in entries() {
            let converted = self.value(&value);
            out.set(key, converted);
        }
        out
    }
}

#[derive(Default)]
struct Deep {
    seen: HashMap<usize, Value>,
}

impl Deep {
    fn value(&mut self, value: &Value) -> Value {
        match value {
            Value::Map(map) => Value::Map(self.map(map)),
            Value::Dict(dict) => {
                if let Some(done) = self.seen.get(&dict.addr()) {
                    return done.clone();
                }
                let out = Dict::new();
                self.seen.insert(dict.addr(), Value::Dict(out.clone()));
                for (key, item) in dict.entries() {
                    let copied = self.value(&item);
                    out.set(key, copied);
                }
                Value::Dict(out)
            }
            Value::List(list) => {
                if let Some(done) = self.seen.get(&list.addr()) {
                    return done.clone();
                }
                let out = List::new();
                self.seen.insert(list.addr(), Value::List(out.clone()));
                for item in list.to_vec() {
                    out.push(self.value(&item));
                }
                Value::List(out)
            }
            Value::Tuple(tuple) => {
                if let Some(done) = self.seen.get(&tuple.addr()) {
                    return done.clone();
                }
                let items: Vec<Value> = tuple.iter().map(|item| self.value(item)).collect();
                if let Some(done) = self.seen.get(&tuple.addr()) {
                    return done.clone();
                }
                let out = Value::Tuple(Tuple::new(items));
                self.seen.insert(tuple.addr(), out.clone());
                out
            }
            other => other.clone(),
        }
    }

    fn map(&mut self, map: &AttrMap) -> AttrMap {
        if let Some(Value::Map(done)) = self.seen.get(&map.addr()) {
            return done.clone();
        }
        let out = AttrMap::of(map.kind());
        self.seen.insert(map.addr(), Value::Map(out.clone()));
        if let Kind::Default {
            fallback: Fallback::Value(fallback),
            materialize,
        } = map.kind()
        {
            let fallback = Fallback::Value(self.value(&fallback));
            out.set_kind(Kind::Default {
                fallback,
                materialize,
            });
        }
        out.set_shadow(map.shadow());
        for (key, item) in map.entries() {
            let copied = self.value(&item);
            out.store(key, copied);
        }
        out
    }
}

fn visit(value: &Value, path: &mut HashSet<usize>, done: &mut HashSet<usize>) -> bool {
    let (addr, children) = match value {
        Value::List(list) => (list.addr(), list.to_vec()),
        Value::Tuple(tuple) => (tuple.addr(), tuple.iter().cloned().collect()),
        Value::Dict(dict) => (dict.addr(), dict.values()),
        Value::Map(map) => {
            let mut children = map.values();
            if let Kind::Default {
                fallback: Fallback::Value(fallback),
                ..
            } = map.kind()
            {
                children.push(fallback);
            }
            (map.addr(), children)
        }
        _ => return false,
    };
    if path.contains(&addr) {
        return true;
    }
    if !done.insert(addr) {
        return false;
    }
    path.insert(addr);
    let cyclic = children.iter().any(|child| visit(child, path, done));
    path.remove(&addr);
    cyclic
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AttrError;
    use crate::kind::FnFactory;
    use crate::{dict, list};

    #[test]
    fn test_round_trip_plain() {
        let plain = Value::from(dict! {
            "a" => 1,
            "b" => list![dict! { "c" => "x" }, Tuple::new(vec![Value::Int(2)])],
            "d" => Value::Nil,
        });
        let converted = to_attr_form_as(&plain, &Kind::Plain);
        assert!(converted.as_map().is_some());
        let back = to_plain_form(&converted);
        assert!(back.as_dict().is_some());
        assert_eq!(back, plain);
    }

    #[test]
    fn test_self_reference_resolves_to_result() {
        let a = Dict::new();
        a.set("self", a.clone());
        let converted = to_attr_form_as(&Value::Dict(a), &Kind::Plain);
        assert!(converted.attr("self").unwrap().same(&converted));
    }

    #[test]
    fn test_shared_reference_converted_once() {
        let shared = dict! { "v" => 1 };
        let plain = Value::from(list![shared.clone(), shared]);
        let converted = to_attr_form_as(&plain, &Kind::Plain);
        let (x, y) = (converted.at(0).unwrap(), converted.at(1).unwrap());
        assert!(x.same(&y));
        assert_eq!(x.type_name(), "AttrMap");
    }

    #[test]
    fn test_already_converted_is_kept() {
        let converted = to_attr_form_as(&dict! { "a" => dict! {} }.into(), &Kind::Plain);
        let again = to_attr_form_as(&converted, &Kind::Recursive);
        assert!(again.same(&converted));
        assert_eq!(again.attr("a").unwrap().type_name(), "AttrMap");
    }

    #[test]
    fn test_strings_and_scalars_untouched() {
        let value = Value::from("not a sequence");
        assert!(to_attr_form_as(&value, &Kind::Plain).same(&value));
        assert_eq!(to_plain_form(&Value::Int(4)), Value::Int(4));
    }

    #[test]
    fn test_recursive_kind_threads_through() {
        let plain = Value::from(dict! { "a" => list![dict! { "b" => 1 }] });
        let converted = to_attr_form_as(&plain, &Kind::Recursive);
        let inner = converted.attr("a").unwrap().at(0).unwrap();
        assert_eq!(inner.type_name(), "RecursiveAttrMap");
        assert_eq!(inner.attr("missing").unwrap().type_name(), "RecursiveAttrMap");
    }

    #[test]
    fn test_cycle_through_tuple() {
        let list = List::new();
        let tuple = Tuple::new(vec![Value::List(list.clone())]);
        list.push(tuple);
        let value = Value::List(list);
        assert!(has_cycle(&value));
        let plain = to_plain_form(&value);
        let inner = plain.at(0).unwrap().at(0).unwrap();
        assert!(inner.same(&plain));
    }

    #[test]
    fn test_has_cycle_ignores_sharing() {
        let shared = list![1];
        assert!(!has_cycle(&Value::from(list![shared.clone(), shared])));
        let map = AttrMap::new();
        map.set("me", map.clone());
        assert!(has_cycle(&Value::Map(map)));
    }

    #[test]
    fn test_deep_copy_keeps_kind_and_topology() {
        let map = AttrMap::of(Kind::default_value(0));
        map.set("self", map.clone());
        map.set("list", list![1]);
        let copy = deep_copy(&Value::Map(map.clone()));
        let copied = copy.as_map().unwrap();
        assert!(!copied.ptr_eq(&map));
        assert_eq!(copied.kind().name(), "DefaultAttrMap");
        assert!(copied.get("self").unwrap().same(&copy));
        let list = copied.get("list").unwrap();
        assert!(!list.same(&map.get("list").unwrap()));
        assert_eq!(copied.attr("missing").unwrap(), Value::Int(0));
    }

    #[test]
    fn test_deep_copy_rebuilds_default_value() {
        let map = AttrMap::of(Kind::default_value(List::new()));
        let copy = map.deep_copy();
        copy.attr("x").unwrap().as_list().unwrap().push(1);
        assert_eq!(map.attr("x").unwrap(), Value::list());
        assert_eq!(copy.attr("x").unwrap(), Value::from(list![1]));
    }

    #[test]
    fn test_self_referential_default() {
        let map = AttrMap::of(Kind::default_value(0));
        map.set_attr("__default__", map.clone()).unwrap();
        let value = Value::Map(map.clone());
        assert!(has_cycle(&value));
        let copy = map.deep_copy();
        assert!(!copy.ptr_eq(&map));
        assert!(copy.attr("missing").unwrap().same(&Value::Map(copy.clone())));
    }

    #[test]
    fn test_factory_error_propagates() {
        let factory = FnFactory::new(|| Err(AttrError::Factory("refused".into())));
        let err = to_attr_form(&dict! { "a" => 1 }.into(), &factory).unwrap_err();
        assert_eq!(err, AttrError::Factory("refused".into()));
    }

    #[test]
    fn test_custom_factory_builds_every_mapping() {
        let factory = FnFactory::new(|| Ok(AttrMap::of(Kind::Auto)));
        let value = to_attr_form(&dict! { "a" => dict! { "b" => 1 } }.into(), &factory).unwrap();
        assert_eq!(value.type_name(), "AutoAttrMap");
        assert_eq!(value.attr("a").unwrap().type_name(), "AutoAttrMap");
    }

    #[test]
    fn test_kind_as_factory() {
        let value = to_attr_form(&dict! { "a" => 1 }.into(), &Kind::Auto).unwrap();
        assert_eq!(value.type_name(), "AutoAttrMap");
    }
}
