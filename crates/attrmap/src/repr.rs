use crate::kind::{Fallback, Kind};
use crate::{AttrMap, Dict, Key, List, Tuple, Value};
use std::fmt::{self, Display, Formatter};

/// Containers currently being printed; a revisit prints `...` instead of
/// recursing.
type Stack = Vec<usize>;

fn print_value(f: &mut Formatter<'_>, value: &Value, stack: &mut Stack) -> fmt::Result {
    match value {
        Value::Nil => write!(f, "nil"),
        Value::Bool(b) => write!(f, "{}", b),
        Value::Int(i) => write!(f, "{}", i),
        Value::Float(x) => write!(f, "{:?}", x),
        Value::Str(s) => write!(f, "{:?}", s.as_str()),
        Value::List(list) => print_list(f, list, stack),
        Value::Tuple(tuple) => print_tuple(f, tuple, stack),
        Value::Dict(dict) => print_entries(f, dict.addr(), &dict.entries(), stack),
        Value::Map(map) => print_map(f, map, stack),
    }
}

fn print_key(f: &mut Formatter<'_>, key: &Key) -> fmt::Result {
    match key {
        Key::Str(s) => write!(f, "{:?}", s.as_str()),
        other => write!(f, "{}", other),
    }
}

fn print_items(f: &mut Formatter<'_>, items: &[Value], stack: &mut Stack) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        print_value(f, item, stack)?;
    }
    Ok(())
}

fn print_list(f: &mut Formatter<'_>, list: &List, stack: &mut Stack) -> fmt::Result {
    if stack.contains(&list.addr()) {
        return write!(f, "[...]");
    }
    stack.push(list.addr());
    write!(f, "[")?;
    print_items(f, &list.to_vec(), stack)?;
    stack.pop();
    write!(f, "]")
}

fn print_tuple(f: &mut Formatter<'_>, tuple: &Tuple, stack: &mut Stack) -> fmt::Result {
    let items: Vec<Value> = tuple.iter().cloned().collect();
    write!(f, "(")?;
    print_items(f, &items, stack)?;
    if items.len() == 1 {
        write!(f, ",")?;
    }
    write!(f, ")")
}

fn print_entries(
    f: &mut Formatter<'_>,
    addr: usize,
    entries: &[(Key, Value)],
    stack: &mut Stack,
) -> fmt::Result {
    if stack.contains(&addr) {
        return write!(f, "{{...}}");
    }
    stack.push(addr);
    print_pairs(f, entries, stack)?;
    stack.pop();
    Ok(())
}

fn print_pairs(f: &mut Formatter<'_>, entries: &[(Key, Value)], stack: &mut Stack) -> fmt::Result {
    write!(f, "{{")?;
    for (i, (key, value)) in entries.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        print_key(f, key)?;
        write!(f, ": ")?;
        print_value(f, value, stack)?;
    }
    write!(f, "}}")
}

fn print_map(f: &mut Formatter<'_>, map: &AttrMap, stack: &mut Stack) -> fmt::Result {
    let kind = map.kind();
    if stack.contains(&map.addr()) {
        return write!(f, "{}({{...}})", kind.name());
    }
    // the fallback may refer back to the map itself
    stack.push(map.addr());
    write!(f, "{}(", kind.name())?;
    match &kind {
        Kind::Default {
            fallback: Fallback::Value(value),
            ..
        } => {
            print_value(f, value, stack)?;
            write!(f, ", ")?;
        }
        Kind::Default {
            fallback: Fallback::Factory(factory),
            ..
        } => write!(f, "{}, ", factory.name())?,
        _ => {}
    }
    print_pairs(f, &map.entries(), stack)?;
    stack.pop();
    write!(f, ")")
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        print_value(f, self, &mut Stack::new())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

macro_rules! display_via_value {
    ($($ty:ident),*) => {
        $(
            impl Display for $ty {
                fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                    Display::fmt(&Value::$ty(self.clone()), f)
                }
            }

            impl fmt::Debug for $ty {
                fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                    Display::fmt(self, f)
                }
            }
        )*
    };
}

display_via_value!(List, Tuple, Dict);

impl Display for AttrMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&Value::Map(self.clone()), f)
    }
}

impl fmt::Debug for AttrMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::DefaultFactory;
    use crate::{attrmap, dict, list};

    #[test]
    fn test_map_repr() {
        let b = attrmap! { "foo" => attrmap! { "lol" => true }, "hello" => 42, "ponies" => "are pretty!" };
        assert_eq!(
            b.to_string(),
            r#"AttrMap({"foo": AttrMap({"lol": true}), "hello": 42, "ponies": "are pretty!"})"#
        );
    }

    #[test]
    fn test_mixed_keys_repr() {
        let with_spaces = attrmap! { 1 => 2, "a b" => 9, "c" => attrmap! { "simple" => 5 } };
        assert_eq!(
            with_spaces.to_string(),
            r#"AttrMap({1: 2, "a b": 9, "c": AttrMap({"simple": 5})})"#
        );
    }

    #[test]
    fn test_default_kind_repr() {
        let map = AttrMap::of(Kind::default_value(0)).with("a", 1.5);
        assert_eq!(map.to_string(), r#"DefaultAttrMap(0, {"a": 1.5})"#);
        let map = AttrMap::of(Kind::default_factory(DefaultFactory::list()));
        assert_eq!(map.to_string(), "DefaultFactoryAttrMap(list, {})");
    }

    #[test]
    fn test_sequences_repr() {
        let value = Value::from(list![Value::Nil, Tuple::new(vec![Value::Int(1)]), dict! {}]);
        assert_eq!(value.to_string(), "[nil, (1,), {}]");
    }

    #[test]
    fn test_cycle_repr() {
        let map = AttrMap::new();
        map.set("self", map.clone());
        assert_eq!(map.to_string(), r#"AttrMap({"self": AttrMap({...})})"#);
        let list = List::new();
        list.push(list.clone());
        assert_eq!(list.to_string(), "[[...]]");
    }

    #[test]
    fn test_self_referential_default_repr() {
        let map = AttrMap::of(Kind::default_value(0));
        map.set_attr("__default__", map.clone()).unwrap();
        assert_eq!(map.to_string(), "DefaultAttrMap(DefaultAttrMap({...}), {})");
    }
}
