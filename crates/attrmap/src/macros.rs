/// Builds a plain [`Dict`](crate::Dict) from `key => value` pairs.
///
/// ```rust
/// use attrmap::dict;
///
/// let d = dict! { "a" => 1, "nested" => dict! { "b" => 2 } };
/// assert_eq!(d.len(), 2);
/// ```
#[macro_export]
macro_rules! dict {
    () => {
        $crate::Dict::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let dict = $crate::Dict::new();
        $( dict.set($key, $value); )+
        dict
    }};
}

/// Builds an [`AttrMap`](crate::AttrMap), optionally of a given kind.
///
/// ```rust
/// use attrmap::{attrmap, Kind};
///
/// let m = attrmap! { "knights" => "lolcats", "ni" => "can haz" };
/// assert_eq!(m.attr("ni").unwrap(), "can haz".into());
///
/// let d = attrmap!(kind = Kind::default_value(0); "a" => 1);
/// assert_eq!(d.attr("b").unwrap(), 0.into());
/// ```
#[macro_export]
macro_rules! attrmap {
    (kind = $kind:expr; $($key:expr => $value:expr),* $(,)?) => {{
        let map = $crate::AttrMap::of($kind);
        $( map.set($key, $value); )*
        map
    }};
    () => {
        $crate::AttrMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let map = $crate::AttrMap::new();
        $( map.set($key, $value); )+
        map
    }};
}

/// Builds a plain [`List`](crate::List).
#[macro_export]
macro_rules! list {
    ($($item:expr),* $(,)?) => {{
        let list = $crate::List::new();
        $( list.push($item); )*
        list
    }};
}
