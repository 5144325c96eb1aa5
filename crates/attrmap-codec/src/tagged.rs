//! Kind tags for YAML.
//!
//! A tagged attribute mapping is written as `!attrmap.<Kind>` followed by
//! its entries. A default kind writes a `{default, materialize, entries}`
//! mapping instead so that the fallback survives.

use crate::encode::Style;
use attrmap::{AttrMap, Fallback, Kind, Value};
use serde::ser::{self, Serialize, SerializeMap, Serializer};

const ENUM: &str = "attrmap";
const PLAIN_TAG: &str = "attrmap.AttrMap";
const AUTO_TAG: &str = "attrmap.AutoAttrMap";
const RECURSIVE_TAG: &str = "attrmap.RecursiveAttrMap";
const DEFAULT_TAG: &str = "attrmap.DefaultAttrMap";

pub(crate) const DEFAULT_FIELD: &str = "default";
pub(crate) const MATERIALIZE_FIELD: &str = "materialize";
pub(crate) const ENTRIES_FIELD: &str = "entries";

/// What a recognised tag rebuilds.
#[derive(Debug)]
pub(crate) enum Tagged {
    Entries(Kind),
    Default,
}

/// Recognises `!attrmap` and `!attrmap.<Kind>`; anything else is unknown.
pub(crate) fn parse_tag(tag: &str) -> Option<Tagged> {
    match tag.trim_start_matches('!') {
        ENUM | PLAIN_TAG => Some(Tagged::Entries(Kind::Plain)),
        AUTO_TAG => Some(Tagged::Entries(Kind::Auto)),
        RECURSIVE_TAG => Some(Tagged::Entries(Kind::Recursive)),
        DEFAULT_TAG => Some(Tagged::Default),
        _ => None,
    }
}

fn tag_of(kind: &Kind) -> Option<&'static str> {
    match kind {
        Kind::Plain => Some(PLAIN_TAG),
        Kind::Auto => Some(AUTO_TAG),
        Kind::Recursive => Some(RECURSIVE_TAG),
        Kind::Default {
            fallback: Fallback::Value(_),
            ..
        } => Some(DEFAULT_TAG),
        Kind::Default {
            fallback: Fallback::Factory(_),
            ..
        } => None,
    }
}

/// First kind reachable from `value` that has no tagged form.
///
/// `value` must be acyclic.
pub(crate) fn unrepresentable(value: &Value) -> Option<&'static str> {
    match value {
        Value::List(list) => list.to_vec().iter().find_map(unrepresentable),
        Value::Tuple(tuple) => tuple.iter().find_map(unrepresentable),
        Value::Dict(dict) => dict.values().iter().find_map(unrepresentable),
        Value::Map(map) => {
            let kind = map.kind();
            match &kind {
                Kind::Default {
                    fallback: Fallback::Factory(_),
                    ..
                } => Some(kind.name()),
                Kind::Default {
                    fallback: Fallback::Value(default),
                    ..
                } => unrepresentable(default)
                    .or_else(|| map.values().iter().find_map(unrepresentable)),
                _ => map.values().iter().find_map(unrepresentable),
            }
        }
        _ => None,
    }
}

pub(crate) fn serialize<S: Serializer>(
    map: &AttrMap,
    style: Style,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let kind = map.kind();
    let tag = tag_of(&kind)
        .ok_or_else(|| <S::Error as ser::Error>::custom(format!("{} has no tagged form", kind.name())))?;
    match &kind {
        Kind::Default {
            fallback: Fallback::Value(default),
            materialize,
        } => {
            let body = DefaultBody {
                map,
                default,
                materialize: *materialize,
                style,
            };
            serializer.serialize_newtype_variant(ENUM, 0, tag, &body)
        }
        _ => serializer.serialize_newtype_variant(ENUM, 0, tag, &EntriesBody { map, style }),
    }
}

struct EntriesBody<'a> {
    map: &'a AttrMap,
    style: Style,
}

impl Serialize for EntriesBody<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.style.entries(serializer, self.map.entries())
    }
}

struct DefaultBody<'a> {
    map: &'a AttrMap,
    default: &'a Value,
    materialize: bool,
    style: Style,
}

impl Serialize for DefaultBody<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut body = serializer.serialize_map(Some(3))?;
        body.serialize_entry(DEFAULT_FIELD, &self.style.encode(self.default))?;
        body.serialize_entry(MATERIALIZE_FIELD, &self.materialize)?;
        body.serialize_entry(
            ENTRIES_FIELD,
            &EntriesBody {
                map: self.map,
                style: self.style,
            },
        )?;
        body.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attrmap::{attrmap, list, DefaultFactory};

    #[test]
    fn test_parse_tag() {
        assert!(matches!(parse_tag("!attrmap"), Some(Tagged::Entries(Kind::Plain))));
        assert!(matches!(parse_tag("attrmap.AutoAttrMap"), Some(Tagged::Entries(Kind::Auto))));
        assert!(matches!(parse_tag("!attrmap.DefaultAttrMap"), Some(Tagged::Default)));
        assert!(parse_tag("!attrmap.Nope").is_none());
        assert!(parse_tag("!custom").is_none());
    }

    #[test]
    fn test_tag_names_follow_kind_names() {
        for kind in [Kind::Plain, Kind::Auto, Kind::Recursive, Kind::default_value(0)] {
            assert_eq!(tag_of(&kind), Some(format!("attrmap.{}", kind.name()).as_str()));
        }
    }

    #[test]
    fn test_factory_kind_is_unrepresentable() {
        let inner = AttrMap::of(Kind::default_factory(DefaultFactory::list()));
        let value = Value::from(list![attrmap! { "x" => inner }]);
        assert_eq!(unrepresentable(&value), Some("DefaultFactoryAttrMap"));
        assert_eq!(unrepresentable(&Value::from(attrmap! { "x" => 1 })), None);
    }
}
