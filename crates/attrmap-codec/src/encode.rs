//! Serializer front end shared by both formats.

use crate::tagged;
use attrmap::{Key, Value};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// How mappings are written.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Style {
    pub sort_keys: bool,
    /// Write every key in its string form.
    pub string_keys: bool,
    /// Wrap attribute mappings in a kind tag.
    pub tagged: bool,
}

impl Style {
    pub fn encode(self, value: &Value) -> Encode<'_> {
        Encode { value, style: self }
    }

    pub fn items<S: Serializer>(self, serializer: S, items: &[Value]) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(items.len()))?;
        for item in items {
            seq.serialize_element(&self.encode(item))?;
        }
        seq.end()
    }

    pub fn entries<S: Serializer>(
        self,
        serializer: S,
        mut entries: Vec<(Key, Value)>,
    ) -> Result<S::Ok, S::Error> {
        if self.sort_keys {
            if self.string_keys {
                entries.sort_by_key(|(key, _)| key.to_astr());
            } else {
                entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            }
        }
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in &entries {
            if self.string_keys {
                map.serialize_entry(key.to_astr().as_str(), &self.encode(value))?;
            } else {
                map.serialize_entry(key, &self.encode(value))?;
            }
        }
        map.end()
    }
}

pub(crate) struct Encode<'a> {
    value: &'a Value,
    style: Style,
}

impl Serialize for Encode<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value {
            Value::List(list) => self.style.items(serializer, &list.to_vec()),
            Value::Tuple(tuple) => {
                let items: Vec<Value> = tuple.iter().cloned().collect();
                self.style.items(serializer, &items)
            }
            Value::Dict(dict) => self.style.entries(serializer, dict.entries()),
            Value::Map(map) if self.style.tagged => tagged::serialize(map, self.style, serializer),
            Value::Map(map) => self.style.entries(serializer, map.entries()),
            scalar => scalar.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attrmap::{attrmap, dict};

    #[test]
    fn test_sorted_string_keys() {
        let style = Style {
            sort_keys: true,
            string_keys: true,
            tagged: false,
        };
        let value = Value::from(dict! { "b" => 1, 10 => 2, "a" => attrmap! { "z" => 1, "y" => 2 } });
        let json = serde_json::to_string(&style.encode(&value)).unwrap();
        assert_eq!(json, r#"{"10":2,"a":{"y":2,"z":1},"b":1}"#);
    }

    #[test]
    fn test_insertion_order_by_default() {
        let value = Value::from(dict! { "b" => 1, "a" => 2 });
        let json = serde_json::to_string(&Style::default().encode(&value)).unwrap();
        assert_eq!(json, r#"{"b":1,"a":2}"#);
    }
}
