use crate::encode::Style;
use crate::tagged::{self, parse_tag, Tagged};
use crate::{CodecError, CodecResult, YamlOptions};
use attrmap::{
    has_cycle, to_attr_form, to_plain_form, AttrError, AttrMap, Dict, Fallback, Key, Kind, List,
    MapFactory, Value,
};
use log::{debug, trace};
use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value as Yaml};

/// Parses YAML and converts every untagged mapping into a container made by
/// `factory`. Mappings tagged `!attrmap.<Kind>` come back as that kind.
pub fn from_yaml(text: &str, factory: &(impl MapFactory + ?Sized)) -> CodecResult<Value> {
    debug!("decoding {} bytes of YAML", text.len());
    let document: Yaml = serde_yaml::from_str(text)?;
    let plain = node(document)?;
    Ok(to_attr_form(&plain, factory)?)
}

/// [`from_yaml`] for documents whose root is a mapping.
pub fn from_yaml_map(text: &str, factory: &(impl MapFactory + ?Sized)) -> CodecResult<AttrMap> {
    let value = from_yaml(text, factory)?;
    Ok(AttrMap::try_from(value)?)
}

/// Writes `value` as YAML: its plain form, or with kind tags when
/// `options.tagged` is set.
pub fn to_yaml(value: &Value, options: &YamlOptions) -> CodecResult<String> {
    debug!("encoding {} as YAML (tagged: {})", value.type_name(), options.tagged);
    if has_cycle(value) {
        return Err(CodecError::CircularReference);
    }
    let style = Style {
        sort_keys: options.sort_keys,
        string_keys: false,
        tagged: options.tagged,
    };
    if options.tagged {
        if let Some(kind) = tagged::unrepresentable(value) {
            return Err(CodecError::Unrepresentable(kind.to_string()));
        }
        return Ok(serde_yaml::to_string(&style.encode(value))?);
    }
    let plain = to_plain_form(value);
    Ok(serde_yaml::to_string(&style.encode(&plain))?)
}

fn type_name(yaml: &Yaml) -> &'static str {
    match yaml {
        Yaml::Null => "null",
        Yaml::Bool(_) => "bool",
        Yaml::Number(_) => "number",
        Yaml::String(_) => "string",
        Yaml::Sequence(_) => "sequence",
        Yaml::Mapping(_) => "mapping",
        Yaml::Tagged(_) => "tagged value",
    }
}

fn node(yaml: Yaml) -> CodecResult<Value> {
    Ok(match yaml {
        Yaml::Null => Value::Nil,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => n
            .as_i64()
            .map(Value::Int)
            .or_else(|| n.as_f64().map(Value::Float))
            .unwrap_or(Value::Nil),
        Yaml::String(s) => Value::from(s),
        Yaml::Sequence(items) => {
            let list = List::new();
            for item in items {
                list.push(node(item)?);
            }
            Value::List(list)
        }
        Yaml::Mapping(mapping) => {
            let dict = Dict::new();
            for (k, v) in mapping {
                dict.set(key(k)?, node(v)?);
            }
            Value::Dict(dict)
        }
        Yaml::Tagged(tagged) => tagged_node(*tagged)?,
    })
}

fn key(yaml: Yaml) -> CodecResult<Key> {
    match yaml {
        Yaml::String(s) => Ok(Key::from(s)),
        Yaml::Bool(b) => Ok(Key::Bool(b)),
        Yaml::Number(n) if n.is_i64() => Ok(Key::Int(n.as_i64().unwrap_or_default())),
        other => Err(AttrError::mismatch("string, integer or boolean key", type_name(&other)).into()),
    }
}

fn tagged_node(tagged: TaggedValue) -> CodecResult<Value> {
    let tag = tagged.tag.to_string();
    match parse_tag(&tag) {
        Some(Tagged::Entries(kind)) => {
            trace!("rebuilding {} from tag {}", kind.name(), tag);
            let map = AttrMap::of(kind);
            fill(&map, tagged.value)?;
            Ok(Value::Map(map))
        }
        Some(Tagged::Default) => {
            trace!("rebuilding default mapping from tag {}", tag);
            default_map(tagged.value)
        }
        None => {
            trace!("dropping unknown tag {}", tag);
            node(tagged.value)
        }
    }
}

fn fill(map: &AttrMap, body: Yaml) -> CodecResult<()> {
    match body {
        Yaml::Mapping(mapping) => {
            for (k, v) in mapping {
                map.set(key(k)?, node(v)?);
            }
            Ok(())
        }
        other => Err(AttrError::mismatch("mapping", type_name(&other)).into()),
    }
}

fn default_map(body: Yaml) -> CodecResult<Value> {
    let mut body: Mapping = match body {
        Yaml::Mapping(mapping) => mapping,
        other => return Err(AttrError::mismatch("mapping", type_name(&other)).into()),
    };
    let fallback = match body.remove(tagged::DEFAULT_FIELD) {
        Some(default) => node(default)?,
        None => Value::Nil,
    };
    let materialize = body
        .remove(tagged::MATERIALIZE_FIELD)
        .and_then(|flag| flag.as_bool())
        .unwrap_or(false);
    let map = AttrMap::of(Kind::Default {
        fallback: Fallback::Value(fallback),
        materialize,
    });
    if let Some(entries) = body.remove(tagged::ENTRIES_FIELD) {
        fill(&map, entries)?;
    }
    Ok(Value::Map(map))
}
