use crate::encode::Style;
use crate::{CodecError, CodecResult, JsonOptions};
use attrmap::{has_cycle, to_attr_form, to_plain_form, AttrMap, MapFactory, Value};
use log::debug;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Parses JSON and converts every object into a container made by `factory`.
pub fn from_json(text: &str, factory: &(impl MapFactory + ?Sized)) -> CodecResult<Value> {
    debug!("decoding {} bytes of JSON", text.len());
    let plain: Value = serde_json::from_str(text)?;
    Ok(to_attr_form(&plain, factory)?)
}

/// [`from_json`] for documents whose root is an object.
pub fn from_json_map(text: &str, factory: &(impl MapFactory + ?Sized)) -> CodecResult<AttrMap> {
    let value = from_json(text, factory)?;
    Ok(AttrMap::try_from(value)?)
}

/// Writes the plain form of `value` as JSON.
pub fn to_json(value: &Value, options: &JsonOptions) -> CodecResult<String> {
    debug!("encoding {} as JSON", value.type_name());
    if has_cycle(value) {
        return Err(CodecError::CircularReference);
    }
    let plain = to_plain_form(value);
    let style = Style {
        sort_keys: options.sort_keys,
        string_keys: true,
        tagged: false,
    };
    let encode = style.encode(&plain);
    match options.indent {
        None => Ok(serde_json::to_string(&encode)?),
        Some(width) => {
            let indent = " ".repeat(width);
            let mut out = Vec::new();
            let mut serializer =
                serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));
            encode.serialize(&mut serializer)?;
            Ok(String::from_utf8_lossy(&out).into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attrmap::{attrmap, dict, AttrError, Kind};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pretty_indent() {
        let value = Value::from(attrmap! { "a" => 1 });
        assert_eq!(to_json(&value, &JsonOptions::pretty(2)).unwrap(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_non_string_keys_are_stringified() {
        let value = Value::from(dict! { 1 => "one", true => "yes" });
        assert_eq!(
            to_json(&value, &JsonOptions::default()).unwrap(),
            r#"{"1":"one","true":"yes"}"#
        );
    }

    #[test]
    fn test_map_root_required() {
        let err = from_json_map("[1, 2]", &Kind::Plain).unwrap_err();
        assert!(matches!(err, CodecError::Attr(AttrError::TypeMismatch { .. })));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(from_json("{", &Kind::Plain), Err(CodecError::Json(_))));
    }
}
