use serde::{Deserialize, Serialize};

/// JSON encoder settings.
///
/// Compact output unless `indent` is set. Keys that are not strings are
/// written in their string form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonOptions {
    /// Pretty-print with this many spaces per level.
    pub indent: Option<usize>,
    pub sort_keys: bool,
}

impl JsonOptions {
    pub fn pretty(indent: usize) -> Self {
        Self {
            indent: Some(indent),
            ..Self::default()
        }
    }
}

/// YAML encoder settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YamlOptions {
    pub sort_keys: bool,
    /// Write each attribute mapping with a `!attrmap.<Kind>` tag so that
    /// decoding rebuilds the same kind.
    pub tagged: bool,
}

impl YamlOptions {
    pub fn tagged() -> Self {
        Self {
            tagged: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_load_with_defaults() {
        let json: JsonOptions = serde_json::from_str(r#"{"indent": 4}"#).unwrap();
        assert_eq!(json, JsonOptions::pretty(4));
        let yaml: YamlOptions = serde_yaml::from_str("tagged: true").unwrap();
        assert_eq!(yaml, YamlOptions::tagged());
        let empty: YamlOptions = serde_yaml::from_str("{}").unwrap();
        assert_eq!(empty, YamlOptions::default());
    }
}
