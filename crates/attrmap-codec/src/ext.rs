use crate::{to_json, to_yaml, CodecResult, JsonOptions, YamlOptions};
use attrmap::{AttrMap, Value};

/// Encoding methods on [`AttrMap`].
pub trait AttrMapExt {
    fn to_json(&self, options: &JsonOptions) -> CodecResult<String>;
    fn to_yaml(&self, options: &YamlOptions) -> CodecResult<String>;
}

impl AttrMapExt for AttrMap {
    fn to_json(&self, options: &JsonOptions) -> CodecResult<String> {
        to_json(&Value::Map(self.clone()), options)
    }

    fn to_yaml(&self, options: &YamlOptions) -> CodecResult<String> {
        to_yaml(&Value::Map(self.clone()), options)
    }
}
