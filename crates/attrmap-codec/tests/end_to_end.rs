use attrmap::{attrmap, list, to_plain_form, AttrMap, DefaultFactory, Kind, Value};
use attrmap_codec::{
    from_json, from_json_map, from_yaml, from_yaml_map, to_json, to_yaml, AttrMapExt, CodecError,
    JsonOptions, YamlOptions,
};
use pretty_assertions::assert_eq;

const DOC: &str = r#"{"x": {"y": [1, 2, 3]}}"#;

#[test]
fn test_json_end_to_end() {
    let b = from_json(DOC, &Kind::Plain).unwrap();
    assert_eq!(b.attr("x").unwrap().attr("y").unwrap().at(1).unwrap(), Value::Int(2));

    let text = to_json(&b, &JsonOptions::default()).unwrap();
    let reparsed: Value = serde_json::from_str(&text).unwrap();
    let original: Value = serde_json::from_str(DOC).unwrap();
    assert_eq!(reparsed, original);
    assert_eq!(reparsed, to_plain_form(&b));
}

#[test]
fn test_json_decode_kind() {
    let map = from_json_map(DOC, &Kind::Recursive).unwrap();
    assert_eq!(map.kind().name(), "RecursiveAttrMap");
    assert_eq!(map.attr("x").unwrap().type_name(), "RecursiveAttrMap");
    assert_eq!(map.attr("new").unwrap().type_name(), "RecursiveAttrMap");
}

#[test]
fn test_yaml_end_to_end() {
    let text = "x:\n  y:\n  - 1\n  - 2\n  - 3\n";
    let map = from_yaml_map(text, &Kind::Plain).unwrap();
    assert_eq!(map.attr("x").unwrap().attr("y").unwrap().at(1).unwrap(), Value::Int(2));
    assert_eq!(map.to_yaml(&YamlOptions::default()).unwrap(), text);

    let from_json = from_json(DOC, &Kind::Plain).unwrap();
    assert_eq!(to_plain_form(&Value::Map(map)), to_plain_form(&from_json));
}

#[test]
fn test_tagged_yaml_keeps_kinds() {
    let root = AttrMap::of(Kind::Auto);
    root.set("r", AttrMap::of(Kind::Recursive).with("k", 1));
    root.set("d", AttrMap::of(Kind::materializing(0)).with("a", 1));
    root.set("p", attrmap! { "items" => list![1, 2] });

    let text = root.to_yaml(&YamlOptions::tagged()).unwrap();
    assert!(text.contains("!attrmap.AutoAttrMap"));
    assert!(text.contains("!attrmap.DefaultAttrMap"));

    let back = from_yaml_map(&text, &Kind::Plain).unwrap();
    assert_eq!(back.kind().name(), "AutoAttrMap");
    assert_eq!(back.attr("r").unwrap().type_name(), "RecursiveAttrMap");
    assert_eq!(back.attr("p").unwrap().type_name(), "AttrMap");
    assert!(back == root);

    let d = back.get("d").unwrap();
    assert_eq!(d.type_name(), "DefaultAttrMap");
    let d = d.as_map().unwrap();
    assert_eq!(d.attr("missing").unwrap(), Value::Int(0));
    assert!(d.contains("missing"));
}

#[test]
fn test_untagged_yaml_loses_kinds() {
    let root = AttrMap::of(Kind::Recursive).with("a", AttrMap::of(Kind::Recursive));
    let text = to_yaml(&Value::Map(root), &YamlOptions::default()).unwrap();
    assert!(!text.contains('!'));
    let back = from_yaml(&text, &Kind::Plain).unwrap();
    assert_eq!(back.type_name(), "AttrMap");
}

#[test]
fn test_circular_reference_refused() {
    let map = AttrMap::new();
    map.set("self", map.clone());
    assert!(matches!(
        map.to_json(&JsonOptions::default()),
        Err(CodecError::CircularReference)
    ));
    assert!(matches!(
        map.to_yaml(&YamlOptions::tagged()),
        Err(CodecError::CircularReference)
    ));
}

#[test]
fn test_circular_default_refused() {
    let map = AttrMap::of(Kind::default_value(0));
    map.set_attr("__default__", map.clone()).unwrap();
    assert!(matches!(
        map.to_yaml(&YamlOptions::tagged()),
        Err(CodecError::CircularReference)
    ));
    assert!(matches!(
        map.to_json(&JsonOptions::default()),
        Err(CodecError::CircularReference)
    ));
}

#[test]
fn test_shared_reference_is_written_twice() {
    let shared = list![1];
    let map = attrmap! { "a" => shared.clone(), "b" => shared };
    assert_eq!(map.to_json(&JsonOptions::default()).unwrap(), r#"{"a":[1],"b":[1]}"#);
}

#[test]
fn test_factory_default_unrepresentable() {
    let map = AttrMap::of(Kind::default_factory(DefaultFactory::list()));
    let err = map.to_yaml(&YamlOptions::tagged()).unwrap_err();
    assert!(matches!(err, CodecError::Unrepresentable(name) if name == "DefaultFactoryAttrMap"));
    assert_eq!(map.to_yaml(&YamlOptions::default()).unwrap(), "{}\n");
}
