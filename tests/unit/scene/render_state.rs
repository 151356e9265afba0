use super::*;

#[test]
fn nested_paths_resolve() {
    let mut s = RenderState::new();
    s.set_text("id", "hook");
    let logo = s.group_mut("elements").group_mut("logo");
    logo.set_number("opacity", 0.5);
    logo.set_text("asset", "screenshot");

    assert_eq!(s.number_at(&["elements", "logo", "opacity"]), Some(0.5));
    assert_eq!(s.text_at(&["elements", "logo", "asset"]), Some("screenshot"));
    assert_eq!(s.text_at(&["id"]), Some("hook"));
    assert_eq!(s.number_at(&["elements", "missing", "opacity"]), None);
    assert_eq!(s.number_at(&["id", "deeper"]), None);
    assert_eq!(s.path(&[]), None);
}

#[test]
fn group_mut_replaces_leaf() {
    let mut s = RenderState::new();
    s.set_number("camera", 1.0);
    s.group_mut("camera").set_number("scale", 1.02);
    assert_eq!(s.number_at(&["camera", "scale"]), Some(1.02));
}

#[test]
fn serializes_as_plain_json_tree() {
    let mut s = RenderState::new();
    s.set_number("b", 2.0);
    s.set_number("a", 1.0);
    s.group_mut("g").set_text("kind", "fade_in_words");
    let json = serde_json::to_string(&s).unwrap();
    assert_eq!(json, r#"{"a":1.0,"b":2.0,"g":{"kind":"fade_in_words"}}"#);

    let back: RenderState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, s);
}
