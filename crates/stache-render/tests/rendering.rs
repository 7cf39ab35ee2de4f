use proptest::prelude::*;
use serde_json::{json, Value};
use stache_render::{escape_html, parse, render, render_str, ParseError, RenderError};

// Strategy for generating arbitrary JSON data
fn json_data_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9<>&\"' ]*".prop_map(Value::String),
    ];
    leaf.prop_recursive(
        4,  // 4 levels deep
        64, // Max size 64 nodes
        10, // Items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..10).prop_map(Value::Array),
                prop::collection::hash_map("[a-z]{1,6}", inner, 0..10)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        },
    )
}

#[test]
fn list_scenario() {
    let data = json!({"items": [{"name": "A"}, {"name": "B"}]});
    let output = render_str("<div>{{#items}}<li>{{name}}</li>{{/items}}</div>", &data).unwrap();
    assert_eq!(output, "<div><li>A</li><li>B</li></div>");
}

#[test]
fn inverted_scenario() {
    let template = parse("{{^show}}hidden-ok{{/show}}").unwrap();
    assert_eq!(render(&template, &json!({"show": false})), "hidden-ok");
    assert_eq!(render(&template, &json!({"show": true})), "");
}

#[test]
fn escaping_scenario() {
    let data = json!({"k": "<b>"});
    assert_eq!(render_str("{{k}}", &data).unwrap(), "&lt;b&gt;");
    assert_eq!(render_str("{{{k}}}", &data).unwrap(), "<b>");
}

#[test]
fn unbalanced_section_fails_at_parse_time() {
    let err = render_str("<ul>{{#items}}<li>{{name}}</li></ul>", &json!({})).unwrap_err();
    match err {
        RenderError::ParseError(ParseError::UnclosedSection { name, position }) => {
            assert_eq!(name, "items");
            assert_eq!(position.offset, 4);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn standalone_lines_are_removed() {
    let template = "<ul>\n  {{#items}}\n  <li>{{.}}</li>\n  {{/items}}\n</ul>\n";
    let output = render_str(template, &json!({"items": ["a", "b"]})).unwrap();
    assert_eq!(output, "<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>\n");
}

#[test]
fn delimiter_change() {
    let output = render_str("{{=<% %>=}}<% a %> {{a}}<%={{ }}=%> {{a}}", &json!({"a": 1})).unwrap();
    assert_eq!(output, "1 {{a}} 1");
}

proptest! {
    #[test]
    fn directive_free_templates_render_verbatim(text in "[^{}]*", data in json_data_strategy()) {
        let template = parse(&text).unwrap();
        prop_assert_eq!(render(&template, &data), text);
    }

    #[test]
    fn absent_keys_render_empty(key in "[a-z]{1,8}", other in "[A-Z]{1,8}") {
        let mut fields = serde_json::Map::new();
        fields.insert(other, json!("present"));
        let data = Value::Object(fields);
        let template = parse(&format!("{{{{{key}}}}}")).unwrap();
        prop_assert_eq!(render(&template, &data), "");
    }

    #[test]
    fn sections_repeat_per_element_in_order(items in prop::collection::vec("[a-z]{0,5}", 0..8)) {
        let data = json!({ "k": items.clone() });
        let template = parse("{{#k}}<{{.}}>{{/k}}").unwrap();
        let expected: String = items.iter().map(|item| format!("<{}>", item)).collect();
        prop_assert_eq!(render(&template, &data), expected);
    }

    #[test]
    fn rendering_is_idempotent(data in json_data_strategy()) {
        let template = parse("{{#a}}{{b}}{{{c}}}{{/a}}{{^d}}{{.}}{{/d}}{{e.f}}").unwrap();
        let first = render(&template, &data);
        let second = render(&template, &data);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn values_escape_and_raw_does_not(text in any::<String>()) {
        let data = json!({ "k": text.clone() });
        prop_assert_eq!(render_str("{{k}}", &data).unwrap(), escape_html(&text));
        prop_assert_eq!(render_str("{{{k}}}", &data).unwrap(), text);
    }
}
