//! Attribute precedence between static attributes, interpolated values and
//! spread objects.

use etch_atelier::{props, template, Engine, EtchError, Template, Value};
use insta::assert_snapshot;

fn render(template: Template, values: Vec<Value>) -> String {
    Engine::new().render_to_string(template, values).unwrap()
}

#[test]
fn test_spread_after_static() {
    let html = render(
        template!["<img x='keep' ...", "/>"],
        vec![props! { "a" => 1, "b" => 2 }.into()],
    );
    assert_snapshot!(html, @r#"<img x="keep" a="1" b="2" data-reactroot=""/>"#);
}

#[test]
fn test_spread_overrides_colliding_static() {
    let html = render(
        template!["<img x='y' a='overwrite' ...", "/>"],
        vec![props! { "a" => 1, "b" => 2 }.into()],
    );
    assert_snapshot!(html, @r#"<img x="y" a="1" b="2" data-reactroot=""/>"#);
}

#[test]
fn test_later_spread_wins() {
    let html = render(
        template!["<img ...", " ...", "/>"],
        vec![
            props! { "a" => 1, "b" => 2 }.into(),
            props! { "a" => 3, "b" => 4 }.into(),
        ],
    );
    assert_snapshot!(html, @r#"<img a="3" b="4" data-reactroot=""/>"#);
}

#[test]
fn test_static_after_spread_wins() {
    let html = render(
        template!["<div ...", " id='static'></div>"],
        vec![props! { "id" => "spread", "title" => "t" }.into()],
    );
    assert_eq!(html, r#"<div title="t" id="static" data-reactroot=""></div>"#);
}

#[test]
fn test_dynamic_value_after_spread_wins() {
    let html = render(
        template!["<div ...", " id=", "></div>"],
        vec![props! { "id" => "spread" }.into(), "value".into()],
    );
    assert_eq!(html, r#"<div id="value" data-reactroot=""></div>"#);
}

#[test]
fn test_interleaved_spreads() {
    let html = render(
        template!["<img a='1' ...", " b='2' ...", "/>"],
        vec![props! { "a" => 3 }.into(), props! { "b" => 4 }.into()],
    );
    assert_eq!(html, r#"<img a="3" b="4" data-reactroot=""/>"#);
}

#[test]
fn test_spread_of_non_objects() {
    let html = render(
        template!["<hr ...", " ...", " ...", "/>"],
        vec![Value::Null, "str".into(), Value::array([1])],
    );
    assert_eq!(html, r#"<hr data-reactroot=""/>"#);
}

#[test]
fn test_spread_values_follow_attribute_rules() {
    let html = render(
        template!["<input ...", "/>"],
        vec![props! {
            "className" => "field",
            "disabled" => false,
            "onChange" => "x",
            "style" => props! { "marginTop" => 4 },
            "key" => "k",
        }
        .into()],
    );
    assert_eq!(
        html,
        r#"<input class="field" style="margin-top:4px" data-reactroot=""/>"#
    );
}

#[test]
fn test_spread_style_string_is_an_error() {
    let err = Engine::new()
        .render_to_string(
            template!["<div ...", "></div>"],
            vec![props! { "style" => "color:red" }.into()],
        )
        .unwrap_err();
    assert_eq!(err, EtchError::StyleNotObject);
}

#[test]
fn test_spread_children_become_content() {
    let html = render(
        template!["<p ...", "/>"],
        vec![props! { "children" => "from spread" }.into()],
    );
    assert_eq!(html, r#"<p data-reactroot="">from spread</p>"#);
}

#[test]
fn test_spread_children_conflict() {
    let err = Engine::new()
        .render_to_string(
            template!["<div children=", " ...", "></div>"],
            vec![
                "text".into(),
                props! { "dangerouslySetInnerHTML" => props! { "__html" => "<b/>" } }.into(),
            ],
        )
        .unwrap_err();
    assert_eq!(err, EtchError::ChildrenConflict);
    assert_eq!(
        err.to_string(),
        "Can only set one of `children` or `props.dangerouslySetInnerHTML`."
    );
}

#[test]
fn test_spread_children_on_void_element() {
    let err = Engine::new()
        .render_to_string(
            template!["<img ...", "/>"],
            vec![props! { "children" => "x" }.into()],
        )
        .unwrap_err();
    assert_eq!(err, EtchError::VoidElementChildren { tag: "img".into() });
}

#[test]
fn test_dynamic_name_overridden_by_spread() {
    let html = render(
        template!["<input ", " ...", "/>"],
        vec!["disabled".into(), props! { "disabled" => false }.into()],
    );
    assert_eq!(html, r#"<input data-reactroot=""/>"#);
}

#[test]
fn test_spread_content_conflict_in_either_order() {
    let inner = || Value::from(props! { "__html" => "b" });
    for spread in [
        props! { "children" => "a", "dangerouslySetInnerHTML" => inner() },
        props! { "dangerouslySetInnerHTML" => inner(), "children" => "a" },
    ] {
        let err = Engine::new()
            .render_to_string(template!["<div ...", "></div>"], vec![spread.into()])
            .unwrap_err();
        assert_eq!(err, EtchError::ChildrenConflict);
    }
}
