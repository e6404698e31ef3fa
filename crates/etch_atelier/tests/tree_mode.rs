//! Tree mode: templates built into element graphs.

use etch_atelier::{
    props, template, Component, Element, ElementKind, Engine, Value,
};

fn element(value: &Value) -> &Element {
    match value {
        Value::Element(element) => element,
        other => panic!("expected an element, got {}", other.type_name()),
    }
}

#[test]
fn test_single_element() {
    let engine = Engine::new();
    let tree = engine
        .create_element(
            template!["<div id='a' key='k' ref=", ">hi</div>"],
            vec!["r".into()],
        )
        .unwrap();
    let div = element(&tree);
    assert_eq!(div.kind, ElementKind::Host("div".into()));
    assert_eq!(div.key.as_deref(), Some("k"));
    assert_eq!(div.ref_, Some(Value::from("r")));
    assert_eq!(div.props, props! { "id" => "a", "children" => "hi" });
}

#[test]
fn test_several_roots_are_wrapped_in_a_fragment() {
    let engine = Engine::new();
    let tree = engine
        .create_element(template!["<p>a</p>", "<p>b</p>"], vec!["mid".into()])
        .unwrap();
    let fragment = element(&tree);
    assert!(fragment.is_fragment());
    let Some(Value::Array(children)) = fragment.children() else {
        panic!("fragment children should be an array");
    };
    assert_eq!(children.len(), 3);
    assert_eq!(element(&children[0]).tag(), Some("p"));
    assert_eq!(children[1], Value::from("mid"));
    assert_eq!(element(&children[2]).children(), Some(&Value::from("b")));
}

#[test]
fn test_empty_and_text_templates() {
    let engine = Engine::new();
    assert_eq!(engine.create_element(template![""], vec![]).unwrap(), Value::Null);
    assert_eq!(
        engine.create_element(template!["just text"], vec![]).unwrap(),
        Value::from("just text")
    );
}

#[test]
fn test_duplicate_attributes_keep_the_last() {
    let engine = Engine::new();
    let tree = engine
        .create_element(template!["<a x='1' y='2' x='3'/>"], vec![])
        .unwrap();
    let a = element(&tree);
    assert_eq!(a.props, props! { "x" => "3", "y" => "2" });
    assert_eq!(a.children(), None);
}

#[test]
fn test_spreads_and_dynamic_names() {
    let engine = Engine::new();
    let tree = engine
        .create_element(
            template!["<input a='1' ...", " ", " b=", "/>"],
            vec![
                props! { "a" => 2, "key" => 7 }.into(),
                "checked".into(),
                Value::Null,
            ],
        )
        .unwrap();
    let input = element(&tree);
    assert_eq!(input.key.as_deref(), Some("7"));
    assert_eq!(
        input.props,
        props! { "a" => 2, "checked" => true, "b" => Value::Null }
    );
}

#[test]
fn test_slot_values_are_kept_as_is() {
    let engine = Engine::new();
    let handler = Value::function(|_, _| Ok(Value::Null));
    let tree = engine
        .create_element(
            template!["<button onClick=", ">", "</button>"],
            vec![handler.clone(), Value::array([1, 2])],
        )
        .unwrap();
    let button = element(&tree);
    assert_eq!(button.props.get("onClick"), Some(&handler));
    assert_eq!(button.children(), Some(&Value::array([1, 2])));
}

#[test]
fn test_components_and_fragments() {
    let mut engine = Engine::new();
    let card = Component::function(|props, _| Ok(props.get("children").cloned().unwrap_or_default()));
    engine.register([("Card", card.clone())]).unwrap();
    let tree = engine
        .create_element(template!["<Card><>a<b/></></Card>"], vec![])
        .unwrap();
    let node = element(&tree);
    assert_eq!(node.kind, ElementKind::Component(card));
    let fragment = element(node.children().unwrap());
    assert!(fragment.is_fragment());
    let Some(Value::Array(children)) = fragment.children() else {
        panic!("fragment children should be an array");
    };
    assert_eq!(children[0], Value::from("a"));
    assert_eq!(element(&children[1]).tag(), Some("b"));
}

#[test]
fn test_element_graph_renders_like_the_template() {
    let mut engine = Engine::new();
    engine
        .register([(
            "Label",
            Component::function(|props, cx| {
                cx.html(
                    template!["<label>", "</label>"],
                    vec![props.get("text").cloned().unwrap_or_default()],
                )
            }),
        )])
        .unwrap();
    let page = template!["<form className='f'><Label text=", "/><input value=", "/></form>"];
    let values = || vec![Value::from("Name"), Value::from("Ada")];
    let tree = engine.create_element(page, values()).unwrap();
    let from_tree = engine.render_element_to_string(&tree).unwrap();
    let direct = engine.render_to_string(page, values()).unwrap();
    assert_eq!(from_tree, direct);
    assert_eq!(
        direct,
        r#"<form class="f" data-reactroot=""><label>Name</label><input value="Ada"/></form>"#
    );
}

#[test]
fn test_hand_built_elements() {
    let engine = Engine::new();
    let list = Element::host(
        "ul",
        props! {
            "className" => "list",
            "children" => Value::array([
                Value::from(Element::host("li", props! { "children" => "one" })),
                Value::from(Element::host("li", props! { "children" => "two" })),
            ]),
        },
    );
    let html = engine
        .render_element_to_static_markup(&Value::from(list))
        .unwrap();
    assert_eq!(html, r#"<ul class="list"><li>one</li><li>two</li></ul>"#);
}

#[test]
fn test_last_assignment_wins_as_a_prop() {
    let tree = Engine::new()
        .create_element(template!["<p b='a' b=", " b='y'/>"], vec!["x".into()])
        .unwrap();
    assert_eq!(element(&tree).props.get("b"), Some(&Value::from("y")));
}
