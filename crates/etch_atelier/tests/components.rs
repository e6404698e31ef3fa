//! Component dispatch: functions, classes, contexts, wrappers and aliases.

use etch_atelier::{
    props, template, ClassComponent, Component, ComponentInstance, Context, Engine, EtchError,
    EtchOptions, Props, RenderContext, RenderOptions, Result, Value,
};
use insta::assert_snapshot;

fn prop(props: &Props, name: &str) -> Value {
    props.get(name).cloned().unwrap_or_default()
}

fn greeting() -> Component {
    Component::function(|props, cx| {
        cx.html(template!["<b>Hello ", "</b>"], vec![prop(props, "name")])
    })
}

#[test]
fn test_function_component() {
    let mut engine = Engine::new();
    engine.register([("Greeting", greeting())]).unwrap();
    let html = engine
        .render_to_string(
            template!["<div><Greeting name=", "/></div>"],
            vec!["Ada".into()],
        )
        .unwrap();
    assert_snapshot!(html, @r#"<div data-reactroot=""><b>Hello <!-- -->Ada</b></div>"#);
}

#[test]
fn test_children_are_passed_as_a_prop() {
    let mut engine = Engine::new();
    engine
        .register([(
            "Card",
            Component::function(|props, cx| {
                cx.html(
                    template!["<section><h1>", "</h1>", "</section>"],
                    vec![prop(props, "title"), prop(props, "children")],
                )
            }),
        )])
        .unwrap();
    let html = engine
        .render_to_string(
            template!["<Card title='T'><p>body ", "</p></Card>"],
            vec!["X".into()],
        )
        .unwrap();
    assert_snapshot!(html, @r#"<section data-reactroot=""><h1>T</h1><p>body <!-- -->X</p></section>"#);
}

#[test]
fn test_mixed_children_form_an_array() {
    let mut engine = Engine::new();
    engine
        .register([(
            "Wrap",
            Component::function(|props, _| {
                assert!(matches!(props.get("children"), Some(Value::Array(items)) if items.len() == 2));
                Ok(prop(props, "children"))
            }),
        )])
        .unwrap();
    let html = engine
        .render_to_string(template!["<i><Wrap>a", "</Wrap></i>"], vec!["b".into()])
        .unwrap();
    assert_eq!(html, r#"<i data-reactroot="">a<!-- -->b</i>"#);
}

#[test]
fn test_key_and_ref_are_not_props() {
    let mut engine = Engine::new();
    engine
        .register([(
            "Keys",
            Component::function(|props, _| {
                let names: Vec<&str> = props.keys().map(|k| k.as_str()).collect();
                Ok(Value::from(names.join(",")))
            }),
        )])
        .unwrap();
    let html = engine
        .render_to_string(
            template!["<Keys key='k' ref=", " ...", " last/>"],
            vec!["r".into(), props! { "a" => 1, "b" => 2 }.into()],
        )
        .unwrap();
    assert_eq!(html, "a,b,last");
}

struct Counter;

struct CounterInstance {
    count: f64,
}

impl ClassComponent for Counter {
    fn construct(&self, props: &Props) -> Box<dyn ComponentInstance> {
        Box::new(CounterInstance {
            count: prop(props, "start").to_number(),
        })
    }
}

impl ComponentInstance for CounterInstance {
    fn component_will_mount(&mut self) {
        self.count += 1.0;
    }

    fn render(&mut self, _props: &Props, cx: &mut RenderContext<'_>) -> Result<Value> {
        cx.html(template!["<span>", "</span>"], vec![self.count.into()])
    }
}

#[test]
fn test_class_component() {
    let mut engine = Engine::new();
    engine.register([("Counter", Component::class(Counter))]).unwrap();
    let html = engine
        .render_to_string(template!["<Counter start=", "/>"], vec![4.into()])
        .unwrap();
    assert_eq!(html, r#"<span data-reactroot="">5</span>"#);
}

#[test]
fn test_context_provider_and_consumer() {
    let theme = Context::new("light");
    let mut engine = Engine::new();
    engine
        .register([
            ("ThemeProvider", theme.provider()),
            ("ThemeConsumer", theme.consumer()),
        ])
        .unwrap();
    let show = Value::function(|args, _| Ok(args.first().cloned().unwrap_or_default()));
    let html = engine
        .render_to_static_markup(
            template![
                "<div><ThemeConsumer>",
                "</ThemeConsumer><ThemeProvider value='dark'><p><ThemeConsumer>",
                "</ThemeConsumer></p></ThemeProvider></div>"
            ],
            vec![show.clone(), show],
        )
        .unwrap();
    assert_eq!(html, "<div>light<p>dark</p></div>");
}

#[test]
fn test_use_context_in_function_component() {
    let locale = Context::new("en");
    let mut engine = Engine::new();
    let reader = locale.clone();
    engine
        .register([
            ("Locale", locale.provider()),
            (
                "Label",
                Component::function(move |_, cx| Ok(cx.use_context(&reader))),
            ),
        ])
        .unwrap();
    let html = engine
        .render_to_static_markup(
            template!["<Locale value=", "><Label/></Locale>"],
            vec!["fr".into()],
        )
        .unwrap();
    assert_eq!(html, "fr");
}

#[test]
fn test_consumer_requires_a_function() {
    let ctx = Context::new(Value::Null);
    let mut engine = Engine::new();
    engine.register([("Use", ctx.consumer())]).unwrap();
    let err = engine
        .render_to_string(template!["<Use>text</Use>"], vec![])
        .unwrap_err();
    assert_eq!(err, EtchError::ConsumerChild);
}

#[test]
fn test_memo_and_forward_ref() {
    let mut engine = Engine::new();
    engine
        .register([
            ("Memo", Component::memo(greeting())),
            (
                "Fancy",
                Component::forward_ref(|props, ref_, cx| {
                    let ref_ = ref_.cloned().unwrap_or(Value::Null);
                    cx.html(
                        template!["<button data-ref=", ">", "</button>"],
                        vec![ref_, prop(props, "label")],
                    )
                }),
            ),
        ])
        .unwrap();
    let html = engine
        .render_to_string(
            template!["<div><Memo name='M'/><Fancy ref=", " label='go'/></div>"],
            vec!["r1".into()],
        )
        .unwrap();
    assert_eq!(
        html,
        r#"<div data-reactroot=""><b>Hello <!-- -->M</b><button data-ref="r1">go</button></div>"#
    );
}

#[test]
fn test_alias_renders_host_element() {
    let mut engine = Engine::new();
    engine.register([("Box", Component::alias("section"))]).unwrap();
    let html = engine
        .render_to_string(template!["<Box className='c'>hi</Box>"], vec![])
        .unwrap();
    assert_eq!(html, r#"<section class="c" data-reactroot="">hi</section>"#);
}

#[test]
fn test_fragment_component() {
    let mut engine = Engine::new();
    engine.register([("Group", Component::Fragment)]).unwrap();
    let html = engine
        .render_to_string(template!["<ul><Group><li>a</li><li>b</li></Group></ul>"], vec![])
        .unwrap();
    assert_eq!(html, r#"<ul data-reactroot=""><li>a</li><li>b</li></ul>"#);
}

#[test]
fn test_builtin_fragment_tag() {
    let html = Engine::new()
        .render_to_string(template!["<Fragment><i>a</i>b</Fragment>"], vec![])
        .unwrap();
    assert_eq!(html, r#"<i data-reactroot="">a</i>b"#);
}

#[test]
fn test_component_return_values() {
    let mut engine = Engine::new();
    engine
        .register([
            ("Nothing", Component::function(|_, _| Ok(Value::Null))),
            (
                "Many",
                Component::function(|_, _| Ok(Value::array(["x", "y"]))),
            ),
        ])
        .unwrap();
    let html = engine
        .render_to_string(template!["<p><Nothing/><Many/></p>"], vec![])
        .unwrap();
    assert_eq!(html, r#"<p data-reactroot="">x<!-- -->y</p>"#);
}

#[test]
fn test_component_errors_propagate() {
    let mut engine = Engine::new();
    engine
        .register([(
            "Broken",
            Component::function(|_, _| Err(EtchError::component("boom"))),
        )])
        .unwrap();
    let err = engine
        .render_to_string(template!["<div><Broken/></div>"], vec![])
        .unwrap_err();
    assert_eq!(err.to_string(), "boom");
}

#[test]
fn test_recursion_limit() {
    let mut engine = Engine::with_options(EtchOptions {
        render: RenderOptions {
            max_depth: 16,
            ..RenderOptions::default()
        },
        ..EtchOptions::default()
    });
    engine
        .register([(
            "Loop",
            Component::function(|_, cx| cx.html(template!["<Loop/>"], vec![])),
        )])
        .unwrap();
    let err = engine
        .render_to_string(template!["<Loop/>"], vec![])
        .unwrap_err();
    assert_eq!(err, EtchError::RecursionLimit { limit: 16 });
}

#[test]
fn test_unknown_component_renders_as_element_until_registered() {
    let mut engine = Engine::new();
    let page = template!["<Later>x</Later>"];
    assert_eq!(
        engine.render_to_string(page, vec![]).unwrap(),
        r#"<Later data-reactroot="">x</Later>"#
    );
    engine
        .register([(
            "Later",
            Component::function(|props, _| Ok(prop(props, "children"))),
        )])
        .unwrap();
    assert_eq!(engine.render_to_string(page, vec![]).unwrap(), "x");
}

#[test]
fn test_reregistration_recompiles_dependents() {
    let mut engine = Engine::new();
    let page = template!["<main><Title/></main>"];
    engine
        .register([(
            "Title",
            Component::function(|_, _| Ok(Value::from("v1"))),
        )])
        .unwrap();
    assert_eq!(
        engine.render_to_string(page, vec![]).unwrap(),
        r#"<main data-reactroot="">v1</main>"#
    );
    engine
        .register([(
            "Title",
            Component::function(|_, _| Ok(Value::from("v2"))),
        )])
        .unwrap();
    assert_eq!(
        engine.render_to_string(page, vec![]).unwrap(),
        r#"<main data-reactroot="">v2</main>"#
    );
}

#[test]
fn test_invalid_registration() {
    let mut engine = Engine::new();
    let err = engine.register([("card", greeting())]).unwrap_err();
    assert_eq!(err, EtchError::InvalidComponentName { name: "card".into() });
}
