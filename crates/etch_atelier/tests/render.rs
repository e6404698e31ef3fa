//! String rendering of host elements.

use etch_atelier::{
    props, template, Engine, EtchOptions, RenderOptions, Template, Value,
};
use insta::assert_snapshot;

fn render(template: Template, values: Vec<Value>) -> String {
    Engine::new().render_to_string(template, values).unwrap()
}

#[test]
fn test_static_template() {
    let html = render(
        template![r#"<div class="a"><span>hi</span><br/></div>"#],
        vec![],
    );
    assert_snapshot!(html, @r#"<div class="a" data-reactroot=""><span>hi</span><br/></div>"#);
}

#[test]
fn test_single_quotes_become_double() {
    let html = render(template!["<a href='/x' title=y>go</a>"], vec![]);
    assert_eq!(html, r#"<a href="/x" title="y" data-reactroot="">go</a>"#);
}

#[test]
fn test_adjacent_text_is_separated() {
    let html = render(
        template!["<div>", "", "", "z</div>"],
        vec!["w".into(), "x".into(), "y".into()],
    );
    assert_snapshot!(html, @r#"<div data-reactroot="">w<!-- -->x<!-- -->y<!-- -->z</div>"#);
}

#[test]
fn test_static_markup_has_no_separators_or_marker() {
    let engine = Engine::new();
    let html = engine
        .render_to_static_markup(
            template!["<div>", "", "!</div>"],
            vec!["a".into(), 1.into()],
        )
        .unwrap();
    assert_eq!(html, "<div>a1!</div>");
}

#[test]
fn test_root_marker_can_be_disabled() {
    let engine = Engine::with_options(EtchOptions {
        render: RenderOptions {
            root_marker: false,
            ..RenderOptions::default()
        },
        ..EtchOptions::default()
    });
    let html = engine
        .render_to_string(template!["<p>", "</p>"], vec!["a".into()])
        .unwrap();
    assert_eq!(html, "<p>a</p>");
}

#[test]
fn test_escaping() {
    let html = render(
        template!["<p title=", ">", "</p>"],
        vec!["a<b\"c'".into(), "<&>".into()],
    );
    assert_snapshot!(html, @r#"<p title="a&lt;b&quot;c&#x27;" data-reactroot="">&lt;&amp;&gt;</p>"#);
}

#[test]
fn test_child_values() {
    let html = render(
        template!["<ul>", "", "", "", "", "</ul>"],
        vec![
            Value::Null,
            false.into(),
            Value::array([1, 2]),
            Value::object([("a", 1)]),
            Value::function(|_, _| Ok(Value::Null)),
        ],
    );
    assert_eq!(
        html,
        r#"<ul data-reactroot="">1<!-- -->2<!-- -->[object Object]</ul>"#
    );
}

#[test]
fn test_numbers_render_like_script() {
    let html = render(
        template!["<i>", "</i><b>", "</b><s>", "</s>"],
        vec![1.5.into(), (-0.0).into(), 1e21.into()],
    );
    assert_eq!(
        html,
        r#"<i data-reactroot="">1.5</i><b>0</b><s>1e+21</s>"#
    );
}

#[test]
fn test_void_elements() {
    let html = render(template![r#"<p><img src="a.png"><br></p>"#], vec![]);
    assert_eq!(html, r#"<p data-reactroot=""><img src="a.png"/><br/></p>"#);
}

#[test]
fn test_style_object() {
    let style = props! { "color" => "red", "fontSize" => 12, "lineHeight" => 1.5 };
    let html = render(template!["<div style=", "></div>"], vec![style.into()]);
    assert_snapshot!(html, @r#"<div style="color:red;font-size:12px;line-height:1.5" data-reactroot=""></div>"#);
}

#[test]
fn test_null_style_is_omitted() {
    let html = render(template!["<div style=", "></div>"], vec![Value::Null]);
    assert_eq!(html, r#"<div data-reactroot=""></div>"#);
}

#[test]
fn test_attribute_rules() {
    let html = render(
        template![
            "<div className=",
            " hidden=",
            " tabIndex=",
            " onClick=",
            " data-ok=",
            " title=",
            "></div>"
        ],
        vec![
            "box".into(),
            false.into(),
            0.into(),
            "alert(1)".into(),
            true.into(),
            true.into(),
        ],
    );
    assert_eq!(
        html,
        r#"<div class="box" tabindex="0" data-ok="true" data-reactroot=""></div>"#
    );
}

#[test]
fn test_bare_attributes() {
    let html = render(template!["<input disabled readOnly/>"], vec![]);
    assert_eq!(html, r#"<input disabled="" readonly="" data-reactroot=""/>"#);
}

#[test]
fn test_dynamic_boolean() {
    let html = render(template!["<input disabled=", "/>"], vec![true.into()]);
    assert_snapshot!(html, @r#"<input disabled="" data-reactroot=""/>"#);
}

#[test]
fn test_dynamic_attribute_names() {
    let html = render(
        template!["<button ", " ", ">go</button>"],
        vec!["disabled".into(), Value::Null],
    );
    assert_eq!(html, r#"<button disabled="" data-reactroot="">go</button>"#);
}

#[test]
fn test_pre_keeps_leading_newline() {
    let html = render(template!["<pre>", "</pre>"], vec!["\nline".into()]);
    assert_eq!(html, "<pre data-reactroot=\"\">\n\nline</pre>");
}

#[test]
fn test_top_level_fragment_marks_first_element() {
    let html = render(template!["<><p>a</p><p>b</p></>"], vec![]);
    assert_eq!(html, r#"<p data-reactroot="">a</p><p>b</p>"#);
}

#[test]
fn test_inner_html() {
    let html = render(
        template!["<div dangerouslySetInnerHTML=", "></div>"],
        vec![props! { "__html" => "<b>raw</b>" }.into()],
    );
    assert_eq!(html, r#"<div data-reactroot=""><b>raw</b></div>"#);
}

#[test]
fn test_children_attribute() {
    let html = render(template!["<p children=", "/>"], vec!["from prop".into()]);
    assert_eq!(html, r#"<p data-reactroot="">from prop</p>"#);
}

#[test]
fn test_nested_children_win_over_children_attribute() {
    let html = render(template!["<p children=", ">nested</p>"], vec!["ignored".into()]);
    assert_eq!(html, r#"<p data-reactroot="">nested</p>"#);
}

#[test]
fn test_indentation_is_dropped() {
    let html = render(
        template!["
        <ul>
            <li>a</li>
            <li>
                b c
            </li>
        </ul>
    "],
        vec![],
    );
    assert_eq!(html, r#"<ul data-reactroot=""><li>a</li><li>b c</li></ul>"#);
}

#[test]
fn test_entities_are_decoded_then_escaped() {
    let html = render(template!["<p>a &amp; b &lt;c&gt;</p>"], vec![]);
    assert_eq!(html, r#"<p data-reactroot="">a &amp; b &lt;c&gt;</p>"#);
}

#[test]
fn test_comments_are_skipped() {
    let html = render(template!["<p><!-- note ", " -->x</p>"], vec!["hidden".into()]);
    assert_eq!(html, r#"<p data-reactroot="">x</p>"#);
}

#[test]
fn test_custom_elements_keep_names() {
    let html = render(
        template![r#"<my-card className="x" foo="#, "></my-card>"],
        vec![true.into()],
    );
    assert_eq!(
        html,
        r#"<my-card className="x" foo="true" data-reactroot=""></my-card>"#
    );
}

#[test]
fn test_nested_markup_values() {
    let engine = Engine::new();
    let item = engine
        .html(template!["<li>", "</li>"], vec!["one".into()])
        .unwrap();
    let html = engine
        .render_to_string(template!["<ul>", "</ul>"], vec![Value::array([item])])
        .unwrap();
    assert_eq!(html, r#"<ul data-reactroot=""><li>one</li></ul>"#);
}

#[test]
fn test_render_fragments_is_uncached() {
    let engine = Engine::new();
    let html = engine
        .render_fragments(&["<b>", "</b>"], vec!["x".into()])
        .unwrap();
    assert_eq!(html, r#"<b data-reactroot="">x</b>"#);
    assert_eq!(engine.cached_templates(), 0);
}

#[test]
fn test_post_plugins_see_output() {
    let mut engine = Engine::new();
    engine
        .plugins_mut()
        .pre(|values| {
            values
                .into_iter()
                .map(|v| Value::from(v.to_js_string().to_uppercase()))
                .collect()
        })
        .post(|html| format!("<!DOCTYPE html>{html}"));
    let html = engine
        .render_to_static_markup(template!["<p>", "</p>"], vec!["hi".into()])
        .unwrap();
    assert_eq!(html, "<!DOCTYPE html><p>HI</p>");
}

#[test]
fn test_duplicate_attributes_keep_source_order() {
    let html = render(template!["<p b='a' b=", " b='y'></p>"], vec!["x".into()]);
    assert_eq!(html, r#"<p b="a" b="x" b="y" data-reactroot=""></p>"#);
}

#[test]
fn test_void_and_empty_element_forms() {
    for page in [template!["<img></img>"], template!["<img/>"], template!["<img>"]] {
        assert_eq!(render(page, vec![]), r#"<img data-reactroot=""/>"#);
    }
    for page in [template!["<div></div>"], template!["<div/>"]] {
        assert_eq!(render(page, vec![]), r#"<div data-reactroot=""></div>"#);
    }
}
