//! Built-in function dispatch from declarations.
use crate::builder::*;
use crate::*;

fn evaluate(node: Node) -> EvalResult<String> {
    let mut env = Env::new();
    node.evaluate(&mut env, &Scope::new())?.to_css()
}

#[test]
fn test_floor() {
    assert_eq!(evaluate(call("floor", vec![num(4.8)])).unwrap(), "4");
    assert_eq!(evaluate(call("floor", vec![px(4.8)])).unwrap(), "4px");
    assert_eq!(evaluate(call("floor", vec![px(5.49)])).unwrap(), "5px");
    assert_eq!(evaluate(call("floor", vec![percent(50.1)])).unwrap(), "50%");

    let err = evaluate(call("floor", vec![quoted("foo")])).unwrap_err();
    assert_eq!(err.to_string(), "Expected number in function 'floor', found \"foo\"");
}

#[test]
fn test_function_names_are_case_insensitive() {
    assert_eq!(evaluate(call("FLOOR", vec![num(4.8)])).unwrap(), "4");
    assert_eq!(evaluate(call("Rgb", vec![num(0.0), num(0.0), num(0.0)])).unwrap(), "black");
}

#[test]
fn test_rgb_is_opaque_rgba() {
    for (r, g, b) in [(255.0, 0.0, 0.0), (18.0, 52.0, 86.0), (0.0, 0.0, 0.0)] {
        let rgb = evaluate(call("rgb", vec![num(r), num(g), num(b)])).unwrap();
        let rgba = evaluate(call("rgba", vec![num(r), num(g), num(b), num(1.0)])).unwrap();
        assert_eq!(rgb, rgba);
    }
    assert_eq!(
        evaluate(call("rgba", vec![num(0.0), num(0.0), num(0.0), percent(50.0)])).unwrap(),
        "rgba(0, 0, 0, 0.5)"
    );
}

#[test]
fn test_arguments_are_evaluated_first() {
    let css = root(vec![
        var_decl("@base", px(10.0)),
        nested(
            ".a",
            vec![
                decl("width", call("floor", vec![div(var("@base"), num(3.0))])),
                decl("color", call("alpha", vec![color("#ff0000"), percent(50.0)])),
            ],
        ),
    ])
    .to_css(None)
    .unwrap();
    assert_eq!(css, ".a {\n  width: 3px;\n  color: rgba(255, 0, 0, 0.5);\n}\n");
}

#[test]
fn test_unknown_function() {
    let err = root(vec![nested(
        ".a",
        vec![decl("transform", call("rotate", vec![unit(45.0, "deg")]))],
    )])
    .to_css(None)
    .unwrap_err();
    assert_eq!(err.to_string(), "Unknown function 'rotate'");
}

#[test]
fn test_unknown_function_pass_through() {
    let tree = root(vec![nested(
        ".a",
        vec![decl(
            "background",
            call("url", vec![quoted("img.png")]),
        )],
    )]);
    let mut env = Env::with_options(EvalOptions::lenient());
    assert_eq!(
        tree.to_css(Some(&mut env)).unwrap(),
        ".a {\n  background: url(\"img.png\");\n}\n"
    );
}

#[test]
fn test_escape_and_list_functions() {
    assert_eq!(evaluate(call("e", vec![quoted("a b")])).unwrap(), "a b");

    let values = list(vec![px(1.0), px(2.0), px(3.0)]);
    assert_eq!(evaluate(call("length", vec![values.clone()])).unwrap(), "3");
    assert_eq!(evaluate(call("extract", vec![values, num(3.0)])).unwrap(), "3px");
}

#[test]
fn test_color_channel_reads() {
    let teal = color("#336699");
    assert_eq!(evaluate(call("red", vec![teal.clone()])).unwrap(), "51");
    assert_eq!(evaluate(call("blue", vec![teal.clone()])).unwrap(), "153");
    assert_eq!(evaluate(call("hue", vec![teal.clone()])).unwrap(), "210");
    assert_eq!(evaluate(call("saturation", vec![teal.clone()])).unwrap(), "50%");
    assert_eq!(evaluate(call("lightness", vec![teal])).unwrap(), "40%");
}

#[test]
fn test_hsl_and_percentage() {
    assert_eq!(
        evaluate(call("hsl", vec![num(0.0), percent(100.0), percent(50.0)])).unwrap(),
        "red"
    );
    assert_eq!(evaluate(call("percentage", vec![num(0.5)])).unwrap(), "50%");
}
