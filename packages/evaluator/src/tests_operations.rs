//! Arithmetic on numbers and colors inside declarations.
use crate::builder::*;
use crate::*;

fn compile(rules: Vec<Node>) -> String {
    root(rules).to_css(None).unwrap()
}

#[test]
fn test_number_operations() {
    // 10px / 2px + 6px - 1px * 2
    let height = sub(
        add(div(px(10.0), px(2.0)), px(6.0)),
        mul(px(1.0), num(2.0)),
    );
    // 2 * 4 - 5em
    let width = sub(mul(num(2.0), num(4.0)), unit(5.0, "em"));

    let css = compile(vec![nested(
        "#operations",
        vec![
            decl(
                "color",
                add(add(color("#110000"), color("#000011")), color("#001100")),
            ),
            decl("height", height.clone()),
            decl("width", width.clone()),
            nested(".spacing", vec![decl("height", height), decl("width", width)]),
        ],
    )]);
    assert_eq!(
        css,
        "#operations {\n  color: #111111;\n  height: 9px;\n  width: 3em;\n}\n#operations .spacing {\n  height: 9px;\n  width: 3em;\n}\n"
    );
}

#[test]
fn test_operations_with_variables() {
    let css = compile(vec![
        var_decl("@x", num(4.0)),
        var_decl("@y", unit(12.0, "em")),
        nested(
            ".with-variables",
            vec![
                decl("height", add(var("@x"), var("@y"))),
                decl("width", add(num(12.0), var("@y"))),
                decl("size", sub(unit(5.0, "cm"), var("@x"))),
            ],
        ),
        var_decl("@z", num(-2.0)),
        nested(
            ".negative",
            vec![
                decl("height", add(px(2.0), var("@z"))),
                decl("width", sub(px(2.0), var("@z"))),
            ],
        ),
    ]);
    assert_eq!(
        css,
        ".with-variables {\n  height: 16em;\n  width: 24em;\n  size: 1cm;\n}\n.negative {\n  height: 0px;\n  width: 4px;\n}\n"
    );
}

#[test]
fn test_shorthand_values_render_as_written() {
    let css = compile(vec![nested(
        ".shorthands",
        vec![decl(
            "padding",
            expr(vec![px(-1.0), px(2.0), num(0.0), px(-4.0)]),
        )],
    )]);
    assert_eq!(css, ".shorthands {\n  padding: -1px 2px 0 -4px;\n}\n");
}

#[test]
fn test_color_operations() {
    let css = compile(vec![nested(
        ".colors",
        vec![
            decl("color", color("#123")),
            decl("border-color", add(color("#234"), color("#111111"))),
            decl("background-color", sub(color("#222222"), color("#fff"))),
            nested(
                ".other",
                vec![
                    decl("color", mul(num(2.0), color("#111"))),
                    decl(
                        "border-color",
                        add(div(color("#333333"), num(3.0)), color("#111")),
                    ),
                ],
            ),
        ],
    )]);
    assert_eq!(
        css,
        ".colors {\n  color: #123;\n  border-color: #334455;\n  background-color: black;\n}\n.colors .other {\n  color: #222222;\n  border-color: #222222;\n}\n"
    );
}

#[test]
fn test_division_by_zero() {
    let err = root(vec![nested(".a", vec![decl("width", div(px(1.0), num(0.0)))])])
        .to_css(None)
        .unwrap_err();
    assert_eq!(err.to_string(), "Division by zero");
}

#[test]
fn test_operation_on_keyword_is_rejected() {
    let err = root(vec![nested(
        ".a",
        vec![decl("width", add(px(1.0), text("auto")))],
    )])
    .to_css(None)
    .unwrap_err();
    assert_eq!(err.to_string(), "Cannot apply operator '+' to 1px and auto");
}
