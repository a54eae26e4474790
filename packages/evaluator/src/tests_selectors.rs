//! Selector combination and header rendering for nested rulesets.
use crate::builder::*;
use crate::*;

fn compile(rules: Vec<Node>) -> String {
    root(rules).to_css(None).unwrap()
}

fn red() -> Node {
    decl("color", text("red"))
}

#[test]
fn test_parent_reference_pseudo_class() {
    let css = compile(vec![nested("a", vec![nested("&:hover", vec![red()])])]);
    assert_eq!(css, "a:hover {\n  color: red;\n}\n");
}

#[test]
fn test_parent_reference_across_groups() {
    let css = compile(vec![nested(
        "h1, h2, h3",
        vec![nested("a, p", vec![nested("&:hover", vec![red()])])],
    )]);
    assert_eq!(
        css,
        "h1 a:hover,\nh2 a:hover,\nh3 a:hover,\nh1 p:hover,\nh2 p:hover,\nh3 p:hover {\n  color: red;\n}\n"
    );
}

#[test]
fn test_parent_reference_positions() {
    let css = compile(vec![nested(
        "a",
        vec![
            red(),
            nested("&:hover", vec![decl("color", text("blue"))]),
            nested("div &", vec![decl("color", text("green"))]),
            nested("p & span", vec![decl("color", text("yellow"))]),
        ],
    )]);
    assert_eq!(
        css,
        "a {\n  color: red;\n}\na:hover {\n  color: blue;\n}\ndiv a {\n  color: green;\n}\np a span {\n  color: yellow;\n}\n"
    );
}

#[test]
fn test_id_selectors() {
    let css = compile(vec![
        nested("#all", vec![decl("color", text("blue"))]),
        nested("#the", vec![decl("color", text("blue"))]),
        nested("#same", vec![decl("color", text("blue"))]),
    ]);
    assert_eq!(
        css,
        "#all {\n  color: blue;\n}\n#the {\n  color: blue;\n}\n#same {\n  color: blue;\n}\n"
    );
}

#[test]
fn test_tags() {
    let single = compile(vec![nested(
        "td",
        vec![decl("margin", num(0.0)), decl("padding", num(0.0))],
    )]);
    assert_eq!(single, "td {\n  margin: 0;\n  padding: 0;\n}\n");

    let pair = compile(vec![nested(
        "td, input",
        vec![decl("line-height", unit(1.0, "em"))],
    )]);
    assert_eq!(pair, "td, input {\n  line-height: 1em;\n}\n");
}

#[test]
fn test_more_than_three_selectors_wrap() {
    let css = compile(vec![nested(
        "ul, li, div, q, blockquote, textarea",
        vec![decl("margin", num(0.0))],
    )]);
    assert_eq!(
        css,
        "ul,\nli,\ndiv,\nq,\nblockquote,\ntextarea {\n  margin: 0;\n}\n"
    );
}

#[test]
fn test_combinators_in_nested_selectors() {
    let css = compile(vec![nested(
        "#theme",
        vec![
            nested("> .mixin", vec![red()]),
            nested("+ p", vec![red()]),
            nested("~ li", vec![red()]),
        ],
    )]);
    assert_eq!(
        css,
        "#theme > .mixin {\n  color: red;\n}\n#theme + p {\n  color: red;\n}\n#theme ~ li {\n  color: red;\n}\n"
    );
}
