//! Output shape of rendered trees: blocks, root lines, comments, imports.
use crate::builder::*;
use crate::*;
use std::collections::HashMap;
use std::rc::Rc;

fn compile(rules: Vec<Node>) -> String {
    root(rules).to_css(None).unwrap()
}

fn env_with_imports(imports: Vec<(&str, Rc<Ruleset>)>) -> Env {
    let table: HashMap<String, Rc<Ruleset>> = imports
        .into_iter()
        .map(|(path, tree)| (path.to_string(), tree))
        .collect();
    Env::new().with_importer(table)
}

#[test]
fn test_empty_root() {
    assert_eq!(compile(vec![]), "");
}

#[test]
fn test_ruleset_with_only_nested_rulesets_has_no_block() {
    let css = compile(vec![nested(
        "#outer",
        vec![nested(".inner", vec![decl("color", text("red"))])],
    )]);
    assert_eq!(css, "#outer .inner {\n  color: red;\n}\n");
}

#[test]
fn test_empty_ruleset_is_skipped() {
    let css = compile(vec![
        nested(".empty", vec![]),
        nested(".vars-only", vec![var_decl("@a", px(1.0))]),
        nested(".full", vec![decl("margin", num(0.0))]),
    ]);
    assert_eq!(css, ".full {\n  margin: 0;\n}\n");
}

#[test]
fn test_root_lines_come_before_rulesets() {
    let css = compile(vec![
        nested(".a", vec![decl("color", text("red"))]),
        text("@charset \"utf-8\";"),
    ]);
    assert_eq!(css, "@charset \"utf-8\";\n.a {\n  color: red;\n}\n");
}

#[test]
fn test_important_and_text_values() {
    let css = compile(vec![nested(
        ".a",
        vec![
            important("color", text("red")),
            decl("font", expr(vec![px(12.0), text("/"), num(1.5), text("serif")])),
            decl("font-family", list(vec![quoted("Helvetica Neue"), text("sans-serif")])),
        ],
    )]);
    assert_eq!(
        css,
        ".a {\n  color: red !important;\n  font: 12px / 1.5 serif;\n  font-family: \"Helvetica Neue\", sans-serif;\n}\n"
    );
}

#[test]
fn test_definitions_are_not_rendered() {
    let css = compile(vec![definition(
        ".mixin",
        vec![param("@a", px(1.0))],
        vec![decl("width", var("@a"))],
    )]);
    assert_eq!(css, "");
}

#[test]
fn test_variables_resolve_through_nesting() {
    let css = compile(vec![
        var_decl("@color", color("#336699")),
        var_decl("@width", px(10.0)),
        nested(
            ".a",
            vec![
                var_decl("@width", px(20.0)),
                decl("color", var("@color")),
                nested(".b", vec![decl("width", var("@width"))]),
            ],
        ),
    ]);
    assert_eq!(css, ".a {\n  color: #336699;\n}\n.a .b {\n  width: 20px;\n}\n");
}

#[test]
fn test_undefined_variable() {
    let err = root(vec![nested(".a", vec![decl("width", var("@nope"))])])
        .to_css(None)
        .unwrap_err();
    assert_eq!(err.to_string(), "variable @nope is undefined");
}

#[test]
fn test_imports_are_expanded() {
    let library = root(vec![
        var_decl("@brand", color("#ff0000")),
        nested(".button", vec![decl("color", var("@brand"))]),
    ]);
    let tree = root(vec![
        import("library.less"),
        nested(".cta", vec![mixin_call(".button")]),
    ]);
    let mut env = env_with_imports(vec![("library.less", library)]);
    assert_eq!(
        tree.to_css(Some(&mut env)).unwrap(),
        ".button {\n  color: #ff0000;\n}\n.cta {\n  color: #ff0000;\n}\n"
    );
}

#[test]
fn test_nested_imports_are_expanded() {
    let colors = root(vec![var_decl("@fg", text("navy"))]);
    let theme = root(vec![import("colors.less"), nested(".t", vec![decl("color", var("@fg"))])]);
    let tree = root(vec![import("theme.less")]);
    let mut env = env_with_imports(vec![("colors.less", colors), ("theme.less", theme)]);
    assert_eq!(tree.to_css(Some(&mut env)).unwrap(), ".t {\n  color: navy;\n}\n");
}

#[test]
fn test_css_imports_stay_in_output() {
    let tree = root(vec![
        import("reset.css"),
        nested(".a", vec![decl("margin", num(0.0))]),
    ]);
    assert_eq!(
        tree.to_css(None).unwrap(),
        "@import \"reset.css\";\n.a {\n  margin: 0;\n}\n"
    );
}

#[test]
fn test_missing_import() {
    let err = root(vec![import("missing.less")]).to_css(None).unwrap_err();
    assert_eq!(
        err,
        EvalError::ImportNotFound {
            path: "missing.less".to_string()
        }
    );
}

#[test]
fn test_self_import_hits_depth_limit() {
    let looping = root(vec![import("loop.less")]);
    let tree = root(vec![import("loop.less")]);
    let mut env = env_with_imports(vec![("loop.less", looping)]);
    let err = tree.to_css(Some(&mut env)).unwrap_err();
    assert!(matches!(err, EvalError::RecursionLimit { ref context, .. } if context == "loop.less"));
}

#[test]
fn test_rendering_a_mixin_call_directly_is_not_supported() {
    let err = mixin_call(".a").to_css().unwrap_err();
    assert_eq!(err, EvalError::NotSupported { node: "mixin call" });
    assert_eq!(err.to_string(), "Rendering is not supported for mixin call");
}

#[test]
fn test_env_can_be_reused_between_compiles() {
    let tree = root(vec![nested(".a", vec![decl("width", add(px(1.0), px(2.0)))])]);
    let mut env = Env::new();
    let first = tree.to_css(Some(&mut env)).unwrap();
    let second = tree.to_css(Some(&mut env)).unwrap();
    assert_eq!(first, second);
    assert_eq!(env.depth(), 0);
}
