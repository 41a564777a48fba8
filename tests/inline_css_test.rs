//! Stylesheet parsing and style inlining over whole documents

mod common;

use common::create_test_html;
use inline_mailer::{apply_stylesheet, inline, parse, InlineStyleTable};
use proptest::prelude::*;

#[test]
fn test_class_rule_is_inlined() {
    let html = r#"<div class="btn">hi</div>"#;
    let output = apply_stylesheet(html, &parse(".btn { color: red; }"));

    assert!(
        output.contains(r#"<div class="btn" style="color: red;">hi</div>"#),
        "{output}"
    );
}

#[test]
fn test_hover_rule_stays_in_head() {
    let html = create_test_html(r#"<a class="btn" href="/x">go</a>"#);
    let output = apply_stylesheet(&html, &parse(".btn:hover { color: blue; }"));

    assert!(!output.contains("style=\"color: blue;\""), "{output}");
    let head = output.split("</head>").next().unwrap();
    assert!(
        head.contains(r#"<style type="text/css">.btn:hover{color: blue;}</style>"#),
        "{output}"
    );
}

#[test]
fn test_media_query_sends_whole_sheet_to_head() {
    let html = create_test_html(r#"<p class="x">a</p><p class="y">b</p>"#);
    let css = "@media screen { .x{color:red} } .y{color:green}";
    let output = apply_stylesheet(&html, &parse(css));

    assert!(!output.contains("style="), "{output}");
    assert!(output.contains(css), "{output}");
}

#[test]
fn test_rules_apply_in_stylesheet_order() {
    let html =
        create_test_html(r#"<table><tr><td class="cell" style="border: 0">x</td></tr></table>"#);
    let css = "td { padding: 4px; } .cell { color: #333; }";
    let output = apply_stylesheet(&html, &parse(css));

    assert!(
        output.contains(r#"style="border: 0;padding: 4px;color: #333;""#),
        "{output}"
    );
}

#[test]
fn test_selector_lists_and_comments() {
    let html = create_test_html("<h1>a</h1><h2>b</h2>");
    let css = "/* headings */\nh1,\n  h2 {\n  margin: 0;\n}";
    let output = apply_stylesheet(&html, &parse(css));

    assert!(output.contains(r#"<h1 style="margin: 0;">a</h1>"#), "{output}");
    assert!(output.contains(r#"<h2 style="margin: 0;">b</h2>"#), "{output}");
}

#[test]
fn test_fragment_gets_head_block() {
    let table: InlineStyleTable = [("a:hover", "color: red;")].into_iter().collect();
    let output = inline("<p>no head here</p>", &table, "");

    // The parser synthesizes a head for fragments, so the block lands there
    assert!(output.contains("<head><style"), "{output}");
}

#[test]
fn test_empty_table_and_buffer_return_input() {
    let html = "<p>  untouched   markup </p>";
    assert_eq!(inline(html, &InlineStyleTable::new(), ""), html);
}

proptest! {
    #[test]
    fn prop_inline_never_panics(
        html in r#"[a-z<>/="' .#]{0,160}"#,
        css in r"[a-z.#:@{}; ,*>~+()\[\]=-]{0,160}",
    ) {
        let _ = apply_stylesheet(&html, &parse(&css));
    }

    #[test]
    fn prop_every_class_match_gets_declarations(count in 1usize..8) {
        let body: String = (0..count).map(|i| format!("<span class=\"c\">{i}</span>")).collect();
        let output = apply_stylesheet(&create_test_html(&body), &parse(".c { color: red; }"));
        prop_assert_eq!(output.matches("style=\"color: red;\"").count(), count);
    }
}
