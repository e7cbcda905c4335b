//! Integration tests for the inline formatter

use docmark_core::{format, to_markup, Span};
use pretty_assertions::assert_eq;

fn text(s: &str) -> Span<'_> {
    Span::Text(s.into())
}

fn bold(s: &str) -> Span<'_> {
    Span::Bold(s.into())
}

fn code(s: &str) -> Span<'_> {
    Span::Code(s.into())
}

fn link<'a>(label: &'a str, href: &'a str) -> Span<'a> {
    Span::Link {
        label: label.into(),
        href: href.into(),
    }
}

// ============================================================================
// Basic Patterns
// ============================================================================

#[test]
fn test_plain_text() {
    assert_eq!(format("just words"), vec![text("just words")]);
}

#[test]
fn test_empty_text() {
    assert!(format("").is_empty());
}

#[test]
fn test_bold_and_code_in_sentence() {
    assert_eq!(
        format("Some **bold** and `code`."),
        vec![
            text("Some "),
            bold("bold"),
            text(" and "),
            code("code"),
            text("."),
        ]
    );
}

#[test]
fn test_link_then_bold() {
    assert_eq!(
        format("[Docs](https://x.test) and **bold**"),
        vec![link("Docs", "https://x.test"), text(" and "), bold("bold")]
    );
}

#[test]
fn test_two_bold_runs_stay_separate() {
    assert_eq!(
        format("**a** and **b**"),
        vec![bold("a"), text(" and "), bold("b")]
    );
}

#[test]
fn test_adjacent_spans_are_not_merged() {
    assert_eq!(
        format("**a****b**`c``d`"),
        vec![bold("a"), bold("b"), code("c"), code("d")]
    );
}

#[test]
fn test_link_label_and_href_are_verbatim() {
    assert_eq!(
        format("[**not bold**](https://x.test/a_(b)"),
        vec![link("**not bold**", "https://x.test/a_(b")]
    );
}

// ============================================================================
// Precedence
// ============================================================================

#[test]
fn test_link_found_after_bold_is_taken_first() {
    // The bold before the link is still bold: link prefixes are re-scanned.
    assert_eq!(
        format("**a** then [b](c)"),
        vec![bold("a"), text(" then "), link("b", "c")]
    );
}

#[test]
fn test_link_prefix_is_not_scanned_for_links() {
    assert_eq!(
        format("[x] `y` [z](w)"),
        vec![text("[x] "), code("y"), text(" "), link("z", "w")]
    );
}

#[test]
fn test_bold_round_leaves_earlier_code_as_text() {
    // Bold is searched across the whole remainder before code, so the code
    // span sitting in front of it is swallowed into the plain prefix.
    assert_eq!(
        format("`a` then **b**"),
        vec![text("`a` then "), bold("b")]
    );
}

#[test]
fn test_code_after_last_bold_is_found() {
    assert_eq!(
        format("**b** then `a`"),
        vec![bold("b"), text(" then "), code("a")]
    );
}

#[test]
fn test_bold_inside_code_wins_over_code() {
    assert_eq!(
        format("`x **y** z`"),
        vec![text("`x "), bold("y"), text(" z`")]
    );
}

// ============================================================================
// Malformed Markup
// ============================================================================

#[test]
fn test_unmatched_bold_is_literal() {
    assert_eq!(format("a ** b"), vec![text("a ** b")]);
    assert_eq!(format("**open"), vec![text("**open")]);
}

#[test]
fn test_empty_delimiters_are_literal() {
    assert_eq!(format("****"), vec![text("****")]);
    assert_eq!(format("``"), vec![text("``")]);
    assert_eq!(format("[]()"), vec![text("[]()")]);
}

#[test]
fn test_bold_content_may_contain_star() {
    assert_eq!(format("**a*b**"), vec![bold("a*b")]);
    assert_eq!(
        format("Compute **2*3** now"),
        vec![text("Compute "), bold("2*3"), text(" now")]
    );
}

#[test]
fn test_triple_star_closes_at_first_pair() {
    assert_eq!(format("***a***"), vec![bold("*a"), text("*")]);
}

#[test]
fn test_code_content_may_start_with_backtick() {
    assert_eq!(format("``x`"), vec![code("`x")]);
    assert_eq!(
        format("run ``ls` then `pwd`"),
        vec![text("run "), code("`ls"), text(" then "), code("pwd")]
    );
}

#[test]
fn test_bold_stops_at_first_closer() {
    assert_eq!(format("**a**b**"), vec![bold("a"), text("b**")]);
}

#[test]
fn test_unclosed_link_falls_back_to_other_patterns() {
    assert_eq!(
        format("[label](no close **b**"),
        vec![text("[label](no close "), bold("b")]
    );
}

#[test]
fn test_non_ascii_text_is_preserved() {
    assert_eq!(
        format("héllo **wörld** → `ß`"),
        vec![text("héllo "), bold("wörld"), text(" → "), code("ß")]
    );
}

// ============================================================================
// Span Helpers
// ============================================================================

#[test]
fn test_to_markup_reinserts_delimiters() {
    let input = "a [l](h) **b** `c` d";
    assert_eq!(to_markup(&format(input)), input);
}

#[test]
fn test_span_content_and_names() {
    let spans = format("[l](h)**b**");
    let names: Vec<&str> = spans.iter().map(Span::name).collect();
    let contents: Vec<&str> = spans.iter().map(Span::content).collect();
    assert_eq!(names, vec!["Link", "Bold"]);
    assert_eq!(contents, vec!["l", "b"]);
}

#[test]
fn test_span_into_owned() {
    let owned: Vec<Span<'static>> = {
        let input = String::from("x `y`");
        format(&input).into_iter().map(Span::into_owned).collect()
    };
    assert_eq!(owned, vec![text("x "), code("y")]);
}
