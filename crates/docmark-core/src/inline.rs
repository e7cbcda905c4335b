//! Inline formatter.
//!
//! Turns the raw inline text of a block into [`Span`]s. The grammar is flat:
//! links `[label](href)`, bold `**text**` and inline code `` `text` ``, none
//! of which nest.
//!
//! Matching works on the remainder of the text in a loop. Each round tries
//! the three patterns in a fixed order, each one against the whole
//! remainder:
//!
//! 1. the leftmost link; text before it is formatted again with links off
//! 2. otherwise the leftmost bold; text before it stays plain
//! 3. otherwise the leftmost code span; text before it stays plain
//!
//! So `**a** [b](c)` yields a link first and re-scans `**a** ` for bold,
//! while `` `a` **b** `` keeps `` `a` `` as plain text because bold wins
//! the round. Delimiters are ASCII, so every match boundary is a char
//! boundary and spans borrow straight from the input.

use std::borrow::Cow;

use memchr::{memchr, memchr_iter, memmem};

use crate::ast::CowStr;

/// Inline-level nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span<'a> {
    /// Plain text, verbatim.
    Text(CowStr<'a>),
    /// Content of `**...**`.
    Bold(CowStr<'a>),
    /// Content of `` `...` ``, never formatted further.
    Code(CowStr<'a>),
    /// `[label](href)`.
    Link {
        /// Visible link text.
        label: CowStr<'a>,
        /// Link destination, unvalidated.
        href: CowStr<'a>,
    },
}

impl<'a> Span<'a> {
    /// Short name of the span variant.
    pub fn name(&self) -> &'static str {
        match self {
            Span::Text(_) => "Text",
            Span::Bold(_) => "Bold",
            Span::Code(_) => "Code",
            Span::Link { .. } => "Link",
        }
    }

    /// Visible text of the span: the content, or the label for links.
    pub fn content(&self) -> &str {
        match self {
            Span::Text(s) | Span::Bold(s) | Span::Code(s) => s,
            Span::Link { label, .. } => label,
        }
    }

    /// Write the span back out with its delimiters.
    pub fn write_markup(&self, out: &mut String) {
        match self {
            Span::Text(s) => out.push_str(s),
            Span::Bold(s) => {
                out.push_str("**");
                out.push_str(s);
                out.push_str("**");
            }
            Span::Code(s) => {
                out.push('`');
                out.push_str(s);
                out.push('`');
            }
            Span::Link { label, href } => {
                out.push('[');
                out.push_str(label);
                out.push_str("](");
                out.push_str(href);
                out.push(')');
            }
        }
    }

    /// Detach the span from the input buffer.
    pub fn into_owned(self) -> Span<'static> {
        match self {
            Span::Text(s) => Span::Text(Cow::Owned(s.into_owned())),
            Span::Bold(s) => Span::Bold(Cow::Owned(s.into_owned())),
            Span::Code(s) => Span::Code(Cow::Owned(s.into_owned())),
            Span::Link { label, href } => Span::Link {
                label: Cow::Owned(label.into_owned()),
                href: Cow::Owned(href.into_owned()),
            },
        }
    }
}

/// Format raw inline text into spans.
///
/// Total and deterministic: unmatched delimiters stay in `Text` spans and
/// empty text between matches produces no span.
///
/// ```rust
/// use docmark_core::inline::{format, Span};
///
/// let spans = format("[Docs](https://x.test) and **bold**");
/// assert_eq!(spans.len(), 3);
/// assert_eq!(spans[1], Span::Text(" and ".into()));
/// ```
pub fn format(text: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::with_capacity(4);
    format_into(text, true, &mut spans);
    spans
}

/// Rebuild the markup a span sequence was formatted from.
///
/// For any `s`, `to_markup(&format(s)) == s`.
pub fn to_markup(spans: &[Span<'_>]) -> String {
    let mut out = String::new();
    for span in spans {
        span.write_markup(&mut out);
    }
    out
}

/// A pattern hit splitting the text into three parts.
#[derive(Debug, PartialEq, Eq)]
struct Match<'a> {
    prefix: &'a str,
    span: Span<'a>,
    suffix: &'a str,
}

fn format_into<'a>(text: &'a str, links: bool, out: &mut Vec<Span<'a>>) {
    let mut remaining = text;

    while !remaining.is_empty() {
        if links {
            if let Some(m) = try_match_link(remaining) {
                // Link-like text in the prefix stays literal.
                format_into(m.prefix, false, out);
                out.push(m.span);
                remaining = m.suffix;
                continue;
            }
        }

        match try_match_bold(remaining).or_else(|| try_match_code(remaining)) {
            Some(m) => {
                push_text(out, m.prefix);
                out.push(m.span);
                remaining = m.suffix;
            }
            None => {
                push_text(out, remaining);
                break;
            }
        }
    }
}

#[inline(always)]
fn push_text<'a>(out: &mut Vec<Span<'a>>, text: &'a str) {
    if !text.is_empty() {
        out.push(Span::Text(Cow::Borrowed(text)));
    }
}

/// Leftmost `[label](href)` with a non-empty label free of `]` and a
/// non-empty href free of `)`.
fn try_match_link(text: &str) -> Option<Match<'_>> {
    let bytes = text.as_bytes();

    for open in memchr_iter(b'[', bytes) {
        let label_start = open + 1;
        // No `]` ahead means no later `[` can close either.
        let label_end = label_start + memchr(b']', &bytes[label_start..])?;
        if label_end == label_start || bytes.get(label_end + 1) != Some(&b'(') {
            continue;
        }

        let href_start = label_end + 2;
        let href_end = href_start + memchr(b')', &bytes[href_start..])?;
        if href_end == href_start {
            continue;
        }

        return Some(Match {
            prefix: &text[..open],
            span: Span::Link {
                label: Cow::Borrowed(&text[label_start..label_end]),
                href: Cow::Borrowed(&text[href_start..href_end]),
            },
            suffix: &text[href_end + 1..],
        });
    }

    None
}

/// Leftmost `**content**`, closed by the first `**` after at least one
/// content character. Content may itself contain `*`.
fn try_match_bold(text: &str) -> Option<Match<'_>> {
    let bytes = text.as_bytes();
    let open = memmem::find(bytes, b"**")?;

    // A later opener only searches further right, so when this one has no
    // closer neither has any other.
    let content_start = open + 2;
    let close = content_start + 1 + memmem::find(bytes.get(content_start + 1..)?, b"**")?;

    Some(Match {
        prefix: &text[..open],
        span: Span::Bold(Cow::Borrowed(&text[content_start..close])),
        suffix: &text[close + 2..],
    })
}

/// Leftmost `` `content` ``, closed by the first backtick after at least one
/// content character.
fn try_match_code(text: &str) -> Option<Match<'_>> {
    let bytes = text.as_bytes();
    let open = memchr(b'`', bytes)?;

    let content_start = open + 1;
    let close = content_start + 1 + memchr(b'`', bytes.get(content_start + 1..)?)?;

    Some(Match {
        prefix: &text[..open],
        span: Span::Code(Cow::Borrowed(&text[content_start..close])),
        suffix: &text[close + 1..],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_match_splits_text() {
        let m = try_match_link("see [a](b) now").unwrap();
        assert_eq!(m.prefix, "see ");
        assert_eq!(
            m.span,
            Span::Link {
                label: "a".into(),
                href: "b".into()
            }
        );
        assert_eq!(m.suffix, " now");
    }

    #[test]
    fn link_skips_empty_label_and_href() {
        assert_eq!(try_match_link("[](x)"), None);
        assert_eq!(try_match_link("[x]()"), None);
        assert_eq!(try_match_link("[x] (y)"), None);
        let m = try_match_link("[] [x](y)").unwrap();
        assert_eq!(m.prefix, "[] ");
    }

    #[test]
    fn bold_closes_at_first_double_star() {
        let m = try_match_bold("x **a*b** y **c**").unwrap();
        assert_eq!(m.prefix, "x ");
        assert_eq!(m.span, Span::Bold("a*b".into()));
        assert_eq!(m.suffix, " y **c**");

        let m = try_match_bold("***a***").unwrap();
        assert_eq!(m.prefix, "");
        assert_eq!(m.span, Span::Bold("*a".into()));
        assert_eq!(m.suffix, "*");
    }

    #[test]
    fn bold_needs_content_and_closer() {
        assert_eq!(try_match_bold("****"), None);
        assert_eq!(try_match_bold("**"), None);
        assert_eq!(try_match_bold("**open"), None);
        assert_eq!(try_match_bold("*a*"), None);
    }

    #[test]
    fn code_closes_at_first_backtick_after_content() {
        let m = try_match_code("``x`").unwrap();
        assert_eq!(m.prefix, "");
        assert_eq!(m.span, Span::Code("`x".into()));
        assert_eq!(m.suffix, "");

        let m = try_match_code("é `ß` `t`").unwrap();
        assert_eq!(m.prefix, "é ");
        assert_eq!(m.span, Span::Code("ß".into()));
        assert_eq!(m.suffix, " `t`");
    }

    #[test]
    fn code_needs_content_and_closer() {
        assert_eq!(try_match_code("``"), None);
        assert_eq!(try_match_code("`"), None);
        assert_eq!(try_match_code("a `b"), None);
    }
}
