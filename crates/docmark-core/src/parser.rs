//! Zero-allocation block parser.
//!
//! A line-oriented state machine: at each cursor position the rules below
//! are tried in order and the first match consumes its whole run of lines.
//!
//! 1. fenced code block (trimmed line starts with ```` ``` ````)
//! 2. `## ` / `### ` heading
//! 3. `> ` blockquote, one block per line
//! 4. table: a line with `|` whose next line contains `---`
//! 5. `- ` / `* ` unordered list run
//! 6. `1. ` ordered list run
//! 7. `---` horizontal rule
//! 8. blank line, skipped
//! 9. anything else: one paragraph per line
//!
//! Block text borrows directly from the input. The parser never fails;
//! degraded constructs are reported as diagnostics alongside the document.

use std::borrow::Cow;

use log::{debug, trace};

use crate::ast::{Block, CowStr, Document, Node};
use crate::error::{Diagnostic, Diagnostics};
use crate::lexer::{Lexer, Line};
use crate::range::TextRange;

const FENCE: &str = "```";

/// Parse a document into its blocks.
///
/// Inputs of any size are accepted. Block text is always exact; source
/// ranges saturate at `u32::MAX` bytes.
///
/// ```rust
/// use docmark_core::{parse, Block};
///
/// let blocks = parse("## Title\n\nSome **bold** and `code`.");
/// assert_eq!(blocks.len(), 2);
/// assert!(matches!(&blocks[0], Block::Heading { level: 2, text } if text == "Title"));
/// ```
pub fn parse(input: &str) -> Vec<Block<'_>> {
    Parser::new()
        .with_diagnostics(false)
        .parse(input)
        .into_blocks()
}

/// Result of a parse that also collected diagnostics.
#[derive(Debug)]
pub struct ParseResult<'a> {
    /// The parsed document. Always complete.
    pub document: Document<'a>,
    /// Notes about degraded markup, in source order.
    pub diagnostics: Diagnostics,
}

impl<'a> ParseResult<'a> {
    /// Check if the input parsed without any diagnostics.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Block parser with optional diagnostic collection.
#[derive(Debug)]
pub struct Parser {
    /// Diagnostics recorded during the current parse.
    diagnostics: Diagnostics,
    /// Whether to record diagnostics at all.
    collect_diagnostics: bool,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Create a parser that collects diagnostics.
    #[inline]
    pub fn new() -> Self {
        Self {
            diagnostics: Diagnostics::new(),
            collect_diagnostics: true,
        }
    }

    /// Enable or disable diagnostic collection.
    ///
    /// The parsed document is identical either way; disabling only skips
    /// the bookkeeping.
    pub fn with_diagnostics(mut self, collect: bool) -> Self {
        self.collect_diagnostics = collect;
        self
    }

    /// Parse the input into a document.
    #[inline]
    pub fn parse<'a>(&mut self, input: &'a str) -> Document<'a> {
        self.diagnostics = Diagnostics::new();
        self.parse_internal(input)
    }

    /// Parse the input, returning the document and any diagnostics.
    #[inline]
    pub fn parse_with_diagnostics<'a>(&mut self, input: &'a str) -> ParseResult<'a> {
        self.diagnostics = Diagnostics::new();
        let document = self.parse_internal(input);
        ParseResult {
            document,
            diagnostics: std::mem::take(&mut self.diagnostics),
        }
    }

    fn parse_internal<'a>(&mut self, input: &'a str) -> Document<'a> {
        let mut lexer = Lexer::new(input);
        let mut nodes = Vec::with_capacity(16);

        while !lexer.is_eof() {
            lexer.skip_blank_lines();

            let line_no = lexer.position() + 1;
            if let Some(node) = self.parse_block(&mut lexer) {
                trace!("line {}: {}", line_no, node.block.name());
                nodes.push(node);
            }
        }

        debug!(
            "parsed {} lines into {} blocks ({} diagnostics)",
            lexer.line_count(),
            nodes.len(),
            self.diagnostics.len()
        );

        Document {
            nodes,
            range: TextRange::from_offsets(0, input.len()),
        }
    }

    #[inline]
    fn record(&mut self, diagnostic: Diagnostic) {
        if self.collect_diagnostics {
            debug!("{}", diagnostic);
            self.diagnostics.push(diagnostic);
        }
    }

    fn parse_block<'a>(&mut self, lexer: &mut Lexer<'a>) -> Option<Node<'a>> {
        let line = *lexer.peek_line()?;

        if line.trimmed().starts_with(FENCE) {
            return Some(self.parse_code_block(lexer));
        }

        if let Some(text) = line.strip_prefix("## ") {
            lexer.next_line();
            let block = Block::Heading {
                level: 2,
                text: Cow::Borrowed(text),
            };
            return Some(single_line(block, line));
        }

        if let Some(text) = line.strip_prefix("### ") {
            lexer.next_line();
            let block = Block::Heading {
                level: 3,
                text: Cow::Borrowed(text),
            };
            return Some(single_line(block, line));
        }

        if let Some(text) = line.strip_prefix("> ") {
            lexer.next_line();
            let block = Block::Blockquote {
                text: Cow::Borrowed(text),
            };
            return Some(single_line(block, line));
        }

        if line.has_pipe() && lexer.peek_nth(1).is_some_and(|next| next.text.contains("---")) {
            return Some(self.parse_table(lexer));
        }

        if unordered_item(line.text).is_some() {
            let (items, range) = parse_list(lexer, unordered_item);
            return Some(Node {
                block: Block::UnorderedList { items },
                range,
            });
        }

        if ordered_item(line.text).is_some() {
            let (items, range) = parse_list(lexer, ordered_item);
            return Some(Node {
                block: Block::OrderedList { items },
                range,
            });
        }

        if is_rule(line.text) {
            lexer.next_line();
            return Some(single_line(Block::HorizontalRule, line));
        }

        self.parse_paragraph(lexer)
    }

    fn parse_code_block<'a>(&mut self, lexer: &mut Lexer<'a>) -> Node<'a> {
        let Some(open) = lexer.next_line() else {
            return Node {
                block: Block::CodeBlock {
                    code: Cow::Borrowed(""),
                },
                range: TextRange::default(),
            };
        };
        let mut content: Option<(Line<'a>, Line<'a>)> = None;
        let mut end = open;
        let mut closed = false;

        while let Some(line) = lexer.next_line() {
            end = line;
            if line.trimmed().starts_with(FENCE) {
                closed = true;
                break;
            }
            content = Some(content.map_or((line, line), |(first, _)| (first, line)));
        }

        let range = open.range.cover(end.range);
        if !closed {
            self.record(Diagnostic::unclosed_fence(range));
        }

        // Consecutive lines are contiguous in the input, so the newline-joined
        // content is exactly the text from the first to the last code line.
        let code = content.map_or("", |(first, last)| lexer.text_between(&first, &last));

        Node {
            block: Block::CodeBlock {
                code: Cow::Borrowed(code),
            },
            range,
        }
    }

    fn parse_table<'a>(&mut self, lexer: &mut Lexer<'a>) -> Node<'a> {
        let (headers, mut range) = match lexer.next_line() {
            Some(header) => (split_cells(header.text), header.range),
            None => (Vec::new(), TextRange::default()),
        };

        let mut rows = Vec::with_capacity(8);
        let mut is_separator = true;

        while let Some(line) = lexer.next_line_if(Line::has_pipe) {
            range = range.cover(line.range);
            if is_separator {
                is_separator = false;
                continue;
            }

            let cells = split_cells(line.text);
            if cells.len() != headers.len() {
                self.record(Diagnostic::ragged_row(headers.len(), cells.len(), line.range));
            }
            rows.push(cells);
        }

        Node {
            block: Block::Table { headers, rows },
            range,
        }
    }

    fn parse_paragraph<'a>(&mut self, lexer: &mut Lexer<'a>) -> Option<Node<'a>> {
        let line = lexer.next_line()?;
        self.check_heading_marker(&line);
        Some(single_line(
            Block::Paragraph {
                text: Cow::Borrowed(line.text),
            },
            line,
        ))
    }

    /// Explain why a `#`-prefixed line came out as a paragraph.
    fn check_heading_marker(&mut self, line: &Line<'_>) {
        let hashes = line.text.bytes().take_while(|&b| b == b'#').count();
        if hashes == 0 {
            return;
        }

        let rest = &line.text[hashes..];
        if rest.starts_with(' ') {
            self.record(Diagnostic::unsupported_heading_level(hashes, line.range));
        } else if (2..=3).contains(&hashes) && !rest.trim().is_empty() {
            self.record(Diagnostic::heading_missing_space(line.range));
        }
    }
}

#[inline]
fn single_line<'a>(block: Block<'a>, line: Line<'a>) -> Node<'a> {
    Node {
        block,
        range: line.range,
    }
}

/// Consume the run of lines accepted by `item`, collecting their text.
fn parse_list<'a>(
    lexer: &mut Lexer<'a>,
    item: fn(&str) -> Option<&str>,
) -> (Vec<CowStr<'a>>, TextRange) {
    let mut items = Vec::with_capacity(8);
    let mut range: Option<TextRange> = None;

    while let Some(line) = lexer.peek_line().copied() {
        let Some(text) = item(line.text) else {
            break;
        };
        items.push(Cow::Borrowed(text));
        range = Some(range.map_or(line.range, |r| r.cover(line.range)));
        lexer.next_line();
    }

    (items, range.unwrap_or_default())
}

/// `- item` or `* item`.
#[inline]
fn unordered_item(text: &str) -> Option<&str> {
    text.strip_prefix(['-', '*'])?.strip_prefix(' ')
}

/// `12. item`: ASCII digits, a dot, then exactly one whitespace character.
#[inline]
fn ordered_item(text: &str) -> Option<&str> {
    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let rest = text[digits..].strip_prefix('.')?;
    let space = rest.chars().next().filter(|&c| is_regex_space(c))?;
    Some(&rest[space.len_utf8()..])
}

/// The regex `\s` class: Unicode White_Space without U+0085, plus U+FEFF.
#[inline]
fn is_regex_space(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

/// Three or more dashes and nothing else.
#[inline]
fn is_rule(text: &str) -> bool {
    text.len() >= 3 && text.bytes().all(|b| b == b'-')
}

/// Split a table line on `|`, trimming cells and dropping empty ones.
#[inline]
fn split_cells(text: &str) -> Vec<CowStr<'_>> {
    text.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(Cow::Borrowed)
        .collect()
}
