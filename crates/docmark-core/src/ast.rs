//! Document model produced by the parser.
//!
//! The model is deliberately flat:
//!
//! - **Blocks** are one level deep; lists and quotes never nest
//! - **Zero-copy**: text fields are `Cow<'a, str>` borrowed from the input
//! - **Raw inline text**: blocks keep their inline markup unformatted; run it
//!   through [`crate::inline::format`] (or [`Block::spans`]) when rendering

use std::borrow::Cow;

use crate::inline::{self, Span};
use crate::range::TextRange;

/// Borrowed or owned string type for zero-copy parsing.
pub type CowStr<'a> = Cow<'a, str>;

/// Block-level nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block<'a> {
    /// `## ` (level 2) or `### ` (level 3) heading.
    Heading {
        /// Heading level, always 2 or 3.
        level: u8,
        /// Raw inline text after the marker.
        text: CowStr<'a>,
    },
    /// A single source line of prose.
    Paragraph {
        /// Raw inline text, untrimmed.
        text: CowStr<'a>,
    },
    /// Fenced code block.
    CodeBlock {
        /// Literal content between the fences, byte-exact.
        code: CowStr<'a>,
    },
    /// A single `> ` quoted line.
    Blockquote {
        /// Raw inline text after the marker.
        text: CowStr<'a>,
    },
    /// Pipe table. Rows are stored as split; their lengths may differ from
    /// the header length.
    Table {
        /// Header cells.
        headers: Vec<CowStr<'a>>,
        /// Body rows, separator line excluded.
        rows: Vec<Vec<CowStr<'a>>>,
    },
    /// Run of `- ` / `* ` lines.
    UnorderedList {
        /// Raw inline text of each item, marker stripped.
        items: Vec<CowStr<'a>>,
    },
    /// Run of `1. ` lines. Source numbers are discarded.
    OrderedList {
        /// Raw inline text of each item, number stripped.
        items: Vec<CowStr<'a>>,
    },
    /// `---` thematic break.
    HorizontalRule,
}

impl<'a> Block<'a> {
    /// Short name of the block variant, used in logs and host output.
    pub fn name(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "Heading",
            Block::Paragraph { .. } => "Paragraph",
            Block::CodeBlock { .. } => "CodeBlock",
            Block::Blockquote { .. } => "Blockquote",
            Block::Table { .. } => "Table",
            Block::UnorderedList { .. } => "UnorderedList",
            Block::OrderedList { .. } => "OrderedList",
            Block::HorizontalRule => "HorizontalRule",
        }
    }

    /// The single raw inline text of a heading, paragraph or blockquote.
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Heading { text, .. } | Block::Paragraph { text } | Block::Blockquote { text } => {
                Some(text.as_ref())
            }
            _ => None,
        }
    }

    /// Format the block's single inline text into spans.
    ///
    /// Returns `None` for blocks without a single inline text; lists and
    /// tables are formatted per item or cell via [`Block::inline_texts`].
    pub fn spans(&self) -> Option<Vec<Span<'_>>> {
        self.text().map(inline::format)
    }

    /// Every raw inline text the block carries, in source order.
    ///
    /// Tables yield headers first, then row cells left to right. Code blocks
    /// and rules yield nothing.
    pub fn inline_texts(&self) -> Vec<&str> {
        match self {
            Block::Heading { text, .. } | Block::Paragraph { text } | Block::Blockquote { text } => {
                vec![text.as_ref()]
            }
            Block::Table { headers, rows } => headers
                .iter()
                .chain(rows.iter().flatten())
                .map(|s| &**s)
                .collect(),
            Block::UnorderedList { items } | Block::OrderedList { items } => {
                items.iter().map(|s| &**s).collect()
            }
            Block::CodeBlock { .. } | Block::HorizontalRule => Vec::new(),
        }
    }

    /// Hand a code block's literal text to `sink` (a clipboard action, for
    /// instance). Returns `false` without calling `sink` for other blocks.
    pub fn copy_code<F>(&self, sink: F) -> bool
    where
        F: FnOnce(&str),
    {
        match self {
            Block::CodeBlock { code } => {
                sink(code.as_ref());
                true
            }
            _ => false,
        }
    }

    /// Detach the block from the input buffer.
    pub fn into_owned(self) -> Block<'static> {
        fn own(s: CowStr<'_>) -> CowStr<'static> {
            Cow::Owned(s.into_owned())
        }
        fn own_all(v: Vec<CowStr<'_>>) -> Vec<CowStr<'static>> {
            v.into_iter().map(own).collect()
        }

        match self {
            Block::Heading { level, text } => Block::Heading {
                level,
                text: own(text),
            },
            Block::Paragraph { text } => Block::Paragraph { text: own(text) },
            Block::CodeBlock { code } => Block::CodeBlock { code: own(code) },
            Block::Blockquote { text } => Block::Blockquote { text: own(text) },
            Block::Table { headers, rows } => Block::Table {
                headers: own_all(headers),
                rows: rows.into_iter().map(own_all).collect(),
            },
            Block::UnorderedList { items } => Block::UnorderedList {
                items: own_all(items),
            },
            Block::OrderedList { items } => Block::OrderedList {
                items: own_all(items),
            },
            Block::HorizontalRule => Block::HorizontalRule,
        }
    }
}

/// A block together with the source lines it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<'a> {
    /// The parsed block.
    pub block: Block<'a>,
    /// Bytes of every line the block consumed, fence lines included.
    pub range: TextRange,
}

/// A parsed document: blocks in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document<'a> {
    /// Blocks with their source ranges.
    pub nodes: Vec<Node<'a>>,
    /// Range covering the entire input.
    pub range: TextRange,
}

impl<'a> Document<'a> {
    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the document produced no blocks.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over the blocks, dropping ranges.
    pub fn blocks(&self) -> impl Iterator<Item = &Block<'a>> {
        self.nodes.iter().map(|n| &n.block)
    }

    /// Literal text of every code block, in order.
    pub fn code_blocks(&self) -> impl Iterator<Item = &str> {
        self.blocks().filter_map(|b| match b {
            Block::CodeBlock { code } => Some(code.as_ref()),
            _ => None,
        })
    }

    /// Consume the document, keeping only the blocks.
    pub fn into_blocks(self) -> Vec<Block<'a>> {
        self.nodes.into_iter().map(|n| n.block).collect()
    }
}
