//! # docmark core
//!
//! A small, total parser for a constrained markdown dialect, as used by
//! product documentation pages.
//!
//! Parsing happens in two stages. The block parser turns the whole source
//! into a flat list of [`Block`]s (headings, paragraphs, code blocks, quotes,
//! tables, lists, rules). Blocks keep their inline markup raw; the inline
//! formatter turns any of those texts into [`Span`]s (text, bold, code,
//! links) when a renderer asks for them.
//!
//! ## Quick Start
//!
//! ```rust
//! use docmark_core::{format, parse, Block, Span};
//!
//! let blocks = parse("## Title\n\nSome **bold** and `code`.");
//! let Block::Paragraph { text } = &blocks[1] else { panic!() };
//!
//! assert_eq!(
//!     format(text),
//!     vec![
//!         Span::Text("Some ".into()),
//!         Span::Bold("bold".into()),
//!         Span::Text(" and ".into()),
//!         Span::Code("code".into()),
//!         Span::Text(".".into()),
//!     ]
//! );
//! ```
//!
//! ## Diagnostics
//!
//! Parsing never fails. Markup that degrades (an unclosed fence, a ragged
//! table row, `##Title`) can be reported alongside the document:
//!
//! ```rust
//! use docmark_core::Parser;
//!
//! let result = Parser::new().parse_with_diagnostics("```\nlet x = 1;");
//!
//! assert_eq!(result.document.code_blocks().next(), Some("let x = 1;"));
//! assert_eq!(result.diagnostics.len(), 1);
//! ```

pub mod ast;
pub mod error;
pub mod inline;
pub mod lexer;
pub mod parser;
pub mod range;

pub use ast::{Block, Document, Node};
pub use error::{Diagnostic, DiagnosticKind, Diagnostics};
pub use inline::{format, to_markup, Span};
pub use parser::{parse, ParseResult, Parser};
pub use range::TextRange;
