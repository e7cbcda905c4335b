//! docmark CLI - Parse, validate, and inspect docmark documents
//!
//! Usage:
//!   dmcli [OPTIONS] <COMMAND> <FILE>
//!
//! Commands:
//!   parse     Parse and display document structure
//!   validate  Check document for degraded markup
//!   stats     Show document statistics

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser as ClapParser, Subcommand};
use docmark_core::{format, Block, Diagnostic, Document, ParseResult, Parser, Span, TextRange};
use log::debug;
use serde::Serialize;

#[derive(Debug, ClapParser)]
#[command(
    name = "dmcli",
    version,
    about = "docmark document parser and validator",
    after_help = "EXAMPLES:\n    dmcli parse guide.md          Parse a document\n    dmcli -v parse guide.md       Parse and show inline spans\n    dmcli -j parse guide.md       Output blocks as JSON\n    dmcli validate guide.md       Exit non-zero on degraded markup\n    dmcli stats guide.md          Show document statistics"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Show inline spans and debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    /// Skip collecting diagnostics
    #[arg(long, global = true)]
    no_diagnostics: bool,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Parse and display document structure
    Parse {
        /// Document to read
        file: PathBuf,
    },
    /// Check document for degraded markup
    Validate {
        /// Document to read
        file: PathBuf,
    },
    /// Show document statistics
    Stats {
        /// Document to read
        file: PathBuf,
    },
}

impl Command {
    fn file(&self) -> &Path {
        match self {
            Command::Parse { file } | Command::Validate { file } | Command::Stats { file } => file,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{count} diagnostic(s) found")]
    Invalid { count: usize },
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let path = cli.command.file();
    let input = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("read {} bytes from {}", input.len(), path.display());

    let mut parser = Parser::new().with_diagnostics(!cli.no_diagnostics);
    let result = parser.parse_with_diagnostics(&input);

    match cli.command {
        Command::Parse { .. } => cmd_parse(&result, cli),
        Command::Validate { .. } => cmd_validate(&result, cli),
        Command::Stats { .. } => cmd_stats(&result, &input, cli),
    }
}

// =============================================================================
// Parse Command
// =============================================================================

fn cmd_parse(result: &ParseResult, cli: &Cli) -> Result<(), CliError> {
    for diagnostic in result.diagnostics.iter() {
        eprintln!("warning: {}", diagnostic);
    }

    if cli.json {
        let output = JsonOutput {
            blocks: result.document.nodes.iter().map(|n| convert_block(&n.block, n.range)).collect(),
            diagnostics: result.diagnostics.iter().map(convert_diagnostic).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if cli.verbose {
        print_document_verbose(&result.document);
    } else {
        print_document_summary(&result.document);
    }

    Ok(())
}

// =============================================================================
// Validate Command
// =============================================================================

fn cmd_validate(result: &ParseResult, cli: &Cli) -> Result<(), CliError> {
    let diagnostics = &result.diagnostics;

    if cli.json {
        let report = JsonValidation {
            valid: diagnostics.is_empty(),
            diagnostics: diagnostics.iter().map(convert_diagnostic).collect(),
        };
        println!("{}", serde_json::to_string(&report)?);
    } else if diagnostics.is_empty() {
        println!("Valid: no diagnostics");
    } else {
        eprintln!("Invalid: {} diagnostic(s) found", diagnostics.len());
        for diagnostic in diagnostics {
            eprintln!("  - [{}] {}", diagnostic.kind.as_str(), diagnostic);
        }
    }

    if diagnostics.is_empty() {
        Ok(())
    } else {
        Err(CliError::Invalid {
            count: diagnostics.len(),
        })
    }
}

// =============================================================================
// Stats Command
// =============================================================================

fn cmd_stats(result: &ParseResult, input: &str, cli: &Cli) -> Result<(), CliError> {
    let stats = DocumentStats::from_document(&result.document, input, result.diagnostics.len());

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Document Statistics");
    println!("-------------------");
    println!("Content:");
    println!("  Total blocks:   {}", stats.total_blocks);
    println!("  Headings:       {}", stats.headings);
    println!("  Paragraphs:     {}", stats.paragraphs);
    println!("  Code blocks:    {}", stats.code_blocks);
    println!("  Quotes:         {}", stats.quotes);
    println!("  Tables:         {}", stats.tables);
    println!("  Lists:          {} ({} items)", stats.lists, stats.list_items);
    println!("  Rules:          {}", stats.rules);
    println!();
    println!("Inline:");
    println!("  Links:          {}", stats.links);
    println!("  Bold:           {}", stats.bold);
    println!("  Code spans:     {}", stats.code_spans);
    println!();
    println!("Size:");
    println!("  Characters:     {}", stats.chars);
    println!("  Words (est.):   {}", stats.words);
    println!("  Lines:          {}", stats.lines);
    println!();
    println!("Diagnostics:    {}", stats.diagnostics);

    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
struct DocumentStats {
    total_blocks: usize,
    headings: usize,
    paragraphs: usize,
    code_blocks: usize,
    quotes: usize,
    tables: usize,
    lists: usize,
    list_items: usize,
    rules: usize,
    links: usize,
    bold: usize,
    code_spans: usize,
    chars: usize,
    words: usize,
    lines: usize,
    diagnostics: usize,
}

impl DocumentStats {
    fn from_document(doc: &Document, input: &str, diagnostics: usize) -> Self {
        let mut stats = Self {
            chars: input.chars().count(),
            words: input.split_whitespace().count(),
            lines: input.lines().count(),
            diagnostics,
            ..Self::default()
        };

        for block in doc.blocks() {
            stats.count_block(block);
        }
        stats
    }

    fn count_block(&mut self, block: &Block) {
        self.total_blocks += 1;
        match block {
            Block::Heading { .. } => self.headings += 1,
            Block::Paragraph { .. } => self.paragraphs += 1,
            Block::CodeBlock { .. } => self.code_blocks += 1,
            Block::Blockquote { .. } => self.quotes += 1,
            Block::Table { .. } => self.tables += 1,
            Block::UnorderedList { items } | Block::OrderedList { items } => {
                self.lists += 1;
                self.list_items += items.len();
            }
            Block::HorizontalRule => self.rules += 1,
        }

        for text in block.inline_texts() {
            for span in format(text) {
                match span {
                    Span::Link { .. } => self.links += 1,
                    Span::Bold(_) => self.bold += 1,
                    Span::Code(_) => self.code_spans += 1,
                    Span::Text(_) => {}
                }
            }
        }
    }
}

// =============================================================================
// JSON Output
// =============================================================================

#[derive(Serialize)]
struct JsonOutput<'a> {
    blocks: Vec<JsonBlock<'a>>,
    diagnostics: Vec<JsonDiagnostic<'a>>,
}

#[derive(Serialize)]
struct JsonValidation<'a> {
    valid: bool,
    diagnostics: Vec<JsonDiagnostic<'a>>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
struct JsonRange {
    start: u32,
    end: u32,
}

impl From<TextRange> for JsonRange {
    fn from(r: TextRange) -> Self {
        JsonRange {
            start: r.start,
            end: r.end,
        }
    }
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    kind: &'static str,
    message: &'a str,
    range: JsonRange,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum JsonBlock<'a> {
    Heading {
        level: u8,
        #[serde(flatten)]
        content: JsonText<'a>,
        range: JsonRange,
    },
    Paragraph {
        #[serde(flatten)]
        content: JsonText<'a>,
        range: JsonRange,
    },
    CodeBlock {
        code: &'a str,
        range: JsonRange,
    },
    Blockquote {
        #[serde(flatten)]
        content: JsonText<'a>,
        range: JsonRange,
    },
    Table {
        headers: Vec<JsonText<'a>>,
        rows: Vec<Vec<JsonText<'a>>>,
        range: JsonRange,
    },
    UnorderedList {
        items: Vec<JsonText<'a>>,
        range: JsonRange,
    },
    OrderedList {
        items: Vec<JsonText<'a>>,
        range: JsonRange,
    },
    HorizontalRule {
        range: JsonRange,
    },
}

/// Raw inline text next to its formatted spans.
#[derive(Serialize)]
struct JsonText<'a> {
    text: &'a str,
    spans: Vec<JsonSpan<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum JsonSpan<'a> {
    Text { content: Cow<'a, str> },
    Bold { content: Cow<'a, str> },
    Code { content: Cow<'a, str> },
    Link { label: Cow<'a, str>, href: Cow<'a, str> },
}

fn convert_diagnostic(diagnostic: &Diagnostic) -> JsonDiagnostic<'_> {
    JsonDiagnostic {
        kind: diagnostic.kind.as_str(),
        message: &diagnostic.message,
        range: diagnostic.range.into(),
    }
}

fn convert_text(text: &str) -> JsonText<'_> {
    JsonText {
        text,
        spans: format(text).into_iter().map(convert_span).collect(),
    }
}

fn convert_texts<'a>(texts: &'a [Cow<'_, str>]) -> Vec<JsonText<'a>> {
    texts.iter().map(|t| convert_text(t)).collect()
}

fn convert_span(span: Span<'_>) -> JsonSpan<'_> {
    match span {
        Span::Text(content) => JsonSpan::Text { content },
        Span::Bold(content) => JsonSpan::Bold { content },
        Span::Code(content) => JsonSpan::Code { content },
        Span::Link { label, href } => JsonSpan::Link { label, href },
    }
}

fn convert_block<'a>(block: &'a Block<'_>, range: TextRange) -> JsonBlock<'a> {
    let range = range.into();
    match block {
        Block::Heading { level, text } => JsonBlock::Heading {
            level: *level,
            content: convert_text(text),
            range,
        },
        Block::Paragraph { text } => JsonBlock::Paragraph {
            content: convert_text(text),
            range,
        },
        Block::CodeBlock { code } => JsonBlock::CodeBlock { code, range },
        Block::Blockquote { text } => JsonBlock::Blockquote {
            content: convert_text(text),
            range,
        },
        Block::Table { headers, rows } => JsonBlock::Table {
            headers: convert_texts(headers),
            rows: rows.iter().map(|row| convert_texts(row)).collect(),
            range,
        },
        Block::UnorderedList { items } => JsonBlock::UnorderedList {
            items: convert_texts(items),
            range,
        },
        Block::OrderedList { items } => JsonBlock::OrderedList {
            items: convert_texts(items),
            range,
        },
        Block::HorizontalRule => JsonBlock::HorizontalRule { range },
    }
}

// =============================================================================
// Text Output
// =============================================================================

fn print_document_summary(doc: &Document) {
    println!("Blocks: {}", doc.len());
    for (i, node) in doc.nodes.iter().enumerate() {
        println!("  [{}] {}", i + 1, describe_block(&node.block));
    }
}

fn print_document_verbose(doc: &Document) {
    println!("=== docmark blocks ===");
    println!("Range: {}..{}", doc.range.start, doc.range.end);

    for (i, node) in doc.nodes.iter().enumerate() {
        println!();
        println!(
            "[{}] {} @ {}..{}",
            i + 1,
            describe_block(&node.block),
            node.range.start,
            node.range.end
        );
        print_block_verbose(&node.block, 1);
    }
}

fn describe_block(block: &Block) -> String {
    match block {
        Block::Heading { level, .. } => format!("Heading (level {})", level),
        Block::Table { headers, rows } => {
            format!("Table ({} columns, {} rows)", headers.len(), rows.len())
        }
        Block::UnorderedList { items } | Block::OrderedList { items } => {
            format!("{} ({} items)", block.name(), items.len())
        }
        Block::CodeBlock { code } => format!("CodeBlock ({} lines)", code.lines().count()),
        _ => block.name().to_string(),
    }
}

fn print_block_verbose(block: &Block, indent: usize) {
    let prefix = "  ".repeat(indent);

    match block {
        Block::Heading { text, .. } | Block::Paragraph { text } | Block::Blockquote { text } => {
            println!("{}Spans: {}", prefix, describe_spans(text));
        }
        Block::CodeBlock { code } => {
            let preview: String = code.chars().take(60).collect();
            let ellipsis = if code.chars().count() > 60 { "..." } else { "" };
            println!(
                "{}Code: {}{}",
                prefix,
                preview.replace('\n', "\\n"),
                ellipsis
            );
        }
        Block::Table { headers, rows } => {
            let header: Vec<String> = headers.iter().map(|c| describe_spans(c)).collect();
            println!("{}Header: {}", prefix, header.join(" | "));
            for (i, row) in rows.iter().enumerate() {
                let cells: Vec<String> = row.iter().map(|c| describe_spans(c)).collect();
                println!("{}Row {}: {}", prefix, i + 1, cells.join(" | "));
            }
        }
        Block::UnorderedList { items } => {
            for item in items {
                println!("{}- {}", prefix, describe_spans(item));
            }
        }
        Block::OrderedList { items } => {
            // Numbered at render time; source digits are not kept.
            for (i, item) in items.iter().enumerate() {
                println!("{}{}. {}", prefix, i + 1, describe_spans(item));
            }
        }
        Block::HorizontalRule => {}
    }
}

fn describe_spans(text: &str) -> String {
    let parts: Vec<String> = format(text)
        .iter()
        .map(|span| match span {
            Span::Link { label, href } => format!("Link({:?} -> {:?})", label, href),
            other => format!("{}({:?})", other.name(), other.content()),
        })
        .collect();
    parts.join(" ")
}
