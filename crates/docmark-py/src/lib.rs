//! Python bindings for the docmark parser.

use docmark_core::{
    format as core_format, Block, Diagnostic as CoreDiagnostic,
    DiagnosticKind as CoreDiagnosticKind, Document, ParseResult as CoreParseResult,
    Parser as CoreParser, Span, TextRange,
};
use pyo3::prelude::*;
use pyo3::types::PyList;

// ============================================================================
// Range
// ============================================================================

/// Source location in the input text (byte offsets).
#[pyclass(frozen, get_all, name = "Range")]
#[derive(Clone)]
pub struct PyRange {
    pub start: u32,
    pub end: u32,
}

#[pymethods]
impl PyRange {
    fn __repr__(&self) -> String {
        format!("Range({}, {})", self.start, self.end)
    }

    #[getter]
    fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }
}

impl From<TextRange> for PyRange {
    fn from(r: TextRange) -> Self {
        PyRange {
            start: r.start,
            end: r.end,
        }
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

/// Diagnostic category.
#[pyclass(frozen, eq, eq_int, name = "DiagnosticKind")]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PyDiagnosticKind {
    UnclosedFence,
    RaggedTableRow,
    HeadingMissingSpace,
    UnsupportedHeadingLevel,
}

impl From<CoreDiagnosticKind> for PyDiagnosticKind {
    fn from(k: CoreDiagnosticKind) -> Self {
        match k {
            CoreDiagnosticKind::UnclosedFence => PyDiagnosticKind::UnclosedFence,
            CoreDiagnosticKind::RaggedTableRow => PyDiagnosticKind::RaggedTableRow,
            CoreDiagnosticKind::HeadingMissingSpace => PyDiagnosticKind::HeadingMissingSpace,
            CoreDiagnosticKind::UnsupportedHeadingLevel => {
                PyDiagnosticKind::UnsupportedHeadingLevel
            }
        }
    }
}

/// Degraded markup found while parsing. Never changes the blocks.
#[pyclass(frozen, get_all, name = "Diagnostic")]
#[derive(Clone)]
pub struct PyDiagnostic {
    pub message: String,
    pub kind: PyDiagnosticKind,
    pub range: PyRange,
}

#[pymethods]
impl PyDiagnostic {
    fn __repr__(&self) -> String {
        format!("Diagnostic({:?}, {:?})", self.message, self.kind)
    }

    fn __str__(&self) -> String {
        format!(
            "{} at bytes {}..{}",
            self.message, self.range.start, self.range.end
        )
    }
}

impl From<&CoreDiagnostic> for PyDiagnostic {
    fn from(d: &CoreDiagnostic) -> Self {
        PyDiagnostic {
            message: d.message.clone(),
            kind: d.kind.into(),
            range: d.range.into(),
        }
    }
}

// ============================================================================
// Block types
// ============================================================================

/// Section heading (level 2 or 3).
#[pyclass(frozen, get_all, name = "Heading")]
pub struct PyHeading {
    pub level: u8,
    pub text: String,
    pub range: PyRange,
}

#[pymethods]
impl PyHeading {
    /// Inline spans of the heading text.
    fn spans(&self, py: Python<'_>) -> PyResult<PyObject> {
        convert_spans(py, core_format(&self.text))
    }

    fn __repr__(&self) -> String {
        format!("Heading({}, {:?})", self.level, self.text)
    }
}

/// One line of plain text.
#[pyclass(frozen, get_all, name = "Paragraph")]
pub struct PyParagraph {
    pub text: String,
    pub range: PyRange,
}

#[pymethods]
impl PyParagraph {
    /// Inline spans of the paragraph text.
    fn spans(&self, py: Python<'_>) -> PyResult<PyObject> {
        convert_spans(py, core_format(&self.text))
    }

    fn __repr__(&self) -> String {
        format!("Paragraph({:?})", self.text)
    }
}

/// Fenced code block. `code` is byte-exact.
#[pyclass(frozen, get_all, name = "CodeBlock")]
pub struct PyCodeBlock {
    pub code: String,
    pub range: PyRange,
}

#[pymethods]
impl PyCodeBlock {
    fn __repr__(&self) -> String {
        format!("CodeBlock({:?})", self.code)
    }
}

/// Single-line quote.
#[pyclass(frozen, get_all, name = "Blockquote")]
pub struct PyBlockquote {
    pub text: String,
    pub range: PyRange,
}

#[pymethods]
impl PyBlockquote {
    /// Inline spans of the quoted text.
    fn spans(&self, py: Python<'_>) -> PyResult<PyObject> {
        convert_spans(py, core_format(&self.text))
    }

    fn __repr__(&self) -> String {
        format!("Blockquote({:?})", self.text)
    }
}

/// Pipe table. Rows may be ragged.
#[pyclass(frozen, get_all, name = "Table")]
pub struct PyTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub range: PyRange,
}

#[pymethods]
impl PyTable {
    fn __repr__(&self) -> String {
        format!(
            "Table(columns={}, rows={})",
            self.headers.len(),
            self.rows.len()
        )
    }
}

/// Bullet list.
#[pyclass(frozen, get_all, name = "UnorderedList")]
pub struct PyUnorderedList {
    pub items: Vec<String>,
    pub range: PyRange,
}

#[pymethods]
impl PyUnorderedList {
    fn __repr__(&self) -> String {
        format!("UnorderedList(items={})", self.items.len())
    }
}

/// Numbered list. Source numbers are not kept.
#[pyclass(frozen, get_all, name = "OrderedList")]
pub struct PyOrderedList {
    pub items: Vec<String>,
    pub range: PyRange,
}

#[pymethods]
impl PyOrderedList {
    fn __repr__(&self) -> String {
        format!("OrderedList(items={})", self.items.len())
    }
}

/// Horizontal rule.
#[pyclass(frozen, get_all, name = "HorizontalRule")]
pub struct PyHorizontalRule {
    pub range: PyRange,
}

#[pymethods]
impl PyHorizontalRule {
    fn __repr__(&self) -> String {
        "HorizontalRule()".to_string()
    }
}

// ============================================================================
// Span types
// ============================================================================

/// Plain text.
#[pyclass(frozen, get_all, name = "Text")]
pub struct PyText {
    pub content: String,
}

/// Bold text.
#[pyclass(frozen, get_all, name = "Bold")]
pub struct PyBold {
    pub content: String,
}

/// Inline code.
#[pyclass(frozen, get_all, name = "Code")]
pub struct PyCode {
    pub content: String,
}

/// Hyperlink.
#[pyclass(frozen, get_all, name = "Link")]
pub struct PyLink {
    pub label: String,
    pub href: String,
}

// ============================================================================
// Conversion
// ============================================================================

fn convert_spans(py: Python<'_>, spans: Vec<Span<'_>>) -> PyResult<PyObject> {
    let list = PyList::empty(py);
    for span in spans {
        list.append(convert_span(py, span)?)?;
    }
    Ok(list.into())
}

fn convert_span(py: Python<'_>, span: Span<'_>) -> PyResult<PyObject> {
    let obj = match span {
        Span::Text(t) => Py::new(
            py,
            PyText {
                content: t.into_owned(),
            },
        )?
        .into_any(),
        Span::Bold(b) => Py::new(
            py,
            PyBold {
                content: b.into_owned(),
            },
        )?
        .into_any(),
        Span::Code(c) => Py::new(
            py,
            PyCode {
                content: c.into_owned(),
            },
        )?
        .into_any(),
        Span::Link { label, href } => Py::new(
            py,
            PyLink {
                label: label.into_owned(),
                href: href.into_owned(),
            },
        )?
        .into_any(),
    };
    Ok(obj)
}

fn owned(texts: Vec<std::borrow::Cow<'_, str>>) -> Vec<String> {
    texts.into_iter().map(|t| t.into_owned()).collect()
}

fn convert_block(py: Python<'_>, block: Block<'_>, range: TextRange) -> PyResult<PyObject> {
    let range = PyRange::from(range);
    let obj = match block {
        Block::Heading { level, text } => Py::new(
            py,
            PyHeading {
                level,
                text: text.into_owned(),
                range,
            },
        )?
        .into_any(),
        Block::Paragraph { text } => Py::new(
            py,
            PyParagraph {
                text: text.into_owned(),
                range,
            },
        )?
        .into_any(),
        Block::CodeBlock { code } => Py::new(
            py,
            PyCodeBlock {
                code: code.into_owned(),
                range,
            },
        )?
        .into_any(),
        Block::Blockquote { text } => Py::new(
            py,
            PyBlockquote {
                text: text.into_owned(),
                range,
            },
        )?
        .into_any(),
        Block::Table { headers, rows } => Py::new(
            py,
            PyTable {
                headers: owned(headers),
                rows: rows.into_iter().map(owned).collect(),
                range,
            },
        )?
        .into_any(),
        Block::UnorderedList { items } => Py::new(
            py,
            PyUnorderedList {
                items: owned(items),
                range,
            },
        )?
        .into_any(),
        Block::OrderedList { items } => Py::new(
            py,
            PyOrderedList {
                items: owned(items),
                range,
            },
        )?
        .into_any(),
        Block::HorizontalRule => Py::new(py, PyHorizontalRule { range })?.into_any(),
    };
    Ok(obj)
}

fn convert_document(py: Python<'_>, doc: Document<'_>) -> PyResult<PyObject> {
    let list = PyList::empty(py);
    for node in doc.nodes {
        list.append(convert_block(py, node.block, node.range)?)?;
    }
    Ok(list.into())
}

// ============================================================================
// ParseResult
// ============================================================================

/// Blocks together with the diagnostics found while parsing them.
#[pyclass(frozen, name = "ParseResult")]
pub struct PyParseResult {
    #[pyo3(get)]
    pub blocks: PyObject,
    #[pyo3(get)]
    pub diagnostics: Vec<PyDiagnostic>,
    #[pyo3(get)]
    pub range: PyRange,
}

#[pymethods]
impl PyParseResult {
    #[getter]
    fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    fn __repr__(&self, py: Python<'_>) -> PyResult<String> {
        let blocks = self.blocks.downcast_bound::<PyList>(py)?;
        Ok(format!(
            "ParseResult(blocks={}, diagnostics={})",
            blocks.len(),
            self.diagnostics.len()
        ))
    }
}

fn convert_result(py: Python<'_>, result: CoreParseResult<'_>) -> PyResult<PyParseResult> {
    let CoreParseResult {
        document,
        diagnostics,
    } = result;
    let range = document.range.into();
    Ok(PyParseResult {
        diagnostics: diagnostics.iter().map(PyDiagnostic::from).collect(),
        blocks: convert_document(py, document)?,
        range,
    })
}

// ============================================================================
// Parser
// ============================================================================

/// docmark parser.
///
/// Args:
///     diagnostics: collect diagnostics (default True)
#[pyclass(name = "Parser")]
pub struct PyParser {
    diagnostics: bool,
}

#[pymethods]
impl PyParser {
    #[new]
    #[pyo3(signature = (diagnostics=true), text_signature = "(diagnostics=True)")]
    fn new(diagnostics: bool) -> Self {
        PyParser { diagnostics }
    }

    /// Parse a document into a list of blocks.
    #[pyo3(text_signature = "(self, source)")]
    fn parse(&self, py: Python<'_>, source: &str) -> PyResult<PyObject> {
        let doc = CoreParser::new().with_diagnostics(false).parse(source);
        convert_document(py, doc)
    }

    /// Parse and return blocks with diagnostics.
    #[pyo3(text_signature = "(self, source)")]
    fn parse_with_diagnostics(&self, py: Python<'_>, source: &str) -> PyResult<PyParseResult> {
        let mut parser = CoreParser::new().with_diagnostics(self.diagnostics);
        convert_result(py, parser.parse_with_diagnostics(source))
    }

    fn __repr__(&self) -> String {
        format!("Parser(diagnostics={})", self.diagnostics)
    }
}

// ============================================================================
// Module functions
// ============================================================================

/// Parse a docmark string.
///
/// Args:
///     source: Document string to parse
///
/// Returns:
///     list: Heading, Paragraph, CodeBlock, Blockquote, Table,
///     UnorderedList, OrderedList and HorizontalRule objects
#[pyfunction]
#[pyo3(text_signature = "(source)")]
fn parse(py: Python<'_>, source: &str) -> PyResult<PyObject> {
    PyParser::new(false).parse(py, source)
}

/// Parse and collect diagnostics. Always returns a result.
#[pyfunction]
#[pyo3(text_signature = "(source)")]
fn parse_with_diagnostics(py: Python<'_>, source: &str) -> PyResult<PyParseResult> {
    PyParser::new(true).parse_with_diagnostics(py, source)
}

/// Split inline text into Text, Bold, Code and Link spans.
#[pyfunction]
#[pyo3(text_signature = "(text)")]
fn format(py: Python<'_>, text: &str) -> PyResult<PyObject> {
    convert_spans(py, core_format(text))
}

// ============================================================================
// Module
// ============================================================================

/// docmark - a small line-oriented markup parser.
#[pymodule]
fn pydm(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyRange>()?;
    m.add_class::<PyParser>()?;
    m.add_class::<PyParseResult>()?;
    m.add_class::<PyDiagnosticKind>()?;
    m.add_class::<PyDiagnostic>()?;
    m.add_class::<PyHeading>()?;
    m.add_class::<PyParagraph>()?;
    m.add_class::<PyCodeBlock>()?;
    m.add_class::<PyBlockquote>()?;
    m.add_class::<PyTable>()?;
    m.add_class::<PyUnorderedList>()?;
    m.add_class::<PyOrderedList>()?;
    m.add_class::<PyHorizontalRule>()?;
    m.add_class::<PyText>()?;
    m.add_class::<PyBold>()?;
    m.add_class::<PyCode>()?;
    m.add_class::<PyLink>()?;
    m.add_function(wrap_pyfunction!(parse, m)?)?;
    m.add_function(wrap_pyfunction!(parse_with_diagnostics, m)?)?;
    m.add_function(wrap_pyfunction!(format, m)?)?;
    Ok(())
}
