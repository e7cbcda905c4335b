use crate::range::TextRange;

/// Kinds of degraded markup the parser can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A fenced code block ran to end of input.
    UnclosedFence,
    /// A table row's cell count differs from its header's.
    RaggedTableRow,
    /// `##Title`: a heading marker without the separating space.
    HeadingMissingSpace,
    /// `# Title` or `#### Title`: only levels 2 and 3 are headings.
    UnsupportedHeadingLevel,
}

impl DiagnosticKind {
    /// Stable snake_case identifier, used in host output.
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::UnclosedFence => "unclosed_fence",
            DiagnosticKind::RaggedTableRow => "ragged_table_row",
            DiagnosticKind::HeadingMissingSpace => "heading_missing_space",
            DiagnosticKind::UnsupportedHeadingLevel => "unsupported_heading_level",
        }
    }
}

/// A note about markup the parser accepted in degraded form.
///
/// Diagnostics never change the parsed blocks: the parser is total, and a
/// diagnostic only explains why a construct came out the way it did.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at bytes {}..{}", .range.start, .range.end)]
pub struct Diagnostic {
    /// Human-readable message
    pub message: String,
    /// Diagnostic categorization
    pub kind: DiagnosticKind,
    /// Source lines the diagnostic refers to
    pub range: TextRange,
}

impl Diagnostic {
    /// Create a diagnostic of the given kind.
    pub fn new(kind: DiagnosticKind, message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            kind,
            range,
        }
    }

    /// Fenced code block without a closing fence.
    pub fn unclosed_fence(range: TextRange) -> Self {
        Self::new(
            DiagnosticKind::UnclosedFence,
            "code fence is never closed; block runs to end of input",
            range,
        )
    }

    /// Table row whose width differs from the header.
    pub fn ragged_row(expected: usize, found: usize, range: TextRange) -> Self {
        Self::new(
            DiagnosticKind::RaggedTableRow,
            format!("table row has {} cells, header has {}", found, expected),
            range,
        )
    }

    /// Heading marker glued to its text.
    pub fn heading_missing_space(range: TextRange) -> Self {
        Self::new(
            DiagnosticKind::HeadingMissingSpace,
            "heading marker needs a space before its text; parsed as paragraph",
            range,
        )
    }

    /// Heading level outside 2..=3.
    pub fn unsupported_heading_level(level: usize, range: TextRange) -> Self {
        Self::new(
            DiagnosticKind::UnsupportedHeadingLevel,
            format!("level {} headings are not supported; parsed as paragraph", level),
            range,
        )
    }
}

/// Diagnostics collected during one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add a diagnostic to the collection.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    /// Check if any diagnostics were collected.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the number of diagnostics.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate over the diagnostics in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// Iterate over diagnostics of one kind.
    pub fn by_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(move |d| d.kind == kind)
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
