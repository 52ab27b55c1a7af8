use crate::span::{line_of, Span};
use std::fmt;

/// Error kinds for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A fence (directive, code, or math) opened but never closed
    UnterminatedBlock,
    /// Column-count mismatch between a table header and one of its rows
    MalformedTable,
    /// A directive missing a required attribute
    MalformedDirective,
    /// A cross-reference whose target label is never defined
    UnresolvedLabel,
    /// Two entities claiming the same label string
    DuplicateLabel,
    /// A footnote reference with no matching definition
    UnresolvedFootnote,
    /// A glossary term reference with no matching entry
    UnresolvedTerm,
}

/// A structural or cross-reference problem found while parsing.
///
/// Diagnostics are collected rather than thrown, so a caller always gets
/// every problem in one document instead of stopping at the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Human-readable message
    pub message: String,
    /// Source location of the problem
    pub span: Option<Span>,
    /// Error categorization
    pub kind: ErrorKind,
    /// Secondary location: the first definition site for duplicate labels
    pub related: Option<Span>,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Option<Span>) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
            related: None,
        }
    }

    /// A fence that was opened but never closed.
    pub fn unterminated_block(what: &str, span: Span) -> Self {
        Self::new(
            ErrorKind::UnterminatedBlock,
            format!("unterminated {}", what),
            Some(span),
        )
    }

    /// A table row whose cell count disagrees with its header.
    pub fn malformed_table(expected: usize, found: usize, span: Span) -> Self {
        Self::new(
            ErrorKind::MalformedTable,
            format!("table row has {} columns, header has {}", found, expected),
            Some(span),
        )
    }

    /// A directive missing a required attribute.
    pub fn malformed_directive(name: &str, missing: &str, span: Span) -> Self {
        Self::new(
            ErrorKind::MalformedDirective,
            format!("directive '{}' is missing required attribute '{}'", name, missing),
            Some(span),
        )
    }

    /// A cross-reference to a label that was never defined.
    pub fn unresolved_label(label: &str, span: Span) -> Self {
        Self::new(
            ErrorKind::UnresolvedLabel,
            format!("unresolved reference to label '{}'", label),
            Some(span),
        )
    }

    /// A second entity claiming an already-taken label.
    pub fn duplicate_label(label: &str, span: Span, first: Span) -> Self {
        let mut diag = Self::new(
            ErrorKind::DuplicateLabel,
            format!("label '{}' is already defined", label),
            Some(span),
        );
        diag.related = Some(first);
        diag
    }

    /// A footnote reference with no definition.
    pub fn unresolved_footnote(id: &str, span: Span) -> Self {
        Self::new(
            ErrorKind::UnresolvedFootnote,
            format!("footnote reference '[^{}]' has no definition", id),
            Some(span),
        )
    }

    /// A glossary term reference with no entry.
    pub fn unresolved_term(term: &str, span: Span) -> Self {
        Self::new(
            ErrorKind::UnresolvedTerm,
            format!("glossary term '{}' has no entry", term),
            Some(span),
        )
    }

    /// 1-based line number of this diagnostic in `source`.
    pub fn line(&self, source: &str) -> Option<u32> {
        self.span.map(|s| line_of(source, s.start))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(span) = self.span {
            write!(f, " at bytes {}..{}", span.start, span.end)?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

/// An ordered collection of diagnostics from one parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    /// Append another collection, preserving order.
    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    /// Check if any diagnostics were collected.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the number of diagnostics.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate over the diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Check whether any diagnostic has the given kind.
    pub fn has_kind(&self, kind: ErrorKind) -> bool {
        self.items.iter().any(|d| d.kind == kind)
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
