//! Python bindings for the mystmark parser.

use mystmark_core::{
    ast::{
        Alignment, Block, Directive, Document, EmphasisKind, Inline, LabelEntry, LabelKind,
    },
    error::{Diagnostic as CoreDiagnostic, ErrorKind as CoreErrorKind},
    span::Span as CoreSpan,
    ParseResult as CoreParseResult, Parser as CoreParser,
};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

// ============================================================================
// Span
// ============================================================================

/// Source location in the input text (byte offsets).
#[pyclass(frozen, get_all, name = "Span")]
#[derive(Clone)]
pub struct PySpan {
    pub start: u32,
    pub end: u32,
}

#[pymethods]
impl PySpan {
    fn __repr__(&self) -> String {
        format!("Span({}, {})", self.start, self.end)
    }

    #[getter]
    fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }
}

impl From<CoreSpan> for PySpan {
    fn from(s: CoreSpan) -> Self {
        PySpan {
            start: s.start,
            end: s.end,
        }
    }
}

// ============================================================================
// Enums
// ============================================================================

/// Diagnostic category.
#[pyclass(frozen, eq, eq_int, name = "ErrorKind")]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PyErrorKind {
    UnterminatedBlock,
    MalformedTable,
    MalformedDirective,
    UnresolvedLabel,
    DuplicateLabel,
    UnresolvedFootnote,
    UnresolvedTerm,
}

impl From<CoreErrorKind> for PyErrorKind {
    fn from(k: CoreErrorKind) -> Self {
        match k {
            CoreErrorKind::UnterminatedBlock => PyErrorKind::UnterminatedBlock,
            CoreErrorKind::MalformedTable => PyErrorKind::MalformedTable,
            CoreErrorKind::MalformedDirective => PyErrorKind::MalformedDirective,
            CoreErrorKind::UnresolvedLabel => PyErrorKind::UnresolvedLabel,
            CoreErrorKind::DuplicateLabel => PyErrorKind::DuplicateLabel,
            CoreErrorKind::UnresolvedFootnote => PyErrorKind::UnresolvedFootnote,
            CoreErrorKind::UnresolvedTerm => PyErrorKind::UnresolvedTerm,
        }
    }
}

/// Kind of a labeled entity.
#[pyclass(frozen, eq, eq_int, name = "LabelKind")]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PyLabelKind {
    Figure,
    Equation,
    Other,
}

impl From<LabelKind> for PyLabelKind {
    fn from(k: LabelKind) -> Self {
        match k {
            LabelKind::Figure => PyLabelKind::Figure,
            LabelKind::Equation => PyLabelKind::Equation,
            LabelKind::Other => PyLabelKind::Other,
        }
    }
}

/// A labeled entity with its assigned ordinal.
#[pyclass(frozen, get_all, name = "LabelEntry")]
#[derive(Clone)]
pub struct PyLabelEntry {
    pub kind: PyLabelKind,
    pub ordinal: Option<u32>,
    pub span: PySpan,
}

#[pymethods]
impl PyLabelEntry {
    fn __repr__(&self) -> String {
        format!("LabelEntry({:?}, ordinal={:?})", self.kind, self.ordinal)
    }
}

impl From<LabelEntry> for PyLabelEntry {
    fn from(e: LabelEntry) -> Self {
        PyLabelEntry {
            kind: e.kind.into(),
            ordinal: e.ordinal,
            span: e.span.into(),
        }
    }
}

/// A parse diagnostic.
#[pyclass(frozen, get_all, name = "Diagnostic")]
#[derive(Clone)]
pub struct PyDiagnostic {
    pub message: String,
    pub span: Option<PySpan>,
    pub kind: PyErrorKind,
    pub related: Option<PySpan>,
}

#[pymethods]
impl PyDiagnostic {
    fn __repr__(&self) -> String {
        format!("Diagnostic({:?}, {:?})", self.message, self.kind)
    }

    fn __str__(&self) -> String {
        match &self.span {
            Some(s) => format!("{} at bytes {}..{}", self.message, s.start, s.end),
            None => self.message.clone(),
        }
    }
}

impl From<CoreDiagnostic> for PyDiagnostic {
    fn from(d: CoreDiagnostic) -> Self {
        PyDiagnostic {
            message: d.message,
            span: d.span.map(PySpan::from),
            kind: d.kind.into(),
            related: d.related.map(PySpan::from),
        }
    }
}

// ============================================================================
// Block types
// ============================================================================

/// Section heading.
#[pyclass(frozen, get_all, name = "Heading")]
pub struct PyHeading {
    pub level: u8,
    pub content: PyObject,
    pub span: PySpan,
}

/// Text paragraph.
#[pyclass(frozen, get_all, name = "Paragraph")]
pub struct PyParagraph {
    pub content: PyObject,
    pub span: PySpan,
}

/// Block quote with optional author.
#[pyclass(frozen, get_all, name = "Quote")]
pub struct PyQuote {
    pub blocks: PyObject,
    pub author: Option<PyObject>,
    pub span: PySpan,
}

/// Column alignment.
#[pyclass(frozen, eq, eq_int, name = "Alignment")]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PyAlignment {
    Left,
    Center,
    Right,
    Default,
}

impl From<Alignment> for PyAlignment {
    fn from(a: Alignment) -> Self {
        match a {
            Alignment::Left => PyAlignment::Left,
            Alignment::Center => PyAlignment::Center,
            Alignment::Right => PyAlignment::Right,
            Alignment::Default => PyAlignment::Default,
        }
    }
}

/// Table cell.
#[pyclass(frozen, get_all, name = "TableCell")]
pub struct PyTableCell {
    pub content: PyObject,
    pub span: PySpan,
}

/// Table row.
#[pyclass(frozen, get_all, name = "TableRow")]
pub struct PyTableRow {
    pub cells: PyObject,
    pub span: PySpan,
}

/// Pipe table.
#[pyclass(frozen, get_all, name = "Table")]
pub struct PyTable {
    pub columns: Vec<PyAlignment>,
    pub header: PyObject,
    pub rows: PyObject,
    pub span: PySpan,
}

/// Display math block.
#[pyclass(frozen, get_all, name = "MathBlock")]
pub struct PyMathBlock {
    pub label: Option<String>,
    pub latex: String,
    pub span: PySpan,
}

/// Footnote definition.
#[pyclass(frozen, get_all, name = "FootnoteDef")]
pub struct PyFootnoteDef {
    pub id: String,
    pub content: PyObject,
    pub span: PySpan,
}

/// Fenced code block.
#[pyclass(frozen, get_all, name = "CodeBlock")]
pub struct PyCodeBlock {
    pub lang: String,
    pub content: String,
    pub span: PySpan,
}

/// Image directive.
#[pyclass(frozen, get_all, name = "ImageBlock")]
pub struct PyImageBlock {
    pub src: String,
    pub alt: Option<String>,
    pub label: Option<String>,
    pub width: Option<String>,
    pub align: Option<String>,
    pub caption: PyObject,
    pub span: PySpan,
}

/// Admonition directive.
#[pyclass(frozen, get_all, name = "Admonition")]
pub struct PyAdmonition {
    pub kind: String,
    pub title: Option<String>,
    pub label: Option<String>,
    pub blocks: PyObject,
    pub span: PySpan,
}

/// CSV table directive.
#[pyclass(frozen, get_all, name = "CsvTable")]
pub struct PyCsvTable {
    pub title: Option<String>,
    pub file: String,
    pub header: Option<String>,
    pub label: Option<String>,
    pub span: PySpan,
}

/// Glossary entry.
#[pyclass(frozen, get_all, name = "GlossaryEntry")]
pub struct PyGlossaryEntry {
    pub term: String,
    pub definition: PyObject,
    pub span: PySpan,
}

/// Glossary directive.
#[pyclass(frozen, get_all, name = "Glossary")]
pub struct PyGlossary {
    pub entries: PyObject,
    pub span: PySpan,
}

/// Mermaid diagram placeholder.
#[pyclass(frozen, get_all, name = "Mermaid")]
pub struct PyMermaid {
    pub source: String,
    pub label: Option<String>,
    pub span: PySpan,
}

/// Unknown directive, preserved opaquely.
#[pyclass(frozen, get_all, name = "Passthrough")]
pub struct PyPassthrough {
    pub name: String,
    pub arg: Option<String>,
    pub attrs: Vec<(String, String)>,
    pub body: String,
    pub span: PySpan,
}

/// Thematic break (horizontal rule).
#[pyclass(frozen, get_all, name = "ThematicBreak")]
pub struct PyThematicBreak {
    pub span: PySpan,
}

// ============================================================================
// Inline types
// ============================================================================

/// Plain text.
#[pyclass(frozen, get_all, name = "Text")]
pub struct PyText {
    pub content: String,
    pub span: PySpan,
}

/// Emphasis strength.
#[pyclass(frozen, eq, eq_int, name = "EmphasisKind")]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PyEmphasisKind {
    Italic,
    Bold,
    BoldItalic,
}

/// Emphasized text.
#[pyclass(frozen, get_all, name = "Emphasis")]
pub struct PyEmphasis {
    pub kind: PyEmphasisKind,
    pub content: PyObject,
    pub span: PySpan,
}

/// Strikethrough.
#[pyclass(frozen, get_all, name = "Strikethrough")]
pub struct PyStrikethrough {
    pub content: PyObject,
    pub span: PySpan,
}

/// Escaped punctuation character.
#[pyclass(frozen, get_all, name = "Escaped")]
pub struct PyEscaped {
    pub ch: char,
    pub span: PySpan,
}

/// Inline code.
#[pyclass(frozen, get_all, name = "CodeSpan")]
pub struct PyCodeSpan {
    pub content: String,
    pub span: PySpan,
}

/// Inline math.
#[pyclass(frozen, get_all, name = "InlineMath")]
pub struct PyInlineMath {
    pub latex: String,
    pub span: PySpan,
}

/// Subscript literal.
#[pyclass(frozen, get_all, name = "Subscript")]
pub struct PySubscript {
    pub content: String,
    pub span: PySpan,
}

/// Superscript literal.
#[pyclass(frozen, get_all, name = "Superscript")]
pub struct PySuperscript {
    pub content: String,
    pub span: PySpan,
}

/// Hyperlink.
#[pyclass(frozen, get_all, name = "Link")]
pub struct PyLink {
    pub text: PyObject,
    pub dest: String,
    pub span: PySpan,
}

/// Auto-detected URL.
#[pyclass(frozen, get_all, name = "AutoLink")]
pub struct PyAutoLink {
    pub url: String,
    pub span: PySpan,
}

/// Inline image.
#[pyclass(frozen, get_all, name = "Image")]
pub struct PyImage {
    pub alt: String,
    pub src: String,
    pub label: Option<String>,
    pub span: PySpan,
}

/// Footnote reference.
#[pyclass(frozen, get_all, name = "FootnoteRef")]
pub struct PyFootnoteRef {
    pub id: String,
    pub span: PySpan,
}

/// Citation.
#[pyclass(frozen, get_all, name = "Citation")]
pub struct PyCitation {
    pub keys: Vec<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub span: PySpan,
}

/// Glossary term reference.
#[pyclass(frozen, get_all, name = "TermRef")]
pub struct PyTermRef {
    pub term: String,
    pub span: PySpan,
}

/// Cross-reference to a labeled entity.
#[pyclass(frozen, get_all, name = "CrossRef")]
pub struct PyCrossRef {
    pub label: String,
    pub span: PySpan,
}

// ============================================================================
// Conversion
// ============================================================================

fn convert_inlines(py: Python<'_>, inlines: Vec<Inline>) -> PyObject {
    let list = PyList::empty(py);
    for inline in inlines {
        list.append(convert_inline(py, inline)).unwrap();
    }
    list.into()
}

fn convert_inline(py: Python<'_>, inline: Inline) -> PyObject {
    match inline {
        Inline::Text(t) => Py::new(
            py,
            PyText {
                content: t.content.into_owned(),
                span: t.span.into(),
            },
        )
        .unwrap()
        .into_any(),
        Inline::Emphasis(e) => Py::new(
            py,
            PyEmphasis {
                kind: match e.kind {
                    EmphasisKind::Italic => PyEmphasisKind::Italic,
                    EmphasisKind::Bold => PyEmphasisKind::Bold,
                    EmphasisKind::BoldItalic => PyEmphasisKind::BoldItalic,
                },
                content: convert_inlines(py, e.content),
                span: e.span.into(),
            },
        )
        .unwrap()
        .into_any(),
        Inline::Strikethrough(s) => Py::new(
            py,
            PyStrikethrough {
                content: convert_inlines(py, s.content),
                span: s.span.into(),
            },
        )
        .unwrap()
        .into_any(),
        Inline::Escaped(e) => Py::new(
            py,
            PyEscaped {
                ch: e.ch,
                span: e.span.into(),
            },
        )
        .unwrap()
        .into_any(),
        Inline::Code(c) => Py::new(
            py,
            PyCodeSpan {
                content: c.content.into_owned(),
                span: c.span.into(),
            },
        )
        .unwrap()
        .into_any(),
        Inline::InlineMath(m) => Py::new(
            py,
            PyInlineMath {
                latex: m.latex.into_owned(),
                span: m.span.into(),
            },
        )
        .unwrap()
        .into_any(),
        Inline::Subscript(s) => Py::new(
            py,
            PySubscript {
                content: s.content.into_owned(),
                span: s.span.into(),
            },
        )
        .unwrap()
        .into_any(),
        Inline::Superscript(s) => Py::new(
            py,
            PySuperscript {
                content: s.content.into_owned(),
                span: s.span.into(),
            },
        )
        .unwrap()
        .into_any(),
        Inline::Link(l) => Py::new(
            py,
            PyLink {
                text: convert_inlines(py, l.text),
                dest: l.dest.into_owned(),
                span: l.span.into(),
            },
        )
        .unwrap()
        .into_any(),
        Inline::AutoLink(a) => Py::new(
            py,
            PyAutoLink {
                url: a.url.into_owned(),
                span: a.span.into(),
            },
        )
        .unwrap()
        .into_any(),
        Inline::Image(i) => Py::new(
            py,
            PyImage {
                alt: i.alt.into_owned(),
                src: i.src.into_owned(),
                label: i.label.map(|l| l.into_owned()),
                span: i.span.into(),
            },
        )
        .unwrap()
        .into_any(),
        Inline::FootnoteRef(f) => Py::new(
            py,
            PyFootnoteRef {
                id: f.id.into_owned(),
                span: f.span.into(),
            },
        )
        .unwrap()
        .into_any(),
        Inline::Citation(c) => Py::new(
            py,
            PyCitation {
                keys: c.keys.into_iter().map(|k| k.into_owned()).collect(),
                prefix: c.prefix.map(|p| p.into_owned()),
                suffix: c.suffix.map(|s| s.into_owned()),
                span: c.span.into(),
            },
        )
        .unwrap()
        .into_any(),
        Inline::TermRef(t) => Py::new(
            py,
            PyTermRef {
                term: t.term.into_owned(),
                span: t.span.into(),
            },
        )
        .unwrap()
        .into_any(),
        Inline::CrossRef(c) => Py::new(
            py,
            PyCrossRef {
                label: c.label.into_owned(),
                span: c.span.into(),
            },
        )
        .unwrap()
        .into_any(),
    }
}

fn convert_blocks(py: Python<'_>, blocks: Vec<Block>) -> PyObject {
    let list = PyList::empty(py);
    for block in blocks {
        list.append(convert_block(py, block)).unwrap();
    }
    list.into()
}

fn convert_block(py: Python<'_>, block: Block) -> PyObject {
    match block {
        Block::Heading(h) => Py::new(
            py,
            PyHeading {
                level: h.level,
                content: convert_inlines(py, h.content),
                span: h.span.into(),
            },
        )
        .unwrap()
        .into_any(),
        Block::Paragraph(p) => Py::new(
            py,
            PyParagraph {
                content: convert_inlines(py, p.content),
                span: p.span.into(),
            },
        )
        .unwrap()
        .into_any(),
        Block::Quote(q) => Py::new(
            py,
            PyQuote {
                blocks: convert_blocks(py, q.blocks),
                author: q.author.map(|a| convert_inlines(py, a)),
                span: q.span.into(),
            },
        )
        .unwrap()
        .into_any(),
        Block::Table(t) => {
            let header_cells = PyList::empty(py);
            for cell in t.header.cells {
                let tc = Py::new(
                    py,
                    PyTableCell {
                        content: convert_inlines(py, cell.content),
                        span: cell.span.into(),
                    },
                )
                .unwrap();
                header_cells.append(tc).unwrap();
            }
            let header = Py::new(
                py,
                PyTableRow {
                    cells: header_cells.into(),
                    span: t.header.span.into(),
                },
            )
            .unwrap();

            let rows = PyList::empty(py);
            for row in t.rows {
                let cells = PyList::empty(py);
                for cell in row.cells {
                    let tc = Py::new(
                        py,
                        PyTableCell {
                            content: convert_inlines(py, cell.content),
                            span: cell.span.into(),
                        },
                    )
                    .unwrap();
                    cells.append(tc).unwrap();
                }
                let tr = Py::new(
                    py,
                    PyTableRow {
                        cells: cells.into(),
                        span: row.span.into(),
                    },
                )
                .unwrap();
                rows.append(tr).unwrap();
            }
            Py::new(
                py,
                PyTable {
                    columns: t.columns.into_iter().map(PyAlignment::from).collect(),
                    header: header.into_any(),
                    rows: rows.into(),
                    span: t.span.into(),
                },
            )
            .unwrap()
            .into_any()
        }
        Block::Math(m) => Py::new(
            py,
            PyMathBlock {
                label: m.label.map(|l| l.into_owned()),
                latex: m.latex.into_owned(),
                span: m.span.into(),
            },
        )
        .unwrap()
        .into_any(),
        Block::FootnoteDef(f) => Py::new(
            py,
            PyFootnoteDef {
                id: f.id.into_owned(),
                content: convert_inlines(py, f.content),
                span: f.span.into(),
            },
        )
        .unwrap()
        .into_any(),
        Block::CodeBlock(c) => Py::new(
            py,
            PyCodeBlock {
                lang: c.lang.into_owned(),
                content: c.content.into_owned(),
                span: c.span.into(),
            },
        )
        .unwrap()
        .into_any(),
        Block::Directive(d) => convert_directive(py, d),
        Block::ThematicBreak(span) => Py::new(py, PyThematicBreak { span: span.into() })
            .unwrap()
            .into_any(),
    }
}

fn convert_directive(py: Python<'_>, directive: Directive) -> PyObject {
    match directive {
        Directive::Image(i) => Py::new(
            py,
            PyImageBlock {
                src: i.src.into_owned(),
                alt: i.alt.map(|a| a.into_owned()),
                label: i.label.map(|l| l.into_owned()),
                width: i.width.map(|w| w.into_owned()),
                align: i.align.map(|a| a.into_owned()),
                caption: convert_blocks(py, i.caption),
                span: i.span.into(),
            },
        )
        .unwrap()
        .into_any(),
        Directive::Admonition(a) => Py::new(
            py,
            PyAdmonition {
                kind: a.kind.into_owned(),
                title: a.title.map(|t| t.into_owned()),
                label: a.label.map(|l| l.into_owned()),
                blocks: convert_blocks(py, a.blocks),
                span: a.span.into(),
            },
        )
        .unwrap()
        .into_any(),
        Directive::CsvTable(c) => Py::new(
            py,
            PyCsvTable {
                title: c.title.map(|t| t.into_owned()),
                file: c.file.into_owned(),
                header: c.header.map(|h| h.into_owned()),
                label: c.label.map(|l| l.into_owned()),
                span: c.span.into(),
            },
        )
        .unwrap()
        .into_any(),
        Directive::Glossary(g) => {
            let entries = PyList::empty(py);
            for entry in g.entries {
                let ge = Py::new(
                    py,
                    PyGlossaryEntry {
                        term: entry.term.into_owned(),
                        definition: convert_inlines(py, entry.definition),
                        span: entry.span.into(),
                    },
                )
                .unwrap();
                entries.append(ge).unwrap();
            }
            Py::new(
                py,
                PyGlossary {
                    entries: entries.into(),
                    span: g.span.into(),
                },
            )
            .unwrap()
            .into_any()
        }
        Directive::Mermaid(m) => Py::new(
            py,
            PyMermaid {
                source: m.source.into_owned(),
                label: m.label.map(|l| l.into_owned()),
                span: m.span.into(),
            },
        )
        .unwrap()
        .into_any(),
        Directive::Passthrough(p) => Py::new(
            py,
            PyPassthrough {
                name: p.name.into_owned(),
                arg: p.arg.map(|a| a.into_owned()),
                attrs: p
                    .attrs
                    .into_iter()
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect(),
                body: p.body.into_owned(),
                span: p.span.into(),
            },
        )
        .unwrap()
        .into_any(),
    }
}

// ============================================================================
// PyDocument
// ============================================================================

/// A parsed mystmark document.
#[pyclass(frozen, name = "Document")]
pub struct PyDocument {
    #[pyo3(get)]
    pub blocks: PyObject,
    #[pyo3(get)]
    pub labels: PyObject,
    #[pyo3(get)]
    pub footnotes: PyObject,
    #[pyo3(get)]
    pub glossary: PyObject,
    #[pyo3(get)]
    pub span: PySpan,
}

#[pymethods]
impl PyDocument {
    fn __repr__(&self, py: Python<'_>) -> String {
        let blocks: &Bound<'_, PyList> = self.blocks.downcast_bound(py).unwrap();
        let labels: &Bound<'_, PyDict> = self.labels.downcast_bound(py).unwrap();
        format!(
            "Document(blocks={}, labels={})",
            blocks.len(),
            labels.len()
        )
    }

    fn __len__(&self, py: Python<'_>) -> usize {
        let blocks: &Bound<'_, PyList> = self.blocks.downcast_bound(py).unwrap();
        blocks.len()
    }
}

fn convert_document(py: Python<'_>, doc: Document) -> PyDocument {
    let labels = PyDict::new(py);
    for (label, entry) in doc.labels.iter() {
        labels
            .set_item(label, PyLabelEntry::from(*entry))
            .unwrap();
    }

    let footnotes = PyDict::new(py);
    for (id, span) in &doc.footnotes {
        footnotes
            .set_item(id.as_ref(), PySpan::from(*span))
            .unwrap();
    }

    let glossary = PyDict::new(py);
    for (term, span) in &doc.glossary {
        glossary
            .set_item(term.as_ref(), PySpan::from(*span))
            .unwrap();
    }

    let span = doc.span.into();
    PyDocument {
        blocks: convert_blocks(py, doc.blocks),
        labels: labels.into(),
        footnotes: footnotes.into(),
        glossary: glossary.into(),
        span,
    }
}

// ============================================================================
// ParseResult
// ============================================================================

/// Result of parsing with collected diagnostics.
#[pyclass(frozen, name = "ParseResult")]
pub struct PyParseResult {
    #[pyo3(get)]
    pub document: Py<PyDocument>,
    #[pyo3(get)]
    pub diagnostics: Vec<PyDiagnostic>,
}

#[pymethods]
impl PyParseResult {
    #[getter]
    fn ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    fn __repr__(&self, py: Python<'_>) -> String {
        let doc = self.document.borrow(py);
        let blocks: &Bound<'_, PyList> = doc.blocks.downcast_bound(py).unwrap();
        format!(
            "ParseResult(ok={}, blocks={}, diagnostics={})",
            self.diagnostics.is_empty(),
            blocks.len(),
            self.diagnostics.len()
        )
    }
}

// ============================================================================
// Parser
// ============================================================================

/// mystmark parser.
#[pyclass(name = "Parser")]
pub struct PyParser {}

#[pymethods]
impl PyParser {
    #[new]
    fn new() -> Self {
        PyParser {}
    }

    /// Parse a document string. Raises ValueError on the first error.
    #[pyo3(text_signature = "(self, input)")]
    fn parse(&self, py: Python<'_>, input: &str) -> PyResult<PyDocument> {
        let mut parser = CoreParser::new();
        match parser.parse_strict(input) {
            Ok(doc) => Ok(convert_document(py, doc)),
            Err(e) => Err(pyo3::exceptions::PyValueError::new_err(e.to_string())),
        }
    }

    /// Parse with diagnostics collected. Always returns a result.
    #[pyo3(text_signature = "(self, input)")]
    fn parse_with_recovery(&self, py: Python<'_>, input: &str) -> PyParseResult {
        let mut parser = CoreParser::new();
        let CoreParseResult {
            document,
            diagnostics,
        } = parser.parse(input);
        PyParseResult {
            document: Py::new(py, convert_document(py, document)).unwrap(),
            diagnostics: diagnostics.into_iter().map(PyDiagnostic::from).collect(),
        }
    }

    fn __repr__(&self) -> String {
        "Parser()".to_string()
    }
}

// ============================================================================
// Module functions
// ============================================================================

/// Parse a mystmark string.
///
/// Args:
///     input: Document string to parse
///
/// Returns:
///     Document: Parsed document
///
/// Raises:
///     ValueError: On parse error
#[pyfunction]
#[pyo3(text_signature = "(input)")]
fn parse(py: Python<'_>, input: &str) -> PyResult<PyDocument> {
    let p = PyParser::new();
    p.parse(py, input)
}

/// Parse with diagnostics collected. Always returns a result.
///
/// Args:
///     input: Document string
///
/// Returns:
///     ParseResult: Result with document and diagnostics
#[pyfunction]
#[pyo3(text_signature = "(input)")]
fn parse_with_recovery(py: Python<'_>, input: &str) -> PyParseResult {
    let p = PyParser::new();
    p.parse_with_recovery(py, input)
}

// ============================================================================
// Module
// ============================================================================

/// mystmark - Markdown/MyST-dialect parser with cross-reference resolution.
#[pymodule]
fn pymyst(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySpan>()?;
    m.add_class::<PyErrorKind>()?;
    m.add_class::<PyDiagnostic>()?;
    m.add_class::<PyLabelKind>()?;
    m.add_class::<PyLabelEntry>()?;
    m.add_class::<PyParser>()?;
    m.add_class::<PyDocument>()?;
    m.add_class::<PyParseResult>()?;
    m.add_class::<PyHeading>()?;
    m.add_class::<PyParagraph>()?;
    m.add_class::<PyQuote>()?;
    m.add_class::<PyAlignment>()?;
    m.add_class::<PyTable>()?;
    m.add_class::<PyTableRow>()?;
    m.add_class::<PyTableCell>()?;
    m.add_class::<PyMathBlock>()?;
    m.add_class::<PyFootnoteDef>()?;
    m.add_class::<PyCodeBlock>()?;
    m.add_class::<PyImageBlock>()?;
    m.add_class::<PyAdmonition>()?;
    m.add_class::<PyCsvTable>()?;
    m.add_class::<PyGlossary>()?;
    m.add_class::<PyGlossaryEntry>()?;
    m.add_class::<PyMermaid>()?;
    m.add_class::<PyPassthrough>()?;
    m.add_class::<PyThematicBreak>()?;
    m.add_class::<PyText>()?;
    m.add_class::<PyEmphasisKind>()?;
    m.add_class::<PyEmphasis>()?;
    m.add_class::<PyStrikethrough>()?;
    m.add_class::<PyEscaped>()?;
    m.add_class::<PyCodeSpan>()?;
    m.add_class::<PyInlineMath>()?;
    m.add_class::<PySubscript>()?;
    m.add_class::<PySuperscript>()?;
    m.add_class::<PyLink>()?;
    m.add_class::<PyAutoLink>()?;
    m.add_class::<PyImage>()?;
    m.add_class::<PyFootnoteRef>()?;
    m.add_class::<PyCitation>()?;
    m.add_class::<PyTermRef>()?;
    m.add_class::<PyCrossRef>()?;
    m.add_function(wrap_pyfunction!(parse, m)?)?;
    m.add_function(wrap_pyfunction!(parse_with_recovery, m)?)?;
    Ok(())
}
