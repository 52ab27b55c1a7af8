//! Abstract Syntax Tree types for mystmark documents.
//!
//! This module contains all the node types produced by the parser.
//! The tree is designed to be:
//!
//! - **Zero-copy**: Uses `Cow<'a, str>` to borrow from input when possible
//! - **Span-tracked**: Every node includes source location information
//! - **Read-only after parse**: The only mutation after the parse pass is
//!   ordinal assignment in the [`LabelTable`] during cross-reference
//!   resolution

use crate::span::Span;
use std::collections::HashMap;
use std::path::PathBuf;

/// Borrowed or owned string type for zero-copy parsing.
pub type CowStr<'a> = std::borrow::Cow<'a, str>;

/// A parsed document.
///
/// The document is the root of the AST. It owns the content blocks, the
/// label table filled in by the cross-reference pass, and the footnote
/// and glossary indexes.
#[derive(Debug, Clone, PartialEq)]
pub struct Document<'a> {
    /// Content blocks in document order.
    pub blocks: Vec<Block<'a>>,
    /// Labeled entities and their assigned ordinals.
    pub labels: LabelTable<'a>,
    /// Footnote identifier → definition location.
    pub footnotes: HashMap<CowStr<'a>, Span>,
    /// Glossary term → definition location.
    pub glossary: HashMap<CowStr<'a>, Span>,
    /// Base path for relative link/image destinations. Recorded, never
    /// validated here; file existence checks belong to the consumer.
    pub base_path: Option<PathBuf>,
    /// Source span covering the entire document.
    pub span: Span,
}

/// The kind of a labeled entity, for per-kind ordinal counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    /// Images and figure-like directives.
    Figure,
    /// Math blocks and equation directives.
    Equation,
    /// Every other labeled directive.
    Other,
}

/// A single labeled entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelEntry {
    /// What counter this label draws from.
    pub kind: LabelKind,
    /// Auto-incremented number, assigned during cross-reference
    /// resolution. `None` only before the pass has run.
    pub ordinal: Option<u32>,
    /// Location of the labeled entity.
    pub span: Span,
}

/// Mapping from label to its entity, owned by the [`Document`].
///
/// Labels live in a single namespace: a figure and an equation may not
/// share a label string. Ordinals count per [`LabelKind`], so figures are
/// numbered independently from equations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelTable<'a> {
    entries: HashMap<CowStr<'a>, LabelEntry>,
    counters: [u32; 3],
}

/// Outcome of declaring a label during the cross-reference pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Declare {
    /// First time this label was seen.
    New,
    /// The same entity was re-visited (the pass is idempotent).
    Seen,
    /// Another entity already claimed the label; carries its location.
    Duplicate(Span),
}

impl<'a> LabelTable<'a> {
    /// Look up a label.
    pub fn get(&self, label: &str) -> Option<&LabelEntry> {
        self.entries.get(label)
    }

    /// Check whether any labels were collected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of labels in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over (label, entry) pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LabelEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_ref(), v))
    }

    /// Declare a labeled entity and assign its ordinal if it does not
    /// already carry one. Re-declaring the same entity (same span) is a
    /// no-op, which is what makes the cross-reference pass idempotent.
    pub(crate) fn declare(&mut self, label: CowStr<'a>, kind: LabelKind, span: Span) -> Declare {
        if let Some(existing) = self.entries.get_mut(label.as_ref()) {
            if existing.span == span {
                if existing.ordinal.is_none() {
                    existing.ordinal = Some(Self::bump(&mut self.counters, kind));
                }
                return Declare::Seen;
            }
            return Declare::Duplicate(existing.span);
        }
        let ordinal = Some(Self::bump(&mut self.counters, kind));
        self.entries.insert(label, LabelEntry { kind, ordinal, span });
        Declare::New
    }

    fn bump(counters: &mut [u32; 3], kind: LabelKind) -> u32 {
        let slot = match kind {
            LabelKind::Figure => 0,
            LabelKind::Equation => 1,
            LabelKind::Other => 2,
        };
        counters[slot] += 1;
        counters[slot]
    }
}

/// Block-level AST nodes.
///
/// Blocks are the primary structural elements of a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Block<'a> {
    /// Section heading (levels 1-6).
    Heading(Heading<'a>),
    /// Text paragraph with inline formatting.
    Paragraph(Paragraph<'a>),
    /// Block quotation, possibly nested, with an optional author line.
    Quote(Quote<'a>),
    /// Pipe table with per-column alignment.
    Table(Table<'a>),
    /// Display math (`$$ ... $$`), optionally labeled.
    Math(MathBlock<'a>),
    /// Footnote definition (`[^id]: text`).
    FootnoteDef(FootnoteDef<'a>),
    /// Fenced code block with optional language.
    CodeBlock(CodeBlock<'a>),
    /// Fenced `{name}` directive, specialized into a typed node.
    Directive(Directive<'a>),
    /// Horizontal rule / thematic break.
    ThematicBreak(Span),
}

impl<'a> Block<'a> {
    /// Source span of this block.
    pub fn span(&self) -> Span {
        match self {
            Block::Heading(h) => h.span,
            Block::Paragraph(p) => p.span,
            Block::Quote(q) => q.span,
            Block::Table(t) => t.span,
            Block::Math(m) => m.span,
            Block::FootnoteDef(f) => f.span,
            Block::CodeBlock(c) => c.span,
            Block::Directive(d) => d.span(),
            Block::ThematicBreak(s) => *s,
        }
    }
}

/// Section heading with level and inline content.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading<'a> {
    /// Heading level (1-6).
    pub level: u8,
    /// Inline content (may include formatting).
    pub content: Vec<Inline<'a>>,
    /// Source span.
    pub span: Span,
}

/// Text paragraph containing inline elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph<'a> {
    /// Inline content with formatting.
    pub content: Vec<Inline<'a>>,
    /// Source span.
    pub span: Span,
}

/// Block quotation.
///
/// Nesting depth is structural: a quote inside a quote is a `Quote`
/// block in `blocks`. A trailing `- Name` line becomes the author.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote<'a> {
    /// Quoted content blocks.
    pub blocks: Vec<Block<'a>>,
    /// Author annotation from a trailing `- Name` line.
    pub author: Option<Vec<Inline<'a>>>,
    /// Source span.
    pub span: Span,
}

/// Column alignment from the table separator row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// `:--`
    Left,
    /// `:-:`
    Center,
    /// `--:`
    Right,
    /// `---`
    Default,
}

/// Pipe table with a header row and per-column alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<'a> {
    /// Alignment per column, from the separator row.
    pub columns: Vec<Alignment>,
    /// The header row.
    pub header: TableRow<'a>,
    /// Data rows in order.
    pub rows: Vec<TableRow<'a>>,
    /// Source span.
    pub span: Span,
}

/// A single table row.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow<'a> {
    /// Cells in this row.
    pub cells: Vec<TableCell<'a>>,
    /// Source span.
    pub span: Span,
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell<'a> {
    /// Cell content (inline elements).
    pub content: Vec<Inline<'a>>,
    /// Source span.
    pub span: Span,
}

/// Display math block (LaTeX source).
#[derive(Debug, Clone, PartialEq)]
pub struct MathBlock<'a> {
    /// Label from a leading `\label{...}` or a `:label:` attribute.
    pub label: Option<CowStr<'a>>,
    /// LaTeX content.
    pub latex: CowStr<'a>,
    /// Source span.
    pub span: Span,
}

/// A block-level footnote definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FootnoteDef<'a> {
    /// Footnote identifier (e.g. "1", "note").
    pub id: CowStr<'a>,
    /// Definition content.
    pub content: Vec<Inline<'a>>,
    /// Source span.
    pub span: Span,
}

/// Fenced code block with syntax highlighting hint.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock<'a> {
    /// Language identifier (e.g. "rust", "python").
    pub lang: CowStr<'a>,
    /// Raw code content.
    pub content: CowStr<'a>,
    /// Source span.
    pub span: Span,
}

/// A specialized directive node.
///
/// Known directive names become typed variants; anything else is kept as
/// [`Passthrough`] so consumers can still emit something for directives
/// outside this core's subset.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive<'a> {
    /// `{image}` with source, options, and caption body.
    Image(ImageDirective<'a>),
    /// `{note}`, `{warning}`, `{tip}`, `{important}`, `{caution}`,
    /// or the generic `{admonition}`.
    Admonition(Admonition<'a>),
    /// `{csv-table}`; requires a `:file:` attribute.
    CsvTable(CsvTable<'a>),
    /// `{glossary}` with (term, definition) pairs.
    Glossary(Glossary<'a>),
    /// `{mermaid}` diagram source, kept verbatim for an external engine.
    Mermaid(Mermaid<'a>),
    /// Unknown directive, preserved opaquely.
    Passthrough(Passthrough<'a>),
}

impl<'a> Directive<'a> {
    /// Source span of this directive.
    pub fn span(&self) -> Span {
        match self {
            Directive::Image(d) => d.span,
            Directive::Admonition(d) => d.span,
            Directive::CsvTable(d) => d.span,
            Directive::Glossary(d) => d.span,
            Directive::Mermaid(d) => d.span,
            Directive::Passthrough(d) => d.span,
        }
    }

    /// Label attribute, if this directive kind carries one.
    pub fn label(&self) -> Option<&str> {
        match self {
            Directive::Image(d) => d.label.as_deref(),
            Directive::Admonition(d) => d.label.as_deref(),
            Directive::CsvTable(d) => d.label.as_deref(),
            Directive::Mermaid(d) => d.label.as_deref(),
            Directive::Glossary(_) => None,
            Directive::Passthrough(d) => d
                .attrs
                .iter()
                .find(|(k, _)| k == "label")
                .map(|(_, v)| v.as_ref()),
        }
    }
}

/// An `{image}` directive.
///
/// Attribute values stay strings at this layer; width coercion is the
/// renderer's concern.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDirective<'a> {
    /// Image source path or URL (the directive argument).
    pub src: CowStr<'a>,
    /// Alt text from `:alt:`.
    pub alt: Option<CowStr<'a>>,
    /// Label from `:label:`, counted as a figure.
    pub label: Option<CowStr<'a>>,
    /// Width string from `:width:` (e.g. "60%").
    pub width: Option<CowStr<'a>>,
    /// Alignment string from `:align:` (e.g. "center").
    pub align: Option<CowStr<'a>>,
    /// Caption blocks parsed from the directive body.
    pub caption: Vec<Block<'a>>,
    /// Source span.
    pub span: Span,
}

/// An admonition directive (note, warning, etc.).
#[derive(Debug, Clone, PartialEq)]
pub struct Admonition<'a> {
    /// Admonition kind: the directive name, or "admonition".
    pub kind: CowStr<'a>,
    /// Title: the directive argument, when present.
    pub title: Option<CowStr<'a>>,
    /// Label from `:label:`.
    pub label: Option<CowStr<'a>>,
    /// Content blocks.
    pub blocks: Vec<Block<'a>>,
    /// Source span.
    pub span: Span,
}

/// A `{csv-table}` directive. The table data itself lives in an external
/// file; this core records the reference.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable<'a> {
    /// Table title (the directive argument).
    pub title: Option<CowStr<'a>>,
    /// Required `:file:` attribute, relative to the document base path.
    pub file: CowStr<'a>,
    /// Raw `:header:` attribute, if present.
    pub header: Option<CowStr<'a>>,
    /// Label from `:label:`.
    pub label: Option<CowStr<'a>>,
    /// Source span.
    pub span: Span,
}

/// A `{glossary}` directive.
#[derive(Debug, Clone, PartialEq)]
pub struct Glossary<'a> {
    /// (term, definition) pairs in declaration order.
    pub entries: Vec<GlossaryEntry<'a>>,
    /// Source span.
    pub span: Span,
}

/// A single glossary entry.
#[derive(Debug, Clone, PartialEq)]
pub struct GlossaryEntry<'a> {
    /// The term being defined.
    pub term: CowStr<'a>,
    /// Definition content.
    pub definition: Vec<Inline<'a>>,
    /// Source span.
    pub span: Span,
}

/// A `{mermaid}` directive. The diagram source is kept verbatim; this
/// core never renders diagrams.
#[derive(Debug, Clone, PartialEq)]
pub struct Mermaid<'a> {
    /// Raw diagram source.
    pub source: CowStr<'a>,
    /// Label from `:label:`.
    pub label: Option<CowStr<'a>>,
    /// Source span.
    pub span: Span,
}

/// An unknown directive, preserved opaquely (forward-compatible).
#[derive(Debug, Clone, PartialEq)]
pub struct Passthrough<'a> {
    /// Directive name as written.
    pub name: CowStr<'a>,
    /// Argument text after the name, if any.
    pub arg: Option<CowStr<'a>>,
    /// `:key: value` attributes in declaration order.
    pub attrs: Vec<(CowStr<'a>, CowStr<'a>)>,
    /// Raw body text.
    pub body: CowStr<'a>,
    /// Source span.
    pub span: Span,
}

/// Inline-level AST nodes (within paragraphs, headings, cells, etc.).
#[derive(Debug, Clone, PartialEq)]
pub enum Inline<'a> {
    /// Plain text content.
    Text(Text<'a>),
    /// Emphasized text: italic, bold, or both.
    Emphasis(Emphasis<'a>),
    /// Strikethrough text (`~~deleted~~`).
    Strikethrough(Strikethrough<'a>),
    /// Backslash-escaped punctuation character.
    Escaped(Escaped),
    /// Inline code (`` `code` ``).
    Code(CodeSpan<'a>),
    /// Inline math from the `{math}` role.
    InlineMath(InlineMath<'a>),
    /// Subscript from the `{sub}` role.
    Subscript(Subscript<'a>),
    /// Superscript from the `{sup}` role.
    Superscript(Superscript<'a>),
    /// Hyperlink with text and destination.
    Link(Link<'a>),
    /// Bare URL, linked with text = destination.
    AutoLink(AutoLink<'a>),
    /// Image (`![alt](src)`).
    Image(Image<'a>),
    /// Footnote reference (`[^id]`).
    FootnoteRef(FootnoteRef<'a>),
    /// Citation (`@key`, `[@key1; @key2]`, `[prefix @key, suffix]`).
    Citation(Citation<'a>),
    /// Glossary term reference from the `{term}` role.
    TermRef(TermRef<'a>),
    /// Cross-reference (`[](#label)`), resolved against the label table.
    CrossRef(CrossRef<'a>),
}

/// Plain text content.
#[derive(Debug, Clone, PartialEq)]
pub struct Text<'a> {
    /// The text content.
    pub content: CowStr<'a>,
    /// Source span.
    pub span: Span,
}

/// Emphasis strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmphasisKind {
    /// Single delimiter pair (`*text*`).
    Italic,
    /// Double delimiter pair (`**text**`).
    Bold,
    /// Triple delimiter pair (`***text***`).
    BoldItalic,
}

/// Emphasized text with nested inline content.
#[derive(Debug, Clone, PartialEq)]
pub struct Emphasis<'a> {
    /// How strongly the text is emphasized.
    pub kind: EmphasisKind,
    /// Nested inline content.
    pub content: Vec<Inline<'a>>,
    /// Source span.
    pub span: Span,
}

/// Strikethrough text.
#[derive(Debug, Clone, PartialEq)]
pub struct Strikethrough<'a> {
    /// Nested inline content.
    pub content: Vec<Inline<'a>>,
    /// Source span.
    pub span: Span,
}

/// A backslash-escaped punctuation character, rendered literally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Escaped {
    /// The escaped character.
    pub ch: char,
    /// Source span (covers backslash and character).
    pub span: Span,
}

/// Inline code span.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeSpan<'a> {
    /// Code content (not parsed for formatting).
    pub content: CowStr<'a>,
    /// Source span.
    pub span: Span,
}

/// Inline math from the `{math}` role.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineMath<'a> {
    /// LaTeX content.
    pub latex: CowStr<'a>,
    /// Source span.
    pub span: Span,
}

/// Subscript literal from the `{sub}` role.
#[derive(Debug, Clone, PartialEq)]
pub struct Subscript<'a> {
    /// Literal content.
    pub content: CowStr<'a>,
    /// Source span.
    pub span: Span,
}

/// Superscript literal from the `{sup}` role.
#[derive(Debug, Clone, PartialEq)]
pub struct Superscript<'a> {
    /// Literal content.
    pub content: CowStr<'a>,
    /// Source span.
    pub span: Span,
}

/// Hyperlink with text and destination.
#[derive(Debug, Clone, PartialEq)]
pub struct Link<'a> {
    /// Link text (may contain nested formatting).
    pub text: Vec<Inline<'a>>,
    /// Destination URL or path.
    pub dest: CowStr<'a>,
    /// Source span.
    pub span: Span,
}

/// Automatically detected URL (text = destination).
#[derive(Debug, Clone, PartialEq)]
pub struct AutoLink<'a> {
    /// The URL.
    pub url: CowStr<'a>,
    /// Source span.
    pub span: Span,
}

/// Inline image. Caption text following the image stays ordinary sibling
/// inline content, not part of this node.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<'a> {
    /// Alt text.
    pub alt: CowStr<'a>,
    /// Image source path or URL.
    pub src: CowStr<'a>,
    /// Label, when attached through directive syntax.
    pub label: Option<CowStr<'a>>,
    /// Source span.
    pub span: Span,
}

/// Reference to a footnote.
#[derive(Debug, Clone, PartialEq)]
pub struct FootnoteRef<'a> {
    /// Footnote identifier being referenced.
    pub id: CowStr<'a>,
    /// Source span.
    pub span: Span,
}

/// A citation with one or more keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Citation<'a> {
    /// Cited keys in order.
    pub keys: Vec<CowStr<'a>>,
    /// Free text before the first key (bracketed form only).
    pub prefix: Option<CowStr<'a>>,
    /// Free text after the last key (bracketed form only).
    pub suffix: Option<CowStr<'a>>,
    /// Source span.
    pub span: Span,
}

/// Reference to a glossary term.
#[derive(Debug, Clone, PartialEq)]
pub struct TermRef<'a> {
    /// The referenced term.
    pub term: CowStr<'a>,
    /// Source span.
    pub span: Span,
}

/// A cross-reference to a labeled entity.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossRef<'a> {
    /// Target label (without the leading `#`).
    pub label: CowStr<'a>,
    /// Source span.
    pub span: Span,
}
