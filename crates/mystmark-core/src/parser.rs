//! Block scanner and parse orchestration.
//!
//! Borrows directly from input, avoiding String allocations. Structural
//! errors degrade the offending region to a paragraph of literal text
//! and parsing continues, so one bad block never aborts the document.
//!
//! The passes run strictly in order: block scan, per-block inline
//! resolution, directive specialization, then cross-reference
//! resolution over the assembled tree.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::ast::{
    Alignment, Block, CodeBlock, Document, FootnoteDef, Heading, Inline, LabelTable, MathBlock,
    Paragraph, Quote, Table, TableCell, TableRow, Text,
};
use crate::directive;
use crate::error::{Diagnostic, Diagnostics};
use crate::inline::parse_inlines;
use crate::lexer::{Lexer, Line};
use crate::resolve;
use crate::span::Span;

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Base path for relative link/image destinations. Recorded on the
    /// document; never validated by this core.
    pub base_path: Option<PathBuf>,
    /// Maximum nesting depth for quotes and directive bodies. Content
    /// past the bound is kept as literal text.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            base_path: None,
            max_depth: 16,
        }
    }
}

/// Result of a parse: the document plus every diagnostic, in order.
#[derive(Debug)]
pub struct ParseResult<'a> {
    /// The parsed document (degraded where recovery kicked in).
    pub document: Document<'a>,
    /// Diagnostics collected during parsing and resolution.
    pub diagnostics: Diagnostics,
}

impl<'a> ParseResult<'a> {
    /// Check if parsing completed without diagnostics.
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Document parser with error recovery.
///
/// A parser value is cheap to construct and holds no cross-document
/// state, so parsing distinct documents in parallel needs no
/// synchronization.
pub struct Parser {
    options: ParseOptions,
    diagnostics: Diagnostics,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Create a parser with default options.
    #[inline]
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// Create a parser with the given options.
    #[inline]
    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            options,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Parse the input, collecting diagnostics instead of stopping at
    /// the first problem. The document is always returned.
    pub fn parse<'a>(&mut self, input: &'a str) -> ParseResult<'a> {
        self.diagnostics = Diagnostics::new();

        let mut lexer = Lexer::new(input);
        let blocks = self.parse_blocks(&mut lexer, input, 0);

        let mut document = Document {
            blocks,
            labels: LabelTable::default(),
            footnotes: HashMap::new(),
            glossary: HashMap::new(),
            base_path: self.options.base_path.clone(),
            span: Span::new(0, input.len() as u32),
        };

        let mut diagnostics = std::mem::take(&mut self.diagnostics);
        diagnostics.extend(resolve::resolve(&mut document));

        ParseResult {
            document,
            diagnostics,
        }
    }

    /// Parse the input, returning the first diagnostic as an error.
    pub fn parse_strict<'a>(&mut self, input: &'a str) -> Result<Document<'a>, Diagnostic> {
        let ParseResult {
            document,
            diagnostics,
        } = self.parse(input);
        match diagnostics.into_iter().next() {
            None => Ok(document),
            Some(first) => Err(first),
        }
    }

    /// Record a diagnostic.
    #[inline]
    pub(crate) fn diag(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Parse a sub-range of the input as nested blocks (directive
    /// bodies). Past the depth bound the content stays literal.
    pub(crate) fn nested_blocks<'a>(
        &mut self,
        input: &'a str,
        range: Span,
        depth: usize,
    ) -> Vec<Block<'a>> {
        if range.is_empty() {
            return Vec::new();
        }
        if depth >= self.options.max_depth {
            return vec![self.literal_paragraph(input, range)];
        }
        let mut lexer = Lexer::over(input, range);
        self.parse_blocks(&mut lexer, input, depth)
    }

    fn parse_blocks<'a>(
        &mut self,
        lexer: &mut Lexer<'a>,
        input: &'a str,
        depth: usize,
    ) -> Vec<Block<'a>> {
        let mut blocks = Vec::with_capacity(16);

        loop {
            lexer.skip_blank_lines();
            if lexer.is_eof() {
                break;
            }
            if let Some(block) = self.parse_block(lexer, input, depth) {
                blocks.push(block);
            }
        }

        blocks
    }

    fn parse_block<'a>(
        &mut self,
        lexer: &mut Lexer<'a>,
        input: &'a str,
        depth: usize,
    ) -> Option<Block<'a>> {
        let line = *lexer.peek_line()?;
        let trimmed = line.trimmed();

        match trimmed.as_bytes().first().copied() {
            Some(b'#') => self.parse_heading(lexer),
            Some(b'>') => self.parse_quote(lexer, input, depth),
            Some(b'`') if trimmed.starts_with("```") => self.parse_fence(lexer, input, depth),
            Some(b'$') if trimmed.starts_with("$$") => self.parse_math(lexer, input),
            Some(b'[') if is_footnote_def(trimmed) => self.parse_footnote_def(lexer),
            Some(b'-') if trimmed == "---" => {
                lexer.next_line();
                Some(Block::ThematicBreak(line.span))
            }
            Some(_) if at_table(lexer) => self.parse_table(lexer, input),
            Some(_) => self.parse_paragraph(lexer, input),
            None => {
                lexer.next_line();
                None
            }
        }
    }

    // ------------------------------------------------------------------
    // Headings
    // ------------------------------------------------------------------

    fn parse_heading<'a>(&mut self, lexer: &mut Lexer<'a>) -> Option<Block<'a>> {
        let line = lexer.next_line()?;
        let text = line.text;
        let level = text.bytes().take_while(|&b| b == b'#').count();

        // A run of more than six hashes is not a heading, and neither is
        // a hash without a following space
        let rest = &text[level..];
        if level == 0 || level > 6 || !rest.starts_with(' ') {
            return Some(Block::Paragraph(Paragraph {
                content: parse_inlines(text, line.span.start),
                span: line.span,
            }));
        }

        let content_text = rest.trim_start();
        let content_offset = line.span.start + (text.len() - content_text.len()) as u32;

        Some(Block::Heading(Heading {
            level: level as u8,
            content: parse_inlines(content_text, content_offset),
            span: line.span,
        }))
    }

    // ------------------------------------------------------------------
    // Block quotes
    // ------------------------------------------------------------------

    fn parse_quote<'a>(
        &mut self,
        lexer: &mut Lexer<'a>,
        input: &'a str,
        depth: usize,
    ) -> Option<Block<'a>> {
        let mut stripped: Vec<Span> = Vec::new();
        let mut span: Option<Span> = None;

        while let Some(line) = lexer.peek_line() {
            if !line.trimmed().starts_with('>') {
                break;
            }
            let line = *line;
            lexer.next_line();
            span = Some(match span {
                Some(s) => s.merge(line.span),
                None => line.span,
            });
            stripped.push(strip_quote_marker(input, line.span));
        }

        let span = span?;
        Some(Block::Quote(self.quote_from_lines(
            input, &stripped, depth, span,
        )))
    }

    /// Build a quote from marker-stripped line spans. Deeper `>` runs
    /// recurse; a trailing `- Name` line becomes the author.
    fn quote_from_lines<'a>(
        &mut self,
        input: &'a str,
        lines: &[Span],
        depth: usize,
        span: Span,
    ) -> Quote<'a> {
        if depth >= self.options.max_depth {
            return Quote {
                blocks: vec![self.literal_paragraph(input, span)],
                author: None,
                span,
            };
        }

        // The author line is the last non-blank line, when it is a
        // `- Name` annotation
        let mut author_idx: Option<usize> = None;
        for (i, sp) in lines.iter().enumerate().rev() {
            let text = slice(input, *sp).trim();
            if text.is_empty() {
                continue;
            }
            if text.starts_with("- ") {
                author_idx = Some(i);
            }
            break;
        }

        let author = author_idx.map(|i| {
            let sp = lines[i];
            let raw = slice(input, sp);
            let offset = raw.find("- ").unwrap_or(0) + 2;
            let name = raw[offset..].trim_end();
            parse_inlines(name, sp.start + offset as u32)
        });

        let mut blocks: Vec<Block<'a>> = Vec::new();
        let mut para: Vec<Span> = Vec::new();
        let end = author_idx.unwrap_or(lines.len());
        let mut i = 0;

        while i < end {
            let sp = lines[i];
            let text = slice(input, sp);
            let t = text.trim();

            if t.is_empty() {
                flush_paragraph(input, &mut para, &mut blocks);
                i += 1;
                continue;
            }

            if t.starts_with('>') {
                flush_paragraph(input, &mut para, &mut blocks);
                let mut inner: Vec<Span> = Vec::new();
                let mut inner_span = sp;
                while i < end {
                    let sp2 = lines[i];
                    if !slice(input, sp2).trim().starts_with('>') {
                        break;
                    }
                    inner.push(strip_quote_marker(input, sp2));
                    inner_span = inner_span.merge(sp2);
                    i += 1;
                }
                let nested = self.quote_from_lines(input, &inner, depth + 1, inner_span);
                blocks.push(Block::Quote(nested));
                continue;
            }

            para.push(sp);
            i += 1;
        }
        flush_paragraph(input, &mut para, &mut blocks);

        Quote {
            blocks,
            author,
            span,
        }
    }

    // ------------------------------------------------------------------
    // Fences: directives and code blocks
    // ------------------------------------------------------------------

    fn parse_fence<'a>(
        &mut self,
        lexer: &mut Lexer<'a>,
        input: &'a str,
        depth: usize,
    ) -> Option<Block<'a>> {
        let open = lexer.next_line()?;
        let trimmed = open.trimmed();
        let ticks = trimmed.bytes().take_while(|&b| b == b'`').count();
        let head = trimmed[ticks..].trim();

        let mut first_body: Option<Span> = None;
        let mut last_body: Option<Span> = None;
        let mut close: Option<Span> = None;

        while let Some(line) = lexer.peek_line() {
            let t = line.trimmed();
            if t.len() >= ticks && t.bytes().all(|b| b == b'`') {
                close = Some(line.span);
                lexer.next_line();
                break;
            }
            if first_body.is_none() {
                first_body = Some(line.span);
            }
            last_body = Some(line.span);
            lexer.next_line();
        }

        let body = match (first_body, last_body) {
            (Some(first), Some(last)) => Span::new(first.start, last.end),
            _ => Span::new(open.span.end, open.span.end),
        };

        let close = match close {
            Some(close) => close,
            None => {
                self.diag(Diagnostic::unterminated_block("fence", open.span));
                let region = Span::new(open.span.start, body.end.max(open.span.end));
                return Some(self.literal_paragraph(input, region));
            }
        };

        let span = Span::new(open.span.start, close.end);

        if let Some(rest) = head.strip_prefix('{') {
            if let Some(rb) = rest.find('}') {
                let name = &rest[..rb];
                let arg = rest[rb + 1..].trim();
                let arg = if arg.is_empty() { None } else { Some(arg) };
                return Some(directive::specialize(self, input, name, arg, body, span, depth));
            }
        }

        let lang = head.split_whitespace().next().unwrap_or("");
        Some(Block::CodeBlock(CodeBlock {
            lang: Cow::Borrowed(lang),
            content: Cow::Borrowed(slice(input, body)),
            span,
        }))
    }

    // ------------------------------------------------------------------
    // Math blocks
    // ------------------------------------------------------------------

    fn parse_math<'a>(&mut self, lexer: &mut Lexer<'a>, input: &'a str) -> Option<Block<'a>> {
        let open = lexer.next_line()?;
        let t = open.trimmed();

        // Single line: $$ ... $$
        if t.len() >= 4 && t.ends_with("$$") {
            return Some(self.make_math(&t[2..t.len() - 2], open.span));
        }

        // Content may start on the opening line ($$a + b)
        let lead = open.text.len() - open.text.trim_start().len();
        let opener_rest = open.span.start + (lead + 2) as u32;
        let mut first_content: Option<u32> = if t.len() > 2 { Some(opener_rest) } else { None };
        let mut content_end: u32 = open.span.end;
        let mut close: Option<Span> = None;

        while let Some(line) = lexer.peek_line() {
            let lt = line.trimmed();
            if lt == "$$" {
                close = Some(line.span);
                lexer.next_line();
                break;
            }
            if lt.ends_with("$$") {
                // Closing marker shares a line with the last content
                let cut = line.text.rfind("$$").unwrap_or(0);
                if first_content.is_none() {
                    first_content = Some(line.span.start);
                }
                content_end = line.span.start + cut as u32;
                close = Some(line.span);
                lexer.next_line();
                break;
            }
            if first_content.is_none() {
                first_content = Some(line.span.start);
            }
            content_end = line.span.end;
            lexer.next_line();
        }

        let close = match close {
            Some(close) => close,
            None => {
                self.diag(Diagnostic::unterminated_block("math block", open.span));
                let region = Span::new(open.span.start, content_end.max(open.span.end));
                return Some(self.literal_paragraph(input, region));
            }
        };

        let content_start = first_content.unwrap_or(content_end);
        let content = &input[content_start as usize..content_end as usize];
        Some(self.make_math(content, Span::new(open.span.start, close.end)))
    }

    fn make_math<'a>(&mut self, content: &'a str, span: Span) -> Block<'a> {
        let (label, latex) = split_math_label(content.trim());
        Block::Math(MathBlock {
            label: label.map(Cow::Borrowed),
            latex: Cow::Borrowed(latex),
            span,
        })
    }

    // ------------------------------------------------------------------
    // Footnote definitions
    // ------------------------------------------------------------------

    fn parse_footnote_def<'a>(&mut self, lexer: &mut Lexer<'a>) -> Option<Block<'a>> {
        let line = lexer.next_line()?;
        let text = line.text;
        let lead = text.len() - text.trim_start().len();
        let t = text.trim_start();

        // Shape is guaranteed by is_footnote_def
        let close = t.find("]:").unwrap_or(2);
        let id = &t[2..close];
        let rest = &t[close + 2..];
        let rest_lead = rest.len() - rest.trim_start().len();
        let content_offset = line.span.start + (lead + close + 2 + rest_lead) as u32;

        Some(Block::FootnoteDef(FootnoteDef {
            id: Cow::Borrowed(id),
            content: parse_inlines(rest.trim(), content_offset),
            span: line.span,
        }))
    }

    // ------------------------------------------------------------------
    // Tables
    // ------------------------------------------------------------------

    fn parse_table<'a>(&mut self, lexer: &mut Lexer<'a>, input: &'a str) -> Option<Block<'a>> {
        let header_line = lexer.next_line()?;
        let separator = lexer.next_line()?;

        let mut data: Vec<Line<'a>> = Vec::new();
        while let Some(line) = lexer.peek_line() {
            if line.is_blank() || !line.text.contains('|') {
                break;
            }
            data.push(*line);
            lexer.next_line();
        }

        let region = Span::new(
            header_line.span.start,
            data.last().map(|l| l.span.end).unwrap_or(separator.span.end),
        );

        let columns = parse_alignments(separator.trimmed());
        let header = parse_table_row(header_line);
        if header.cells.len() != columns.len() {
            self.diag(Diagnostic::malformed_table(
                columns.len(),
                header.cells.len(),
                header_line.span,
            ));
            return Some(self.literal_paragraph(input, region));
        }

        let mut rows = Vec::with_capacity(data.len());
        for line in &data {
            let row = parse_table_row(*line);
            if row.cells.len() != columns.len() {
                self.diag(Diagnostic::malformed_table(
                    columns.len(),
                    row.cells.len(),
                    line.span,
                ));
                return Some(self.literal_paragraph(input, region));
            }
            rows.push(row);
        }

        Some(Block::Table(Table {
            columns,
            header,
            rows,
            span: region,
        }))
    }

    // ------------------------------------------------------------------
    // Paragraphs
    // ------------------------------------------------------------------

    fn parse_paragraph<'a>(&mut self, lexer: &mut Lexer<'a>, input: &'a str) -> Option<Block<'a>> {
        let mut start: Option<Span> = None;
        let mut end = Span::default();

        loop {
            let brk = match lexer.peek_line() {
                None => true,
                Some(line) => line.is_blank() || starts_structure(line.trimmed()),
            };
            if brk || at_table(lexer) {
                break;
            }

            let line = lexer.next_line()?;
            if start.is_none() {
                start = Some(line.span);
            }
            end = line.span;
        }

        let start = start?;
        let content = &input[start.start as usize..end.end as usize];

        Some(Block::Paragraph(Paragraph {
            content: parse_inlines(content, start.start),
            span: Span::new(start.start, end.end),
        }))
    }

    /// Degrade a region to a paragraph of literal text (error recovery).
    fn literal_paragraph<'a>(&self, input: &'a str, span: Span) -> Block<'a> {
        let text = &input[span.start as usize..(span.end as usize).min(input.len())];
        Block::Paragraph(Paragraph {
            content: vec![Inline::Text(Text {
                content: Cow::Borrowed(text),
                span,
            })],
            span,
        })
    }
}

// ----------------------------------------------------------------------
// Free helpers
// ----------------------------------------------------------------------

#[inline]
fn slice(input: &str, span: Span) -> &str {
    &input[span.start as usize..(span.end as usize).min(input.len())]
}

fn is_footnote_def(trimmed: &str) -> bool {
    trimmed.starts_with("[^") && trimmed.find("]:").map_or(false, |p| p > 2)
}

/// Lines that terminate a paragraph and start another block.
fn starts_structure(trimmed: &str) -> bool {
    match trimmed.as_bytes().first() {
        Some(b'#') | Some(b'>') => true,
        Some(b'`') => trimmed.starts_with("```"),
        Some(b'$') => trimmed.starts_with("$$"),
        Some(b'-') => trimmed == "---",
        Some(b'[') => is_footnote_def(trimmed),
        _ => false,
    }
}

/// A table begins where a line contains a pipe and the next line is a
/// separator row.
fn at_table(lexer: &mut Lexer<'_>) -> bool {
    let has_pipe = match lexer.peek_line() {
        Some(line) => line.text.contains('|'),
        None => false,
    };
    if !has_pipe {
        return false;
    }
    match lexer.peek_second() {
        Some(line) => is_separator_row(line.trimmed()),
        None => false,
    }
}

/// Separator rows look like `| :--- | :---: | ---: |`, pipes optional.
fn is_separator_row(trimmed: &str) -> bool {
    if !trimmed.contains('-') {
        return false;
    }
    // A bare dash run is a thematic break, not a separator
    if !trimmed.contains('|') && !trimmed.contains(':') {
        return false;
    }
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    let mut cells = 0;
    for cell in inner.split('|') {
        let c = cell.trim();
        if c.is_empty() {
            return false;
        }
        let core = c.strip_prefix(':').unwrap_or(c);
        let core = core.strip_suffix(':').unwrap_or(core);
        if core.is_empty() || !core.bytes().all(|b| b == b'-') {
            return false;
        }
        cells += 1;
    }
    cells > 0
}

/// Per-column alignment from the separator row.
fn parse_alignments(trimmed: &str) -> Vec<Alignment> {
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner
        .split('|')
        .map(|cell| {
            let c = cell.trim();
            match (c.starts_with(':'), c.ends_with(':')) {
                (true, true) => Alignment::Center,
                (true, false) => Alignment::Left,
                (false, true) => Alignment::Right,
                (false, false) => Alignment::Default,
            }
        })
        .collect()
}

/// Split a table row into cells at unescaped pipes. Leading and trailing
/// pipes are optional; non-strict spacing is legal.
fn parse_table_row(line: Line<'_>) -> TableRow<'_> {
    let text = line.text;
    let bytes = text.as_bytes();

    let mut bounds: Vec<(usize, usize)> = Vec::with_capacity(8);
    let mut seg_start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'|' && (i == 0 || bytes[i - 1] != b'\\') {
            bounds.push((seg_start, i));
            seg_start = i + 1;
        }
    }
    bounds.push((seg_start, bytes.len()));

    // Boundary segments produced by optional leading/trailing pipes
    let mut lo = 0;
    let mut hi = bounds.len();
    if hi - lo > 1 && text[bounds[lo].0..bounds[lo].1].trim().is_empty() {
        lo += 1;
    }
    if hi - lo > 1 && text[bounds[hi - 1].0..bounds[hi - 1].1].trim().is_empty() {
        hi -= 1;
    }

    let cells = bounds[lo..hi]
        .iter()
        .map(|&(seg_start, seg_end)| {
            let raw = &text[seg_start..seg_end];
            let content = raw.trim();
            let lead = raw.len() - raw.trim_start().len();
            let offset = line.span.start + (seg_start + lead) as u32;
            TableCell {
                content: parse_inlines(content, offset),
                span: Span::new(
                    line.span.start + seg_start as u32,
                    line.span.start + seg_end as u32,
                ),
            }
        })
        .collect();

    TableRow {
        cells,
        span: line.span,
    }
}

/// Strip one `>` marker (plus one following space) from a line span.
fn strip_quote_marker(input: &str, span: Span) -> Span {
    let text = slice(input, span);
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() && bytes[i] == b' ' {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'>' {
        i += 1;
        if i < bytes.len() && bytes[i] == b' ' {
            i += 1;
        }
    }
    Span::new(span.start + i as u32, span.end)
}

/// Flush accumulated quote lines into one paragraph, joining lines with
/// single-space separators so every piece stays borrowed.
fn flush_paragraph<'a>(input: &'a str, para: &mut Vec<Span>, blocks: &mut Vec<Block<'a>>) {
    if para.is_empty() {
        return;
    }
    let mut content: Vec<Inline<'a>> = Vec::new();
    for (i, sp) in para.iter().enumerate() {
        let raw = slice(input, *sp);
        let trimmed = raw.trim();
        let lead = raw.len() - raw.trim_start().len();
        if i > 0 {
            content.push(Inline::Text(Text {
                content: Cow::Borrowed(" "),
                span: Span::new(sp.start, sp.start),
            }));
        }
        content.extend(parse_inlines(trimmed, sp.start + lead as u32));
    }
    let span = Span::new(para[0].start, para[para.len() - 1].end);
    blocks.push(Block::Paragraph(Paragraph { content, span }));
    para.clear();
}

fn split_math_label(content: &str) -> (Option<&str>, &str) {
    if let Some(rest) = content.strip_prefix("\\label{") {
        if let Some(close) = rest.find('}') {
            return (Some(&rest[..close]), rest[close + 1..].trim_start());
        }
    }
    (None, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separator_row_detection() {
        assert!(is_separator_row("| :--- | :---: | ---: |"));
        assert!(is_separator_row("--- | :-: | ---"));
        assert!(is_separator_row("|---|---|"));
        assert!(!is_separator_row("---"));
        assert!(!is_separator_row("| a | b |"));
        assert!(!is_separator_row("| --- | x |"));
    }

    #[test]
    fn alignment_parsing() {
        assert_eq!(
            parse_alignments("| :--- | :---: | ---: |"),
            vec![Alignment::Left, Alignment::Center, Alignment::Right]
        );
        assert_eq!(parse_alignments("---|---"), vec![Alignment::Default; 2]);
    }

    #[test]
    fn math_label_split() {
        let (label, latex) = split_math_label("\\label{eq:mass} E = mc^2");
        assert_eq!(label, Some("eq:mass"));
        assert_eq!(latex, "E = mc^2");

        let (label, latex) = split_math_label("E = mc^2");
        assert_eq!(label, None);
        assert_eq!(latex, "E = mc^2");
    }

    #[test]
    fn quote_marker_stripping() {
        let input = "> quoted";
        let stripped = strip_quote_marker(input, Span::new(0, input.len() as u32));
        assert_eq!(&input[stripped.start as usize..stripped.end as usize], "quoted");

        let input = "> > deep";
        let once = strip_quote_marker(input, Span::new(0, input.len() as u32));
        assert_eq!(&input[once.start as usize..once.end as usize], "> deep");
    }
}
