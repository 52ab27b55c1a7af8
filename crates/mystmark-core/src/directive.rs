//! Directive engine.
//!
//! Specializes a scanned `{name}` fence into a typed block. Known names
//! become dedicated variants; anything else is preserved as a
//! passthrough node so consumers can still emit something for directives
//! outside this core's subset. Attribute values stay strings here; type
//! coercion is the renderer's concern.

use std::borrow::Cow;

use crate::ast::{
    Admonition, Block, CsvTable, Directive, Glossary, GlossaryEntry, ImageDirective, MathBlock,
    Mermaid, Passthrough,
};
use crate::error::Diagnostic;
use crate::inline::parse_inlines;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::span::Span;

/// Specialize a directive fence into a typed block.
///
/// `body` is the byte range between the fence lines; `span` covers the
/// whole fence including both fence lines.
pub(crate) fn specialize<'a>(
    parser: &mut Parser,
    input: &'a str,
    name: &'a str,
    arg: Option<&'a str>,
    body: Span,
    span: Span,
    depth: usize,
) -> Block<'a> {
    let (attrs, content) = split_attributes(input, body);

    match name {
        "image" | "figure" => {
            let src = match arg.or_else(|| attr(&attrs, "src")) {
                Some(src) => src,
                None => {
                    parser.diag(Diagnostic::malformed_directive(name, "src", span));
                    return passthrough(input, name, arg, attrs, content, span);
                }
            };
            Block::Directive(Directive::Image(ImageDirective {
                src: Cow::Borrowed(src),
                alt: attr(&attrs, "alt").map(Cow::Borrowed),
                label: attr(&attrs, "label").map(Cow::Borrowed),
                width: attr(&attrs, "width").map(Cow::Borrowed),
                align: attr(&attrs, "align").map(Cow::Borrowed),
                caption: parser.nested_blocks(input, content, depth + 1),
                span,
            }))
        }
        "math" => {
            let latex = input[content.start as usize..content.end as usize].trim();
            Block::Math(MathBlock {
                label: attr(&attrs, "label").map(Cow::Borrowed),
                latex: Cow::Borrowed(latex),
                span,
            })
        }
        "note" | "warning" | "tip" | "important" | "caution" | "admonition" => {
            Block::Directive(Directive::Admonition(Admonition {
                kind: Cow::Borrowed(name),
                title: arg.map(Cow::Borrowed),
                label: attr(&attrs, "label").map(Cow::Borrowed),
                blocks: parser.nested_blocks(input, content, depth + 1),
                span,
            }))
        }
        "csv-table" => {
            let file = match attr(&attrs, "file") {
                Some(file) => file,
                None => {
                    parser.diag(Diagnostic::malformed_directive(name, "file", span));
                    return passthrough(input, name, arg, attrs, content, span);
                }
            };
            Block::Directive(Directive::CsvTable(CsvTable {
                title: arg.map(Cow::Borrowed),
                file: Cow::Borrowed(file),
                header: attr(&attrs, "header").map(Cow::Borrowed),
                label: attr(&attrs, "label").map(Cow::Borrowed),
                span,
            }))
        }
        "glossary" => Block::Directive(Directive::Glossary(Glossary {
            entries: parse_glossary_entries(input, content),
            span,
        })),
        "mermaid" => Block::Directive(Directive::Mermaid(Mermaid {
            source: Cow::Borrowed(&input[content.start as usize..content.end as usize]),
            label: attr(&attrs, "label").map(Cow::Borrowed),
            span,
        })),
        _ => passthrough(input, name, arg, attrs, content, span),
    }
}

fn passthrough<'a>(
    input: &'a str,
    name: &'a str,
    arg: Option<&'a str>,
    attrs: Vec<(&'a str, &'a str)>,
    content: Span,
    span: Span,
) -> Block<'a> {
    Block::Directive(Directive::Passthrough(Passthrough {
        name: Cow::Borrowed(name),
        arg: arg.map(Cow::Borrowed),
        attrs: attrs
            .into_iter()
            .map(|(k, v)| (Cow::Borrowed(k), Cow::Borrowed(v)))
            .collect(),
        body: Cow::Borrowed(&input[content.start as usize..content.end as usize]),
        span,
    }))
}

fn attr<'a>(attrs: &[(&'a str, &'a str)], key: &str) -> Option<&'a str> {
    attrs.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Split leading `:key: value` lines off a directive body.
///
/// Returns the attributes and the byte range of the remaining content.
fn split_attributes<'a>(input: &'a str, body: Span) -> (Vec<(&'a str, &'a str)>, Span) {
    let mut attrs = Vec::new();
    let mut lexer = Lexer::over(input, body);
    let mut content_start = body.end;

    loop {
        let parsed = match lexer.peek_line() {
            None => break,
            Some(line) => {
                content_start = line.span.start;
                parse_attr_line(line.trimmed())
            }
        };
        match parsed {
            Some(pair) => {
                attrs.push(pair);
                lexer.next_line();
                content_start = body.end;
            }
            None => break,
        }
    }

    (attrs, Span::new(content_start.min(body.end), body.end))
}

/// Parse one `:key: value` line. The key may not contain whitespace.
fn parse_attr_line(trimmed: &str) -> Option<(&str, &str)> {
    let rest = trimmed.strip_prefix(':')?;
    let colon = rest.find(':')?;
    let key = &rest[..colon];
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }
    Some((key, rest[colon + 1..].trim()))
}

/// Parse a glossary body: a term on an unindented line, its definition on
/// the indented lines that follow.
fn parse_glossary_entries<'a>(input: &'a str, content: Span) -> Vec<GlossaryEntry<'a>> {
    let mut entries: Vec<GlossaryEntry<'a>> = Vec::new();
    let mut lexer = Lexer::over(input, content);

    while let Some(line) = lexer.next_line() {
        if line.is_blank() {
            continue;
        }
        if line.indent() > 0 {
            // Continuation line for the current definition
            if let Some(entry) = entries.last_mut() {
                let text = line.trimmed();
                let lead = line.text.len() - line.text.trim_start().len();
                if !entry.definition.is_empty() {
                    entry.definition.push(crate::ast::Inline::Text(crate::ast::Text {
                        content: Cow::Borrowed(" "),
                        span: Span::new(line.span.start, line.span.start),
                    }));
                }
                entry
                    .definition
                    .extend(parse_inlines(text, line.span.start + lead as u32));
                entry.span = entry.span.merge(line.span);
            }
            continue;
        }
        entries.push(GlossaryEntry {
            term: Cow::Borrowed(line.trimmed()),
            definition: Vec::new(),
            span: line.span,
        });
    }

    entries
}

/// Directive names this core specializes. Exposed for consumers that
/// want to warn about likely typos in passthrough nodes.
pub fn is_known_directive(name: &str) -> bool {
    matches!(
        name,
        "image"
            | "figure"
            | "math"
            | "note"
            | "warning"
            | "tip"
            | "important"
            | "caution"
            | "admonition"
            | "csv-table"
            | "glossary"
            | "mermaid"
    )
}
