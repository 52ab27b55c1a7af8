//! Cross-reference resolution.
//!
//! A single pass over the finalized document: labeled entities are
//! registered in document order and numbered per kind, then every
//! reference is checked against the registered set. Registration happens
//! completely before any reference is resolved, because a reference may
//! point forward at an entity defined later in the document.
//!
//! The pass is idempotent: ordinals are assigned only to labels that do
//! not already carry one, and re-visiting the same definition site is a
//! no-op, so running the pass twice never re-increments a counter.

use std::collections::HashMap;

use crate::ast::{
    Block, CowStr, Declare, Directive, Document, Inline, LabelKind, LabelTable,
};
use crate::error::{Diagnostic, Diagnostics};
use crate::span::Span;

/// Resolve cross-references in place.
///
/// Fills the document's label table, footnote index, and glossary index,
/// and returns every resolution diagnostic. The tree itself is not
/// modified.
pub fn resolve<'a>(doc: &mut Document<'a>) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();

    let mut labels = std::mem::take(&mut doc.labels);
    let mut footnotes = std::mem::take(&mut doc.footnotes);
    let mut glossary = std::mem::take(&mut doc.glossary);

    collect_blocks(
        &doc.blocks,
        &mut labels,
        &mut footnotes,
        &mut glossary,
        &mut diagnostics,
    );
    check_blocks(&doc.blocks, &labels, &footnotes, &glossary, &mut diagnostics);

    doc.labels = labels;
    doc.footnotes = footnotes;
    doc.glossary = glossary;

    diagnostics
}

fn declare<'a>(
    labels: &mut LabelTable<'a>,
    label: &CowStr<'a>,
    kind: LabelKind,
    span: Span,
    diagnostics: &mut Diagnostics,
) {
    if let Declare::Duplicate(first) = labels.declare(label.clone(), kind, span) {
        diagnostics.push(Diagnostic::duplicate_label(label, span, first));
    }
}

// ----------------------------------------------------------------------
// Pass (a): register labeled entities, footnotes, and glossary terms
// ----------------------------------------------------------------------

fn collect_blocks<'a>(
    blocks: &[Block<'a>],
    labels: &mut LabelTable<'a>,
    footnotes: &mut HashMap<CowStr<'a>, Span>,
    glossary: &mut HashMap<CowStr<'a>, Span>,
    diagnostics: &mut Diagnostics,
) {
    for block in blocks {
        match block {
            Block::Math(m) => {
                if let Some(label) = &m.label {
                    declare(labels, label, LabelKind::Equation, m.span, diagnostics);
                }
            }
            Block::FootnoteDef(f) => {
                // First definition wins; redefinitions are legal
                footnotes.entry(f.id.clone()).or_insert(f.span);
                collect_inlines(&f.content, labels, diagnostics);
            }
            Block::Quote(q) => {
                collect_blocks(&q.blocks, labels, footnotes, glossary, diagnostics);
            }
            Block::Directive(d) => match d {
                Directive::Image(img) => {
                    if let Some(label) = &img.label {
                        declare(labels, label, LabelKind::Figure, img.span, diagnostics);
                    }
                    collect_blocks(&img.caption, labels, footnotes, glossary, diagnostics);
                }
                Directive::Admonition(a) => {
                    if let Some(label) = &a.label {
                        declare(labels, label, LabelKind::Other, a.span, diagnostics);
                    }
                    collect_blocks(&a.blocks, labels, footnotes, glossary, diagnostics);
                }
                Directive::CsvTable(c) => {
                    if let Some(label) = &c.label {
                        declare(labels, label, LabelKind::Other, c.span, diagnostics);
                    }
                }
                Directive::Mermaid(m) => {
                    if let Some(label) = &m.label {
                        declare(labels, label, LabelKind::Other, m.span, diagnostics);
                    }
                }
                Directive::Glossary(g) => {
                    for entry in &g.entries {
                        glossary.entry(entry.term.clone()).or_insert(entry.span);
                    }
                }
                Directive::Passthrough(p) => {
                    if let Some((_, label)) = p.attrs.iter().find(|(k, _)| k == "label") {
                        declare(labels, label, LabelKind::Other, p.span, diagnostics);
                    }
                }
            },
            Block::Heading(h) => collect_inlines(&h.content, labels, diagnostics),
            Block::Paragraph(p) => collect_inlines(&p.content, labels, diagnostics),
            Block::Table(t) => {
                for cell in &t.header.cells {
                    collect_inlines(&cell.content, labels, diagnostics);
                }
                for row in &t.rows {
                    for cell in &row.cells {
                        collect_inlines(&cell.content, labels, diagnostics);
                    }
                }
            }
            Block::CodeBlock(_) | Block::ThematicBreak(_) => {}
        }
    }
}

/// Inline images may carry labels when built through directive syntax.
fn collect_inlines<'a>(
    inlines: &[Inline<'a>],
    labels: &mut LabelTable<'a>,
    diagnostics: &mut Diagnostics,
) {
    for inline in inlines {
        match inline {
            Inline::Image(img) => {
                if let Some(label) = &img.label {
                    declare(labels, label, LabelKind::Figure, img.span, diagnostics);
                }
            }
            Inline::Emphasis(e) => collect_inlines(&e.content, labels, diagnostics),
            Inline::Strikethrough(s) => collect_inlines(&s.content, labels, diagnostics),
            Inline::Link(l) => collect_inlines(&l.text, labels, diagnostics),
            _ => {}
        }
    }
}

// ----------------------------------------------------------------------
// Pass (b): verify every reference against the registered set
// ----------------------------------------------------------------------

fn check_blocks<'a>(
    blocks: &[Block<'a>],
    labels: &LabelTable<'a>,
    footnotes: &HashMap<CowStr<'a>, Span>,
    glossary: &HashMap<CowStr<'a>, Span>,
    diagnostics: &mut Diagnostics,
) {
    for block in blocks {
        match block {
            Block::Heading(h) => check_inlines(&h.content, labels, footnotes, glossary, diagnostics),
            Block::Paragraph(p) => {
                check_inlines(&p.content, labels, footnotes, glossary, diagnostics)
            }
            Block::Quote(q) => {
                check_blocks(&q.blocks, labels, footnotes, glossary, diagnostics);
                if let Some(author) = &q.author {
                    check_inlines(author, labels, footnotes, glossary, diagnostics);
                }
            }
            Block::Table(t) => {
                for cell in &t.header.cells {
                    check_inlines(&cell.content, labels, footnotes, glossary, diagnostics);
                }
                for row in &t.rows {
                    for cell in &row.cells {
                        check_inlines(&cell.content, labels, footnotes, glossary, diagnostics);
                    }
                }
            }
            Block::FootnoteDef(f) => {
                check_inlines(&f.content, labels, footnotes, glossary, diagnostics)
            }
            Block::Directive(d) => match d {
                Directive::Image(img) => {
                    check_blocks(&img.caption, labels, footnotes, glossary, diagnostics)
                }
                Directive::Admonition(a) => {
                    check_blocks(&a.blocks, labels, footnotes, glossary, diagnostics)
                }
                Directive::Glossary(g) => {
                    for entry in &g.entries {
                        check_inlines(&entry.definition, labels, footnotes, glossary, diagnostics);
                    }
                }
                Directive::CsvTable(_) | Directive::Mermaid(_) | Directive::Passthrough(_) => {}
            },
            Block::Math(_) | Block::CodeBlock(_) | Block::ThematicBreak(_) => {}
        }
    }
}

fn check_inlines<'a>(
    inlines: &[Inline<'a>],
    labels: &LabelTable<'a>,
    footnotes: &HashMap<CowStr<'a>, Span>,
    glossary: &HashMap<CowStr<'a>, Span>,
    diagnostics: &mut Diagnostics,
) {
    for inline in inlines {
        match inline {
            Inline::CrossRef(c) => {
                if labels.get(&c.label).is_none() {
                    diagnostics.push(Diagnostic::unresolved_label(&c.label, c.span));
                }
            }
            Inline::FootnoteRef(f) => {
                if !footnotes.contains_key(f.id.as_ref()) {
                    diagnostics.push(Diagnostic::unresolved_footnote(&f.id, f.span));
                }
            }
            Inline::TermRef(t) => {
                if !glossary.contains_key(t.term.as_ref()) {
                    diagnostics.push(Diagnostic::unresolved_term(&t.term, t.span));
                }
            }
            Inline::Emphasis(e) => {
                check_inlines(&e.content, labels, footnotes, glossary, diagnostics)
            }
            Inline::Strikethrough(s) => {
                check_inlines(&s.content, labels, footnotes, glossary, diagnostics)
            }
            Inline::Link(l) => check_inlines(&l.text, labels, footnotes, glossary, diagnostics),
            _ => {}
        }
    }
}
