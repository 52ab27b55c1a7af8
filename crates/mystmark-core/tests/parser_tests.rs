//! Integration tests for the mystmark block and inline grammar

use mystmark_core::ast::{Alignment, Directive, EmphasisKind};
use mystmark_core::{Block, Inline, Parser};

fn parse(input: &str) -> mystmark_core::ParseResult<'_> {
    Parser::new().parse(input)
}

// ============================================================================
// Heading Tests
// ============================================================================

#[test]
fn test_parse_heading_levels() {
    let result = parse("# H1\n## H2\n### H3\n#### H4\n##### H5\n###### H6");
    assert!(result.is_ok());
    assert_eq!(result.document.blocks.len(), 6);

    for (i, block) in result.document.blocks.iter().enumerate() {
        if let Block::Heading(h) = block {
            assert_eq!(h.level, (i + 1) as u8);
        } else {
            panic!("Expected heading, got {:?}", block);
        }
    }
}

#[test]
fn test_parse_heading_content() {
    let result = parse("# Hello **World**");
    if let Block::Heading(h) = &result.document.blocks[0] {
        assert_eq!(h.level, 1);
        assert_eq!(h.content.len(), 2);
        assert!(matches!(&h.content[1], Inline::Emphasis(e) if e.kind == EmphasisKind::Bold));
    } else {
        panic!("Expected heading");
    }
}

#[test]
fn test_heading_without_space_is_paragraph() {
    let result = parse("#NoSpace");
    assert!(matches!(&result.document.blocks[0], Block::Paragraph(_)));
}

#[test]
fn test_seven_hashes_is_not_a_heading() {
    let result = parse("####### not a heading");
    assert!(matches!(&result.document.blocks[0], Block::Paragraph(_)));
    assert!(result.diagnostics.is_empty());
}

// ============================================================================
// Paragraph Tests
// ============================================================================

#[test]
fn test_parse_simple_paragraph() {
    let result = parse("Hello, world!");
    assert_eq!(result.document.blocks.len(), 1);
    if let Block::Paragraph(p) = &result.document.blocks[0] {
        assert_eq!(p.content.len(), 1);
        if let Inline::Text(t) = &p.content[0] {
            assert_eq!(t.content.as_ref(), "Hello, world!");
        }
    } else {
        panic!("Expected paragraph");
    }
}

#[test]
fn test_parse_multiline_paragraph() {
    let result = parse("Line one\nLine two\nLine three");
    assert_eq!(result.document.blocks.len(), 1);
    assert!(matches!(&result.document.blocks[0], Block::Paragraph(_)));
}

#[test]
fn test_parse_multiple_paragraphs() {
    let result = parse("First paragraph.\n\nSecond paragraph.");
    assert_eq!(result.document.blocks.len(), 2);
}

// ============================================================================
// Block Quote Tests
// ============================================================================

#[test]
fn test_parse_quote() {
    let result = parse("> To be or not to be.\n> That is the question.");
    if let Block::Quote(q) = &result.document.blocks[0] {
        assert_eq!(q.blocks.len(), 1);
        assert!(q.author.is_none());
        assert!(matches!(&q.blocks[0], Block::Paragraph(_)));
    } else {
        panic!("Expected quote");
    }
}

#[test]
fn test_quote_author_line() {
    let result = parse("> Brevity is the soul of wit.\n> - Polonius");
    if let Block::Quote(q) = &result.document.blocks[0] {
        assert_eq!(q.blocks.len(), 1);
        let author = q.author.as_ref().expect("author expected");
        assert!(matches!(&author[0], Inline::Text(t) if t.content == "Polonius"));
    } else {
        panic!("Expected quote");
    }
}

#[test]
fn test_nested_quote_depth() {
    let result = parse("> outer\n> > inner\n> outer again");
    if let Block::Quote(q) = &result.document.blocks[0] {
        assert_eq!(q.blocks.len(), 3);
        assert!(matches!(&q.blocks[0], Block::Paragraph(_)));
        assert!(matches!(&q.blocks[1], Block::Quote(_)));
        assert!(matches!(&q.blocks[2], Block::Paragraph(_)));
    } else {
        panic!("Expected quote");
    }
}

#[test]
fn test_blank_quote_line_splits_paragraphs() {
    let result = parse("> first\n>\n> second");
    if let Block::Quote(q) = &result.document.blocks[0] {
        assert_eq!(q.blocks.len(), 2);
    } else {
        panic!("Expected quote");
    }
}

// ============================================================================
// Table Tests
// ============================================================================

#[test]
fn test_parse_table() {
    let result = parse("| Name | Qty |\n| :--- | ---: |\n| Bolt | 4 |\n| Nut | 9 |");
    if let Block::Table(t) = &result.document.blocks[0] {
        assert_eq!(t.columns, vec![Alignment::Left, Alignment::Right]);
        assert_eq!(t.header.cells.len(), 2);
        assert_eq!(t.rows.len(), 2);
    } else {
        panic!("Expected table, got {:?}", result.document.blocks[0]);
    }
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_table_alignment_patterns() {
    let result = parse("| A | B | C |\n| :--- | :---: | ---: |\n| 1 | 2 | 3 |");
    if let Block::Table(t) = &result.document.blocks[0] {
        assert_eq!(
            t.columns,
            vec![Alignment::Left, Alignment::Center, Alignment::Right]
        );
    } else {
        panic!("Expected table");
    }
}

#[test]
fn test_table_without_outer_pipes() {
    let result = parse("Name | Qty\n:--- | ---:\nBolt | 4");
    if let Block::Table(t) = &result.document.blocks[0] {
        assert_eq!(t.header.cells.len(), 2);
        assert_eq!(t.rows.len(), 1);
    } else {
        panic!("Expected table, got {:?}", result.document.blocks[0]);
    }
}

#[test]
fn test_table_default_alignment() {
    let result = parse("| A | B |\n| --- | --- |\n| 1 | 2 |");
    if let Block::Table(t) = &result.document.blocks[0] {
        assert_eq!(t.columns, vec![Alignment::Default, Alignment::Default]);
    } else {
        panic!("Expected table");
    }
}

#[test]
fn test_dash_line_is_break_not_separator() {
    let result = parse("a | b\n---\nmore text");
    // Without a separator row this is no table
    assert!(result
        .document
        .blocks
        .iter()
        .all(|b| !matches!(b, Block::Table(_))));
}

// ============================================================================
// Code Block Tests
// ============================================================================

#[test]
fn test_parse_code_block() {
    let result = parse("```rust\nfn main() {\n    println!(\"Hello\");\n}\n```");
    assert_eq!(result.document.blocks.len(), 1);
    if let Block::CodeBlock(c) = &result.document.blocks[0] {
        assert_eq!(c.lang.as_ref(), "rust");
        assert!(c.content.contains("fn main()"));
    } else {
        panic!("Expected code block");
    }
}

#[test]
fn test_parse_code_block_no_lang() {
    let result = parse("```\nplain code\n```");
    if let Block::CodeBlock(c) = &result.document.blocks[0] {
        assert!(c.lang.is_empty());
        assert_eq!(c.content.as_ref(), "plain code");
    } else {
        panic!("Expected code block");
    }
}

// ============================================================================
// Math Block Tests
// ============================================================================

#[test]
fn test_parse_math_block() {
    let result = parse("$$\nE = mc^2\n$$");
    if let Block::Math(m) = &result.document.blocks[0] {
        assert!(m.label.is_none());
        assert_eq!(m.latex.as_ref(), "E = mc^2");
    } else {
        panic!("Expected math block");
    }
}

#[test]
fn test_math_block_label() {
    let result = parse("$$\n\\label{eq:mass} E = mc^2\n$$");
    if let Block::Math(m) = &result.document.blocks[0] {
        assert_eq!(m.label.as_deref(), Some("eq:mass"));
        assert_eq!(m.latex.as_ref(), "E = mc^2");
    } else {
        panic!("Expected math block");
    }
}

#[test]
fn test_single_line_math_block() {
    let result = parse("$$ a^2 + b^2 = c^2 $$");
    if let Block::Math(m) = &result.document.blocks[0] {
        assert_eq!(m.latex.as_ref(), "a^2 + b^2 = c^2");
    } else {
        panic!("Expected math block");
    }
}

// ============================================================================
// Footnote Definition Tests
// ============================================================================

#[test]
fn test_parse_footnote_definition() {
    let result = parse("[^1]: The first footnote.");
    if let Block::FootnoteDef(f) = &result.document.blocks[0] {
        assert_eq!(f.id.as_ref(), "1");
        assert!(matches!(&f.content[0], Inline::Text(t) if t.content == "The first footnote."));
    } else {
        panic!("Expected footnote definition");
    }
}

#[test]
fn test_footnote_ref_and_definition() {
    let result = parse("A claim[^note] needing support.\n\n[^note]: The support.");
    assert_eq!(result.document.blocks.len(), 2);
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.document.footnotes.len(), 1);
}

// ============================================================================
// Directive Tests
// ============================================================================

#[test]
fn test_image_directive() {
    let result = parse("```{image} plots/run.png\n:label: fig-run\n:width: 60%\n:align: center\nThe run chart.\n```");
    if let Block::Directive(Directive::Image(img)) = &result.document.blocks[0] {
        assert_eq!(img.src.as_ref(), "plots/run.png");
        assert_eq!(img.label.as_deref(), Some("fig-run"));
        assert_eq!(img.width.as_deref(), Some("60%"));
        assert_eq!(img.align.as_deref(), Some("center"));
        assert_eq!(img.caption.len(), 1);
    } else {
        panic!("Expected image directive, got {:?}", result.document.blocks[0]);
    }
}

#[test]
fn test_math_directive_becomes_math_block() {
    let result = parse("```{math}\n:label: eq-sum\n\\sum_{i=1}^{n} i\n```");
    if let Block::Math(m) = &result.document.blocks[0] {
        assert_eq!(m.label.as_deref(), Some("eq-sum"));
        assert_eq!(m.latex.as_ref(), "\\sum_{i=1}^{n} i");
    } else {
        panic!("Expected math block, got {:?}", result.document.blocks[0]);
    }
}

#[test]
fn test_admonition_directive() {
    let result = parse("```{warning} Mind the gap\nPlatforms differ in height.\n```");
    if let Block::Directive(Directive::Admonition(a)) = &result.document.blocks[0] {
        assert_eq!(a.kind.as_ref(), "warning");
        assert_eq!(a.title.as_deref(), Some("Mind the gap"));
        assert_eq!(a.blocks.len(), 1);
    } else {
        panic!("Expected admonition");
    }
}

#[test]
fn test_csv_table_directive() {
    let result = parse("```{csv-table} Inventory\n:file: data/items.csv\n:header: Name, Qty\n```");
    if let Block::Directive(Directive::CsvTable(c)) = &result.document.blocks[0] {
        assert_eq!(c.title.as_deref(), Some("Inventory"));
        assert_eq!(c.file.as_ref(), "data/items.csv");
        assert_eq!(c.header.as_deref(), Some("Name, Qty"));
    } else {
        panic!("Expected csv-table");
    }
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_glossary_directive() {
    let result = parse("```{glossary}\nBlock\n  A structural unit of content.\nOrdinal\n  An auto-incremented number.\n```");
    if let Block::Directive(Directive::Glossary(g)) = &result.document.blocks[0] {
        assert_eq!(g.entries.len(), 2);
        assert_eq!(g.entries[0].term.as_ref(), "Block");
        assert_eq!(g.entries[1].term.as_ref(), "Ordinal");
    } else {
        panic!("Expected glossary");
    }
    assert_eq!(result.document.glossary.len(), 2);
}

#[test]
fn test_mermaid_directive() {
    let result = parse("```{mermaid}\ngraph TD;\n  A-->B;\n```");
    if let Block::Directive(Directive::Mermaid(m)) = &result.document.blocks[0] {
        assert!(m.source.contains("A-->B"));
    } else {
        panic!("Expected mermaid placeholder");
    }
}

#[test]
fn test_unknown_directive_passes_through() {
    let result = parse("```{tab-set} arg\n:class: wide\nBody line.\n```");
    if let Block::Directive(Directive::Passthrough(p)) = &result.document.blocks[0] {
        assert_eq!(p.name.as_ref(), "tab-set");
        assert_eq!(p.arg.as_deref(), Some("arg"));
        assert_eq!(p.attrs.len(), 1);
        assert_eq!(p.body.as_ref(), "Body line.");
    } else {
        panic!("Expected passthrough, got {:?}", result.document.blocks[0]);
    }
    // Unknown names are forward-compatible, not errors
    assert!(result.diagnostics.is_empty());
}

// ============================================================================
// Inline Tests (through full parses)
// ============================================================================

#[test]
fn test_escaped_asterisks_in_paragraph() {
    let result = parse("\\*asterisks\\*");
    if let Block::Paragraph(p) = &result.document.blocks[0] {
        assert_eq!(p.content.len(), 3);
        assert!(matches!(&p.content[0], Inline::Escaped(e) if e.ch == '*'));
        assert!(matches!(&p.content[1], Inline::Text(t) if t.content == "asterisks"));
        assert!(matches!(&p.content[2], Inline::Escaped(e) if e.ch == '*'));
    } else {
        panic!("Expected paragraph");
    }
}

#[test]
fn test_emphasis_nesting() {
    let result = parse("This is **bold with *italic* inside**.");
    if let Block::Paragraph(p) = &result.document.blocks[0] {
        let bold = p.content.iter().find_map(|i| match i {
            Inline::Emphasis(e) if e.kind == EmphasisKind::Bold => Some(e),
            _ => None,
        });
        let bold = bold.expect("bold span expected");
        assert!(bold
            .content
            .iter()
            .any(|i| matches!(i, Inline::Emphasis(e) if e.kind == EmphasisKind::Italic)));
    } else {
        panic!("Expected paragraph");
    }
}

#[test]
fn test_citations_in_paragraph() {
    let result = parse("As argued by @doe2021 and [see @smith2020; @jones99, ch. 2].");
    if let Block::Paragraph(p) = &result.document.blocks[0] {
        let citations: Vec<_> = p
            .content
            .iter()
            .filter_map(|i| match i {
                Inline::Citation(c) => Some(c),
                _ => None,
            })
            .collect();
        assert_eq!(citations.len(), 2);
        assert_eq!(citations[0].keys, vec!["doe2021"]);
        assert_eq!(citations[1].keys, vec!["smith2020", "jones99"]);
        assert_eq!(citations[1].prefix.as_deref(), Some("see"));
        assert_eq!(citations[1].suffix.as_deref(), Some("ch. 2"));
    } else {
        panic!("Expected paragraph");
    }
}

#[test]
fn test_image_with_trailing_caption_text() {
    let result = parse("![A map](map.png) Figure caption follows here.");
    if let Block::Paragraph(p) = &result.document.blocks[0] {
        assert!(matches!(&p.content[0], Inline::Image(i) if i.src == "map.png"));
        assert!(p.content.len() > 1);
    } else {
        panic!("Expected paragraph");
    }
}

// ============================================================================
// Determinism and Edge Cases
// ============================================================================

#[test]
fn test_parse_empty_input() {
    let result = parse("");
    assert_eq!(result.document.blocks.len(), 0);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_parse_whitespace_only() {
    let result = parse("   \n\n   \n");
    assert_eq!(result.document.blocks.len(), 0);
}

#[test]
fn test_parse_is_deterministic() {
    let input = "# Title\n\nBody with *emphasis* and [](#ghost).\n\n| A | B |\n| --- | --- |\n| 1 | 2 |\n";
    let first = Parser::new().parse(input);
    let second = Parser::new().parse(input);
    assert_eq!(first.document, second.document);
    assert_eq!(
        first.diagnostics.iter().collect::<Vec<_>>(),
        second.diagnostics.iter().collect::<Vec<_>>()
    );
}

#[test]
fn test_thematic_break() {
    let result = parse("Above.\n\n---\n\nBelow.");
    assert_eq!(result.document.blocks.len(), 3);
    assert!(matches!(&result.document.blocks[1], Block::ThematicBreak(_)));
}

#[test]
fn test_span_tracking() {
    let result = parse("# Hello");
    assert_eq!(result.document.span.start, 0);
    assert_eq!(result.document.span.end, 7);
    if let Block::Heading(h) = &result.document.blocks[0] {
        assert_eq!(h.span.start, 0);
        assert_eq!(h.span.end, 7);
    }
}

// ============================================================================
// Complex Document Test
// ============================================================================

#[test]
fn test_parse_complex_document() {
    let input = r#"# Report

Some **bold** text citing @doe2021 with a note[^n].

> Quoted wisdom here.
> - Anonymous

| Col | Val |
| :-- | --: |
| a   | 1   |

$$
\label{eq:one} x + y = z
$$

```{image} fig.png
:label: fig-one
The caption.
```

See [](#fig-one) and [](#eq:one).

[^n]: The note text.
"#;

    let result = parse(input);
    assert!(result.is_ok(), "diagnostics: {:?}", result.diagnostics);
    assert!(result.document.blocks.len() >= 7);
    assert_eq!(result.document.labels.len(), 2);
    assert_eq!(result.document.footnotes.len(), 1);
}
