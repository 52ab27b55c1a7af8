//! mystmark CLI - Parse, validate, and inspect mystmark documents
//!
//! Usage:
//!   mystcli [OPTIONS] <FILE>
//!
//! Commands:
//!   parse     Parse and display document structure (default)
//!   validate  Check document for errors
//!   stats     Show document statistics

use std::env;
use std::fs;
use std::process;

use mystmark_core::ast::{self, Block, Directive, Document, Inline, LabelKind};
use mystmark_core::{Diagnostic, Parser};
use serde::Serialize;

fn main() {
    let args: Vec<String> = env::args().collect();

    match run(&args) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

fn run(args: &[String]) -> Result<(), String> {
    let config = parse_args(args)?;

    let input = fs::read_to_string(&config.file)
        .map_err(|e| format!("failed to read '{}': {}", config.file, e))?;

    let mut parser = Parser::new();

    match config.command {
        Command::Parse => cmd_parse(&mut parser, &input, &config),
        Command::Validate => cmd_validate(&mut parser, &input, &config),
        Command::Stats => cmd_stats(&mut parser, &input),
    }
}

#[derive(Debug)]
struct Config {
    command: Command,
    file: String,
    format: OutputFormat,
    verbose: bool,
}

#[derive(Debug, Clone, Copy)]
enum Command {
    Parse,
    Validate,
    Stats,
}

#[derive(Debug, Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_args(args: &[String]) -> Result<Config, String> {
    let mut command = Command::Parse;
    let mut format = OutputFormat::Text;
    let mut verbose = false;
    let mut file = None;

    let mut i = 1;
    while i < args.len() {
        let arg = &args[i];
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            "-V" | "--version" => {
                println!("mystcli {}", env!("CARGO_PKG_VERSION"));
                process::exit(0);
            }
            "-v" | "--verbose" => verbose = true,
            "-j" | "--json" => format = OutputFormat::Json,
            "parse" => command = Command::Parse,
            "validate" => command = Command::Validate,
            "stats" => command = Command::Stats,
            _ if arg.starts_with('-') => {
                return Err(format!("unknown option: {}", arg));
            }
            _ => {
                if file.is_some() {
                    return Err("multiple files specified".to_string());
                }
                file = Some(arg.clone());
            }
        }
        i += 1;
    }

    let file = file.ok_or_else(|| "no input file specified".to_string())?;

    Ok(Config {
        command,
        file,
        format,
        verbose,
    })
}

fn print_help() {
    eprintln!(
        r#"mystcli - mystmark document parser and validator

USAGE:
    mystcli [OPTIONS] [COMMAND] <FILE>

COMMANDS:
    parse       Parse and display document structure (default)
    validate    Check document for errors without output
    stats       Show document statistics

OPTIONS:
    -v, --verbose    Show detailed AST structure
    -j, --json       Output in JSON format
    -h, --help       Print help information
    -V, --version    Print version information

EXAMPLES:
    mystcli document.md           Parse a document
    mystcli -v document.md        Parse with verbose output
    mystcli -j document.md        Output AST as JSON
    mystcli validate document.md  Validate without output
    mystcli stats document.md     Show document statistics
"#
    );
}

fn report_diagnostic(diagnostic: &Diagnostic, input: &str) {
    match diagnostic.line(input) {
        Some(line) => eprintln!("warning: line {}: {}", line, diagnostic.message),
        None => eprintln!("warning: {}", diagnostic.message),
    }
}

// =============================================================================
// Parse Command
// =============================================================================

fn cmd_parse(parser: &mut Parser, input: &str, config: &Config) -> Result<(), String> {
    let result = parser.parse(input);

    for diagnostic in result.diagnostics.iter() {
        report_diagnostic(diagnostic, input);
    }

    match config.format {
        OutputFormat::Json => print_json(&result.document),
        OutputFormat::Text => {
            if config.verbose {
                print_document_verbose(&result.document);
            } else {
                print_document_summary(&result.document);
            }
        }
    }

    Ok(())
}

// =============================================================================
// Validate Command
// =============================================================================

fn cmd_validate(parser: &mut Parser, input: &str, config: &Config) -> Result<(), String> {
    let result = parser.parse(input);

    if result.diagnostics.is_empty() {
        if !matches!(config.format, OutputFormat::Json) {
            println!("Valid: no errors found");
        } else {
            println!(r#"{{"valid": true, "errors": []}}"#);
        }
        Ok(())
    } else {
        if matches!(config.format, OutputFormat::Json) {
            let errors: Vec<_> = result
                .diagnostics
                .iter()
                .map(|d| {
                    serde_json::json!({
                        "kind": format!("{:?}", d.kind),
                        "message": d.message,
                        "line": d.line(input),
                        "span": d.span.map(|s| serde_json::json!({"start": s.start, "end": s.end})),
                    })
                })
                .collect();
            println!("{}", serde_json::json!({"valid": false, "errors": errors}));
        } else {
            eprintln!("Invalid: {} error(s) found", result.diagnostics.len());
            for diagnostic in result.diagnostics.iter() {
                match diagnostic.line(input) {
                    Some(line) => eprintln!("  - line {}: {}", line, diagnostic.message),
                    None => eprintln!("  - {}", diagnostic.message),
                }
            }
        }
        Err(format!("{} error(s) found", result.diagnostics.len()))
    }
}

// =============================================================================
// Stats Command
// =============================================================================

fn cmd_stats(parser: &mut Parser, input: &str) -> Result<(), String> {
    let result = parser.parse(input);
    let doc = &result.document;

    let stats = DocumentStats::from_document(doc, input);

    let figures = doc
        .labels
        .iter()
        .filter(|(_, e)| e.kind == LabelKind::Figure)
        .count();
    let equations = doc
        .labels
        .iter()
        .filter(|(_, e)| e.kind == LabelKind::Equation)
        .count();

    println!("Document Statistics");
    println!("-------------------");
    println!("Content:");
    println!("  Total blocks:    {}", stats.total_blocks);
    println!("  Headings:        {}", stats.headings);
    println!("  Paragraphs:      {}", stats.paragraphs);
    println!("  Quotes:          {}", stats.quotes);
    println!("  Tables:          {}", stats.tables);
    println!("  Math blocks:     {}", stats.math_blocks);
    println!("  Code blocks:     {}", stats.code_blocks);
    println!("  Directives:      {}", stats.directives);
    println!();
    println!("References:");
    println!("  Labels:          {}", doc.labels.len());
    println!("  Figures:         {}", figures);
    println!("  Equations:       {}", equations);
    println!("  Footnotes:       {}", doc.footnotes.len());
    println!("  Glossary terms:  {}", doc.glossary.len());
    println!();
    println!("Size:");
    println!("  Characters:      {}", stats.chars);
    println!("  Words (est.):    {}", stats.words);
    println!("  Lines:           {}", stats.lines);
    println!();
    println!("Errors:            {}", result.diagnostics.len());

    Ok(())
}

struct DocumentStats {
    total_blocks: usize,
    headings: usize,
    paragraphs: usize,
    quotes: usize,
    tables: usize,
    math_blocks: usize,
    code_blocks: usize,
    directives: usize,
    chars: usize,
    words: usize,
    lines: usize,
}

impl DocumentStats {
    fn from_document(doc: &Document, input: &str) -> Self {
        let mut stats = Self {
            total_blocks: 0,
            headings: 0,
            paragraphs: 0,
            quotes: 0,
            tables: 0,
            math_blocks: 0,
            code_blocks: 0,
            directives: 0,
            chars: input.len(),
            words: input.split_whitespace().count(),
            lines: input.lines().count(),
        };

        stats.count_blocks(&doc.blocks);
        stats
    }

    fn count_blocks(&mut self, blocks: &[Block]) {
        for block in blocks {
            self.total_blocks += 1;
            match block {
                Block::Heading(_) => self.headings += 1,
                Block::Paragraph(_) => self.paragraphs += 1,
                Block::Quote(q) => {
                    self.quotes += 1;
                    self.count_blocks(&q.blocks);
                }
                Block::Table(_) => self.tables += 1,
                Block::Math(_) => self.math_blocks += 1,
                Block::CodeBlock(_) => self.code_blocks += 1,
                Block::Directive(d) => {
                    self.directives += 1;
                    match d {
                        Directive::Image(img) => self.count_blocks(&img.caption),
                        Directive::Admonition(a) => self.count_blocks(&a.blocks),
                        _ => {}
                    }
                }
                _ => {}
            }
        }
    }
}

// =============================================================================
// JSON Output
// =============================================================================

#[derive(Serialize)]
struct JsonDocument<'a> {
    blocks: Vec<JsonBlock<'a>>,
    labels: Vec<JsonLabel<'a>>,
}

#[derive(Serialize)]
struct JsonLabel<'a> {
    label: &'a str,
    kind: &'a str,
    ordinal: Option<u32>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum JsonBlock<'a> {
    Heading {
        level: u8,
        content: Vec<JsonInline<'a>>,
    },
    Paragraph {
        content: Vec<JsonInline<'a>>,
    },
    Quote {
        blocks: Vec<JsonBlock<'a>>,
        author: Option<Vec<JsonInline<'a>>>,
    },
    Table {
        columns: Vec<&'a str>,
        header: Vec<Vec<JsonInline<'a>>>,
        rows: Vec<Vec<Vec<JsonInline<'a>>>>,
    },
    Math {
        label: Option<&'a str>,
        latex: &'a str,
    },
    FootnoteDef {
        id: &'a str,
        content: Vec<JsonInline<'a>>,
    },
    CodeBlock {
        lang: &'a str,
        content: &'a str,
    },
    Image {
        src: &'a str,
        alt: Option<&'a str>,
        label: Option<&'a str>,
        width: Option<&'a str>,
        align: Option<&'a str>,
        caption: Vec<JsonBlock<'a>>,
    },
    Admonition {
        kind: &'a str,
        title: Option<&'a str>,
        blocks: Vec<JsonBlock<'a>>,
    },
    CsvTable {
        title: Option<&'a str>,
        file: &'a str,
    },
    Glossary {
        entries: Vec<JsonGlossaryEntry<'a>>,
    },
    Mermaid {
        source: &'a str,
    },
    Passthrough {
        name: &'a str,
        arg: Option<&'a str>,
        body: &'a str,
    },
    ThematicBreak,
}

#[derive(Serialize)]
struct JsonGlossaryEntry<'a> {
    term: &'a str,
    definition: Vec<JsonInline<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum JsonInline<'a> {
    Text {
        content: &'a str,
    },
    Emphasis {
        kind: &'a str,
        content: Vec<JsonInline<'a>>,
    },
    Strikethrough {
        content: Vec<JsonInline<'a>>,
    },
    Escaped {
        ch: char,
    },
    Code {
        content: &'a str,
    },
    InlineMath {
        latex: &'a str,
    },
    Subscript {
        content: &'a str,
    },
    Superscript {
        content: &'a str,
    },
    Link {
        text: Vec<JsonInline<'a>>,
        dest: &'a str,
    },
    AutoLink {
        url: &'a str,
    },
    Image {
        alt: &'a str,
        src: &'a str,
    },
    FootnoteRef {
        id: &'a str,
    },
    Citation {
        keys: Vec<&'a str>,
        prefix: Option<&'a str>,
        suffix: Option<&'a str>,
    },
    TermRef {
        term: &'a str,
    },
    CrossRef {
        label: &'a str,
        ordinal: Option<u32>,
    },
}

fn print_json(doc: &Document) {
    let json_doc = convert_document(doc);
    println!("{}", serde_json::to_string_pretty(&json_doc).unwrap());
}

fn convert_document<'a>(doc: &'a Document) -> JsonDocument<'a> {
    let mut labels: Vec<JsonLabel<'a>> = doc
        .labels
        .iter()
        .map(|(label, entry)| JsonLabel {
            label,
            kind: label_kind_name(entry.kind),
            ordinal: entry.ordinal,
        })
        .collect();
    labels.sort_by_key(|l| (l.kind, l.ordinal));

    JsonDocument {
        blocks: doc.blocks.iter().map(|b| convert_block(b, doc)).collect(),
        labels,
    }
}

fn label_kind_name(kind: LabelKind) -> &'static str {
    match kind {
        LabelKind::Figure => "figure",
        LabelKind::Equation => "equation",
        LabelKind::Other => "other",
    }
}

fn convert_block<'a>(block: &'a Block, doc: &'a Document) -> JsonBlock<'a> {
    match block {
        Block::Heading(h) => JsonBlock::Heading {
            level: h.level,
            content: h.content.iter().map(|i| convert_inline(i, doc)).collect(),
        },
        Block::Paragraph(p) => JsonBlock::Paragraph {
            content: p.content.iter().map(|i| convert_inline(i, doc)).collect(),
        },
        Block::Quote(q) => JsonBlock::Quote {
            blocks: q.blocks.iter().map(|b| convert_block(b, doc)).collect(),
            author: q
                .author
                .as_ref()
                .map(|a| a.iter().map(|i| convert_inline(i, doc)).collect()),
        },
        Block::Table(t) => JsonBlock::Table {
            columns: t.columns.iter().map(|a| alignment_name(*a)).collect(),
            header: t
                .header
                .cells
                .iter()
                .map(|c| c.content.iter().map(|i| convert_inline(i, doc)).collect())
                .collect(),
            rows: t
                .rows
                .iter()
                .map(|row| {
                    row.cells
                        .iter()
                        .map(|c| c.content.iter().map(|i| convert_inline(i, doc)).collect())
                        .collect()
                })
                .collect(),
        },
        Block::Math(m) => JsonBlock::Math {
            label: m.label.as_deref(),
            latex: &m.latex,
        },
        Block::FootnoteDef(f) => JsonBlock::FootnoteDef {
            id: &f.id,
            content: f.content.iter().map(|i| convert_inline(i, doc)).collect(),
        },
        Block::CodeBlock(c) => JsonBlock::CodeBlock {
            lang: &c.lang,
            content: &c.content,
        },
        Block::Directive(d) => convert_directive(d, doc),
        Block::ThematicBreak(_) => JsonBlock::ThematicBreak,
    }
}

fn alignment_name(alignment: ast::Alignment) -> &'static str {
    match alignment {
        ast::Alignment::Left => "left",
        ast::Alignment::Center => "center",
        ast::Alignment::Right => "right",
        ast::Alignment::Default => "default",
    }
}

fn convert_directive<'a>(directive: &'a Directive, doc: &'a Document) -> JsonBlock<'a> {
    match directive {
        Directive::Image(img) => JsonBlock::Image {
            src: &img.src,
            alt: img.alt.as_deref(),
            label: img.label.as_deref(),
            width: img.width.as_deref(),
            align: img.align.as_deref(),
            caption: img.caption.iter().map(|b| convert_block(b, doc)).collect(),
        },
        Directive::Admonition(a) => JsonBlock::Admonition {
            kind: &a.kind,
            title: a.title.as_deref(),
            blocks: a.blocks.iter().map(|b| convert_block(b, doc)).collect(),
        },
        Directive::CsvTable(c) => JsonBlock::CsvTable {
            title: c.title.as_deref(),
            file: &c.file,
        },
        Directive::Glossary(g) => JsonBlock::Glossary {
            entries: g
                .entries
                .iter()
                .map(|e| JsonGlossaryEntry {
                    term: &e.term,
                    definition: e.definition.iter().map(|i| convert_inline(i, doc)).collect(),
                })
                .collect(),
        },
        Directive::Mermaid(m) => JsonBlock::Mermaid { source: &m.source },
        Directive::Passthrough(p) => JsonBlock::Passthrough {
            name: &p.name,
            arg: p.arg.as_deref(),
            body: &p.body,
        },
    }
}

fn convert_inline<'a>(inline: &'a Inline, doc: &'a Document) -> JsonInline<'a> {
    match inline {
        Inline::Text(t) => JsonInline::Text {
            content: &t.content,
        },
        Inline::Emphasis(e) => JsonInline::Emphasis {
            kind: match e.kind {
                ast::EmphasisKind::Italic => "italic",
                ast::EmphasisKind::Bold => "bold",
                ast::EmphasisKind::BoldItalic => "bold-italic",
            },
            content: e.content.iter().map(|i| convert_inline(i, doc)).collect(),
        },
        Inline::Strikethrough(s) => JsonInline::Strikethrough {
            content: s.content.iter().map(|i| convert_inline(i, doc)).collect(),
        },
        Inline::Escaped(e) => JsonInline::Escaped { ch: e.ch },
        Inline::Code(c) => JsonInline::Code {
            content: &c.content,
        },
        Inline::InlineMath(m) => JsonInline::InlineMath { latex: &m.latex },
        Inline::Subscript(s) => JsonInline::Subscript {
            content: &s.content,
        },
        Inline::Superscript(s) => JsonInline::Superscript {
            content: &s.content,
        },
        Inline::Link(l) => JsonInline::Link {
            text: l.text.iter().map(|i| convert_inline(i, doc)).collect(),
            dest: &l.dest,
        },
        Inline::AutoLink(a) => JsonInline::AutoLink { url: &a.url },
        Inline::Image(img) => JsonInline::Image {
            alt: &img.alt,
            src: &img.src,
        },
        Inline::FootnoteRef(f) => JsonInline::FootnoteRef { id: &f.id },
        Inline::Citation(c) => JsonInline::Citation {
            keys: c.keys.iter().map(|k| k.as_ref()).collect(),
            prefix: c.prefix.as_deref(),
            suffix: c.suffix.as_deref(),
        },
        Inline::TermRef(t) => JsonInline::TermRef { term: &t.term },
        Inline::CrossRef(c) => JsonInline::CrossRef {
            label: &c.label,
            ordinal: doc.labels.get(&c.label).and_then(|e| e.ordinal),
        },
    }
}

// =============================================================================
// Text Output
// =============================================================================

fn print_document_summary(doc: &Document) {
    println!("Blocks: {}", doc.blocks.len());
    for (i, block) in doc.blocks.iter().enumerate() {
        println!("  [{}] {}", i + 1, describe_block(block));
    }

    if !doc.labels.is_empty() {
        println!("Labels: {}", doc.labels.len());
        let mut labels: Vec<_> = doc.labels.iter().collect();
        labels.sort_by_key(|(_, e)| (label_kind_name(e.kind), e.ordinal));
        for (label, entry) in labels {
            println!(
                "  {} {} -> {}",
                label_kind_name(entry.kind),
                entry.ordinal.map(|o| o.to_string()).unwrap_or_default(),
                label
            );
        }
    }
}

fn print_document_verbose(doc: &Document) {
    println!("=== mystmark AST ===");
    println!();
    println!("Span: {}..{}", doc.span.start, doc.span.end);
    println!();

    println!("--- Blocks ---");
    for (i, block) in doc.blocks.iter().enumerate() {
        println!();
        println!("[{}] {}", i + 1, describe_block(block));
        print_block_verbose(block, 1);
    }
}

fn describe_block(block: &Block) -> String {
    match block {
        Block::Heading(h) => format!("Heading (level {})", h.level),
        Block::Paragraph(_) => "Paragraph".to_string(),
        Block::Quote(q) => format!(
            "Quote ({} blocks{})",
            q.blocks.len(),
            if q.author.is_some() { ", attributed" } else { "" }
        ),
        Block::Table(t) => format!("Table ({} columns, {} rows)", t.columns.len(), t.rows.len()),
        Block::Math(m) => match &m.label {
            Some(label) => format!("Math (label: {})", label),
            None => "Math".to_string(),
        },
        Block::FootnoteDef(f) => format!("FootnoteDef [^{}]", f.id),
        Block::CodeBlock(c) => format!("CodeBlock (lang: {})", c.lang),
        Block::Directive(d) => match d {
            Directive::Image(img) => format!("Image (src: {})", img.src),
            Directive::Admonition(a) => format!("Admonition (kind: {})", a.kind),
            Directive::CsvTable(c) => format!("CsvTable (file: {})", c.file),
            Directive::Glossary(g) => format!("Glossary ({} entries)", g.entries.len()),
            Directive::Mermaid(_) => "Mermaid".to_string(),
            Directive::Passthrough(p) => format!("Passthrough ({})", p.name),
        },
        Block::ThematicBreak(_) => "ThematicBreak".to_string(),
    }
}

fn print_block_verbose(block: &Block, indent: usize) {
    let prefix = "  ".repeat(indent);

    match block {
        Block::Heading(h) => {
            println!("{}Content: {}", prefix, format_inlines(&h.content));
        }
        Block::Paragraph(p) => {
            println!("{}Content: {}", prefix, format_inlines(&p.content));
        }
        Block::Quote(q) => {
            for (i, block) in q.blocks.iter().enumerate() {
                println!("{}Block {}:", prefix, i + 1);
                print_block_verbose(block, indent + 1);
            }
            if let Some(author) = &q.author {
                println!("{}Author: {}", prefix, format_inlines(author));
            }
        }
        Block::Table(t) => {
            let header: Vec<String> = t
                .header
                .cells
                .iter()
                .map(|c| format_inlines(&c.content))
                .collect();
            println!("{}Header: {}", prefix, header.join(" | "));
            for (i, row) in t.rows.iter().enumerate() {
                let cells: Vec<String> = row
                    .cells
                    .iter()
                    .map(|c| format_inlines(&c.content))
                    .collect();
                println!("{}Row {}: {}", prefix, i + 1, cells.join(" | "));
            }
        }
        Block::Math(m) => {
            let preview: String = m.latex.chars().take(40).collect();
            println!("{}Latex: {}", prefix, preview);
        }
        Block::FootnoteDef(f) => {
            println!("{}Content: {}", prefix, format_inlines(&f.content));
        }
        Block::CodeBlock(c) => {
            let preview: String = c.content.chars().take(60).collect();
            let ellipsis = if c.content.len() > 60 { "..." } else { "" };
            println!(
                "{}Content: {}{}",
                prefix,
                preview.replace('\n', "\\n"),
                ellipsis
            );
        }
        Block::Directive(Directive::Admonition(a)) => {
            for (i, block) in a.blocks.iter().enumerate() {
                println!("{}Block {}:", prefix, i + 1);
                print_block_verbose(block, indent + 1);
            }
        }
        Block::Directive(Directive::Image(img)) => {
            for (i, block) in img.caption.iter().enumerate() {
                println!("{}Caption {}:", prefix, i + 1);
                print_block_verbose(block, indent + 1);
            }
        }
        Block::Directive(Directive::Glossary(g)) => {
            for entry in &g.entries {
                println!(
                    "{}{}: {}",
                    prefix,
                    entry.term,
                    format_inlines(&entry.definition)
                );
            }
        }
        _ => {}
    }
}

fn format_inlines(inlines: &[Inline]) -> String {
    let mut result = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(t) => result.push_str(&t.content),
            Inline::Emphasis(e) => {
                let marker = match e.kind {
                    ast::EmphasisKind::Italic => "*",
                    ast::EmphasisKind::Bold => "**",
                    ast::EmphasisKind::BoldItalic => "***",
                };
                result.push_str(marker);
                result.push_str(&format_inlines(&e.content));
                result.push_str(marker);
            }
            Inline::Strikethrough(s) => {
                result.push_str("~~");
                result.push_str(&format_inlines(&s.content));
                result.push_str("~~");
            }
            Inline::Escaped(e) => result.push(e.ch),
            Inline::Code(c) => {
                result.push('`');
                result.push_str(&c.content);
                result.push('`');
            }
            Inline::InlineMath(m) => {
                result.push_str("{math}`");
                result.push_str(&m.latex);
                result.push('`');
            }
            Inline::Subscript(s) => {
                result.push_str("{sub}`");
                result.push_str(&s.content);
                result.push('`');
            }
            Inline::Superscript(s) => {
                result.push_str("{sup}`");
                result.push_str(&s.content);
                result.push('`');
            }
            Inline::Link(l) => {
                result.push('[');
                result.push_str(&format_inlines(&l.text));
                result.push_str("](");
                result.push_str(&l.dest);
                result.push(')');
            }
            Inline::AutoLink(a) => result.push_str(&a.url),
            Inline::Image(img) => {
                result.push_str("![");
                result.push_str(&img.alt);
                result.push_str("](");
                result.push_str(&img.src);
                result.push(')');
            }
            Inline::FootnoteRef(f) => {
                result.push_str("[^");
                result.push_str(&f.id);
                result.push(']');
            }
            Inline::Citation(c) => {
                result.push('[');
                for (i, key) in c.keys.iter().enumerate() {
                    if i > 0 {
                        result.push_str("; ");
                    }
                    result.push('@');
                    result.push_str(key);
                }
                result.push(']');
            }
            Inline::TermRef(t) => {
                result.push_str("{term}`");
                result.push_str(&t.term);
                result.push('`');
            }
            Inline::CrossRef(c) => {
                result.push_str("[](#");
                result.push_str(&c.label);
                result.push(')');
            }
        }
    }
    result
}
