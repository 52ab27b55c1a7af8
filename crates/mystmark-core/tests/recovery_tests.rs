//! Error recovery tests: degraded regions, collected diagnostics, and
//! parse continuation after structural problems

use mystmark_core::{Block, ErrorKind, Parser};

// ============================================================================
// Unterminated Fences
// ============================================================================

#[test]
fn test_unterminated_code_fence_degrades_to_paragraph() {
    let result = Parser::new().parse("```rust\nfn main() {");
    assert_eq!(result.document.blocks.len(), 1);
    assert!(matches!(&result.document.blocks[0], Block::Paragraph(_)));
    assert!(result.diagnostics.has_kind(ErrorKind::UnterminatedBlock));
}

#[test]
fn test_unterminated_directive_fence() {
    let result = Parser::new().parse("```{note}\nNever closed.");
    assert!(matches!(&result.document.blocks[0], Block::Paragraph(_)));
    assert!(result.diagnostics.has_kind(ErrorKind::UnterminatedBlock));
}

#[test]
fn test_unterminated_math_block() {
    let result = Parser::new().parse("$$\nE = mc^2");
    assert!(matches!(&result.document.blocks[0], Block::Paragraph(_)));
    assert!(result.diagnostics.has_kind(ErrorKind::UnterminatedBlock));
}

#[test]
fn test_unterminated_fence_reports_opening_line() {
    let input = "# Title\n\nA paragraph.\n\n```{note}\nstill open";
    let result = Parser::new().parse(input);
    let diagnostic = result
        .diagnostics
        .iter()
        .find(|d| d.kind == ErrorKind::UnterminatedBlock)
        .expect("unterminated diagnostic expected");
    assert_eq!(diagnostic.line(input), Some(5));
}

// ============================================================================
// Malformed Tables
// ============================================================================

#[test]
fn test_malformed_table_degrades_and_continues() {
    let input = "| A | B |\n| --- | --- |\n| 1 | 2 | 3 |\n\n# Next Section";
    let result = Parser::new().parse(input);

    assert!(result.diagnostics.has_kind(ErrorKind::MalformedTable));
    // The bad region became a literal paragraph; the rest still parsed
    assert_eq!(result.document.blocks.len(), 2);
    assert!(matches!(&result.document.blocks[0], Block::Paragraph(_)));
    assert!(matches!(&result.document.blocks[1], Block::Heading(_)));
}

#[test]
fn test_header_separator_mismatch() {
    let result = Parser::new().parse("| A | B | C |\n| --- | --- |\n| 1 | 2 |");
    assert!(result.diagnostics.has_kind(ErrorKind::MalformedTable));
    assert!(matches!(&result.document.blocks[0], Block::Paragraph(_)));
}

// ============================================================================
// Malformed Directives
// ============================================================================

#[test]
fn test_csv_table_without_file_attribute() {
    let result = Parser::new().parse("```{csv-table}\n:header: A, B\n```");
    assert!(result.diagnostics.has_kind(ErrorKind::MalformedDirective));
    // The directive is preserved opaquely rather than dropped
    assert_eq!(result.document.blocks.len(), 1);
    assert!(matches!(&result.document.blocks[0], Block::Directive(_)));
}

#[test]
fn test_image_without_source() {
    let result = Parser::new().parse("```{image}\n:label: fig-x\n```");
    assert!(result.diagnostics.has_kind(ErrorKind::MalformedDirective));
}

// ============================================================================
// Diagnostics Channel
// ============================================================================

#[test]
fn test_all_diagnostics_are_collected() {
    // Three independent problems in one document: all must surface
    let input = "```rust\nunclosed\n\n| A | B |\n| --- | --- |\n| 1 |\n\nSee [](#ghost).";
    let result = Parser::new().parse(input);
    // The unclosed fence swallows the rest of this input, so parse a
    // second document for the remaining kinds
    assert!(result.diagnostics.has_kind(ErrorKind::UnterminatedBlock));

    let input = "| A | B |\n| --- | --- |\n| 1 |\n\nSee [](#ghost).";
    let result = Parser::new().parse(input);
    assert!(result.diagnostics.has_kind(ErrorKind::MalformedTable));
    assert!(result.diagnostics.has_kind(ErrorKind::UnresolvedLabel));
    assert_eq!(result.diagnostics.len(), 2);
}

#[test]
fn test_structural_diagnostics_precede_reference_diagnostics() {
    let input = "| A | B |\n| --- | --- |\n| 1 |\n\nSee [](#ghost).";
    let result = Parser::new().parse(input);
    let kinds: Vec<ErrorKind> = result.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![ErrorKind::MalformedTable, ErrorKind::UnresolvedLabel]
    );
}

#[test]
fn test_diagnostics_carry_line_numbers() {
    let input = "fine line\n\nSee [](#ghost).";
    let result = Parser::new().parse(input);
    let diagnostic = result.diagnostics.iter().next().unwrap();
    assert_eq!(diagnostic.line(input), Some(3));
}

#[test]
fn test_strict_mode_returns_first_diagnostic() {
    let mut parser = Parser::new();
    let err = parser.parse_strict("See [](#ghost).").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnresolvedLabel);

    let doc = parser.parse_strict("# Clean document").unwrap();
    assert_eq!(doc.blocks.len(), 1);
}

// ============================================================================
// Depth Bound
// ============================================================================

#[test]
fn test_pathological_quote_nesting_is_bounded() {
    // 64 levels of nesting against a default bound of 16: parse must
    // terminate and return a document
    let mut input = String::new();
    for depth in 1..=64 {
        for _ in 0..depth {
            input.push_str("> ");
        }
        input.push_str("deep\n");
    }
    let result = Parser::new().parse(&input);
    assert!(!result.document.blocks.is_empty());
}
