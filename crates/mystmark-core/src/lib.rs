//! # mystmark Core
//!
//! A deterministic, zero-copy parser for a Markdown/MyST dialect:
//! headings, emphasis, links, images, tables, block quotes, footnotes,
//! math, citations, glossary terms, directives, and roles — with a
//! cross-reference pass that numbers labeled figures and equations.
//!
//! ## Quick Start
//!
//! ```rust
//! use mystmark_core::Parser;
//!
//! let input = "# Intro\n\nSee [](#fig-map).\n\n```{image} map.png\n:label: fig-map\n```\n";
//! let mut parser = Parser::new();
//! let result = parser.parse(input);
//!
//! assert!(result.diagnostics.is_empty());
//! let entry = result.document.labels.get("fig-map").unwrap();
//! assert_eq!(entry.ordinal, Some(1));
//! ```
//!
//! ## Error Recovery
//!
//! Diagnostics are collected, not thrown. A document is always returned,
//! degraded where recovery kicked in:
//!
//! ```rust
//! use mystmark_core::{ErrorKind, Parser};
//!
//! let mut parser = Parser::new();
//! let result = parser.parse("See [](#ghost).");
//!
//! assert_eq!(result.document.blocks.len(), 1);
//! assert!(result.diagnostics.has_kind(ErrorKind::UnresolvedLabel));
//! ```
//!
//! ## Passes
//!
//! Parsing runs four passes in a fixed order: block scan, per-block
//! inline resolution, directive specialization, and cross-reference
//! resolution. The resolver pass is exposed separately as
//! [`resolve::resolve`] and is idempotent.

pub mod ast;
mod directive;
pub mod error;
pub mod inline;
pub mod lexer;
pub mod parser;
pub mod resolve;
pub mod span;

pub use ast::{Block, Document, Inline, LabelKind};
pub use directive::is_known_directive;
pub use error::{Diagnostic, Diagnostics, ErrorKind};
pub use parser::{ParseOptions, ParseResult, Parser};
