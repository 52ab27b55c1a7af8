//! Inline-span resolver.
//!
//! Single left-to-right scan with small lookahead, borrowing directly
//! from input. Escapes resolve before delimiter matching: the scan meets
//! the backslash first and consumes the escaped character with it, so an
//! escaped delimiter can never open a span, and closer searches skip
//! backslash-preceded delimiters.

use std::borrow::Cow;

use crate::ast::{
    AutoLink, Citation, CodeSpan, CowStr, CrossRef, Emphasis, EmphasisKind, Escaped, FootnoteRef,
    Image, Inline, InlineMath, Link, Strikethrough, Subscript, Superscript, TermRef, Text,
};
use crate::span::Span;

/// Parse inline elements from a block's text content.
///
/// `base_offset` is the byte offset of `text` within the original input,
/// so every produced span is absolute.
#[inline]
pub fn parse_inlines<'a>(text: &'a str, base_offset: u32) -> Vec<Inline<'a>> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut parser = InlineParser::new(text, base_offset);
    parser.parse()
}

/// Bytes that can start an inline construct. A lookup table instead of
/// chained memchr calls: this grammar has ten trigger bytes.
const fn special_table() -> [bool; 256] {
    let mut table = [false; 256];
    let triggers = b"\\`*_~[{!@:";
    let mut i = 0;
    while i < triggers.len() {
        table[triggers[i] as usize] = true;
        i += 1;
    }
    table
}

const SPECIAL: [bool; 256] = special_table();

#[inline(always)]
fn is_key_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b':' | b'.' | b'#' | b'+')
}

#[inline(always)]
fn is_scheme_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.')
}

struct InlineParser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    base_offset: u32,
}

impl<'a> InlineParser<'a> {
    #[inline]
    fn new(text: &'a str, base_offset: u32) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            base_offset,
        }
    }

    fn parse(&mut self) -> Vec<Inline<'a>> {
        let mut inlines = Vec::with_capacity(8);
        let mut text_start = 0;

        while self.pos < self.bytes.len() {
            let next_special = self.find_next_special();

            if next_special >= self.bytes.len() {
                break;
            }

            self.pos = next_special;
            let c = self.bytes[self.pos];

            let parsed = match c {
                b'\\' => self.try_parse_escape(&mut inlines, &mut text_start),
                b'`' => self.try_parse_code_span(&mut inlines, &mut text_start),
                b'[' => self.try_parse_bracket(&mut inlines, &mut text_start),
                b'!' => self.try_parse_image(&mut inlines, &mut text_start),
                b'*' | b'_' => self.try_parse_emphasis(&mut inlines, &mut text_start),
                b'~' => self.try_parse_strikethrough(&mut inlines, &mut text_start),
                b'{' => self.try_parse_role(&mut inlines, &mut text_start),
                b'@' => self.try_parse_bare_citation(&mut inlines, &mut text_start),
                b':' => self.try_parse_autolink(&mut inlines, &mut text_start),
                _ => false,
            };

            if !parsed {
                self.pos += 1;
            }
        }

        // Flush remaining text
        if text_start < self.bytes.len() {
            inlines.push(self.make_text(text_start, self.bytes.len()));
        }

        inlines
    }

    #[inline(always)]
    fn find_next_special(&self) -> usize {
        let mut i = self.pos;
        while i < self.bytes.len() && !SPECIAL[self.bytes[i] as usize] {
            i += 1;
        }
        i
    }

    #[inline(always)]
    fn make_text(&self, start: usize, end: usize) -> Inline<'a> {
        Inline::Text(Text {
            content: Cow::Borrowed(&self.text[start..end]),
            span: Span::new(
                self.base_offset + start as u32,
                self.base_offset + end as u32,
            ),
        })
    }

    #[inline(always)]
    fn flush_text(&self, inlines: &mut Vec<Inline<'a>>, text_start: &mut usize) {
        if *text_start < self.pos {
            inlines.push(self.make_text(*text_start, self.pos));
        }
        *text_start = self.pos;
    }

    #[inline(always)]
    fn abs(&self, offset: usize) -> u32 {
        self.base_offset + offset as u32
    }

    /// Find `needle` at or after `from`, skipping backslash-escaped hits.
    #[inline]
    fn find_unescaped(&self, needle: u8, from: usize) -> Option<usize> {
        let mut search = from;
        while let Some(offset) = memchr::memchr(needle, &self.bytes[search..]) {
            let abs_pos = search + offset;
            if abs_pos == 0 || self.bytes[abs_pos - 1] != b'\\' {
                return Some(abs_pos);
            }
            search = abs_pos + 1;
        }
        None
    }

    #[inline]
    fn try_parse_escape(&mut self, inlines: &mut Vec<Inline<'a>>, text_start: &mut usize) -> bool {
        let start = self.pos;
        if start + 1 >= self.bytes.len() || !self.bytes[start + 1].is_ascii_punctuation() {
            return false;
        }

        self.flush_text(inlines, text_start);

        inlines.push(Inline::Escaped(Escaped {
            ch: self.bytes[start + 1] as char,
            span: Span::new(self.abs(start), self.abs(start + 2)),
        }));

        self.pos = start + 2;
        *text_start = self.pos;
        true
    }

    #[inline]
    fn try_parse_code_span(
        &mut self,
        inlines: &mut Vec<Inline<'a>>,
        text_start: &mut usize,
    ) -> bool {
        let start = self.pos;

        if let Some(close) = self.find_unescaped(b'`', start + 1) {
            self.flush_text(inlines, text_start);

            inlines.push(Inline::Code(CodeSpan {
                content: Cow::Borrowed(&self.text[start + 1..close]),
                span: Span::new(self.abs(start), self.abs(close + 1)),
            }));

            self.pos = close + 1;
            *text_start = self.pos;
            true
        } else {
            false
        }
    }

    #[inline]
    fn try_parse_bracket(&mut self, inlines: &mut Vec<Inline<'a>>, text_start: &mut usize) -> bool {
        let start = self.pos;
        if start + 1 >= self.bytes.len() {
            return false;
        }

        if self.bytes[start + 1] == b'^' {
            return self.try_parse_footnote_ref(inlines, text_start);
        }

        let close = match self.find_unescaped(b']', start + 1) {
            Some(c) => c,
            None => return false,
        };
        let inner = &self.text[start + 1..close];

        if close + 1 < self.bytes.len() && self.bytes[close + 1] == b'(' {
            let rp = match self.find_unescaped(b')', close + 2) {
                Some(p) => p,
                None => return false,
            };
            let dest = &self.text[close + 2..rp];

            self.flush_text(inlines, text_start);

            if inner.is_empty() && dest.starts_with('#') {
                // The only syntax that produces a CrossRef
                inlines.push(Inline::CrossRef(CrossRef {
                    label: Cow::Borrowed(&dest[1..]),
                    span: Span::new(self.abs(start), self.abs(rp + 1)),
                }));
            } else {
                let mut inner_parser = InlineParser::new(inner, self.abs(start + 1));
                inlines.push(Inline::Link(Link {
                    text: inner_parser.parse(),
                    dest: Cow::Borrowed(dest),
                    span: Span::new(self.abs(start), self.abs(rp + 1)),
                }));
            }

            self.pos = rp + 1;
            *text_start = self.pos;
            return true;
        }

        if inner.contains('@') {
            if let Some((keys, prefix, suffix)) = parse_bracket_citation(inner) {
                self.flush_text(inlines, text_start);

                inlines.push(Inline::Citation(Citation {
                    keys,
                    prefix,
                    suffix,
                    span: Span::new(self.abs(start), self.abs(close + 1)),
                }));

                self.pos = close + 1;
                *text_start = self.pos;
                return true;
            }
        }

        false
    }

    #[inline]
    fn try_parse_footnote_ref(
        &mut self,
        inlines: &mut Vec<Inline<'a>>,
        text_start: &mut usize,
    ) -> bool {
        let start = self.pos;
        let id_start = start + 2;

        if let Some(close) = self.find_unescaped(b']', id_start) {
            let id = &self.text[id_start..close];
            if id.is_empty() {
                return false;
            }

            self.flush_text(inlines, text_start);

            inlines.push(Inline::FootnoteRef(FootnoteRef {
                id: Cow::Borrowed(id),
                span: Span::new(self.abs(start), self.abs(close + 1)),
            }));

            self.pos = close + 1;
            *text_start = self.pos;
            true
        } else {
            false
        }
    }

    #[inline]
    fn try_parse_image(&mut self, inlines: &mut Vec<Inline<'a>>, text_start: &mut usize) -> bool {
        let start = self.pos;
        if start + 1 >= self.bytes.len() || self.bytes[start + 1] != b'[' {
            return false;
        }

        let close = match self.find_unescaped(b']', start + 2) {
            Some(c) => c,
            None => return false,
        };
        if close + 1 >= self.bytes.len() || self.bytes[close + 1] != b'(' {
            return false;
        }
        let rp = match self.find_unescaped(b')', close + 2) {
            Some(p) => p,
            None => return false,
        };

        self.flush_text(inlines, text_start);

        // Any caption text after the image stays ordinary sibling content
        inlines.push(Inline::Image(Image {
            alt: Cow::Borrowed(&self.text[start + 2..close]),
            src: Cow::Borrowed(&self.text[close + 2..rp]),
            label: None,
            span: Span::new(self.abs(start), self.abs(rp + 1)),
        }));

        self.pos = rp + 1;
        *text_start = self.pos;
        true
    }

    /// Delimiter-run matching for `*` and `_`.
    ///
    /// A run of N delimiters opens; the first closing run long enough to
    /// match wins, otherwise the longest available pair is used and the
    /// unused opener delimiters stay literal. Single pair → italic,
    /// double → bold, triple → both.
    #[inline]
    fn try_parse_emphasis(
        &mut self,
        inlines: &mut Vec<Inline<'a>>,
        text_start: &mut usize,
    ) -> bool {
        let delim = self.bytes[self.pos];
        let start = self.pos;
        let len = self.bytes.len();

        let mut open_len = 0;
        while start + open_len < len && self.bytes[start + open_len] == delim {
            open_len += 1;
        }
        let open_take = open_len.min(3);
        let content_start = start + open_len;

        if content_start >= len || self.bytes[content_start].is_ascii_whitespace() {
            return false;
        }
        // Underscores do not open intraword
        if delim == b'_' && start > 0 && self.bytes[start - 1].is_ascii_alphanumeric() {
            return false;
        }

        // Scan for a closing run: prefer one at least as long as the
        // opener, fall back to the first valid one.
        let mut first: Option<(usize, usize)> = None;
        let mut chosen: Option<(usize, usize)> = None;
        let mut i = content_start;
        while i < len {
            if self.bytes[i] != delim {
                i += 1;
                continue;
            }
            let mut run = 0;
            while i + run < len && self.bytes[i + run] == delim {
                run += 1;
            }
            let prev = self.bytes[i - 1];
            let closes_word = delim != b'_'
                || i + run >= len
                || !self.bytes[i + run].is_ascii_alphanumeric();
            if i > content_start && prev != b'\\' && !prev.is_ascii_whitespace() && closes_word {
                if first.is_none() {
                    first = Some((i, run));
                }
                if run >= open_take {
                    chosen = Some((i, run));
                    break;
                }
            }
            i += run;
        }

        let (close_pos, close_run) = match chosen.or(first) {
            Some(found) => found,
            None => return false,
        };

        let use_n = open_take.min(close_run);
        let lead = open_len - use_n;

        // Unused opener delimiters stay literal text
        self.pos = start + lead;
        self.flush_text(inlines, text_start);

        let content = &self.text[content_start..close_pos];
        let mut inner_parser = InlineParser::new(content, self.abs(content_start));

        let kind = match use_n {
            1 => EmphasisKind::Italic,
            2 => EmphasisKind::Bold,
            _ => EmphasisKind::BoldItalic,
        };

        inlines.push(Inline::Emphasis(Emphasis {
            kind,
            content: inner_parser.parse(),
            span: Span::new(self.abs(start + lead), self.abs(close_pos + use_n)),
        }));

        self.pos = close_pos + use_n;
        *text_start = self.pos;
        true
    }

    #[inline]
    fn try_parse_strikethrough(
        &mut self,
        inlines: &mut Vec<Inline<'a>>,
        text_start: &mut usize,
    ) -> bool {
        let start = self.pos;
        let len = self.bytes.len();

        // Exactly double tilde opens; a lone tilde is literal text
        if start + 1 >= len || self.bytes[start + 1] != b'~' {
            return false;
        }

        let content_start = start + 2;
        if content_start >= len || self.bytes[content_start].is_ascii_whitespace() {
            return false;
        }

        let mut i = content_start;
        while i + 1 < len {
            if self.bytes[i] == b'~' && self.bytes[i + 1] == b'~' {
                let prev = self.bytes[i - 1];
                if i > content_start && prev != b'\\' && !prev.is_ascii_whitespace() {
                    self.flush_text(inlines, text_start);

                    let content = &self.text[content_start..i];
                    let mut inner_parser = InlineParser::new(content, self.abs(content_start));

                    inlines.push(Inline::Strikethrough(Strikethrough {
                        content: inner_parser.parse(),
                        span: Span::new(self.abs(start), self.abs(i + 2)),
                    }));

                    self.pos = i + 2;
                    *text_start = self.pos;
                    return true;
                }
            }
            i += 1;
        }

        false
    }

    /// `{name}` followed by a backtick literal: `{sub}`, `{sup}`,
    /// `{math}`, `{term}`. Unknown role names stay literal text.
    #[inline]
    fn try_parse_role(&mut self, inlines: &mut Vec<Inline<'a>>, text_start: &mut usize) -> bool {
        let start = self.pos;

        let close_brace = match memchr::memchr(b'}', &self.bytes[start + 1..]) {
            Some(offset) => start + 1 + offset,
            None => return false,
        };
        let name = &self.text[start + 1..close_brace];
        if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
            return false;
        }

        if close_brace + 1 >= self.bytes.len() || self.bytes[close_brace + 1] != b'`' {
            return false;
        }
        let lit_start = close_brace + 2;
        let close_tick = match memchr::memchr(b'`', &self.bytes[lit_start..]) {
            Some(offset) => lit_start + offset,
            None => return false,
        };

        let content: CowStr<'a> = Cow::Borrowed(&self.text[lit_start..close_tick]);
        let span = Span::new(self.abs(start), self.abs(close_tick + 1));

        let node = match name {
            "sub" => Inline::Subscript(Subscript { content, span }),
            "sup" => Inline::Superscript(Superscript { content, span }),
            "math" => Inline::InlineMath(InlineMath {
                latex: content,
                span,
            }),
            "term" => Inline::TermRef(TermRef {
                term: content,
                span,
            }),
            _ => return false,
        };

        self.flush_text(inlines, text_start);
        inlines.push(node);

        self.pos = close_tick + 1;
        *text_start = self.pos;
        true
    }

    /// Bare `@key` citation. Requires a word boundary before the `@`.
    #[inline]
    fn try_parse_bare_citation(
        &mut self,
        inlines: &mut Vec<Inline<'a>>,
        text_start: &mut usize,
    ) -> bool {
        let start = self.pos;

        // An alphanumeric before the @ means this is not a citation
        // (e.g. an email address)
        if start > 0 && self.bytes[start - 1].is_ascii_alphanumeric() {
            return false;
        }

        let key_start = start + 1;
        let mut i = key_start;
        while i < self.bytes.len() && is_key_byte(self.bytes[i]) {
            i += 1;
        }
        // Punctuation legal inside a key is not legal at its end
        let mut key_end = i;
        while key_end > key_start && !self.bytes[key_end - 1].is_ascii_alphanumeric() {
            key_end -= 1;
        }
        if key_end == key_start {
            return false;
        }

        self.flush_text(inlines, text_start);

        inlines.push(Inline::Citation(Citation {
            keys: vec![Cow::Borrowed(&self.text[key_start..key_end])],
            prefix: None,
            suffix: None,
            span: Span::new(self.abs(start), self.abs(key_end)),
        }));

        self.pos = key_end;
        *text_start = self.pos;
        true
    }

    /// Bare `scheme://...` token, linked with text = destination.
    #[inline]
    fn try_parse_autolink(
        &mut self,
        inlines: &mut Vec<Inline<'a>>,
        text_start: &mut usize,
    ) -> bool {
        let colon = self.pos;
        let len = self.bytes.len();

        if colon + 2 >= len || self.bytes[colon + 1] != b'/' || self.bytes[colon + 2] != b'/' {
            return false;
        }

        // Scheme runs backwards from the colon
        let mut scheme_start = colon;
        while scheme_start > *text_start && is_scheme_byte(self.bytes[scheme_start - 1]) {
            scheme_start -= 1;
        }
        if scheme_start == colon || !self.bytes[scheme_start].is_ascii_alphabetic() {
            return false;
        }
        if scheme_start > 0 && self.bytes[scheme_start - 1].is_ascii_alphanumeric() {
            return false;
        }

        let mut end = colon + 3;
        while end < len
            && !self.bytes[end].is_ascii_whitespace()
            && self.bytes[end] != b'<'
            && self.bytes[end] != b'>'
        {
            end += 1;
        }
        // Trailing sentence punctuation is not part of the URL
        while end > colon + 3 && matches!(self.bytes[end - 1], b'.' | b',' | b';' | b':' | b'!' | b'?' | b')') {
            end -= 1;
        }
        if end <= colon + 3 {
            return false;
        }

        self.pos = scheme_start;
        self.flush_text(inlines, text_start);

        inlines.push(Inline::AutoLink(AutoLink {
            url: Cow::Borrowed(&self.text[scheme_start..end]),
            span: Span::new(self.abs(scheme_start), self.abs(end)),
        }));

        self.pos = end;
        *text_start = self.pos;
        true
    }
}

/// Parse the interior of a bracketed citation: semicolon-separated keys,
/// with free text around the first and last keys kept as prefix/suffix.
#[allow(clippy::type_complexity)]
fn parse_bracket_citation(
    inner: &str,
) -> Option<(Vec<CowStr<'_>>, Option<CowStr<'_>>, Option<CowStr<'_>>)> {
    let mut keys: Vec<CowStr<'_>> = Vec::new();
    let mut prefix: Option<CowStr<'_>> = None;
    let mut suffix: Option<CowStr<'_>> = None;

    let segments: Vec<&str> = inner.split(';').collect();
    let last = segments.len() - 1;

    for (idx, segment) in segments.iter().enumerate() {
        let at = match segment.find('@') {
            Some(p) => p,
            None => {
                // Key-less segments only contribute prefix/suffix text
                let t = segment.trim();
                if !t.is_empty() {
                    if idx == 0 {
                        prefix = Some(Cow::Borrowed(t));
                    } else if idx == last {
                        suffix = Some(Cow::Borrowed(t));
                    }
                }
                continue;
            }
        };

        if idx == 0 {
            let before = segment[..at].trim();
            if !before.is_empty() {
                prefix = Some(Cow::Borrowed(before));
            }
        }

        let key_area = &segment[at + 1..];
        let key_bytes = key_area.as_bytes();
        let mut key_len = 0;
        while key_len < key_bytes.len() && is_key_byte(key_bytes[key_len]) {
            key_len += 1;
        }
        let mut key_end = key_len;
        while key_end > 0 && !key_bytes[key_end - 1].is_ascii_alphanumeric() {
            key_end -= 1;
        }
        if key_end == 0 {
            continue;
        }
        keys.push(Cow::Borrowed(&key_area[..key_end]));

        if idx == last {
            let after = key_area[key_len..].trim_start_matches(',').trim();
            if !after.is_empty() {
                suffix = Some(Cow::Borrowed(after));
            }
        }
    }

    if keys.is_empty() {
        None
    } else {
        Some((keys, prefix, suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Inline;

    fn parse(text: &str) -> Vec<Inline<'_>> {
        parse_inlines(text, 0)
    }

    #[test]
    fn escaped_asterisks_never_emphasize() {
        let inlines = parse("\\*asterisks\\*");
        assert_eq!(inlines.len(), 3);
        assert!(matches!(&inlines[0], Inline::Escaped(e) if e.ch == '*'));
        assert!(matches!(&inlines[1], Inline::Text(t) if t.content == "asterisks"));
        assert!(matches!(&inlines[2], Inline::Escaped(e) if e.ch == '*'));
    }

    #[test]
    fn triple_delimiters_mean_bold_italic() {
        let inlines = parse("***both***");
        assert_eq!(inlines.len(), 1);
        match &inlines[0] {
            Inline::Emphasis(e) => assert_eq!(e.kind, EmphasisKind::BoldItalic),
            other => panic!("expected emphasis, got {:?}", other),
        }
    }

    #[test]
    fn mismatched_runs_use_longest_pair() {
        // **a* closes with the single delimiter; the extra opener stays
        // literal
        let inlines = parse("**a*");
        assert_eq!(inlines.len(), 2);
        assert!(matches!(&inlines[0], Inline::Text(t) if t.content == "*"));
        assert!(matches!(&inlines[1], Inline::Emphasis(e) if e.kind == EmphasisKind::Italic));
    }

    #[test]
    fn underscores_do_not_emphasize_intraword() {
        let inlines = parse("snake_case_name");
        assert_eq!(inlines.len(), 1);
        assert!(matches!(&inlines[0], Inline::Text(t) if t.content == "snake_case_name"));
    }

    #[test]
    fn single_tilde_is_literal() {
        let inlines = parse("a ~ b");
        assert_eq!(inlines.len(), 1);
        assert!(matches!(&inlines[0], Inline::Text(t) if t.content == "a ~ b"));
    }

    #[test]
    fn crossref_requires_empty_text_and_hash() {
        let inlines = parse("[](#fig-one)");
        assert!(matches!(&inlines[0], Inline::CrossRef(c) if c.label == "fig-one"));

        let inlines = parse("[see](#fig-one)");
        assert!(matches!(&inlines[0], Inline::Link(_)));
    }

    #[test]
    fn bracketed_citation_with_prefix_and_suffix() {
        let inlines = parse("[see @smith2020, p. 12]");
        match &inlines[0] {
            Inline::Citation(c) => {
                assert_eq!(c.keys, vec!["smith2020"]);
                assert_eq!(c.prefix.as_deref(), Some("see"));
                assert_eq!(c.suffix.as_deref(), Some("p. 12"));
            }
            other => panic!("expected citation, got {:?}", other),
        }
    }

    #[test]
    fn semicolons_separate_citation_keys() {
        let inlines = parse("[@a; @b; @c]");
        match &inlines[0] {
            Inline::Citation(c) => assert_eq!(c.keys, vec!["a", "b", "c"]),
            other => panic!("expected citation, got {:?}", other),
        }
    }

    #[test]
    fn bare_citation_needs_word_boundary() {
        let inlines = parse("mail user@example.com and cite @key");
        let citations: Vec<_> = inlines
            .iter()
            .filter_map(|i| match i {
                Inline::Citation(c) => Some(c),
                _ => None,
            })
            .collect();
        assert_eq!(citations.len(), 1);
        assert_eq!(citations[0].keys, vec!["key"]);
    }

    #[test]
    fn autolink_detects_bare_urls() {
        let inlines = parse("visit https://example.com/x today");
        assert!(inlines
            .iter()
            .any(|i| matches!(i, Inline::AutoLink(a) if a.url == "https://example.com/x")));
    }

    #[test]
    fn roles_wrap_backtick_literals() {
        let inlines = parse("H{sub}`2`O and e = mc{sup}`2`");
        assert!(inlines
            .iter()
            .any(|i| matches!(i, Inline::Subscript(s) if s.content == "2")));
        assert!(inlines
            .iter()
            .any(|i| matches!(i, Inline::Superscript(s) if s.content == "2")));
    }

    #[test]
    fn unknown_role_stays_literal() {
        let inlines = parse("{nope}`x`");
        assert!(inlines
            .iter()
            .all(|i| matches!(i, Inline::Text(_) | Inline::Code(_))));
    }

    #[test]
    fn image_caption_is_sibling_content() {
        let inlines = parse("![alt text](img.png) A caption with [a link](x)");
        assert!(matches!(&inlines[0], Inline::Image(i) if i.src == "img.png"));
        assert!(inlines.len() > 1);
        assert!(inlines.iter().any(|i| matches!(i, Inline::Link(_))));
    }
}
