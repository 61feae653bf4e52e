//! Method-body delimiting by balanced-brace matching
//!
//! One pass over the unit pairs every `{` with its closing `}` using a stack
//! of open braces. A method body is the span from the brace that ends its
//! header through that brace's partner, so nested braces are handled and the
//! cost stays linear however many headers share the same open braces.
//! Braces inside string or char literals are matched like any other brace.
//!
//! A brace that is still open at end of input has no partner. Its body is
//! reported as unterminated, with no text and zero code lines.

use super::lines::LineIndex;
use super::patterns;
use std::ops::Range;

/// Partner of every opening brace in a unit
#[derive(Debug, Default)]
pub struct BraceTable {
    /// `(offset of '{', offset of its '}')`, sorted by the opening offset
    pairs: Vec<(usize, Option<usize>)>,
}

impl BraceTable {
    pub fn new(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut pairs = Vec::new();
        let mut open_stack: Vec<usize> = Vec::new();

        for pos in memchr::memchr2_iter(b'{', b'}', bytes) {
            if bytes[pos] == b'{' {
                open_stack.push(pairs.len());
                pairs.push((pos, None));
            } else if let Some(idx) = open_stack.pop() {
                pairs[idx].1 = Some(pos);
            }
            // A '}' with nothing open closes nothing
        }

        Self { pairs }
    }

    /// Offset of the `}` matching the `{` at `open`
    pub fn partner(&self, open: usize) -> Option<usize> {
        self.pairs
            .binary_search_by_key(&open, |&(start, _)| start)
            .ok()
            .and_then(|idx| self.pairs[idx].1)
    }

    /// Span from the `{` at `open` through its partner (both inclusive)
    pub fn delimit(&self, open: usize) -> Option<Range<usize>> {
        self.partner(open).map(|close| open..close + 1)
    }
}

/// Locate the body that opens at byte offset `open`.
///
/// Returns the byte range from the opening brace through its matching
/// closing brace (inclusive of both), or `None` if `open` is not a `{` or
/// the braces never balance before end of input. Builds a [`BraceTable`]
/// for the whole unit; use the table directly for repeated lookups.
pub fn delimit_body(source: &str, open: usize) -> Option<Range<usize>> {
    BraceTable::new(source).delimit(open)
}

/// A method body found in a compilation unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodBody<'a> {
    /// Byte offset of the opening brace
    pub open: usize,
    /// Span of the balanced body, `None` when unterminated
    pub span: Option<Range<usize>>,
    code_lines: usize,
    source: &'a str,
}

impl<'a> MethodBody<'a> {
    /// Body text including both braces (empty when unterminated)
    pub fn text(&self) -> &'a str {
        match &self.span {
            Some(span) => &self.source[span.clone()],
            None => "",
        }
    }

    #[cfg(test)]
    fn is_terminated(&self) -> bool {
        self.span.is_some()
    }

    /// Code lines in the body, same filter as the class LOC
    pub fn code_lines(&self) -> usize {
        self.code_lines
    }
}

/// All method bodies in `source`, in header order
pub fn method_bodies(source: &str) -> Vec<MethodBody<'_>> {
    let braces = BraceTable::new(source);
    let lines = LineIndex::new(source);

    patterns::method_body_header()
        .find_iter(source)
        .map(|m| {
            // The header pattern always ends on the opening brace
            let open = m.end() - 1;
            let span = braces.delimit(open);
            let code_lines = span
                .as_ref()
                .map(|span| lines.span_code_lines(span.start, span.end - 1))
                .unwrap_or(0);
            MethodBody {
                open,
                span,
                code_lines,
                source,
            }
        })
        .collect()
}
