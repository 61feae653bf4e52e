//! Code-line counting
//!
//! A line counts as code when, trimmed, it is non-empty and does not begin
//! with `//`, `*` or `/*`. Block-comment state is not carried across lines,
//! so the body of a block comment whose lines do not start with `*` counts as
//! code. The smell thresholds are calibrated against exactly this filter.

/// Whether a single line counts as a line of code
pub fn is_code_line(line: &str) -> bool {
    let trimmed = line.trim();
    !(trimmed.is_empty()
        || trimmed.starts_with("//")
        || trimmed.starts_with('*')
        || trimmed.starts_with("/*"))
}

/// Number of code lines in `text`
pub fn count_code_lines(text: &str) -> usize {
    text.split('\n').filter(|line| is_code_line(line)).count()
}

/// Number of physical lines in `text` (an empty text has one empty line)
#[cfg(test)]
pub(crate) fn total_lines(text: &str) -> usize {
    text.split('\n').count()
}

/// Per-line code flags of a whole unit, for counting the code lines of many
/// overlapping spans without rescanning them.
#[derive(Debug)]
pub struct LineIndex {
    /// Byte offset where each line starts
    starts: Vec<usize>,
    /// `code_before[i]` is the number of code lines among lines `0..i`
    code_before: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(memchr::memchr_iter(b'\n', text.as_bytes()).map(|nl| nl + 1));

        let mut code_before = Vec::with_capacity(starts.len() + 1);
        code_before.push(0);
        let mut code = 0;
        for line in text.split('\n') {
            code += usize::from(is_code_line(line));
            code_before.push(code);
        }

        Self {
            starts,
            code_before,
        }
    }

    /// Line number (0-based) holding byte `offset`
    pub fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset) - 1
    }

    /// Code lines of the text in `open..=close`, where both offsets hold a
    /// brace.
    ///
    /// Equal to `count_code_lines(&text[open..=close])`. The first segment
    /// starts with `{` and always counts. The last segment ends on `}`, so it
    /// starts the way its whole line does and shares that line's flag.
    pub fn span_code_lines(&self, open: usize, close: usize) -> usize {
        let first = self.line_of(open);
        let last = self.line_of(close);
        1 + self.code_before[last + 1] - self.code_before[first + 1]
    }
}
