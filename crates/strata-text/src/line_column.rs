//! Byte offset to line/column translation.

use std::fmt;

/// A 0-based line and byte column.
///
/// `Display` renders the 1-based `line:column` form used in every
/// user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LineColumn {
    pub line: usize,
    pub column: usize,
}

impl LineColumn {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for LineColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Pre-computed line start table for one buffer.
///
/// Built once in O(n); every lookup is a binary search over line starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineColumnMap {
    /// Byte offset of each line start. `beginning_of_line_offsets[0] == 0`.
    beginning_of_line_offsets: Vec<usize>,
    /// Length of the buffer the table was built from.
    end_offset: usize,
}

impl LineColumnMap {
    pub fn new(text: &str) -> Self {
        let mut beginning_of_line_offsets = vec![0];
        beginning_of_line_offsets.extend(
            text.bytes()
                .enumerate()
                .filter(|&(_, byte)| byte == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            beginning_of_line_offsets,
            end_offset: text.len(),
        }
    }

    /// Resolves a byte offset. Offsets past the end clamp to the end.
    pub fn resolve(&self, offset: usize) -> LineColumn {
        let offset = offset.min(self.end_offset);
        // Largest line start <= offset.
        let line = self
            .beginning_of_line_offsets
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let column = offset - self.beginning_of_line_offsets[line];
        LineColumn::new(line, column)
    }

    /// Byte offset where the 0-based `line` begins.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.beginning_of_line_offsets.get(line).copied()
    }

    pub fn beginning_of_line_offsets(&self) -> &[usize] {
        &self.beginning_of_line_offsets
    }

    /// Number of lines, counting a trailing empty line after a final newline.
    pub fn line_count(&self) -> usize {
        self.beginning_of_line_offsets.len()
    }

    pub fn end_offset(&self) -> usize {
        self.end_offset
    }
}
