//! Per-line partition of a token sequence.

use std::ops::Range;

use crate::line_column::LineColumnMap;
use crate::token::{TokenInfo, TokenKind};

/// Maps each line to the index of the first token starting on or after it.
///
/// Entry `n` is the first token whose left boundary is at or past the start
/// of line `n`; one trailing entry holds the sequence length, so the tokens
/// of line `n` are `first[n]..first[n + 1]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineTokenIndex {
    first: Vec<usize>,
}

impl LineTokenIndex {
    pub fn build<K: TokenKind>(map: &LineColumnMap, tokens: &[TokenInfo<'_, K>]) -> Self {
        let mut first: Vec<usize> = map
            .beginning_of_line_offsets()
            .iter()
            .map(|&start| tokens.partition_point(|token| token.left() < start))
            .collect();
        first.push(tokens.len());
        Self { first }
    }

    /// Index range of the tokens that start on the 0-based `line`.
    pub fn line_range(&self, line: usize) -> Option<Range<usize>> {
        let start = *self.first.get(line)?;
        let end = *self.first.get(line + 1)?;
        Some(start..end.max(start))
    }

    /// First-token indices, one per line plus the trailing sentinel.
    pub fn first_tokens(&self) -> &[usize] {
        &self.first
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    pub fn clear(&mut self) {
        self.first.clear();
    }
}
