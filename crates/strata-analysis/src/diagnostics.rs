//! Rendering of rejected tokens.
//!
//! Two forms are produced. The plain form names the token and its position
//! range for humans. The tool-integration form is a single
//! `file:line:column: ...` line that editors and CI log scrapers match on;
//! keep its layout stable.

use strata_text::{LineColumnMap, TokenInfo, TokenKind};

use crate::config::DiagnosticConfig;
use crate::phase::RejectedToken;

/// Formats diagnostics against one buffer.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticFormatter<'a> {
    contents: &'a str,
    filename: &'a str,
    line_column_map: &'a LineColumnMap,
    config: &'a DiagnosticConfig,
}

impl<'a> DiagnosticFormatter<'a> {
    pub fn new(
        contents: &'a str,
        filename: &'a str,
        line_column_map: &'a LineColumnMap,
        config: &'a DiagnosticConfig,
    ) -> Self {
        Self {
            contents,
            filename,
            line_column_map,
            config,
        }
    }

    /// Human-readable description of an offending token.
    ///
    /// Single-line tokens show `line:col` and, when wider than two
    /// characters, `-lastcol`. Multi-line tokens show the full position of
    /// their last character. A token ending in a newline therefore ends on
    /// its own line, at the newline's column.
    pub fn token_error_message<K: TokenKind>(&self, token: &TokenInfo<'_, K>) -> String {
        if token.is_eof() {
            let end = self.line_column_map.resolve(self.contents.len());
            return format!("token: {} at {end}", self.config.eof_marker);
        }

        let left = self.line_column_map.resolve(token.left());
        // Position of the last character, not one past the end.
        let right = match token.right().checked_sub(1) {
            Some(last) if !token.is_empty() => self.line_column_map.resolve(last),
            _ => left,
        };
        let range = if left.line != right.line {
            format!("-{right}")
        } else if left.column + 1 < right.column {
            // Only print the upper bound if it differs by more than one character.
            format!("-{}", right.column + 1)
        } else {
            String::new()
        };
        format!("token: \"{}\" at {left}{range}", token.text)
    }

    /// Tool-integration message for one rejected token.
    pub fn linter_message<K: TokenKind>(&self, rejected: &RejectedToken<'_, K>) -> String {
        let token = &rejected.token;
        let mut out = if token.is_eof() {
            let end = self.line_column_map.resolve(self.contents.len());
            format!(
                "{}:{end}: {} error (unexpected EOF) ({}).",
                self.filename, rejected.phase, self.config.help_url
            )
        } else {
            let left = self.line_column_map.resolve(token.left());
            format!(
                "{}:{left}: {} error, rejected \"{}\" ({}).",
                self.filename, rejected.phase, token.text, self.config.help_url
            )
        };
        if let Some(explanation) = rejected.explanation.as_deref().filter(|e| !e.is_empty()) {
            out.push_str("  ");
            out.push_str(explanation);
        }
        out
    }

    pub fn token_error_messages<K: TokenKind>(
        &self,
        rejected: &[RejectedToken<'_, K>],
    ) -> Vec<String> {
        rejected
            .iter()
            .map(|r| self.token_error_message(&r.token))
            .collect()
    }

    pub fn linter_messages<K: TokenKind>(&self, rejected: &[RejectedToken<'_, K>]) -> Vec<String> {
        rejected.iter().map(|r| self.linter_message(r)).collect()
    }
}
