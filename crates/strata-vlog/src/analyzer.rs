//! One-call analysis of a Verilog-flavoured source buffer.

use strata_analysis::{AnalysisError, DiagnosticConfig, FileAnalyzer, RejectedToken};
use strata_lexer::{LexerConfig, ScanSession};
use strata_text::TokenInfo;

use crate::engine::{VlogEngine, VlogLexer};
use crate::parser::VlogParser;
use crate::token::VlogToken;
use crate::tree::VlogSymbol;

/// Owns the lexer and parser for one buffer and runs both phases over a
/// [`FileAnalyzer`].
pub struct VlogAnalyzer<'src> {
    data: FileAnalyzer<'src, VlogToken, VlogSymbol<'src>>,
    lexer: VlogLexer<'src>,
    parser: VlogParser<'src>,
}

impl<'src> VlogAnalyzer<'src> {
    pub fn new(contents: &'src str, filename: impl Into<String>) -> Self {
        Self::with_config(
            contents,
            filename,
            LexerConfig::default(),
            DiagnosticConfig::default(),
        )
    }

    pub fn with_config(
        contents: &'src str,
        filename: impl Into<String>,
        lexer_config: LexerConfig,
        diagnostic_config: DiagnosticConfig,
    ) -> Self {
        Self {
            data: FileAnalyzer::with_config(contents, filename, diagnostic_config),
            lexer: ScanSession::with_config(VlogEngine::new(), lexer_config),
            parser: VlogParser::new(),
        }
    }

    /// Lexes the buffer without parsing it.
    pub fn tokenize(&mut self) -> Result<(), AnalysisError> {
        self.data.tokenize(&mut self.lexer)
    }

    /// Lexes then parses the buffer. Parsing is skipped after a lexical
    /// error.
    pub fn analyze(&mut self) -> Result<(), AnalysisError> {
        self.data.tokenize(&mut self.lexer)?;
        self.data.parse(&mut self.parser)
    }

    /// The analysis artifacts.
    pub fn data(&self) -> &FileAnalyzer<'src, VlogToken, VlogSymbol<'src>> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut FileAnalyzer<'src, VlogToken, VlogSymbol<'src>> {
        &mut self.data
    }

    pub fn syntax_tree(&self) -> Option<&VlogSymbol<'src>> {
        self.data.syntax_tree()
    }

    pub fn tokens(&self) -> &[TokenInfo<'src, VlogToken>] {
        self.data.tokens()
    }

    pub fn rejected_tokens(&self) -> &[RejectedToken<'src, VlogToken>] {
        self.data.rejected_tokens()
    }

    pub fn lexer(&self) -> &VlogLexer<'src> {
        &self.lexer
    }
}
