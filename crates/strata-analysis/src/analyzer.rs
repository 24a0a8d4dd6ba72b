//! Per-file analysis orchestration.

use std::ops::Range;

use strata_lexer::Lexer;
use strata_syntax::{Parser, TokenStream};
use strata_text::{
    LineColumnMap, LineTokenIndex, TokenInfo, TokenKind, TokenSequence, TokenStreamView,
};
use tracing::debug;

use crate::config::DiagnosticConfig;
use crate::diagnostics::DiagnosticFormatter;
use crate::error::AnalysisError;
use crate::phase::{AnalysisPhase, RejectedToken};

/// Lexes and parses one source buffer, keeping every artifact.
///
/// The analyzer borrows the buffer for `'src`; every token it holds is a
/// slice of that buffer. `T` is the parser's tree type.
///
/// Not meant to be shared across threads: run [`FileAnalyzer::tokenize`]
/// then [`FileAnalyzer::parse`] from one caller. Analyse independent files
/// in parallel with one analyzer each.
pub struct FileAnalyzer<'src, K, T> {
    contents: &'src str,
    filename: String,
    config: DiagnosticConfig,
    line_column_map: LineColumnMap,
    tokens: TokenSequence<'src, K>,
    token_stream_view: TokenStreamView,
    line_tokens: LineTokenIndex,
    syntax_tree: Option<T>,
    /// Chronological across phases and calls; only cleared on request.
    rejected_tokens: Vec<RejectedToken<'src, K>>,
}

impl<'src, K: TokenKind, T> FileAnalyzer<'src, K, T> {
    pub fn new(contents: &'src str, filename: impl Into<String>) -> Self {
        Self::with_config(contents, filename, DiagnosticConfig::default())
    }

    pub fn with_config(
        contents: &'src str,
        filename: impl Into<String>,
        config: DiagnosticConfig,
    ) -> Self {
        Self {
            contents,
            filename: filename.into(),
            config,
            line_column_map: LineColumnMap::new(contents),
            tokens: Vec::new(),
            token_stream_view: TokenStreamView::default(),
            line_tokens: LineTokenIndex::default(),
            syntax_tree: None,
            rejected_tokens: Vec::new(),
        }
    }

    /// Grabs tokens until EOF and builds the filtered stream view.
    ///
    /// Stops at the first error token: it is recorded as a lexical
    /// [`RejectedToken`] and no further tokens are requested.
    pub fn tokenize<L>(&mut self, lexer: &mut L) -> Result<(), AnalysisError>
    where
        L: Lexer<'src, Kind = K> + ?Sized,
    {
        self.tokens.clear();
        self.token_stream_view.clear();
        self.line_tokens.clear();

        lexer.restart(self.contents);
        loop {
            let token = lexer.next_token();
            self.tokens.push(token);
            if lexer.is_error_token(&token) {
                debug!(file = %self.filename, %token, "lexical error");
                self.rejected_tokens
                    .push(RejectedToken::new(token, AnalysisPhase::Lex, None));
                return Err(AnalysisError::Lexical);
            }
            if token.is_eof() {
                break;
            }
        }

        // The scanner's EOF span may overlap the previous token; force it
        // empty at the very end of the buffer.
        if let Some(last) = self.tokens.last_mut() {
            *last = TokenInfo::eof(self.contents);
        }

        self.line_tokens = LineTokenIndex::build(&self.line_column_map, &self.tokens);
        self.token_stream_view = TokenStreamView::syntactic(&self.tokens);
        debug!(
            file = %self.filename,
            tokens = self.tokens.len(),
            significant = self.token_stream_view.len(),
            "tokenized"
        );
        Ok(())
    }

    /// Runs `parser` over the stream view built by [`FileAnalyzer::tokenize`].
    ///
    /// The tree is taken even when parsing failed, since a partial tree is
    /// still useful. A successful parse without a tree is a parser defect
    /// and panics.
    pub fn parse<P>(&mut self, parser: &mut P) -> Result<(), AnalysisError>
    where
        P: Parser<'src, Kind = K, Tree = T> + ?Sized,
    {
        let stream = TokenStream::new(&self.tokens, &self.token_stream_view);
        let status = parser.parse(stream);
        self.syntax_tree = parser.take_root();

        match status {
            Ok(()) => {
                assert!(
                    self.syntax_tree.is_some(),
                    "Expected syntax tree from parsing \"{}\", but got none.",
                    self.filename
                );
                Ok(())
            }
            Err(failure) => {
                debug!(file = %self.filename, %failure, "parse failed");
                for rejection in parser.rejected_tokens() {
                    self.rejected_tokens.push(RejectedToken::new(
                        rejection.token,
                        AnalysisPhase::Parse,
                        rejection.explanation.clone(),
                    ));
                }
                Err(AnalysisError::Syntax)
            }
        }
    }

    pub fn contents(&self) -> &'src str {
        self.contents
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn config(&self) -> &DiagnosticConfig {
        &self.config
    }

    /// The full token sequence, including whitespace and comments.
    pub fn tokens(&self) -> &[TokenInfo<'src, K>] {
        &self.tokens
    }

    pub fn token_stream_view(&self) -> &TokenStreamView {
        &self.token_stream_view
    }

    /// Tokens visible to the parser, in order.
    pub fn view_tokens(&self) -> impl Iterator<Item = &TokenInfo<'src, K>> + '_ {
        self.token_stream_view.iter(&self.tokens)
    }

    pub fn line_column_map(&self) -> &LineColumnMap {
        &self.line_column_map
    }

    pub fn line_tokens(&self) -> &LineTokenIndex {
        &self.line_tokens
    }

    /// Tokens starting on the 0-based `line`.
    pub fn tokens_on_line(&self, line: usize) -> &[TokenInfo<'src, K>] {
        self.line_tokens
            .line_range(line)
            .and_then(|Range { start, end }| self.tokens.get(start..end))
            .unwrap_or(&[])
    }

    pub fn syntax_tree(&self) -> Option<&T> {
        self.syntax_tree.as_ref()
    }

    pub fn take_syntax_tree(&mut self) -> Option<T> {
        self.syntax_tree.take()
    }

    pub fn rejected_tokens(&self) -> &[RejectedToken<'src, K>] {
        &self.rejected_tokens
    }

    pub fn clear_rejected_tokens(&mut self) {
        self.rejected_tokens.clear();
    }

    pub fn formatter(&self) -> DiagnosticFormatter<'_> {
        DiagnosticFormatter::new(
            self.contents,
            &self.filename,
            &self.line_column_map,
            &self.config,
        )
    }

    /// Plain messages for every rejected token, in order.
    pub fn token_error_messages(&self) -> Vec<String> {
        self.formatter().token_error_messages(&self.rejected_tokens)
    }

    /// Tool-integration messages for every rejected token, in order.
    pub fn linter_token_error_messages(&self) -> Vec<String> {
        self.formatter().linter_messages(&self.rejected_tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_syntax::{ParseFailure, Rejection};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Tk {
        Eof,
        Error,
        Word,
        Space,
        Newline,
    }

    impl TokenKind for Tk {
        const EOF: Self = Tk::Eof;
        const ERROR: Self = Tk::Error;

        fn is_syntactic(self) -> bool {
            matches!(self, Tk::Word)
        }
    }

    /// Replays a fixed list of lexemes. At the end it reports EOF without
    /// moving its span, the way a scanner often leaves it.
    struct ScriptedLexer<'src> {
        script: Vec<(Tk, usize)>,
        next: usize,
        calls: usize,
        text: &'src str,
        last: TokenInfo<'src, Tk>,
    }

    impl<'src> ScriptedLexer<'src> {
        fn new(script: Vec<(Tk, usize)>) -> Self {
            Self {
                script,
                next: 0,
                calls: 0,
                text: "",
                last: TokenInfo::empty_at(Tk::Eof, "", 0),
            }
        }
    }

    impl<'src> Lexer<'src> for ScriptedLexer<'src> {
        type Kind = Tk;

        fn restart(&mut self, text: &'src str) {
            self.text = text;
            self.next = 0;
            self.last = TokenInfo::empty_at(Tk::Eof, text, 0);
        }

        fn next_token(&mut self) -> TokenInfo<'src, Tk> {
            self.calls += 1;
            match self.script.get(self.next) {
                Some(&(kind, len)) => {
                    self.next += 1;
                    self.last.kind = kind;
                    self.last.advance_text(self.text, len);
                }
                None => self.last.kind = Tk::Eof,
            }
            self.last
        }

        fn last_token(&self) -> TokenInfo<'src, Tk> {
            self.last
        }

        fn is_error_token(&self, token: &TokenInfo<'src, Tk>) -> bool {
            token.kind == Tk::Error
        }
    }

    /// Collects the visible token texts as its "tree" and rejects the
    /// tokens at the scripted view positions.
    struct ScriptedParser<'src> {
        reject_at: Vec<(usize, Option<&'static str>)>,
        build_tree: bool,
        root: Option<Vec<&'src str>>,
        rejected: Vec<Rejection<'src, Tk>>,
    }

    impl<'src> ScriptedParser<'src> {
        fn new(reject_at: Vec<(usize, Option<&'static str>)>, build_tree: bool) -> Self {
            Self {
                reject_at,
                build_tree,
                root: None,
                rejected: Vec::new(),
            }
        }
    }

    impl<'src> Parser<'src> for ScriptedParser<'src> {
        type Kind = Tk;
        type Tree = Vec<&'src str>;

        fn parse(&mut self, stream: TokenStream<'_, 'src, Tk>) -> Result<(), ParseFailure> {
            self.root = self
                .build_tree
                .then(|| stream.iter().map(|token| token.text).collect());
            self.rejected = self
                .reject_at
                .iter()
                .filter_map(|&(position, why)| {
                    stream
                        .get(position)
                        .map(|token| Rejection::new(*token, why.map(str::to_string)))
                })
                .collect();
            if self.rejected.is_empty() {
                Ok(())
            } else {
                Err(ParseFailure {
                    rejected: self.rejected.len(),
                })
            }
        }

        fn take_root(&mut self) -> Option<Self::Tree> {
            self.root.take()
        }

        fn rejected_tokens(&self) -> &[Rejection<'src, Tk>] {
            &self.rejected
        }
    }

    fn words_script() -> Vec<(Tk, usize)> {
        // "ab cd\nef"
        vec![
            (Tk::Word, 2),
            (Tk::Space, 1),
            (Tk::Word, 2),
            (Tk::Newline, 1),
            (Tk::Word, 2),
        ]
    }

    #[test]
    fn test_tokenize_canonicalizes_eof() {
        let text = "ab cd\nef";
        let mut analyzer = FileAnalyzer::<Tk, Vec<&str>>::new(text, "words.txt");
        let mut lexer = ScriptedLexer::new(words_script());

        assert_eq!(analyzer.tokenize(&mut lexer), Ok(()));
        assert_eq!(lexer.last_token().text, "ef");
        let eof = analyzer.tokens().last().copied().expect("eof");
        assert!(eof.is_eof());
        assert!(eof.is_empty());
        assert_eq!(eof.offset, text.len());
    }

    #[test]
    fn test_token_spans_match_buffer() {
        let text = "ab cd\nef";
        let mut analyzer = FileAnalyzer::<Tk, Vec<&str>>::new(text, "words.txt");
        analyzer
            .tokenize(&mut ScriptedLexer::new(words_script()))
            .expect("tokenize");
        for token in analyzer.tokens() {
            assert_eq!(token.text, &text[token.range()]);
        }
        let joined: String = analyzer.tokens().iter().map(|t| t.text).collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn test_view_and_line_index() {
        let text = "ab cd\nef";
        let mut analyzer = FileAnalyzer::<Tk, Vec<&str>>::new(text, "words.txt");
        analyzer
            .tokenize(&mut ScriptedLexer::new(words_script()))
            .expect("tokenize");

        let visible: Vec<_> = analyzer.view_tokens().map(|t| t.text).collect();
        assert_eq!(visible, vec!["ab", "cd", "ef", ""]);
        assert_eq!(analyzer.token_stream_view().indices(), &[0, 2, 4, 5]);

        let line_two: Vec<_> = analyzer.tokens_on_line(1).iter().map(|t| t.text).collect();
        assert_eq!(line_two, vec!["ef", ""]);
        assert_eq!(analyzer.tokens_on_line(0).len(), 4);
        assert!(analyzer.tokens_on_line(7).is_empty());
    }

    #[test]
    fn test_tokenize_stops_on_first_error() {
        let text = "ab ? cd !";
        let script = vec![
            (Tk::Word, 2),
            (Tk::Space, 1),
            (Tk::Error, 1),
            (Tk::Space, 1),
            (Tk::Word, 2),
            (Tk::Space, 1),
            (Tk::Error, 1),
        ];
        let mut analyzer = FileAnalyzer::<Tk, Vec<&str>>::new(text, "bad.txt");
        let mut lexer = ScriptedLexer::new(script);

        assert_eq!(analyzer.tokenize(&mut lexer), Err(AnalysisError::Lexical));
        assert_eq!(lexer.calls, 3);
        assert_eq!(analyzer.tokens().len(), 3);
        assert_eq!(analyzer.rejected_tokens().len(), 1);

        let rejected = &analyzer.rejected_tokens()[0];
        assert_eq!(rejected.phase, AnalysisPhase::Lex);
        assert_eq!(rejected.token.text, "?");
        assert_eq!(rejected.explanation, None);
        assert_eq!(
            analyzer.linter_token_error_messages(),
            vec![format!(
                "bad.txt:1:4: lexical error, rejected \"?\" ({}).",
                crate::DEFAULT_HELP_URL
            )]
        );
    }

    #[test]
    fn test_retokenize_rebuilds_tokens_but_keeps_rejections() {
        let text = "ab ?";
        let script = vec![(Tk::Word, 2), (Tk::Space, 1), (Tk::Error, 1)];
        let mut analyzer = FileAnalyzer::<Tk, Vec<&str>>::new(text, "bad.txt");
        let mut lexer = ScriptedLexer::new(script);

        assert!(analyzer.tokenize(&mut lexer).is_err());
        assert!(analyzer.tokenize(&mut lexer).is_err());
        assert_eq!(analyzer.tokens().len(), 3);
        assert_eq!(analyzer.rejected_tokens().len(), 2);

        analyzer.clear_rejected_tokens();
        assert!(analyzer.rejected_tokens().is_empty());
    }

    #[test]
    fn test_parse_success_takes_tree() {
        let text = "ab cd\nef";
        let mut analyzer = FileAnalyzer::new(text, "words.txt");
        analyzer
            .tokenize(&mut ScriptedLexer::new(words_script()))
            .expect("tokenize");
        let mut parser = ScriptedParser::new(vec![], true);

        assert_eq!(analyzer.parse(&mut parser), Ok(()));
        assert_eq!(analyzer.syntax_tree(), Some(&vec!["ab", "cd", "ef", ""]));
        assert!(parser.take_root().is_none());
        assert!(analyzer.rejected_tokens().is_empty());
    }

    #[test]
    fn test_parse_failure_keeps_partial_tree_and_rejections() {
        let text = "ab cd\nef";
        let mut analyzer = FileAnalyzer::new(text, "words.txt");
        analyzer
            .tokenize(&mut ScriptedLexer::new(words_script()))
            .expect("tokenize");
        let mut parser = ScriptedParser::new(vec![(1, Some("expected ';'")), (3, None)], true);

        assert_eq!(analyzer.parse(&mut parser), Err(AnalysisError::Syntax));
        assert!(analyzer.syntax_tree().is_some());

        let rejected = analyzer.rejected_tokens();
        assert_eq!(rejected.len(), 2);
        assert!(rejected.iter().all(|r| r.phase == AnalysisPhase::Parse));
        assert_eq!(rejected[0].token.text, "cd");
        assert_eq!(rejected[0].explanation.as_deref(), Some("expected ';'"));
        assert!(rejected[1].token.is_eof());

        assert_eq!(
            analyzer.token_error_messages(),
            vec![
                "token: \"cd\" at 1:4".to_string(),
                "token: <<EOF>> at 2:3".to_string(),
            ]
        );
    }

    #[test]
    #[should_panic(expected = "Expected syntax tree from parsing \"words.txt\"")]
    fn test_parse_success_without_tree_is_fatal() {
        let text = "ab cd\nef";
        let mut analyzer = FileAnalyzer::new(text, "words.txt");
        analyzer
            .tokenize(&mut ScriptedLexer::new(words_script()))
            .expect("tokenize");
        let mut parser = ScriptedParser::new(vec![], false);
        let _ = analyzer.parse(&mut parser);
    }
}
