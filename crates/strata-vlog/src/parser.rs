//! Recursive descent parser for the Verilog-flavoured front end.
//!
//! The parser never gives up: a missing element becomes a null child, and
//! unparseable text is gathered into an [`VlogNode::Error`] node after
//! synchronizing on `;` or a declaration boundary. At most one rejection is
//! recorded per token position.

use strata_syntax::{ParseFailure, Parser, Rejection, Symbol, TokenStream};
use strata_text::TokenInfo;
use tracing::debug;

use crate::token::VlogToken;
use crate::tree::{VlogNode, VlogSymbol};

type Token<'src> = TokenInfo<'src, VlogToken>;

/// Deepest accepted nesting of declarations, parentheses and calls.
pub const MAX_NESTING: usize = 256;

/// Operator precedence levels for binary expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Term,   // + -
    Factor, // * /
}

impl Precedence {
    fn of(kind: VlogToken) -> Option<Self> {
        match kind {
            VlogToken::Plus | VlogToken::Minus => Some(Precedence::Term),
            VlogToken::Star | VlogToken::Slash => Some(Precedence::Factor),
            _ => None,
        }
    }

    fn tighter(self) -> Option<Self> {
        match self {
            Precedence::Term => Some(Precedence::Factor),
            Precedence::Factor => None,
        }
    }
}

/// Error-tolerant parser producing a [`VlogSymbol`] tree.
#[derive(Debug, Default)]
pub struct VlogParser<'src> {
    tokens: Vec<Token<'src>>,
    eof: Option<Token<'src>>,
    pos: usize,
    root: Option<VlogSymbol<'src>>,
    rejected: Vec<Rejection<'src, VlogToken>>,
    last_error_pos: Option<usize>,
    depth: usize,
}

impl<'src> VlogParser<'src> {
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self, stream: TokenStream<'_, 'src, VlogToken>) {
        self.tokens = stream.iter().copied().collect();
        let eof = match self.tokens.last() {
            Some(last) if last.is_eof() => *last,
            Some(last) => TokenInfo::new(VlogToken::Eof, last.right(), ""),
            None => TokenInfo::new(VlogToken::Eof, 0, ""),
        };
        if !self.tokens.last().is_some_and(TokenInfo::is_eof) {
            self.tokens.push(eof);
        }
        self.eof = Some(eof);
        self.pos = 0;
        self.root = None;
        self.rejected.clear();
        self.last_error_pos = None;
        self.depth = 0;
    }

    // ========================================================================
    // Token cursor
    // ========================================================================

    fn current(&self) -> Token<'src> {
        self.peek(0)
    }

    fn peek(&self, ahead: usize) -> Token<'src> {
        match self.tokens.get(self.pos + ahead) {
            Some(token) => *token,
            None => self
                .eof
                .unwrap_or_else(|| TokenInfo::new(VlogToken::Eof, 0, "")),
        }
    }

    fn check(&self, kind: VlogToken) -> bool {
        self.current().kind == kind
    }

    fn at_end(&self) -> bool {
        self.check(VlogToken::Eof)
    }

    /// Consumes the current token. EOF is never consumed.
    fn advance(&mut self) -> Token<'src> {
        let token = self.current();
        if !token.is_eof() {
            self.pos += 1;
        }
        token
    }

    fn leaf(&mut self) -> Option<VlogSymbol<'src>> {
        Some(Symbol::leaf(self.advance()))
    }

    /// Consumes a `kind` token, or records an error and yields a null child.
    fn expect(&mut self, kind: VlogToken) -> Option<VlogSymbol<'src>> {
        if self.check(kind) {
            self.leaf()
        } else {
            self.error(format!("expected {}", kind.describe()));
            None
        }
    }

    fn error(&mut self, explanation: String) {
        if self.last_error_pos == Some(self.pos) {
            return;
        }
        let token = self.current();
        debug!(offset = token.offset, text = token.text, %explanation, "rejected token");
        self.last_error_pos = Some(self.pos);
        self.rejected.push(Rejection::new(token, Some(explanation)));
    }

    /// Skips to just past the next `;` or up to the next declaration
    /// boundary. Always consumes at least one token unless at EOF.
    fn synchronize(&mut self) -> VlogSymbol<'src> {
        let mut skipped = Vec::new();
        if !self.at_end() {
            skipped.push(self.leaf());
        }
        while !self.at_end() {
            let kind = self.current().kind;
            if kind.is_keyword() || kind == VlogToken::DefineDirective {
                break;
            }
            skipped.push(self.leaf());
            if kind == VlogToken::Semicolon {
                break;
            }
        }
        Symbol::node(VlogNode::Error, skipped)
    }

    /// Runs `parse` one nesting level deeper. At the limit the current
    /// token is rejected and skipped over instead, which keeps the tree
    /// (and the recursion building it) bounded.
    fn nested(
        &mut self,
        what: &str,
        parse: impl FnOnce(&mut Self) -> VlogSymbol<'src>,
    ) -> VlogSymbol<'src> {
        if self.depth >= MAX_NESTING {
            self.error(format!("{what} nested too deeply"));
            return self.synchronize();
        }
        self.depth += 1;
        let symbol = parse(self);
        self.depth -= 1;
        symbol
    }

    // ========================================================================
    // Items
    // ========================================================================

    fn source_text(&mut self) -> VlogSymbol<'src> {
        let mut items = Vec::new();
        while !self.at_end() {
            items.push(Some(self.item()));
        }
        Symbol::node(VlogNode::SourceText, items)
    }

    fn item(&mut self) -> VlogSymbol<'src> {
        let token = self.current();
        match token.kind {
            VlogToken::Module => self.declaration(VlogNode::ModuleDecl, VlogToken::Endmodule),
            VlogToken::Function => {
                self.declaration(VlogNode::FunctionDecl, VlogToken::Endfunction)
            }
            VlogToken::Task => self.declaration(VlogNode::TaskDecl, VlogToken::Endtask),
            VlogToken::Class => self.declaration(VlogNode::ClassDecl, VlogToken::Endclass),
            VlogToken::Package => {
                self.declaration(VlogNode::PackageDecl, VlogToken::Endpackage)
            }
            VlogToken::DefineDirective => self.macro_define(),
            VlogToken::MacroIdentifier if self.peek(1).kind != VlogToken::LParen => {
                self.macro_generic_item()
            }
            VlogToken::Identifier
            | VlogToken::MacroIdentifier
            | VlogToken::Number
            | VlogToken::StringLiteral
            | VlogToken::LParen => self.statement(),
            kind if kind.is_end_keyword() => {
                self.error(format!("unexpected {}", kind.describe()));
                Symbol::node(VlogNode::Error, vec![self.leaf()])
            }
            _ => {
                self.error("expected item".to_string());
                self.synchronize()
            }
        }
    }

    /// `kw name ; item* endkw`
    fn declaration(&mut self, tag: VlogNode, end: VlogToken) -> VlogSymbol<'src> {
        self.nested("declaration", |p| {
            let mut children = vec![p.leaf(), p.expect(VlogToken::Identifier)];
            children.push(p.expect(VlogToken::Semicolon));
            while !p.at_end() && !p.current().kind.is_end_keyword() {
                children.push(Some(p.item()));
            }
            children.push(p.expect(end));
            Symbol::node(tag, children)
        })
    }

    /// `` `define NAME body? ``
    fn macro_define(&mut self) -> VlogSymbol<'src> {
        let mut children = vec![self.leaf(), self.expect(VlogToken::MacroName)];
        if self.check(VlogToken::MacroDefBody) {
            children.push(self.leaf());
        }
        Symbol::node(VlogNode::MacroDefine, children)
    }

    /// `` `NAME ;? ``
    fn macro_generic_item(&mut self) -> VlogSymbol<'src> {
        let mut children = vec![self.leaf()];
        if self.check(VlogToken::Semicolon) {
            children.push(self.leaf());
        }
        Symbol::node(VlogNode::MacroGenericItem, children)
    }

    fn statement(&mut self) -> VlogSymbol<'src> {
        let Some(lhs) = self.expression() else {
            return self.synchronize();
        };
        if self.check(VlogToken::Assign) {
            let assign = self.leaf();
            let rhs = self.expression();
            let semicolon = self.expect(VlogToken::Semicolon);
            return Symbol::node(VlogNode::Assignment, vec![Some(lhs), assign, rhs, semicolon]);
        }
        if self.check(VlogToken::Semicolon) {
            let semicolon = self.leaf();
            return Symbol::node(VlogNode::ExpressionStatement, vec![Some(lhs), semicolon]);
        }
        // A macro call may stand alone as an item, without a semicolon.
        if lhs.is_node(VlogNode::MacroCall) {
            return lhs;
        }
        let semicolon = self.expect(VlogToken::Semicolon);
        Symbol::node(VlogNode::ExpressionStatement, vec![Some(lhs), semicolon])
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// Returns `None` without consuming anything when no expression starts
    /// at the current token.
    fn expression(&mut self) -> Option<VlogSymbol<'src>> {
        self.binary(Precedence::Term)
    }

    fn binary(&mut self, min: Precedence) -> Option<VlogSymbol<'src>> {
        let mut lhs = self.primary()?;
        while let Some(precedence) = Precedence::of(self.current().kind) {
            if precedence < min {
                break;
            }
            let op = self.leaf();
            let rhs = match precedence.tighter() {
                Some(tighter) => self.binary(tighter),
                None => self.primary(),
            };
            lhs = Symbol::node(VlogNode::BinaryExpr, vec![Some(lhs), op, rhs]);
        }
        Some(lhs)
    }

    fn primary(&mut self) -> Option<VlogSymbol<'src>> {
        let token = self.current();
        match token.kind {
            VlogToken::Identifier if self.peek(1).kind == VlogToken::LParen => {
                Some(self.call(VlogNode::FunctionCall, VlogNode::Arguments))
            }
            VlogToken::MacroIdentifier if self.peek(1).kind == VlogToken::LParen => {
                Some(self.call(VlogNode::MacroCall, VlogNode::MacroCallArgs))
            }
            VlogToken::Identifier
            | VlogToken::MacroIdentifier
            | VlogToken::Number
            | VlogToken::StringLiteral => self.leaf(),
            VlogToken::LParen => Some(self.nested("expression", |p| {
                let open = p.leaf();
                let inner = p.expression();
                let close = p.expect(VlogToken::RParen);
                Symbol::node(VlogNode::ParenExpr, vec![open, inner, close])
            })),
            _ => {
                self.error("expected expression".to_string());
                None
            }
        }
    }

    /// `name ( args )`
    fn call(&mut self, tag: VlogNode, args_tag: VlogNode) -> VlogSymbol<'src> {
        self.nested("expression", |p| {
            let name = p.leaf();
            let args = p.arguments(args_tag);
            Symbol::node(tag, vec![name, Some(args)])
        })
    }

    /// `( slot (, slot)* )` where an empty slot is a null child.
    fn arguments(&mut self, tag: VlogNode) -> VlogSymbol<'src> {
        let mut children = vec![self.leaf()];
        if !self.check(VlogToken::RParen) {
            loop {
                if self.check(VlogToken::Comma) || self.check(VlogToken::RParen) {
                    children.push(None);
                } else {
                    children.push(self.expression());
                }
                if !self.check(VlogToken::Comma) {
                    break;
                }
                children.push(self.leaf());
            }
        }
        children.push(self.expect(VlogToken::RParen));
        Symbol::node(tag, children)
    }
}

impl<'src> Parser<'src> for VlogParser<'src> {
    type Kind = VlogToken;
    type Tree = VlogSymbol<'src>;

    fn parse(&mut self, stream: TokenStream<'_, 'src, VlogToken>) -> Result<(), ParseFailure> {
        self.reset(stream);
        let root = self.source_text();
        self.root = Some(root);
        debug!(
            tokens = self.tokens.len(),
            rejected = self.rejected.len(),
            "parsed"
        );
        if self.rejected.is_empty() {
            Ok(())
        } else {
            Err(ParseFailure {
                rejected: self.rejected.len(),
            })
        }
    }

    fn take_root(&mut self) -> Option<VlogSymbol<'src>> {
        self.root.take()
    }

    fn rejected_tokens(&self) -> &[Rejection<'src, VlogToken>] {
        &self.rejected
    }
}
