//! Token definitions for the Verilog-flavoured front end.

use logos::Logos;
use strata_text::TokenKind;

/// Token kinds produced by the [`VlogEngine`](crate::VlogEngine).
///
/// Variants without a pattern are only produced in a non-default lexical
/// mode (`MacroName`, `MacroDefBody`) or synthesized by the session (`Eof`,
/// `Error`).
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VlogToken {
    // ========================================================================
    // Keywords
    // ========================================================================
    #[token("module")]
    Module,
    #[token("endmodule")]
    Endmodule,
    #[token("function")]
    Function,
    #[token("endfunction")]
    Endfunction,
    #[token("task")]
    Task,
    #[token("endtask")]
    Endtask,
    #[token("class")]
    Class,
    #[token("endclass")]
    Endclass,
    #[token("package")]
    Package,
    #[token("endpackage")]
    Endpackage,

    // ========================================================================
    // Preprocessor
    // ========================================================================
    #[token("`define")]
    DefineDirective,
    /// A macro reference such as `` `FOO ``.
    #[regex(r"`[a-zA-Z_][a-zA-Z0-9_$]*")]
    MacroIdentifier,
    /// The name following `` `define ``.
    MacroName,
    /// Everything after the macro name up to the end of the line,
    /// including backslash-continued lines.
    MacroDefBody,

    // ========================================================================
    // Literals and identifiers
    // ========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_$]*")]
    Identifier,
    #[regex(r"[0-9][0-9_]*")]
    #[regex(r"[0-9]*'[sS]?[bBoOdDhH][0-9a-fA-FxXzZ_?]+")]
    Number,
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    StringLiteral,

    // ========================================================================
    // Punctuation and operators
    // ========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("=")]
    Assign,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    // ========================================================================
    // Whitespace and comments
    // ========================================================================
    #[regex(r"[ \t\r]+")]
    Whitespace,
    #[token("\n")]
    Newline,
    #[regex(r"//[^\n]*")]
    LineComment,
    /// Unterminated block comments are lexical errors.
    #[token("/*", block_comment)]
    BlockComment,

    /// End of file
    Eof,

    /// Error token
    Error,
}

impl VlogToken {
    pub fn is_keyword(self) -> bool {
        self.is_declaration_keyword() || self.is_end_keyword()
    }

    /// Keywords that open a declaration.
    pub fn is_declaration_keyword(self) -> bool {
        matches!(
            self,
            VlogToken::Module
                | VlogToken::Function
                | VlogToken::Task
                | VlogToken::Class
                | VlogToken::Package
        )
    }

    /// Keywords that close a declaration.
    pub fn is_end_keyword(self) -> bool {
        matches!(
            self,
            VlogToken::Endmodule
                | VlogToken::Endfunction
                | VlogToken::Endtask
                | VlogToken::Endclass
                | VlogToken::Endpackage
        )
    }

    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            VlogToken::Whitespace
                | VlogToken::Newline
                | VlogToken::LineComment
                | VlogToken::BlockComment
        )
    }

    /// How the token reads in parser explanations.
    pub fn describe(self) -> &'static str {
        match self {
            VlogToken::Module => "'module'",
            VlogToken::Endmodule => "'endmodule'",
            VlogToken::Function => "'function'",
            VlogToken::Endfunction => "'endfunction'",
            VlogToken::Task => "'task'",
            VlogToken::Endtask => "'endtask'",
            VlogToken::Class => "'class'",
            VlogToken::Endclass => "'endclass'",
            VlogToken::Package => "'package'",
            VlogToken::Endpackage => "'endpackage'",
            VlogToken::DefineDirective => "'`define'",
            VlogToken::MacroIdentifier => "macro identifier",
            VlogToken::MacroName => "macro name",
            VlogToken::MacroDefBody => "macro body",
            VlogToken::Identifier => "identifier",
            VlogToken::Number => "number",
            VlogToken::StringLiteral => "string literal",
            VlogToken::LParen => "'('",
            VlogToken::RParen => "')'",
            VlogToken::Comma => "','",
            VlogToken::Semicolon => "';'",
            VlogToken::Assign => "'='",
            VlogToken::Plus => "'+'",
            VlogToken::Minus => "'-'",
            VlogToken::Star => "'*'",
            VlogToken::Slash => "'/'",
            VlogToken::Whitespace => "whitespace",
            VlogToken::Newline => "newline",
            VlogToken::LineComment | VlogToken::BlockComment => "comment",
            VlogToken::Eof => "end of file",
            VlogToken::Error => "invalid token",
        }
    }
}

impl TokenKind for VlogToken {
    const EOF: Self = VlogToken::Eof;
    const ERROR: Self = VlogToken::Error;

    fn is_syntactic(self) -> bool {
        !self.is_trivia()
    }
}

fn block_comment(lex: &mut logos::Lexer<VlogToken>) -> bool {
    let remainder = lex.remainder();
    match remainder.find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(remainder.len());
            false
        }
    }
}
