//! Concrete syntax tree tags.

use strata_syntax::{Symbol, SymbolMatch};

use crate::token::VlogToken;

/// Interior node tags of the concrete syntax tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VlogNode {
    SourceText,
    ModuleDecl,
    FunctionDecl,
    TaskDecl,
    ClassDecl,
    PackageDecl,
    /// `lhs = rhs ;`
    Assignment,
    /// `expr ;`
    ExpressionStatement,
    /// `` `NAME ( args ) ``
    MacroCall,
    /// Parenthesized macro arguments; empty slots are null children.
    MacroCallArgs,
    /// A macro reference standing alone as an item, e.g. `` `FOO ``.
    MacroGenericItem,
    /// `` `define NAME body ``
    MacroDefine,
    FunctionCall,
    Arguments,
    BinaryExpr,
    ParenExpr,
    /// Tokens skipped during error recovery.
    Error,
}

pub type VlogSymbol<'src> = Symbol<'src, VlogToken, VlogNode>;

pub type VlogMatch<'t, 'src> = SymbolMatch<'t, 'src, VlogToken, VlogNode>;
