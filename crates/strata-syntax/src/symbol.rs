//! Concrete syntax tree nodes.

use std::fmt;

use strata_text::{TokenInfo, TokenKind};

/// A concrete syntax tree: a token leaf or a tagged interior node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol<'src, K, T> {
    Leaf(TokenInfo<'src, K>),
    Node(SyntaxNode<'src, K, T>),
}

/// Interior node. Absent optional grammar elements are `None` children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode<'src, K, T> {
    pub tag: T,
    pub children: Vec<Option<Symbol<'src, K, T>>>,
}

impl<'src, K, T> Symbol<'src, K, T>
where
    K: TokenKind,
    T: Copy + Eq + fmt::Debug,
{
    pub fn leaf(token: TokenInfo<'src, K>) -> Self {
        Symbol::Leaf(token)
    }

    pub fn node(tag: T, children: Vec<Option<Self>>) -> Self {
        Symbol::Node(SyntaxNode { tag, children })
    }

    pub fn as_leaf(&self) -> Option<&TokenInfo<'src, K>> {
        match self {
            Symbol::Leaf(token) => Some(token),
            Symbol::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&SyntaxNode<'src, K, T>> {
        match self {
            Symbol::Node(node) => Some(node),
            Symbol::Leaf(_) => None,
        }
    }

    /// Whether this is a node tagged `tag`.
    pub fn is_node(&self, tag: T) -> bool {
        self.as_node().is_some_and(|node| node.tag == tag)
    }

    /// Whether this is a leaf of kind `kind`.
    pub fn is_leaf(&self, kind: K) -> bool {
        self.as_leaf().is_some_and(|token| token.kind == kind)
    }

    pub fn leftmost_leaf(&self) -> Option<&TokenInfo<'src, K>> {
        match self {
            Symbol::Leaf(token) => Some(token),
            Symbol::Node(node) => node.children().find_map(Symbol::leftmost_leaf),
        }
    }

    pub fn rightmost_leaf(&self) -> Option<&TokenInfo<'src, K>> {
        match self {
            Symbol::Leaf(token) => Some(token),
            Symbol::Node(node) => node.children().rev().find_map(Symbol::rightmost_leaf),
        }
    }

    /// The exact source text covered by this subtree.
    pub fn span_text(&self, buffer: &'src str) -> Option<&'src str> {
        let left = self.leftmost_leaf()?.left();
        let right = self.rightmost_leaf()?.right();
        buffer.get(left..right)
    }

    /// All leaves in source order.
    pub fn leaves(&self) -> Vec<&TokenInfo<'src, K>> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'t>(&'t self, out: &mut Vec<&'t TokenInfo<'src, K>>) {
        match self {
            Symbol::Leaf(token) => out.push(token),
            Symbol::Node(node) => {
                for child in node.children() {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

impl<'src, K, T> SyntaxNode<'src, K, T> {
    /// The `index`-th child, if present and non-null.
    pub fn child(&self, index: usize) -> Option<&Symbol<'src, K, T>> {
        self.children.get(index).and_then(Option::as_ref)
    }

    /// Non-null children in order.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = &Symbol<'src, K, T>> {
        self.children.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
