//! Queries over macro-related syntax.

use strata_syntax::find_all;
use strata_text::TokenInfo;

use crate::token::VlogToken;
use crate::tree::{VlogMatch, VlogNode, VlogSymbol};

/// Every macro call in `root`, including calls nested in arguments.
pub fn find_all_macro_calls<'t, 'src>(root: &'t VlogSymbol<'src>) -> Vec<VlogMatch<'t, 'src>> {
    find_all(root, |symbol| symbol.is_node(VlogNode::MacroCall))
}

/// Every macro reference that stands alone as an item.
pub fn find_all_macro_generic_items<'t, 'src>(
    root: &'t VlogSymbol<'src>,
) -> Vec<VlogMatch<'t, 'src>> {
    find_all(root, |symbol| symbol.is_node(VlogNode::MacroGenericItem))
}

/// The `` `NAME `` token of a macro call.
pub fn macro_call_id<'t, 'src>(
    call: &'t VlogSymbol<'src>,
) -> Option<&'t TokenInfo<'src, VlogToken>> {
    call.as_node()
        .filter(|node| node.tag == VlogNode::MacroCall)?
        .child(0)?
        .as_leaf()
}

/// The parenthesized argument list of a macro call.
pub fn macro_call_args<'t, 'src>(call: &'t VlogSymbol<'src>) -> Option<&'t VlogSymbol<'src>> {
    call.as_node()
        .filter(|node| node.tag == VlogNode::MacroCall)?
        .child(1)
        .filter(|args| args.is_node(VlogNode::MacroCallArgs))
}

/// Whether an argument list holds nothing but its parentheses and
/// separators.
pub fn macro_call_args_is_empty(args: &VlogSymbol<'_>) -> bool {
    args.as_node().map_or(true, |node| {
        node.children().all(|child| {
            child.is_leaf(VlogToken::LParen)
                || child.is_leaf(VlogToken::RParen)
                || child.is_leaf(VlogToken::Comma)
        })
    })
}

/// The `` `NAME `` token of a macro generic item.
pub fn macro_generic_item_id<'t, 'src>(
    item: &'t VlogSymbol<'src>,
) -> Option<&'t TokenInfo<'src, VlogToken>> {
    item.as_node()
        .filter(|node| node.tag == VlogNode::MacroGenericItem)?
        .child(0)?
        .as_leaf()
}
