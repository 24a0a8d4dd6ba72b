//! # Strata Text
//!
//! Zero-copy text model shared by every phase of the analysis pipeline.
//!
//! Tokens never own their text: a [`TokenInfo`] pairs a kind tag with a
//! slice of the analysed buffer, so byte-exact provenance survives all the
//! way to diagnostics even when later phases only see a filtered
//! [`TokenStreamView`].
//!
//! ## Example
//!
//! ```
//! use strata_text::LineColumnMap;
//!
//! let map = LineColumnMap::new("a\nbc\n");
//! assert_eq!(map.resolve(3).to_string(), "2:2");
//! ```

mod line_column;
mod line_tokens;
mod stream_view;
mod token;

pub use line_column::{LineColumn, LineColumnMap};
pub use line_tokens::LineTokenIndex;
pub use stream_view::TokenStreamView;
pub use token::{TokenInfo, TokenKind, TokenSequence};
