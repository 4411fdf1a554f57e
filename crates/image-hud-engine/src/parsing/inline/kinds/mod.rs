//! # Embed Kinds
//!
//! Embed-specific types that own their syntax delimiters. The scanner and the
//! link-span recovery call these constants; neither hardcodes `![[` or `](`.
//!
//! - **`WikiEmbed`**: `![[target]]`, `![[target|alias]]`, `![[target#anchor]]`
//! - **`MarkdownEmbed`**: `![alt](target)`

pub mod markdown_embed;
pub mod wiki_embed;

pub use markdown_embed::MarkdownEmbed;
pub use wiki_embed::WikiEmbed;
