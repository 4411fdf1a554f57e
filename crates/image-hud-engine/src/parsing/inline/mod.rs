//! # Inline Embed Scanning
//!
//! Cursor-based scanning for the two image embed syntaxes.
//!
//! ## Modules
//!
//! - **`types`**: `RawEmbed` and `SyntaxKind`
//! - **`kinds`**: embed types with owned delimiters (`WikiEmbed`, `MarkdownEmbed`)
//! - **`cursor`**: `Cursor` for byte-by-byte scanning with position tracking
//! - **`scanner`**: `scan_wiki_embeds()` / `scan_markdown_embeds()`
//!
//! The two scanners are independent passes over the same window: a substring
//! can only start one syntax (`![[` vs `![...](`), so nothing is counted twice.

pub mod cursor;
pub mod kinds;
pub mod scanner;
pub mod types;

pub use scanner::{scan_markdown_embeds, scan_wiki_embeds};
pub use types::{RawEmbed, SyntaxKind};
