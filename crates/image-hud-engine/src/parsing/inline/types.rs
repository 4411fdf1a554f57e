use crate::parsing::rope::span::Span;

/// Which markup produced an embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    /// `![[target]]`
    Wiki,
    /// `![alt](target)`
    Markdown,
}

/// An unresolved embed found by the scanner, with byte spans into the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEmbed {
    pub kind: SyntaxKind,
    /// Full span including the delimiters.
    pub full: Span,
    /// Span of the text naming the file (for wiki embeds this still contains
    /// any `|alias` / `#anchor` tail).
    pub target: Span,
    /// Span of the alt text, markdown embeds only.
    pub alt: Option<Span>,
}
