use std::fmt;

use super::BackingFile;
use crate::parsing::{inline::SyntaxKind, rope::Span};

/// Identity of a reference between rescans, derived solely from its span.
///
/// Two references are "the same" iff their spans are identical; any edit that
/// shifts offsets yields a new identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HudId(String);

impl HudId {
    pub fn for_span(span: Span) -> Self {
        Self(format!("hud-{}-{}", span.start, span.end))
    }

    /// Wraps an identity read back from an element attribute.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HudId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An image reference located in the visible window. Recomputed every scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// Full span of the markup in the document.
    pub span: Span,
    pub syntax: SyntaxKind,
    /// Text naming the file, before resolution.
    pub raw_target: String,
    /// `|size`, `#anchor` or `|alt` tail, reattached verbatim on rewrite.
    pub suffix: String,
    pub file: BackingFile,
}

impl ImageReference {
    pub fn hud_id(&self) -> HudId {
        HudId::for_span(self.span)
    }
}
