use crate::parsing::rope::Span;

/// Result of applying an edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Byte ranges of inserted text in the new document
    pub changed: Vec<Span>,
    pub version: u64,
}
