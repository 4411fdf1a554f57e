/*!
 * # Editing
 *
 * The HUD never owns the note it decorates. It reads a window of the host's
 * document and issues range-replacement edits through the [`Editor`] trait.
 *
 * - **`document`**: `Document`, an xi-rope backed [`Editor`] with a version
 *   counter and the host's visible ranges
 * - **`patch`**: edit result metadata (inserted ranges, new version)
 * - **`link_span`**: recovers the full span of the reference that ends at a
 *   widget anchor, used before deleting a reference
 */

pub mod document;
pub mod link_span;
pub mod patch;

use relative_path::RelativePathBuf;

use crate::parsing::rope::{LineRef, Span};

pub use document::Document;
pub use link_span::recover;
pub use patch::Patch;

/// Host document collaborator.
///
/// Offsets are byte offsets into the UTF-8 text. Edits are applied one at a
/// time in call order.
pub trait Editor {
    /// Full document text.
    fn text(&self) -> String;

    /// Text covered by `span`, clamped to the document.
    fn slice(&self, span: Span) -> String;

    fn line_at(&self, offset: usize) -> LineRef;

    /// Replaces `span` with `text`. An empty span inserts.
    fn replace_range(&mut self, span: Span, text: &str) -> Patch;

    /// Document ranges currently on screen, in document order.
    fn visible_ranges(&self) -> Vec<Span>;

    /// Vault path of the note being edited, used as the link-resolution source.
    fn active_path(&self) -> Option<RelativePathBuf>;
}
