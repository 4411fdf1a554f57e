use relative_path::RelativePathBuf;
use xi_rope::{Delta, Rope};

use super::{Editor, Patch};
use crate::parsing::rope::{LineRef, Span, line_containing, slice_to_string};

/// In-memory note buffer implementing [`Editor`].
///
/// The whole note lives in one `xi_rope::Rope`; saving writes the rope bytes
/// back verbatim. Every edit bumps `version`.
#[derive(Clone)]
pub struct Document {
    buffer: Rope,
    version: u64,
    /// What the host currently shows; `None` means the whole document.
    visible: Option<Vec<Span>>,
    path: Option<RelativePathBuf>,
}

impl Document {
    /// Create a new document from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self {
            buffer: Rope::from(text),
            version: 0,
            visible: None,
            path: None,
        })
    }

    /// Sets the vault path the note was opened from.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<RelativePathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Get the document's content as raw bytes (exact round-trip)
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer.to_string().into_bytes()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records the host's viewport. Ranges are clamped and sorted.
    pub fn set_visible_ranges(&mut self, ranges: Vec<Span>) {
        let len = self.len();
        let mut ranges: Vec<Span> = ranges
            .into_iter()
            .map(|r| Span::new(r.start.min(len), r.end.min(len).max(r.start.min(len))))
            .collect();
        ranges.sort();
        self.visible = Some(ranges);
    }

    fn clamp(&self, span: Span) -> std::ops::Range<usize> {
        let len = self.len();
        let start = span.start.min(len);
        let end = span.end.min(len).max(start);
        start..end
    }
}

impl Editor for Document {
    fn text(&self) -> String {
        self.buffer.to_string()
    }

    fn slice(&self, span: Span) -> String {
        slice_to_string(&self.buffer, span)
    }

    fn line_at(&self, offset: usize) -> LineRef {
        line_containing(&self.buffer, offset)
    }

    fn replace_range(&mut self, span: Span, text: &str) -> Patch {
        let range = self.clamp(span);
        let start = range.start;
        let delta = Delta::simple_edit(range, Rope::from(text), self.len());
        self.buffer = delta.apply(&self.buffer);
        self.version += 1;

        // Visible ranges belong to the previous text; fall back to the whole
        // document until the host reports its viewport again
        self.visible = None;

        let changed = if text.is_empty() {
            vec![]
        } else {
            vec![Span::new(start, start + text.len())]
        };
        Patch {
            changed,
            version: self.version,
        }
    }

    fn visible_ranges(&self) -> Vec<Span> {
        match &self.visible {
            Some(ranges) => ranges.clone(),
            None => vec![Span::new(0, self.len())],
        }
    }

    fn active_path(&self) -> Option<RelativePathBuf> {
        self.path.clone()
    }
}
