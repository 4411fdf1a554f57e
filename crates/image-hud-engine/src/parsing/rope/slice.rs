use xi_rope::Rope;

use super::span::Span;

/// Extracts the text for a span from the rope as an owned String.
///
/// Out-of-range spans are clamped to the rope so stale widget spans never
/// panic inside xi-rope.
pub fn slice_to_string(rope: &Rope, sp: Span) -> String {
    let len = rope.len();
    let start = sp.start.min(len);
    let end = sp.end.min(len).max(start);
    rope.slice_to_cow(start..end).into_owned()
}
