use xi_rope::Rope;

use super::span::Span;

/// A reference to a single line with its byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRef {
    /// Byte span of the line content, excluding the line terminator.
    pub span: Span,
    /// The line text without its terminator.
    pub text: String,
}

/// Returns the line of `rope` that contains `offset`.
///
/// Offsets past the end of the rope are clamped to the last line. The
/// returned span never includes the `\n` (or `\r\n`) terminator.
pub fn line_containing(rope: &Rope, offset: usize) -> LineRef {
    let offset = offset.min(rope.len());
    let line = rope.line_of_offset(offset);
    let start = rope.offset_of_line(line);
    let next = rope.offset_of_line(line + 1).max(start);

    let raw = rope.slice_to_cow(start..next);
    let text = strip_terminator(&raw).to_string();
    LineRef {
        span: Span::new(start, start + text.len()),
        text,
    }
}

/// Returns the span of the line of `text` that contains `offset`.
///
/// String counterpart of [`line_containing`] for callers that only hold the
/// document text.
pub fn line_span_in(text: &str, offset: usize) -> Span {
    let offset = offset.min(text.len());
    let bytes = text.as_bytes();
    let start = bytes[..offset]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    let end = bytes[offset..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(text.len(), |i| offset + i);
    let line = &text[start..end];
    Span::new(start, start + strip_terminator(line).len())
}

fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_middle_line() {
        let rope = Rope::from("first\nsecond line\nthird");
        let line = line_containing(&rope, 9);
        assert_eq!(line.text, "second line");
        assert_eq!(line.span, Span::new(6, 17));
    }

    #[test]
    fn offset_at_end_of_line_belongs_to_that_line() {
        let rope = Rope::from("abc\ndef");
        let line = line_containing(&rope, 3);
        assert_eq!(line.text, "abc");
        assert_eq!(line.span, Span::new(0, 3));
    }

    #[test]
    fn windows_line_endings_are_stripped() {
        let rope = Rope::from("one\r\ntwo\r\n");
        let line = line_containing(&rope, 0);
        assert_eq!(line.text, "one");
        assert_eq!(line_span_in("one\r\ntwo\r\n", 6), Span::new(5, 8));
    }

    #[test]
    fn offset_past_end_is_clamped() {
        let rope = Rope::from("only");
        assert_eq!(line_containing(&rope, 99).span, Span::new(0, 4));
        assert_eq!(line_span_in("only", 99), Span::new(0, 4));
    }

    #[test]
    fn string_and_rope_lookups_agree() {
        let text = "a\n![[x.png]] b\n\nlast";
        let rope = Rope::from(text);
        for offset in 0..=text.len() {
            assert_eq!(
                line_containing(&rope, offset).span,
                line_span_in(text, offset),
                "offset {offset}"
            );
        }
    }
}
