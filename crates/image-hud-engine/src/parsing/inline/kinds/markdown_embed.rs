/// Inline markdown image `![alt](target)`.
pub struct MarkdownEmbed;

impl MarkdownEmbed {
    pub const OPEN: &'static [u8; 2] = b"![";
    /// Closes the alt text and opens the target: `](`.
    pub const TARGET_OPEN: &'static [u8; 2] = b"](";
    pub const TARGET_CLOSE: &'static [u8; 1] = b")";
    /// Prefix used when alt text is carried over as a wiki suffix.
    pub const ALT_PREFIX: char = '|';

    /// Converts alt text into the suffix reattached on rewrite (`|alt`).
    pub fn alt_suffix(alt: &str) -> String {
        if alt.is_empty() {
            String::new()
        } else {
            format!("{}{alt}", Self::ALT_PREFIX)
        }
    }
}
