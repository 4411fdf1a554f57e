use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::inline::kinds::{MarkdownEmbed, WikiEmbed};
use crate::parsing::rope::{Span, line_span_in};

static WIKI_REFERENCE: OnceLock<Regex> = OnceLock::new();
static INLINE_REFERENCE: OnceLock<Regex> = OnceLock::new();

fn wiki_reference() -> &'static Regex {
    WIKI_REFERENCE
        .get_or_init(|| Regex::new(r"^!\[\[(.*?)\]\]$").expect("Invalid wiki reference regex"))
}

fn inline_reference() -> &'static Regex {
    INLINE_REFERENCE
        .get_or_init(|| Regex::new(r"^!\[.*?\]\(.*?\)$").expect("Invalid inline reference regex"))
}

/// Recovers the span of the image reference that ends at `anchor`.
///
/// Only the text between the start of the anchor's line and the anchor is
/// considered. The last `![[` is tried first and must form a complete wiki
/// reference with no `]]` before its final close; otherwise the last `![` must
/// form a complete inline reference. Returns `None` when neither does, in
/// which case nothing may be deleted.
pub fn recover(text: &str, anchor: usize) -> Option<Span> {
    let line = line_span_in(text, anchor);
    if anchor > line.end {
        return None;
    }
    let prefix = text.get(line.start..anchor)?;

    let matched_len = last_occurrence(prefix, WikiEmbed::OPEN)
        .map(|at| &prefix[at..])
        .filter(|candidate| is_wiki_reference(candidate))
        .or_else(|| {
            last_occurrence(prefix, MarkdownEmbed::OPEN)
                .map(|at| &prefix[at..])
                .filter(|candidate| inline_reference().is_match(candidate))
        })?
        .len();

    Some(Span::new(anchor - matched_len, anchor))
}

fn is_wiki_reference(candidate: &str) -> bool {
    wiki_reference()
        .captures(candidate)
        .and_then(|caps| caps.get(1))
        .is_some_and(|inner| !inner.as_str().contains("]]"))
}

fn last_occurrence(haystack: &str, needle: &[u8]) -> Option<usize> {
    haystack
        .as_bytes()
        .windows(needle.len())
        .rposition(|window| window == needle)
}
