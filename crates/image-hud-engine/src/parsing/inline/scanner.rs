use crate::parsing::rope::span::Span;

use super::{
    cursor::Cursor,
    kinds::{MarkdownEmbed, WikiEmbed},
    types::{RawEmbed, SyntaxKind},
};

/// Scans `s` for wiki embeds `![[...]]`.
///
/// # Arguments
/// - `base`: Byte offset in the document where `s` begins (for absolute spans)
/// - `s`: The window text
///
/// Matching is leftmost and shortest: the embed closes at the first `]]` on
/// the same line, and scanning resumes after it, so matches never overlap.
pub fn scan_wiki_embeds(base: usize, s: &str) -> Vec<RawEmbed> {
    let mut cur = Cursor::new(s, base);
    let mut out = vec![];

    while !cur.eof() {
        if let Some(embed) = try_scan_wiki_embed(&mut cur) {
            out.push(embed);
            continue;
        }
        cur.bump();
    }
    out
}

/// Scans `s` for inline markdown images `![alt](target)`.
///
/// Independent of [`scan_wiki_embeds`]: both scanners walk the same window.
/// Alt text ends at the first `](` and the target at the first `)` after it,
/// both on the opening line.
pub fn scan_markdown_embeds(base: usize, s: &str) -> Vec<RawEmbed> {
    let mut cur = Cursor::new(s, base);
    let mut out = vec![];

    while !cur.eof() {
        if let Some(embed) = try_scan_markdown_embed(&mut cur) {
            out.push(embed);
            continue;
        }
        cur.bump();
    }
    out
}

/// Attempts a wiki embed at the current position.
///
/// On failure, cursor position is restored.
fn try_scan_wiki_embed(cur: &mut Cursor<'_>) -> Option<RawEmbed> {
    if !cur.starts_with(WikiEmbed::OPEN) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(WikiEmbed::OPEN.len());
    let target_start = cur.pos();

    if !cur.seek_on_line(WikiEmbed::CLOSE) {
        *cur = saved;
        return None;
    }
    let target_end = cur.pos();
    cur.bump_n(WikiEmbed::CLOSE.len());

    Some(RawEmbed {
        kind: SyntaxKind::Wiki,
        full: Span::new(start, cur.pos()),
        target: Span::new(target_start, target_end),
        alt: None,
    })
}

/// Attempts an inline markdown image at the current position.
///
/// On failure, cursor position is restored.
fn try_scan_markdown_embed(cur: &mut Cursor<'_>) -> Option<RawEmbed> {
    if !cur.starts_with(MarkdownEmbed::OPEN) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(MarkdownEmbed::OPEN.len());
    let alt_start = cur.pos();

    if !cur.seek_on_line(MarkdownEmbed::TARGET_OPEN) {
        *cur = saved;
        return None;
    }
    let alt_end = cur.pos();
    cur.bump_n(MarkdownEmbed::TARGET_OPEN.len());
    let target_start = cur.pos();

    if !cur.seek_on_line(MarkdownEmbed::TARGET_CLOSE) {
        *cur = saved;
        return None;
    }
    let target_end = cur.pos();
    cur.bump_n(MarkdownEmbed::TARGET_CLOSE.len());

    Some(RawEmbed {
        kind: SyntaxKind::Markdown,
        full: Span::new(start, cur.pos()),
        target: Span::new(target_start, target_end),
        alt: Some(Span::new(alt_start, alt_end)),
    })
}
