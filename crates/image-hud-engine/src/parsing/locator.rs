use relative_path::RelativePath;

use crate::io::Vault;
use crate::models::{BackingFile, ImageReference};

use super::inline::{
    RawEmbed, SyntaxKind,
    kinds::{MarkdownEmbed, WikiEmbed},
    scan_markdown_embeds, scan_wiki_embeds,
};

/// Finds image references in a window of the document.
///
/// `window_offset` is the byte offset of `window_text` in the document, so the
/// returned spans are document-absolute. Each raw target is handed to
/// `resolve`; references it cannot resolve are dropped. Output is ordered by
/// span start.
pub fn locate<F>(window_text: &str, window_offset: usize, resolve: F) -> Vec<ImageReference>
where
    F: Fn(&str) -> Option<BackingFile>,
{
    let wiki = scan_wiki_embeds(window_offset, window_text);
    let markdown = scan_markdown_embeds(window_offset, window_text);

    let mut out: Vec<ImageReference> = wiki
        .iter()
        .chain(markdown.iter())
        .filter_map(|embed| to_reference(embed, window_text, window_offset, &resolve))
        .collect();
    out.sort_by_key(|r| r.span);
    out
}

fn to_reference<F>(
    embed: &RawEmbed,
    window_text: &str,
    window_offset: usize,
    resolve: &F,
) -> Option<ImageReference>
where
    F: Fn(&str) -> Option<BackingFile>,
{
    let local = |at: usize| at - window_offset;
    let target = &window_text[local(embed.target.start)..local(embed.target.end)];

    let (raw_target, suffix) = match embed.kind {
        SyntaxKind::Wiki => {
            let (raw, suffix) = WikiEmbed::split_suffix(target);
            (raw, suffix.to_string())
        }
        SyntaxKind::Markdown => {
            let alt = embed
                .alt
                .map(|alt| &window_text[local(alt.start)..local(alt.end)])
                .unwrap_or_default();
            (target, MarkdownEmbed::alt_suffix(alt))
        }
    };

    let Some(file) = resolve(raw_target) else {
        log::trace!("dropping unresolved embed {raw_target:?}");
        return None;
    };

    Some(ImageReference {
        span: embed.full,
        syntax: embed.kind,
        raw_target: raw_target.to_string(),
        suffix,
        file,
    })
}

/// Resolves a raw target to an image file through the vault.
///
/// Any `|...` or `#...` tail is stripped first. Files whose extension is not a
/// recognised image type are treated as unresolved.
pub fn resolve_image(
    vault: &dyn Vault,
    raw_target: &str,
    source_path: &RelativePath,
) -> Option<BackingFile> {
    let (link, _) = WikiEmbed::split_suffix(raw_target);
    vault
        .resolve_link(link, source_path)
        .filter(BackingFile::is_image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::FsVault;
    use crate::parsing::rope::Span;
    use crate::tests::{create_test_file, create_test_notes_dir};

    fn resolve_any_image(raw: &str) -> Option<BackingFile> {
        let file = BackingFile::new(raw, 10);
        file.is_image().then_some(file)
    }

    #[test]
    fn finds_both_syntaxes_in_order() {
        let text = "![a](x.png) and ![[y.jpg|200]]";
        let refs = locate(text, 0, resolve_any_image);

        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].span, Span::new(0, 11));
        assert_eq!(refs[0].syntax, SyntaxKind::Markdown);
        assert_eq!(refs[0].raw_target, "x.png");
        assert_eq!(refs[0].suffix, "|a");
        assert_eq!(refs[1].span, Span::new(16, 30));
        assert_eq!(refs[1].syntax, SyntaxKind::Wiki);
        assert_eq!(refs[1].raw_target, "y.jpg");
        assert_eq!(refs[1].suffix, "|200");
    }

    #[test]
    fn spans_are_offset_by_window_start() {
        let refs = locate("see ![[a.png]]", 100, resolve_any_image);
        assert_eq!(refs[0].span, Span::new(104, 114));
        assert_eq!(refs[0].hud_id().as_str(), "hud-104-114");
    }

    #[test]
    fn wiki_suffix_splits_at_earliest_delimiter() {
        let refs = locate("![[a.png#x|200]]", 0, resolve_any_image);
        assert_eq!(refs[0].raw_target, "a.png");
        assert_eq!(refs[0].suffix, "#x|200");
    }

    #[test]
    fn empty_alt_has_no_suffix() {
        let refs = locate("![](a.png)", 0, resolve_any_image);
        assert_eq!(refs[0].suffix, "");
    }

    #[test]
    fn unresolved_targets_are_dropped() {
        let refs = locate("![[notes.md]] ![[a.png]] ![](doc.pdf)", 0, resolve_any_image);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].raw_target, "a.png");
    }

    #[test]
    fn identity_changes_when_text_shifts() {
        let before = locate("![[a.png]]", 0, resolve_any_image);
        let same = locate("![[a.png]]", 0, resolve_any_image);
        let shifted = locate("x![[a.png]]", 0, resolve_any_image);
        assert_eq!(before[0].hud_id(), same[0].hud_id());
        assert_ne!(before[0].hud_id(), shifted[0].hud_id());
    }

    #[test]
    fn resolve_image_strips_tail_and_filters_extensions() {
        let notes_dir = create_test_notes_dir();
        create_test_file(&notes_dir, "assets/a.png", "x");
        create_test_file(&notes_dir, "assets/notes.md", "x");
        let vault = FsVault::open(notes_dir.path()).unwrap();
        let source = RelativePath::new("index.md");

        let file = resolve_image(&vault, "assets/a.png|300", source).unwrap();
        assert_eq!(file.path().as_str(), "assets/a.png");
        assert!(resolve_image(&vault, "assets/a.png#frag", source).is_some());
        assert!(resolve_image(&vault, "assets/notes.md", source).is_none());
        assert!(resolve_image(&vault, "assets/missing.png", source).is_none());
    }
}
