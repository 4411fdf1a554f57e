use std::rc::Rc;

use relative_path::RelativePathBuf;

use crate::editing::Editor;
use crate::models::HudId;
use crate::parsing::{locate, resolve_image, rope::Span};

use super::context::HudContext;
use super::hover::ElementMarker;
use super::widget::HudWidget;

/// One decoration handed to the host view.
#[derive(Debug, Clone)]
pub enum Decoration {
    /// Inline mark over a reference, tagged with the file path and identity.
    Mark {
        span: Span,
        path: RelativePathBuf,
        hud_id: HudId,
    },
    /// Zero-width widget rendered after the reference.
    Widget { at: usize, widget: Rc<HudWidget> },
}

impl Decoration {
    /// Position and side; marks sort before a widget at the same offset.
    fn sort_key(&self) -> (usize, u8) {
        match self {
            Self::Mark { span, .. } => (span.start, 0),
            Self::Widget { at, .. } => (*at, 1),
        }
    }

    pub fn hud_id(&self) -> &HudId {
        match self {
            Self::Mark { hud_id, .. } => hud_id,
            Self::Widget { widget, .. } => widget.hud_id(),
        }
    }
}

/// Decorations for the visible window, ordered by document position.
#[derive(Debug, Clone, Default)]
pub struct DecorationSet {
    items: Vec<Decoration>,
}

impl DecorationSet {
    pub fn iter(&self) -> impl Iterator<Item = &Decoration> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn widgets(&self) -> impl Iterator<Item = &Rc<HudWidget>> {
        self.items.iter().filter_map(|d| match d {
            Decoration::Widget { widget, .. } => Some(widget),
            Decoration::Mark { .. } => None,
        })
    }

    pub fn widget(&self, hud_id: &HudId) -> Option<&Rc<HudWidget>> {
        self.widgets().find(|w| w.hud_id() == hud_id)
    }
}

/// Locates references in every visible range and decorates each one.
///
/// Widgets are always new instances; nothing is reused from earlier builds.
pub fn build_decorations(editor: &dyn Editor, ctx: &HudContext) -> DecorationSet {
    let source = editor
        .active_path()
        .unwrap_or_else(|| RelativePathBuf::from(""));
    let mut items = Vec::new();

    let ranges = editor.visible_ranges();
    for &range in &ranges {
        if range.is_empty() {
            continue;
        }
        let window = editor.slice(range);
        let references = locate(&window, range.start, |raw| {
            resolve_image(&*ctx.vault, raw, &source)
        });

        for reference in references {
            let widget = Rc::new(HudWidget::new(&reference, ctx.clone()));
            items.push(Decoration::Mark {
                span: reference.span,
                path: reference.file.path().to_relative_path_buf(),
                hud_id: reference.hud_id(),
            });
            items.push(Decoration::Widget {
                at: reference.span.end,
                widget,
            });
        }
    }

    items.sort_by_key(Decoration::sort_key);
    log::debug!(
        "built {} decorations over {} visible bytes",
        items.len(),
        ranges.iter().map(|r| r.len()).sum::<usize>()
    );
    DecorationSet { items }
}

/// What changed since the last update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewUpdate {
    pub doc_changed: bool,
    pub viewport_changed: bool,
}

/// Decoration provider attached to one editor view.
pub struct ImageHudView {
    ctx: HudContext,
    decorations: DecorationSet,
}

impl ImageHudView {
    pub fn new(editor: &dyn Editor, ctx: HudContext) -> Self {
        let decorations = build_decorations(editor, &ctx);
        Self { ctx, decorations }
    }

    /// Rebuilds everything when the document or the viewport changed.
    /// Returns whether a rebuild happened.
    pub fn update(&mut self, editor: &dyn Editor, update: ViewUpdate) -> bool {
        if !(update.doc_changed || update.viewport_changed) {
            return false;
        }
        self.decorations = build_decorations(editor, &self.ctx);
        true
    }

    pub fn decorations(&self) -> &DecorationSet {
        &self.decorations
    }

    /// Pointer-move handler for the editor surface.
    pub fn on_pointer_move(&self, path: &[ElementMarker]) {
        self.ctx.hover.on_pointer_move(path);
    }

    pub fn context(&self) -> &HudContext {
        &self.ctx
    }
}
