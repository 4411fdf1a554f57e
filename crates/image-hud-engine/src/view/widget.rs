use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::editing::{Editor, recover};
use crate::error::HudError;
use crate::host::mime_for_extension;
use crate::models::{BackingFile, HudId, ImageReference, TransformSpec};
use crate::parsing::rope::Span;
use crate::transform::ImageProcessor;

use super::context::HudContext;
use super::metadata::{LOADING_PLACEHOLDER, load_info_text};

/// One control of a widget, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudControl {
    InfoText,
    Preview,
    SystemEdit,
    Copy,
    Convert,
    Delete,
}

impl HudControl {
    /// Accessible label; the info text has none.
    pub const fn label(self) -> &'static str {
        match self {
            Self::InfoText => "",
            Self::Preview => "Preview",
            Self::SystemEdit => "Edit in Default App",
            Self::Copy => "Copy Image to Clipboard",
            Self::Convert => "Convert / Process",
            Self::Delete => "Delete Image & Link",
        }
    }
}

/// Entry of the convert menu.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuEntry {
    /// Configured preset at `index` in [`HudOptions::presets`](crate::models::HudOptions).
    Preset {
        index: usize,
        name: String,
        description: String,
    },
    Separator,
    /// Opens the host's form for a one-off [`TransformSpec`].
    CustomConvert,
}

impl MenuEntry {
    pub fn title(&self) -> &str {
        match self {
            Self::Preset { name, .. } => name,
            Self::Separator => "",
            Self::CustomConvert => "Custom Convert...",
        }
    }
}

/// Per-reference overlay anchored after the reference span.
///
/// Built fresh on every decoration rebuild. Actions are user-triggered
/// boundaries: they report through the notifier and never return errors.
pub struct HudWidget {
    file: BackingFile,
    span: Span,
    hud_id: HudId,
    suffix: String,
    ctx: HudContext,
    visible: Rc<Cell<bool>>,
    info_text: RefCell<String>,
    tooltip: RefCell<Option<String>>,
}

impl HudWidget {
    pub fn new(reference: &ImageReference, ctx: HudContext) -> Self {
        let hud_id = reference.hud_id();
        let visible = ctx.hover.register(hud_id.clone());
        let tooltip = ctx
            .options
            .toggles
            .show_btn_preview
            .then(|| HudControl::Preview.label().to_string());
        Self {
            file: reference.file.clone(),
            span: reference.span,
            hud_id,
            suffix: reference.suffix.clone(),
            ctx,
            visible,
            info_text: RefCell::new(LOADING_PLACEHOLDER.to_string()),
            tooltip: RefCell::new(tooltip),
        }
    }

    pub fn file(&self) -> &BackingFile {
        &self.file
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Document offset the widget is rendered at.
    pub fn anchor(&self) -> usize {
        self.span.end
    }

    pub fn hud_id(&self) -> &HudId {
        &self.hud_id
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    pub fn info_text(&self) -> String {
        self.info_text.borrow().clone()
    }

    /// Preview tooltip, present only when the preview control is shown.
    pub fn tooltip(&self) -> Option<String> {
        self.tooltip.borrow().clone()
    }

    /// Controls to render, in order.
    pub fn controls(&self) -> Vec<HudControl> {
        let toggles = &self.ctx.options.toggles;
        [
            (toggles.shows_info(), HudControl::InfoText),
            (toggles.show_btn_preview, HudControl::Preview),
            (toggles.show_btn_sys_edit, HudControl::SystemEdit),
            (toggles.show_btn_copy, HudControl::Copy),
            (toggles.show_btn_convert, HudControl::Convert),
            (toggles.show_btn_delete, HudControl::Delete),
        ]
        .into_iter()
        .filter_map(|(shown, control)| shown.then_some(control))
        .collect()
    }

    /// Loads the info line and updates the text and tooltip in place.
    ///
    /// Meant to be spawned by the host right after construction; a widget
    /// dropped by a rebuild in the meantime just updates itself unseen.
    pub async fn load_metadata(&self) {
        let text = load_info_text(
            &*self.ctx.vault,
            &*self.ctx.codec,
            &self.file,
            &self.ctx.options.toggles,
        )
        .await;

        if self.ctx.options.toggles.show_btn_preview {
            *self.tooltip.borrow_mut() = Some(format!("{}: {text}", HudControl::Preview.label()));
        }
        *self.info_text.borrow_mut() = text;
    }

    /// URL the preview popover loads.
    pub fn preview_source(&self) -> String {
        self.ctx.vault.resource_url(&self.file)
    }

    /// Opens the file in the configured editor, or the system default app.
    pub fn open_in_editor(&self) {
        let editor_app = self
            .ctx
            .options
            .editor_app_path
            .as_deref()
            .filter(|p| !p.as_os_str().to_string_lossy().trim().is_empty());
        let full_path = self.ctx.vault.full_path(self.file.path());

        let launched = match (editor_app, full_path) {
            (Some(program), Some(path)) => self.ctx.launcher.spawn_detached(program, &path),
            (Some(_), None) => {
                self.ctx.notify("Custom editor not supported on this platform.");
                return;
            }
            (None, Some(path)) => self.ctx.launcher.open_with_default_app(&path),
            (None, None) => Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} has no location on disk", self.file.path()),
            )),
        };
        if let Err(e) = launched {
            let error = HudError::Launch(e.to_string());
            log::warn!("{error}");
            self.ctx.notify(&error.to_string());
        }
    }

    /// Puts the image bytes on the clipboard.
    pub async fn copy_to_clipboard(&self) {
        match self.try_copy().await {
            Ok(()) => self.ctx.notify("Image copied to clipboard"),
            Err(e) => {
                log::error!("Copy to clipboard failed: {e}");
                self.ctx.notify("Failed to copy image");
            }
        }
    }

    async fn try_copy(&self) -> Result<(), HudError> {
        let bytes = self
            .ctx
            .vault
            .read_binary(self.file.path())
            .await
            .map_err(|e| HudError::Clipboard(e.to_string()))?;
        let mime = mime_for_extension(self.file.extension()).unwrap_or("application/octet-stream");
        self.ctx
            .clipboard
            .write_image(&bytes, mime)
            .await
            .map_err(|e| HudError::Clipboard(e.to_string()))
    }

    /// Presets, a separator, then the custom entry.
    pub fn menu_entries(&self) -> Vec<MenuEntry> {
        let mut entries: Vec<MenuEntry> = self
            .ctx
            .options
            .presets
            .iter()
            .enumerate()
            .map(|(index, preset)| MenuEntry::Preset {
                index,
                name: preset.name.clone(),
                description: preset.describe(),
            })
            .collect();
        entries.push(MenuEntry::Separator);
        entries.push(MenuEntry::CustomConvert);
        entries
    }

    /// Runs the transform pipeline for this reference.
    pub async fn convert(
        &self,
        editor: &mut dyn Editor,
        spec: &TransformSpec,
    ) -> Option<BackingFile> {
        let processor = ImageProcessor::new(&*self.ctx.vault, &*self.ctx.codec);
        processor
            .run(
                &*self.ctx.notifier,
                editor,
                &self.file,
                self.span,
                &self.suffix,
                spec,
            )
            .await
    }

    /// Runs the preset at `index` of the configured list.
    pub async fn convert_with_preset(
        &self,
        editor: &mut dyn Editor,
        index: usize,
    ) -> Option<BackingFile> {
        let Some(preset) = self.ctx.options.presets.get(index) else {
            log::warn!("no preset at index {index}");
            return None;
        };
        let spec = preset.spec.clone();
        self.convert(editor, &spec).await
    }

    /// Removes the reference ending at the widget anchor, then trashes the file.
    ///
    /// Nothing is touched when the reference span cannot be recovered.
    pub async fn delete(&self, editor: &mut dyn Editor) -> bool {
        let Some(span) = recover(&editor.text(), self.anchor()) else {
            log::warn!("no reference ends at {} for {}", self.anchor(), self.hud_id);
            self.ctx.notify(&HudError::LinkSpanNotFound.to_string());
            return false;
        };
        editor.replace_range(span, "");

        match self.ctx.vault.trash(&self.file).await {
            Ok(()) => {
                log::info!("deleted {} and its reference", self.file.path());
                self.ctx
                    .notify(&format!("{}: Success", HudControl::Delete.label()));
                true
            }
            Err(e) => {
                let error = HudError::Delete(e);
                log::error!("{error}");
                self.ctx.notify(&error.to_string());
                false
            }
        }
    }
}

impl PartialEq for HudWidget {
    /// Widgets are interchangeable when they decorate the same reference.
    fn eq(&self, other: &Self) -> bool {
        self.hud_id == other.hud_id && self.file == other.file && self.suffix == other.suffix
    }
}

impl fmt::Debug for HudWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HudWidget")
            .field("hud_id", &self.hud_id)
            .field("file", &self.file.path())
            .field("suffix", &self.suffix)
            .field("visible", &self.visible.get())
            .finish()
    }
}
