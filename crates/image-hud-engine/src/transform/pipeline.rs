use crate::editing::Editor;
use crate::error::{HudError, Result};
use crate::host::Notifier;
use crate::io::Vault;
use crate::models::{BackingFile, TransformSpec};
use crate::parsing::inline::kinds::WikiEmbed;
use crate::parsing::rope::Span;

use super::codec::ImageCodec;
use super::geometry::target_dimensions;
use super::naming::{derive_file_name, resolve_collision};

/// Result of a transform that persisted its output.
#[derive(Debug)]
pub struct ProcessOutcome {
    pub new_file: BackingFile,
    /// Set when the original could not be trashed after the rewrite. The new
    /// file and the document edit are kept.
    pub delete_error: Option<HudError>,
}

/// Re-encodes an image and points the note at the result.
pub struct ImageProcessor<'a> {
    vault: &'a dyn Vault,
    codec: &'a dyn ImageCodec,
}

impl<'a> ImageProcessor<'a> {
    pub fn new(vault: &'a dyn Vault, codec: &'a dyn ImageCodec) -> Self {
        Self { vault, codec }
    }

    /// Transforms `file` and rewrites the reference at `span`.
    ///
    /// Every failure up to and including persisting the output returns before
    /// the document or the vault is touched. With `delete_original` the span
    /// is replaced and the original trashed; otherwise the new reference goes
    /// on its own line after the span. `suffix` is reattached verbatim.
    pub async fn process(
        &self,
        editor: &mut dyn Editor,
        file: &BackingFile,
        span: Span,
        suffix: &str,
        spec: &TransformSpec,
    ) -> Result<ProcessOutcome> {
        spec.validate()?;

        let bytes = self
            .vault
            .read_binary(file.path())
            .await
            .map_err(|e| HudError::Decode(e.to_string()))?;
        let image = self.codec.decode(&bytes, file.extension())?;
        let (width, height) = target_dimensions(image.width(), image.height(), spec)?;
        let encoded = self
            .codec
            .encode(&image, width, height, spec.target_format, spec.quality)?;

        let name = derive_file_name(file.basename(), file.extension(), spec, &encoded);
        let path = resolve_collision(self.vault, file.folder(), &name)
            .await
            .map_err(HudError::Persist)?;
        let new_file = self
            .vault
            .create_binary(&path, &encoded)
            .await
            .map_err(HudError::Persist)?;
        log::info!(
            "{} -> {} ({width}x{height}, {} bytes)",
            file.path(),
            new_file.path(),
            encoded.len()
        );

        let link = WikiEmbed::format(new_file.path().as_str(), suffix);
        if spec.delete_original {
            editor.replace_range(span, &link);
        } else {
            editor.replace_range(Span::point(span.end), &format!("\n{link}"));
        }

        let delete_error = if spec.delete_original {
            match self.vault.trash(file).await {
                Ok(()) => None,
                Err(e) => {
                    log::error!("Failed to delete original file {}: {e}", file.path());
                    Some(HudError::Delete(e))
                }
            }
        } else {
            None
        };

        Ok(ProcessOutcome {
            new_file,
            delete_error,
        })
    }

    /// [`process`](Self::process) as a user action: progress, success and
    /// failure are reported through `notifier` and never returned.
    pub async fn run(
        &self,
        notifier: &dyn Notifier,
        editor: &mut dyn Editor,
        file: &BackingFile,
        span: Span,
        suffix: &str,
        spec: &TransformSpec,
    ) -> Option<BackingFile> {
        notifier.notice(&format!("Processing {}...", file.name()));

        match self.process(editor, file, span, suffix, spec).await {
            Ok(outcome) => {
                if outcome.delete_error.is_some() {
                    notifier.notice("Processing failed: Delete failed");
                }
                notifier.notice(&format!("Created: {}", outcome.new_file.name()));
                Some(outcome.new_file)
            }
            Err(e) => {
                log::error!("Processing {} failed: {e}", file.path());
                notifier.notice(&format!("Processing failed: {e}"));
                None
            }
        }
    }
}
