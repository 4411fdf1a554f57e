pub mod editing;
pub mod error;
pub mod host;
pub mod io;
pub mod models;
pub mod parsing;
pub mod transform;
pub mod view;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{Document, Editor, Patch};
pub use error::{HudError, Result};
pub use host::{Clipboard, Launcher, LogNotifier, Notifier, SystemLauncher};
pub use io::{FsVault, Vault, VaultError};
pub use models::*;
pub use parsing::rope::Span;
pub use transform::{ImageCodec, ImageProcessor, ProcessOutcome, RasterCodec};
pub use view::{
    Decoration, DecorationSet, ElementMarker, HoverState, HudContext, HudControl, HudWidget,
    ImageHudView, MenuEntry, ViewUpdate,
};
