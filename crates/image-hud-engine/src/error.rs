use crate::io::VaultError;
use crate::models::SpecError;

/// Failures surfaced to the user by HUD actions and the transform pipeline.
///
/// Unresolvable references never become an error: the locator drops them.
/// Display strings are the user-visible notice text.
#[derive(Debug, thiserror::Error)]
pub enum HudError {
    #[error("Failed to load image: {0}")]
    Decode(String),

    #[error("Resulting image size too small (< 1px): {width}x{height}")]
    SizeTooSmall { width: i64, height: i64 },

    #[error("Resulting image size too large: {width}x{height}")]
    SizeTooLarge { width: u64, height: u64 },

    #[error("Encoder unavailable: {0}")]
    EncodeUnavailable(String),

    #[error("Encoding produced no output")]
    EncodeFailed,

    #[error("Failed to save image: {0}")]
    Persist(#[source] VaultError),

    #[error("Failed to delete file: {0}")]
    Delete(#[source] VaultError),

    #[error("Could not find image link to delete.")]
    LinkSpanNotFound,

    #[error("Failed to copy image: {0}")]
    Clipboard(String),

    #[error("Failed to open editor: {0}")]
    Launch(String),

    #[error("Invalid transform: {0}")]
    InvalidSpec(#[from] SpecError),
}

pub type Result<T, E = HudError> = std::result::Result<T, E>;
