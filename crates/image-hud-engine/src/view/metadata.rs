use crate::io::Vault;
use crate::models::{BackingFile, HudToggles};
use crate::transform::ImageCodec;

/// Shown until metadata has loaded.
pub const LOADING_PLACEHOLDER: &str = "Loading...";

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Human-readable size in base-1024 units, one decimal: `1536` -> `1.5 KB`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut unit = 0;
    let mut divisor = 1u64;
    while unit + 1 < UNITS.len() && bytes / divisor >= 1024 {
        divisor *= 1024;
        unit += 1;
    }
    format!("{:.1} {}", bytes as f64 / divisor as f64, UNITS[unit])
}

/// Builds the info line for `file`: type, size and pixel dimensions, as
/// enabled by `toggles`, joined by `" | "`.
///
/// Dimensions that cannot be read are left out; this never fails.
pub async fn load_info_text(
    vault: &dyn Vault,
    codec: &dyn ImageCodec,
    file: &BackingFile,
    toggles: &HudToggles,
) -> String {
    let mut parts = Vec::new();
    if toggles.show_file_type {
        parts.push(file.extension().to_uppercase());
    }
    if toggles.show_file_size {
        parts.push(format_bytes(file.byte_size()));
    }
    if toggles.show_dimensions {
        match vault.read_binary(file.path()).await {
            Ok(bytes) => match codec.natural_size(&bytes, file.extension()) {
                Some((w, h)) => parts.push(format!("{w}x{h}")),
                None => log::debug!("no dimensions for {}", file.path()),
            },
            Err(e) => log::debug!("could not read {} for dimensions: {e}", file.path()),
        }
    }
    parts.join(" | ")
}
