use relative_path::{RelativePath, RelativePathBuf};

use crate::io::{Vault, VaultError};
use crate::models::{ResizeMode, TransformSpec};

/// File name for an encoded result.
///
/// With `use_content_hash` the name is the MD5 of `encoded`. Otherwise the
/// source basename gets a descriptive suffix: resize (`_50pct`, `_800w`), then
/// quality for lossy formats (`_80q`). A conversion with neither is marked
/// with the target format (`_png`), or `_processed` if the format is unchanged.
pub fn derive_file_name(
    basename: &str,
    source_extension: &str,
    spec: &TransformSpec,
    encoded: &[u8],
) -> String {
    let ext = spec.target_format.extension();
    if spec.use_content_hash {
        return format!("{:x}.{ext}", md5::compute(encoded));
    }

    let mut suffix = String::new();
    match spec.resize_mode {
        ResizeMode::None => {}
        ResizeMode::Scale => {
            suffix.push_str(&format!("_{}pct", (spec.resize_value * 100.0).round()));
        }
        ResizeMode::FixedWidth => suffix.push_str(&format!("_{}w", spec.resize_value)),
    }
    if spec.target_format.is_lossy() {
        suffix.push_str(&format!("_{}q", (spec.quality * 100.0).round()));
    }
    if suffix.is_empty() {
        if ext.eq_ignore_ascii_case(source_extension) {
            suffix.push_str("_processed");
        } else {
            suffix = format!("_{ext}");
        }
    }

    format!("{basename}{suffix}.{ext}")
}

/// Inserts `_{n}` before the extension: `photo.webp` -> `photo_2.webp`.
pub fn numbered_name(name: &str, n: u32) -> String {
    match name.rfind('.') {
        Some(dot) if dot > 0 => format!("{}_{n}{}", &name[..dot], &name[dot..]),
        _ => format!("{name}_{n}"),
    }
}

/// First free path for `name` in `folder`, trying `name`, then `_1`, `_2`, ...
pub async fn resolve_collision(
    vault: &dyn Vault,
    folder: &RelativePath,
    name: &str,
) -> Result<RelativePathBuf, VaultError> {
    let mut candidate = folder.join(name);
    let mut counter = 1;
    while vault.exists(&candidate).await? {
        candidate = folder.join(numbered_name(name, counter));
        counter += 1;
    }
    Ok(candidate)
}
