use relative_path::{RelativePath, RelativePathBuf};

/// Raster and vector extensions the overlay attaches to, compared case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "bmp", "svg", "webp"];

/// Returns true if `extension` names a recognised image type.
pub fn is_image_extension(extension: &str) -> bool {
    IMAGE_EXTENSIONS
        .iter()
        .any(|ext| ext.eq_ignore_ascii_case(extension))
}

/// Snapshot of a file-store entry an image reference resolved to.
///
/// Immutable for the render pass it was produced in; the store owns the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackingFile {
    path: RelativePathBuf,
    extension: String,
    byte_size: u64,
}

impl BackingFile {
    pub fn new(path: impl Into<RelativePathBuf>, byte_size: u64) -> Self {
        let path = path.into();
        let extension = path.extension().unwrap_or_default().to_string();
        Self {
            path,
            extension,
            byte_size,
        }
    }

    /// Vault-relative path, e.g. `assets/photo.png`.
    pub fn path(&self) -> &RelativePath {
        &self.path
    }

    /// Extension without the dot, as stored on disk.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn byte_size(&self) -> u64 {
        self.byte_size
    }

    /// File name including extension.
    pub fn name(&self) -> &str {
        self.path.file_name().unwrap_or_default()
    }

    /// File name without extension.
    pub fn basename(&self) -> &str {
        self.path.file_stem().unwrap_or_default()
    }

    /// Folder containing the file; empty for files at the vault root.
    pub fn folder(&self) -> &RelativePath {
        self.path.parent().unwrap_or(RelativePath::new(""))
    }

    pub fn is_image(&self) -> bool {
        is_image_extension(&self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_path_parts() {
        let file = BackingFile::new("assets/photo.final.JPG", 2048);
        assert_eq!(file.name(), "photo.final.JPG");
        assert_eq!(file.basename(), "photo.final");
        assert_eq!(file.extension(), "JPG");
        assert_eq!(file.folder().as_str(), "assets");
        assert_eq!(file.byte_size(), 2048);
        assert!(file.is_image());
    }

    #[test]
    fn root_file_has_empty_folder() {
        let file = BackingFile::new("photo.png", 1);
        assert_eq!(file.folder().as_str(), "");
    }

    #[test]
    fn recognises_image_extensions_case_insensitively() {
        for ext in ["png", "JPG", "jpeg", "Gif", "bmp", "SVG", "webp"] {
            assert!(is_image_extension(ext), "{ext}");
        }
        assert!(!is_image_extension("md"));
        assert!(!is_image_extension("pdf"));
        assert!(!is_image_extension(""));
    }
}
