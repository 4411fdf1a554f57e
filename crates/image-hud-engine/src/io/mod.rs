//! File store collaborator.
//!
//! [`Vault`] is the host's view of the notes directory: link resolution,
//! binary reads and writes, and the recoverable trash. [`FsVault`] implements
//! it over a plain directory on disk.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use relative_path::{RelativePath, RelativePathBuf};

use crate::models::BackingFile;
use crate::transform::naming::numbered_name;

/// Folder (relative to the vault root) that trashed files are moved into.
pub const TRASH_DIR: &str = ".trash";

#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("File already exists: {0}")]
    AlreadyExists(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid notes directory: {0}")]
    InvalidNotesDir(String),
}

#[async_trait(?Send)]
pub trait Vault {
    /// Resolves link text (already stripped of `|`/`#` tails) from the note at
    /// `source_path` to a file, if one exists.
    fn resolve_link(&self, link: &str, source_path: &RelativePath) -> Option<BackingFile>;

    /// URL the host can load the file from for display and decoding.
    fn resource_url(&self, file: &BackingFile) -> String;

    /// Absolute path on disk, when the vault is backed by a file system.
    fn full_path(&self, path: &RelativePath) -> Option<PathBuf>;

    async fn read_binary(&self, path: &RelativePath) -> Result<Vec<u8>, VaultError>;

    async fn exists(&self, path: &RelativePath) -> Result<bool, VaultError>;

    /// Creates a new file; fails if `path` is already taken.
    async fn create_binary(
        &self,
        path: &RelativePath,
        bytes: &[u8],
    ) -> Result<BackingFile, VaultError>;

    /// Moves a file somewhere recoverable rather than erasing it.
    async fn trash(&self, file: &BackingFile) -> Result<(), VaultError>;
}

/// [`Vault`] over a notes directory on the local file system.
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, VaultError> {
        let root = root.into();
        validate_notes_dir(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Snapshot of the file at `path`.
    pub fn file(&self, path: &RelativePath) -> Result<BackingFile, VaultError> {
        let absolute_path = path.to_path(&self.root);
        if !absolute_path.is_file() {
            return Err(VaultError::NotFound(absolute_path));
        }
        let size = fs::metadata(&absolute_path)?.len();
        Ok(BackingFile::new(path.normalize(), size))
    }

    /// All files in the vault outside the trash, sorted by path.
    pub fn scan_files(&self) -> Result<Vec<RelativePathBuf>, VaultError> {
        let mut files = Vec::new();
        scan_directory_recursive(&self.root, RelativePath::new(""), &mut files)?;
        files.sort();
        Ok(files)
    }

    fn existing(&self, path: &RelativePath) -> Option<BackingFile> {
        self.file(path).ok()
    }
}

#[async_trait(?Send)]
impl Vault for FsVault {
    fn resolve_link(&self, link: &str, source_path: &RelativePath) -> Option<BackingFile> {
        let link = link.trim();
        if link.is_empty() {
            return None;
        }
        let link = RelativePath::new(link);

        let source_folder = source_path.parent().unwrap_or(RelativePath::new(""));
        if let Some(file) = self.existing(&source_folder.join(link).normalize()) {
            return Some(file);
        }
        if let Some(file) = self.existing(link) {
            return Some(file);
        }

        // Bare names resolve to the first file with that name anywhere in the vault
        let name = link.file_name()?;
        if link.as_str() != name {
            return None;
        }
        match self.scan_files() {
            Ok(files) => files
                .iter()
                .find(|path| path.file_name() == Some(name))
                .and_then(|path| self.existing(path)),
            Err(e) => {
                log::warn!("Failed to scan vault while resolving {name}: {e}");
                None
            }
        }
    }

    fn resource_url(&self, file: &BackingFile) -> String {
        format!("file://{}", file.path().to_path(&self.root).display())
    }

    fn full_path(&self, path: &RelativePath) -> Option<PathBuf> {
        Some(path.to_path(&self.root))
    }

    async fn read_binary(&self, path: &RelativePath) -> Result<Vec<u8>, VaultError> {
        let absolute_path = path.to_path(&self.root);
        if !absolute_path.exists() {
            return Err(VaultError::NotFound(absolute_path));
        }
        fs::read(&absolute_path).map_err(VaultError::Io)
    }

    async fn exists(&self, path: &RelativePath) -> Result<bool, VaultError> {
        Ok(path.to_path(&self.root).try_exists()?)
    }

    async fn create_binary(
        &self,
        path: &RelativePath,
        bytes: &[u8],
    ) -> Result<BackingFile, VaultError> {
        let absolute_path = path.to_path(&self.root);

        // Create parent directories if they don't exist
        if let Some(parent) = absolute_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&absolute_path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(VaultError::AlreadyExists(absolute_path));
            }
            Err(e) => return Err(e.into()),
        };
        std::io::Write::write_all(&mut file, bytes)?;

        Ok(BackingFile::new(path.normalize(), bytes.len() as u64))
    }

    async fn trash(&self, file: &BackingFile) -> Result<(), VaultError> {
        let from = file.path().to_path(&self.root);
        if !from.exists() {
            return Err(VaultError::NotFound(from));
        }
        let trash_dir = self.root.join(TRASH_DIR);
        fs::create_dir_all(&trash_dir)?;

        let mut to = trash_dir.join(file.name());
        let mut counter = 1;
        while to.exists() {
            to = trash_dir.join(numbered_name(file.name(), counter));
            counter += 1;
        }
        fs::rename(&from, &to)?;
        log::debug!("moved {} to {}", from.display(), to.display());
        Ok(())
    }
}

fn scan_directory_recursive(
    dir: &Path,
    relative: &RelativePath,
    files: &mut Vec<RelativePathBuf>,
) -> Result<(), VaultError> {
    let entries = fs::read_dir(dir).map_err(VaultError::Io)?;

    for entry in entries {
        let entry = entry.map_err(VaultError::Io)?;
        let path = entry.path();
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }

        if path.is_dir() {
            scan_directory_recursive(&path, &relative.join(name), files)?;
        } else {
            files.push(relative.join(name));
        }
    }

    Ok(())
}

pub fn validate_notes_dir(path: &Path) -> Result<(), VaultError> {
    if !path.exists() || !path.is_dir() {
        return Err(VaultError::InvalidNotesDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}
