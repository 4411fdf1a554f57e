//! Host-application collaborators that are not part of the file store.
//!
//! The editor document lives in [`crate::editing::Editor`] and the file store
//! in [`crate::io::Vault`]; everything else the HUD needs from its host is here.

use std::path::Path;
use std::process::{Command, Stdio};

use async_trait::async_trait;

/// Transient user-visible messages.
pub trait Notifier {
    fn notice(&self, message: &str);
}

/// Notifier for hosts without a notification surface: messages go to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notice(&self, message: &str) {
        log::info!("{message}");
    }
}

/// System clipboard, image payloads only.
#[async_trait(?Send)]
pub trait Clipboard {
    async fn write_image(&self, bytes: &[u8], mime: &str) -> anyhow::Result<()>;
}

/// Launching external programs for a file.
pub trait Launcher {
    /// Starts `program` with `file` as its only argument without waiting for it.
    fn spawn_detached(&self, program: &Path, file: &Path) -> std::io::Result<()>;

    fn open_with_default_app(&self, file: &Path) -> std::io::Result<()>;
}

/// [`Launcher`] backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn spawn_detached(&self, program: &Path, file: &Path) -> std::io::Result<()> {
        let child = Command::new(program)
            .arg(file)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        log::debug!("spawned {} (pid {})", program.display(), child.id());
        Ok(())
    }

    fn open_with_default_app(&self, file: &Path) -> std::io::Result<()> {
        let mut command = default_app_command(file);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(())
    }
}

#[cfg(target_os = "macos")]
fn default_app_command(file: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(file);
    command
}

#[cfg(target_os = "windows")]
fn default_app_command(file: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(file);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn default_app_command(file: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(file);
    command
}

/// MIME type for an image extension, used for clipboard payloads.
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "bmp" => Some("image/bmp"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}
