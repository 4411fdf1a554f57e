use std::cell::RefCell;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use async_trait::async_trait;
use image::{ImageFormat, Rgba, RgbaImage};
use tempfile::TempDir;

use crate::host::{Clipboard, Launcher, Notifier};
use crate::io::FsVault;
use crate::models::HudOptions;
use crate::view::HudContext;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Create a temporary notes directory with test files
pub fn create_test_notes_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a test file with content, creating parent folders as needed
pub fn create_test_file(notes_dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = notes_dir.path().join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file_path, content).unwrap();
    file_path
}

/// PNG bytes of a `width` x `height` gradient
pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x + y) % 256) as u8,
            255,
        ])
    });
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notice(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

#[derive(Debug, Default)]
pub struct RecordingClipboard {
    pub writes: RefCell<Vec<(Vec<u8>, String)>>,
    pub fail: bool,
}

#[async_trait(?Send)]
impl Clipboard for RecordingClipboard {
    async fn write_image(&self, bytes: &[u8], mime: &str) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("clipboard unavailable");
        }
        self.writes
            .borrow_mut()
            .push((bytes.to_vec(), mime.to_string()));
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launch {
    Program(PathBuf, PathBuf),
    DefaultApp(PathBuf),
}

#[derive(Debug, Default)]
pub struct RecordingLauncher {
    pub launches: RefCell<Vec<Launch>>,
    pub fail: bool,
}

impl Launcher for RecordingLauncher {
    fn spawn_detached(&self, program: &Path, file: &Path) -> std::io::Result<()> {
        if self.fail {
            return Err(std::io::Error::other("no such program"));
        }
        self.launches
            .borrow_mut()
            .push(Launch::Program(program.to_path_buf(), file.to_path_buf()));
        Ok(())
    }

    fn open_with_default_app(&self, file: &Path) -> std::io::Result<()> {
        self.launches
            .borrow_mut()
            .push(Launch::DefaultApp(file.to_path_buf()));
        Ok(())
    }
}

/// A notes directory wired to recording host collaborators
pub struct TestHost {
    pub notes_dir: TempDir,
    pub notifier: Rc<RecordingNotifier>,
    pub clipboard: Rc<RecordingClipboard>,
    pub launcher: Rc<RecordingLauncher>,
    pub ctx: HudContext,
}

impl TestHost {
    pub fn new() -> Self {
        Self::with_options(HudOptions::default())
    }

    pub fn with_options(options: HudOptions) -> Self {
        Self::build(options, RecordingClipboard::default(), RecordingLauncher::default())
    }

    pub fn build(
        options: HudOptions,
        clipboard: RecordingClipboard,
        launcher: RecordingLauncher,
    ) -> Self {
        init_logging();
        let notes_dir = create_test_notes_dir();
        let vault = FsVault::open(notes_dir.path()).unwrap();
        let notifier = Rc::new(RecordingNotifier::default());
        let clipboard = Rc::new(clipboard);
        let launcher = Rc::new(launcher);
        let ctx = HudContext::new(Rc::new(vault), clipboard.clone(), notifier.clone(), options)
            .with_launcher(launcher.clone());
        Self {
            notes_dir,
            notifier,
            clipboard,
            launcher,
            ctx,
        }
    }
}
