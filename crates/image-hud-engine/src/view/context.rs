use std::rc::Rc;

use crate::host::{Clipboard, Launcher, Notifier, SystemLauncher};
use crate::io::Vault;
use crate::models::HudOptions;
use crate::transform::{ImageCodec, RasterCodec};

use super::hover::HoverState;

/// Collaborators and settings handed to every widget when it is built.
///
/// Cloning shares everything, including the hover state.
#[derive(Clone)]
pub struct HudContext {
    pub vault: Rc<dyn Vault>,
    pub codec: Rc<dyn ImageCodec>,
    pub clipboard: Rc<dyn Clipboard>,
    pub launcher: Rc<dyn Launcher>,
    pub notifier: Rc<dyn Notifier>,
    pub options: Rc<HudOptions>,
    pub hover: Rc<HoverState>,
}

impl HudContext {
    /// Context using [`RasterCodec`] and [`SystemLauncher`] with fresh hover state.
    pub fn new(
        vault: Rc<dyn Vault>,
        clipboard: Rc<dyn Clipboard>,
        notifier: Rc<dyn Notifier>,
        options: HudOptions,
    ) -> Self {
        Self {
            vault,
            codec: Rc::new(RasterCodec),
            clipboard,
            launcher: Rc::new(SystemLauncher),
            notifier,
            options: Rc::new(options),
            hover: Rc::new(HoverState::default()),
        }
    }

    #[must_use]
    pub fn with_codec(mut self, codec: Rc<dyn ImageCodec>) -> Self {
        self.codec = codec;
        self
    }

    #[must_use]
    pub fn with_launcher(mut self, launcher: Rc<dyn Launcher>) -> Self {
        self.launcher = launcher;
        self
    }

    /// Sends one user-visible message.
    pub(crate) fn notify(&self, message: &str) {
        self.notifier.notice(message);
    }
}
