use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::Preset;

/// Which HUD elements are rendered. Every element defaults to shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudToggles {
    pub show_file_size: bool,
    pub show_file_type: bool,
    pub show_dimensions: bool,
    pub show_btn_preview: bool,
    pub show_btn_sys_edit: bool,
    pub show_btn_copy: bool,
    pub show_btn_convert: bool,
    pub show_btn_delete: bool,
}

impl Default for HudToggles {
    fn default() -> Self {
        Self {
            show_file_size: true,
            show_file_type: true,
            show_dimensions: true,
            show_btn_preview: true,
            show_btn_sys_edit: true,
            show_btn_copy: true,
            show_btn_convert: true,
            show_btn_delete: true,
        }
    }
}

impl HudToggles {
    /// The info text is rendered when any metadata part is enabled.
    pub fn shows_info(&self) -> bool {
        self.show_file_size || self.show_file_type || self.show_dimensions
    }
}

/// Read-only view of the persisted settings, injected into every widget.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HudOptions {
    pub toggles: HudToggles,
    pub presets: Vec<Preset>,
    /// External editor executable; `None` opens files with the system default app.
    pub editor_app_path: Option<PathBuf>,
}
