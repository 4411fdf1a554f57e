pub mod backing_file;
pub mod hud_options;
pub mod image_reference;
pub mod transform_spec;

pub use backing_file::{BackingFile, IMAGE_EXTENSIONS, is_image_extension};
pub use hud_options::{HudOptions, HudToggles};
pub use image_reference::{HudId, ImageReference};
pub use transform_spec::{Preset, ResizeMode, SpecError, TargetFormat, TransformSpec};
