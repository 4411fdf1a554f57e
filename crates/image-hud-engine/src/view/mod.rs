//! # View
//!
//! Everything the host editor view talks to: the decoration provider, the
//! pointer-move handler and the per-reference widgets.
//!
//! - **`decorations`**: `build_decorations()` and the `ImageHudView` update loop
//! - **`hover`**: `HoverState`, the shared "which HUD is showing" value
//! - **`widget`**: `HudWidget` controls and actions
//! - **`metadata`**: info line (`format_bytes()`, dimensions)
//! - **`context`**: `HudContext`, the collaborators injected into widgets

pub mod context;
pub mod decorations;
pub mod hover;
pub mod metadata;
pub mod widget;

pub use context::HudContext;
pub use decorations::{Decoration, DecorationSet, ImageHudView, ViewUpdate, build_decorations};
pub use hover::{ElementMarker, HoverState};
pub use metadata::{LOADING_PLACEHOLDER, format_bytes, load_info_text};
pub use widget::{HudControl, HudWidget, MenuEntry};
