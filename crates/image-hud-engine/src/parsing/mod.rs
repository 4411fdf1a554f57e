pub mod inline;
pub mod locator;
pub mod rope;

pub use locator::{locate, resolve_image};
