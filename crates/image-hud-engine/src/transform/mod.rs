//! # Transform Pipeline
//!
//! Decode, resize, re-encode, name, persist, then rewrite the reference.
//!
//! - **`geometry`**: target dimensions for a resize mode
//! - **`naming`**: output file names and collision numbering
//! - **`codec`**: `ImageCodec` seam and the `image`-crate `RasterCodec`
//! - **`pipeline`**: `ImageProcessor` tying the steps together

pub mod codec;
pub mod geometry;
pub mod naming;
pub mod pipeline;

pub use codec::{ImageCodec, RasterCodec};
pub use geometry::target_dimensions;
pub use naming::{derive_file_name, numbered_name, resolve_collision};
pub use pipeline::{ImageProcessor, ProcessOutcome};
