pub mod lines;
pub mod slice;
pub mod span;

pub use lines::{LineRef, line_containing, line_span_in};
pub use slice::slice_to_string;
pub use span::Span;
