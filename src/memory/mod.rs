//! The annotated memory model: the shared blackboard the tracer writes to
//! and the listing/map/call-graph renderers read from.

pub mod annotated;
pub mod ranges;
pub mod symbols;

pub use annotated::{AnnotatedMemory, Annotation};
pub use ranges::RangeSet;
pub use symbols::default_symbols;
