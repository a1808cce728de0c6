pub mod traits;
pub mod weighted;
pub mod matrix;
pub mod generators;

pub use traits::{Graph, MutableGraph};
pub use weighted::{Vertex, WeightedGraph, DEFAULT_NO_EDGE};
