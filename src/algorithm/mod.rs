pub mod result;
pub mod dijkstra;
pub mod query;

pub use result::{SearchStats, ShortestPathResult};
