//! One-shot queries: matrix in, result out.
//!
//! Each call builds and drops its own graph, so concurrent callers never
//! share vertex state.

use std::fmt::Debug;
use num_traits::Float;

use crate::algorithm::dijkstra::Dijkstra;
use crate::algorithm::ShortestPathResult;
use crate::graph::{Graph, WeightedGraph, DEFAULT_NO_EDGE};
use crate::{Error, Result};

/// Shortest path between two 1-based vertices of a dense matrix, using
/// [`DEFAULT_NO_EDGE`] as the "no edge" value
pub fn shortest_path(
    matrix: &[Vec<f64>],
    source: usize,
    target: usize,
) -> Result<ShortestPathResult<f64>> {
    shortest_path_with_no_edge(matrix, source, target, DEFAULT_NO_EDGE)
}

/// Shortest path between two 1-based vertices with a custom "no edge" value
pub fn shortest_path_with_no_edge<W>(
    matrix: &[Vec<W>],
    source: usize,
    target: usize,
    no_edge: W,
) -> Result<ShortestPathResult<W>>
where
    W: Float + Debug + Copy,
{
    let mut graph = WeightedGraph::from_matrix(matrix, no_edge)?;
    let (from, to) = to_internal(&graph, source, target)?;

    Dijkstra::new().compute(&mut graph, from, to)
}

/// Converts 1-based endpoints to graph ids, failing if either is absent
pub fn to_internal<W>(graph: &WeightedGraph<W>, source: usize, target: usize) -> Result<(usize, usize)>
where
    W: Float + Debug + Copy,
{
    let resolve = |id: usize| id.checked_sub(1).filter(|&v| graph.has_vertex(v));

    match (resolve(source), resolve(target)) {
        (Some(from), Some(to)) => Ok((from, to)),
        _ => Err(Error::InvalidEndpoint(source, target)),
    }
}
