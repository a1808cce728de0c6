//! Dense adjacency matrix ingestion.
//!
//! Row `i`, column `j` holds the weight of the directed edge `i -> j`. Zero,
//! the "no edge" sentinel and `+inf` never become graph edges.

use num_traits::Float;
use std::fmt::Debug;

use crate::graph::traits::MutableGraph;
use crate::graph::weighted::WeightedGraph;
use crate::{Error, Result};

/// Checks that the matrix is square and that every cell other than the
/// `no_edge` sentinel is a non-negative number
pub fn validate_matrix<W>(matrix: &[Vec<W>], no_edge: W) -> Result<()>
where
    W: Float + Debug + Copy,
{
    let n = matrix.len();

    for (i, row) in matrix.iter().enumerate() {
        if row.len() != n {
            return Err(Error::MalformedMatrix(format!(
                "row {} has {} entries, expected {}",
                i, row.len(), n
            )));
        }

        for (j, &weight) in row.iter().enumerate() {
            if weight.is_nan() {
                return Err(Error::MalformedMatrix(format!(
                    "weight at ({}, {}) is not a number",
                    i, j
                )));
            }
            if weight < W::zero() && weight != no_edge {
                return Err(Error::MalformedMatrix(format!(
                    "negative weight {:?} at ({}, {})",
                    weight, i, j
                )));
            }
        }
    }

    Ok(())
}

/// True if a matrix cell describes a real edge
pub fn is_edge_cell<W>(weight: W, no_edge: W) -> bool
where
    W: Float + Debug + Copy,
{
    weight != W::zero() && weight != no_edge && weight.is_finite()
}

/// Replaces the contents of `graph` with the vertices and edges of `matrix`.
///
/// Every row becomes a vertex, even one without edges.
pub fn ingest<W, G>(graph: &mut G, matrix: &[Vec<W>], no_edge: W) -> Result<()>
where
    W: Float + Debug + Copy,
    G: MutableGraph<W>,
{
    validate_matrix(matrix, no_edge)?;
    graph.clear();

    for (from, row) in matrix.iter().enumerate() {
        graph.add_vertex(from);
        for (to, &weight) in row.iter().enumerate() {
            if is_edge_cell(weight, no_edge) {
                graph.add_edge(from, to, weight);
            }
        }
    }

    log::debug!(
        "ingested {}x{} adjacency matrix ({} edges)",
        matrix.len(),
        matrix.len(),
        graph.edge_count()
    );

    Ok(())
}

impl<W> WeightedGraph<W>
where
    W: Float + Debug + Copy,
{
    /// Builds a fresh graph from a dense matrix
    pub fn from_matrix(matrix: &[Vec<W>], no_edge: W) -> Result<Self> {
        let mut graph = WeightedGraph::with_no_edge(no_edge);
        ingest(&mut graph, matrix, no_edge)?;
        Ok(graph)
    }
}
