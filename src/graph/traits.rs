use std::fmt::Debug;
use num_traits::Float;

/// Trait representing a weighted directed graph keyed by vertex identity
pub trait Graph<W>: Debug
where
    W: Float + Debug + Copy,
{
    /// Returns the number of vertices in the graph
    fn vertex_count(&self) -> usize;

    /// Returns the number of traversable edges in the graph
    fn edge_count(&self) -> usize;

    /// Returns an iterator over the traversable outgoing edges from a vertex,
    /// in ascending neighbor identity
    fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_>;

    /// Returns true if the vertex exists in the graph
    fn has_vertex(&self, vertex: usize) -> bool;

    /// Returns true if there's a traversable edge between the two vertices
    fn has_edge(&self, from: usize, to: usize) -> bool {
        self.get_edge_weight(from, to).is_some()
    }

    /// Gets the weight of a traversable edge if it exists
    fn get_edge_weight(&self, from: usize, to: usize) -> Option<W>;
}

/// Trait for mutable graph operations
pub trait MutableGraph<W>: Graph<W>
where
    W: Float + Debug + Copy,
{
    /// Adds a vertex with the given identity if absent.
    /// Returns true if a new vertex was created.
    fn add_vertex(&mut self, id: usize) -> bool;

    /// Adds a directed edge, creating both endpoints if needed.
    /// Any previous weight for the same ordered pair is overwritten.
    /// Returns false (and changes nothing) for NaN weights and for negative
    /// weights other than the graph's "no edge" sentinel.
    fn add_edge(&mut self, from: usize, to: usize, weight: W) -> bool;

    /// Removes every vertex and edge
    fn clear(&mut self);
}
