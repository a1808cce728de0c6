use std::collections::BTreeMap;
use std::fmt::Debug;
use num_traits::Float;

/// Counters collected during one engine run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Entries popped from the frontier, stale ones included
    pub pops: usize,

    /// Popped entries discarded because a shorter distance was already known
    pub stale_pops: usize,

    /// Successful relaxations (each one pushes a frontier entry)
    pub relaxations: usize,

    /// True if the loop stopped because the target was popped
    pub reached_target: bool,
}

/// Result of a single source-to-target search
///
/// Vertex identities here are external (1-based).
#[derive(Debug, Clone)]
pub struct ShortestPathResult<W>
where
    W: Float + Debug + Copy,
{
    /// Source vertex ID
    pub source: usize,

    /// Target vertex ID
    pub target: usize,

    /// Shortest distance from source to target
    pub distance: W,

    /// Vertices from source to target inclusive
    pub path: Vec<usize>,

    /// Distance of every vertex in the graph.
    /// Unreached vertices are +infinity; vertices that were still on the
    /// frontier when the target was settled hold an upper bound.
    pub distances: BTreeMap<usize, W>,

    pub stats: SearchStats,
}

impl<W> ShortestPathResult<W>
where
    W: Float + Debug + Copy,
{
    /// Recorded distance of a vertex, `None` if it is not in the graph
    pub fn distance_to(&self, vertex: usize) -> Option<W> {
        self.distances.get(&vertex).copied()
    }

    /// Number of vertices with a finite distance
    pub fn reached_count(&self) -> usize {
        self.distances.values().filter(|d| d.is_finite()).count()
    }

    /// Number of edges on the path
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}
