use crate::graph::traits::{Graph, MutableGraph};
use num_traits::Float;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;

/// Matrix value that the route service clients use for "no edge"
pub const DEFAULT_NO_EDGE: f64 = 10000.0;

/// A vertex owned by a [`WeightedGraph`]
///
/// `distance` and `previous` are scratch state of the engine run that last
/// borrowed the graph; they are reset at the start of every run.
#[derive(Debug, Clone)]
pub struct Vertex<W> {
    id: usize,
    distance: W,
    /// Arena slot of the vertex this one was last relaxed from
    previous: Option<usize>,
    /// neighbor id -> weight, `None` meaning "no edge"
    adjacents: BTreeMap<usize, Option<W>>,
}

impl<W> Vertex<W>
where
    W: Float + Debug + Copy,
{
    fn new(id: usize) -> Self {
        Vertex {
            id,
            distance: W::infinity(),
            previous: None,
            adjacents: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Tentative (or, after a run, final) distance from the last source
    pub fn distance(&self) -> W {
        self.distance
    }

    /// Raw adjacency, including entries recorded as "no edge"
    pub fn adjacents(&self) -> impl Iterator<Item = (usize, Option<W>)> + '_ {
        self.adjacents.iter().map(|(&id, &weight)| (id, weight))
    }

    pub(crate) fn reset(&mut self) {
        self.distance = W::infinity();
        self.previous = None;
    }

    pub(crate) fn previous_slot(&self) -> Option<usize> {
        self.previous
    }

    pub(crate) fn relax_to(&mut self, distance: W, previous: Option<usize>) {
        self.distance = distance;
        self.previous = previous;
    }
}

/// A directed weighted graph stored as an arena of vertices
///
/// Vertices are addressed by identity from the outside and by arena slot
/// internally; back-references are slots, so the graph owns every vertex and
/// no vertex owns another.
#[derive(Debug, Clone)]
pub struct WeightedGraph<W>
where
    W: Float + Debug + Copy,
{
    vertices: Vec<Vertex<W>>,

    /// vertex id -> arena slot
    slots: HashMap<usize, usize>,

    /// Weight that is never traversable even if it reaches the adjacency
    no_edge: Option<W>,
}

impl<W> Default for WeightedGraph<W>
where
    W: Float + Debug + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<W> WeightedGraph<W>
where
    W: Float + Debug + Copy,
{
    /// Creates a new empty graph using [`DEFAULT_NO_EDGE`] as the sentinel
    pub fn new() -> Self {
        WeightedGraph {
            vertices: Vec::new(),
            slots: HashMap::new(),
            no_edge: num_traits::cast(DEFAULT_NO_EDGE),
        }
    }

    /// Creates a new empty graph with a custom "no edge" sentinel
    pub fn with_no_edge(no_edge: W) -> Self {
        WeightedGraph {
            no_edge: Some(no_edge),
            ..Self::new()
        }
    }

    /// Creates a new graph with vertices `0..vertices` already present
    pub fn with_capacity(vertices: usize) -> Self {
        let mut graph = WeightedGraph {
            vertices: Vec::with_capacity(vertices),
            slots: HashMap::with_capacity(vertices),
            ..Self::new()
        };
        for v in 0..vertices {
            graph.add_vertex(v);
        }
        graph
    }

    pub fn no_edge(&self) -> Option<W> {
        self.no_edge
    }

    /// True for finite weights other than the sentinel
    pub fn is_traversable(&self, weight: W) -> bool {
        weight.is_finite() && Some(weight) != self.no_edge
    }

    pub fn vertex(&self, id: usize) -> Option<&Vertex<W>> {
        self.slot(id).map(|slot| &self.vertices[slot])
    }

    /// Iterates vertices in insertion order
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex<W>> + '_ {
        self.vertices.iter()
    }

    /// Identity of the vertex `id` was last relaxed from
    pub fn predecessor(&self, id: usize) -> Option<usize> {
        self.vertex(id)
            .and_then(Vertex::previous_slot)
            .and_then(|slot| self.vertices.get(slot))
            .map(Vertex::id)
    }

    /// Puts every vertex back to distance +infinity with no back-reference
    pub fn reset_labels(&mut self) {
        for vertex in &mut self.vertices {
            vertex.reset();
        }
    }

    pub(crate) fn slot(&self, id: usize) -> Option<usize> {
        self.slots.get(&id).copied()
    }

    pub(crate) fn vertex_at(&self, slot: usize) -> Option<&Vertex<W>> {
        self.vertices.get(slot)
    }

    pub(crate) fn vertex_at_mut(&mut self, slot: usize) -> Option<&mut Vertex<W>> {
        self.vertices.get_mut(slot)
    }

    fn ensure_vertex(&mut self, id: usize) -> usize {
        if let Some(slot) = self.slot(id) {
            return slot;
        }
        let slot = self.vertices.len();
        self.vertices.push(Vertex::new(id));
        self.slots.insert(id, slot);
        slot
    }
}

impl<W> Graph<W> for WeightedGraph<W>
where
    W: Float + Debug + Copy,
{
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn edge_count(&self) -> usize {
        self.vertices
            .iter()
            .map(|vertex| self.outgoing_edges(vertex.id).count())
            .sum()
    }

    fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_> {
        match self.vertex(vertex) {
            Some(v) => Box::new(v.adjacents.iter().filter_map(move |(&to, &weight)| {
                weight
                    .filter(|&w| self.is_traversable(w))
                    .map(|w| (to, w))
            })),
            None => Box::new(std::iter::empty()),
        }
    }

    fn has_vertex(&self, vertex: usize) -> bool {
        self.slots.contains_key(&vertex)
    }

    fn get_edge_weight(&self, from: usize, to: usize) -> Option<W> {
        self.vertex(from)
            .and_then(|v| v.adjacents.get(&to).copied().flatten())
            .filter(|&w| self.is_traversable(w))
    }
}

impl<W> MutableGraph<W> for WeightedGraph<W>
where
    W: Float + Debug + Copy,
{
    fn add_vertex(&mut self, id: usize) -> bool {
        if self.has_vertex(id) {
            return false;
        }
        self.ensure_vertex(id);
        true
    }

    fn add_edge(&mut self, from: usize, to: usize, weight: W) -> bool {
        if weight.is_nan() || (weight < W::zero() && Some(weight) != self.no_edge) {
            return false;
        }

        self.ensure_vertex(to);
        let from_slot = self.ensure_vertex(from);
        let weight = Some(weight).filter(|&w| self.is_traversable(w));
        self.vertices[from_slot].adjacents.insert(to, weight);
        true
    }

    fn clear(&mut self) {
        self.vertices.clear();
        self.slots.clear();
    }
}
