use std::fmt::Debug;
use num_traits::Float;

use crate::algorithm::{SearchStats, ShortestPathResult};
use crate::data_structures::PriorityFrontier;
use crate::graph::{Graph, Vertex, WeightedGraph};
use crate::{Error, Result};

/// Classic Dijkstra's algorithm with early exit at the target
///
/// Runs take the graph by `&mut`: the per-vertex distance and back-reference
/// fields belong to exactly one run at a time.
///
/// Equal-weight alternatives: relaxation only accepts strictly shorter
/// candidates, neighbors are scanned in ascending id and the frontier pops
/// equal distances by ascending id, so the first predecessor found at the
/// minimum distance is the one kept.
#[derive(Debug, Default, Clone, Copy)]
pub struct Dijkstra;

impl Dijkstra {
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra
    }

    pub fn name(&self) -> &'static str {
        "Dijkstra"
    }

    /// Runs a full search between internal (0-based) ids and rebuilds the path.
    ///
    /// On error the graph keeps whatever distances the run computed, so an
    /// `UnreachableTarget` caller can still inspect them.
    pub fn compute<W>(
        &self,
        graph: &mut WeightedGraph<W>,
        source: usize,
        target: usize,
    ) -> Result<ShortestPathResult<W>>
    where
        W: Float + Debug + Copy,
    {
        let stats = self.relax(graph, source, target)?;
        let path = self.reconstruct_path(graph, source, target)?;

        let distance = vertex_at(graph, slot_of(graph, target)?)?.distance();
        let distances = graph
            .vertices()
            .map(|vertex| (external(vertex.id()), vertex.distance()))
            .collect();

        log::debug!(
            "{} {} -> {}: distance {:?}, {} hops, {} pops ({} stale), {} relaxations",
            self.name(),
            external(source),
            external(target),
            distance,
            path.len().saturating_sub(1),
            stats.pops,
            stats.stale_pops,
            stats.relaxations
        );

        Ok(ShortestPathResult {
            source: external(source),
            target: external(target),
            distance,
            path,
            distances,
            stats,
        })
    }

    /// Resets the graph and runs the relaxation loop until the target is
    /// popped or the frontier runs dry.
    pub fn relax<W>(
        &self,
        graph: &mut WeightedGraph<W>,
        source: usize,
        target: usize,
    ) -> Result<SearchStats>
    where
        W: Float + Debug + Copy,
    {
        if !graph.has_vertex(source) || !graph.has_vertex(target) {
            return Err(Error::InvalidEndpoint(external(source), external(target)));
        }

        graph.reset_labels();

        let source_slot = slot_of(graph, source)?;
        vertex_at_mut(graph, source_slot)?.relax_to(W::zero(), None);

        let mut frontier = PriorityFrontier::with_capacity(graph.vertex_count());
        frontier.push(W::zero(), source);

        let mut stats = SearchStats::default();

        while let Some((distance, id)) = frontier.pop() {
            stats.pops += 1;

            // With non-negative weights the first pop of the target is final
            if id == target {
                stats.reached_target = true;
                break;
            }

            let slot = slot_of(graph, id)?;
            let vertex = vertex_at(graph, slot)?;

            if distance > vertex.distance() {
                stats.stale_pops += 1;
                continue;
            }

            let neighbors: Vec<(usize, W)> = vertex
                .adjacents()
                .filter_map(|(to, weight)| {
                    weight
                        .filter(|&w| graph.is_traversable(w))
                        .map(|w| (to, w))
                })
                .collect();

            for (neighbor, weight) in neighbors {
                let candidate = distance + weight;
                let neighbor_slot = slot_of(graph, neighbor)?;
                let next = vertex_at_mut(graph, neighbor_slot)?;

                if candidate < next.distance() {
                    next.relax_to(candidate, Some(slot));
                    frontier.push(candidate, neighbor);
                    stats.relaxations += 1;
                }
            }
        }

        Ok(stats)
    }

    /// Follows back-references from the target and returns the path in
    /// external (1-based) ids, source first.
    pub fn reconstruct_path<W>(
        &self,
        graph: &WeightedGraph<W>,
        source: usize,
        target: usize,
    ) -> Result<Vec<usize>>
    where
        W: Float + Debug + Copy,
    {
        let target_slot = slot_of(graph, target)?;
        if target != source && !vertex_at(graph, target_slot)?.distance().is_finite() {
            return Err(Error::UnreachableTarget(external(source), external(target)));
        }

        let mut path = Vec::new();
        let mut current = Some(target_slot);

        while let Some(slot) = current {
            let vertex = vertex_at(graph, slot)?;
            path.push(external(vertex.id()));

            if path.len() > graph.vertex_count() {
                return Err(Error::InternalInvariantViolation(format!(
                    "back-reference cycle while rebuilding path to {}",
                    external(target)
                )));
            }

            current = vertex.previous_slot();
        }

        path.reverse();

        if path.first() != Some(&external(source)) {
            return Err(Error::InternalInvariantViolation(format!(
                "back-references from {} end at {:?} instead of source {}",
                external(target),
                path.first(),
                external(source)
            )));
        }

        Ok(path)
    }
}

/// Converts an internal id to its 1-based external form
fn external(id: usize) -> usize {
    id.saturating_add(1)
}

fn slot_of<W>(graph: &WeightedGraph<W>, id: usize) -> Result<usize>
where
    W: Float + Debug + Copy,
{
    graph.slot(id).ok_or_else(|| {
        Error::InternalInvariantViolation(format!("vertex {} is missing from the graph", id))
    })
}

fn vertex_at<W>(graph: &WeightedGraph<W>, slot: usize) -> Result<&Vertex<W>>
where
    W: Float + Debug + Copy,
{
    graph.vertex_at(slot).ok_or_else(|| {
        Error::InternalInvariantViolation(format!("arena slot {} is out of bounds", slot))
    })
}

fn vertex_at_mut<W>(
    graph: &mut WeightedGraph<W>,
    slot: usize,
) -> Result<&mut Vertex<W>>
where
    W: Float + Debug + Copy,
{
    graph.vertex_at_mut(slot).ok_or_else(|| {
        Error::InternalInvariantViolation(format!("arena slot {} is out of bounds", slot))
    })
}
