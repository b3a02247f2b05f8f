use num_traits::{Float, Zero};
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Contract for a directed, positively-weighted graph container (spec §4.1).
///
/// `forward_star`/`backward_star` are ordered by destination/source so that
/// iteration is deterministic across the library — this is what lets
/// `VertexInfo` layouts and pivot-class iteration order be reproducible.
pub trait Graph<W>: Debug
where
    W: Float + Zero + Debug + Copy,
{
    /// Weight of `src -> dst`, or zero if the edge is absent.
    fn edge(&self, src: usize, dst: usize) -> W;

    /// Outgoing edges from `src`, ordered by destination.
    fn forward_star(&self, src: usize) -> &BTreeMap<usize, W>;

    /// Incoming edges into `dst`, ordered by source.
    fn backward_star(&self, dst: usize) -> &BTreeMap<usize, W>;

    /// Dense vertex index range `0..n`.
    fn vertex_count(&self) -> usize;

    /// Number of edges in the graph.
    fn edges(&self) -> usize;

    /// Sum of every edge weight.
    fn total_weight(&self) -> W;

    /// Sum of incoming edge weights at `v`.
    fn in_weighted_degree(&self, v: usize) -> W;

    /// Sum of outgoing edge weights at `v`.
    fn out_weighted_degree(&self, v: usize) -> W;

    /// Dense vertex index sequence `0..vertex_count()`.
    fn vertices(&self) -> std::ops::Range<usize> {
        0..self.vertex_count()
    }
}

/// Narrower contract consumed by the Louvain partitioner (spec §6.1): it
/// only needs degrees, stars and total weight, never mutation.
pub trait DegreeGraph<W>: Graph<W>
where
    W: Float + Zero + Debug + Copy,
{
}

impl<W, G> DegreeGraph<W> for G
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
}
