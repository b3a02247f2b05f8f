use crate::graph::traits::Graph;
use num_traits::{Float, Zero};
use std::collections::BTreeMap;
use std::fmt::Debug;

/// A directed, positively-weighted graph with dense `0..n` vertex indices,
/// stored as parallel forward/backward adjacency (spec §3, §4.1).
#[derive(Debug, Clone)]
pub struct DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    forward: Vec<BTreeMap<usize, W>>,
    backward: Vec<BTreeMap<usize, W>>,
    edges: usize,
    total_weight: W,
    empty: BTreeMap<usize, W>,
}

impl<W> DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        DirectedGraph {
            forward: Vec::new(),
            backward: Vec::new(),
            edges: 0,
            total_weight: W::zero(),
            empty: BTreeMap::new(),
        }
    }

    /// Creates an empty graph with `vertices` pre-allocated vertex slots.
    pub fn with_capacity(vertices: usize) -> Self {
        DirectedGraph {
            forward: vec![BTreeMap::new(); vertices],
            backward: vec![BTreeMap::new(); vertices],
            edges: 0,
            total_weight: W::zero(),
            empty: BTreeMap::new(),
        }
    }

    /// Grows the adjacency arrays so that vertex `v` is addressable.
    fn ensure_vertex(&mut self, v: usize) {
        if v >= self.forward.len() {
            self.forward.resize(v + 1, BTreeMap::new());
            self.backward.resize(v + 1, BTreeMap::new());
        }
    }

    /// Adds `src -> dst` with the given weight. Duplicate edges accumulate
    /// their weights (spec §3 invariant) rather than overwriting. Grows the
    /// adjacency to `max(src, dst) + 1` vertices as needed. The caller is
    /// responsible for rejecting non-positive weights (spec §4.1): this is
    /// enforced by `crate::io::read_graph` at construction time, not by the
    /// container itself.
    pub fn add_edge(&mut self, src: usize, dst: usize, weight: W) {
        self.ensure_vertex(src.max(dst));

        match self.forward[src].get_mut(&dst) {
            Some(existing) => *existing = *existing + weight,
            None => {
                self.forward[src].insert(dst, weight);
                self.edges += 1;
            }
        }

        match self.backward[dst].get_mut(&src) {
            Some(existing) => *existing = *existing + weight,
            None => {
                self.backward[dst].insert(src, weight);
            }
        }

        self.total_weight = self.total_weight + weight;
    }
}

impl<W> Default for DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<W> Graph<W> for DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn edge(&self, src: usize, dst: usize) -> W {
        self.forward
            .get(src)
            .and_then(|fs| fs.get(&dst))
            .copied()
            .unwrap_or_else(W::zero)
    }

    fn forward_star(&self, src: usize) -> &BTreeMap<usize, W> {
        self.forward.get(src).unwrap_or(&self.empty)
    }

    fn backward_star(&self, dst: usize) -> &BTreeMap<usize, W> {
        self.backward.get(dst).unwrap_or(&self.empty)
    }

    fn vertex_count(&self) -> usize {
        self.forward.len()
    }

    fn edges(&self) -> usize {
        self.edges
    }

    fn total_weight(&self) -> W {
        self.total_weight
    }

    fn in_weighted_degree(&self, v: usize) -> W {
        self.backward_star(v)
            .values()
            .fold(W::zero(), |acc, &w| acc + w)
    }

    fn out_weighted_degree(&self, v: usize) -> W {
        self.forward_star(v)
            .values()
            .fold(W::zero(), |acc, &w| acc + w)
    }
}
