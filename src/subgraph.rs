use crate::error::{Error, Result};
use crate::graph::Graph;
use num_traits::{Float, Zero};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::Debug;

/// Policy for the two "zero edges" edge cases a sub-graph construction can
/// hit (spec §4.2, §7): a single vertex with no intra-community edge, and a
/// whole community with no border at all. Both default to warn-and-continue.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubGraphPolicy {
    /// Fail construction when a vertex of `U` has no edge inside `U`.
    pub strict_disconnected_vertex: bool,
    /// Fail construction when the resulting sub-graph has zero borders.
    pub strict_isolated_community: bool,
}

/// Induced view of a vertex subset `U` over a reference graph `G` (spec §3,
/// §4.2). Border vertices get a trimmed, owned copy of their star; every
/// other vertex delegates straight through to the reference graph, since its
/// full star is already contained in `U`.
#[derive(Debug)]
pub struct SubGraph<'g, W, G>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    reference: &'g G,
    vertices: BTreeSet<usize>,
    borders: Vec<usize>,
    border_set: BTreeSet<usize>,
    trimmed_forward: HashMap<usize, BTreeMap<usize, W>>,
    trimmed_backward: HashMap<usize, BTreeMap<usize, W>>,
    edges: usize,
    empty: BTreeMap<usize, W>,
}

impl<'g, W, G> SubGraph<'g, W, G>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    /// Builds the induced sub-graph over `vertices`, scanning each vertex's
    /// forward/backward stars against `U` in `O(log|U|)` membership checks.
    pub fn new(
        vertices: BTreeSet<usize>,
        reference: &'g G,
        policy: SubGraphPolicy,
    ) -> Result<Self> {
        let mut borders = Vec::new();
        let mut border_set = BTreeSet::new();
        let mut trimmed_forward = HashMap::new();
        let mut trimmed_backward = HashMap::new();
        let mut edges = 0usize;

        for &v in &vertices {
            let mut inside_fwd = BTreeMap::new();
            let mut outside_fwd = false;
            for (&dst, &weight) in reference.forward_star(v) {
                if vertices.contains(&dst) {
                    inside_fwd.insert(dst, weight);
                } else {
                    outside_fwd = true;
                }
            }

            let mut inside_bwd = BTreeMap::new();
            let mut outside_bwd = false;
            for (&src, &weight) in reference.backward_star(v) {
                if vertices.contains(&src) {
                    inside_bwd.insert(src, weight);
                } else {
                    outside_bwd = true;
                }
            }

            if inside_fwd.is_empty() && inside_bwd.is_empty() {
                if policy.strict_disconnected_vertex {
                    return Err(Error::InconsistentSubGraph(v));
                }
                log::warn!("sub-graph vertex {v} has no edge inside its own vertex set");
            }

            edges += inside_fwd.len();

            if outside_fwd || outside_bwd {
                border_set.insert(v);
                borders.push(v);
            }
            if outside_fwd {
                trimmed_forward.insert(v, inside_fwd);
            }
            if outside_bwd {
                trimmed_backward.insert(v, inside_bwd);
            }
        }

        if borders.is_empty() && !vertices.is_empty() {
            if policy.strict_isolated_community {
                return Err(Error::InvalidInput(
                    "sub-graph has no border vertices".to_string(),
                ));
            }
            log::warn!("sub-graph over {} vertices has no border", vertices.len());
        }

        Ok(SubGraph {
            reference,
            vertices,
            borders,
            border_set,
            trimmed_forward,
            trimmed_backward,
            edges,
            empty: BTreeMap::new(),
        })
    }

    /// The vertex set `U` this view was built over.
    pub fn vertex_set(&self) -> &BTreeSet<usize> {
        &self.vertices
    }

    /// Border vertices, in deterministic ascending order.
    pub fn borders(&self) -> &[usize] {
        &self.borders
    }

    pub fn is_border(&self, v: usize) -> bool {
        self.border_set.contains(&v)
    }

    pub fn reference_graph(&self) -> &'g G {
        self.reference
    }
}

impl<'g, W, G> Graph<W> for SubGraph<'g, W, G>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    fn edge(&self, src: usize, dst: usize) -> W {
        self.forward_star(src).get(&dst).copied().unwrap_or_else(W::zero)
    }

    fn forward_star(&self, src: usize) -> &BTreeMap<usize, W> {
        if !self.vertices.contains(&src) {
            return &self.empty;
        }
        self.trimmed_forward
            .get(&src)
            .unwrap_or_else(|| self.reference.forward_star(src))
    }

    fn backward_star(&self, dst: usize) -> &BTreeMap<usize, W> {
        if !self.vertices.contains(&dst) {
            return &self.empty;
        }
        self.trimmed_backward
            .get(&dst)
            .unwrap_or_else(|| self.reference.backward_star(dst))
    }

    fn vertex_count(&self) -> usize {
        self.reference.vertex_count()
    }

    fn edges(&self) -> usize {
        self.edges
    }

    fn total_weight(&self) -> W {
        self.vertices
            .iter()
            .fold(W::zero(), |acc, &v| acc + self.out_weighted_degree(v))
    }

    fn in_weighted_degree(&self, v: usize) -> W {
        self.backward_star(v).values().fold(W::zero(), |acc, &w| acc + w)
    }

    fn out_weighted_degree(&self, v: usize) -> W {
        self.forward_star(v).values().fold(W::zero(), |acc, &w| acc + w)
    }
}
