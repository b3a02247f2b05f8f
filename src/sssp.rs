use crate::data_structures::BinaryHeapWrapper;
use crate::graph::Graph;
use num_traits::{Float, Zero};
use std::fmt::Debug;

/// Output of a single-source run of the Dijkstra variant from spec §4.3:
/// shortest-path counts, predecessor sets, a non-decreasing-distance visit
/// stack, and the distance array itself.
#[derive(Debug, Clone)]
pub struct SsspResult<W>
where
    W: Float + Zero + Debug + Copy,
{
    pub dist: Vec<W>,
    pub sigma: Vec<W>,
    pub pred: Vec<Vec<usize>>,
    /// Vertices in non-decreasing distance order from the source; consuming
    /// it back-to-front gives the Brandes dependency-accumulation order.
    pub visit_order: Vec<usize>,
    pub source: usize,
}

/// Runs the shared Dijkstra-with-predecessor-sets variant from spec §4.3 on
/// any `Graph<W>` (a full graph or a `SubGraph` view — the latter's trimmed
/// stars keep the search inside the sub-graph without extra bookkeeping
/// here). The priority queue orders by `(dist, index)` so results are
/// reproducible regardless of insertion order (spec §9).
pub fn sssp<W, G>(graph: &G, source: usize) -> SsspResult<W>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    let n = graph.vertex_count();
    debug_assert!(
        source < n,
        "sssp: source {source} out of bounds (n={n}) — callers must validate at the API boundary"
    );
    let mut dist = vec![W::infinity(); n];
    let mut sigma = vec![W::zero(); n];
    let mut pred: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut visit_order = Vec::with_capacity(n);

    dist[source] = W::zero();
    sigma[source] = W::one();

    let mut queue = BinaryHeapWrapper::new();
    queue.push(source, W::zero());

    while let Some((v, priority)) = queue.pop() {
        // Stale queue entry: a shorter path to v was already finalized.
        if priority > dist[v] {
            continue;
        }
        visit_order.push(v);

        for (&w, &weight) in graph.forward_star(v) {
            let new_dist = dist[v] + weight;

            if new_dist < dist[w] {
                dist[w] = new_dist;
                sigma[w] = W::zero();
                pred[w].clear();
                queue.push(w, new_dist);
            }

            if new_dist == dist[w] {
                pred[w].push(v);
                sigma[w] = sigma[w] + sigma[v];
            }
        }
    }

    SsspResult {
        dist,
        sigma,
        pred,
        visit_order,
        source,
    }
}
