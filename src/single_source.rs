use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::sssp::sssp;
use num_traits::{Float, Zero};
use std::fmt::Debug;

/// Single-source Brandes dependency over the full graph (spec §4.7).
///
/// Structurally identical to the cluster evaluator's per-source pass, but
/// runs on the whole graph rather than a `SubGraph` and returns a dense
/// per-vertex dependency contribution instead of collecting border
/// fingerprints.
///
/// This is the one place an out-of-range source actually reaches a public
/// boundary (every internal caller draws `source` from a graph's own vertex
/// set), so it is the one place that validates it and returns
/// `Error::SourceNotFound` instead of trusting the invariant.
pub fn single_source_brandes<W, G>(graph: &G, source: usize) -> Result<Vec<W>>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    if source >= graph.vertex_count() {
        return Err(Error::SourceNotFound(source));
    }

    let result = sssp(graph, source);
    let n = result.dist.len();
    let mut delta = vec![W::zero(); n];
    let mut dependency = vec![W::zero(); n];

    for &w in result.visit_order.iter().rev() {
        for &v in &result.pred[w] {
            let c = result.sigma[v] / result.sigma[w] * (W::one() + delta[w]);
            delta[v] = delta[v] + c;
        }
        if w != source {
            dependency[w] = delta[w];
        }
    }

    Ok(dependency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DirectedGraph;
    use ordered_float::OrderedFloat;

    type W = OrderedFloat<f64>;
    fn w(x: f64) -> W {
        OrderedFloat(x)
    }

    #[test]
    fn single_vertex_graph_has_zero_dependency() {
        let g = DirectedGraph::<W>::with_capacity(1);
        let dep = single_source_brandes(&g, 0).unwrap();
        assert_eq!(dep, vec![w(0.0)]);
    }

    #[test]
    fn two_vertex_one_edge_graph_has_zero_dependency() {
        let mut g = DirectedGraph::<W>::new();
        g.add_edge(0, 1, w(1.0));
        let dep = single_source_brandes(&g, 0).unwrap();
        assert_eq!(dep, vec![w(0.0), w(0.0)]);
    }

    #[test]
    fn middle_vertex_of_a_path_gets_full_dependency() {
        // 0 -> 1 -> 2: every shortest path 0..2 passes through 1.
        let mut g = DirectedGraph::<W>::new();
        g.add_edge(0, 1, w(1.0));
        g.add_edge(1, 2, w(1.0));
        let dep = single_source_brandes(&g, 0).unwrap();
        assert_eq!(dep[1], w(1.0));
    }

    #[test]
    fn out_of_range_source_returns_source_not_found() {
        let g = DirectedGraph::<W>::with_capacity(2);
        let err = single_source_brandes(&g, 5).unwrap_err();
        assert!(matches!(err, crate::error::Error::SourceNotFound(5)));
    }
}
