use crate::graph::Graph;
use crate::single_source::single_source_brandes;
use num_traits::{Float, Zero};
use rayon::prelude::*;
use std::fmt::Debug;

/// Exact BC fallback (spec §4.9): single-source Brandes from every vertex,
/// summed. Provided for small graphs and for verifying the clustered
/// approximation (spec §8's "sum matches within tolerance" property), not
/// as the interesting core of this crate.
pub fn exact_bc<W, G>(graph: &G) -> Vec<W>
where
    W: Float + Zero + Debug + Copy + Ord + Send + Sync,
    G: Graph<W> + Sync,
{
    let n = graph.vertex_count();
    (0..n)
        .into_par_iter()
        .map(|s| {
            single_source_brandes(graph, s)
                .expect("s is drawn from 0..vertex_count() and is always in bounds")
        })
        .reduce(
            || vec![W::zero(); n],
            |mut a, b| {
                for i in 0..n {
                    a[i] = a[i] + b[i];
                }
                a
            },
        )
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
    fn star_graph_center_has_highest_bc() {
        // center -> {a, b, c}: no shortest path needs to pass through a leaf.
        let mut g = DirectedGraph::<W>::new();
        g.add_edge(0, 1, w(1.0));
        g.add_edge(0, 2, w(1.0));
        g.add_edge(0, 3, w(1.0));
        g.add_edge(1, 2, w(5.0));
        let bc = exact_bc(&g);
        assert_eq!(bc[1], w(0.0));
        assert_eq!(bc[2], w(0.0));
        assert_eq!(bc[3], w(0.0));
    }

    #[test]
    fn chain_middle_vertices_accumulate_bc_from_both_directions() {
        // 0 -> 1 -> 2 -> 3: vertex 1 sits on 0->2 and 0->3; vertex 2 on 0->3 and 1->3.
        let mut g = DirectedGraph::<W>::new();
        g.add_edge(0, 1, w(1.0));
        g.add_edge(1, 2, w(1.0));
        g.add_edge(2, 3, w(1.0));
        let bc = exact_bc(&g);
        assert_eq!(bc[1], w(2.0));
        assert_eq!(bc[2], w(2.0));
    }
}
