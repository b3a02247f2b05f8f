use crate::subgraph::SubGraph;
use crate::vertex_info::VertexInfo;
use num_traits::{Float, Zero};
use std::fmt::Debug;

/// What to do with a topological class whose only members are border
/// vertices (spec §4.5 step 4, §9 Open Question). The original never picks a
/// border vertex as a pivot by default; `AllowBorderPivot` is available for
/// callers who have verified their driver can tolerate a pivot that is also a
/// border (e.g. single-community graphs).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PivotPolicy {
    #[default]
    SkipBorderOnlyClass,
    AllowBorderPivot,
}

/// Selects pivots from a community's exact intra-cluster BC and per-vertex
/// fingerprints (spec §4.5).
///
/// Groups `community` into topological-equivalence classes by normalized
/// `VertexInfo::compare`, then from each class picks the non-border member
/// with the smallest intra-cluster BC (ties broken by vertex id, since the
/// input is walked in ascending order and a strict `<` keeps the first
/// minimum found). Returns the chosen pivots and, in the same order, each
/// pivot's class cardinality as its representative weight.
pub fn select_pivots<W, G>(
    community: &SubGraph<'_, W, G>,
    bc: &[W],
    vi: &mut [VertexInfo<W>],
    policy: PivotPolicy,
) -> (Vec<usize>, Vec<W>)
where
    W: Float + Zero + Debug + Copy,
    G: crate::graph::Graph<W>,
{
    for &v in community.vertex_set() {
        vi[v].normalize();
    }

    // A community with no border at all draws no pivots (spec §9 Open
    // Question "isolated communities"): no path can cross a boundary that
    // doesn't exist, so intra-BC already accounts for everything this
    // community contributes and a pivot pass would only double-count it.
    if community.borders().is_empty() {
        return (Vec::new(), Vec::new());
    }

    let members: Vec<usize> = community.vertex_set().iter().copied().collect();
    let mut pivots = Vec::new();
    let mut weights = Vec::new();
    let mut assigned = vec![false; members.len()];

    for i in 0..members.len() {
        if assigned[i] {
            continue;
        }
        let mut class = vec![members[i]];
        assigned[i] = true;
        for j in (i + 1)..members.len() {
            if !assigned[j] && vi[members[i]].same_class(&vi[members[j]]) {
                class.push(members[j]);
                assigned[j] = true;
            }
        }

        let mut best: Option<usize> = None;
        for &v in &class {
            if community.is_border(v) {
                continue;
            }
            best = match best {
                None => Some(v),
                Some(b) if bc[v] < bc[b] => Some(v),
                Some(b) => Some(b),
            };
        }

        let chosen = match best {
            Some(v) => Some(v),
            None => match policy {
                PivotPolicy::SkipBorderOnlyClass => None,
                PivotPolicy::AllowBorderPivot => class.first().copied(),
            },
        };

        if let Some(v) = chosen {
            pivots.push(v);
            weights.push(W::from(class.len()).unwrap_or_else(W::zero));
        }
    }

    (pivots, weights)
}
