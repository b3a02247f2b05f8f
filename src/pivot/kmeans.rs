use crate::vertex_info::VertexInfo;
use num_traits::{Float, Zero};
use std::fmt::Debug;

/// Aggregates an exact pivot set down to `kFrac * pivots.len()` centroids via
/// deterministic k-means++ (spec §4.6).
///
/// Seeding is deterministic rather than randomized: the first centroid is the
/// first pivot, and each subsequent centroid is chosen by maintaining, per
/// candidate, a running arithmetic mean `D[v]` of its `contribution_distance`
/// to every centroid chosen so far (updated incrementally as
/// `D[v] <- D[v] * (1 - 1/i) + d(lastCentroid, v) * (1/i)` at step `i`) and
/// picking the candidate with the largest `D[v]` — so the same input always
/// produces the same centroids. Iteration
/// reassigns every pivot to its nearest centroid, recomputes each centroid as
/// the existing pivot nearest the cluster's fingerprint mean (centroids must
/// stay real pivots, since only real pivots have a vertex id to run Brandes
/// from), and stops once within-cluster variance drops to `stop_variance` or
/// `max_iter` rounds have run.
///
/// Centroids that end up identical (two clusters collapsing onto the same
/// representative vertex) are de-duplicated by dropping the later one; their
/// weights are *not* merged into the survivor (spec §9 Open Question — the
/// original leaves this undocumented, and merging would silently inflate a
/// single pivot's sampled weight beyond what its own class earned).
pub fn aggregate_pivots_kmeans<W>(
    pivots: &[usize],
    weights: &[W],
    vi: &[VertexInfo<W>],
    k_frac: f64,
    max_iter: usize,
    stop_variance: W,
) -> (Vec<usize>, Vec<W>)
where
    W: Float + Zero + Debug + Copy,
{
    let n = pivots.len();
    if n == 0 {
        return (Vec::new(), Vec::new());
    }
    let k = ((k_frac * n as f64).floor() as usize).max(1).min(n);
    if k >= n {
        return (pivots.to_vec(), weights.to_vec());
    }

    let mut centroid_idx = vec![0usize]; // index into `pivots`
    let mut running_mean = vec![W::zero(); n];
    for i in 1..k {
        let last = *centroid_idx.last().unwrap();
        let i_f = i as f64;
        let decay = W::from(1.0 - 1.0 / i_f).unwrap_or_else(W::zero);
        let step = W::from(1.0 / i_f).unwrap_or_else(W::one);
        for v in 0..n {
            let d = vi[pivots[v]].contribution_distance(&vi[pivots[last]]);
            running_mean[v] = running_mean[v] * decay + d * step;
        }
        let mut farthest = 0;
        for v in 1..n {
            if running_mean[v] > running_mean[farthest] {
                farthest = v;
            }
        }
        centroid_idx.push(farthest);
    }

    let mut assignment = vec![0usize; n];
    let mut iter = 0;
    loop {
        for i in 0..n {
            let mut best = 0;
            let mut best_d = vi[pivots[i]].contribution_distance(&vi[pivots[centroid_idx[0]]]);
            for (c, &cidx) in centroid_idx.iter().enumerate().skip(1) {
                let d = vi[pivots[i]].contribution_distance(&vi[pivots[cidx]]);
                if d < best_d {
                    best_d = d;
                    best = c;
                }
            }
            assignment[i] = best;
        }

        let mut new_centroid_idx = centroid_idx.clone();
        for (c, slot) in new_centroid_idx.iter_mut().enumerate() {
            let members: Vec<usize> = (0..n).filter(|&i| assignment[i] == c).collect();
            if members.is_empty() {
                continue;
            }
            let mut mean = vi[pivots[members[0]]].clone();
            for &m in &members[1..] {
                mean += &vi[pivots[m]];
            }
            mean /= W::from(members.len()).unwrap_or_else(W::one);

            let mut nearest = members[0];
            let mut nearest_d = vi[pivots[members[0]]].contribution_distance(&mean);
            for &m in &members[1..] {
                let d = vi[pivots[m]].contribution_distance(&mean);
                if d < nearest_d {
                    nearest_d = d;
                    nearest = m;
                }
            }
            *slot = nearest;
        }

        let variance = (0..n)
            .map(|i| vi[pivots[i]].contribution_distance(&vi[pivots[new_centroid_idx[assignment[i]]]]))
            .fold(W::zero(), |acc, d| acc + d);

        let converged = new_centroid_idx == centroid_idx;
        centroid_idx = new_centroid_idx;
        iter += 1;
        if converged || variance <= stop_variance || iter >= max_iter {
            break;
        }
    }

    let mut cluster_weight = vec![W::zero(); centroid_idx.len()];
    for i in 0..n {
        cluster_weight[assignment[i]] = cluster_weight[assignment[i]] + weights[i];
    }

    let mut out_pivots = Vec::new();
    let mut out_weights = Vec::new();
    let mut seen = std::collections::BTreeSet::new();
    for (c, &cidx) in centroid_idx.iter().enumerate() {
        let v = pivots[cidx];
        if seen.insert(v) {
            out_pivots.push(v);
            out_weights.push(cluster_weight[c]);
        }
    }

    (out_pivots, out_weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordered_float::OrderedFloat;

    type W = OrderedFloat<f64>;
    fn w(x: f64) -> W {
        OrderedFloat(x)
    }

    fn vi_with(sp_cnt: &[f64], sp_len: &[f64]) -> VertexInfo<W> {
        let mut v = VertexInfo::new(sp_cnt.len());
        for i in 0..sp_cnt.len() {
            v.set_sp_cnt(i, w(sp_cnt[i]));
            v.set_sp_len(i, w(sp_len[i]));
        }
        v
    }

    #[test]
    fn k_frac_one_returns_pivots_unchanged() {
        let pivots = vec![0, 3, 4];
        let weights = vec![w(2.0), w(2.0), w(1.0)];
        let vi = vec![
            vi_with(&[1.0], &[1.0]),
            vi_with(&[0.0], &[0.0]),
            vi_with(&[0.0], &[0.0]),
            vi_with(&[2.0], &[2.0]),
            vi_with(&[3.0], &[3.0]),
        ];
        let (p, wt) = aggregate_pivots_kmeans(&pivots, &weights, &vi, 1.0, 10, w(0.0));
        assert_eq!(p, pivots);
        assert_eq!(wt, weights);
    }

    #[test]
    fn aggregation_reduces_pivot_count_and_preserves_total_weight() {
        let pivots = vec![0, 1, 2, 3];
        let weights = vec![w(1.0), w(1.0), w(1.0), w(1.0)];
        // Two well-separated pairs: {0,1} close, {2,3} close.
        let vi = vec![
            vi_with(&[1.0], &[1.0]),
            vi_with(&[1.0], &[1.1]),
            vi_with(&[9.0], &[9.0]),
            vi_with(&[9.0], &[9.1]),
        ];
        let (p, wt) = aggregate_pivots_kmeans(&pivots, &weights, &vi, 0.5, 10, w(0.0));
        assert_eq!(p.len(), 2);
        let total: W = wt.iter().fold(w(0.0), |acc, &x| acc + x);
        assert_eq!(total, w(4.0));
    }

    #[test]
    fn empty_pivot_set_yields_empty_aggregation() {
        let (p, wt) = aggregate_pivots_kmeans::<W>(&[], &[], &[], 0.5, 10, w(0.0));
        assert!(p.is_empty());
        assert!(wt.is_empty());
    }
}
