use num_traits::{Float, Zero};
use std::cmp::Ordering;
use std::fmt::Debug;

/// Fixed penalty added to `contribution_distance` for every border coordinate
/// where exactly one of the two operands has `sp_cnt == 0` (spec §3).
const CONTRIBUTION_PENALTY: f64 = 1000.0;

/// Border-fingerprint for a single vertex of a community (spec §3).
///
/// Holds two parallel length-`borders(C)` vectors: `sp_len[i]` is the length
/// of the shortest path to border `i`, `sp_cnt[i]` the number of such
/// shortest paths. Both are indexed in the community's border order.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexInfo<W>
where
    W: Float + Zero + Debug + Copy,
{
    sp_len: Vec<W>,
    sp_cnt: Vec<W>,
}

impl<W> VertexInfo<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Allocates a zero-filled fingerprint with `border_count` coordinates.
    pub fn new(border_count: usize) -> Self {
        VertexInfo {
            sp_len: vec![W::zero(); border_count],
            sp_cnt: vec![W::zero(); border_count],
        }
    }

    /// Number of border coordinates this fingerprint carries.
    pub fn borders(&self) -> usize {
        self.sp_len.len()
    }

    pub fn sp_len(&self, i: usize) -> W {
        self.sp_len[i]
    }

    pub fn sp_cnt(&self, i: usize) -> W {
        self.sp_cnt[i]
    }

    pub fn set_sp_len(&mut self, i: usize, len: W) {
        self.sp_len[i] = len;
    }

    pub fn set_sp_cnt(&mut self, i: usize, cnt: W) {
        self.sp_cnt[i] = cnt;
    }

    /// Minimum `sp_len` coordinate, or zero when there are no borders.
    pub fn min_sp_len(&self) -> W {
        self.sp_len
            .iter()
            .copied()
            .fold(None, |acc, v| match acc {
                None => Some(v),
                Some(m) if v < m => Some(v),
                Some(m) => Some(m),
            })
            .unwrap_or_else(W::zero)
    }

    /// Subtracts `min_sp_len()` from every `sp_len` coordinate, in place.
    /// Idempotent and leaves `sp_cnt` untouched (spec §8).
    pub fn normalize(&mut self) {
        let min = self.min_sp_len();
        for l in self.sp_len.iter_mut() {
            *l = *l - min;
        }
    }

    /// Sum of squared componentwise differences across both `sp_len` and
    /// `sp_cnt`. Symmetric and non-negative.
    pub fn squared_distance(&self, other: &Self) -> W {
        debug_assert_eq!(self.borders(), other.borders());
        let mut dist = W::zero();
        for i in 0..self.borders() {
            let dl = self.sp_len[i] - other.sp_len[i];
            let dc = self.sp_cnt[i] - other.sp_cnt[i];
            dist = dist + dl * dl + dc * dc;
        }
        dist
    }

    /// Like `squared_distance`, but any coordinate where exactly one operand
    /// has `sp_cnt == 0` contributes a fixed penalty instead of the actual
    /// componentwise difference; both-zero coordinates contribute 0.
    pub fn contribution_distance(&self, other: &Self) -> W {
        debug_assert_eq!(self.borders(), other.borders());
        let penalty = W::from(CONTRIBUTION_PENALTY).unwrap_or_else(W::zero);
        let mut dist = W::zero();
        for i in 0..self.borders() {
            let a_zero = self.sp_cnt[i].is_zero();
            let b_zero = other.sp_cnt[i].is_zero();
            if a_zero && b_zero {
                continue;
            }
            if a_zero != b_zero {
                dist = dist + penalty;
                continue;
            }
            let dl = self.sp_len[i] - other.sp_len[i];
            let dc = self.sp_cnt[i] - other.sp_cnt[i];
            dist = dist + dl * dl + dc * dc;
        }
        dist
    }

    /// Unpadded lexicographic compare on `(sp_cnt[i], sp_len[i])` pairs in
    /// border order — the basis for topological-class equality (spec §3).
    pub fn compare(&self, other: &Self) -> Ordering {
        debug_assert_eq!(self.borders(), other.borders());
        for i in 0..self.borders() {
            match self.sp_cnt[i].partial_cmp(&other.sp_cnt[i]) {
                Some(Ordering::Equal) | None => {}
                Some(ord) => return ord,
            }
            match self.sp_len[i].partial_cmp(&other.sp_len[i]) {
                Some(Ordering::Equal) | None => {}
                Some(ord) => return ord,
            }
        }
        Ordering::Equal
    }

    pub fn same_class(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl<W> std::ops::AddAssign<&VertexInfo<W>> for VertexInfo<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn add_assign(&mut self, other: &VertexInfo<W>) {
        debug_assert_eq!(self.borders(), other.borders());
        for i in 0..self.borders() {
            self.sp_len[i] = self.sp_len[i] + other.sp_len[i];
            self.sp_cnt[i] = self.sp_cnt[i] + other.sp_cnt[i];
        }
    }
}

impl<W> std::ops::DivAssign<W> for VertexInfo<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn div_assign(&mut self, scalar: W) {
        for i in 0..self.borders() {
            self.sp_len[i] = self.sp_len[i] / scalar;
            self.sp_cnt[i] = self.sp_cnt[i] / scalar;
        }
    }
}
