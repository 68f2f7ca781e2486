pub mod serde;

use std::fmt::{self, Debug};

use num::Num;

use crate::utils::sort::radix_sort_u32_soa;

/// SpVec is a sparse vector that omits zero elements.
/// It holds `inds` and `vals` side by side (SoA):
/// `inds` stores the element positions,
/// `vals` stores the element values.
///
/// Entries are always kept in ascending `inds` order.
#[derive(Clone, PartialEq)]
pub struct SpVec<N = f32>
where
    N: Num + Copy,
{
    inds: Vec<u32>,
    vals: Vec<N>,
    /// logical dimension
    len: usize,
}

impl<N> SpVec<N>
where
    N: Num + Copy,
{
    #[inline]
    pub fn new(len: usize) -> Self {
        SpVec { inds: Vec::new(), vals: Vec::new(), len }
    }

    /// Build from unordered `(index, value)` pairs.
    /// Zero values are dropped; indices must be unique and `< len`.
    pub fn from_unsorted(len: usize, mut inds: Vec<u32>, mut vals: Vec<N>) -> Self
    where
        N: Default,
    {
        debug_assert_eq!(inds.len(), vals.len());
        radix_sort_u32_soa(&mut inds, &mut vals);
        let mut out = SpVec {
            inds: Vec::with_capacity(inds.len()),
            vals: Vec::with_capacity(vals.len()),
            len,
        };
        for (i, v) in inds.into_iter().zip(vals) {
            debug_assert!((i as usize) < len, "index out of bounds");
            if v != N::zero() {
                out.inds.push(i);
                out.vals.push(v);
            }
        }
        out
    }

    /// Build from parts that are already sorted, unique and in range.
    /// Returns `None` when those conditions do not hold.
    pub fn from_sorted_parts(len: usize, inds: Vec<u32>, vals: Vec<N>) -> Option<Self> {
        if inds.len() != vals.len() {
            return None;
        }
        if inds.windows(2).any(|w| w[0] >= w[1]) {
            return None;
        }
        if inds.last().is_some_and(|&last| last as usize >= len) {
            return None;
        }
        Some(SpVec { inds, vals, len })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// number of stored (non-zero) entries
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<N> {
        if index >= self.len {
            return None;
        }
        match self.inds.binary_search(&(index as u32)) {
            Ok(pos) => Some(self.vals[pos]),
            Err(_) => Some(N::zero()),
        }
    }

    /// Iterate stored `(index, value)` pairs in index order
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, N)> + '_ {
        self.inds.iter().map(|&i| i as usize).zip(self.vals.iter().copied())
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.inds
    }

    #[inline]
    pub fn values(&self) -> &[N] {
        &self.vals
    }
}

impl<N> SpVec<N>
where
    N: Num + Copy + Into<f64>,
{
    /// Dot product by merging the two index lists.
    /// d(a, b) = Σ(a_i * b_i)
    pub fn dot(&self, other: &Self) -> f64 {
        debug_assert_eq!(self.len, other.len, "Vectors must be of the same length to compute dot product.");
        let (mut i, mut j) = (0, 0);
        let mut sum = 0_f64;
        while i < self.inds.len() && j < other.inds.len() {
            match self.inds[i].cmp(&other.inds[j]) {
                std::cmp::Ordering::Equal => {
                    sum += self.vals[i].into() * other.vals[j].into();
                    i += 1;
                    j += 1;
                }
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
            }
        }
        sum
    }

    /// ||a|| = sqrt(Σ(a_i^2))
    pub fn norm(&self) -> f64 {
        self.vals.iter().map(|&v| {
            let v: f64 = v.into();
            v * v
        }).sum::<f64>().sqrt()
    }
}

impl SpVec<f32> {
    /// Scale to unit length. A zero vector stays zero.
    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for v in &mut self.vals {
                *v = (*v as f64 / norm) as f32;
            }
        }
    }
}

impl<N: Num + Copy + Debug> Debug for SpVec<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "SpVec(len: {}, nnz: {})", self.len, self.nnz())
        } else {
            f.debug_map().entries(self.inds.iter().zip(self.vals.iter())).finish()
        }
    }
}
