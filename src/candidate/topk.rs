//! Deterministic ranking of scored transforms.

use crate::grid::Transform;
use std::cmp::Ordering;

/// One grid candidate together with its best correlation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoredTransform {
    /// Position of the transform in grid enumeration order.
    pub grid_index: usize,
    /// The candidate transform.
    pub transform: Transform,
    /// Best correlation score of the rasterized mask.
    pub score: f64,
    /// Column of the best window.
    pub x: usize,
    /// Row of the best window.
    pub y: usize,
}

/// Orders candidates best-first: higher score, then earlier grid index.
pub(crate) fn ranking(a: &ScoredTransform, b: &ScoredTransform) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.grid_index.cmp(&b.grid_index))
}

/// Returns the better of two candidates under [`ranking`].
#[cfg_attr(not(feature = "rayon"), allow(dead_code))]
pub(crate) fn better(a: ScoredTransform, b: ScoredTransform) -> ScoredTransform {
    if ranking(&b, &a) == Ordering::Less {
        b
    } else {
        a
    }
}

/// Collects the best `k` candidates with O(k) insertion cost.
pub struct TopK {
    k: usize,
    items: Vec<ScoredTransform>,
}

impl TopK {
    /// Creates a new Top-K collector.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            items: Vec::with_capacity(k),
        }
    }

    /// Pushes a candidate, evicting the worst one if at capacity.
    pub fn push(&mut self, item: ScoredTransform) {
        if self.k == 0 {
            return;
        }
        if self.items.len() < self.k {
            self.items.push(item);
            return;
        }

        let mut worst_idx = 0usize;
        for (idx, cur) in self.items.iter().enumerate().skip(1) {
            if ranking(cur, &self.items[worst_idx]) == Ordering::Greater {
                worst_idx = idx;
            }
        }

        if ranking(&item, &self.items[worst_idx]) == Ordering::Less {
            self.items[worst_idx] = item;
        }
    }

    /// Returns candidates best-first.
    pub fn into_sorted(mut self) -> Vec<ScoredTransform> {
        self.items.sort_by(ranking);
        self.items
    }
}
