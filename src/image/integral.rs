//! Summed-area tables for window statistics.
//!
//! Both tables have `(width + 1) * (height + 1)` entries with a zero first row
//! and column, so the sum over any window is four lookups. Sums are kept in
//! `u64`, which is exact for any `u8` image that fits in memory.

use crate::image::ImageView;

/// Integral image of pixel values and squared pixel values.
#[derive(Clone, Debug)]
pub struct IntegralImage {
    width: usize,
    height: usize,
    sum: Vec<u64>,
    sum_sq: Vec<u64>,
}

impl IntegralImage {
    /// Builds both tables in a single pass over the view.
    pub fn from_view(img: ImageView<'_, u8>) -> Self {
        let width = img.width();
        let height = img.height();
        let cols = width + 1;
        let mut sum = vec![0u64; cols * (height + 1)];
        let mut sum_sq = vec![0u64; cols * (height + 1)];

        for (y, row) in img.rows().enumerate() {
            let mut row_sum = 0u64;
            let mut row_sq = 0u64;
            let above = y * cols;
            let here = (y + 1) * cols;
            for (x, &value) in row.iter().enumerate() {
                let v = u64::from(value);
                row_sum += v;
                row_sq += v * v;
                sum[here + x + 1] = sum[above + x + 1] + row_sum;
                sum_sq[here + x + 1] = sum_sq[above + x + 1] + row_sq;
            }
        }

        Self {
            width,
            height,
            sum,
            sum_sq,
        }
    }

    /// Returns the width of the source image.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height of the source image.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `(Σ I, Σ I²)` over the window with top-left `(x, y)`.
    ///
    /// The caller guarantees the window lies inside the image.
    pub fn window_sums(&self, x: usize, y: usize, width: usize, height: usize) -> (u64, u64) {
        debug_assert!(x + width <= self.width && y + height <= self.height);
        let cols = self.width + 1;
        let a = y * cols + x;
        let b = y * cols + x + width;
        let c = (y + height) * cols + x;
        let d = (y + height) * cols + x + width;
        (
            self.sum[d] + self.sum[a] - self.sum[b] - self.sum[c],
            self.sum_sq[d] + self.sum_sq[a] - self.sum_sq[b] - self.sum_sq[c],
        )
    }
}
