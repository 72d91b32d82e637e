//! Precomputed mask statistics for normalized cross-correlation.

use crate::image::ImageView;

/// Sparse view of a mask plus the sums the correlation needs.
///
/// Only non-zero pixels are stored, so the cross term `Σ T·I` costs one
/// multiply per outline pixel. A mask with zero variance (blank or uniform)
/// is still a valid plan; it scores `0` everywhere.
#[derive(Clone, Debug)]
pub struct MaskPlan {
    width: usize,
    height: usize,
    sum_t: u64,
    sum_t2: u64,
    den_t: u128,
    nonzero: Vec<(usize, usize, u64)>,
}

impl MaskPlan {
    /// Builds a plan from a mask view.
    pub fn from_view(mask: ImageView<'_, u8>) -> Self {
        let width = mask.width();
        let height = mask.height();
        let mut sum_t = 0u64;
        let mut sum_t2 = 0u64;
        let mut nonzero = Vec::new();

        for (y, row) in mask.rows().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                if value == 0 {
                    continue;
                }
                let v = u64::from(value);
                sum_t += v;
                sum_t2 += v * v;
                nonzero.push((x, y, v));
            }
        }

        let n = (width as u128) * (height as u128);
        let den_t = n * u128::from(sum_t2) - u128::from(sum_t) * u128::from(sum_t);

        Self {
            width,
            height,
            sum_t,
            sum_t2,
            den_t,
            nonzero,
        }
    }

    /// Returns the mask width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the mask height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of pixels in the mask.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Returns `Σ T`.
    pub fn sum(&self) -> u64 {
        self.sum_t
    }

    /// Returns `Σ T²`.
    pub fn sum_sq(&self) -> u64 {
        self.sum_t2
    }

    /// Returns `n·Σ T² − (Σ T)²`, i.e. `n²` times the mask variance.
    pub fn scaled_variance(&self) -> u128 {
        self.den_t
    }

    /// Returns true when the mask has no contrast to correlate against.
    pub fn is_degenerate(&self) -> bool {
        self.den_t == 0
    }

    /// Returns the non-zero pixels as `(x, y, value)`.
    pub fn nonzero(&self) -> &[(usize, usize, u64)] {
        &self.nonzero
    }
}
