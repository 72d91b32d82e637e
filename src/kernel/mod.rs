//! Normalized cross-correlation between a mask and an edge frame.
//!
//! Scores follow the `TM_CCOEFF_NORMED` definition: both the mask and the
//! frame window are mean-subtracted, and the dot product is divided by the
//! product of their norms, so the result lies in `[-1, 1]` and a uniform
//! brightness or contrast change of either image does not move it.

use crate::image::integral::IntegralImage;
use crate::image::ImageView;
use crate::template::MaskPlan;
use crate::util::AlignResult;

pub mod scalar;

pub use scalar::{scan_best, score_at};

/// Best correlation of one mask against one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Correlation {
    /// Correlation coefficient in `[-1, 1]`.
    pub score: f64,
    /// Column of the top-left corner of the best window.
    pub x: usize,
    /// Row of the top-left corner of the best window.
    pub y: usize,
}

/// Read-only frame plus the window statistics shared by every candidate.
///
/// Building this once per frame lets all masks of the transform grid reuse
/// the same summed-area tables.
#[derive(Clone, Debug)]
pub struct EdgeFrame<'a> {
    view: ImageView<'a, u8>,
    integral: IntegralImage,
}

impl<'a> EdgeFrame<'a> {
    /// Precomputes window statistics for `view`.
    pub fn new(view: ImageView<'a, u8>) -> Self {
        let integral = IntegralImage::from_view(view);
        Self { view, integral }
    }

    /// Returns the underlying frame view.
    pub fn view(&self) -> ImageView<'a, u8> {
        self.view
    }

    pub fn width(&self) -> usize {
        self.view.width()
    }

    pub fn height(&self) -> usize {
        self.view.height()
    }

    pub(crate) fn integral(&self) -> &IntegralImage {
        &self.integral
    }
}

/// Correlates two images directly, building both plans on the fly.
///
/// Prefer [`scan_best`] with a reused [`EdgeFrame`] when scoring many masks
/// against the same frame.
pub fn correlate(mask: ImageView<'_, u8>, frame: ImageView<'_, u8>) -> AlignResult<Correlation> {
    let plan = MaskPlan::from_view(mask);
    let frame = EdgeFrame::new(frame);
    scan_best(&frame, &plan)
}
